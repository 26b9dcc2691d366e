//! The 404 page and the friendly not-found view used for bad path IDs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::html::{CARD_STYLE, LINK_STYLE, base, error_view, page_main};

/// The fallback handler for URLs that match no route.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Build the 404 response.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "That page does not exist.",
            "Check the URL, or go back to the posts overview.",
        ),
    )
        .into_response()
}

/// A benign not-found page for requests with an invalid or unknown ID in
/// the path, e.g. `/posts/abc/edit`.
///
/// Unlike the bare 404 page this keeps the caller's page shell and offers a
/// way back to the listing the visitor came from.
pub fn missing_resource_response(message: &str, back_url: &str, back_label: &str) -> Response {
    let content = page_main(&html! {
        div class=(CARD_STYLE)
        {
            p class="mb-4" { (message) }

            a href=(back_url) class=(LINK_STYLE) { (back_label) }
        }
    });

    (StatusCode::NOT_FOUND, base("Not Found", &content)).into_response()
}
