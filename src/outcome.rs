//! The result type returned by write handlers.

use axum::response::{IntoResponse, Redirect, Response};
use maud::Markup;

/// What a write handler decided to do: redisplay the form or redirect.
///
/// Keeping this as data means the handlers can be tested on the decision
/// itself, and the transport layer turns it into the right HTTP response
/// (a page render, or a 303 redirect so that refreshing the browser cannot
/// resubmit the write).
#[derive(Debug)]
pub enum FormOutcome {
    /// Redisplay the page, typically the form with validation errors.
    Render(Markup),
    /// Redirect-after-post to the given URL.
    Redirect(String),
}

impl FormOutcome {
    /// Build a redirect that carries a success flash in the query string.
    ///
    /// The message is urlencoded, never embedded raw, so it survives
    /// spaces and punctuation.
    pub fn redirect_with_success(url: &str, message: &str) -> Self {
        match serde_urlencoded::to_string([("success", message)]) {
            Ok(query) => Self::Redirect(format!("{url}?{query}")),
            Err(error) => {
                tracing::error!("could not encode success message: {error}");
                Self::Redirect(url.to_owned())
            }
        }
    }
}

impl IntoResponse for FormOutcome {
    fn into_response(self) -> Response {
        match self {
            FormOutcome::Render(markup) => markup.into_response(),
            FormOutcome::Redirect(url) => Redirect::to(&url).into_response(),
        }
    }
}
