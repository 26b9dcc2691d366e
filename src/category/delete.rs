//! Category delete confirmation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, BasePath, Error, endpoints,
    category::{Category, count_posts_in_category, db::delete_category, get_category},
    database_id::parse_path_id,
    html::{
        BUTTON_DANGER_DISABLED_STYLE, BUTTON_DANGER_STYLE, CARD_STYLE, LINK_STYLE, base,
        page_main,
    },
    navigation::NavBar,
    not_found::missing_resource_response,
    outcome::FormOutcome,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for DeleteCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// Render the delete confirmation page for a category.
///
/// A category that still has posts cannot be deleted: the page explains
/// why and offers no working delete button.
pub async fn get_delete_category_page(
    Path(category_id): Path<String>,
    State(state): State<DeleteCategoryEndpointState>,
) -> Result<Response, Error> {
    let Some(category_id) = parse_path_id(&category_id) else {
        return Ok(category_not_found(&state.base_path));
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = match get_category(category_id, &connection) {
        Ok(category) => category,
        Err(Error::NotFound) => return Ok(category_not_found(&state.base_path)),
        Err(error) => {
            tracing::error!("Failed to retrieve category {category_id}: {error}");
            return Err(error);
        }
    };

    let post_count = count_posts_in_category(category_id, &connection)
        .inspect_err(|error| tracing::error!("Could not count posts: {error}"))?;

    Ok(delete_category_view(&state.base_path, &category, post_count).into_response())
}

/// Handle the category delete form submission.
///
/// The post count is checked again at submission time in case posts were
/// added between rendering the confirmation page and submitting it. The
/// restrict-on-delete foreign key backstops the same rule in the database.
pub async fn delete_category_endpoint(
    Path(category_id): Path<String>,
    State(state): State<DeleteCategoryEndpointState>,
) -> Result<Response, Error> {
    let Some(category_id) = parse_path_id(&category_id) else {
        return Ok(category_not_found(&state.base_path));
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = match get_category(category_id, &connection) {
        Ok(category) => category,
        Err(Error::NotFound) => return Ok(category_not_found(&state.base_path)),
        Err(error) => return Err(error),
    };

    let post_count = count_posts_in_category(category_id, &connection)
        .inspect_err(|error| tracing::error!("Could not count posts: {error}"))?;

    if post_count > 0 {
        return Ok(delete_category_view(&state.base_path, &category, post_count).into_response());
    }

    match delete_category(category_id, &connection) {
        Ok(_) => Ok(FormOutcome::redirect_with_success(
            &state.base_path.join(endpoints::CATEGORIES_VIEW),
            "Category deleted!",
        )
        .into_response()),
        Err(Error::DeleteMissingCategory) => Ok(category_not_found(&state.base_path)),
        Err(Error::CategoryInUse) => {
            Ok(delete_category_view(&state.base_path, &category, post_count).into_response())
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {category_id}: {error}"
            );
            Err(error)
        }
    }
}

fn category_not_found(base_path: &BasePath) -> Response {
    missing_resource_response(
        "Category not found.",
        &base_path.join(endpoints::CATEGORIES_VIEW),
        "Back to categories",
    )
}

fn delete_category_view(base_path: &BasePath, category: &Category, post_count: u32) -> Markup {
    let delete_endpoint =
        endpoints::format_endpoint(endpoints::DELETE_CATEGORY_VIEW, category.id);
    let nav_bar = NavBar::new(base_path, &delete_endpoint).into_html();
    let form_action = base_path.join(&delete_endpoint);
    let back_url = base_path.join(endpoints::CATEGORIES_VIEW);

    let content = html! {
        (nav_bar)

        (page_main(&html!(
            div class=(CARD_STYLE)
            {
                h1 class="text-xl font-bold mb-4" { "Delete Category" }

                @if post_count > 0 {
                    p class="mb-4"
                    {
                        "'" (category.name) "' still has " (post_count)
                        " post(s) and cannot be deleted. Move or delete those posts first."
                    }

                    div class="flex gap-4 items-center"
                    {
                        button disabled class=(BUTTON_DANGER_DISABLED_STYLE) { "Delete Category" }

                        a href=(back_url) class=(LINK_STYLE) { "Back to categories" }
                    }
                } @else {
                    p class="mb-4"
                    {
                        "Are you sure you want to delete '" (category.name)
                        "'? This cannot be undone."
                    }

                    form method="post" action=(form_action) class="flex gap-4 items-center"
                    {
                        button type="submit" class=(BUTTON_DANGER_STYLE) { "Delete Category" }

                        a href=(back_url) class=(LINK_STYLE) { "Cancel" }
                    }
                }
            }
        )))
    };

    base("Delete Category", &content)
}
