//! Post delete confirmation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, BasePath, Error, endpoints,
    database_id::parse_path_id,
    html::{BUTTON_DANGER_STYLE, CARD_STYLE, LINK_STYLE, base, page_main},
    navigation::NavBar,
    not_found::missing_resource_response,
    outcome::FormOutcome,
    post::{Post, db::delete_post, get_post},
};

/// The state needed for deleting a post.
#[derive(Debug, Clone)]
pub struct DeletePostEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for DeletePostEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// Render the delete confirmation page for a post.
pub async fn get_delete_post_page(
    Path(post_id): Path<String>,
    State(state): State<DeletePostEndpointState>,
) -> Result<Response, Error> {
    let Some(post_id) = parse_path_id(&post_id) else {
        return Ok(post_not_found(&state.base_path));
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match get_post(post_id, &connection) {
        Ok(post) => Ok(delete_post_view(&state.base_path, &post).into_response()),
        Err(Error::NotFound) => Ok(post_not_found(&state.base_path)),
        Err(error) => {
            tracing::error!("Failed to retrieve post {post_id}: {error}");
            Err(error)
        }
    }
}

/// Handle the post delete form submission.
pub async fn delete_post_endpoint(
    Path(post_id): Path<String>,
    State(state): State<DeletePostEndpointState>,
) -> Result<Response, Error> {
    let Some(post_id) = parse_path_id(&post_id) else {
        return Ok(post_not_found(&state.base_path));
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match delete_post(post_id, &connection) {
        Ok(_) => Ok(FormOutcome::redirect_with_success(
            &state.base_path.join(endpoints::ROOT),
            "Post deleted!",
        )
        .into_response()),
        Err(Error::DeleteMissingPost) => Ok(post_not_found(&state.base_path)),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting post {post_id}: {error}"
            );
            Err(error)
        }
    }
}

fn post_not_found(base_path: &BasePath) -> Response {
    missing_resource_response(
        "Post not found.",
        &base_path.join(endpoints::ROOT),
        "Back to posts",
    )
}

fn delete_post_view(base_path: &BasePath, post: &Post) -> Markup {
    let delete_endpoint = endpoints::format_endpoint(endpoints::DELETE_POST_VIEW, post.id);
    let nav_bar = NavBar::new(base_path, &delete_endpoint).into_html();
    let form_action = base_path.join(&delete_endpoint);
    let back_url = base_path.join(endpoints::ROOT);

    let content = html! {
        (nav_bar)

        (page_main(&html!(
            div class=(CARD_STYLE)
            {
                h1 class="text-xl font-bold mb-4" { "Delete Post" }

                p class="mb-4"
                {
                    "Are you sure you want to delete '" (post.title)
                    "'? This cannot be undone."
                }

                form method="post" action=(form_action) class="flex gap-4 items-center"
                {
                    button type="submit" class=(BUTTON_DANGER_STYLE) { "Delete Post" }

                    a href=(back_url) class=(LINK_STYLE) { "Cancel" }
                }
            }
        )))
    };

    base("Delete Post", &content)
}

#[cfg(test)]
mod delete_post_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        BasePath, Error,
        category::{CategoryName, create_category},
        database_id::DatabaseID,
        post::{PostBuilder, create_post, delete_post_endpoint, get_delete_post_page, get_post},
        test_utils::{assert_redirect, assert_valid_html, must_get_form, parse_html_document},
    };

    use super::DeletePostEndpointState;

    fn get_delete_post_state() -> DeletePostEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        crate::db::initialize(&connection).expect("Could not initialize database");

        DeletePostEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
            base_path: BasePath::new(""),
        }
    }

    fn create_test_post(state: &DeletePostEndpointState) -> DatabaseID {
        let connection = state.db_connection.lock().unwrap();
        let category = create_category(CategoryName::new_unchecked("Guides"), &connection)
            .expect("Could not create test category");
        create_post(
            PostBuilder {
                title: "Doomed".to_string(),
                content: "Goodbye".to_string(),
                category_id: category.id,
                created_at: datetime!(2024-01-01 0:00 UTC),
            },
            &connection,
        )
        .expect("Could not create test post")
        .id
    }

    #[tokio::test]
    async fn confirmation_page_shows_post_title_and_form() {
        let state = get_delete_post_state();
        let post_id = create_test_post(&state);

        let response = get_delete_post_page(Path(post_id.to_string()), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        must_get_form(&html);
        assert!(html.html().contains("Doomed"));
    }

    #[tokio::test]
    async fn delete_post_endpoint_succeeds() {
        let state = get_delete_post_state();
        let post_id = create_test_post(&state);

        let response = delete_post_endpoint(Path(post_id.to_string()), State(state.clone()))
            .await
            .unwrap();

        assert_redirect(&response, "/?success=Post+deleted%21");
        assert_eq!(
            get_post(post_id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn delete_post_endpoint_with_unknown_id_returns_not_found() {
        let state = get_delete_post_state();

        let response = delete_post_endpoint(Path("999999".to_string()), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_post_endpoint_with_non_numeric_id_returns_not_found() {
        let state = get_delete_post_state();

        let response = delete_post_endpoint(Path("abc".to_string()), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
