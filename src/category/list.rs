//! Categories listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, BasePath, Error, endpoints,
    category::{CategoryWithPostCount, get_categories_with_post_counts},
    html::{
        LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, page_main, success_banner,
    },
    navigation::NavBar,
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// The query parameters accepted by the categories listing page.
#[derive(Debug, Deserialize)]
pub struct CategoriesPageParams {
    /// A one-off success message carried through a redirect.
    pub success: Option<String>,
}

/// Render the categories listing page with post counts.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
    Query(params): Query<CategoriesPageParams>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories_with_post_counts(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(categories_view(&state.base_path, &categories, params.success.as_deref()).into_response())
}

fn categories_view(
    base_path: &BasePath,
    categories: &[CategoryWithPostCount],
    success_message: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(base_path, endpoints::CATEGORIES_VIEW).into_html();
    let new_category_route = base_path.join(endpoints::NEW_CATEGORY_VIEW);

    let table_row = |row: &CategoryWithPostCount| {
        let edit_url = base_path.join(&endpoints::format_endpoint(
            endpoints::EDIT_CATEGORY_VIEW,
            row.category.id,
        ));
        let delete_url = base_path.join(&endpoints::format_endpoint(
            endpoints::DELETE_CATEGORY_VIEW,
            row.category.id,
        ));

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (row.category.name) }

                td class=(TABLE_CELL_STYLE) { (row.post_count) }

                td class=(TABLE_CELL_STYLE) { (row.category.created_at.date()) }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                        a href=(delete_url) class=(LINK_STYLE) { "Delete" }
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        (page_main(&html!(
            @if let Some(message) = success_message {
                (success_banner(message))
            }

            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE) { "New category" }
                }

                table class="w-full text-sm text-left"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Posts" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Created" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for row in categories {
                            (table_row(row))
                        }

                        @if categories.is_empty() {
                            tr
                            {
                                td colspan="4" class="px-4 py-4 text-center text-slate-500"
                                {
                                    "No categories yet. "
                                    a href=(new_category_route) class=(LINK_STYLE)
                                    {
                                        "Create your first category"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        )))
    );

    base("Categories", &content)
}

#[cfg(test)]
mod categories_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        BasePath,
        category::{CategoryName, create_category, get_categories_page},
        post::{PostBuilder, create_post},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{CategoriesPageParams, CategoriesPageState};

    fn get_categories_page_state() -> CategoriesPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        crate::db::initialize(&connection).expect("Could not initialize database");

        CategoriesPageState {
            db_connection: Arc::new(Mutex::new(connection)),
            base_path: BasePath::new(""),
        }
    }

    #[tokio::test]
    async fn lists_categories_with_post_counts() {
        let state = get_categories_page_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let category = create_category(CategoryName::new_unchecked("Guides"), &connection)
                .expect("Could not create test category");
            create_post(
                PostBuilder {
                    title: "Hello".to_string(),
                    content: "World".to_string(),
                    category_id: category.id,
                    created_at: datetime!(2024-01-01 0:00 UTC),
                },
                &connection,
            )
            .expect("Could not create test post");
        }

        let response = get_categories_page(
            State(state),
            Query(CategoriesPageParams { success: None }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let body = html.html();
        assert!(body.contains("Guides"));
        assert!(body.contains("New category"));
    }

    #[tokio::test]
    async fn shows_empty_state_when_no_categories() {
        let state = get_categories_page_state();

        let response = get_categories_page(
            State(state),
            Query(CategoriesPageParams { success: None }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        assert!(html.html().contains("No categories yet."));
    }

    #[tokio::test]
    async fn shows_success_banner_from_query() {
        let state = get_categories_page_state();

        let response = get_categories_page(
            State(state),
            Query(CategoriesPageParams {
                success: Some("Category added!".to_string()),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        assert!(html.html().contains("Category added!"));
    }
}
