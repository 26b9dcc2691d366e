//! Post filter page: restrict the listing to one category.

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
    category::{Category, get_all_categories},
    html::{BUTTON_PRIMARY_STYLE, FORM_SELECT_STYLE, base, page_main},
    navigation::NavBar,
    post::{
        PostWithCategory,
        db::search_posts,
        views::{post_cards, result_count},
    },
    query::PostQuery,
};

/// The state needed for the filter page.
#[derive(Debug, Clone)]
pub struct FilterPostsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for FilterPostsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// The query parameters accepted by the filter page.
#[derive(Debug, Deserialize)]
pub struct FilterPostsParams {
    /// The category to show. Zero, missing, or non-numeric means all.
    pub category_id: Option<String>,
}

/// Render the filter page with the posts in the chosen category.
pub async fn get_filter_posts_page(
    State(state): State<FilterPostsPageState>,
    Query(params): Query<FilterPostsParams>,
) -> Result<Response, Error> {
    let query = PostQuery::from_params(None, params.category_id.as_deref(), None);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let posts = search_posts(&query, &connection)
        .inspect_err(|error| tracing::error!("Failed to filter posts: {error}"))?;

    Ok(filter_view(&state.base_path, &categories, &query, &posts).into_response())
}

fn filter_view(
    base_path: &BasePath,
    categories: &[Category],
    query: &PostQuery,
    posts: &[PostWithCategory],
) -> Markup {
    let nav_bar = NavBar::new(base_path, endpoints::FILTER_POSTS_VIEW).into_html();
    let form_action = base_path.join(endpoints::FILTER_POSTS_VIEW);
    let selected = query.category_id.unwrap_or(0);

    let content = html!(
        (nav_bar)

        (page_main(&html!(
            section class="space-y-4"
            {
                h1 class="text-xl font-bold" { "Filter Posts" }

                form method="get" action=(form_action) class="flex gap-2"
                {
                    select name="category_id" class=(FORM_SELECT_STYLE)
                    {
                        option value="0" selected[selected == 0] { "All categories" }

                        @for category in categories {
                            option value=(category.id) selected[category.id == selected]
                            {
                                (category.name)
                            }
                        }
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
                }

                (result_count(posts.len()))

                (post_cards(base_path, posts))
            }
        )))
    );

    base("Filter Posts", &content)
}
