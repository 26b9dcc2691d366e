//! Post search page: case-insensitive partial match on the title.

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
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, base, page_main},
    navigation::NavBar,
    post::{
        PostWithCategory,
        db::search_posts,
        views::{post_cards, result_count},
    },
    query::PostQuery,
};

/// The state needed for the search page.
#[derive(Debug, Clone)]
pub struct SearchPostsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for SearchPostsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// The query parameters accepted by the search page.
#[derive(Debug, Deserialize)]
pub struct SearchPostsParams {
    /// The search term. Blank or missing means all posts.
    pub q: Option<String>,
}

/// Render the search page with the posts matching the search term.
pub async fn get_search_posts_page(
    State(state): State<SearchPostsPageState>,
    Query(params): Query<SearchPostsParams>,
) -> Result<Response, Error> {
    let query = PostQuery::from_params(params.q.as_deref(), None, None);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let posts = search_posts(&query, &connection)
        .inspect_err(|error| tracing::error!("Failed to search posts: {error}"))?;

    Ok(search_view(&state.base_path, &query, &posts).into_response())
}

fn search_view(base_path: &BasePath, query: &PostQuery, posts: &[PostWithCategory]) -> Markup {
    let nav_bar = NavBar::new(base_path, endpoints::SEARCH_POSTS_VIEW).into_html();
    let form_action = base_path.join(endpoints::SEARCH_POSTS_VIEW);
    let search_term = query.title_fragment.as_deref().unwrap_or("");

    let content = html!(
        (nav_bar)

        (page_main(&html!(
            section class="space-y-4"
            {
                h1 class="text-xl font-bold" { "Search Posts" }

                form method="get" action=(form_action) class="flex gap-2"
                {
                    input
                        type="text"
                        name="q"
                        value=(search_term)
                        placeholder="Search by title"
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Search" }
                }

                (result_count(posts.len()))

                (post_cards(base_path, posts))
            }
        )))
    );

    base("Search Posts", &content)
}
