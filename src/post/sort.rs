//! Post sort page: order the listing by creation date.

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
    html::{BUTTON_PRIMARY_STYLE, FORM_SELECT_STYLE, base, page_main},
    navigation::NavBar,
    post::{
        PostWithCategory,
        db::search_posts,
        views::{post_cards, result_count},
    },
    query::{PostQuery, SortOrder},
};

/// The state needed for the sort page.
#[derive(Debug, Clone)]
pub struct SortPostsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for SortPostsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// The query parameters accepted by the sort page.
#[derive(Debug, Deserialize)]
pub struct SortPostsParams {
    /// The sort token. Anything unrecognized means newest first.
    pub sort: Option<String>,
}

/// Render the sort page with the posts in the chosen order.
pub async fn get_sort_posts_page(
    State(state): State<SortPostsPageState>,
    Query(params): Query<SortPostsParams>,
) -> Result<Response, Error> {
    let query = PostQuery::from_params(None, None, params.sort.as_deref());

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let posts = search_posts(&query, &connection)
        .inspect_err(|error| tracing::error!("Failed to sort posts: {error}"))?;

    Ok(sort_view(&state.base_path, &query, &posts).into_response())
}

fn sort_view(base_path: &BasePath, query: &PostQuery, posts: &[PostWithCategory]) -> Markup {
    let nav_bar = NavBar::new(base_path, endpoints::SORT_POSTS_VIEW).into_html();
    let form_action = base_path.join(endpoints::SORT_POSTS_VIEW);

    let content = html!(
        (nav_bar)

        (page_main(&html!(
            section class="space-y-4"
            {
                h1 class="text-xl font-bold" { "Sort Posts" }

                form method="get" action=(form_action) class="flex gap-2"
                {
                    select name="sort" class=(FORM_SELECT_STYLE)
                    {
                        @for order in [SortOrder::Newest, SortOrder::Oldest] {
                            option value=(order.token()) selected[order == query.sort]
                            {
                                (order.label())
                            }
                        }
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Sort" }
                }

                (result_count(posts.len()))

                (post_cards(base_path, posts))
            }
        )))
    );

    base("Sort Posts", &content)
}
