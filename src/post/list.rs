//! The home page, which lists every post newest first.

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
    html::{LINK_STYLE, base, page_main, success_banner},
    navigation::NavBar,
    post::{PostWithCategory, db::search_posts, views::post_cards},
    query::PostQuery,
};

/// The state needed for the posts listing page.
#[derive(Debug, Clone)]
pub struct PostsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for PostsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// The query parameters accepted by the posts listing page.
#[derive(Debug, Deserialize)]
pub struct PostsPageParams {
    /// A one-off success message carried through a redirect.
    pub success: Option<String>,
}

/// Render the home page with every post, newest first.
pub async fn get_posts_page(
    State(state): State<PostsPageState>,
    Query(params): Query<PostsPageParams>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let posts = search_posts(&PostQuery::default(), &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve posts: {error}"))?;

    Ok(posts_view(&state.base_path, &posts, params.success.as_deref()).into_response())
}

fn posts_view(
    base_path: &BasePath,
    posts: &[PostWithCategory],
    success_message: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(base_path, endpoints::ROOT).into_html();
    let new_post_route = base_path.join(endpoints::NEW_POST_VIEW);

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
                    h1 class="text-xl font-bold" { "Posts" }

                    a href=(new_post_route) class=(LINK_STYLE) { "New post" }
                }

                @if posts.is_empty() {
                    p class="text-center text-slate-500 py-8"
                    {
                        "No posts yet. "
                        a href=(new_post_route) class=(LINK_STYLE) { "Write your first post" }
                    }
                } @else {
                    (post_cards(base_path, posts))
                }
            }
        )))
    );

    base("Posts", &content)
}
