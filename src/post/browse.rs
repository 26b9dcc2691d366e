//! The combined browse page: search, filter, and sort in one form.
//!
//! With `debug=1` in the query string the page also shows the SQL
//! statement that ran and the values bound to its placeholders, which is
//! useful when demonstrating how the predicates combine.

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
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE, base,
        page_main,
    },
    navigation::NavBar,
    post::{
        PostWithCategory,
        db::search_posts,
        views::{post_cards, result_count},
    },
    query::{PostQuery, SortOrder},
};

/// The state needed for the browse page.
#[derive(Debug, Clone)]
pub struct BrowsePostsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for BrowsePostsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// The query parameters accepted by the browse page.
#[derive(Debug, Deserialize)]
pub struct BrowsePostsParams {
    /// The search term. Blank or missing means all posts.
    pub q: Option<String>,
    /// The category to show. Zero, missing, or non-numeric means all.
    pub category_id: Option<String>,
    /// The sort token. Anything unrecognized means newest first.
    pub sort: Option<String>,
    /// Set to "1" to show the executed SQL and its bound parameters.
    pub debug: Option<String>,
}

/// Render the browse page with every predicate applied at once.
pub async fn get_browse_posts_page(
    State(state): State<BrowsePostsPageState>,
    Query(params): Query<BrowsePostsParams>,
) -> Result<Response, Error> {
    let query = PostQuery::from_params(
        params.q.as_deref(),
        params.category_id.as_deref(),
        params.sort.as_deref(),
    );
    let show_debug = params.debug.as_deref() == Some("1");

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let posts = search_posts(&query, &connection)
        .inspect_err(|error| tracing::error!("Failed to browse posts: {error}"))?;

    Ok(browse_view(&state.base_path, &categories, &query, &posts, show_debug).into_response())
}

fn browse_view(
    base_path: &BasePath,
    categories: &[Category],
    query: &PostQuery,
    posts: &[PostWithCategory],
    show_debug: bool,
) -> Markup {
    let nav_bar = NavBar::new(base_path, endpoints::BROWSE_POSTS_VIEW).into_html();
    let form_action = base_path.join(endpoints::BROWSE_POSTS_VIEW);
    let search_term = query.title_fragment.as_deref().unwrap_or("");
    let selected_category = query.category_id.unwrap_or(0);

    let content = html!(
        (nav_bar)

        (page_main(&html!(
            section class="space-y-4"
            {
                h1 class="text-xl font-bold" { "Browse Posts" }

                form method="get" action=(form_action)
                    class="grid gap-4 sm:grid-cols-4 items-end"
                {
                    div class="sm:col-span-2"
                    {
                        label for="q" class=(FORM_LABEL_STYLE) { "Title" }

                        input
                            id="q"
                            type="text"
                            name="q"
                            value=(search_term)
                            placeholder="Search by title"
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                        select id="category_id" name="category_id" class=(FORM_SELECT_STYLE)
                        {
                            option value="0" selected[selected_category == 0] { "All categories" }

                            @for category in categories {
                                option
                                    value=(category.id)
                                    selected[category.id == selected_category]
                                {
                                    (category.name)
                                }
                            }
                        }
                    }

                    div
                    {
                        label for="sort" class=(FORM_LABEL_STYLE) { "Sort" }

                        select id="sort" name="sort" class=(FORM_SELECT_STYLE)
                        {
                            @for order in [SortOrder::Newest, SortOrder::Oldest] {
                                option value=(order.token()) selected[order == query.sort]
                                {
                                    (order.label())
                                }
                            }
                        }
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
                }

                @if show_debug {
                    (debug_panel(query))
                }

                (result_count(posts.len()))

                (post_cards(base_path, posts))
            }
        )))
    );

    base("Browse Posts", &content)
}

fn debug_panel(query: &PostQuery) -> Markup {
    let prepared = query.to_sql();
    let bindings = prepared.describe_parameters();

    html!(
        div class="p-4 bg-slate-900 text-slate-100 rounded text-sm font-mono overflow-x-auto"
        {
            p { (prepared.statement) }

            @if bindings.is_empty() {
                p class="text-slate-400" { "(no bound parameters)" }
            } @else {
                @for binding in &bindings {
                    p { (binding) }
                }
            }
        }
    )
}

#[cfg(test)]
mod browse_posts_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        BasePath,
        category::{CategoryName, create_category},
        database_id::DatabaseID,
        post::{PostBuilder, create_post, get_browse_posts_page},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{BrowsePostsPageState, BrowsePostsParams};

    fn get_browse_posts_state() -> BrowsePostsPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        crate::db::initialize(&connection).expect("Could not initialize database");

        BrowsePostsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
            base_path: BasePath::new(""),
        }
    }

    fn seed_posts(state: &BrowsePostsPageState) -> DatabaseID {
        let connection = state.db_connection.lock().unwrap();
        let guides = create_category(CategoryName::new_unchecked("Guides"), &connection)
            .expect("Could not create test category");
        let news = create_category(CategoryName::new_unchecked("News"), &connection)
            .expect("Could not create test category");
        let posts = [
            (1, "Working with forms", guides.id),
            (2, "Working with queries", news.id),
            (3, "Release notes", news.id),
        ];
        for (day, title, category_id) in posts {
            create_post(
                PostBuilder {
                    title: title.to_string(),
                    content: "Content".to_string(),
                    category_id,
                    created_at: datetime!(2024-01-01 0:00 UTC).replace_day(day).unwrap(),
                },
                &connection,
            )
            .unwrap();
        }

        news.id
    }

    fn params(
        q: Option<&str>,
        category_id: Option<String>,
        sort: Option<&str>,
        debug: Option<&str>,
    ) -> BrowsePostsParams {
        BrowsePostsParams {
            q: q.map(str::to_string),
            category_id,
            sort: sort.map(str::to_string),
            debug: debug.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn combines_search_and_filter() {
        let state = get_browse_posts_state();
        let news_id = seed_posts(&state);

        let response = get_browse_posts_page(
            State(state),
            Query(params(
                Some("working"),
                Some(news_id.to_string()),
                None,
                None,
            )),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let body = html.html();
        assert!(body.contains("Working with queries"));
        assert!(!body.contains("Working with forms"));
        assert!(!body.contains("Release notes"));
        assert!(body.contains("1 post(s)"));
    }

    #[tokio::test]
    async fn search_term_with_all_categories_sorted_oldest_first() {
        let state = get_browse_posts_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let guides = create_category(CategoryName::new_unchecked("Guides"), &connection)
                .expect("Could not create test category");
            let news = create_category(CategoryName::new_unchecked("News"), &connection)
                .expect("Could not create test category");
            let posts = [
                (1, "Connecting with PDO", guides.id),
                (2, "PDO prepared statements", news.id),
                (3, "Release notes", news.id),
            ];
            for (day, title, category_id) in posts {
                create_post(
                    PostBuilder {
                        title: title.to_string(),
                        content: "Content".to_string(),
                        category_id,
                        created_at: datetime!(2024-01-01 0:00 UTC).replace_day(day).unwrap(),
                    },
                    &connection,
                )
                .unwrap();
            }
        }

        let response = get_browse_posts_page(
            State(state),
            Query(params(
                Some("PDO"),
                Some("0".to_string()),
                Some("oldest"),
                None,
            )),
        )
        .await
        .unwrap();

        let body = parse_html_document(response).await.html();
        assert!(body.contains("Connecting with PDO"));
        assert!(body.contains("PDO prepared statements"));
        assert!(!body.contains("Release notes"));
        assert!(body.contains("2 post(s)"));

        let earlier_position = body.find("Connecting with PDO").unwrap();
        let later_position = body.find("PDO prepared statements").unwrap();
        assert!(
            earlier_position < later_position,
            "posts are not oldest first"
        );
    }

    #[tokio::test]
    async fn no_parameters_shows_all_posts_newest_first() {
        let state = get_browse_posts_state();
        seed_posts(&state);

        let response = get_browse_posts_page(
            State(state),
            Query(params(None, None, None, None)),
        )
        .await
        .unwrap();

        let body = parse_html_document(response).await.html();
        assert!(body.contains("3 post(s)"));

        let newest_position = body.find("Release notes").unwrap();
        let oldest_position = body.find("Working with forms").unwrap();
        assert!(newest_position < oldest_position, "posts are not newest first");
    }

    #[tokio::test]
    async fn debug_panel_shows_sql_and_bindings() {
        let state = get_browse_posts_state();
        seed_posts(&state);

        let response = get_browse_posts_page(
            State(state),
            Query(params(Some("working"), None, None, Some("1"))),
        )
        .await
        .unwrap();

        let body = parse_html_document(response).await.html();
        assert!(body.contains("SELECT p.id"));
        assert!(body.contains(":search"));
        assert!(body.contains("%working%"));
    }

    #[tokio::test]
    async fn debug_panel_is_hidden_without_the_flag() {
        let state = get_browse_posts_state();
        seed_posts(&state);

        let response = get_browse_posts_page(
            State(state),
            Query(params(Some("working"), None, None, None)),
        )
        .await
        .unwrap();

        let body = parse_html_document(response).await.html();
        assert!(!body.contains("SELECT p.id"));
    }
}
