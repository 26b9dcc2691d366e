//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState, endpoints,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_delete_category_page, get_edit_category_page, get_new_category_page,
        update_category_endpoint,
    },
    not_found::get_404_not_found,
    post::{
        create_post_endpoint, delete_post_endpoint, get_browse_posts_page, get_delete_post_page,
        get_edit_post_page, get_filter_posts_page, get_new_post_page, get_posts_page,
        get_search_posts_page, get_sort_posts_page, update_post_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Pages with a form render on GET and accept the submission on POST at
/// the same path.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_posts_page))
        .route(
            endpoints::NEW_POST_VIEW,
            get(get_new_post_page).post(create_post_endpoint),
        )
        .route(
            endpoints::EDIT_POST_VIEW,
            get(get_edit_post_page).post(update_post_endpoint),
        )
        .route(
            endpoints::DELETE_POST_VIEW,
            get(get_delete_post_page).post(delete_post_endpoint),
        )
        .route(endpoints::SEARCH_POSTS_VIEW, get(get_search_posts_page))
        .route(endpoints::FILTER_POSTS_VIEW, get(get_filter_posts_page))
        .route(endpoints::SORT_POSTS_VIEW, get(get_sort_posts_page))
        .route(endpoints::BROWSE_POSTS_VIEW, get(get_browse_posts_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(
            endpoints::NEW_CATEGORY_VIEW,
            get(get_new_category_page).post(create_category_endpoint),
        )
        .route(
            endpoints::EDIT_CATEGORY_VIEW,
            get(get_edit_category_page).post(update_category_endpoint),
        )
        .route(
            endpoints::DELETE_CATEGORY_VIEW,
            get(get_delete_category_page).post(delete_category_endpoint),
        )
        .fallback(get(get_404_not_found))
        .with_state(state)
}
