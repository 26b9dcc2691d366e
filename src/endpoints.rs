//! The page endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/posts/{post_id}/edit', use
//! [format_endpoint]. Pages that contain a form both render on GET and
//! accept the submission on POST at the same path.

/// The home page, which lists all posts.
pub const ROOT: &str = "/";
/// The page for creating a new post.
pub const NEW_POST_VIEW: &str = "/posts/new";
/// The page for editing an existing post.
pub const EDIT_POST_VIEW: &str = "/posts/{post_id}/edit";
/// The confirmation page for deleting a post.
pub const DELETE_POST_VIEW: &str = "/posts/{post_id}/delete";
/// The page for searching posts by title.
pub const SEARCH_POSTS_VIEW: &str = "/posts/search";
/// The page for filtering posts by category.
pub const FILTER_POSTS_VIEW: &str = "/posts/filter";
/// The page for sorting posts by creation date.
pub const SORT_POSTS_VIEW: &str = "/posts/sort";
/// The combined search + filter + sort page.
pub const BROWSE_POSTS_VIEW: &str = "/posts/browse";

/// The page for listing all categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/categories/new";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/categories/{category_id}/edit";
/// The confirmation page for deleting a category.
pub const DELETE_CATEGORY_VIEW: &str = "/categories/{category_id}/delete";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/posts/{post_id}/edit', '{post_id}'
/// is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII
/// characters and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
