//! Post management: CRUD pages plus the search, filter, sort, and browse
//! read pages.

mod browse;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod filter;
mod list;
mod search;
mod sort;
mod views;

pub use browse::get_browse_posts_page;
pub use create::{create_post_endpoint, get_new_post_page};
pub use db::{create_post, create_post_table, delete_post, get_post, search_posts, update_post};
pub use delete::{delete_post_endpoint, get_delete_post_page};
pub use domain::{Post, PostBuilder, PostWithCategory, ValidatedPost};
pub use edit::{get_edit_post_page, update_post_endpoint};
pub use filter::get_filter_posts_page;
pub use list::get_posts_page;
pub use search::get_search_posts_page;
pub use sort::get_sort_posts_page;
