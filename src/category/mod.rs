//! Category management for grouping posts.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    count_posts_in_category, create_category, create_category_table, delete_category,
    get_all_categories, get_categories_with_post_counts, get_category, update_category,
};
pub use delete::{delete_category_endpoint, get_delete_category_page};
pub use domain::{Category, CategoryName, CategoryWithPostCount};
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;
