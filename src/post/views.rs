//! Templates shared by the post pages.

use maud::{Markup, html};

use crate::{
    BasePath, endpoints,
    category::Category,
    database_id::DatabaseID,
    html::{CARD_STYLE, LINK_STYLE},
    post::PostWithCategory,
};

/// Render the posts as a list of cards with edit and delete links.
///
/// Post content keeps its line breaks via `whitespace-pre-line`, and maud
/// escapes the text, so stored HTML displays as text instead of rendering.
pub fn post_cards(base_path: &BasePath, posts: &[PostWithCategory]) -> Markup {
    html! {
        div class="space-y-4"
        {
            @for post in posts {
                article class=(CARD_STYLE)
                {
                    header class="flex justify-between flex-wrap items-baseline mb-2"
                    {
                        h2 class="text-lg font-bold" { (post.title) }

                        span class="text-sm text-slate-500"
                        {
                            (post.category_name) " · " (post.created_at.date())
                        }
                    }

                    p class="whitespace-pre-line mb-4" { (post.content) }

                    div class="flex gap-4 text-sm"
                    {
                        a href=(base_path.join(&endpoints::format_endpoint(endpoints::EDIT_POST_VIEW, post.id)))
                            class=(LINK_STYLE) { "Edit" }

                        a href=(base_path.join(&endpoints::format_endpoint(endpoints::DELETE_POST_VIEW, post.id)))
                            class=(LINK_STYLE) { "Delete" }
                    }
                }
            }

            @if posts.is_empty() {
                p class="text-center text-slate-500 py-8" { "No posts found." }
            }
        }
    }
}

/// The "N post(s)" line shown above query results.
pub fn result_count(count: usize) -> Markup {
    html! {
        p class="text-sm text-slate-500" { (count) " post(s)" }
    }
}

/// Render the options for a category dropdown.
///
/// The placeholder option carries value zero, which validation treats as
/// no selection. The previously chosen category stays selected when a form
/// is redisplayed.
pub fn category_options(categories: &[Category], selected: DatabaseID) -> Markup {
    html! {
        option value="0" selected[selected == 0] { "-- Choose a category --" }

        @for category in categories {
            option value=(category.id) selected[category.id == selected]
            {
                (category.name)
            }
        }
    }
}
