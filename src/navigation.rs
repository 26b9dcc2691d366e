//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::{BasePath, endpoints};

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to `true`. Only one
/// link should be set as active at any one time.
struct Link {
    url: String,
    title: &'static str,
    is_current: bool,
}

impl Link {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "font-semibold text-slate-900"
        } else {
            "text-slate-700 hover:text-slate-900"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

/// The top navigation bar shared by every page.
pub struct NavBar {
    home_url: String,
    links: Vec<Link>,
}

impl NavBar {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint` (the un-prefixed endpoint
    /// constant), then that link will be marked as active and displayed
    /// differently in the HTML.
    pub fn new(base_path: &BasePath, active_endpoint: &str) -> NavBar {
        let entries = [
            (endpoints::ROOT, "Posts"),
            (endpoints::NEW_POST_VIEW, "New post"),
            (endpoints::CATEGORIES_VIEW, "Categories"),
            (endpoints::SEARCH_POSTS_VIEW, "Search"),
            (endpoints::FILTER_POSTS_VIEW, "Filter"),
            (endpoints::SORT_POSTS_VIEW, "Sort"),
            (endpoints::BROWSE_POSTS_VIEW, "Browse"),
        ];

        let links = entries
            .into_iter()
            .map(|(endpoint, title)| Link {
                url: base_path.join(endpoint),
                title,
                is_current: endpoint == active_endpoint,
            })
            .collect();

        NavBar {
            home_url: base_path.join(endpoints::ROOT),
            links,
        }
    }

    /// Render the navigation bar.
    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-b border-slate-200"
            {
                div class="max-w-5xl mx-auto px-4 py-3 flex items-center justify-between"
                {
                    a href=(self.home_url) class="font-bold text-lg" { "Blogkit" }

                    div class="flex gap-3"
                    {
                        @for link in self.links {
                            (link.into_html())
                        }
                    }
                }
            }
        )
    }
}
