//! Shared maud templates and the Tailwind class constants used across pages.

use maud::{DOCTYPE, Markup, html};

// Link styles
pub const LINK_STYLE: &str = "underline text-slate-700 hover:text-slate-900";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str =
    "px-4 py-2 bg-slate-900 text-white rounded hover:bg-slate-800";

pub const BUTTON_DANGER_STYLE: &str = "px-4 py-2 bg-red-600 text-white rounded hover:bg-red-700";

pub const BUTTON_DANGER_DISABLED_STYLE: &str =
    "px-4 py-2 bg-slate-400 text-white rounded cursor-not-allowed";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block text-sm font-medium mb-1";
pub const FORM_TEXT_INPUT_STYLE: &str = "w-full border border-slate-300 rounded px-3 py-2";
pub const FORM_SELECT_STYLE: &str = "w-full border border-slate-300 rounded px-3 py-2";

// Card and table styles
pub const CARD_STYLE: &str = "bg-white border border-slate-200 rounded p-6";
pub const TABLE_HEADER_STYLE: &str = "bg-slate-50 border-b border-slate-200";
pub const TABLE_HEADER_CELL_STYLE: &str = "text-left p-3 text-sm font-semibold";
pub const TABLE_ROW_STYLE: &str = "border-b border-slate-100";
pub const TABLE_CELL_STYLE: &str = "p-3";

/// The outer HTML document: head, Tailwind via CDN, and the page content.
///
/// The navigation bar is part of `content` so that each page can mark its
/// own link as active.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - Blogkit" }

                script src="https://cdn.tailwindcss.com" {}
            }

            body class="bg-slate-50 text-slate-900"
            {
                (content)
            }
        }
    }
}

/// The `<main>` wrapper that keeps page content at a readable width.
pub fn page_main(content: &Markup) -> Markup {
    html! {
        main class="max-w-5xl mx-auto px-4 py-8"
        {
            (content)
        }
    }
}

/// A green banner for the success flash shown after a write redirect.
pub fn success_banner(message: &str) -> Markup {
    html! {
        div class="mb-6 p-4 border border-green-200 bg-green-50 text-green-800 rounded"
        {
            (message)
        }
    }
}

/// A red banner listing the validation errors collected for a form.
///
/// Renders nothing when `errors` is empty.
pub fn error_list(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            div class="mb-6 p-4 border border-red-200 bg-red-50 text-red-800 rounded"
            {
                ul class="list-disc pl-5"
                {
                    @for error in errors {
                        li { (error) }
                    }
                }
            }
        }
    }
}

/// A full-page error view used for the 404 and 500 pages.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        main class="max-w-5xl mx-auto px-4 py-16"
        {
            div class="mx-auto max-w-xl text-center"
            {
                h1 class="mb-4 text-7xl tracking-tight font-extrabold text-slate-900"
                {
                    (header)
                }

                p class="mb-4 text-2xl font-bold" { (description) }

                p class="mb-4 text-slate-600" { (fix) }

                a href="/" class=(BUTTON_PRIMARY_STYLE) { "Back to posts" }
            }
        }
    );

    base(title, &content)
}
