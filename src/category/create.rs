//! Category creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, BasePath, Error, endpoints,
    category::{CategoryName, create_category, domain::CategoryFormData},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        base, error_list, page_main,
    },
    navigation::NavBar,
    outcome::FormOutcome,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// Render the category creation page.
pub async fn get_new_category_page(
    State(state): State<CreateCategoryEndpointState>,
) -> Response {
    new_category_view(&state.base_path, "", &[]).into_response()
}

/// Handle category creation form submission.
///
/// On success, redirects to the categories listing with a success message.
/// On a validation failure the form is redisplayed with the submitted name
/// and an explanation.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    Form(form_data): Form<CategoryFormData>,
) -> Result<FormOutcome, Error> {
    let name = match CategoryName::new(&form_data.name) {
        Ok(name) => name,
        Err(_) => {
            return Ok(FormOutcome::Render(new_category_view(
                &state.base_path,
                &form_data.name,
                &["Name is required.".to_string()],
            )));
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match create_category(name, &connection) {
        Ok(_) => Ok(FormOutcome::redirect_with_success(
            &state.base_path.join(endpoints::CATEGORIES_VIEW),
            "Category added!",
        )),
        Err(Error::DuplicateCategoryName) => Ok(FormOutcome::Render(new_category_view(
            &state.base_path,
            &form_data.name,
            &["That category name is already taken.".to_string()],
        ))),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");
            Err(error)
        }
    }
}

fn new_category_view(base_path: &BasePath, name: &str, errors: &[String]) -> Markup {
    let nav_bar = NavBar::new(base_path, endpoints::NEW_CATEGORY_VIEW).into_html();
    let form_action = base_path.join(endpoints::NEW_CATEGORY_VIEW);
    let back_url = base_path.join(endpoints::CATEGORIES_VIEW);

    let content = html! {
        (nav_bar)

        (page_main(&html!(
            div class=(CARD_STYLE)
            {
                h1 class="text-xl font-bold mb-4" { "New Category" }

                form method="post" action=(form_action) class="space-y-4"
                {
                    (error_list(errors))

                    div
                    {
                        label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                        input
                            id="name"
                            type="text"
                            name="name"
                            value=(name)
                            placeholder="Category name"
                            autofocus
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div class="flex gap-4 items-center"
                    {
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }

                        a href=(back_url) class=(LINK_STYLE) { "Cancel" }
                    }
                }
            }
        )))
    };

    base("New Category", &content)
}
