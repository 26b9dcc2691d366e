//! Category editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, BasePath, Error, endpoints,
    category::{CategoryName, domain::CategoryFormData, get_category, update_category},
    database_id::{DatabaseID, parse_path_id},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        base, error_list, page_main,
    },
    navigation::NavBar,
    not_found::missing_resource_response,
    outcome::FormOutcome,
};

/// The state needed for the edit category page and endpoint.
#[derive(Debug, Clone)]
pub struct EditCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for EditCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// Render the category editing page.
///
/// An ID that is not a positive integer, or that matches no category, gets
/// a friendly not-found page rather than an error.
pub async fn get_edit_category_page(
    Path(category_id): Path<String>,
    State(state): State<EditCategoryEndpointState>,
) -> Result<Response, Error> {
    let Some(category_id) = parse_path_id(&category_id) else {
        return Ok(category_not_found(&state.base_path));
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match get_category(category_id, &connection) {
        Ok(category) => Ok(edit_category_view(
            &state.base_path,
            category_id,
            category.name.as_ref(),
            &[],
        )
        .into_response()),
        Err(Error::NotFound) => Ok(category_not_found(&state.base_path)),
        Err(error) => {
            tracing::error!("Failed to retrieve category {category_id}: {error}");
            Err(error)
        }
    }
}

/// Handle category update form submission.
pub async fn update_category_endpoint(
    Path(category_id): Path<String>,
    State(state): State<EditCategoryEndpointState>,
    Form(form_data): Form<CategoryFormData>,
) -> Result<Response, Error> {
    let Some(category_id) = parse_path_id(&category_id) else {
        return Ok(category_not_found(&state.base_path));
    };

    let name = match CategoryName::new(&form_data.name) {
        Ok(name) => name,
        Err(_) => {
            return Ok(FormOutcome::Render(edit_category_view(
                &state.base_path,
                category_id,
                &form_data.name,
                &["Name is required.".to_string()],
            ))
            .into_response());
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match update_category(category_id, name, &connection) {
        Ok(_) => Ok(FormOutcome::redirect_with_success(
            &state.base_path.join(endpoints::CATEGORIES_VIEW),
            "Category updated!",
        )
        .into_response()),
        Err(Error::UpdateMissingCategory) => Ok(category_not_found(&state.base_path)),
        Err(Error::DuplicateCategoryName) => Ok(FormOutcome::Render(edit_category_view(
            &state.base_path,
            category_id,
            &form_data.name,
            &["That category name is already taken.".to_string()],
        ))
        .into_response()),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            Err(error)
        }
    }
}

fn category_not_found(base_path: &BasePath) -> Response {
    missing_resource_response(
        "Category not found.",
        &base_path.join(endpoints::CATEGORIES_VIEW),
        "Back to categories",
    )
}

fn edit_category_view(
    base_path: &BasePath,
    category_id: DatabaseID,
    name: &str,
    errors: &[String],
) -> Markup {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category_id);
    let nav_bar = NavBar::new(base_path, &edit_endpoint).into_html();
    let form_action = base_path.join(&edit_endpoint);
    let back_url = base_path.join(endpoints::CATEGORIES_VIEW);

    let content = html! {
        (nav_bar)

        (page_main(&html!(
            div class=(CARD_STYLE)
            {
                h1 class="text-xl font-bold mb-4" { "Edit Category" }

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
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Category" }

                        a href=(back_url) class=(LINK_STYLE) { "Cancel" }
                    }
                }
            }
        )))
    };

    base("Edit Category", &content)
}

#[cfg(test)]
mod edit_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        BasePath, endpoints,
        category::{
            CategoryName, create_category, domain::CategoryFormData, get_category,
            get_edit_category_page, update_category_endpoint,
        },
        test_utils::{
            assert_form_action, assert_form_input_with_value,
            assert_form_submit_button_with_text, assert_redirect, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    use super::EditCategoryEndpointState;

    fn get_edit_category_state() -> EditCategoryEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        crate::db::initialize(&connection).expect("Could not initialize database");

        EditCategoryEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
            base_path: BasePath::new(""),
        }
    }

    #[tokio::test]
    async fn get_edit_category_page_succeeds() {
        let state = get_edit_category_state();
        let category = create_category(
            CategoryName::new_unchecked("Guides"),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category");

        let response = get_edit_category_page(Path(category.id.to_string()), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_form_action(
            &form,
            &endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id),
            "post",
        );
        assert_form_input_with_value(&form, "name", "text", "Guides");
        assert_form_submit_button_with_text(&form, "Update Category");
    }

    #[tokio::test]
    async fn get_edit_category_page_with_unknown_id_returns_not_found() {
        let state = get_edit_category_state();

        let response = get_edit_category_page(Path("999999".to_string()), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_edit_category_page_with_non_numeric_id_returns_not_found() {
        let state = get_edit_category_state();

        let response = get_edit_category_page(Path("abc".to_string()), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_category_endpoint_succeeds() {
        let state = get_edit_category_state();
        let category = create_category(
            CategoryName::new_unchecked("Original"),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category");

        let form = CategoryFormData {
            name: "Updated".to_string(),
        };

        let response =
            update_category_endpoint(Path(category.id.to_string()), State(state.clone()), Form(form))
                .await
                .unwrap();

        assert_redirect(&response, "/categories?success=Category+updated%21");

        let updated = get_category(category.id, &state.db_connection.lock().unwrap())
            .expect("Could not get updated category");
        assert_eq!(updated.name, CategoryName::new_unchecked("Updated"));
    }

    #[tokio::test]
    async fn update_category_endpoint_with_unknown_id_returns_not_found() {
        let state = get_edit_category_state();
        let form = CategoryFormData {
            name: "Updated".to_string(),
        };

        let response = update_category_endpoint(Path("999999".to_string()), State(state), Form(form))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
