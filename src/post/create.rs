//! Post creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, BasePath, Error, endpoints,
    category::{Category, get_all_categories},
    database_id::DatabaseID,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, error_list, page_main,
    },
    navigation::NavBar,
    outcome::FormOutcome,
    post::{PostBuilder, create_post, domain::PostFormData, views::category_options},
};

/// The state needed for creating a post.
#[derive(Debug, Clone)]
pub struct CreatePostEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for CreatePostEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// Render the post creation page.
pub async fn get_new_post_page(
    State(state): State<CreatePostEndpointState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let empty_form = PostFormData {
        title: String::new(),
        content: String::new(),
        category_id: "0".to_string(),
    };

    Ok(new_post_view(&state.base_path, &categories, &empty_form, &[]).into_response())
}

/// Handle post creation form submission.
///
/// Validation problems are collected and shown together, with the
/// submitted values and category selection kept in place.
pub async fn create_post_endpoint(
    State(state): State<CreatePostEndpointState>,
    Form(form_data): Form<PostFormData>,
) -> Result<FormOutcome, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let validated = match form_data.validate() {
        Ok(validated) => validated,
        Err(errors) => {
            let categories = get_all_categories(&connection)?;
            return Ok(FormOutcome::Render(new_post_view(
                &state.base_path,
                &categories,
                &form_data,
                &errors,
            )));
        }
    };

    let builder = PostBuilder {
        title: validated.title,
        content: validated.content,
        category_id: validated.category_id,
        created_at: OffsetDateTime::now_utc(),
    };

    match create_post(builder, &connection) {
        Ok(_) => Ok(FormOutcome::redirect_with_success(
            &state.base_path.join(endpoints::ROOT),
            "Post added!",
        )),
        Err(Error::CategoryInUse) => {
            let categories = get_all_categories(&connection)?;
            Ok(FormOutcome::Render(new_post_view(
                &state.base_path,
                &categories,
                &form_data,
                &["Choose a category.".to_string()],
            )))
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a post: {error}");
            Err(error)
        }
    }
}

fn new_post_view(
    base_path: &BasePath,
    categories: &[Category],
    form_data: &PostFormData,
    errors: &[String],
) -> Markup {
    let nav_bar = NavBar::new(base_path, endpoints::NEW_POST_VIEW).into_html();
    let form_action = base_path.join(endpoints::NEW_POST_VIEW);
    let back_url = base_path.join(endpoints::ROOT);
    let selected: DatabaseID = form_data.category_id.trim().parse().unwrap_or(0);

    let content = html! {
        (nav_bar)

        (page_main(&html!(
            div class=(CARD_STYLE)
            {
                h1 class="text-xl font-bold mb-4" { "New Post" }

                form method="post" action=(form_action) class="space-y-4"
                {
                    (error_list(errors))

                    div
                    {
                        label for="title" class=(FORM_LABEL_STYLE) { "Title" }

                        input
                            id="title"
                            type="text"
                            name="title"
                            value=(form_data.title)
                            placeholder="Post title"
                            autofocus
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="content" class=(FORM_LABEL_STYLE) { "Content" }

                        textarea
                            id="content"
                            name="content"
                            rows="8"
                            placeholder="Write your post"
                            class=(FORM_TEXT_INPUT_STYLE)
                        {
                            (form_data.content)
                        }
                    }

                    div
                    {
                        label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                        select id="category_id" name="category_id" class=(FORM_SELECT_STYLE)
                        {
                            (category_options(categories, selected))
                        }
                    }

                    div class="flex gap-4 items-center"
                    {
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Post" }

                        a href=(back_url) class=(LINK_STYLE) { "Cancel" }
                    }
                }
            }
        )))
    };

    base("New Post", &content)
}
