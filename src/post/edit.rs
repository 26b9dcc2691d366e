//! Post editing page and endpoint.

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
    category::{Category, get_all_categories},
    database_id::{DatabaseID, parse_path_id},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, error_list, page_main,
    },
    navigation::NavBar,
    not_found::missing_resource_response,
    outcome::FormOutcome,
    post::{domain::PostFormData, get_post, update_post, views::category_options},
};

/// The state needed for the edit post page and endpoint.
#[derive(Debug, Clone)]
pub struct EditPostEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub base_path: BasePath,
}

impl FromRef<AppState> for EditPostEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_path: state.base_path.clone(),
        }
    }
}

/// Render the post editing page with the post's current values.
pub async fn get_edit_post_page(
    Path(post_id): Path<String>,
    State(state): State<EditPostEndpointState>,
) -> Result<Response, Error> {
    let Some(post_id) = parse_path_id(&post_id) else {
        return Ok(post_not_found(&state.base_path));
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let post = match get_post(post_id, &connection) {
        Ok(post) => post,
        Err(Error::NotFound) => return Ok(post_not_found(&state.base_path)),
        Err(error) => {
            tracing::error!("Failed to retrieve post {post_id}: {error}");
            return Err(error);
        }
    };

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let form_data = PostFormData {
        title: post.title,
        content: post.content,
        category_id: post.category_id.to_string(),
    };

    Ok(edit_post_view(&state.base_path, post_id, &categories, &form_data, &[]).into_response())
}

/// Handle post update form submission.
pub async fn update_post_endpoint(
    Path(post_id): Path<String>,
    State(state): State<EditPostEndpointState>,
    Form(form_data): Form<PostFormData>,
) -> Result<Response, Error> {
    let Some(post_id) = parse_path_id(&post_id) else {
        return Ok(post_not_found(&state.base_path));
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let validated = match form_data.validate() {
        Ok(validated) => validated,
        Err(errors) => {
            let categories = get_all_categories(&connection)?;
            return Ok(FormOutcome::Render(edit_post_view(
                &state.base_path,
                post_id,
                &categories,
                &form_data,
                &errors,
            ))
            .into_response());
        }
    };

    match update_post(post_id, validated, &connection) {
        Ok(_) => Ok(FormOutcome::redirect_with_success(
            &state.base_path.join(endpoints::ROOT),
            "Post updated!",
        )
        .into_response()),
        Err(Error::UpdateMissingPost) => Ok(post_not_found(&state.base_path)),
        Err(Error::CategoryInUse) => {
            let categories = get_all_categories(&connection)?;
            Ok(FormOutcome::Render(edit_post_view(
                &state.base_path,
                post_id,
                &categories,
                &form_data,
                &["Choose a category.".to_string()],
            ))
            .into_response())
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating post {post_id}: {error}"
            );
            Err(error)
        }
    }
}

fn post_not_found(base_path: &BasePath) -> Response {
    missing_resource_response(
        "Post not found.",
        &base_path.join(endpoints::ROOT),
        "Back to posts",
    )
}

fn edit_post_view(
    base_path: &BasePath,
    post_id: DatabaseID,
    categories: &[Category],
    form_data: &PostFormData,
    errors: &[String],
) -> Markup {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_POST_VIEW, post_id);
    let nav_bar = NavBar::new(base_path, &edit_endpoint).into_html();
    let form_action = base_path.join(&edit_endpoint);
    let back_url = base_path.join(endpoints::ROOT);
    let selected: DatabaseID = form_data.category_id.trim().parse().unwrap_or(0);

    let content = html! {
        (nav_bar)

        (page_main(&html!(
            div class=(CARD_STYLE)
            {
                h1 class="text-xl font-bold mb-4" { "Edit Post" }

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
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Post" }

                        a href=(back_url) class=(LINK_STYLE) { "Cancel" }
                    }
                }
            }
        )))
    };

    base("Edit Post", &content)
}
