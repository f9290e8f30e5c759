use axum::{
    Form, Json,
    extract::State,
    response::IntoResponse,
};
use serde::Serialize;

use crate::{
    config::Config,
    error::AppError,
    models::compose::{ComposeFormData, ComposeIntent, TransformedMessageRequest},
    transform::transform_post_data,
};

/// Response body: the detected action plus the shaped payload.
#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub intent: ComposeIntent,
    pub message: TransformedMessageRequest,
}

/// Transform a JSON compose submission.
/// The body must be a JSON object; any other shape is a 400.
pub async fn transform_json(
    State(config): State<Config>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest(
            "Submission must be a JSON object".to_string(),
        ));
    }

    let form: ComposeFormData = serde_json::from_value(body)?;

    Ok(Json(respond(&form, &config)))
}

/// Transform a urlencoded compose submission, as posted by the HTML form.
pub async fn transform_form(
    State(config): State<Config>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> impl IntoResponse {
    let form = ComposeFormData::from_pairs(pairs);

    Json(respond(&form, &config))
}

fn respond(form: &ComposeFormData, config: &Config) -> TransformResponse {
    let intent = form.intent();
    let message = transform_post_data(form, config);

    tracing::info!(
        ?intent,
        mailto = message.mailto_ids.len(),
        additional = message.additional_emails.len(),
        scheduled = message.is_scheduled(),
        "Transformed compose submission"
    );

    TransformResponse { intent, message }
}
