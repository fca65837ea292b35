use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{ApplicationForm, ResumeUpload};
use super::repository::{ApplicationStore, ObjectStorage};
use super::service::{IntakeError, IntakeService};
use super::validation::{validate, ResumeMeta, MAX_RESUME_BYTES};

/// Transport ceiling; leaves headroom so the pipeline, not the body limit, rejects big résumés.
pub const MAX_REQUEST_BYTES: usize = 2 * MAX_RESUME_BYTES as usize;

/// Router builder exposing the applicant-facing intake endpoints.
pub fn intake_router<O, S>(service: Arc<IntakeService<O, S>>) -> Router
where
    O: ObjectStorage + 'static,
    S: ApplicationStore + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<O, S>))
        .route("/api/v1/applications/validate", post(validate_handler::<O, S>))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(service)
}

pub(crate) async fn submit_handler<O, S>(
    State(service): State<Arc<IntakeService<O, S>>>,
    multipart: Multipart,
) -> Response
where
    O: ObjectStorage + 'static,
    S: ApplicationStore + 'static,
{
    let result = match read_submission(multipart).await {
        Ok((form, resume)) => service.submit(form, resume).await,
        Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(IntakeError::ResumeTooLarge(MAX_REQUEST_BYTES as u64))
        }
        Err(err) => {
            warn!(error = %err, "malformed application form");
            Err(IntakeError::Unexpected(err.body_text()))
        }
    };

    let status = match &result {
        Ok(_) => StatusCode::CREATED,
        Err(err) if err.is_user_correctable() => StatusCode::UNPROCESSABLE_ENTITY,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(service.outcome(&result))).into_response()
}

async fn read_submission(
    mut multipart: Multipart,
) -> Result<(ApplicationForm, Option<ResumeUpload>), MultipartError> {
    let mut form = ApplicationForm::default();
    let mut resume = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => form.name = field.text().await?,
            "email" => form.email = field.text().await?,
            "phone" => form.phone = field.text().await?,
            "vacancyId" => form.vacancy_id = field.text().await?,
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                resume = Some(ResumeUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok((form, resume))
}

/// Single-field validation request mirrored from the form's blur events.
#[derive(Debug, Deserialize)]
pub(crate) struct FieldValidationRequest {
    pub(crate) field: String,
    #[serde(default)]
    pub(crate) value: String,
    #[serde(default)]
    pub(crate) file: Option<ResumeMeta>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldValidationResponse {
    pub(crate) field: String,
    pub(crate) valid: bool,
    pub(crate) message: String,
}

pub(crate) async fn validate_handler<O, S>(
    State(service): State<Arc<IntakeService<O, S>>>,
    Json(request): Json<FieldValidationRequest>,
) -> Json<FieldValidationResponse>
where
    O: ObjectStorage + 'static,
    S: ApplicationStore + 'static,
{
    let result = validate(&request.field, &request.value, request.file.as_ref());
    let message = match result {
        Ok(()) => String::new(),
        Err(err) => err.message(service.locale()).to_string(),
    };

    Json(FieldValidationResponse {
        field: request.field,
        valid: result.is_ok(),
        message,
    })
}
