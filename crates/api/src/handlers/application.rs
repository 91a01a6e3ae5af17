//! Handlers for the `/applications` resource.
//!
//! Applying is public (the careers form). Reviewing and status changes
//! are staff-only; each status change writes a `status_change`
//! notification for the applicant when their account is linked.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use talenthub_core::error::CoreError;
use talenthub_core::types::DbId;
use talenthub_db::models::application::{
    is_valid_status, Application, CreateApplication,
};
use talenthub_db::models::notification::KIND_STATUS_CHANGE;
use talenthub_db::repositories::application_repo::ApplicationRepo;
use talenthub_db::repositories::job_repo::JobRepo;
use talenthub_db::repositories::notification_repo::NotificationRepo;
use talenthub_storage::is_pdf;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::ApplicationFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /applications/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

/// POST /api/v1/applications (public, multipart)
///
/// Submit an application. Text fields: `job_id`, `applicant_name`,
/// `email`, optional `phone` and `cover_letter`. An optional `resume`
/// file part must be a PDF. A valid bearer token links the application
/// to the caller's account.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Application>>)> {
    let mut job_id: Option<DbId> = None;
    let mut applicant_name = None;
    let mut email = None;
    let mut phone = None;
    let mut cover_letter = None;
    let mut resume: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "job_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                job_id = Some(text.trim().parse().map_err(|_| {
                    AppError::BadRequest("job_id must be an integer".into())
                })?);
            }
            "applicant_name" => {
                applicant_name =
                    Some(field.text().await.map_err(|e| AppError::BadRequest(e.to_string()))?);
            }
            "email" => {
                email =
                    Some(field.text().await.map_err(|e| AppError::BadRequest(e.to_string()))?);
            }
            "phone" => {
                phone =
                    Some(field.text().await.map_err(|e| AppError::BadRequest(e.to_string()))?);
            }
            "cover_letter" => {
                cover_letter =
                    Some(field.text().await.map_err(|e| AppError::BadRequest(e.to_string()))?);
            }
            "resume" => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if bytes.len() > state.config.max_upload_bytes {
                    return Err(AppError::BadRequest("Resume is too large".into()));
                }
                if !is_pdf(&bytes) {
                    return Err(AppError::Core(CoreError::Validation(
                        "Resume must be a PDF".into(),
                    )));
                }
                resume = Some((filename, bytes.to_vec()));
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown application field");
            }
        }
    }

    let job_id = job_id.ok_or_else(|| AppError::BadRequest("job_id is required".into()))?;
    let applicant_name = applicant_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("applicant_name is required".into()))?;
    let email = email
        .filter(|e| e.contains('@'))
        .ok_or_else(|| AppError::BadRequest("A valid email is required".into()))?;

    // Applications are only accepted against open postings.
    let job = JobRepo::find_by_id(&state.pool, job_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("job", job_id)))?;
    if !job.is_open {
        return Err(AppError::Core(CoreError::Validation(
            "This job posting is closed".into(),
        )));
    }

    let resume_path = match &resume {
        Some((filename, bytes)) => {
            let stored = state.store.put("resumes", filename, bytes).await?;
            Some(stored.path)
        }
        None => None,
    };

    let input = CreateApplication {
        job_id,
        applicant_name,
        email,
        phone,
        cover_letter,
    };
    let applicant_user_id = bearer_user_id(&state, &headers);
    let application =
        ApplicationRepo::create(&state.pool, &input, applicant_user_id, resume_path.as_deref())
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: application }),
    ))
}

/// GET /api/v1/applications?status=&job_id= (staff)
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(params): Query<ApplicationFilterParams>,
) -> AppResult<Json<DataResponse<Vec<Application>>>> {
    if let Some(status) = &params.status {
        if !is_valid_status(status) {
            return Err(AppError::BadRequest(format!("Unknown status '{status}'")));
        }
    }
    let applications =
        ApplicationRepo::list(&state.pool, params.status.as_deref(), params.job_id).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/applications/mine (any authenticated user)
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Application>>>> {
    let applications = ApplicationRepo::list_for_applicant(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/applications/{id} (staff)
pub async fn get(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Application>>> {
    let application = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("application", id)))?;
    Ok(Json(DataResponse { data: application }))
}

/// POST /api/v1/applications/{id}/status (staff)
///
/// Move an application through the pipeline and notify the applicant.
pub async fn set_status(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<StatusChangeRequest>,
) -> AppResult<Json<DataResponse<Application>>> {
    if !is_valid_status(&input.status) {
        return Err(AppError::BadRequest(format!(
            "Unknown status '{}'",
            input.status
        )));
    }

    let application = ApplicationRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("application", id)))?;

    // Notify the applicant if their account is linked. Failure to write
    // the notification never fails the status change.
    let body = status_message(&application.status);
    if let Some(user_id) = application.applicant_user_id {
        if let Err(e) = NotificationRepo::create_for_user(
            &state.pool,
            user_id,
            KIND_STATUS_CHANGE,
            "Application update",
            body,
        )
        .await
        {
            tracing::error!(application_id = id, error = %e, "Failed to write status notification");
        }
    }

    // Fire-and-forget email; delivery failures are logged and swallowed.
    if let Some(mailer) = state.mailer.clone() {
        let to = application.email.clone();
        let body = body.to_string();
        tokio::spawn(async move {
            if let Err(e) = mailer.deliver(&to, "Application update", &body).await {
                tracing::error!(error = %e, "Failed to send status-change email");
            }
        });
    }

    Ok(Json(DataResponse { data: application }))
}

/// Applicant-facing message for each pipeline status.
fn status_message(status: &str) -> &'static str {
    match status {
        "pending" => "Your application has been received.",
        "reviewing" => "Your application is being reviewed.",
        "scheduled" => "Your interview has been scheduled. Check your email for details.",
        "recruited" => "Congratulations! You have been selected for this position.",
        "rejected" => "Thank you for applying. We have decided not to move forward at this time.",
        _ => "Your application status has changed.",
    }
}

/// Extract the caller's user id from an optional bearer token. Invalid
/// or missing tokens simply yield an unlinked application.
fn bearer_user_id(state: &AppState, headers: &HeaderMap) -> Option<DbId> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())?
        .strip_prefix("Bearer ")?;
    validate_token(token, &state.config.jwt)
        .ok()
        .map(|claims| claims.sub)
}

#[cfg(test)]
mod tests {
    use super::status_message;

    #[test]
    fn every_pipeline_status_has_a_message() {
        for status in talenthub_db::models::application::APPLICATION_STATUSES {
            let msg = status_message(status);
            assert!(!msg.is_empty());
            assert_ne!(msg, "Your application status has changed.");
        }
    }
}
