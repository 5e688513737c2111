use crate::{error::AppError, form::SchoolForm, AppState};
use axum::{extract::State, Json};
use core_types::SchoolRecord;
use serde::Serialize;
use std::sync::Arc;

/// Body of every successful write.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// # POST /addSchool
/// Validates a submission, stores its image if one is attached, and inserts
/// exactly one school. On any failure nothing is left behind.
pub async fn add_school(
    State(state): State<Arc<AppState>>,
    form: SchoolForm,
) -> Result<Json<MessageResponse>, AppError> {
    let SchoolForm { submission, image } = form;
    let mut school = submission.validate()?;

    if state.store.school_exists(&school.name, &school.address).await? {
        return Err(AppError::Conflict);
    }

    let stored_image = match image {
        Some(upload) => {
            let stored = state
                .images
                .save(upload.file_name.as_deref(), &upload.bytes)
                .await?;
            school.image = stored.public_path.clone();
            Some(stored)
        }
        None => None,
    };

    let id = match state.store.insert_school(&school).await {
        Ok(id) => id,
        Err(err) => {
            if let Some(stored) = &stored_image {
                state.images.discard(stored).await;
            }
            return Err(err.into());
        }
    };

    tracing::info!(id, name = %school.name, city = %school.city, "School added.");
    Ok(Json(MessageResponse {
        message: "School added successfully",
    }))
}

/// # GET /getSchools
/// Every school, newest first. Filtering happens on the client.
pub async fn get_schools(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SchoolRecord>>, AppError> {
    let schools = state.store.get_all_schools().await?;
    Ok(Json(schools))
}

/// Answers any verb a route does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
