//! Reads an add-school request body into a [`SchoolSubmission`].
//!
//! The form page posts `multipart/form-data` (with an optional `image` file
//! part); scripted clients may post JSON or a urlencoded form instead.

use crate::{error::AppError, uploads::ImageUpload, AppState};
use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use core_types::{SchoolSubmission, ValidationError};
use std::fmt::Display;
use std::sync::Arc;

const PARSE_ERROR: &str = "Error parsing form data";
const BODY_TOO_LARGE: &str = "Request body is too large";

/// A parsed, not yet validated, submission.
#[derive(Debug)]
pub struct SchoolForm {
    pub submission: SchoolSubmission,
    pub image: Option<ImageUpload>,
}

#[async_trait]
impl FromRequest<Arc<AppState>> for SchoolForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(parse_error)?;
            read_multipart(multipart, state.images.max_bytes()).await
        } else if content_type.starts_with("application/json") {
            let Json(submission) = Json::<SchoolSubmission>::from_request(req, state)
                .await
                .map_err(parse_error)?;
            Ok(Self { submission, image: None })
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(submission) = Form::<SchoolSubmission>::from_request(req, state)
                .await
                .map_err(parse_error)?;
            Ok(Self { submission, image: None })
        } else {
            Err(AppError::BadRequest(format!(
                "Unsupported content type: {:?}",
                content_type
            )))
        }
    }
}

async fn read_multipart(mut multipart: Multipart, max_image_bytes: usize) -> Result<SchoolForm, AppError> {
    let mut submission = SchoolSubmission::default();
    let mut image = None;

    let image_error = |err: MultipartError| {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::from(ValidationError::ImageTooLarge { max: max_image_bytes })
        } else {
            parse_error(err)
        }
    };

    while let Some(mut field) = multipart.next_field().await.map_err(body_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" && field.file_name().is_some() {
            let file_name = field
                .file_name()
                .filter(|n| !n.is_empty())
                .map(str::to_string);
            let mut bytes = Vec::new();
            while let Some(chunk) = field.chunk().await.map_err(image_error)? {
                if bytes.len() + chunk.len() > max_image_bytes {
                    return Err(ValidationError::ImageTooLarge { max: max_image_bytes }.into());
                }
                bytes.extend_from_slice(&chunk);
            }
            // An untouched file input still sends an empty, unnamed part.
            if file_name.is_some() || !bytes.is_empty() {
                image = Some(ImageUpload { file_name, bytes });
            }
            continue;
        }

        let value = field.text().await.map_err(body_error)?;
        if !submission.set_field(&name, value) {
            tracing::debug!(field = %name, "Ignoring unknown form field.");
        }
    }

    Ok(SchoolForm { submission, image })
}

/// A body error outside an image part: the text fields, not the image, broke a limit.
fn body_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %err, "Rejected oversized submission.");
        AppError::BadRequest(BODY_TOO_LARGE.to_string())
    } else {
        parse_error(err)
    }
}

fn parse_error(err: impl Display) -> AppError {
    tracing::warn!(error = %err, "Rejected unparseable submission.");
    AppError::BadRequest(PARSE_ERROR.to_string())
}
