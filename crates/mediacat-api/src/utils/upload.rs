//! Multipart parsing for the upload handler

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use mediacat_core::AppError;
use mediacat_services::IngestRequest;
use serde_json::Value as JsonValue;

/// Read the `file`, `collection` and `custom_properties` fields of an upload form.
///
/// Exactly one `file` field is accepted. Unknown fields are ignored.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<IngestRequest, AppError> {
    let mut request = IngestRequest::default();
    let mut has_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart", e))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if has_file {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                has_file = true;
                request.declared_file_name = field.file_name().unwrap_or_default().to_string();
                request.mime_type_hint = field.content_type().map(|s| s.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file data", e))?;
                request.data = data.to_vec();
            }
            "collection" => {
                let value = read_text(field).await?;
                request.collection_name = Some(value).filter(|v| !v.trim().is_empty());
            }
            "custom_properties" => {
                let value = read_text(field).await?;
                if !value.trim().is_empty() {
                    let parsed: JsonValue = serde_json::from_str(&value).map_err(|e| {
                        AppError::InvalidInput(format!("custom_properties is not valid JSON: {}", e))
                    })?;
                    request.custom_properties = Some(parsed);
                }
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    if !has_file {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }

    Ok(request)
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| multipart_error(&format!("Failed to read field '{}'", name), e))
}

/// A body cut off by the request size limit is a 413, anything else a 400.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{}: request body too large", context))
    } else {
        AppError::InvalidInput(format!("{}: {}", context, err))
    }
}
