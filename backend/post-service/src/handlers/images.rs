/// Image upload and download
use super::AppState;
use crate::error::{ServiceError, StoreContext};
use crate::middleware::UserId;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::StreamExt;
use serde::Serialize;
use tracing::{error, info};

/// Multipart form field carrying the image bytes
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    #[serde(rename = "imageID")]
    pub id: String,
}

/// Store an uploaded image and return its reference
pub async fn create_image(
    state: web::Data<AppState>,
    user_id: UserId,
    mut payload: Multipart,
) -> Result<HttpResponse, ServiceError> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            error!("Error reading multipart payload: {}", e);
            ServiceError::BadRequest("malformed multipart payload".into())
        })?;

        let is_image = field
            .name()
            .map(|name| name.eq_ignore_ascii_case(IMAGE_FIELD))
            .unwrap_or(false);

        let mut buf = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes = chunk.map_err(|e| {
                error!("Error reading upload field: {}", e);
                ServiceError::BadRequest("malformed multipart payload".into())
            })?;
            if !is_image {
                continue;
            }
            if buf.len() + bytes.len() > state.image_max_bytes {
                return Ok(HttpResponse::PayloadTooLarge().json(serde_json::json!({
                    "error": format!("image exceeds {} bytes", state.image_max_bytes),
                    "status": 413,
                })));
            }
            buf.extend_from_slice(&bytes);
        }

        if is_image {
            image = Some(buf);
        }
    }

    let bytes = image
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ServiceError::BadRequest(format!("missing '{}' field", IMAGE_FIELD)))?;

    let id = state
        .images
        .save(&bytes)
        .await
        .in_store("images", "save")?;

    info!(user_id = %user_id.0, image_id = %id, size = bytes.len(), "Image uploaded");
    Ok(HttpResponse::Created().json(ImageResponse { id }))
}

/// Serve a stored image as PNG
pub async fn get_image(
    state: web::Data<AppState>,
    _user_id: UserId,
    image_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let image_id = image_id.into_inner();
    let bytes = state
        .images
        .open(&image_id)
        .await
        .or_not_found("images", "open", || format!("image {}", image_id))?;

    Ok(HttpResponse::Ok().content_type("image/png").body(bytes))
}
