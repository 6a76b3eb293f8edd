use std::path::Path as FsPath;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::app::AppState;
use crate::error::{AppError, Result};

fn content_type_for(name: &str) -> &'static str {
    let extension = FsPath::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub async fn get_photo(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    match state.photos.fetch(&filename).await {
        Ok(Some(contents)) => Ok((
            [(header::CONTENT_TYPE, content_type_for(&filename))],
            contents,
        )
            .into_response()),
        Ok(None) => Err(AppError::NotFound(format!("Photo {filename} not found"))),
        Err(e) => {
            warn!("Failed to fetch photo {}: {:?}", filename, e);
            Err(AppError::NotFound(format!("Photo {filename} not available")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
