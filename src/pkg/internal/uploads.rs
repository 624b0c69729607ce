use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use standard_error::{StandardError, Status};
use tokio::fs;
use uuid::Uuid;

use crate::{conf::settings, prelude::Result};

pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn validate_extension(filename: &str, allowed: &[String]) -> Result<String> {
    match file_extension(filename) {
        Some(ext) if allowed.contains(&ext) => Ok(ext),
        _ => Err(StandardError::new(&format!(
            "ERR-VALIDATION-002: file type not allowed, allowed types: {}",
            allowed.join(", ")
        ))
        .code(StatusCode::BAD_REQUEST)),
    }
}

/// Storage names carry nothing from the submitted filename except the
/// already-validated extension, so they can neither collide nor traverse.
pub fn storage_name(ext: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), ext)
}

pub fn disk_path(stored_name: &str) -> PathBuf {
    Path::new(&settings.upload_dir).join(stored_name)
}

pub async fn store_resume(ext: &str, content: &[u8]) -> Result<String> {
    fs::create_dir_all(&settings.upload_dir).await?;
    let stored_name = storage_name(ext);
    fs::write(disk_path(&stored_name), content).await?;
    tracing::debug!("stored resume as {}", &stored_name);
    Ok(stored_name)
}

/// Compensating delete for a failed insert. A failure here leaves an orphan
/// on disk, so it is logged for manual reconciliation; the caller's error
/// stays whatever it already was.
pub async fn remove_resume(stored_name: &str) {
    match fs::remove_file(disk_path(stored_name)).await {
        Ok(_) => tracing::info!("removed uploaded file after error: {}", stored_name),
        Err(e) => tracing::error!(
            "failed to remove uploaded file {}, manual cleanup required: {}",
            stored_name,
            e
        ),
    }
}

pub fn mime_type(ext: &str) -> &'static str {
    match ext {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["pdf".into(), "doc".into(), "docx".into(), "txt".into()]
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(file_extension("Resume.PDF").as_deref(), Some("pdf"));
        assert_eq!(file_extension("cv.tar.gz").as_deref(), Some("gz"));
        assert_eq!(file_extension("no_extension"), None);
    }

    #[test]
    fn test_validate_extension_allows_listed_types() {
        assert_eq!(validate_extension("cv.pdf", &allowed()).unwrap(), "pdf");
        assert_eq!(validate_extension("CV.DOCX", &allowed()).unwrap(), "docx");
    }

    #[test]
    fn test_validate_extension_rejects_everything_else() {
        assert!(validate_extension("malware.exe", &allowed()).is_err());
        assert!(validate_extension("resume", &allowed()).is_err());
        assert!(validate_extension("", &allowed()).is_err());
    }

    #[test]
    fn test_storage_names_are_unique_and_opaque() {
        let first = storage_name("pdf");
        let second = storage_name("pdf");
        assert_ne!(first, second);
        assert!(first.ends_with(".pdf"));
        assert!(!first.contains('/'));
    }

    #[test]
    fn test_mime_type_per_extension() {
        assert_eq!(mime_type("pdf"), "application/pdf");
        assert_eq!(mime_type("doc"), "application/msword");
        assert_eq!(mime_type("txt"), "text/plain");
        assert_eq!(mime_type("zip"), "application/octet-stream");
    }
}
