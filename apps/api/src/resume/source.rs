//! Résumé sources: raw upload bytes, S3 objects, and local files.
//!
//! A source that cannot be read at all is the only way résumé parsing fails
//! (`AppError::Parse`). PDF text extraction is CPU-bound and runs inside
//! `spawn_blocking`.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeRef;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError>;
    async fn get(&self, key: &str) -> Result<Bytes, AppError>;
}

pub struct S3ResumeStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ResumeStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ResumeStore for S3ResumeStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded résumé to s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, AppError> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Parse(format!("s3://{}/{key} is unreadable: {e}", self.bucket)))?;

        let data = object
            .body
            .collect()
            .await
            .map_err(|e| AppError::Parse(format!("s3://{}/{key} is unreadable: {e}", self.bucket)))?;
        Ok(data.into_bytes())
    }
}

pub fn content_type_for(file_name: &str) -> &'static str {
    if file_name.to_ascii_lowercase().ends_with(".pdf") {
        "application/pdf"
    } else {
        "text/plain"
    }
}

fn is_pdf(bytes: &[u8], file_name: &str) -> bool {
    bytes.starts_with(b"%PDF") || content_type_for(file_name) == "application/pdf"
}

/// Converts document bytes to text: PDF via `pdf-extract`, anything else as UTF-8.
pub fn extract_text(bytes: &[u8], file_name: &str) -> Result<String, AppError> {
    if is_pdf(bytes, file_name) {
        // pdf-extract panics on some malformed documents
        return match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(AppError::Parse(format!(
                "{file_name}: PDF text extraction failed: {e}"
            ))),
            Err(_) => Err(AppError::Parse(format!("{file_name}: PDF is malformed"))),
        };
    }

    String::from_utf8(bytes.to_vec())
        .map_err(|_| AppError::Parse(format!("{file_name}: not valid UTF-8 text")))
}

/// `extract_text` on the blocking pool.
pub async fn extract_text_blocking(bytes: Bytes, file_name: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, &file_name))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("text extraction task failed: {e}")))?
}

/// Fetches and decodes the résumé a stored reference points at.
pub async fn load_resume_text(
    resumes: &dyn ResumeStore,
    reference: &ResumeRef,
) -> Result<String, AppError> {
    let bytes = match reference {
        ResumeRef::S3 { key } => resumes.get(key).await?,
        ResumeRef::Local { path } => tokio::fs::read(path)
            .await
            .map(Bytes::from)
            .map_err(|e| AppError::Parse(format!("{path} is unreadable: {e}")))?,
    };

    extract_text_blocking(bytes, reference.file_name().to_string()).await
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::test_support::MemoryResumeStore;

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_text("Jane Doe\nSkills".as_bytes(), "cv.txt").unwrap();
        assert_eq!(text, "Jane Doe\nSkills");
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = extract_text(&[0xff, 0xfe, 0xfd], "cv.txt").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_garbage_pdf_is_parse_error() {
        let err = extract_text(b"%PDF-1.4 truncated", "cv.pdf").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type_for("CV.PDF"), "application/pdf");
        assert_eq!(content_type_for("cv.txt"), "text/plain");
    }

    #[tokio::test]
    async fn test_local_reference_is_read_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Work Experience\nEngineer at Acme").unwrap();
        let reference = ResumeRef::Local {
            path: file.path().to_string_lossy().into_owned(),
        };

        let text = load_resume_text(&MemoryResumeStore::default(), &reference)
            .await
            .unwrap();
        assert!(text.starts_with("Work Experience"));
    }

    #[tokio::test]
    async fn test_missing_local_file_is_parse_error() {
        let reference = ResumeRef::Local {
            path: "/definitely/not/here.txt".to_string(),
        };
        let err = load_resume_text(&MemoryResumeStore::default(), &reference)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_s3_reference_goes_through_store() {
        let store = MemoryResumeStore::default();
        store
            .put("resumes/u/cv.txt", Bytes::from_static(b"hello"), "text/plain")
            .await
            .unwrap();
        let reference = ResumeRef::S3 {
            key: "resumes/u/cv.txt".to_string(),
        };
        assert_eq!(load_resume_text(&store, &reference).await.unwrap(), "hello");
    }
}
