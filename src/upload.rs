//! HTTP implementation of the upload collaborator.

use async_trait::async_trait;
use meetics_core::dispatch::Uploader;
use meetics_core::{MeeticsError, MeeticsResult, RenderedArtifact};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

/// Bound on how long a silent endpoint can hold the host open.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Uploads the invite to the booking service as a multipart POST.
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpUploader {
    pub fn new(endpoint: String) -> MeeticsResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MeeticsError::Upload(e.to_string()))?;

        Ok(HttpUploader { client, endpoint })
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, artifact: &RenderedArtifact, meeting_id: &str) -> MeeticsResult<()> {
        let calendar = Part::bytes(artifact.content.clone().into_bytes())
            .file_name(artifact.filename.clone())
            .mime_str("text/calendar")
            .map_err(|e| MeeticsError::Upload(e.to_string()))?;

        let form = Form::new()
            .part("calendar", calendar)
            .text("calendar_name", artifact.filename.clone())
            .text("meeting_id", meeting_id.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MeeticsError::Upload(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(MeeticsError::Upload(format!("{status}: {body}")));
        }

        // The service answers with the attachment URL; informational only.
        debug!(%status, body = %body, "Upload endpoint acknowledged");
        Ok(())
    }
}
