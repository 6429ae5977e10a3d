//! Artifact dispatch over injected host capabilities.
//!
//! The core pipeline never touches the filesystem, the network or the
//! process directly. The host hands in implementations of these traits,
//! which keeps the pipeline testable without any environment and lets
//! alternate hosts (a CLI, a server-side batch job) supply their own.

use crate::error::MeeticsResult;
use crate::meeting::RenderedArtifact;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{error, info};

/// Compensating wait between the upload outcome and the completion signal,
/// bounding the race between the local save starting and host teardown.
const CLOSE_DELAY: Duration = Duration::from_millis(400);

/// Host environment capabilities: local save, user alert, teardown.
pub trait Host {
    /// Hand the artifact to the invoking user (e.g. write it to disk).
    fn save(&self, artifact: &RenderedArtifact) -> MeeticsResult<()>;

    /// Alert the user. Only fatal conversion failures are surfaced here.
    fn alert(&self, title: &str, detail: &str);

    /// Signal completion. Invoked exactly once per pipeline run.
    fn close(&self);
}

/// The external upload collaborator.
#[async_trait]
pub trait Uploader {
    async fn upload(&self, artifact: &RenderedArtifact, meeting_id: &str) -> MeeticsResult<()>;
}

/// Save the artifact locally, submit it to the upload endpoint, and signal
/// completion — in every branch, after the fixed delay.
///
/// A save failure does not block the upload, and an upload failure does not
/// undo the save; both are logged and the host is closed regardless.
pub async fn dispatch<U, H>(artifact: &RenderedArtifact, meeting_id: &str, uploader: &U, host: &H)
where
    U: Uploader,
    H: Host,
{
    if let Err(err) = host.save(artifact) {
        error!(filename = %artifact.filename, %err, "Local save failed");
    }

    match uploader.upload(artifact, meeting_id).await {
        Ok(()) => info!(filename = %artifact.filename, "Upload acknowledged"),
        Err(err) => error!(filename = %artifact.filename, %err, "Upload failed"),
    }

    tokio::time::sleep(CLOSE_DELAY).await;
    host.close();
}
