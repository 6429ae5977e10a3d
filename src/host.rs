//! Terminal implementation of the host capabilities.

use meetics_core::dispatch::Host;
use meetics_core::{MeeticsResult, RenderedArtifact};
use owo_colors::{OwoColorize, Stream};
use std::path::PathBuf;
use tracing::debug;

/// Host backed by the filesystem and the terminal.
///
/// Alerts are colored when stderr supports it and degrade to plain text
/// otherwise. `close` only marks the run as finished — the process exit is
/// the actual teardown, and main drives that from the pipeline result.
pub struct CliHost {
    output_dir: PathBuf,
}

impl CliHost {
    pub fn new(output_dir: PathBuf) -> Self {
        CliHost { output_dir }
    }
}

impl Host for CliHost {
    fn save(&self, artifact: &RenderedArtifact) -> MeeticsResult<()> {
        let path = self.output_dir.join(&artifact.filename);
        std::fs::write(&path, &artifact.content)?;
        println!(
            "{}",
            format!("  Saved: {}", path.display()).if_supports_color(Stream::Stdout, |t| t.green())
        );
        Ok(())
    }

    fn alert(&self, title: &str, detail: &str) {
        eprintln!(
            "  {}",
            title.if_supports_color(Stream::Stderr, |t| t.red())
        );
        eprintln!("  {detail}");
    }

    fn close(&self) {
        debug!("Pipeline finished, handing control back to the shell");
    }
}
