//! The straight-line conversion pipeline.

use crate::dispatch::{self, Host, Uploader};
use crate::error::MeeticsResult;
use crate::fields::{self, Extraction, RawFields};
use crate::ics;
use tracing::warn;

/// Convert one set of raw fields into an invite and dispatch it.
///
/// Defaults substituted during extraction are logged and the conversion
/// carries on. A start/end/last-write timestamp that fails normalization is
/// fatal: the user is alerted and no upload happens. The host's `close`
/// fires exactly once in every terminal branch.
pub async fn run<U, H>(fields: &RawFields, uploader: &U, host: &H) -> MeeticsResult<()>
where
    U: Uploader,
    H: Host,
{
    let Extraction {
        document,
        recoveries,
    } = fields::extract(fields);

    for recovery in &recoveries {
        warn!(field = recovery.field, detail = %recovery.detail, "Recovered field");
    }

    match ics::synthesize(&document) {
        Ok(artifact) => {
            dispatch::dispatch(&artifact, &document.uid, uploader, host).await;
            Ok(())
        }
        Err(err) => {
            host.alert("Invalid datetime format", &err.to_string());
            host.close();
            Err(err)
        }
    }
}
