//! Core types and pipeline for the meetics ecosystem.
//!
//! This crate converts a loosely-typed set of meeting-booking fields into a
//! well-formed iCalendar invite and hands it off to a host environment:
//! - `fields` for the raw key→string lookup and typed extraction
//! - `timestamp` and `attendee` for normalizing malformed inputs
//! - `ics` for synthesizing the final document text
//! - `dispatch` for the save/upload/close fan-out over injected capabilities

pub mod attendee;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod ics;
pub mod meeting;
pub mod pipeline;
pub mod timestamp;

pub use error::{MeeticsError, MeeticsResult};
pub use meeting::{Attendee, MeetingDocument, RenderedArtifact};
pub use timestamp::CalendarTimestamp;
