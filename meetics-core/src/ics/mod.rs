//! ICS document synthesis.
//!
//! One-way generation of an RFC 5545 invite; meetics never reads .ics
//! files back.

mod generate;

pub use generate::synthesize;
