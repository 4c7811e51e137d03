//! Structured Response Extraction & Safety Filtering pipeline.
//!
//! Raw model text flows one way: classifiers → conditional sanitizer →
//! extraction cascade → assembled record. All pattern sets are compiled
//! once at first use and shared read-only for the process lifetime, so
//! every invocation is a pure function of its input and may run
//! concurrently with others.

pub mod assemble;
pub mod confidence;
pub mod extract;
pub mod keywords;
pub mod sanitize;
pub mod types;

pub use assemble::assemble;
pub use confidence::derive_confidence;
pub use extract::extract;
pub use keywords::{is_dangerous, is_uncertain};
pub use sanitize::sanitize_response;
pub use types::{Confidence, DISCLAIMER, ExtractedAnswer, ExtractorConfig};
