//! Display models for CLI output
//!
//! Gateway results are converted into these row types for table output.

pub mod display;

pub use display::{
    ActivityDisplay, ContactDisplay, FieldDisplay, FrameworkDisplay, ProjectDisplay,
    insight_fields, profile_fields,
};
