//! Display model implementations for table and JSON output
//!
//! Display models transform gateway results into CLI-friendly rows with
//! appropriate column names.

mod activity;
mod common;
mod contact;
mod field;
mod framework;
mod project;

pub use activity::ActivityDisplay;
pub use contact::ContactDisplay;
pub use field::{FieldDisplay, insight_fields, profile_fields};
pub use framework::FrameworkDisplay;
pub use project::ProjectDisplay;
