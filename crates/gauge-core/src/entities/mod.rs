//! Entity structs for all Gauge domain objects.
//!
//! The entity store exclusively owns every instance; callers receive clones.
//! `New*` structs carry the caller-supplied fields of a create operation, the
//! store assigns ids and timestamps.

mod activity;
mod analysis;
mod contact;
mod document;
mod user;

pub use activity::{Activity, NewActivity};
pub use analysis::Analysis;
pub use contact::{ContactSubmission, NewContactSubmission};
pub use document::{Document, NewDocument, estimate_page_count};
pub use user::{NewUser, User};
