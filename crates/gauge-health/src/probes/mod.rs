//! Concrete probes, one per external dependency.

mod cache;
mod database;
mod inference;
mod objects;
mod secrets;

pub use cache::CacheProbe;
pub use database::DocumentStoreProbe;
pub use inference::InferenceProbe;
pub use objects::ObjectStoreProbe;
pub use secrets::SecretStoreProbe;

/// Report keys.
pub const PRIMARY_INFERENCE: &str = "primary_inference";
pub const SECONDARY_INFERENCE: &str = "secondary_inference";
pub const DOCUMENT_STORE: &str = "document_store";
pub const OBJECT_STORE: &str = "object_store";
pub const CACHE: &str = "cache";
pub const SECRET_STORE: &str = "secret_store";
