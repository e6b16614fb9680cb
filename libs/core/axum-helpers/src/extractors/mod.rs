//! Extractors that reject with [`crate::AppError`] so every failure uses the
//! standard envelope.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
