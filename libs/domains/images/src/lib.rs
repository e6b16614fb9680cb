//! Images Domain
//!
//! Product and payment-proof pictures. Uploads are checked for type and size,
//! given a random key and handed to an [`ImageStore`]; the response carries
//! the public URL to put into a product or purchase.

pub mod config;
pub mod error;
pub mod handlers;
pub mod provider;
pub mod service;

pub use config::{ImageConfig, S3Config};
pub use error::{ImageError, ImageResult};
pub use provider::{ImageStore, InMemoryImageStore, S3ImageStore};
pub use service::{ImageService, ImageUploaded};
