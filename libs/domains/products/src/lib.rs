//! Products Domain
//!
//! Listing, searching and buying products. Sellers manage their own
//! products; anyone may browse; buyers pay into one of the seller's bank
//! accounts and stock is taken under a row lock.
//!
//! ```text
//! Handlers → Service → Repository (in-memory | Postgres) → entity
//!               ↘ SellerLookup (users, bank accounts)
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod seller;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{
    CreateProduct, Product, ProductCondition, ProductDetail, ProductFilter, ProductResponse,
    PurchaseRequest, UpdateProduct, UpdateStock,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use seller::{SellerBankAccount, SellerLookup};
pub use service::ProductService;
