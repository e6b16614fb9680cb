//! Bank Accounts Domain
//!
//! Sellers register the bank accounts buyers pay into. Accounts are private
//! to their owner: listing is scoped to the caller and edits go through the
//! ownership middleware.
//!
//! ```text
//! Handlers → Service → Repository (in-memory | Postgres) → entity
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BankError, BankResult};
pub use models::{BankAccount, BankAccountInput, BankAccountResponse};
pub use postgres::PgBankRepository;
pub use repository::{BankRepository, InMemoryBankRepository};
pub use service::BankService;
