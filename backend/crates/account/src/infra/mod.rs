//! Infrastructure Layer
//!
//! Database, mail transport, and object storage implementations.

pub mod mail;
pub mod postgres;
pub mod storage;

pub use mail::{SmtpConfig, SmtpMailer};
pub use postgres::PgAccountRepository;
pub use storage::LocalDiskStore;
