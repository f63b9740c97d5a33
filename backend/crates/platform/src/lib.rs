//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, SHA-256, constant-time equality)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Phone number format validation

pub mod crypto;
pub mod password;
pub mod phone;
