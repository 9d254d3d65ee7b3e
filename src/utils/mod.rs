//! Shared utilities: error taxonomy, JWT helpers, password hashing, and
//! ownership-chain guards.

pub mod errors;
pub mod jwt;
pub mod ownership;
pub mod password;
