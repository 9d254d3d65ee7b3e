//! Configuration modules, each loaded from environment variables.
//!
//! - [`ai`]: text-generation backend settings
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL pool initialization
//! - [`jwt`]: token secret and expiries

pub mod ai;
pub mod cors;
pub mod database;
pub mod jwt;
