//! Request middleware and extractors.
//!
//! [`auth::AuthUser`] is the authentication seam: handlers that take it as an
//! argument only run for requests carrying a valid Bearer token bound to a
//! live account.

pub mod auth;
