//! Wire models for the beneficios REST API
//!
//! Data structures exchanged with the backend, plus the local
//! validation rules the controllers apply before any network call.

mod beneficio;

pub use beneficio::*;
