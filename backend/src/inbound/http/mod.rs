//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod validation;
pub mod volunteers;

pub use error::ApiResult;
