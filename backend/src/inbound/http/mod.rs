//! HTTP inbound adapter exposing the letter REST endpoints.

pub mod error;
pub mod health;
pub mod letters;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
