//! Gameplay constants and shared error types.

pub mod constants;
pub mod error;

pub use constants::*;
pub use error::{PlacementError, StoreError};
