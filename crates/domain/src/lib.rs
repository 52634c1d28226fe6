//! Domain layer for Skycast
//!
//! Contains the weather vocabulary: cities, forecast dates, temperature
//! ranges, UTC offsets and manually supplied forecast overrides.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
