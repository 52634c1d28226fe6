//! City name value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A city name as entered by a client
///
/// Surrounding whitespace is trimmed. The name must be non-empty and at
/// most [`City::MAX_LEN`] characters long. Case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct City(String);

impl City {
    /// Maximum number of characters accepted from clients
    pub const MAX_LEN: usize = 20;

    /// Parse and validate a city name
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidCity("city must not be empty".into()));
        }

        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(DomainError::InvalidCity(format!(
                "city must be at most {} characters, got {len}",
                Self::MAX_LEN
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the city name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for City {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<City> for String {
    fn from(city: City) -> Self {
        city.0
    }
}

impl AsRef<str> for City {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
