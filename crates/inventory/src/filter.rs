use bookstore_catalog::Genre;
use bookstore_core::{DomainError, DomainResult};

/// Attribute filter for paged retrieval, resolved at the service boundary.
///
/// Raw `(filter_type, filter_value)` pairs are parsed into this closed enum
/// before anything reaches the store layer; invalid types and genre values
/// are rejected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeFilter {
    Genre(Genre),
    Title(String),
    Author(String),
}

impl AttributeFilter {
    /// Parse a filter from its wire form. Both the type and, for genre, the
    /// value are matched case-insensitively.
    pub fn parse(filter_type: &str, filter_value: &str) -> DomainResult<Self> {
        if filter_type.trim().is_empty() {
            return Err(DomainError::validation("filter type must not be blank"));
        }
        if filter_value.trim().is_empty() {
            return Err(DomainError::validation("filter value must not be blank"));
        }

        match filter_type.to_ascii_lowercase().as_str() {
            "genre" => Ok(Self::Genre(filter_value.parse()?)),
            "title" => Ok(Self::Title(filter_value.to_string())),
            "author" => Ok(Self::Author(filter_value.to_string())),
            other => Err(DomainError::validation(format!(
                "invalid filter type: {other}"
            ))),
        }
    }
}
