use core::str::FromStr;

use serde::{Deserialize, Serialize};

use bookstore_core::DomainError;

/// Genre of a book (closed enumeration).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Fiction,
    NonFiction,
    Mystery,
    Fantasy,
    ScienceFiction,
    Biography,
    History,
    Romance,
    Horror,
    Thriller,
    SelfHelp,
    Poetry,
    Children,
    Educational,
    Business,
}

impl Genre {
    pub const ALL: [Genre; 15] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::Fantasy,
        Genre::ScienceFiction,
        Genre::Biography,
        Genre::History,
        Genre::Romance,
        Genre::Horror,
        Genre::Thriller,
        Genre::SelfHelp,
        Genre::Poetry,
        Genre::Children,
        Genre::Educational,
        Genre::Business,
    ];

    /// Wire name of the genre (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "FICTION",
            Genre::NonFiction => "NON_FICTION",
            Genre::Mystery => "MYSTERY",
            Genre::Fantasy => "FANTASY",
            Genre::ScienceFiction => "SCIENCE_FICTION",
            Genre::Biography => "BIOGRAPHY",
            Genre::History => "HISTORY",
            Genre::Romance => "ROMANCE",
            Genre::Horror => "HORROR",
            Genre::Thriller => "THRILLER",
            Genre::SelfHelp => "SELF_HELP",
            Genre::Poetry => "POETRY",
            Genre::Children => "CHILDREN",
            Genre::Educational => "EDUCATIONAL",
            Genre::Business => "BUSINESS",
        }
    }
}

impl core::fmt::Display for Genre {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = DomainError;

    /// Case-insensitive lookup against the closed enumeration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Genre::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| DomainError::validation(format!("invalid genre: {s}")))
    }
}
