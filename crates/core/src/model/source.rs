use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown card source: {0} (expected `generated` or `saved`)")]
pub struct CardSourceParseError(pub String);

/// Where a quiz should draw its cards from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardSource {
    /// The most recently generated set held in the local cache.
    #[default]
    Generated,
    /// The user's saved library on the backend.
    Saved,
}

impl FromStr for CardSource {
    type Err = CardSourceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generated" => Ok(Self::Generated),
            "saved" => Ok(Self::Saved),
            _ => Err(CardSourceParseError(s.to_owned())),
        }
    }
}

impl fmt::Display for CardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardSource::Generated => f.write_str("generated"),
            CardSource::Saved => f.write_str("saved"),
        }
    }
}

/// Concrete step chosen for a requested [`CardSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePlan {
    /// Use the cached generated cards as-is.
    UseCache,
    /// Fetch the saved library. `fallback` is set when the generated set was
    /// requested but the cache was empty.
    FetchRemote { fallback: bool },
}

impl SourcePlan {
    /// Selection rule:
    /// - `Generated` with cached cards uses the cache.
    /// - `Generated` with an empty cache falls back to the saved library.
    /// - `Saved` always fetches the library, ignoring the cache.
    #[must_use]
    pub fn resolve(source: CardSource, cached_len: usize) -> Self {
        match source {
            CardSource::Generated if cached_len > 0 => SourcePlan::UseCache,
            CardSource::Generated => SourcePlan::FetchRemote { fallback: true },
            CardSource::Saved => SourcePlan::FetchRemote { fallback: false },
        }
    }
}
