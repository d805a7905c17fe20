use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a stored transaction.
///
/// Generated once at creation time and immutable thereafter. Serializes as a
/// bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create an ID from an arbitrary string (imported data, tests).
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Abstraction over ID generation to support deterministic tests.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> Id;
}

#[derive(Debug, Clone, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn new_id(&self) -> Id {
        Id::new()
    }
}

/// A deterministic generator that returns a pre-seeded sequence of IDs.
///
/// Panics if you request more IDs than provided.
#[derive(Debug, Default)]
pub struct FixedIdGenerator {
    ids: Mutex<VecDeque<Id>>,
}

impl FixedIdGenerator {
    pub fn new(ids: impl IntoIterator<Item = Id>) -> Self {
        Self {
            ids: Mutex::new(ids.into_iter().collect()),
        }
    }
}

impl IdGenerator for FixedIdGenerator {
    fn new_id(&self) -> Id {
        self.ids
            .lock()
            .expect("fixed id generator lock poisoned")
            .pop_front()
            .expect("fixed id generator exhausted")
    }
}
