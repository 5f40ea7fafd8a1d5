//! Identifier management using string interning for efficient storage and comparison.
//!
//! Member and relation identifiers come from the persistence layer as strings
//! and are compared constantly during resolution and layout. The [`Id`] type
//! interns them once so that comparison and hashing are symbol-cheap.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing all identifiers.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Interned identifier for members and relations.
///
/// # Examples
///
/// ```
/// use kindred_core::identifier::Id;
///
/// let ada = Id::new("ada");
/// let also_ada = Id::new("ada");
/// assert_eq!(ada, also_ada);
/// assert_eq!(ada.to_string(), "ada");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        Self(interner.get_or_intern(name))
    }

    /// Creates a synthetic identifier from a numeric index.
    ///
    /// Used for rows that arrive without an identifier of their own, such as
    /// relation records loaded from a flat file.
    pub fn synthetic(idx: usize) -> Self {
        Self::new(&format!("__{idx}"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{name}")
    }
}

// `RelationError` (in the `kindred` crate) embeds member `Id`s in fields named
// `source`/`target`; thiserror's derive treats a `source`-named field as the
// error's cause, which requires the field type to implement `std::error::Error`.
impl std::error::Error for Id {}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        name == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
