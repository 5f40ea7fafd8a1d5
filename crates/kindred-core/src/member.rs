//! Member records and calendar dates.
//!
//! A [`Member`] is a read-only snapshot of a person record owned by the
//! persistence layer. The engine only ever consults the identifier, the
//! optional birth/death dates (for chronological validation), and the display
//! fields. [`Date`] carries exactly the total ordering the engine needs;
//! there is no calendar arithmetic.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::Id;

/// A calendar date with total ordering, serialized as `YYYY-MM-DD`.
///
/// Only the ordering is ever consulted; validity beyond field ranges
/// (leap years and month lengths) is the persistence layer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    /// Creates a date from its components.
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a date from a bare year (January 1st).
    ///
    /// Convenient for records where only the birth year is known.
    pub fn from_year(year: i32) -> Self {
        Self::new(year, 1, 1)
    }

    /// Returns the year component.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month component (1-12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day component (1-31).
    pub fn day(self) -> u8 {
        self.day
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Error produced when a date string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date `{input}`: expected YYYY-MM-DD")]
pub struct DateParseError {
    input: String,
}

impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DateParseError {
            input: s.to_string(),
        };

        let mut parts = s.splitn(3, '-');
        let year: i32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let month: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let day: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(err());
        }

        Ok(Self { year, month, day })
    }
}

impl TryFrom<String> for Date {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}

/// Gender tag carried on member records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unspecified,
}

/// A person record.
///
/// Owned by the persistence layer; the engine treats it as immutable input
/// for the duration of one computation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    id: Id,
    first_name: String,
    last_name: String,
    #[serde(default)]
    birth_date: Option<Date>,
    #[serde(default)]
    death_date: Option<Date>,
    #[serde(default)]
    gender: Gender,
}

impl Member {
    /// Creates a member with the given identifier and names.
    pub fn new(id: Id, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            death_date: None,
            gender: Gender::default(),
        }
    }

    /// Sets the birth date.
    pub fn with_birth_date(mut self, date: Date) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Sets the death date.
    pub fn with_death_date(mut self, date: Date) -> Self {
        self.death_date = Some(date);
        self
    }

    /// Sets the gender tag.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Returns the member identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the birth date, if recorded.
    pub fn birth_date(&self) -> Option<Date> {
        self.birth_date
    }

    /// Returns the death date, if recorded.
    pub fn death_date(&self) -> Option<Date> {
        self.death_date
    }

    /// Returns the gender tag.
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Returns "First Last" for display and log output.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
