//! Common types used throughout goalpost
//!
//! Attribute values, keys and the stored player statistics record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Attribute Names
// ============================================================================

/// Partition key attribute (country)
pub const PK: &str = "pk";

/// Sort key attribute (`<team>#<first>#<last>`)
pub const SK: &str = "sk";

/// Goal count attribute, sort attribute of the secondary index
pub const GOALS: &str = "goals";

/// Assist count attribute
pub const ASSISTS: &str = "assists";

/// Appearance count attribute
pub const APPEARANCES: &str = "appearances";

/// Country attribute
pub const COUNTRY: &str = "country";

/// National team attribute
pub const NATIONAL_TEAM: &str = "national_team";

/// First name attribute
pub const FIRST_NAME: &str = "first_name";

/// Last name attribute
pub const LAST_NAME: &str = "last_name";

// ============================================================================
// Attribute Values
// ============================================================================

/// A single stored attribute value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttrValue {
    /// String attribute
    S(String),
    /// Numeric attribute
    N(i64),
}

impl AttrValue {
    /// Borrow the string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            Self::N(_) => None,
        }
    }

    /// Numeric payload, if this is a number
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::N(n) => Some(*n),
            Self::S(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{s}"),
            Self::N(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::N(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::N(i64::from(value))
    }
}

/// Index key attributes mapped to their values
///
/// Used both for point-lookup keys and for exclusive start keys.
pub type Key = BTreeMap<String, AttrValue>;

// ============================================================================
// Record
// ============================================================================

/// Statistics of one player, as stored in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Partition key, the player's country
    #[serde(rename = "pk")]
    pub partition_key: String,

    /// Sort key, `<team>#<first_name>#<last_name>`
    #[serde(rename = "sk")]
    pub sort_key: String,

    /// Goals scored, sort attribute of the secondary index
    pub goals: u32,

    /// Assists
    pub assists: u32,

    /// Appearances
    pub appearances: u32,

    /// Country (denormalized from the partition key)
    pub country: String,

    /// National team (denormalized from the sort key)
    pub national_team: String,

    /// First name (denormalized from the sort key)
    pub first_name: String,

    /// Last name (denormalized from the sort key)
    pub last_name: String,
}

impl Record {
    /// Create a record whose keys are derived from its plain attributes
    pub fn new(
        country: impl Into<String>,
        national_team: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        goals: u32,
        assists: u32,
        appearances: u32,
    ) -> Self {
        let country = country.into();
        let national_team = national_team.into();
        let first_name = first_name.into();
        let last_name = last_name.into();
        Self {
            partition_key: country.clone(),
            sort_key: crate::keys::build_sort_key(&national_team, &first_name, &last_name),
            goals,
            assists,
            appearances,
            country,
            national_team,
            first_name,
            last_name,
        }
    }

    /// Look up an attribute by its stored name
    pub fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            PK => Some(AttrValue::from(self.partition_key.as_str())),
            SK => Some(AttrValue::from(self.sort_key.as_str())),
            GOALS => Some(AttrValue::from(self.goals)),
            ASSISTS => Some(AttrValue::from(self.assists)),
            APPEARANCES => Some(AttrValue::from(self.appearances)),
            COUNTRY => Some(AttrValue::from(self.country.as_str())),
            NATIONAL_TEAM => Some(AttrValue::from(self.national_team.as_str())),
            FIRST_NAME => Some(AttrValue::from(self.first_name.as_str())),
            LAST_NAME => Some(AttrValue::from(self.last_name.as_str())),
            _ => None,
        }
    }
}
