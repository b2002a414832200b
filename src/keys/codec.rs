//! Key construction

use crate::types::{AttrValue, Key, Record, GOALS, PK, SK};
use serde::{Deserialize, Serialize};

/// Separator between the components of a sort key
///
/// Must never appear inside a team, first name or last name.
pub const SEPARATOR: char = '#';

/// Which index a query runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Base table, keyed by `(pk, sk)`
    #[default]
    Primary,
    /// Secondary index keyed by `(pk, goals)`
    Goals,
}

impl IndexKind {
    /// Attributes a resume key on this index must carry
    pub fn key_attributes(self) -> &'static [&'static str] {
        match self {
            Self::Primary => &[PK, SK],
            Self::Goals => &[PK, SK, GOALS],
        }
    }
}

/// Build a sort key: `<team>#<first_name>#<last_name>`
pub fn build_sort_key(national_team: &str, first_name: &str, last_name: &str) -> String {
    format!("{national_team}{SEPARATOR}{first_name}{SEPARATOR}{last_name}")
}

/// Build the primary key used for point lookups
pub fn build_key(country: &str, national_team: &str, first_name: &str, last_name: &str) -> Key {
    let mut key = Key::new();
    key.insert(PK.to_string(), AttrValue::from(country));
    key.insert(
        SK.to_string(),
        AttrValue::from(build_sort_key(national_team, first_name, last_name)),
    );
    key
}

/// Build the exclusive start key that resumes a query right after `last_item`
pub fn build_resume_key(last_item: &Record, index: IndexKind) -> Key {
    index
        .key_attributes()
        .iter()
        .filter_map(|name| {
            last_item
                .attribute(name)
                .map(|value| ((*name).to_string(), value))
        })
        .collect()
}
