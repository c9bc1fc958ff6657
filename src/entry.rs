// Webring data model
// One Entry per person; a Dataset is the ordered contents of one source

use serde::{Deserialize, Serialize};

/// Maximum length of the `about` blurb, in characters
pub const ABOUT_MAX_LENGTH: usize = 50;

/// Inclusive year range accepted by the contract (future years allowed)
pub const YEAR_MIN: i64 = 2000;
pub const YEAR_MAX: i64 = 2100;

/// Fields every entry must carry
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "website", "year", "about"];

/// One directory record
///
/// The second deployment of the same contract renamed `about` to `fact`;
/// the alias canonicalizes it at the serde boundary so validation and
/// rendering only ever see `about`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    pub name: String,
    pub website: String,
    pub year: i64,
    #[serde(alias = "fact")]
    pub about: String,
}

/// Ordered collection of entries from one source
///
/// Insertion order is meaningful: it is preserved within a year group and
/// determines which row counts as "new" for the change policy.
pub type Dataset = Vec<Entry>;

/// One year's slice of a Dataset, derived fresh on every render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGroup {
    pub year: i64,
    pub entries: Vec<Entry>,
}
