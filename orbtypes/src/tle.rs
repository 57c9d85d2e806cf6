use crate::catalog::CatalogNumber;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Length of a well-formed element line
pub const TLE_LINE_LEN: usize = 69;

/// Named two-line element set
/// https://en.wikipedia.org/wiki/Two-line_element_set
#[derive(
    Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize,
)]
#[display(fmt = "{}", "name")]
pub struct TleRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl TleRecord {
    pub fn new<N, L1, L2>(name: N, line1: L1, line2: L2) -> Self
    where
        N: Into<String>,
        L1: Into<String>,
        L2: Into<String>,
    {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// Catalog number from columns 3-7 of line 1, Alpha-5 included
    pub fn catalog_number(&self) -> Option<CatalogNumber> {
        self.line1.get(2..7).and_then(CatalogNumber::from_tle_field)
    }
}
