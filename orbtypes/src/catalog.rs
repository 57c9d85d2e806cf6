use derive_more::Display;
use serde::{Deserialize, Serialize};

/// NORAD catalog number, the one identifier a satellite is known by
#[derive(
    Debug, Display, Hash, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CatalogNumber(u64);

impl CatalogNumber {
    /// Decodes the 5-character catalog field of an element line.
    ///
    /// Besides plain digits this accepts the Alpha-5 form, where a leading
    /// letter (I and O skipped) stands for 10 through 33 ten-thousands, so
    /// `A0001` is 100001 and `Z9999` is 339999.
    pub fn from_tle_field(field: &str) -> Option<Self> {
        let field = field.trim();
        let mut chars = field.chars();
        let lead = chars.next()?;
        if !lead.is_ascii_uppercase() {
            return field.parse::<u64>().ok().map(CatalogNumber);
        }

        let rest = chars.as_str();
        if rest.len() != 4 || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let offset = match lead {
            'I' | 'O' => return None,
            'A'..='H' => 0,
            'J'..='N' => 1,
            _ => 2,
        };
        let prefix = u64::from(lead as u8 - b'A') + 10 - offset;
        let low = rest.parse::<u64>().ok()?;
        Some(CatalogNumber(prefix * 10_000 + low))
    }
}

impl From<u64> for CatalogNumber {
    fn from(value: u64) -> Self {
        CatalogNumber(value)
    }
}

impl From<CatalogNumber> for u64 {
    fn from(val: CatalogNumber) -> Self {
        val.0
    }
}
