//! # ZIP-Prefix Table
//!
//! Maps the first three digits of a ZIP code (the USPS sectional center
//! prefix) to the state it belongs to. Coverage is intentionally coarse:
//! the major metro ranges of the states the LLC flow knows most about, plus
//! a handful of neighbours. Pennsylvania and Alaska are not mapped.
//!
//! This is a best-effort geographic hint, never an authoritative address
//! check.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use bizform_core::StateCode;

/// Inclusive prefix ranges per state.
const PREFIX_RANGES: &[(StateCode, u16, u16)] = &[
    // Massachusetts
    (StateCode::Ma, 10, 27),
    // New Jersey
    (StateCode::Nj, 70, 89),
    // New York (NYC, Long Island, upstate)
    (StateCode::Ny, 100, 149),
    // Delaware
    (StateCode::De, 197, 199),
    // District of Columbia (201 belongs to Virginia)
    (StateCode::Dc, 200, 200),
    (StateCode::Dc, 202, 205),
    // Georgia
    (StateCode::Ga, 300, 319),
    (StateCode::Ga, 398, 399),
    // Florida
    (StateCode::Fl, 320, 349),
    // Illinois
    (StateCode::Il, 600, 629),
    // Texas
    (StateCode::Tx, 750, 799),
    (StateCode::Tx, 885, 885),
    // Colorado
    (StateCode::Co, 800, 816),
    // Wyoming
    (StateCode::Wy, 820, 831),
    // Nevada
    (StateCode::Nv, 889, 898),
    // California
    (StateCode::Ca, 900, 961),
    // Washington
    (StateCode::Wa, 980, 994),
];

/// Prefix → state lookup.
#[derive(Debug, Clone)]
pub struct ZipPrefixTable {
    by_prefix: BTreeMap<String, StateCode>,
}

impl ZipPrefixTable {
    fn build() -> Self {
        let mut by_prefix = BTreeMap::new();
        for &(state, lo, hi) in PREFIX_RANGES {
            for prefix in lo..=hi {
                by_prefix.insert(format!("{prefix:03}"), state);
            }
        }
        Self { by_prefix }
    }

    /// State for an exact three-character prefix.
    pub fn get(&self, prefix: &str) -> Option<StateCode> {
        self.by_prefix.get(prefix).copied()
    }

    /// All mapped prefixes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, StateCode)> {
        self.by_prefix.iter().map(|(p, s)| (p.as_str(), *s))
    }

    /// Number of mapped prefixes.
    pub fn len(&self) -> usize {
        self.by_prefix.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }

    /// The raw ranges the table was expanded from.
    pub fn ranges() -> &'static [(StateCode, u16, u16)] {
        PREFIX_RANGES
    }
}

/// The process-wide prefix table.
pub fn zip_prefix_table() -> &'static ZipPrefixTable {
    static TABLE: OnceLock<ZipPrefixTable> = OnceLock::new();
    TABLE.get_or_init(ZipPrefixTable::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_prefixes() {
        let table = zip_prefix_table();
        assert_eq!(table.get("902"), Some(StateCode::Ca));
        assert_eq!(table.get("941"), Some(StateCode::Ca));
        assert_eq!(table.get("100"), Some(StateCode::Ny));
        assert_eq!(table.get("021"), Some(StateCode::Ma));
        assert_eq!(table.get("885"), Some(StateCode::Tx));
    }

    #[test]
    fn unmapped_prefixes() {
        let table = zip_prefix_table();
        // Pennsylvania and Alaska are not covered.
        assert_eq!(table.get("191"), None);
        assert_eq!(table.get("999"), None);
        // 201 is northern Virginia, not DC.
        assert_eq!(table.get("201"), None);
        assert_eq!(table.get("90"), None);
    }

    #[test]
    fn prefixes_are_three_digits() {
        for (prefix, _) in zip_prefix_table().iter() {
            assert_eq!(prefix.len(), 3);
            assert!(prefix.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn expansion_matches_ranges() {
        let expected: usize = ZipPrefixTable::ranges()
            .iter()
            .map(|(_, lo, hi)| usize::from(hi - lo) + 1)
            .sum();
        assert_eq!(zip_prefix_table().len(), expected);
    }
}
