//! # Core Types
//!
//! A lock is a stack of chambers; each chamber holds one spring, one driver pin
//! and one key pin. Parts of the same [`Category`] are interchangeable between
//! chambers, so a category contributes an [`Arrangement`]: the ordered list of
//! parts filling chambers 1..=n. Three arrangements make a [`LockConfiguration`].
//!
//! Parts are identified within a category by their [`PartKey`] (`name`, `size`).
//! The inventory `count` only bounds how often a key may appear in one
//! arrangement and never takes part in arrangement ordering.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Part categories, in physical assembly order (bottom-up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "springs")]
    Spring,
    #[serde(rename = "driver-pins")]
    DriverPin,
    #[serde(rename = "key-pins")]
    KeyPin,
}

impl Category {
    /// All categories in assembly order.
    pub const ALL: [Category; 3] = [Category::Spring, Category::DriverPin, Category::KeyPin];

    /// The key used for this category in inventory documents.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Spring => "springs",
            Category::DriverPin => "driver-pins",
            Category::KeyPin => "key-pins",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Row label used when rendering a lock.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Spring => "spring:",
            Category::DriverPin => "driver pins:",
            Category::KeyPin => "key pins:",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A two character part name such as `ST` or `K2`. Never purely numeric.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartName(String);

impl PartName {
    pub fn new(name: &str) -> Result<Self, String> {
        if name.chars().count() != 2 {
            return Err("name must be exactly two characters".to_string());
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control() || c == '-') {
            return Err("name may not contain whitespace or dashes".to_string());
        }
        if name.chars().all(|c| c.is_ascii_digit()) {
            return Err("name may not be purely numeric".to_string());
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a part within its category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartKey {
    pub name: PartName,
    pub size: u32,
}

impl PartKey {
    pub fn new(name: PartName, size: u32) -> Self {
        Self { name, size }
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.size)
    }
}

/// One inventory line: `count` identical parts of a given name and size.
#[derive(Debug, Clone)]
pub struct PartSpec {
    pub category: Category,
    pub name: PartName,
    pub size: u32,
    pub count: u32,
}

impl PartSpec {
    pub fn new(category: Category, name: PartName, size: u32, count: u32) -> Self {
        Self {
            category,
            name,
            size,
            count,
        }
    }

    /// Parse an inventory token of the form `NN-size-count`, e.g. `ST-3-12`.
    pub fn parse(category: Category, token: &str) -> Result<Self, ValidationError> {
        let malformed = |reason: &str| ValidationError::MalformedPart {
            category,
            token: token.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = token.trim().split('-').map(str::trim).collect();
        let [name, size, count] = fields.as_slice() else {
            return Err(malformed("expected NAME-SIZE-COUNT"));
        };

        let name = PartName::new(name).map_err(|reason| malformed(&reason))?;
        let size: u32 = size
            .parse()
            .map_err(|_| malformed("size must be a non-negative integer"))?;
        let count: u32 = count
            .parse()
            .map_err(|_| malformed("count must be a non-negative integer"))?;
        if count == 0 {
            return Err(malformed("count must be at least 1"));
        }

        Ok(Self::new(category, name, size, count))
    }

    pub fn key(&self) -> PartKey {
        PartKey::new(self.name.clone(), self.size)
    }

    fn ordering_key(&self) -> (&PartName, u32, u32) {
        (&self.name, self.size, self.count)
    }
}

// Categories are partitioned by the inventory, so they take no part in
// comparing specs.
impl PartialEq for PartSpec {
    fn eq(&self, other: &Self) -> bool {
        self.ordering_key() == other.ordering_key()
    }
}

impl Eq for PartSpec {}

impl PartialOrd for PartSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PartSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordering_key().cmp(&other.ordering_key())
    }
}

impl fmt::Display for PartSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.name, self.size, self.count)
    }
}

/// The parts of one category, chamber by chamber.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arrangement {
    parts: Vec<PartKey>,
}

impl Arrangement {
    pub fn new(parts: Vec<PartKey>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[PartKey] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// How many chambers each part occupies.
    pub fn usage(&self) -> BTreeMap<&PartKey, usize> {
        let mut usage = BTreeMap::new();
        for part in &self.parts {
            *usage.entry(part).or_insert(0) += 1;
        }
        usage
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "|{}", part)?;
        }
        f.write_str("|")
    }
}

/// One buildable lock. Borrowed from the per-category arrangement lists and
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockConfiguration<'a> {
    pub springs: &'a Arrangement,
    pub driver_pins: &'a Arrangement,
    pub key_pins: &'a Arrangement,
}

impl<'a> LockConfiguration<'a> {
    pub fn arrangement(&self, category: Category) -> &'a Arrangement {
        match category {
            Category::Spring => self.springs,
            Category::DriverPin => self.driver_pins,
            Category::KeyPin => self.key_pins,
        }
    }
}

#[cfg(test)]
pub(crate) fn key(name: &str, size: u32) -> PartKey {
    PartKey::new(PartName::new(name).unwrap(), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("pins"), None);
    }

    #[test]
    fn test_category_assembly_order() {
        let mut shuffled = vec![Category::KeyPin, Category::Spring, Category::DriverPin];
        shuffled.sort();
        assert_eq!(shuffled, Category::ALL.to_vec());
    }

    #[test]
    fn test_part_name_rules() {
        assert!(PartName::new("ST").is_ok());
        assert!(PartName::new("K2").is_ok());
        assert!(PartName::new("S").is_err());
        assert!(PartName::new("STX").is_err());
        assert!(PartName::new("12").is_err());
        assert!(PartName::new("A ").is_err());
    }

    #[test]
    fn test_parse_token() {
        let spec = PartSpec::parse(Category::Spring, "ST-3-12").unwrap();
        assert_eq!(spec.name.as_str(), "ST");
        assert_eq!(spec.size, 3);
        assert_eq!(spec.count, 12);
        assert_eq!(spec.to_string(), "ST-3-12");

        let spaced = PartSpec::parse(Category::Spring, "  ST-0-1 ").unwrap();
        assert_eq!(spaced.size, 0);
    }

    #[test]
    fn test_parse_token_rejects_malformed() {
        for token in ["ST-3", "ST-3-1-1", "S-3-1", "12-3-1", "ST-x-1", "ST-3-y", "ST-3-0", ""] {
            let err = PartSpec::parse(Category::KeyPin, token).unwrap_err();
            assert!(
                matches!(err, ValidationError::MalformedPart { token: ref t, .. } if t == token),
                "{token:?} should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn test_part_spec_ordering_ignores_category() {
        let a = PartSpec::parse(Category::KeyPin, "AA-1-3").unwrap();
        let b = PartSpec::parse(Category::Spring, "AA-1-3").unwrap();
        let c = PartSpec::parse(Category::Spring, "AA-2-1").unwrap();
        assert_eq!(a, b);
        assert!(a < c);
    }

    #[test]
    fn test_arrangement_display_and_usage() {
        let arrangement = Arrangement::new(vec![key("AA", 1), key("BB", 2), key("AA", 1)]);
        assert_eq!(arrangement.to_string(), "|AA1|BB2|AA1|");
        let usage = arrangement.usage();
        assert_eq!(usage[&key("AA", 1)], 2);
        assert_eq!(usage[&key("BB", 2)], 1);
    }

    #[test]
    fn test_arrangement_order_is_positional() {
        let a = Arrangement::new(vec![key("AA", 1), key("BB", 1)]);
        let b = Arrangement::new(vec![key("AA", 2), key("AA", 1)]);
        let c = Arrangement::new(vec![key("BB", 1), key("AA", 1)]);
        assert!(a < b);
        assert!(b < c);
    }
}
