//! # Inventory
//!
//! The validated, read-only set of parts a lock can be built from. An
//! [`Inventory`] always holds all three categories, each non-empty and free of
//! duplicate `(name, size)` parts. Per-category part totals are computed once
//! at construction.
//!
//! Validation runs in two phases. Structure first (every category present and
//! non-empty, counts positive, one duplicate scan across the whole inventory),
//! then capacity: a lock of `n` chambers needs at least `n` parts in every
//! category. Capacity is only meaningful for a structurally valid inventory, so
//! it is never checked before structure passes.

use crate::error::ValidationError;
use crate::model::{Category, PartKey, PartSpec};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone)]
pub struct Inventory {
    source: String,
    parts: BTreeMap<Category, Vec<PartSpec>>,
    totals: BTreeMap<Category, u64>,
}

impl Inventory {
    /// Validate `parts` and check they can fill a lock of `lock_size` chambers.
    pub fn build(
        source: impl Into<String>,
        parts: BTreeMap<Category, Vec<PartSpec>>,
        lock_size: usize,
    ) -> Result<Self, ValidationError> {
        let inventory = Self::from_parts(source, parts)?;
        inventory.ensure_capacity(lock_size)?;
        Ok(inventory)
    }

    /// Structural validation only; no lock size is involved.
    pub fn from_parts(
        source: impl Into<String>,
        parts: BTreeMap<Category, Vec<PartSpec>>,
    ) -> Result<Self, ValidationError> {
        for category in Category::ALL {
            let specs = parts
                .get(&category)
                .ok_or(ValidationError::MissingCategory(category))?;
            if specs.is_empty() {
                return Err(ValidationError::EmptyCategory(category));
            }
            for spec in specs {
                if spec.category != category {
                    return Err(ValidationError::MalformedPart {
                        category,
                        token: spec.to_string(),
                        reason: format!("part is a {}, not a {}", spec.category, category),
                    });
                }
                if spec.count == 0 {
                    return Err(ValidationError::MalformedPart {
                        category,
                        token: spec.to_string(),
                        reason: "count must be at least 1".to_string(),
                    });
                }
            }
        }

        let mut seen: HashSet<(Category, PartKey)> = HashSet::new();
        for spec in parts.values().flatten() {
            if !seen.insert((spec.category, spec.key())) {
                return Err(ValidationError::DuplicatePart {
                    category: spec.category,
                    name: spec.name.to_string(),
                    size: spec.size,
                });
            }
        }

        let totals = parts
            .iter()
            .map(|(category, specs)| {
                let total = specs.iter().map(|s| u64::from(s.count)).sum();
                (*category, total)
            })
            .collect();

        Ok(Self {
            source: source.into(),
            parts,
            totals,
        })
    }

    /// Fails when any category holds fewer parts than `lock_size` chambers.
    pub fn ensure_capacity(&self, lock_size: usize) -> Result<(), ValidationError> {
        if lock_size == 0 {
            return Err(ValidationError::ZeroLockSize);
        }
        for category in Category::ALL {
            let available = self.total(category);
            if available < lock_size as u64 {
                return Err(ValidationError::InsufficientParts {
                    category,
                    available,
                    lock_size,
                });
            }
        }
        Ok(())
    }

    /// Name the inventory was loaded from, used to name output files.
    pub fn source_name(&self) -> &str {
        &self.source
    }

    pub fn parts(&self, category: Category) -> &[PartSpec] {
        self.parts.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of `count` over all parts in `category`.
    pub fn total(&self, category: Category) -> u64 {
        self.totals.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
pub(crate) fn parts_from_tokens(
    categories: &[(Category, &[&str])],
) -> BTreeMap<Category, Vec<PartSpec>> {
    categories
        .iter()
        .map(|(category, tokens)| {
            let specs = tokens
                .iter()
                .map(|t| PartSpec::parse(*category, t).unwrap())
                .collect();
            (*category, specs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartName;

    fn sample() -> BTreeMap<Category, Vec<PartSpec>> {
        parts_from_tokens(&[
            (Category::KeyPin, &["AA-1-3", "BB-2-3"]),
            (Category::DriverPin, &["CC-1-6"]),
            (Category::Spring, &["DD-5-6"]),
        ])
    }

    #[test]
    fn test_build_valid_inventory() {
        let inventory = Inventory::build("pins", sample(), 3).unwrap();
        assert_eq!(inventory.source_name(), "pins");
        assert_eq!(inventory.total(Category::KeyPin), 6);
        assert_eq!(inventory.total(Category::DriverPin), 6);
        assert_eq!(inventory.total(Category::Spring), 6);
        assert_eq!(inventory.parts(Category::KeyPin).len(), 2);
    }

    #[test]
    fn test_missing_category() {
        let mut parts = sample();
        parts.remove(&Category::DriverPin);
        let err = Inventory::build("pins", parts, 3).unwrap_err();
        assert_eq!(err, ValidationError::MissingCategory(Category::DriverPin));
    }

    #[test]
    fn test_empty_category() {
        let mut parts = sample();
        parts.insert(Category::Spring, vec![]);
        let err = Inventory::build("pins", parts, 3).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCategory(Category::Spring));
    }

    #[test]
    fn test_duplicate_ignores_count() {
        let parts = parts_from_tokens(&[
            (Category::KeyPin, &["AA-1-3", "AA-1-5"]),
            (Category::DriverPin, &["CC-1-6"]),
            (Category::Spring, &["DD-5-6"]),
        ]);
        let err = Inventory::from_parts("pins", parts).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::DuplicatePart { category: Category::KeyPin, ref name, size: 1 } if name == "AA"
        ));
    }

    #[test]
    fn test_same_part_in_different_categories_is_fine() {
        let parts = parts_from_tokens(&[
            (Category::KeyPin, &["AA-1-3"]),
            (Category::DriverPin, &["AA-1-3"]),
            (Category::Spring, &["AA-1-3"]),
        ]);
        assert!(Inventory::build("pins", parts, 3).is_ok());
    }

    #[test]
    fn test_wrong_category_is_rejected() {
        let mut parts = sample();
        let stray = PartSpec::new(Category::Spring, PartName::new("ZZ").unwrap(), 1, 1);
        parts.get_mut(&Category::KeyPin).unwrap().push(stray);
        let err = Inventory::from_parts("pins", parts).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedPart {
                category: Category::KeyPin,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let mut parts = sample();
        let empty = PartSpec::new(Category::Spring, PartName::new("ZZ").unwrap(), 1, 0);
        parts.get_mut(&Category::Spring).unwrap().push(empty);
        assert!(Inventory::from_parts("pins", parts).is_err());
    }

    #[test]
    fn test_insufficient_parts() {
        let err = Inventory::build("pins", sample(), 7).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientParts {
                category: Category::Spring,
                available: 6,
                lock_size: 7,
            }
        );
    }

    #[test]
    fn test_structure_is_checked_before_capacity() {
        // Springs are too few for the lock, but the missing key pins win.
        let parts = parts_from_tokens(&[
            (Category::DriverPin, &["CC-1-6"]),
            (Category::Spring, &["DD-5-1"]),
        ]);
        let err = Inventory::build("pins", parts, 3).unwrap_err();
        assert_eq!(err, ValidationError::MissingCategory(Category::KeyPin));
    }

    #[test]
    fn test_zero_lock_size() {
        let inventory = Inventory::from_parts("pins", sample()).unwrap();
        assert_eq!(
            inventory.ensure_capacity(0),
            Err(ValidationError::ZeroLockSize)
        );
    }
}
