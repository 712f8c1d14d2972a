//! # Category Combinator
//!
//! Runs the arrangement generator once per category, in assembly order
//! (springs, driver pins, key pins), and keeps the three sorted lists. These
//! are small next to the number of locks they combine into, so they are
//! materialized; the locks themselves never are (see [`crate::compose`]).
//!
//! Arranging a large category can take a long while, so [`CategoryArrangements::build_until`]
//! checks a stop flag between arrangements.

use crate::arrange::generate_until;
use crate::compose::Configurations;
use crate::error::{Result, TumblerError};
use crate::inventory::Inventory;
use crate::model::{Arrangement, Category, PartSpec};
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;

#[derive(Debug, Clone)]
pub struct CategoryArrangements {
    lock_size: usize,
    springs: Vec<Arrangement>,
    driver_pins: Vec<Arrangement>,
    key_pins: Vec<Arrangement>,
}

/// Pre-flight numbers for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub inventory: String,
    pub lock_size: usize,
    pub arrangements: BTreeMap<Category, usize>,
    pub total: u128,
}

impl CategoryArrangements {
    /// Arrange every category of `inventory` over `lock_size` chambers.
    pub fn build(inventory: &Inventory, lock_size: usize) -> Result<Self> {
        Self::build_until(inventory, lock_size, &AtomicBool::new(false))?.ok_or_else(|| {
            TumblerError::Combinator("arranging stopped with no stop request".to_string())
        })
    }

    /// [`build`](Self::build), giving up with `Ok(None)` once `stop` is raised.
    pub fn build_until(
        inventory: &Inventory,
        lock_size: usize,
        stop: &AtomicBool,
    ) -> Result<Option<Self>> {
        inventory.ensure_capacity(lock_size)?;

        let arrange = |category: Category| {
            arrange_category(category, inventory.parts(category), lock_size, stop)
        };
        let Some(springs) = arrange(Category::Spring)? else {
            return Ok(None);
        };
        let Some(driver_pins) = arrange(Category::DriverPin)? else {
            return Ok(None);
        };
        let Some(key_pins) = arrange(Category::KeyPin)? else {
            return Ok(None);
        };

        let plan = Self {
            lock_size,
            springs,
            driver_pins,
            key_pins,
        };
        info!(
            "{} lock configurations for {} chambers",
            plan.total(),
            lock_size
        );
        Ok(Some(plan))
    }

    pub fn lock_size(&self) -> usize {
        self.lock_size
    }

    pub fn arrangements(&self, category: Category) -> &[Arrangement] {
        match category {
            Category::Spring => &self.springs,
            Category::DriverPin => &self.driver_pins,
            Category::KeyPin => &self.key_pins,
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.arrangements(category).len()
    }

    /// Number of lock configurations: the product of the category counts.
    /// Informational only; saturates rather than overflowing.
    pub fn total(&self) -> u128 {
        Category::ALL
            .iter()
            .fold(1u128, |acc, c| acc.saturating_mul(self.count(*c) as u128))
    }

    /// A fresh cursor over every lock configuration, in canonical order.
    pub fn configurations(&self) -> Configurations<'_> {
        Configurations::new(&self.springs, &self.driver_pins, &self.key_pins)
    }

    pub fn summary(&self, inventory: &Inventory) -> PlanSummary {
        PlanSummary {
            inventory: inventory.source_name().to_string(),
            lock_size: self.lock_size,
            arrangements: Category::ALL.iter().map(|c| (*c, self.count(*c))).collect(),
            total: self.total(),
        }
    }
}

fn arrange_category(
    category: Category,
    parts: &[PartSpec],
    lock_size: usize,
    stop: &AtomicBool,
) -> Result<Option<Vec<Arrangement>>> {
    let Some(arrangements) = generate_until(
        parts.iter().map(|p| (p.key(), u64::from(p.count))),
        lock_size,
        stop,
    ) else {
        warn!("Stopped by user while arranging {}", category);
        return Ok(None);
    };
    if arrangements.is_empty() {
        return Err(TumblerError::Combinator(format!(
            "no {} arrangements for {} chambers",
            category, lock_size
        )));
    }
    info!("{}: {} arrangements", category, arrangements.len());
    Ok(Some(arrangements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::inventory::parts_from_tokens;

    fn sample_inventory() -> Inventory {
        let parts = parts_from_tokens(&[
            (Category::KeyPin, &["AA-1-3", "BB-2-3"]),
            (Category::DriverPin, &["CC-1-6"]),
            (Category::Spring, &["DD-5-6"]),
        ]);
        Inventory::from_parts("pins", parts).unwrap()
    }

    #[test]
    fn test_counts_and_total() {
        let plan = CategoryArrangements::build(&sample_inventory(), 3).unwrap();
        assert_eq!(plan.count(Category::Spring), 1);
        assert_eq!(plan.count(Category::DriverPin), 1);
        assert_eq!(plan.count(Category::KeyPin), 8);
        assert_eq!(plan.total(), 8);
        assert_eq!(plan.lock_size(), 3);
    }

    #[test]
    fn test_total_is_product_of_counts() {
        let parts = parts_from_tokens(&[
            (Category::KeyPin, &["AA-1-2", "BB-2-2"]),
            (Category::DriverPin, &["CC-1-1", "CD-2-1"]),
            (Category::Spring, &["DD-5-1", "DE-4-1"]),
        ]);
        let inventory = Inventory::from_parts("pins", parts).unwrap();
        let plan = CategoryArrangements::build(&inventory, 2).unwrap();
        assert_eq!(plan.count(Category::KeyPin), 4);
        assert_eq!(plan.count(Category::DriverPin), 2);
        assert_eq!(plan.count(Category::Spring), 2);
        assert_eq!(plan.total(), 16);
        assert_eq!(plan.configurations().count(), 16);
    }

    #[test]
    fn test_capacity_is_rechecked() {
        let err = CategoryArrangements::build(&sample_inventory(), 7).unwrap_err();
        assert!(matches!(
            err,
            TumblerError::Validation(ValidationError::InsufficientParts { .. })
        ));
    }

    #[test]
    fn test_empty_category_is_an_internal_error() {
        let parts = parts_from_tokens(&[(Category::Spring, &["DD-5-1"])]);
        let stop = AtomicBool::new(false);
        let err = arrange_category(Category::Spring, &parts[&Category::Spring], 2, &stop)
            .unwrap_err();
        assert!(matches!(err, TumblerError::Combinator(_)));
        assert_eq!(err.exit_code(), crate::error::EXIT_COMBINATOR);
    }

    #[test]
    fn test_raised_stop_abandons_arranging() {
        let parts = parts_from_tokens(&[
            (Category::KeyPin, &["AA-1-11", "BB-1-11", "CC-1-11", "DD-1-11", "EE-1-11", "FF-1-11"]),
            (Category::DriverPin, &["GG-1-11"]),
            (Category::Spring, &["HH-5-11"]),
        ]);
        let inventory = Inventory::from_parts("big", parts).unwrap();
        let stop = AtomicBool::new(true);
        let plan = CategoryArrangements::build_until(&inventory, 11, &stop).unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn test_build_until_without_stop_matches_build() {
        let inventory = sample_inventory();
        let stop = AtomicBool::new(false);
        let plan = CategoryArrangements::build_until(&inventory, 3, &stop)
            .unwrap()
            .unwrap();
        let built = CategoryArrangements::build(&inventory, 3).unwrap();
        assert_eq!(plan.summary(&inventory), built.summary(&inventory));
    }

    #[test]
    fn test_summary_serializes_with_category_keys() {
        let inventory = sample_inventory();
        let plan = CategoryArrangements::build(&inventory, 3).unwrap();
        let json = serde_json::to_value(plan.summary(&inventory)).unwrap();
        assert_eq!(json["inventory"], "pins");
        assert_eq!(json["arrangements"]["key-pins"], 8);
        assert_eq!(json["arrangements"]["springs"], 1);
        assert_eq!(json["total"], 8);
    }
}
