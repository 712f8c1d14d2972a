//! # Configuration Composer
//!
//! The cartesian product `springs × driver pins × key pins` as a resumable
//! cursor. For each spring arrangement, for each driver pin arrangement, for
//! each key pin arrangement, one [`LockConfiguration`] is yielded. Key pins
//! vary fastest.
//!
//! The cursor is three indices and nothing else, so stepping is O(1) however
//! many locks the product holds, and it can jump to any position with
//! [`Iterator::nth`] by mixed-radix decoding.

use crate::model::{Arrangement, LockConfiguration};

#[derive(Debug, Clone)]
pub struct Configurations<'a> {
    springs: &'a [Arrangement],
    driver_pins: &'a [Arrangement],
    key_pins: &'a [Arrangement],
    spring: usize,
    driver: usize,
    key: usize,
    done: bool,
}

impl<'a> Configurations<'a> {
    pub fn new(
        springs: &'a [Arrangement],
        driver_pins: &'a [Arrangement],
        key_pins: &'a [Arrangement],
    ) -> Self {
        let done = springs.is_empty() || driver_pins.is_empty() || key_pins.is_empty();
        Self {
            springs,
            driver_pins,
            key_pins,
            spring: 0,
            driver: 0,
            key: 0,
            done,
        }
    }

    /// Total number of configurations in the product.
    pub fn total(&self) -> u128 {
        self.springs.len() as u128 * self.driver_pins.len() as u128 * self.key_pins.len() as u128
    }

    /// Zero-based index of the configuration the next call to `next` yields.
    pub fn index(&self) -> u128 {
        if self.done {
            return self.total();
        }
        let drivers = self.driver_pins.len() as u128;
        let keys = self.key_pins.len() as u128;
        (self.spring as u128 * drivers + self.driver as u128) * keys + self.key as u128
    }

    pub fn remaining(&self) -> u128 {
        self.total() - self.index()
    }

    /// Move the cursor so the next configuration yielded is `index`.
    pub fn seek(&mut self, index: u128) {
        if index >= self.total() {
            self.done = true;
            return;
        }
        let keys = self.key_pins.len() as u128;
        let drivers = self.driver_pins.len() as u128;
        // Each component is below its list length, so the casts are lossless.
        self.key = (index % keys) as usize;
        self.driver = ((index / keys) % drivers) as usize;
        self.spring = (index / keys / drivers) as usize;
        self.done = false;
    }

    fn step(&mut self) {
        self.key += 1;
        if self.key < self.key_pins.len() {
            return;
        }
        self.key = 0;
        self.driver += 1;
        if self.driver < self.driver_pins.len() {
            return;
        }
        self.driver = 0;
        self.spring += 1;
        if self.spring == self.springs.len() {
            self.done = true;
        }
    }
}

impl<'a> Iterator for Configurations<'a> {
    type Item = LockConfiguration<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (springs, driver_pins, key_pins) = (self.springs, self.driver_pins, self.key_pins);
        let config = LockConfiguration {
            springs: &springs[self.spring],
            driver_pins: &driver_pins[self.driver],
            key_pins: &key_pins[self.key],
        };
        self.step();
        Some(config)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let target = self.index().saturating_add(n as u128);
        self.seek(target);
        self.next()
    }
}

impl std::iter::FusedIterator for Configurations<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::key;

    fn arrangements(names: &[&str]) -> Vec<Arrangement> {
        names
            .iter()
            .map(|n| Arrangement::new(vec![key(n, 1)]))
            .collect()
    }

    fn labels(config: &LockConfiguration) -> String {
        format!(
            "{}{}{}",
            config.springs.parts()[0].name,
            config.driver_pins.parts()[0].name,
            config.key_pins.parts()[0].name
        )
    }

    #[test]
    fn test_key_pins_vary_fastest() {
        let springs = arrangements(&["S1", "S2"]);
        let drivers = arrangements(&["D1", "D2"]);
        let keys = arrangements(&["K1", "K2", "K3"]);
        let produced: Vec<String> = Configurations::new(&springs, &drivers, &keys)
            .map(|c| labels(&c))
            .collect();
        assert_eq!(produced.len(), 12);
        assert_eq!(&produced[..4], ["S1D1K1", "S1D1K2", "S1D1K3", "S1D2K1"]);
        assert_eq!(produced[6], "S2D1K1");
        assert_eq!(produced[11], "S2D2K3");
    }

    #[test]
    fn test_empty_side_yields_nothing() {
        let springs = arrangements(&["S1"]);
        let keys = arrangements(&["K1"]);
        let mut iter = Configurations::new(&springs, &[], &keys);
        assert_eq!(iter.total(), 0);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let springs = arrangements(&["S1", "S2"]);
        let drivers = arrangements(&["D1"]);
        let keys = arrangements(&["K1", "K2"]);
        let mut iter = Configurations::new(&springs, &drivers, &keys);
        assert_eq!(iter.size_hint(), (4, Some(4)));
        iter.next();
        assert_eq!(iter.size_hint(), (3, Some(3)));
        assert_eq!(iter.index(), 1);
        iter.by_ref().for_each(drop);
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert_eq!(iter.index(), 4);
    }

    #[test]
    fn test_nth_matches_sequential_iteration() {
        let springs = arrangements(&["S1", "S2", "S3"]);
        let drivers = arrangements(&["D1", "D2"]);
        let keys = arrangements(&["K1", "K2", "K3", "K4"]);
        let all: Vec<String> = Configurations::new(&springs, &drivers, &keys)
            .map(|c| labels(&c))
            .collect();

        for n in 0..all.len() {
            let mut iter = Configurations::new(&springs, &drivers, &keys);
            assert_eq!(labels(&iter.nth(n).unwrap()), all[n]);
            let rest: Vec<String> = iter.map(|c| labels(&c)).collect();
            assert_eq!(rest, all[n + 1..]);
        }

        let mut iter = Configurations::new(&springs, &drivers, &keys);
        iter.next();
        assert_eq!(labels(&iter.nth(5).unwrap()), all[6]);
        assert!(iter.nth(100).is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_index_survives_nth_and_seek() {
        let springs = arrangements(&["S1", "S2"]);
        let drivers = arrangements(&["D1", "D2"]);
        let keys = arrangements(&["K1", "K2", "K3"]);
        let mut iter = Configurations::new(&springs, &drivers, &keys);
        assert_eq!(iter.index(), 0);

        let fifth = iter.nth(4).unwrap();
        assert_eq!(labels(&fifth), "S1D2K2");
        assert_eq!(iter.index(), 5);
        assert_eq!(iter.remaining(), 7);

        iter.seek(9);
        assert_eq!(iter.index(), 9);
        assert_eq!(labels(&iter.next().unwrap()), "S2D2K1");

        iter.seek(12);
        assert_eq!(iter.index(), 12);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_restartable() {
        let springs = arrangements(&["S1", "S2"]);
        let drivers = arrangements(&["D1", "D2"]);
        let keys = arrangements(&["K1", "K2"]);
        let first: Vec<String> = Configurations::new(&springs, &drivers, &keys)
            .map(|c| labels(&c))
            .collect();
        let second: Vec<String> = Configurations::new(&springs, &drivers, &keys)
            .map(|c| labels(&c))
            .collect();
        assert_eq!(first, second);
    }
}
