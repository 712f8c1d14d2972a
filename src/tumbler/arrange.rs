//! # Multiset Arrangements
//!
//! Given parts with bounded availability, enumerate every distinct ordered
//! sequence of length `k` that uses each part at most as often as it is
//! available. Copies of one part are interchangeable, so swapping two of them
//! never yields a new arrangement.
//!
//! The enumeration never materializes part copies. Availability is a counter
//! per distinct part, capped at `k` since no arrangement can use more than `k`
//! copies of anything. [`Arrangements`] walks the sequences as an odometer
//! over part indices:
//!
//! - the first arrangement greedily fills every position with the smallest
//!   part that still has copies left;
//! - each step pops positions from the right, returning their copy to the
//!   pool, until one can be bumped to a larger available part, then refills
//!   the tail greedily.
//!
//! Parts are sorted by `(name, size)` up front, so arrangements come out in
//! ascending lexicographic order and distinct by construction: no duplicate is
//! ever produced, so nothing needs de-duplicating or re-sorting.

use crate::model::{Arrangement, PartKey};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Lazy enumeration of the distinct length-`k` arrangements of a bounded
/// multiset, in ascending order.
#[derive(Debug, Clone)]
pub struct Arrangements {
    parts: Vec<PartKey>,
    remaining: Vec<usize>,
    current: Vec<usize>,
    length: usize,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

impl Arrangements {
    /// `available` pairs a part with how many copies exist. Repeated parts
    /// have their copies pooled.
    pub fn new<I>(available: I, length: usize) -> Self
    where
        I: IntoIterator<Item = (PartKey, u64)>,
    {
        let mut pooled: BTreeMap<PartKey, u64> = BTreeMap::new();
        for (part, count) in available {
            let pool = pooled.entry(part).or_insert(0);
            *pool = pool.saturating_add(count);
        }
        pooled.retain(|_, count| *count > 0);

        let (parts, remaining): (Vec<_>, Vec<_>) = pooled
            .into_iter()
            .map(|(part, count)| {
                let copies = usize::try_from(count).map_or(length, |c| c.min(length));
                (part, copies)
            })
            .unzip();

        let total: usize = remaining.iter().sum();
        let state = if total < length {
            State::Done
        } else {
            State::Fresh
        };

        Self {
            parts,
            remaining,
            current: Vec::with_capacity(length),
            length,
            state,
        }
    }

    fn take(&mut self, index: usize) {
        self.remaining[index] -= 1;
        self.current.push(index);
    }

    /// Fill positions after the current prefix with the smallest parts left.
    fn fill(&mut self) {
        let mut index = 0;
        while self.current.len() < self.length {
            while self.remaining[index] == 0 {
                index += 1;
            }
            self.take(index);
        }
    }

    fn advance(&mut self) -> bool {
        while let Some(last) = self.current.pop() {
            self.remaining[last] += 1;
            if let Some(next) = (last + 1..self.parts.len()).find(|&i| self.remaining[i] > 0) {
                self.take(next);
                self.fill();
                return true;
            }
        }
        false
    }

    fn snapshot(&self) -> Arrangement {
        Arrangement::new(self.current.iter().map(|&i| self.parts[i].clone()).collect())
    }
}

impl Iterator for Arrangements {
    type Item = Arrangement;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => return None,
            State::Fresh => {
                self.fill();
                self.state = State::Running;
            }
            State::Running => {
                if !self.advance() {
                    self.state = State::Done;
                    return None;
                }
            }
        }
        Some(self.snapshot())
    }
}

impl std::iter::FusedIterator for Arrangements {}

/// Collect every distinct arrangement of `length` parts, ascending.
///
/// Returns an empty list when fewer than `length` copies exist in total.
pub fn generate<I>(available: I, length: usize) -> Vec<Arrangement>
where
    I: IntoIterator<Item = (PartKey, u64)>,
{
    Arrangements::new(available, length).collect()
}

/// [`generate`], checking `stop` between arrangements. Returns `None` once it
/// is raised, dropping whatever was collected so far.
pub fn generate_until<I>(available: I, length: usize, stop: &AtomicBool) -> Option<Vec<Arrangement>>
where
    I: IntoIterator<Item = (PartKey, u64)>,
{
    let mut arrangements = Vec::new();
    for arrangement in Arrangements::new(available, length) {
        if stop.load(Ordering::SeqCst) {
            return None;
        }
        arrangements.push(arrangement);
    }
    Some(arrangements)
}
