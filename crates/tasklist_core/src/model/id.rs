//! Task identifier generation.
//!
//! Ids are the current Unix epoch milliseconds rendered as a decimal string,
//! bumped forward whenever the clock has not advanced since the last id or
//! the candidate is already held by another task.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic, timestamp-derived id source.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Creates a generator that only hands out ids above every numeric id in
    /// `existing`.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let last = existing
            .into_iter()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    /// Returns a fresh id that is not in `taken`.
    pub fn next<'a, I>(&mut self, taken: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.next_at(now_millis(), taken)
    }

    fn next_at<'a, I>(&mut self, now_ms: u64, taken: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let held: HashSet<&str> = taken.into_iter().collect();
        let is_free = |candidate: &u64| !held.contains(candidate.to_string().as_str());

        // Once the numeric range above `last` is spent, restart from the clock.
        let start = match self.last.checked_add(1) {
            Some(next) => next.max(now_ms),
            None => now_ms,
        };
        let numeric = (start..=u64::MAX)
            .find(is_free)
            .or_else(|| (now_ms..start).find(is_free));
        if let Some(candidate) = numeric {
            self.last = candidate;
            return candidate.to_string();
        }

        (0u64..)
            .map(|suffix| format!("{now_ms}-{suffix}"))
            .find(|candidate| !held.contains(candidate.as_str()))
            .unwrap_or_else(|| now_ms.to_string())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::IdGenerator;

    #[test]
    fn ids_within_same_millisecond_are_distinct() {
        let mut ids = IdGenerator::default();
        let first = ids.next_at(1_000, std::iter::empty());
        let second = ids.next_at(1_000, std::iter::empty());
        assert_eq!(first, "1000");
        assert_eq!(second, "1001");
    }

    #[test]
    fn seeded_generator_stays_above_loaded_ids() {
        let mut ids = IdGenerator::seeded(["5000", "not-a-number", "4000"]);
        assert_eq!(ids.next_at(10, std::iter::empty()), "5001");
    }

    #[test]
    fn skips_ids_already_taken() {
        let mut ids = IdGenerator::default();
        let taken = ["2000", "2001"];
        assert_eq!(ids.next_at(2_000, taken.iter().copied()), "2002");
    }

    #[test]
    fn follows_the_clock_when_it_moves_ahead() {
        let mut ids = IdGenerator::default();
        ids.next_at(1_000, std::iter::empty());
        assert_eq!(ids.next_at(9_000, std::iter::empty()), "9000");
    }

    #[test]
    fn restarts_from_the_clock_after_the_largest_id() {
        let max = u64::MAX.to_string();
        let mut ids = IdGenerator::seeded([max.as_str()]);
        assert_eq!(ids.next_at(1_000, [max.as_str()]), "1000");
        assert_eq!(ids.next_at(1_000, [max.as_str(), "1000"]), "1001");
    }

    #[test]
    fn top_of_range_is_handed_out_once() {
        let below_max = (u64::MAX - 1).to_string();
        let max = u64::MAX.to_string();
        let mut ids = IdGenerator::seeded([below_max.as_str()]);
        assert_eq!(ids.next_at(5, [below_max.as_str()]), max);
        assert_eq!(ids.next_at(5, [below_max.as_str(), max.as_str()]), "5");
    }
}
