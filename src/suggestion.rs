//! The `Suggestion` result type, verbosity levels, and the accumulator that
//! implements verbosity-driven pruning as a single tagged-variant buffer
//! instead of scattering `match verbosity` branches through `lookup` (see
//! design note: "the verbosity-driven result pruning is a tagged-variant over
//! a single accumulator").

use serde::{Deserialize, Serialize};

/// A single correction candidate: `(term, distance, count)`, ordered by
/// `(distance asc, count desc)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub term: String,
    pub distance: i64,
    pub count: u64,
}

impl Suggestion {
    pub fn new(term: impl Into<String>, distance: i64, count: u64) -> Self {
        Self { term: term.into(), distance, count }
    }
}

/// Controls how many suggestions `lookup` returns and how aggressively it
/// can stop early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verbosity {
    /// The single suggestion with the smallest distance, highest count among ties.
    Top,
    /// All suggestions at the smallest distance found, ordered by count.
    Closest,
    /// Every suggestion within `max_edit_distance`, ordered by `(distance, count)`.
    All,
}

/// Verbosity-tagged accumulator for suggestions produced during `lookup`.
pub(crate) enum Accumulator {
    Top(Option<Suggestion>),
    Closest(Vec<Suggestion>),
    All(Vec<Suggestion>),
}

impl Accumulator {
    pub(crate) fn new(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Top => Accumulator::Top(None),
            Verbosity::Closest => Accumulator::Closest(Vec::new()),
            Verbosity::All => Accumulator::All(Vec::new()),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Accumulator::Top(s) => s.is_none(),
            Accumulator::Closest(v) | Accumulator::All(v) => v.is_empty(),
        }
    }

    /// Accepts a new candidate at the given distance, mutating
    /// `max_edit_distance2` per verbosity semantics. Returns true if the
    /// candidate was kept.
    pub(crate) fn offer(&mut self, candidate: Suggestion, distance: i64, max_edit_distance2: &mut i64) -> bool {
        match self {
            Accumulator::Top(slot) => match slot {
                None => {
                    *max_edit_distance2 = distance;
                    *slot = Some(candidate);
                    true
                }
                Some(current) => {
                    if distance < *max_edit_distance2 || candidate.count > current.count {
                        *max_edit_distance2 = distance;
                        *slot = Some(candidate);
                        true
                    } else {
                        false
                    }
                }
            },
            Accumulator::Closest(items) => {
                if !items.is_empty() && distance < *max_edit_distance2 {
                    items.clear();
                }
                *max_edit_distance2 = distance;
                items.push(candidate);
                true
            }
            Accumulator::All(items) => {
                items.push(candidate);
                true
            }
        }
    }

    pub(crate) fn into_sorted_vec(self) -> Vec<Suggestion> {
        let mut out = match self {
            Accumulator::Top(slot) => slot.into_iter().collect(),
            Accumulator::Closest(v) | Accumulator::All(v) => v,
        };
        out.sort_by(|a, b| a.distance.cmp(&b.distance).then(b.count.cmp(&a.count)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_distance_then_count_desc() {
        let mut items = vec![
            Suggestion::new("pipe", 0, 5),
            Suggestion::new("pips", 0, 10),
        ];
        items.sort_by(|a, b| a.distance.cmp(&b.distance).then(b.count.cmp(&a.count)));
        assert_eq!(items[0].term, "pips");
        assert_eq!(items[1].term, "pipe");
    }
}
