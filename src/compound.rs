//! Compound lookup: corrects a whitespace-tokenized phrase term-by-term,
//! then considers merging adjacent output terms (bigram-aware) and splitting
//! a single term into a better-scoring pair.
//!
//! Grounded on the wasm reference's `lookup_compound`, generalized onto this
//! crate's `Index`/`Distance`/`Accumulator` building blocks and widened to
//! accept any whitespace tokenizer the caller supplies via `tokenize::parse_words`.

use crate::casing::transfer_casing_similar;
use crate::distance::Distance;
use crate::index::{Index, LookupOptions, N};
use crate::suggestion::{Suggestion, Verbosity};
use crate::tokenize::{is_acronym, is_numeric, parse_words};

/// Options accepted by [`Index::lookup_compound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundOptions {
    /// When set, numeric-only tokens and all-caps acronyms are passed through
    /// unchanged instead of being corrected.
    pub ignore_non_words: bool,
    /// When set, the aggregate result is re-cased to match `input`'s casing
    /// via [`transfer_casing_similar`].
    pub transfer_casing: bool,
}

impl Index {
    /// Corrects `input` as a whitespace-separated phrase: each token is
    /// looked up independently, then adjacent corrected tokens are considered
    /// for merging (scored against the bigram table when available, a unigram
    /// Naive Bayes estimate otherwise) and a single token is considered for
    /// splitting into two when that scores better than the direct correction.
    pub fn lookup_compound(
        &self,
        input: &str,
        max_edit_distance: i64,
        options: &CompoundOptions,
    ) -> Vec<Suggestion> {
        let terms = parse_words(input, false);
        if terms.is_empty() {
            return Vec::new();
        }
        let original_terms = parse_words(input, true);

        let opts = LookupOptions::default();
        let mut parts: Vec<Suggestion> = Vec::with_capacity(terms.len());
        let mut last_combi = false;

        for (i, token) in terms.iter().enumerate() {
            if options.ignore_non_words {
                let original = &original_terms[i];
                if is_numeric(original) || is_acronym(original) {
                    parts.push(Suggestion::new(original.clone(), 0, 0));
                    last_combi = false;
                    continue;
                }
            }

            let best = self
                .lookup(token, Verbosity::Top, Some(max_edit_distance), &opts)
                .unwrap_or_default()
                .into_iter()
                .next();

            if i > 0 && !last_combi {
                if let Some(replacement) = self.try_combine(&terms[i - 1], token, &parts, max_edit_distance, best.as_ref()) {
                    let last = parts.len() - 1;
                    parts[last] = replacement;
                    last_combi = true;
                    continue;
                }
            }
            last_combi = false;

            let best_is_exact = best.as_ref().map_or(false, |b| b.distance == 0);
            if token.chars().count() == 1 || best_is_exact {
                parts.push(best.unwrap_or_else(|| synthetic(token, max_edit_distance)));
                continue;
            }

            if let Some(split) = self.try_split(token, max_edit_distance) {
                let single = best.clone().unwrap_or_else(|| synthetic(token, max_edit_distance));
                if split.distance < single.distance
                    || (split.distance == single.distance && split.score as f64 > single.count as f64)
                {
                    parts.push(split.into_suggestion());
                    continue;
                }
            }

            parts.push(best.unwrap_or_else(|| synthetic(token, max_edit_distance)));
        }

        let joined_term = parts.iter().map(|s| s.term.as_str()).collect::<Vec<_>>().join(" ");
        let aggregate_count =
            (N * parts.iter().map(|p| p.count as f64 / N).product::<f64>()) as u64;

        let mut kernel = Distance::new();
        let unbounded = (input.chars().count().max(joined_term.chars().count()) + 1) as i64;
        let aggregate_distance = kernel.distance_str(input, &joined_term, unbounded).max(0);

        let result_term =
            if options.transfer_casing { transfer_casing_similar(input, &joined_term) } else { joined_term };

        vec![Suggestion::new(result_term, aggregate_distance, aggregate_count)]
    }

    /// Tries combining `prev_token` (already corrected, carried as the last
    /// entry of `parts`) with `token`. Returns the merged suggestion when the
    /// bigram-weighted (or Naive-Bayes fallback) score beats keeping the two
    /// terms separate.
    fn try_combine(
        &self,
        prev_token: &str,
        token: &str,
        parts: &[Suggestion],
        max_edit_distance: i64,
        best: Option<&Suggestion>,
    ) -> Option<Suggestion> {
        let best1 = parts.last()?.clone();
        let best2 = best.cloned().unwrap_or_else(|| {
            Suggestion::new(token.to_string(), max_edit_distance + 1, (10.0 / 10f64.powi(token.chars().count() as i32)) as u64)
        });

        let merged: String = format!("{}{}", prev_token, token);
        let opts = LookupOptions::default();
        let combined = self.lookup(&merged, Verbosity::Top, Some(max_edit_distance), &opts).ok()?;
        let combi = combined.into_iter().next()?;

        let sum_distance = best1.distance + best2.distance;
        let accept = combi.distance + 1 < sum_distance
            || (combi.distance + 1 == sum_distance
                && combi.count as f64 > (best1.count as f64 / N) * best2.count as f64);

        if accept {
            Some(Suggestion::new(combi.term, combi.distance + 1, combi.count))
        } else {
            None
        }
    }

    /// Tries splitting `term` at every interior position into `(left, right)`
    /// and returns the best-scoring split, if any beat keeping `term` whole.
    /// Candidates are ranked by distance first, breaking ties by score.
    fn try_split(&self, term: &str, max_edit_distance: i64) -> Option<SplitCandidate> {
        let chars: Vec<char> = term.chars().collect();
        if chars.len() < 2 {
            return None;
        }
        let opts = LookupOptions::default();
        let mut kernel = Distance::new();
        let mut best: Option<SplitCandidate> = None;

        for split_at in 1..chars.len() {
            let left: String = chars[..split_at].iter().collect();
            let right: String = chars[split_at..].iter().collect();

            let left_best = self.lookup(&left, Verbosity::Top, Some(max_edit_distance), &opts).ok()?;
            let right_best = self.lookup(&right, Verbosity::Top, Some(max_edit_distance), &opts).ok()?;
            let (left_term, left_count) = match left_best.into_iter().next() {
                Some(s) => (s.term, s.count),
                None => (left.clone(), 0),
            };
            let (right_term, right_count) = match right_best.into_iter().next() {
                Some(s) => (s.term, s.count),
                None => (right.clone(), 0),
            };

            let combined = format!("{} {}", left_term, right_term);
            let distance = kernel.distance_str(term, &combined, term.chars().count() as i64 + 1).max(0);

            let bigram_count = self.bigrams.get(&combined).copied();
            let score = match bigram_count {
                Some(c) if format!("{}{}", left_term, right_term) == term => {
                    c.saturating_add(left_count.max(right_count)).saturating_add(2)
                }
                Some(c) => c,
                None => {
                    let unigram = (left_count as f64 / N) * (right_count as f64 / N) * N;
                    (self.bigram_count_min as f64).min(unigram.max(0.0)) as u64
                }
            };

            let candidate = SplitCandidate { left: left_term, right: right_term, score, distance };
            let better = best.as_ref().map_or(true, |b| {
                candidate.distance < b.distance || (candidate.distance == b.distance && candidate.score > b.score)
            });
            if better {
                best = Some(candidate);
            }
        }
        best
    }
}

fn synthetic(token: &str, max_edit_distance: i64) -> Suggestion {
    let count = (10.0 / 10f64.powi(token.chars().count() as i32)).floor() as u64;
    Suggestion::new(token.to_string(), max_edit_distance + 1, count)
}

struct SplitCandidate {
    left: String,
    right: String,
    score: u64,
    distance: i64,
}

impl SplitCandidate {
    fn into_suggestion(self) -> Suggestion {
        Suggestion::new(format!("{} {}", self.left, self.right), self.distance, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SymSpellConfig;

    fn index() -> Index {
        let mut idx = Index::new(SymSpellConfig::new(2, 7, 1)).unwrap();
        idx.create_dictionary_entry("where", 100);
        idx.create_dictionary_entry("is", 200);
        idx.create_dictionary_entry("the", 300);
        idx.create_dictionary_entry("love", 50);
        idx.load_bigram_dictionary("where is 585\nthe love 20\n".as_bytes(), 0, 2, ' ').unwrap();
        idx
    }

    #[test]
    fn compound_lookup_corrects_every_token() {
        let idx = index();
        let result = idx.lookup_compound("wheree iz the lov", 2, &CompoundOptions::default());
        assert_eq!(result.len(), 1);
        assert!(result[0].term.contains("where"));
        assert!(result[0].term.contains("love"));
    }

    #[test]
    fn compound_lookup_on_empty_input_returns_nothing() {
        let idx = index();
        assert!(idx.lookup_compound("   ", 2, &CompoundOptions::default()).is_empty());
    }

    #[test]
    fn ignore_non_words_passes_through_numbers_and_acronyms() {
        let idx = index();
        let opts = CompoundOptions { ignore_non_words: true, ..Default::default() };
        let result = idx.lookup_compound("the 2024 NASA lov", 2, &opts);
        assert!(result[0].term.contains("2024"));
        assert!(result[0].term.contains("NASA"));
    }

    #[test]
    fn transfer_casing_recases_the_aggregate() {
        let idx = index();
        let opts = CompoundOptions { transfer_casing: true, ..Default::default() };
        let result = idx.lookup_compound("Wheree Iz", 2, &opts);
        assert!(result[0].term.starts_with('W'));
    }
}
