//! Word segmentation: splits a run of concatenated (or loosely spaced) words
//! back into its most likely constituent words, via an O(n) circular-buffer
//! dynamic program over window lengths up to `max_segmentation_word_length`.
//!
//! Grounded on the canonical SymSpell segmentation algorithm's shape (a
//! sliding window combined with a rolling best-so-far table rather than a
//! full `O(n^2)` table), reconstructed from its documented behavior and
//! adapted onto this crate's `Index::lookup`.

use crate::index::{Index, LookupOptions, N};
use crate::suggestion::Verbosity;

/// The winning segmentation: the original run split into space-separated
/// words (`segmented`), each replaced by its best dictionary correction
/// (`corrected`), plus the bookkeeping used to pick it.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub segmented: String,
    pub corrected: String,
    pub distance_sum: i64,
    pub log_prob_sum: f64,
}

#[derive(Debug, Clone)]
struct Composition {
    segmented: String,
    corrected: String,
    distance_sum: i64,
    log_prob_sum: f64,
}

impl Index {
    /// `max_segmentation_word_length` bounds the sliding window; `None` uses
    /// this index's longest known dictionary word. `ignore_token`, when
    /// given, is forwarded to each window's internal `lookup` call exactly as
    /// it is for [`Index::lookup`] itself.
    pub fn word_segmentation(
        &self,
        input: &str,
        max_edit_distance: i64,
        max_segmentation_word_length: Option<usize>,
        ignore_token: Option<&dyn Fn(&str) -> bool>,
    ) -> Segmentation {
        let chars: Vec<char> = input.chars().collect();
        let input_len = chars.len();
        if input_len == 0 {
            return Segmentation {
                segmented: String::new(),
                corrected: String::new(),
                distance_sum: 0,
                log_prob_sum: 0.0,
            };
        }

        let cap = max_segmentation_word_length.unwrap_or(self.max_word_length()).max(1);
        let array_size = cap.min(input_len);
        let mut compositions: Vec<Option<Composition>> = vec![None; array_size];
        let mut circular_index: Option<usize> = None;
        let opts = LookupOptions { ignore_token, ..LookupOptions::default() };

        for j in 0..input_len {
            let imax = (input_len - j).min(array_size);
            for i in 1..=imax {
                let window = &chars[j..j + i];
                let has_leading_space = window[0].is_whitespace();
                let separator_length: i64 = if has_leading_space { 0 } else { 1 };
                let raw: String =
                    if has_leading_space { window[1..].iter().collect() } else { window.iter().collect() };
                let raw_len = raw.chars().count() as i64;
                let part: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
                let part_len = part.chars().count() as i64;
                let mut top_ed = raw_len - part_len;

                let top_result;
                let top_log_prob;
                let results =
                    self.lookup(&part, Verbosity::Top, Some(max_edit_distance), &opts).unwrap_or_default();
                if let Some(best) = results.into_iter().next() {
                    top_ed += best.distance;
                    top_log_prob = (best.count.max(1) as f64 / N).log10();
                    top_result = best.term;
                } else {
                    top_ed += part_len;
                    top_log_prob = (10.0 / (N * 10f64.powi(part_len as i32))).log10();
                    top_result = part.clone();
                }

                let window_str: String = window.iter().collect();
                let dest_index = match circular_index {
                    None => (i + array_size - 1) % array_size,
                    Some(ci) => (i + ci) % array_size,
                };

                if j == 0 {
                    compositions[dest_index] = Some(Composition {
                        segmented: window_str,
                        corrected: top_result,
                        distance_sum: top_ed,
                        log_prob_sum: top_log_prob,
                    });
                    continue;
                }

                let ci = circular_index.unwrap();
                let prev = compositions[ci].clone().unwrap();
                let combined_distance = prev.distance_sum + separator_length + top_ed;
                let tied_distance = prev.distance_sum + top_ed;
                let should_replace = i == array_size
                    || compositions[dest_index].as_ref().map_or(true, |dest| {
                        combined_distance < dest.distance_sum
                            || ((tied_distance == dest.distance_sum || combined_distance == dest.distance_sum)
                                && dest.log_prob_sum < prev.log_prob_sum + top_log_prob)
                    });

                if should_replace {
                    compositions[dest_index] = Some(Composition {
                        segmented: format!("{} {}", prev.segmented, window_str),
                        corrected: format!("{} {}", prev.corrected, top_result),
                        distance_sum: combined_distance,
                        log_prob_sum: prev.log_prob_sum + top_log_prob,
                    });
                }
            }

            circular_index = Some(match circular_index {
                None => 0,
                Some(ci) => (ci + 1) % array_size,
            });
        }

        let result = compositions[circular_index.unwrap()].take().unwrap();
        Segmentation {
            segmented: result.segmented,
            corrected: result.corrected,
            distance_sum: result.distance_sum,
            log_prob_sum: result.log_prob_sum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SymSpellConfig;

    fn index() -> Index {
        let mut idx = Index::new(SymSpellConfig::new(2, 7, 1)).unwrap();
        for (term, count) in [
            ("the", 100_000u64),
            ("quick", 5_000),
            ("brown", 4_000),
            ("fox", 3_000),
            ("jumps", 2_000),
            ("over", 10_000),
            ("lazy", 1_000),
            ("dog", 6_000),
        ] {
            idx.create_dictionary_entry(term, count as i64);
        }
        idx
    }

    #[test]
    fn segments_a_concatenated_sentence() {
        let idx = index();
        let result = idx.word_segmentation("thequickbrownfoxjumpsoverthelazydog", 2, None, None);
        assert_eq!(result.corrected, "the quick brown fox jumps over the lazy dog");
        // Nine words stitched back together required inserting eight word
        // separators that weren't present in the run-together input.
        assert_eq!(result.distance_sum, 8);
    }

    #[test]
    fn empty_input_segments_to_empty() {
        let idx = index();
        let result = idx.word_segmentation("", 2, None, None);
        assert_eq!(result.segmented, "");
        assert_eq!(result.corrected, "");
    }

    #[test]
    fn ignore_token_short_circuits_a_window_as_an_exact_match() {
        let idx = index();
        let result = idx.word_segmentation(
            "thequickbrxwnfox",
            2,
            None,
            Some(&|s: &str| s == "brxwn"),
        );
        assert!(result.corrected.contains("brxwn"));
    }
}
