//! The symmetric-delete dictionary index: term/count tables, the
//! delete-variant multimap, and single-term `lookup`.
//!
//! Grounded on the wasm reference port's `SymSpell` (`create_dictionary_entry`,
//! `edits`/`create_deletes`, `lookup`), generalized to `ahash` maps the way
//! the teacher's `symspell.rs` stores its `words`/`deletes` tables, and with
//! the count tables widened to `u64` with explicit saturation rather than
//! silently wrapping (see design note on `COUNT_MAX`).

use std::io::{self, BufRead};

use ahash::{AHashMap, AHashSet};
use tracing::{debug, trace};

use crate::casing::transfer_casing_similar;
use crate::config::SymSpellConfig;
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::suggestion::{Accumulator, Suggestion, Verbosity};

/// Reference corpus size used to normalize counts into probabilities.
pub const N: f64 = 1_024_908_267_229.0;

/// Saturating ceiling for accumulated term/bigram counts.
pub const COUNT_MAX: u64 = u64::MAX;

/// A read-only snapshot of index size, useful for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub word_count: usize,
    pub below_threshold_count: usize,
    pub delete_bucket_count: usize,
    pub bigram_count: usize,
    pub max_word_length: usize,
}

/// Options accepted by [`Index::lookup`].
pub struct LookupOptions<'a> {
    pub include_unknown: bool,
    pub ignore_token: Option<&'a dyn Fn(&str) -> bool>,
    pub transfer_casing: bool,
}

impl Default for LookupOptions<'_> {
    fn default() -> Self {
        Self { include_unknown: false, ignore_token: None, transfer_casing: false }
    }
}

/// The symmetric-delete dictionary.
pub struct Index {
    config: SymSpellConfig,
    pub(crate) words: AHashMap<String, u64>,
    below_threshold: AHashMap<String, u64>,
    deletes: AHashMap<String, Vec<String>>,
    pub(crate) bigrams: AHashMap<String, u64>,
    pub(crate) bigram_count_min: u64,
    max_word_length: usize,
}

impl Index {
    pub fn new(config: SymSpellConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            words: AHashMap::new(),
            below_threshold: AHashMap::new(),
            deletes: AHashMap::new(),
            bigrams: AHashMap::new(),
            bigram_count_min: u64::MAX,
            max_word_length: 0,
        })
    }

    pub fn config(&self) -> SymSpellConfig {
        self.config
    }

    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            word_count: self.words.len(),
            below_threshold_count: self.below_threshold.len(),
            delete_bucket_count: self.deletes.len(),
            bigram_count: self.bigrams.len(),
            max_word_length: self.max_word_length,
        }
    }

    pub fn count_of(&self, term: &str) -> Option<u64> {
        self.words.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.words.contains_key(term)
    }

    /// Inserts or accumulates `count` for `term`. Negative counts are
    /// clamped to zero. Returns `true` iff this call newly promoted `term`
    /// into the Words table.
    pub fn create_dictionary_entry(&mut self, term: impl Into<String>, count: i64) -> bool {
        let term = term.into();
        let count = count.max(0) as u64;
        let threshold = self.config.count_threshold.max(0) as u64;

        if threshold > 0 && count == 0 {
            return false;
        }

        if let Some(&prev) = self.below_threshold.get(&term) {
            let total = prev.saturating_add(count);
            if total >= threshold {
                self.below_threshold.remove(&term);
                return self.promote(term, total);
            }
            self.below_threshold.insert(term, total);
            return false;
        }

        if let Some(&prev) = self.words.get(&term) {
            let total = prev.saturating_add(count);
            self.words.insert(term, total);
            return false;
        }

        if count < threshold {
            self.below_threshold.insert(term, count);
            return false;
        }

        self.promote(term, count)
    }

    fn promote(&mut self, term: String, count: u64) -> bool {
        let term_len = term.chars().count();
        if term_len > self.max_word_length {
            self.max_word_length = term_len;
        }
        let deletes = self.create_deletes(&term);
        for variant in deletes {
            self.deletes.entry(variant).or_default().push(term.clone());
        }
        debug!(term = %term, count, "promoted term into dictionary");
        self.words.insert(term, count);
        true
    }

    fn create_deletes(&self, term: &str) -> AHashSet<String> {
        let mut set = AHashSet::new();
        let term_len = term.chars().count() as i64;
        if term_len <= self.config.max_edit_distance {
            set.insert(String::new());
        }

        let key: String = if term_len > self.config.prefix_length {
            term.chars().take(self.config.prefix_length as usize).collect()
        } else {
            term.to_string()
        };
        set.insert(key.clone());
        self.edits(&key, 0, &mut set);
        set
    }

    fn edits(&self, word: &str, depth: i64, out: &mut AHashSet<String>) {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= 1 {
            return;
        }
        let next_depth = depth + 1;
        for i in 0..chars.len() {
            let variant: String =
                chars.iter().enumerate().filter(|&(j, _)| j != i).map(|(_, &c)| c).collect();
            if !out.contains(&variant) {
                if next_depth < self.config.max_edit_distance {
                    self.edits(&variant, next_depth, out);
                }
                out.insert(variant);
            }
        }
    }

    /// Loads `term count` pairs, one per line. Lines with fewer than
    /// `max(term_index, count_index) + 1` fields are skipped. Returns the
    /// number of lines that resulted in a newly-promoted term.
    pub fn load_dictionary<R: BufRead>(
        &mut self,
        source: R,
        term_index: usize,
        count_index: usize,
        separator: char,
    ) -> io::Result<usize> {
        let needed = term_index.max(count_index) + 1;
        let mut promoted = 0;
        for line in source.lines() {
            let line = line?;
            let parts: Vec<&str> = line.split(separator).collect();
            if parts.len() < needed {
                continue;
            }
            let count: i64 = parts[count_index].trim().parse().unwrap_or(0);
            if self.create_dictionary_entry(parts[term_index].to_string(), count) {
                promoted += 1;
            }
        }
        Ok(promoted)
    }

    /// Loads bigram `term1 term2 count` triples. When `separator == ' '`
    /// each line must yield at least 3 fields and the key is
    /// `field[term_index] + ' ' + field[term_index + 1]`; otherwise each line
    /// must yield at least 2 fields and the key is `field[term_index]`.
    pub fn load_bigram_dictionary<R: BufRead>(
        &mut self,
        source: R,
        term_index: usize,
        count_index: usize,
        separator: char,
    ) -> io::Result<usize> {
        let mut loaded = 0;
        for line in source.lines() {
            let line = line?;
            let parts: Vec<&str> = line.split(separator).collect();
            let key = if separator == ' ' {
                if parts.len() < 3 {
                    continue;
                }
                format!("{} {}", parts[term_index], parts[term_index + 1])
            } else {
                if parts.len() < 2 {
                    continue;
                }
                parts[term_index].to_string()
            };
            let count: u64 = parts[count_index].trim().parse().unwrap_or(0);
            if count < self.bigram_count_min {
                self.bigram_count_min = count;
            }
            self.bigrams.insert(key, count);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Finds suggested spellings for `input`. `max_edit_distance` defaults to
    /// the index's configured maximum and must not exceed it.
    pub fn lookup(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: Option<i64>,
        options: &LookupOptions,
    ) -> Result<Vec<Suggestion>> {
        let max_edit_distance = max_edit_distance.unwrap_or(self.config.max_edit_distance);
        if max_edit_distance > self.config.max_edit_distance {
            return Err(Error::MaxEditDistanceExceeded {
                requested: max_edit_distance,
                configured: self.config.max_edit_distance,
            });
        }

        trace!(input, max_edit_distance, "lookup");
        let mut acc = Accumulator::new(verbosity);
        let input_len = input.chars().count() as i64;

        let finalize = |acc: Accumulator, input: &str| -> Vec<Suggestion> {
            let mut results = acc.into_sorted_vec();
            if options.include_unknown && results.is_empty() {
                results.push(Suggestion::new(input, max_edit_distance + 1, 0));
            }
            if options.transfer_casing {
                for s in &mut results {
                    s.term = transfer_casing_similar(input, &s.term.to_lowercase());
                }
            }
            results
        };

        if input_len - max_edit_distance > self.max_word_length as i64 {
            return Ok(finalize(acc, input));
        }

        if let Some(&count) = self.words.get(input) {
            set_exact(&mut acc, input, count);
            if !matches!(verbosity, Verbosity::All) {
                return Ok(finalize(acc, input));
            }
        }

        if let Some(ignore) = options.ignore_token {
            if ignore(input) {
                set_exact(&mut acc, input, 1);
                if !matches!(verbosity, Verbosity::All) {
                    return Ok(finalize(acc, input));
                }
            }
        }

        if max_edit_distance == 0 {
            return Ok(finalize(acc, input));
        }

        let mut deletes_considered: AHashSet<String> = AHashSet::new();
        let mut suggestions_considered: AHashSet<String> = AHashSet::new();
        suggestions_considered.insert(input.to_string());

        let input_prefix_len = input_len.min(self.config.prefix_length);
        let input_prefix: String = if input_len > self.config.prefix_length {
            input.chars().take(self.config.prefix_length as usize).collect()
        } else {
            input.to_string()
        };

        let mut candidates: Vec<String> = vec![input_prefix];
        let mut max_edit_distance2 = max_edit_distance;
        let mut kernel = Distance::new();
        let input_chars: Vec<char> = input.chars().collect();

        let mut pointer = 0;
        let mut examined = 0usize;
        while pointer < candidates.len() {
            let candidate = candidates[pointer].clone();
            pointer += 1;
            let candidate_len = candidate.chars().count() as i64;
            let length_diff = input_prefix_len - candidate_len;

            if length_diff > max_edit_distance2 {
                if matches!(verbosity, Verbosity::All) {
                    continue;
                }
                break;
            }

            if let Some(sources) = self.deletes.get(&candidate) {
                for suggestion in sources {
                    examined += 1;
                    if suggestion == input {
                        continue;
                    }
                    let suggestion_len = suggestion.chars().count() as i64;
                    if (suggestion_len - input_len).abs() > max_edit_distance2 {
                        continue;
                    }
                    if suggestion_len < candidate_len
                        || (suggestion_len == candidate_len && suggestion != &candidate)
                    {
                        continue;
                    }
                    let suggestion_prefix_len = suggestion_len.min(self.config.prefix_length);
                    if suggestion_prefix_len > input_prefix_len
                        && (suggestion_prefix_len - candidate_len) > max_edit_distance2
                    {
                        continue;
                    }

                    let distance: i64;
                    if candidate_len == 0 {
                        distance = input_len.max(suggestion_len);
                        if distance > max_edit_distance2
                            || !suggestions_considered.insert(suggestion.clone())
                        {
                            continue;
                        }
                    } else if suggestion_len == 1 {
                        let first = suggestion.chars().next().unwrap();
                        distance = if input.contains(first) { input_len } else { input_len - 1 };
                    } else {
                        let suggestion_chars: Vec<char> = suggestion.chars().collect();
                        if suffix_mismatch_guard(
                            &input_chars,
                            &suggestion_chars,
                            self.config.prefix_length,
                            max_edit_distance,
                            candidate_len,
                        ) {
                            continue;
                        }
                        if !matches!(verbosity, Verbosity::All)
                            && !self.delete_in_suggestion_prefix(&candidate, suggestion)
                        {
                            continue;
                        }
                        if !suggestions_considered.insert(suggestion.clone()) {
                            continue;
                        }
                        let d = kernel.distance_str(input, suggestion, max_edit_distance2);
                        if d < 0 {
                            continue;
                        }
                        distance = d;
                    }

                    if distance <= max_edit_distance2 {
                        let count = self.words.get(suggestion).copied().unwrap_or(0);
                        let item = Suggestion::new(suggestion.clone(), distance, count);
                        acc.offer(item, distance, &mut max_edit_distance2);
                    }
                }
            }

            if length_diff < max_edit_distance && candidate_len <= self.config.prefix_length {
                if !matches!(verbosity, Verbosity::All) && length_diff >= max_edit_distance2 {
                    continue;
                }
                let chars: Vec<char> = candidate.chars().collect();
                for i in 0..chars.len() {
                    let variant: String = chars
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, &c)| c)
                        .collect();
                    if deletes_considered.insert(variant.clone()) {
                        candidates.push(variant);
                    }
                }
            }
        }

        trace!(input, examined, "lookup candidates examined");
        Ok(finalize(acc, input))
    }

    /// True iff every character of `delete` appears in order within the
    /// first `prefix_length` characters of `suggestion` (a cheap prefilter
    /// that rejects most hash-bucket collisions before an edit-distance call).
    fn delete_in_suggestion_prefix(&self, delete: &str, suggestion: &str) -> bool {
        if delete.is_empty() {
            return true;
        }
        let suggestion_chars: Vec<char> = suggestion.chars().collect();
        let limit = (suggestion_chars.len() as i64).min(self.config.prefix_length) as usize;
        let mut j = 0usize;
        for dc in delete.chars() {
            while j < limit && suggestion_chars[j] != dc {
                j += 1;
            }
            if j == limit {
                return false;
            }
        }
        true
    }
}

fn set_exact(acc: &mut Accumulator, input: &str, count: u64) {
    let item = Suggestion::new(input, 0, count);
    match acc {
        Accumulator::Top(slot) => *slot = Some(item),
        Accumulator::Closest(v) => {
            v.clear();
            v.push(item);
        }
        Accumulator::All(v) => v.push(item),
    }
}

/// Conservative early-reject for the case where the entire prefix budget has
/// been spent (`prefix_length - max_edit_distance == candidate_len`) and the
/// input/suggestion tails diverge by more than a single adjacent transposition
/// could repair. Only ever causes a harmless extra distance computation when
/// it under-fires; never accepts a suggestion it shouldn't.
fn suffix_mismatch_guard(
    input_chars: &[char],
    suggestion_chars: &[char],
    prefix_length: i64,
    max_edit_distance: i64,
    candidate_len: i64,
) -> bool {
    let input_len = input_chars.len() as i64;
    let suggestion_len = suggestion_chars.len() as i64;
    let raw_min = input_len.min(suggestion_len);
    if prefix_length - max_edit_distance != candidate_len || raw_min <= prefix_length {
        return false;
    }
    let min = raw_min - prefix_length;

    if min > 1 {
        let a_tail = &input_chars[(input_len - (min - 1)) as usize..];
        let b_tail = &suggestion_chars[(suggestion_len - (min - 1)) as usize..];
        if a_tail != b_tail {
            return true;
        }
    }
    if min > 0 {
        let a_idx = (input_len - min) as usize;
        let b_idx = (suggestion_len - min) as usize;
        if input_chars[a_idx] != suggestion_chars[b_idx] {
            let patch1 = a_idx > 0 && input_chars[a_idx - 1] == suggestion_chars[b_idx];
            let patch2 = b_idx > 0 && input_chars[a_idx] == suggestion_chars[b_idx - 1];
            if !patch1 && !patch2 {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(max_edit_distance: i64, prefix_length: i64, count_threshold: i64) -> Index {
        Index::new(SymSpellConfig::new(max_edit_distance, prefix_length, count_threshold)).unwrap()
    }

    #[test]
    fn exact_match_has_zero_distance() {
        let mut idx = index(2, 7, 1);
        idx.create_dictionary_entry("pawn", 5);
        let results = idx.lookup("pawn", Verbosity::Top, None, &LookupOptions::default()).unwrap();
        assert_eq!(results[0].distance, 0);
        assert_eq!(results[0].count, 5);
    }

    #[test]
    fn repeated_insert_sums_counts_and_does_not_duplicate() {
        let mut idx = index(2, 7, 1);
        idx.create_dictionary_entry("pawn", 5);
        idx.create_dictionary_entry("pawn", 7);
        assert_eq!(idx.count_of("pawn"), Some(12));
        assert_eq!(idx.stats().word_count, 1);
    }

    #[test]
    fn below_threshold_term_is_unqueryable() {
        let mut idx = index(2, 7, 10);
        idx.create_dictionary_entry("pawn", 1);
        let results = idx.lookup("pawn", Verbosity::Top, Some(0), &LookupOptions::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn below_threshold_promotes_once_total_reaches_threshold() {
        let mut idx = index(2, 7, 10);
        idx.create_dictionary_entry("pawn", 4);
        assert!(!idx.contains("pawn"));
        let promoted = idx.create_dictionary_entry("pawn", 6);
        assert!(promoted);
        assert_eq!(idx.count_of("pawn"), Some(10));
    }

    #[test]
    fn scenario_pip_ordering() {
        let mut idx = index(2, 7, 1);
        idx.create_dictionary_entry("pipe", 5);
        idx.create_dictionary_entry("pips", 10);
        let results =
            idx.lookup("pip", Verbosity::All, Some(1), &LookupOptions::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].term, "pips");
        assert_eq!(results[1].term, "pipe");
    }

    #[test]
    fn scenario_verbosity_counts() {
        let mut idx = index(2, 7, 1);
        idx.create_dictionary_entry("steam", 1);
        idx.create_dictionary_entry("steams", 2);
        idx.create_dictionary_entry("steem", 3);

        let top = idx.lookup("steems", Verbosity::Top, Some(2), &LookupOptions::default()).unwrap();
        assert_eq!(top.len(), 1);
        let closest =
            idx.lookup("steems", Verbosity::Closest, Some(2), &LookupOptions::default()).unwrap();
        assert_eq!(closest.len(), 1);
        let all = idx.lookup("steems", Verbosity::All, Some(2), &LookupOptions::default()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn requesting_larger_max_edit_distance_than_configured_errors() {
        let idx = index(1, 7, 1);
        let err = idx.lookup("x", Verbosity::Top, Some(2), &LookupOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MaxEditDistanceExceeded { .. }));
    }

    #[test]
    fn delete_variants_map_back_to_the_source_term() {
        let mut idx = index(2, 7, 1);
        idx.create_dictionary_entry("hello", 1);
        let results = idx.lookup("helo", Verbosity::Top, Some(2), &LookupOptions::default()).unwrap();
        assert_eq!(results[0].term, "hello");
        assert_eq!(results[0].distance, 1);
    }

    #[test]
    fn include_unknown_adds_synthetic_suggestion_when_empty() {
        let idx = index(2, 7, 1);
        let opts = LookupOptions { include_unknown: true, ..Default::default() };
        let results = idx.lookup("zzz", Verbosity::Top, Some(2), &opts).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].distance, 3);
        assert_eq!(results[0].count, 0);
    }

    #[test]
    fn load_dictionary_skips_malformed_lines() {
        let mut idx = index(2, 7, 1);
        let data = "the 100\nmalformed\nquick 42\n";
        let promoted = idx.load_dictionary(data.as_bytes(), 0, 1, ' ').unwrap();
        assert_eq!(promoted, 2);
        assert_eq!(idx.count_of("the"), Some(100));
    }

    #[test]
    fn load_bigram_dictionary_builds_two_word_keys() {
        let mut idx = index(2, 7, 1);
        let data = "where is 585\n";
        idx.load_bigram_dictionary(data.as_bytes(), 0, 2, ' ').unwrap();
        assert_eq!(idx.bigrams.get("where is"), Some(&585));
    }
}
