//! Casing-transfer helpers used to re-apply a query's original casing onto a
//! corrected term.
//!
//! `transfer_casing_similar` is grounded on a classic LCS-based sequence diff
//! (the same shape of algorithm as the pack's diff implementations, e.g.
//! `dyule-rdiff`'s Hirschberg-based `string_diff`, simplified here to a direct
//! O(n*m) LCS table since inputs are single words/short phrases, not files).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawTag {
    Equal,
    Delete,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

#[derive(Debug, Clone, Copy)]
struct Opcode {
    tag: OpTag,
    i1: usize,
    i2: usize,
    j1: usize,
    j2: usize,
}

/// Longest-common-subsequence diff between two char slices, compressed into
/// opcodes over ranges `[i1,i2) x [j1,j2)`. Adjacent delete/insert pairs that
/// cover the same gap are merged into a single `Replace`.
fn lcs_opcodes(a: &[char], b: &[char]) -> Vec<Opcode> {
    let la = a.len();
    let lb = b.len();
    let mut dp = vec![vec![0usize; lb + 1]; la + 1];
    for i in (0..la).rev() {
        for j in (0..lb).rev() {
            dp[i][j] = if a[i] == b[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    let mut i = 0;
    let mut j = 0;
    let mut elementary: Vec<(RawTag, usize, usize)> = Vec::new();
    while i < la && j < lb {
        if a[i] == b[j] {
            elementary.push((RawTag::Equal, i, j));
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            elementary.push((RawTag::Delete, i, j));
            i += 1;
        } else {
            elementary.push((RawTag::Insert, i, j));
            j += 1;
        }
    }
    while i < la {
        elementary.push((RawTag::Delete, i, j));
        i += 1;
    }
    while j < lb {
        elementary.push((RawTag::Insert, i, j));
        j += 1;
    }

    // Group consecutive same-tag elementary ops into ranges.
    let mut groups: Vec<(RawTag, usize, usize, usize, usize)> = Vec::new();
    for (tag, i, j) in elementary {
        let merged = match (groups.last_mut(), tag) {
            (Some(last), RawTag::Equal) if last.0 == RawTag::Equal && last.2 == i && last.4 == j => {
                last.2 = i + 1;
                last.4 = j + 1;
                true
            }
            (Some(last), RawTag::Delete) if last.0 == RawTag::Delete && last.2 == i => {
                last.2 = i + 1;
                true
            }
            (Some(last), RawTag::Insert) if last.0 == RawTag::Insert && last.4 == j => {
                last.4 = j + 1;
                true
            }
            _ => false,
        };
        if merged {
            continue;
        }
        match tag {
            RawTag::Equal => groups.push((RawTag::Equal, i, i + 1, j, j + 1)),
            RawTag::Delete => groups.push((RawTag::Delete, i, i + 1, j, j)),
            RawTag::Insert => groups.push((RawTag::Insert, i, i, j, j + 1)),
        }
    }

    let mut opcodes = Vec::new();
    let mut idx = 0;
    while idx < groups.len() {
        let g = groups[idx];
        if idx + 1 < groups.len() {
            let g2 = groups[idx + 1];
            if g.0 == RawTag::Delete && g2.0 == RawTag::Insert && g.2 == g2.1 && g.4 == g2.3 {
                opcodes.push(Opcode { tag: OpTag::Replace, i1: g.1, i2: g.2, j1: g2.3, j2: g2.4 });
                idx += 2;
                continue;
            }
            if g.0 == RawTag::Insert && g2.0 == RawTag::Delete && g.2 == g2.1 && g.4 == g2.3 {
                opcodes.push(Opcode { tag: OpTag::Replace, i1: g2.1, i2: g2.2, j1: g.3, j2: g.4 });
                idx += 2;
                continue;
            }
        }
        let tag = match g.0 {
            RawTag::Equal => OpTag::Equal,
            RawTag::Delete => OpTag::Delete,
            RawTag::Insert => OpTag::Insert,
        };
        opcodes.push(Opcode { tag, i1: g.1, i2: g.2, j1: g.3, j2: g.4 });
        idx += 1;
    }
    opcodes
}

/// Requires `|src| == |dst|`. For each position, uppercases `dst[i]` iff
/// `src[i]` is uppercase, else lowercases it.
pub fn transfer_casing_matching(src: &str, dst: &str) -> String {
    let src_chars: Vec<char> = src.chars().collect();
    let dst_chars: Vec<char> = dst.chars().collect();
    debug_assert_eq!(
        src_chars.len(),
        dst_chars.len(),
        "transfer_casing_matching requires equal-length strings"
    );
    transfer_casing_matching_chars(&src_chars, &dst_chars)
}

fn transfer_casing_matching_chars(src: &[char], dst: &[char]) -> String {
    src.iter()
        .zip(dst.iter())
        .map(|(&s, &d)| if s.is_uppercase() { upper(d) } else { lower(d) })
        .collect()
}

fn upper(c: char) -> String {
    c.to_uppercase().collect()
}

fn lower(c: char) -> String {
    c.to_lowercase().collect()
}

fn replace_span(src_span: &[char], dst_span: &[char]) -> String {
    if src_span.len() == dst_span.len() {
        return transfer_casing_matching_chars(src_span, dst_span);
    }
    // Walk both spans in parallel, carrying the last observed case forward
    // once the shorter span is exhausted.
    let mut out = String::new();
    let mut last_upper = false;
    let max_len = src_span.len().max(dst_span.len());
    for k in 0..max_len {
        if k < src_span.len() {
            last_upper = src_span[k].is_uppercase();
        }
        if k < dst_span.len() {
            out.push_str(&if last_upper { upper(dst_span[k]) } else { lower(dst_span[k]) });
        }
    }
    out
}

/// Assumes `dst` is already lowercase. Diffs `src.to_lowercase()` against
/// `dst` and rebuilds a cased string from `src`'s casing.
pub fn transfer_casing_similar(src: &str, dst: &str) -> String {
    let src_chars: Vec<char> = src.chars().collect();
    let src_lower: Vec<char> = src_chars
        .iter()
        .map(|&c| c.to_lowercase().next().unwrap_or(c))
        .collect();
    let dst_chars: Vec<char> = dst.chars().collect();

    let opcodes = lcs_opcodes(&src_lower, &dst_chars);
    let mut out = String::new();
    for op in opcodes {
        match op.tag {
            OpTag::Equal => {
                for k in op.i1..op.i2 {
                    out.push(src_chars[k]);
                }
            }
            OpTag::Delete => {}
            OpTag::Insert => {
                let before_space = op.i1 > 0 && src_chars[op.i1 - 1] == ' ';
                let anchor_upper = op.i1 < src_chars.len() && src_chars[op.i1].is_uppercase();
                let make_upper = if (op.i1 == 0 || before_space) && anchor_upper {
                    true
                } else if op.i1 > 0 {
                    src_chars[op.i1 - 1].is_uppercase()
                } else {
                    false
                };
                for &c in &dst_chars[op.j1..op.j2] {
                    out.push_str(&if make_upper { upper(c) } else { lower(c) });
                }
            }
            OpTag::Replace => {
                out.push_str(&replace_span(&src_chars[op.i1..op.i2], &dst_chars[op.j1..op.j2]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_transfers_per_position_case() {
        assert_eq!(transfer_casing_matching("AbC", "xyz"), "XyZ");
    }

    #[test]
    fn similar_reconstructs_casing_across_a_sentence() {
        let result = transfer_casing_similar(
            "Haaw is the weeather in New York?",
            "how is the weather in new york?",
        );
        assert_eq!(result, "How is the weather in New York?");
    }

    #[test]
    fn similar_handles_identical_strings() {
        assert_eq!(transfer_casing_similar("Hello", "hello"), "Hello");
    }

    #[test]
    fn similar_handles_pure_insertion() {
        // "wont" -> "won't": an apostrophe inserted mid-word.
        let result = transfer_casing_similar("WONT", "won't");
        assert_eq!(result, "WON'T");
    }
}
