//! Approximate string matching.
//!
//! The similarity measure is the Ratcliff/Obershelp "gestalt" ratio: find the
//! longest common block, recurse on both sides of it, and report
//! `2 * matched / (len(a) + len(b))`.

use std::collections::HashMap;

/// Similarity ratio between two strings, in `[0, 1]`.
///
/// Two empty strings are identical (ratio 1).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_characters(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Number of characters covered by the matching blocks of `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    // Positions of each character in b, in increasing order.
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows.
///
/// Among blocks of maximal length, the one starting earliest in `a` wins, then
/// the one starting earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // Length of the block ending at (i - 1, j), keyed by j.
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .map_or(1, |len| len + 1);
                new_j2len.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        j2len = new_j2len;
    }
    (best_i, best_j, best_k)
}

/// Finds the option closest to `query`, ignoring case.
///
/// An option equal to the query (ignoring case) is returned immediately.
/// Otherwise the option with the highest ratio is returned, provided it
/// reaches `cutoff`. On equal ratios the option listed first is kept.
pub fn closest_match<'a, S: AsRef<str>>(
    query: &str,
    options: &'a [S],
    cutoff: f64,
) -> Option<&'a str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() || options.is_empty() {
        return None;
    }
    if let Some(exact) = options
        .iter()
        .find(|o| o.as_ref().to_lowercase() == query)
    {
        return Some(exact.as_ref());
    }

    let mut best: Option<(f64, &str)> = None;
    for opt in options.iter() {
        let score = ratio(&opt.as_ref().to_lowercase(), &query);
        if score < cutoff {
            continue;
        }
        match best {
            Some((best_score, _)) if score <= best_score => {}
            _ => best = Some((score, opt.as_ref())),
        }
    }
    best.map(|(_, opt)| opt)
}
