//! Edit-distance based string similarity.
//!
//! Lengths and edits are counted in `char`s. Case folding uses Rust's
//! locale-independent `to_lowercase`.

/// Levenshtein distance: the minimum number of single-character insertions,
/// deletions or substitutions turning `a` into `b`.
///
/// Runs in O(n*m) time with two rolling rows sized to the shorter input.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if shorter.is_empty() {
        return longer.len();
    }

    let mut previous: Vec<usize> = (0..=shorter.len()).collect();
    let mut current = vec![0usize; shorter.len() + 1];

    for (i, &lc) in longer.iter().enumerate() {
        current[0] = i + 1;
        for (j, &sc) in shorter.iter().enumerate() {
            let cost = usize::from(lc != sc);
            let insertion = current[j] + 1;
            let deletion = previous[j + 1] + 1;
            let substitution = previous[j] + cost;
            current[j + 1] = insertion.min(deletion).min(substitution);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[shorter.len()]
}

/// Similarity in `[0, 1]` derived from [`distance`], where 1 means identical.
///
/// Two empty strings are identical; exactly one empty string scores 0.
/// Otherwise both inputs are trimmed before scoring against the longer
/// trimmed length.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let a = a.trim();
    let b = b.trim();
    let max = a.chars().count().max(b.chars().count());
    if max == 0 {
        return 1.0;
    }

    1.0 - distance(a, b) as f64 / max as f64
}

/// Whether `pattern` approximately occurs in `text`.
///
/// A blank pattern matches everything and an empty text matches nothing.
/// A case-insensitive substring hit matches regardless of `threshold`;
/// otherwise the lowercased strings must reach `threshold` similarity.
pub fn is_fuzzy_match(text: &str, pattern: &str, threshold: f64) -> bool {
    if pattern.trim().is_empty() {
        return true;
    }

    if text.is_empty() {
        return false;
    }

    let text = text.to_lowercase();
    let pattern = pattern.to_lowercase();
    if text.contains(&pattern) {
        return true;
    }

    normalized_similarity(&text, &pattern) >= threshold
}
