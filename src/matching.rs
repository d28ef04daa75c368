//! Fuzzy word equality tolerant of spelling and recognition noise.

/// Containment only counts when the extra material is a short affix; a short
/// word swallowed by a longer compound ("ice" in "icecream") must stay
/// distinct so merged tokens are resolved by the aligner instead.
const CONTAINMENT_MAX_EXTRA_CHARS: usize = 2;

/// Fraction of the longer word's length allowed as edit distance.
const EDIT_DISTANCE_RATIO: f64 = 0.35;

/// Lowercase and keep letters, digits, apostrophes and hyphens. Everything
/// else (punctuation, quotes, markup residue) is noise from either side.
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .collect()
}

/// Whether two words should be treated as the same spoken token.
///
/// Rules are applied in order: normalized equality, short-affix containment,
/// a numeric-token guard ("1860" must never match "eighteen"), then bounded
/// edit distance.
pub fn matches(a: &str, b: &str) -> bool {
    let na = normalize(a);
    let nb = normalize(b);
    if na == nb {
        return true;
    }
    if contains_with_short_affix(&na, &nb) {
        return true;
    }
    if is_pure_digits(&na) != is_pure_digits(&nb) {
        return false;
    }
    let longest = na.chars().count().max(nb.chars().count());
    let budget = ((longest as f64 * EDIT_DISTANCE_RATIO).floor() as usize).max(1);
    levenshtein(&na, &nb) <= budget
}

/// Levenshtein distance between the normalized forms of `a` and `b`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(&normalize(a), &normalize(b))
}

fn contains_with_short_affix(a: &str, b: &str) -> bool {
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    if len_a <= 2 || len_b <= 2 {
        return false;
    }
    if len_a.abs_diff(len_b) > CONTAINMENT_MAX_EXTRA_CHARS {
        return false;
    }
    a.contains(b) || b.contains(a)
}

fn is_pure_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Classic two-row DP over characters.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitute.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
