//! Sequence similarity for fuzzy category matching.
//!
//! Ratcliff/Obershelp ratio: twice the number of matched characters divided
//! by the total length of both strings. Matched characters are found by
//! taking the longest common block and recursing on both sides of it.

/// Similarity of two strings in `0.0..=1.0`. Two empty strings score `1.0`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Case-insensitive, whitespace-trimmed [`ratio`].
///
/// Labels are lowercased before comparison, so `BREAST CA` scores 0.8
/// against `Breast` where the raw ratio is 0.
pub fn label_ratio(a: &str, b: &str) -> f64 {
    ratio(&a.trim().to_lowercase(), &b.trim().to_lowercase())
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_common_block(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + size..], &b[j + size..])
}

/// Longest common contiguous block as `(start_a, start_b, len)`; earliest wins ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];

    for i in 0..a.len() {
        for j in 0..b.len() {
            cur[j + 1] = if a[i] == b[j] { prev[j] + 1 } else { 0 };
            let len = cur[j + 1];
            if len > best.2 {
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical() {
        assert!(approx(ratio("Breast", "Breast"), 1.0));
        assert!(approx(ratio("", ""), 1.0));
    }

    #[test]
    fn test_disjoint() {
        assert!(approx(ratio("abc", "xyz"), 0.0));
        assert!(approx(ratio("abc", ""), 0.0));
    }

    #[test]
    fn test_prefix() {
        // 6 matched chars out of 6 + 9
        assert!(approx(ratio("breast", "breast ca"), 0.8));
    }

    #[test]
    fn test_recursive_blocks() {
        // "abcd" vs "abxcd": "ab" then "cd" on the right side -> 4 matches
        assert!(approx(ratio("abcd", "abxcd"), 8.0 / 9.0));
    }

    #[test]
    fn test_label_ratio_ignores_case() {
        assert!(approx(label_ratio(" BREAST ", "breast"), 1.0));
        assert!(label_ratio("Breast", "Breast ca") >= 0.5);
        assert!(label_ratio("Breast", "Haematology") < 0.5);
    }

    #[test]
    fn test_case_only_difference() {
        assert!(approx(ratio("Breast", "BREAST CA"), 0.0));
        assert!(approx(label_ratio("Breast", "BREAST CA"), 0.8));
    }
}
