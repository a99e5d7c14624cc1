//! Levenshtein matching for "did you mean" hints on group keys.

/// Closest candidate by edit distance, or `None` when the best distance
/// exceeds half the longer string.
pub(crate) fn fuzzy_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let input_lower = input.trim().to_lowercase();
    let mut best: Option<(&str, usize)> = None;

    for &candidate in candidates {
        let dist = levenshtein(&input_lower, &candidate.to_lowercase());
        match best {
            None => best = Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => best = Some((candidate, dist)),
            _ => {}
        }
    }

    best.and_then(|(name, dist)| {
        let max_len = input_lower.chars().count().max(name.chars().count());
        (dist > 0 && dist <= max_len / 2).then_some(name)
    })
}

/// Levenshtein edit distance between two strings.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let n = b.len();

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group_key::ALLOWED_GROUP_KEYS;

    #[test]
    fn levenshtein_basic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
    }

    #[test]
    fn suggests_close_group_keys() {
        assert_eq!(fuzzy_match("Rezepzion", ALLOWED_GROUP_KEYS), Some("REZEPTION"));
        assert_eq!(fuzzy_match("Zahnartz", ALLOWED_GROUP_KEYS), Some("ZAHNARZT"));
    }

    #[test]
    fn no_suggestion_for_distant_or_exact() {
        assert_eq!(fuzzy_match("Kieferorthopaedie", ALLOWED_GROUP_KEYS), None);
        assert_eq!(fuzzy_match("zfa", ALLOWED_GROUP_KEYS), None);
    }
}
