//! "Did you mean" suggestions for mistyped example names.

pub const DEFAULT_LIMIT: usize = 3;
pub const DEFAULT_CUTOFF: f64 = 0.4;

/// Up to `limit` candidates whose similarity to `word` is at least `cutoff`,
/// best match first. Equal scores keep candidate order.
pub fn close_matches<'a, I>(
    word: &str,
    candidates: I,
    limit: usize,
    cutoff: f64,
) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(f64, &'a str)> = candidates
        .into_iter()
        .map(|candidate| (strsim::normalized_levenshtein(word, candidate), candidate))
        .filter(|(score, _)| *score >= cutoff)
        .collect();
    // stable sort keeps registration order among ties
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(limit);
    scored.into_iter().map(|(_, candidate)| candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &[&str] = &[
        "list_iterate",
        "list_modify",
        "list_comprehend",
        "loop_range",
        "dict_iterate",
        "factory_pattern",
    ];

    #[test]
    fn typo_suggests_the_intended_name_first() {
        let found = close_matches(
            "list_iterat",
            NAMES.iter().copied(),
            DEFAULT_LIMIT,
            DEFAULT_CUTOFF,
        );
        assert_eq!(found.first(), Some(&"list_iterate"));
        assert!(found.len() <= DEFAULT_LIMIT);
    }

    #[test]
    fn unrelated_word_has_no_suggestions() {
        let found = close_matches(
            "zzzzqqqq",
            NAMES.iter().copied(),
            DEFAULT_LIMIT,
            DEFAULT_CUTOFF,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn limit_caps_the_result() {
        let found = close_matches("list_", NAMES.iter().copied(), 1, 0.0);
        assert_eq!(found.len(), 1);
    }
}
