//! Fuzzy membership test between a detected category and managed categories.

/// Base words shorter than this never contribute to a word-subset match.
const MIN_SIGNIFICANT_WORD_LEN: usize = 3;

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Text before any parenthetical qualifier, e.g. `steel` for `steel (hot rolled coil)`.
fn base_text(normalized: &str) -> &str {
    match normalized.find('(') {
        Some(index) => normalized[..index].trim(),
        None => normalized,
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
}

fn category_matches(detected: &str, managed: &str) -> bool {
    let managed = normalize(managed);
    if managed.is_empty() {
        return false;
    }

    if detected == managed {
        return true;
    }

    let base = base_text(&managed);
    if base.is_empty() {
        return false;
    }

    if detected == base || base.starts_with(detected) {
        return true;
    }

    let mut significant = words(base)
        .filter(|word| word.chars().count() >= MIN_SIGNIFICANT_WORD_LEN)
        .peekable();
    if significant.peek().is_none() {
        return false;
    }

    let detected_words: Vec<&str> = words(detected).collect();
    significant.all(|word| detected_words.contains(&word))
}

/// Managed category entry that `detected` matches, if any.
///
/// Comparison is case-insensitive and trimmed. Rules, first success wins:
/// exact match, match on the text before a parenthetical qualifier, prefix of
/// that base text, then every base word of three or more characters appearing
/// as a whole word in `detected`.
pub fn find_managed_category<'a, S>(detected: &str, managed: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    let detected = normalize(detected);
    if detected.is_empty() {
        return None;
    }

    managed
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| category_matches(&detected, candidate))
}

pub fn matches_managed_category<S: AsRef<str>>(detected: &str, managed: &[S]) -> bool {
    find_managed_category(detected, managed).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_case_whitespace_and_qualifiers() {
        assert!(matches_managed_category("STEEL ", &["steel (hot rolled coil)"]));
        assert!(matches_managed_category("Steel", &["Steel (Hot Rolled Coil)"]));
    }

    #[test]
    fn rejects_unrelated_categories() {
        assert!(!matches_managed_category("aluminum", &["steel", "copper"]));
    }

    #[test]
    fn word_subset_matches_inserted_qualifiers() {
        assert!(matches_managed_category("carbon steel", &["steel"]));
        assert!(matches_managed_category(
            "corrugated packaging boxes",
            &["Corrugated Boxes"]
        ));
    }

    #[test]
    fn short_words_never_contribute() {
        assert!(!matches_managed_category("it", &["information technology"]));
        assert!(!matches_managed_category("hr consulting", &["hr"]));
    }

    #[test]
    fn prefix_of_base_text_matches() {
        assert!(matches_managed_category(
            "logistics",
            &["logistics services (ocean freight)"]
        ));
    }

    #[test]
    fn empty_detected_category_never_matches() {
        assert!(!matches_managed_category("   ", &["steel"]));
        assert!(!matches_managed_category("steel", &[] as &[&str]));
    }

    #[test]
    fn returns_the_original_managed_entry() {
        let managed = vec!["Copper".to_string(), "Steel (Hot Rolled Coil)".to_string()];
        assert_eq!(
            find_managed_category("steel", &managed),
            Some("Steel (Hot Rolled Coil)")
        );
    }
}
