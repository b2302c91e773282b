//! Name matching between member names and document names.
//!
//! Documents spell the same name in many conventions. A member declared as
//! `first_name` matches, from best to worst:
//!
//! 1. `first_name` (exact)
//! 2. `First_Name`, `FIRST_NAME` (case-insensitive)
//! 3. `FirstName`, `first-name`, `firstname` (ignoring `_` and `-`, any case)
//!
//! The best tier wins. Within a tier the first candidate in document order
//! wins. An explicit name (from `loose::name`) only ever matches exactly.

use heck::{AsKebabCase, AsLowerCamelCase, AsPascalCase, AsShoutySnakeCase, AsSnakeCase};

/// How closely a candidate matched a name. Earlier variants are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Identical strings.
    Exact,
    /// Identical ignoring case.
    CaseInsensitive,
    /// Identical ignoring case, `_` and `-`.
    Normalized,
}

/// Determine whether `candidate` matches `name`, and how well.
pub fn match_tier(candidate: &str, name: &str) -> Option<MatchTier> {
    if candidate == name {
        Some(MatchTier::Exact)
    } else if eq_ignore_case(candidate, name) {
        Some(MatchTier::CaseInsensitive)
    } else if eq_normalized(candidate, name) {
        Some(MatchTier::Normalized)
    } else {
        None
    }
}

/// Find the candidate matching a member, returning its index.
///
/// With `explicit_name` set only an exact match of that name counts;
/// otherwise `member_name` is matched through the tiers of [`MatchTier`].
///
/// ```
/// use facet_loose::naming::find_match;
///
/// let names = ["first-name", "FirstName", "first_name"];
/// assert_eq!(find_match(names, "first_name", None), Some(2));
/// assert_eq!(find_match(["FirstName", "first-name"], "first_name", None), Some(0));
/// assert_eq!(find_match(names, "first_name", Some("FirstName")), Some(1));
/// assert_eq!(find_match(names, "first_name", Some("firstname")), None);
/// ```
pub fn find_match<'a, I>(candidates: I, member_name: &str, explicit_name: Option<&str>) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    if let Some(explicit) = explicit_name {
        return candidates.into_iter().position(|c| c == explicit);
    }

    let mut best: Option<(MatchTier, usize)> = None;
    for (idx, candidate) in candidates.into_iter().enumerate() {
        let Some(tier) = match_tier(candidate, member_name) else {
            continue;
        };
        if tier == MatchTier::Exact {
            return Some(idx);
        }
        if best.is_none_or(|(best_tier, _)| tier < best_tier) {
            best = Some((tier, idx));
        }
    }
    best.map(|(_, idx)| idx)
}

/// Whether `candidate` matches `name` in any tier, or exactly matches
/// `explicit_name` when one is given.
pub fn matches(candidate: &str, member_name: &str, explicit_name: Option<&str>) -> bool {
    match explicit_name {
        Some(explicit) => candidate == explicit,
        None => match_tier(candidate, member_name).is_some(),
    }
}

/// Alternative spellings of an identifier in common naming conventions.
pub(crate) fn spellings(name: &str) -> [String; 5] {
    [
        AsSnakeCase(name).to_string(),
        AsKebabCase(name).to_string(),
        AsLowerCamelCase(name).to_string(),
        AsPascalCase(name).to_string(),
        AsShoutySnakeCase(name).to_string(),
    ]
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn eq_normalized(a: &str, b: &str) -> bool {
    fn normalized(s: &str) -> impl Iterator<Item = char> + '_ {
        s.chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
    }
    normalized(a).eq(normalized(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_tiers() {
        assert_eq!(match_tier("Name", "Name"), Some(MatchTier::Exact));
        assert_eq!(match_tier("name", "Name"), Some(MatchTier::CaseInsensitive));
        assert_eq!(match_tier("ÄRGER", "ärger"), Some(MatchTier::CaseInsensitive));
        assert_eq!(match_tier("start-date", "StartDate"), Some(MatchTier::Normalized));
        assert_eq!(match_tier("start_date", "StartDate"), Some(MatchTier::Normalized));
        assert_eq!(match_tier("START_DATE", "startDate"), Some(MatchTier::Normalized));
        assert_eq!(match_tier("startdates", "StartDate"), None);
    }

    #[test]
    fn test_best_tier_wins_over_document_order() {
        let candidates = ["value-", "VALUE", "Value"];
        assert_eq!(find_match(candidates, "Value", None), Some(2));
        assert_eq!(find_match(["value-", "VALUE"], "Value", None), Some(1));
    }

    #[test]
    fn test_first_in_document_order_wins_within_tier() {
        let candidates = ["first-name", "first_name", "FIRSTNAME"];
        assert_eq!(find_match(candidates, "FirstName", None), Some(0));
    }

    #[test]
    fn test_no_match_is_none() {
        assert_eq!(find_match(["a", "b"], "c", None), None);
        assert_eq!(find_match(std::iter::empty::<&str>(), "c", None), None);
    }

    #[test]
    fn test_explicit_name_is_exact_only() {
        let candidates = ["Node-Value", "node-value"];
        assert_eq!(find_match(candidates, "value", Some("node-value")), Some(1));
        assert_eq!(find_match(["NODE-VALUE"], "value", Some("node-value")), None);
        assert!(matches("node-value", "ignored", Some("node-value")));
        assert!(!matches("nodevalue", "node_value", Some("node-value")));
        assert!(matches("nodevalue", "node_value", None));
    }

    #[test]
    fn test_spellings() {
        let [snake, kebab, camel, pascal, shouty] = spellings("SoSo");
        assert_eq!(snake, "so_so");
        assert_eq!(kebab, "so-so");
        assert_eq!(camel, "soSo");
        assert_eq!(pascal, "SoSo");
        assert_eq!(shouty, "SO_SO");
    }
}
