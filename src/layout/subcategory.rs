//! Subcategory selection: the named shelf sections of a floor

use std::collections::HashMap;

use super::types::{is_related, Subcategory, OTHER};

/// Rank raw labels by descending count, then ascending label, and keep at
/// most `top_subs` with at least `min_count` books. `Other` and `RELATED:`
/// labels are reserved and never selected.
pub fn select_subcategories<'a, I>(labels: I, top_subs: usize, min_count: usize) -> Vec<Subcategory>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts
        .into_iter()
        .filter(|(label, _)| *label != OTHER && !is_related(label))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .filter(|&(_, count)| count >= min_count)
        .take(top_subs)
        .map(|(label, count)| Subcategory::new(label, count))
        .collect()
}

/// Map a raw label to its slot sub-id: itself if selected, else `Other`
pub fn resolve_sub_id<'a>(label: &'a str, selected: &[Subcategory]) -> &'a str {
    if selected.iter().any(|s| s.id == label) {
        label
    } else {
        OTHER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(spec: &[(&'static str, usize)]) -> Vec<&'static str> {
        spec.iter()
            .flat_map(|&(label, n)| std::iter::repeat(label).take(n))
            .collect()
    }

    #[test]
    fn test_ranked_by_count_then_label() {
        let raw = labels(&[("Poetry", 5), ("Drama", 7), ("Ballads", 5), ("Hymns", 1)]);
        let subs = select_subcategories(raw, 8, 2);
        let ids: Vec<_> = subs.iter().map(|s| (s.id.as_str(), s.count)).collect();
        assert_eq!(ids, vec![("Drama", 7), ("Ballads", 5), ("Poetry", 5)]);
    }

    #[test]
    fn test_top_k_limit() {
        let raw = labels(&[("a", 4), ("b", 3), ("c", 2)]);
        let subs = select_subcategories(raw, 2, 1);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[1].id, "b");
    }

    #[test]
    fn test_threshold_can_empty_the_list() {
        let raw = labels(&[("a", 4), ("b", 3)]);
        assert!(select_subcategories(raw, 8, 200).is_empty());
    }

    #[test]
    fn test_reserved_labels_never_selected() {
        let raw = labels(&[("Other", 50), ("RELATED:history_war", 50), ("Sea Stories", 3)]);
        let subs = select_subcategories(raw, 8, 1);
        let ids: Vec<_> = subs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["Sea Stories"]);
    }

    #[test]
    fn test_resolve_sub_id() {
        let selected = vec![Subcategory::new("Drama", 10)];
        assert_eq!(resolve_sub_id("Drama", &selected), "Drama");
        assert_eq!(resolve_sub_id("Hymns", &selected), "Other");
        assert_eq!(resolve_sub_id("Hymns", &[]), "Other");
    }
}
