use crate::types::{LiveSession, Millis, TimeEntry};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub duration: Millis,
}

/// Per-category summed durations, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    totals: Vec<CategoryTotal>,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, duration: Millis) {
        match self.totals.iter_mut().find(|total| total.category == category) {
            Some(total) => total.duration += duration,
            None => self.totals.push(CategoryTotal {
                category: category.to_string(),
                duration,
            }),
        }
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<Millis> {
        self.totals
            .iter()
            .find(|total| total.category == category)
            .map(|total| total.duration)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.totals.iter()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn is_all_zero(&self) -> bool {
        self.totals.iter().all(|total| total.duration == 0)
    }
}

/// Sums entry durations per category, then folds in the live session if there is one.
/// Entries without a category are skipped.
pub fn aggregate(entries: &[TimeEntry], live: Option<&LiveSession<'_>>) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for entry in entries.iter().filter(|entry| !entry.category.is_empty()) {
        totals.add(&entry.category, entry.duration);
    }
    if let Some(live) = live.filter(|live| !live.category.is_empty()) {
        totals.add(live.category, live.elapsed);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, duration: Millis) -> TimeEntry {
        TimeEntry {
            id: format!("{category}-{duration}"),
            category: category.to_string(),
            start: 0,
            end: duration,
            duration,
        }
    }

    fn as_pairs(totals: &CategoryTotals) -> Vec<(&str, Millis)> {
        totals
            .iter()
            .map(|total| (total.category.as_str(), total.duration))
            .collect()
    }

    #[test]
    fn sums_in_first_seen_order() {
        let entries = vec![
            entry("Work", 1_000),
            entry("Play", 500),
            entry("Work", 2_000),
            entry("Study", 300),
        ];
        let totals = aggregate(&entries, None);
        assert_eq!(
            as_pairs(&totals),
            vec![("Work", 3_000), ("Play", 500), ("Study", 300)]
        );
    }

    #[test]
    fn aggregation_is_repeatable() {
        let entries = vec![entry("B", 10), entry("A", 20), entry("B", 30)];
        let live = LiveSession {
            category: "C",
            elapsed: 5,
        };
        assert_eq!(aggregate(&entries, None), aggregate(&entries, None));
        assert_eq!(
            aggregate(&entries, Some(&live)),
            aggregate(&entries, Some(&live))
        );
    }

    #[test]
    fn empty_categories_are_skipped() {
        let entries = vec![entry("", 1_000), entry("Work", 2_000)];
        let totals = aggregate(&entries, None);
        assert_eq!(as_pairs(&totals), vec![("Work", 2_000)]);
    }

    #[test]
    fn live_session_adds_to_existing_category() {
        let entries = vec![entry("Work", 1_000), entry("Play", 500)];
        let live = LiveSession {
            category: "Work",
            elapsed: 250,
        };
        let totals = aggregate(&entries, Some(&live));
        assert_eq!(as_pairs(&totals), vec![("Work", 1_250), ("Play", 500)]);
    }

    #[test]
    fn live_session_appends_new_category_last() {
        let entries = vec![entry("Work", 1_000)];
        let live = LiveSession {
            category: "Reading",
            elapsed: 700,
        };
        let totals = aggregate(&entries, Some(&live));
        assert_eq!(as_pairs(&totals), vec![("Work", 1_000), ("Reading", 700)]);
    }

    #[test]
    fn live_only_aggregate_differs_from_settled() {
        let live = LiveSession {
            category: "Work",
            elapsed: 2_000,
        };
        let live_totals = aggregate(&[], Some(&live));
        assert_eq!(live_totals.get("Work"), Some(2_000));
        assert!(aggregate(&[], None).is_empty());
    }

    #[test]
    fn zero_totals_are_detected() {
        let live = LiveSession {
            category: "Work",
            elapsed: 0,
        };
        let totals = aggregate(&[], Some(&live));
        assert_eq!(totals.len(), 1);
        assert!(totals.is_all_zero());
        assert!(!aggregate(&[entry("Work", 1)], None).is_all_zero());
    }
}
