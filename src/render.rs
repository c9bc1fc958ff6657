// Grouping & Rendering Engine
// Pure: partitions a dataset by year, newest year first, original order kept

use crate::entry::{Entry, YearGroup};
use std::collections::BTreeMap;

/// Partition entries into year groups, ordered by descending year.
///
/// Entries sharing a year keep their relative order from the input dataset;
/// they are never re-sorted by name or any other key. An empty dataset
/// yields no groups.
pub fn group_by_year(entries: &[Entry]) -> Vec<YearGroup> {
    let mut by_year: BTreeMap<i64, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        by_year.entry(entry.year).or_default().push(entry.clone());
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, entries)| YearGroup { year, entries })
        .collect()
}

/// Plain-text view of the grouped directory.
///
/// Per entry: the link (name plus target), the separator, then the about
/// text, in that order. Element construction belongs to the presentation
/// layer; this is the CLI's consumer of the same contract.
pub fn format_directory(groups: &[YearGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("{}\n", group.year));
        for entry in &group.entries {
            out.push_str(&format!(
                "  {} <{}> | {}\n",
                entry.name, entry.website, entry.about
            ));
        }
    }
    out
}

/// Convenience: group and format in one step
pub fn render(entries: &[Entry]) -> String {
    format_directory(&group_by_year(entries))
}
