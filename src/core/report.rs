use std::fmt::{self, Display, Write};

use crate::constants::{DUPLICATES_BANNER, NO_DUPLICATES_MESSAGE, NO_OUTDATED_MESSAGE, OUTDATED_BANNER};
use crate::core::classifier::Classification;
use crate::core::index::sorted_group_positions;
use crate::core::record::GroupedRecord;

/// Source row indices sharing one report key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup<K> {
    pub key: K,
    pub indices: Vec<usize>,
}

/// Key for a possible-duplicate group: the site and the username as written
/// in the source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SiteUser {
    pub group: String,
    pub username: String,
}

impl Display for SiteUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.group, self.username)
    }
}

/// Groups possible duplicates by site and raw username, keys ascending.
pub fn duplicate_groups(records: &[GroupedRecord]) -> Vec<ReportGroup<SiteUser>> {
    sorted_group_positions(records, |r| (r.group.as_str(), r.record.username.as_str()))
        .into_iter()
        .map(|((group, username), positions)| ReportGroup {
            key: SiteUser {
                group: group.to_string(),
                username: username.to_string(),
            },
            indices: positions.into_iter().map(|pos| records[pos].index()).collect(),
        })
        .collect()
}

/// Groups possible outdated entries by site, keys ascending.
pub fn outdated_groups(records: &[GroupedRecord]) -> Vec<ReportGroup<String>> {
    sorted_group_positions(records, |r| r.group.as_str())
        .into_iter()
        .map(|(group, positions)| ReportGroup {
            key: group.to_string(),
            indices: positions.into_iter().map(|pos| records[pos].index()).collect(),
        })
        .collect()
}

fn render_section<K: Display>(out: &mut String, banner: &str, empty_message: &str, groups: &[ReportGroup<K>]) {
    if groups.is_empty() {
        let _ = writeln!(out, "{}", empty_message);
        return;
    }

    let _ = writeln!(out, "{}", banner);
    for group in groups {
        let _ = writeln!(out, "domain: {}, index: {:?}", group.key, group.indices);
    }
}

/// Human-readable listing of every flagged group for manual review.
pub fn render_report(classification: &Classification) -> String {
    let mut out = String::new();
    render_section(
        &mut out,
        DUPLICATES_BANNER,
        NO_DUPLICATES_MESSAGE,
        &duplicate_groups(&classification.possible_duplicates),
    );
    render_section(
        &mut out,
        OUTDATED_BANNER,
        NO_OUTDATED_MESSAGE,
        &outdated_groups(&classification.possible_outdated),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify;
    use crate::core::record::{CredentialRecord, CredentialTable, Schema};

    fn classification(rows: &[(&str, &str, &str)]) -> Classification {
        classify(CredentialTable::new(
            Schema::credentials_only(),
            rows.iter()
                .enumerate()
                .map(|(i, (url, user, pass))| CredentialRecord::new(i, *url, *user, *pass))
                .collect(),
        ))
    }

    #[test]
    fn test_empty_report() {
        let report = render_report(&classification(&[("https://a.com", "u", "p")]));
        assert_eq!(report, "No duplicates found\nNo outdated entries found\n");
    }

    #[test]
    fn test_duplicates_grouped_by_raw_username() {
        let result = classification(&[
            ("https://a.com", "Bob", "1"),
            ("https://a.com", "bob", "2"),
            ("https://c.com", "x", "1"),
        ]);

        let groups = duplicate_groups(&result.possible_duplicates);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key.username, "Bob");
        assert_eq!(groups[0].indices, vec![0]);
        assert_eq!(groups[1].key.username, "bob");
        assert_eq!(groups[1].indices, vec![1]);
    }

    #[test]
    fn test_full_report() {
        let result = classification(&[
            ("https://a.com", "u", "1"),
            ("https://b.com", "v1", "x"),
            ("https://a.com", "u", "2"),
            ("https://b.com", "v2", "y"),
        ]);

        let expected = "\
=============POSSIBLE DUPLICATED ENTRIES:=============
domain: (a, u), index: [0, 2]
=============POSSIBLE OUTDATED ENTRIES:=============
domain: b, index: [1, 3]
";
        assert_eq!(render_report(&result), expected);
    }
}
