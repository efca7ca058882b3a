//! Duplicate and staleness classification of credential tables.
//!
//! Records are keyed by the registrable domain of their url (`group`) and a
//! case-folded username. Exact (group, user, password) repeats collapse to
//! the first occurrence; what survives is the clean table. Two annotated
//! subsets of the clean table are then derived:
//!
//! * possible duplicates: the same user stored with several passwords for a
//!   site, plus the same password stored under several users for a site;
//! * possible outdated: several accounts for one site, minus every user that
//!   already shows up among the possible duplicates.

use std::collections::HashSet;

use tracing::debug;

use crate::core::domain::extract_group;
use crate::core::index::{first_positions, repeated_positions};
use crate::core::record::{CredentialRecord, CredentialTable, GroupedRecord, Schema};

/// Output of [`Classifier::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub schema: Schema,
    pub clean: Vec<GroupedRecord>,
    pub possible_duplicates: Vec<GroupedRecord>,
    pub possible_outdated: Vec<GroupedRecord>,
}

impl Classification {
    /// The clean records as a plain table with the source schema.
    pub fn clean_table(&self) -> CredentialTable {
        CredentialTable::new(
            self.schema.clone(),
            self.clean.iter().map(|grouped| grouped.record.clone()).collect(),
        )
    }

    pub fn has_findings(&self) -> bool {
        !self.possible_duplicates.is_empty() || !self.possible_outdated.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    case_sensitive_usernames: bool,
}

impl Classifier {
    pub fn new(case_sensitive_usernames: bool) -> Self {
        Self {
            case_sensitive_usernames,
        }
    }

    pub fn normalize_username(&self, username: &str) -> String {
        if self.case_sensitive_usernames {
            username.to_string()
        } else {
            username.to_lowercase()
        }
    }

    pub fn group_record(&self, record: CredentialRecord) -> GroupedRecord {
        let group = extract_group(&record.url);
        let normalized_username = self.normalize_username(&record.username);
        GroupedRecord::new(record, group, normalized_username)
    }

    pub fn classify(&self, table: CredentialTable) -> Classification {
        let CredentialTable { schema, records } = table;
        let total = records.len();

        let grouped: Vec<GroupedRecord> = records
            .into_iter()
            .map(|record| self.group_record(record))
            .collect();

        let clean = dedupe_exact(grouped);
        debug!(
            "Collapsed {} records into {} unique credentials",
            total,
            clean.len()
        );

        let possible_duplicates = find_possible_duplicates(&clean);
        let possible_outdated = find_possible_outdated(&clean, &possible_duplicates);
        debug!(
            "Flagged {} possible duplicates and {} possible outdated entries",
            possible_duplicates.len(),
            possible_outdated.len()
        );

        Classification {
            schema,
            clean,
            possible_duplicates,
            possible_outdated,
        }
    }
}

/// Classifies with case-insensitive usernames.
pub fn classify(table: CredentialTable) -> Classification {
    Classifier::default().classify(table)
}

/// Keeps the first record of every (user, group, password) triple.
fn dedupe_exact(grouped: Vec<GroupedRecord>) -> Vec<GroupedRecord> {
    let mut keep = vec![false; grouped.len()];
    for pos in first_positions(&grouped, |r| (r.normalized_username(), r.group.as_str(), r.password())) {
        keep[pos] = true;
    }

    grouped
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}

/// Same site with a repeated user, followed by same site with a repeated
/// password. A record matching both is listed twice.
fn find_possible_duplicates(clean: &[GroupedRecord]) -> Vec<GroupedRecord> {
    let by_user = repeated_positions(clean, |r| (r.group.as_str(), r.normalized_username()));
    let by_password = repeated_positions(clean, |r| (r.group.as_str(), r.password()));

    let mut duplicates: Vec<GroupedRecord> = by_user
        .iter()
        .chain(&by_password)
        .map(|&pos| clean[pos].clone())
        .collect();
    sort_flagged(&mut duplicates);
    duplicates
}

/// Sites holding more than one account, excluding any user flagged as a
/// possible duplicate.
///
/// The exclusion matches on username alone across every site: a user
/// flagged on one site is dropped from the outdated list of all others.
/// This is probably meant to be scoped per site, but it is kept as is so
/// reports stay comparable between versions.
fn find_possible_outdated(clean: &[GroupedRecord], duplicates: &[GroupedRecord]) -> Vec<GroupedRecord> {
    let flagged_users: HashSet<&str> = duplicates
        .iter()
        .map(|r| r.normalized_username())
        .collect();

    let mut outdated: Vec<GroupedRecord> = repeated_positions(clean, |r| r.group.as_str())
        .into_iter()
        .map(|pos| &clean[pos])
        .filter(|r| !flagged_users.contains(r.normalized_username()))
        .cloned()
        .collect();
    sort_flagged(&mut outdated);
    outdated
}

fn sort_flagged(records: &mut [GroupedRecord]) {
    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
