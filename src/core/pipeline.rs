use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::Config;
use crate::core::classifier::{Classification, Classifier};
use crate::core::filter::remove_incomplete;
use crate::core::record::CredentialTable;
use crate::core::restore::restore_original_fields;
use crate::utils::io::{load_table, write_table};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiftStats {
    pub total_records: usize,
    pub incomplete_removed: usize,
    pub unique_records: usize,
    pub exact_duplicates_removed: usize,
    pub possible_duplicates: usize,
    pub possible_outdated: usize,
    pub restored_fields: usize,
    pub processing_time: Duration,
}

#[derive(Debug, Clone)]
pub struct SiftOutcome {
    pub classification: Classification,
    pub stats: SiftStats,
    pub output_path: PathBuf,
}

/// Runs an export through load, filter, classify and write.
pub struct Sifter {
    config: Config,
    classifier: Classifier,
    restore_reference: Option<PathBuf>,
}

impl Sifter {
    pub fn new(config: Config) -> Self {
        let classifier = Classifier::new(config.classification.case_sensitive_usernames);
        Self {
            config,
            classifier,
            restore_reference: None,
        }
    }

    /// Restores original url/username spelling from another export before writing.
    pub fn with_restore_reference(mut self, path: PathBuf) -> Self {
        self.restore_reference = Some(path);
        self
    }

    /// Filters and classifies an already loaded table.
    pub fn sift_table(&self, table: CredentialTable) -> (Classification, SiftStats) {
        let mut stats = SiftStats {
            total_records: table.len(),
            ..SiftStats::default()
        };

        let (filtered, removed) = remove_incomplete(table, self.config.filter.require_all_columns);
        stats.incomplete_removed = removed;
        let complete = filtered.len();

        let classification = self.classifier.classify(filtered);
        stats.unique_records = classification.clean.len();
        stats.exact_duplicates_removed = complete - classification.clean.len();
        stats.possible_duplicates = classification.possible_duplicates.len();
        stats.possible_outdated = classification.possible_outdated.len();

        (classification, stats)
    }

    /// Loads, filters and classifies `input`, applying the restore reference
    /// when one is set. Nothing is written.
    pub fn prepare(&self, input: &Path) -> Result<SiftOutcome> {
        let start_time = Instant::now();
        info!("Loading credentials from {}", input.display());

        let table = load_table(input)?;
        let (mut classification, mut stats) = self.sift_table(table);

        info!(
            "{} records loaded, {} incomplete, {} unique",
            stats.total_records, stats.incomplete_removed, stats.unique_records
        );

        if let Some(reference_path) = &self.restore_reference {
            let reference = load_table(reference_path).with_context(|| {
                format!("Failed to load restore reference {}", reference_path.display())
            })?;
            stats.restored_fields = restore_original_fields(&reference.records, &mut classification.clean);
            // flagged rows are copies of clean rows and must stay in step with them
            restore_original_fields(&reference.records, &mut classification.possible_duplicates);
            restore_original_fields(&reference.records, &mut classification.possible_outdated);
            debug!("Restored {} fields from {}", stats.restored_fields, reference_path.display());
        }

        stats.processing_time = start_time.elapsed();

        Ok(SiftOutcome {
            classification,
            stats,
            output_path: self.config.io.output_path.clone(),
        })
    }

    /// Writes the clean table of `outcome` to its output path, replacing any
    /// existing file.
    pub fn write(&self, outcome: &SiftOutcome) -> Result<()> {
        write_table(
            &outcome.output_path,
            &outcome.classification.schema,
            &outcome.classification.clean,
            self.config.io.create_output_dir,
        )
        .with_context(|| format!("Failed to write {}", outcome.output_path.display()))?;
        info!("Clean export written to {}", outcome.output_path.display());
        Ok(())
    }

    /// [`prepare`](Self::prepare) followed by [`write`](Self::write).
    /// Nothing is written if any stage fails.
    pub fn run(&self, input: &Path) -> Result<SiftOutcome> {
        let outcome = self.prepare(input)?;
        self.write(&outcome)?;
        Ok(outcome)
    }
}
