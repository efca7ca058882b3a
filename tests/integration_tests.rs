use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use credential_sift::core::report::render_report;
use credential_sift::utils::io::load_table;
use credential_sift::{classify, Config, CredentialRecord, CredentialTable, Schema, Sifter};

/// A small Chrome-style export exercising every classification path
const CHROME_EXPORT: &str = "name,url,username,password
Example,https://login.example.co.uk/,Alice,hunter2
Example,https://www.example.co.uk/account,alice,hunter2
Example,https://example.co.uk/,alice,correcthorse
Shop,https://shop.com/,carol,s1
Shop,https://m.shop.com/,dave,s2
Forum,https://forum.net/,erin,same
Forum,https://forum.net/,frank,same
Broken,https://broken.org/,,nopass
";

fn write_export(temp_dir: &TempDir, content: &str) -> Result<PathBuf> {
    let path = temp_dir.path().join("passwords.csv");
    fs::write(&path, content)?;
    Ok(path)
}

fn test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.io.output_path = temp_dir.path().join("data").join("exported_passwords.csv");
    config
}

fn table(rows: &[(&str, &str, &str)]) -> CredentialTable {
    CredentialTable::new(
        Schema::credentials_only(),
        rows.iter()
            .enumerate()
            .map(|(i, (url, user, pass))| CredentialRecord::new(i, *url, *user, *pass))
            .collect(),
    )
}

#[test]
fn test_end_to_end_sifting() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_export(&temp_dir, CHROME_EXPORT)?;

    let outcome = Sifter::new(test_config(&temp_dir)).run(&input)?;
    let stats = &outcome.stats;

    assert_eq!(stats.total_records, 8);
    assert_eq!(stats.incomplete_removed, 1);
    assert_eq!(stats.unique_records, 6);
    assert_eq!(stats.exact_duplicates_removed, 1);

    let written = fs::read_to_string(&outcome.output_path)?;
    let expected = "name,url,username,password,group
Example,https://login.example.co.uk/,Alice,hunter2,example
Example,https://example.co.uk/,alice,correcthorse,example
Shop,https://shop.com/,carol,s1,shop
Shop,https://m.shop.com/,dave,s2,shop
Forum,https://forum.net/,erin,same,forum
Forum,https://forum.net/,frank,same,forum
";
    assert_eq!(written, expected);

    Ok(())
}

#[test]
fn test_end_to_end_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_export(&temp_dir, CHROME_EXPORT)?;

    let outcome = Sifter::new(test_config(&temp_dir)).prepare(&input)?;
    let report = render_report(&outcome.classification);

    let expected = "=============POSSIBLE DUPLICATED ENTRIES:=============
domain: (example, Alice), index: [0]
domain: (example, alice), index: [2]
domain: (forum, erin), index: [5]
domain: (forum, frank), index: [6]
=============POSSIBLE OUTDATED ENTRIES:=============
domain: shop, index: [3, 4]
";
    assert_eq!(report, expected);
    assert!(!outcome.output_path.exists(), "prepare must not write");

    Ok(())
}

#[test]
fn test_existing_group_column_is_not_duplicated() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_export(
        &temp_dir,
        "url,username,password,group\nhttps://a.com,u,p,stale\n",
    )?;

    let outcome = Sifter::new(test_config(&temp_dir)).run(&input)?;
    let written = fs::read_to_string(&outcome.output_path)?;
    assert_eq!(written, "url,username,password,group\nhttps://a.com,u,p,a\n");

    Ok(())
}

#[test]
fn test_output_is_overwritten() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = test_config(&temp_dir);
    fs::create_dir_all(temp_dir.path().join("data"))?;
    fs::write(&config.io.output_path, "old content that is longer than the new export\n")?;

    let input = write_export(&temp_dir, "url,username,password\nhttps://a.com,u,p\n")?;
    Sifter::new(config.clone()).run(&input)?;

    assert_eq!(
        fs::read_to_string(&config.io.output_path)?,
        "url,username,password,group\nhttps://a.com,u,p,a\n"
    );
    Ok(())
}

#[test]
fn test_header_only_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_export(&temp_dir, "url,username,password\n")?;

    let outcome = Sifter::new(test_config(&temp_dir)).run(&input)?;
    assert!(outcome.classification.clean.is_empty());
    assert!(outcome.classification.possible_duplicates.is_empty());
    assert!(outcome.classification.possible_outdated.is_empty());
    assert_eq!(
        render_report(&outcome.classification),
        "No duplicates found\nNo outdated entries found\n"
    );
    Ok(())
}

#[test]
fn test_reload_of_clean_output_is_stable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_export(&temp_dir, CHROME_EXPORT)?;
    let first = Sifter::new(test_config(&temp_dir)).run(&input)?;

    let reloaded = classify(load_table(&first.output_path)?);
    let first_rows: Vec<_> = first
        .classification
        .clean
        .iter()
        .map(|r| (r.record.url.clone(), r.record.username.clone(), r.record.password.clone(), r.group.clone()))
        .collect();
    let second_rows: Vec<_> = reloaded
        .clean
        .iter()
        .map(|r| (r.record.url.clone(), r.record.username.clone(), r.record.password.clone(), r.group.clone()))
        .collect();

    assert_eq!(first_rows, second_rows);
    Ok(())
}

#[test]
fn test_removing_incomplete_row_never_shrinks_clean() {
    let rows = [
        ("https://a.com", "u", "1"),
        ("https://a.com", "", "1"),
        ("https://b.com", "v", "2"),
    ];
    let with_row = Sifter::new(Config::default()).sift_table(table(&rows)).0;
    let without_row = Sifter::new(Config::default())
        .sift_table(table(&[rows[0], rows[2]]))
        .0;

    assert!(without_row.clean.len() >= with_row.clean.len());
}

#[test]
fn test_flagged_rows_belong_to_clean_table() {
    let result = classify(table(&[
        ("https://a.com", "u", "1"),
        ("https://a.com", "u", "2"),
        ("https://a.com", "v", "1"),
        ("https://b.com", "w", "3"),
        ("https://b.com", "x", "4"),
        ("https://www.b.com", "X", "4"),
    ]));

    assert_eq!(result.clean.len(), 5);
    for flagged in result.possible_duplicates.iter().chain(&result.possible_outdated) {
        assert!(result.clean.contains(flagged));
    }
}
