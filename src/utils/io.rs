use std::fs::{self, File};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::core::error::{SiftError, SiftResult};
use crate::core::record::{CredentialTable, GroupedRecord, Schema};

fn malformed_from_csv(err: csv::Error) -> SiftError {
    let line = err.position().map(|pos| pos.line()).unwrap_or(0);
    SiftError::malformed(line, err.to_string())
}

/// Loads a password export.
///
/// The header row names the columns; `url`, `username` and `password` must
/// be present. A first data row that only repeats the header is skipped.
/// Rows shorter than the header are padded with empty values, longer rows
/// are rejected.
pub fn load_table(path: &Path) -> SiftResult<CredentialTable> {
    if !path.is_file() {
        return Err(SiftError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SiftError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => SiftError::Io(e),
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .headers()
        .map_err(malformed_from_csv)?
        .iter()
        .map(String::from)
        .collect();
    let schema = Schema::from_headers(headers)?;
    let field_count = schema.field_count();

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = result.map_err(malformed_from_csv)?;

        if row.len() > field_count {
            let line = row.position().map(|pos| pos.line()).unwrap_or(0);
            return Err(SiftError::malformed(
                line,
                format!("expected {} fields, found {}", field_count, row.len()),
            ));
        }

        let fields: Vec<String> = row.iter().map(String::from).collect();
        if index == 0 && schema.is_header_row(&fields) {
            debug!("Skipping data row that repeats the header");
            continue;
        }

        records.push(schema.split_row(index, fields));
    }

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(CredentialTable::new(schema, records))
}

/// Renders records as a CSV document with the schema's output headers.
pub fn render_csv(schema: &Schema, records: &[GroupedRecord]) -> SiftResult<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(schema.output_headers())?;
    for grouped in records {
        writer.write_record(schema.join_row(&grouped.record, &grouped.group))?;
    }

    writer
        .into_inner()
        .map_err(|e| SiftError::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))
}

/// Writes records to `path`, replacing any existing file.
///
/// The document is rendered in full before the file is opened, so a failure
/// never leaves a truncated export behind.
pub fn write_table(
    path: &Path,
    schema: &Schema,
    records: &[GroupedRecord],
    create_parent: bool,
) -> SiftResult<()> {
    let document = render_csv(schema, records)?;

    if create_parent {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
    }

    fs::write(path, document)?;
    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Prints `prompt` and reads one line, without its line ending.
pub fn prompt_for_path<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> SiftResult<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Resolves a user-supplied path against the current directory.
pub fn resolve_input_path<P: AsRef<Path>>(raw: P) -> SiftResult<PathBuf> {
    Ok(std::path::absolute(raw.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_load_chrome_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passwords.csv");
        fs::write(
            &path,
            "name,url,username,password\n\
             Example,https://example.com/,alice,secret\n\
             \"Quoted, Inc\",https://quoted.com/,bob,\"p,w\"\n",
        )
        .unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].extra, vec!["Quoted, Inc"]);
        assert_eq!(table.records[1].password, "p,w");
        assert_eq!(table.records[1].index, 1);
    }

    #[test]
    fn test_load_skips_restated_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passwords.csv");
        fs::write(&path, "url,username,password\nurl,username,password\nhttps://a.com,u,p\n").unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].url, "https://a.com");
        assert_eq!(table.records[0].index, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        match load_table(&path) {
            Err(SiftError::FileNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_long_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passwords.csv");
        fs::write(&path, "url,username,password\nhttps://a.com,u,p,extra\n").unwrap();

        assert!(matches!(load_table(&path), Err(SiftError::MalformedTable { .. })));
    }

    #[test]
    fn test_load_missing_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passwords.csv");
        fs::write(&path, "url,login,password\nhttps://a.com,u,p\n").unwrap();

        assert!(matches!(load_table(&path), Err(SiftError::MissingColumn { .. })));
    }

    #[test]
    fn test_write_creates_parent_and_appends_group() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        fs::write(&input, "name,url,username,password\nA,https://mail.a.co.uk,u,p\n").unwrap();

        let result = classify(load_table(&input).unwrap());
        let output = dir.path().join("data").join("exported_passwords.csv");
        write_table(&output, &result.schema, &result.clean, true).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "name,url,username,password,group\nA,https://mail.a.co.uk,u,p,a\n");
    }

    #[test]
    fn test_write_empty_table_has_header_only() {
        let result = classify(CredentialTable::empty(Schema::credentials_only()));
        let document = render_csv(&result.schema, &result.clean).unwrap();
        assert_eq!(String::from_utf8(document).unwrap(), "url,username,password,group\n");
    }

    #[test]
    fn test_prompt_reads_one_line() {
        let mut input = Cursor::new("some/file.csv\r\nignored\n");
        let mut output = Vec::new();

        let path = prompt_for_path(&mut input, &mut output, "Path: ").unwrap();
        assert_eq!(path, "some/file.csv");
        assert_eq!(output, b"Path: ");
    }

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_input_path("passwords.csv").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("passwords.csv"));
    }
}
