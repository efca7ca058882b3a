use std::path::PathBuf;
use thiserror::Error;

/// Error types surfaced by the sifting pipeline
#[derive(Error, Debug)]
pub enum SiftError {
    #[error("File {} not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Required column '{column}' is missing from the header")]
    MissingColumn { column: String },

    #[error("Malformed table at line {line}: {message}")]
    MalformedTable { line: u64, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SiftError {
    pub fn malformed(line: u64, message: impl Into<String>) -> Self {
        SiftError::MalformedTable {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        SiftError::InvalidConfig {
            message: message.into(),
        }
    }
}

pub type SiftResult<T> = std::result::Result<T, SiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message_names_path() {
        let err = SiftError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "File /tmp/missing.csv not found");
    }

    #[test]
    fn test_malformed_message() {
        let err = SiftError::malformed(4, "found record with 5 fields");
        assert_eq!(
            err.to_string(),
            "Malformed table at line 4: found record with 5 fields"
        );
    }
}
