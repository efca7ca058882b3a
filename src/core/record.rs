use serde::{Deserialize, Serialize};

use crate::constants::{GROUP_COLUMN, PASSWORD_COLUMN, URL_COLUMN, USERNAME_COLUMN};
use crate::core::error::{SiftError, SiftResult};

/// Column layout of a credential table.
///
/// Keeps the header order of the source file so every column that is not a
/// credential field can be written back exactly where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    headers: Vec<String>,
    url_idx: usize,
    username_idx: usize,
    password_idx: usize,
    group_idx: Option<usize>,
}

impl Schema {
    pub fn from_headers(headers: Vec<String>) -> SiftResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| SiftError::MissingColumn {
                    column: name.to_string(),
                })
        };

        let url_idx = find(URL_COLUMN)?;
        let username_idx = find(USERNAME_COLUMN)?;
        let password_idx = find(PASSWORD_COLUMN)?;
        let group_idx = headers.iter().position(|header| header == GROUP_COLUMN);

        Ok(Self {
            headers,
            url_idx,
            username_idx,
            password_idx,
            group_idx,
        })
    }

    /// The credential-only layout `url,username,password`
    pub fn credentials_only() -> Self {
        Self {
            headers: vec![
                URL_COLUMN.to_string(),
                USERNAME_COLUMN.to_string(),
                PASSWORD_COLUMN.to_string(),
            ],
            url_idx: 0,
            username_idx: 1,
            password_idx: 2,
            group_idx: None,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn field_count(&self) -> usize {
        self.headers.len()
    }

    pub fn has_group_column(&self) -> bool {
        self.group_idx.is_some()
    }

    /// Headers written to the output file: the source headers with `group`
    /// appended once.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        if self.group_idx.is_none() {
            headers.push(GROUP_COLUMN.to_string());
        }
        headers
    }

    /// True when a data row only repeats the header names.
    pub fn is_header_row(&self, fields: &[String]) -> bool {
        fields.len() == self.headers.len()
            && fields.iter().zip(&self.headers).all(|(field, header)| field == header)
    }

    /// Splits a raw row into a record. Short rows are padded with empty values.
    pub fn split_row(&self, index: usize, mut fields: Vec<String>) -> CredentialRecord {
        fields.resize(self.headers.len(), String::new());

        let mut record = CredentialRecord {
            index,
            url: String::new(),
            username: String::new(),
            password: String::new(),
            extra: Vec::with_capacity(self.headers.len().saturating_sub(3)),
        };

        for (pos, value) in fields.into_iter().enumerate() {
            if pos == self.url_idx {
                record.url = value;
            } else if pos == self.username_idx {
                record.username = value;
            } else if pos == self.password_idx {
                record.password = value;
            } else {
                record.extra.push(value);
            }
        }

        record
    }

    /// Reassembles a record in output header order, writing `group` into the
    /// group column (replacing any value the source carried).
    pub fn join_row(&self, record: &CredentialRecord, group: &str) -> Vec<String> {
        let mut extra = record.extra.iter();
        let mut row = Vec::with_capacity(self.headers.len() + 1);

        for pos in 0..self.headers.len() {
            let value = if pos == self.url_idx {
                record.url.clone()
            } else if pos == self.username_idx {
                record.username.clone()
            } else if pos == self.password_idx {
                record.password.clone()
            } else {
                let passthrough = extra.next().cloned().unwrap_or_default();
                if Some(pos) == self.group_idx {
                    group.to_string()
                } else {
                    passthrough
                }
            };
            row.push(value);
        }

        if self.group_idx.is_none() {
            row.push(group.to_string());
        }

        row
    }
}

/// One row of a browser password export
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Position of the data row in the source file, starting at 0
    pub index: usize,
    pub url: String,
    pub username: String,
    pub password: String,
    /// Values of every non-credential column, in header order
    pub extra: Vec<String>,
}

impl CredentialRecord {
    pub fn new(
        index: usize,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            index,
            url: url.into(),
            username: username.into(),
            password: password.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    pub fn has_empty_credential(&self) -> bool {
        self.url.is_empty() || self.username.is_empty() || self.password.is_empty()
    }

    pub fn has_empty_field(&self) -> bool {
        self.has_empty_credential() || self.extra.iter().any(|value| value.is_empty())
    }
}

/// An in-memory credential table: a schema plus its rows in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialTable {
    pub schema: Schema,
    pub records: Vec<CredentialRecord>,
}

impl CredentialTable {
    pub fn new(schema: Schema, records: Vec<CredentialRecord>) -> Self {
        Self { schema, records }
    }

    pub fn empty(schema: Schema) -> Self {
        Self::new(schema, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A record together with the keys the classifier derives from it.
///
/// The normalized username is working state only and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedRecord {
    pub record: CredentialRecord,
    pub group: String,
    #[serde(skip)]
    normalized_username: String,
}

impl GroupedRecord {
    pub fn new(record: CredentialRecord, group: String, normalized_username: String) -> Self {
        Self {
            record,
            group,
            normalized_username,
        }
    }

    pub fn normalized_username(&self) -> &str {
        &self.normalized_username
    }

    pub fn index(&self) -> usize {
        self.record.index
    }

    pub fn password(&self) -> &str {
        &self.record.password
    }

    /// Ordering key used for the flagged tables: group, then user, then password
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.group, &self.normalized_username, &self.record.password)
    }
}
