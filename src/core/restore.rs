//! Restores the original spelling of urls and usernames.
//!
//! Some tools round-trip an export through a normalizer that reduces urls to
//! bare hostnames and lower-cases usernames. Given the untouched export as a
//! reference, those values can be put back.

use url::Url;

use crate::core::record::{CredentialRecord, GroupedRecord};

impl AsMut<CredentialRecord> for CredentialRecord {
    fn as_mut(&mut self) -> &mut CredentialRecord {
        self
    }
}

impl AsMut<CredentialRecord> for GroupedRecord {
    fn as_mut(&mut self) -> &mut CredentialRecord {
        &mut self.record
    }
}

fn hostname(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_lowercase))
}

/// Walks the reference rows in order. A cleaned url equal to a reference
/// row's hostname becomes that row's full url; a cleaned username equal to a
/// reference username in lower case becomes the reference spelling.
///
/// Returns the number of fields rewritten.
pub fn restore_original_fields<R: AsMut<CredentialRecord>>(
    reference: &[CredentialRecord],
    cleaned: &mut [R],
) -> usize {
    let mut rewritten = 0;

    for original in reference {
        let host = hostname(&original.url);
        let lowered_username = original.username.to_lowercase();

        for record in cleaned.iter_mut() {
            let record = record.as_mut();

            if let Some(host) = &host {
                if record.url == *host && record.url != original.url {
                    record.url = original.url.clone();
                    rewritten += 1;
                }
            }

            if record.username == lowered_username && record.username != original.username {
                record.username = original.username.clone();
                rewritten += 1;
            }
        }
    }

    rewritten
}
