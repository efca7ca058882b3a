//! Registrable-domain extraction.
//!
//! A credential's site identity is the label directly below its public
//! suffix, so `login.example.co.uk`, `example.co.uk` and
//! `https://www.example.co.uk/x` all map to `example`. Suffixes come from the
//! public suffix list via `psl`.

use url::{Host, Url};

use crate::constants::{PROTOCOL_HTTP, PROTOCOL_SEPARATOR};

/// Returns the grouping key for a url, or an empty string when no host can
/// be found. Internationalized labels are returned in Unicode form.
pub fn extract_group(url: &str) -> String {
    match extract_host(url) {
        Some(host) => label_to_unicode(registrable_label(&host)),
        None => String::new(),
    }
}

/// Length of a leading `scheme://` prefix, if `url` starts with one.
///
/// A `://` further in (a redirect parameter, say) does not count.
fn scheme_prefix_len(url: &str) -> Option<usize> {
    let colon = url.find(':')?;
    let scheme = &url[..colon];

    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-')) {
        return None;
    }

    url[colon..]
        .starts_with(PROTOCOL_SEPARATOR)
        .then_some(colon + PROTOCOL_SEPARATOR.len())
}

/// Pulls the host out of a url, tolerating a missing scheme.
pub fn extract_host(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if scheme_prefix_len(trimmed).is_some() {
        trimmed.to_string()
    } else {
        format!("{}{}", PROTOCOL_HTTP, trimmed)
    };

    if let Ok(parsed) = Url::parse(&candidate) {
        match parsed.host() {
            Some(Host::Domain(domain)) => return Some(domain.to_lowercase()),
            Some(Host::Ipv4(addr)) => return Some(addr.to_string()),
            Some(Host::Ipv6(addr)) => return Some(addr.to_string()),
            None => {}
        }
    }

    manual_host(&candidate)
}

/// Fallback for strings the url parser rejects: strip scheme, path, query,
/// fragment, credentials and port by hand.
fn manual_host(candidate: &str) -> Option<String> {
    let mut rest = match scheme_prefix_len(candidate) {
        Some(len) => &candidate[len..],
        None => candidate,
    };

    if let Some(end) = rest.find(['/', '?', '#']) {
        rest = &rest[..end];
    }
    if let Some(at_pos) = rest.rfind('@') {
        rest = &rest[at_pos + 1..];
    }
    if let Some(colon_pos) = rest.find(':') {
        rest = &rest[..colon_pos];
    }

    let host = rest.trim().to_lowercase();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Decodes a punycode (`xn--`) label; anything else is returned unchanged.
fn label_to_unicode(label: String) -> String {
    if !label.contains("xn--") {
        return label;
    }

    match idna::domain_to_unicode(&label) {
        (unicode, Ok(())) => unicode,
        (_, Err(_)) => label,
    }
}

/// The label one level below the public suffix of `host`.
///
/// Hosts whose last label is not a known suffix (`localhost`, `router.lan`,
/// bare IP addresses) are grouped by their last label, or by the whole
/// address for IPs. A host that is itself a public suffix has no label.
pub fn registrable_label(host: &str) -> String {
    let host = host.trim_end_matches('.');
    if host.is_empty() {
        return String::new();
    }

    if host.parse::<std::net::IpAddr>().is_ok() {
        return host.to_string();
    }

    let Some(suffix) = psl::suffix(host.as_bytes()) else {
        return String::new();
    };

    if !suffix.is_known() {
        return host.rsplit('.').next().unwrap_or_default().to_string();
    }

    match psl::domain(host.as_bytes()) {
        Some(domain) => {
            let registrable = &host[host.len() - domain.as_bytes().len()..];
            let label_end = registrable.len() - suffix.as_bytes().len();
            registrable[..label_end].trim_end_matches('.').to_string()
        }
        None => String::new(),
    }
}
