use std::collections::HashSet;
use std::env;

/// Host header allow-list.
///
/// `Any` accepts every request, including ones without a host. `Only` holds
/// lowercased patterns: `*` matches everything, `.example.com` matches
/// `example.com` and its subdomains, anything else must match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedHosts {
    Any,
    Only(HashSet<String>),
}

impl AllowedHosts {
    /// Load the allow-list from environment variables
    ///
    /// Environment variables:
    /// - ALLOWED_HOSTS: Comma-separated hosts; unset or empty allows any host
    pub fn from_env() -> Self {
        Self::parse(env::var("ALLOWED_HOSTS").ok().as_deref())
    }

    pub fn parse(raw: Option<&str>) -> Self {
        let hosts: HashSet<String> = raw
            .unwrap_or_default()
            .split(',')
            .map(|h| h.trim().to_lowercase())
            .filter(|h| !h.is_empty())
            .collect();

        if hosts.is_empty() {
            AllowedHosts::Any
        } else {
            AllowedHosts::Only(hosts)
        }
    }

    /// Checks a raw host value (as sent by the client, port included) against the list.
    pub fn permits(&self, host: Option<&str>) -> bool {
        let patterns = match self {
            AllowedHosts::Any => return true,
            AllowedHosts::Only(patterns) => patterns,
        };

        let Some(domain) = host.and_then(domain_of) else {
            return false;
        };

        patterns.iter().any(|pattern| matches_pattern(pattern, &domain))
    }
}

/// Lowercased domain of a `host[:port]` value, without port or trailing dot.
/// `None` for anything that is not a plain hostname, IP or bracketed IPv6
/// literal, such as a comma-separated `X-Forwarded-Host` chain.
fn domain_of(host: &str) -> Option<String> {
    let host = host.trim().to_lowercase();

    let (domain, port) = match host.strip_prefix('[') {
        Some(bracketed) => {
            let (literal, _) = bracketed.split_once(']')?;
            let valid = literal.contains(':')
                && literal
                    .chars()
                    .all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.');
            if !valid {
                return None;
            }
            host.split_at(literal.len() + 2)
        }
        None => {
            let end = host.find(':').unwrap_or(host.len());
            let domain = &host[..end];
            let valid = !domain.is_empty()
                && domain
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
            if !valid {
                return None;
            }
            host.split_at(end)
        }
    };

    if !port.is_empty() {
        let digits = port.strip_prefix(':')?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }

    Some(domain.trim_end_matches('.').to_string())
}

fn matches_pattern(pattern: &str, domain: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    match pattern.strip_prefix('.') {
        Some(base) => domain == base || domain.ends_with(pattern),
        None => domain == pattern,
    }
}
