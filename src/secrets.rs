//! Heuristics for spotting credentials in keys and values.
//!
//! Independent of the parser: callers pass plain strings.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::RegexSet;

/// Substrings that mark a key as sensitive wherever they appear.
const STRONG_KEY_SIGNALS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "private_key",
    "client_secret",
    "access_token",
    "refresh_token",
    "id_token",
    "auth_token",
    "api_token",
    "bearer",
    "credential",
    "certificate",
    "encryption_key",
    "signing_key",
    "hmac",
    "oauth",
];

/// Words that mark a key as sensitive only as a whole `_`-separated part.
const WEAK_KEY_SIGNALS: &[&str] = &[
    "key", "secret", "token", "auth", "jwt", "cert", "pem", "pkcs", "sig", "pwd", "pass", "pin",
    "seed", "salt", "nonce", "session", "cookie",
];

const ENTROPY_MIN_LEN: usize = 16;
const ENTROPY_THRESHOLD: f64 = 4.5;

static CREDENTIAL_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // base64 blobs
        r"^[A-Za-z0-9+/]{40,}={0,2}$",
        // hex hashes and tokens
        r"^[0-9a-fA-F]{32,}$",
        r"-----BEGIN [A-Z ]+-----",
        // GitHub tokens
        r"^(ghp|gho|ghu|ghs|ghr)_[A-Za-z0-9]+$",
        r"^sk-[A-Za-z0-9]{32,}$",
        r"^[A-Z0-9]{20}:[A-Za-z0-9_-]{40}$",
        r"^sk_(live|test|prod)_[A-Za-z0-9]+$",
        // connection strings with inline credentials
        r"postgres://[^:]+:[^@]+@",
        r"mysql://[^:]+:[^@]+@",
        r"mongodb(\+srv)?://[^:]+:[^@]+@",
    ])
    .expect("valid regex")
});

pub fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_lowercase();

    if STRONG_KEY_SIGNALS
        .iter()
        .any(|signal| lower.contains(signal))
    {
        return true;
    }

    lower
        .split('_')
        .any(|part| WEAK_KEY_SIGNALS.contains(&part))
}

pub fn is_sensitive_value(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    if value.chars().count() >= ENTROPY_MIN_LEN && shannon_entropy(value) > ENTROPY_THRESHOLD {
        return true;
    }

    CREDENTIAL_PATTERNS.is_match(value)
}

/// Whether a `key`/`value` pair should be hidden from output.
pub fn is_redacted(key: &str, value: &str) -> bool {
    is_sensitive_key(key) || is_sensitive_value(value)
}

/// Shannon entropy of the character distribution, in bits per character.
pub fn shannon_entropy(value: &str) -> f64 {
    let mut freq = HashMap::<char, usize>::new();
    let mut total = 0usize;
    for ch in value.chars() {
        *freq.entry(ch).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    freq.values()
        .map(|count| {
            let p = *count as f64 / total;
            -p * p.log2()
        })
        .sum()
}
