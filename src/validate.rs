//! Input validation and lookup suggestions for the CLI.
//!
//! The attribute codec performs no escaping, so values coming from the
//! command line are checked here before they reach the archive.

use crate::error::{Error, Result};

/// Parse a `KEY=VALUE` command-line attribute.
///
/// # Errors
///
/// Returns `InvalidArgument` if there is no `=`, or if the pair could not be
/// written in the canonical attribute format.
pub fn parse_attribute_arg(arg: &str) -> Result<(String, String)> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| Error::InvalidArgument(format!("attribute '{arg}' must be KEY=VALUE")))?;
    validate_attribute(key, value)?;
    Ok((key.to_string(), value.to_string()))
}

/// Check that an attribute survives a serialize/parse round trip.
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty key, a key containing `": "`, or a
/// key or value containing a line break.
pub fn validate_attribute(key: &str, value: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidArgument("attribute key must not be empty".to_string()));
    }
    if key.contains(": ") {
        return Err(Error::InvalidArgument(format!(
            "attribute key '{key}' must not contain ': '"
        )));
    }
    if has_line_break(key) || has_line_break(value) {
        return Err(Error::InvalidArgument(format!(
            "attribute '{key}' must not contain line breaks"
        )));
    }
    Ok(())
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\r', '\n'])
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single-row optimization
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Find existing identifiers similar to the searched one.
///
/// Returns up to `max` suggestions with edit distance ≤ 3,
/// sorted by distance then alphabetically.
#[must_use]
pub fn find_similar_ids(searched: &str, existing: &[String], max: usize) -> Vec<String> {
    let mut candidates: Vec<(usize, &str)> = existing
        .iter()
        .map(|id| (levenshtein_distance(searched, id), id.as_str()))
        .filter(|(dist, _)| *dist <= 3)
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    candidates
        .into_iter()
        .take(max)
        .map(|(_, id)| id.to_string())
        .collect()
}
