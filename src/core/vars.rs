//! Input parsing and ignore-pattern filtering.
//!
//! Both the publisher and the reconciler consume the same filtered maps, so
//! filtering runs exactly once per input, before anything else sees it.

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, SyncError};

/// Name-to-value mapping with a fixed insertion-iteration order.
pub type VarMap = IndexMap<String, String>;

/// Parse a JSON object of string values into a [`VarMap`].
///
/// An absent or blank input yields an empty map. Anything that is not a JSON
/// object of strings fails with the canonical `"<label> must be a valid JSON
/// object"` message.
pub fn parse_vars(label: &'static str, input: Option<&str>) -> Result<VarMap> {
    let input = match input {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(VarMap::new()),
    };

    serde_json::from_str::<VarMap>(input).map_err(|_| SyncError::InvalidInput(label))
}

/// Compile the ignore pattern, defaulting to a regex that matches nothing.
pub fn compile_ignore_pattern(pattern: Option<&str>) -> Result<Regex> {
    match pattern {
        Some(p) if !p.is_empty() => Ok(Regex::new(p)?),
        // Empty alternation of an impossible class: matches no input
        _ => Ok(Regex::new("[^\\s\\S]")?),
    }
}

/// Delete every key matching the ignore pattern, with a diagnostic per key.
pub fn filter_ignored(vars: &mut VarMap, ignore: &Regex) {
    vars.retain(|name, _| {
        if ignore.is_match(name) {
            debug!("ignoring {} (matches ignore-pattern)", name);
            false
        } else {
            true
        }
    });
}
