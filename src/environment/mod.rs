//! # Placeholder interpolation
//!
//! Request paths reference captured context values as `{{name}}`.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Interpolate `{{key}}` placeholders in a string using the provided variable map.
/// Unknown placeholders are left untouched.
pub fn interpolate(input: &str, variables: &HashMap<String, String>) -> String {
    let mut result = input.to_string();
    for (key, value) in variables {
        result = result.replace(&format!("{{{{{key}}}}}"), value);
    }
    result
}

/// Like [`interpolate`], but fails on the first placeholder nothing resolved.
pub fn resolve(input: &str, variables: &HashMap<String, String>) -> Result<String> {
    let resolved = interpolate(input, variables);
    match first_placeholder(&resolved) {
        Some(name) => Err(Error::UnresolvedPlaceholder {
            name: name.to_string(),
            text: input.to_string(),
        }),
        None => Ok(resolved),
    }
}

fn first_placeholder(text: &str) -> Option<&str> {
    let start = text.find("{{")? + 2;
    let len = text[start..].find("}}")?;
    Some(text[start..start + len].trim())
}
