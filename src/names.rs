//! Turning joined table text into final enumerator names.

use std::collections::{HashMap, HashSet};

use crate::identifier::{is_continuation_char, is_leading_char};

const PLACEHOLDER: char = '_';
const DESCRIPTION_SEPARATOR: char = '\u{2014}';

/// Make `name` a valid identifier.
///
/// A name whose first character may not start one gets a `_` prefix, then
/// characters that may not appear in an identifier become `_`. The prefix
/// test runs on the raw first character so `-a` and `_a` stay distinct.
pub fn fix_leading(name: &str) -> String {
    let needs_prefix = !name.chars().next().is_some_and(is_leading_char);

    let mut fixed = String::with_capacity(name.len() + 1);
    if needs_prefix {
        fixed.push(PLACEHOLDER);
    }
    fixed.extend(
        name.chars()
            .map(|c| if is_continuation_char(c) { c } else { PLACEHOLDER }),
    );
    fixed
}

/// `<owner>_<name>`, used for entries that belong to another entity
pub fn owner_prefixed(owner: &str, name: &str) -> String {
    format!("{}_{}", owner, name)
}

/// Text after the last em dash of a description, or all of it
pub fn description_suffix(description: &str) -> &str {
    description
        .rfind(DESCRIPTION_SEPARATOR)
        .map_or(description, |idx| &description[idx + DESCRIPTION_SEPARATOR.len_utf8()..])
}

/// Break remaining collisions within one scope.
///
/// Every occurrence of a repeated name gets `_<n>`, numbered in first-seen
/// order. A candidate already used elsewhere in the scope is skipped.
pub fn disambiguate(names: &mut [String]) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names.iter() {
        *counts.entry(name.as_str()).or_default() += 1;
    }
    let repeated: HashSet<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect();
    if repeated.is_empty() {
        return;
    }

    let mut taken: HashSet<String> = names
        .iter()
        .filter(|n| !repeated.contains(*n))
        .cloned()
        .collect();
    let mut next_ordinal: HashMap<String, usize> = HashMap::new();

    for name in names.iter_mut() {
        if !repeated.contains(name.as_str()) {
            continue;
        }

        let ordinal = next_ordinal.entry(name.clone()).or_default();
        let candidate = loop {
            let candidate = format!("{}_{}", name, ordinal);
            *ordinal += 1;
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(candidate.clone());
        *name = candidate;
    }
}

/// Fix every name and break collisions, preserving order
pub fn resolve<I>(names: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut resolved: Vec<String> = names.into_iter().map(|n| fix_leading(n.as_ref())).collect();
    disambiguate(&mut resolved);
    resolved
}
