//! Naming transforms shared by every generator.
//!
//! Every path segment, namespace and type name derived from a model goes
//! through these functions, so two generators asked about the same model
//! always agree without sharing state.

/// Irregular endings checked before the generic suffix rules.
///
/// Matching is case-insensitive on the suffix; the prefix is kept verbatim,
/// so `ProjectActivity` becomes `ProjectActivities`.
const IRREGULAR_SUFFIXES: &[(&str, &str)] = &[
    ("Activity", "Activities"),
    ("Person", "People"),
    ("Child", "Children"),
];

/// Pluralize a type name.
///
/// Rules, first match wins:
/// 1. irregular suffix table
/// 2. `y` becomes `ies`
/// 3. `s`, `x`, `ch`, `sh` take `es`
/// 4. anything else takes `s`
pub fn pluralize(name: &str) -> String {
    if let Some(plural) = irregular_plural(name) {
        return plural;
    }

    let lower = name.to_ascii_lowercase();
    if let Some(stem) = name.strip_suffix(['y', 'Y']) {
        format!("{stem}ies")
    } else if ["s", "x", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        format!("{name}es")
    } else {
        format!("{name}s")
    }
}

fn irregular_plural(name: &str) -> Option<String> {
    IRREGULAR_SUFFIXES.iter().find_map(|(singular, plural)| {
        let split = name.len().checked_sub(singular.len())?;
        let (prefix, suffix) = (name.get(..split)?, name.get(split..)?);
        suffix
            .eq_ignore_ascii_case(singular)
            .then(|| format!("{prefix}{plural}"))
    })
}

/// Lower-case only the first character. Blank input is returned unchanged.
pub fn lower_first(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case only the first character.
pub fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cache-key constant name for a plural, e.g. `Categories` -> `CATEGORIES`.
pub fn screaming(name: &str) -> String {
    name.to_uppercase()
}
