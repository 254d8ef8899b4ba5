//! Structural extraction from model source text.
//!
//! The extractor is a set of independent matchers over a normalized view of
//! the source (comments removed, whitespace collapsed). Each pass either
//! finds its fact or falls back to a documented default, so extraction
//! never fails and no pass depends on another having succeeded.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::{
    entities::{Capability, ModelName, Navigation, Property, Relationship, StructuralModel},
    value_objects::{CollectionKind, IdType},
};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extractor patterns are valid regexes")
}

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| regex(r"//[^\n]*"));
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| regex(r"(?s)/\*.*?\*/"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| regex(r"\s+"));

static CLASS_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\bclass\s+\w+\s*(?:<[^{:]*?>)?\s*:\s*([^{]*)\{")
});
static ANY_CLAUSE: LazyLock<Regex> = LazyLock::new(|| regex(r":\s*([^{};()]*?)\s*\{"));
static WHERE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| regex(r"\bwhere\b"));

static IDENTITY_GENERIC: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\bIIdentityEntity\s*<\s*([^>]+?)\s*>"));
static ID_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\bpublic\s+([\w.]+(?:<[\w\s,.]+>)?\??)\s+Id\s*\{\s*get;\s*(?:(?:private|protected|internal)\s+)?(?:set|init);\s*\}")
});

static MULTI_LANGUAGE_GENERIC: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\bIMultiLanguageEntity\s*<\s*([^>]+?)\s*>"));
static TRANSLATIONS: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\bICollection\s*<\s*\w+Language\s*>\s+Translations\s*\{\s*get;")
});

static PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\bpublic\s+(\w+\??)\s+(\w+)\s*\{\s*get;\s*((?:private|protected|internal)\s+)?set;\s*\}")
});
static RELATIONSHIP: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\b(?:public|internal)\s+(?:virtual\s+)?(ICollection|IList|List|HashSet|IReadOnlyCollection|IReadOnlyList)\s*<\s*(\w+)\s*>\s+(\w+)\s*(?:\{\s*get\b|=>)")
});
static NAVIGATION: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\bpublic\s+virtual\s+(\w+)\s+(\w+)\s*\{\s*get;\s*(?:(?:private|protected|internal)\s+)?set;\s*\}")
});

/// Base types whose generic argument names the identifier type.
const IDENTIFIED_BASES: [&str; 2] = ["Entity", "AuditEntity"];

/// Built-in type keywords that are never navigation targets.
const BUILTIN_TYPES: [&str; 12] = [
    "int", "long", "string", "bool", "decimal", "double", "float", "DateTime", "Guid", "byte",
    "short", "object",
];

/// Pattern-based extractor for model source text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the structural model of `name` from `source`. Never fails.
    #[instrument(skip_all, fields(model = %name))]
    pub fn extract(&self, name: ModelName, source: &str) -> StructuralModel {
        let text = normalize(source);

        let capabilities = capabilities(&text);
        let id_type = id_type(&text, &capabilities);
        let has_multi_language = multi_language(&text, &capabilities);
        let properties = properties(&text);
        let relationships = relationships(&text);
        let navigations = navigations(&text);

        debug!(
            id_type = %id_type,
            multi_language = has_multi_language,
            capabilities = capabilities.len(),
            properties = properties.len(),
            relationships = relationships.len(),
            navigations = navigations.len(),
            "Model extracted"
        );

        StructuralModel::builder(name)
            .capabilities(capabilities)
            .id_type(id_type)
            .multi_language(has_multi_language)
            .properties(properties)
            .relationships(relationships)
            .navigations(navigations)
            .build()
    }
}

/// Comment-free, single-spaced view of the source.
pub fn normalize(source: &str) -> String {
    let text = BLOCK_COMMENT.replace_all(source, " ");
    let text = LINE_COMMENT.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

fn capabilities(text: &str) -> Vec<Capability> {
    let clause = CLASS_CLAUSE
        .captures(text)
        .or_else(|| ANY_CLAUSE.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());

    let Some(clause) = clause else {
        debug!("No capability clause found");
        return Vec::new();
    };

    let clause = match WHERE_CLAUSE.find(clause) {
        Some(m) => &clause[..m.start()],
        None => clause,
    };

    split_top_level(clause)
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .map(Capability::new)
        .collect()
}

/// Split on commas that are not nested inside `<...>`.
fn split_top_level(clause: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in clause.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(clause[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(clause[start..].trim());
    parts
}

fn id_type(text: &str, capabilities: &[Capability]) -> IdType {
    if let Some(c) = IDENTITY_GENERIC.captures(text) {
        debug!(rule = "identity-capability", "Identifier type detected");
        return IdType::new(&c[1]);
    }
    if let Some(c) = ID_PROPERTY.captures(text) {
        debug!(rule = "id-property", "Identifier type detected");
        return IdType::new(&c[1]);
    }
    if let Some(arg) = capabilities
        .iter()
        .filter(|c| IDENTIFIED_BASES.contains(&c.base_name()))
        .find_map(Capability::type_argument)
    {
        debug!(rule = "base-type", "Identifier type detected");
        return IdType::new(arg);
    }
    debug!(default = IdType::DEFAULT, "Identifier type not found, using default");
    IdType::default()
}

fn multi_language(text: &str, capabilities: &[Capability]) -> bool {
    if MULTI_LANGUAGE_GENERIC.is_match(text) {
        debug!(rule = "generic-marker", "Multi-language support detected");
        return true;
    }
    if capabilities
        .iter()
        .any(|c| c.raw.contains("IMultiLanguageEntity"))
    {
        debug!(rule = "capability-list", "Multi-language support detected");
        return true;
    }
    if TRANSLATIONS.is_match(text) {
        debug!(rule = "translations-collection", "Multi-language support detected");
        return true;
    }
    false
}

fn properties(text: &str) -> Vec<Property> {
    PROPERTY
        .captures_iter(text)
        .map(|c| {
            let property = Property::new(&c[2], &c[1]);
            if c.get(3).is_some() {
                property.privately_mutable()
            } else {
                property
            }
        })
        .collect()
}

fn relationships(text: &str) -> Vec<Relationship> {
    RELATIONSHIP
        .captures_iter(text)
        .filter_map(|c| {
            let kind = CollectionKind::from_type_name(&c[1])?;
            Some(Relationship::new(&c[3], &c[2], kind))
        })
        .collect()
}

fn navigations(text: &str) -> Vec<Navigation> {
    NAVIGATION
        .captures_iter(text)
        .filter(|c| !BUILTIN_TYPES.contains(&&c[1]))
        .map(|c| Navigation::new(&c[2], &c[1]))
        .collect()
}
