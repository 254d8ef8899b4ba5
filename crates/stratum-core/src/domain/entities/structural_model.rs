//! The Structural Model: everything generators know about one entity.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    naming,
    value_objects::{CollectionKind, IdType},
};

/// Fields owned by the audit base type. Never generated as properties.
pub const AUDIT_FIELDS: [&str; 4] = ["CreateUserId", "CreateDate", "ModifyUserId", "ModifyDate"];

/// Name of the identifier field.
pub const ID_FIELD: &str = "Id";

pub fn is_audit_field(name: &str) -> bool {
    AUDIT_FIELDS.contains(&name)
}

// ── ModelName ────────────────────────────────────────────────────────────────

/// Singular type identifier of a model, e.g. `Category`.
///
/// Invariant: starts with an ASCII letter or `_`, continues with ASCII
/// alphanumerics or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModelName(String);

impl ModelName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let mut chars = name.chars();
        let invalid = |reason: &str| DomainError::InvalidModelName {
            name: name.clone(),
            reason: reason.into(),
        };
        match chars.next() {
            None => return Err(invalid("name is empty")),
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                return Err(invalid("must start with a letter or '_'"));
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("only letters, digits and '_' are allowed"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn plural(&self) -> String {
        naming::pluralize(&self.0)
    }
}

impl FromStr for ModelName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Members ──────────────────────────────────────────────────────────────────

/// A simple `{ get; set; }` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    /// Declared type including any trailing `?`.
    pub type_name: String,
    /// True when the setter is `private`.
    pub is_privately_mutable: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_privately_mutable: false,
        }
    }

    pub fn privately_mutable(mut self) -> Self {
        self.is_privately_mutable = true;
        self
    }

    pub fn is_nullable(&self) -> bool {
        self.type_name.ends_with('?')
    }

    /// Declared type without the nullable marker.
    pub fn base_type(&self) -> &str {
        self.type_name.trim_end_matches('?')
    }
}

/// A collection-valued reference to another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub name: String,
    pub related_type: String,
    pub collection_kind: CollectionKind,
    pub is_read_only: bool,
}

impl Relationship {
    pub fn new(
        name: impl Into<String>,
        related_type: impl Into<String>,
        collection_kind: CollectionKind,
    ) -> Self {
        Self {
            name: name.into(),
            related_type: related_type.into(),
            collection_kind,
            is_read_only: collection_kind == CollectionKind::ReadOnly,
        }
    }
}

/// A single-valued navigation reference, e.g. `public virtual Project Project`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub name: String,
    pub related_type: String,
}

impl Navigation {
    pub fn new(name: impl Into<String>, related_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            related_type: related_type.into(),
        }
    }

    /// Foreign key column backing this navigation.
    pub fn foreign_key(&self) -> String {
        format!("{}{}", self.name, ID_FIELD)
    }
}

/// One entry of the declaration's base/implements list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capability {
    /// Entry as written, whitespace-trimmed, e.g. `IIdentityEntity<Guid>`.
    pub raw: String,
}

impl Capability {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into().trim().to_string(),
        }
    }

    /// Name without generic arguments, e.g. `IIdentityEntity`.
    pub fn base_name(&self) -> &str {
        self.raw
            .split_once('<')
            .map_or(self.raw.as_str(), |(name, _)| name)
            .trim()
    }

    /// Generic argument list as written, e.g. `Guid` or `Guid, int`.
    pub fn type_argument(&self) -> Option<&str> {
        let (_, rest) = self.raw.split_once('<')?;
        let arg = rest.strip_suffix('>')?.trim();
        (!arg.is_empty()).then_some(arg)
    }
}

// ── StructuralModel ──────────────────────────────────────────────────────────

/// The structural shape of one model. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralModel {
    name: ModelName,
    plural: String,
    id_type: IdType,
    has_multi_language: bool,
    properties: Vec<Property>,
    relationships: Vec<Relationship>,
    navigations: Vec<Navigation>,
    capabilities: Vec<Capability>,
}

impl StructuralModel {
    pub fn builder(name: ModelName) -> StructuralModelBuilder {
        StructuralModelBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn model_name(&self) -> &ModelName {
        &self.name
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn id_type(&self) -> &IdType {
        &self.id_type
    }

    pub fn has_multi_language(&self) -> bool {
        self.has_multi_language
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn navigations(&self) -> &[Navigation] {
        &self.navigations
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn has_capability(&self, base_name: &str) -> bool {
        self.capabilities.iter().any(|c| c.base_name() == base_name)
    }

    /// True when the model derives from the audit base type.
    pub fn is_audited(&self) -> bool {
        self.has_capability("AuditEntity")
    }

    /// Companion translation row type, e.g. `CategoryLanguage`.
    pub fn language_type(&self) -> String {
        format!("{}Language", self.name)
    }
}

/// Builder that enforces the model invariants on `build`.
#[derive(Debug, Clone)]
pub struct StructuralModelBuilder {
    name: ModelName,
    id_type: IdType,
    has_multi_language: bool,
    properties: Vec<Property>,
    relationships: Vec<Relationship>,
    navigations: Vec<Navigation>,
    capabilities: Vec<Capability>,
}

impl StructuralModelBuilder {
    fn new(name: ModelName) -> Self {
        Self {
            name,
            id_type: IdType::default(),
            has_multi_language: false,
            properties: Vec::new(),
            relationships: Vec::new(),
            navigations: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    pub fn id_type(mut self, id_type: IdType) -> Self {
        self.id_type = id_type;
        self
    }

    pub fn multi_language(mut self, enabled: bool) -> Self {
        self.has_multi_language = enabled;
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn relationships(mut self, items: impl IntoIterator<Item = Relationship>) -> Self {
        self.relationships.extend(items);
        self
    }

    pub fn navigation(mut self, navigation: Navigation) -> Self {
        self.navigations.push(navigation);
        self
    }

    pub fn navigations(mut self, items: impl IntoIterator<Item = Navigation>) -> Self {
        self.navigations.extend(items);
        self
    }

    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    pub fn capabilities(mut self, items: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities.extend(items);
        self
    }

    /// Drops identifier and audit fields and repeated property names.
    pub fn build(self) -> StructuralModel {
        let mut seen = std::collections::HashSet::new();
        let properties = self
            .properties
            .into_iter()
            .filter(|p| p.name != ID_FIELD && !is_audit_field(&p.name))
            .filter(|p| seen.insert(p.name.clone()))
            .collect();

        StructuralModel {
            plural: self.name.plural(),
            name: self.name,
            id_type: self.id_type,
            has_multi_language: self.has_multi_language,
            properties,
            relationships: self.relationships,
            navigations: self.navigations,
            capabilities: self.capabilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_name_validation() {
        assert!(ModelName::new("Category").is_ok());
        assert!(ModelName::new("_Draft2").is_ok());
        assert!(ModelName::new("").is_err());
        assert!(ModelName::new("2Fast").is_err());
        assert!(ModelName::new("Project-Type").is_err());
    }

    #[test]
    fn build_excludes_identifier_and_audit_fields() {
        let model = StructuralModel::builder(ModelName::new("Category").unwrap())
            .property(Property::new("Id", "int"))
            .property(Property::new("Title", "string"))
            .property(Property::new("CreateDate", "DateTime"))
            .property(Property::new("ModifyUserId", "string?"))
            .property(Property::new("Title", "string"))
            .build();

        let names: Vec<_> = model.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Title"]);
        assert_eq!(model.plural(), "Categories");
    }

    #[test]
    fn capability_parts() {
        let cap = Capability::new(" IIdentityEntity<Guid> ");
        assert_eq!(cap.base_name(), "IIdentityEntity");
        assert_eq!(cap.type_argument(), Some("Guid"));

        let plain = Capability::new("AuditEntity");
        assert_eq!(plain.base_name(), "AuditEntity");
        assert_eq!(plain.type_argument(), None);
    }

    #[test]
    fn property_nullability() {
        let p = Property::new("EndDate", "DateTime?");
        assert!(p.is_nullable());
        assert_eq!(p.base_type(), "DateTime");
        assert!(!Property::new("Title", "string").is_nullable());
    }

    #[test]
    fn navigation_foreign_key() {
        assert_eq!(Navigation::new("Project", "Project").foreign_key(), "ProjectId");
    }
}
