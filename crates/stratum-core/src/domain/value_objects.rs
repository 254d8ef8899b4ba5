//! Domain value objects: ModuleName, Placement, Layer, CollectionKind, IdType.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. This
//! file defines the types, their string representations, and their
//! `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ModuleName ───────────────────────────────────────────────────────────────

/// A named feature module of the host application.
///
/// The set is closed: the host solution has exactly these module folders
/// under its application and controller projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleName {
    Admin,
    Commission,
    Coordinator,
    Management,
    OpenApi,
    ProjectOffice,
    Researcher,
    SpendingOffice,
    SystemManagement,
}

impl ModuleName {
    pub const ALL: [ModuleName; 9] = [
        Self::Admin,
        Self::Commission,
        Self::Coordinator,
        Self::Management,
        Self::OpenApi,
        Self::ProjectOffice,
        Self::Researcher,
        Self::SpendingOffice,
        Self::SystemManagement,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Commission => "Commission",
            Self::Coordinator => "Coordinator",
            Self::Management => "Management",
            Self::OpenApi => "OpenApi",
            Self::ProjectOffice => "ProjectOffice",
            Self::Researcher => "Researcher",
            Self::SpendingOffice => "SpendingOffice",
            Self::SystemManagement => "SystemManagement",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleName {
    type Err = DomainError;

    /// Case-insensitive; `-` and `_` separators are ignored, so
    /// `project-office` and `ProjectOffice` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| DomainError::UnknownModule { name: s.into() })
    }
}

// ── Placement ────────────────────────────────────────────────────────────────

/// Where application-layer and controller artifacts land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "area", content = "module")]
pub enum Placement {
    /// The shared area used by every module.
    Shared,
    /// A named module.
    Module(ModuleName),
}

impl Placement {
    /// Application-layer folder segment(s) below `Internal/`.
    pub fn application_segments(&self) -> Vec<String> {
        match self {
            Self::Shared => vec!["Commons".into()],
            Self::Module(m) => vec!["Modules".into(), m.to_string()],
        }
    }

    /// Namespace fragment for application-layer types, e.g. `Modules.Admin`.
    pub fn application_namespace(&self) -> String {
        self.application_segments().join(".")
    }

    /// Name of the base controller every generated controller derives from.
    pub fn base_controller(&self) -> String {
        match self {
            Self::Shared => "CommonsBaseController".into(),
            Self::Module(m) => format!("{m}BaseController"),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => f.write_str("shared"),
            Self::Module(m) => write!(f, "module:{m}"),
        }
    }
}

// ── Layer ────────────────────────────────────────────────────────────────────

/// One architectural layer with its own generator.
///
/// Declaration order is the order the orchestrator runs generators in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    Domain,
    Repository,
    Application,
    Controller,
    Migration,
    UnitTest,
}

impl Layer {
    pub const ALL: [Layer; 6] = [
        Self::Domain,
        Self::Repository,
        Self::Application,
        Self::Controller,
        Self::Migration,
        Self::UnitTest,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Repository => "repository",
            Self::Application => "application",
            Self::Controller => "controller",
            Self::Migration => "migration",
            Self::UnitTest => "unit-test",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "domain" | "aggregate" => Ok(Self::Domain),
            "repository" | "repo" | "data" => Ok(Self::Repository),
            "application" | "app" => Ok(Self::Application),
            "controller" | "http" => Ok(Self::Controller),
            "migration" | "script" | "db" => Ok(Self::Migration),
            "unit-test" | "unittest" | "test" => Ok(Self::UnitTest),
            _ => Err(DomainError::UnknownLayer { name: s.into() }),
        }
    }
}

// ── CollectionKind ───────────────────────────────────────────────────────────

/// Mutability of a collection-valued relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionKind {
    Mutable,
    ReadOnly,
}

impl CollectionKind {
    /// Classify a declared collection type name such as `ICollection`.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "ICollection" | "IList" | "List" | "HashSet" => Some(Self::Mutable),
            "IReadOnlyCollection" | "IReadOnlyList" => Some(Self::ReadOnly),
            _ => None,
        }
    }
}

// ── IdType ───────────────────────────────────────────────────────────────────

/// Broad family of an identifier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Int32,
    Int64,
    Uuid,
    Text,
    Other,
}

/// Declared identifier type of a model, as written in source.
///
/// Never empty: the default is the 32-bit `int`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdType(String);

impl IdType {
    pub const DEFAULT: &'static str = "int";

    /// Wrap a declared type, falling back to the default for blank input.
    pub fn new(declared: impl Into<String>) -> Self {
        let declared = declared.into();
        let trimmed = declared.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> IdKind {
        match self.0.trim_end_matches('?').to_ascii_lowercase().as_str() {
            "int" | "int32" => IdKind::Int32,
            "long" | "int64" => IdKind::Int64,
            "guid" => IdKind::Uuid,
            "string" => IdKind::Text,
            _ => IdKind::Other,
        }
    }

    /// Storage type of the identifier column.
    pub fn sql_type(&self) -> &'static str {
        crate::domain::sql_type(&self.0)
    }
}

impl Default for IdType {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
