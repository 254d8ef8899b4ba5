//! Domain-service signatures derived from a model.
//!
//! The domain generator renders these signatures and the unit-test
//! generator writes tests against them. Both read the same value, so the
//! two artifacts cannot drift apart.

use crate::domain::{StructuralModel, naming};

/// Parameter type of the translation setter and create operation.
pub const TRANSLATION_COLLECTION: &str = "ICollection<TranslationModel>";

/// Name of the translation setter.
pub const TRANSLATION_SETTER: &str = "SetNameTranslations";

/// C# keywords that need an `@` prefix when used as identifiers.
const RESERVED: &[&str] = &[
    "abstract", "base", "bool", "break", "case", "catch", "class", "const", "default", "delegate",
    "do", "double", "else", "enum", "event", "explicit", "extern", "false", "finally", "fixed",
    "float", "for", "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal",
    "is", "lock", "long", "namespace", "new", "null", "object", "operator", "out", "override",
    "params", "private", "protected", "public", "readonly", "ref", "return", "sealed", "short",
    "static", "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "using",
    "virtual", "void", "volatile", "while",
];

/// Local identifier for a member name, e.g. `Title` -> `title`, `Event` -> `@event`.
pub fn local_name(member: &str) -> String {
    let name = naming::lower_first(member);
    if RESERVED.contains(&name.as_str()) {
        format!("@{name}")
    } else {
        name
    }
}

/// First free candidate, else the first one with a numeric suffix.
fn claim<const N: usize>(taken: &mut Vec<String>, candidates: [String; N]) -> String {
    let name = candidates
        .iter()
        .find(|c| !taken.contains(c))
        .cloned()
        .unwrap_or_else(|| {
            let base = &candidates[0];
            (2..)
                .map(|n| format!("{base}{n}"))
                .find(|c| !taken.contains(c))
                .unwrap_or_else(|| base.clone())
        });
    taken.push(name.clone());
    name
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub type_name: String,
    pub name: String,
}

impl Parameter {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// `string title`
    pub fn declaration(&self) -> String {
        format!("{} {}", self.type_name, self.name)
    }
}

/// One `Set<Member>(model, value)` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setter {
    pub method: String,
    /// Member written by the setter.
    pub member: String,
    pub value: Parameter,
}

/// The public surface of a generated domain service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainServiceShape {
    pub model: String,
    /// The entity parameter every setter takes first.
    pub target: Parameter,
    pub setters: Vec<Setter>,
    pub translation_setter: Option<Setter>,
    pub create_parameters: Vec<Parameter>,
}

impl DomainServiceShape {
    /// Parameter names are unique within every signature: the translation
    /// parameter and the entity parameter give way to property names.
    pub fn from_model(model: &StructuralModel) -> Self {
        let mut taken = Vec::new();

        let setters: Vec<Setter> = model
            .properties()
            .iter()
            .map(|p| Setter {
                method: format!("Set{}", p.name),
                member: p.name.clone(),
                value: Parameter::new(&p.type_name, claim(&mut taken, [local_name(&p.name)])),
            })
            .collect();

        let translation_setter = model.has_multi_language().then(|| Setter {
            method: TRANSLATION_SETTER.to_string(),
            member: "Name".to_string(),
            value: Parameter::new(
                TRANSLATION_COLLECTION,
                claim(&mut taken, ["names".to_string(), "nameTranslations".to_string()]),
            ),
        });

        let target = Parameter::new(
            model.name(),
            claim(&mut taken, [local_name(model.name()), "entity".to_string()]),
        );

        let create_parameters = setters
            .iter()
            .chain(translation_setter.as_ref())
            .map(|s| s.value.clone())
            .collect();

        Self {
            model: model.name().to_string(),
            target,
            setters,
            translation_setter,
            create_parameters,
        }
    }

    /// Property setters followed by the translation setter, if any.
    pub fn all_setters(&self) -> impl Iterator<Item = &Setter> {
        self.setters.iter().chain(self.translation_setter.as_ref())
    }

    /// `void SetTitle(Category category, string title)`
    pub fn setter_signature(&self, setter: &Setter) -> String {
        format!(
            "void {}({}, {})",
            setter.method,
            self.target.declaration(),
            setter.value.declaration()
        )
    }

    /// `Category Create(string title, ICollection<TranslationModel> names)`
    pub fn create_signature(&self) -> String {
        let params = self
            .create_parameters
            .iter()
            .map(Parameter::declaration)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} Create({})", self.model, params)
    }

    /// Argument list for calling `Create`, e.g. `title, names`.
    pub fn create_arguments(&self) -> String {
        self.create_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
