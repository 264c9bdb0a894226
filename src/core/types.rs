//! Data model shared by the extractor, the merger and the usage formatter.

use std::{collections::BTreeMap, path::PathBuf};

use serde::Serialize;

/// Type assigned to declarations that carry no `type` attribute.
pub const ANY_TYPE: &str = "any";

/// Variables of one module keyed by name.
///
/// Ordered by name so every consumer sees the same iteration order.
pub type VariableTable = BTreeMap<String, Variable>;

/// Default value of a variable, kept opaque.
///
/// Values are never evaluated: the backend hands us JSON and the source gives
/// us expression text, and both are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Structured value reported by the metadata backend.
    Value(serde_json::Value),
    /// Expression text exactly as written in the declaration body.
    Expression(String),
}

/// One declared module input.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    /// Canonical type text. Truncation is applied only when displayed.
    pub ty: String,
    pub description: String,
    pub default: Option<DefaultValue>,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            description: String::new(),
            default: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// A variable is required exactly when it declares no default.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// One documentable unit: a directory of `.tf` files.
#[derive(Debug, Clone)]
pub struct Module {
    pub path: PathBuf,
    pub name: String,
    pub variables: VariableTable,
}

impl Module {
    /// Variables without a default, in name order.
    pub fn required(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values().filter(|v| v.is_required())
    }

    /// Variables with a default, in name order.
    pub fn optional(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values().filter(|v| !v.is_required())
    }
}
