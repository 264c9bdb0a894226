use serde::Serialize;

use crate::core::DefaultValue;

/// Module identity plus its inputs, split by whether they must be set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageDocument {
    pub module_name: String,
    pub source: String,
    pub required: Vec<UsageEntry>,
    pub optional: Vec<UsageEntry>,
}

impl UsageDocument {
    pub fn new(module_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            source: source.into(),
            required: Vec::new(),
            optional: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}
