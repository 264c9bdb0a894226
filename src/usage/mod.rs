//! Usage block rendering.
//!
//! ## Module Structure
//!
//! - `document`: Format-independent usage document (required/optional split)
//! - `markdown`: Markdown rendering with an HCL code block
//!
//! Both output formats are built from the same [`UsageDocument`], so the two
//! always agree on partitioning, ordering and displayed types.

mod document;
mod markdown;

use clap::ValueEnum;

pub use document::{UsageDocument, UsageEntry};

use crate::{
    config::TypeFormatting,
    core::{
        VariableTable,
        normalize::{canonicalize, normalize},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    /// File written into each module directory in recursive mode.
    pub fn default_file_name(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "USAGE.md",
            OutputFormat::Json => "USAGE.json",
        }
    }
}

/// A rendered usage block.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Markdown(String),
    Json(UsageDocument),
}

impl Artifact {
    /// Final text of the artifact, always newline-terminated.
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        match self {
            Artifact::Markdown(text) => Ok(text.clone()),
            Artifact::Json(doc) => {
                let mut text = serde_json::to_string_pretty(doc)?;
                text.push('\n');
                Ok(text)
            }
        }
    }
}

pub struct UsageFormatter<'a> {
    formatting: &'a TypeFormatting,
}

impl<'a> UsageFormatter<'a> {
    pub fn new(formatting: &'a TypeFormatting) -> Self {
        Self { formatting }
    }

    pub fn render(
        &self,
        variables: &VariableTable,
        module_name: &str,
        module_source: &str,
        format: OutputFormat,
    ) -> Artifact {
        let doc = self.document(variables, module_name, module_source);
        match format {
            OutputFormat::Markdown => Artifact::Markdown(markdown::render(&doc)),
            OutputFormat::Json => Artifact::Json(doc),
        }
    }

    /// Split `variables` into required and optional entries, in name order.
    pub fn document(
        &self,
        variables: &VariableTable,
        module_name: &str,
        module_source: &str,
    ) -> UsageDocument {
        let mut doc = UsageDocument::new(module_name, module_source);

        for variable in variables.values() {
            let entry = UsageEntry {
                name: variable.name.clone(),
                ty: self.display_type(&variable.ty),
                description: variable.description.clone(),
                default: variable.default.clone(),
            };
            if variable.is_required() {
                doc.required.push(entry);
            } else {
                doc.optional.push(entry);
            }
        }

        doc
    }

    /// Type text shown for `ty`: truncated per the formatting settings, then
    /// replaced when a custom format matches either the full canonical type or
    /// its truncated form.
    pub fn display_type(&self, ty: &str) -> String {
        let custom = &self.formatting.custom_formats;
        if let Some(text) = custom.get(&canonicalize(ty)) {
            return text.clone();
        }
        let shown = normalize(ty, self.formatting);
        custom.get(&shown).cloned().unwrap_or(shown)
    }
}
