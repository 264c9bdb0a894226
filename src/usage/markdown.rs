use std::fmt::Write;

use super::document::{UsageDocument, UsageEntry};

const HEADING: &str = "## Usage";
const INDENT: &str = "  ";

/// Render `doc` as a Markdown section holding an HCL `module` block. Optional
/// inputs are commented out; empty sections are left out.
pub fn render(doc: &UsageDocument) -> String {
    let mut out = String::new();
    out.push_str(HEADING);
    out.push_str("\n\n```hcl\n");
    let _ = writeln!(out, "module \"{}\" {{", escape(&doc.module_name));
    let _ = writeln!(out, "{INDENT}source = \"{}\"", escape(&doc.source));

    section(&mut out, "# Required variables", &doc.required, "");
    section(&mut out, "# Optional variables", &doc.optional, "# ");

    out.push_str("}\n```\n");
    out
}

fn section(out: &mut String, title: &str, entries: &[UsageEntry], prefix: &str) {
    if entries.is_empty() {
        return;
    }
    let _ = write!(out, "\n{INDENT}{title}\n");
    for entry in entries {
        let _ = writeln!(out, "{INDENT}{prefix}{} = {}", entry.name, entry.ty);
    }
}

/// Escape text placed inside an HCL string literal.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
