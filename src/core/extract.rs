//! Variable declarations read straight from module source text.

use tracing::trace;

use super::{
    normalize::canonicalize,
    scanner::{self, Block, Item, ScanError},
    types::{ANY_TYPE, DefaultValue, Variable, VariableTable},
};

const VARIABLE_BLOCK: &str = "variable";

/// Extract every top-level `variable "<name>" { ... }` declaration in `source`.
///
/// Types are stored in canonical form; truncation is left to display. A name
/// declared twice keeps its last declaration.
pub fn extract(source: &str) -> Result<VariableTable, ScanError> {
    let mut variables = VariableTable::new();

    for item in scanner::body_items(source)? {
        let Item::Block(block) = item else {
            continue;
        };
        if block.kind != VARIABLE_BLOCK {
            continue;
        }
        let [name] = block.labels.as_slice() else {
            continue;
        };

        let variable = parse_declaration(name, &block).map_err(|e| e.shifted(block.line))?;
        trace!(name = %variable.name, ty = %variable.ty, required = variable.is_required(), "declaration");
        variables.insert(name.clone(), variable);
    }

    Ok(variables)
}

fn parse_declaration(name: &str, block: &Block<'_>) -> Result<Variable, ScanError> {
    let mut variable = Variable::new(name, ANY_TYPE);

    for item in scanner::body_items(block.body)? {
        let Item::Attribute(attr) = item else {
            continue;
        };
        let value = scanner::strip_comments(attr.value).map_err(|e| e.shifted(attr.line))?;
        let value = value.trim();

        match attr.key {
            "description" => variable.description = description_text(value),
            "type" => {
                let ty = canonicalize(value);
                if !ty.is_empty() {
                    variable.ty = ty;
                }
            }
            "default" => variable.default = Some(DefaultValue::Expression(value.to_string())),
            _ => {}
        }
    }

    Ok(variable)
}

/// Plain text of a description expression. Anything other than a single
/// string literal or heredoc is kept as written.
fn description_text(expr: &str) -> String {
    if expr.starts_with('"')
        && let Ok(end) = scanner::skip_string(expr, 0)
        && end == expr.len()
    {
        return scanner::unquote(expr);
    }
    scanner::heredoc_text(expr).unwrap_or_else(|| expr.to_string())
}
