use super::types::VariableTable;

/// Reconcile the backend's table with the one read from source.
///
/// `external` is authoritative for descriptions and defaults; `local` only
/// contributes its type text for names both sides know, and whole entries for
/// names the backend missed. Argument order matters.
pub fn merge(external: VariableTable, local: VariableTable) -> VariableTable {
    let mut merged = external;

    for (name, variable) in local {
        match merged.get_mut(&name) {
            Some(existing) => {
                if !variable.ty.is_empty() {
                    existing.ty = variable.ty;
                }
            }
            None => {
                merged.insert(name, variable);
            }
        }
    }

    merged
}
