//! Which exports an import statement pulls in, and under which name

use std::path::Path;

use solmerge_ast::{ExportItem, ImportEdge};

use crate::registry::ImportRegistry;
use crate::rename;

/// Result of evaluating one export against one incoming edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDecision {
    pub included: bool,
    pub alias: Option<String>,
}

impl ExportDecision {
    pub fn include(alias: Option<String>) -> Self {
        Self { included: true, alias }
    }

    pub fn exclude() -> Self {
        Self {
            included: false,
            alias: None,
        }
    }
}

/// Decides whether `item` of `file` is emitted for `incoming`.
///
/// Rules, first match wins:
///
/// 1. no incoming edge: the item belongs to the root and is terminal output
/// 2. wildcard or global-rename edge: everything, comments included; global
///    renames prefix the name
/// 3. named edge: only listed names, never comments, with the listed alias
///
/// Whatever the rule, an item already emitted for the same
/// `(file, name, alias)` is excluded.
pub fn decide(file: &Path, item: &ExportItem, incoming: Option<&ImportEdge>, registry: &ImportRegistry) -> ExportDecision {
    let decision = match incoming {
        None => ExportDecision::include(None),
        Some(edge) if edge.imports_everything() => ExportDecision::include(rename::alias_for(edge, item)),
        Some(_) if item.is_comment() => ExportDecision::exclude(),
        Some(edge) => match edge.find_named(&item.name) {
            Some(named) => ExportDecision::include(named.alias.clone()),
            None => ExportDecision::exclude(),
        },
    };

    if decision.included && registry.is_emitted(file, &item.identity(), decision.alias.as_deref()) {
        return ExportDecision::exclude();
    }

    decision
}
