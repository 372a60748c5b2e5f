use serde::{Deserialize, Serialize};

/// All fatal conditions the resolver can report for one definitions file.
///
/// Every variant aborts resolution of the whole file: no partial
/// [`DefinitionFile`](crate::ast::DefinitionFile) is ever handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ResolveError {
    /// No `context <identifier> ;` statement in the file.
    #[error("context statement not found")]
    MissingContext,

    /// A name declared more than once: twice as a task, twice as an
    /// expression, or once as each.
    #[error("multiple definitions for '{name}'")]
    DuplicateDefinition { name: String },

    /// The expression-to-expression reference graph contains a cycle,
    /// so reduction would never reach a fixpoint.
    #[error("definition cycle detected: {path}")]
    DefinitionCycle { path: String },

    /// A reduced body still references a declared non-task name.
    /// Unlike the other variants this is not an input error: it means
    /// the reducer itself failed to reach primitive form.
    #[error("expression '{expression}' still references non-primitive '{name}' after reduction")]
    UnreducedReference { expression: String, name: String },
}

impl ResolveError {
    /// True for errors caused by the input file, false for
    /// internal-consistency failures of the resolver itself.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ResolveError::UnreducedReference { .. })
    }
}
