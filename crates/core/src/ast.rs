//! Shared types for the NLPQL definition resolver.
//!
//! These types are produced by the extraction stage and consumed by the
//! registry, reducer, and collector. They live here so the stage modules
//! can import them without depending on each other.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ──────────────────────────────────────────────
// Statements
// ──────────────────────────────────────────────

/// A statement recognized in the normalized definitions text.
///
/// Exactly three shapes exist; anything else in the file is ignored by
/// the extractor. The optional `final` modifier on `define` is accepted
/// and discarded; whether a result is "final" is the downstream
/// evaluator's concern, not the resolver's.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `context <identifier> ;`
    Context(String),
    /// `define [final] <name> : <body-not-starting-with-where> ;`
    /// Tasks are primitive: their results come from the external data
    /// layer and are never reduced.
    Task { name: String },
    /// `define [final] <name> : where <expression-body> ;`
    Expression { name: String, body: String },
}

// ──────────────────────────────────────────────
// Output record
// ──────────────────────────────────────────────

/// One named expression definition, in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedExpression {
    pub name: String,
    pub body: String,
}

impl NamedExpression {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        NamedExpression {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// The resolver's single output record for one definitions file.
///
/// Constructed once by [`resolve`](crate::resolve::resolve) and immutable
/// afterward; no `&mut` API exists on it. `reduced_expressions` matches
/// `expressions` in length and name order; `primitives` is the minimal
/// set of task names the external data layer must be able to supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionFile {
    /// Evaluation scope identifier, e.g. `Patient` or `Document`.
    pub context: String,
    /// All declared names: tasks first, then expression names, each in
    /// file order. Contains no duplicates.
    pub names: Vec<String>,
    /// Names declared as task statements. Always primitive.
    pub tasks: Vec<String>,
    /// Expression definitions with their raw right-hand sides.
    pub expressions: Vec<NamedExpression>,
    /// Same expressions with every expression-to-expression reference
    /// inlined: only task names, literals, and operators remain.
    pub reduced_expressions: Vec<NamedExpression>,
    /// Every task name referenced, directly or transitively, by any
    /// reduced expression body.
    pub primitives: BTreeSet<String>,
}

impl DefinitionFile {
    /// JSON form of the record, for the downstream evaluator and data
    /// layer. Field layout mirrors the struct.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "context":             self.context,
            "names":               self.names,
            "tasks":               self.tasks,
            "expressions":         self.expressions,
            "reduced_expressions": self.reduced_expressions,
            "primitives":          self.primitives,
        })
    }
}
