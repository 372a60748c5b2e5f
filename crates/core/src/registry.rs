//! Stage 2: name registry.
//!
//! Accumulates task and expression names in scan order, enforces
//! uniqueness across both categories, and answers the membership queries
//! the reducer and collector need.

use crate::ast::NamedExpression;
use crate::error::ResolveError;
use std::collections::HashSet;

/// The ordered name list and category membership for one definitions file.
///
/// `names` is tasks first, then expression names, each in file order,
/// the same ordering the downstream evaluator uses to disambiguate
/// identifiers during its own parsing.
#[derive(Debug)]
pub struct NameRegistry {
    names: Vec<String>,
    tasks: HashSet<String>,
    expressions: HashSet<String>,
}

impl NameRegistry {
    /// Build the registry, rejecting any name declared more than once:
    /// within tasks, within expressions, or across the two categories.
    pub fn build(tasks: &[String], expressions: &[NamedExpression]) -> Result<Self, ResolveError> {
        let mut registry = NameRegistry {
            names: Vec::with_capacity(tasks.len() + expressions.len()),
            tasks: HashSet::new(),
            expressions: HashSet::new(),
        };

        for name in tasks {
            if !registry.tasks.insert(name.clone()) {
                return Err(ResolveError::DuplicateDefinition { name: name.clone() });
            }
            registry.names.push(name.clone());
        }

        for expr in expressions {
            if registry.tasks.contains(&expr.name) || !registry.expressions.insert(expr.name.clone()) {
                return Err(ResolveError::DuplicateDefinition {
                    name: expr.name.clone(),
                });
            }
            registry.names.push(expr.name.clone());
        }

        Ok(registry)
    }

    pub fn is_task(&self, name: &str) -> bool {
        self.tasks.contains(name)
    }

    pub fn is_expression(&self, name: &str) -> bool {
        self.expressions.contains(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.is_task(name) || self.is_expression(name)
    }

    /// All declared names: tasks first, then expressions, file order each.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
