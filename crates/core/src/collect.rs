//! Stage 4: primitive collection.
//!
//! Scans reduced bodies and gathers every task name they reference,
//! either bare or as the base of a `Name.field` qualified token. The
//! result is
//! the minimal feature set the external data layer must supply.

use crate::lexer::Token;
use crate::registry::NameRegistry;
use std::collections::BTreeSet;

/// Collect the set of task names referenced by the reduced expressions.
///
/// Assumes the reducer's closure check has already run: any declared
/// name seen here is a task name.
pub fn collect_primitives(
    registry: &NameRegistry,
    bodies: &[(String, Vec<Token>)],
) -> BTreeSet<String> {
    let mut primitives = BTreeSet::new();
    for (_, tokens) in bodies {
        for token in tokens {
            let base = match token {
                Token::Ident(name) => name,
                Token::Qualified { base, .. } => base,
                _ => continue,
            };
            if registry.is_defined(base) {
                debug_assert!(registry.is_task(base), "non-task '{}' survived reduction", base);
                primitives.insert(base.clone());
            }
        }
    }
    primitives
}
