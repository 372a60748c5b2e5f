//! Stage 3: expression reduction.
//!
//! Rewrites every expression body so that no reference to another
//! expression name remains — only task names, literals, and operators.
//! Before the fixpoint loop runs, the expression-to-expression reference
//! graph is checked for cycles, since the loop terminates only on an
//! acyclic graph. Self-references are never expanded; they are surfaced
//! by the post-reduction closure check instead.

use crate::ast::NamedExpression;
use crate::error::ResolveError;
use crate::lexer::{self, Token};
use crate::registry::NameRegistry;
use std::collections::{HashMap, HashSet};

/// Reduce all expression bodies to primitive form. Returns the reduced
/// token streams, paired with their names in declaration order.
pub fn reduce(
    registry: &NameRegistry,
    expressions: &[NamedExpression],
) -> Result<Vec<(String, Vec<Token>)>, ResolveError> {
    let mut bodies: Vec<(String, Vec<Token>)> = expressions
        .iter()
        .map(|e| (e.name.clone(), lexer::lex(&e.body)))
        .collect();
    let index: HashMap<String, usize> = bodies
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.clone(), i))
        .collect();

    check_reference_cycles(&bodies, &index)?;

    // Fixpoint: substitute until a full pass changes nothing. Each
    // substitution inlines the referenced expression's *current* body,
    // parenthesized so it cannot be re-grouped by surrounding operators.
    loop {
        let mut changed = false;
        for i in 0..bodies.len() {
            let own_name = bodies[i].0.clone();
            let old = bodies[i].1.clone();
            let mut new_tokens: Vec<Token> = Vec::with_capacity(old.len());
            let mut substituted = false;
            for token in &old {
                if let Token::Ident(t) = token {
                    if *t != own_name {
                        if let Some(&j) = index.get(t) {
                            new_tokens.push(Token::LParen);
                            new_tokens.extend(bodies[j].1.iter().cloned());
                            new_tokens.push(Token::RParen);
                            substituted = true;
                            continue;
                        }
                    }
                }
                new_tokens.push(token.clone());
            }
            if substituted {
                bodies[i].1 = new_tokens;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    check_primitive_closure(registry, &bodies)?;

    Ok(bodies)
}

/// Expression names referenced by `tokens`, excluding `name` itself.
fn reference_edges(name: &str, tokens: &[Token], index: &HashMap<String, usize>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut edges = Vec::new();
    for token in tokens {
        if let Token::Ident(t) = token {
            if t != name && index.contains_key(t) && seen.insert(t) {
                edges.push(t.clone());
            }
        }
    }
    edges
}

fn check_reference_cycles(
    bodies: &[(String, Vec<Token>)],
    index: &HashMap<String, usize>,
) -> Result<(), ResolveError> {
    let graph: HashMap<String, Vec<String>> = bodies
        .iter()
        .map(|(name, tokens)| (name.clone(), reference_edges(name, tokens, index)))
        .collect();

    let mut visited: HashSet<String> = HashSet::new();
    let mut in_stack: Vec<String> = Vec::new();
    for (name, _) in bodies {
        detect_cycle(name, &graph, &mut visited, &mut in_stack)?;
    }
    Ok(())
}

fn detect_cycle(
    name: &str,
    graph: &HashMap<String, Vec<String>>,
    visited: &mut HashSet<String>,
    in_stack: &mut Vec<String>,
) -> Result<(), ResolveError> {
    if visited.contains(name) {
        return Ok(());
    }
    if let Some(pos) = in_stack.iter().position(|x| x == name) {
        let mut cycle: Vec<String> = in_stack[pos..].to_vec();
        cycle.push(name.to_owned());
        return Err(ResolveError::DefinitionCycle {
            path: cycle.join(" \u{2192} "),
        });
    }

    in_stack.push(name.to_owned());
    if let Some(edges) = graph.get(name) {
        for edge in edges {
            detect_cycle(edge, graph, visited, in_stack)?;
        }
    }
    in_stack.pop();
    visited.insert(name.to_owned());
    Ok(())
}

/// Post-condition: every declared name surviving in a reduced body must
/// be a task name. A violation means the reducer failed (or an
/// unexpanded self-reference remains), not that the input was bad.
fn check_primitive_closure(
    registry: &NameRegistry,
    bodies: &[(String, Vec<Token>)],
) -> Result<(), ResolveError> {
    for (name, tokens) in bodies {
        for token in tokens {
            let referenced = match token {
                Token::Ident(t) => t,
                Token::Qualified { base, .. } => base,
                _ => continue,
            };
            if registry.is_defined(referenced) && !registry.is_task(referenced) {
                return Err(ResolveError::UnreducedReference {
                    expression: name.clone(),
                    name: referenced.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::render;

    fn setup(
        tasks: &[&str],
        exprs: &[(&str, &str)],
    ) -> (NameRegistry, Vec<NamedExpression>) {
        let tasks: Vec<String> = tasks.iter().map(|s| s.to_string()).collect();
        let exprs: Vec<NamedExpression> = exprs
            .iter()
            .map(|(n, b)| NamedExpression::new(*n, *b))
            .collect();
        let registry = NameRegistry::build(&tasks, &exprs).unwrap();
        (registry, exprs)
    }

    fn rendered(bodies: &[(String, Vec<Token>)]) -> Vec<(String, String)> {
        bodies
            .iter()
            .map(|(n, t)| (n.clone(), render(t)))
            .collect()
    }

    #[test]
    fn primitive_body_is_unchanged() {
        let (registry, exprs) = setup(&["Temperature"], &[("hasFever", "Temperature.value >= 100.4")]);
        let reduced = reduce(&registry, &exprs).unwrap();
        assert_eq!(
            rendered(&reduced),
            vec![("hasFever".to_owned(), "Temperature.value >= 100.4".to_owned())]
        );
    }

    #[test]
    fn single_level_references_are_inlined() {
        let (registry, exprs) = setup(
            &["X", "Y"],
            &[("A", "B AND C"), ("B", "X"), ("C", "Y")],
        );
        let reduced = reduce(&registry, &exprs).unwrap();
        assert_eq!(rendered(&reduced)[0].1, "( X ) AND ( Y )");
        assert_eq!(rendered(&reduced)[1].1, "X");
        assert_eq!(rendered(&reduced)[2].1, "Y");
    }

    #[test]
    fn chained_references_reduce_transitively() {
        let (registry, exprs) = setup(
            &["X"],
            &[("A", "B OR X"), ("B", "C"), ("C", "X AND X")],
        );
        let reduced = reduce(&registry, &exprs).unwrap();
        assert_eq!(rendered(&reduced)[0].1, "( ( X AND X ) ) OR X");
    }

    #[test]
    fn forward_references_resolve_by_name() {
        // A references C, which is declared later in the file.
        let (registry, exprs) = setup(&["X"], &[("A", "C"), ("C", "X")]);
        let reduced = reduce(&registry, &exprs).unwrap();
        assert_eq!(rendered(&reduced)[0].1, "( X )");
    }

    #[test]
    fn word_operators_and_literals_pass_through() {
        let (registry, exprs) = setup(
            &["Lesion"],
            &[("big", "Lesion.dimension_X > 15 AND Lesion.dimension_X < 30")],
        );
        let reduced = reduce(&registry, &exprs).unwrap();
        assert_eq!(
            rendered(&reduced)[0].1,
            "Lesion.dimension_X > 15 AND Lesion.dimension_X < 30"
        );
    }

    #[test]
    fn two_node_cycle_is_rejected_before_reduction() {
        let (registry, exprs) = setup(&[], &[("A", "B"), ("B", "A")]);
        let err = reduce(&registry, &exprs).unwrap_err();
        match err {
            ResolveError::DefinitionCycle { path } => {
                assert_eq!(path, "A \u{2192} B \u{2192} A");
            }
            other => panic!("expected DefinitionCycle, got {:?}", other),
        }
    }

    #[test]
    fn longer_cycle_reports_full_path() {
        let (registry, exprs) = setup(&["X"], &[("A", "B AND X"), ("B", "C"), ("C", "A")]);
        let err = reduce(&registry, &exprs).unwrap_err();
        match err {
            ResolveError::DefinitionCycle { path } => {
                assert_eq!(path, "A \u{2192} B \u{2192} C \u{2192} A");
            }
            other => panic!("expected DefinitionCycle, got {:?}", other),
        }
    }

    #[test]
    fn self_reference_is_not_expanded_and_fails_closure() {
        // A self-reference never inlines, so it survives reduction and the
        // closure check reports it as an internal-consistency failure.
        let (registry, exprs) = setup(&["X"], &[("A", "A AND X")]);
        let err = reduce(&registry, &exprs).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnreducedReference {
                expression: "A".to_owned(),
                name: "A".to_owned(),
            }
        );
        assert!(!err.is_input_error());
    }

    #[test]
    fn reducing_reduced_bodies_is_a_no_op() {
        let (registry, exprs) = setup(
            &["X", "Y"],
            &[("A", "B AND C"), ("B", "X"), ("C", "Y")],
        );
        let first = reduce(&registry, &exprs).unwrap();
        let again: Vec<NamedExpression> = first
            .iter()
            .map(|(n, t)| NamedExpression::new(n.clone(), render(t)))
            .collect();
        let second = reduce(&registry, &again).unwrap();
        assert_eq!(rendered(&first), rendered(&second));
    }
}
