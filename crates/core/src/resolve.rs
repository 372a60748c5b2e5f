//! Pipeline orchestrator: definitions text in, [`DefinitionFile`] out.
//!
//! This is a thin driver that calls each stage in order: normalize,
//! extract, register names, reduce, collect primitives.

use crate::ast::{DefinitionFile, NamedExpression, Statement};
use crate::collect;
use crate::error::ResolveError;
use crate::extract;
use crate::lexer;
use crate::normalize;
use crate::reduce;
use crate::registry::NameRegistry;

/// Resolver configuration, threaded through the entry point explicitly;
/// there is no process-wide state.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Print a post-reduction summary of the file to stderr.
    pub trace: bool,
}

/// Resolve a definitions file with default options.
pub fn resolve(src: &str) -> Result<DefinitionFile, ResolveError> {
    resolve_with_options(src, &ResolveOptions::default())
}

/// Resolve a definitions file: parse its statements, reduce every
/// expression to primitive form, and collect the referenced task names.
///
/// Fatal conditions (missing context, duplicate definitions, reference
/// cycles) abort the whole file; no partial record is returned.
pub fn resolve_with_options(
    src: &str,
    options: &ResolveOptions,
) -> Result<DefinitionFile, ResolveError> {
    let text = normalize::normalize(src);
    let statements = extract::extract(&text);

    let mut context: Option<String> = None;
    let mut tasks: Vec<String> = Vec::new();
    let mut expressions: Vec<NamedExpression> = Vec::new();
    for statement in statements {
        match statement {
            // The first context statement wins; later ones are ignored.
            Statement::Context(ident) => {
                if context.is_none() {
                    context = Some(ident);
                }
            }
            Statement::Task { name } => tasks.push(name),
            Statement::Expression { name, body } => {
                expressions.push(NamedExpression::new(name, body));
            }
        }
    }
    let context = context.ok_or(ResolveError::MissingContext)?;

    let registry = NameRegistry::build(&tasks, &expressions)?;
    let reduced = reduce::reduce(&registry, &expressions)?;
    let primitives = collect::collect_primitives(&registry, &reduced);

    let reduced_expressions: Vec<NamedExpression> = reduced
        .iter()
        .map(|(name, tokens)| NamedExpression::new(name.clone(), lexer::render(tokens)))
        .collect();

    let file = DefinitionFile {
        context,
        names: registry.names().to_vec(),
        tasks,
        expressions,
        reduced_expressions,
        primitives,
    };

    if options.trace {
        trace_summary(&file);
    }

    Ok(file)
}

/// Post-reduction summary, printed to stderr so it never mixes with a
/// caller's stdout.
fn trace_summary(file: &DefinitionFile) {
    eprintln!("file data after expression reduction:");
    eprintln!("\t    context: {}", file.context);
    eprintln!("\t      tasks: {:?}", file.tasks);
    eprintln!("\t      names: {:?}", file.names);
    eprintln!("\t primitives: {:?}", file.primitives);
    if file.expressions.is_empty() {
        eprintln!("\texpressions: none found");
        return;
    }
    eprintln!("\texpressions:");
    for (original, reduced) in file.expressions.iter().zip(&file.reduced_expressions) {
        eprintln!("{}", original.name);
        eprintln!("\toriginal: {}", original.body);
        eprintln!("\t reduced: {}", reduced.body);
    }
}
