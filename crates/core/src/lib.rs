//! nlpql-core: NLPQL definition-file resolver.
//!
//! Reads an NLPQL definitions file and reduces every `define ... where`
//! expression to a canonical form written entirely in terms of primitive
//! task names, ready for the downstream expression evaluator.
//!
//! Pipeline, leaves first:
//!
//! 1. [`normalize`] -- strip comments, collapse whitespace to one line
//! 2. [`extract`] -- scan for context / task / expression statements
//! 3. [`registry`] -- ordered name list, uniqueness enforcement
//! 4. [`reduce`] -- fixpoint inlining of expression references
//! 5. [`collect`] -- set of task names the reduced expressions use
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`resolve()`] / [`resolve_with_options()`] -- run the full pipeline
//! - [`DefinitionFile`] -- the immutable output record
//! - [`ResolveError`] -- resolver error type
//! - [`NameRegistry`] -- name membership queries
//!
//! The resolver never evaluates expressions and never touches a data
//! store; it only produces the artifact those collaborators consume.

pub mod ast;
pub mod collect;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod normalize;
pub mod reduce;
pub mod registry;
pub mod resolve;

// ── Convenience re-exports ───────────────────────────────────────────

pub use ast::{DefinitionFile, NamedExpression, Statement};
pub use error::ResolveError;
pub use registry::NameRegistry;
pub use resolve::{resolve, resolve_with_options, ResolveOptions};
