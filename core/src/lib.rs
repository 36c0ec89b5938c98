#![deny(missing_docs)]

//! # Repatch Core
//!
//! A structural patch engine for Java-like class declarations: recipes match
//! one class by fully-qualified name, prune stale fields, instantiate a
//! positional template into new members, inject annotations, and record the
//! imports the inserted code requires. Patches are idempotent and
//! all-or-nothing.

/// Shared error types.
pub mod error;

/// Immutable tree model for declarations, members and annotations.
pub mod tree;

/// Target matching by fully-qualified name.
pub mod matcher;

/// Already-applied detection via marker fields.
pub mod guard;

/// Conflicting-member removal.
pub mod pruner;

/// Positional template substitution and instantiation.
pub mod template;

/// Annotation injection.
pub mod annotate;

/// The import ledger.
pub mod imports;

/// Recipe configuration.
pub mod config;

/// The patch orchestrator.
pub mod engine;

/// Parsing of source files and template snippets.
pub mod parser;

/// Rendering patched units back to source text.
pub mod printer;

/// The stock recipe catalog.
pub mod recipes;

pub use config::RecipeConfig;
pub use engine::{PatchFailure, PatchOutcome, PatchState, Recipe, UnitOutcome};
pub use error::{RecipeError, RecipeResult};
pub use imports::ImportLedger;
pub use parser::{parse_class_items, parse_unit, SourceParser};
pub use printer::{render_declaration, render_unit};
pub use template::{SnippetParser, Template};
pub use tree::{
    Annotation, ClassItem, CompilationUnit, Declaration, Field, Member, Method, StaticInitializer,
};
