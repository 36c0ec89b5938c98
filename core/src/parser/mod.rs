#![deny(missing_docs)]

//! # Parser Module
//!
//! Hand-written parser for the Java-like subset the patch engine touches:
//! compilation-unit headers, class declarations, and class-body items.
//! It fulfills the host-parser obligations of the engine — resolving
//! fully-qualified names before matching and re-parsing template snippets in
//! class-body scope.
//!
//! This is deliberately not a full language grammar: nested type
//! declarations, generic classes and multi-declarator fields are rejected,
//! and the affected file is skipped by the batch driver.

pub(crate) mod cursor;
pub mod items;
pub mod unit;

pub use items::parse_class_items;
pub use unit::parse_unit;

use crate::error::RecipeResult;
use crate::template::SnippetParser;
use crate::tree::{ClassItem, CompilationUnit};

/// The bundled host parser, injected wherever a [`SnippetParser`] is needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceParser;

impl SourceParser {
    /// Creates the parser.
    pub fn new() -> Self {
        SourceParser
    }

    /// Parses a whole source file into a compilation unit.
    pub fn parse_unit(&self, source: &str) -> RecipeResult<CompilationUnit> {
        unit::parse_unit(source)
    }
}

impl SnippetParser for SourceParser {
    fn parse_class_items(&self, snippet: &str) -> RecipeResult<Vec<ClassItem>> {
        items::parse_class_items(snippet)
    }
}
