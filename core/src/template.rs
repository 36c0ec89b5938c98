#![deny(missing_docs)]

//! # Template Engine
//!
//! Parameterized code snippets with positional `#{}` placeholders.
//!
//! The engine owns placeholder substitution and nothing else: the substituted
//! snippet is handed to a [`SnippetParser`] for re-parsing into structured
//! class items scoped to the insertion context. Substitution is
//! all-or-nothing; an arity mismatch fails before any splicing happens.

use crate::error::{RecipeError, RecipeResult};
use crate::tree::ClassItem;

/// Marker for a positional placeholder in template text.
const PLACEHOLDER: &str = "#{}";

/// The seam to the host parser: re-parses a substituted snippet into class
/// items as if it appeared inside a class body.
pub trait SnippetParser {
    /// Parses the snippet into members and declaration-level annotations.
    fn parse_class_items(&self, snippet: &str) -> RecipeResult<Vec<ClassItem>>;
}

/// A compiled template: snippet text plus its placeholder count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
    arity: usize,
}

impl Template {
    /// Compiles template text, recording the number of `#{}` placeholders.
    pub fn compile(text: impl Into<String>) -> Template {
        let text = text.into();
        let arity = text.matches(PLACEHOLDER).count();
        Template { text, arity }
    }

    /// The number of positional placeholders.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The raw template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fills the placeholders strictly in order of appearance.
    ///
    /// Fewer arguments than placeholders is an error and never yields a
    /// partially substituted result. Excess arguments are ignored.
    pub fn substitute(&self, args: &[String]) -> RecipeResult<String> {
        if args.len() < self.arity {
            return Err(RecipeError::TemplateArity {
                expected: self.arity,
                supplied: args.len(),
            });
        }

        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        let mut filled = 0;
        while let Some(pos) = rest.find(PLACEHOLDER) {
            out.push_str(&rest[..pos]);
            out.push_str(&args[filled]);
            filled += 1;
            rest = &rest[pos + PLACEHOLDER.len()..];
        }
        out.push_str(rest);
        Ok(out)
    }

    /// Substitutes the arguments and re-parses the result through `parser`.
    ///
    /// The returned items are in exact template order; the orchestrator
    /// appends members as the last members of the declaration. No
    /// de-duplication happens here — that is the guard's responsibility and
    /// it runs before instantiation.
    pub fn instantiate(
        &self,
        args: &[String],
        parser: &dyn SnippetParser,
    ) -> RecipeResult<Vec<ClassItem>> {
        let snippet = self.substitute(args)?;
        if snippet.trim().is_empty() {
            return Ok(vec![]);
        }
        parser.parse_class_items(&snippet).map_err(|e| match e {
            RecipeError::TemplateParse(msg) => RecipeError::TemplateParse(format!(
                "{}\n--- snippet ---\n{}",
                msg, snippet
            )),
            other => other,
        })
    }
}
