#![deny(missing_docs)]

//! # Patch Orchestrator
//!
//! Composes matcher, guard, pruner, template engine, annotation injector and
//! import ledger into one transaction per declaration:
//!
//! `Inspecting -> (NotTarget | AlreadyPatched | Pruning -> Templating ->
//! Annotating -> Ledgering -> Patched)`
//!
//! A patch is all-or-nothing: any failure while templating aborts the whole
//! transaction and the caller keeps the original declaration. The engine
//! works on immutable values only, so there is never partial mutation to
//! observe.

use crate::annotate::add_annotation;
use crate::config::RecipeConfig;
use crate::error::{RecipeError, RecipeResult};
use crate::guard::already_applied;
use crate::imports::ImportLedger;
use crate::matcher::matches_target;
use crate::pruner::prune_fields;
use crate::template::{SnippetParser, Template};
use crate::tree::{ClassItem, CompilationUnit, Declaration};
use indexmap::IndexSet;
use std::collections::HashSet;

/// Terminal state of one patch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchState {
    /// The declaration is not the configured target; nothing changed.
    NotTarget,
    /// The guard found a marker field; nothing changed.
    AlreadyPatched,
    /// The patch was applied.
    Patched,
}

/// Result of one patch attempt on one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// The (possibly new) declaration.
    pub declaration: Declaration,
    /// Qualified names the patched code requires, in deterministic order.
    /// Empty unless the state is `Patched`.
    pub imports_required: IndexSet<String>,
    /// How the attempt ended.
    pub state: PatchState,
}

/// A failed patch attempt inside a unit, with the declaration left as it was.
#[derive(Debug)]
pub struct PatchFailure {
    /// Simple name of the declaration that failed.
    pub declaration: String,
    /// What went wrong.
    pub error: RecipeError,
}

/// Result of patching every declaration in a compilation unit.
#[derive(Debug)]
pub struct UnitOutcome {
    /// The unit with patched declarations and merged imports.
    pub unit: CompilationUnit,
    /// Number of declarations that ended `Patched`.
    pub patched: usize,
    /// Declarations that failed; each kept its original form.
    pub failures: Vec<PatchFailure>,
}

impl UnitOutcome {
    /// Whether anything in the unit changed.
    pub fn changed(&self) -> bool {
        self.patched > 0
    }
}

/// One runnable recipe: a validated configuration plus its compiled template.
///
/// Construct a fresh `Recipe` per run; it carries no mutable state, so the
/// same value may also be shared across threads, one declaration per call.
#[derive(Debug, Clone)]
pub struct Recipe {
    config: RecipeConfig,
    template: Template,
}

impl Recipe {
    /// Validates the configuration and compiles its template.
    pub fn new(config: RecipeConfig) -> RecipeResult<Recipe> {
        config.validate()?;
        let template = Template::compile(config.template.clone());
        Ok(Recipe { config, template })
    }

    /// The recipe's configuration.
    pub fn config(&self) -> &RecipeConfig {
        &self.config
    }

    /// Applies the patch to one declaration.
    ///
    /// Never mutates the input; on error the caller simply keeps it.
    pub fn apply(
        &self,
        declaration: &Declaration,
        parser: &dyn SnippetParser,
    ) -> RecipeResult<PatchOutcome> {
        // Inspecting
        if !matches_target(declaration, &self.config.target_fqn) {
            return Ok(PatchOutcome {
                declaration: declaration.clone(),
                imports_required: IndexSet::new(),
                state: PatchState::NotTarget,
            });
        }
        if already_applied(declaration, &self.config.marker_fields) {
            return Ok(PatchOutcome {
                declaration: declaration.clone(),
                imports_required: IndexSet::new(),
                state: PatchState::AlreadyPatched,
            });
        }

        // Pruning
        let mut working = if self.config.prune_fields {
            prune_fields(declaration)
        } else {
            declaration.clone()
        };

        // Templating
        let items = self
            .template
            .instantiate(&self.config.template_args, parser)?;
        let mut class_annotations = Vec::new();
        let mut members = working.members.clone();
        for item in items {
            match item {
                ClassItem::Member(m) => members.push(m),
                ClassItem::Annotation(a) => class_annotations.push(a),
            }
        }
        working = working.with_members(members);

        // Annotating: template-borne class annotations first, then the
        // configured ones. Skipping names already present keeps re-runs
        // idempotent even when the field guard cannot fire.
        for annotation in class_annotations
            .into_iter()
            .chain(self.config.annotations.iter().cloned())
        {
            if !working.has_annotation(&annotation.name) {
                working = add_annotation(&working, annotation);
            }
        }
        if let Some(superclass) = &self.config.extend_with {
            working = working.with_extends(Some(superclass.clone()));
        }

        if let Some(name) = duplicate_field_name(&working) {
            return Err(RecipeError::ConflictingMember(name));
        }

        // Ledgering
        let mut ledger = ImportLedger::new();
        for import in &self.config.imports {
            ledger.require(import.clone());
        }

        Ok(PatchOutcome {
            declaration: working,
            imports_required: ledger.snapshot(),
            state: PatchState::Patched,
        })
    }

    /// Applies the patch to every declaration in a unit, isolating failures
    /// per declaration, and merges the required imports into the unit.
    pub fn apply_to_unit(
        &self,
        unit: &CompilationUnit,
        parser: &dyn SnippetParser,
    ) -> UnitOutcome {
        let mut declarations = Vec::with_capacity(unit.declarations.len());
        let mut failures = Vec::new();
        let mut ledger = ImportLedger::new();
        let mut patched = 0;

        for declaration in &unit.declarations {
            match self.apply(declaration, parser) {
                Ok(outcome) => {
                    if outcome.state == PatchState::Patched {
                        patched += 1;
                        ledger.extend(outcome.imports_required);
                    }
                    declarations.push(outcome.declaration);
                }
                Err(error) => {
                    failures.push(PatchFailure {
                        declaration: declaration.name.clone(),
                        error,
                    });
                    declarations.push(declaration.clone());
                }
            }
        }

        let unit = unit
            .clone()
            .with_declarations(declarations)
            .add_imports(ledger.snapshot());
        UnitOutcome {
            unit,
            patched,
            failures,
        }
    }
}

fn duplicate_field_name(declaration: &Declaration) -> Option<String> {
    let mut seen = HashSet::new();
    for name in declaration.field_names() {
        if !seen.insert(name) {
            return Some(name.to_string());
        }
    }
    None
}
