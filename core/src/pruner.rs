//! # Member Pruner
//!
//! Removes members that would conflict with an incoming patch, preserving
//! the relative order of everything kept.

use crate::tree::{Declaration, Member};

/// Produces a new declaration whose member sequence excludes every member
/// satisfying `predicate`. Never mutates the input.
pub fn prune_members<F>(declaration: &Declaration, predicate: F) -> Declaration
where
    F: Fn(&Member) -> bool,
{
    let kept = declaration
        .members
        .iter()
        .filter(|m| !predicate(m))
        .cloned()
        .collect();
    declaration.clone().with_members(kept)
}

/// The default prune: drop every field, keeping methods and initializers.
///
/// Clears prior or partial field state before a recipe re-inserts a fresh,
/// consistent set, which avoids duplicate-declaration errors when a recipe
/// variant changes the shape of the fields it wants present.
pub fn prune_fields(declaration: &Declaration) -> Declaration {
    prune_members(declaration, Member::is_field)
}
