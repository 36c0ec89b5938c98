//! # Declaration Matcher
//!
//! Decides whether a class declaration is the configured patch target.

use crate::tree::Declaration;

/// Returns true iff the declaration's resolved fully-qualified name equals
/// `target_fqn` exactly.
///
/// Matching is case-sensitive with no wildcard or prefix semantics. A
/// declaration whose type could not be resolved (`fqn` is `None`) never
/// matches; unresolved types are never patched.
pub fn matches_target(declaration: &Declaration, target_fqn: &str) -> bool {
    declaration.fqn.as_deref() == Some(target_fqn)
}
