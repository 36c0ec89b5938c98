//! # Annotation Injector
//!
//! Appends annotations to a declaration, preserving the order of everything
//! already there.

use crate::tree::{Annotation, Declaration};

/// Returns a new declaration with `annotation` appended after all
/// pre-existing annotations.
///
/// No same-name check happens here; callers consult the guard, or the
/// orchestrator's name-dedup, before re-adding.
pub fn add_annotation(declaration: &Declaration, annotation: Annotation) -> Declaration {
    let mut annotations = declaration.annotations.clone();
    annotations.push(annotation);
    declaration.clone().with_annotations(annotations)
}
