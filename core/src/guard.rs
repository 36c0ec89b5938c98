//! # Patch Guard
//!
//! Detects an already-applied patch so re-running a recipe never duplicates
//! members.
//!
//! The check is deliberately coarse: field-name presence, not semantic
//! equivalence. One recipe runs per batch, so a cheap syntactic marker is
//! sufficient.

use crate::tree::Declaration;

/// Returns true iff any existing field's name is in `marker_names` (the set
/// of field names the recipe is about to introduce).
///
/// When this returns true the orchestrator must return the declaration
/// completely unmutated.
pub fn already_applied(declaration: &Declaration, marker_names: &[String]) -> bool {
    declaration
        .field_names()
        .any(|name| marker_names.iter().any(|m| m == name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Declaration, Field, Member, Method};

    fn decl_with_field(name: &str) -> Declaration {
        Declaration {
            name: "Foo".into(),
            fqn: Some("com.acme.Foo".into()),
            annotations: vec![],
            modifiers: vec![],
            extends: None,
            implements: vec![],
            members: vec![Member::Field(Field {
                annotations: vec![],
                modifiers: vec!["private".into()],
                ty: "String".into(),
                name: name.into(),
                initializer: None,
            })],
        }
    }

    #[test]
    fn test_marker_present() {
        let decl = decl_with_field("usersPath");
        assert!(already_applied(&decl, &["usersPath".into()]));
    }

    #[test]
    fn test_marker_absent() {
        let decl = decl_with_field("somethingElse");
        assert!(!already_applied(
            &decl,
            &["falconWebClientFactory".into(), "adminRestConfiguration".into()]
        ));
    }

    #[test]
    fn test_methods_are_not_markers() {
        // Only field names count; a method with a marker name does not trip the guard.
        let mut decl = decl_with_field("other");
        decl.members.push(Member::Method(Method {
            annotations: vec![],
            modifiers: vec!["public".into()],
            return_type: Some("void".into()),
            name: "usersPath".into(),
            params: String::new(),
            throws: None,
            body: Some("{}".into()),
        }));
        assert!(!already_applied(&decl, &["usersPath".into()]));
    }

    #[test]
    fn test_empty_markers_never_fire() {
        let decl = decl_with_field("usersPath");
        assert!(!already_applied(&decl, &[]));
    }
}
