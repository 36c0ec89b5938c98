//! # Error Handling
//!
//! Provides the unified `RecipeError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum RecipeError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A template has more positional placeholders than supplied arguments.
    #[from(ignore)]
    #[display("Template expects {expected} argument(s), {supplied} supplied")]
    TemplateArity {
        /// Number of `#{}` placeholders in the template.
        expected: usize,
        /// Number of arguments supplied by the recipe.
        supplied: usize,
    },

    /// A substituted snippet is not valid in a class-body context.
    #[from(ignore)]
    #[display("Template Parse Error: {_0}")]
    TemplateParse(String),

    /// A field-name collision survived pruning.
    #[from(ignore)]
    #[display("Conflicting member: {_0}")]
    ConflictingMember(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// We implement this manually (instead of `derive(Error)`) because several
/// variants carry a `String`, which does not implement `std::error::Error`,
/// causing auto-derived `source()` implementations to fail compilation.
impl std::error::Error for RecipeError {}

/// Helper type alias for Result using RecipeError.
pub type RecipeResult<T> = Result<T, RecipeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let err: RecipeError = io_err.into();
        assert!(matches!(err, RecipeError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // Test that String defaults to General, not TemplateParse
        let msg = String::from("something wrong");
        let err: RecipeError = msg.into();
        match err {
            RecipeError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to RecipeError::General"),
        }
    }

    #[test]
    fn test_arity_display() {
        let err = RecipeError::TemplateArity {
            expected: 2,
            supplied: 1,
        };
        assert_eq!(
            format!("{}", err),
            "Template expects 2 argument(s), 1 supplied"
        );
    }
}
