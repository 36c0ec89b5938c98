#![deny(missing_docs)]

//! # Tree Model
//!
//! Immutable value types for the Java-like subset the patch engine touches:
//! a compilation unit, its class declarations, their members and annotations.
//!
//! Every mutation helper returns a *new* value; the engine never edits a tree
//! in place, which is what makes a failed patch trivially transactional.

use serde::{Deserialize, Serialize};

/// An annotation such as `@Configuration` or `@Bean(name = "adminWebClient")`.
///
/// `args` holds the raw argument text without the surrounding parentheses.
/// Serde derives exist because recipe configurations list the annotations
/// they add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Simple or qualified annotation name, without the leading `@`.
    pub name: String,
    /// Raw argument text, `None` for marker annotations.
    #[serde(default)]
    pub args: Option<String>,
}

impl Annotation {
    /// A marker annotation with no arguments.
    pub fn marker(name: impl Into<String>) -> Self {
        Annotation {
            name: name.into(),
            args: None,
        }
    }

    /// An annotation with raw argument text.
    pub fn with_args(name: impl Into<String>, args: impl Into<String>) -> Self {
        Annotation {
            name: name.into(),
            args: Some(args.into()),
        }
    }
}

/// A field declaration, e.g. `private final AdminRestConfiguration adminRestConfiguration;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Annotations attached to the field (`@Getter`, `@Autowired`, ...).
    pub annotations: Vec<Annotation>,
    /// Modifiers in source order (`private`, `static`, `final`, ...).
    pub modifiers: Vec<String>,
    /// The declared type, raw (generics included).
    pub ty: String,
    /// The field name.
    pub name: String,
    /// Raw initializer expression, without the `=` or the `;`.
    pub initializer: Option<String>,
}

/// A method or constructor declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Annotations attached to the method.
    pub annotations: Vec<Annotation>,
    /// Modifiers in source order.
    pub modifiers: Vec<String>,
    /// Return type; `None` marks a constructor.
    pub return_type: Option<String>,
    /// Method (or constructor) name.
    pub name: String,
    /// Raw parameter list text, without the surrounding parentheses.
    pub params: String,
    /// Raw `throws` clause, if any.
    pub throws: Option<String>,
    /// Raw body including braces; `None` for abstract declarations.
    pub body: Option<String>,
}

/// A `static { ... }` initializer block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticInitializer {
    /// Raw body including braces.
    pub body: String,
}

/// A member of a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// A field declaration.
    Field(Field),
    /// A method or constructor declaration.
    Method(Method),
    /// A static initializer block.
    StaticInitializer(StaticInitializer),
}

impl Member {
    /// The member's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Member::Field(f) => Some(&f.name),
            Member::Method(m) => Some(&m.name),
            Member::StaticInitializer(_) => None,
        }
    }

    /// Whether this member is a field.
    pub fn is_field(&self) -> bool {
        matches!(self, Member::Field(_))
    }

    /// The field payload, if this member is a field.
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Member::Field(f) => Some(f),
            _ => None,
        }
    }
}

/// An item produced by re-parsing a template snippet in class-body scope.
///
/// Snippets mostly yield members, but a trailing annotation with no member
/// following it targets the declaration itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassItem {
    /// A class-body member.
    Member(Member),
    /// A declaration-level annotation.
    Annotation(Annotation),
}

/// A class declaration: ordered annotations and ordered members.
///
/// `fqn` is resolved by the unit parser from the package name; `None` means
/// the type could not be resolved, and such declarations are never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Simple class name.
    pub name: String,
    /// Resolved fully-qualified name, `None` when unresolved.
    pub fqn: Option<String>,
    /// Leading annotations in source order.
    pub annotations: Vec<Annotation>,
    /// Modifiers in source order.
    pub modifiers: Vec<String>,
    /// Superclass name, if any.
    pub extends: Option<String>,
    /// Implemented interface names in source order.
    pub implements: Vec<String>,
    /// Ordered class-body members.
    pub members: Vec<Member>,
}

impl Declaration {
    /// Returns a copy with the member sequence replaced.
    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    /// Returns a copy with the annotation sequence replaced.
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    /// Returns a copy with the superclass replaced.
    pub fn with_extends(mut self, extends: Option<String>) -> Self {
        self.extends = extends;
        self
    }

    /// Iterates over the names of all field members.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter_map(|m| m.as_field())
            .map(|f| f.name.as_str())
    }

    /// Whether an annotation with the given name is already present.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name == name)
    }
}

/// A parsed source file: package, imports and top-level class declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Package name, `None` for the default package.
    pub package: Option<String>,
    /// Import statements in source order, without `import` or `;`.
    pub imports: Vec<String>,
    /// Top-level class declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl CompilationUnit {
    /// Returns a copy with the declaration sequence replaced.
    pub fn with_declarations(mut self, declarations: Vec<Declaration>) -> Self {
        self.declarations = declarations;
        self
    }

    /// Returns a copy with the given qualified names merged into the import
    /// list: existing imports keep their order, missing ones are appended in
    /// the order given, duplicates are dropped.
    pub fn add_imports<I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        for name in names {
            if !self.imports.iter().any(|i| *i == name) {
                self.imports.push(name);
            }
        }
        self
    }
}
