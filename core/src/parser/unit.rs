//! Parsing of whole source files: package declaration, imports and top-level
//! class declarations. Resolves each declaration's fully-qualified name from
//! the package, which is what the matcher keys on.

use crate::error::{RecipeError, RecipeResult};
use crate::parser::cursor::Cursor;
use crate::parser::items::{parse_annotation, parse_class_items, parse_modifiers};
use crate::tree::{ClassItem, CompilationUnit, Declaration};

/// Parses one source file into a compilation unit.
pub fn parse_unit(source: &str) -> RecipeResult<CompilationUnit> {
    let mut cur = Cursor::new(source);

    cur.skip_trivia();
    let package = if cur.eat_keyword("package") {
        cur.skip_trivia();
        let line = cur.line();
        let name = cur.parse_qualified_name().ok_or_else(|| {
            RecipeError::General(format!("Expected package name at line {}", line))
        })?;
        cur.skip_trivia();
        if !cur.eat(';') {
            return Err(RecipeError::General(format!(
                "Expected ';' after package declaration at line {}",
                cur.line()
            )));
        }
        Some(name)
    } else {
        None
    };

    let mut imports = Vec::new();
    loop {
        cur.skip_trivia();
        if !cur.eat_keyword("import") {
            break;
        }
        cur.skip_trivia();
        let is_static = cur.eat_keyword("static");
        if is_static {
            cur.skip_trivia();
        }
        let line = cur.line();
        let mut name = cur.parse_qualified_name().ok_or_else(|| {
            RecipeError::General(format!("Expected import name at line {}", line))
        })?;
        if cur.starts_with(".*") {
            cur.bump();
            cur.bump();
            name.push_str(".*");
        }
        cur.skip_trivia();
        if !cur.eat(';') {
            return Err(RecipeError::General(format!(
                "Expected ';' after import at line {}",
                cur.line()
            )));
        }
        imports.push(if is_static {
            format!("static {}", name)
        } else {
            name
        });
    }

    let mut declarations = Vec::new();
    loop {
        cur.skip_trivia();
        if cur.is_eof() {
            break;
        }
        if cur.eat(';') {
            continue;
        }
        declarations.push(parse_declaration(&mut cur, package.as_deref())?);
    }
    if declarations.is_empty() {
        return Err(RecipeError::General("No class declaration found".into()));
    }

    Ok(CompilationUnit {
        package,
        imports,
        declarations,
    })
}

fn parse_declaration(cur: &mut Cursor<'_>, package: Option<&str>) -> RecipeResult<Declaration> {
    let mut annotations = Vec::new();
    loop {
        cur.skip_trivia();
        if cur.peek() == Some('@') {
            annotations.push(parse_annotation(cur)?);
        } else {
            break;
        }
    }

    let modifiers = parse_modifiers(cur);
    cur.skip_trivia();
    let line = cur.line();
    if !cur.eat_keyword("class") {
        return Err(RecipeError::General(format!(
            "Expected 'class' declaration at line {}",
            line
        )));
    }
    cur.skip_trivia();
    let name = cur.parse_identifier().ok_or_else(|| {
        RecipeError::General(format!("Expected class name at line {}", cur.line()))
    })?;
    cur.skip_trivia();
    if cur.peek() == Some('<') {
        return Err(RecipeError::General(format!(
            "Generic class declarations are not supported (line {})",
            cur.line()
        )));
    }

    let extends = if cur.eat_keyword("extends") {
        cur.skip_trivia();
        let ty = cur.parse_type().ok_or_else(|| {
            RecipeError::General(format!("Expected superclass name at line {}", cur.line()))
        })?;
        cur.skip_trivia();
        Some(ty)
    } else {
        None
    };

    let mut implements = Vec::new();
    if cur.eat_keyword("implements") {
        loop {
            cur.skip_trivia();
            let ty = cur.parse_type().ok_or_else(|| {
                RecipeError::General(format!("Expected interface name at line {}", cur.line()))
            })?;
            implements.push(ty);
            cur.skip_trivia();
            if !cur.eat(',') {
                break;
            }
        }
    }

    cur.skip_trivia();
    if cur.peek() != Some('{') {
        return Err(RecipeError::General(format!(
            "Expected class body at line {}",
            cur.line()
        )));
    }
    let body = cur.parse_delimited('{', '}')?;

    let mut members = Vec::new();
    for item in parse_class_items(&body)? {
        match item {
            ClassItem::Member(m) => members.push(m),
            // An orphan annotation at the end of a body attaches to the class.
            ClassItem::Annotation(a) => annotations.push(a),
        }
    }

    let fqn = match package {
        Some(p) => Some(format!("{}.{}", p, name)),
        None => Some(name.clone()),
    };

    Ok(Declaration {
        name,
        fqn,
        annotations,
        modifiers,
        extends,
        implements,
        members,
    })
}
