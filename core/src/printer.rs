#![deny(missing_docs)]

//! # Source Printer
//!
//! Renders a compilation unit back to text with normalized indentation.
//! Member bodies are kept verbatim apart from re-anchoring their common
//! leading whitespace, so template-inserted and pre-existing code end up
//! indented the same way.

use crate::tree::{Annotation, CompilationUnit, Declaration, Member};

const INDENT: &str = "    ";

/// Renders a whole compilation unit.
pub fn render_unit(unit: &CompilationUnit) -> String {
    let mut out = String::new();
    if let Some(pkg) = &unit.package {
        out.push_str("package ");
        out.push_str(pkg);
        out.push_str(";\n\n");
    }
    if !unit.imports.is_empty() {
        for import in &unit.imports {
            out.push_str("import ");
            out.push_str(import);
            out.push_str(";\n");
        }
        out.push('\n');
    }
    for (i, decl) in unit.declarations.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_declaration(decl));
    }
    out
}

/// Renders one class declaration.
pub fn render_declaration(decl: &Declaration) -> String {
    let mut out = String::new();
    for annotation in &decl.annotations {
        out.push_str(&render_annotation(annotation));
        out.push('\n');
    }
    if !decl.modifiers.is_empty() {
        out.push_str(&decl.modifiers.join(" "));
        out.push(' ');
    }
    out.push_str("class ");
    out.push_str(&decl.name);
    if let Some(superclass) = &decl.extends {
        out.push_str(" extends ");
        out.push_str(superclass);
    }
    if !decl.implements.is_empty() {
        out.push_str(" implements ");
        out.push_str(&decl.implements.join(", "));
    }
    out.push_str(" {\n");
    for member in &decl.members {
        out.push('\n');
        out.push_str(&render_member(member));
    }
    out.push_str("}\n");
    out
}

fn render_annotation(annotation: &Annotation) -> String {
    match &annotation.args {
        Some(args) => format!("@{}({})", annotation.name, args),
        None => format!("@{}", annotation.name),
    }
}

fn render_member(member: &Member) -> String {
    let mut out = String::new();
    match member {
        Member::Field(f) => {
            for annotation in &f.annotations {
                out.push_str(INDENT);
                out.push_str(&render_annotation(annotation));
                out.push('\n');
            }
            out.push_str(INDENT);
            if !f.modifiers.is_empty() {
                out.push_str(&f.modifiers.join(" "));
                out.push(' ');
            }
            out.push_str(&f.ty);
            out.push(' ');
            out.push_str(&f.name);
            if let Some(init) = &f.initializer {
                out.push_str(" = ");
                out.push_str(init);
            }
            out.push_str(";\n");
        }
        Member::Method(m) => {
            for annotation in &m.annotations {
                out.push_str(INDENT);
                out.push_str(&render_annotation(annotation));
                out.push('\n');
            }
            out.push_str(INDENT);
            if !m.modifiers.is_empty() {
                out.push_str(&m.modifiers.join(" "));
                out.push(' ');
            }
            if let Some(ret) = &m.return_type {
                out.push_str(ret);
                out.push(' ');
            }
            out.push_str(&m.name);
            out.push('(');
            out.push_str(&m.params);
            out.push(')');
            if let Some(throws) = &m.throws {
                out.push_str(" throws ");
                out.push_str(throws);
            }
            match &m.body {
                Some(body) => {
                    out.push(' ');
                    out.push_str(&reindent_block(body, INDENT));
                    out.push('\n');
                }
                None => out.push_str(";\n"),
            }
        }
        Member::StaticInitializer(s) => {
            out.push_str(INDENT);
            out.push_str("static ");
            out.push_str(&reindent_block(&s.body, INDENT));
            out.push('\n');
        }
    }
    out
}

/// Re-anchors a raw `{ ... }` block at `base` indentation, preserving the
/// block's internal relative indentation.
fn reindent_block(body: &str, base: &str) -> String {
    let trimmed = body.trim();
    let inner = match trimmed.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some(inner) => inner,
        None => return trimmed.to_string(),
    };
    if !inner.contains('\n') {
        let inner = inner.trim();
        return if inner.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", inner)
        };
    }

    let lines: Vec<&str> = inner.lines().collect();
    let mut start = 0;
    let mut end = lines.len();
    while start < end && lines[start].trim().is_empty() {
        start += 1;
    }
    while end > start && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    let body_lines = &lines[start..end];
    let common = body_lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = String::from("{\n");
    for line in body_lines {
        if line.trim().is_empty() {
            out.push('\n');
            continue;
        }
        out.push_str(base);
        out.push_str(INDENT);
        out.push_str(line.get(common..).unwrap_or_else(|| line.trim_start()));
        out.push('\n');
    }
    out.push_str(base);
    out.push('}');
    out
}
