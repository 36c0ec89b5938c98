//! Parsing of class-body items: annotated fields, methods, constructors and
//! static initializer blocks.

use crate::config::is_identifier;
use crate::error::{RecipeError, RecipeResult};
use crate::parser::cursor::Cursor;
use crate::tree::{Annotation, ClassItem, Field, Member, Method, StaticInitializer};

/// Modifier keywords recognized in member declarations, in no particular
/// order of significance; source order is preserved.
const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "strictfp",
    "default",
];

/// Parses the text of a class body (without the surrounding braces) into
/// ordered class items.
///
/// Annotations bind to the member that follows them; annotations at the end
/// of the input with no member following target the declaration itself.
pub fn parse_class_items(source: &str) -> RecipeResult<Vec<ClassItem>> {
    let mut cur = Cursor::new(source);
    let mut items = Vec::new();
    let mut pending: Vec<Annotation> = Vec::new();

    loop {
        cur.skip_trivia();
        if cur.is_eof() {
            break;
        }
        // stray semicolons are legal and meaningless
        if cur.eat(';') {
            continue;
        }
        if cur.peek() == Some('@') {
            pending.push(parse_annotation(&mut cur)?);
            continue;
        }

        let modifiers = parse_modifiers(&mut cur);
        cur.skip_trivia();

        if cur.peek() == Some('{') {
            let line = cur.line();
            let body = cur.parse_block()?;
            if modifiers.len() != 1 || modifiers[0] != "static" {
                return Err(RecipeError::TemplateParse(format!(
                    "Unsupported initializer block at line {}",
                    line
                )));
            }
            if !pending.is_empty() {
                return Err(RecipeError::TemplateParse(format!(
                    "Annotations are not supported on initializer blocks (line {})",
                    line
                )));
            }
            items.push(ClassItem::Member(Member::StaticInitializer(
                StaticInitializer { body },
            )));
            continue;
        }

        let member = parse_member(&mut cur, modifiers, std::mem::take(&mut pending))?;
        items.push(ClassItem::Member(member));
    }

    for annotation in pending {
        items.push(ClassItem::Annotation(annotation));
    }
    Ok(items)
}

/// Parses one annotation, cursor positioned at `@`.
pub(crate) fn parse_annotation(cur: &mut Cursor<'_>) -> RecipeResult<Annotation> {
    cur.bump(); // '@'
    cur.skip_trivia();
    let line = cur.line();
    let name = cur.parse_qualified_name().ok_or_else(|| {
        RecipeError::TemplateParse(format!("Expected annotation name at line {}", line))
    })?;
    if cur.peek() == Some('(') {
        let args = cur.parse_delimited('(', ')')?;
        Ok(Annotation::with_args(name, args.trim()))
    } else {
        Ok(Annotation::marker(name))
    }
}

/// Consumes any run of modifier keywords, in source order.
pub(crate) fn parse_modifiers(cur: &mut Cursor<'_>) -> Vec<String> {
    let mut mods = Vec::new();
    loop {
        cur.skip_trivia();
        let mut matched = false;
        for kw in MODIFIERS {
            if cur.eat_keyword(kw) {
                mods.push((*kw).to_string());
                matched = true;
                break;
            }
        }
        if !matched {
            break;
        }
    }
    mods
}

fn parse_member(
    cur: &mut Cursor<'_>,
    modifiers: Vec<String>,
    annotations: Vec<Annotation>,
) -> RecipeResult<Member> {
    cur.skip_trivia();
    let line = cur.line();
    let ty = cur
        .parse_type()
        .ok_or_else(|| RecipeError::TemplateParse(format!("Expected type at line {}", line)))?;
    cur.skip_trivia();

    if cur.peek() == Some('(') {
        // No separate name token: `ty` is a constructor name.
        if !is_identifier(&ty) {
            return Err(RecipeError::TemplateParse(format!(
                "Invalid constructor name '{}' at line {}",
                ty, line
            )));
        }
        return finish_method(cur, annotations, modifiers, None, ty);
    }

    let name = cur.parse_identifier().ok_or_else(|| {
        RecipeError::TemplateParse(format!("Expected member name at line {}", cur.line()))
    })?;
    cur.skip_trivia();

    match cur.peek() {
        Some('(') => finish_method(cur, annotations, modifiers, Some(ty), name),
        Some('=') => {
            cur.bump();
            let init = cur.parse_until_semicolon()?;
            Ok(Member::Field(Field {
                annotations,
                modifiers,
                ty,
                name,
                initializer: Some(init.trim().to_string()),
            }))
        }
        Some(';') => {
            cur.bump();
            Ok(Member::Field(Field {
                annotations,
                modifiers,
                ty,
                name,
                initializer: None,
            }))
        }
        _ => Err(RecipeError::TemplateParse(format!(
            "Expected ';', '=' or '(' after '{}' at line {}",
            name,
            cur.line()
        ))),
    }
}

fn finish_method(
    cur: &mut Cursor<'_>,
    annotations: Vec<Annotation>,
    modifiers: Vec<String>,
    return_type: Option<String>,
    name: String,
) -> RecipeResult<Member> {
    let params = cur.parse_delimited('(', ')')?;
    cur.skip_trivia();

    let throws = if cur.eat_keyword("throws") {
        let mut list = Vec::new();
        loop {
            cur.skip_trivia();
            let t = cur.parse_qualified_name().ok_or_else(|| {
                RecipeError::TemplateParse(format!(
                    "Expected exception type in throws clause at line {}",
                    cur.line()
                ))
            })?;
            list.push(t);
            cur.skip_trivia();
            if !cur.eat(',') {
                break;
            }
        }
        Some(list.join(", "))
    } else {
        None
    };
    cur.skip_trivia();

    let body = match cur.peek() {
        Some('{') => Some(cur.parse_block()?),
        Some(';') => {
            cur.bump();
            None
        }
        _ => {
            return Err(RecipeError::TemplateParse(format!(
                "Expected method body or ';' for '{}' at line {}",
                name,
                cur.line()
            )))
        }
    };

    Ok(Member::Method(Method {
        annotations,
        modifiers,
        return_type,
        name,
        params: params.trim().to_string(),
        throws,
        body,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(source: &str) -> Vec<Member> {
        parse_class_items(source)
            .unwrap()
            .into_iter()
            .filter_map(|i| match i {
                ClassItem::Member(m) => Some(m),
                ClassItem::Annotation(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_simple_field() {
        let ms = members("private final AdminRestConfiguration adminRestConfiguration;");
        assert_eq!(ms.len(), 1);
        match &ms[0] {
            Member::Field(f) => {
                assert_eq!(f.modifiers, vec!["private", "final"]);
                assert_eq!(f.ty, "AdminRestConfiguration");
                assert_eq!(f.name, "adminRestConfiguration");
                assert!(f.initializer.is_none());
            }
            other => panic!("expected field, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_field_with_initializer() {
        let ms = members("private static final int DEF_COUNT = 20;");
        match &ms[0] {
            Member::Field(f) => assert_eq!(f.initializer.as_deref(), Some("20")),
            other => panic!("expected field, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_annotated_field() {
        let ms = members("@Getter\n@Setter\nprivate String usersPath;");
        match &ms[0] {
            Member::Field(f) => {
                assert_eq!(f.annotations.len(), 2);
                assert_eq!(f.annotations[0].name, "Getter");
                assert_eq!(f.annotations[1].name, "Setter");
            }
            other => panic!("expected field, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_method_with_throws_and_body() {
        let src = "public Mono<UserProfile> getUserProfile(String userName) throws FalconAppException {\n    return null;\n}";
        let ms = members(src);
        match &ms[0] {
            Member::Method(m) => {
                assert_eq!(m.return_type.as_deref(), Some("Mono<UserProfile>"));
                assert_eq!(m.name, "getUserProfile");
                assert_eq!(m.params, "String userName");
                assert_eq!(m.throws.as_deref(), Some("FalconAppException"));
                assert!(m.body.as_deref().unwrap().contains("return null;"));
            }
            other => panic!("expected method, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_constructor() {
        let ms = members("public FooBar(String path) { this.path = path; }");
        match &ms[0] {
            Member::Method(m) => {
                assert!(m.return_type.is_none());
                assert_eq!(m.name, "FooBar");
            }
            other => panic!("expected constructor, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_static_initializer() {
        let ms = members("static {\n    System.out.println(falconWebClientFactory);\n}");
        match &ms[0] {
            Member::StaticInitializer(s) => {
                assert!(s.body.contains("System.out.println"));
            }
            other => panic!("expected static initializer, got {:?}", other),
        }
    }

    #[test]
    fn test_annotation_with_args() {
        let ms = members("@Bean(name = \"adminWebClient\")\npublic WebClient adminWebClient() { return null; }");
        match &ms[0] {
            Member::Method(m) => {
                assert_eq!(m.annotations[0].name, "Bean");
                assert_eq!(m.annotations[0].args.as_deref(), Some("name = \"adminWebClient\""));
            }
            other => panic!("expected method, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_annotation_targets_declaration() {
        let items = parse_class_items("@Getter\n@Setter\n").unwrap();
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], ClassItem::Annotation(a) if a.name == "Getter"));
        assert!(matches!(&items[1], ClassItem::Annotation(a) if a.name == "Setter"));
    }

    #[test]
    fn test_members_in_source_order() {
        let src = "private String first;\npublic void refresh() {}\nprivate String second;";
        let ms = members(src);
        let names: Vec<_> = ms.iter().filter_map(|m| m.name()).collect();
        assert_eq!(names, vec!["first", "refresh", "second"]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let src = "// leading\n/* block */ private String usersPath; /* trailing */";
        let ms = members(src);
        assert_eq!(ms.len(), 1);
    }

    #[test]
    fn test_malformed_member_is_an_error() {
        let err = parse_class_items("private String ;").unwrap_err();
        assert!(matches!(err, RecipeError::TemplateParse(_)));
    }

    #[test]
    fn test_multi_declarator_fields_unsupported() {
        assert!(parse_class_items("private int a, b;").is_err());
    }
}
