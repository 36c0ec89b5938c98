//! Low-level scanning over source text: trivia skipping, token reads and
//! balanced-group scanning aware of strings, chars and comments.

use crate::error::{RecipeError, RecipeResult};

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// A byte-offset cursor over source text.
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn starts_with(&self, s: &str) -> bool {
        self.src[self.pos..].starts_with(s)
    }

    /// 1-based line number of the current position, for diagnostics.
    pub(crate) fn line(&self) -> usize {
        self.src[..self.pos].matches('\n').count() + 1
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2; // the opening /*
        while !self.is_eof() {
            if self.starts_with("*/") {
                self.pos += 2;
                return;
            }
            self.bump();
        }
        // unterminated comment runs to EOF; callers will report what is missing
    }

    /// Skips whitespace and comments.
    pub(crate) fn skip_trivia(&mut self) {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.bump();
            }
            if self.starts_with("//") {
                self.skip_line_comment();
                continue;
            }
            if self.starts_with("/*") {
                self.skip_block_comment();
                continue;
            }
            break;
        }
    }

    /// Consumes `kw` iff it is present as a whole word at the current
    /// position.
    pub(crate) fn eat_keyword(&mut self, kw: &str) -> bool {
        if !self.starts_with(kw) {
            return false;
        }
        let boundary = match self.src[self.pos + kw.len()..].chars().next() {
            None => true,
            Some(c) => !is_ident_char(c),
        };
        if boundary {
            self.pos += kw.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_identifier(&mut self) -> Option<String> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_ident_start(c) => {
                self.bump();
            }
            _ => return None,
        }
        while matches!(self.peek(), Some(c) if is_ident_char(c)) {
            self.bump();
        }
        Some(self.src[start..self.pos].to_string())
    }

    /// A dot-separated identifier chain, e.g. `com.acme.FooBar`.
    pub(crate) fn parse_qualified_name(&mut self) -> Option<String> {
        let start = self.pos;
        self.parse_identifier()?;
        loop {
            let save = self.pos;
            if !self.eat('.') {
                break;
            }
            if self.parse_identifier().is_none() {
                self.pos = save;
                break;
            }
        }
        Some(self.src[start..self.pos].to_string())
    }

    /// A type token: qualified name, optional balanced generics, optional
    /// `[]` suffixes. Returned raw.
    pub(crate) fn parse_type(&mut self) -> Option<String> {
        let start = self.pos;
        self.parse_qualified_name()?;
        if self.peek() == Some('<') && self.skip_angle_group().is_none() {
            self.pos = start;
            return None;
        }
        while self.starts_with("[]") {
            self.pos += 2;
        }
        Some(self.src[start..self.pos].to_string())
    }

    fn skip_angle_group(&mut self) -> Option<()> {
        let save = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            match c {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(());
                    }
                }
                _ => {}
            }
        }
        self.pos = save;
        None
    }

    fn skip_string(&mut self, quote: char) -> RecipeResult<()> {
        let line = self.line();
        self.bump(); // opening quote
        while let Some(c) = self.bump() {
            if c == '\\' {
                self.bump();
                continue;
            }
            if c == quote {
                return Ok(());
            }
        }
        Err(RecipeError::TemplateParse(format!(
            "Unterminated literal starting at line {}",
            line
        )))
    }

    /// Scans a balanced group and returns the inner text without the
    /// delimiters. The cursor must be positioned at `open`.
    pub(crate) fn parse_delimited(&mut self, open: char, close: char) -> RecipeResult<String> {
        let line = self.line();
        self.bump(); // open
        let inner_start = self.pos;
        let mut depth = 1usize;
        while !self.is_eof() {
            if self.starts_with("//") {
                self.skip_line_comment();
                continue;
            }
            if self.starts_with("/*") {
                self.skip_block_comment();
                continue;
            }
            match self.peek() {
                Some('"') => self.skip_string('"')?,
                Some('\'') => self.skip_string('\'')?,
                Some(c) if c == open => {
                    depth += 1;
                    self.bump();
                }
                Some(c) if c == close => {
                    depth -= 1;
                    if depth == 0 {
                        let inner = self.src[inner_start..self.pos].to_string();
                        self.bump();
                        return Ok(inner);
                    }
                    self.bump();
                }
                _ => {
                    self.bump();
                }
            }
        }
        Err(RecipeError::TemplateParse(format!(
            "Unbalanced '{}' opened at line {}",
            open, line
        )))
    }

    /// Scans a balanced `{ ... }` block and returns it including both braces.
    pub(crate) fn parse_block(&mut self) -> RecipeResult<String> {
        let start = self.pos;
        self.parse_delimited('{', '}')?;
        Ok(self.src[start..self.pos].to_string())
    }

    /// Reads raw text up to the next top-level `;` (groups, strings and
    /// comments are skipped over) and consumes the `;`.
    pub(crate) fn parse_until_semicolon(&mut self) -> RecipeResult<String> {
        let start = self.pos;
        let line = self.line();
        let mut depth = 0usize;
        loop {
            if self.starts_with("//") {
                self.skip_line_comment();
                continue;
            }
            if self.starts_with("/*") {
                self.skip_block_comment();
                continue;
            }
            match self.peek() {
                None => {
                    return Err(RecipeError::TemplateParse(format!(
                        "Missing ';' after line {}",
                        line
                    )))
                }
                Some('"') => self.skip_string('"')?,
                Some('\'') => self.skip_string('\'')?,
                Some('(') | Some('{') | Some('[') => {
                    depth += 1;
                    self.bump();
                }
                Some(')') | Some('}') | Some(']') => {
                    if depth == 0 {
                        return Err(RecipeError::TemplateParse(format!(
                            "Unbalanced group near line {}",
                            self.line()
                        )));
                    }
                    depth -= 1;
                    self.bump();
                }
                Some(';') if depth == 0 => {
                    let text = self.src[start..self.pos].to_string();
                    self.bump();
                    return Ok(text);
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }
}
