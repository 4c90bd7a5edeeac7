//! CSS declaration walker
//!
//! A single-pass parser that extracts `property: value` declarations from
//! style rules, including rules nested inside at-rule blocks. Comments and
//! strings are tracked so their contents are never misread as declarations.
//! Selectors and at-rule preludes are skipped; only declarations are
//! surfaced to the rules.

use crate::diagnostic::{Location, Span};
use crate::plugin::ParseError;
use std::path::{Path, PathBuf};

/// A CSS declaration
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Property name, as written
    pub prop: String,
    /// Value text, trimmed
    pub value: String,
    /// Span of the property name
    pub prop_span: Span,
    /// Span of the trimmed value
    pub value_span: Span,
}

impl Declaration {
    /// Case-insensitive property comparison (CSS property names are
    /// case-insensitive)
    pub fn is_prop(&self, name: &str) -> bool {
        self.prop.eq_ignore_ascii_case(name)
    }
}

/// A parsed stylesheet
pub struct StyleSheet {
    source: String,
    decls: Vec<Declaration>,
    line_starts: Vec<usize>,
    path: PathBuf,
}

impl StyleSheet {
    /// Parse CSS content into a list of declarations
    pub fn parse(content: &str, path: &Path) -> Result<Self, ParseError> {
        let decls = Walker::new(content).walk();

        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Ok(Self {
            source: content.to_string(),
            decls,
            line_starts,
            path: path.to_path_buf(),
        })
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.decls
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Map a byte offset to (line, column), both 1-based
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let col = offset - self.line_starts.get(line.saturating_sub(1)).unwrap_or(&0) + 1;
        (line, col)
    }

    /// Build a diagnostic location for a span
    pub fn location(&self, span: Span) -> Location {
        let (line, col) = self.line_col(span.start);
        Location::new(self.path.clone(), line, col).with_length(span.len())
    }
}

/// Cursor-based walker over the stylesheet text
struct Walker<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
    token_start: Option<usize>,
    decls: Vec<Declaration>,
}

impl<'a> Walker<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
            token_start: None,
            decls: Vec::new(),
        }
    }

    fn cur(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.cur() {
            self.pos += c.len_utf8();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.src[self.pos..].starts_with(s)
    }

    fn skip_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.src.len() {
            if self.starts_with("*/") {
                self.pos += 2;
                return;
            }
            self.bump();
        }
    }

    fn skip_string(&mut self, quote: char) {
        self.bump();
        while let Some(c) = self.cur() {
            match c {
                '\\' => {
                    self.bump();
                    self.bump();
                }
                c if c == quote => {
                    self.bump();
                    return;
                }
                '\n' => return,
                _ => self.bump(),
            }
        }
    }

    fn walk(mut self) -> Vec<Declaration> {
        while let Some(c) = self.cur() {
            match c {
                '/' if self.starts_with("/*") => self.skip_comment(),
                '"' | '\'' => {
                    self.token_start = None;
                    self.skip_string(c);
                }
                '{' => {
                    self.depth += 1;
                    self.token_start = None;
                    self.bump();
                }
                '}' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.token_start = None;
                    self.bump();
                }
                ';' => {
                    self.token_start = None;
                    self.bump();
                }
                ':' if self.depth >= 1 && self.looks_like_property() => {
                    self.read_declaration();
                }
                c if c.is_whitespace() => self.bump(),
                _ => {
                    if self.token_start.is_none() {
                        self.token_start = Some(self.pos);
                    }
                    self.bump();
                }
            }
        }
        self.decls
    }

    /// Whether the accumulated token before a ':' is a property name rather
    /// than an at-rule prelude or media condition
    fn looks_like_property(&self) -> bool {
        let Some(start) = self.token_start else {
            return false;
        };
        let token = self.src[start..self.pos].trim();
        !token.is_empty() && !token.starts_with('@') && !token.contains('(')
    }

    /// Read a declaration at the cursor (positioned on the ':')
    fn read_declaration(&mut self) {
        let prop_raw_start = self.token_start.take().unwrap_or(self.pos);
        let prop_raw = &self.src[prop_raw_start..self.pos];
        let prop = prop_raw.trim_end();
        let prop_span = Span::new(prop_raw_start, prop_raw_start + prop.len());

        self.bump(); // ':'
        let value_raw_start = self.pos;
        let mut paren_depth = 0usize;

        loop {
            match self.cur() {
                None => break,
                Some('/') if self.starts_with("/*") => self.skip_comment(),
                Some(c @ ('"' | '\'')) => self.skip_string(c),
                Some('(') => {
                    paren_depth += 1;
                    self.bump();
                }
                Some(')') => {
                    paren_depth = paren_depth.saturating_sub(1);
                    self.bump();
                }
                Some(';') if paren_depth == 0 => break,
                Some('}') if paren_depth == 0 => break,
                Some(_) => self.bump(),
            }
        }

        let value_raw = &self.src[value_raw_start..self.pos];
        let trimmed = value_raw.trim();
        let lead = value_raw.len() - value_raw.trim_start().len();
        let value_span = Span::new(value_raw_start + lead, value_raw_start + lead + trimmed.len());

        self.decls.push(Declaration {
            prop: prop.to_string(),
            value: trimmed.to_string(),
            prop_span,
            value_span,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> StyleSheet {
        StyleSheet::parse(src, Path::new("test.css")).unwrap()
    }

    fn pairs(sheet: &StyleSheet) -> Vec<(&str, &str)> {
        sheet
            .declarations()
            .iter()
            .map(|d| (d.prop.as_str(), d.value.as_str()))
            .collect()
    }

    #[test]
    fn test_simple_declarations() {
        let sheet = parse(".card { color: #3B4960; margin: 0 auto; }");
        assert_eq!(
            pairs(&sheet),
            vec![("color", "#3B4960"), ("margin", "0 auto")]
        );
    }

    #[test]
    fn test_last_declaration_without_semicolon() {
        let sheet = parse(".a { color: red }");
        assert_eq!(pairs(&sheet), vec![("color", "red")]);
    }

    #[test]
    fn test_comments_skipped() {
        let sheet = parse("/* color: #FF0000; */ .a { /* note */ color: blue; }");
        assert_eq!(pairs(&sheet), vec![("color", "blue")]);
    }

    #[test]
    fn test_selectors_not_declarations() {
        let sheet = parse("a:hover { color: red; }\n.x::before { content: 'y'; }");
        assert_eq!(pairs(&sheet), vec![("color", "red"), ("content", "'y'")]);
    }

    #[test]
    fn test_media_query_nesting() {
        let src = "@media (max-width: 600px) { .a { color: red; } }";
        let sheet = parse(src);
        assert_eq!(pairs(&sheet), vec![("color", "red")]);
    }

    #[test]
    fn test_var_and_url_values() {
        let src = ".a { color: var(--color-primary); background: url('img;b.png'); }";
        let sheet = parse(src);
        assert_eq!(
            pairs(&sheet),
            vec![
                ("color", "var(--color-primary)"),
                ("background", "url('img;b.png')"),
            ]
        );
    }

    #[test]
    fn test_custom_property_declarations() {
        let sheet = parse(":root { --color-primary: #3B4960; }");
        assert_eq!(pairs(&sheet), vec![("--color-primary", "#3B4960")]);
    }

    #[test]
    fn test_value_span() {
        let src = ".a { color:   #FF0000; }";
        let sheet = parse(src);
        let decl = &sheet.declarations()[0];
        assert_eq!(&src[decl.value_span.start..decl.value_span.end], "#FF0000");
        assert_eq!(&src[decl.prop_span.start..decl.prop_span.end], "color");
    }

    #[test]
    fn test_location() {
        let src = ".a {\n  color: red;\n}\n";
        let sheet = parse(src);
        let decl = &sheet.declarations()[0];
        let loc = sheet.location(decl.prop_span);
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 3);
    }

    #[test]
    fn test_is_prop_case_insensitive() {
        let sheet = parse(".a { COLOR: red; }");
        assert!(sheet.declarations()[0].is_prop("color"));
    }
}
