//! Lexical JS/JSX document model
//!
//! A single-pass scanner that extracts the constructs the script rules
//! inspect: string literals, template-literal chunks, JSX opening elements
//! with their attributes, and import declarations. It is a tokenizer, not a
//! full parser: it tracks comments, strings, templates and brace nesting, and
//! leaves everything else to the main scan loop. Regex literals are not
//! recognized, and JSX elements nested inside attribute expressions are not
//! collected (their string contents are).

use crate::diagnostic::{Location, Span};
use crate::plugin::ParseError;
use std::path::{Path, PathBuf};

/// A string literal, with cooked value and both the quoted and inner spans
#[derive(Debug, Clone)]
pub struct StrLit {
    /// Cooked value (escapes resolved)
    pub value: String,
    /// Span including the quotes
    pub span: Span,
    /// Span of the raw contents between the quotes
    pub content_span: Span,
}

/// One quasi of a template literal (the raw text between interpolations)
#[derive(Debug, Clone)]
pub struct TemplateChunk {
    /// Raw text as written (escapes preserved)
    pub raw: String,
    pub span: Span,
}

/// A JSX attribute value
#[derive(Debug, Clone)]
pub enum AttrValue {
    /// Static string literal; span includes the quotes
    Literal { value: String, span: Span },
    /// Expression container (`{...}`) - not inspected
    Expression,
}

/// A JSX attribute
#[derive(Debug, Clone)]
pub struct JsxAttr {
    pub name: String,
    pub value: Option<AttrValue>,
}

impl JsxAttr {
    /// The attribute's static string value, if it has one
    pub fn literal_value(&self) -> Option<(&str, Span)> {
        match &self.value {
            Some(AttrValue::Literal { value, span }) => Some((value.as_str(), *span)),
            _ => None,
        }
    }
}

/// A JSX opening element (capitalized components only)
#[derive(Debug, Clone)]
pub struct JsxElement {
    pub name: String,
    pub attrs: Vec<JsxAttr>,
    pub span: Span,
}

impl JsxElement {
    /// Find an attribute by name
    pub fn attr(&self, name: &str) -> Option<&JsxAttr> {
        self.attrs.iter().find(|a| a.name == name)
    }
}

/// A named import specifier; `span` covers the imported identifier
#[derive(Debug, Clone)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: String,
    pub span: Span,
}

/// An import declaration
#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub source: String,
    pub specifiers: Vec<ImportSpecifier>,
    pub span: Span,
}

/// A node surfaced to the script rules
#[derive(Debug, Clone)]
pub enum ScriptNode {
    StrLit(StrLit),
    TemplateChunk(TemplateChunk),
    JsxElement(JsxElement),
    ImportDecl(ImportDecl),
}

/// A scanned JS/JSX source file
pub struct ScriptDocument {
    source: String,
    nodes: Vec<ScriptNode>,
    line_starts: Vec<usize>,
    path: PathBuf,
}

impl ScriptDocument {
    /// Scan source content into a document
    pub fn parse(content: &str, path: &Path) -> Result<Self, ParseError> {
        let mut scanner = Scanner::new(content);
        scanner.scan();

        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Ok(Self {
            source: content.to_string(),
            nodes: scanner.nodes,
            line_starts,
            path: path.to_path_buf(),
        })
    }

    pub fn nodes(&self) -> &[ScriptNode] {
        &self.nodes
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Raw source text of a span
    pub fn slice(&self, span: Span) -> &str {
        &self.source[span.start..span.end.min(self.source.len())]
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

/// Single-pass scanner over the source text
struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    nodes: Vec<ScriptNode>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            nodes: Vec::new(),
        }
    }

    fn cur(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.cur()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn starts_with(&self, s: &str) -> bool {
        self.src[self.pos..].starts_with(s)
    }

    fn scan(&mut self) {
        while let Some(c) = self.cur() {
            match c {
                '/' if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment(),
                '"' | '\'' => {
                    self.scan_string();
                }
                '`' => self.scan_template(),
                '<' => self.try_scan_jsx(),
                'i' if self.at_keyword("import") => self.scan_import(),
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.src.len() {
            if self.starts_with("*/") {
                self.pos += 2;
                return;
            }
            self.bump();
        }
    }

    fn is_ident_start(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_' || c == '$'
    }

    fn is_ident_continue(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '$'
    }

    /// Check that the given keyword starts at the cursor on a word boundary
    fn at_keyword(&self, word: &str) -> bool {
        if !self.starts_with(word) {
            return false;
        }
        if self.pos > 0 {
            if let Some(prev) = self.src[..self.pos].chars().next_back() {
                if Self::is_ident_continue(prev) {
                    return false;
                }
            }
        }
        match self.src[self.pos + word.len()..].chars().next() {
            Some(next) => !Self::is_ident_continue(next),
            None => true,
        }
    }

    fn skip_ws(&mut self) {
        loop {
            match self.cur() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_at(1) == Some('*') => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    fn scan_ident(&mut self) -> Option<(String, Span)> {
        let start = self.pos;
        match self.cur() {
            Some(c) if Self::is_ident_start(c) => {
                self.bump();
            }
            _ => return None,
        }
        while let Some(c) = self.cur() {
            if Self::is_ident_continue(c) {
                self.bump();
            } else {
                break;
            }
        }
        Some((self.src[start..self.pos].to_string(), Span::new(start, self.pos)))
    }

    /// Scan a quoted string literal starting at the cursor and emit it.
    ///
    /// Lenient at line ends and EOF: the literal terminates there, since a
    /// linter should keep scanning past code it cannot fully tokenize.
    fn scan_string(&mut self) -> StrLit {
        let start = self.pos;
        let quote = self.bump().unwrap_or('"');
        let content_start = self.pos;
        let mut value = String::new();
        let content_end;

        loop {
            match self.cur() {
                None | Some('\n') => {
                    content_end = self.pos;
                    break;
                }
                Some('\\') => {
                    self.bump();
                    if let Some(escaped) = self.bump() {
                        value.push(match escaped {
                            'n' => '\n',
                            't' => '\t',
                            'r' => '\r',
                            other => other,
                        });
                    }
                }
                Some(c) if c == quote => {
                    content_end = self.pos;
                    self.bump();
                    break;
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }

        let lit = StrLit {
            value,
            span: Span::new(start, self.pos),
            content_span: Span::new(content_start, content_end),
        };
        self.nodes.push(ScriptNode::StrLit(lit.clone()));
        lit
    }

    /// Scan a template literal, emitting one chunk per quasi
    fn scan_template(&mut self) {
        self.bump(); // opening backtick
        let mut chunk_start = self.pos;

        loop {
            match self.cur() {
                None => {
                    self.emit_chunk(chunk_start, self.pos);
                    return;
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some('`') => {
                    self.emit_chunk(chunk_start, self.pos);
                    self.bump();
                    return;
                }
                Some('$') if self.peek_at(1) == Some('{') => {
                    self.emit_chunk(chunk_start, self.pos);
                    self.pos += 2;
                    self.skip_braced_expression(1);
                    chunk_start = self.pos;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn emit_chunk(&mut self, start: usize, end: usize) {
        self.nodes.push(ScriptNode::TemplateChunk(TemplateChunk {
            raw: self.src[start..end].to_string(),
            span: Span::new(start, end),
        }));
    }

    /// Skip a brace-balanced expression, emitting any literals found inside.
    /// `depth` counts braces already consumed.
    fn skip_braced_expression(&mut self, mut depth: usize) {
        while depth > 0 {
            match self.cur() {
                None => return,
                Some('{') => {
                    depth += 1;
                    self.bump();
                }
                Some('}') => {
                    depth -= 1;
                    self.bump();
                }
                Some('"') | Some('\'') => {
                    self.scan_string();
                }
                Some('`') => self.scan_template(),
                Some('/') if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_at(1) == Some('*') => self.skip_block_comment(),
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Scan an import declaration and emit it together with its literals.
    ///
    /// Dynamic `import(...)` and structurally surprising declarations emit
    /// nothing; literals already scanned along the way are kept, and the main
    /// loop resumes from wherever scanning stopped.
    fn scan_import(&mut self) {
        let start = self.pos;
        self.pos += "import".len();
        self.skip_ws();

        match self.cur() {
            // dynamic import call - not a declaration
            Some('(') => return,
            // side-effect import: import './styles.css'
            Some('"') | Some('\'') => {
                let source = self.scan_string();
                self.nodes.push(ScriptNode::ImportDecl(ImportDecl {
                    source: source.value,
                    specifiers: Vec::new(),
                    span: Span::new(start, self.pos),
                }));
                return;
            }
            _ => {}
        }

        let mut specifiers = Vec::new();

        // default import
        if self.cur().map(Self::is_ident_start).unwrap_or(false) {
            self.scan_ident();
            self.skip_ws();
            if self.cur() == Some(',') {
                self.bump();
                self.skip_ws();
            }
        }

        // namespace import: * as ns
        if self.cur() == Some('*') {
            self.bump();
            self.skip_ws();
            if self.at_keyword("as") {
                self.pos += 2;
                self.skip_ws();
                self.scan_ident();
            }
            self.skip_ws();
        }

        // named specifiers: { A, B as C }
        if self.cur() == Some('{') {
            self.bump();
            loop {
                self.skip_ws();
                match self.cur() {
                    Some('}') => {
                        self.bump();
                        break;
                    }
                    Some(',') => {
                        self.bump();
                    }
                    Some(c) if Self::is_ident_start(c) => {
                        let Some((imported, span)) = self.scan_ident() else {
                            return;
                        };
                        self.skip_ws();
                        let local = if self.at_keyword("as") {
                            self.pos += 2;
                            self.skip_ws();
                            match self.scan_ident() {
                                Some((name, _)) => name,
                                None => return,
                            }
                        } else {
                            imported.clone()
                        };
                        specifiers.push(ImportSpecifier {
                            imported,
                            local,
                            span,
                        });
                    }
                    _ => return,
                }
            }
            self.skip_ws();
        }

        if !self.at_keyword("from") {
            return;
        }
        self.pos += "from".len();
        self.skip_ws();

        if !matches!(self.cur(), Some('"') | Some('\'')) {
            return;
        }
        let source = self.scan_string();

        self.nodes.push(ScriptNode::ImportDecl(ImportDecl {
            source: source.value,
            specifiers,
            span: Span::new(start, self.pos),
        }));
    }

    /// Attempt to scan a JSX opening element for a capitalized component.
    ///
    /// Tentative: anything that stops looking like a tag (e.g. a `<`
    /// comparison against a capitalized identifier) abandons the element
    /// without emitting it. Scanning never rewinds, so literals collected on
    /// the way are emitted exactly once.
    fn try_scan_jsx(&mut self) {
        let start = self.pos;
        if !self.peek_at(1).map(|c| c.is_ascii_uppercase()).unwrap_or(false) {
            self.bump();
            return;
        }

        self.bump(); // '<'
        let mut name = String::new();
        while let Some(c) = self.cur() {
            if Self::is_ident_continue(c) || c == '.' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let mut attrs = Vec::new();
        loop {
            self.skip_ws();
            match self.cur() {
                Some('>') => {
                    self.bump();
                    break;
                }
                Some('/') if self.peek_at(1) == Some('>') => {
                    self.pos += 2;
                    break;
                }
                // spread attribute: {...props}
                Some('{') => {
                    self.bump();
                    self.skip_braced_expression(1);
                }
                Some(c) if Self::is_ident_start(c) => {
                    let Some((attr_name, _)) = self.scan_ident() else {
                        return;
                    };
                    // attribute names may be kebab-case (aria-*, data-*)
                    let mut attr_name = attr_name;
                    while self.cur() == Some('-') {
                        attr_name.push('-');
                        self.bump();
                        if let Some((rest, _)) = self.scan_ident() {
                            attr_name.push_str(&rest);
                        }
                    }
                    self.skip_ws();
                    let value = if self.cur() == Some('=') {
                        self.bump();
                        self.skip_ws();
                        match self.cur() {
                            Some('"') | Some('\'') => {
                                let lit = self.scan_string();
                                Some(AttrValue::Literal {
                                    value: lit.value,
                                    span: lit.span,
                                })
                            }
                            Some('{') => {
                                self.bump();
                                self.skip_braced_expression(1);
                                Some(AttrValue::Expression)
                            }
                            // not a tag after all
                            _ => return,
                        }
                    } else {
                        None
                    };
                    attrs.push(JsxAttr {
                        name: attr_name,
                        value,
                    });
                }
                // comparison or malformed markup - abandon without emitting
                _ => return,
            }
        }

        self.nodes.push(ScriptNode::JsxElement(JsxElement {
            name,
            attrs,
            span: Span::new(start, self.pos),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> ScriptDocument {
        ScriptDocument::parse(src, Path::new("test.jsx")).unwrap()
    }

    fn string_values(doc: &ScriptDocument) -> Vec<&str> {
        doc.nodes()
            .iter()
            .filter_map(|n| match n {
                ScriptNode::StrLit(lit) => Some(lit.value.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_string_literals() {
        let doc = parse(r#"const a = 'hello'; const b = "world";"#);
        assert_eq!(string_values(&doc), vec!["hello", "world"]);
    }

    #[test]
    fn test_string_escapes() {
        let doc = parse(r#"const a = 'it\'s \n fine';"#);
        assert_eq!(string_values(&doc), vec!["it's \n fine"]);
    }

    #[test]
    fn test_string_spans() {
        let src = r#"x('#FF0000')"#;
        let doc = parse(src);
        let ScriptNode::StrLit(lit) = &doc.nodes()[0] else {
            panic!("expected string literal");
        };
        assert_eq!(doc.slice(lit.span), "'#FF0000'");
        assert_eq!(doc.slice(lit.content_span), "#FF0000");
    }

    #[test]
    fn test_comments_skipped() {
        let doc = parse("// 'not a string'\n/* \"neither\" */ const a = 'real';");
        assert_eq!(string_values(&doc), vec!["real"]);
    }

    #[test]
    fn test_template_chunks() {
        let doc = parse("const s = `color: ${color}; background: #FFF`;");
        let chunks: Vec<&str> = doc
            .nodes()
            .iter()
            .filter_map(|n| match n {
                ScriptNode::TemplateChunk(c) => Some(c.raw.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(chunks, vec!["color: ", "; background: #FFF"]);
    }

    #[test]
    fn test_template_nested_string() {
        let doc = parse("const s = `a ${fn('#ABCDEF')} b`;");
        assert_eq!(string_values(&doc), vec!["#ABCDEF"]);
    }

    #[test]
    fn test_import_named() {
        let doc = parse("import { TrendingUp, Delete as Trash } from '@mui/icons-material';");
        let ScriptNode::ImportDecl(decl) = doc
            .nodes()
            .iter()
            .find(|n| matches!(n, ScriptNode::ImportDecl(_)))
            .unwrap()
        else {
            unreachable!()
        };
        assert_eq!(decl.source, "@mui/icons-material");
        assert_eq!(decl.specifiers.len(), 2);
        assert_eq!(decl.specifiers[0].imported, "TrendingUp");
        assert_eq!(decl.specifiers[0].local, "TrendingUp");
        assert_eq!(decl.specifiers[1].imported, "Delete");
        assert_eq!(decl.specifiers[1].local, "Trash");
        assert_eq!(doc.slice(decl.specifiers[0].span), "TrendingUp");
    }

    #[test]
    fn test_import_default_and_named() {
        let doc = parse("import React, { useState } from 'react';");
        let ScriptNode::ImportDecl(decl) = doc
            .nodes()
            .iter()
            .find(|n| matches!(n, ScriptNode::ImportDecl(_)))
            .unwrap()
        else {
            unreachable!()
        };
        assert_eq!(decl.source, "react");
        assert_eq!(decl.specifiers.len(), 1);
        assert_eq!(decl.specifiers[0].imported, "useState");
    }

    #[test]
    fn test_import_side_effect() {
        let doc = parse("import './styles/design-tokens.css';");
        let ScriptNode::ImportDecl(decl) = doc
            .nodes()
            .iter()
            .find(|n| matches!(n, ScriptNode::ImportDecl(_)))
            .unwrap()
        else {
            unreachable!()
        };
        assert_eq!(decl.source, "./styles/design-tokens.css");
        assert!(decl.specifiers.is_empty());
    }

    #[test]
    fn test_dynamic_import_ignored() {
        let doc = parse("const mod = import('./lazy');");
        assert!(!doc
            .nodes()
            .iter()
            .any(|n| matches!(n, ScriptNode::ImportDecl(_))));
        // the argument is still a plain string literal
        assert_eq!(string_values(&doc), vec!["./lazy"]);
    }

    #[test]
    fn test_jsx_element_attrs() {
        let doc = parse(r#"<Button variant="outlined" disabled onClick={handler}>Save</Button>"#);
        let ScriptNode::JsxElement(el) = doc
            .nodes()
            .iter()
            .find(|n| matches!(n, ScriptNode::JsxElement(_)))
            .unwrap()
        else {
            unreachable!()
        };
        assert_eq!(el.name, "Button");
        assert_eq!(el.attrs.len(), 3);
        let (value, span) = el.attr("variant").unwrap().literal_value().unwrap();
        assert_eq!(value, "outlined");
        assert_eq!(doc.slice(span), "\"outlined\"");
        assert!(el.attr("disabled").unwrap().value.is_none());
        assert!(matches!(
            el.attr("onClick").unwrap().value,
            Some(AttrValue::Expression)
        ));
    }

    #[test]
    fn test_jsx_sx_expression_strings() {
        let doc = parse(r#"<Card sx={{ color: '#FF0000', border: 1 }} />"#);
        assert_eq!(string_values(&doc), vec!["#FF0000"]);
        let el = doc
            .nodes()
            .iter()
            .find_map(|n| match n {
                ScriptNode::JsxElement(el) => Some(el),
                _ => None,
            })
            .unwrap();
        assert_eq!(el.name, "Card");
        assert!(matches!(
            el.attr("sx").unwrap().value,
            Some(AttrValue::Expression)
        ));
    }

    #[test]
    fn test_lowercase_tags_not_collected() {
        let doc = parse(r#"<div className="wrapper"><Button variant="text"/></div>"#);
        let elements: Vec<&str> = doc
            .nodes()
            .iter()
            .filter_map(|n| match n {
                ScriptNode::JsxElement(el) => Some(el.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(elements, vec!["Button"]);
        // the div's attribute string is still visible to literal rules
        assert!(string_values(&doc).contains(&"wrapper"));
    }

    #[test]
    fn test_less_than_comparison_not_an_element() {
        let doc = parse("if (a < Button) { run('x'); }");
        assert!(!doc
            .nodes()
            .iter()
            .any(|n| matches!(n, ScriptNode::JsxElement(_))));
        assert_eq!(string_values(&doc), vec!["x"]);
    }

    #[test]
    fn test_line_col_mapping() {
        let doc = parse("const a = 1;\nconst b = 'two';\n");
        let ScriptNode::StrLit(lit) = &doc.nodes()[0] else {
            panic!("expected string literal");
        };
        let loc = doc.location(lit.span);
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 11);
        assert_eq!(loc.length, "'two'".len());
    }
}
