//! Getter and method bodies, split into top-level statements.
//!
//! The generators only need to know whether a body is a lone `return expr;`
//! (which inlines as an expression) or anything else (which keeps its block).
//! Statements are split on `;` and closing braces at nesting depth zero,
//! ignoring everything inside string, template and comment text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Return,
    VarDecl,
    If,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    /// Statement text without its terminating `;`.
    pub text: String,
}

impl Statement {
    /// The returned expression of a `return expr` statement.
    pub fn return_value(&self) -> Option<&str> {
        if self.kind != StatementKind::Return {
            return None;
        }
        let rest = self.text.trim_start()["return".len()..].trim();
        (!rest.is_empty()).then_some(rest)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyShape {
    /// The body is `return <expr>;` and nothing else.
    Expression(String),
    Block(String),
}

pub fn body_shape(body: &str) -> BodyShape {
    let statements = split_statements(body);
    if let [only] = statements.as_slice() {
        if let Some(value) = only.return_value() {
            return BodyShape::Expression(value.to_string());
        }
    }
    BodyShape::Block(body.trim().to_string())
}

pub fn split_statements(body: &str) -> Vec<Statement> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;

    for (i, c) in CodeChars::new(body) {
        match c {
            '{' | '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let rest = body[i + 1..].trim_start();
                    let continue_after_brace = ["else", "catch", "finally"]
                        .iter()
                        .any(|kw| starts_with_word(rest, kw));
                    let head = body[start..=i].trim_start();
                    let block_statement = ["if", "for", "while", "switch", "try", "do", "function"]
                        .iter()
                        .any(|kw| starts_with_word(head, kw))
                        || head.starts_with('{');
                    if block_statement && !continue_after_brace && !rest.starts_with(';') {
                        push_statement(&mut out, &body[start..=i]);
                        start = i + 1;
                    }
                }
            }
            ';' if depth == 0 => {
                push_statement(&mut out, &body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_statement(&mut out, &body[start..]);
    out
}

fn push_statement(out: &mut Vec<Statement>, text: &str) {
    let text = strip_comments(text);
    let t = text.trim();
    if t.is_empty() {
        return;
    }
    let kind = if starts_with_word(t, "return") {
        StatementKind::Return
    } else if ["const", "let", "var"].iter().any(|kw| starts_with_word(t, kw)) {
        StatementKind::VarDecl
    } else if starts_with_word(t, "if") {
        StatementKind::If
    } else {
        StatementKind::Other
    };
    out.push(Statement {
        kind,
        text: t.to_string(),
    });
}

fn starts_with_word(s: &str, word: &str) -> bool {
    s.strip_prefix(word)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$'))
}

/// Remove `this.` member access prefixes from code, leaving strings alone.
pub fn strip_this(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut last = 0;
    for (i, c) in CodeChars::new(code) {
        let boundary = code[..i]
            .chars()
            .next_back()
            .is_none_or(|p| !(p.is_ascii_alphanumeric() || p == '_' || p == '$' || p == '.'));
        if c == 't' && boundary && code[i..].starts_with("this.") {
            out.push_str(&code[last..i]);
            last = i + "this.".len();
        }
    }
    out.push_str(&code[last..]);
    out
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut iter = CodeChars::new(text);
    while let Some((i, _)) = iter.next() {
        if let Some(end) = iter.take_comment_end(i) {
            out.push_str(&text[last..i]);
            last = end;
        }
    }
    out.push_str(&text[last..]);
    out
}

#[derive(Clone, Copy)]
enum Mode {
    Code,
    Single,
    Double,
    Template,
    LineComment,
    BlockComment,
}

/// Iterates the characters of JavaScript source that are code, skipping
/// string, template and comment text. Template substitutions are code.
struct CodeChars<'a> {
    src: &'a str,
    pos: usize,
    stack: Vec<(Mode, usize)>,
    comment: Option<(usize, usize)>,
}

impl<'a> CodeChars<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            stack: vec![(Mode::Code, 0)],
            comment: None,
        }
    }

    /// When the code char at `at` opened a comment, the byte offset where
    /// that comment ends.
    fn take_comment_end(&mut self, at: usize) -> Option<usize> {
        match self.comment.take() {
            Some((start, end)) if start == at => Some(end),
            other => {
                self.comment = other;
                None
            }
        }
    }
}

impl Iterator for CodeChars<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<(usize, char)> {
        loop {
            let rest = &self.src[self.pos..];
            let c = rest.chars().next()?;
            let i = self.pos;
            self.pos += c.len_utf8();
            let (mode, braces) = *self.stack.last()?;
            match mode {
                Mode::Code => {
                    match c {
                        '\'' => self.stack.push((Mode::Single, 0)),
                        '"' => self.stack.push((Mode::Double, 0)),
                        '`' => self.stack.push((Mode::Template, 0)),
                        '/' if rest.starts_with("//") => {
                            self.stack.push((Mode::LineComment, 0));
                            self.pos += 1;
                            let end = self.src[i..].find('\n').map_or(self.src.len(), |n| i + n);
                            self.comment = Some((i, end));
                            return Some((i, c));
                        }
                        '/' if rest.starts_with("/*") => {
                            self.stack.push((Mode::BlockComment, 0));
                            self.pos += 1;
                            let end = self.src[i + 2..].find("*/").map_or(self.src.len(), |n| i + 2 + n + 2);
                            self.comment = Some((i, end));
                            return Some((i, c));
                        }
                        '{' if self.stack.len() > 1 => {
                            if let Some(top) = self.stack.last_mut() {
                                top.1 += 1;
                            }
                            return Some((i, c));
                        }
                        '}' if self.stack.len() > 1 => {
                            if braces == 0 {
                                // end of a template substitution
                                self.stack.pop();
                                continue;
                            }
                            if let Some(top) = self.stack.last_mut() {
                                top.1 -= 1;
                            }
                            return Some((i, c));
                        }
                        _ => return Some((i, c)),
                    }
                    // a string or template opener is not code itself
                }
                Mode::Single | Mode::Double => {
                    let quote = if matches!(mode, Mode::Single) { '\'' } else { '"' };
                    if c == '\\' {
                        if let Some(n) = self.src[self.pos..].chars().next() {
                            self.pos += n.len_utf8();
                        }
                    } else if c == quote || c == '\n' {
                        self.stack.pop();
                    }
                }
                Mode::Template => {
                    if c == '\\' {
                        if let Some(n) = self.src[self.pos..].chars().next() {
                            self.pos += n.len_utf8();
                        }
                    } else if c == '`' {
                        self.stack.pop();
                    } else if c == '$' && self.src[self.pos..].starts_with('{') {
                        self.pos += 1;
                        self.stack.push((Mode::Code, 0));
                    }
                }
                Mode::LineComment => {
                    if c == '\n' {
                        self.stack.pop();
                    }
                }
                Mode::BlockComment => {
                    if c == '*' && self.src[self.pos..].starts_with('/') {
                        self.pos += 1;
                        self.stack.pop();
                    }
                }
            }
        }
    }
}
