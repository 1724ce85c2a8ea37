/// Position of a token or node in the template source.
///
/// `line` and `column` are 1-based and meant for humans; `start`/`end` are
/// byte offsets into the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

impl Location {
    /// Span from the start of `self` to the end of `other`.
    pub fn to(self, other: Location) -> Location {
        Location {
            line: self.line,
            column: self.column,
            start: self.start,
            end: other.end.max(self.start),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    TagOpen,      // <
    TagName,      // div
    AttrName,     // [value], (click), *if, class
    AttrEquals,   // =
    AttrValue,    // contents of the quotes
    TagClose,     // >
    TagSelfClose, // />
    TagEndOpen,   // </
    Text,
    Interpolation, // {{ expr }}
    Comment,       // <!-- ... -->
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub value: String,
    pub location: Location,
}

/// Tokenize a template. Never fails: malformed markup degrades to `Text`
/// tokens and the stream always ends with exactly one `Eof`.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    lexer.run();
    lexer.tokens
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

#[derive(Clone, Copy)]
struct Mark {
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn run(&mut self) {
        while self.pos < self.bytes.len() {
            if self.starts_with("<!--") {
                self.lex_comment();
            } else if self.starts_with("</") && self.peek_at(2).is_some_and(is_tag_start) {
                self.lex_end_tag();
            } else if self.at(b'<') && self.peek_at(1).is_some_and(is_tag_start) {
                self.lex_start_tag();
            } else if self.starts_with("{{") {
                self.lex_interpolation();
            } else {
                self.lex_text();
            }
        }
        let m = self.mark();
        self.push(TokenType::Eof, String::new(), m);
    }

    fn lex_text(&mut self) {
        let m = self.mark();
        // A lone `<` that does not open a tag is plain text.
        if self.at(b'<') {
            self.bump();
        }
        while self.pos < self.bytes.len() {
            if self.starts_with("{{") || self.at(b'<') {
                break;
            }
            self.bump();
        }
        let value = self.src[m.pos..self.pos].to_string();
        self.push(TokenType::Text, value, m);
    }

    fn lex_comment(&mut self) {
        let m = self.mark();
        match self.src[self.pos + 4..].find("-->") {
            Some(rel) => {
                let body_start = self.pos + 4;
                let body_end = body_start + rel;
                self.advance_to(body_end + 3);
                let value = self.src[body_start..body_end].to_string();
                self.push(TokenType::Comment, value, m);
            }
            None => {
                // unterminated comment: the rest of the input is text
                self.advance_to(self.bytes.len());
                let value = self.src[m.pos..].to_string();
                self.push(TokenType::Text, value, m);
            }
        }
    }

    fn lex_interpolation(&mut self) {
        let m = self.mark();
        match find_interpolation_end(self.src, self.pos + 2) {
            Some(end) => {
                let value = self.src[self.pos + 2..end].to_string();
                self.advance_to(end + 2);
                self.push(TokenType::Interpolation, value, m);
            }
            None => {
                self.advance_to(self.bytes.len());
                let value = self.src[m.pos..].to_string();
                self.push(TokenType::Text, value, m);
            }
        }
    }

    fn lex_end_tag(&mut self) {
        let m = self.mark();
        self.bump_n(2);
        self.push(TokenType::TagEndOpen, "</".into(), m);
        self.lex_tag_name();
        self.skip_ws();
        if self.at(b'>') {
            let m = self.mark();
            self.bump();
            self.push(TokenType::TagClose, ">".into(), m);
        }
    }

    fn lex_start_tag(&mut self) {
        let m = self.mark();
        self.bump();
        self.push(TokenType::TagOpen, "<".into(), m);
        self.lex_tag_name();

        loop {
            self.skip_ws();
            if self.pos >= self.bytes.len() {
                return;
            }
            if self.at(b'>') {
                let m = self.mark();
                self.bump();
                self.push(TokenType::TagClose, ">".into(), m);
                return;
            }
            if self.starts_with("/>") {
                let m = self.mark();
                self.bump_n(2);
                self.push(TokenType::TagSelfClose, "/>".into(), m);
                return;
            }
            if self.at(b'<') {
                // a new tag starts before this one was closed
                return;
            }
            if !self.lex_attribute() {
                // stray `/`, `=` or quote: skip a byte so the loop makes progress
                self.bump();
            }
        }
    }

    fn lex_tag_name(&mut self) {
        let m = self.mark();
        while let Some(b) = self.peek_at(0) {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':' || b == b'.' {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos > m.pos {
            let value = self.src[m.pos..self.pos].to_string();
            self.push(TokenType::TagName, value, m);
        }
    }

    fn lex_attribute(&mut self) -> bool {
        let m = self.mark();
        while let Some(b) = self.peek_at(0) {
            let ends = b.is_ascii_whitespace()
                || b == b'='
                || b == b'>'
                || b == b'<'
                || b == b'"'
                || b == b'\''
                || (b == b'/' && self.peek_at(1) == Some(b'>'));
            if ends {
                break;
            }
            self.bump();
        }
        if self.pos == m.pos {
            return false;
        }
        let name = self.src[m.pos..self.pos].to_string();
        self.push(TokenType::AttrName, name, m);

        let before_eq = self.mark();
        self.skip_ws();
        if !self.at(b'=') {
            self.reset(before_eq);
            return true;
        }
        let m = self.mark();
        self.bump();
        self.push(TokenType::AttrEquals, "=".into(), m);
        self.skip_ws();

        match self.peek_at(0) {
            Some(q @ (b'"' | b'\'')) => {
                let m = self.mark();
                self.bump();
                let start = self.pos;
                while let Some(b) = self.peek_at(0) {
                    if b == q {
                        break;
                    }
                    self.bump();
                }
                let value = self.src[start..self.pos].to_string();
                if self.at(q) {
                    self.bump();
                }
                self.push(TokenType::AttrValue, value, m);
            }
            Some(b) if !b.is_ascii_whitespace() && b != b'>' => {
                let m = self.mark();
                while let Some(b) = self.peek_at(0) {
                    if b.is_ascii_whitespace() || b == b'>' || (b == b'/' && self.peek_at(1) == Some(b'>')) {
                        break;
                    }
                    self.bump();
                }
                let value = self.src[m.pos..self.pos].to_string();
                self.push(TokenType::AttrValue, value, m);
            }
            _ => {}
        }
        true
    }

    fn skip_ws(&mut self) {
        while self.peek_at(0).is_some_and(|b| b.is_ascii_whitespace()) {
            self.bump();
        }
    }

    fn push(&mut self, kind: TokenType, value: String, m: Mark) {
        self.tokens.push(Token {
            kind,
            value,
            location: Location {
                line: m.line,
                column: m.column,
                start: m.pos,
                end: self.pos,
            },
        });
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn reset(&mut self, m: Mark) {
        self.pos = m.pos;
        self.line = m.line;
        self.column = m.column;
    }

    fn at(&self, b: u8) -> bool {
        self.peek_at(0) == Some(b)
    }

    fn peek_at(&self, off: usize) -> Option<u8> {
        self.bytes.get(self.pos + off).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.src[self.pos..].starts_with(s)
    }

    fn bump(&mut self) {
        let Some(ch) = self.src[self.pos..].chars().next() else {
            return;
        };
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn advance_to(&mut self, target: usize) {
        while self.pos < target && self.pos < self.bytes.len() {
            self.bump();
        }
    }
}

fn is_tag_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

// Finds the `}}` closing an interpolation, skipping string literals so that
// `{{ '}}' }}` stays one token.
fn find_interpolation_end(src: &str, from: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut i = from;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => {
                if b == b'"' || b == b'\'' || b == b'`' {
                    quote = Some(b);
                } else if b == b'}' && bytes.get(i + 1) == Some(&b'}') {
                    return Some(i);
                }
            }
        }
        i += 1;
    }
    // an unbalanced quote must not hide a real closer
    if quote.is_some() {
        return src[from..].find("}}").map(|rel| from + rel);
    }
    None
}
