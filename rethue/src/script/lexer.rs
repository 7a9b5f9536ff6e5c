//! Tokenizer for rethue source.
//!
//! ## Quirks
//!
//! - String tokens keep their escape sequences verbatim; the literal's
//!   template compiler interprets them.  Regex tokens do the same, except
//!   that `\/` is unescaped to `/` since the delimiter is not regex syntax.
//! - An `r` prefix on a string or regex is accepted and ignored: every
//!   literal is already raw at this level.
//! - A regex may be followed directly by `i` for case-insensitive matching.
//! - `#` starts a comment that runs to the end of the line.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::CompileError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Name(String),
    Str(String),
    Regex { src: String, case_insensitive: bool },
    /// `=`
    Equals,
    /// `=>`
    Arrow,
    /// `::=`
    Rewrite,
    /// `:::`
    Input,
    /// `~`
    Tilde,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
}

impl Token {
    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self {
            Token::Name(n) => format!("name `{n}`"),
            Token::Str(s) => format!("string {s:?}"),
            Token::Regex { src, .. } => format!("regex /{src}/"),
            Token::Equals => "`=`".to_owned(),
            Token::Arrow => "`=>`".to_owned(),
            Token::Rewrite => "`::=`".to_owned(),
            Token::Input => "`:::`".to_owned(),
            Token::Tilde => "`~`".to_owned(),
            Token::LeftBrace => "`{`".to_owned(),
            Token::RightBrace => "`}`".to_owned(),
            Token::LeftBracket => "`[`".to_owned(),
            Token::RightBracket => "`]`".to_owned(),
        }
    }
}

/// A token and where it starts (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

/// Split `src` into tokens.
pub fn tokenize(src: &str) -> Result<Vec<Spanned>, CompileError> {
    let mut lexer = Lexer {
        chars: src.chars().peekable(),
        line: 1,
        col: 1,
    };
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next_token()? {
        tokens.push(tok);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Lexer<'_> {
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn error(&self, line: usize, col: usize, message: impl Into<String>) -> CompileError {
        CompileError::Syntax {
            line,
            col,
            message: message.into(),
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while self.chars.peek().is_some_and(|&c| c != '\n') {
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Spanned>, CompileError> {
        self.skip_trivia();
        let (line, col) = (self.line, self.col);
        let Some(c) = self.bump() else {
            return Ok(None);
        };

        let token = match c {
            '{' => Token::LeftBrace,
            '}' => Token::RightBrace,
            '[' => Token::LeftBracket,
            ']' => Token::RightBracket,
            '~' => Token::Tilde,
            '=' => {
                if self.chars.peek() == Some(&'>') {
                    self.bump();
                    Token::Arrow
                } else {
                    Token::Equals
                }
            }
            ':' => {
                if self.bump() != Some(':') {
                    return Err(self.error(line, col, "expected `::=` or `:::`"));
                }
                match self.bump() {
                    Some('=') => Token::Rewrite,
                    Some(':') => Token::Input,
                    _ => return Err(self.error(line, col, "expected `::=` or `:::`")),
                }
            }
            '"' | '\'' => Token::Str(self.quoted(c, line, col)?),
            '/' => self.regex(line, col)?,
            'r' if matches!(self.chars.peek(), Some('"' | '\'' | '/')) => {
                match self.bump() {
                    Some('/') => self.regex(line, col)?,
                    Some(q) => Token::Str(self.quoted(q, line, col)?),
                    None => unreachable!("peeked a delimiter"),
                }
            }
            c if is_ident_start(c) => {
                let mut name = String::from(c);
                while let Some(&nc) = self.chars.peek() {
                    if !is_ident_continue(nc) {
                        break;
                    }
                    name.push(nc);
                    self.bump();
                }
                Token::Name(name)
            }
            other => return Err(self.error(line, col, format!("unexpected character {other:?}"))),
        };

        Ok(Some(Spanned { token, line, col }))
    }

    /// Body of a delimited literal, after the opening delimiter.  Escapes
    /// are kept as written; a literal may not span lines.
    fn delimited(&mut self, close: char, line: usize, col: usize, what: &str) -> Result<String, CompileError> {
        let mut body = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error(line, col, format!("unterminated {what}"))),
                Some(c) if c == close => return Ok(body),
                Some('\\') => match self.bump() {
                    None | Some('\n') => {
                        return Err(self.error(line, col, format!("unterminated {what}")));
                    }
                    Some(e) => {
                        body.push('\\');
                        body.push(e);
                    }
                },
                Some(c) => body.push(c),
            }
        }
    }

    fn quoted(&mut self, quote: char, line: usize, col: usize) -> Result<String, CompileError> {
        self.delimited(quote, line, col, "string")
    }

    fn regex(&mut self, line: usize, col: usize) -> Result<Token, CompileError> {
        let src = self.delimited('/', line, col, "regex")?.replace("\\/", "/");
        let mut case_insensitive = false;
        if self.chars.peek() == Some(&'i') {
            // Only a flag if it isn't the start of a name.
            let mut ahead = self.chars.clone();
            ahead.next();
            if !ahead.peek().copied().is_some_and(is_ident_continue) {
                self.bump();
                case_insensitive = true;
            }
        }
        Ok(Token::Regex { src, case_insensitive })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
