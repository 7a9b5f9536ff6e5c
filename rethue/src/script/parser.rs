//! Parser: tokens → production tree + registry.
//!
//! ```text
//! program : prod*
//! prod    : NAME "=" prod                 alias
//!         | direct ("=>" prod)?           sequence, right-associative
//! direct  : "{" prod* "}"                 repeat
//!         | "[" prod* "]"                 once
//!         | REGEX "::=" prod              scoped rewrite
//!         | "~" prod                      output
//!         | ":::"                         input
//!         | STRING                        literal
//!         | NAME                          reference
//! ```
//!
//! `prod` is greedy on the right, so `/x/ ::= "a" => "b"` scopes the whole
//! sequence to the match, and `~ "a" => "b"` prints the sequence.
//!
//! Productions may nest at most [`MAX_NESTING`] deep, counting groups,
//! rewrite bodies, `~` operands and every `=>` link.

use super::lexer::{tokenize, Spanned, Token};
use crate::engine::{Production, Program, Registry};
use crate::error::CompileError;

/// Deepest allowed chain of nested productions.
pub const MAX_NESTING: usize = 256;

/// Compile source text into a runnable program.
///
/// The root is the alternation of the top-level productions.  Every alias,
/// at any depth, is registered by name; references are not checked here.
pub fn compile(src: &str) -> Result<Program, CompileError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        registry: Registry::new(),
    };
    let prods = parser.suite(None)?;
    Ok(Program::new(Production::alternation(prods), parser.registry))
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
    registry: Registry,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|s| &s.token)
    }

    fn next(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Error positioned at the current token, or just past the last one.
    fn error_here(&self, message: impl Into<String>) -> CompileError {
        let (line, col) = match self.tokens.get(self.pos).or(self.tokens.last()) {
            Some(s) => (s.line, s.col),
            None => (1, 1),
        };
        CompileError::Syntax {
            line,
            col,
            message: message.into(),
        }
    }

    /// Productions up to `close` (or end of input when `close` is `None`).
    fn suite(&mut self, close: Option<(&Token, &Spanned)>) -> Result<Vec<Production>, CompileError> {
        let mut prods = Vec::new();
        loop {
            match (self.peek(), close) {
                (None, None) => return Ok(prods),
                (None, Some((tok, open))) => {
                    return Err(CompileError::Syntax {
                        line: open.line,
                        col: open.col,
                        message: format!("unclosed {}", open.token.describe())
                            + &format!(", expected {}", tok.describe()),
                    });
                }
                (Some(t), Some((tok, _))) if t == tok => {
                    self.pos += 1;
                    return Ok(prods);
                }
                _ => prods.push(self.prod()?),
            }
        }
    }

    fn prod(&mut self) -> Result<Production, CompileError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_here(format!("productions nested more than {MAX_NESTING} deep")));
        }
        self.depth += 1;
        let prod = self.prod_at_depth();
        self.depth -= 1;
        prod
    }

    fn prod_at_depth(&mut self) -> Result<Production, CompileError> {
        if let (Some(Token::Name(name)), Some(Token::Equals)) = (self.peek(), self.peek_at(1)) {
            let name = name.clone();
            self.pos += 2;
            let def = self.prod()?;
            self.registry.define(name.clone(), def)?;
            return Ok(Production::Alias(name));
        }

        let first = self.direct()?;
        if self.peek() == Some(&Token::Arrow) {
            self.pos += 1;
            let rest = self.prod()?;
            return Ok(Production::sequence(first, rest));
        }
        Ok(first)
    }

    fn direct(&mut self) -> Result<Production, CompileError> {
        let Some(spanned) = self.next() else {
            return Err(self.error_here("unexpected end of input, expected a production"));
        };
        let prod = match &spanned.token {
            Token::LeftBrace => Production::repeat(self.suite(Some((&Token::RightBrace, &spanned)))?),
            Token::LeftBracket => Production::once(self.suite(Some((&Token::RightBracket, &spanned)))?),
            Token::Regex { src, case_insensitive } => {
                if self.peek() != Some(&Token::Rewrite) {
                    return Err(self.error_here(format!("expected `::=` after /{src}/")));
                }
                self.pos += 1;
                let inner = self.prod()?;
                Production::scoped(src, *case_insensitive, inner)?
            }
            Token::Tilde => Production::output(self.prod()?),
            Token::Input => Production::Input,
            Token::Str(s) => Production::literal(s)?,
            Token::Name(n) => Production::reference(n.clone()),
            other => {
                return Err(CompileError::Syntax {
                    line: spanned.line,
                    col: spanned.col,
                    message: format!("expected a production, found {}", other.describe()),
                });
            }
        };
        Ok(prod)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
