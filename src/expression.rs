//! Expression AST and the token-stream parser.
//!
//! Grammar, per `${...}` run:
//!
//! ```text
//! expression    := literal | path-ref | function-call
//! function-call := IDENTIFIER '(' (argument (',' argument)*)? ')'
//! argument      := expression | nested `${...}` run
//! ```
//!
//! Parsing is best-effort. Malformed bodies yield whatever parses and the
//! cursor resynchronizes at the closing `}` (or end of input), so broken
//! declarative content degrades instead of erroring.

use serde_json::Value;

use crate::context::Scope;
use crate::lexer::{Token, TokenKind};
use crate::store;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// Path reference, raw (pointer escapes intact, may be relative).
    Path(String),
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

/// One piece of a parsed template: literal text or an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    Expr(Expr),
}

/// Parse a token stream into its ordered parts.
pub fn parse_parts(tokens: &[Token]) -> Vec<Part> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut cursor = Cursor::new(tokens);
    let mut parts = Vec::new();
    loop {
        match cursor.peek_kind() {
            TokenKind::Eof => break,
            TokenKind::Text => {
                let text = cursor.bump().value.clone();
                parts.push(Part::Text(text));
            }
            TokenKind::ExprStart => {
                cursor.bump();
                if let Some(expr) = cursor.parse_expression() {
                    parts.push(Part::Expr(expr));
                }
                cursor.close_expression();
            }
            _ => {
                cursor.bump();
            }
        }
    }
    parts
}

/// Evaluate one expression against the model and scope.
///
/// `None` means absent: a path that resolves to nothing, or a function
/// call. Interpolation never executes function bodies; named functions run
/// only inside the validation engine.
pub fn eval(expr: &Expr, model: &Value, scope: &Scope) -> Option<Value> {
    match expr {
        Expr::Literal(v) => Some(v.clone()),
        Expr::Path(p) => store::get(model, &scope.resolve(p)).cloned(),
        Expr::Call { name, .. } => {
            tracing::trace!(name = name.as_str(), "interpolation call resolves to absent");
            None
        }
    }
}

struct Cursor<'a> {
    tokens: &'a [Token],
    i: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, i: 0 }
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.i)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn bump(&mut self) -> &'a Token {
        let token = &self.tokens[self.i.min(self.tokens.len() - 1)];
        if self.i < self.tokens.len() {
            self.i += 1;
        }
        token
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_expression(&mut self) -> Option<Expr> {
        match self.peek_kind() {
            TokenKind::Str => {
                let value = self.bump().value.clone();
                Some(Expr::Literal(Value::String(value)))
            }
            TokenKind::Number => {
                let raw = self.bump().value.clone();
                Some(Expr::Literal(parse_number(&raw)))
            }
            TokenKind::Boolean => {
                let raw = self.bump().value.clone();
                Some(Expr::Literal(Value::Bool(raw == "true")))
            }
            TokenKind::Path => {
                let path = self.bump().value.clone();
                Some(Expr::Path(path))
            }
            TokenKind::Identifier => {
                let name = self.bump().value.clone();
                self.parse_call(name)
            }
            // A nested `${...}` run stands for its own raw value.
            TokenKind::ExprStart => {
                self.bump();
                let inner = self.parse_expression();
                self.consume(TokenKind::ExprEnd);
                inner
            }
            _ => None,
        }
    }

    fn parse_call(&mut self, name: String) -> Option<Expr> {
        if !self.consume(TokenKind::LParen) {
            // The lexer only classifies an identifier when `(` follows, so
            // this is unreachable input; degrade to a path reference.
            return Some(Expr::Path(name));
        }
        let mut args = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::RParen => {
                    self.bump();
                    break;
                }
                // Unterminated argument list closes implicitly.
                TokenKind::Eof | TokenKind::ExprEnd => break,
                TokenKind::Comma => {
                    self.bump();
                }
                _ => match self.parse_expression() {
                    Some(arg) => args.push(arg),
                    None => {
                        self.bump();
                    }
                },
            }
        }
        Some(Expr::Call { name, args })
    }

    /// Skip to just past this expression's closing `}`, accounting for any
    /// unconsumed nested starts.
    fn close_expression(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek_kind() {
                TokenKind::Eof => break,
                TokenKind::ExprStart => {
                    self.bump();
                    depth += 1;
                }
                TokenKind::ExprEnd => {
                    self.bump();
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {
                    self.bump();
                }
            }
        }
    }
}

fn parse_number(raw: &str) -> Value {
    if raw.contains('.') {
        raw.parse::<f64>().map(Value::from).unwrap_or(Value::Null)
    } else {
        raw.parse::<i64>().map(Value::from).unwrap_or(Value::Null)
    }
}
