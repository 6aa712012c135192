//! Predicate expressions for `{% if %}` / `{% elif %}` tags
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! or_expr  := and_expr ("or" and_expr)*
//! and_expr := not_expr ("and" not_expr)*
//! not_expr := "not" not_expr | atom
//! atom     := "(" or_expr ")" | operand (("==" | "!=") operand)?
//! operand  := dotted.name | 'string' | "string" | integer | true | false
//! ```

use super::helpers::{is_truthy, resolve_key, stringify_scalar};
use super::TemplateContext;
use crate::template::error::TemplateError;

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Dotted context key
    Variable(String),
    /// Literal compared by its text form
    Literal(String),
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
}

/// Boolean predicate over context variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Bare variable: non-empty string, non-zero number, `true`, non-empty collection
    Truthy(String),
    /// `true` / `false` literal
    Constant(bool),
    Compare {
        left: Operand,
        op: CompareOp,
        right: Operand,
    },
    Not(Box<Predicate>),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    /// Parse predicate source (the text after `if` / `elif`)
    pub(crate) fn parse(source: &str, line: usize) -> Result<Self, TemplateError> {
        let tokens = lex(source, line)?;
        let mut parser = PredicateParser {
            tokens: &tokens,
            pos: 0,
            source,
            line,
        };

        let predicate = parser.or_expr()?;
        if parser.pos != tokens.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(predicate)
    }

    /// Evaluate against a context; every referenced key must already be known to exist
    pub(crate) fn evaluate(
        &self,
        context: &TemplateContext,
        line: usize,
    ) -> Result<bool, TemplateError> {
        match self {
            Predicate::Truthy(key) => {
                let value = resolve_key(context.data(), key).ok_or_else(|| {
                    TemplateError::UndefinedVariable {
                        key: key.clone(),
                        line,
                    }
                })?;
                Ok(is_truthy(value))
            }
            Predicate::Constant(value) => Ok(*value),
            Predicate::Compare { left, op, right } => {
                let left = operand_text(left, context, line)?;
                let right = operand_text(right, context, line)?;
                Ok(match op {
                    CompareOp::Eq => left == right,
                    CompareOp::NotEq => left != right,
                })
            }
            Predicate::Not(inner) => Ok(!inner.evaluate(context, line)?),
            Predicate::And(lhs, rhs) => {
                Ok(lhs.evaluate(context, line)? && rhs.evaluate(context, line)?)
            }
            Predicate::Or(lhs, rhs) => {
                Ok(lhs.evaluate(context, line)? || rhs.evaluate(context, line)?)
            }
        }
    }

    /// Collect referenced keys in left-to-right order
    pub(crate) fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::Truthy(key) => out.push(key),
            Predicate::Constant(_) => {}
            Predicate::Compare { left, right, .. } => {
                for operand in [left, right] {
                    if let Operand::Variable(key) = operand {
                        out.push(key);
                    }
                }
            }
            Predicate::Not(inner) => inner.collect_variables(out),
            Predicate::And(lhs, rhs) | Predicate::Or(lhs, rhs) => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
        }
    }
}

fn operand_text(
    operand: &Operand,
    context: &TemplateContext,
    line: usize,
) -> Result<String, TemplateError> {
    match operand {
        Operand::Literal(text) => Ok(text.clone()),
        Operand::Variable(key) => {
            let value = resolve_key(context.data(), key).ok_or_else(|| {
                TemplateError::UndefinedVariable {
                    key: key.clone(),
                    line,
                }
            })?;
            stringify_scalar(value, key, line)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PredToken {
    Ident(String),
    Literal(String),
    Eq,
    NotEq,
    LParen,
    RParen,
    And,
    Or,
    Not,
    True,
    False,
}

fn lex(source: &str, line: usize) -> Result<Vec<PredToken>, TemplateError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(PredToken::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(PredToken::RParen);
            }
            '=' | '!' => {
                chars.next();
                match chars.next() {
                    Some((_, '=')) if c == '=' => tokens.push(PredToken::Eq),
                    Some((_, '=')) => tokens.push(PredToken::NotEq),
                    _ => {
                        return Err(TemplateError::malformed(
                            format!("expected '{}=' in predicate '{}'", c, source),
                            line,
                        ))
                    }
                }
            }
            '\'' | '"' => {
                chars.next();
                let mut literal = String::new();
                let mut closed = false;
                for (_, ch) in chars.by_ref() {
                    if ch == c {
                        closed = true;
                        break;
                    }
                    literal.push(ch);
                }
                if !closed {
                    return Err(TemplateError::malformed(
                        format!("unterminated string in predicate '{}'", source),
                        line,
                    ));
                }
                tokens.push(PredToken::Literal(literal));
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut end = start + c.len_utf8();
                chars.next();
                while let Some(&(i, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let number = &source[start..end];
                if number == "-" {
                    return Err(TemplateError::malformed(
                        format!("unexpected '-' in predicate '{}'", source),
                        line,
                    ));
                }
                tokens.push(PredToken::Literal(number.to_string()));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if !(d.is_alphanumeric() || d == '_' || d == '.') {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let word = &source[start..end];
                tokens.push(match word {
                    "and" => PredToken::And,
                    "or" => PredToken::Or,
                    "not" => PredToken::Not,
                    "true" | "True" => PredToken::True,
                    "false" | "False" => PredToken::False,
                    _ => PredToken::Ident(word.to_string()),
                });
            }
            other => {
                return Err(TemplateError::malformed(
                    format!("unexpected character '{}' in predicate '{}'", other, source),
                    line,
                ))
            }
        }
    }

    if tokens.is_empty() {
        return Err(TemplateError::malformed("empty predicate", line));
    }
    Ok(tokens)
}

struct PredicateParser<'a> {
    tokens: &'a [PredToken],
    pos: usize,
    source: &'a str,
    line: usize,
}

impl<'a> PredicateParser<'a> {
    fn peek(&self) -> Option<&'a PredToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a PredToken> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn error(&self, message: &str) -> TemplateError {
        TemplateError::malformed(
            format!("{} in predicate '{}'", message, self.source),
            self.line,
        )
    }

    fn or_expr(&mut self) -> Result<Predicate, TemplateError> {
        let mut lhs = self.and_expr()?;
        while self.peek() == Some(&PredToken::Or) {
            self.advance();
            let rhs = self.and_expr()?;
            lhs = Predicate::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Predicate, TemplateError> {
        let mut lhs = self.not_expr()?;
        while self.peek() == Some(&PredToken::And) {
            self.advance();
            let rhs = self.not_expr()?;
            lhs = Predicate::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn not_expr(&mut self) -> Result<Predicate, TemplateError> {
        if self.peek() == Some(&PredToken::Not) {
            self.advance();
            return Ok(Predicate::Not(Box::new(self.not_expr()?)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Predicate, TemplateError> {
        if self.peek() == Some(&PredToken::LParen) {
            self.advance();
            let inner = self.or_expr()?;
            if self.advance() != Some(&PredToken::RParen) {
                return Err(self.error("expected ')'"));
            }
            return Ok(inner);
        }

        let constant = match self.peek() {
            Some(PredToken::True) => Some(true),
            Some(PredToken::False) => Some(false),
            _ => None,
        };
        let left = self.operand()?;
        let op = match self.peek() {
            Some(PredToken::Eq) => CompareOp::Eq,
            Some(PredToken::NotEq) => CompareOp::NotEq,
            _ => {
                return match (left, constant) {
                    (_, Some(value)) => Ok(Predicate::Constant(value)),
                    (Operand::Variable(key), None) => Ok(Predicate::Truthy(key)),
                    (Operand::Literal(_), None) => Err(self.error("literal must be compared")),
                };
            }
        };
        self.advance();
        let right = self.operand()?;

        Ok(Predicate::Compare { left, op, right })
    }

    fn operand(&mut self) -> Result<Operand, TemplateError> {
        match self.advance() {
            Some(PredToken::Ident(key)) => Ok(Operand::Variable(key.clone())),
            Some(PredToken::Literal(text)) => Ok(Operand::Literal(text.clone())),
            Some(PredToken::True) => Ok(Operand::Literal("true".to_string())),
            Some(PredToken::False) => Ok(Operand::Literal("false".to_string())),
            _ => Err(self.error("expected variable or literal")),
        }
    }
}
