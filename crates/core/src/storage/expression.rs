//! Update and condition expressions.
//!
//! Parses and evaluates the subset of DynamoDB expression syntax the user store
//! issues, so that non-DynamoDB backends apply writes with the same semantics:
//!
//! - update: `SET path = operand [(+|-) operand] [, ...]`
//! - condition: clauses joined by `AND`, each `operand cmp operand`,
//!   `attribute_exists(path)` or `attribute_not_exists(path)`
//!
//! Operands are `:placeholder` values, `#name` aliases or bare attribute names.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::{Attributes, FieldValue, Result, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Comma,
    LParen,
    RParen,
}

/// A value reference inside an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// An attribute of the item, either a bare name or a `#alias`.
    Path(String),
    /// A `:placeholder` looked up in the expression values.
    Placeholder(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// One `path = operand [op operand]` action of a SET clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub path: String,
    pub value: Operand,
    pub arithmetic: Option<(ArithOp, Operand)>,
}

/// One clause of a condition; a condition holds when all its clauses hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Compare(Operand, Comparator, Operand),
    Exists(String),
    NotExists(String),
}

fn invalid(message: impl Into<String>) -> StoreError {
    StoreError::InvalidExpression(message.into())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == '#'
}

fn tokenize(expr: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let token = match c {
            '=' => Token::Eq,
            ',' => Token::Comma,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '<' => {
                chars.next();
                match chars.peek() {
                    Some('=') => Token::Le,
                    Some('>') => Token::Ne,
                    _ => {
                        tokens.push(Token::Lt);
                        continue;
                    }
                }
            }
            '>' => {
                chars.next();
                match chars.peek() {
                    Some('=') => Token::Ge,
                    _ => {
                        tokens.push(Token::Gt);
                        continue;
                    }
                }
            }
            c if is_word_char(c) => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if is_word_char(c) {
                        word.push(c);
                        chars.next();
                        continue;
                    }
                    // A hyphen between name characters belongs to the name (`user-id`).
                    let mut lookahead = chars.clone();
                    lookahead.next();
                    match lookahead.peek() {
                        Some(&next) if c == '-' && next.is_ascii_alphanumeric() => {
                            word.push(c);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                tokens.push(Token::Word(word));
                continue;
            }
            other => return Err(invalid(format!("unexpected character '{other}'"))),
        };
        chars.next();
        tokens.push(token);
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(expr: &str) -> Result<Self> {
        let tokens = tokenize(expr)?;
        if tokens.is_empty() {
            return Err(invalid("expression is empty"));
        }
        Ok(Self { tokens, pos: 0 })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(invalid(format!("expected {expected:?}, found {token:?}"))),
            None => Err(invalid(format!("expected {expected:?}, found end of expression"))),
        }
    }

    fn word(&mut self) -> Result<String> {
        match self.next() {
            Some(Token::Word(word)) => Ok(word),
            Some(token) => Err(invalid(format!("expected a name, found {token:?}"))),
            None => Err(invalid("expected a name, found end of expression")),
        }
    }

    fn path(&mut self) -> Result<String> {
        let word = self.word()?;
        if word.starts_with(':') {
            return Err(invalid(format!("expected an attribute, found value '{word}'")));
        }
        Ok(word)
    }

    fn operand(&mut self) -> Result<Operand> {
        let word = self.word()?;
        match word.strip_prefix(':') {
            Some("") => Err(invalid("empty value placeholder ':'")),
            Some(_) => Ok(Operand::Placeholder(word)),
            None => Ok(Operand::Path(word)),
        }
    }

    fn clause(&mut self) -> Result<Clause> {
        let function = match self.peek() {
            Some(Token::Word(word)) => word.to_ascii_lowercase(),
            _ => String::new(),
        };
        if function == "attribute_exists" || function == "attribute_not_exists" {
            self.next();
            self.expect(Token::LParen)?;
            let path = self.path()?;
            self.expect(Token::RParen)?;
            return Ok(if function == "attribute_exists" {
                Clause::Exists(path)
            } else {
                Clause::NotExists(path)
            });
        }

        let left = self.operand()?;
        let comparator = match self.next() {
            Some(Token::Eq) => Comparator::Eq,
            Some(Token::Ne) => Comparator::Ne,
            Some(Token::Lt) => Comparator::Lt,
            Some(Token::Le) => Comparator::Le,
            Some(Token::Gt) => Comparator::Gt,
            Some(Token::Ge) => Comparator::Ge,
            Some(token) => return Err(invalid(format!("expected a comparator, found {token:?}"))),
            None => return Err(invalid("expected a comparator, found end of expression")),
        };
        let right = self.operand()?;
        Ok(Clause::Compare(left, comparator, right))
    }
}

/// Parse a `SET` update expression.
pub fn parse_update(expr: &str) -> Result<Vec<Assignment>> {
    let mut parser = Parser::new(expr)?;

    let keyword = parser.word()?;
    if !keyword.eq_ignore_ascii_case("set") {
        return Err(invalid(format!(
            "unsupported update clause '{keyword}', only SET is supported"
        )));
    }

    let mut assignments = Vec::new();
    loop {
        let path = parser.path()?;
        parser.expect(Token::Eq)?;
        let value = parser.operand()?;
        let arithmetic = match parser.peek() {
            Some(Token::Plus) => {
                parser.next();
                Some((ArithOp::Add, parser.operand()?))
            }
            Some(Token::Minus) => {
                parser.next();
                Some((ArithOp::Sub, parser.operand()?))
            }
            _ => None,
        };
        assignments.push(Assignment {
            path,
            value,
            arithmetic,
        });

        match parser.next() {
            None => break,
            Some(Token::Comma) => continue,
            Some(token) => return Err(invalid(format!("unexpected {token:?} in update"))),
        }
    }

    Ok(assignments)
}

/// Parse a condition expression into its `AND`-joined clauses.
pub fn parse_condition(expr: &str) -> Result<Vec<Clause>> {
    let mut parser = Parser::new(expr)?;

    let mut clauses = Vec::new();
    loop {
        clauses.push(parser.clause()?);
        match parser.next() {
            None => break,
            Some(Token::Word(word)) if word.eq_ignore_ascii_case("and") => continue,
            Some(token) => return Err(invalid(format!("unexpected {token:?} in condition"))),
        }
    }

    Ok(clauses)
}

/// Name aliases and value placeholders an expression is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionContext<'a> {
    names: &'a HashMap<String, String>,
    values: &'a HashMap<String, FieldValue>,
}

impl<'a> ExpressionContext<'a> {
    pub fn new(
        names: &'a HashMap<String, String>,
        values: &'a HashMap<String, FieldValue>,
    ) -> Self {
        Self { names, values }
    }

    /// Resolve a `#alias` to its attribute name; bare names pass through.
    pub fn resolve_name<'p>(&'p self, path: &'p str) -> Result<&'p str> {
        if path.starts_with('#') {
            self.names
                .get(path)
                .map(String::as_str)
                .ok_or_else(|| invalid(format!("undefined attribute name '{path}'")))
        } else {
            Ok(path)
        }
    }

    fn resolve(&self, operand: &Operand, item: &Attributes) -> Result<Option<FieldValue>> {
        match operand {
            Operand::Placeholder(key) => self
                .values
                .get(key)
                .cloned()
                .map(Some)
                .ok_or_else(|| invalid(format!("undefined value placeholder '{key}'"))),
            Operand::Path(path) => Ok(item.get(self.resolve_name(path)?).cloned()),
        }
    }

    fn require(&self, operand: &Operand, item: &Attributes) -> Result<FieldValue> {
        self.resolve(operand, item)?.ok_or_else(|| {
            invalid(format!(
                "the expression refers to an attribute that does not exist in the item: {operand:?}"
            ))
        })
    }
}

fn arithmetic(op: ArithOp, left: &FieldValue, right: &FieldValue) -> Result<FieldValue> {
    let (FieldValue::Int(a), FieldValue::Int(b)) = (left, right) else {
        return Err(invalid(format!(
            "arithmetic needs N operands, found {} and {}",
            left.type_name(),
            right.type_name()
        )));
    };
    let result = match op {
        ArithOp::Add => a.checked_add(*b),
        ArithOp::Sub => a.checked_sub(*b),
    };
    result
        .map(FieldValue::Int)
        .ok_or_else(|| invalid("numeric overflow"))
}

/// Apply SET assignments to `item` and return the new values of the updated
/// attributes. Every right-hand side is evaluated against the item as it was
/// before the update.
pub fn apply_update(
    item: &mut Attributes,
    assignments: &[Assignment],
    ctx: &ExpressionContext<'_>,
) -> Result<Attributes> {
    let mut updated = Attributes::new();
    for assignment in assignments {
        let name = ctx.resolve_name(&assignment.path)?.to_string();
        let base = ctx.require(&assignment.value, item)?;
        let value = match &assignment.arithmetic {
            None => base,
            Some((op, operand)) => arithmetic(*op, &base, &ctx.require(operand, item)?)?,
        };
        updated.insert(name, value);
    }
    item.extend(updated.clone());
    Ok(updated)
}

/// Evaluate condition clauses against `item`. Comparisons involving a missing
/// attribute are false.
pub fn evaluate_condition(
    item: &Attributes,
    clauses: &[Clause],
    ctx: &ExpressionContext<'_>,
) -> Result<bool> {
    for clause in clauses {
        let holds = match clause {
            Clause::Exists(path) => item.contains_key(ctx.resolve_name(path)?),
            Clause::NotExists(path) => !item.contains_key(ctx.resolve_name(path)?),
            Clause::Compare(left, comparator, right) => {
                match (ctx.resolve(left, item)?, ctx.resolve(right, item)?) {
                    (Some(l), Some(r)) => compare(&l, *comparator, &r),
                    _ => false,
                }
            }
        };
        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}

fn compare(left: &FieldValue, comparator: Comparator, right: &FieldValue) -> bool {
    let ordering = left.compare(right);
    match comparator {
        Comparator::Eq => ordering == Some(Ordering::Equal),
        Comparator::Ne => ordering != Some(Ordering::Equal),
        Comparator::Lt => ordering == Some(Ordering::Less),
        Comparator::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        Comparator::Gt => ordering == Some(Ordering::Greater),
        Comparator::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
    }
}
