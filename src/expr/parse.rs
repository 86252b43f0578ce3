//! Tokenizer and recursive-descent parser.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := number | variable | func '(' expr ')' | '(' expr ')'
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use super::{BinaryOp, EvaluationError, Func, Node, MAX_DEPTH, VARIABLES};

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Variable(usize),
    Func(Func),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    pos: usize,
    text: String,
}

pub(super) fn parse(source: &str) -> Result<Node, EvaluationError> {
    let tokens = tokenize(source)?;

    if tokens.is_empty() {
        return Err(EvaluationError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let root = parser.expression()?.node;

    match parser.peek() {
        None => Ok(root),
        Some(token) => Err(unexpected(token)),
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, EvaluationError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let literal = read_number(&mut chars);
            let value = literal
                .parse()
                .map_err(|_| EvaluationError::InvalidNumber {
                    literal: literal.clone(),
                    pos,
                })?;

            tokens.push(Token {
                kind: TokenKind::Number(value),
                pos,
                text: literal,
            });
        } else if c.is_alphabetic() {
            let mut name = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if d.is_alphanumeric() || d == '_' {
                    name.push(d);
                    chars.next();
                } else {
                    break;
                }
            }

            let kind = if let Some(idx) = VARIABLES.iter().position(|v| *v == name) {
                TokenKind::Variable(idx)
            } else if let Some(func) = Func::from_name(&name) {
                TokenKind::Func(func)
            } else {
                return Err(EvaluationError::UnknownIdentifier { name, pos });
            };

            tokens.push(Token {
                kind,
                pos,
                text: name,
            });
        } else {
            let kind = match c {
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '^' => TokenKind::Caret,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ => return Err(EvaluationError::UnexpectedChar { ch: c, pos }),
            };

            tokens.push(Token {
                kind,
                pos,
                text: c.to_string(),
            });
            chars.next();
        }
    }

    Ok(tokens)
}

// Digits and dots, then an optional exponent. The exponent is taken only when
// a digit follows `e` (possibly after a sign), so `2e` stays malformed instead
// of swallowing a following name.
fn read_number(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut literal = String::new();

    while let Some(&(_, d)) = chars.peek() {
        if d.is_ascii_digit() || d == '.' {
            literal.push(d);
            chars.next();
        } else {
            break;
        }
    }

    if let Some(&(_, e)) = chars.peek() {
        if e == 'e' || e == 'E' {
            let mut lookahead = chars.clone();
            lookahead.next();

            let mut exponent = String::from(e);
            if let Some(&(_, sign)) = lookahead.peek() {
                if sign == '+' || sign == '-' {
                    exponent.push(sign);
                    lookahead.next();
                }
            }

            if matches!(lookahead.peek(), Some(&(_, d)) if d.is_ascii_digit()) {
                while let Some(&(_, d)) = lookahead.peek() {
                    if d.is_ascii_digit() {
                        exponent.push(d);
                        lookahead.next();
                    } else {
                        break;
                    }
                }

                literal.push_str(&exponent);
                *chars = lookahead;
            }
        }
    }

    literal
}

fn unexpected(token: &Token) -> EvaluationError {
    EvaluationError::UnexpectedToken {
        token: token.text.clone(),
        pos: token.pos,
    }
}

// Node together with the height of its tree.
struct Parsed {
    node: Node,
    height: usize,
}

impl Parsed {
    fn leaf(node: Node) -> Self {
        Self { node, height: 1 }
    }

    fn nest(node: Node, height: usize) -> Result<Self, EvaluationError> {
        if height > MAX_DEPTH {
            return Err(EvaluationError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(Self { node, height })
    }

    fn binary(op: BinaryOp, lhs: Parsed, rhs: Parsed) -> Result<Self, EvaluationError> {
        let height = lhs.height.max(rhs.height) + 1;
        Self::nest(
            Node::Binary(op, Box::new(lhs.node), Box::new(rhs.node)),
            height,
        )
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    // Current recursion through `unary`, which every cycle of the grammar
    // passes.
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<Parsed, EvaluationError> {
        let mut lhs = self.term()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.consume();
            let rhs = self.term()?;
            lhs = Parsed::binary(op, lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn term(&mut self) -> Result<Parsed, EvaluationError> {
        let mut lhs = self.unary()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.consume();
            let rhs = self.unary()?;
            lhs = Parsed::binary(op, lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Parsed, EvaluationError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvaluationError::TooDeep { limit: MAX_DEPTH });
        }

        self.depth += 1;
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> Result<Parsed, EvaluationError> {
        match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.consume();
                let operand = self.unary()?;
                let height = operand.height + 1;
                Parsed::nest(Node::Neg(Box::new(operand.node)), height)
            }
            Some(TokenKind::Plus) => {
                self.consume();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Parsed, EvaluationError> {
        let base = self.primary()?;

        if let Some(TokenKind::Caret) = self.peek_kind() {
            self.consume();
            // Exponent goes through `unary` again, which makes `^` right
            // associative and allows `2^-1`.
            let exponent = self.unary()?;
            return Parsed::binary(BinaryOp::Pow, base, exponent);
        }

        Ok(base)
    }

    fn primary(&mut self) -> Result<Parsed, EvaluationError> {
        let token = self.consume().ok_or(EvaluationError::UnexpectedEnd)?;

        match token.kind {
            TokenKind::Number(n) => Ok(Parsed::leaf(Node::Number(n))),
            TokenKind::Variable(idx) => Ok(Parsed::leaf(Node::Variable(idx))),
            TokenKind::Func(func) => {
                match self.consume() {
                    Some(Token {
                        kind: TokenKind::LParen,
                        ..
                    }) => {}
                    Some(other) => return Err(unexpected(&other)),
                    None => return Err(EvaluationError::UnexpectedEnd),
                }
                let arg = self.group()?;
                let height = arg.height + 1;
                Parsed::nest(Node::Call(func, Box::new(arg.node)), height)
            }
            TokenKind::LParen => self.group(),
            _ => Err(unexpected(&token)),
        }
    }

    // Inner expression of a parenthesized group whose `(` was already
    // consumed.
    fn group(&mut self) -> Result<Parsed, EvaluationError> {
        let inner = self.expression()?;

        match self.consume() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => Ok(inner),
            Some(other) => Err(unexpected(&other)),
            None => Err(EvaluationError::UnbalancedParentheses),
        }
    }
}
