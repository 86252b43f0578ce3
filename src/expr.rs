//! Arithmetic expressions over a fixed set of variables.
//!
//! An [`Expression`] is parsed once from text and can then be evaluated many
//! times with different variable bindings. The grammar is small:
//!
//! * numeric literals (`2`, `0.5`, `1e-3`),
//! * the variables `x`, `y`, `z` and `w` (see [`VARIABLES`]),
//! * binary operators `+`, `-`, `*`, `/` and `^`,
//! * unary `-` and `+`,
//! * the functions `sin`, `cos`, `tan`, `exp`, `log` (natural) and `sqrt`,
//! * parentheses.
//!
//! Precedence from the tightest: `^`, unary minus, `*` and `/`, `+` and `-`.
//! Operators of equal precedence associate to the left, except for `^` which
//! associates to the right (`2^3^2 = 2^9`). Thus `-x^2` is `-(x^2)`.
//!
//! Evaluation follows IEEE-754, so `1/0` is infinity and `sqrt(-1)` is NaN.
//! Only a structurally invalid expression, one nested deeper than
//! [`MAX_DEPTH`], or a missing variable binding is an error.
//!
//! ```rust
//! use stepwise::expr::Expression;
//!
//! let circle = Expression::parse("x^2 + y^2 - 4").unwrap();
//! assert_eq!(circle.eval(&[2.0, 0.0]).unwrap(), 0.0);
//! assert_eq!(circle.eval(&[0.0, 0.0]).unwrap(), -4.0);
//! ```

mod parse;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Variable symbols in the order in which they bind to the values passed to
/// [`Expression::eval`].
pub const VARIABLES: [&str; 4] = ["x", "y", "z", "w"];

/// Maximal nesting of an expression, counted both as the height of the
/// expression tree and as the nesting of parentheses and unary signs.
/// Parsing and evaluation recurse on the nesting, so it must stay bounded for
/// arbitrary input.
pub const MAX_DEPTH: usize = 256;

/// Error of parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The expression contains no tokens.
    #[error("empty expression")]
    Empty,
    /// A character that is not part of the grammar.
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset in the source.
        pos: usize,
    },
    /// A numeric literal that cannot be read as a number.
    #[error("invalid number '{literal}' at position {pos}")]
    InvalidNumber {
        /// The literal as written.
        literal: String,
        /// Byte offset in the source.
        pos: usize,
    },
    /// A name that is neither a variable nor a known function.
    #[error("unknown identifier '{name}' at position {pos}")]
    UnknownIdentifier {
        /// The name as written.
        name: String,
        /// Byte offset in the source.
        pos: usize,
    },
    /// A token that cannot appear at its place.
    #[error("unexpected '{token}' at position {pos}")]
    UnexpectedToken {
        /// Textual form of the token.
        token: String,
        /// Byte offset in the source.
        pos: usize,
    },
    /// The expression ended where an operand or `)` was expected.
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// An opening parenthesis is never closed.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// Parentheses, unary signs or operator chains nest deeper than
    /// [`MAX_DEPTH`].
    #[error("expression is nested deeper than {limit} levels")]
    TooDeep {
        /// The nesting limit.
        limit: usize,
    },
    /// The expression uses a variable with no value bound to it.
    #[error("variable '{name}' is not bound ({bound} value(s) given)")]
    UnboundVariable {
        /// Symbol of the variable.
        name: &'static str,
        /// Number of values that were bound.
        bound: usize,
    },
}

/// Binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

/// Function from the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Log,
    /// Square root.
    Sqrt,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "exp" => Some(Func::Exp),
            "log" => Some(Func::Log),
            "sqrt" => Some(Func::Sqrt),
            _ => None,
        }
    }

    fn apply(self, arg: f64) -> f64 {
        match self {
            Func::Sin => arg.sin(),
            Func::Cos => arg.cos(),
            Func::Tan => arg.tan(),
            Func::Exp => arg.exp(),
            Func::Log => arg.ln(),
            Func::Sqrt => arg.sqrt(),
        }
    }
}

/// Node of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric literal.
    Number(f64),
    /// Variable given by its index into [`VARIABLES`].
    Variable(usize),
    /// Unary minus.
    Neg(Box<Node>),
    /// Binary operation.
    Binary(BinaryOp, Box<Node>, Box<Node>),
    /// Function call.
    Call(Func, Box<Node>),
}

impl Node {
    fn eval(&self, values: &[f64]) -> f64 {
        match self {
            Node::Number(n) => *n,
            Node::Variable(idx) => values[*idx],
            Node::Neg(operand) => -operand.eval(values),
            Node::Binary(op, lhs, rhs) => {
                let a = lhs.eval(values);
                let b = rhs.eval(values);
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    BinaryOp::Pow => a.powf(b),
                }
            }
            Node::Call(func, arg) => func.apply(arg.eval(values)),
        }
    }

    fn max_variable(&self) -> Option<usize> {
        match self {
            Node::Number(_) => None,
            Node::Variable(idx) => Some(*idx),
            Node::Neg(operand) | Node::Call(_, operand) => operand.max_variable(),
            Node::Binary(_, lhs, rhs) => lhs.max_variable().max(rhs.max_variable()),
        }
    }
}

/// Parsed, immutable expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
    arity: usize,
}

impl Expression {
    /// Parses the expression from text.
    pub fn parse(source: &str) -> Result<Self, EvaluationError> {
        let root = parse::parse(source)?;
        let arity = root.max_variable().map_or(0, |idx| idx + 1);

        Ok(Self {
            source: source.to_string(),
            root,
            arity,
        })
    }

    /// Evaluates the expression. `values[i]` is bound to `VARIABLES[i]`.
    ///
    /// Extra values are ignored; missing ones for a variable that the
    /// expression uses give [`EvaluationError::UnboundVariable`].
    pub fn eval(&self, values: &[f64]) -> Result<f64, EvaluationError> {
        if self.arity > values.len() {
            return Err(EvaluationError::UnboundVariable {
                name: VARIABLES[self.arity - 1],
                bound: values.len(),
            });
        }

        Ok(self.root.eval(values))
    }

    /// Number of leading variables the expression needs bound, i.e. one past
    /// the index of the last variable it mentions. `x*z` has arity 3.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The text the expression was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root of the expression tree.
    pub fn root(&self) -> &Node {
        &self.root
    }
}

impl FromStr for Expression {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parses and evaluates the expression in one go.
pub fn evaluate(source: &str, values: &[f64]) -> Result<f64, EvaluationError> {
    Expression::parse(source)?.eval(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn circle_at_points() {
        assert_eq!(evaluate("x^2 + y^2 - 4", &[2.0, 0.0]), Ok(0.0));
        assert_eq!(evaluate("x^2 + y^2 - 4", &[0.0, 0.0]), Ok(-4.0));
    }

    #[test]
    fn precedence() {
        assert_eq!(evaluate("2 + 3 * 4", &[]), Ok(14.0));
        assert_eq!(evaluate("(2 + 3) * 4", &[]), Ok(20.0));
        assert_eq!(evaluate("-x^2", &[3.0]), Ok(-9.0));
        assert_eq!(evaluate("2 * -3", &[]), Ok(-6.0));
        assert_eq!(evaluate("10 - 4 - 3", &[]), Ok(3.0));
        assert_eq!(evaluate("12 / 3 / 2", &[]), Ok(2.0));
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(evaluate("2^3^2", &[]), Ok(512.0));
        assert_eq!(evaluate("2^-1", &[]), Ok(0.5));
        assert_eq!(evaluate("(2^3)^2", &[]), Ok(64.0));
    }

    #[test]
    fn functions() {
        let eps = 1e-12;
        assert_relative_eq!(evaluate("sin(0) + cos(0)", &[]).unwrap(), 1.0, epsilon = eps);
        assert_relative_eq!(evaluate("exp(log(x))", &[5.0]).unwrap(), 5.0, epsilon = eps);
        assert_relative_eq!(evaluate("sqrt(16) + tan(0)", &[]).unwrap(), 4.0, epsilon = eps);
        assert_relative_eq!(
            evaluate("(4 - y^2)^0.5", &[0.0, 1.0]).unwrap(),
            3f64.sqrt(),
            epsilon = eps
        );
    }

    #[test]
    fn every_occurrence_is_bound() {
        // `exp` must not be mistaken for a use of `x`.
        assert_relative_eq!(
            evaluate("x * exp(x) - x", &[1.0]).unwrap(),
            1f64.exp() - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn ieee_division() {
        assert_eq!(evaluate("1/0", &[]), Ok(f64::INFINITY));
        assert!(evaluate("0/0", &[]).unwrap().is_nan());
        assert!(evaluate("sqrt(-1)", &[]).unwrap().is_nan());
    }

    #[test]
    fn scientific_literals() {
        assert_relative_eq!(evaluate("1e-3 * 2E2", &[]).unwrap(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(evaluate(".5 + 1.", &[]).unwrap(), 1.5);
    }

    #[test]
    fn arity() {
        assert_eq!(Expression::parse("3").unwrap().arity(), 0);
        assert_eq!(Expression::parse("x + 1").unwrap().arity(), 1);
        assert_eq!(Expression::parse("x * z").unwrap().arity(), 3);
        assert_eq!(Expression::parse("w").unwrap().arity(), 4);
    }

    #[test]
    fn unbound_variable() {
        let expr = Expression::parse("x*y - 1").unwrap();
        assert_eq!(
            expr.eval(&[1.0]),
            Err(EvaluationError::UnboundVariable {
                name: "y",
                bound: 1
            })
        );
        assert_eq!(expr.eval(&[1.0, 2.0, 3.0]), Ok(1.0));
    }

    #[test]
    fn malformed() {
        assert_eq!(evaluate("", &[]), Err(EvaluationError::Empty));
        assert_eq!(
            evaluate("(x + 1", &[1.0]),
            Err(EvaluationError::UnbalancedParentheses)
        );
        assert!(matches!(
            evaluate("x + 1)", &[1.0]),
            Err(EvaluationError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            evaluate("x + ", &[1.0]),
            Err(EvaluationError::UnexpectedEnd)
        ));
        assert!(matches!(
            evaluate("x $ 2", &[1.0]),
            Err(EvaluationError::UnexpectedChar { ch: '$', pos: 2 })
        ));
        assert!(matches!(
            evaluate("foo(x)", &[1.0]),
            Err(EvaluationError::UnknownIdentifier { .. })
        ));
        assert!(matches!(
            evaluate("2x", &[1.0]),
            Err(EvaluationError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            evaluate("1.2.3", &[]),
            Err(EvaluationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            evaluate("sin x", &[1.0]),
            Err(EvaluationError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let nested = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        assert_eq!(
            evaluate(&nested, &[]),
            Err(EvaluationError::TooDeep { limit: MAX_DEPTH })
        );

        let signs = format!("{}x", "-".repeat(1000));
        assert_eq!(
            evaluate(&signs, &[1.0]),
            Err(EvaluationError::TooDeep { limit: MAX_DEPTH })
        );

        let nested = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(evaluate(&nested, &[2.0]), Ok(2.0));
    }

    #[test]
    fn from_str_and_display() {
        let expr: Expression = "x*y - 1".parse().unwrap();
        assert_eq!(expr.to_string(), "x*y - 1");
        assert_eq!(expr.source(), "x*y - 1");
    }
}
