use crate::token::Token;
use std::fmt::{self, Display, Formatter};

/// Ast nodes for the expressions
///
/// The `Display` implementation gives the canonical bracketed rendering of
/// the tree, as returned by [`compile`](fn.compile.html).
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// <left> <operator> <right>, for `+`, `-`, `*` and `/`
    Binary {
        /// Left operand
        left: Box<Ast>,
        /// Operator token
        operator: Token,
        /// Right operand
        right: Box<Ast>,
    },
    /// (<inner>)
    Grouping(Box<Ast>),
    /// A constant value
    Literal(f64),
    /// fn(<argument>) for the single argument functions
    Function {
        /// Function name token
        name: Token,
        /// The argument
        argument: Box<Ast>,
    },
    /// pow(<base>, <exponent>)
    Pow {
        /// The base
        base: Box<Ast>,
        /// The exponent
        exponent: Box<Ast>,
    },
    /// <operator><operand>, for `+` and `-`
    Unary {
        /// Operator token
        operator: Token,
        /// The operand
        operand: Box<Ast>,
    },
}

impl Display for Ast {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::Binary {
                left,
                operator,
                right,
            } => write!(
                fmt,
                "Binary({} Operator({}) {})",
                left,
                operator.lexeme(),
                right
            ),
            Self::Grouping(inner) => write!(fmt, "Grouping({})", inner),
            Self::Literal(value) => {
                fmt.write_str("Literal(")?;
                write_number(fmt, *value)?;
                fmt.write_str(")")
            }
            Self::Function { name, argument } => {
                write!(fmt, "FunCall({}({}))", name.lexeme(), argument)
            }
            Self::Pow { base, exponent } => {
                write!(fmt, "Pow(Base={}, Exponent={})", base, exponent)
            }
            Self::Unary { operator, operand } => {
                write!(fmt, "Unary({} {})", operator.lexeme(), operand)
            }
        }
    }
}

/// Write `value` with the shortest digits that read back the same, switching
/// to an exponent with at least two digits below 1e-4 and from 1e6 on:
/// `0.0001`, `1e-05`, `123456`, `1.234567e+06`.
fn write_number(fmt: &mut Formatter, value: f64) -> fmt::Result {
    if value == 0.0 || !value.is_finite() {
        return write!(fmt, "{}", value);
    }
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').ok_or(fmt::Error)?;
    let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
    if exponent < -4 || exponent >= 6 {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(fmt, "{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        write!(fmt, "{}", value)
    }
}
