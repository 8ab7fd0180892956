#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::must_use_candidate
)]

//! Tally, a crate for evaluating single-line arithmetic expressions.
//!
//! The easiest way to use this crate is with the [`run`](fn.run.html)
//! function:
//!
//! ```
//! assert_eq!(tally::run("(1 + 2) * 3"), Ok(9.0));
//! ```
//!
//! Errors carry the token they were raised on, and can point at it in the
//! input:
//!
//! ```
//! let source = "sin(1";
//! let error = tally::run(source).unwrap_err();
//! assert_eq!(error.to_string(), "Expected ')' after function params");
//! assert_eq!(
//!     error.report(source),
//!     "Error at column 5: Expected ')' after function params:\nsin(1\n    ^\n"
//! );
//! ```
//!
//! The parsed expression tree can be inspected without evaluating it with
//! [`compile`](fn.compile.html):
//!
//! ```
//! assert_eq!(
//!     tally::compile("-pow(2, 3)").unwrap(),
//!     "Unary(- Pow(Base=Literal(2), Exponent=Literal(3)))"
//! );
//! ```
//!
//! # Language definition
//!
//! An expression is a single line made of:
//!
//! - float literals: `12`, `0.5`. There is no exponent notation, and a dot
//!   must be followed by a digit to be part of the number;
//! - left and right parenthesis;
//! - binary operators `+`, `-`, `*` and `/`, and unary `+` and `-`;
//! - function calls: `sqrt(2)`, `atan(1)`. The following functions are
//!   accessible: `sqrt`, `sin`, `cos`, `tan`, `asin`, `acos`, `atan`. Angles
//!   are in radians. The trigonometric functions use Cephes polynomial
//!   kernels, so the last digit may differ from the `std::f64` methods;
//! - the two arguments `pow(base, exponent)`.
//!
//! Spaces, tabs and carriage returns are ignored. Any other symbol, any
//! other identifier or a line break is an error.
//!
//! `*` and `/` bind tighter than `+` and `-`. Additions and subtractions are
//! grouped left to right, but multiplications and divisions are grouped right
//! to left: `8 / 4 / 2` is `8 / (4 / 2) = 4`.
//!
//! Numbers follow the floating point rules: `1 / 0` is an infinity and
//! `sqrt(-1)` is `NaN`, neither of which is an error.
//!
//! # Technical details
//!
//! tally is a tree walking interpreter. The input is scanned into tokens with
//! [`scan`](fn.scan.html), parsed by recursive descent with
//! [`parse`](fn.parse.html), and the resulting [`Ast`](enum.Ast.html) is
//! computed by [`evaluate`](fn.evaluate.html). No state is shared between
//! calls, so all of these can be used from several threads at once.

#[macro_use]
extern crate lazy_static;

mod ast;
mod error;
mod expr;
mod lexer;
mod parser;
mod token;
mod trig;
mod util;

pub use ast::Ast;
pub use error::{Error, ErrorKind};
pub use expr::{compile, evaluate, run, Expr};
pub use lexer::{is_function_name, scan};
pub use parser::parse;
pub use token::{Token, TokenKind};
