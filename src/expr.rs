use crate::ast::Ast;
use crate::lexer::scan;
use crate::parser::parse;
use crate::token::TokenKind;
use crate::util::FUNCTIONS;
use crate::Error;
use std::fmt::{self, Display, Formatter};

/// Evaluate a single expression from `input`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// scanning or parsing the expression failed. Evaluation itself never fails:
/// division by zero or out of domain arguments give infinities and `NaN`.
///
/// # Example
///
/// ```
/// # use tally::run;
/// assert_eq!(run("45 - pow(2, 3)"), Ok(37.0));
/// assert_eq!(run("1 / 0"), Ok(f64::INFINITY));
/// assert!(run("2 * z").is_err());
/// ```
pub fn run(input: &str) -> Result<f64, Error> {
    Expr::parse(input).map(|expr| expr.eval())
}

/// Parse `input` and render the expression tree without evaluating it.
///
/// # Example
///
/// ```
/// # use tally::compile;
/// assert_eq!(
///     compile("1 + 2").unwrap(),
///     "Binary(Literal(1) Operator(+) Literal(2))"
/// );
/// ```
pub fn compile(input: &str) -> Result<String, Error> {
    Expr::parse(input).map(|expr| expr.to_string())
}

/// Compute the value of an expression tree
#[must_use]
pub fn evaluate(ast: &Ast) -> f64 {
    match *ast {
        Ast::Literal(value) => value,
        Ast::Grouping(ref inner) => evaluate(inner),
        Ast::Unary {
            ref operator,
            ref operand,
        } => {
            let operand = evaluate(operand);
            match operator.kind() {
                TokenKind::Plus => operand,
                TokenKind::Minus => -operand,
                other => unreachable!("Internal bug: {:?} used as an unary operator", other),
            }
        }
        Ast::Binary {
            ref left,
            ref operator,
            ref right,
        } => {
            let left = evaluate(left);
            let right = evaluate(right);
            match operator.kind() {
                TokenKind::Plus => left + right,
                TokenKind::Minus => left - right,
                TokenKind::Star => left * right,
                TokenKind::Slash => left / right,
                other => unreachable!("Internal bug: {:?} used as a binary operator", other),
            }
        }
        Ast::Function {
            ref name,
            ref argument,
        } => {
            let argument = evaluate(argument);
            match FUNCTIONS.get(name.lexeme()) {
                Some(func) => func(argument),
                None => unreachable!("Internal bug: unknown function {}", name.lexeme()),
            }
        }
        Ast::Pow {
            ref base,
            ref exponent,
        } => libm::pow(evaluate(base), evaluate(exponent)),
    }
}

/// A parsed mathematical expression.
///
/// # Examples
/// ```
/// # use tally::Expr;
/// let expr = Expr::parse("3 + 5 * 2").unwrap();
/// assert_eq!(expr.eval(), 13.0);
/// assert_eq!(expr.eval(), 13.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ast: Ast,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// # Examples
    /// ```
    /// # use tally::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2").is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3eff + 5 * 2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let tokens = scan(expression)?;
        tracing::debug!(tokens = tokens.len(), "scanned expression");
        let ast = parse(&tokens)?;
        tracing::debug!(%ast, "parsed expression");
        Ok(Self { ast })
    }

    /// Evaluate the expression.
    #[must_use]
    pub fn eval(&self) -> f64 {
        let value = evaluate(&self.ast);
        tracing::debug!(value, "evaluated expression");
        value
    }

    /// The expression tree
    pub fn ast(&self) -> &Ast {
        &self.ast
    }
}

impl Display for Expr {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", self.ast)
    }
}

#[cfg(test)]
mod tests {
    use super::{compile, run, Expr};
    use crate::error::ErrorKind;
    use std::thread;
    use test_case::test_case;

    #[test_case("1 + 2" => 3.0 ; "addition")]
    #[test_case("1 + 2.2" => 3.2 ; "float addition")]
    #[test_case("+1 - 2" => -1.0 ; "unary plus")]
    #[test_case("4 - 2" => 2.0 ; "subtraction")]
    #[test_case("2 * 3" => 6.0 ; "multiplication")]
    #[test_case("8 / 4" => 2.0 ; "division")]
    #[test_case("1 + 2 * 3" => 7.0 ; "precedence")]
    #[test_case("(1 + 2) * 3" => 9.0 ; "grouping")]
    #[test_case("1 + 2 * 3 / 4" => 2.5 ; "mixed chain")]
    #[test_case("-1 + 2 - 3" => -2.0 ; "additive chain")]
    #[test_case("2 + -2" => 0.0 ; "negated operand")]
    #[test_case("2 - 3 - 4" => -5.0 ; "subtraction is left to right")]
    #[test_case("8 / 4 / 2" => 4.0 ; "division is right to left")]
    #[test_case("2 * 6 / 3 / 2" => 8.0 ; "multiplicative chain is right to left")]
    #[test_case("--3" => 3.0 ; "double negation")]
    #[test_case("sin(0)" => 0.0 ; "sine")]
    #[test_case("sin(90)" => 0.893_996_663_600_558 ; "sine in radians")]
    #[test_case("sin(3.141592653589793)" => 1.224_646_799_147_351_5e-16 ; "sine of pi")]
    #[test_case("cos(0)" => 1.0 ; "cosine")]
    #[test_case("cos(90)" => -0.448_073_616_129_170_1 ; "cosine in radians")]
    #[test_case("cos(3.141592653589793)" => -1.0 ; "cosine of pi")]
    #[test_case("tan(0)" => 0.0 ; "tangent")]
    #[test_case("tan(45)" => 1.619_775_190_543_861_5 ; "tangent in radians")]
    #[test_case("tan(3.141592653589793)" => -1.224_646_799_147_351_5e-16 ; "tangent of pi")]
    #[test_case("asin(0)" => 0.0 ; "arcsine")]
    #[test_case("acos(1)" => 0.0 ; "arccosine")]
    #[test_case("atan(0)" => 0.0 ; "arctangent")]
    #[test_case("sqrt(4)" => 2.0 ; "square root")]
    #[test_case("pow(2, 3)" => 8.0 ; "power")]
    #[test_case("1 + 2 * cos(3 + 4 * 5)" => -0.065_666_040_666_795_04 ; "call in a chain")]
    #[test_case("1 + 2 * cos(sin(1))" => 2.332_733_490_785_761 ; "nested trigonometry")]
    #[test_case("pow(2, 10)" => 1024.0 ; "bigger power")]
    #[test_case("pow(0, 0)" => 1.0 ; "zero to the zero")]
    #[test_case("sqrt(pow(2, 4)) + tan(1)" => 5.557_407_724_654_902 ; "nested calls")]
    #[test_case("(1 + 2) * (3 + 4)" => 21.0 ; "two groupings")]
    #[test_case("(1 + 2) * (cos(0) + sin(0))" => 3.0 ; "grouped calls")]
    #[test_case("(1 + 2) * (cos(0) + sin(0)) / 2" => 1.5 ; "grouped calls divided")]
    #[test_case("(-2 + 2) * cos(0) + sin(0) / 2" => 0.0 ; "zero product")]
    fn eval(input: &str) -> f64 {
        run(input).unwrap()
    }

    #[test]
    fn floating_point_edge_cases() {
        assert_eq!(run("1 / 0"), Ok(f64::INFINITY));
        assert_eq!(run("-1 / 0"), Ok(f64::NEG_INFINITY));
        assert!(run("0 / 0").unwrap().is_nan());
        assert!(run("sqrt(-1)").unwrap().is_nan());
        assert!(run("asin(2)").unwrap().is_nan());
        assert!(run("pow(-8, 0.5)").unwrap().is_nan());
    }

    #[test_case("+" => "Expected expression, found 'EOF'" ; "lonely plus")]
    #[test_case("1 +" => "Expected expression, found 'EOF'" ; "missing operand")]
    #[test_case("1 + 2 * )" => "Expected expression, found ')'" ; "stray paren")]
    #[test_case("2 - (1-4)*3(" => "Expected expression, found '('" ; "leftover paren")]
    #[test_case("sin()" => "Expected expression, found ')'" ; "empty call")]
    #[test_case("sin(1" => "Expected ')' after function params" ; "unclosed call")]
    #[test_case("sin(1 + 2" => "Expected ')' after function params" ; "unclosed call with chain")]
    #[test_case("sin(1 + 2 * tan(12)" => "Expected ')' after function params" ; "unclosed outer call")]
    #[test_case("notknown(1 + 2 * tan(12)" => "Undefined identifier 'notknown'" ; "undefined identifier")]
    #[test_case("(1 + 2" => "Expected ')' after expression" ; "unclosed grouping")]
    #[test_case("(1 + 2) * (3 + 4" => "Expected ')' after expression" ; "unclosed second grouping")]
    #[test_case("()" => "Expected expression, found ')'" ; "empty grouping")]
    #[test_case("_" => "Expected expression, found '_'" ; "invalid character")]
    #[test_case("1+1\n" => "Line break not allowed" ; "line break")]
    #[test_case("pow(2, 10))" => "Expected expression, found ')'" ; "extra closing paren")]
    fn errors(input: &str) -> String {
        run(input).unwrap_err().to_string()
    }

    #[test]
    fn error_kinds() {
        assert_eq!(run("foo").unwrap_err().kind(), ErrorKind::UndefinedIdentifier);
        assert_eq!(run("1 +").unwrap_err().kind(), ErrorKind::Syntax);
        assert_eq!(run("1\n").unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn compile_does_not_evaluate() {
        assert_eq!(
            compile("1 / 0").unwrap(),
            "Binary(Literal(1) Operator(/) Literal(0))"
        );
        assert_eq!(compile("1000000").unwrap(), "Literal(1e+06)");
        assert_eq!(
            compile("0.00001 * 123456").unwrap(),
            "Binary(Literal(1e-05) Operator(*) Literal(123456))"
        );
        assert_eq!(
            compile("sin(1").unwrap_err().to_string(),
            "Expected ')' after function params"
        );
    }

    #[test]
    fn repeated_runs_agree() {
        for input in &["1 + 2", "sqrt(pow(2,4)) + tan(1)", "1 +", "notknown(1)"] {
            assert_eq!(run(input), run(input));
        }
        let expr = Expr::parse("pow(2, 0.5)").unwrap();
        assert_eq!(expr.eval(), expr.eval());
        assert_eq!(expr.to_string(), "Pow(Base=Literal(2), Exponent=Literal(0.5))");
    }

    #[test]
    fn concurrent_runs() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    let input = format!("{} * pow(2, 3) - sqrt(16)", i);
                    run(&input)
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let expected = i as f64 * 8.0 - 4.0;
            assert_eq!(handle.join().unwrap(), Ok(expected));
        }
    }
}
