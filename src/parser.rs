use crate::ast::Ast;
use crate::error::{Error, ErrorKind};
use crate::token::{Token, TokenKind};
use crate::util::POW;

/// Parse a token stream, as produced by [`scan`](fn.scan.html), into a
/// single expression.
///
/// The grammar, from the lowest to the highest precedence:
///
/// ```text
/// expression := factor ( ('+' | '-') factor )*
/// factor     := primary ( ('/' | '*') factor )*
/// primary    := ('+' | '-') primary
///             | '(' expression ')'
///             | NUMBER
///             | FUNCTION '(' expression ')'
///             | 'pow' '(' expression ',' expression ')'
/// ```
///
/// `factor` recurses on its right operand, so `8 / 4 / 2` reads as
/// `8 / (4 / 2)`.
///
/// Trees deeper than 256 levels are rejected with a syntax error. Each
/// grouping, call, unary operator and operator of a chain counts as a level.
/// A slice that does not end with `Eof` is read as if it did.
///
/// # Examples
///
/// ```
/// # use tally::{parse, scan};
/// let ast = parse(&scan("8 / 4 / 2").unwrap()).unwrap();
/// assert_eq!(
///     ast.to_string(),
///     "Binary(Literal(8) Operator(/) Binary(Literal(4) Operator(/) Literal(2)))"
/// );
/// ```
pub fn parse(tokens: &[Token]) -> Result<Ast, Error> {
    Parser::new(tokens).parse()
}

const MAX_DEPTH: usize = 256;

/// Recursive descent parser over a token slice
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    depth: usize,
    /// Returned once `current` runs past the slice
    eof: Token,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map_or(0, |last| last.column() + last.length());
        Parser {
            tokens,
            current: 0,
            depth: 0,
            eof: Token::eof(end),
        }
    }

    /// Parse a full expression, which must use all the tokens
    pub fn parse(mut self) -> Result<Ast, Error> {
        let ast = self.expression()?;
        if !self.is_at_end() {
            return Err(Error::syntax(self.peek().clone()));
        }
        Ok(ast)
    }

    fn expression(&mut self) -> Result<Ast, Error> {
        let depth = self.depth;
        let mut ast = self.factor()?;
        while let Some(operator) = self.matches(&[TokenKind::Minus, TokenKind::Plus]) {
            // the chain grows to the left, one level per operator
            self.enter()?;
            let right = self.nested(Self::factor)?;
            ast = Ast::Binary {
                left: Box::new(ast),
                operator,
                right: Box::new(right),
            };
        }
        self.depth = depth;
        Ok(ast)
    }

    fn factor(&mut self) -> Result<Ast, Error> {
        let mut ast = self.primary()?;
        while let Some(operator) = self.matches(&[TokenKind::Slash, TokenKind::Star]) {
            let right = self.nested(Self::factor)?;
            ast = Ast::Binary {
                left: Box::new(ast),
                operator,
                right: Box::new(right),
            };
        }
        Ok(ast)
    }

    fn primary(&mut self) -> Result<Ast, Error> {
        if let Some(operator) = self.matches(&[TokenKind::Minus, TokenKind::Plus]) {
            let operand = self.nested(Self::primary)?;
            return Ok(Ast::Unary {
                operator,
                operand: Box::new(operand),
            });
        }

        if self.matches(&[TokenKind::LeftParen]).is_some() {
            let inner = self.nested(Self::expression)?;
            self.expect(TokenKind::RightParen, "Expected ')' after expression")?;
            return Ok(Ast::Grouping(Box::new(inner)));
        }

        if let Some(number) = self.matches(&[TokenKind::Number]) {
            // Number tokens always carry their value
            let value = number.literal().unwrap_or(f64::NAN);
            return Ok(Ast::Literal(value));
        }

        if let Some(name) = self.matches(&[TokenKind::Function]) {
            self.expect(TokenKind::LeftParen, "Expected '(' after function call")?;
            if name.lexeme() == POW {
                return self.pow_call();
            }
            let argument = self.nested(Self::expression)?;
            self.expect(TokenKind::RightParen, "Expected ')' after function params")?;
            return Ok(Ast::Function {
                name,
                argument: Box::new(argument),
            });
        }

        Err(Error::syntax(self.peek().clone()))
    }

    fn pow_call(&mut self) -> Result<Ast, Error> {
        let base = self.nested(Self::expression)?;
        self.expect(TokenKind::Comma, "Expected ',' after first argument of pow")?;
        let exponent = self.nested(Self::expression)?;
        self.expect(TokenKind::RightParen, "Expected ')' after function params")?;
        Ok(Ast::Pow {
            base: Box::new(base),
            exponent: Box::new(exponent),
        })
    }

    /// Parse a subtree with `rule`, one level deeper
    fn nested(&mut self, rule: fn(&mut Self) -> Result<Ast, Error>) -> Result<Ast, Error> {
        self.enter()?;
        let ast = rule(self);
        self.depth -= 1;
        ast
    }

    fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::with_message(
                ErrorKind::Syntax,
                self.peek().clone(),
                "Expression nested too deeply",
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Consume the current token if it has one of the `kinds`
    fn matches(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.iter().any(|&kind| self.check(kind)) {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    /// Consume a token of `kind`, or fail on the previous token with `message`
    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<(), Error> {
        if self.check(kind) {
            self.advance();
            return Ok(());
        }
        Err(Error::with_message(
            ErrorKind::Syntax,
            self.previous().clone(),
            message,
        ))
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind() == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind() == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    fn previous(&self) -> &Token {
        self.tokens
            .get(self.current.saturating_sub(1))
            .unwrap_or(&self.eof)
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::ast::Ast;
    use crate::error::{Error, ErrorKind};
    use crate::lexer::scan;
    use test_case::test_case;

    fn compile(source: &str) -> Result<String, Error> {
        parse(&scan(source)?).map(|ast| ast.to_string())
    }

    #[test_case("1 + 2" => "Binary(Literal(1) Operator(+) Literal(2))" ; "addition")]
    #[test_case("1 - 2 + 3" => "Binary(Binary(Literal(1) Operator(-) Literal(2)) Operator(+) Literal(3))" ; "additive chain leans left")]
    #[test_case("1 * 2 / 3" => "Binary(Literal(1) Operator(*) Binary(Literal(2) Operator(/) Literal(3)))" ; "multiplicative chain leans right")]
    #[test_case("1 + 2 * 3" => "Binary(Literal(1) Operator(+) Binary(Literal(2) Operator(*) Literal(3)))" ; "precedence")]
    #[test_case("--1" => "Unary(- Unary(- Literal(1)))" ; "nested unary")]
    #[test_case("-2 * 3" => "Binary(Unary(- Literal(2)) Operator(*) Literal(3))" ; "unary binds tighter than star")]
    #[test_case("(1.5)" => "Grouping(Literal(1.5))" ; "grouping")]
    #[test_case("sqrt(4)" => "FunCall(sqrt(Literal(4)))" ; "function call")]
    #[test_case("pow(2, 1 + 1)" => "Pow(Base=Literal(2), Exponent=Binary(Literal(1) Operator(+) Literal(1)))" ; "pow call")]
    fn debug_string(source: &str) -> String {
        compile(source).unwrap()
    }

    #[test]
    fn nested_tree() {
        assert_eq!(
            compile("-1+2-((1-cos(1.1))*3)+pow(2,4)").unwrap(),
            "Binary(\
                Binary(\
                    Binary(Unary(- Literal(1)) Operator(+) Literal(2)) \
                    Operator(-) \
                    Grouping(Binary(\
                        Grouping(Binary(Literal(1) Operator(-) FunCall(cos(Literal(1.1))))) \
                        Operator(*) \
                        Literal(3)\
                    ))\
                ) \
                Operator(+) \
                Pow(Base=Literal(2), Exponent=Literal(4))\
            )"
        );
    }

    #[test_case("+" => ("Expected expression, found 'EOF'".to_string(), 2) ; "lonely plus")]
    #[test_case("1 +" => ("Expected expression, found 'EOF'".to_string(), 4) ; "missing right operand")]
    #[test_case("()" => ("Expected expression, found ')'".to_string(), 1) ; "empty grouping")]
    #[test_case("(1 + 2" => ("Expected ')' after expression".to_string(), 5) ; "unclosed grouping")]
    #[test_case("sin()" => ("Expected expression, found ')'".to_string(), 4) ; "empty call")]
    #[test_case("sin 1" => ("Expected '(' after function call".to_string(), 0) ; "call without paren")]
    #[test_case("sin(1" => ("Expected ')' after function params".to_string(), 4) ; "unclosed call")]
    #[test_case("pow(2 3)" => ("Expected ',' after first argument of pow".to_string(), 4) ; "pow without comma")]
    #[test_case("pow(2, 3" => ("Expected ')' after function params".to_string(), 7) ; "unclosed pow")]
    #[test_case("1 2" => ("Expected expression, found '2'".to_string(), 2) ; "leftover number")]
    #[test_case("1 +1." => ("Expected expression, found '.'".to_string(), 4) ; "leftover dot")]
    #[test_case("1, 2" => ("Expected expression, found ','".to_string(), 1) ; "comma outside pow")]
    fn errors(source: &str) -> (String, usize) {
        let error = compile(source).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Syntax);
        (error.message().to_string(), error.token().column())
    }

    #[test]
    fn only_the_first_error_is_reported() {
        let error = compile("sin(cos)12").unwrap_err();
        assert_eq!(error.message(), "Expected '(' after function call");
        assert_eq!(error.token().lexeme(), "cos");
    }

    #[test]
    fn streams_without_eof() {
        let tokens = scan("1 + 2").unwrap();
        assert_eq!(parse(&tokens[..1]), Ok(Ast::Literal(1.0)));

        let error = parse(&tokens[..2]).unwrap_err();
        assert_eq!(error.message(), "Expected expression, found 'EOF'");
        assert_eq!(error.token().column(), 3);

        let error = parse(&[]).unwrap_err();
        assert_eq!(error.message(), "Expected expression, found 'EOF'");
        assert_eq!(error.token().column(), 0);
    }

    #[test_case(format!("{}1", "(".repeat(100_000)) ; "open parens")]
    #[test_case(format!("{}1", "-".repeat(100_000)) ; "unary chain")]
    #[test_case(format!("1{}", "*1".repeat(100_000)) ; "product")]
    #[test_case(format!("1{}", "+1".repeat(100_000)) ; "sum")]
    #[test_case(format!("{}1{}", "sqrt(".repeat(1_000), ")".repeat(1_000)) ; "calls")]
    fn too_deep(source: String) {
        let error = compile(&source).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert_eq!(error.message(), "Expression nested too deeply");
    }

    #[test]
    fn deep_but_allowed() {
        let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert!(compile(&source).is_ok());
        let source = format!("1{}", "+1".repeat(200));
        assert!(compile(&source).is_ok());
    }
}
