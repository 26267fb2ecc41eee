use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    ///
    /// There is no precedence table: after the primary expression, a binary operator
    /// makes the whole remainder of the expression its right operand. Operator chains
    /// therefore group to the right (`2 * 5 + 1` is `2 * (5 + 1)`).
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_primary_expr()?;

        let op = match BinOp::from_token(self.current().kind) {
            Some(op) => op,
            None => return Ok(lhs), // not a valid binop, stop parsing
        };
        let token = self.next()?;
        let rhs = self.parse_expr()?;

        Ok(Expr::Binary {
            token,
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        })
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        match self.current().kind {
            TokenKind::Integer | TokenKind::True | TokenKind::False => self.parse_literal_expr(),
            TokenKind::Identifier => self.parse_identifier_or_call_expr(),
            found => Err(ParseError::ExpectedExpression {
                found,
                span: self.current().span.clone(),
            }),
        }
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A literal can be either an integer literal or a bool literal.
    fn parse_literal_expr(&mut self) -> ParseResult<Expr> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Integer => match token.text.parse() {
                Ok(value) => Ok(Expr::IntegerLit { token, value }),
                Err(_) => Err(ParseError::InvalidInteger {
                    text: token.text,
                    span: token.span,
                }),
            },
            TokenKind::True => Ok(Expr::BoolLit { token, value: true }),
            _ => Ok(Expr::BoolLit {
                token,
                value: false,
            }),
        }
    }

    /* Expressions.Identifier */
    /// Parses an identifier or, when the identifier is directly followed by `(`, a call expression.
    fn parse_identifier_or_call_expr(&mut self) -> ParseResult<Expr> {
        if self.peek().kind != TokenKind::OpenParen {
            let token = self.expect(TokenKind::Identifier)?;
            return Ok(Expr::Identifier {
                ident: token.text.clone(),
                token,
            });
        }

        let token = self.expect(TokenKind::Identifier)?;
        let open = self.expect(TokenKind::OpenParen)?;

        let mut args = Vec::new();
        if self.eat(TokenKind::CloseParen)?.is_none() {
            loop {
                self.not_eof(Delimited::Arguments, &open)?;
                args.push(self.parse_expr()?);

                if self.eat(TokenKind::CloseParen)?.is_some() {
                    break;
                }
                self.not_eof(Delimited::Arguments, &open)?;
                self.expect(TokenKind::Comma)?;
            }
        }

        Ok(Expr::FnCall {
            ident: token.text.clone(),
            token,
            args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn expr(source: &str) -> String {
        let source = source.into();
        let mut parser = Parser::new(&source).unwrap();
        let ast = parser.parse_expr().unwrap();
        assert_eq!(parser.current().kind, TokenKind::Eof);
        ast.to_string()
    }

    fn expr_err(source: &str) -> ParseError {
        let source = source.into();
        let result = Parser::new(&source).and_then(|mut parser| parser.parse_expr());
        result.unwrap_err()
    }

    #[test]
    fn test_literal() {
        assert_snapshot!(expr("true"), @"true");
        assert_snapshot!(expr("false"), @"false");
        assert_snapshot!(expr("1"), @"1");
        assert_snapshot!(expr("9223372036854775807"), @"9223372036854775807");
    }

    #[test]
    fn test_integer_too_large() {
        assert_eq!(
            expr_err("9223372036854775808"),
            ParseError::InvalidInteger {
                text: "9223372036854775808".to_string(),
                span: 0..19
            }
        );
    }

    #[test]
    fn test_binary_expr() {
        assert_snapshot!(expr("1 + 1"), @"(+ 1 1)");
        assert_snapshot!(expr("5 != 4"), @"(!= 5 4)");
        assert_snapshot!(expr("a < b"), @"(< a b)");
    }

    #[test]
    fn test_binary_chains_group_right() {
        assert_snapshot!(expr("2 * 5 + 1"), @"(* 2 (+ 5 1))");
        assert_snapshot!(expr("10 - 4 - 3"), @"(- 10 (- 4 3))");
        assert_snapshot!(expr("1 == 2 - 1"), @"(== 1 (- 2 1))");
        assert_snapshot!(expr("1 + 2 == 3"), @"(+ 1 (== 2 3))");
    }

    #[test]
    fn test_identifier() {
        assert_snapshot!(expr("foo"), @"foo");
    }

    #[test]
    fn test_fn_call() {
        assert_snapshot!(expr("foo()"), @"(call foo)");
        assert_snapshot!(expr("foo(1, bar)"), @"(call foo 1 bar)");
        assert_snapshot!(expr("foo(1, bar, baz())"), @"(call foo 1 bar (call baz))");
        assert_snapshot!(expr("foo(1 + 2 * 3, x)"), @"(call foo (+ 1 (* 2 3)) x)");
        assert_snapshot!(expr("foo(x) * 2"), @"(* (call foo x) 2)");
    }

    #[test]
    fn test_fn_call_errors() {
        assert!(matches!(
            expr_err("foo(1,)"),
            ParseError::ExpectedExpression {
                found: TokenKind::CloseParen,
                ..
            }
        ));
        assert!(matches!(
            expr_err("foo(1 2)"),
            ParseError::UnexpectedToken {
                expected: TokenKind::Comma,
                found: TokenKind::Integer,
                ..
            }
        ));
        assert_eq!(
            expr_err("foo(1, 2"),
            ParseError::Unterminated {
                delimited: Delimited::Arguments,
                span: 3..4
            }
        );
    }

    #[test]
    fn test_missing_operand() {
        assert!(matches!(
            expr_err("1 +"),
            ParseError::ExpectedExpression {
                found: TokenKind::Eof,
                ..
            }
        ));
        assert!(matches!(
            expr_err(";"),
            ParseError::ExpectedExpression {
                found: TokenKind::Semi,
                ..
            }
        ));
    }
}
