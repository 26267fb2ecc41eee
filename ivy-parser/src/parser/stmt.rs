use super::*;

impl<'a> Parser<'a> {
    /// Parses a statement, dispatching on the current keyword.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        trace!(token = %self.current().kind, "parsing statement");
        match self.current().kind {
            TokenKind::Var => self.parse_var_declaration(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::If => self.parse_if_else_stmt(),
            TokenKind::Function => self.parse_fn_declaration(),
            _ => {
                // expression statement
                let token = self.current().clone();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                Ok(Stmt::ExprStmt { token, expr })
            }
        }
    }

    /// Parses statements between `{` and the matching `}`.
    pub fn parse_block(&mut self) -> ParseResult<Block> {
        let token = self.expect(TokenKind::OpenBrace)?;

        let mut body = Vec::new();
        while self.eat(TokenKind::CloseBrace)?.is_none() {
            self.not_eof(Delimited::Block, &token)?;
            body.push(self.parse_stmt()?);
        }

        Ok(Block { token, body })
    }

    fn parse_var_declaration(&mut self) -> ParseResult<Stmt> {
        let token = self.expect(TokenKind::Var)?;
        let ident = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::Assign)?;
        let initializer = self.parse_expr()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::VarDeclaration {
            token,
            ident,
            initializer,
        })
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let token = self.expect(TokenKind::Return)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::ReturnStmt { token, expr })
    }

    fn parse_if_else_stmt(&mut self) -> ParseResult<Stmt> {
        let token = self.expect(TokenKind::If)?;
        self.expect(TokenKind::OpenParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::CloseParen)?;

        let consequence = self.parse_block()?;
        let alternative = match self.eat(TokenKind::Else)? {
            Some(_) => Some(self.parse_block()?),
            None => None,
        };

        Ok(Stmt::IfElse {
            token,
            condition,
            consequence,
            alternative,
        })
    }

    fn parse_fn_declaration(&mut self) -> ParseResult<Stmt> {
        let token = self.expect(TokenKind::Function)?;
        let ident = self.expect(TokenKind::Identifier)?.text;

        let open = self.expect(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        if self.eat(TokenKind::CloseParen)?.is_none() {
            loop {
                self.not_eof(Delimited::Parameters, &open)?;
                params.push(self.expect(TokenKind::Identifier)?.text);

                if self.eat(TokenKind::CloseParen)?.is_some() {
                    break;
                }
                self.not_eof(Delimited::Parameters, &open)?;
                self.expect(TokenKind::Comma)?;
            }
        }

        let body = self.parse_block()?;
        self.eat(TokenKind::Semi)?; // optional trailing semicolon

        Ok(Stmt::FnDeclaration {
            token,
            ident,
            params,
            body: Rc::new(body),
        })
    }
}
