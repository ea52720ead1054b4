//! Statement, definition, class, and body parsing.

use wren_ast::stmt::*;
use wren_lexer::{Token, TokenKind};

use crate::parser::Parser;

impl Parser<'_> {
    /// A definition or, failing that, a statement. Definitions are
    /// recognized in order: `class`, `foreign class`, `import`,
    /// `var`.
    pub(crate) fn parse_definition(&mut self) -> Stmt {
        if let Some(class_keyword) = self.match_token(TokenKind::Class) {
            return self.parse_class(None, class_keyword);
        }
        if let Some(foreign_keyword) = self.match_token(TokenKind::Foreign) {
            let class_keyword = self.expect(TokenKind::Class, "expected 'class' after 'foreign'");
            return self.parse_class(Some(foreign_keyword), class_keyword);
        }
        if let Some(keyword) = self.match_token(TokenKind::Import) {
            return self.parse_import(keyword);
        }
        if let Some(keyword) = self.match_token(TokenKind::Var) {
            return self.parse_var(keyword);
        }
        self.parse_statement()
    }

    // ---- Definitions ----

    /// `import "path" (for Name (as Alias)? (, Name (as Alias)?)*)?`
    /// An alias replaces the original name in the variable list.
    fn parse_import(&mut self, keyword: Token) -> Stmt {
        let path = self.expect_string("expected import path string");
        let variables = if self.match_token(TokenKind::For).is_some() {
            let mut variables = Vec::new();
            loop {
                let name = self.expect_name("expected imported variable name");
                let name = if self.at_name_text("as") {
                    self.advance();
                    self.expect_name("expected import alias")
                } else {
                    name
                };
                variables.push(name);
                if self.match_token(TokenKind::Comma).is_none() {
                    break;
                }
                self.ignore_line();
            }
            Some(variables)
        } else {
            None
        };
        Stmt::Import(Box::new(ImportStmt {
            keyword,
            path,
            variables,
        }))
    }

    fn parse_var(&mut self, keyword: Token) -> Stmt {
        let name = self.expect_name("expected variable name");
        let type_annotation = self.parse_type_annotation();
        let initializer = if self.match_token(TokenKind::Equal).is_some() {
            self.ignore_line();
            Some(self.parse_expression())
        } else {
            None
        };
        Stmt::Var(Box::new(VarStmt {
            keyword,
            name,
            type_annotation,
            initializer,
        }))
    }

    /// `: TypeName`, the optional non-standard annotation.
    pub(crate) fn parse_type_annotation(&mut self) -> Option<TypeAnnotation> {
        self.match_token(TokenKind::Colon)?;
        let name = self.expect_name("expected type name after ':'");
        Some(TypeAnnotation { name })
    }

    // ---- Classes ----

    fn parse_class(&mut self, foreign_keyword: Option<Token>, class_keyword: Token) -> Stmt {
        let name = self.expect_name("expected class name");
        let superclass = if self.match_token(TokenKind::Is).is_some() {
            Some(self.expect_name("expected superclass name"))
        } else {
            None
        };
        self.expect(TokenKind::LeftBrace, "expected '{' before class body");
        self.ignore_line();

        let mut methods = Vec::new();
        while !self.at(TokenKind::RightBrace) && !self.at(TokenKind::Eof) {
            methods.push(self.parse_method());
            if self.at(TokenKind::RightBrace) || self.at(TokenKind::Eof) {
                break;
            }
            self.consume_line("expected newline after method");
        }
        let right_brace = self.expect(TokenKind::RightBrace, "expected '}' after class body");

        Stmt::Class(Box::new(ClassStmt {
            foreign_keyword,
            class_keyword,
            name,
            superclass,
            methods,
            right_brace,
        }))
    }

    /// One class member: modifiers, a signature (subscript, infix or
    /// prefix operator, or name), an optional parameter list or
    /// setter, an optional return annotation, then a body unless the
    /// method is foreign.
    fn parse_method(&mut self) -> Method {
        let foreign_keyword = self.match_token(TokenKind::Foreign);
        let static_keyword = self.match_token(TokenKind::Static);
        let construct_keyword = self.match_token(TokenKind::Construct);

        let mut parameters: Option<Vec<Parameter>> = None;
        let mut allow_parameters = true;
        let name;

        if let Some(left_bracket) = self.match_token(TokenKind::LeftBracket) {
            // Subscript signature: the bracket token names the method.
            name = left_bracket;
            parameters = Some(self.parse_parameter_list());
            self.expect(
                TokenKind::RightBracket,
                "expected ']' after subscript parameters",
            );
            allow_parameters = false;
        } else if self.current.kind.is_infix_operator() {
            name = self.advance();
        } else if self.at(TokenKind::Bang) || self.at(TokenKind::Tilde) {
            name = self.advance();
            allow_parameters = false;
        } else {
            name = self.expect_name("expected method name");
        }

        let mut is_setter = false;
        if self.match_token(TokenKind::Equal).is_some() {
            // Setter: `name=(value)` or `[index]=(value)`.
            is_setter = true;
            self.expect(TokenKind::LeftParen, "expected '(' after '='");
            let value = Parameter {
                name: self.expect_name("expected setter parameter name"),
                type_annotation: self.parse_type_annotation(),
            };
            self.expect(TokenKind::RightParen, "expected ')' after setter parameter");
            parameters.get_or_insert_with(Vec::new).push(value);
        } else if allow_parameters && self.match_token(TokenKind::LeftParen).is_some() {
            let list = if self.at(TokenKind::RightParen) {
                Vec::new()
            } else {
                self.parse_parameter_list()
            };
            self.expect(TokenKind::RightParen, "expected ')' after parameters");
            parameters = Some(list);
        }

        let return_type = if self.match_token(TokenKind::Arrow).is_some() {
            self.ignore_line();
            Some(TypeAnnotation {
                name: self.expect_name("expected return type after '->'"),
            })
        } else {
            None
        };

        let body = if foreign_keyword.is_some() {
            None
        } else {
            let left_brace = self.expect(TokenKind::LeftBrace, "expected '{' before method body");
            Some(self.finish_body(parameters.clone(), left_brace))
        };

        Method {
            foreign_keyword,
            static_keyword,
            construct_keyword,
            name,
            is_setter,
            parameters,
            return_type,
            body,
        }
    }

    // ---- Bodies ----

    /// The inside of `{ ... }` after the opening brace: empty, a
    /// single expression on the same line, or newline-separated
    /// statements.
    pub(crate) fn finish_body(
        &mut self,
        parameters: Option<Vec<Parameter>>,
        left_brace: Token,
    ) -> Body {
        if let Some(right_brace) = self.match_token(TokenKind::RightBrace) {
            return Body {
                parameters,
                expression: None,
                statements: None,
                left_brace,
                right_brace,
            };
        }

        if !self.match_line() {
            let expression = self.parse_expression();
            self.ignore_line();
            let right_brace = self.expect(TokenKind::RightBrace, "expected '}' at end of body");
            return Body {
                parameters,
                expression: Some(expression),
                statements: None,
                left_brace,
                right_brace,
            };
        }

        let mut statements = Vec::new();
        while !self.at(TokenKind::RightBrace) && !self.at(TokenKind::Eof) {
            statements.push(self.parse_definition());
            if self.at(TokenKind::RightBrace) || self.at(TokenKind::Eof) {
                break;
            }
            self.consume_line("expected newline after statement");
        }
        let right_brace = self.expect(TokenKind::RightBrace, "expected '}' at end of body");
        Body {
            parameters,
            expression: None,
            statements: Some(statements),
            left_brace,
            right_brace,
        }
    }

    // ---- Statements ----

    fn parse_statement(&mut self) -> Stmt {
        match self.current.kind {
            TokenKind::Break => Stmt::Break(self.advance()),
            TokenKind::Continue => Stmt::Continue(self.advance()),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Return => {
                let keyword = self.advance();
                let value = if self.at(TokenKind::Line) || self.at(TokenKind::Eof) {
                    None
                } else {
                    Some(self.parse_expression())
                };
                Stmt::Return(Box::new(ReturnStmt { keyword, value }))
            }
            TokenKind::LeftBrace => self.parse_block(),
            _ => Stmt::Expression(self.parse_expression()),
        }
    }

    fn parse_if(&mut self) -> Stmt {
        let keyword = self.advance();
        self.expect(TokenKind::LeftParen, "expected '(' after 'if'");
        self.ignore_line();
        let condition = self.parse_expression();
        self.expect(TokenKind::RightParen, "expected ')' after if condition");
        let then_branch = self.parse_statement();
        let else_branch = if self.match_token(TokenKind::Else).is_some() {
            Some(self.parse_statement())
        } else {
            None
        };
        Stmt::If(Box::new(IfStmt {
            keyword,
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn parse_for(&mut self) -> Stmt {
        let keyword = self.advance();
        self.expect(TokenKind::LeftParen, "expected '(' after 'for'");
        let variable = self.expect_name("expected loop variable name");
        let type_annotation = self.parse_type_annotation();
        self.expect(TokenKind::In, "expected 'in' after loop variable");
        self.ignore_line();
        let iterator = self.parse_expression();
        self.expect(TokenKind::RightParen, "expected ')' after loop iterator");
        let body = self.parse_statement();
        Stmt::For(Box::new(ForStmt {
            keyword,
            variable,
            type_annotation,
            iterator,
            body,
        }))
    }

    fn parse_while(&mut self) -> Stmt {
        let keyword = self.advance();
        self.expect(TokenKind::LeftParen, "expected '(' after 'while'");
        self.ignore_line();
        let condition = self.parse_expression();
        self.expect(TokenKind::RightParen, "expected ')' after while condition");
        let body = self.parse_statement();
        Stmt::While(Box::new(WhileStmt {
            keyword,
            condition,
            body,
        }))
    }

    /// Statement block: `{ (definition newline)* }`.
    fn parse_block(&mut self) -> Stmt {
        let left_brace = self.advance();
        self.ignore_line();
        let mut statements = Vec::new();
        while !self.at(TokenKind::RightBrace) && !self.at(TokenKind::Eof) {
            statements.push(self.parse_definition());
            if self.at(TokenKind::RightBrace) || self.at(TokenKind::Eof) {
                break;
            }
            self.consume_line("expected newline after statement");
        }
        let right_brace = self.expect(TokenKind::RightBrace, "expected '}' after block");
        Stmt::Block(Box::new(BlockStmt {
            left_brace,
            statements,
            right_brace,
        }))
    }
}
