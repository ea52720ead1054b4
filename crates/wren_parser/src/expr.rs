//! Expression parsing — binding-power driven binary ladder over a
//! recursive-descent core for prefix, call chains, and primaries.

use wren_ast::expr::*;
use wren_ast::stmt::{Body, Parameter};
use wren_lexer::TokenKind;

use crate::parser::Parser;

/// Binding power for infix operators: (left_bp, right_bp).
/// Higher = tighter binding. Left-assoc: right_bp = left_bp + 1.
/// Right-assoc: right_bp = left_bp - 1.
fn infix_bp(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Assignment (right-associative)
        TokenKind::Equal => Some((2, 1)),

        TokenKind::PipePipe => Some((5, 6)),
        TokenKind::AmpAmp => Some((7, 8)),
        TokenKind::EqualEqual | TokenKind::BangEqual => Some((9, 10)),
        TokenKind::Is => Some((11, 12)),
        TokenKind::Less | TokenKind::LessEqual | TokenKind::Greater | TokenKind::GreaterEqual => {
            Some((13, 14))
        }
        TokenKind::Pipe => Some((15, 16)),
        TokenKind::Caret => Some((17, 18)),
        TokenKind::Amp => Some((19, 20)),
        TokenKind::LessLess | TokenKind::GreaterGreater => Some((21, 22)),
        TokenKind::DotDot | TokenKind::DotDotDot => Some((23, 24)),
        TokenKind::Plus | TokenKind::Minus => Some((25, 26)),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((27, 28)),
        _ => None,
    }
}

/// The `?:` conditional sits between assignment and logical or.
const CONDITIONAL_BP: u8 = 4;

/// Map keys stop below the conditional so that the entry's `:` is
/// not swallowed as a ternary branch.
const MAP_KEY_BP: u8 = CONDITIONAL_BP + 1;

impl Parser<'_> {
    /// Parse an expression at the lowest precedence (assignment).
    pub(crate) fn parse_expression(&mut self) -> Expr {
        self.parse_precedence(0)
    }

    fn parse_precedence(&mut self, min_bp: u8) -> Expr {
        let mut lhs = self.parse_unary();

        loop {
            if self.at(TokenKind::Question) && CONDITIONAL_BP >= min_bp {
                self.advance();
                self.ignore_line();
                let then_branch = self.parse_precedence(0);
                self.expect(TokenKind::Colon, "expected ':' in conditional expression");
                self.ignore_line();
                let else_branch = self.parse_precedence(0);
                lhs = Expr::Conditional(Box::new(ConditionalExpr {
                    condition: lhs,
                    then_branch,
                    else_branch,
                }));
                continue;
            }

            let Some((left_bp, right_bp)) = infix_bp(&self.current.kind) else {
                break;
            };
            if left_bp < min_bp {
                break;
            }

            let operator = self.advance();
            self.ignore_line();
            let right = self.parse_precedence(right_bp);

            lhs = if operator.kind == TokenKind::Equal {
                Expr::Assignment(Box::new(AssignmentExpr {
                    target: lhs,
                    value: right,
                }))
            } else {
                Expr::Infix(Box::new(InfixExpr {
                    left: lhs,
                    operator,
                    right,
                }))
            };
        }

        lhs
    }

    /// Prefix operators `-`, `!`, `~`. Right-recursive, binding
    /// tighter than any binary operator but looser than call chains.
    fn parse_unary(&mut self) -> Expr {
        if matches!(
            self.current.kind,
            TokenKind::Minus | TokenKind::Bang | TokenKind::Tilde
        ) {
            let operator = self.advance();
            let operand = self.parse_unary();
            return Expr::Prefix(Box::new(PrefixExpr { operator, operand }));
        }
        self.parse_call()
    }

    /// A primary followed by any number of subscripts and dotted
    /// method accesses. A chain may continue past newlines, but only
    /// when a `.` follows them: the newlines are read speculatively
    /// and pushed back if the chain is over.
    fn parse_call(&mut self) -> Expr {
        let mut expr = self.parse_primary();
        loop {
            match self.current.kind {
                TokenKind::LeftBracket => {
                    let left_bracket = self.advance();
                    self.ignore_line();
                    let mut arguments = Vec::new();
                    if !self.at(TokenKind::RightBracket) {
                        loop {
                            arguments.push(self.parse_expression());
                            if self.match_token(TokenKind::Comma).is_none() {
                                break;
                            }
                            self.ignore_line();
                        }
                    }
                    let right_bracket =
                        self.expect(TokenKind::RightBracket, "expected ']' after subscript");
                    expr = Expr::Subscript(Box::new(SubscriptExpr {
                        receiver: expr,
                        left_bracket,
                        arguments,
                        right_bracket,
                    }));
                }
                TokenKind::Dot => {
                    self.advance();
                    self.ignore_line();
                    let name = self.expect_name("expected method name after '.'");
                    let (arguments, block_argument) = self.parse_call_suffix();
                    expr = Expr::Call(Box::new(CallExpr {
                        receiver: Some(expr),
                        name,
                        arguments,
                        block_argument,
                    }));
                }
                TokenKind::Line => {
                    let mut newlines = Vec::new();
                    while self.at(TokenKind::Line) {
                        newlines.push(self.advance());
                    }
                    if !self.at(TokenKind::Dot) {
                        // Not a continued chain: restore every
                        // speculatively read token.
                        for token in newlines.into_iter().rev() {
                            self.push_back(token);
                        }
                        break;
                    }
                    // The dot commits the chain; the newlines vanish.
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_primary(&mut self) -> Expr {
        match self.current.kind {
            TokenKind::True | TokenKind::False => Expr::Bool(self.advance()),
            TokenKind::Null => Expr::Null(self.advance()),
            TokenKind::This => Expr::This(self.advance()),
            TokenKind::Number(_) => Expr::Num(self.advance()),
            TokenKind::String => Expr::String(self.advance()),
            TokenKind::Field(_) => Expr::Field(self.advance()),
            TokenKind::StaticField(_) => Expr::StaticField(self.advance()),
            TokenKind::Interpolation => self.parse_interpolation(),
            TokenKind::Name(_) => {
                // A bare identifier is a Call with no receiver; the
                // suffix distinguishes `foo`, `foo()` and `foo {..}`.
                let name = self.advance();
                let (arguments, block_argument) = self.parse_call_suffix();
                Expr::Call(Box::new(CallExpr {
                    receiver: None,
                    name,
                    arguments,
                    block_argument,
                }))
            }
            TokenKind::Super => {
                let keyword = self.advance();
                let name = if self.match_token(TokenKind::Dot).is_some() {
                    Some(self.expect_name("expected method name after 'super.'"))
                } else {
                    None
                };
                let (arguments, block_argument) = self.parse_call_suffix();
                Expr::Super(Box::new(SuperExpr {
                    keyword,
                    name,
                    arguments,
                    block_argument,
                }))
            }
            TokenKind::LeftParen => {
                let left_paren = self.advance();
                self.ignore_line();
                let expression = self.parse_expression();
                let right_paren =
                    self.expect(TokenKind::RightParen, "expected ')' after expression");
                Expr::Grouping(Box::new(GroupingExpr {
                    left_paren,
                    expression,
                    right_paren,
                }))
            }
            TokenKind::LeftBracket => self.parse_list_literal(),
            TokenKind::LeftBrace => self.parse_map_literal(),
            _ => {
                self.error_at_current("expected expression");
                Expr::Null(self.advance())
            }
        }
    }

    fn parse_list_literal(&mut self) -> Expr {
        let left_bracket = self.advance();
        let mut elements = Vec::new();
        loop {
            self.ignore_line();
            if self.at(TokenKind::RightBracket) {
                break;
            }
            elements.push(self.parse_expression());
            if self.match_token(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.ignore_line();
        let right_bracket = self.expect(TokenKind::RightBracket, "expected ']' after list elements");
        Expr::List(Box::new(ListExpr {
            left_bracket,
            elements,
            right_bracket,
        }))
    }

    fn parse_map_literal(&mut self) -> Expr {
        let left_brace = self.advance();
        let mut entries = Vec::new();
        loop {
            self.ignore_line();
            if self.at(TokenKind::RightBrace) {
                break;
            }
            let key = self.parse_precedence(MAP_KEY_BP);
            self.expect(TokenKind::Colon, "expected ':' after map key");
            self.ignore_line();
            let value = self.parse_expression();
            entries.push(MapEntry { key, value });
            if self.match_token(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.ignore_line();
        let right_brace = self.expect(TokenKind::RightBrace, "expected '}' after map entries");
        Expr::Map(Box::new(MapExpr {
            left_brace,
            entries,
            right_brace,
        }))
    }

    /// Alternating interpolation pieces and expressions, closed by
    /// the final plain-string piece.
    fn parse_interpolation(&mut self) -> Expr {
        let mut strings = Vec::new();
        let mut expressions = Vec::new();
        while self.at(TokenKind::Interpolation) {
            strings.push(self.advance());
            self.ignore_line();
            expressions.push(self.parse_expression());
            self.ignore_line();
        }
        strings.push(self.expect_string("expected end of string interpolation"));
        Expr::Interpolation(Box::new(InterpolationExpr {
            strings,
            expressions,
        }))
    }

    /// The optional call suffix shared by named calls, bare names,
    /// and `super`: `( arg-list )` (possibly empty) and a block
    /// argument `{ |params| body }`. Neither present means a getter.
    pub(crate) fn parse_call_suffix(&mut self) -> (Option<Vec<Expr>>, Option<Body>) {
        let mut arguments = None;
        if self.match_token(TokenKind::LeftParen).is_some() {
            self.ignore_line();
            let mut args = Vec::new();
            if !self.at(TokenKind::RightParen) {
                loop {
                    args.push(self.parse_expression());
                    if self.match_token(TokenKind::Comma).is_none() {
                        break;
                    }
                    self.ignore_line();
                }
            }
            self.expect(TokenKind::RightParen, "expected ')' after arguments");
            arguments = Some(args);
        }

        let block_argument = if let Some(left_brace) = self.match_token(TokenKind::LeftBrace) {
            let parameters = if self.match_token(TokenKind::Pipe).is_some() {
                let parameters = self.parse_parameter_list();
                self.expect(TokenKind::Pipe, "expected '|' after block parameters");
                Some(parameters)
            } else {
                None
            };
            Some(self.finish_body(parameters, left_brace))
        } else {
            None
        };

        (arguments, block_argument)
    }

    /// Comma-separated parameters, each with an optional annotation.
    pub(crate) fn parse_parameter_list(&mut self) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        loop {
            let name = self.expect_name("expected parameter name");
            let type_annotation = self.parse_type_annotation();
            parameters.push(Parameter {
                name,
                type_annotation,
            });
            if self.match_token(TokenKind::Comma).is_none() {
                break;
            }
            self.ignore_line();
        }
        parameters
    }
}
