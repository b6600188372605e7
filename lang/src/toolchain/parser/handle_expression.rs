use super::{ParseError, Parser};
use crate::toolchain::ast::{
    AddOp, ArrayLiteral, AtomLiteral, AtomOfLiteral, DesignatorList, DesignatorOperation,
    Expression, ExpressionList, Flag, Flags, IndexList, Literal, MemoryNew, MulOp, Parenthesis,
    Range, Relation, Set, Span, UnaryExpression, UnaryOp,
};
use crate::toolchain::lexer::{Symbol, Token};

// Tokens that can't start an upper bound, so a '..' before them ends the range.
fn ends_range(symbol: Symbol) -> bool {
    symbol.is_relation()
        || matches!(
            symbol,
            Symbol::SemiColon
                | Symbol::Begin
                | Symbol::Do
                | Symbol::By
                | Symbol::RightBracket
                | Symbol::RightParen
                | Symbol::RightBrace
                | Symbol::Comma
                | Symbol::Colon
                | Symbol::Bar
                | Symbol::Of
                | Symbol::Then
                | Symbol::To
                | Symbol::End
                | Symbol::Else
                | Symbol::Elsif
                | Symbol::Until
                | Symbol::EndOfFile
        )
}

fn starts_designator_operation(symbol: Symbol) -> bool {
    matches!(
        symbol,
        Symbol::LeftParen
            | Symbol::Period
            | Symbol::LeftBracket
            | Symbol::Arrow
            | Symbol::Transpose
    )
}

// Builds a left-deep chain of binary operator nodes.
macro_rules! left_associative {
    ( $self:ident, $is_operator:ident, $operand:ident, $node:ident ) => {{
        let start = $self.context.start();
        let mut left = $self.$operand()?;
        while $self.context.token_kind().$is_operator() {
            let operator = $self.context.consume();
            let right = $self.$operand()?;
            left = Expression::$node($node {
                span: $self.context.span_from(start),
                left: Box::new(left),
                operator,
                right: Box::new(right),
            });
        }
        Ok(left)
    }};
}

impl<'t, 's> Parser<'t, 's> {
    // expression : range_expression [relation range_expression] ;
    //
    // Relations don't chain, a second relational operator is left for the caller.
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.context.start();
        let left = self.parse_range_expression()?;
        if !self.context.token_kind().is_relation() {
            return Ok(left);
        }
        let operator = self.context.consume();
        let right = self.parse_range_expression()?;
        Ok(Expression::Relation(Relation {
            span: self.context.span_from(start),
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    // range_expression : '*'
    //                  | [simple_expression] ['..' [simple_expression] ['BY' simple_expression]]
    //                  ;
    pub fn parse_range_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.context.start();
        if self.context.token_kind() == Symbol::Times {
            let star = self.context.consume();
            return Ok(Expression::Range(Range {
                span: Span::from(star),
                lower: None,
                upto: None,
                upper: None,
                by: None,
                step: None,
                star: Some(star),
            }));
        }

        let lower = if self.context.token_kind() == Symbol::Upto {
            None
        } else {
            let lower = self.parse_simple_expression()?;
            if self.context.token_kind() != Symbol::Upto {
                return Ok(lower);
            }
            Some(Box::new(lower))
        };

        let upto = self.context.consume_checked(Symbol::Upto);
        let upper = if ends_range(self.context.token_kind()) {
            None
        } else {
            Some(Box::new(self.parse_simple_expression()?))
        };
        let (by, step) = match self.context.consume_if(Symbol::By) {
            Some(by) => (Some(by), Some(Box::new(self.parse_simple_expression()?))),
            None => (None, None),
        };

        Ok(Expression::Range(Range {
            span: self.context.span_from(start),
            lower,
            upto: Some(upto),
            upper,
            by,
            step,
            star: None,
        }))
    }

    // simple_expression : term {('+' | '-' | 'OR') term} ;
    pub fn parse_simple_expression(&mut self) -> Result<Expression, ParseError> {
        left_associative!(self, is_add_operator, parse_term, AddOp)
    }

    // term : factor {mul_operator factor} ;
    pub fn parse_term(&mut self) -> Result<Expression, ParseError> {
        left_associative!(self, is_mul_operator, parse_factor, MulOp)
    }

    // factor : ('~' | '+' | '-') factor
    //        | unary_expression
    //        ;
    pub fn parse_factor(&mut self) -> Result<Expression, ParseError> {
        self.nested("factor", Self::parse_factor_alternatives)
    }

    fn parse_factor_alternatives(&mut self) -> Result<Expression, ParseError> {
        match self.context.token_kind() {
            Symbol::Not | Symbol::Plus | Symbol::Minus => {
                let operator = self.context.consume();
                let operand = self.parse_factor()?;
                Ok(Expression::UnaryOp(UnaryOp {
                    span: self.context.span_from(operator.start),
                    operator,
                    operand: Box::new(operand),
                }))
            }
            _ => self.parse_unary_expression(),
        }
    }

    // unary_expression : primary_expression [designator_operations] [flags] ;
    pub fn parse_unary_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.context.start();
        let primary = self.parse_primary_expression()?;
        let designators = if starts_designator_operation(self.context.token_kind()) {
            Some(self.parse_designator_operations()?)
        } else {
            None
        };
        let flags = if self.context.token_kind() == Symbol::LeftBrace {
            Some(self.parse_flags()?)
        } else {
            None
        };

        if designators.is_none() && flags.is_none() {
            return Ok(primary);
        }
        Ok(Expression::UnaryExpression(UnaryExpression {
            span: self.context.span_from(start),
            primary: Box::new(primary),
            designators,
            flags,
        }))
    }

    pub fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.context.start();
        match self.context.token_kind() {
            Symbol::Ident
            | Symbol::Integer
            | Symbol::Real
            | Symbol::String
            | Symbol::Character => Ok(self.parse_literal()),

            Symbol::LeftBrace => self.parse_set(),

            Symbol::LeftBracket => self.parse_array(),

            Symbol::Nil
            | Symbol::Imag
            | Symbol::True
            | Symbol::False
            | Symbol::Self_
            | Symbol::Result => {
                let token = self.context.consume();
                Ok(Expression::AtomLiteral(AtomLiteral { span: Span::from(token), token }))
            }

            Symbol::Address | Symbol::Size => {
                let atom = self.context.consume();
                let (of, operand) = match self.context.consume_if(Symbol::Of) {
                    Some(of) => (Some(of), Some(Box::new(self.parse_factor()?))),
                    None => (None, None),
                };
                Ok(Expression::AtomOfLiteral(AtomOfLiteral {
                    span: self.context.span_from(start),
                    atom,
                    of,
                    operand,
                }))
            }

            Symbol::Alias => {
                let atom = self.context.consume();
                let of = self.context.expect(Symbol::Of, "ALIAS OF expression")?;
                let operand = self.parse_factor()?;
                Ok(Expression::AtomOfLiteral(AtomOfLiteral {
                    span: self.context.span_from(start),
                    atom,
                    of: Some(of),
                    operand: Some(Box::new(operand)),
                }))
            }

            // NEW(p) calls the predeclared procedure, NEW T(...) allocates.
            Symbol::New if self.context.peek_kind(1) == Symbol::LeftParen => {
                let token = self.context.consume();
                Ok(Expression::Literal(Literal {
                    span: Span::from(token),
                    token,
                    text: String::from("NEW"),
                }))
            }

            Symbol::New => {
                let new = self.context.consume();
                let type_name = self.parse_qualified_identifier()?;
                let left = self.context.expect(Symbol::LeftParen, "NEW expression")?;
                let arguments = if self.context.token_kind() == Symbol::RightParen {
                    None
                } else {
                    Some(Box::new(self.parse_expression_list()?))
                };
                let right = self.context.expect(Symbol::RightParen, "NEW expression")?;
                Ok(Expression::MemoryNew(MemoryNew {
                    span: self.context.span_from(start),
                    new,
                    type_name,
                    left,
                    arguments,
                    right,
                }))
            }

            Symbol::LeftParen => {
                let left = self.context.consume();
                let inner = self.parse_expression()?;
                let right = self.context.expect(Symbol::RightParen, "parenthesized expression")?;
                Ok(Expression::Parenthesis(Parenthesis {
                    span: self.context.span_from(start),
                    left,
                    inner: Box::new(inner),
                    right,
                }))
            }

            _ => Err(ParseError::UnexpectedPrimary {
                found: self.context.token(),
                rule: "primary expression",
            }),
        }
    }

    fn parse_literal(&mut self) -> Expression {
        let text = String::from(self.context.text());
        let token = self.context.consume();
        Expression::Literal(Literal { span: Span::from(token), token, text })
    }

    // designator_operations : {'(' [expression_list] ')'
    //                         | '[' [index_list] ']'
    //                         | '.' Ident
    //                         | '^'
    //                         | '`'} ;
    pub fn parse_designator_operations(&mut self) -> Result<DesignatorList, ParseError> {
        let start = self.context.start();
        let mut operations = Vec::new();
        loop {
            let operation_start = self.context.start();
            let operation = match self.context.token_kind() {
                Symbol::LeftParen => {
                    let left = self.context.consume();
                    let arguments = if self.context.token_kind() == Symbol::RightParen {
                        None
                    } else {
                        Some(Box::new(self.parse_expression_list()?))
                    };
                    let right = self.context.expect(Symbol::RightParen, "call")?;
                    DesignatorOperation::Call {
                        span: self.context.span_from(operation_start),
                        left,
                        arguments,
                        right,
                    }
                }
                Symbol::LeftBracket => {
                    let left = self.context.consume();
                    let indexes = if self.context.token_kind() == Symbol::RightBracket {
                        None
                    } else {
                        Some(Box::new(self.parse_index_list()?))
                    };
                    let right = self.context.expect(Symbol::RightBracket, "index")?;
                    DesignatorOperation::Index {
                        span: self.context.span_from(operation_start),
                        left,
                        indexes,
                        right,
                    }
                }
                Symbol::Period => {
                    let period = self.context.consume();
                    let name = self.context.expect_name("field selector")?;
                    DesignatorOperation::DotName {
                        span: self.context.span_from(operation_start),
                        period,
                        name,
                    }
                }
                Symbol::Arrow | Symbol::Transpose => {
                    let token = self.context.consume();
                    DesignatorOperation::Arrow { span: Span::from(token), token }
                }
                _ => break,
            };
            operations.push(operation);
        }
        Ok(DesignatorList { span: self.context.span_from(start), operations })
    }

    // index_list : '?' [',' expression_list]
    //            | expression_list [',' '?' [',' expression_list]]
    //            ;
    //
    // Without a '?' this is just the expression list.
    pub fn parse_index_list(&mut self) -> Result<Expression, ParseError> {
        let start = self.context.start();
        if let Some(question) = self.context.consume_if(Symbol::QuestionMark) {
            let (comma2, right) = self.parse_index_list_right()?;
            return Ok(Expression::IndexList(IndexList {
                span: self.context.span_from(start),
                left: None,
                comma1: None,
                question: Some(question),
                comma2,
                right,
            }));
        }

        let mut items = vec![self.parse_expression()?];
        let mut separators = Vec::new();
        let mut question = None;
        while let Some(comma) = self.context.consume_if(Symbol::Comma) {
            if self.context.token_kind() == Symbol::QuestionMark {
                question = Some((comma, self.context.consume()));
                break;
            }
            separators.push(comma);
            items.push(self.parse_expression()?);
        }
        let left = self.collapse_list(start, items, separators);

        match question {
            None => Ok(left),
            Some((comma1, question)) => {
                let (comma2, right) = self.parse_index_list_right()?;
                Ok(Expression::IndexList(IndexList {
                    span: self.context.span_from(start),
                    left: Some(Box::new(left)),
                    comma1: Some(comma1),
                    question: Some(question),
                    comma2,
                    right,
                }))
            }
        }
    }

    fn parse_index_list_right(
        &mut self,
    ) -> Result<(Option<Token>, Option<Box<Expression>>), ParseError> {
        match self.context.consume_if(Symbol::Comma) {
            Some(comma) => Ok((Some(comma), Some(Box::new(self.parse_expression_list()?)))),
            None => Ok((None, None)),
        }
    }

    // expression_list : expression {',' expression} ;
    pub fn parse_expression_list(&mut self) -> Result<Expression, ParseError> {
        let start = self.context.start();
        let mut items = vec![self.parse_expression()?];
        let mut separators = Vec::new();
        while let Some(comma) = self.context.consume_if(Symbol::Comma) {
            separators.push(comma);
            items.push(self.parse_expression()?);
        }
        Ok(self.collapse_list(start, items, separators))
    }

    // A single item stands for itself.
    fn collapse_list(
        &self,
        start: u32,
        mut items: Vec<Expression>,
        separators: Vec<Token>,
    ) -> Expression {
        if items.len() == 1 && separators.is_empty() {
            if let Some(item) = items.pop() {
                return item;
            }
        }
        Expression::ExpressionList(ExpressionList {
            span: self.context.span_from(start),
            items,
            separators,
        })
    }

    // array : '[' expression_list ']' ;
    pub fn parse_array(&mut self) -> Result<Expression, ParseError> {
        let start = self.context.start();
        let left = self.context.expect(Symbol::LeftBracket, "array")?;
        let elements = self.parse_expression_list()?;
        let right = self.context.expect(Symbol::RightBracket, "array")?;
        Ok(Expression::Array(ArrayLiteral {
            span: self.context.span_from(start),
            left,
            elements: Box::new(elements),
            right,
        }))
    }

    // set : '{' [range_expression {',' range_expression}] '}' ;
    pub fn parse_set(&mut self) -> Result<Expression, ParseError> {
        let start = self.context.start();
        let left = self.context.expect(Symbol::LeftBrace, "set")?;
        let mut elements = Vec::new();
        let mut separators = Vec::new();
        if self.context.token_kind() != Symbol::RightBrace {
            elements.push(self.parse_range_expression()?);
            while let Some(comma) = self.context.consume_if(Symbol::Comma) {
                separators.push(comma);
                elements.push(self.parse_range_expression()?);
            }
        }
        let right = self.context.expect(Symbol::RightBrace, "set")?;
        Ok(Expression::Set(Set {
            span: self.context.span_from(start),
            left,
            elements,
            separators,
            right,
        }))
    }

    // flags : '{' [flag {',' flag}] '}' ;
    pub fn parse_flags(&mut self) -> Result<Flags, ParseError> {
        let start = self.context.start();
        let left = self.context.expect(Symbol::LeftBrace, "flags")?;
        let mut flags = Vec::new();
        let mut separators = Vec::new();
        if self.context.token_kind() != Symbol::RightBrace {
            flags.push(self.parse_flag()?);
            while let Some(comma) = self.context.consume_if(Symbol::Comma) {
                separators.push(comma);
                flags.push(self.parse_flag()?);
            }
        }
        let right = self.context.expect(Symbol::RightBrace, "flags")?;
        Ok(Flags { span: self.context.span_from(start), left, flags, separators, right })
    }

    // flag : Ident ['(' expression ')' | '=' expression] ;
    pub fn parse_flag(&mut self) -> Result<Flag, ParseError> {
        let start = self.context.start();
        let name = self.context.expect_name("flag")?;
        let (open, value, close) = match self.context.token_kind() {
            Symbol::LeftParen => {
                let open = self.context.consume();
                let value = self.parse_expression()?;
                let close = self.context.expect(Symbol::RightParen, "flag")?;
                (Some(open), Some(Box::new(value)), Some(close))
            }
            Symbol::Equal => {
                let open = self.context.consume();
                (Some(open), Some(Box::new(self.parse_expression()?)), None)
            }
            _ => (None, None, None),
        };
        Ok(Flag { span: self.context.span_from(start), name, open, value, close })
    }
}
