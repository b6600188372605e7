use super::{ParseError, Parser};
use crate::toolchain::ast::{
    AssemblerBlock, AwaitStatement, CaseBranch, CaseStatement, ElsePart, ElsifPart,
    EmptyStatement, ExitStatement, ForStatement, IfStatement, IgnoreStatement, InlineAssembler,
    LoopStatement, RepeatStatement, ReturnStatement, SimpleStatement, Span, Statement,
    StatementBlock, StatementSequence, WhileStatement, WithBranch, WithStatement,
};
use crate::toolchain::lexer::Symbol;

// Tokens that may follow a statement, so a statement starting with one of them is empty.
fn ends_statement(symbol: Symbol) -> bool {
    matches!(
        symbol,
        Symbol::SemiColon
            | Symbol::End
            | Symbol::Else
            | Symbol::Elsif
            | Symbol::Until
            | Symbol::Bar
            | Symbol::Finally
            | Symbol::EndOfFile
    )
}

fn ends_case_branches(symbol: Symbol) -> bool {
    matches!(symbol, Symbol::End | Symbol::Else)
}

fn is_port_or_assignment(symbol: Symbol) -> bool {
    matches!(
        symbol,
        Symbol::Becomes
            | Symbol::ExclaimMark
            | Symbol::QuestionMark
            | Symbol::LessLess
            | Symbol::GreaterGreater
    )
}

impl<'t, 's> Parser<'t, 's> {
    // statement_sequence : statement {';' statement} ;
    pub fn parse_statement_sequence(&mut self) -> Result<StatementSequence, ParseError> {
        let start = self.context.start();
        let mut statements = vec![self.parse_statement()?];
        let mut separators = Vec::new();
        while let Some(semicolon) = self.context.consume_if(Symbol::SemiColon) {
            separators.push(semicolon);
            statements.push(self.parse_statement()?);
        }
        Ok(StatementSequence { span: self.context.span_from(start), statements, separators })
    }

    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.nested("statement", Self::parse_statement_alternatives)
    }

    fn parse_statement_alternatives(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        match self.context.token_kind() {
            symbol if ends_statement(symbol) => {
                Ok(Statement::Empty(EmptyStatement { span: self.context.span_from(start) }))
            }
            Symbol::If => self.parse_if(),
            Symbol::While => self.parse_while(),
            Symbol::Repeat => self.parse_repeat(),
            Symbol::For => self.parse_for(),
            Symbol::Loop => self.parse_loop(),
            Symbol::Case => self.parse_case(),
            Symbol::With => self.parse_with(),
            Symbol::Code => self.parse_inline_assembler(),
            Symbol::Begin => Ok(Statement::Block(self.parse_statement_block()?)),

            Symbol::Exit => {
                let exit = self.context.consume();
                Ok(Statement::Exit(ExitStatement { span: Span::from(exit), exit }))
            }

            // The value is optional, and can only be absent before a statement terminator.
            Symbol::Return => {
                let return_token = self.context.consume();
                let value = if ends_statement(self.context.token_kind()) {
                    None
                } else {
                    Some(Box::new(self.parse_expression()?))
                };
                Ok(Statement::Return(ReturnStatement {
                    span: self.context.span_from(start),
                    return_token,
                    value,
                }))
            }

            Symbol::Await => {
                let await_token = self.context.consume();
                let condition = self.parse_expression()?;
                Ok(Statement::Await(AwaitStatement {
                    span: self.context.span_from(start),
                    await_token,
                    condition: Box::new(condition),
                }))
            }

            Symbol::Ignore => {
                let ignore = self.context.consume();
                let value = self.parse_expression()?;
                Ok(Statement::Ignore(IgnoreStatement {
                    span: self.context.span_from(start),
                    ignore,
                    value: Box::new(value),
                }))
            }

            _ => self.parse_simple_statement(),
        }
    }

    // if : 'IF' expression 'THEN' statement_sequence
    //      {'ELSIF' expression 'THEN' statement_sequence}
    //      ['ELSE' statement_sequence] 'END' ;
    pub fn parse_if(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        let if_token = self.context.expect(Symbol::If, "IF statement")?;
        let condition = self.parse_expression()?;
        let then = self.context.expect(Symbol::Then, "IF statement")?;
        let body = self.parse_statement_sequence()?;

        let mut elsifs = Vec::new();
        while self.context.token_kind() == Symbol::Elsif {
            let elsif_start = self.context.start();
            let elsif = self.context.consume();
            let condition = self.parse_expression()?;
            let then = self.context.expect(Symbol::Then, "ELSIF part")?;
            let body = self.parse_statement_sequence()?;
            elsifs.push(ElsifPart {
                span: self.context.span_from(elsif_start),
                elsif,
                condition: Box::new(condition),
                then,
                body,
            });
        }

        let else_part = self.parse_else_part()?;
        let end = self.context.expect(Symbol::End, "IF statement")?;
        Ok(Statement::If(IfStatement {
            span: self.context.span_from(start),
            if_token,
            condition: Box::new(condition),
            then,
            body,
            elsifs,
            else_part,
            end,
        }))
    }

    fn parse_else_part(&mut self) -> Result<Option<ElsePart>, ParseError> {
        let start = self.context.start();
        match self.context.consume_if(Symbol::Else) {
            Some(else_token) => {
                let body = self.parse_statement_sequence()?;
                Ok(Some(ElsePart { span: self.context.span_from(start), else_token, body }))
            }
            None => Ok(None),
        }
    }

    // while : 'WHILE' expression 'DO' statement_sequence 'END' ;
    pub fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        let while_token = self.context.expect(Symbol::While, "WHILE statement")?;
        let condition = self.parse_expression()?;
        let do_token = self.context.expect(Symbol::Do, "WHILE statement")?;
        let body = self.parse_statement_sequence()?;
        let end = self.context.expect(Symbol::End, "WHILE statement")?;
        Ok(Statement::While(WhileStatement {
            span: self.context.span_from(start),
            while_token,
            condition: Box::new(condition),
            do_token,
            body,
            end,
        }))
    }

    // repeat : 'REPEAT' statement_sequence 'UNTIL' expression ;
    pub fn parse_repeat(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        let repeat = self.context.expect(Symbol::Repeat, "REPEAT statement")?;
        let body = self.parse_statement_sequence()?;
        let until = self.context.expect(Symbol::Until, "REPEAT statement")?;
        let condition = self.parse_expression()?;
        Ok(Statement::Repeat(RepeatStatement {
            span: self.context.span_from(start),
            repeat,
            body,
            until,
            condition: Box::new(condition),
        }))
    }

    // for : 'FOR' Ident ':=' expression 'TO' expression ['BY' expression]
    //       'DO' statement_sequence 'END' ;
    pub fn parse_for(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        let for_token = self.context.expect(Symbol::For, "FOR statement")?;
        let variable = self.context.expect_name("FOR statement")?;
        let becomes = self.context.expect(Symbol::Becomes, "FOR statement")?;
        let from = self.parse_expression()?;
        let to = self.context.expect(Symbol::To, "FOR statement")?;
        let limit = self.parse_expression()?;
        let (by, step) = match self.context.consume_if(Symbol::By) {
            Some(by) => (Some(by), Some(Box::new(self.parse_expression()?))),
            None => (None, None),
        };
        let do_token = self.context.expect(Symbol::Do, "FOR statement")?;
        let body = self.parse_statement_sequence()?;
        let end = self.context.expect(Symbol::End, "FOR statement")?;
        Ok(Statement::For(ForStatement {
            span: self.context.span_from(start),
            for_token,
            variable,
            becomes,
            from: Box::new(from),
            to,
            limit: Box::new(limit),
            by,
            step,
            do_token,
            body,
            end,
        }))
    }

    // loop : 'LOOP' statement_sequence 'END' ;
    pub fn parse_loop(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        let loop_token = self.context.expect(Symbol::Loop, "LOOP statement")?;
        let body = self.parse_statement_sequence()?;
        let end = self.context.expect(Symbol::End, "LOOP statement")?;
        Ok(Statement::Loop(LoopStatement {
            span: self.context.span_from(start),
            loop_token,
            body,
            end,
        }))
    }

    // with : 'WITH' with_branch {'|' with_branch} ['ELSE' statement_sequence] 'END' ;
    pub fn parse_with(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        let with = self.context.expect(Symbol::With, "WITH statement")?;
        let mut branches = vec![self.parse_with_branch()?];
        let mut separators = Vec::new();
        while let Some(bar) = self.context.consume_if(Symbol::Bar) {
            separators.push(bar);
            branches.push(self.parse_with_branch()?);
        }
        let else_part = self.parse_else_part()?;
        let end = self.context.expect(Symbol::End, "WITH statement")?;
        Ok(Statement::With(WithStatement {
            span: self.context.span_from(start),
            with,
            branches,
            separators,
            else_part,
            end,
        }))
    }

    // with_branch : Ident ':' qualified_identifier 'DO' statement_sequence ;
    pub fn parse_with_branch(&mut self) -> Result<WithBranch, ParseError> {
        let start = self.context.start();
        let variable = self.context.expect_name("WITH statement")?;
        let colon = self.context.expect(Symbol::Colon, "WITH statement")?;
        let type_name = self.parse_qualified_identifier()?;
        let do_token = self.context.expect(Symbol::Do, "WITH statement")?;
        let body = self.parse_statement_sequence()?;
        Ok(WithBranch {
            span: self.context.span_from(start),
            variable,
            colon,
            type_name,
            do_token,
            body,
        })
    }

    // case : 'CASE' expression 'OF' ['|'] [case_branch {'|' case_branch} ['|']]
    //        ['ELSE' statement_sequence] 'END' ;
    pub fn parse_case(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        let case = self.context.expect(Symbol::Case, "CASE statement")?;
        let selector = self.parse_expression()?;
        let of = self.context.expect(Symbol::Of, "CASE statement")?;
        let leading_bar = self.context.consume_if(Symbol::Bar);

        let mut branches = Vec::new();
        let mut separators = Vec::new();
        let mut trailing_bar = None;
        if !ends_case_branches(self.context.token_kind()) {
            branches.push(self.parse_case_branch()?);
            while let Some(bar) = self.context.consume_if(Symbol::Bar) {
                if ends_case_branches(self.context.token_kind()) {
                    trailing_bar = Some(bar);
                    break;
                }
                separators.push(bar);
                branches.push(self.parse_case_branch()?);
            }
        }

        let else_part = self.parse_else_part()?;
        let end = self.context.expect(Symbol::End, "CASE statement")?;
        Ok(Statement::Case(CaseStatement {
            span: self.context.span_from(start),
            case,
            selector: Box::new(selector),
            of,
            leading_bar,
            branches,
            separators,
            trailing_bar,
            else_part,
            end,
        }))
    }

    // case_branch : range_expression {',' range_expression} ':' statement_sequence ;
    pub fn parse_case_branch(&mut self) -> Result<CaseBranch, ParseError> {
        let start = self.context.start();
        let mut labels = vec![self.parse_range_expression()?];
        let mut separators = Vec::new();
        while let Some(comma) = self.context.consume_if(Symbol::Comma) {
            separators.push(comma);
            labels.push(self.parse_range_expression()?);
        }
        let colon = self.context.expect(Symbol::Colon, "CASE branch")?;
        let body = self.parse_statement_sequence()?;
        Ok(CaseBranch { span: self.context.span_from(start), labels, separators, colon, body })
    }

    // simple_statement : designator [(':=' | '!' | '?' | '<<' | '>>') expression] ;
    pub fn parse_simple_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        let designator = self.parse_unary_expression()?;
        let (operator, value) = if is_port_or_assignment(self.context.token_kind()) {
            let operator = self.context.consume();
            (Some(operator), Some(Box::new(self.parse_expression()?)))
        } else {
            (None, None)
        };
        Ok(Statement::Simple(SimpleStatement {
            span: self.context.span_from(start),
            designator: Box::new(designator),
            operator,
            value,
        }))
    }

    // inline_assembler : 'CODE' assembler 'END' ;
    pub fn parse_inline_assembler(&mut self) -> Result<Statement, ParseError> {
        let start = self.context.start();
        let code = self.context.expect(Symbol::Code, "CODE block")?;
        let assembler = self.parse_assembler_block()?;
        let end = self.context.expect(Symbol::End, "CODE block")?;
        Ok(Statement::InlineAssembler(InlineAssembler {
            span: self.context.span_from(start),
            code,
            assembler,
            end,
        }))
    }

    /// The raw text following `CODE`, which the scanner delivers as a single token.
    pub fn parse_assembler_block(&mut self) -> Result<AssemblerBlock, ParseError> {
        let text = String::from(self.context.text());
        let token = self.context.expect(Symbol::InlineAssembler, "CODE block")?;
        Ok(AssemblerBlock { span: Span::from(token), token, text })
    }

    // statement_block : 'BEGIN' [flags] statement_sequence 'END' ;
    pub fn parse_statement_block(&mut self) -> Result<StatementBlock, ParseError> {
        let start = self.context.start();
        let begin = self.context.expect(Symbol::Begin, "statement block")?;
        let flags = if self.context.token_kind() == Symbol::LeftBrace {
            Some(self.parse_flags()?)
        } else {
            None
        };
        let body = self.parse_statement_sequence()?;
        let end = self.context.expect(Symbol::End, "statement block")?;
        Ok(StatementBlock { span: self.context.span_from(start), begin, flags, body, end })
    }
}
