use super::{ParseError, Parser};
use crate::toolchain::ast::{
    Body, ConstantDeclaration, ConstantSection, Declaration, DeclarationSequence,
    FormalParameters, IdentifierDefinition, Import, ImportList, Module, Name,
    OperatorDeclaration, Parameter, ParameterDeclaration, ProcedureDeclaration,
    QualifiedIdentifier, TemplateParameter, TemplateParameters, TypeDeclaration, TypeSection,
    VariableDeclaration, VariableName, VariableNameList, VariableSection,
};
use crate::toolchain::lexer::Symbol;

static TEMPLATE_PARAMETER_KINDS: &[Symbol] = &[Symbol::Const, Symbol::Type];
static BODY_STARTS: &[Symbol] = &[Symbol::Begin, Symbol::Code];

impl<'t, 's> Parser<'t, 's> {
    // module : 'MODULE' Ident ['IN' Ident] [template_parameters] ';' {import_list}
    //          declaration_sequence [body] 'END' Ident '.' ;
    pub fn parse_module(&mut self) -> Result<Module, ParseError> {
        let start = self.context.start();
        let module = self.context.expect(Symbol::Module, "MODULE")?;
        let name = self.context.expect_name("MODULE")?;
        let (in_token, context) = match self.context.consume_if(Symbol::In) {
            Some(in_token) => (Some(in_token), Some(self.context.expect_name("MODULE")?)),
            None => (None, None),
        };
        let template = if self.context.token_kind() == Symbol::LeftParen {
            Some(self.parse_template_parameters()?)
        } else {
            None
        };
        let semicolon = self.context.expect(Symbol::SemiColon, "MODULE")?;

        let mut imports = Vec::new();
        while self.context.token_kind() == Symbol::Import {
            imports.push(self.parse_import_list()?);
        }
        let declarations = self.parse_declaration_sequence()?;
        let body = self.parse_optional_body()?;
        let end = self.context.expect(Symbol::End, "MODULE")?;
        let closing_name = self.context.expect_name("MODULE")?;
        let period = self.context.expect(Symbol::Period, "MODULE")?;

        Ok(Module {
            span: self.context.span_from(start),
            module,
            name,
            in_token,
            context,
            template,
            semicolon,
            imports,
            declarations,
            body,
            end,
            closing_name,
            period,
        })
    }

    // template_parameters : '(' template_parameter {',' template_parameter} ')' ;
    pub fn parse_template_parameters(&mut self) -> Result<TemplateParameters, ParseError> {
        let start = self.context.start();
        let left = self.context.expect(Symbol::LeftParen, "template parameters")?;
        let mut parameters = vec![self.parse_template_parameter()?];
        let mut separators = Vec::new();
        while let Some(comma) = self.context.consume_if(Symbol::Comma) {
            separators.push(comma);
            parameters.push(self.parse_template_parameter()?);
        }
        let right = self.context.expect(Symbol::RightParen, "template parameters")?;
        Ok(TemplateParameters {
            span: self.context.span_from(start),
            left,
            parameters,
            separators,
            right,
        })
    }

    // template_parameter : ('CONST' | 'TYPE') Ident ;
    pub fn parse_template_parameter(&mut self) -> Result<TemplateParameter, ParseError> {
        let start = self.context.start();
        if !TEMPLATE_PARAMETER_KINDS.contains(&self.context.token_kind()) {
            return Err(ParseError::UnexpectedAlternative {
                found: self.context.token(),
                expected: TEMPLATE_PARAMETER_KINDS,
                rule: "template parameter",
            });
        }
        let kind = self.context.consume();
        let name = self.context.expect_name("template parameter")?;
        Ok(TemplateParameter { span: self.context.span_from(start), kind, name })
    }

    // import_list : 'IMPORT' import {',' import} ';' ;
    pub fn parse_import_list(&mut self) -> Result<ImportList, ParseError> {
        let start = self.context.start();
        let import = self.context.expect(Symbol::Import, "IMPORT list")?;
        let mut imports = vec![self.parse_import()?];
        let mut separators = Vec::new();
        while let Some(comma) = self.context.consume_if(Symbol::Comma) {
            separators.push(comma);
            imports.push(self.parse_import()?);
        }
        let semicolon = self.context.expect(Symbol::SemiColon, "IMPORT list")?;
        Ok(ImportList {
            span: self.context.span_from(start),
            import,
            imports,
            separators,
            semicolon,
        })
    }

    // import : Ident [':=' Ident] ['(' expression_list ')'] ['IN' Ident] ;
    pub fn parse_import(&mut self) -> Result<Import, ParseError> {
        let start = self.context.start();
        let name = self.context.expect_name("import")?;
        let (becomes, module) = match self.context.consume_if(Symbol::Becomes) {
            Some(becomes) => (Some(becomes), Some(self.context.expect_name("import")?)),
            None => (None, None),
        };
        let (left, arguments, right) = match self.context.consume_if(Symbol::LeftParen) {
            Some(left) => {
                let arguments = self.parse_expression_list()?;
                let right = self.context.expect(Symbol::RightParen, "import")?;
                (Some(left), Some(Box::new(arguments)), Some(right))
            }
            None => (None, None, None),
        };
        let (in_token, context) = match self.context.consume_if(Symbol::In) {
            Some(in_token) => (Some(in_token), Some(self.context.expect_name("import")?)),
            None => (None, None),
        };
        Ok(Import {
            span: self.context.span_from(start),
            name,
            becomes,
            module,
            left,
            arguments,
            right,
            in_token,
            context,
        })
    }

    // declaration_sequence : {constant_section | type_section | variable_section
    //                         | procedure_declaration | operator_declaration} ;
    pub fn parse_declaration_sequence(&mut self) -> Result<DeclarationSequence, ParseError> {
        self.nested("declaration sequence", Self::parse_declarations)
    }

    fn parse_declarations(&mut self) -> Result<DeclarationSequence, ParseError> {
        let start = self.context.start();
        let mut declarations = Vec::new();
        loop {
            let declaration = match self.context.token_kind() {
                Symbol::Const => Declaration::Constants(self.parse_constant_section()?),
                Symbol::Type => Declaration::Types(self.parse_type_section()?),
                Symbol::Var => Declaration::Variables(self.parse_variable_section()?),
                Symbol::Procedure => Declaration::Procedure(self.parse_procedure_declaration()?),
                Symbol::Operator => Declaration::Operator(self.parse_operator_declaration()?),
                _ => break,
            };
            declarations.push(declaration);
        }
        Ok(DeclarationSequence { span: self.context.span_from(start), declarations })
    }

    // constant_section : 'CONST' {constant_declaration ';'} ;
    pub fn parse_constant_section(&mut self) -> Result<ConstantSection, ParseError> {
        let start = self.context.start();
        let const_token = self.context.expect(Symbol::Const, "CONST section")?;
        let mut constants = Vec::new();
        let mut terminators = Vec::new();
        while self.context.token_kind() == Symbol::Ident {
            constants.push(self.parse_constant_declaration()?);
            terminators.push(self.context.expect(Symbol::SemiColon, "CONST section")?);
        }
        Ok(ConstantSection {
            span: self.context.span_from(start),
            const_token,
            constants,
            terminators,
        })
    }

    // constant_declaration : identifier_definition '=' expression ;
    pub fn parse_constant_declaration(&mut self) -> Result<ConstantDeclaration, ParseError> {
        let start = self.context.start();
        let name = self.parse_identifier_definition()?;
        let equal = self.context.expect(Symbol::Equal, "constant declaration")?;
        let value = self.parse_expression()?;
        Ok(ConstantDeclaration {
            span: self.context.span_from(start),
            name,
            equal,
            value: Box::new(value),
        })
    }

    // type_section : 'TYPE' {type_declaration ';'} ;
    pub fn parse_type_section(&mut self) -> Result<TypeSection, ParseError> {
        let start = self.context.start();
        let type_token = self.context.expect(Symbol::Type, "TYPE section")?;
        let mut types = Vec::new();
        let mut terminators = Vec::new();
        while self.context.token_kind() == Symbol::Ident {
            types.push(self.parse_type_declaration()?);
            terminators.push(self.context.expect(Symbol::SemiColon, "TYPE section")?);
        }
        Ok(TypeSection { span: self.context.span_from(start), type_token, types, terminators })
    }

    // type_declaration : identifier_definition '=' type ;
    pub fn parse_type_declaration(&mut self) -> Result<TypeDeclaration, ParseError> {
        let start = self.context.start();
        let name = self.parse_identifier_definition()?;
        let equal = self.context.expect(Symbol::Equal, "type declaration")?;
        let type_spec = self.parse_type()?;
        Ok(TypeDeclaration { span: self.context.span_from(start), name, equal, type_spec })
    }

    // variable_section : 'VAR' {variable_declaration ';'} ;
    pub fn parse_variable_section(&mut self) -> Result<VariableSection, ParseError> {
        let start = self.context.start();
        let var = self.context.expect(Symbol::Var, "VAR section")?;
        let mut variables = Vec::new();
        let mut terminators = Vec::new();
        while self.context.token_kind() == Symbol::Ident {
            variables.push(self.parse_variable_declaration()?);
            terminators.push(self.context.expect(Symbol::SemiColon, "VAR section")?);
        }
        Ok(VariableSection { span: self.context.span_from(start), var, variables, terminators })
    }

    // variable_declaration : variable_name_list ':' type ;
    pub fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, ParseError> {
        let start = self.context.start();
        let names = self.parse_variable_name_list()?;
        let colon = self.context.expect(Symbol::Colon, "variable declaration")?;
        let type_spec = self.parse_type()?;
        Ok(VariableDeclaration { span: self.context.span_from(start), names, colon, type_spec })
    }

    // variable_name_list : variable_name {',' variable_name} ;
    pub fn parse_variable_name_list(&mut self) -> Result<VariableNameList, ParseError> {
        let start = self.context.start();
        let mut names = vec![self.parse_variable_name()?];
        let mut separators = Vec::new();
        while let Some(comma) = self.context.consume_if(Symbol::Comma) {
            separators.push(comma);
            names.push(self.parse_variable_name()?);
        }
        Ok(VariableNameList { span: self.context.span_from(start), names, separators })
    }

    // variable_name : identifier_definition [flags] [':=' expression | 'EXTERN' String] ;
    pub fn parse_variable_name(&mut self) -> Result<VariableName, ParseError> {
        let start = self.context.start();
        let name = self.parse_identifier_definition()?;
        let flags = if self.context.token_kind() == Symbol::LeftBrace {
            Some(self.parse_flags()?)
        } else {
            None
        };
        let (initializer, value) = match self.context.token_kind() {
            Symbol::Becomes => {
                let becomes = self.context.consume();
                (Some(becomes), Some(Box::new(self.parse_expression()?)))
            }
            Symbol::Extern => {
                let extern_token = self.context.consume();
                if self.context.token_kind() != Symbol::String {
                    return Err(ParseError::UnexpectedToken {
                        found: self.context.token(),
                        expected: Symbol::String,
                        rule: "EXTERN variable",
                    });
                }
                (Some(extern_token), Some(Box::new(self.parse_primary_expression()?)))
            }
            _ => (None, None),
        };
        Ok(VariableName { span: self.context.span_from(start), name, flags, initializer, value })
    }

    // procedure_declaration : 'PROCEDURE' ['^' | '&' | '~' | '-' | flags ['-']]
    //                         identifier_definition [formal_parameters] ';'
    //                         [declaration_sequence [body] 'END' Ident] [';'] ;
    pub fn parse_procedure_declaration(&mut self) -> Result<ProcedureDeclaration, ParseError> {
        let start = self.context.start();
        let procedure = self.context.expect(Symbol::Procedure, "PROCEDURE")?;
        let (modifier, flags) = match self.context.token_kind() {
            Symbol::Arrow | Symbol::And | Symbol::Not | Symbol::Minus => {
                (Some(self.context.consume()), None)
            }
            Symbol::LeftBrace => {
                let flags = self.parse_flags()?;
                (self.context.consume_if(Symbol::Minus), Some(flags))
            }
            _ => (None, None),
        };
        let name = self.parse_identifier_definition()?;
        let parameters = if self.context.token_kind() == Symbol::LeftParen {
            Some(self.parse_formal_parameters()?)
        } else {
            None
        };
        let semicolon = self.context.expect(Symbol::SemiColon, "PROCEDURE")?;

        let mut declaration = ProcedureDeclaration {
            span: self.context.span_from(start),
            procedure,
            modifier,
            flags,
            name,
            parameters,
            semicolon,
            declarations: None,
            body: None,
            end: None,
            closing_name: None,
            terminator: None,
        };
        if declaration.is_forward() {
            return Ok(declaration);
        }

        declaration.declarations = Some(self.parse_declaration_sequence()?);
        declaration.body = self.parse_optional_body()?;
        declaration.end = Some(self.context.expect(Symbol::End, "PROCEDURE")?);
        declaration.closing_name = Some(self.context.expect_name("PROCEDURE")?);
        declaration.terminator = self.context.consume_if(Symbol::SemiColon);
        declaration.span = self.context.span_from(start);
        Ok(declaration)
    }

    // operator_declaration : 'OPERATOR' [flags] ['-'] String ['*' | '-'] formal_parameters ';'
    //                        declaration_sequence [body] 'END' String [';'] ;
    pub fn parse_operator_declaration(&mut self) -> Result<OperatorDeclaration, ParseError> {
        let start = self.context.start();
        let operator = self.context.expect(Symbol::Operator, "OPERATOR")?;
        let flags = if self.context.token_kind() == Symbol::LeftBrace {
            Some(self.parse_flags()?)
        } else {
            None
        };
        let minus = self.context.consume_if(Symbol::Minus);
        let symbol = self.parse_operator_symbol()?;
        let export = match self.context.token_kind() {
            Symbol::Times | Symbol::Minus => Some(self.context.consume()),
            _ => None,
        };
        let parameters = self.parse_formal_parameters()?;
        let semicolon = self.context.expect(Symbol::SemiColon, "OPERATOR")?;
        let declarations = self.parse_declaration_sequence()?;
        let body = self.parse_optional_body()?;
        let end = self.context.expect(Symbol::End, "OPERATOR")?;
        let closing_symbol = self.parse_operator_symbol()?;
        let terminator = self.context.consume_if(Symbol::SemiColon);
        Ok(OperatorDeclaration {
            span: self.context.span_from(start),
            operator,
            flags,
            minus,
            symbol,
            export,
            parameters,
            semicolon,
            declarations,
            body,
            end,
            closing_symbol,
            terminator,
        })
    }

    // Operators are named by a string literal such as "+".
    fn parse_operator_symbol(&mut self) -> Result<Name, ParseError> {
        let text = self.context.text();
        let token = self.context.expect(Symbol::String, "OPERATOR")?;
        Ok(Name::new(token, text))
    }

    // formal_parameters : '(' [parameter_declaration {';' parameter_declaration}] ')'
    //                     [':' [flags] type] ;
    pub fn parse_formal_parameters(&mut self) -> Result<FormalParameters, ParseError> {
        let start = self.context.start();
        let left = self.context.expect(Symbol::LeftParen, "formal parameters")?;
        let mut parameters = Vec::new();
        let mut separators = Vec::new();
        if self.context.token_kind() != Symbol::RightParen {
            parameters.push(self.parse_parameter_declaration()?);
            while let Some(semicolon) = self.context.consume_if(Symbol::SemiColon) {
                separators.push(semicolon);
                parameters.push(self.parse_parameter_declaration()?);
            }
        }
        let right = self.context.expect(Symbol::RightParen, "formal parameters")?;

        let (colon, return_flags, return_type) = match self.context.consume_if(Symbol::Colon) {
            Some(colon) => {
                let flags = if self.context.token_kind() == Symbol::LeftBrace {
                    Some(self.parse_flags()?)
                } else {
                    None
                };
                (Some(colon), flags, Some(Box::new(self.parse_type()?)))
            }
            None => (None, None, None),
        };
        Ok(FormalParameters {
            span: self.context.span_from(start),
            left,
            parameters,
            separators,
            right,
            colon,
            return_flags,
            return_type,
        })
    }

    // parameter_declaration : ['VAR' | 'CONST'] parameter {',' parameter} ':' type ;
    pub fn parse_parameter_declaration(&mut self) -> Result<ParameterDeclaration, ParseError> {
        let start = self.context.start();
        let mode = match self.context.token_kind() {
            Symbol::Var | Symbol::Const => Some(self.context.consume()),
            _ => None,
        };
        let mut names = vec![self.parse_parameter()?];
        let mut separators = Vec::new();
        while let Some(comma) = self.context.consume_if(Symbol::Comma) {
            separators.push(comma);
            names.push(self.parse_parameter()?);
        }
        let colon = self.context.expect(Symbol::Colon, "parameter declaration")?;
        let type_spec = self.parse_type()?;
        Ok(ParameterDeclaration {
            span: self.context.span_from(start),
            mode,
            names,
            separators,
            colon,
            type_spec,
        })
    }

    // parameter : Ident [flags] ['=' expression] ;
    pub fn parse_parameter(&mut self) -> Result<Parameter, ParseError> {
        let start = self.context.start();
        let name = self.context.expect_name("parameter declaration")?;
        let flags = if self.context.token_kind() == Symbol::LeftBrace {
            Some(self.parse_flags()?)
        } else {
            None
        };
        let (equal, default) = match self.context.consume_if(Symbol::Equal) {
            Some(equal) => (Some(equal), Some(Box::new(self.parse_expression()?))),
            None => (None, None),
        };
        Ok(Parameter { span: self.context.span_from(start), name, flags, equal, default })
    }

    pub(super) fn parse_optional_body(&mut self) -> Result<Option<Body>, ParseError> {
        if BODY_STARTS.contains(&self.context.token_kind()) {
            Ok(Some(self.parse_body()?))
        } else {
            Ok(None)
        }
    }

    // body : 'BEGIN' [flags] statement_sequence ['FINALLY' statement_sequence]
    //      | 'CODE' assembler
    //      ;
    pub fn parse_body(&mut self) -> Result<Body, ParseError> {
        let start = self.context.start();
        match self.context.token_kind() {
            Symbol::Begin => {
                let begin = self.context.consume();
                let flags = if self.context.token_kind() == Symbol::LeftBrace {
                    Some(self.parse_flags()?)
                } else {
                    None
                };
                let statements = self.parse_statement_sequence()?;
                let (finally, finally_statements) = match self.context.consume_if(Symbol::Finally)
                {
                    Some(finally) => (Some(finally), Some(self.parse_statement_sequence()?)),
                    None => (None, None),
                };
                Ok(Body {
                    span: self.context.span_from(start),
                    begin,
                    flags,
                    statements: Some(statements),
                    finally,
                    finally_statements,
                    assembler: None,
                })
            }
            Symbol::Code => {
                let code = self.context.consume();
                let assembler = self.parse_assembler_block()?;
                Ok(Body {
                    span: self.context.span_from(start),
                    begin: code,
                    flags: None,
                    statements: None,
                    finally: None,
                    finally_statements: None,
                    assembler: Some(assembler),
                })
            }
            _ => Err(ParseError::UnexpectedAlternative {
                found: self.context.token(),
                expected: BODY_STARTS,
                rule: "body",
            }),
        }
    }

    // identifier_definition : Ident ['*' | '-'] ;
    pub fn parse_identifier_definition(&mut self) -> Result<IdentifierDefinition, ParseError> {
        let start = self.context.start();
        let name = self.context.expect_name("identifier definition")?;
        let export = match self.context.token_kind() {
            Symbol::Times | Symbol::Minus => Some(self.context.consume()),
            _ => None,
        };
        Ok(IdentifierDefinition { span: self.context.span_from(start), name, export })
    }

    // qualified_identifier : Ident ['.' Ident] ;
    pub fn parse_qualified_identifier(&mut self) -> Result<QualifiedIdentifier, ParseError> {
        let start = self.context.start();
        let first = self.context.expect_name("qualified identifier")?;
        let (period, second) = match self.context.consume_if(Symbol::Period) {
            Some(period) => {
                (Some(period), Some(self.context.expect_name("qualified identifier")?))
            }
            None => (None, None),
        };
        Ok(QualifiedIdentifier { span: self.context.span_from(start), first, period, second })
    }
}
