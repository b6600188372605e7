use super::{ParseError, Parser};
use crate::toolchain::ast::{
    ArrayType, BuiltinType, CellType, Enumeration, EnumerationValue, MathArraySize,
    MathArrayType, ObjectType, PointerType, PortDeclaration, PortList, PortName, PortType,
    ProcedureType, QualifiedIdentifier, RecordType, Span, TypeSpec, VariableDeclaration,
};
use crate::toolchain::lexer::{Symbol, Token};

type BaseType = (Option<Token>, Option<QualifiedIdentifier>, Option<Token>);

static TYPE_STARTS: &[Symbol] = &[
    Symbol::Array,
    Symbol::Record,
    Symbol::Pointer,
    Symbol::Procedure,
    Symbol::Object,
    Symbol::Enum,
    Symbol::Cell,
    Symbol::Cellnet,
    Symbol::Port,
    Symbol::Any,
    Symbol::Address,
    Symbol::Size,
    Symbol::Ident,
];

static PORT_DIRECTIONS: &[Symbol] = &[Symbol::In, Symbol::Out];

// A last record field `o: OBJECT` without `;` reads the record's END as an empty object body.
// Turns that object back into the generic one and returns the END it took.
fn reclaim_record_end(field: &mut VariableDeclaration) -> Option<Token> {
    let TypeSpec::Object(object) = &mut field.type_spec else {
        return None;
    };
    let empty = object.flags.is_none()
        && object.left.is_none()
        && object.declarations.iter().all(|sequence| sequence.declarations.is_empty())
        && object.body.is_none()
        && object.closing_name.is_none();
    if !empty {
        return None;
    }
    let end = object.end.take()?;
    object.declarations = None;
    object.span = Span::from(object.object);
    field.span.end = object.object.end;
    Some(end)
}

impl<'t, 's> Parser<'t, 's> {
    pub fn parse_type(&mut self) -> Result<TypeSpec, ParseError> {
        self.nested("type", Self::parse_type_alternatives)
    }

    fn parse_type_alternatives(&mut self) -> Result<TypeSpec, ParseError> {
        match self.context.token_kind() {
            Symbol::Array if self.context.peek_kind(1) == Symbol::LeftBracket => {
                Ok(TypeSpec::MathArray(self.parse_math_array_type()?))
            }
            Symbol::Array => Ok(TypeSpec::Array(self.parse_array_type()?)),
            Symbol::Record => Ok(TypeSpec::Record(self.parse_record_type()?)),
            Symbol::Pointer => Ok(TypeSpec::Pointer(self.parse_pointer_type()?)),
            Symbol::Procedure => Ok(TypeSpec::Procedure(self.parse_procedure_type()?)),
            Symbol::Object => Ok(TypeSpec::Object(self.parse_object_type()?)),
            Symbol::Enum => Ok(TypeSpec::Enumeration(self.parse_enumeration_type()?)),
            Symbol::Cell | Symbol::Cellnet => Ok(TypeSpec::Cell(self.parse_cell_type()?)),
            Symbol::Port => Ok(TypeSpec::Port(self.parse_port_type()?)),
            Symbol::Any | Symbol::Address | Symbol::Size => {
                let token = self.context.consume();
                Ok(TypeSpec::Builtin(BuiltinType { span: Span::from(token), token }))
            }
            Symbol::Ident => Ok(TypeSpec::Qualified(self.parse_qualified_identifier()?)),
            _ => Err(ParseError::UnexpectedAlternative {
                found: self.context.token(),
                expected: TYPE_STARTS,
                rule: "type",
            }),
        }
    }

    // array_type : 'ARRAY' [expression {',' expression}] 'OF' type ;
    pub fn parse_array_type(&mut self) -> Result<ArrayType, ParseError> {
        let start = self.context.start();
        let array = self.context.expect(Symbol::Array, "ARRAY type")?;
        let mut lengths = Vec::new();
        let mut separators = Vec::new();
        if self.context.token_kind() != Symbol::Of {
            lengths.push(self.parse_expression()?);
            while let Some(comma) = self.context.consume_if(Symbol::Comma) {
                separators.push(comma);
                lengths.push(self.parse_expression()?);
            }
        }
        let of = self.context.expect(Symbol::Of, "ARRAY type")?;
        let element = self.parse_type()?;
        Ok(ArrayType {
            span: self.context.span_from(start),
            array,
            lengths,
            separators,
            of,
            element: Box::new(element),
        })
    }

    // math_array_type : 'ARRAY' '[' math_array_size {',' math_array_size} ']' 'OF' type ;
    pub fn parse_math_array_type(&mut self) -> Result<MathArrayType, ParseError> {
        let start = self.context.start();
        let array = self.context.expect(Symbol::Array, "ARRAY type")?;
        let left = self.context.expect(Symbol::LeftBracket, "ARRAY type")?;
        let mut sizes = vec![self.parse_math_array_size()?];
        let mut separators = Vec::new();
        while let Some(comma) = self.context.consume_if(Symbol::Comma) {
            separators.push(comma);
            sizes.push(self.parse_math_array_size()?);
        }
        let right = self.context.expect(Symbol::RightBracket, "ARRAY type")?;
        let of = self.context.expect(Symbol::Of, "ARRAY type")?;
        let element = self.parse_type()?;
        Ok(MathArrayType {
            span: self.context.span_from(start),
            array,
            left,
            sizes,
            separators,
            right,
            of,
            element: Box::new(element),
        })
    }

    // math_array_size : '*' | '?' | expression ;
    pub fn parse_math_array_size(&mut self) -> Result<MathArraySize, ParseError> {
        match self.context.token_kind() {
            Symbol::Times => Ok(MathArraySize::Open(self.context.consume())),
            Symbol::QuestionMark => Ok(MathArraySize::Tensor(self.context.consume())),
            _ => Ok(MathArraySize::Length(self.parse_expression()?)),
        }
    }

    // Optional `'(' qualified_identifier ')'` naming a base type.
    fn parse_base_type(&mut self, rule: &'static str) -> Result<BaseType, ParseError> {
        match self.context.consume_if(Symbol::LeftParen) {
            Some(left) => {
                let base = self.parse_qualified_identifier()?;
                let right = self.context.expect(Symbol::RightParen, rule)?;
                Ok((Some(left), Some(base), Some(right)))
            }
            None => Ok((None, None, None)),
        }
    }

    // record_type : 'RECORD' ['(' qualified_identifier ')'] {variable_declaration [';']} 'END' ;
    //
    // In `RECORD o: OBJECT END` the OBJECT is generic and the END closes the record.
    pub fn parse_record_type(&mut self) -> Result<RecordType, ParseError> {
        let start = self.context.start();
        let record = self.context.expect(Symbol::Record, "RECORD type")?;
        let (left, base, right) = self.parse_base_type("RECORD type")?;
        let mut fields = Vec::new();
        let mut semicolons = Vec::new();
        while self.context.token_kind() == Symbol::Ident {
            fields.push(self.parse_variable_declaration()?);
            semicolons.push(self.context.consume_if(Symbol::SemiColon));
        }
        let reclaimed = match (fields.last_mut(), semicolons.last()) {
            (Some(field), Some(None)) if self.context.token_kind() != Symbol::End => {
                reclaim_record_end(field)
            }
            _ => None,
        };
        let end = match reclaimed {
            Some(end) => end,
            None => self.context.expect(Symbol::End, "RECORD type")?,
        };
        Ok(RecordType {
            span: self.context.span_from(start),
            record,
            left,
            base,
            right,
            fields,
            semicolons,
            end,
        })
    }

    // pointer_type : 'POINTER' [flags] 'TO' type ;
    pub fn parse_pointer_type(&mut self) -> Result<PointerType, ParseError> {
        let start = self.context.start();
        let pointer = self.context.expect(Symbol::Pointer, "POINTER type")?;
        let flags = if self.context.token_kind() == Symbol::LeftBrace {
            Some(self.parse_flags()?)
        } else {
            None
        };
        let to = self.context.expect(Symbol::To, "POINTER type")?;
        let target = self.parse_type()?;
        Ok(PointerType {
            span: self.context.span_from(start),
            pointer,
            flags,
            to,
            target: Box::new(target),
        })
    }

    // procedure_type : 'PROCEDURE' [flags] [formal_parameters] ;
    pub fn parse_procedure_type(&mut self) -> Result<ProcedureType, ParseError> {
        let start = self.context.start();
        let procedure = self.context.expect(Symbol::Procedure, "PROCEDURE type")?;
        let flags = if self.context.token_kind() == Symbol::LeftBrace {
            Some(self.parse_flags()?)
        } else {
            None
        };
        let parameters = if self.context.token_kind() == Symbol::LeftParen {
            Some(self.parse_formal_parameters()?)
        } else {
            None
        };
        Ok(ProcedureType { span: self.context.span_from(start), procedure, flags, parameters })
    }

    // object_type : 'OBJECT'
    //             | 'OBJECT' [flags] ['(' qualified_identifier ')'] declaration_sequence [body]
    //               'END' [Ident]
    //             ;
    //
    // The generic OBJECT is recognized by what follows it.
    pub fn parse_object_type(&mut self) -> Result<ObjectType, ParseError> {
        let start = self.context.start();
        let object = self.context.expect(Symbol::Object, "OBJECT type")?;
        let mut object_type = ObjectType {
            span: Span::from(object),
            object,
            flags: None,
            left: None,
            base: None,
            right: None,
            declarations: None,
            body: None,
            end: None,
            closing_name: None,
        };
        if matches!(
            self.context.token_kind(),
            Symbol::SemiColon | Symbol::RightParen | Symbol::Comma | Symbol::EndOfFile
        ) {
            return Ok(object_type);
        }

        if self.context.token_kind() == Symbol::LeftBrace {
            object_type.flags = Some(self.parse_flags()?);
        }
        let (left, base, right) = self.parse_base_type("OBJECT type")?;
        object_type.left = left;
        object_type.base = base;
        object_type.right = right;
        object_type.declarations = Some(self.parse_declaration_sequence()?);
        object_type.body = self.parse_optional_body()?;
        object_type.end = Some(self.context.expect(Symbol::End, "OBJECT type")?);
        if self.context.token_kind() == Symbol::Ident {
            object_type.closing_name = Some(self.context.expect_name("OBJECT type")?);
        }
        object_type.span = self.context.span_from(start);
        Ok(object_type)
    }

    // enumeration_type : 'ENUM' ['(' qualified_identifier ')']
    //                    [enumeration_value {',' enumeration_value}] 'END' ;
    pub fn parse_enumeration_type(&mut self) -> Result<Enumeration, ParseError> {
        let start = self.context.start();
        let enum_token = self.context.expect(Symbol::Enum, "ENUM type")?;
        let (left, base, right) = self.parse_base_type("ENUM type")?;
        let mut values = Vec::new();
        let mut separators = Vec::new();
        if self.context.token_kind() == Symbol::Ident {
            values.push(self.parse_enumeration_value()?);
            while let Some(comma) = self.context.consume_if(Symbol::Comma) {
                separators.push(comma);
                values.push(self.parse_enumeration_value()?);
            }
        }
        let end = self.context.expect(Symbol::End, "ENUM type")?;
        Ok(Enumeration {
            span: self.context.span_from(start),
            enum_token,
            left,
            base,
            right,
            values,
            separators,
            end,
        })
    }

    // enumeration_value : identifier_definition ['=' expression] ;
    pub fn parse_enumeration_value(&mut self) -> Result<EnumerationValue, ParseError> {
        let start = self.context.start();
        let key = self.parse_identifier_definition()?;
        let (equal, value) = match self.context.consume_if(Symbol::Equal) {
            Some(equal) => (Some(equal), Some(Box::new(self.parse_expression()?))),
            None => (None, None),
        };
        Ok(EnumerationValue { span: self.context.span_from(start), key, equal, value })
    }

    // cell_type : ('CELL' | 'CELLNET') [flags] [port_list] [';'] {import_list}
    //             declaration_sequence [body] 'END' [Ident] ;
    pub fn parse_cell_type(&mut self) -> Result<CellType, ParseError> {
        let start = self.context.start();
        let cell = match self.context.token_kind() {
            Symbol::Cell | Symbol::Cellnet => self.context.consume(),
            _ => {
                return Err(ParseError::UnexpectedAlternative {
                    found: self.context.token(),
                    expected: &[Symbol::Cell, Symbol::Cellnet],
                    rule: "CELL type",
                })
            }
        };
        let flags = if self.context.token_kind() == Symbol::LeftBrace {
            Some(self.parse_flags()?)
        } else {
            None
        };
        let ports = if self.context.token_kind() == Symbol::LeftParen {
            Some(self.parse_port_list()?)
        } else {
            None
        };
        let semicolon = self.context.consume_if(Symbol::SemiColon);
        let mut imports = Vec::new();
        while self.context.token_kind() == Symbol::Import {
            imports.push(self.parse_import_list()?);
        }
        let declarations = self.parse_declaration_sequence()?;
        let body = self.parse_optional_body()?;
        let end = self.context.expect(Symbol::End, "CELL type")?;
        let closing_name = if self.context.token_kind() == Symbol::Ident {
            Some(self.context.expect_name("CELL type")?)
        } else {
            None
        };
        Ok(CellType {
            span: self.context.span_from(start),
            cell,
            flags,
            ports,
            semicolon,
            imports,
            declarations,
            body,
            end,
            closing_name,
        })
    }

    // port_list : '(' [port_declaration {';' port_declaration}] ')' ;
    pub fn parse_port_list(&mut self) -> Result<PortList, ParseError> {
        let start = self.context.start();
        let left = self.context.expect(Symbol::LeftParen, "port list")?;
        let mut ports = Vec::new();
        let mut separators = Vec::new();
        if self.context.token_kind() != Symbol::RightParen {
            ports.push(self.parse_port_declaration()?);
            while let Some(semicolon) = self.context.consume_if(Symbol::SemiColon) {
                separators.push(semicolon);
                ports.push(self.parse_port_declaration()?);
            }
        }
        let right = self.context.expect(Symbol::RightParen, "port list")?;
        Ok(PortList { span: self.context.span_from(start), left, ports, separators, right })
    }

    // port_declaration : Ident [flags] {',' Ident [flags]} ':' port_type ;
    pub fn parse_port_declaration(&mut self) -> Result<PortDeclaration, ParseError> {
        let start = self.context.start();
        let mut names = vec![self.parse_port_name()?];
        let mut separators = Vec::new();
        while let Some(comma) = self.context.consume_if(Symbol::Comma) {
            separators.push(comma);
            names.push(self.parse_port_name()?);
        }
        let colon = self.context.expect(Symbol::Colon, "port declaration")?;
        let port_type = self.parse_port_type()?;
        Ok(PortDeclaration {
            span: self.context.span_from(start),
            names,
            separators,
            colon,
            port_type,
        })
    }

    fn parse_port_name(&mut self) -> Result<PortName, ParseError> {
        let start = self.context.start();
        let name = self.context.expect_name("port declaration")?;
        let flags = if self.context.token_kind() == Symbol::LeftBrace {
            Some(self.parse_flags()?)
        } else {
            None
        };
        Ok(PortName { span: self.context.span_from(start), name, flags })
    }

    // port_type : 'PORT' ('IN' | 'OUT') ['(' expression ')'] ;
    pub fn parse_port_type(&mut self) -> Result<PortType, ParseError> {
        let start = self.context.start();
        let port = self.context.expect(Symbol::Port, "PORT type")?;
        if !PORT_DIRECTIONS.contains(&self.context.token_kind()) {
            return Err(ParseError::UnexpectedAlternative {
                found: self.context.token(),
                expected: PORT_DIRECTIONS,
                rule: "PORT type",
            });
        }
        let direction = self.context.consume();
        let (left, size, right) = match self.context.consume_if(Symbol::LeftParen) {
            Some(left) => {
                let size = self.parse_expression()?;
                let right = self.context.expect(Symbol::RightParen, "PORT type")?;
                (Some(left), Some(Box::new(size)), Some(right))
            }
            None => (None, None, None),
        };
        Ok(PortType { span: self.context.span_from(start), port, direction, left, size, right })
    }
}
