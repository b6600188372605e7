use super::{AssemblerBlock, Expression, Flags, Name, Span, StatementSequence};
use crate::toolchain::lexer::{Symbol, Token};

/// `MODULE Ident [IN Ident] [TemplateParameters] ';' {ImportList} DeclarationSequence [Body]
/// END Ident '.'`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub span: Span,
    pub module: Token,
    pub name: Name,
    pub in_token: Option<Token>,
    pub context: Option<Name>,
    pub template: Option<TemplateParameters>,
    pub semicolon: Token,
    pub imports: Vec<ImportList>,
    pub declarations: DeclarationSequence,
    pub body: Option<Body>,
    pub end: Token,
    pub closing_name: Name,
    pub period: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateParameters {
    pub span: Span,
    pub left: Token,
    pub parameters: Vec<TemplateParameter>,
    pub separators: Vec<Token>,
    pub right: Token,
}

/// `(CONST | TYPE) Ident`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateParameter {
    pub span: Span,
    pub kind: Token,
    pub name: Name,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportList {
    pub span: Span,
    pub import: Token,
    pub imports: Vec<Import>,
    pub separators: Vec<Token>,
    pub semicolon: Token,
}

/// `Ident [':=' Ident] ['(' ExpressionList ')'] [IN Ident]`, where the name after `:=` is the
/// imported module and the first name its local alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub span: Span,
    pub name: Name,
    pub becomes: Option<Token>,
    pub module: Option<Name>,
    pub left: Option<Token>,
    pub arguments: Option<Box<Expression>>,
    pub right: Option<Token>,
    pub in_token: Option<Token>,
    pub context: Option<Name>,
}

/// An empty sequence has the empty span at the position of the token that follows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationSequence {
    pub span: Span,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    Constants(ConstantSection),
    Types(TypeSection),
    Variables(VariableSection),
    Procedure(ProcedureDeclaration),
    Operator(OperatorDeclaration),
}

impl_node_enum!(Declaration { Constants, Types, Variables, Procedure, Operator });

/// `CONST {ConstDecl ';'}`. Every declaration has its terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstantSection {
    pub span: Span,
    pub const_token: Token,
    pub constants: Vec<ConstantDeclaration>,
    pub terminators: Vec<Token>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstantDeclaration {
    pub span: Span,
    pub name: IdentifierDefinition,
    pub equal: Token,
    pub value: Box<Expression>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSection {
    pub span: Span,
    pub type_token: Token,
    pub types: Vec<TypeDeclaration>,
    pub terminators: Vec<Token>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub span: Span,
    pub name: IdentifierDefinition,
    pub equal: Token,
    pub type_spec: TypeSpec,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableSection {
    pub span: Span,
    pub var: Token,
    pub variables: Vec<VariableDeclaration>,
    pub terminators: Vec<Token>,
}

/// `VariableNameList ':' Type`, also used for record fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub span: Span,
    pub names: VariableNameList,
    pub colon: Token,
    pub type_spec: TypeSpec,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableNameList {
    pub span: Span,
    pub names: Vec<VariableName>,
    pub separators: Vec<Token>,
}

/// `IdentifierDefinition [Flags] [':=' Expression | EXTERN String]`. `initializer` holds the
/// `:=` or `EXTERN` token, `value` the expression or the string literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableName {
    pub span: Span,
    pub name: IdentifierDefinition,
    pub flags: Option<Flags>,
    pub initializer: Option<Token>,
    pub value: Option<Box<Expression>>,
}

/// `PROCEDURE ['^'|'&'|'~'|'-'|Flags ['-']] IdentifierDefinition [FormalParameters] ';'
/// [DeclarationSequence [Body] END Ident]`.
///
/// Forward declarations (`^`) end at the first `;` and have no declarations, body or closing
/// name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcedureDeclaration {
    pub span: Span,
    pub procedure: Token,
    pub modifier: Option<Token>,
    pub flags: Option<Flags>,
    pub name: IdentifierDefinition,
    pub parameters: Option<FormalParameters>,
    pub semicolon: Token,
    pub declarations: Option<DeclarationSequence>,
    pub body: Option<Body>,
    pub end: Option<Token>,
    pub closing_name: Option<Name>,
    pub terminator: Option<Token>,
}

impl ProcedureDeclaration {
    pub fn is_forward(&self) -> bool {
        self.modifier.is_some_and(|token| token.kind == Symbol::Arrow)
    }
}

/// `OPERATOR [Flags] ['-'] String ['*'|'-'] FormalParameters ';' DeclarationSequence [Body]
/// END String`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorDeclaration {
    pub span: Span,
    pub operator: Token,
    pub flags: Option<Flags>,
    pub minus: Option<Token>,
    pub symbol: Name,
    pub export: Option<Token>,
    pub parameters: FormalParameters,
    pub semicolon: Token,
    pub declarations: DeclarationSequence,
    pub body: Option<Body>,
    pub end: Token,
    pub closing_symbol: Name,
    pub terminator: Option<Token>,
}

/// `'(' [ParamDecl {';' ParamDecl}] ')' [':' [Flags] Type]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormalParameters {
    pub span: Span,
    pub left: Token,
    pub parameters: Vec<ParameterDeclaration>,
    pub separators: Vec<Token>,
    pub right: Token,
    pub colon: Option<Token>,
    pub return_flags: Option<Flags>,
    pub return_type: Option<Box<TypeSpec>>,
}

/// `[VAR|CONST] Param {',' Param} ':' Type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterDeclaration {
    pub span: Span,
    pub mode: Option<Token>,
    pub names: Vec<Parameter>,
    pub separators: Vec<Token>,
    pub colon: Token,
    pub type_spec: TypeSpec,
}

/// `Ident [Flags] ['=' Expression]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub span: Span,
    pub name: Name,
    pub flags: Option<Flags>,
    pub equal: Option<Token>,
    pub default: Option<Box<Expression>>,
}

/// `BEGIN [Flags] StatementSequence [FINALLY StatementSequence]` or `CODE InlineAssembler`.
/// `begin` holds the `BEGIN` or `CODE` token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
    pub span: Span,
    pub begin: Token,
    pub flags: Option<Flags>,
    pub statements: Option<StatementSequence>,
    pub finally: Option<Token>,
    pub finally_statements: Option<StatementSequence>,
    pub assembler: Option<AssemblerBlock>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSpec {
    Array(ArrayType),
    MathArray(MathArrayType),
    Record(RecordType),
    Pointer(PointerType),
    Procedure(ProcedureType),
    Object(ObjectType),
    Enumeration(Enumeration),
    Cell(CellType),
    Port(PortType),
    Builtin(BuiltinType),
    Qualified(QualifiedIdentifier),
}

impl_node_enum!(TypeSpec {
    Array,
    MathArray,
    Record,
    Pointer,
    Procedure,
    Object,
    Enumeration,
    Cell,
    Port,
    Builtin,
    Qualified,
});

/// `ARRAY [Expression {',' Expression}] OF Type`, open when there are no lengths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayType {
    pub span: Span,
    pub array: Token,
    pub lengths: Vec<Expression>,
    pub separators: Vec<Token>,
    pub of: Token,
    pub element: Box<TypeSpec>,
}

/// `ARRAY '[' Size {',' Size} ']' OF Type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathArrayType {
    pub span: Span,
    pub array: Token,
    pub left: Token,
    pub sizes: Vec<MathArraySize>,
    pub separators: Vec<Token>,
    pub right: Token,
    pub of: Token,
    pub element: Box<TypeSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MathArraySize {
    /// `*`, open dimension.
    Open(Token),
    /// `?`, any number of dimensions.
    Tensor(Token),
    Length(Expression),
}

/// `RECORD ['(' QualifiedIdentifier ')'] {VarDecl [';']} END`. `semicolons` runs parallel to
/// `fields`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordType {
    pub span: Span,
    pub record: Token,
    pub left: Option<Token>,
    pub base: Option<QualifiedIdentifier>,
    pub right: Option<Token>,
    pub fields: Vec<VariableDeclaration>,
    pub semicolons: Vec<Option<Token>>,
    pub end: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerType {
    pub span: Span,
    pub pointer: Token,
    pub flags: Option<Flags>,
    pub to: Token,
    pub target: Box<TypeSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcedureType {
    pub span: Span,
    pub procedure: Token,
    pub flags: Option<Flags>,
    pub parameters: Option<FormalParameters>,
}

/// Either the generic `OBJECT` type, or `OBJECT [Flags] ['(' QualifiedIdentifier ')']
/// DeclarationSequence [Body] END [Ident]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectType {
    pub span: Span,
    pub object: Token,
    pub flags: Option<Flags>,
    pub left: Option<Token>,
    pub base: Option<QualifiedIdentifier>,
    pub right: Option<Token>,
    pub declarations: Option<DeclarationSequence>,
    pub body: Option<Body>,
    pub end: Option<Token>,
    pub closing_name: Option<Name>,
}

impl ObjectType {
    pub fn is_generic(&self) -> bool {
        self.end.is_none()
    }
}

/// `ENUM ['(' QualifiedIdentifier ')'] [EnumerationValue {',' EnumerationValue}] END`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumeration {
    pub span: Span,
    pub enum_token: Token,
    pub left: Option<Token>,
    pub base: Option<QualifiedIdentifier>,
    pub right: Option<Token>,
    pub values: Vec<EnumerationValue>,
    pub separators: Vec<Token>,
    pub end: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerationValue {
    pub span: Span,
    pub key: IdentifierDefinition,
    pub equal: Option<Token>,
    pub value: Option<Box<Expression>>,
}

/// `(CELL|CELLNET) [Flags] [PortList] [';'] {ImportList} DeclarationSequence [Body] END
/// [Ident]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellType {
    pub span: Span,
    pub cell: Token,
    pub flags: Option<Flags>,
    pub ports: Option<PortList>,
    pub semicolon: Option<Token>,
    pub imports: Vec<ImportList>,
    pub declarations: DeclarationSequence,
    pub body: Option<Body>,
    pub end: Token,
    pub closing_name: Option<Name>,
}

/// `'(' [PortDeclaration {';' PortDeclaration}] ')'`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortList {
    pub span: Span,
    pub left: Token,
    pub ports: Vec<PortDeclaration>,
    pub separators: Vec<Token>,
    pub right: Token,
}

/// Names sharing one port type, `a, b {flag}: PORT IN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortDeclaration {
    pub span: Span,
    pub names: Vec<PortName>,
    pub separators: Vec<Token>,
    pub colon: Token,
    pub port_type: PortType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortName {
    pub span: Span,
    pub name: Name,
    pub flags: Option<Flags>,
}

/// `PORT (IN|OUT) ['(' Expression ')']`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortType {
    pub span: Span,
    pub port: Token,
    pub direction: Token,
    pub left: Option<Token>,
    pub size: Option<Box<Expression>>,
    pub right: Option<Token>,
}

impl PortType {
    pub fn is_input(&self) -> bool {
        self.direction.kind == Symbol::In
    }

    pub fn is_output(&self) -> bool {
        self.direction.kind == Symbol::Out
    }
}

/// `ANY`, `ADDRESS` or `SIZE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinType {
    pub span: Span,
    pub token: Token,
}

/// `name ['.' name]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualifiedIdentifier {
    pub span: Span,
    pub first: Name,
    pub period: Option<Token>,
    pub second: Option<Name>,
}

/// A declared name with an optional export marker, `-` for read-only and `*` for read-write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifierDefinition {
    pub span: Span,
    pub name: Name,
    pub export: Option<Token>,
}

impl IdentifierDefinition {
    pub fn is_export_read_only(&self) -> bool {
        self.export.is_some_and(|token| token.kind == Symbol::Minus)
    }

    pub fn is_export_read_write(&self) -> bool {
        self.export.is_some_and(|token| token.kind == Symbol::Times)
    }

    pub fn is_private(&self) -> bool {
        self.export.is_none()
    }
}

impl_node!(
    Block,
    Module,
    TemplateParameters,
    TemplateParameter,
    ImportList,
    Import,
    DeclarationSequence,
    ConstantSection,
    ConstantDeclaration,
    TypeSection,
    TypeDeclaration,
    VariableSection,
    VariableDeclaration,
    VariableNameList,
    VariableName,
    ProcedureDeclaration,
    OperatorDeclaration,
    FormalParameters,
    ParameterDeclaration,
    Parameter,
    Body,
    ArrayType,
    MathArrayType,
    RecordType,
    PointerType,
    ProcedureType,
    ObjectType,
    Enumeration,
    EnumerationValue,
    CellType,
    PortList,
    PortDeclaration,
    PortName,
    PortType,
    BuiltinType,
    QualifiedIdentifier,
    IdentifierDefinition,
);
