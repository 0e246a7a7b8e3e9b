use std::slice;

use from_variants::FromVariants;
use serde::{Deserialize, Serialize};

use crate::identifier::{Id, Identifier};

#[derive(Clone, Debug, PartialEq, Eq, FromVariants, Serialize, Deserialize)]
pub enum CoreType {
    TypeConstructor(TypeConstructor),
    FunctionType(FunctionType),
    TypeVariable(TypeVariable),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConstructor {
    pub name: Id,
    pub arguments: Vec<CoreType>,
}

impl From<&str> for TypeConstructor {
    fn from(name: &str) -> Self {
        TypeConstructor {
            name: Id::from(name),
            arguments: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionType(pub Box<CoreType>, pub Box<CoreType>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeVariable(pub Id);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Integer(i64),
    Boolean(bool),
    Character(char),
    String(String),
}

/// Evidence that a value of type `source` may be viewed at type `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coercion {
    pub source: CoreType,
    pub target: CoreType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Annotation {
    SourceNote(String),
    ProfilingTick(Id),
}

#[derive(Clone, Debug, PartialEq, Eq, FromVariants, Serialize, Deserialize)]
pub enum CoreExpression {
    Variable(Variable),
    Literal(Literal),
    TypeLiteral(TypeLiteral),
    Application(Application),
    Annotated(Annotated),
    Cast(Cast),
    Lambda(Lambda),
    Let(Let),
    Case(Case),
}

impl CoreExpression {
    /// Look through any chain of casts.
    pub fn strip_casts(&self) -> &CoreExpression {
        match self {
            CoreExpression::Cast(Cast {
                expression,
                coercion: _,
            }) => expression.strip_casts(),
            expression => expression,
        }
    }
}

impl From<Identifier> for CoreExpression {
    fn from(value: Identifier) -> Self {
        CoreExpression::Variable(Variable(value))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable(pub Identifier);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLiteral(pub CoreType);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub function: Box<CoreExpression>,
    pub argument: Box<CoreExpression>,
}

impl Application {
    pub fn new(function: impl Into<CoreExpression>, argument: impl Into<CoreExpression>) -> Self {
        Application {
            function: Box::new(function.into()),
            argument: Box::new(argument.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotated {
    pub annotation: Annotation,
    pub expression: Box<CoreExpression>,
}

impl Annotated {
    pub fn new(annotation: Annotation, expression: impl Into<CoreExpression>) -> Self {
        Annotated {
            annotation,
            expression: Box::new(expression.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    pub expression: Box<CoreExpression>,
    pub coercion: Coercion,
}

impl Cast {
    pub fn new(expression: impl Into<CoreExpression>, coercion: Coercion) -> Self {
        Cast {
            expression: Box::new(expression.into()),
            coercion,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lambda {
    pub parameter: Identifier,
    pub body: Box<CoreExpression>,
}

impl Lambda {
    pub fn new(parameter: Identifier, body: impl Into<CoreExpression>) -> Self {
        Lambda {
            parameter,
            body: Box::new(body.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Let {
    pub binding: Box<Binding>,
    pub body: Box<CoreExpression>,
}

impl Let {
    pub fn new(binding: Binding, body: impl Into<CoreExpression>) -> Self {
        Let {
            binding: Box::new(binding),
            body: Box::new(body.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub scrutinee: Box<CoreExpression>,
    pub binder: Identifier,
    pub type_: CoreType,
    pub alternatives: Vec<Alternative>,
}

impl Case {
    pub fn new(
        scrutinee: impl Into<CoreExpression>,
        binder: Identifier,
        type_: CoreType,
        alternatives: Vec<Alternative>,
    ) -> Self {
        Case {
            scrutinee: Box::new(scrutinee.into()),
            binder,
            type_,
            alternatives,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    Constructor(Id),
    Literal(Literal),
    Default,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub pattern: Pattern,
    pub variables: Vec<Identifier>,
    pub body: CoreExpression,
}

impl Alternative {
    pub fn new(
        pattern: Pattern,
        variables: Vec<Identifier>,
        body: impl Into<CoreExpression>,
    ) -> Self {
        Alternative {
            pattern,
            variables,
            body: body.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub binder: Identifier,
    pub expression: CoreExpression,
}

impl Definition {
    pub fn new(binder: Identifier, expression: impl Into<CoreExpression>) -> Self {
        Definition {
            binder,
            expression: expression.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    NonRecursive(Definition),
    /// Definitions that may all refer to each other.
    Recursive(Vec<Definition>),
}

impl Binding {
    pub fn definitions(&self) -> &[Definition] {
        match self {
            Binding::NonRecursive(definition) => slice::from_ref(definition),
            Binding::Recursive(definitions) => definitions,
        }
    }
    pub fn binders(&self) -> Vec<&Identifier> {
        self.definitions()
            .iter()
            .map(|definition| &definition.binder)
            .collect()
    }
}

/// The top-level bindings of one compilation unit, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreProgram {
    pub bindings: Vec<Binding>,
}
