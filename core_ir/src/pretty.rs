use std::fmt::{self, Formatter};

use itertools::Itertools;

use crate::core_nodes::{
    Alternative, Annotated, Annotation, Application, Binding, Case, Cast, CoreExpression,
    CoreProgram, CoreType, Definition, FunctionType, Lambda, Let, Literal, Pattern,
    TypeConstructor, TypeLiteral, TypeVariable, Variable,
};

impl fmt::Display for CoreType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CoreType::TypeConstructor(TypeConstructor { name, arguments }) => {
                if arguments.is_empty() {
                    write!(f, "{}", name)
                } else {
                    write!(f, "({} {})", name, arguments.iter().join(" "))
                }
            }
            CoreType::FunctionType(FunctionType(argument, ret)) => {
                write!(f, "({} -> {})", argument, ret)
            }
            CoreType::TypeVariable(TypeVariable(name)) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Boolean(true) => write!(f, "True"),
            Literal::Boolean(false) => write!(f, "False"),
            Literal::Character(value) => write!(f, "{:?}", value),
            Literal::String(value) => write!(f, "{:?}", value),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::SourceNote(note) => write!(f, "{{-# SOURCE {} #-}}", note),
            Annotation::ProfilingTick(cost_centre) => write!(f, "{{-# SCC {} #-}}", cost_centre),
        }
    }
}

impl fmt::Display for CoreExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CoreExpression::Variable(Variable(identifier)) => write!(f, "{}", identifier),
            CoreExpression::Literal(literal) => write!(f, "{}", literal),
            CoreExpression::TypeLiteral(TypeLiteral(type_)) => write!(f, "@{}", type_),
            CoreExpression::Application(Application { function, argument }) => {
                write!(f, "({} {})", function, argument)
            }
            CoreExpression::Annotated(Annotated {
                annotation,
                expression,
            }) => write!(f, "{} {}", annotation, expression),
            CoreExpression::Cast(Cast {
                expression,
                coercion,
            }) => write!(
                f,
                "({} |> {} ~ {})",
                expression, coercion.source, coercion.target
            ),
            CoreExpression::Lambda(Lambda { parameter, body }) => {
                write!(f, "(\\{} -> {})", parameter, body)
            }
            CoreExpression::Let(Let { binding, body }) => {
                write!(f, "(let {} in {})", binding, body)
            }
            CoreExpression::Case(Case {
                scrutinee,
                binder,
                type_: _,
                alternatives,
            }) => write!(
                f,
                "(case {} of {} {{ {} }})",
                scrutinee,
                binder,
                alternatives.iter().join("; ")
            ),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Constructor(name) => write!(f, "{}", name),
            Pattern::Literal(literal) => write!(f, "{}", literal),
            Pattern::Default => write!(f, "_"),
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Alternative {
            pattern,
            variables,
            body,
        } = self;
        if variables.is_empty() {
            write!(f, "{} -> {}", pattern, body)
        } else {
            write!(f, "{} {} -> {}", pattern, variables.iter().join(" "), body)
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.binder, self.expression)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Binding::NonRecursive(definition) => write!(f, "{}", definition),
            Binding::Recursive(definitions) => {
                write!(f, "rec {{ {} }}", definitions.iter().join("; "))
            }
        }
    }
}

impl fmt::Display for CoreProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bindings.iter().join("\n"))
    }
}
