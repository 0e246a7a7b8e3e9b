use once_cell::sync::Lazy;

use crate::core_nodes::{
    Alternative, Annotated, Application, Binding, Case, Cast, CoreExpression, Lambda, Let, Literal,
};

struct CodeSizeConstants {
    variable_size: usize,
    literal_size: usize,
    string_literal_size: usize,
    type_literal_size: usize,
    application_size: usize,
    annotated_size: usize,
    cast_size: usize,
    lambda_size: usize,
    let_size: usize,
    definition_size: usize,
    case_size: usize,
    alternative_size: usize,
}

static CODE_SIZE_CONSTANTS: Lazy<CodeSizeConstants> = Lazy::new(|| CodeSizeConstants {
    variable_size: 1,
    literal_size: 1,
    string_literal_size: 10,
    type_literal_size: 0,
    application_size: 2,
    annotated_size: 0,
    cast_size: 0,
    lambda_size: 1,
    let_size: 1,
    definition_size: 2,
    case_size: 2,
    alternative_size: 1,
});

/// Structural size estimates used to decide whether code is cheap enough to duplicate.
pub struct CodeSizeEstimator {
    size: usize,
    limit: usize,
}

impl CodeSizeEstimator {
    /// Whether `expression` costs at most `budget`.
    ///
    /// The walk stops as soon as the running total passes the budget, so large trees are never
    /// traversed in full.
    pub fn fits_budget(expression: &CoreExpression, budget: usize) -> bool {
        let mut estimator = CodeSizeEstimator {
            size: 0,
            limit: budget,
        };
        estimator.expression_size(expression).is_some()
    }
    pub fn estimate_size(expression: &CoreExpression) -> usize {
        let mut estimator = CodeSizeEstimator {
            size: 0,
            limit: usize::MAX,
        };
        match estimator.expression_size(expression) {
            Some(()) => estimator.size,
            None => usize::MAX,
        }
    }
    fn add(&mut self, size: usize) -> Option<()> {
        self.size = self.size.saturating_add(size);
        (self.size <= self.limit).then_some(())
    }
    fn literal_size(literal: &Literal) -> usize {
        match literal {
            Literal::Integer(_) | Literal::Boolean(_) | Literal::Character(_) => {
                CODE_SIZE_CONSTANTS.literal_size
            }
            Literal::String(_) => CODE_SIZE_CONSTANTS.string_literal_size,
        }
    }
    fn expression_size(&mut self, expression: &CoreExpression) -> Option<()> {
        match expression {
            CoreExpression::Variable(_) => self.add(CODE_SIZE_CONSTANTS.variable_size),
            CoreExpression::Literal(literal) => self.add(Self::literal_size(literal)),
            CoreExpression::TypeLiteral(_) => self.add(CODE_SIZE_CONSTANTS.type_literal_size),
            CoreExpression::Application(Application { function, argument }) => {
                self.add(CODE_SIZE_CONSTANTS.application_size)?;
                self.expression_size(function)?;
                self.expression_size(argument)
            }
            CoreExpression::Annotated(Annotated {
                annotation: _,
                expression,
            }) => {
                self.add(CODE_SIZE_CONSTANTS.annotated_size)?;
                self.expression_size(expression)
            }
            CoreExpression::Cast(Cast {
                expression,
                coercion: _,
            }) => {
                self.add(CODE_SIZE_CONSTANTS.cast_size)?;
                self.expression_size(expression)
            }
            CoreExpression::Lambda(Lambda { parameter: _, body }) => {
                self.add(CODE_SIZE_CONSTANTS.lambda_size)?;
                self.expression_size(body)
            }
            CoreExpression::Let(Let { binding, body }) => {
                self.add(CODE_SIZE_CONSTANTS.let_size)?;
                self.binding_size(binding)?;
                self.expression_size(body)
            }
            CoreExpression::Case(Case {
                scrutinee,
                binder: _,
                type_: _,
                alternatives,
            }) => {
                self.add(CODE_SIZE_CONSTANTS.case_size)?;
                self.expression_size(scrutinee)?;
                alternatives
                    .iter()
                    .try_for_each(|alternative| self.alternative_size(alternative))
            }
        }
    }
    fn binding_size(&mut self, binding: &Binding) -> Option<()> {
        binding.definitions().iter().try_for_each(|definition| {
            self.add(CODE_SIZE_CONSTANTS.definition_size)?;
            self.expression_size(&definition.expression)
        })
    }
    fn alternative_size(&mut self, alternative: &Alternative) -> Option<()> {
        self.add(CODE_SIZE_CONSTANTS.alternative_size)?;
        self.expression_size(&alternative.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        core_nodes::{Annotation, Coercion, Definition, Pattern, TypeConstructor, TypeLiteral},
        identifier::Identifier,
    };
    use test_case::test_case;

    static CSC: &Lazy<CodeSizeConstants> = &CODE_SIZE_CONSTANTS;

    fn variable() -> CoreExpression {
        Identifier::new("v").into()
    }

    #[test_case(
        variable(),
        CSC.variable_size;
        "variable"
    )]
    #[test_case(
        Literal::Integer(12).into(),
        CSC.literal_size;
        "integer"
    )]
    #[test_case(
        Literal::String(String::from("hello")).into(),
        CSC.string_literal_size;
        "string"
    )]
    #[test_case(
        TypeLiteral(TypeConstructor::from("Int").into()).into(),
        CSC.type_literal_size;
        "type literal"
    )]
    #[test_case(
        Application::new(variable(), variable()).into(),
        CSC.application_size + 2 * CSC.variable_size;
        "application"
    )]
    #[test_case(
        Annotated::new(Annotation::ProfilingTick(String::from("scc")), variable()).into(),
        CSC.annotated_size + CSC.variable_size;
        "annotated"
    )]
    #[test_case(
        Cast::new(
            variable(),
            Coercion {
                source: TypeConstructor::from("Age").into(),
                target: TypeConstructor::from("Int").into(),
            }
        ).into(),
        CSC.cast_size + CSC.variable_size;
        "cast"
    )]
    #[test_case(
        Lambda::new(Identifier::new("x"), variable()).into(),
        CSC.lambda_size + CSC.variable_size;
        "lambda"
    )]
    #[test_case(
        Let::new(
            Binding::Recursive(vec![
                Definition::new(Identifier::new("f"), variable()),
                Definition::new(Identifier::new("g"), Literal::Boolean(false)),
            ]),
            variable()
        ).into(),
        CSC.let_size
            + 2 * CSC.definition_size
            + CSC.variable_size
            + CSC.literal_size
            + CSC.variable_size;
        "recursive let"
    )]
    #[test_case(
        Case::new(
            variable(),
            Identifier::new("b"),
            TypeConstructor::from("Bool").into(),
            vec![
                Alternative::new(Pattern::Literal(Literal::Boolean(true)), Vec::new(), variable()),
                Alternative::new(Pattern::Default, Vec::new(), Literal::Integer(0)),
            ]
        ).into(),
        CSC.case_size
            + CSC.variable_size
            + 2 * CSC.alternative_size
            + CSC.variable_size
            + CSC.literal_size;
        "case"
    )]
    fn test_estimate_size(expression: CoreExpression, expected_size: usize) {
        assert_eq!(CodeSizeEstimator::estimate_size(&expression), expected_size);
    }

    #[test_case(0; "zero")]
    #[test_case(7; "below")]
    #[test_case(8; "exact")]
    #[test_case(9; "above")]
    #[test_case(usize::MAX; "unbounded")]
    fn test_fits_budget_agrees_with_estimate(budget: usize) {
        let expression: CoreExpression = Lambda::new(
            Identifier::new("x"),
            Application::new(variable(), Application::new(variable(), variable())),
        )
        .into();
        assert_eq!(
            CodeSizeEstimator::fits_budget(&expression, budget),
            CodeSizeEstimator::estimate_size(&expression) <= budget
        );
    }

    #[test]
    fn test_estimate_size_of_deep_expression() {
        let mut expression = variable();
        for _ in 0..1_000 {
            expression = Application::new(variable(), expression).into();
        }
        let expected = 1_000 * (CSC.application_size + CSC.variable_size) + CSC.variable_size;
        assert_eq!(CodeSizeEstimator::estimate_size(&expression), expected);
        assert!(CodeSizeEstimator::fits_budget(&expression, expected));
        assert!(!CodeSizeEstimator::fits_budget(&expression, expected - 1));
    }

    #[test]
    fn test_fits_budget_bombs_out() {
        let mut expression = variable();
        for _ in 0..1_000 {
            expression = Application::new(variable(), expression).into();
        }
        let mut estimator = CodeSizeEstimator { size: 0, limit: 10 };
        assert_eq!(estimator.expression_size(&expression), None);
        assert!(estimator.size <= 10 + CSC.application_size);
    }
}
