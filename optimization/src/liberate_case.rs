use core_ir::{
    Alternative, Annotated, Application, Binding, Case, Cast, CodeSizeEstimator, CoreExpression,
    CoreProgram, Definition, Identifier, Lambda, Let, Variable,
};
use itertools::Itertools;
use log::{debug, trace};

use crate::{args::LiberateCaseArgs, environment::LiberationEnvironment, SimplifierCounts};

/// Unrolls one level of a recursive group at every recursive call made under a `case` on a
/// variable bound outside the group.
///
/// The unrolled copy is bound right around the call, so that a later simplifier can inline it
/// and drop the repeated evaluation of the scrutinized variable.
pub struct CaseLiberator {}

impl CaseLiberator {
    pub fn liberate(program: CoreProgram, args: &LiberateCaseArgs) -> (CoreProgram, SimplifierCounts) {
        if args.no_liberate_case {
            return (program, SimplifierCounts::new());
        }
        let mut environment = LiberationEnvironment::new(args.bomb_out_size());
        let mut bindings = Vec::with_capacity(program.bindings.len());
        for binding in &program.bindings {
            let (next_environment, binding) = Self::liberate_binding(&environment, binding);
            environment = next_environment;
            bindings.push(binding);
        }
        (CoreProgram { bindings }, SimplifierCounts::new())
    }
    /// Rewrite a binding, returning the environment for the code in its scope.
    fn liberate_binding(
        environment: &LiberationEnvironment,
        binding: &Binding,
    ) -> (LiberationEnvironment, Binding) {
        match binding {
            Binding::NonRecursive(Definition { binder, expression }) => (
                environment.add_binders([binder]),
                Binding::NonRecursive(Definition {
                    binder: binder.clone(),
                    expression: Self::liberate_expression(environment, expression),
                }),
            ),
            Binding::Recursive(definitions) => {
                let body_environment = environment.add_binders(binding.binders());
                let rhs_environment = if Self::is_duplicable(environment, definitions) {
                    // Rewritten without the group's own unfolding, so unrolling happens only once.
                    let unfolding = definitions
                        .iter()
                        .map(|Definition { binder, expression }| Definition {
                            binder: binder.clone(),
                            expression: Self::liberate_expression(&body_environment, expression),
                        })
                        .collect();
                    debug!(
                        "unrolling recursive group {{{}}} at level {}",
                        binding.binders().iter().join(", "),
                        environment.level()
                    );
                    environment.add_recursive_unfoldings(unfolding)
                } else {
                    debug!(
                        "recursive group {{{}}} is too large to unroll",
                        binding.binders().iter().join(", ")
                    );
                    environment.clone()
                };
                let definitions = definitions
                    .iter()
                    .map(|Definition { binder, expression }| Definition {
                        binder: binder.clone(),
                        expression: Self::liberate_expression(&rhs_environment, expression),
                    })
                    .collect();
                (body_environment, Binding::Recursive(definitions))
            }
        }
    }
    fn is_duplicable(environment: &LiberationEnvironment, definitions: &[Definition]) -> bool {
        match environment.bomb_out_size() {
            None => true,
            Some(size) => definitions
                .iter()
                .all(|definition| CodeSizeEstimator::fits_budget(&definition.expression, size)),
        }
    }
    fn liberate_expression(
        environment: &LiberationEnvironment,
        expression: &CoreExpression,
    ) -> CoreExpression {
        match expression {
            CoreExpression::Variable(Variable(identifier)) => {
                Self::liberate_variable(environment, identifier)
            }
            CoreExpression::Literal(_) | CoreExpression::TypeLiteral(_) => expression.clone(),
            CoreExpression::Application(Application { function, argument }) => Application::new(
                Self::liberate_expression(environment, function),
                Self::liberate_expression(environment, argument),
            )
            .into(),
            CoreExpression::Annotated(Annotated {
                annotation,
                expression,
            }) => Annotated::new(
                annotation.clone(),
                Self::liberate_expression(environment, expression),
            )
            .into(),
            CoreExpression::Cast(Cast {
                expression,
                coercion,
            }) => Cast::new(
                Self::liberate_expression(environment, expression),
                coercion.clone(),
            )
            .into(),
            CoreExpression::Lambda(Lambda { parameter, body }) => Lambda::new(
                parameter.clone(),
                Self::liberate_expression(&environment.add_binders([parameter]), body),
            )
            .into(),
            CoreExpression::Let(Let { binding, body }) => {
                let (body_environment, binding) = Self::liberate_binding(environment, binding);
                Let::new(binding, Self::liberate_expression(&body_environment, body)).into()
            }
            CoreExpression::Case(Case {
                scrutinee,
                binder,
                type_,
                alternatives,
            }) => {
                let alternatives_environment =
                    Self::scrutinize(environment, scrutinee).add_binders([binder]);
                Case::new(
                    Self::liberate_expression(environment, scrutinee),
                    binder.clone(),
                    type_.clone(),
                    alternatives
                        .iter()
                        .map(|alternative| {
                            Self::liberate_alternative(&alternatives_environment, alternative)
                        })
                        .collect(),
                )
                .into()
            }
        }
    }
    fn liberate_alternative(
        environment: &LiberationEnvironment,
        Alternative {
            pattern,
            variables,
            body,
        }: &Alternative,
    ) -> Alternative {
        Alternative {
            pattern: pattern.clone(),
            variables: variables.clone(),
            body: Self::liberate_expression(&environment.add_binders(variables), body),
        }
    }
    /// Record the scrutinee if it is a variable, possibly under casts.
    fn scrutinize(
        environment: &LiberationEnvironment,
        scrutinee: &CoreExpression,
    ) -> LiberationEnvironment {
        match scrutinee.strip_casts() {
            CoreExpression::Variable(Variable(identifier)) => {
                environment.add_scrutinized(identifier)
            }
            _ => environment.clone(),
        }
    }
    fn liberate_variable(
        environment: &LiberationEnvironment,
        identifier: &Identifier,
    ) -> CoreExpression {
        let variable = CoreExpression::from(identifier.clone());
        let Some(unfolding) = environment.lookup_unfolding(identifier) else {
            return variable;
        };
        let free_scrutinized = environment.free_scrutinized(environment.lookup_level(identifier));
        if free_scrutinized.is_empty() {
            return variable;
        }
        trace!(
            "liberating {} (scrutinized: {})",
            identifier,
            free_scrutinized.iter().join(", ")
        );
        Let::new(unfolding.clone(), variable).into()
    }
}
