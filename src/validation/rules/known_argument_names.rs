use super::ValidationRule;
use crate::ast::{NodeRef, PathSegment, TypeInfo};
use crate::schema::TypeDefinitionExtension;
use crate::validation::utils::{
    nearest_location, visit_document_with_rule, ValidationContext, ValidationError,
    ValidationErrorContext, ValidationVisitor,
};

/// Known argument names
///
/// A GraphQL field/directive is only valid if all supplied arguments are defined by
/// that field.
///
/// See https://spec.graphql.org/draft/#sec-Argument-Names
/// See https://spec.graphql.org/draft/#sec-Directives-Are-In-Valid-Locations
pub struct KnownArgumentNames;

impl<'a> ValidationVisitor<'a> for KnownArgumentNames {
    fn enter(
        &self,
        node: NodeRef<'a>,
        path: &[PathSegment<'a>],
        type_info: &TypeInfo<'a>,
        error_context: &mut ValidationErrorContext<'a>,
    ) {
        let argument = match node {
            NodeRef::Argument(argument) => argument,
            _ => return,
        };

        if type_info.get_argument().is_some() {
            return;
        }

        let argument_name = argument.name().value();

        let message = match path.last().map(|segment| segment.parent) {
            Some(NodeRef::Directive(directive)) => match type_info.get_directive() {
                Some(_) => format!(
                    "Unknown argument \"{}\" on directive \"@{}\".",
                    argument_name,
                    directive.name().value()
                ),
                None => return,
            },
            Some(NodeRef::Field(_)) => {
                match (type_info.get_parent_type(), type_info.get_field_def()) {
                    (Some(parent_type), Some(field_def)) => format!(
                        "Unknown argument \"{}\" on field \"{}.{}\".",
                        argument_name,
                        parent_type.name(),
                        field_def.name
                    ),
                    _ => return,
                }
            }
            _ => return,
        };

        error_context.report_error(ValidationError {
            locations: nearest_location(node, path),
            message,
            error_code: self.error_code(),
        });
    }
}

impl ValidationRule for KnownArgumentNames {
    fn error_code<'a>(&self) -> &'a str {
        "KnownArgumentNames"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        visit_document_with_rule(self, ctx)
    }
}

#[test]
fn single_arg_is_known() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "fragment argOnRequiredArg on Dog {
          doesKnowCommand(dogCommand: SIT)
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn multple_args_are_known() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "fragment multipleArgs on ComplicatedArgs {
          multipleReqs(req1: 1, req2: 2)
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn ignores_args_of_unknown_fields() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "fragment argOnUnknownField on Dog {
          unknownField(unknownArg: SIT)
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn multiple_args_in_reverse_order_are_known() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "fragment multipleArgsReverseOrder on ComplicatedArgs {
          multipleReqs(req2: 2, req1: 1)
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn no_args_on_optional_arg() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "fragment noArgOnOptionalArg on Dog {
          isHouseTrained
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn args_are_known_deeply() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "{
          dog {
            doesKnowCommand(dogCommand: SIT)
          }
          human {
            pet {
              ... on Dog {
                doesKnowCommand(dogCommand: SIT)
              }
            }
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn directive_args_are_known() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "{
          dog @skip(if: true)
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn field_args_are_invalid() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "{
          dog @skip(unless: true)
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Unknown argument \"unless\" on directive \"@skip\"."]
    );
}

#[test]
fn directive_without_args_is_valid() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        " {
          dog @onField
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn arg_passed_to_directive_without_arg_is_reported() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        " {
          dog @onField(if: true)
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Unknown argument \"if\" on directive \"@onField\"."]
    );
}

#[test]
fn invalid_arg_name() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "fragment invalidArgName on Dog {
          doesKnowCommand(unknown: true)
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Unknown argument \"unknown\" on field \"Dog.doesKnowCommand\"."]
    );
}

#[test]
fn unknown_args_amongst_known_args() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "fragment oneGoodArgOneInvalidArg on Dog {
          doesKnowCommand(whoKnows: 1, dogCommand: SIT, unknown: true)
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages,
        vec![
            "Unknown argument \"whoKnows\" on field \"Dog.doesKnowCommand\".",
            "Unknown argument \"unknown\" on field \"Dog.doesKnowCommand\"."
        ]
    );
}

#[test]
fn unknown_args_deeply() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "{
          dog {
            doesKnowCommand(unknown: true)
          }
          human {
            pet {
              ... on Dog {
                doesKnowCommand(unknown: true)
              }
            }
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages,
        vec![
            "Unknown argument \"unknown\" on field \"Dog.doesKnowCommand\".",
            "Unknown argument \"unknown\" on field \"Dog.doesKnowCommand\"."
        ]
    );
}

#[test]
fn field_args_on_directive_inside_field() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownArgumentNames {}));
    let errors = test_operation_with_schema(
        "{
          dog {
            doesKnowCommand(dogCommand: SIT) @include(if: true, dogCommand: SIT)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec!["Unknown argument \"dogCommand\" on directive \"@include\"."]
    );
    assert_eq!(
        errors[0].locations,
        vec![crate::error::SourceLocation { line: 3, column: 46 }]
    );
}
