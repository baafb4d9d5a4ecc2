use super::ValidationRule;
use crate::ast::{NodeRef, OperationType, PathSegment, TypeInfo};
use crate::validation::utils::{
    nearest_location, visit_document_with_rule, ValidationContext, ValidationError,
    ValidationErrorContext, ValidationVisitor,
};

/// Known Directives
///
/// A GraphQL document is only valid if all `@directives` are known by the
/// schema and legally positioned.
///
/// See https://spec.graphql.org/draft/#sec-Directives-Are-Defined
pub struct KnownDirectives;

/// Directive location of the node holding the directive at the end of `path`.
fn directive_location(path: &[PathSegment<'_>]) -> Option<&'static str> {
    let (owner, rest) = path.split_last()?;

    let location = match owner.parent {
        NodeRef::OperationDefinition(operation) => match operation.operation() {
            OperationType::Query => "QUERY",
            OperationType::Mutation => "MUTATION",
            OperationType::Subscription => "SUBSCRIPTION",
        },
        NodeRef::Field(_) => "FIELD",
        NodeRef::FragmentSpread(_) => "FRAGMENT_SPREAD",
        NodeRef::InlineFragment(_) => "INLINE_FRAGMENT",
        NodeRef::FragmentDefinition(_) => "FRAGMENT_DEFINITION",
        NodeRef::VariableDefinition(_) => "VARIABLE_DEFINITION",
        NodeRef::SchemaDefinition(_) => "SCHEMA",
        NodeRef::ScalarTypeDefinition(_) => "SCALAR",
        NodeRef::ObjectTypeDefinition(_) => "OBJECT",
        NodeRef::FieldDefinition(_) => "FIELD_DEFINITION",
        NodeRef::InputValueDefinition(_) => match rest.last().map(|segment| segment.parent) {
            Some(NodeRef::InputObjectTypeDefinition(_)) => "INPUT_FIELD_DEFINITION",
            _ => "ARGUMENT_DEFINITION",
        },
        NodeRef::InterfaceTypeDefinition(_) => "INTERFACE",
        NodeRef::UnionTypeDefinition(_) => "UNION",
        NodeRef::EnumTypeDefinition(_) => "ENUM",
        NodeRef::EnumValueDefinition(_) => "ENUM_VALUE",
        NodeRef::InputObjectTypeDefinition(_) => "INPUT_OBJECT",
        _ => return None,
    };

    Some(location)
}

impl<'a> ValidationVisitor<'a> for KnownDirectives {
    fn enter(
        &self,
        node: NodeRef<'a>,
        path: &[PathSegment<'a>],
        _type_info: &TypeInfo<'a>,
        error_context: &mut ValidationErrorContext<'a>,
    ) {
        let directive = match node {
            NodeRef::Directive(directive) => directive,
            _ => return,
        };

        let directive_name = directive.name().value();

        let message = match error_context.ctx.schema.directive(directive_name) {
            None => format!("Unknown directive \"@{}\".", directive_name),
            Some(directive_definition) => match directive_location(path) {
                Some(current_location)
                    if !directive_definition
                        .locations
                        .iter()
                        .any(|location| location.as_str() == current_location) =>
                {
                    format!(
                        "Directive \"@{}\" may not be used on {}.",
                        directive_name, current_location
                    )
                }
                _ => return,
            },
        };

        error_context.report_error(ValidationError {
            locations: nearest_location(node, path),
            message,
            error_code: self.error_code(),
        });
    }
}

impl ValidationRule for KnownDirectives {
    fn error_code<'a>(&self) -> &'a str {
        "KnownDirectives"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        visit_document_with_rule(self, ctx)
    }
}

#[test]
fn no_directives() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownDirectives {}));
    let errors = test_operation_with_schema(
        "query Foo {
          name
          ...Frag
        }

        fragment Frag on Dog {
          name
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn standard_directives() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownDirectives {}));
    let errors = test_operation_with_schema(
        "{
          human @skip(if: false) {
            name
            pets {
              ... on Dog @include(if: true) {
                name
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
fn unknown_directive() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownDirectives {}));
    let errors = test_operation_with_schema(
        "{
          human @unknown(directive: \"value\") {
            name
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 1);
}

#[test]
fn many_unknown_directives() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownDirectives {}));
    let errors = test_operation_with_schema(
        "{
          __typename @unknown
          human @unknown {
            name
            pets @unknown {
              name
            }
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 3);
}

#[test]
fn well_placed_directives() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownDirectives {}));
    let errors = test_operation_with_schema(
        "
        query ($var: Boolean) @onQuery {
          human @onField {
            ...Frag @onFragmentSpread
            ... @onInlineFragment {
              name @onField
            }
          }
        }

        mutation @onMutation {
          someField @onField
        }

        subscription @onSubscription {
          someField @onField
        }

        fragment Frag on Human @onFragmentDefinition {
          name @onField
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn misplaced_directives() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownDirectives {}));
    let errors = test_operation_with_schema(
        "  query ($var: Boolean) @onMutation {
      human @onQuery {
        ...Frag @onQuery
        ... @onQuery {
          name @onQuery
        }
      }
    }

    mutation @onQuery {
      someField @onQuery
    }

    subscription @onQuery {
      someField @onQuery
    }

    fragment Frag on Human @onQuery {
      name @onQuery
    }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 11);
}

#[test]
fn misplaced_directive_messages() {
    use crate::error::SourceLocation;
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownDirectives {}));
    let errors = test_operation_with_schema(
        "query Foo @onField {
          dog @onQuery
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec![
            "Directive \"@onField\" may not be used on QUERY.",
            "Directive \"@onQuery\" may not be used on FIELD.",
        ]
    );
    assert_eq!(
        errors[1].locations,
        vec![SourceLocation { line: 2, column: 15 }]
    );
}

#[test]
fn directives_within_type_system_definitions() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownDirectives {}));
    let errors = test_mixed_document_with_schema(
        "{ dog { name } }",
        "type Cow @onField {
          name(loud: Boolean @deprecated): String @deprecated
        }

        enum Moo {
          LOW @deprecated(reason: \"quiet\")
          HIGH @onQuery
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec![
            "Directive \"@onField\" may not be used on OBJECT.",
            "Directive \"@deprecated\" may not be used on ARGUMENT_DEFINITION.",
            "Directive \"@onQuery\" may not be used on ENUM_VALUE.",
        ]
    );
}
