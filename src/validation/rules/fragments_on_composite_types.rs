use super::ValidationRule;
use crate::ast::{NodeRef, PathSegment, TypeInfo};
use crate::schema::TypeDefinitionExtension;
use crate::validation::utils::{
    nearest_location, visit_document_with_rule, ValidationContext, ValidationError,
    ValidationErrorContext, ValidationVisitor,
};

/// Fragments on composite type
///
/// Fragments use a type condition to determine if they apply, since fragments
/// can only be spread into a composite type (object, interface, or union), the
/// type condition must also be a composite type.
///
/// See https://spec.graphql.org/draft/#sec-Fragments-On-Composite-Types
pub struct FragmentsOnCompositeTypes;

impl<'a> ValidationVisitor<'a> for FragmentsOnCompositeTypes {
    fn enter(
        &self,
        node: NodeRef<'a>,
        path: &[PathSegment<'a>],
        _type_info: &TypeInfo<'a>,
        error_context: &mut ValidationErrorContext<'a>,
    ) {
        let (fragment_name, type_condition) = match node {
            NodeRef::InlineFragment(fragment) => match fragment.type_condition() {
                Some(type_condition) => (None, type_condition),
                None => return,
            },
            NodeRef::FragmentDefinition(fragment) => {
                (Some(fragment.name().value()), fragment.type_condition())
            }
            _ => return,
        };

        let type_name = type_condition.name().value();
        let is_composite = error_context
            .ctx
            .schema
            .type_by_name(type_name)
            .map(|type_definition| type_definition.is_composite_type());

        if is_composite == Some(false) {
            let message = match fragment_name {
                Some(fragment_name) => format!(
                    "Fragment \"{}\" cannot condition on non composite type \"{}\".",
                    fragment_name, type_name
                ),
                None => format!(
                    "Fragment cannot condition on non composite type \"{}\".",
                    type_name
                ),
            };

            error_context.report_error(ValidationError {
                locations: nearest_location(node, path),
                message,
                error_code: self.error_code(),
            });
        }
    }
}

impl ValidationRule for FragmentsOnCompositeTypes {
    fn error_code<'a>(&self) -> &'a str {
        "FragmentsOnCompositeTypes"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        visit_document_with_rule(self, ctx)
    }
}

#[test]
fn object_is_valid_fragment_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment validFragment on Dog {
          barks
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn interface_is_valid_fragment_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment validFragment on Pet {
          name
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn object_is_valid_inline_fragment_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment validFragment on Pet {
          ... on Dog {
            barks
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn interface_is_valid_inline_fragment_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment validFragment on Mammal {
          ... on Canine {
            name
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn inline_fragment_without_type_is_valid() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment validFragment on Pet {
          ... {
            name
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn union_is_valid_fragment_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment validFragment on CatOrDog {
          __typename
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn scalar_is_invalid_fragment_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment scalarFragment on Boolean {
          bad
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec!["Fragment \"scalarFragment\" cannot condition on non composite type \"Boolean\"."]
    );
}

#[test]
fn enum_is_invalid_fragment_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment scalarFragment on FurColor {
          bad
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec!["Fragment \"scalarFragment\" cannot condition on non composite type \"FurColor\"."]
    );
}

#[test]
fn input_object_is_invalid_fragment_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment inputFragment on ComplexInput {
          stringField
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec!["Fragment \"inputFragment\" cannot condition on non composite type \"ComplexInput\"."]
    );
}

#[test]
fn scalar_is_invalid_inline_fragment_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(FragmentsOnCompositeTypes {}));
    let errors = test_operation_with_schema(
        "fragment invalidFragment on Pet {
          ... on String {
            barks
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec!["Fragment cannot condition on non composite type \"String\"."]
    );
    assert_eq!(
        errors[0].locations,
        vec![crate::error::SourceLocation { line: 2, column: 11 }]
    );
}
