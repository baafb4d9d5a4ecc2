use super::ValidationRule;
use crate::ast::{NodeRef, PathSegment, TypeInfo};
use crate::validation::utils::{
    nearest_location, visit_document_with_rule, ValidationContext, ValidationError,
    ValidationErrorContext, ValidationVisitor,
};

/// Known type names
///
/// A GraphQL document is only valid if referenced types (specifically
/// variable definitions and fragment conditions) are defined by the type schema.
///
/// See https://spec.graphql.org/draft/#sec-Fragment-Spread-Type-Existence
pub struct KnownTypeNames;

fn in_type_system_definition(path: &[PathSegment<'_>]) -> bool {
    path.iter().any(|segment| {
        matches!(
            segment.parent,
            NodeRef::SchemaDefinition(_)
                | NodeRef::ScalarTypeDefinition(_)
                | NodeRef::ObjectTypeDefinition(_)
                | NodeRef::InterfaceTypeDefinition(_)
                | NodeRef::UnionTypeDefinition(_)
                | NodeRef::EnumTypeDefinition(_)
                | NodeRef::InputObjectTypeDefinition(_)
                | NodeRef::DirectiveDefinition(_)
        )
    })
}

impl<'a> ValidationVisitor<'a> for KnownTypeNames {
    fn enter(
        &self,
        node: NodeRef<'a>,
        path: &[PathSegment<'a>],
        _type_info: &TypeInfo<'a>,
        error_context: &mut ValidationErrorContext<'a>,
    ) {
        if let NodeRef::NamedType(named_type) = node {
            let type_name = named_type.name().value();

            if error_context.ctx.schema.type_by_name(type_name).is_none()
                && !in_type_system_definition(path)
            {
                error_context.report_error(ValidationError {
                    locations: nearest_location(node, path),
                    message: format!("Unknown type \"{}\".", type_name),
                    error_code: self.error_code(),
                });
            }
        }
    }
}

impl ValidationRule for KnownTypeNames {
    fn error_code<'a>(&self) -> &'a str {
        "KnownTypeNames"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        visit_document_with_rule(self, ctx)
    }
}

#[test]
fn known_type_names_are_valid() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownTypeNames {}));
    let errors = test_operation_with_schema(
        "
        query Foo(
          $var: String
          $required: [Int!]!
        ) {
          user(id: 4) {
            pets { ... on Pet { name }, ...PetFields, ... { name } }
          }
        }
        fragment PetFields on Pet {
          name
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn unknown_type_names_are_invalid() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownTypeNames {}));
    let errors = test_operation_with_schema(
        "query Foo($var: [JumbledUpLetters!]!) {
          user(id: 4) {
            name
            pets { ... on Badger { name }, ...PetFields }
          }
        }

        fragment PetFields on Peat {
          name
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec![
            "Unknown type \"JumbledUpLetters\".",
            "Unknown type \"Badger\".",
            "Unknown type \"Peat\"."
        ]
    );
    assert_eq!(
        errors[0].locations,
        vec![crate::error::SourceLocation { line: 1, column: 11 }]
    );
}

#[test]
fn ignores_type_system_definitions() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownTypeNames {}));
    let errors = test_mixed_document_with_schema(
        "{ dog { name } }",
        "type Cow { friend: Unknown }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}
