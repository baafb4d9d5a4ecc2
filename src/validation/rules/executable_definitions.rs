use super::ValidationRule;
use crate::ast::Definition;
use crate::validation::utils::{location_of, ValidationContext, ValidationError};

/// Executable definitions
///
/// A GraphQL document is only valid for execution if all definitions are either
/// operation or fragment definitions.
///
/// See https://spec.graphql.org/draft/#sec-Executable-Definitions
pub struct ExecutableDefinitions;

fn definition_name(definition: &Definition) -> String {
    let name = match definition {
        Definition::Schema(_) => None,
        Definition::Operation(operation) => operation.name(),
        Definition::Fragment(fragment) => Some(fragment.name()),
        Definition::Scalar(scalar) => Some(scalar.name()),
        Definition::Object(object) => Some(object.name()),
        Definition::Interface(interface) => Some(interface.name()),
        Definition::Union(union) => Some(union.name()),
        Definition::Enum(enum_type) => Some(enum_type.name()),
        Definition::InputObject(input_object) => Some(input_object.name()),
        Definition::Directive(directive) => Some(directive.name()),
    };

    match name {
        Some(name) => format!("\"{}\"", name.value()),
        None => "schema".to_string(),
    }
}

impl ValidationRule for ExecutableDefinitions {
    fn error_code<'a>(&self) -> &'a str {
        "ExecutableDefinitions"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        ctx.document
            .definitions()
            .iter()
            .filter(|definition| !definition.is_executable())
            .map(|definition| ValidationError {
                locations: location_of(definition),
                message: format!(
                    "The {} definition is not executable.",
                    definition_name(definition)
                ),
                error_code: self.error_code(),
            })
            .collect()
    }
}

#[test]
fn only_operation() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ExecutableDefinitions {}));
    let errors = test_operation_with_schema(
        "query Foo {
          dog {
            name
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn with_operation_and_fragment() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ExecutableDefinitions {}));
    let errors = test_operation_with_schema(
        "query Foo {
          dog {
            name
            ...Frag
          }
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
fn with_type_definition() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ExecutableDefinitions {}));
    let errors = test_mixed_document_with_schema(
        "query Foo {
          dog {
            name
          }
        }",
        "type Cow {
          name: String
        }

        input Hat {
          size: Int
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec![
            "The \"Cow\" definition is not executable.",
            "The \"Hat\" definition is not executable.",
        ]
    );
    assert_eq!(errors[0].locations.len(), 1);
}

#[test]
fn with_schema_definition() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ExecutableDefinitions {}));
    let errors = test_mixed_document_with_schema(
        "{ dog { name } }",
        "schema {
          query: QueryRoot
        }

        directive @tag on FIELD",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec![
            "The schema definition is not executable.",
            "The \"tag\" definition is not executable.",
        ]
    );
}
