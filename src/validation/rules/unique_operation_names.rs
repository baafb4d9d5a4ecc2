use std::collections::HashMap;

use super::ValidationRule;
use crate::error::SourceLocation;
use crate::validation::utils::{location_of, ValidationContext, ValidationError};

/// Unique operation names
///
/// A GraphQL document is only valid if all defined operations have unique names.
///
/// See https://spec.graphql.org/draft/#sec-Operation-Name-Uniqueness
pub struct UniqueOperationNames;

impl ValidationRule for UniqueOperationNames {
    fn error_code<'a>(&self) -> &'a str {
        "UniqueOperationNames"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        let mut known_operation_names: HashMap<&str, Vec<SourceLocation>> = HashMap::new();
        let mut errors = vec![];

        for operation in ctx.document.operations() {
            let Some(name) = operation.name() else {
                continue;
            };

            match known_operation_names.get(name.value()) {
                Some(first_locations) => errors.push(ValidationError {
                    locations: first_locations
                        .iter()
                        .copied()
                        .chain(location_of(operation))
                        .collect(),
                    message: format!(
                        "There can be only one operation named \"{}\".",
                        name.value()
                    ),
                    error_code: self.error_code(),
                }),
                None => {
                    known_operation_names.insert(name.value(), location_of(operation));
                }
            }
        }

        errors
    }
}

#[test]
fn no_operations() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(UniqueOperationNames {}));
    let errors = test_operation_without_schema(
        "fragment fragA on Type {
          field
        }",
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn one_anon_operation() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(UniqueOperationNames {}));
    let errors = test_operation_without_schema(
        "{
          field
        }",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn multiple_operations() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(UniqueOperationNames {}));
    let errors = test_operation_without_schema(
        "query Foo {
          field
        }
        query Bar {
          field
        }",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn multiple_operations_of_different_types() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(UniqueOperationNames {}));
    let errors = test_operation_without_schema(
        "query Foo {
          field
        }
        mutation Bar {
          field
        }
        subscription Baz {
          field
        }",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn fragment_and_operation_named_the_same() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(UniqueOperationNames {}));
    let errors = test_operation_without_schema(
        "query Foo {
          ...Foo
        }
        fragment Foo on Type {
          field
        }",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn multiple_operations_of_same_name() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(UniqueOperationNames {}));
    let errors = test_operation_without_schema(
        "query Foo {
          fieldA
        }
        query Foo {
          fieldB
        }",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec!["There can be only one operation named \"Foo\".",]
    );
    assert_eq!(
        errors[0].locations,
        vec![
            SourceLocation { line: 1, column: 1 },
            SourceLocation { line: 4, column: 9 },
        ]
    );
}

#[test]
fn multiple_ops_of_same_name_of_different_types_mutation() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(UniqueOperationNames {}));
    let errors = test_operation_without_schema(
        "query Foo {
          fieldA
        }
        mutation Foo {
          fieldB
        }",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec!["There can be only one operation named \"Foo\".",]
    );
}

#[test]
fn multiple_ops_of_same_name_of_different_types_subscription() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(UniqueOperationNames {}));
    let errors = test_operation_without_schema(
        "query Foo {
          fieldA
        }
        subscription Foo {
          fieldB
        }",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec!["There can be only one operation named \"Foo\".",]
    );
}
