use super::ValidationRule;
use crate::ast::{NodeRef, PathSegment, TypeInfo};
use crate::validation::utils::{
    nearest_location, visit_document_with_rule, ValidationContext, ValidationError,
    ValidationErrorContext, ValidationVisitor,
};

/// Known fragment names
///
/// A GraphQL document is only valid if all `...Fragment` fragment spreads refer
/// to fragments defined in the same document.
///
/// See https://spec.graphql.org/draft/#sec-Fragment-spread-target-defined
pub struct KnownFragmentNames;

impl<'a> ValidationVisitor<'a> for KnownFragmentNames {
    fn enter(
        &self,
        node: NodeRef<'a>,
        path: &[PathSegment<'a>],
        _type_info: &TypeInfo<'a>,
        error_context: &mut ValidationErrorContext<'a>,
    ) {
        if let NodeRef::FragmentSpread(fragment_spread) = node {
            let fragment_name = fragment_spread.name().value();

            if !error_context.ctx.fragments.contains_key(fragment_name) {
                error_context.report_error(ValidationError {
                    locations: nearest_location(node, path),
                    message: format!("Unknown fragment \"{}\".", fragment_name),
                    error_code: self.error_code(),
                });
            }
        }
    }
}

impl ValidationRule for KnownFragmentNames {
    fn error_code<'a>(&self) -> &'a str {
        "KnownFragmentNames"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        visit_document_with_rule(self, ctx)
    }
}

#[test]
fn valid_fragment() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownFragmentNames {}));
    let errors = test_operation_with_schema(
        "{
          human(id: 4) {
            ...HumanFields1
            ... on Human {
              ...HumanFields2
            }
            ... {
              name
            }
          }
        }
        fragment HumanFields1 on Human {
          name
          ...HumanFields3
        }
        fragment HumanFields2 on Human {
          name
        }
        fragment HumanFields3 on Human {
          name
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn invalid_fragment() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(KnownFragmentNames {}));
    let errors = test_operation_with_schema(
        "{
          human(id: 4) {
            ...UnknownFragment1
            ... on Human {
              ...UnknownFragment2
            }
          }
        }
        fragment HumanFields on Human {
          name
          ...UnknownFragment3
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages,
        vec![
            "Unknown fragment \"UnknownFragment1\".",
            "Unknown fragment \"UnknownFragment2\".",
            "Unknown fragment \"UnknownFragment3\".",
        ]
    );
}
