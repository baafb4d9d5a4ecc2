use std::collections::HashSet;

use super::ValidationRule;
use crate::ast::{Selection, SelectionSet};
use crate::validation::utils::{location_of, ValidationContext, ValidationError};

/// No unused fragments
///
/// A GraphQL document is only valid if all fragment definitions are spread
/// within operations, or spread within other fragments spread within operations.
///
/// See https://spec.graphql.org/draft/#sec-Fragments-Must-Be-Used
pub struct NoUnusedFragments;

fn collect_spreads<'a>(selection_set: &'a SelectionSet, spreads: &mut Vec<&'a str>) {
    for selection in selection_set.selections() {
        match selection {
            Selection::Field(field) => {
                if let Some(selection_set) = field.selection_set() {
                    collect_spreads(selection_set, spreads);
                }
            }
            Selection::FragmentSpread(spread) => spreads.push(spread.name().value()),
            Selection::InlineFragment(fragment) => {
                collect_spreads(fragment.selection_set(), spreads)
            }
        }
    }
}

impl NoUnusedFragments {
    /// Names of the fragments reachable from any operation, following spreads transitively.
    fn used_fragments<'a>(ctx: &'a ValidationContext<'a>) -> HashSet<&'a str> {
        let mut pending = Vec::new();

        for operation in ctx.document.operations() {
            collect_spreads(operation.selection_set(), &mut pending);
        }

        let mut used = HashSet::new();

        while let Some(fragment_name) = pending.pop() {
            if !used.insert(fragment_name) {
                continue;
            }

            if let Some(fragment) = ctx.fragments.get(fragment_name) {
                collect_spreads(fragment.selection_set(), &mut pending);
            }
        }

        used
    }
}

impl ValidationRule for NoUnusedFragments {
    fn error_code<'a>(&self) -> &'a str {
        "NoUnusedFragments"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        let used = Self::used_fragments(ctx);

        ctx.document
            .fragments()
            .filter(|fragment| !used.contains(fragment.name().value()))
            .map(|fragment| ValidationError {
                locations: location_of(fragment),
                message: format!("Fragment \"{}\" is never used.", fragment.name().value()),
                error_code: self.error_code(),
            })
            .collect()
    }
}

#[test]
fn all_fragment_names_are_used() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(NoUnusedFragments {}));
    let errors = test_operation_without_schema(
        "{
          human(id: 4) {
            ...HumanFields1
            ... on Human {
              ...HumanFields2
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
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn all_fragment_names_are_used_by_multiple_operations() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(NoUnusedFragments {}));
    let errors = test_operation_without_schema(
        "query Foo {
          human(id: 4) {
            ...HumanFields1
          }
        }
        query Bar {
          human(id: 4) {
            ...HumanFields2
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
        }
  ",
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn contains_unknown_fragments() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(NoUnusedFragments {}));
    let errors = test_operation_without_schema(
        "query Foo {
          human(id: 4) {
            ...HumanFields1
          }
        }
        query Bar {
          human(id: 4) {
            ...HumanFields2
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
        }
        fragment Unused1 on Human {
          name
        }
        fragment Unused2 on Human {
          name
        }
  ",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 2);
}

#[test]
fn contains_unknown_fragments_with_ref_cycle() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(NoUnusedFragments {}));
    let errors = test_operation_without_schema(
        "query Foo {
          human(id: 4) {
            ...HumanFields1
          }
        }
        query Bar {
          human(id: 4) {
            ...HumanFields2
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
        }
        fragment Unused1 on Human {
          name
          ...Unused2
        }
        fragment Unused2 on Human {
          name
          ...Unused1
        }
  ",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages,
        vec![
            "Fragment \"Unused1\" is never used.",
            "Fragment \"Unused2\" is never used."
        ]
    );
}

#[test]
fn contains_unknown_and_undef_fragments() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(NoUnusedFragments {}));
    let errors = test_operation_without_schema(
        "query Foo {
          human(id: 4) {
            ...bar
          }
        }
        fragment foo on Human {
          name
        }
  ",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages, vec!["Fragment \"foo\" is never used.",]);
}

#[test]
fn reports_at_fragment_definition() {
    use crate::error::SourceLocation;
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(NoUnusedFragments {}));
    let errors = test_operation_without_schema(
        "{ dummy }
        fragment Unused on Query { dummy }",
        &plan,
    );

    assert_eq!(
        errors[0].locations,
        vec![SourceLocation { line: 2, column: 9 }]
    );
}
