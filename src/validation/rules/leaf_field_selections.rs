use super::ValidationRule;
use crate::ast::{NodeRef, PathSegment, TypeInfo};
use crate::schema::{TypeDefinitionExtension, TypeExtension};
use crate::validation::utils::{
    nearest_location, visit_document_with_rule, ValidationContext, ValidationError,
    ValidationErrorContext, ValidationVisitor,
};

/// Leaf Field Selections
///
/// A GraphQL document is valid only if all leaf fields (fields without
/// sub selections) are of scalar or enum types.
///
/// See https://spec.graphql.org/draft/#sec-Leaf-Field-Selections
pub struct LeafFieldSelections;

impl<'a> ValidationVisitor<'a> for LeafFieldSelections {
    fn enter(
        &self,
        node: NodeRef<'a>,
        path: &[PathSegment<'a>],
        type_info: &TypeInfo<'a>,
        error_context: &mut ValidationErrorContext<'a>,
    ) {
        let field = match node {
            NodeRef::Field(field) => field,
            _ => return,
        };

        let field_type = match type_info.get_type() {
            Some(field_type) => field_type,
            None => return,
        };

        let named_type = match error_context.ctx.schema.named_type(field_type) {
            Some(named_type) => named_type,
            None => return,
        };

        let field_name = field.name().value();

        let message = match (named_type.is_leaf_type(), field.selection_set()) {
            (true, Some(_)) => format!(
                "Field \"{}\" must not have a selection since type \"{}\" has no subfields.",
                field_name,
                field_type.to_type_string()
            ),
            (false, None) => format!(
                "Field \"{}\" of type \"{}\" must have a selection of subfields. Did you mean \"{} {{ ... }}\"?",
                field_name,
                field_type.to_type_string(),
                field_name
            ),
            _ => return,
        };

        error_context.report_error(ValidationError {
            locations: nearest_location(node, path),
            message,
            error_code: self.error_code(),
        });
    }
}

impl ValidationRule for LeafFieldSelections {
    fn error_code<'a>(&self) -> &'a str {
        "LeafFieldSelections"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        visit_document_with_rule(self, ctx)
    }
}

#[test]
fn valid_scalar_selection() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(LeafFieldSelections {}));
    let errors = test_operation_with_schema(
        "fragment scalarSelection on Dog {
          barks
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn object_type_missing_selection() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(LeafFieldSelections {}));
    let errors = test_operation_with_schema(
        "query directQueryOnObjectWithoutSubFields {
          human
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec!["Field \"human\" of type \"Human\" must have a selection of subfields. Did you mean \"human { ... }\"?"]
    );
    assert_eq!(
        errors[0].locations,
        vec![crate::error::SourceLocation { line: 2, column: 11 }]
    );
}

#[test]
fn interface_type_missing_selection() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(LeafFieldSelections {}));
    let errors = test_operation_with_schema(
        "{
          human { pets }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec!["Field \"pets\" of type \"[Pet]\" must have a selection of subfields. Did you mean \"pets { ... }\"?"]
    );
}

#[test]
fn valid_scalar_selection_with_args() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(LeafFieldSelections {}));
    let errors = test_operation_with_schema(
        "fragment scalarSelectionWithArgs on Dog {
          doesKnowCommand(dogCommand: SIT)
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(get_messages(&errors).len(), 0);
}

#[test]
fn scalar_selection_not_allowed_on_boolean() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(LeafFieldSelections {}));
    let errors = test_operation_with_schema(
        "fragment scalarSelectionsNotAllowedOnBoolean on Dog {
          barks { sinceWhen }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec!["Field \"barks\" must not have a selection since type \"Boolean\" has no subfields."]
    );
}

#[test]
fn scalar_selection_not_allowed_on_enum() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(LeafFieldSelections {}));
    let errors = test_operation_with_schema(
        "fragment scalarSelectionsNotAllowedOnEnum on Cat {
          furColor { inHexDec }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec!["Field \"furColor\" must not have a selection since type \"FurColor\" has no subfields."]
    );
}

#[test]
fn scalar_selection_not_allowed_with_args_and_directives() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(LeafFieldSelections {}));
    let errors = test_operation_with_schema(
        "fragment scalarSelectionsNotAllowedWithDirectivesAndArgs on Dog {
          doesKnowCommand(dogCommand: SIT) @include(if: true) { sinceWhen }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec!["Field \"doesKnowCommand\" must not have a selection since type \"Boolean\" has no subfields."]
    );
}

#[test]
fn typename_is_a_leaf() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(LeafFieldSelections {}));
    let errors = test_operation_with_schema(
        "{ catOrDog { __typename { name } } }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec!["Field \"__typename\" must not have a selection since type \"String!\" has no subfields."]
    );
}
