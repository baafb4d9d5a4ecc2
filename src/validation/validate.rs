use tracing::debug;

use super::{
    rules::ValidationRule,
    utils::{ValidationContext, ValidationError},
};

use crate::{ast::Document, schema::Schema};

pub struct ValidationPlan {
    pub rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for ValidationPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationPlan {
    pub fn new() -> Self {
        Self { rules: vec![] }
    }

    pub fn from(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }
}

/// Runs every rule of the plan over `operation`, in plan order.
pub fn validate(
    schema: &Schema,
    operation: &Document,
    validation_plan: &ValidationPlan,
) -> Vec<ValidationError> {
    let validation_context = ValidationContext::new(schema, operation);

    let validation_errors = validation_plan
        .rules
        .iter()
        .flat_map(|rule| rule.validate(&validation_context))
        .collect::<Vec<_>>();

    debug!(
        rules = validation_plan.rules.len(),
        errors = validation_errors.len(),
        "document validated"
    );

    validation_errors
}

#[test]
fn test_validate_valid_query() {
    use crate::validation::test_utils::*;

    let default_plan = create_default_ruleset_plan();
    let errors = test_operation_without_schema(
        "
    query test {
      dummy
    }
    ",
        &default_plan,
    );

    assert_eq!(errors.len(), 0);
}

#[test]
fn test_validate_valid_fragment() {
    use crate::validation::test_utils::*;

    let default_plan = create_default_ruleset_plan();
    let errors = test_operation_with_schema(
        "
        query {
          dog {
            ...uniqueFields
          }
        }

        fragment uniqueFields on Dog {
          name
          nickname
        }
    ",
        TEST_SCHEMA,
        &default_plan,
    );

    assert_eq!(errors.len(), 0);
}

#[test]
fn test_validate_reports_rules_in_plan_order() {
    use crate::validation::test_utils::*;

    let default_plan = create_default_ruleset_plan();
    let errors = test_operation_with_schema(
        "
        query {
          dog {
            name(surname: true) @unknown
            meows
          }
        }

        fragment unused on Dog {
          name
        }
    ",
        TEST_SCHEMA,
        &default_plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec![
            "Cannot query field \"meows\" on type \"Dog\".",
            "Fragment \"unused\" is never used.",
            "Unknown directive \"@unknown\".",
        ]
    );
    assert_eq!(
        errors
            .iter()
            .map(|error| error.error_code)
            .collect::<Vec<_>>(),
        vec!["FieldsOnCorrectType", "NoUnusedFragments", "KnownDirectives"]
    );
}

#[test]
fn test_validation_errors_convert_to_graphql_errors() {
    use crate::error::GraphQLError;
    use crate::validation::test_utils::*;
    use serde_json::json;

    let default_plan = create_default_ruleset_plan();
    let errors = test_operation_with_schema("{ dog { meows } }", TEST_SCHEMA, &default_plan);
    let error: GraphQLError = errors[0].clone().into();

    assert_eq!(
        serde_json::to_value(&error).unwrap(),
        json!({
            "message": "Cannot query field \"meows\" on type \"Dog\".",
            "locations": [{ "line": 1, "column": 9 }],
            "extensions": { "code": "FieldsOnCorrectType" },
        })
    );
}
