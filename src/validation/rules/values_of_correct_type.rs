use serde_json::Map;

use super::ValidationRule;
use crate::ast::{print_node, NodeRef, PathSegment, TypeInfo, Value};
use crate::schema::scalars::parse_scalar_literal;
use crate::schema::{
    InputValueHelpers, TypeDefinitionExtension, TypeExtension, BUILTIN_SCALARS,
};
use crate::static_graphql::schema::TypeDefinition;
use crate::validation::utils::{
    nearest_location, visit_document_with_rule, ValidationContext, ValidationError,
    ValidationErrorContext, ValidationVisitor,
};

/// Values of Correct Type
///
/// A GraphQL document is only valid if all value literals are of the type
/// expected at their position.
///
/// See https://spec.graphql.org/draft/#sec-Values-of-Correct-Type
pub struct ValuesOfCorrectType;

fn scalar_literal(node: NodeRef<'_>) -> Option<Value> {
    match node {
        NodeRef::IntValue(value) => Some(Value::Int(value.clone())),
        NodeRef::FloatValue(value) => Some(Value::Float(value.clone())),
        NodeRef::StringValue(value) => Some(Value::String(value.clone())),
        NodeRef::BooleanValue(value) => Some(Value::Boolean(value.clone())),
        NodeRef::EnumValue(value) => Some(Value::Enum(value.clone())),
        _ => None,
    }
}

impl ValuesOfCorrectType {
    fn is_custom_scalar(&self, type_name: &str) -> bool {
        !BUILTIN_SCALARS.contains(&type_name)
    }

    /// Checks a scalar or enum literal against the named input type it is written for.
    fn leaf_value_error(&self, type_def: &TypeDefinition, node: NodeRef<'_>) -> Option<String> {
        let literal = scalar_literal(node)?;

        match type_def {
            TypeDefinition::Scalar(scalar_type_def) => {
                let expected = scalar_type_def.name.as_str();

                match (expected, &literal) {
                    ("Int", Value::Int(_))
                    | ("ID", Value::Int(_))
                    | ("ID", Value::String(_))
                    | ("Float", Value::Int(_))
                    | ("Float", Value::Float(_))
                    | ("Boolean", Value::Boolean(_))
                    | ("String", Value::String(_)) => {
                        parse_scalar_literal(expected, &literal, &Map::new()).err()
                    }
                    _ if self.is_custom_scalar(expected) => None,
                    _ => Some(format!(
                        "Expected value of type \"{}\", found {}.",
                        expected,
                        print_node(node)
                    )),
                }
            }
            TypeDefinition::Enum(enum_type_def) => match &literal {
                Value::Enum(enum_value) => {
                    match type_def.enum_value_by_name(enum_value.value()) {
                        Some(_) => None,
                        None => Some(format!(
                            "Value \"{}\" does not exist in \"{}\" enum.",
                            enum_value.value(),
                            enum_type_def.name
                        )),
                    }
                }
                _ => Some(format!(
                    "Enum \"{}\" cannot represent non-enum value: {}",
                    enum_type_def.name,
                    print_node(node)
                )),
            },
            _ => Some(format!(
                "Expected value of type \"{}\", found {}.",
                type_def.name(),
                print_node(node)
            )),
        }
    }

    fn object_value_errors(&self, type_def: &TypeDefinition, node: NodeRef<'_>) -> Vec<String> {
        let object_value = match node {
            NodeRef::ObjectValue(object_value) => object_value,
            _ => return vec![],
        };

        let input_object_def = match type_def {
            TypeDefinition::InputObject(input_object_def) => input_object_def,
            TypeDefinition::Scalar(scalar) if self.is_custom_scalar(&scalar.name) => return vec![],
            _ => {
                return vec![format!(
                    "Expected value of type \"{}\", found {}.",
                    type_def.name(),
                    print_node(node)
                )]
            }
        };

        let provided = |name: &str| {
            object_value
                .fields()
                .iter()
                .any(|field| field.name().value() == name)
        };

        let missing = input_object_def
            .fields
            .iter()
            .filter(|field| field.is_required() && !provided(&field.name))
            .map(|field| {
                format!(
                    "Field \"{}.{}\" of required type \"{}\" was not provided.",
                    input_object_def.name,
                    field.name,
                    field.value_type.to_type_string()
                )
            });

        let unknown = object_value
            .fields()
            .iter()
            .map(|field| field.name().value())
            .filter(|name| !input_object_def.fields.iter().any(|f| f.name.eq(name)))
            .map(|name| {
                format!(
                    "Field \"{}\" is not defined by type \"{}\".",
                    name, input_object_def.name
                )
            });

        missing.chain(unknown).collect()
    }
}

impl<'a> ValidationVisitor<'a> for ValuesOfCorrectType {
    fn enter(
        &self,
        node: NodeRef<'a>,
        path: &[PathSegment<'a>],
        type_info: &TypeInfo<'a>,
        error_context: &mut ValidationErrorContext<'a>,
    ) {
        let input_type = match type_info.get_input_type() {
            Some(input_type) => input_type,
            None => return,
        };

        let messages = match node {
            NodeRef::NullValue(_) if input_type.is_non_null() => vec![format!(
                "Expected value of type \"{}\", found null",
                input_type.to_type_string()
            )],
            // The input type here is already the item type; the list sits one level up.
            NodeRef::ListValue(_) => match type_info.get_parent_input_type() {
                Some(location_type) if !location_type.nullable().is_list_type() => {
                    match error_context.ctx.schema.named_type(location_type) {
                        Some(TypeDefinition::Scalar(scalar))
                            if self.is_custom_scalar(&scalar.name) =>
                        {
                            return
                        }
                        Some(_) => vec![format!(
                            "Expected value of type \"{}\", found {}.",
                            location_type.to_type_string(),
                            print_node(node)
                        )],
                        None => return,
                    }
                }
                _ => return,
            },
            NodeRef::ObjectValue(_) => match error_context.ctx.schema.named_type(input_type) {
                Some(type_def) => self.object_value_errors(type_def, node),
                None => return,
            },
            _ => match error_context.ctx.schema.named_type(input_type) {
                Some(type_def) => self.leaf_value_error(type_def, node).into_iter().collect(),
                None => return,
            },
        };

        for message in messages {
            error_context.report_error(ValidationError {
                locations: nearest_location(node, path),
                message,
                error_code: self.error_code(),
            });
        }
    }
}

impl ValidationRule for ValuesOfCorrectType {
    fn error_code<'a>(&self) -> &'a str {
        "ValuesOfCorrectType"
    }

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError> {
        visit_document_with_rule(self, ctx)
    }
}

#[test]
fn valid_int_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            intArgField(intArg: 2)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_negative_int_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            intArgField(intArg: -2)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_boolean_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            booleanArgField(booleanArg: true)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_string_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringArgField(stringArg: \"foo\")
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_float_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            floatArgField(floatArg: 1.1)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_negative_float_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            floatArgField(floatArg: -1.1)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_int_into_float_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            floatArgField(floatArg: 1)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_int_into_id_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            idArgField(idArg: 1)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_string_into_id_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            idArgField(idArg: \"someIdString\")
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_enum_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog {
            doesKnowCommand(dogCommand: SIT)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn enum_undefined_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            enumArgField(enumArg: UNKNOWN)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn enum_null_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            enumArgField(enumArg: NO_FUR)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_null_into_nullable() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            intArgField(intArg: null)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);

    let errors = test_operation_with_schema(
        "
        {
          dog(a: null, b: null, c:{ requiredField: true, intField: null }) {
            name
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn invalid_int_into_string() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringArgField(stringArg: 1)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"String\", found 1."]
    );
}

#[test]
fn invalid_float_into_string() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringArgField(stringArg: 1.0)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"String\", found 1.0."]
    );
}

#[test]
fn invalid_bool_into_string() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringArgField(stringArg: true)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"String\", found true."]
    );
}

#[test]
fn unquoted_string_to_string() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringArgField(stringArg: BAR)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"String\", found BAR."]
    );
}

#[test]
fn invalid_string_into_int() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            intArgField(intArg: \"3\")
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Int\", found \"3\"."]
    );
}

#[test]
fn unquoted_string_into_int() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            intArgField(intArg: FOO)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages, vec!["Expected value of type \"Int\", found FOO."]);
}

#[test]
fn simple_float_into_int() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            intArgField(intArg: 3.0)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages, vec!["Expected value of type \"Int\", found 3.0."]);
}

#[test]
fn float_into_int() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            intArgField(intArg: 3.333)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Int\", found 3.333."]
    );
}

#[test]
fn string_into_float() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            floatArgField(floatArg: \"3.333\")
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Float\", found \"3.333\"."]
    );
}

#[test]
fn boolean_into_float() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            floatArgField(floatArg: true)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Float\", found true."]
    );
}

#[test]
fn unquoted_into_float() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            floatArgField(floatArg: FOO)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Float\", found FOO."]
    );
}

#[test]
fn int_into_boolean() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            booleanArgField(booleanArg: 2)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Boolean\", found 2."]
    );
}

#[test]
fn float_into_boolean() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            booleanArgField(booleanArg: 2.0)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Boolean\", found 2.0."]
    );
}

#[test]
fn string_into_boolean() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            booleanArgField(booleanArg: \"true\")
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Boolean\", found \"true\"."]
    );
}

#[test]
fn unquoted_into_boolean() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            booleanArgField(booleanArg: TRUE)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Boolean\", found TRUE."]
    );
}

#[test]
fn float_into_id() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            idArgField(idArg: 1.0)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages, vec!["Expected value of type \"ID\", found 1.0."]);
}

#[test]
fn bool_into_id() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            idArgField(idArg: true)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages, vec!["Expected value of type \"ID\", found true."]);
}

#[test]
fn unquoted_into_id() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            idArgField(idArg: SOMETHING)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"ID\", found SOMETHING."]
    );
}

#[test]
fn int_into_enum() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog {
            doesKnowCommand(dogCommand: 2)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Enum \"DogCommand\" cannot represent non-enum value: 2"]
    );
}

#[test]
fn float_into_enum() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog {
            doesKnowCommand(dogCommand: 1.0)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Enum \"DogCommand\" cannot represent non-enum value: 1.0"]
    );
}

#[test]
fn string_into_enum() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog {
            doesKnowCommand(dogCommand: \"SIT\")
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Enum \"DogCommand\" cannot represent non-enum value: \"SIT\""]
    );
}

#[test]
fn boolean_into_enum() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog {
            doesKnowCommand(dogCommand: true)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Enum \"DogCommand\" cannot represent non-enum value: true"]
    );
}

#[test]
fn unknown_enum_value_into_enum() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog {
            doesKnowCommand(dogCommand: JUGGLE)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Value \"JUGGLE\" does not exist in \"DogCommand\" enum."]
    );
}

#[test]
fn different_case_enum_value_into_enum() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog {
            doesKnowCommand(dogCommand: sit)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Value \"sit\" does not exist in \"DogCommand\" enum."]
    );
}

#[test]
fn valid_list_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringListArgField(stringListArg: [\"one\", null, \"two\"])
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_empty_list_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringListArgField(stringListArg: [])
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_null_list_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringListArgField(stringListArg: null)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn valid_single_value_into_list_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringListArgField(stringListArg: \"one\")
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn incorrect_item_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringListArgField(stringListArg: [\"one\", 2])
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"String\", found 2."]
    );
}

#[test]
fn single_value_of_incorrect_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringListArgField(stringListArg: 1)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"String\", found 1."]
    );
}

#[test]
fn arg_on_optional_arg() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog {
            isHouseTrained(atOtherHomes: true)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn no_arg_on_optional_arg() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog {
            isHouseTrained
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn multiple_valid_args() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleReqs(req1: 1, req2: 2)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn multiple_valid_args_reverse_oreder() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleReqs(req2: 2, req1: 1)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn no_args_multiple_optional() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleOpts
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn one_arg_multiple_optinals() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleOpts(opt1: 1)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn second_arg_multiple_optinals() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleOpts(opt2: 1)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn multiple_required_args_on_mixed_list() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleOptAndReq(req1: 3, req2: 4)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn multiple_required_args_and_one_optional_on_mixed_list() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleOptAndReq(req1: 3, req2: 4, opt1: 5)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn all_required_and_one_optional() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleOptAndReq(req1: 3, req2: 4, opt1: 5, opt2: 6)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn incorrect_value_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleReqs(req2: \"two\", req1: \"one\")
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
            "Expected value of type \"Int\", found \"two\".",
            "Expected value of type \"Int\", found \"one\"."
        ]
    )
}

#[test]
fn incorrect_value_and_missing_argument() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleReqs(req1: \"one\")
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Int\", found \"one\"."]
    );
}

#[test]
fn null_value() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            multipleReqs(req1: null)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Int!\", found null"]
    );
}

#[test]
fn optional_arg_despite_required_field_in_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn partial_object_only_required() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField(complexArg: { requiredField: true })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn partial_object_required_field_can_be_falsy() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField(complexArg: { requiredField: false })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn partial_object_including_required() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField(complexArg: { requiredField: true, intField: 4 })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn full_object() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField(complexArg: {
              requiredField: true,
              intField: 4,
              stringField: \"foo\",
              booleanField: false,
              stringListField: [\"one\", \"two\"]
            })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn full_object_with_fields_in_different_order() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField(complexArg: {
              stringListField: [\"one\", \"two\"],
              booleanField: false,
              requiredField: true,
              stringField: \"foo\",
              intField: 4,
            })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn partial_object_missing_required() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField(complexArg: { intField: 4 })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec![
            "Field \"ComplexInput.requiredField\" of required type \"Boolean!\" was not provided."
        ]
    )
}

#[test]
fn partial_object_invalid_field_type() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField(complexArg: {
              stringListField: [\"one\", 2],
              requiredField: true,
            })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"String\", found 2."]
    )
}

#[test]
fn partial_object_null_to_non_null_field() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField(complexArg: {
              requiredField: true,
              nonNullField: null,
            })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"Boolean!\", found null"]
    )
}

#[test]
fn partial_object_unknown_field_arg() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            complexArgField(complexArg: {
              requiredField: true,
              invalidField: \"value\"
            })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Field \"invalidField\" is not defined by type \"ComplexInput\"."]
    )
}

#[test]
fn allows_custom_scalar_to_accept_complex_literals() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          test1: anyArg(arg: 123)
          test2: anyArg(arg: \"abc\")
          test3: anyArg(arg: [123, \"abc\"])
          test4: anyArg(arg: {deep: [123, \"abc\"]})
        }",
        "
        scalar Any

        type Query {
          anyArg(arg: Any): String
        }
        ",
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn with_directives_of_valid_types() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog @include(if: true) {
            name
          }
          human @skip(if: false) {
            name
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn with_directives_of_invalid_types() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          dog @include(if: \"yes\") {
            name @skip(if: ENUM)
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
            "Expected value of type \"Boolean\", found \"yes\".",
            "Expected value of type \"Boolean\", found ENUM."
        ]
    )
}

#[test]
fn variables_with_valid_default_values() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        query WithDefaultValues(
          $a: Int = 1,
          $b: String = \"ok\",
          $c: ComplexInput = { requiredField: true, intField: 3 }
          $d: Int! = 123
        ) {
          dog { name }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn variables_with_valid_default_null_values() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        query WithDefaultValues(
          $a: Int = null,
          $b: String = null,
          $c: ComplexInput = { requiredField: true, intField: null }
        ) {
          dog { name }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 0);
}

#[test]
fn variables_with_invalid_default_null_values() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        query WithDefaultValues(
          $a: Int! = null,
          $b: String! = null,
          $c: ComplexInput = { requiredField: null, intField: null }
        ) {
          dog { name }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages,
        vec![
            "Expected value of type \"Int!\", found null",
            "Expected value of type \"String!\", found null",
            "Expected value of type \"Boolean!\", found null"
        ]
    );
}

#[test]
fn variables_with_invalid_default_values() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        query InvalidDefaultValues(
          $a: Int = \"one\",
          $b: String = 4,
          $c: ComplexInput = \"NotVeryComplex\"
        ) {
          dog { name }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages,
        vec![
            "Expected value of type \"Int\", found \"one\".",
            "Expected value of type \"String\", found 4.",
            "Expected value of type \"ComplexInput\", found \"NotVeryComplex\"."
        ]
    );
}

#[test]
fn variables_with_complex_invalid_default_values() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        query WithDefaultValues(
          $a: ComplexInput = { requiredField: 123, intField: \"abc\" }
        ) {
          dog { name }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages,
        vec![
            "Expected value of type \"Int\", found \"abc\".",
            "Expected value of type \"Boolean\", found 123.",
        ]
    );
}

#[test]
fn complex_variables_missing_required_field() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        query MissingRequiredField($a: ComplexInput = {intField: 3}) {
          dog { name }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec![
            "Field \"ComplexInput.requiredField\" of required type \"Boolean!\" was not provided.",
        ]
    );
}

#[test]
fn list_variables_with_invalid_item() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        query InvalidItem($a: [String] = [\"one\", 2]) {
          dog { name }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages,
        vec!["Expected value of type \"String\", found 2."]
    );
}

#[test]
fn int_outside_32_bit_range() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            intArgField(intArg: 3000000000)
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec!["Int cannot represent non 32-bit signed integer value: 3000000000"]
    );
}

#[test]
fn object_into_builtin_scalar() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            intArgField(intArg: { value: 1 })
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    assert_eq!(
        get_messages(&errors),
        vec!["Expected value of type \"Int\", found {value: 1}."]
    );
    assert_eq!(
        errors[0].locations,
        vec![crate::error::SourceLocation { line: 4, column: 13 }]
    );
}

#[test]
fn list_into_non_list_position() {
    use crate::validation::test_utils::*;

    let plan = create_plan_from_rule(Box::new(ValuesOfCorrectType {}));
    let errors = test_operation_with_schema(
        "
        {
          complicatedArgs {
            stringArgField(stringArg: [\"one\"])
            stringListArgField(stringListArg: [[\"two\"]])
            ok: stringListArgField(stringListArg: [\"three\"])
          }
        }",
        TEST_SCHEMA,
        &plan,
    );

    let messages = get_messages(&errors);
    assert_eq!(
        messages,
        vec![
            "Expected value of type \"String\", found [\"one\"].",
            "Expected value of type \"String\", found [\"two\"].",
        ]
    );
}
