//! Coercion of variable values, argument literals and input values to their declared types.

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::ast::{self, print, Argument, OperationDefinition, Value};
use crate::error::{CoercionError, PathElement};
use crate::schema::scalars::{coerce_scalar_input, parse_scalar_literal};
use crate::schema::{type_from_ast, Schema, TypeExtension, ValueExtension};
use crate::static_graphql::schema::{self, InputValue, TypeDefinition};
use crate::validation::utils::location_of;

/// A value that failed input coercion, `path` leads from the coerced root to it.
#[derive(Debug, Clone, PartialEq)]
pub struct InputError {
    pub path: Vec<PathElement>,
    pub value: JsonValue,
    pub message: String,
}

impl InputError {
    fn new(value: &JsonValue, message: impl Into<String>) -> Self {
        InputError {
            path: vec![],
            value: value.clone(),
            message: message.into(),
        }
    }

    fn prefixed(mut self, element: PathElement) -> Self {
        self.path.insert(0, element);
        self
    }
}

fn print_path(path: &[PathElement]) -> String {
    path.iter()
        .map(|element| match element {
            PathElement::Key(key) => format!(".{}", key),
            PathElement::Index(index) => format!("[{}]", index),
        })
        .collect()
}

/// Coerces the runtime `variable_values` against the variable definitions of `operation`.
///
/// Absent variables without a default stay absent. Every problem is reported, the result is
/// only produced when there are none.
pub fn coerce_variable_values(
    schema: &Schema,
    operation: &OperationDefinition,
    variable_values: &Map<String, JsonValue>,
) -> Result<Map<String, JsonValue>, Vec<CoercionError>> {
    let mut coerced = Map::new();
    let mut errors = vec![];

    for definition in operation.variable_definitions() {
        let name = definition.variable().name().value();
        let variable_type = type_from_ast(definition.type_());
        let type_string = variable_type.to_type_string();
        let locations = location_of(definition);

        if !schema.is_input_type(&variable_type) {
            errors.push(CoercionError::new(
                format!(
                    "Variable \"${}\" expected value of type \"{}\" which cannot be used as an input type.",
                    name, type_string
                ),
                locations,
            ));
            continue;
        }

        let value = match variable_values.get(name) {
            Some(value) => value,
            None => {
                if let Some(default_value) = definition.default_value() {
                    match value_from_ast(schema, default_value, &variable_type, &Map::new()) {
                        Some(value) => {
                            coerced.insert(name.to_string(), value);
                        }
                        None => errors.push(CoercionError::new(
                            format!(
                                "Variable \"${}\" has invalid default value {}.",
                                name,
                                print(default_value)
                            ),
                            locations,
                        )),
                    }
                } else if variable_type.is_non_null() {
                    errors.push(CoercionError::new(
                        format!(
                            "Variable \"${}\" of required type \"{}\" was not provided.",
                            name, type_string
                        ),
                        locations,
                    ));
                }

                continue;
            }
        };

        if value.is_null() && variable_type.is_non_null() {
            errors.push(CoercionError::new(
                format!(
                    "Variable \"${}\" of non-null type \"{}\" must not be null.",
                    name, type_string
                ),
                locations,
            ));
            continue;
        }

        match coerce_input_value(schema, value, &variable_type) {
            Ok(value) => {
                coerced.insert(name.to_string(), value);
            }
            Err(input_errors) => {
                errors.extend(input_errors.into_iter().map(|error| {
                    let at = if error.path.is_empty() {
                        String::new()
                    } else {
                        format!(" at \"{}{}\"", name, print_path(&error.path))
                    };

                    CoercionError::new(
                        format!(
                            "Variable \"${}\" got invalid value {}{}; {}",
                            name, error.value, at, error.message
                        ),
                        locations.clone(),
                    )
                }));
            }
        }
    }

    if errors.is_empty() {
        Ok(coerced)
    } else {
        debug!(errors = errors.len(), "variable coercion failed");
        Err(errors)
    }
}

/// Coerces a runtime input value to `input_type`.
pub fn coerce_input_value(
    schema: &Schema,
    value: &JsonValue,
    input_type: &schema::Type,
) -> Result<JsonValue, Vec<InputError>> {
    match input_type {
        schema::Type::NonNullType(inner) => {
            if value.is_null() {
                return Err(vec![InputError::new(
                    value,
                    format!(
                        "Expected non-nullable type \"{}\" not to be null.",
                        input_type.to_type_string()
                    ),
                )]);
            }

            coerce_input_value(schema, value, inner)
        }
        _ if value.is_null() => Ok(JsonValue::Null),
        schema::Type::ListType(item_type) => match value {
            JsonValue::Array(items) => {
                let mut coerced = Vec::with_capacity(items.len());
                let mut errors = vec![];

                for (index, item) in items.iter().enumerate() {
                    match coerce_input_value(schema, item, item_type) {
                        Ok(item) => coerced.push(item),
                        Err(item_errors) => errors.extend(
                            item_errors
                                .into_iter()
                                .map(|error| error.prefixed(PathElement::Index(index))),
                        ),
                    }
                }

                if errors.is_empty() {
                    Ok(JsonValue::Array(coerced))
                } else {
                    Err(errors)
                }
            }
            single => Ok(JsonValue::Array(vec![coerce_input_value(
                schema, single, item_type,
            )?])),
        },
        schema::Type::NamedType(name) => match schema.type_by_name(name) {
            Some(TypeDefinition::Scalar(_)) => coerce_scalar_input(name, value)
                .map_err(|message| vec![InputError::new(value, message)]),
            Some(TypeDefinition::Enum(enum_type)) => match value {
                JsonValue::String(enum_value)
                    if enum_type.values.iter().any(|v| v.name.eq(enum_value)) =>
                {
                    Ok(value.clone())
                }
                JsonValue::String(enum_value) => Err(vec![InputError::new(
                    value,
                    format!(
                        "Value \"{}\" does not exist in \"{}\" enum.",
                        enum_value, enum_type.name
                    ),
                )]),
                _ => Err(vec![InputError::new(
                    value,
                    format!(
                        "Enum \"{}\" cannot represent non-string value: {}.",
                        enum_type.name, value
                    ),
                )]),
            },
            Some(TypeDefinition::InputObject(input_object)) => {
                let fields = match value {
                    JsonValue::Object(fields) => fields,
                    _ => {
                        return Err(vec![InputError::new(
                            value,
                            format!("Expected type \"{}\" to be an object.", input_object.name),
                        )])
                    }
                };

                let mut coerced = Map::new();
                let mut errors = vec![];

                for field in &input_object.fields {
                    match fields.get(&field.name) {
                        Some(field_value) => {
                            match coerce_input_value(schema, field_value, &field.value_type) {
                                Ok(field_value) => {
                                    coerced.insert(field.name.clone(), field_value);
                                }
                                Err(field_errors) => errors.extend(field_errors.into_iter().map(
                                    |error| error.prefixed(PathElement::Key(field.name.clone())),
                                )),
                            }
                        }
                        None => {
                            if let Some(default_value) = &field.default_value {
                                coerced.insert(field.name.clone(), default_value.to_json());
                            } else if field.value_type.is_non_null() {
                                errors.push(InputError::new(
                                    value,
                                    format!(
                                        "Field \"{}\" of required type \"{}\" was not provided.",
                                        field.name,
                                        field.value_type.to_type_string()
                                    ),
                                ));
                            }
                        }
                    }
                }

                for key in fields.keys() {
                    if !input_object.fields.iter().any(|field| field.name.eq(key)) {
                        errors.push(InputError::new(
                            value,
                            format!(
                                "Field \"{}\" is not defined by type \"{}\".",
                                key, input_object.name
                            ),
                        ));
                    }
                }

                if errors.is_empty() {
                    Ok(JsonValue::Object(coerced))
                } else {
                    Err(errors)
                }
            }
            _ => Err(vec![InputError::new(
                value,
                format!("Unknown input type \"{}\".", name),
            )]),
        },
    }
}

/// Produces the runtime value of a literal written for `value_type`, with variables taken
/// from the already coerced `variables`.
///
/// Returns `None` when the literal is invalid for the type. A variable that has no value is
/// invalid for a non-null position and `null` elsewhere.
pub fn value_from_ast(
    schema: &Schema,
    literal: &Value,
    value_type: &schema::Type,
    variables: &Map<String, JsonValue>,
) -> Option<JsonValue> {
    if let Value::Variable(variable) = literal {
        return match variables.get(variable.name().value()) {
            Some(JsonValue::Null) | None if value_type.is_non_null() => None,
            Some(value) => Some(value.clone()),
            None => Some(JsonValue::Null),
        };
    }

    match value_type {
        schema::Type::NonNullType(inner) => match literal {
            Value::Null(_) => None,
            _ => value_from_ast(schema, literal, inner, variables),
        },
        _ if matches!(literal, Value::Null(_)) => Some(JsonValue::Null),
        schema::Type::ListType(item_type) => match literal {
            Value::List(list) => list
                .values()
                .iter()
                .map(|item| value_from_ast(schema, item, item_type, variables))
                .collect::<Option<Vec<_>>>()
                .map(JsonValue::Array),
            single => value_from_ast(schema, single, item_type, variables)
                .map(|item| JsonValue::Array(vec![item])),
        },
        schema::Type::NamedType(name) => match schema.type_by_name(name)? {
            TypeDefinition::Scalar(_) => parse_scalar_literal(name, literal, variables).ok(),
            TypeDefinition::Enum(enum_type) => match literal {
                Value::Enum(enum_value)
                    if enum_type
                        .values
                        .iter()
                        .any(|v| v.name == enum_value.value()) =>
                {
                    Some(JsonValue::String(enum_value.value().to_string()))
                }
                _ => None,
            },
            TypeDefinition::InputObject(input_object) => {
                let object = match literal {
                    Value::Object(object) => object,
                    _ => return None,
                };

                let mut coerced = Map::new();

                for field in &input_object.fields {
                    let field_literal = object
                        .fields()
                        .iter()
                        .find(|object_field| object_field.name().value() == field.name)
                        .map(|object_field| object_field.value())
                        .filter(|field_literal| provided(field_literal, variables));

                    match field_literal {
                        Some(field_literal) => {
                            let field_value = value_from_ast(
                                schema,
                                field_literal,
                                &field.value_type,
                                variables,
                            )?;
                            coerced.insert(field.name.clone(), field_value);
                        }
                        None => {
                            if let Some(default_value) = &field.default_value {
                                coerced.insert(field.name.clone(), default_value.to_json());
                            } else if field.value_type.is_non_null() {
                                return None;
                            }
                        }
                    }
                }

                Some(JsonValue::Object(coerced))
            }
            _ => None,
        },
    }
}

/// A literal counts as provided unless it is a variable without a runtime value.
fn provided(literal: &Value, variables: &Map<String, JsonValue>) -> bool {
    match literal {
        Value::Variable(variable) => variables.contains_key(variable.name().value()),
        _ => true,
    }
}

/// Coerces the arguments written on a field or directive against their definitions.
pub fn coerce_argument_values(
    schema: &Schema,
    definitions: &[InputValue],
    arguments: &[Argument],
    variables: &Map<String, JsonValue>,
) -> Result<Map<String, JsonValue>, String> {
    let mut coerced = Map::new();

    for definition in definitions {
        let name = &definition.name;
        let argument_type = &definition.value_type;
        let argument = arguments
            .iter()
            .find(|argument| argument.name().value() == name);

        let literal = match argument.map(Argument::value) {
            Some(literal) if provided(literal, variables) => literal,
            missing => {
                if let Some(default_value) = &definition.default_value {
                    coerced.insert(name.clone(), default_value.to_json());
                } else if argument_type.is_non_null() {
                    return Err(match missing {
                        Some(ast::Value::Variable(variable)) => format!(
                            "Argument \"{}\" of required type \"{}\" was provided the variable \"${}\" which was not provided a runtime value.",
                            name,
                            argument_type.to_type_string(),
                            variable.name().value()
                        ),
                        _ => format!(
                            "Argument \"{}\" of required type \"{}\" was not provided.",
                            name,
                            argument_type.to_type_string()
                        ),
                    });
                }

                continue;
            }
        };

        let is_null = match literal {
            Value::Null(_) => true,
            Value::Variable(variable) => variables
                .get(variable.name().value())
                .map_or(false, JsonValue::is_null),
            _ => false,
        };

        if is_null && argument_type.is_non_null() {
            return Err(format!(
                "Argument \"{}\" of non-null type \"{}\" must not be null.",
                name,
                argument_type.to_type_string()
            ));
        }

        match value_from_ast(schema, literal, argument_type, variables) {
            Some(value) => {
                coerced.insert(name.clone(), value);
            }
            None => {
                return Err(format!(
                    "Argument \"{}\" has invalid value {}.",
                    name,
                    print(literal)
                ))
            }
        }
    }

    Ok(coerced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_query;
    use serde_json::json;

    const SCHEMA: &str = "
        type Query { search(filter: Filter, limit: Int = 10, tags: [String!]): [String] }
        enum Color { RED GREEN }
        input Filter { color: Color!, size: Int = 3, nested: Nested }
        input Nested { flag: Boolean }
    ";

    fn coerce(query: &str, variables: JsonValue) -> Result<JsonValue, Vec<String>> {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = parse_query(query).unwrap();
        let operation = document.operations().next().unwrap();
        let variables = match variables {
            JsonValue::Object(variables) => variables,
            _ => Map::new(),
        };

        coerce_variable_values(&schema, operation, &variables)
            .map(JsonValue::Object)
            .map_err(|errors| errors.into_iter().map(|error| error.message).collect())
    }

    #[test]
    fn uses_defaults_and_keeps_absent_variables_absent() {
        assert_eq!(
            coerce(
                "query ($limit: Int = 5, $color: Color, $tags: [String!]) { search }",
                json!({ "tags": "one" })
            ),
            Ok(json!({ "limit": 5, "tags": ["one"] }))
        );
    }

    #[test]
    fn coerces_input_objects_with_field_defaults() {
        assert_eq!(
            coerce(
                "query ($filter: Filter) { search(filter: $filter) }",
                json!({ "filter": { "color": "RED", "nested": { "flag": true } } })
            ),
            Ok(json!({ "filter": { "color": "RED", "size": 3, "nested": { "flag": true } } }))
        );
    }

    #[test]
    fn reports_every_invalid_variable() {
        assert_eq!(
            coerce(
                "query ($a: Int!, $b: Int!, $c: Int, $d: Filter, $e: [Int]) { search }",
                json!({
                    "b": null,
                    "c": 4294967296_i64,
                    "d": { "color": "BLUE", "extra": 1 },
                    "e": [1, "two"],
                })
            ),
            Err(vec![
                "Variable \"$a\" of required type \"Int!\" was not provided.".to_string(),
                "Variable \"$b\" of non-null type \"Int!\" must not be null.".to_string(),
                "Variable \"$c\" got invalid value 4294967296; Int cannot represent non 32-bit signed integer value: 4294967296".to_string(),
                "Variable \"$d\" got invalid value \"BLUE\" at \"d.color\"; Value \"BLUE\" does not exist in \"Color\" enum.".to_string(),
                "Variable \"$d\" got invalid value {\"color\":\"BLUE\",\"extra\":1}; Field \"extra\" is not defined by type \"Filter\".".to_string(),
                "Variable \"$e\" got invalid value \"two\" at \"e[1]\"; Int cannot represent non-integer value: \"two\"".to_string(),
            ])
        );
    }

    #[test]
    fn rejects_output_types() {
        let schema = Schema::parse("type Query { a: String } type Obj { b: String }").unwrap();
        let document = parse_query("query ($o: Obj) { a }").unwrap();
        let operation = document.operations().next().unwrap();

        let errors = coerce_variable_values(&schema, operation, &Map::new()).unwrap_err();

        assert_eq!(
            errors[0].message,
            "Variable \"$o\" expected value of type \"Obj\" which cannot be used as an input type."
        );
        assert_eq!(errors[0].locations[0].column, 8);
    }

    #[test]
    fn argument_values_from_literals_and_variables() {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = parse_query(
            "query ($color: Color, $missing: Int) {
              search(filter: { color: $color, size: $missing }, tags: \"solo\")
            }",
        )
        .unwrap();
        let operation = document.operations().next().unwrap();
        let ast::Selection::Field(field) = &operation.selection_set().selections()[0] else {
            panic!("expected a field");
        };
        let field_def = schema
            .field_definition(schema.type_by_name("Query").unwrap(), "search")
            .unwrap();
        let variables = json!({ "color": "GREEN" });

        let arguments = coerce_argument_values(
            &schema,
            &field_def.arguments,
            field.arguments(),
            variables.as_object().unwrap(),
        )
        .unwrap();

        assert_eq!(
            JsonValue::Object(arguments),
            json!({
                "filter": { "color": "GREEN", "size": 3 },
                "limit": 10,
                "tags": ["solo"],
            })
        );
    }

    #[test]
    fn argument_errors() {
        let schema = Schema::parse("type Query { a(n: Int!): Int, b(c: Color): Int } enum Color { RED }")
            .unwrap();
        let query = schema.type_by_name("Query").unwrap();
        let document = parse_query("{ a(n: null) b(c: BLUE) }").unwrap();
        let operation = document.operations().next().unwrap();
        let fields: Vec<_> = operation
            .selection_set()
            .selections()
            .iter()
            .filter_map(|selection| match selection {
                ast::Selection::Field(field) => Some(field),
                _ => None,
            })
            .collect();

        let errors: Vec<_> = fields
            .iter()
            .map(|field| {
                let field_def = schema.field_definition(query, field.name().value()).unwrap();
                coerce_argument_values(&schema, &field_def.arguments, field.arguments(), &Map::new())
                    .unwrap_err()
            })
            .collect();

        assert_eq!(
            errors,
            vec![
                "Argument \"n\" of non-null type \"Int!\" must not be null.",
                "Argument \"c\" has invalid value BLUE.",
            ]
        );
    }
}
