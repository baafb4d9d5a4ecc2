//! Result serialization and input coercion of the built-in scalars.
//!
//! Custom scalars pass through untouched in both directions.

use serde_json::{Map, Number, Value as JsonValue};

use crate::ast;

const MAX_INT: i64 = i32::MAX as i64;
const MIN_INT: i64 = i32::MIN as i64;

fn in_int_range(value: i64) -> bool {
    (MIN_INT..=MAX_INT).contains(&value)
}

fn integral(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.is_finite()).then(|| value as i64)
}

/// Serializes a resolved value of the scalar `type_name` for the response.
pub fn serialize_scalar(type_name: &str, value: &JsonValue) -> Result<JsonValue, String> {
    match type_name {
        "Int" => {
            let number = match value {
                JsonValue::Bool(value) => Some(*value as i64),
                JsonValue::Number(number) => match number.as_i64() {
                    Some(number) => Some(number),
                    None => number.as_f64().and_then(integral),
                },
                JsonValue::String(text) if !text.is_empty() => text.parse::<i64>().ok(),
                _ => None,
            };

            match number {
                Some(number) if in_int_range(number) => Ok(JsonValue::from(number)),
                Some(_) => Err(format!(
                    "Int cannot represent non 32-bit signed integer value: {}",
                    value
                )),
                None => Err(format!("Int cannot represent non-integer value: {}", value)),
            }
        }
        "Float" => {
            let number = match value {
                JsonValue::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
                JsonValue::Number(number) => number.as_f64(),
                JsonValue::String(text) if !text.is_empty() => text.parse::<f64>().ok(),
                _ => None,
            };

            number
                .and_then(Number::from_f64)
                .map(JsonValue::Number)
                .ok_or_else(|| format!("Float cannot represent non numeric value: {}", value))
        }
        "String" => match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Bool(value) => Ok(JsonValue::String(value.to_string())),
            JsonValue::Number(number) => Ok(JsonValue::String(number.to_string())),
            _ => Err(format!("String cannot represent value: {}", value)),
        },
        "Boolean" => match value {
            JsonValue::Bool(_) => Ok(value.clone()),
            JsonValue::Number(number) => Ok(JsonValue::Bool(number.as_f64() != Some(0.0))),
            _ => Err(format!(
                "Boolean cannot represent a non boolean value: {}",
                value
            )),
        },
        "ID" => match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Number(number) if number.is_i64() || number.is_u64() => {
                Ok(JsonValue::String(number.to_string()))
            }
            _ => Err(format!("ID cannot represent value: {}", value)),
        },
        _ => Ok(value.clone()),
    }
}

/// Coerces a runtime input value (a variable) for the scalar `type_name`.
pub fn coerce_scalar_input(type_name: &str, value: &JsonValue) -> Result<JsonValue, String> {
    match type_name {
        "Int" => {
            let number = match value {
                JsonValue::Number(number) => number
                    .as_i64()
                    .or_else(|| number.as_f64().and_then(integral)),
                _ => None,
            };

            match number {
                Some(number) if in_int_range(number) => Ok(JsonValue::from(number)),
                Some(_) => Err(format!(
                    "Int cannot represent non 32-bit signed integer value: {}",
                    value
                )),
                None => Err(format!("Int cannot represent non-integer value: {}", value)),
            }
        }
        "Float" => match value {
            JsonValue::Number(number) => number
                .as_f64()
                .and_then(Number::from_f64)
                .map(JsonValue::Number)
                .ok_or_else(|| format!("Float cannot represent non numeric value: {}", value)),
            _ => Err(format!("Float cannot represent non numeric value: {}", value)),
        },
        "String" => match value {
            JsonValue::String(_) => Ok(value.clone()),
            _ => Err(format!("String cannot represent a non string value: {}", value)),
        },
        "Boolean" => match value {
            JsonValue::Bool(_) => Ok(value.clone()),
            _ => Err(format!(
                "Boolean cannot represent a non boolean value: {}",
                value
            )),
        },
        "ID" => match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Number(number) if number.is_i64() || number.is_u64() => {
                Ok(JsonValue::String(number.to_string()))
            }
            _ => Err(format!("ID cannot represent value: {}", value)),
        },
        _ => Ok(value.clone()),
    }
}

/// Parses a literal written in a document for the scalar `type_name`.
///
/// Variables inside custom scalar literals are substituted from `variables`, a missing
/// variable becomes `null`.
pub fn parse_scalar_literal(
    type_name: &str,
    literal: &ast::Value,
    variables: &Map<String, JsonValue>,
) -> Result<JsonValue, String> {
    let printed = || ast::print(literal);

    match (type_name, literal) {
        ("Int", ast::Value::Int(int)) => match int.as_i64() {
            Some(number) if in_int_range(number) => Ok(JsonValue::from(number)),
            _ => Err(format!(
                "Int cannot represent non 32-bit signed integer value: {}",
                printed()
            )),
        },
        ("Int", _) => Err(format!(
            "Int cannot represent non-integer value: {}",
            printed()
        )),
        ("Float", ast::Value::Int(int)) => int
            .as_i64()
            .map(|number| JsonValue::Number(Number::from(number)))
            .ok_or_else(|| format!("Float cannot represent non numeric value: {}", printed())),
        ("Float", ast::Value::Float(float)) => float
            .as_f64()
            .and_then(Number::from_f64)
            .map(JsonValue::Number)
            .ok_or_else(|| format!("Float cannot represent non numeric value: {}", printed())),
        ("Float", _) => Err(format!(
            "Float cannot represent non numeric value: {}",
            printed()
        )),
        ("String", ast::Value::String(string)) => Ok(JsonValue::String(string.value().to_string())),
        ("String", _) => Err(format!(
            "String cannot represent a non string value: {}",
            printed()
        )),
        ("Boolean", ast::Value::Boolean(boolean)) => Ok(JsonValue::Bool(boolean.value())),
        ("Boolean", _) => Err(format!(
            "Boolean cannot represent a non boolean value: {}",
            printed()
        )),
        ("ID", ast::Value::String(string)) => Ok(JsonValue::String(string.value().to_string())),
        ("ID", ast::Value::Int(int)) => Ok(JsonValue::String(int.value().to_string())),
        ("ID", _) => Err(format!(
            "ID cannot represent a non-string and non-integer value: {}",
            printed()
        )),
        _ => Ok(literal_to_json(literal, variables)),
    }
}

/// Converts a literal to JSON without any type information.
pub fn literal_to_json(literal: &ast::Value, variables: &Map<String, JsonValue>) -> JsonValue {
    match literal {
        ast::Value::Variable(variable) => variables
            .get(variable.name().value())
            .cloned()
            .unwrap_or(JsonValue::Null),
        ast::Value::Int(int) => int.as_i64().map(JsonValue::from).unwrap_or(JsonValue::Null),
        ast::Value::Float(float) => float
            .as_f64()
            .and_then(Number::from_f64)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        ast::Value::String(string) => JsonValue::String(string.value().to_string()),
        ast::Value::Boolean(boolean) => JsonValue::Bool(boolean.value()),
        ast::Value::Null(_) => JsonValue::Null,
        ast::Value::Enum(value) => JsonValue::String(value.value().to_string()),
        ast::Value::List(list) => JsonValue::Array(
            list.values()
                .iter()
                .map(|item| literal_to_json(item, variables))
                .collect(),
        ),
        ast::Value::Object(object) => JsonValue::Object(
            object
                .fields()
                .iter()
                .map(|field| {
                    (
                        field.name().value().to_string(),
                        literal_to_json(field.value(), variables),
                    )
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_builtin_scalars() {
        assert_eq!(serialize_scalar("Int", &json!(3.0)), Ok(json!(3)));
        assert_eq!(serialize_scalar("Int", &json!(true)), Ok(json!(1)));
        assert_eq!(
            serialize_scalar("Int", &json!(2147483648_i64)),
            Err("Int cannot represent non 32-bit signed integer value: 2147483648".to_string())
        );
        assert_eq!(
            serialize_scalar("Int", &json!("abc")),
            Err("Int cannot represent non-integer value: \"abc\"".to_string())
        );
        assert_eq!(serialize_scalar("Float", &json!(1)), Ok(json!(1.0)));
        assert_eq!(serialize_scalar("String", &json!(12)), Ok(json!("12")));
        assert_eq!(serialize_scalar("Boolean", &json!(0)), Ok(json!(false)));
        assert_eq!(serialize_scalar("ID", &json!(5)), Ok(json!("5")));
        assert_eq!(
            serialize_scalar("ID", &json!(true)),
            Err("ID cannot represent value: true".to_string())
        );
        assert_eq!(
            serialize_scalar("Json", &json!({"a": [1]})),
            Ok(json!({"a": [1]}))
        );
    }

    #[test]
    fn coerces_variable_inputs() {
        assert_eq!(coerce_scalar_input("Int", &json!(7)), Ok(json!(7)));
        assert_eq!(
            coerce_scalar_input("Int", &json!("7")),
            Err("Int cannot represent non-integer value: \"7\"".to_string())
        );
        assert_eq!(
            coerce_scalar_input("Int", &json!(1.5)),
            Err("Int cannot represent non-integer value: 1.5".to_string())
        );
        assert_eq!(coerce_scalar_input("Float", &json!(2)), Ok(json!(2.0)));
        assert_eq!(coerce_scalar_input("ID", &json!(42)), Ok(json!("42")));
        assert_eq!(
            coerce_scalar_input("Boolean", &json!("true")),
            Err("Boolean cannot represent a non boolean value: \"true\"".to_string())
        );
    }

    #[test]
    fn parses_literals() {
        let variables = Map::new();
        let int = ast::Value::from(ast::IntValue::from(12_i64));
        let string = ast::Value::from(ast::StringValue::new("x"));

        assert_eq!(parse_scalar_literal("Int", &int, &variables), Ok(json!(12)));
        assert_eq!(parse_scalar_literal("Float", &int, &variables), Ok(json!(12)));
        assert_eq!(parse_scalar_literal("ID", &int, &variables), Ok(json!("12")));
        assert_eq!(
            parse_scalar_literal("Int", &string, &variables),
            Err("Int cannot represent non-integer value: \"x\"".to_string())
        );
        assert_eq!(
            parse_scalar_literal("Int", &ast::Value::from(ast::IntValue::from(1_i64 << 40)), &variables),
            Err("Int cannot represent non 32-bit signed integer value: 1099511627776".to_string())
        );
    }
}
