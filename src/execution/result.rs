use serde::Serialize;
use serde_json::Value;

use crate::error::GraphQLError;

/// The response of one request. Both members are always serialized: `data` may be
/// `null`, `errors` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub data: Option<Value>,
    pub errors: Vec<GraphQLError>,
}

impl ExecutionResult {
    /// A result that never reached field execution.
    pub fn from_errors(errors: Vec<GraphQLError>) -> Self {
        ExecutionResult { data: None, errors }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_is_always_serialized() {
        let result = ExecutionResult::from_errors(vec![GraphQLError::new("nope")]);

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "data": null, "errors": [{ "message": "nope" }] })
        );
    }

    #[test]
    fn errors_are_present_when_empty() {
        let result = ExecutionResult {
            data: Some(json!({ "a": 1 })),
            errors: vec![],
        };

        assert!(result.is_ok());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "data": { "a": 1 }, "errors": [] })
        );
    }
}
