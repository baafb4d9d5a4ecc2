use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::ast::Location;

/// A `line`/`column` pair pointing into the source text, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl From<Location> for SourceLocation {
    fn from(loc: Location) -> Self {
        SourceLocation {
            line: loc.line,
            column: loc.column,
        }
    }
}

impl From<graphql_parser::Pos> for SourceLocation {
    fn from(pos: graphql_parser::Pos) -> Self {
        SourceLocation {
            line: pos.line,
            column: pos.column,
        }
    }
}

/// One step of a response path: an object key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathElement {
    Key(String),
    Index(usize),
}

impl From<&str> for PathElement {
    fn from(key: &str) -> Self {
        PathElement::Key(key.to_string())
    }
}

impl From<usize> for PathElement {
    fn from(index: usize) -> Self {
        PathElement::Index(index)
    }
}

/// The error shape every layer is reported with in a response.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{message}")]
pub struct GraphQLError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
    pub path: Option<Vec<PathElement>>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        GraphQLError {
            message: message.into(),
            locations: vec![],
            path: None,
            extensions: Map::new(),
        }
    }

    pub fn with_locations(mut self, locations: Vec<SourceLocation>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_path(mut self, path: Vec<PathElement>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.extensions
            .insert("code".to_string(), Value::String(code.to_string()));
        self
    }
}

/// Raised when constructing a node from invalid parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    #[error("Names must match /^[_a-zA-Z][_a-zA-Z0-9]*$/ but \"{0}\" does not.")]
    InvalidName(String),
    #[error("Enum values cannot be named \"{0}\".")]
    InvalidEnumValue(String),
    #[error("\"{0}\" is not a valid {1} literal.")]
    InvalidNumber(String, &'static str),
    #[error("A non-null type cannot wrap another non-null type.")]
    NestedNonNull,
    #[error("Type extensions are not supported (extending \"{0}\").")]
    UnsupportedExtension(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Syntax Error: {0}")]
    Parse(String),
    #[error(transparent)]
    Ast(#[from] AstError),
}

impl From<SyntaxError> for GraphQLError {
    fn from(error: SyntaxError) -> Self {
        GraphQLError::new(error.to_string()).with_code("GRAPHQL_PARSE_FAILED")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Unable to parse schema: {0}")]
    Parse(String),
    #[error("Query root type \"{0}\" must be provided.")]
    MissingQueryType(String),
    #[error("{operation} root type \"{name}\" must be an object type.")]
    InvalidRootType { operation: &'static str, name: String },
    #[error("There can be only one type named \"{0}\".")]
    DuplicateType(String),
    #[error("There can be only one directive named \"@{0}\".")]
    DuplicateDirective(String),
    #[error("Type extensions are not supported (extending \"{0}\").")]
    UnsupportedExtension(String),
}

/// Structural problems that abort execution before any field is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("Must provide an operation.")]
    NoOperation,
    #[error("Unknown operation named \"{0}\".")]
    UnknownOperation(String),
    #[error("Must provide operation name if query contains multiple operations.")]
    MustProvideOperationName,
    #[error("Schema is not configured to execute {0} operation.")]
    MissingRootType(&'static str),
}

impl From<ExecutionError> for GraphQLError {
    fn from(error: ExecutionError) -> Self {
        GraphQLError::new(error.to_string()).with_code("EXECUTION_ERROR")
    }
}

/// A variable or argument value that does not fit its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CoercionError {
    pub message: String,
    pub locations: Vec<SourceLocation>,
}

impl CoercionError {
    pub fn new(message: impl Into<String>, locations: Vec<SourceLocation>) -> Self {
        CoercionError {
            message: message.into(),
            locations,
        }
    }
}

impl From<CoercionError> for GraphQLError {
    fn from(error: CoercionError) -> Self {
        GraphQLError::new(error.message)
            .with_locations(error.locations)
            .with_code("BAD_USER_INPUT")
    }
}

/// The error a resolver returns. Location and path are attached by the executor.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub message: String,
    pub extensions: Map<String, Value>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        FieldError {
            message: message.into(),
            extensions: Map::new(),
        }
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_only_present_members() {
        let error = GraphQLError::new("boom")
            .with_locations(vec![SourceLocation { line: 1, column: 3 }])
            .with_path(vec!["a".into(), 0.into(), "b".into()]);

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "message": "boom",
                "locations": [{ "line": 1, "column": 3 }],
                "path": ["a", 0, "b"],
            })
        );

        assert_eq!(
            serde_json::to_value(GraphQLError::new("plain")).unwrap(),
            json!({ "message": "plain" })
        );
    }

    #[test]
    fn execution_errors_carry_a_code() {
        let error: GraphQLError = ExecutionError::UnknownOperation("Foo".to_string()).into();

        assert_eq!(error.message, "Unknown operation named \"Foo\".");
        assert_eq!(error.extensions.get("code"), Some(&json!("EXECUTION_ERROR")));
    }
}
