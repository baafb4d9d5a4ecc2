//! graphql-engine
//! ==============
//!
//! Walks, validates and executes GraphQL documents.
//!
//! Source text is parsed by the `graphql_parser` crate and lowered into the node model of
//! [`ast`]; the type system is read from `graphql_parser` schema documents through
//! [`schema::Schema`]. [`graphql`] chains parsing, validation with the default rules and
//! execution for a single request.
//!

use serde_json::{Map, Value};
use tracing::debug;

pub mod ast;
pub mod error;
pub mod execution;
pub mod schema;
pub mod validation;

pub mod static_graphql {
    macro_rules! static_graphql {
    ($m:ident, $m2:ident, {$($n:ident,)*}) => {
        pub mod $m {
            use graphql_parser::$m2 as $m;
            pub use $m::*;
            $(
                pub type $n = $m::$n<'static, String>;
            )*
        }
    };
  }

    static_graphql!(schema, schema, {
      Definition, Field, Directive, InterfaceType, ObjectType, Value, TypeDefinition,
      TypeExtension, EnumType, Type, Document, ScalarType, InputValue, DirectiveDefinition,
      UnionType, InputObjectType, EnumValue, SchemaDefinition,
    });
}

use crate::execution::{ExecutionArgs, ExecutionResult, ResolverMap};
use crate::schema::Schema;
use crate::validation::{default_rules_validation_plan, validate};

/// One request: the query text plus everything it is executed with.
pub struct GraphQLRequest<'a, C> {
    pub schema: &'a Schema,
    pub resolvers: &'a ResolverMap<C>,
    pub context: &'a C,
    pub query: &'a str,
    pub operation_name: Option<String>,
    pub variables: Map<String, Value>,
    pub root_value: Value,
}

impl<'a, C> GraphQLRequest<'a, C> {
    pub fn new(
        schema: &'a Schema,
        resolvers: &'a ResolverMap<C>,
        context: &'a C,
        query: &'a str,
    ) -> Self {
        GraphQLRequest {
            schema,
            resolvers,
            context,
            query,
            operation_name: None,
            variables: Map::new(),
            root_value: Value::Null,
        }
    }

    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_root_value(mut self, root_value: Value) -> Self {
        self.root_value = root_value;
        self
    }
}

/// Parses, validates and executes `request`.
///
/// Syntax and validation errors end the request with `data: null`; nothing is resolved.
pub async fn graphql<C: Sync>(request: GraphQLRequest<'_, C>) -> ExecutionResult {
    let document = match ast::parse_query(request.query) {
        Ok(document) => document,
        Err(error) => {
            debug!(%error, "request rejected by the parser");
            return ExecutionResult::from_errors(vec![error.into()]);
        }
    };

    let validation_errors = validate(
        request.schema,
        &document,
        &default_rules_validation_plan(),
    );
    if !validation_errors.is_empty() {
        debug!(errors = validation_errors.len(), "request failed validation");
        return ExecutionResult::from_errors(
            validation_errors.into_iter().map(Into::into).collect(),
        );
    }

    let mut args = ExecutionArgs::new(
        request.schema,
        &document,
        request.resolvers,
        request.context,
    )
    .with_root_value(request.root_value)
    .with_variable_values(request.variables);
    args.operation_name = request.operation_name;

    execution::execute(args).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;

    const SCHEMA: &str = "
      type Query {
        hello(name: String!): String
        answer: Int
      }
    ";

    fn request(query: &str, variables: Value) -> ExecutionResult {
        let schema = Schema::parse(SCHEMA).unwrap();
        let mut resolvers = ResolverMap::<()>::new();
        resolvers.register_sync("Query", "hello", |info| {
            let name = info.arg("name").and_then(Value::as_str).unwrap_or_default();
            Ok(json!(format!("Hello, {}!", name)))
        });

        let variables = match variables {
            Value::Object(variables) => variables,
            _ => Map::new(),
        };
        let request = GraphQLRequest::new(&schema, &resolvers, &(), query)
            .with_variables(variables)
            .with_root_value(json!({ "answer": 42 }));

        block_on(graphql(request))
    }

    #[test]
    fn executes_a_valid_request() {
        let result = request(
            "query Greet($name: String!) { hello(name: $name) answer }",
            json!({ "name": "Ada" }),
        );

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "data": { "hello": "Hello, Ada!", "answer": 42 }, "errors": [] })
        );
    }

    #[test]
    fn syntax_errors_stop_the_request() {
        let result = request("{ hello(name: ", json!({}));

        assert_eq!(result.data, None);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.starts_with("Syntax Error"));
        assert_eq!(
            result.errors[0].extensions.get("code"),
            Some(&json!("GRAPHQL_PARSE_FAILED"))
        );
    }

    #[test]
    fn validation_errors_stop_the_request() {
        let result = request("{ goodbye answer }", json!({}));

        assert_eq!(result.data, None);
        assert_eq!(
            result
                .errors
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>(),
            vec!["Cannot query field \"goodbye\" on type \"Query\"."]
        );
    }

    #[test]
    fn variable_errors_stop_the_request() {
        let result = request(
            "query Greet($name: String!) { hello(name: $name) }",
            json!({ "name": 7 }),
        );

        assert_eq!(result.data, None);
        assert_eq!(
            result.errors[0].extensions.get("code"),
            Some(&json!("BAD_USER_INPUT"))
        );
    }
}
