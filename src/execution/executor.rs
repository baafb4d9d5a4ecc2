use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use futures::future::{join_all, BoxFuture, FutureExt};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::resolver::{property_resolver, ResolveInfo, ResolverMap, ResolverResult};
use super::result::ExecutionResult;
use super::values::{coerce_argument_values, coerce_variable_values};
use crate::ast::{
    collect_fields, Document, Field, FragmentDefinition, Name, OperationDefinition,
    OperationType,
};
use crate::error::{ExecutionError, FieldError, GraphQLError, PathElement, SourceLocation};
use crate::schema::scalars::serialize_scalar;
use crate::schema::{Schema, TypeDefinitionExtension, TypeExtension, TYPENAME};
use crate::static_graphql::schema::{self, TypeDefinition};

/// Inputs of a single execution.
pub struct ExecutionArgs<'a, C> {
    pub schema: &'a Schema,
    pub document: &'a Document,
    pub resolvers: &'a ResolverMap<C>,
    pub context_value: &'a C,
    pub root_value: Value,
    pub variable_values: Map<String, Value>,
    pub operation_name: Option<String>,
}

impl<'a, C> ExecutionArgs<'a, C> {
    pub fn new(
        schema: &'a Schema,
        document: &'a Document,
        resolvers: &'a ResolverMap<C>,
        context_value: &'a C,
    ) -> Self {
        ExecutionArgs {
            schema,
            document,
            resolvers,
            context_value,
            root_value: Value::Null,
            variable_values: Map::new(),
            operation_name: None,
        }
    }

    pub fn with_root_value(mut self, root_value: Value) -> Self {
        self.root_value = root_value;
        self
    }

    pub fn with_variable_values(mut self, variable_values: Map<String, Value>) -> Self {
        self.variable_values = variable_values;
        self
    }

    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }
}

/// Picks the operation to run: the one named `operation_name`, or the only one.
pub fn get_operation<'d>(
    document: &'d Document,
    operation_name: Option<&str>,
) -> Result<&'d OperationDefinition, ExecutionError> {
    match operation_name {
        Some(name) => document
            .operations()
            .find(|operation| operation.name().map(Name::value) == Some(name))
            .ok_or_else(|| ExecutionError::UnknownOperation(name.to_string())),
        None => {
            let mut operations = document.operations();

            match (operations.next(), operations.next()) {
                (Some(operation), None) => Ok(operation),
                (None, _) => Err(ExecutionError::NoOperation),
                (Some(_), Some(_)) => Err(ExecutionError::MustProvideOperationName),
            }
        }
    }
}

/// Executes one operation of an already validated document.
///
/// Sibling fields of queries and subscriptions are resolved concurrently, root fields of a
/// mutation one after the other. A field error nulls the nearest nullable position above
/// it; when none exists `data` is `null`.
pub async fn execute<C: Sync>(args: ExecutionArgs<'_, C>) -> ExecutionResult {
    let ExecutionArgs {
        schema,
        document,
        resolvers,
        context_value,
        root_value,
        variable_values,
        operation_name,
    } = args;

    let operation = match get_operation(document, operation_name.as_deref()) {
        Ok(operation) => operation,
        Err(error) => return ExecutionResult::from_errors(vec![error.into()]),
    };

    debug!(
        operation = operation.name().map(Name::value).unwrap_or_default(),
        kind = %operation.operation(),
        "executing operation"
    );

    let variables = match coerce_variable_values(schema, operation, &variable_values) {
        Ok(variables) => variables,
        Err(errors) => {
            return ExecutionResult::from_errors(errors.into_iter().map(GraphQLError::from).collect())
        }
    };

    let Some(root_type) = schema
        .root_type_name(operation.operation())
        .and_then(|name| schema.type_by_name(name))
    else {
        return ExecutionResult::from_errors(vec![ExecutionError::MissingRootType(
            operation.operation().as_str(),
        )
        .into()]);
    };

    let mut fragments = HashMap::new();
    for fragment in document.fragments() {
        fragments.entry(fragment.name().value()).or_insert(fragment);
    }

    let ctx = ExecutionContext {
        schema,
        fragments,
        operation,
        variables,
        root_value: &root_value,
        context: context_value,
        resolvers,
        errors: Mutex::new(vec![]),
    };

    let fields = collect_fields(
        schema,
        &ctx.fragments,
        &ctx.variables,
        root_type,
        [operation.selection_set()],
    );
    let serial = operation.operation() == OperationType::Mutation;
    let root_path = ResponsePath::default();
    let data = ctx
        .execute_fields(root_type, &root_value, fields, &root_path, serial)
        .await;

    let mut errors = ctx.errors.into_inner();
    errors.sort_by(|(left, _), (right, _)| left.cmp(right));

    debug!(errors = errors.len(), "operation executed");

    ExecutionResult {
        data: data.ok(),
        errors: errors.into_iter().map(|(_, error)| error).collect(),
    }
}

/// Runs [`execute`] to completion on the current thread.
pub fn execute_sync<C: Sync>(args: ExecutionArgs<'_, C>) -> ExecutionResult {
    futures::executor::block_on(execute(args))
}

/// A null that has to travel up to the nearest nullable position. The error causing it
/// is already recorded.
#[derive(Debug)]
struct NullBubble;

type Completion = Result<Value, NullBubble>;

/// Where a value lands in the response, with the position of every step among its
/// siblings so errors can be reported in response order.
#[derive(Debug, Clone, Default)]
struct ResponsePath {
    elements: Vec<PathElement>,
    ordinals: Vec<usize>,
}

impl ResponsePath {
    fn child(&self, element: PathElement, ordinal: usize) -> Self {
        let mut child = self.clone();
        child.elements.push(element);
        child.ordinals.push(ordinal);
        child
    }
}

#[derive(Clone, Copy)]
struct FieldRef<'b> {
    parent_type: &'b TypeDefinition,
    definition: &'b schema::Field,
    nodes: &'b [&'b Field],
}

impl FieldRef<'_> {
    fn coordinate(&self) -> String {
        format!("{}.{}", self.parent_type.name(), self.definition.name)
    }
}

struct ExecutionContext<'a, C> {
    schema: &'a Schema,
    fragments: HashMap<&'a str, &'a FragmentDefinition>,
    operation: &'a OperationDefinition,
    variables: Map<String, Value>,
    root_value: &'a Value,
    context: &'a C,
    resolvers: &'a ResolverMap<C>,
    errors: Mutex<Vec<(Vec<usize>, GraphQLError)>>,
}

fn absorb(return_type: &schema::Type, completed: Completion) -> Completion {
    match completed {
        Err(NullBubble) if !return_type.is_non_null() => Ok(Value::Null),
        completed => completed,
    }
}

fn panic_error(panic: Box<dyn Any + Send>) -> FieldError {
    let message = match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => panic
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .unwrap_or_else(|| "Resolver panicked.".to_string()),
    };

    FieldError::new(message)
}

impl<'a, C: Sync> ExecutionContext<'a, C> {
    fn record_error(&self, path: &ResponsePath, field: FieldRef<'_>, error: FieldError) {
        trace!(
            field = %field.coordinate(),
            path = ?path.elements,
            message = %error.message,
            "field error"
        );

        let locations = field
            .nodes
            .iter()
            .filter_map(|node| node.loc())
            .map(SourceLocation::from)
            .collect();
        let mut graphql_error = GraphQLError::new(error.message)
            .with_locations(locations)
            .with_path(path.elements.clone());
        graphql_error.extensions.extend(error.extensions);

        self.errors
            .lock()
            .push((path.ordinals.clone(), graphql_error));
    }

    fn fail<T>(&self, path: &ResponsePath, field: FieldRef<'_>, message: String) -> Result<T, NullBubble> {
        self.record_error(path, field, FieldError::new(message));
        Err(NullBubble)
    }

    fn execute_fields<'b>(
        &'b self,
        object_type: &'b TypeDefinition,
        source: &'b Value,
        fields: IndexMap<&'b str, Vec<&'b Field>>,
        path: &'b ResponsePath,
        serial: bool,
    ) -> BoxFuture<'b, Completion> {
        async move {
            let mut data = Map::new();

            if serial {
                for (ordinal, (response_key, nodes)) in fields.into_iter().enumerate() {
                    let field_path = path.child(response_key.into(), ordinal);
                    if let Some(value) = self
                        .execute_field(object_type, source, nodes, field_path)
                        .await?
                    {
                        data.insert(response_key.to_string(), value);
                    }
                }
            } else {
                let pending =
                    fields
                        .into_iter()
                        .enumerate()
                        .map(move |(ordinal, (response_key, nodes))| {
                            let field_path = path.child(response_key.into(), ordinal);
                            self.execute_field(object_type, source, nodes, field_path)
                                .map(move |completed| (response_key, completed))
                        });

                for (response_key, completed) in join_all(pending).await {
                    if let Some(value) = completed? {
                        data.insert(response_key.to_string(), value);
                    }
                }
            }

            Ok(Value::Object(data))
        }
        .boxed()
    }

    /// Resolves and completes one response key. `None` when the field is not defined on
    /// `parent_type`, which validation rules out.
    fn execute_field<'b>(
        &'b self,
        parent_type: &'b TypeDefinition,
        source: &'b Value,
        nodes: Vec<&'b Field>,
        path: ResponsePath,
    ) -> BoxFuture<'b, Result<Option<Value>, NullBubble>> {
        async move {
            let Some(first) = nodes.first() else {
                return Ok(None);
            };
            let Some(definition) = self
                .schema
                .field_definition(parent_type, first.name().value())
            else {
                return Ok(None);
            };

            let field = FieldRef {
                parent_type,
                definition,
                nodes: &nodes,
            };
            let return_type = &definition.field_type;

            let completed = match self.resolve_field(field, source, &path).await {
                Ok(value) => self.complete_value(return_type, field, &path, value).await,
                Err(error) => {
                    self.record_error(&path, field, error);
                    Err(NullBubble)
                }
            };

            absorb(return_type, completed).map(Some)
        }
        .boxed()
    }

    async fn resolve_field(
        &self,
        field: FieldRef<'_>,
        source: &Value,
        path: &ResponsePath,
    ) -> ResolverResult {
        let field_name = field.definition.name.as_str();
        let parent_name = field.parent_type.name();

        if field_name == TYPENAME {
            return Ok(Value::String(parent_name.to_string()));
        }

        let arguments = field
            .nodes
            .first()
            .map(|node| node.arguments())
            .unwrap_or_default();
        let args = coerce_argument_values(
            self.schema,
            &field.definition.arguments,
            arguments,
            &self.variables,
        )
        .map_err(FieldError::new)?;

        let Some(resolver) = self.resolvers.resolver(parent_name, field_name) else {
            return Ok(property_resolver(source, field_name));
        };

        let info = ResolveInfo {
            source,
            args,
            context: self.context,
            field_name,
            parent_type: field.parent_type,
            return_type: &field.definition.field_type,
            path: path.elements.clone(),
            field_nodes: field.nodes,
            schema: self.schema,
            operation: self.operation,
            variables: &self.variables,
            root_value: self.root_value,
        };

        let pending = catch_unwind(AssertUnwindSafe(|| (resolver.as_ref())(info)))
            .map_err(panic_error)?;

        AssertUnwindSafe(pending)
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(panic_error(panic)))
    }

    fn complete_value<'b>(
        &'b self,
        return_type: &'b schema::Type,
        field: FieldRef<'b>,
        path: &'b ResponsePath,
        result: Value,
    ) -> BoxFuture<'b, Completion> {
        async move {
            match return_type {
                schema::Type::NonNullType(inner) => {
                    let completed = self.complete_value(inner, field, path, result).await?;
                    if completed.is_null() {
                        return self.fail(
                            path,
                            field,
                            format!(
                                "Cannot return null for non-nullable field {}.",
                                field.coordinate()
                            ),
                        );
                    }

                    Ok(completed)
                }
                _ if result.is_null() => Ok(Value::Null),
                schema::Type::ListType(item_type) => {
                    self.complete_list_value(item_type, field, path, result)
                        .await
                }
                schema::Type::NamedType(type_name) => {
                    self.complete_named_value(type_name, field, path, result)
                        .await
                }
            }
        }
        .boxed()
    }

    async fn complete_list_value(
        &self,
        item_type: &schema::Type,
        field: FieldRef<'_>,
        path: &ResponsePath,
        result: Value,
    ) -> Completion {
        let Value::Array(items) = result else {
            return self.fail(
                path,
                field,
                format!(
                    "Expected Iterable, but did not find one for field \"{}\".",
                    field.coordinate()
                ),
            );
        };

        let pending = items
            .into_iter()
            .enumerate()
            .map(move |(index, item)| async move {
                let item_path = path.child(PathElement::Index(index), index);
                let completed = self.complete_value(item_type, field, &item_path, item).await;
                absorb(item_type, completed)
            });

        join_all(pending)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    async fn complete_named_value(
        &self,
        type_name: &str,
        field: FieldRef<'_>,
        path: &ResponsePath,
        result: Value,
    ) -> Completion {
        match self.schema.type_by_name(type_name) {
            Some(TypeDefinition::Scalar(_)) => serialize_scalar(type_name, &result)
                .or_else(|message| self.fail(path, field, message)),
            Some(TypeDefinition::Enum(enum_type)) => {
                let known = result.as_str().map_or(false, |value| {
                    enum_type.values.iter().any(|enum_value| enum_value.name == value)
                });

                if known {
                    Ok(result)
                } else {
                    self.fail(
                        path,
                        field,
                        format!("Enum \"{}\" cannot represent value: {}", type_name, result),
                    )
                }
            }
            Some(object_type @ TypeDefinition::Object(_)) => {
                self.complete_object_value(object_type, field, path, &result)
                    .await
            }
            Some(abstract_type @ (TypeDefinition::Interface(_) | TypeDefinition::Union(_))) => {
                let object_type = self.resolve_runtime_type(abstract_type, field, path, &result)?;
                self.complete_object_value(object_type, field, path, &result)
                    .await
            }
            _ => self.fail(
                path,
                field,
                format!("Unknown output type \"{}\".", type_name),
            ),
        }
    }

    async fn complete_object_value(
        &self,
        object_type: &TypeDefinition,
        field: FieldRef<'_>,
        path: &ResponsePath,
        result: &Value,
    ) -> Completion {
        let fields = collect_fields(
            self.schema,
            &self.fragments,
            &self.variables,
            object_type,
            field.nodes.iter().copied().filter_map(Field::selection_set),
        );

        self.execute_fields(object_type, result, fields, path, false)
            .await
    }

    /// The object type a value of an interface or union is completed as: the registered
    /// type resolver's answer, else the value's own `__typename`.
    fn resolve_runtime_type(
        &self,
        abstract_type: &TypeDefinition,
        field: FieldRef<'_>,
        path: &ResponsePath,
        result: &Value,
    ) -> Result<&'a TypeDefinition, NullBubble> {
        let abstract_name = abstract_type.name();
        let type_name = self
            .resolvers
            .type_resolver(abstract_name)
            .and_then(|type_resolver| (type_resolver.as_ref())(result, self.context))
            .or_else(|| {
                result
                    .get(TYPENAME)
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });

        let Some(type_name) = type_name else {
            return self.fail(
                path,
                field,
                format!(
                    "Abstract type \"{}\" must resolve to an Object type at runtime for field \"{}\". Either register a type resolver for \"{}\" or return \"__typename\" with the value.",
                    abstract_name,
                    field.coordinate(),
                    abstract_name
                ),
            );
        };

        match self.schema.type_by_name(&type_name) {
            Some(runtime_type @ TypeDefinition::Object(object_type))
                if self.schema.is_possible_type(abstract_type, object_type) =>
            {
                Ok(runtime_type)
            }
            Some(TypeDefinition::Object(_)) => self.fail(
                path,
                field,
                format!(
                    "Runtime Object type \"{}\" is not a possible type for \"{}\".",
                    type_name, abstract_name
                ),
            ),
            Some(_) => self.fail(
                path,
                field,
                format!(
                    "Abstract type \"{}\" must resolve to an Object type at runtime for field \"{}\". Received \"{}\".",
                    abstract_name,
                    field.coordinate(),
                    type_name
                ),
            ),
            None => self.fail(
                path,
                field,
                format!(
                    "Abstract type \"{}\" was resolved to a type \"{}\" that does not exist inside the schema.",
                    abstract_name, type_name
                ),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ast::parse_query;
    use crate::execution::test_utils::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn resolves_properties_and_typename() {
        let result = run("{ hero { __typename name } greeting }");

        assert!(result.is_ok());
        assert_eq!(
            result.data,
            Some(json!({
                "hero": { "__typename": "Human", "name": "Luke" },
                "greeting": "Hello, world!",
            }))
        );
    }

    #[test]
    fn response_keys_follow_selection_order() {
        let result = run("{ greeting hero { homePlanet name } salutation: greeting }");

        assert_eq!(
            serde_json::to_string(&result.data).unwrap(),
            r#"{"greeting":"Hello, world!","hero":{"homePlanet":"Tatooine","name":"Luke"},"salutation":"Hello, world!"}"#
        );
    }

    #[test]
    fn arguments_and_defaults() {
        let result = run_with_variables(
            "query ($name: String) { given: greeting(name: \"Leia\") missing: greeting(name: $name) }",
            json!({}),
        );

        assert_eq!(
            result.data,
            Some(json!({ "given": "Hello, Leia!", "missing": "Hello, world!" }))
        );
    }

    #[test]
    fn field_error_nulls_only_that_field() {
        let result = run("{ boom greeting }");

        assert_eq!(
            result.data,
            Some(json!({ "boom": null, "greeting": "Hello, world!" }))
        );
        assert_eq!(
            serde_json::to_value(&result.errors).unwrap(),
            json!([{
                "message": "kaboom",
                "locations": [{ "line": 1, "column": 3 }],
                "path": ["boom"],
                "extensions": { "code": "BOOM" },
            }])
        );
    }

    #[test]
    fn null_bubbles_to_nearest_nullable_field() {
        let result = run("{ profile { bio nickname } greeting }");

        assert_eq!(
            result.data,
            Some(json!({ "profile": null, "greeting": "Hello, world!" }))
        );
        assert_eq!(
            error_messages(&result),
            vec!["Cannot return null for non-nullable field Profile.bio."]
        );
        assert_eq!(
            result.errors[0].path,
            Some(vec!["profile".into(), "bio".into()])
        );
    }

    #[test]
    fn null_without_nullable_ancestor_nulls_data() {
        let result = run("{ strictProfile { bio } greeting }");

        assert_eq!(result.data, None);
        assert_eq!(
            result.errors[0].path,
            Some(vec!["strictProfile".into(), "bio".into()])
        );
        assert_eq!(
            serde_json::to_value(&result).unwrap()["data"],
            serde_json::Value::Null
        );
    }

    #[test]
    fn list_items_fail_independently() {
        let result = run("{ heroes { name } }");

        assert_eq!(
            result.data,
            Some(json!({ "heroes": [{ "name": "Luke" }, null, { "name": "C-3PO" }] }))
        );
        assert_eq!(
            result.errors[0].path,
            Some(vec!["heroes".into(), 1.into(), "name".into()])
        );
    }

    #[test]
    fn null_non_null_item_nulls_the_list() {
        let result = run("{ strictHeroes { name } }");

        assert_eq!(result.data, Some(json!({ "strictHeroes": null })));
        assert_eq!(
            error_messages(&result),
            vec!["Cannot return null for non-nullable field Query.strictHeroes."]
        );
        assert_eq!(
            result.errors[0].path,
            Some(vec!["strictHeroes".into(), 1.into()])
        );
    }

    #[test]
    fn skip_and_include() {
        let result = run_with_variables(
            "query ($skip: Boolean!) {
              greeting @skip(if: $skip)
              hero @include(if: false) { name }
              profile @include(if: true) { nickname }
            }",
            json!({ "skip": true }),
        );

        assert_eq!(
            result.data,
            Some(json!({ "profile": { "nickname": "Wormie" } }))
        );
    }

    #[test]
    fn fragments_merge_into_one_response_key() {
        let result = run(
            "{
              hero { name }
              hero { ...HumanFields ... on Droid { primaryFunction } }
            }

            fragment HumanFields on Human {
              homePlanet
            }",
        );

        assert_eq!(
            result.data,
            Some(json!({ "hero": { "name": "Luke", "homePlanet": "Tatooine" } }))
        );
    }

    #[test]
    fn variable_errors_abort_before_resolving() {
        let context = TestContext::default();
        let result = run_with_context(
            "query ($id: ID!) { droid(id: $id) { name } }",
            json!({}),
            None,
            &context,
        );

        assert_eq!(result.data, None);
        assert_eq!(
            serde_json::to_value(&result.errors).unwrap(),
            json!([{
                "message": "Variable \"$id\" of required type \"ID!\" was not provided.",
                "locations": [{ "line": 1, "column": 8 }],
                "extensions": { "code": "BAD_USER_INPUT" },
            }])
        );
        assert_eq!(context.droid_calls.load(Ordering::SeqCst), 0);

        let result = run_with_context(
            "query ($id: ID!) { droid(id: $id) { name } }",
            json!({ "id": 2001 }),
            None,
            &context,
        );

        assert_eq!(result.data, Some(json!({ "droid": { "name": "Droid 2001" } })));
        assert_eq!(context.droid_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn mutation_fields_run_serially() {
        let context = TestContext::default();
        let result = run_with_context(
            "mutation { first: increment(by: 2) second: increment }",
            json!({}),
            None,
            &context,
        );

        assert_eq!(result.data, Some(json!({ "first": 2, "second": 3 })));
        assert_eq!(*context.increments.lock(), vec![2, 1]);
    }

    #[test]
    fn errors_follow_response_order() {
        let result = run("{ slow: slowBoom fast: boom }");

        // `fast` fails first, errors are still reported in response order.
        assert_eq!(error_messages(&result), vec!["slow kaboom", "kaboom"]);
        assert_eq!(result.errors[0].path, Some(vec!["slow".into()]));
        assert_eq!(result.errors[1].path, Some(vec!["fast".into()]));
    }

    #[test]
    fn abstract_types_resolve_their_runtime_type() {
        let result = run(
            "{
              search {
                __typename
                ... on Human { name homePlanet }
                ... on Droid { name primaryFunction }
              }
            }",
        );

        assert!(result.is_ok());
        assert_eq!(
            result.data,
            Some(json!({
                "search": [
                    { "__typename": "Human", "name": "Leia", "homePlanet": "Alderaan" },
                    { "__typename": "Droid", "name": "R2-D2", "primaryFunction": "Astromech" },
                ]
            }))
        );
    }

    #[test]
    fn leaf_values_are_serialized() {
        let result = run("{ favoriteEpisode badEpisode hugeCount notAList }");

        assert_eq!(
            result.data,
            Some(json!({
                "favoriteEpisode": "JEDI",
                "badEpisode": null,
                "hugeCount": null,
                "notAList": null,
            }))
        );
        assert_eq!(
            error_messages(&result),
            vec![
                "Enum \"Episode\" cannot represent value: \"PHANTOM\"",
                "Int cannot represent non 32-bit signed integer value: 1099511627776",
                "Expected Iterable, but did not find one for field \"Query.notAList\".",
            ]
        );
    }

    #[test]
    fn resolver_panics_become_field_errors() {
        let result = run("{ panics greeting }");

        assert_eq!(
            result.data,
            Some(json!({ "panics": null, "greeting": "Hello, world!" }))
        );
        assert_eq!(error_messages(&result), vec!["resolver exploded"]);
    }

    #[test]
    fn selects_the_requested_operation() {
        let query = "query A { greeting } query B { hero { name } }";
        let context = TestContext::default();

        let result = run_with_context(query, json!({}), Some("B"), &context);
        assert_eq!(result.data, Some(json!({ "hero": { "name": "Luke" } })));

        let result = run_with_context(query, json!({}), None, &context);
        assert_eq!(result.data, None);
        assert_eq!(
            error_messages(&result),
            vec!["Must provide operation name if query contains multiple operations."]
        );

        let result = run_with_context(query, json!({}), Some("C"), &context);
        assert_eq!(error_messages(&result), vec!["Unknown operation named \"C\"."]);
    }

    #[test]
    fn missing_root_type() {
        let result = run("subscription { greeting }");

        assert_eq!(result.data, None);
        assert_eq!(
            error_messages(&result),
            vec!["Schema is not configured to execute subscription operation."]
        );
    }

    #[test]
    fn default_resolver_runs_when_no_field_resolver_matches() {
        init_tracing();

        let schema =
            Schema::parse("type Query { a: String b: String c: C } type C { d: String }")
                .unwrap();
        let document = parse_query("{ a b c { __typename d } }").unwrap();

        let mut resolvers = ResolverMap::<()>::new();
        resolvers
            .register_sync("Query", "a", |_info| Ok(json!("specific")))
            .set_default_resolver(|info| {
                async move {
                    let result: ResolverResult = match info.field_name {
                        "c" => Ok(json!({})),
                        name => Ok(json!(format!("default:{}", name))),
                    };
                    result
                }
                .boxed()
            });

        let args = ExecutionArgs::new(&schema, &document, &resolvers, &())
            .with_root_value(json!({ "a": "property", "b": "property" }));
        let result = execute_sync(args);

        assert!(result.is_ok());
        assert_eq!(
            result.data,
            Some(json!({
                "a": "specific",
                "b": "default:b",
                "c": { "__typename": "C", "d": "default:d" },
            }))
        );
    }

    #[test]
    fn document_without_operations() {
        let document = parse_query("fragment F on Query { greeting }").unwrap();

        assert_eq!(
            get_operation(&document, None).unwrap_err(),
            ExecutionError::NoOperation
        );
    }
}
