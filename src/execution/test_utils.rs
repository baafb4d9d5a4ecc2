use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::Poll;

use futures::future::{poll_fn, FutureExt};
use parking_lot::Mutex;
use serde_json::{json, Value};

use super::executor::{execute_sync, ExecutionArgs};
use super::resolver::{ResolverMap, ResolverResult};
use super::result::ExecutionResult;
use crate::ast::parse_query;
use crate::error::FieldError;
use crate::schema::Schema;

pub static TEST_SCHEMA: &str = "
interface Character {
  name: String!
}
type Human implements Character {
  name: String!
  homePlanet: String
}
type Droid implements Character {
  name: String!
  primaryFunction: String
}
union SearchResult = Human | Droid
enum Episode {
  NEWHOPE
  EMPIRE
  JEDI
}
type Profile {
  bio: String!
  nickname: String
}
type Query {
  hero: Character
  heroes: [Character]
  strictHeroes: [Character!]
  search: [SearchResult]
  droid(id: ID!): Droid
  profile: Profile
  strictProfile: Profile!
  greeting(name: String = \"world\"): String
  favoriteEpisode: Episode
  badEpisode: Episode
  hugeCount: Int
  notAList: [String]
  boom: String
  slowBoom: String
  panics: String
}
type Mutation {
  increment(by: Int = 1): Int!
}
";

#[derive(Default)]
pub struct TestContext {
    pub droid_calls: AtomicUsize,
    pub counter: Mutex<i64>,
    pub increments: Mutex<Vec<i64>>,
}

pub fn test_schema() -> Schema {
    Schema::parse(TEST_SCHEMA).expect("Failed to parse schema")
}

pub fn test_root_value() -> Value {
    json!({
        "hero": { "__typename": "Human", "name": "Luke", "homePlanet": "Tatooine" },
        "heroes": [
            { "__typename": "Human", "name": "Luke", "homePlanet": "Tatooine" },
            { "__typename": "Droid", "name": null, "primaryFunction": "Astromech" },
            { "__typename": "Droid", "name": "C-3PO", "primaryFunction": "Protocol" },
        ],
        "strictHeroes": [
            { "__typename": "Human", "name": "Luke" },
            null,
        ],
        "search": [
            { "name": "Leia", "homePlanet": "Alderaan" },
            { "name": "R2-D2", "primaryFunction": "Astromech" },
        ],
        "profile": { "bio": null, "nickname": "Wormie" },
        "strictProfile": { "bio": null },
        "favoriteEpisode": "JEDI",
        "badEpisode": "PHANTOM",
        "hugeCount": 1099511627776_i64,
        "notAList": "just a string",
    })
}

/// Completes after being polled `times` more times, waking itself in between.
pub async fn yield_times(times: usize) {
    let mut remaining = times;
    poll_fn(|cx| {
        if remaining == 0 {
            Poll::Ready(())
        } else {
            remaining -= 1;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

pub fn test_resolvers() -> ResolverMap<TestContext> {
    let mut resolvers = ResolverMap::<TestContext>::new();

    resolvers
        .register_sync("Query", "greeting", |info| {
            let name = info.arg("name").and_then(Value::as_str).unwrap_or("nobody");
            Ok(json!(format!("Hello, {}!", name)))
        })
        .register_sync("Query", "droid", |info| {
            info.context.droid_calls.fetch_add(1, Ordering::SeqCst);
            let id = info.arg("id").and_then(Value::as_str).unwrap_or_default();
            Ok(json!({ "name": format!("Droid {}", id), "primaryFunction": "Testing" }))
        })
        .register_sync("Query", "boom", |_info| {
            Err(FieldError::new("kaboom").with_extension("code", "BOOM"))
        })
        .register("Query", "slowBoom", |_info| {
            async move {
                yield_times(3).await;
                let result: ResolverResult = Err(FieldError::new("slow kaboom"));
                result
            }
            .boxed()
        })
        .register_sync("Query", "panics", |_info| panic!("resolver exploded"))
        .register("Mutation", "increment", |info| {
            async move {
                let by = info.arg("by").and_then(Value::as_i64).unwrap_or_default();
                // The first mutation yields longest, so concurrent execution would reorder.
                yield_times(if by > 1 { 5 } else { 0 }).await;
                let mut counter = info.context.counter.lock();
                *counter += by;
                info.context.increments.lock().push(by);
                let result: ResolverResult = Ok(json!(*counter));
                result
            }
            .boxed()
        })
        .register_type_resolver("SearchResult", |value, _context| {
            let type_name = if value.get("homePlanet").is_some() {
                "Human"
            } else {
                "Droid"
            };
            Some(type_name.to_string())
        });

    resolvers
}

/// Routes the executor's logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn run_with_context(
    query: &str,
    variables: Value,
    operation_name: Option<&str>,
    context: &TestContext,
) -> ExecutionResult {
    init_tracing();

    let schema = test_schema();
    let document = parse_query(query).expect("Failed to parse operation");
    let resolvers = test_resolvers();

    let mut args = ExecutionArgs::new(&schema, &document, &resolvers, context)
        .with_root_value(test_root_value());
    if let Value::Object(variables) = variables {
        args = args.with_variable_values(variables);
    }
    if let Some(operation_name) = operation_name {
        args = args.with_operation_name(operation_name);
    }

    execute_sync(args)
}

pub fn run(query: &str) -> ExecutionResult {
    run_with_context(query, json!({}), None, &TestContext::default())
}

pub fn run_with_variables(query: &str, variables: Value) -> ExecutionResult {
    run_with_context(query, variables, None, &TestContext::default())
}

pub fn error_messages(result: &ExecutionResult) -> Vec<&str> {
    result
        .errors
        .iter()
        .map(|error| error.message.as_str())
        .collect()
}
