use super::rules::{default_rules_validation_plan, ValidationRule};
use super::utils::ValidationError;
use super::validate::validate;
use super::validate::ValidationPlan;
use crate::ast::{parse_query, parse_schema, Document};
use crate::schema::Schema;

pub static TEST_SCHEMA: &str = "
interface Mammal {
  mother: Mammal
  father: Mammal
}
interface Pet {
  name(surname: Boolean): String
}
interface Canine implements Mammal {
  name(surname: Boolean): String
  mother: Canine
  father: Canine
}
enum DogCommand {
  SIT
  HEEL
  DOWN
}
type Dog implements Pet & Mammal & Canine {
  name(surname: Boolean): String
  nickname: String
  barkVolume: Int
  barks: Boolean
  doesKnowCommand(dogCommand: DogCommand): Boolean
  isHouseTrained(atOtherHomes: Boolean = true): Boolean
  isAtLocation(x: Int, y: Int): Boolean
  mother: Dog
  father: Dog
}
type Cat implements Pet {
  name(surname: Boolean): String
  nickname: String
  meows: Boolean
  meowsVolume: Int
  furColor: FurColor
}
union CatOrDog = Cat | Dog
type Human {
  name(surname: Boolean): String
  pets: [Pet]
  relatives: [Human]
}
enum FurColor {
  BROWN
  BLACK
  TAN
  SPOTTED
  NO_FUR
  UNKNOWN
}
input ComplexInput {
  requiredField: Boolean!
  nonNullField: Boolean! = false
  intField: Int
  stringField: String
  booleanField: Boolean
  stringListField: [String]
}
type ComplicatedArgs {
  intArgField(intArg: Int): String
  nonNullIntArgField(nonNullIntArg: Int!): String
  stringArgField(stringArg: String): String
  booleanArgField(booleanArg: Boolean): String
  enumArgField(enumArg: FurColor): String
  floatArgField(floatArg: Float): String
  idArgField(idArg: ID): String
  stringListArgField(stringListArg: [String]): String
  stringListNonNullArgField(stringListNonNullArg: [String!]): String
  complexArgField(complexArg: ComplexInput): String
  multipleReqs(req1: Int!, req2: Int!): String
  nonNullFieldWithDefault(arg: Int! = 0): String
  multipleOpts(opt1: Int = 0, opt2: Int = 0): String
  multipleOptAndReq(req1: Int!, req2: Int!, opt1: Int = 0, opt2: Int = 0): String
}
type QueryRoot {
  human(id: ID): Human
  dog: Dog
  cat: Cat
  pet: Pet
  catOrDog: CatOrDog
  complicatedArgs: ComplicatedArgs
}

type SubscriptionRoot {
  fieldB: String
}

type MutationRoot {
  fieldB: String
}

schema {
  subscription: SubscriptionRoot
  mutation: MutationRoot
  query: QueryRoot
}
directive @onField on FIELD
directive @onQuery on QUERY
directive @onMutation on MUTATION
directive @onSubscription on SUBSCRIPTION
directive @onFragmentDefinition on FRAGMENT_DEFINITION
directive @onFragmentSpread on FRAGMENT_SPREAD
directive @onInlineFragment on INLINE_FRAGMENT
directive @testDirective on FIELD | FRAGMENT_DEFINITION
";

pub fn create_default_ruleset_plan() -> ValidationPlan {
    default_rules_validation_plan()
}

pub fn create_plan_from_rule(rule: Box<dyn ValidationRule>) -> ValidationPlan {
    let mut rules = Vec::new();
    rules.push(rule);

    ValidationPlan { rules }
}

pub fn get_messages(validation_errors: &Vec<ValidationError>) -> Vec<&String> {
    validation_errors
        .iter()
        .map(|m| &m.message)
        .collect::<Vec<&String>>()
}

pub fn test_operation_without_schema(
    operation: &str,
    plan: &ValidationPlan,
) -> Vec<ValidationError> {
    test_operation_with_schema(
        operation,
        "
type Query {
  dummy: String
}
",
        plan,
    )
}

pub fn test_operation_with_schema(
    operation: &str,
    schema: &str,
    plan: &ValidationPlan,
) -> Vec<ValidationError> {
    let operation_ast = parse_query(operation).expect("Failed to parse operation");

    test_document_with_schema(&operation_ast, schema, plan)
}

/// Validates a document that mixes executable and type-system definitions.
pub fn test_mixed_document_with_schema(
    operation: &str,
    type_system: &str,
    schema: &str,
    plan: &ValidationPlan,
) -> Vec<ValidationError> {
    let operation_ast = parse_query(operation).expect("Failed to parse operation");
    let type_system_ast = parse_schema(type_system).expect("Failed to parse type system");
    let definitions = operation_ast
        .definitions()
        .iter()
        .chain(type_system_ast.definitions())
        .cloned()
        .collect();

    test_document_with_schema(&Document::new(definitions), schema, plan)
}

pub fn test_document_with_schema(
    document: &Document,
    schema: &str,
    plan: &ValidationPlan,
) -> Vec<ValidationError> {
    let schema = Schema::parse(schema).expect("Failed to parse schema");

    validate(&schema, document, plan)
}
