//! Read-only view over a type-system document.
//!
//! The document is indexed once: types and directives by name (built-in scalars and
//! directives are added unless the document defines them) and the three root operation
//! types.

mod builtins;
pub mod ext;
pub mod scalars;

use graphql_parser::Pos;
use indexmap::IndexMap;
use lazy_static::lazy_static;

use crate::ast::{self, OperationType};
use crate::error::SchemaError;
use crate::static_graphql::schema::{
    self, Definition, DirectiveDefinition, ObjectType, TypeDefinition, TypeExtension as TypeExt,
};

pub use self::builtins::BUILTIN_SCALARS;
pub use self::ext::*;

lazy_static! {
    /// `__typename: String!`, answered by every composite type.
    pub static ref TYPENAME_FIELD: schema::Field = schema::Field {
        position: Pos { line: 0, column: 0 },
        description: None,
        name: "__typename".to_string(),
        arguments: vec![],
        field_type: schema::Type::NonNullType(Box::new(schema::Type::NamedType(
            "String".to_string()
        ))),
        directives: vec![],
    };
}

pub const TYPENAME: &str = "__typename";

#[derive(Debug, Clone)]
pub struct Schema {
    types: IndexMap<String, TypeDefinition>,
    directives: IndexMap<String, DirectiveDefinition>,
    query_type: String,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl Schema {
    /// Builds a schema from SDL source.
    pub fn parse(sdl: &str) -> Result<Self, SchemaError> {
        let document = graphql_parser::parse_schema::<String>(sdl)
            .map_err(|error| SchemaError::Parse(error.to_string()))?
            .into_static();

        Schema::new(document)
    }

    pub fn new(document: schema::Document) -> Result<Self, SchemaError> {
        let mut types = IndexMap::new();
        let mut directives = IndexMap::new();
        let mut schema_definition = None;

        for definition in document.definitions {
            match definition {
                Definition::SchemaDefinition(definition) => schema_definition = Some(definition),
                Definition::TypeDefinition(type_definition) => {
                    let name = type_definition.name().to_string();

                    if types.contains_key(&name) {
                        return Err(SchemaError::DuplicateType(name));
                    }

                    types.insert(name, type_definition);
                }
                Definition::DirectiveDefinition(directive) => {
                    if directives.contains_key(&directive.name) {
                        return Err(SchemaError::DuplicateDirective(directive.name));
                    }

                    directives.insert(directive.name.clone(), directive);
                }
                Definition::TypeExtension(extension) => {
                    return Err(SchemaError::UnsupportedExtension(
                        extension_name(&extension).to_string(),
                    ));
                }
            }
        }

        for definition in builtins::builtin_definitions()? {
            match definition {
                Definition::TypeDefinition(type_definition) => {
                    types
                        .entry(type_definition.name().to_string())
                        .or_insert(type_definition);
                }
                Definition::DirectiveDefinition(directive) => {
                    directives.entry(directive.name.clone()).or_insert(directive);
                }
                _ => {}
            }
        }

        let (query, mutation, subscription) = match schema_definition {
            Some(definition) => (
                definition.query.unwrap_or_else(|| "Query".to_string()),
                definition.mutation,
                definition.subscription,
            ),
            None => (
                "Query".to_string(),
                default_root(&types, "Mutation"),
                default_root(&types, "Subscription"),
            ),
        };

        match types.get(&query) {
            None => return Err(SchemaError::MissingQueryType(query)),
            Some(TypeDefinition::Object(_)) => {}
            Some(_) => {
                return Err(SchemaError::InvalidRootType {
                    operation: "Query",
                    name: query,
                })
            }
        }

        for (operation, name) in [("Mutation", &mutation), ("Subscription", &subscription)] {
            if let Some(name) = name {
                if !matches!(types.get(name), Some(TypeDefinition::Object(_))) {
                    return Err(SchemaError::InvalidRootType {
                        operation,
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(Schema {
            types,
            directives,
            query_type: query,
            mutation_type: mutation,
            subscription_type: subscription,
        })
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    pub fn type_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        match self.types.get(name) {
            Some(TypeDefinition::Object(object)) => Some(object),
            _ => None,
        }
    }

    pub fn directives(&self) -> impl Iterator<Item = &DirectiveDefinition> {
        self.directives.values()
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    pub fn root_type_name(&self, operation: OperationType) -> Option<&str> {
        match operation {
            OperationType::Query => Some(&self.query_type),
            OperationType::Mutation => self.mutation_type.as_deref(),
            OperationType::Subscription => self.subscription_type.as_deref(),
        }
    }

    pub fn root_type(&self, operation: OperationType) -> Option<&ObjectType> {
        self.root_type_name(operation)
            .and_then(|name| self.object_type(name))
    }

    /// Looks up a field of an object or interface type. `__typename` resolves on every
    /// composite type, unions included.
    pub fn field_definition<'s>(
        &'s self,
        parent_type: &'s TypeDefinition,
        field_name: &str,
    ) -> Option<&'s schema::Field> {
        if field_name == TYPENAME && parent_type.is_composite_type() {
            return Some(&*TYPENAME_FIELD);
        }

        parent_type.field_by_name(field_name)
    }

    /// The definition of the named type at the core of `type_`.
    pub fn named_type(&self, type_: &schema::Type) -> Option<&TypeDefinition> {
        self.type_by_name(type_.inner_type())
    }

    pub fn is_input_type(&self, type_: &schema::Type) -> bool {
        self.named_type(type_)
            .map(|named| named.is_input_type())
            .unwrap_or(false)
    }

    pub fn is_output_type(&self, type_: &schema::Type) -> bool {
        self.named_type(type_)
            .map(|named| named.is_output_type())
            .unwrap_or(false)
    }

    /// Whether `object_type` is a member of the union or an implementation of the
    /// interface `abstract_type`. An object type is only possible for itself.
    pub fn is_possible_type(&self, abstract_type: &TypeDefinition, object_type: &ObjectType) -> bool {
        match abstract_type {
            TypeDefinition::Union(union_type) => union_type.has_sub_type(&object_type.name),
            TypeDefinition::Interface(interface_type) => {
                interface_type.is_implemented_by(object_type)
            }
            TypeDefinition::Object(object) => object.name == object_type.name,
            _ => false,
        }
    }

    pub fn possible_types(&self, abstract_type: &TypeDefinition) -> Vec<&ObjectType> {
        self.types
            .values()
            .filter_map(|definition| match definition {
                TypeDefinition::Object(object) if self.is_possible_type(abstract_type, object) => {
                    Some(object)
                }
                _ => None,
            })
            .collect()
    }
}

fn default_root(types: &IndexMap<String, TypeDefinition>, name: &str) -> Option<String> {
    matches!(types.get(name), Some(TypeDefinition::Object(_))).then(|| name.to_string())
}

fn extension_name(extension: &TypeExt) -> &str {
    match extension {
        TypeExt::Scalar(scalar) => &scalar.name,
        TypeExt::Object(object) => &object.name,
        TypeExt::Interface(interface) => &interface.name,
        TypeExt::Union(union) => &union.name,
        TypeExt::Enum(enum_type) => &enum_type.name,
        TypeExt::InputObject(input) => &input.name,
    }
}

/// Resolves a type reference written in a document to its type-system form.
pub fn type_from_ast(type_: &ast::Type) -> schema::Type {
    match type_ {
        ast::Type::Named(named) => schema::Type::NamedType(named.name().value().to_string()),
        ast::Type::List(list) => schema::Type::ListType(Box::new(type_from_ast(list.type_()))),
        ast::Type::NonNull(non_null) => {
            schema::Type::NonNullType(Box::new(type_from_ast(non_null.type_())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_builtins_and_default_roots() {
        let schema = Schema::parse(
            "type Query { a: Int }
            type Mutation { b: Boolean }",
        )
        .unwrap();

        assert_eq!(schema.query_type(), "Query");
        assert_eq!(schema.root_type_name(OperationType::Mutation), Some("Mutation"));
        assert_eq!(schema.root_type(OperationType::Subscription), None);
        assert!(schema.type_by_name("ID").unwrap().is_scalar_type());
        assert!(schema.directive("skip").is_some());
        assert!(schema.directive("include").is_some());
        assert!(schema.directive("deprecated").is_some());
    }

    #[test]
    fn user_definitions_shadow_builtins() {
        let schema = Schema::parse(
            "\"custom\" scalar ID
            type Query { a: ID }",
        )
        .unwrap();

        match schema.type_by_name("ID") {
            Some(TypeDefinition::Scalar(scalar)) => {
                assert_eq!(scalar.description.as_deref(), Some("custom"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn honours_schema_definition() {
        let schema = Schema::parse(
            "schema { query: Root mutation: Change }
            type Root { a: Int }
            type Change { b: Int }
            type Query { unused: Int }",
        )
        .unwrap();

        assert_eq!(schema.query_type(), "Root");
        assert_eq!(
            schema.root_type(OperationType::Mutation).map(|o| o.name.as_str()),
            Some("Change")
        );
    }

    #[test]
    fn rejects_invalid_schemas() {
        assert_eq!(
            Schema::parse("type Other { a: Int }").unwrap_err(),
            SchemaError::MissingQueryType("Query".to_string())
        );
        assert_eq!(
            Schema::parse("schema { query: Q } scalar Q").unwrap_err(),
            SchemaError::InvalidRootType {
                operation: "Query",
                name: "Q".to_string()
            }
        );
        assert_eq!(
            Schema::parse("type Query { a: Int } type Query { b: Int }").unwrap_err(),
            SchemaError::DuplicateType("Query".to_string())
        );
        assert_eq!(
            Schema::parse("type Query { a: Int } extend type Query { b: Int }").unwrap_err(),
            SchemaError::UnsupportedExtension("Query".to_string())
        );
        assert!(matches!(
            Schema::parse("type Query {"),
            Err(SchemaError::Parse(_))
        ));
    }

    #[test]
    fn resolves_fields_and_possible_types() {
        let schema = Schema::parse(
            "type Query { pet: Pet }
            interface Pet { name: String }
            type Dog implements Pet { name: String barks: Boolean }
            type Cat implements Pet { name: String }
            type Rock { weight: Int }
            union Thing = Dog | Rock",
        )
        .unwrap();
        let pet = schema.type_by_name("Pet").unwrap();
        let thing = schema.type_by_name("Thing").unwrap();
        let dog = schema.object_type("Dog").unwrap();

        assert_eq!(
            schema.field_definition(pet, "__typename").map(|f| f.name.as_str()),
            Some("__typename")
        );
        assert!(schema.field_definition(thing, "__typename").is_some());
        assert!(schema.field_definition(thing, "weight").is_none());
        assert!(schema.field_definition(pet, "barks").is_none());
        assert!(schema.is_possible_type(pet, dog));
        assert!(schema.is_possible_type(thing, dog));
        assert!(!schema.is_possible_type(thing, schema.object_type("Cat").unwrap()));
        assert_eq!(
            schema
                .possible_types(pet)
                .iter()
                .map(|o| o.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Dog", "Cat"]
        );
    }

    #[test]
    fn converts_ast_types() {
        let document = crate::ast::parse_query("query ($a: [Int!]!) { f }").unwrap();
        let operation = document.operations().next().unwrap();
        let variable_type = operation.variable_definitions()[0].type_();

        assert_eq!(type_from_ast(variable_type).to_type_string(), "[Int!]!");
    }
}
