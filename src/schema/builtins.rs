use crate::error::SchemaError;
use crate::static_graphql::schema;

const BUILTINS_SDL: &str = r#"
"The `Int` scalar type represents non-fractional signed whole numeric values. Int can represent values between -(2^31) and 2^31 - 1."
scalar Int

"The `Float` scalar type represents signed double-precision fractional values as specified by IEEE 754."
scalar Float

"The `String` scalar type represents textual data, represented as UTF-8 character sequences."
scalar String

"The `Boolean` scalar type represents `true` or `false`."
scalar Boolean

"The `ID` scalar type represents a unique identifier, often used to refetch an object or as key for a cache."
scalar ID

"Directs the executor to include this field or fragment only when the `if` argument is true."
directive @include(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT

"Directs the executor to skip this field or fragment when the `if` argument is true."
directive @skip(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT

"Marks an element of a GraphQL schema as no longer supported."
directive @deprecated(reason: String = "No longer supported") on FIELD_DEFINITION | ENUM_VALUE
"#;

/// Names of the scalars every schema provides.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Definitions of the built-in scalars and directives, freshly parsed on every call.
pub fn builtin_definitions() -> Result<Vec<schema::Definition>, SchemaError> {
    let document = graphql_parser::parse_schema::<String>(BUILTINS_SDL)
        .map_err(|error| SchemaError::Parse(error.to_string()))?
        .into_static();

    Ok(document.definitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provides_scalars_and_directives() {
        let definitions = builtin_definitions().unwrap();
        let directive_names = definitions
            .iter()
            .filter_map(|definition| match definition {
                schema::Definition::DirectiveDefinition(directive) => Some(directive.name.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>();
        let scalar_count = definitions
            .iter()
            .filter(|definition| {
                matches!(
                    definition,
                    schema::Definition::TypeDefinition(schema::TypeDefinition::Scalar(_))
                )
            })
            .count();

        assert_eq!(directive_names, vec!["include", "skip", "deprecated"]);
        assert_eq!(scalar_count, BUILTIN_SCALARS.len());
    }
}
