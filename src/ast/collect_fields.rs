use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use super::node::{Directive, Field, FragmentDefinition, NamedType, Selection, SelectionSet, Value};
use crate::schema::{
    AbstractTypeDefinitionExtension, Schema, SubTypeExtension, TypeDefinitionExtension,
};
use crate::static_graphql::schema::TypeDefinition;

/// Collects the fields selected on `runtime_type` by `selection_sets`, grouped by
/// response key in first-occurrence order.
///
/// Fragment spreads are followed once per collection, fragments whose type condition
/// does not apply to `runtime_type` are ignored, and selections excluded by `@skip` or
/// `@include` are dropped.
pub fn collect_fields<'a>(
    schema: &Schema,
    fragments: &HashMap<&str, &'a FragmentDefinition>,
    variables: &Map<String, JsonValue>,
    runtime_type: &TypeDefinition,
    selection_sets: impl IntoIterator<Item = &'a SelectionSet>,
) -> IndexMap<&'a str, Vec<&'a Field>> {
    let mut collector = Collector {
        schema,
        fragments,
        variables,
        runtime_type,
        fields: IndexMap::new(),
        visited_fragments_names: HashSet::new(),
    };

    for selection_set in selection_sets {
        collector.collect(selection_set);
    }

    collector.fields
}

struct Collector<'c, 'a> {
    schema: &'c Schema,
    fragments: &'c HashMap<&'c str, &'a FragmentDefinition>,
    variables: &'c Map<String, JsonValue>,
    runtime_type: &'c TypeDefinition,
    fields: IndexMap<&'a str, Vec<&'a Field>>,
    visited_fragments_names: HashSet<&'a str>,
}

impl<'c, 'a> Collector<'c, 'a> {
    fn collect(&mut self, selection_set: &'a SelectionSet) {
        for selection in selection_set.selections() {
            match selection {
                Selection::Field(field) => {
                    if should_include(field.directives(), self.variables) {
                        self.fields
                            .entry(field.response_key())
                            .or_default()
                            .push(field);
                    }
                }
                Selection::InlineFragment(fragment) => {
                    if should_include(fragment.directives(), self.variables)
                        && self.does_fragment_condition_match(fragment.type_condition())
                    {
                        self.collect(fragment.selection_set());
                    }
                }
                Selection::FragmentSpread(spread) => {
                    let name = spread.name().value();

                    if self.visited_fragments_names.contains(name)
                        || !should_include(spread.directives(), self.variables)
                    {
                        continue;
                    }

                    self.visited_fragments_names.insert(name);

                    if let Some(fragment) = self.fragments.get(name).copied() {
                        if self.does_fragment_condition_match(Some(fragment.type_condition())) {
                            self.collect(fragment.selection_set());
                        }
                    }
                }
            }
        }
    }

    fn does_fragment_condition_match(&self, fragment_condition: Option<&NamedType>) -> bool {
        let Some(type_condition) = fragment_condition else {
            return true;
        };

        let Some(conditional_type) = self.schema.type_by_name(type_condition.name().value())
        else {
            return false;
        };

        if conditional_type.name().eq(self.runtime_type.name()) {
            return true;
        }

        match (conditional_type, self.runtime_type) {
            (TypeDefinition::Interface(interface_type), runtime_type) => {
                interface_type.is_implemented_by(runtime_type)
            }
            (TypeDefinition::Union(union_type), runtime_type) => {
                union_type.has_sub_type(runtime_type.name())
            }
            _ => false,
        }
    }
}

/// Evaluates `@skip(if:)` and `@include(if:)`, with literal or variable conditions.
pub fn should_include(directives: &[Directive], variables: &Map<String, JsonValue>) -> bool {
    let condition = |name: &str| {
        directives
            .iter()
            .find(|directive| directive.name().value() == name)
            .and_then(|directive| {
                directive
                    .arguments()
                    .iter()
                    .find(|argument| argument.name().value() == "if")
            })
            .and_then(|argument| match argument.value() {
                Value::Boolean(value) => Some(value.value()),
                Value::Variable(variable) => variables
                    .get(variable.name().value())
                    .and_then(JsonValue::as_bool),
                _ => None,
            })
    };

    if condition("skip") == Some(true) {
        return false;
    }

    condition("include") != Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_query;
    use serde_json::json;

    const SCHEMA: &str = "
        type Query { pet: Pet }
        interface Pet { name: String }
        type Dog implements Pet { name: String, barks: Boolean }
        type Cat implements Pet { name: String, meows: Boolean }
        union CatOrDog = Cat | Dog
    ";

    fn collected(query: &str, runtime_type: &str, variables: JsonValue) -> Vec<(String, usize)> {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = parse_query(query).unwrap();
        let fragments = document
            .fragments()
            .map(|fragment| (fragment.name().value(), fragment))
            .collect::<HashMap<_, _>>();
        let operation = document.operations().next().unwrap();
        let variables = variables.as_object().cloned().unwrap_or_default();

        collect_fields(
            &schema,
            &fragments,
            &variables,
            schema.type_by_name(runtime_type).unwrap(),
            [operation.selection_set()],
        )
        .into_iter()
        .map(|(key, fields)| (key.to_string(), fields.len()))
        .collect()
    }

    #[test]
    fn merges_fields_by_response_key() {
        assert_eq!(
            collected(
                "{ name ...F alias: name ... on Dog { name barks } } fragment F on Pet { name }",
                "Dog",
                json!({}),
            ),
            vec![
                ("name".to_string(), 3),
                ("alias".to_string(), 1),
                ("barks".to_string(), 1),
            ]
        );
    }

    #[test]
    fn applies_fragment_conditions() {
        let query = "{ ... on Cat { meows } ... on CatOrDog { name } ... on Dog { barks } ...D }
            fragment D on Dog { barks }";

        assert_eq!(
            collected(query, "Cat", json!({})),
            vec![("meows".to_string(), 1), ("name".to_string(), 1)]
        );
        assert_eq!(
            collected(query, "Dog", json!({})),
            vec![("name".to_string(), 1), ("barks".to_string(), 2)]
        );
    }

    #[test]
    fn spreads_each_fragment_once() {
        assert_eq!(
            collected(
                "{ ...F ...F ... on Dog { ...F } } fragment F on Dog { name }",
                "Dog",
                json!({}),
            ),
            vec![("name".to_string(), 1)]
        );
    }

    #[test]
    fn honours_skip_and_include() {
        let query = "query ($yes: Boolean!, $no: Boolean!) {
            a: name @skip(if: true)
            b: name @include(if: false)
            c: name @skip(if: $no)
            d: name @include(if: $no)
            e: name @skip(if: $yes)
            f: name @include(if: $yes) @skip(if: false)
            ... @skip(if: true) { g: name }
            ...F @include(if: $yes)
        }
        fragment F on Dog { h: name }";

        assert_eq!(
            collected(query, "Dog", json!({ "yes": true, "no": false })),
            vec![
                ("c".to_string(), 1),
                ("f".to_string(), 1),
                ("h".to_string(), 1)
            ]
        );
    }
}
