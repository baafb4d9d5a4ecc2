//! Lowering of `graphql-parser` documents into the crate's node model.

use graphql_parser::{query as q, schema as s, Pos};

use super::node::*;
use crate::error::{AstError, SyntaxError};

/// Options for [`parse_query_with_options`] and [`parse_schema_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Leave every `loc` empty.
    pub no_location: bool,
}

impl ParseOptions {
    pub fn no_location(mut self, no_location: bool) -> Self {
        self.no_location = no_location;
        self
    }
}

pub fn parse_query(source: &str) -> Result<Document, SyntaxError> {
    parse_query_with_options(source, ParseOptions::default())
}

pub fn parse_query_with_options(
    source: &str,
    options: ParseOptions,
) -> Result<Document, SyntaxError> {
    let parsed = graphql_parser::parse_query::<String>(source)
        .map_err(|error| SyntaxError::Parse(error.to_string()))?;

    Ok(Lowering::new(source, options).query_document(&parsed))
}

pub fn parse_schema(source: &str) -> Result<Document, SyntaxError> {
    parse_schema_with_options(source, ParseOptions::default())
}

pub fn parse_schema_with_options(
    source: &str,
    options: ParseOptions,
) -> Result<Document, SyntaxError> {
    let parsed = graphql_parser::parse_schema::<String>(source)
        .map_err(|error| SyntaxError::Parse(error.to_string()))?;

    Ok(Lowering::new(source, options).schema_document(&parsed)?)
}

/// Maps parser positions (line and character column) to byte offsets.
struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    fn new(source: &'s str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(index, _)| index + 1))
            .collect();

        LineIndex {
            source,
            line_starts,
        }
    }

    fn offset(&self, pos: Pos) -> usize {
        let Some(&line_start) = self.line_starts.get(pos.line.saturating_sub(1)) else {
            return self.source.len();
        };
        let line = &self.source[line_start..];

        line_start
            + line
                .char_indices()
                .nth(pos.column.saturating_sub(1))
                .map(|(index, _)| index)
                .unwrap_or(line.len())
    }

    /// Position of the `...` that opens the fragment the parser reported at `pos`.
    ///
    /// graphql-parser reports inline fragments at the token after the spread.
    fn spread_start(&self, pos: Pos) -> Pos {
        let offset = self.offset(pos);
        if self.source[offset..].starts_with("...") {
            return pos;
        }
        let Some(start) = self.source[..offset].rfind("...") else {
            return pos;
        };

        let line = self.line_starts.partition_point(|&line_start| line_start <= start);
        let line_start = self.line_starts[line - 1];

        Pos {
            line,
            column: self.source[line_start..start].chars().count() + 1,
        }
    }
}

struct Lowering<'s> {
    index: Option<LineIndex<'s>>,
}

fn furthest_end(children: impl IntoIterator<Item = Option<Location>>) -> Option<usize> {
    children
        .into_iter()
        .flatten()
        .map(|loc| loc.end)
        .max()
}

impl<'s> Lowering<'s> {
    fn new(source: &'s str, options: ParseOptions) -> Self {
        Lowering {
            index: (!options.no_location).then(|| LineIndex::new(source)),
        }
    }

    /// Location starting at `pos`, ending at the furthest located child.
    fn loc(&self, pos: Pos, children: &[Option<Location>]) -> Option<Location> {
        let index = self.index.as_ref()?;
        let start = index.offset(pos);
        let end = furthest_end(children.iter().copied()).unwrap_or(start).max(start);

        Some(Location {
            start,
            end,
            line: pos.line,
            column: pos.column,
        })
    }

    fn query_document(&self, document: &q::Document<'_, String>) -> Document {
        let definitions = document
            .definitions
            .iter()
            .map(|definition| match definition {
                q::Definition::Operation(operation) => {
                    Definition::Operation(self.operation(operation))
                }
                q::Definition::Fragment(fragment) => Definition::Fragment(self.fragment(fragment)),
            })
            .collect();

        Document {
            definitions,
            loc: self.document_loc(),
        }
    }

    fn schema_document(&self, document: &s::Document<'_, String>) -> Result<Document, AstError> {
        let definitions = document
            .definitions
            .iter()
            .map(|definition| self.type_system_definition(definition))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Document {
            definitions,
            loc: self.document_loc(),
        })
    }

    fn document_loc(&self) -> Option<Location> {
        self.index.as_ref().map(|index| Location {
            start: 0,
            end: index.source.len(),
            line: 1,
            column: 1,
        })
    }

    fn name(&self, value: &str) -> Name {
        Name::from_parsed(value.to_string())
    }

    fn operation(&self, operation: &q::OperationDefinition<'_, String>) -> OperationDefinition {
        let (operation_type, position, name, variable_definitions, directives, selection_set) =
            match operation {
                q::OperationDefinition::SelectionSet(selection_set) => {
                    let selection_set = self.selection_set(selection_set);
                    let loc = selection_set.loc;

                    return OperationDefinition {
                        loc,
                        ..OperationDefinition::new(OperationType::Query, selection_set)
                    };
                }
                q::OperationDefinition::Query(query) => (
                    OperationType::Query,
                    query.position,
                    &query.name,
                    &query.variable_definitions,
                    &query.directives,
                    &query.selection_set,
                ),
                q::OperationDefinition::Mutation(mutation) => (
                    OperationType::Mutation,
                    mutation.position,
                    &mutation.name,
                    &mutation.variable_definitions,
                    &mutation.directives,
                    &mutation.selection_set,
                ),
                q::OperationDefinition::Subscription(subscription) => (
                    OperationType::Subscription,
                    subscription.position,
                    &subscription.name,
                    &subscription.variable_definitions,
                    &subscription.directives,
                    &subscription.selection_set,
                ),
            };

        let selection_set = self.selection_set(selection_set);

        OperationDefinition {
            operation: operation_type,
            name: name.as_deref().map(|name| self.name(name)),
            variable_definitions: variable_definitions
                .iter()
                .map(|definition| self.variable_definition(definition))
                .collect(),
            directives: self.directives(directives),
            loc: self.loc(position, &[selection_set.loc]),
            selection_set,
        }
    }

    fn variable_definition(
        &self,
        definition: &q::VariableDefinition<'_, String>,
    ) -> VariableDefinition {
        VariableDefinition {
            variable: Variable::new(self.name(&definition.name)),
            type_: self.type_ref(&definition.var_type),
            default_value: definition
                .default_value
                .as_ref()
                .map(|value| self.value(value)),
            directives: vec![],
            loc: self.loc(definition.position, &[]),
        }
    }

    fn selection_set(&self, selection_set: &q::SelectionSet<'_, String>) -> SelectionSet {
        let (open, close) = selection_set.span;

        SelectionSet {
            selections: selection_set
                .items
                .iter()
                .map(|selection| self.selection(selection))
                .collect(),
            loc: self.index.as_ref().map(|index| Location {
                start: index.offset(open),
                end: (index.offset(close) + 1).min(index.source.len()),
                line: open.line,
                column: open.column,
            }),
        }
    }

    fn selection(&self, selection: &q::Selection<'_, String>) -> Selection {
        match selection {
            q::Selection::Field(field) => {
                let selection_set = if field.selection_set.items.is_empty() {
                    None
                } else {
                    Some(self.selection_set(&field.selection_set))
                };
                let directives = self.directives(&field.directives);
                let mut children = vec![selection_set.as_ref().and_then(|set| set.loc)];
                children.extend(directives.iter().map(|directive| directive.loc));

                Selection::Field(Field {
                    alias: field.alias.as_deref().map(|alias| self.name(alias)),
                    name: self.name(&field.name),
                    arguments: self.arguments(&field.arguments),
                    loc: self.loc(field.position, &children),
                    directives,
                    selection_set,
                })
            }
            q::Selection::FragmentSpread(spread) => {
                let directives = self.directives(&spread.directives);
                let children: Vec<_> = directives.iter().map(|directive| directive.loc).collect();

                Selection::FragmentSpread(FragmentSpread {
                    name: self.name(&spread.fragment_name),
                    loc: self.loc(spread.position, &children),
                    directives,
                })
            }
            q::Selection::InlineFragment(fragment) => {
                let selection_set = self.selection_set(&fragment.selection_set);

                let position = match &self.index {
                    Some(index) => index.spread_start(fragment.position),
                    None => fragment.position,
                };

                Selection::InlineFragment(InlineFragment {
                    type_condition: fragment
                        .type_condition
                        .as_ref()
                        .map(|q::TypeCondition::On(name)| NamedType::new(self.name(name))),
                    directives: self.directives(&fragment.directives),
                    loc: self.loc(position, &[selection_set.loc]),
                    selection_set,
                })
            }
        }
    }

    fn fragment(&self, fragment: &q::FragmentDefinition<'_, String>) -> FragmentDefinition {
        let q::TypeCondition::On(type_condition) = &fragment.type_condition;
        let selection_set = self.selection_set(&fragment.selection_set);

        FragmentDefinition {
            name: self.name(&fragment.name),
            type_condition: NamedType::new(self.name(type_condition)),
            directives: self.directives(&fragment.directives),
            loc: self.loc(fragment.position, &[selection_set.loc]),
            selection_set,
        }
    }

    fn arguments(&self, arguments: &[(String, q::Value<'_, String>)]) -> Vec<Argument> {
        arguments
            .iter()
            .map(|(name, value)| Argument::new(self.name(name), self.value(value)))
            .collect()
    }

    fn directives(&self, directives: &[q::Directive<'_, String>]) -> Vec<Directive> {
        directives
            .iter()
            .map(|directive| Directive {
                name: self.name(&directive.name),
                arguments: self.arguments(&directive.arguments),
                loc: self.loc(directive.position, &[]),
            })
            .collect()
    }

    fn value(&self, value: &q::Value<'_, String>) -> Value {
        match value {
            q::Value::Variable(name) => Variable::new(self.name(name)).into(),
            q::Value::Int(number) => IntValue::from(number.as_i64().unwrap_or_default()).into(),
            q::Value::Float(number) => FloatValue::from_f64(*number).into(),
            q::Value::String(value) => StringValue::new(value.clone()).into(),
            q::Value::Boolean(value) => BooleanValue::new(*value).into(),
            q::Value::Null => NullValue::new().into(),
            q::Value::Enum(value) => EnumValue::from_parsed(value.clone()).into(),
            q::Value::List(values) => {
                ListValue::new(values.iter().map(|value| self.value(value)).collect()).into()
            }
            q::Value::Object(fields) => ObjectValue::new(
                fields
                    .iter()
                    .map(|(name, value)| ObjectField::new(self.name(name), self.value(value)))
                    .collect(),
            )
            .into(),
        }
    }

    fn type_ref(&self, type_: &q::Type<'_, String>) -> Type {
        match type_ {
            q::Type::NamedType(name) => NamedType::new(self.name(name)).into(),
            q::Type::ListType(inner) => ListType::new(self.type_ref(inner)).into(),
            q::Type::NonNullType(inner) => Type::NonNull(NonNullType {
                type_: Box::new(self.type_ref(inner)),
                loc: None,
            }),
        }
    }

    fn description(&self, description: &Option<String>) -> Option<StringValue> {
        description.as_ref().map(|value| StringValue::new(value.clone()))
    }

    fn named_types(&self, names: &[String]) -> Vec<NamedType> {
        names
            .iter()
            .map(|name| NamedType::new(self.name(name)))
            .collect()
    }

    fn type_system_definition(
        &self,
        definition: &s::Definition<'_, String>,
    ) -> Result<Definition, AstError> {
        let definition = match definition {
            s::Definition::SchemaDefinition(schema) => {
                let operation_types = [
                    (OperationType::Query, &schema.query),
                    (OperationType::Mutation, &schema.mutation),
                    (OperationType::Subscription, &schema.subscription),
                ]
                .into_iter()
                .filter_map(|(operation, name)| {
                    name.as_deref().map(|name| {
                        OperationTypeDefinition::new(operation, NamedType::new(self.name(name)))
                    })
                })
                .collect();

                Definition::Schema(SchemaDefinition {
                    directives: self.directives(&schema.directives),
                    operation_types,
                    loc: self.loc(schema.position, &[]),
                })
            }
            s::Definition::TypeDefinition(type_definition) => self.type_definition(type_definition),
            s::Definition::DirectiveDefinition(directive) => {
                Definition::Directive(DirectiveDefinition {
                    description: self.description(&directive.description),
                    name: self.name(&directive.name),
                    arguments: self.input_values(&directive.arguments),
                    repeatable: directive.repeatable,
                    locations: directive
                        .locations
                        .iter()
                        .map(|location| self.name(location.as_str()))
                        .collect(),
                    loc: self.loc(directive.position, &[]),
                })
            }
            s::Definition::TypeExtension(extension) => {
                let name = match extension {
                    s::TypeExtension::Scalar(scalar) => &scalar.name,
                    s::TypeExtension::Object(object) => &object.name,
                    s::TypeExtension::Interface(interface) => &interface.name,
                    s::TypeExtension::Union(union) => &union.name,
                    s::TypeExtension::Enum(enum_) => &enum_.name,
                    s::TypeExtension::InputObject(input) => &input.name,
                };

                return Err(AstError::UnsupportedExtension(name.clone()));
            }
        };

        Ok(definition)
    }

    fn type_definition(&self, definition: &s::TypeDefinition<'_, String>) -> Definition {
        match definition {
            s::TypeDefinition::Scalar(scalar) => Definition::Scalar(ScalarTypeDefinition {
                description: self.description(&scalar.description),
                name: self.name(&scalar.name),
                directives: self.directives(&scalar.directives),
                loc: self.loc(scalar.position, &[]),
            }),
            s::TypeDefinition::Object(object) => Definition::Object(ObjectTypeDefinition {
                description: self.description(&object.description),
                name: self.name(&object.name),
                interfaces: self.named_types(&object.implements_interfaces),
                directives: self.directives(&object.directives),
                fields: self.fields(&object.fields),
                loc: self.loc(object.position, &[]),
            }),
            s::TypeDefinition::Interface(interface) => {
                Definition::Interface(InterfaceTypeDefinition {
                    description: self.description(&interface.description),
                    name: self.name(&interface.name),
                    interfaces: self.named_types(&interface.implements_interfaces),
                    directives: self.directives(&interface.directives),
                    fields: self.fields(&interface.fields),
                    loc: self.loc(interface.position, &[]),
                })
            }
            s::TypeDefinition::Union(union) => Definition::Union(UnionTypeDefinition {
                description: self.description(&union.description),
                name: self.name(&union.name),
                directives: self.directives(&union.directives),
                types: self.named_types(&union.types),
                loc: self.loc(union.position, &[]),
            }),
            s::TypeDefinition::Enum(enum_) => Definition::Enum(EnumTypeDefinition {
                description: self.description(&enum_.description),
                name: self.name(&enum_.name),
                directives: self.directives(&enum_.directives),
                values: enum_
                    .values
                    .iter()
                    .map(|value| EnumValueDefinition {
                        description: self.description(&value.description),
                        name: self.name(&value.name),
                        directives: self.directives(&value.directives),
                        loc: self.loc(value.position, &[]),
                    })
                    .collect(),
                loc: self.loc(enum_.position, &[]),
            }),
            s::TypeDefinition::InputObject(input) => {
                Definition::InputObject(InputObjectTypeDefinition {
                    description: self.description(&input.description),
                    name: self.name(&input.name),
                    directives: self.directives(&input.directives),
                    fields: self.input_values(&input.fields),
                    loc: self.loc(input.position, &[]),
                })
            }
        }
    }

    fn fields(&self, fields: &[s::Field<'_, String>]) -> Vec<FieldDefinition> {
        fields
            .iter()
            .map(|field| FieldDefinition {
                description: self.description(&field.description),
                name: self.name(&field.name),
                arguments: self.input_values(&field.arguments),
                type_: self.type_ref(&field.field_type),
                directives: self.directives(&field.directives),
                loc: self.loc(field.position, &[]),
            })
            .collect()
    }

    fn input_values(&self, values: &[s::InputValue<'_, String>]) -> Vec<InputValueDefinition> {
        values
            .iter()
            .map(|value| InputValueDefinition {
                description: self.description(&value.description),
                name: self.name(&value.name),
                type_: self.type_ref(&value.value_type),
                default_value: value.default_value.as_ref().map(|value| self.value(value)),
                directives: self.directives(&value.directives),
                loc: self.loc(value.position, &[]),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowers_operations_and_fragments() {
        let document = parse_query(
            "query Hero($episode: Episode = JEDI) {
              hero(episode: $episode) @include(if: true) { ...HeroName }
            }
            fragment HeroName on Character { name }",
        )
        .unwrap();

        assert_eq!(document.definitions().len(), 2);

        let operation = document.operations().next().unwrap();
        assert_eq!(operation.operation(), OperationType::Query);
        assert_eq!(operation.name().map(Name::value), Some("Hero"));

        let variable = &operation.variable_definitions()[0];
        assert_eq!(variable.variable().name().value(), "episode");
        assert_eq!(
            variable.default_value(),
            Some(&Value::Enum(EnumValue::new("JEDI").unwrap()))
        );

        let Selection::Field(hero) = &operation.selection_set().selections()[0] else {
            panic!("expected a field");
        };
        assert_eq!(hero.directives()[0].name().value(), "include");
        assert!(matches!(
            hero.selection_set().unwrap().selections()[0],
            Selection::FragmentSpread(_)
        ));

        let fragment = document.fragments().next().unwrap();
        assert_eq!(fragment.type_condition().name().value(), "Character");
    }

    #[test]
    fn computes_byte_locations() {
        let source = "{\n  hero { name }\n}";
        let document = parse_query(source).unwrap();
        let operation = document.operations().next().unwrap();
        let selection_set = operation.selection_set();

        assert_eq!(
            selection_set.loc(),
            Some(Location {
                start: 0,
                end: source.len(),
                line: 1,
                column: 1
            })
        );

        let Selection::Field(hero) = &selection_set.selections()[0] else {
            panic!("expected a field");
        };
        let loc = hero.loc().unwrap();
        assert_eq!((loc.line, loc.column, loc.start), (2, 3, 4));
        assert_eq!(&source[loc.start..loc.end], "hero { name }");
    }

    #[test]
    fn inline_fragments_start_at_the_spread() {
        let source = "{\n  ... on Q { a }\n  ...   @skip(if: true) { b }\n}";
        let document = parse_query(source).unwrap();
        let selections = document.operations().next().unwrap().selection_set().selections();

        let starts: Vec<_> = selections
            .iter()
            .map(|selection| {
                let Selection::InlineFragment(fragment) = selection else {
                    panic!("expected an inline fragment");
                };
                let loc = fragment.loc().unwrap();
                (loc.line, loc.column, &source[loc.start..loc.end])
            })
            .collect();

        assert_eq!(
            starts,
            vec![
                (2, 3, "... on Q { a }"),
                (3, 3, "...   @skip(if: true) { b }"),
            ]
        );
    }

    #[test]
    fn no_location_option_strips_locations() {
        let document =
            parse_query_with_options("{ a }", ParseOptions::default().no_location(true)).unwrap();

        assert_eq!(document.loc(), None);
        assert_eq!(document.operations().next().unwrap().loc(), None);
    }

    #[test]
    fn reports_syntax_errors() {
        let error = parse_query("{ a ").unwrap_err();

        assert!(matches!(error, SyntaxError::Parse(_)));
        assert!(error.to_string().starts_with("Syntax Error:"));
    }

    #[test]
    fn lowers_schema_documents() {
        let document = parse_schema(
            "schema { query: Root }
            \"The root\"
            type Root implements Node { id: ID! list(first: Int = 10): [String] }
            interface Node { id: ID! }
            directive @cached(ttl: Int) repeatable on FIELD_DEFINITION | OBJECT",
        )
        .unwrap();

        let kinds: Vec<_> = document
            .definitions()
            .iter()
            .map(|definition| definition.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                Kind::SchemaDefinition,
                Kind::ObjectTypeDefinition,
                Kind::InterfaceTypeDefinition,
                Kind::DirectiveDefinition
            ]
        );

        let Definition::Object(root) = &document.definitions()[1] else {
            panic!("expected an object type");
        };
        assert_eq!(root.description().map(StringValue::value), Some("The root"));
        assert_eq!(root.interfaces()[0].name().value(), "Node");
        assert_eq!(root.fields()[1].arguments()[0].name().value(), "first");

        let Definition::Directive(cached) = &document.definitions()[3] else {
            panic!("expected a directive definition");
        };
        assert!(cached.repeatable());
        let locations: Vec<_> = cached.locations().iter().map(Name::value).collect();
        assert_eq!(locations, vec!["FIELD_DEFINITION", "OBJECT"]);
    }

    #[test]
    fn rejects_type_extensions() {
        let error = parse_schema("type Query { a: Int } extend type Query { b: Int }").unwrap_err();

        assert_eq!(
            error,
            SyntaxError::Ast(AstError::UnsupportedExtension("Query".to_string()))
        );
    }
}
