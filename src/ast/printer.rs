//! Prints nodes back to GraphQL source text.

use super::node::*;

/// Prints any node or node category.
pub fn print<T: AstNode>(node: &T) -> String {
    print_node(node.as_node_ref())
}

pub fn print_node(node: NodeRef<'_>) -> String {
    match node {
        NodeRef::Name(name) => name.value().to_string(),
        NodeRef::Document(document) => document
            .definitions()
            .iter()
            .map(print)
            .collect::<Vec<_>>()
            .join("\n\n"),
        NodeRef::OperationDefinition(operation) => {
            let selection_set = print(operation.selection_set());
            let anonymous_query = operation.operation() == OperationType::Query
                && operation.name().is_none()
                && operation.variable_definitions().is_empty()
                && operation.directives().is_empty();

            if anonymous_query {
                return selection_set;
            }

            let name_and_variables = format!(
                "{}{}",
                operation.name().map(print).unwrap_or_default(),
                wrap("(", &print_list(operation.variable_definitions(), ", "), ")")
            );

            join(
                [
                    operation.operation().to_string(),
                    name_and_variables,
                    print_list(operation.directives(), " "),
                    selection_set,
                ],
                " ",
            )
        }
        NodeRef::VariableDefinition(definition) => format!(
            "{}: {}{}{}",
            print(definition.variable()),
            print(definition.type_()),
            wrap(" = ", &definition.default_value().map(print).unwrap_or_default(), ""),
            wrap(" ", &print_list(definition.directives(), " "), "")
        ),
        NodeRef::Variable(variable) => format!("${}", variable.name().value()),
        NodeRef::SelectionSet(selection_set) => block(selection_set.selections()),
        NodeRef::Field(field) => {
            let prefix = format!(
                "{}{}{}",
                wrap("", &field.alias().map(print).unwrap_or_default(), ": "),
                field.name().value(),
                wrap("(", &print_list(field.arguments(), ", "), ")")
            );

            join(
                [
                    prefix,
                    print_list(field.directives(), " "),
                    field.selection_set().map(print).unwrap_or_default(),
                ],
                " ",
            )
        }
        NodeRef::Argument(argument) => {
            format!("{}: {}", argument.name().value(), print(argument.value()))
        }
        NodeRef::FragmentSpread(spread) => format!(
            "...{}{}",
            spread.name().value(),
            wrap(" ", &print_list(spread.directives(), " "), "")
        ),
        NodeRef::InlineFragment(fragment) => join(
            [
                "...".to_string(),
                wrap(
                    "on ",
                    &fragment.type_condition().map(print).unwrap_or_default(),
                    "",
                ),
                print_list(fragment.directives(), " "),
                print(fragment.selection_set()),
            ],
            " ",
        ),
        NodeRef::FragmentDefinition(fragment) => format!(
            "fragment {} on {} {}{}",
            fragment.name().value(),
            print(fragment.type_condition()),
            wrap("", &print_list(fragment.directives(), " "), " "),
            print(fragment.selection_set())
        ),
        NodeRef::IntValue(value) => value.value().to_string(),
        NodeRef::FloatValue(value) => value.value().to_string(),
        NodeRef::StringValue(value) if value.is_block() => print_block_string(value.value()),
        NodeRef::StringValue(value) => serde_json::Value::String(value.value().to_string()).to_string(),
        NodeRef::BooleanValue(value) => value.value().to_string(),
        NodeRef::NullValue(_) => "null".to_string(),
        NodeRef::EnumValue(value) => value.value().to_string(),
        NodeRef::ListValue(list) => format!("[{}]", print_list(list.values(), ", ")),
        NodeRef::ObjectValue(object) => format!("{{{}}}", print_list(object.fields(), ", ")),
        NodeRef::ObjectField(field) => {
            format!("{}: {}", field.name().value(), print(field.value()))
        }
        NodeRef::Directive(directive) => format!(
            "@{}{}",
            directive.name().value(),
            wrap("(", &print_list(directive.arguments(), ", "), ")")
        ),
        NodeRef::NamedType(named) => named.name().value().to_string(),
        NodeRef::ListType(list) => format!("[{}]", print(list.type_())),
        NodeRef::NonNullType(non_null) => format!("{}!", print(non_null.type_())),
        NodeRef::SchemaDefinition(schema) => join(
            [
                "schema".to_string(),
                print_list(schema.directives(), " "),
                block(schema.operation_types()),
            ],
            " ",
        ),
        NodeRef::OperationTypeDefinition(definition) => {
            format!("{}: {}", definition.operation(), print(definition.type_()))
        }
        NodeRef::ScalarTypeDefinition(scalar) => with_description(
            scalar.description(),
            join(
                [
                    "scalar".to_string(),
                    scalar.name().value().to_string(),
                    print_list(scalar.directives(), " "),
                ],
                " ",
            ),
        ),
        NodeRef::ObjectTypeDefinition(object) => with_description(
            object.description(),
            join(
                [
                    "type".to_string(),
                    object.name().value().to_string(),
                    wrap("implements ", &print_list(object.interfaces(), " & "), ""),
                    print_list(object.directives(), " "),
                    block(object.fields()),
                ],
                " ",
            ),
        ),
        NodeRef::FieldDefinition(field) => with_description(
            field.description(),
            format!(
                "{}{}: {}{}",
                field.name().value(),
                print_arguments(field.arguments()),
                print(field.type_()),
                wrap(" ", &print_list(field.directives(), " "), "")
            ),
        ),
        NodeRef::InputValueDefinition(input) => with_description(
            input.description(),
            join(
                [
                    format!("{}: {}", input.name().value(), print(input.type_())),
                    wrap("= ", &input.default_value().map(print).unwrap_or_default(), ""),
                    print_list(input.directives(), " "),
                ],
                " ",
            ),
        ),
        NodeRef::InterfaceTypeDefinition(interface) => with_description(
            interface.description(),
            join(
                [
                    "interface".to_string(),
                    interface.name().value().to_string(),
                    wrap("implements ", &print_list(interface.interfaces(), " & "), ""),
                    print_list(interface.directives(), " "),
                    block(interface.fields()),
                ],
                " ",
            ),
        ),
        NodeRef::UnionTypeDefinition(union) => with_description(
            union.description(),
            join(
                [
                    "union".to_string(),
                    union.name().value().to_string(),
                    print_list(union.directives(), " "),
                    wrap("= ", &print_list(union.types(), " | "), ""),
                ],
                " ",
            ),
        ),
        NodeRef::EnumTypeDefinition(enum_) => with_description(
            enum_.description(),
            join(
                [
                    "enum".to_string(),
                    enum_.name().value().to_string(),
                    print_list(enum_.directives(), " "),
                    block(enum_.values()),
                ],
                " ",
            ),
        ),
        NodeRef::EnumValueDefinition(value) => with_description(
            value.description(),
            join(
                [
                    value.name().value().to_string(),
                    print_list(value.directives(), " "),
                ],
                " ",
            ),
        ),
        NodeRef::InputObjectTypeDefinition(input) => with_description(
            input.description(),
            join(
                [
                    "input".to_string(),
                    input.name().value().to_string(),
                    print_list(input.directives(), " "),
                    block(input.fields()),
                ],
                " ",
            ),
        ),
        NodeRef::DirectiveDefinition(directive) => with_description(
            directive.description(),
            format!(
                "directive @{}{}{} on {}",
                directive.name().value(),
                print_arguments(directive.arguments()),
                if directive.repeatable() { " repeatable" } else { "" },
                print_list(directive.locations(), " | ")
            ),
        ),
    }
}

fn print_list<T: AstNode>(nodes: &[T], separator: &str) -> String {
    join(nodes.iter().map(print), separator)
}

/// Joins the non-empty parts.
fn join(parts: impl IntoIterator<Item = String>, separator: &str) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Surrounds `inner` with `start` and `end`, or prints nothing when it is empty.
fn wrap(start: &str, inner: &str, end: &str) -> String {
    if inner.is_empty() {
        String::new()
    } else {
        format!("{}{}{}", start, inner, end)
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn block<T: AstNode>(nodes: &[T]) -> String {
    wrap("{\n", &indent(&print_list(nodes, "\n")), "\n}")
}

fn print_arguments(arguments: &[InputValueDefinition]) -> String {
    if arguments.iter().any(|argument| argument.description().is_some()) {
        wrap("(\n", &indent(&print_list(arguments, "\n")), "\n)")
    } else {
        wrap("(", &print_list(arguments, ", "), ")")
    }
}

fn with_description(description: Option<&StringValue>, definition: String) -> String {
    match description {
        Some(description) => format!("{}\n{}", print(description), definition),
        None => definition,
    }
}

fn print_block_string(value: &str) -> String {
    let escaped = value.replace("\"\"\"", "\\\"\"\"");

    if value.contains('\n') || value.ends_with('"') {
        format!("\"\"\"\n{}\n\"\"\"", escaped)
    } else {
        format!("\"\"\"{}\"\"\"", escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{parse_query_with_options, parse_schema_with_options, ParseOptions};

    fn no_location() -> ParseOptions {
        ParseOptions::default().no_location(true)
    }

    #[test]
    fn prints_query_documents() {
        let document = parse_query_with_options(
            "query Q($id: ID! = \"1\", $list: [Int!]) @live { a: node(id: $id, filter: {x: [1.5, ENUM, null]}) @skip(if: false) { ... on User { name } ...Frag } }
            fragment Frag on User @inline { friends(first: 10) }
            { plain }",
            no_location(),
        )
        .unwrap();

        assert_eq!(
            print(&document),
            r#"query Q($id: ID! = "1", $list: [Int!]) @live {
  a: node(id: $id, filter: {x: [1.5, ENUM, null]}) @skip(if: false) {
    ... on User {
      name
    }
    ...Frag
  }
}

fragment Frag on User @inline {
  friends(first: 10)
}

{
  plain
}"#
        );
    }

    #[test]
    fn prints_schema_documents() {
        let document = parse_schema_with_options(
            "schema { query: Root }
            \"Root type\"
            type Root implements Node & Entity @key { id: ID! items(first: Int = 10, after: String): [Item] }
            union Item = Root | Other
            enum Color { RED GREEN }
            input Filter { color: Color = RED }
            directive @key on OBJECT | INTERFACE",
            no_location(),
        )
        .unwrap();

        assert_eq!(
            print(&document),
            r#"schema {
  query: Root
}

"Root type"
type Root implements Node & Entity @key {
  id: ID!
  items(first: Int = 10, after: String): [Item]
}

union Item = Root | Other

enum Color {
  RED
  GREEN
}

input Filter {
  color: Color = RED
}

directive @key on OBJECT | INTERFACE"#
        );
    }

    #[test]
    fn escapes_strings() {
        assert_eq!(print(&StringValue::new("say \"hi\"\n")), r#""say \"hi\"\n""#);
        assert_eq!(print(&StringValue::block("line")), r#""""line""""#);
    }

    #[test]
    fn printing_round_trips() {
        let source = "mutation Like($story: ID!, $opts: Options = {notify: true, tags: [\"a\", \"b\"]}) {
          like(story: $story, weight: -2.5e3, count: 0) @include(if: $opts) {
            story { likers { count } ...on Story { id } }
          }
        }
        fragment F on Story { id }";
        let parsed = parse_query_with_options(source, no_location()).unwrap();
        let reparsed = parse_query_with_options(&print(&parsed), no_location()).unwrap();

        assert_eq!(parsed, reparsed);
    }
}
