//! Schema-derived type context of the node being visited.

use super::node::NodeRef;
use crate::schema::{
    type_from_ast, FieldByNameExtension, Schema, TypeDefinitionExtension, TypeExtension,
};
use crate::static_graphql::schema::{
    self, DirectiveDefinition, EnumValue, InputValue, TypeDefinition,
};

/// Parallel stacks of type information, kept in step with the walk by calling
/// [`TypeInfo::enter`] and [`TypeInfo::leave`] for every node.
///
/// Each push made on enter is matched by one pop on leave of the same node. A `None` is
/// pushed when the value cannot be determined, so the stacks never drift.
#[derive(Debug, Clone)]
pub struct TypeInfo<'s> {
    schema: &'s Schema,
    type_stack: Vec<Option<schema::Type>>,
    parent_type_stack: Vec<Option<&'s TypeDefinition>>,
    input_type_stack: Vec<Option<schema::Type>>,
    field_def_stack: Vec<Option<&'s schema::Field>>,
    default_value_stack: Vec<Option<&'s schema::Value>>,
    directive: Option<&'s DirectiveDefinition>,
    argument: Option<&'s InputValue>,
    enum_value: Option<&'s EnumValue>,
}

impl<'s> TypeInfo<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        TypeInfo {
            schema,
            type_stack: vec![],
            parent_type_stack: vec![],
            input_type_stack: vec![],
            field_def_stack: vec![],
            default_value_stack: vec![],
            directive: None,
            argument: None,
            enum_value: None,
        }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Output type of the current position.
    pub fn get_type(&self) -> Option<&schema::Type> {
        self.type_stack.last().and_then(Option::as_ref)
    }

    /// Composite type owning the current selection set.
    pub fn get_parent_type(&self) -> Option<&'s TypeDefinition> {
        self.parent_type_stack.last().copied().flatten()
    }

    pub fn get_input_type(&self) -> Option<&schema::Type> {
        self.input_type_stack.last().and_then(Option::as_ref)
    }

    /// Input type one level up, e.g. the list type while inside one of its items.
    pub fn get_parent_input_type(&self) -> Option<&schema::Type> {
        let length = self.input_type_stack.len();

        if length < 2 {
            return None;
        }

        self.input_type_stack[length - 2].as_ref()
    }

    pub fn get_field_def(&self) -> Option<&'s schema::Field> {
        self.field_def_stack.last().copied().flatten()
    }

    pub fn get_default_value(&self) -> Option<&'s schema::Value> {
        self.default_value_stack.last().copied().flatten()
    }

    pub fn get_directive(&self) -> Option<&'s DirectiveDefinition> {
        self.directive
    }

    pub fn get_argument(&self) -> Option<&'s InputValue> {
        self.argument
    }

    pub fn get_enum_value(&self) -> Option<&'s EnumValue> {
        self.enum_value
    }

    /// True when every stack is back to empty and no directive, argument or enum value
    /// is current.
    pub fn is_balanced(&self) -> bool {
        self.type_stack.is_empty()
            && self.parent_type_stack.is_empty()
            && self.input_type_stack.is_empty()
            && self.field_def_stack.is_empty()
            && self.default_value_stack.is_empty()
            && self.directive.is_none()
            && self.argument.is_none()
            && self.enum_value.is_none()
    }

    fn output_type(&self, type_: schema::Type) -> Option<schema::Type> {
        self.schema.is_output_type(&type_).then(|| type_)
    }

    fn input_type(&self, type_: schema::Type) -> Option<schema::Type> {
        self.schema.is_input_type(&type_).then(|| type_)
    }

    pub fn enter(&mut self, node: NodeRef<'_>) {
        let schema = self.schema;

        match node {
            NodeRef::SelectionSet(_) => {
                let parent_type = self
                    .get_type()
                    .and_then(|type_| schema.named_type(type_))
                    .filter(|named| named.is_composite_type());

                self.parent_type_stack.push(parent_type);
            }
            NodeRef::Field(field) => {
                let field_def = self
                    .get_parent_type()
                    .and_then(|parent| schema.field_definition(parent, field.name().value()));
                let field_type =
                    field_def.and_then(|field_def| self.output_type(field_def.field_type.clone()));

                self.field_def_stack.push(field_def);
                self.type_stack.push(field_type);
            }
            NodeRef::Directive(directive) => {
                self.directive = schema.directive(directive.name().value());
            }
            NodeRef::OperationDefinition(operation) => {
                let root_type = schema
                    .root_type(operation.operation())
                    .map(|object| schema::Type::NamedType(object.name.clone()));

                self.type_stack.push(root_type);
            }
            NodeRef::InlineFragment(fragment) => {
                let condition_type = match fragment.type_condition() {
                    Some(condition) => {
                        Some(schema::Type::NamedType(condition.name().value().to_string()))
                    }
                    None => self
                        .get_type()
                        .map(|type_| schema::Type::NamedType(type_.inner_type().to_string())),
                };
                let condition_type = condition_type.and_then(|type_| self.output_type(type_));

                self.type_stack.push(condition_type);
            }
            NodeRef::FragmentDefinition(fragment) => {
                let condition_type = self.output_type(schema::Type::NamedType(
                    fragment.type_condition().name().value().to_string(),
                ));

                self.type_stack.push(condition_type);
            }
            NodeRef::VariableDefinition(definition) => {
                let input_type = self.input_type(type_from_ast(definition.type_()));

                self.input_type_stack.push(input_type);
            }
            NodeRef::Argument(argument) => {
                let name = argument.name().value();
                let arguments = match self.directive {
                    Some(directive) => Some(&directive.arguments),
                    None => self.get_field_def().map(|field_def| &field_def.arguments),
                };
                let definition =
                    arguments.and_then(|arguments| arguments.iter().find(|arg| arg.name == name));
                let input_type =
                    definition.and_then(|definition| self.input_type(definition.value_type.clone()));

                self.argument = definition;
                self.default_value_stack
                    .push(definition.and_then(|definition| definition.default_value.as_ref()));
                self.input_type_stack.push(input_type);
            }
            NodeRef::ListValue(_) => {
                let item_type = self.get_input_type().map(|input_type| match input_type.nullable() {
                    schema::Type::ListType(item_type) => (**item_type).clone(),
                    other => other.clone(),
                });
                let item_type = item_type.and_then(|type_| self.input_type(type_));

                self.default_value_stack.push(None);
                self.input_type_stack.push(item_type);
            }
            NodeRef::ObjectField(field) => {
                let input_field = self
                    .get_input_type()
                    .and_then(|input_type| schema.named_type(input_type))
                    .and_then(|named| named.input_field_by_name(field.name().value()));
                let field_type =
                    input_field.and_then(|input_field| self.input_type(input_field.value_type.clone()));

                self.default_value_stack
                    .push(input_field.and_then(|input_field| input_field.default_value.as_ref()));
                self.input_type_stack.push(field_type);
            }
            NodeRef::EnumValue(value) => {
                let enum_value = self
                    .get_input_type()
                    .and_then(|input_type| schema.named_type(input_type))
                    .and_then(|named| named.enum_value_by_name(value.value()));

                self.enum_value = enum_value;
            }
            _ => {}
        }
    }

    pub fn leave(&mut self, node: NodeRef<'_>) {
        match node {
            NodeRef::SelectionSet(_) => {
                self.parent_type_stack.pop();
            }
            NodeRef::Field(_) => {
                self.field_def_stack.pop();
                self.type_stack.pop();
            }
            NodeRef::Directive(_) => {
                self.directive = None;
            }
            NodeRef::OperationDefinition(_)
            | NodeRef::InlineFragment(_)
            | NodeRef::FragmentDefinition(_) => {
                self.type_stack.pop();
            }
            NodeRef::VariableDefinition(_) => {
                self.input_type_stack.pop();
            }
            NodeRef::Argument(_) => {
                self.argument = None;
                self.default_value_stack.pop();
                self.input_type_stack.pop();
            }
            NodeRef::ListValue(_) | NodeRef::ObjectField(_) => {
                self.default_value_stack.pop();
                self.input_type_stack.pop();
            }
            NodeRef::EnumValue(_) => {
                self.enum_value = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{parse_query, walk, AstNode, Kind, PathSegment, VisitAction, Visitor};
    use std::convert::Infallible;

    const SCHEMA: &str = "
        type Query { pet(filter: Filter, sizes: [Size!] = [SMALL]): Pet, pets: [Pet!]! }
        interface Pet { name(upper: Boolean = false): String }
        type Dog implements Pet { name(upper: Boolean = false): String, barks: Boolean }
        enum Size { SMALL LARGE }
        input Filter { size: Size = LARGE, tags: [String!] }
    ";

    /// Drives a bare `TypeInfo` and records a snapshot at every enter.
    struct Snapshots<'s> {
        type_info: TypeInfo<'s>,
        seen: Vec<String>,
    }

    impl<'a, 's> Visitor<'a> for Snapshots<'s> {
        type Error = Infallible;

        fn enter(
            &mut self,
            node: NodeRef<'a>,
            _path: &[PathSegment<'a>],
        ) -> Result<VisitAction, Infallible> {
            self.type_info.enter(node);

            let info = &self.type_info;
            self.seen.push(format!(
                "{} type={} parent={} input={} default={} enum={}",
                node.kind(),
                info.get_type().map(|t| t.to_type_string()).unwrap_or_default(),
                info.get_parent_type().map(|t| t.name()).unwrap_or_default(),
                info.get_input_type().map(|t| t.to_type_string()).unwrap_or_default(),
                info.get_default_value().is_some(),
                info.get_enum_value().map(|v| v.name.as_str()).unwrap_or_default(),
            ));

            Ok(VisitAction::Continue)
        }

        fn leave(
            &mut self,
            node: NodeRef<'_>,
            _path: &[PathSegment<'a>],
        ) -> Result<VisitAction, Infallible> {
            self.type_info.leave(node);

            Ok(VisitAction::Continue)
        }
    }

    fn snapshots(query: &str, kinds: &[Kind]) -> (Vec<String>, bool) {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = parse_query(query).unwrap();
        let mut visitor = Snapshots {
            type_info: TypeInfo::new(&schema),
            seen: vec![],
        };

        walk(document.as_node_ref(), &mut visitor).unwrap();

        let kinds = kinds.iter().map(|kind| kind.as_str()).collect::<Vec<_>>();
        let seen = visitor
            .seen
            .into_iter()
            .filter(|line| kinds.iter().any(|kind| line.starts_with(&format!("{} ", kind))))
            .collect();

        (seen, visitor.type_info.is_balanced())
    }

    #[test]
    fn tracks_output_and_parent_types() {
        let (seen, balanced) = snapshots(
            "{ pet { name ... on Dog { barks } ... { __typename } } pets { name } }",
            &[Kind::Field, Kind::InlineFragment, Kind::SelectionSet],
        );

        assert!(balanced);
        assert_eq!(
            seen,
            vec![
                "SelectionSet type=Query parent=Query input= default=false enum=",
                "Field type=Pet parent=Query input= default=false enum=",
                "SelectionSet type=Pet parent=Pet input= default=false enum=",
                "Field type=String parent=Pet input= default=false enum=",
                "InlineFragment type=Dog parent=Pet input= default=false enum=",
                "SelectionSet type=Dog parent=Dog input= default=false enum=",
                "Field type=Boolean parent=Dog input= default=false enum=",
                "InlineFragment type=Pet parent=Pet input= default=false enum=",
                "SelectionSet type=Pet parent=Pet input= default=false enum=",
                "Field type=String! parent=Pet input= default=false enum=",
                "Field type=[Pet!]! parent=Query input= default=false enum=",
                "SelectionSet type=[Pet!]! parent=Pet input= default=false enum=",
                "Field type=String parent=Pet input= default=false enum=",
            ]
        );
    }

    #[test]
    fn tracks_input_types_and_defaults() {
        let (seen, balanced) = snapshots(
            "query ($s: Size) { pet(filter: { size: SMALL, tags: [\"a\"] }, sizes: [LARGE, $s]) { name(upper: true) @skip(if: false) } }",
            &[
                Kind::VariableDefinition,
                Kind::Argument,
                Kind::ObjectField,
                Kind::ListValue,
                Kind::EnumValue,
            ],
        );

        assert!(balanced);
        assert_eq!(
            seen,
            vec![
                "VariableDefinition type=Query parent= input=Size default=false enum=",
                "Argument type=Pet parent=Query input=Filter default=false enum=",
                "ObjectField type=Pet parent=Query input=Size default=true enum=",
                "EnumValue type=Pet parent=Query input=Size default=true enum=SMALL",
                "ObjectField type=Pet parent=Query input=[String!] default=false enum=",
                "ListValue type=Pet parent=Query input=String! default=false enum=",
                "Argument type=Pet parent=Query input=[Size!] default=true enum=",
                "ListValue type=Pet parent=Query input=Size! default=false enum=",
                "EnumValue type=Pet parent=Query input=Size! default=false enum=LARGE",
                "Argument type=String parent=Pet input=Boolean default=true enum=",
                "Argument type=String parent=Pet input=Boolean! default=false enum=",
            ]
        );
    }

    #[test]
    fn unknown_names_push_nothing_known() {
        let (seen, balanced) = snapshots(
            "{ nope { deeper(arg: 1) } pet { ... on Unknown { name } } }",
            &[Kind::Field, Kind::Argument, Kind::InlineFragment],
        );

        assert!(balanced);
        assert_eq!(
            seen,
            vec![
                "Field type= parent=Query input= default=false enum=",
                "Field type= parent= input= default=false enum=",
                "Argument type= parent= input= default=false enum=",
                "Field type=Pet parent=Query input= default=false enum=",
                "InlineFragment type= parent=Pet input= default=false enum=",
                "Field type= parent= input= default=false enum=",
            ]
        );
    }

    /// Forwards every enter but drops the leaves of the given kinds.
    struct SkipsLeaves<'s> {
        type_info: TypeInfo<'s>,
        skipped: Vec<Kind>,
    }

    impl<'a, 's> Visitor<'a> for SkipsLeaves<'s> {
        type Error = Infallible;

        fn enter(
            &mut self,
            node: NodeRef<'a>,
            _path: &[PathSegment<'a>],
        ) -> Result<VisitAction, Infallible> {
            self.type_info.enter(node);

            Ok(VisitAction::Continue)
        }

        fn leave(
            &mut self,
            node: NodeRef<'_>,
            _path: &[PathSegment<'a>],
        ) -> Result<VisitAction, Infallible> {
            if !self.skipped.contains(&node.kind()) {
                self.type_info.leave(node);
            }

            Ok(VisitAction::Continue)
        }
    }

    fn balanced_after_walk(query: &str, skipped: Vec<Kind>) -> bool {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = parse_query(query).unwrap();
        let mut visitor = SkipsLeaves {
            type_info: TypeInfo::new(&schema),
            skipped,
        };

        walk(document.as_node_ref(), &mut visitor).unwrap();

        visitor.type_info.is_balanced()
    }

    #[test]
    fn balance_covers_directive_argument_and_enum_slots() {
        let query = "{ pet(filter: { size: SMALL }) { name @skip(if: false) } }";

        assert!(balanced_after_walk(query, vec![]));
        assert!(!balanced_after_walk(query, vec![Kind::Directive]));
        assert!(!balanced_after_walk(query, vec![Kind::EnumValue]));
    }
}
