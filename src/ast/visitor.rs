//! Depth-first traversal over the node model with enter/leave hooks.
//!
//! Children are visited in grammar order. Edits made by the hooks are applied copy on
//! write: a parent is only rebuilt when one of its children changed, unchanged subtrees
//! are never cloned.

use thiserror::Error;
use tracing::trace;

use super::node::*;

/// What the walker should do after a hook ran.
#[derive(Debug, Clone, PartialEq)]
pub enum VisitAction {
    Continue,
    /// Don't descend into the node. `leave` is not called for it.
    SkipSubtree,
    /// Abort the walk. The original root is returned unchanged.
    Stop,
    /// Substitute the node. The replacement is not visited.
    Replace(Node),
    /// Remove the node from its parent.
    Delete,
}

/// One ancestor step: `parent` holds the next node under `key` (at `index` for lists).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment<'a> {
    pub parent: NodeRef<'a>,
    pub key: &'static str,
    pub index: Option<usize>,
}

pub trait Visitor<'a> {
    type Error;

    fn enter(
        &mut self,
        _node: NodeRef<'a>,
        _path: &[PathSegment<'a>],
    ) -> Result<VisitAction, Self::Error> {
        Ok(VisitAction::Continue)
    }

    /// Receives the node with its children already rebuilt.
    fn leave(
        &mut self,
        _node: NodeRef<'_>,
        _path: &[PathSegment<'a>],
    ) -> Result<VisitAction, Self::Error> {
        Ok(VisitAction::Continue)
    }

    /// Called, innermost first, for every entered node whose `leave` will never run
    /// because the walk was aborted below it.
    fn abandon(&mut self, _node: NodeRef<'a>, _path: &[PathSegment<'a>]) {}
}

#[derive(Debug, Error, PartialEq)]
pub enum VisitError<E> {
    #[error(transparent)]
    Callback(E),
    #[error("invalid edit of \"{key}\" in a {parent}")]
    InvalidEdit {
        parent: Kind,
        key: &'static str,
        found: Option<Kind>,
    },
}

/// Visits `root` and returns it rebuilt with the hooks' edits, `None` if it was deleted.
pub fn visit<'a, V: Visitor<'a>>(
    root: &'a Node,
    visitor: &mut V,
) -> Result<Option<Node>, VisitError<V::Error>> {
    match Walker::new(visitor).walk_node(root.as_ref()) {
        Ok(Edit::Keep) => Ok(Some(root.clone())),
        Ok(Edit::Replace(node)) => Ok(Some(node)),
        Ok(Edit::Delete) => Ok(None),
        Err(abort) => abort.into_result(|| Some(root.clone())),
    }
}

/// Like [`visit`] for documents. Deleting or retyping the document is an invalid edit.
pub fn visit_document<'a, V: Visitor<'a>>(
    document: &'a Document,
    visitor: &mut V,
) -> Result<Document, VisitError<V::Error>> {
    let invalid = |found: Option<Kind>| VisitError::InvalidEdit {
        parent: Kind::Document,
        key: "document",
        found,
    };

    match Walker::new(visitor).walk_node(document.as_node_ref()) {
        Ok(Edit::Keep) => Ok(document.clone()),
        Ok(Edit::Replace(node)) => Document::try_from(node).map_err(|node| invalid(Some(node.kind()))),
        Ok(Edit::Delete) => Err(invalid(None)),
        Err(abort) => abort.into_result(|| document.clone()),
    }
}

/// Visits without producing a result tree. Edits returned by the hooks are still checked.
pub fn walk<'a, V: Visitor<'a>>(
    root: NodeRef<'a>,
    visitor: &mut V,
) -> Result<(), VisitError<V::Error>> {
    match Walker::new(visitor).walk_node(root) {
        Ok(_) => Ok(()),
        Err(abort) => abort.into_result(|| ()),
    }
}

enum Edit {
    Keep,
    Replace(Node),
    Delete,
}

enum Abort<E> {
    Stop,
    Failed(VisitError<E>),
}

impl<E> Abort<E> {
    fn into_result<T>(self, original: impl FnOnce() -> T) -> Result<T, VisitError<E>> {
        match self {
            Abort::Stop => Ok(original()),
            Abort::Failed(error) => Err(error),
        }
    }
}

fn invalid_edit<E>(parent: NodeRef<'_>, key: &'static str, found: Option<Kind>) -> Abort<E> {
    Abort::Failed(VisitError::InvalidEdit {
        parent: parent.kind(),
        key,
        found,
    })
}

struct Walker<'v, 'a, V: Visitor<'a>> {
    visitor: &'v mut V,
    path: Vec<PathSegment<'a>>,
}

/// Walks the listed children of `$node` and rebuilds it when any of them changed.
/// Each child is walked by `one`, `optional`, `many` or `boxed` depending on its slot.
macro_rules! rebuild {
    (@key $field:ident) => { stringify!($field) };
    (@key $field:ident $key:literal) => { $key };
    ($walker:ident, $node:ident, $ty:ident {
        $($field:ident $(as $key:literal)?: $how:ident),* $(,)?
    } $(keep { $($kept:ident),* })?) => {{
        let parent = NodeRef::$ty($node);
        $(let $field = $walker.$how(parent, rebuild!(@key $field $($key)?), &$node.$field)?;)*

        if true $(&& $field.is_none())* {
            None
        } else {
            Some(Node::$ty($ty {
                $($field: $field.unwrap_or_else(|| $node.$field.clone()),)*
                $($($kept: $node.$kept.clone(),)*)?
                loc: $node.loc,
            }))
        }
    }};
}

impl<'v, 'a, V: Visitor<'a>> Walker<'v, 'a, V> {
    fn new(visitor: &'v mut V) -> Self {
        Walker {
            visitor,
            path: vec![],
        }
    }

    fn walk_node(&mut self, node: NodeRef<'a>) -> Result<Edit, Abort<V::Error>> {
        let action = self
            .visitor
            .enter(node, &self.path)
            .map_err(|error| Abort::Failed(VisitError::Callback(error)))?;

        match action {
            VisitAction::Continue => {}
            VisitAction::SkipSubtree => return Ok(Edit::Keep),
            VisitAction::Stop => {
                trace!(kind = %node.kind(), "visit stopped on enter");
                return Err(Abort::Stop);
            }
            VisitAction::Replace(replacement) => return Ok(Edit::Replace(replacement)),
            VisitAction::Delete => return Ok(Edit::Delete),
        }

        let rebuilt = match self.walk_children(node) {
            Ok(rebuilt) => rebuilt,
            Err(abort) => {
                self.visitor.abandon(node, &self.path);
                return Err(abort);
            }
        };

        let action = match &rebuilt {
            Some(rebuilt) => self.visitor.leave(rebuilt.as_ref(), &self.path),
            None => self.visitor.leave(node, &self.path),
        }
        .map_err(|error| Abort::Failed(VisitError::Callback(error)))?;

        match action {
            VisitAction::Continue | VisitAction::SkipSubtree => {
                Ok(rebuilt.map(Edit::Replace).unwrap_or(Edit::Keep))
            }
            VisitAction::Stop => {
                trace!(kind = %node.kind(), "visit stopped on leave");
                Err(Abort::Stop)
            }
            VisitAction::Replace(replacement) => Ok(Edit::Replace(replacement)),
            VisitAction::Delete => Ok(Edit::Delete),
        }
    }

    fn descend(
        &mut self,
        parent: NodeRef<'a>,
        key: &'static str,
        index: Option<usize>,
        child: NodeRef<'a>,
    ) -> Result<Edit, Abort<V::Error>> {
        self.path.push(PathSegment { parent, key, index });
        let edit = self.walk_node(child);
        self.path.pop();

        edit
    }

    fn one<T: AstNode>(
        &mut self,
        parent: NodeRef<'a>,
        key: &'static str,
        child: &'a T,
    ) -> Result<Option<T>, Abort<V::Error>> {
        match self.descend(parent, key, None, child.as_node_ref())? {
            Edit::Keep => Ok(None),
            Edit::Replace(node) => T::try_from(node)
                .map(Some)
                .map_err(|node| invalid_edit(parent, key, Some(node.kind()))),
            Edit::Delete => Err(invalid_edit(parent, key, None)),
        }
    }

    fn boxed<T: AstNode>(
        &mut self,
        parent: NodeRef<'a>,
        key: &'static str,
        child: &'a Box<T>,
    ) -> Result<Option<Box<T>>, Abort<V::Error>> {
        Ok(self.one(parent, key, &**child)?.map(Box::new))
    }

    fn optional<T: AstNode>(
        &mut self,
        parent: NodeRef<'a>,
        key: &'static str,
        child: &'a Option<T>,
    ) -> Result<Option<Option<T>>, Abort<V::Error>> {
        let Some(child) = child else {
            return Ok(None);
        };

        match self.descend(parent, key, None, child.as_node_ref())? {
            Edit::Keep => Ok(None),
            Edit::Replace(node) => T::try_from(node)
                .map(|node| Some(Some(node)))
                .map_err(|node| invalid_edit(parent, key, Some(node.kind()))),
            Edit::Delete => Ok(Some(None)),
        }
    }

    fn many<T: AstNode>(
        &mut self,
        parent: NodeRef<'a>,
        key: &'static str,
        children: &'a Vec<T>,
    ) -> Result<Option<Vec<T>>, Abort<V::Error>> {
        let mut rebuilt: Option<Vec<T>> = None;

        for (index, child) in children.iter().enumerate() {
            match self.descend(parent, key, Some(index), child.as_node_ref())? {
                Edit::Keep => {
                    if let Some(items) = rebuilt.as_mut() {
                        items.push(child.clone());
                    }
                }
                Edit::Replace(node) => {
                    let item = T::try_from(node)
                        .map_err(|node| invalid_edit(parent, key, Some(node.kind())))?;
                    rebuilt
                        .get_or_insert_with(|| children[..index].to_vec())
                        .push(item);
                }
                Edit::Delete => {
                    rebuilt.get_or_insert_with(|| children[..index].to_vec());
                }
            }
        }

        Ok(rebuilt)
    }

    fn walk_children(&mut self, node: NodeRef<'a>) -> Result<Option<Node>, Abort<V::Error>> {
        let walker = self;

        let rebuilt = match node {
            NodeRef::Name(_)
            | NodeRef::IntValue(_)
            | NodeRef::FloatValue(_)
            | NodeRef::StringValue(_)
            | NodeRef::BooleanValue(_)
            | NodeRef::NullValue(_)
            | NodeRef::EnumValue(_) => None,
            NodeRef::Document(node) => rebuild!(walker, node, Document {
                definitions: many,
            }),
            NodeRef::OperationDefinition(node) => rebuild!(walker, node, OperationDefinition {
                name: optional,
                variable_definitions: many,
                directives: many,
                selection_set: one,
            } keep { operation }),
            NodeRef::VariableDefinition(node) => rebuild!(walker, node, VariableDefinition {
                variable: one,
                type_ as "type": one,
                default_value: optional,
                directives: many,
            }),
            NodeRef::Variable(node) => rebuild!(walker, node, Variable { name: one }),
            NodeRef::SelectionSet(node) => rebuild!(walker, node, SelectionSet {
                selections: many,
            }),
            NodeRef::Field(node) => rebuild!(walker, node, Field {
                alias: optional,
                name: one,
                arguments: many,
                directives: many,
                selection_set: optional,
            }),
            NodeRef::Argument(node) => rebuild!(walker, node, Argument {
                name: one,
                value: one,
            }),
            NodeRef::FragmentSpread(node) => rebuild!(walker, node, FragmentSpread {
                name: one,
                directives: many,
            }),
            NodeRef::InlineFragment(node) => rebuild!(walker, node, InlineFragment {
                type_condition: optional,
                directives: many,
                selection_set: one,
            }),
            NodeRef::FragmentDefinition(node) => rebuild!(walker, node, FragmentDefinition {
                name: one,
                type_condition: one,
                directives: many,
                selection_set: one,
            }),
            NodeRef::ListValue(node) => rebuild!(walker, node, ListValue { values: many }),
            NodeRef::ObjectValue(node) => rebuild!(walker, node, ObjectValue { fields: many }),
            NodeRef::ObjectField(node) => rebuild!(walker, node, ObjectField {
                name: one,
                value: one,
            }),
            NodeRef::Directive(node) => rebuild!(walker, node, Directive {
                name: one,
                arguments: many,
            }),
            NodeRef::NamedType(node) => rebuild!(walker, node, NamedType { name: one }),
            NodeRef::ListType(node) => rebuild!(walker, node, ListType {
                type_ as "type": boxed,
            }),
            NodeRef::NonNullType(node) => rebuild!(walker, node, NonNullType {
                type_ as "type": boxed,
            }),
            NodeRef::SchemaDefinition(node) => rebuild!(walker, node, SchemaDefinition {
                directives: many,
                operation_types: many,
            }),
            NodeRef::OperationTypeDefinition(node) => {
                rebuild!(walker, node, OperationTypeDefinition {
                    type_ as "type": one,
                } keep { operation })
            }
            NodeRef::ScalarTypeDefinition(node) => rebuild!(walker, node, ScalarTypeDefinition {
                description: optional,
                name: one,
                directives: many,
            }),
            NodeRef::ObjectTypeDefinition(node) => rebuild!(walker, node, ObjectTypeDefinition {
                description: optional,
                name: one,
                interfaces: many,
                directives: many,
                fields: many,
            }),
            NodeRef::FieldDefinition(node) => rebuild!(walker, node, FieldDefinition {
                description: optional,
                name: one,
                arguments: many,
                type_ as "type": one,
                directives: many,
            }),
            NodeRef::InputValueDefinition(node) => rebuild!(walker, node, InputValueDefinition {
                description: optional,
                name: one,
                type_ as "type": one,
                default_value: optional,
                directives: many,
            }),
            NodeRef::InterfaceTypeDefinition(node) => {
                rebuild!(walker, node, InterfaceTypeDefinition {
                    description: optional,
                    name: one,
                    interfaces: many,
                    directives: many,
                    fields: many,
                })
            }
            NodeRef::UnionTypeDefinition(node) => rebuild!(walker, node, UnionTypeDefinition {
                description: optional,
                name: one,
                directives: many,
                types: many,
            }),
            NodeRef::EnumTypeDefinition(node) => rebuild!(walker, node, EnumTypeDefinition {
                description: optional,
                name: one,
                directives: many,
                values: many,
            }),
            NodeRef::EnumValueDefinition(node) => rebuild!(walker, node, EnumValueDefinition {
                description: optional,
                name: one,
                directives: many,
            }),
            NodeRef::InputObjectTypeDefinition(node) => {
                rebuild!(walker, node, InputObjectTypeDefinition {
                    description: optional,
                    name: one,
                    directives: many,
                    fields: many,
                })
            }
            NodeRef::DirectiveDefinition(node) => rebuild!(walker, node, DirectiveDefinition {
                description: optional,
                name: one,
                arguments: many,
                locations: many,
            } keep { repeatable }),
        };

        Ok(rebuilt)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::ast::{parse_query_with_options, print, ParseOptions};

    fn parse(source: &str) -> Document {
        parse_query_with_options(source, ParseOptions::default().no_location(true)).unwrap()
    }

    /// Records `enter:Kind`, `leave:Kind` and `abandon:Kind` events.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        stop_on_enter: Option<Kind>,
        fail_on_enter: Option<Kind>,
    }

    impl<'a> Visitor<'a> for Recorder {
        type Error = String;

        fn enter(
            &mut self,
            node: NodeRef<'a>,
            _path: &[PathSegment<'a>],
        ) -> Result<VisitAction, String> {
            self.events.push(format!("enter:{}", node.kind()));

            if self.fail_on_enter == Some(node.kind()) {
                return Err(format!("failed on {}", node.kind()));
            }

            if self.stop_on_enter == Some(node.kind()) {
                return Ok(VisitAction::Stop);
            }

            Ok(VisitAction::Continue)
        }

        fn leave(
            &mut self,
            node: NodeRef<'_>,
            _path: &[PathSegment<'a>],
        ) -> Result<VisitAction, String> {
            self.events.push(format!("leave:{}", node.kind()));
            Ok(VisitAction::Continue)
        }

        fn abandon(&mut self, node: NodeRef<'a>, _path: &[PathSegment<'a>]) {
            self.events.push(format!("abandon:{}", node.kind()));
        }
    }

    #[test]
    fn visits_in_grammar_order() {
        let document = parse("{ a: b(x: 1) @d { c } }");
        let mut recorder = Recorder::default();

        visit_document(&document, &mut recorder).unwrap();

        let entered: Vec<_> = recorder
            .events
            .iter()
            .filter_map(|event| event.strip_prefix("enter:"))
            .collect();
        assert_eq!(
            entered,
            vec![
                "Document",
                "OperationDefinition",
                "SelectionSet",
                "Field",
                "Name",
                "Name",
                "Argument",
                "Name",
                "IntValue",
                "Directive",
                "Name",
                "SelectionSet",
                "Field",
                "Name",
            ]
        );
        assert_eq!(recorder.events.last().map(String::as_str), Some("leave:Document"));
    }

    #[test]
    fn stop_returns_the_original_and_abandons_ancestors() {
        let document = parse("{ a { b } c }");
        let mut recorder = Recorder {
            stop_on_enter: Some(Kind::Name),
            ..Default::default()
        };

        let result = visit_document(&document, &mut recorder).unwrap();

        assert_eq!(result, document);
        assert_eq!(
            recorder.events,
            vec![
                "enter:Document",
                "enter:OperationDefinition",
                "enter:SelectionSet",
                "enter:Field",
                "enter:Name",
                "abandon:Field",
                "abandon:SelectionSet",
                "abandon:OperationDefinition",
                "abandon:Document",
            ]
        );
    }

    #[test]
    fn callback_errors_propagate() {
        let document = parse("{ a(x: 1) }");
        let mut recorder = Recorder {
            fail_on_enter: Some(Kind::IntValue),
            ..Default::default()
        };

        let error = visit_document(&document, &mut recorder).unwrap_err();

        assert_eq!(error, VisitError::Callback("failed on IntValue".to_string()));
        assert!(recorder.events.contains(&"abandon:Argument".to_string()));
        assert!(!recorder.events.iter().any(|event| event.starts_with("leave:Field")));
    }

    struct Editor;

    impl<'a> Visitor<'a> for Editor {
        type Error = Infallible;

        fn enter(
            &mut self,
            node: NodeRef<'a>,
            _path: &[PathSegment<'a>],
        ) -> Result<VisitAction, Infallible> {
            Ok(match node {
                NodeRef::Field(field) if field.name().value() == "secret" => VisitAction::Delete,
                NodeRef::Field(field) if field.name().value() == "skipped" => {
                    VisitAction::SkipSubtree
                }
                NodeRef::Name(name) if name.value() == "old" => {
                    VisitAction::Replace(Name::new("new").unwrap().into())
                }
                _ => VisitAction::Continue,
            })
        }

        fn leave(
            &mut self,
            node: NodeRef<'_>,
            _path: &[PathSegment<'a>],
        ) -> Result<VisitAction, Infallible> {
            match node {
                NodeRef::IntValue(value) if value.value() == "1" => {
                    Ok(VisitAction::Replace(IntValue::from(2_i64).into()))
                }
                _ => Ok(VisitAction::Continue),
            }
        }
    }

    #[test]
    fn applies_replace_and_delete() {
        let document = parse("{ old secret skipped { old } keep(n: 1) }");

        let edited = visit_document(&document, &mut Editor).unwrap();

        assert_eq!(print(&edited), "{\n  new\n  skipped {\n    old\n  }\n  keep(n: 2)\n}");
        assert_eq!(print(&document), "{\n  old\n  secret\n  skipped {\n    old\n  }\n  keep(n: 1)\n}");
    }

    #[test]
    fn rejects_incompatible_edits() {
        struct DeleteNames;

        impl<'a> Visitor<'a> for DeleteNames {
            type Error = Infallible;

            fn enter(
                &mut self,
                node: NodeRef<'a>,
                _path: &[PathSegment<'a>],
            ) -> Result<VisitAction, Infallible> {
                Ok(match node {
                    NodeRef::Name(_) => VisitAction::Delete,
                    _ => VisitAction::Continue,
                })
            }
        }

        let document = parse("{ a }");

        assert_eq!(
            visit_document(&document, &mut DeleteNames),
            Err(VisitError::InvalidEdit {
                parent: Kind::Field,
                key: "name",
                found: None,
            })
        );
    }

    #[test]
    fn reports_the_ancestor_path() {
        struct PathRecorder(Vec<String>);

        impl<'a> Visitor<'a> for PathRecorder {
            type Error = Infallible;

            fn enter(
                &mut self,
                node: NodeRef<'a>,
                path: &[PathSegment<'a>],
            ) -> Result<VisitAction, Infallible> {
                if let NodeRef::IntValue(_) = node {
                    self.0 = path
                        .iter()
                        .map(|segment| match segment.index {
                            Some(index) => format!("{}.{}[{}]", segment.parent.kind(), segment.key, index),
                            None => format!("{}.{}", segment.parent.kind(), segment.key),
                        })
                        .collect();
                }

                Ok(VisitAction::Continue)
            }
        }

        let document = parse("{ a b(x: 1) }");
        let mut recorder = PathRecorder(vec![]);
        walk(document.as_node_ref(), &mut recorder).unwrap();

        assert_eq!(
            recorder.0,
            vec![
                "Document.definitions[0]",
                "OperationDefinition.selection_set",
                "SelectionSet.selections[1]",
                "Field.arguments[0]",
                "Argument.value",
            ]
        );
    }

    #[test]
    fn deleting_the_root_yields_none() {
        struct DeleteAll;

        impl<'a> Visitor<'a> for DeleteAll {
            type Error = Infallible;

            fn enter(
                &mut self,
                _node: NodeRef<'a>,
                _path: &[PathSegment<'a>],
            ) -> Result<VisitAction, Infallible> {
                Ok(VisitAction::Delete)
            }
        }

        let node: Node = Name::new("x").unwrap().into();

        assert_eq!(visit(&node, &mut DeleteAll), Ok(None));
    }
}
