use super::node::NodeRef;
use super::type_info::TypeInfo;
use super::visitor::{PathSegment, VisitAction, Visitor};

/// A visitor that reads the [`TypeInfo`] of the node it is called for.
pub trait TypeInfoAware<'a, 's> {
    type Error;

    fn enter(
        &mut self,
        _type_info: &TypeInfo<'s>,
        _node: NodeRef<'a>,
        _path: &[PathSegment<'a>],
    ) -> Result<VisitAction, Self::Error> {
        Ok(VisitAction::Continue)
    }

    fn leave(
        &mut self,
        _type_info: &TypeInfo<'s>,
        _node: NodeRef<'_>,
        _path: &[PathSegment<'a>],
    ) -> Result<VisitAction, Self::Error> {
        Ok(VisitAction::Continue)
    }

    fn abandon(&mut self, _type_info: &TypeInfo<'s>, _node: NodeRef<'a>, _path: &[PathSegment<'a>]) {}
}

/// Keeps a [`TypeInfo`] in step with the walk around an inner visitor.
///
/// The type info enters a node before the inner `enter` and leaves it after the inner
/// `leave`. When the inner visitor does not descend (skip, replace, delete, stop or an
/// error) the node is left right away, and every abandoned ancestor is left too, so the
/// stacks stay balanced whatever the walk does.
pub struct TypeInfoVisitor<'s, V> {
    type_info: TypeInfo<'s>,
    inner: V,
}

impl<'s, V> TypeInfoVisitor<'s, V> {
    pub fn new(type_info: TypeInfo<'s>, inner: V) -> Self {
        TypeInfoVisitor { type_info, inner }
    }

    pub fn type_info(&self) -> &TypeInfo<'s> {
        &self.type_info
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<'a, 's, V: TypeInfoAware<'a, 's>> Visitor<'a> for TypeInfoVisitor<'s, V> {
    type Error = V::Error;

    fn enter(
        &mut self,
        node: NodeRef<'a>,
        path: &[PathSegment<'a>],
    ) -> Result<VisitAction, Self::Error> {
        self.type_info.enter(node);

        let result = self.inner.enter(&self.type_info, node, path);

        if !matches!(result, Ok(VisitAction::Continue)) {
            self.type_info.leave(node);
        }

        result
    }

    fn leave(
        &mut self,
        node: NodeRef<'_>,
        path: &[PathSegment<'a>],
    ) -> Result<VisitAction, Self::Error> {
        let result = self.inner.leave(&self.type_info, node, path);

        self.type_info.leave(node);

        result
    }

    fn abandon(&mut self, node: NodeRef<'a>, path: &[PathSegment<'a>]) {
        self.inner.abandon(&self.type_info, node, path);
        self.type_info.leave(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{parse_query, visit_document, walk, AstNode, Kind, Node, VisitError};
    use crate::schema::{Schema, TypeExtension};

    const SCHEMA: &str = "
        type Query { human(id: ID): Human }
        type Human { name: String, friends: [Human] }
    ";

    #[derive(Default)]
    struct Tracker {
        fields: Vec<String>,
        stop_at: Option<&'static str>,
        fail_at: Option<&'static str>,
        skip: Option<&'static str>,
        abandoned: Vec<Kind>,
    }

    impl<'a, 's> TypeInfoAware<'a, 's> for Tracker {
        type Error = String;

        fn enter(
            &mut self,
            type_info: &TypeInfo<'s>,
            node: NodeRef<'a>,
            _path: &[PathSegment<'a>],
        ) -> Result<VisitAction, String> {
            if let NodeRef::Field(field) = node {
                let name = field.name().value();

                self.fields.push(format!(
                    "{}: {}",
                    name,
                    type_info
                        .get_type()
                        .map(|type_| type_.to_type_string())
                        .unwrap_or_default()
                ));

                if self.stop_at == Some(name) {
                    return Ok(VisitAction::Stop);
                }

                if self.fail_at == Some(name) {
                    return Err(format!("failed at {}", name));
                }

                if self.skip == Some(name) {
                    return Ok(VisitAction::SkipSubtree);
                }
            }

            Ok(VisitAction::Continue)
        }

        fn abandon(&mut self, _type_info: &TypeInfo<'s>, node: NodeRef<'a>, _path: &[PathSegment<'a>]) {
            self.abandoned.push(node.kind());
        }
    }

    const QUERY: &str = "{ human(id: 1) { name friends { name friends { name } } } }";

    #[test]
    fn inner_visitor_sees_type_information() {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = parse_query(QUERY).unwrap();
        let mut visitor = TypeInfoVisitor::new(TypeInfo::new(&schema), Tracker::default());

        walk(document.as_node_ref(), &mut visitor).unwrap();

        assert!(visitor.type_info().is_balanced());
        assert_eq!(
            visitor.into_inner().fields,
            vec![
                "human: Human",
                "name: String",
                "friends: [Human]",
                "name: String",
                "friends: [Human]",
                "name: String",
            ]
        );
    }

    #[test]
    fn stays_balanced_when_skipping() {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = parse_query(QUERY).unwrap();
        let tracker = Tracker {
            skip: Some("friends"),
            ..Default::default()
        };
        let mut visitor = TypeInfoVisitor::new(TypeInfo::new(&schema), tracker);

        walk(document.as_node_ref(), &mut visitor).unwrap();

        assert!(visitor.type_info().is_balanced());
        assert_eq!(visitor.inner().fields.len(), 3);
    }

    #[test]
    fn stays_balanced_after_stop() {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = parse_query(QUERY).unwrap();
        let tracker = Tracker {
            stop_at: Some("friends"),
            ..Default::default()
        };
        let mut visitor = TypeInfoVisitor::new(TypeInfo::new(&schema), tracker);

        let result = visit_document(&document, &mut visitor).unwrap();

        assert_eq!(result, document);
        assert!(visitor.type_info().is_balanced());
        assert_eq!(
            visitor.inner().abandoned,
            vec![
                Kind::SelectionSet,
                Kind::Field,
                Kind::SelectionSet,
                Kind::OperationDefinition,
                Kind::Document,
            ]
        );
    }

    #[test]
    fn stays_balanced_after_callback_error() {
        let schema = Schema::parse(SCHEMA).unwrap();
        let document = parse_query(QUERY).unwrap();
        let tracker = Tracker {
            fail_at: Some("name"),
            ..Default::default()
        };
        let mut visitor = TypeInfoVisitor::new(TypeInfo::new(&schema), tracker);
        let root: Node = document.into();

        let error = crate::ast::visit(&root, &mut visitor).unwrap_err();

        assert_eq!(error, VisitError::Callback("failed at name".to_string()));
        assert!(visitor.type_info().is_balanced());
    }
}
