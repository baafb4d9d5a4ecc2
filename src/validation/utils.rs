use std::collections::HashMap;
use std::convert::Infallible;

use serde::Serialize;
use tracing::warn;

use crate::ast::{
    walk, AstNode, Document, FragmentDefinition, NodeRef, PathSegment, TypeInfo, TypeInfoAware,
    TypeInfoVisitor, VisitAction,
};
use crate::error::{GraphQLError, SourceLocation};
use crate::schema::Schema;

/// Everything a rule may look at while validating one document.
pub struct ValidationContext<'a> {
    pub schema: &'a Schema,
    pub document: &'a Document,
    /// Fragment definitions by name, the first definition wins.
    pub fragments: HashMap<&'a str, &'a FragmentDefinition>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(schema: &'a Schema, document: &'a Document) -> Self {
        let mut fragments = HashMap::new();

        for fragment in document.fragments() {
            fragments.entry(fragment.name().value()).or_insert(fragment);
        }

        ValidationContext {
            schema,
            document,
            fragments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub locations: Vec<SourceLocation>,
    pub message: String,
    pub error_code: &'static str,
}

impl From<ValidationError> for GraphQLError {
    fn from(error: ValidationError) -> Self {
        GraphQLError::new(error.message)
            .with_locations(error.locations)
            .with_code(error.error_code)
    }
}

pub struct ValidationErrorContext<'a> {
    pub ctx: &'a ValidationContext<'a>,
    pub errors: Vec<ValidationError>,
}

impl<'a> ValidationErrorContext<'a> {
    pub fn new(ctx: &'a ValidationContext<'a>) -> Self {
        ValidationErrorContext {
            ctx,
            errors: vec![],
        }
    }

    pub fn report_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }
}

/// Hooks of a rule that inspects the document node by node, with type information.
pub trait ValidationVisitor<'a> {
    fn enter(
        &self,
        _node: NodeRef<'a>,
        _path: &[PathSegment<'a>],
        _type_info: &TypeInfo<'a>,
        _error_context: &mut ValidationErrorContext<'a>,
    ) {
    }

    fn leave(
        &self,
        _node: NodeRef<'_>,
        _path: &[PathSegment<'a>],
        _type_info: &TypeInfo<'a>,
        _error_context: &mut ValidationErrorContext<'a>,
    ) {
    }
}

struct RuleVisitor<'r, 'a, R> {
    rule: &'r R,
    error_context: ValidationErrorContext<'a>,
}

impl<'r, 'a, R: ValidationVisitor<'a>> TypeInfoAware<'a, 'a> for RuleVisitor<'r, 'a, R> {
    type Error = Infallible;

    fn enter(
        &mut self,
        type_info: &TypeInfo<'a>,
        node: NodeRef<'a>,
        path: &[PathSegment<'a>],
    ) -> Result<VisitAction, Infallible> {
        self.rule
            .enter(node, path, type_info, &mut self.error_context);

        Ok(VisitAction::Continue)
    }

    fn leave(
        &mut self,
        type_info: &TypeInfo<'a>,
        node: NodeRef<'_>,
        path: &[PathSegment<'a>],
    ) -> Result<VisitAction, Infallible> {
        self.rule
            .leave(node, path, type_info, &mut self.error_context);

        Ok(VisitAction::Continue)
    }
}

/// Walks the whole document once with `rule`, returning what it reported.
pub fn visit_document_with_rule<'a, R: ValidationVisitor<'a>>(
    rule: &R,
    ctx: &'a ValidationContext<'a>,
) -> Vec<ValidationError> {
    let mut visitor = TypeInfoVisitor::new(
        TypeInfo::new(ctx.schema),
        RuleVisitor {
            rule,
            error_context: ValidationErrorContext::new(ctx),
        },
    );

    if let Err(error) = walk(ctx.document.as_node_ref(), &mut visitor) {
        warn!(%error, "validation walk aborted");
    }

    visitor.into_inner().error_context.errors
}

/// The location of `node`, or of its closest located ancestor.
pub fn nearest_location(node: NodeRef<'_>, path: &[PathSegment<'_>]) -> Vec<SourceLocation> {
    node.loc()
        .or_else(|| path.iter().rev().find_map(|segment| segment.parent.loc()))
        .map(SourceLocation::from)
        .into_iter()
        .collect()
}

pub fn location_of<T: AstNode>(node: &T) -> Vec<SourceLocation> {
    node.as_node_ref()
        .loc()
        .map(SourceLocation::from)
        .into_iter()
        .collect()
}
