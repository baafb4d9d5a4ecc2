use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::{Map, Value};

use crate::ast::{Field, OperationDefinition};
use crate::error::{FieldError, PathElement};
use crate::schema::Schema;
use crate::static_graphql::schema::{self, TypeDefinition};

pub type ResolverResult = Result<Value, FieldError>;

/// Asynchronous field resolver.
pub type Resolver<C> =
    Arc<dyn for<'r> Fn(ResolveInfo<'r, C>) -> BoxFuture<'r, ResolverResult> + Send + Sync>;

/// Names the concrete object type of a value returned for an interface or union.
pub type TypeResolver<C> = Arc<dyn Fn(&Value, &C) -> Option<String> + Send + Sync>;

/// Everything a resolver knows about the field it is resolving.
pub struct ResolveInfo<'r, C> {
    /// The parent value the field is resolved on.
    pub source: &'r Value,
    /// Coerced arguments, defaults applied.
    pub args: Map<String, Value>,
    pub context: &'r C,
    pub field_name: &'r str,
    /// The object type owning the field.
    pub parent_type: &'r TypeDefinition,
    pub return_type: &'r schema::Type,
    pub path: Vec<PathElement>,
    /// Every field node merged under this response key.
    pub field_nodes: &'r [&'r Field],
    pub schema: &'r Schema,
    pub operation: &'r OperationDefinition,
    pub variables: &'r Map<String, Value>,
    pub root_value: &'r Value,
}

impl<'r, C> ResolveInfo<'r, C> {
    /// An argument by name, `None` when neither given nor defaulted.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }
}

fn boxed<C, F>(resolver: F) -> Resolver<C>
where
    F: for<'r> Fn(ResolveInfo<'r, C>) -> BoxFuture<'r, ResolverResult> + Send + Sync + 'static,
{
    Arc::new(resolver)
}

/// Resolvers by `(type name, field name)`, plus the fallbacks used for unregistered fields.
///
/// A field with no registered resolver and no default resolver reads the property named
/// like the field from the parent value.
pub struct ResolverMap<C> {
    fields: HashMap<String, HashMap<String, Resolver<C>>>,
    default_resolver: Option<Resolver<C>>,
    type_resolvers: HashMap<String, TypeResolver<C>>,
}

impl<C> Default for ResolverMap<C> {
    fn default() -> Self {
        ResolverMap {
            fields: HashMap::new(),
            default_resolver: None,
            type_resolvers: HashMap::new(),
        }
    }
}

impl<C: 'static> ResolverMap<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, type_name: &str, field_name: &str, resolver: F) -> &mut Self
    where
        F: for<'r> Fn(ResolveInfo<'r, C>) -> BoxFuture<'r, ResolverResult> + Send + Sync + 'static,
    {
        self.fields
            .entry(type_name.to_string())
            .or_default()
            .insert(field_name.to_string(), boxed(resolver));
        self
    }

    /// Registers a resolver that computes its value without awaiting anything.
    pub fn register_sync<F>(&mut self, type_name: &str, field_name: &str, resolver: F) -> &mut Self
    where
        F: Fn(&ResolveInfo<'_, C>) -> ResolverResult + Send + Sync + 'static,
    {
        self.register(type_name, field_name, move |info| {
            future::ready(resolver(&info)).boxed()
        })
    }

    pub fn set_default_resolver<F>(&mut self, resolver: F) -> &mut Self
    where
        F: for<'r> Fn(ResolveInfo<'r, C>) -> BoxFuture<'r, ResolverResult> + Send + Sync + 'static,
    {
        self.default_resolver = Some(boxed(resolver));
        self
    }

    pub fn register_type_resolver<F>(&mut self, abstract_type: &str, resolver: F) -> &mut Self
    where
        F: Fn(&Value, &C) -> Option<String> + Send + Sync + 'static,
    {
        self.type_resolvers
            .insert(abstract_type.to_string(), Arc::new(resolver));
        self
    }
}

impl<C> ResolverMap<C> {
    /// The resolver used for `type_name.field_name`, `None` means property lookup.
    pub fn resolver(&self, type_name: &str, field_name: &str) -> Option<&Resolver<C>> {
        self.fields
            .get(type_name)
            .and_then(|fields| fields.get(field_name))
            .or(self.default_resolver.as_ref())
    }

    pub fn type_resolver(&self, abstract_type: &str) -> Option<&TypeResolver<C>> {
        self.type_resolvers.get(abstract_type)
    }
}

/// Reads the property named like the field from an object parent value.
pub fn property_resolver(source: &Value, field_name: &str) -> Value {
    source.get(field_name).cloned().unwrap_or(Value::Null)
}
