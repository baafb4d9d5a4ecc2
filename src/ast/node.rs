use std::fmt;

use serde::Serialize;

use crate::error::AstError;

/// Source span of a node. `start` and `end` are byte offsets, `line` and `column`
/// describe `start` and are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

/// Common surface of every node and node category.
pub trait AstNode: Clone + TryFrom<Node, Error = Node> {
    fn as_node_ref(&self) -> NodeRef<'_>;

    fn kind(&self) -> Kind {
        self.as_node_ref().kind()
    }
}

macro_rules! nodes {
    ($($kind:ident),* $(,)?) => {
        /// The closed set of node kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum Kind {
            $($kind,)*
        }

        impl Kind {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Kind::$kind => stringify!($kind),)*
                }
            }
        }

        /// An owned node of any kind.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum Node {
            $($kind($kind),)*
        }

        /// A borrowed node of any kind.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum NodeRef<'a> {
            $($kind(&'a $kind),)*
        }

        impl Node {
            pub fn kind(&self) -> Kind {
                match self {
                    $(Node::$kind(_) => Kind::$kind,)*
                }
            }

            pub fn as_ref(&self) -> NodeRef<'_> {
                match self {
                    $(Node::$kind(node) => NodeRef::$kind(node),)*
                }
            }

            pub fn loc(&self) -> Option<Location> {
                self.as_ref().loc()
            }
        }

        impl<'a> NodeRef<'a> {
            pub fn kind(&self) -> Kind {
                match self {
                    $(NodeRef::$kind(_) => Kind::$kind,)*
                }
            }

            pub fn to_owned_node(&self) -> Node {
                match *self {
                    $(NodeRef::$kind(node) => Node::$kind(node.clone()),)*
                }
            }

            pub fn loc(&self) -> Option<Location> {
                match *self {
                    $(NodeRef::$kind(node) => node.loc,)*
                }
            }
        }

        $(
            impl $kind {
                pub fn loc(&self) -> Option<Location> {
                    self.loc
                }

                pub fn with_loc(mut self, loc: Location) -> Self {
                    self.loc = Some(loc);
                    self
                }
            }

            impl From<$kind> for Node {
                fn from(node: $kind) -> Self {
                    Node::$kind(node)
                }
            }

            impl TryFrom<Node> for $kind {
                type Error = Node;

                fn try_from(node: Node) -> Result<Self, Node> {
                    match node {
                        Node::$kind(node) => Ok(node),
                        other => Err(other),
                    }
                }
            }

            impl AstNode for $kind {
                fn as_node_ref(&self) -> NodeRef<'_> {
                    NodeRef::$kind(self)
                }
            }
        )*
    };
}

nodes!(
    Name,
    Document,
    OperationDefinition,
    VariableDefinition,
    Variable,
    SelectionSet,
    Field,
    Argument,
    FragmentSpread,
    InlineFragment,
    FragmentDefinition,
    IntValue,
    FloatValue,
    StringValue,
    BooleanValue,
    NullValue,
    EnumValue,
    ListValue,
    ObjectValue,
    ObjectField,
    Directive,
    NamedType,
    ListType,
    NonNullType,
    SchemaDefinition,
    OperationTypeDefinition,
    ScalarTypeDefinition,
    ObjectTypeDefinition,
    FieldDefinition,
    InputValueDefinition,
    InterfaceTypeDefinition,
    UnionTypeDefinition,
    EnumTypeDefinition,
    EnumValueDefinition,
    InputObjectTypeDefinition,
    DirectiveDefinition,
);

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! node_category {
    ($(#[$meta:meta])* $category:ident { $($variant:ident($kind:ident)),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum $category {
            $($variant($kind),)*
        }

        impl $category {
            pub fn loc(&self) -> Option<Location> {
                match self {
                    $($category::$variant(node) => node.loc,)*
                }
            }
        }

        impl AstNode for $category {
            fn as_node_ref(&self) -> NodeRef<'_> {
                match self {
                    $($category::$variant(node) => NodeRef::$kind(node),)*
                }
            }
        }

        impl From<$category> for Node {
            fn from(node: $category) -> Self {
                match node {
                    $($category::$variant(node) => Node::$kind(node),)*
                }
            }
        }

        impl TryFrom<Node> for $category {
            type Error = Node;

            fn try_from(node: Node) -> Result<Self, Node> {
                match node {
                    $(Node::$kind(node) => Ok($category::$variant(node)),)*
                    other => Err(other),
                }
            }
        }

        $(
            impl From<$kind> for $category {
                fn from(node: $kind) -> Self {
                    $category::$variant(node)
                }
            }
        )*
    };
}

node_category!(
    /// Top-level definitions of executable and type-system documents.
    Definition {
        Operation(OperationDefinition),
        Fragment(FragmentDefinition),
        Schema(SchemaDefinition),
        Scalar(ScalarTypeDefinition),
        Object(ObjectTypeDefinition),
        Interface(InterfaceTypeDefinition),
        Union(UnionTypeDefinition),
        Enum(EnumTypeDefinition),
        InputObject(InputObjectTypeDefinition),
        Directive(DirectiveDefinition),
    }
);

node_category!(Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
});

node_category!(
    /// Input literals, including variable references.
    Value {
        Variable(Variable),
        Int(IntValue),
        Float(FloatValue),
        String(StringValue),
        Boolean(BooleanValue),
        Null(NullValue),
        Enum(EnumValue),
        List(ListValue),
        Object(ObjectValue),
    }
);

node_category!(
    /// Type references.
    Type {
        Named(NamedType),
        List(ListType),
        NonNull(NonNullType),
    }
);

impl Definition {
    pub fn is_executable(&self) -> bool {
        matches!(self, Definition::Operation(_) | Definition::Fragment(_))
    }
}

impl Type {
    /// The name at the core of the list and non-null wrappers.
    pub fn named_type(&self) -> &NamedType {
        match self {
            Type::Named(named) => named,
            Type::List(list) => list.type_().named_type(),
            Type::NonNull(non_null) => non_null.type_().named_type(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Type::NonNull(_))
    }
}

macro_rules! accessors {
    ($ty:ident { $($name:ident: $how:tt $t:ty),* $(,)? }) => {
        impl $ty {
            $(accessors!(@ $how $name $t);)*
        }
    };
    (@ one $name:ident $t:ty) => {
        pub fn $name(&self) -> &$t {
            &self.$name
        }
    };
    (@ opt $name:ident $t:ty) => {
        pub fn $name(&self) -> Option<&$t> {
            self.$name.as_ref()
        }
    };
    (@ many $name:ident $t:ty) => {
        pub fn $name(&self) -> &[$t] {
            &self.$name
        }
    };
    (@ copy $name:ident $t:ty) => {
        pub fn $name(&self) -> $t {
            self.$name
        }
    };
}

macro_rules! builders {
    ($ty:ident { $($method:ident($field:ident: $how:tt $t:ty)),* $(,)? }) => {
        impl $ty {
            $(builders!(@ $how $method $field $t);)*
        }
    };
    (@ some $method:ident $field:ident $t:ty) => {
        pub fn $method(mut self, $field: $t) -> Self {
            self.$field = Some($field);
            self
        }
    };
    (@ set $method:ident $field:ident $t:ty) => {
        pub fn $method(mut self, $field: $t) -> Self {
            self.$field = $field;
            self
        }
    };
}

fn is_name(value: &str) -> bool {
    let mut chars = value.chars();

    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

fn is_int_literal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);

    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub struct Name {
    pub(crate) value: String,
    pub(crate) loc: Option<Location>,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Result<Self, AstError> {
        let value = value.into();

        if !is_name(&value) {
            return Err(AstError::InvalidName(value));
        }

        Ok(Name::from_parsed(value))
    }

    /// For names the parser already checked.
    pub(crate) fn from_parsed(value: String) -> Self {
        Name { value, loc: None }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Document {
    pub(crate) definitions: Vec<Definition>,
    pub(crate) loc: Option<Location>,
}

impl Document {
    pub fn new(definitions: Vec<Definition>) -> Self {
        Document {
            definitions,
            loc: None,
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Operation(operation) => Some(operation),
            _ => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|definition| match definition {
            Definition::Fragment(fragment) => Some(fragment),
            _ => None,
        })
    }
}

accessors!(Document {
    definitions: many Definition,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct OperationDefinition {
    pub(crate) operation: OperationType,
    pub(crate) name: Option<Name>,
    pub(crate) variable_definitions: Vec<VariableDefinition>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) selection_set: SelectionSet,
    pub(crate) loc: Option<Location>,
}

impl OperationDefinition {
    pub fn new(operation: OperationType, selection_set: SelectionSet) -> Self {
        OperationDefinition {
            operation,
            name: None,
            variable_definitions: vec![],
            directives: vec![],
            selection_set,
            loc: None,
        }
    }
}

accessors!(OperationDefinition {
    operation: copy OperationType,
    name: opt Name,
    variable_definitions: many VariableDefinition,
    directives: many Directive,
    selection_set: one SelectionSet,
});

builders!(OperationDefinition {
    with_name(name: some Name),
    with_variable_definitions(variable_definitions: set Vec<VariableDefinition>),
    with_directives(directives: set Vec<Directive>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct VariableDefinition {
    pub(crate) variable: Variable,
    #[serde(rename = "type")]
    pub(crate) type_: Type,
    pub(crate) default_value: Option<Value>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) loc: Option<Location>,
}

impl VariableDefinition {
    pub fn new(variable: Variable, type_: impl Into<Type>) -> Self {
        VariableDefinition {
            variable,
            type_: type_.into(),
            default_value: None,
            directives: vec![],
            loc: None,
        }
    }
}

accessors!(VariableDefinition {
    variable: one Variable,
    type_: one Type,
    default_value: opt Value,
    directives: many Directive,
});

builders!(VariableDefinition {
    with_default_value(default_value: some Value),
    with_directives(directives: set Vec<Directive>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Variable {
    pub(crate) name: Name,
    pub(crate) loc: Option<Location>,
}

impl Variable {
    pub fn new(name: Name) -> Self {
        Variable { name, loc: None }
    }
}

accessors!(Variable { name: one Name });

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct SelectionSet {
    pub(crate) selections: Vec<Selection>,
    pub(crate) loc: Option<Location>,
}

impl SelectionSet {
    pub fn new(selections: Vec<Selection>) -> Self {
        SelectionSet {
            selections,
            loc: None,
        }
    }
}

accessors!(SelectionSet {
    selections: many Selection,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Field {
    pub(crate) alias: Option<Name>,
    pub(crate) name: Name,
    pub(crate) arguments: Vec<Argument>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) selection_set: Option<SelectionSet>,
    pub(crate) loc: Option<Location>,
}

impl Field {
    pub fn new(name: Name) -> Self {
        Field {
            alias: None,
            name,
            arguments: vec![],
            directives: vec![],
            selection_set: None,
            loc: None,
        }
    }

    /// The key this field's value is stored under in the response.
    pub fn response_key(&self) -> &str {
        self.alias.as_ref().unwrap_or(&self.name).value()
    }
}

accessors!(Field {
    alias: opt Name,
    name: one Name,
    arguments: many Argument,
    directives: many Directive,
    selection_set: opt SelectionSet,
});

builders!(Field {
    with_alias(alias: some Name),
    with_arguments(arguments: set Vec<Argument>),
    with_directives(directives: set Vec<Directive>),
    with_selection_set(selection_set: some SelectionSet),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Argument {
    pub(crate) name: Name,
    pub(crate) value: Value,
    pub(crate) loc: Option<Location>,
}

impl Argument {
    pub fn new(name: Name, value: impl Into<Value>) -> Self {
        Argument {
            name,
            value: value.into(),
            loc: None,
        }
    }
}

accessors!(Argument {
    name: one Name,
    value: one Value,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct FragmentSpread {
    pub(crate) name: Name,
    pub(crate) directives: Vec<Directive>,
    pub(crate) loc: Option<Location>,
}

impl FragmentSpread {
    pub fn new(name: Name) -> Self {
        FragmentSpread {
            name,
            directives: vec![],
            loc: None,
        }
    }
}

accessors!(FragmentSpread {
    name: one Name,
    directives: many Directive,
});

builders!(FragmentSpread {
    with_directives(directives: set Vec<Directive>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct InlineFragment {
    pub(crate) type_condition: Option<NamedType>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) selection_set: SelectionSet,
    pub(crate) loc: Option<Location>,
}

impl InlineFragment {
    pub fn new(selection_set: SelectionSet) -> Self {
        InlineFragment {
            type_condition: None,
            directives: vec![],
            selection_set,
            loc: None,
        }
    }
}

accessors!(InlineFragment {
    type_condition: opt NamedType,
    directives: many Directive,
    selection_set: one SelectionSet,
});

builders!(InlineFragment {
    with_type_condition(type_condition: some NamedType),
    with_directives(directives: set Vec<Directive>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct FragmentDefinition {
    pub(crate) name: Name,
    pub(crate) type_condition: NamedType,
    pub(crate) directives: Vec<Directive>,
    pub(crate) selection_set: SelectionSet,
    pub(crate) loc: Option<Location>,
}

impl FragmentDefinition {
    pub fn new(name: Name, type_condition: NamedType, selection_set: SelectionSet) -> Self {
        FragmentDefinition {
            name,
            type_condition,
            directives: vec![],
            selection_set,
            loc: None,
        }
    }
}

accessors!(FragmentDefinition {
    name: one Name,
    type_condition: one NamedType,
    directives: many Directive,
    selection_set: one SelectionSet,
});

builders!(FragmentDefinition {
    with_directives(directives: set Vec<Directive>),
});

/// Integer literal, kept in its source form.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub struct IntValue {
    pub(crate) value: String,
    pub(crate) loc: Option<Location>,
}

impl IntValue {
    pub fn new(value: impl Into<String>) -> Result<Self, AstError> {
        let value = value.into();

        if !is_int_literal(&value) {
            return Err(AstError::InvalidNumber(value, "Int"));
        }

        Ok(IntValue { value, loc: None })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value.parse().ok()
    }
}

impl From<i64> for IntValue {
    fn from(value: i64) -> Self {
        IntValue {
            value: value.to_string(),
            loc: None,
        }
    }
}

/// Float literal, kept in its source form.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub struct FloatValue {
    pub(crate) value: String,
    pub(crate) loc: Option<Location>,
}

impl FloatValue {
    pub fn new(value: impl Into<String>) -> Result<Self, AstError> {
        let value = value.into();
        let valid = value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
            && value.contains(|c| matches!(c, '.' | 'e' | 'E'))
            && !value.starts_with('.')
            && !value.starts_with('+');

        if !valid {
            return Err(AstError::InvalidNumber(value, "Float"));
        }

        Ok(FloatValue { value, loc: None })
    }

    pub(crate) fn from_f64(value: f64) -> Self {
        // Debug output always keeps a fraction or exponent, so it re-parses as a Float.
        FloatValue {
            value: format!("{:?}", value),
            loc: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.parse().ok()
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub struct StringValue {
    pub(crate) value: String,
    pub(crate) block: bool,
    pub(crate) loc: Option<Location>,
}

impl StringValue {
    pub fn new(value: impl Into<String>) -> Self {
        StringValue {
            value: value.into(),
            block: false,
            loc: None,
        }
    }

    /// A `"""` block string.
    pub fn block(value: impl Into<String>) -> Self {
        StringValue {
            block: true,
            ..StringValue::new(value)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_block(&self) -> bool {
        self.block
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub struct BooleanValue {
    pub(crate) value: bool,
    pub(crate) loc: Option<Location>,
}

impl BooleanValue {
    pub fn new(value: bool) -> Self {
        BooleanValue { value, loc: None }
    }
}

accessors!(BooleanValue { value: copy bool });

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub struct NullValue {
    pub(crate) loc: Option<Location>,
}

impl NullValue {
    pub fn new() -> Self {
        NullValue { loc: None }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub struct EnumValue {
    pub(crate) value: String,
    pub(crate) loc: Option<Location>,
}

impl EnumValue {
    pub fn new(value: impl Into<String>) -> Result<Self, AstError> {
        let value = value.into();

        if !is_name(&value) {
            return Err(AstError::InvalidName(value));
        }

        if matches!(value.as_str(), "true" | "false" | "null") {
            return Err(AstError::InvalidEnumValue(value));
        }

        Ok(EnumValue { value, loc: None })
    }

    pub(crate) fn from_parsed(value: String) -> Self {
        EnumValue { value, loc: None }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ListValue {
    pub(crate) values: Vec<Value>,
    pub(crate) loc: Option<Location>,
}

impl ListValue {
    pub fn new(values: Vec<Value>) -> Self {
        ListValue { values, loc: None }
    }
}

accessors!(ListValue { values: many Value });

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ObjectValue {
    pub(crate) fields: Vec<ObjectField>,
    pub(crate) loc: Option<Location>,
}

impl ObjectValue {
    pub fn new(fields: Vec<ObjectField>) -> Self {
        ObjectValue { fields, loc: None }
    }
}

accessors!(ObjectValue {
    fields: many ObjectField,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ObjectField {
    pub(crate) name: Name,
    pub(crate) value: Value,
    pub(crate) loc: Option<Location>,
}

impl ObjectField {
    pub fn new(name: Name, value: impl Into<Value>) -> Self {
        ObjectField {
            name,
            value: value.into(),
            loc: None,
        }
    }
}

accessors!(ObjectField {
    name: one Name,
    value: one Value,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Directive {
    pub(crate) name: Name,
    pub(crate) arguments: Vec<Argument>,
    pub(crate) loc: Option<Location>,
}

impl Directive {
    pub fn new(name: Name) -> Self {
        Directive {
            name,
            arguments: vec![],
            loc: None,
        }
    }
}

accessors!(Directive {
    name: one Name,
    arguments: many Argument,
});

builders!(Directive {
    with_arguments(arguments: set Vec<Argument>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub struct NamedType {
    pub(crate) name: Name,
    pub(crate) loc: Option<Location>,
}

impl NamedType {
    pub fn new(name: Name) -> Self {
        NamedType { name, loc: None }
    }
}

accessors!(NamedType { name: one Name });

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ListType {
    #[serde(rename = "type")]
    pub(crate) type_: Box<Type>,
    pub(crate) loc: Option<Location>,
}

impl ListType {
    pub fn new(type_: impl Into<Type>) -> Self {
        ListType {
            type_: Box::new(type_.into()),
            loc: None,
        }
    }
}

accessors!(ListType { type_: one Type });

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct NonNullType {
    #[serde(rename = "type")]
    pub(crate) type_: Box<Type>,
    pub(crate) loc: Option<Location>,
}

impl NonNullType {
    pub fn new(type_: impl Into<Type>) -> Result<Self, AstError> {
        let type_ = type_.into();

        if type_.is_non_null() {
            return Err(AstError::NestedNonNull);
        }

        Ok(NonNullType {
            type_: Box::new(type_),
            loc: None,
        })
    }
}

accessors!(NonNullType { type_: one Type });

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct SchemaDefinition {
    pub(crate) directives: Vec<Directive>,
    pub(crate) operation_types: Vec<OperationTypeDefinition>,
    pub(crate) loc: Option<Location>,
}

impl SchemaDefinition {
    pub fn new(operation_types: Vec<OperationTypeDefinition>) -> Self {
        SchemaDefinition {
            directives: vec![],
            operation_types,
            loc: None,
        }
    }
}

accessors!(SchemaDefinition {
    directives: many Directive,
    operation_types: many OperationTypeDefinition,
});

builders!(SchemaDefinition {
    with_directives(directives: set Vec<Directive>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct OperationTypeDefinition {
    pub(crate) operation: OperationType,
    #[serde(rename = "type")]
    pub(crate) type_: NamedType,
    pub(crate) loc: Option<Location>,
}

impl OperationTypeDefinition {
    pub fn new(operation: OperationType, type_: NamedType) -> Self {
        OperationTypeDefinition {
            operation,
            type_,
            loc: None,
        }
    }
}

accessors!(OperationTypeDefinition {
    operation: copy OperationType,
    type_: one NamedType,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ScalarTypeDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    pub(crate) directives: Vec<Directive>,
    pub(crate) loc: Option<Location>,
}

impl ScalarTypeDefinition {
    pub fn new(name: Name) -> Self {
        ScalarTypeDefinition {
            description: None,
            name,
            directives: vec![],
            loc: None,
        }
    }
}

accessors!(ScalarTypeDefinition {
    description: opt StringValue,
    name: one Name,
    directives: many Directive,
});

builders!(ScalarTypeDefinition {
    with_description(description: some StringValue),
    with_directives(directives: set Vec<Directive>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ObjectTypeDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    pub(crate) interfaces: Vec<NamedType>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) fields: Vec<FieldDefinition>,
    pub(crate) loc: Option<Location>,
}

impl ObjectTypeDefinition {
    pub fn new(name: Name) -> Self {
        ObjectTypeDefinition {
            description: None,
            name,
            interfaces: vec![],
            directives: vec![],
            fields: vec![],
            loc: None,
        }
    }
}

accessors!(ObjectTypeDefinition {
    description: opt StringValue,
    name: one Name,
    interfaces: many NamedType,
    directives: many Directive,
    fields: many FieldDefinition,
});

builders!(ObjectTypeDefinition {
    with_description(description: some StringValue),
    with_interfaces(interfaces: set Vec<NamedType>),
    with_directives(directives: set Vec<Directive>),
    with_fields(fields: set Vec<FieldDefinition>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct FieldDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    pub(crate) arguments: Vec<InputValueDefinition>,
    #[serde(rename = "type")]
    pub(crate) type_: Type,
    pub(crate) directives: Vec<Directive>,
    pub(crate) loc: Option<Location>,
}

impl FieldDefinition {
    pub fn new(name: Name, type_: impl Into<Type>) -> Self {
        FieldDefinition {
            description: None,
            name,
            arguments: vec![],
            type_: type_.into(),
            directives: vec![],
            loc: None,
        }
    }
}

accessors!(FieldDefinition {
    description: opt StringValue,
    name: one Name,
    arguments: many InputValueDefinition,
    type_: one Type,
    directives: many Directive,
});

builders!(FieldDefinition {
    with_description(description: some StringValue),
    with_arguments(arguments: set Vec<InputValueDefinition>),
    with_directives(directives: set Vec<Directive>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct InputValueDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    #[serde(rename = "type")]
    pub(crate) type_: Type,
    pub(crate) default_value: Option<Value>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) loc: Option<Location>,
}

impl InputValueDefinition {
    pub fn new(name: Name, type_: impl Into<Type>) -> Self {
        InputValueDefinition {
            description: None,
            name,
            type_: type_.into(),
            default_value: None,
            directives: vec![],
            loc: None,
        }
    }
}

accessors!(InputValueDefinition {
    description: opt StringValue,
    name: one Name,
    type_: one Type,
    default_value: opt Value,
    directives: many Directive,
});

builders!(InputValueDefinition {
    with_description(description: some StringValue),
    with_default_value(default_value: some Value),
    with_directives(directives: set Vec<Directive>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct InterfaceTypeDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    pub(crate) interfaces: Vec<NamedType>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) fields: Vec<FieldDefinition>,
    pub(crate) loc: Option<Location>,
}

impl InterfaceTypeDefinition {
    pub fn new(name: Name) -> Self {
        InterfaceTypeDefinition {
            description: None,
            name,
            interfaces: vec![],
            directives: vec![],
            fields: vec![],
            loc: None,
        }
    }
}

accessors!(InterfaceTypeDefinition {
    description: opt StringValue,
    name: one Name,
    interfaces: many NamedType,
    directives: many Directive,
    fields: many FieldDefinition,
});

builders!(InterfaceTypeDefinition {
    with_description(description: some StringValue),
    with_interfaces(interfaces: set Vec<NamedType>),
    with_directives(directives: set Vec<Directive>),
    with_fields(fields: set Vec<FieldDefinition>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct UnionTypeDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    pub(crate) directives: Vec<Directive>,
    pub(crate) types: Vec<NamedType>,
    pub(crate) loc: Option<Location>,
}

impl UnionTypeDefinition {
    pub fn new(name: Name) -> Self {
        UnionTypeDefinition {
            description: None,
            name,
            directives: vec![],
            types: vec![],
            loc: None,
        }
    }
}

accessors!(UnionTypeDefinition {
    description: opt StringValue,
    name: one Name,
    directives: many Directive,
    types: many NamedType,
});

builders!(UnionTypeDefinition {
    with_description(description: some StringValue),
    with_directives(directives: set Vec<Directive>),
    with_types(types: set Vec<NamedType>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct EnumTypeDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    pub(crate) directives: Vec<Directive>,
    pub(crate) values: Vec<EnumValueDefinition>,
    pub(crate) loc: Option<Location>,
}

impl EnumTypeDefinition {
    pub fn new(name: Name) -> Self {
        EnumTypeDefinition {
            description: None,
            name,
            directives: vec![],
            values: vec![],
            loc: None,
        }
    }
}

accessors!(EnumTypeDefinition {
    description: opt StringValue,
    name: one Name,
    directives: many Directive,
    values: many EnumValueDefinition,
});

builders!(EnumTypeDefinition {
    with_description(description: some StringValue),
    with_directives(directives: set Vec<Directive>),
    with_values(values: set Vec<EnumValueDefinition>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct EnumValueDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    pub(crate) directives: Vec<Directive>,
    pub(crate) loc: Option<Location>,
}

impl EnumValueDefinition {
    pub fn new(name: Name) -> Self {
        EnumValueDefinition {
            description: None,
            name,
            directives: vec![],
            loc: None,
        }
    }
}

accessors!(EnumValueDefinition {
    description: opt StringValue,
    name: one Name,
    directives: many Directive,
});

builders!(EnumValueDefinition {
    with_description(description: some StringValue),
    with_directives(directives: set Vec<Directive>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct InputObjectTypeDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    pub(crate) directives: Vec<Directive>,
    pub(crate) fields: Vec<InputValueDefinition>,
    pub(crate) loc: Option<Location>,
}

impl InputObjectTypeDefinition {
    pub fn new(name: Name) -> Self {
        InputObjectTypeDefinition {
            description: None,
            name,
            directives: vec![],
            fields: vec![],
            loc: None,
        }
    }
}

accessors!(InputObjectTypeDefinition {
    description: opt StringValue,
    name: one Name,
    directives: many Directive,
    fields: many InputValueDefinition,
});

builders!(InputObjectTypeDefinition {
    with_description(description: some StringValue),
    with_directives(directives: set Vec<Directive>),
    with_fields(fields: set Vec<InputValueDefinition>),
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct DirectiveDefinition {
    pub(crate) description: Option<StringValue>,
    pub(crate) name: Name,
    pub(crate) arguments: Vec<InputValueDefinition>,
    pub(crate) repeatable: bool,
    pub(crate) locations: Vec<Name>,
    pub(crate) loc: Option<Location>,
}

impl DirectiveDefinition {
    pub fn new(name: Name, locations: Vec<Name>) -> Self {
        DirectiveDefinition {
            description: None,
            name,
            arguments: vec![],
            repeatable: false,
            locations,
            loc: None,
        }
    }
}

accessors!(DirectiveDefinition {
    description: opt StringValue,
    name: one Name,
    arguments: many InputValueDefinition,
    repeatable: copy bool,
    locations: many Name,
});

builders!(DirectiveDefinition {
    with_description(description: some StringValue),
    with_arguments(arguments: set Vec<InputValueDefinition>),
    with_repeatable(repeatable: set bool),
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name(value: &str) -> Name {
        Name::new(value).unwrap()
    }

    #[test]
    fn names_are_validated() {
        assert!(Name::new("_valid9").is_ok());
        assert_eq!(
            Name::new("9lives"),
            Err(AstError::InvalidName("9lives".to_string()))
        );
        assert!(Name::new("").is_err());
        assert!(EnumValue::new("true").is_err());
    }

    #[test]
    fn number_literals_are_validated() {
        assert!(IntValue::new("-12").is_ok());
        assert!(IntValue::new("012").is_err());
        assert!(IntValue::new("1.5").is_err());
        assert!(FloatValue::new("1.5e3").is_ok());
        assert!(FloatValue::new("15").is_err());
        assert_eq!(FloatValue::from_f64(1.0).value(), "1.0");
    }

    #[test]
    fn non_null_cannot_wrap_non_null() {
        let inner = NonNullType::new(NamedType::new(name("Int"))).unwrap();

        assert_eq!(NonNullType::new(inner), Err(AstError::NestedNonNull));
    }

    #[test]
    fn kinds_round_trip_through_node() {
        let field = Field::new(name("hero")).with_alias(name("h"));
        let node: Node = field.clone().into();

        assert_eq!(node.kind(), Kind::Field);
        assert_eq!(node.kind().to_string(), "Field");
        assert_eq!(Field::try_from(node.clone()), Ok(field.clone()));
        assert_eq!(Name::try_from(node.clone()), Err(node.clone()));
        assert_eq!(
            Selection::try_from(node),
            Ok(Selection::Field(field.clone()))
        );
        assert_eq!(field.response_key(), "h");
    }

    #[test]
    fn serializes_to_tagged_structure() {
        let field = Field::new(name("id")).with_arguments(vec![Argument::new(
            name("first"),
            IntValue::from(3_i64),
        )]);

        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({
                "kind": "Field",
                "name": { "kind": "Name", "value": "id" },
                "arguments": [{
                    "kind": "Argument",
                    "name": { "kind": "Name", "value": "first" },
                    "value": { "kind": "IntValue", "value": "3" },
                }],
                "directives": [],
            })
        );
    }
}
