use serde_json::{Map, Number, Value as JsonValue};

use crate::static_graphql::schema::{
    self, EnumValue, InputValue, InterfaceType, ObjectType, Type, TypeDefinition, UnionType, Value,
};

pub trait FieldByNameExtension {
    fn field_by_name(&self, name: &str) -> Option<&schema::Field>;
    fn input_field_by_name(&self, name: &str) -> Option<&InputValue>;
}

impl FieldByNameExtension for TypeDefinition {
    fn field_by_name(&self, name: &str) -> Option<&schema::Field> {
        match self {
            TypeDefinition::Object(object) => object.field_by_name(name),
            TypeDefinition::Interface(interface) => {
                interface.fields.iter().find(|field| field.name.eq(name))
            }
            _ => None,
        }
    }

    fn input_field_by_name(&self, name: &str) -> Option<&InputValue> {
        match self {
            TypeDefinition::InputObject(input_object) => {
                input_object.fields.iter().find(|field| field.name.eq(name))
            }
            _ => None,
        }
    }
}

impl FieldByNameExtension for ObjectType {
    fn field_by_name(&self, name: &str) -> Option<&schema::Field> {
        self.fields.iter().find(|field| field.name.eq(name))
    }

    fn input_field_by_name(&self, _name: &str) -> Option<&InputValue> {
        None
    }
}

pub trait TypeExtension {
    fn inner_type(&self) -> &str;
    fn is_non_null(&self) -> bool;
    fn is_list_type(&self) -> bool;
    fn is_named_type(&self) -> bool;
    fn of_type(&self) -> &Type;
    fn nullable(&self) -> &Type;
    fn to_type_string(&self) -> String;
}

impl TypeExtension for Type {
    fn inner_type(&self) -> &str {
        match self {
            Type::NamedType(name) => name,
            Type::ListType(child) => child.inner_type(),
            Type::NonNullType(child) => child.inner_type(),
        }
    }

    fn of_type(&self) -> &Type {
        match self {
            Type::ListType(child) => child,
            Type::NonNullType(child) => child,
            Type::NamedType(_) => self,
        }
    }

    /// Strips one non-null wrapper, if any.
    fn nullable(&self) -> &Type {
        match self {
            Type::NonNullType(child) => child,
            _ => self,
        }
    }

    fn is_non_null(&self) -> bool {
        matches!(self, Type::NonNullType(_))
    }

    fn is_list_type(&self) -> bool {
        matches!(self, Type::ListType(_))
    }

    fn is_named_type(&self) -> bool {
        matches!(self, Type::NamedType(_))
    }

    fn to_type_string(&self) -> String {
        match self {
            Type::NamedType(name) => name.clone(),
            Type::ListType(child) => format!("[{}]", child.to_type_string()),
            Type::NonNullType(child) => format!("{}!", child.to_type_string()),
        }
    }
}

pub trait InputValueHelpers {
    fn is_required(&self) -> bool;
}

impl InputValueHelpers for InputValue {
    fn is_required(&self) -> bool {
        self.value_type.is_non_null() && self.default_value.is_none()
    }
}

pub trait ValueExtension {
    /// Converts a type-system literal (a default value) into runtime JSON.
    fn to_json(&self) -> JsonValue;
}

impl ValueExtension for Value {
    fn to_json(&self) -> JsonValue {
        match self {
            Value::Null | Value::Variable(_) => JsonValue::Null,
            Value::Boolean(value) => JsonValue::Bool(*value),
            Value::Int(number) => number
                .as_i64()
                .map(|number| JsonValue::Number(number.into()))
                .unwrap_or(JsonValue::Null),
            Value::Float(number) => Number::from_f64(*number)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(value) | Value::Enum(value) => JsonValue::String(value.clone()),
            Value::List(items) => JsonValue::Array(items.iter().map(|item| item.to_json()).collect()),
            Value::Object(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

pub trait TypeDefinitionExtension {
    fn is_leaf_type(&self) -> bool;
    fn is_composite_type(&self) -> bool;
    fn is_input_type(&self) -> bool;
    fn is_output_type(&self) -> bool;
    fn is_object_type(&self) -> bool;
    fn is_union_type(&self) -> bool;
    fn is_interface_type(&self) -> bool;
    fn is_enum_type(&self) -> bool;
    fn is_scalar_type(&self) -> bool;
    fn is_abstract_type(&self) -> bool;
    fn name(&self) -> &str;
    fn enum_value_by_name(&self, name: &str) -> Option<&EnumValue>;
}

impl TypeDefinitionExtension for TypeDefinition {
    fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(o) => &o.name,
            TypeDefinition::Interface(i) => &i.name,
            TypeDefinition::Union(u) => &u.name,
            TypeDefinition::Scalar(s) => &s.name,
            TypeDefinition::Enum(e) => &e.name,
            TypeDefinition::InputObject(i) => &i.name,
        }
    }

    fn is_abstract_type(&self) -> bool {
        matches!(self, TypeDefinition::Interface(_) | TypeDefinition::Union(_))
    }

    fn is_interface_type(&self) -> bool {
        matches!(self, TypeDefinition::Interface(_))
    }

    fn is_leaf_type(&self) -> bool {
        matches!(self, TypeDefinition::Scalar(_) | TypeDefinition::Enum(_))
    }

    fn is_input_type(&self) -> bool {
        matches!(
            self,
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) | TypeDefinition::InputObject(_)
        )
    }

    fn is_output_type(&self) -> bool {
        !matches!(self, TypeDefinition::InputObject(_))
    }

    fn is_composite_type(&self) -> bool {
        matches!(
            self,
            TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_)
        )
    }

    fn is_object_type(&self) -> bool {
        matches!(self, TypeDefinition::Object(_))
    }

    fn is_union_type(&self) -> bool {
        matches!(self, TypeDefinition::Union(_))
    }

    fn is_enum_type(&self) -> bool {
        matches!(self, TypeDefinition::Enum(_))
    }

    fn is_scalar_type(&self) -> bool {
        matches!(self, TypeDefinition::Scalar(_))
    }

    fn enum_value_by_name(&self, name: &str) -> Option<&EnumValue> {
        match self {
            TypeDefinition::Enum(enum_type) => {
                enum_type.values.iter().find(|value| value.name.eq(name))
            }
            _ => None,
        }
    }
}

pub trait ImplementingInterfaceExtension {
    fn interfaces(&self) -> &[String];
}

impl ImplementingInterfaceExtension for TypeDefinition {
    fn interfaces(&self) -> &[String] {
        match self {
            TypeDefinition::Object(o) => o.interfaces(),
            TypeDefinition::Interface(i) => i.interfaces(),
            _ => &[],
        }
    }
}

impl ImplementingInterfaceExtension for InterfaceType {
    fn interfaces(&self) -> &[String] {
        &self.implements_interfaces
    }
}

impl ImplementingInterfaceExtension for ObjectType {
    fn interfaces(&self) -> &[String] {
        &self.implements_interfaces
    }
}

pub trait AbstractTypeDefinitionExtension {
    fn is_implemented_by(&self, other_type: &dyn ImplementingInterfaceExtension) -> bool;
}

impl AbstractTypeDefinitionExtension for InterfaceType {
    fn is_implemented_by(&self, other_type: &dyn ImplementingInterfaceExtension) -> bool {
        other_type.interfaces().iter().any(|v| self.name.eq(v))
    }
}

pub trait SubTypeExtension {
    fn has_sub_type(&self, other_type_name: &str) -> bool;
}

impl SubTypeExtension for UnionType {
    fn has_sub_type(&self, other_type_name: &str) -> bool {
        self.types.iter().any(|v| other_type_name.eq(v))
    }
}
