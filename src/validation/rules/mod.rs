pub mod defaults;
pub mod executable_definitions;
pub mod fields_on_correct_type;
pub mod fragments_on_composite_types;
pub mod known_argument_names;
pub mod known_directives;
pub mod known_fragment_names;
pub mod known_type_names;
pub mod leaf_field_selections;
pub mod lone_anonymous_operation;
pub mod no_unused_fragments;
/// Utilities validating GraphQL documents/operations
pub mod rule;
pub mod unique_operation_names;
pub mod values_of_correct_type;
pub mod variables_are_input_types;

pub use self::defaults::*;
pub use self::executable_definitions::*;
pub use self::fields_on_correct_type::*;
pub use self::fragments_on_composite_types::*;
pub use self::known_argument_names::*;
pub use self::known_directives::*;
pub use self::known_fragment_names::*;
pub use self::known_type_names::*;
pub use self::leaf_field_selections::*;
pub use self::lone_anonymous_operation::*;
pub use self::no_unused_fragments::*;
pub use self::rule::*;
pub use self::unique_operation_names::*;
pub use self::values_of_correct_type::*;
pub use self::variables_are_input_types::*;
