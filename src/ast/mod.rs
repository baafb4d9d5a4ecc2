//! The node model and everything that walks it.

pub mod collect_fields;
pub mod from_parser;
pub mod node;
pub mod printer;
pub mod type_info;
pub mod type_info_visitor;
/// Generic traversal with enter/leave hooks
pub mod visitor;

pub use self::collect_fields::*;
pub use self::from_parser::*;
pub use self::node::*;
pub use self::printer::*;
pub use self::type_info::*;
pub use self::type_info_visitor::*;
pub use self::visitor::*;
