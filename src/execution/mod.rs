//! Runs a validated operation against a schema and a set of resolvers.

pub mod executor;
pub mod resolver;
pub mod result;
pub mod values;

pub use self::executor::*;
pub use self::resolver::*;
pub use self::result::*;
pub use self::values::*;

#[cfg(test)]
pub mod test_utils;
