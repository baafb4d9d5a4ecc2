/// Utilities validating GraphQL AST trees
pub mod rules;
pub mod utils;
pub mod validate;

#[cfg(test)]
pub mod test_utils;

pub use self::rules::*;
pub use self::utils::{ValidationContext, ValidationError, ValidationErrorContext};
pub use self::validate::*;
