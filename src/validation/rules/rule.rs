use crate::validation::utils::{ValidationContext, ValidationError};

pub trait ValidationRule: Send + Sync {
    /// Code reported in `extensions.code` for every error of the rule.
    fn error_code<'a>(&self) -> &'a str;

    fn validate<'a>(&self, ctx: &'a ValidationContext<'a>) -> Vec<ValidationError>;
}
