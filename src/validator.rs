use crate::errors::Result;

/// Hook invoked by `RuleSetBuilder` for every value of a rule definition.
pub trait RuleValidator {
    fn validate(&self, field: Field, value: &str) -> Result<()>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Resource,
    AllowedMethod,
    Role,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Resource => "resource",
            Field::AllowedMethod => "allowed_methods",
            Field::Role => "roles",
        }
    }
}

/// Accepts any value, including empty strings.
#[derive(Debug, Default, Copy, Clone)]
pub struct DefaultValidator;

impl RuleValidator for DefaultValidator {
    fn validate(&self, _field: Field, _value: &str) -> Result<()> {
        Ok(())
    }
}
