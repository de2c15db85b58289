#![deny(rust_2018_idioms)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value
)]
mod errors;
mod evaluator;
mod request;
mod rules;
mod settings;
mod store;
mod validator;
pub mod web;

pub use errors::{ConfigurationError, Result};
pub use evaluator::is_authorized;
pub use request::{AuthorizationDecision, AuthorizationRequest};
pub use rules::{Rule, RuleSet, RuleSetBuilder};
pub use settings::{Settings, LISTEN_ADDR_VAR, RULES_FILE_VAR};
pub use store::RuleStore;
pub use validator::{DefaultValidator, Field, RuleValidator};
