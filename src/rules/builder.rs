use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    rules::{Rule, RuleSet},
    validator::Field,
    ConfigurationError, DefaultValidator, Result, RuleValidator,
};

pub struct RuleSetBuilder<V> {
    validator: V,
    source: Source,
}

enum Source {
    Yaml(String),
    File(PathBuf),
}

impl RuleSetBuilder<DefaultValidator> {
    pub fn from_yaml(yaml: &str) -> Self {
        Self {
            validator: DefaultValidator,
            source: Source::Yaml(yaml.into()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            validator: DefaultValidator,
            source: Source::File(path.as_ref().to_path_buf()),
        }
    }
}

impl<V> RuleSetBuilder<V>
where
    V: RuleValidator,
{
    pub fn with_validator<W: RuleValidator>(self, validator: W) -> RuleSetBuilder<W> {
        RuleSetBuilder {
            validator,
            source: self.source,
        }
    }

    pub fn build(self) -> Result<RuleSet> {
        let yaml = match self.source {
            Source::Yaml(yaml) => yaml,
            Source::File(path) => {
                debug!(path = %path.display(), "reading authorization rules");
                fs::read_to_string(&path)
                    .map_err(|source| ConfigurationError::Reading { path, source })?
            }
        };

        let definition: RulesDefinition = serde_yaml::from_str(&yaml)?;

        let rules = definition
            .rules
            .into_iter()
            .map(|rule| process_rule(&self.validator, rule))
            .collect::<Result<Vec<_>>>()?;

        info!(rules = rules.len(), "loaded authorization rules");
        Ok(RuleSet::new(rules))
    }
}

fn process_rule<V: RuleValidator>(validator: &V, rule: RuleDefinition) -> Result<Rule> {
    validator.validate(Field::Resource, &rule.resource)?;
    for method in &rule.allowed_methods {
        validator.validate(Field::AllowedMethod, method)?;
    }
    for role in &rule.roles {
        validator.validate(Field::Role, role)?;
    }

    Ok(Rule {
        resource: rule.resource,
        allowed_methods: rule.allowed_methods,
        roles: rule.roles,
    })
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesDefinition {
    rules: Vec<RuleDefinition>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDefinition {
    resource: String,
    allowed_methods: Vec<String>,
    roles: Vec<String>,
}
