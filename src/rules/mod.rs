mod builder;
pub use builder::RuleSetBuilder;

use std::collections::HashMap;

use crate::{evaluator, AuthorizationDecision, AuthorizationRequest};

/// A single authorization grant: `roles` may use `allowed_methods` on `resource`.
///
/// A rule without methods or without roles never grants anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    resource: String,
    allowed_methods: Vec<String>,
    roles: Vec<String>,
}

impl Rule {
    pub fn new<M, R>(resource: impl Into<String>, allowed_methods: M, roles: R) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            resource: resource.into(),
            allowed_methods: allowed_methods.into_iter().map(Into::into).collect(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn allowed_methods(&self) -> &[String] {
        &self.allowed_methods
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn allows_method(&self, method: &str) -> bool {
        self.allowed_methods.iter().any(|allowed| allowed == method)
    }

    pub fn permits_role(&self, role: &str) -> bool {
        self.roles.iter().any(|permitted| permitted == role)
    }

    pub fn is_inert(&self) -> bool {
        self.allowed_methods.is_empty() || self.roles.is_empty()
    }
}

/// Read-only, ordered set of rules.
///
/// Rules are indexed by resource at construction time. The index keeps
/// the original order of rules sharing a resource, so lookups observe
/// the same sequence a full scan would.
#[derive(Debug, Default, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    by_resource: HashMap<String, Vec<usize>>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        let mut by_resource: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, rule) in rules.iter().enumerate() {
            by_resource
                .entry(rule.resource.clone())
                .or_default()
                .push(position);
        }

        Self { rules, by_resource }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Rules declared for exactly this resource, in declaration order.
    pub fn rules_for<'a>(&'a self, resource: &str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.by_resource
            .get(resource)
            .into_iter()
            .flatten()
            .map(move |&position| &self.rules[position])
    }

    pub fn is_authorized(&self, request: &AuthorizationRequest) -> bool {
        evaluator::is_authorized(request, self)
    }

    pub fn evaluate(&self, request: &AuthorizationRequest) -> AuthorizationDecision {
        self.is_authorized(request).into()
    }

    /// Decision for a bare `(resource, method, role)` triple.
    pub fn check(&self, resource: &str, method: &str, role: &str) -> bool {
        self.is_authorized(&AuthorizationRequest::new(resource, method, role))
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        RuleSet::new(rules)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
