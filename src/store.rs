use std::{mem, sync::Arc};

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::{AuthorizationRequest, Result, RuleSet};

/// Holds the active `RuleSet` and lets it be replaced as a whole.
///
/// Readers take an `Arc` snapshot, so an evaluation that started before a
/// replacement keeps seeing the previous set in full.
#[derive(Debug, Default)]
pub struct RuleStore {
    current: RwLock<Arc<RuleSet>>,
}

impl RuleStore {
    pub fn new(rule_set: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rule_set)),
        }
    }

    pub fn current(&self) -> Arc<RuleSet> {
        self.current.read().clone()
    }

    /// Swaps in `rule_set` and returns the set it replaced.
    pub fn replace(&self, rule_set: RuleSet) -> Arc<RuleSet> {
        let next = Arc::new(rule_set);
        mem::replace(&mut *self.current.write(), next)
    }

    /// Builds a new set with `load` and swaps it in.
    ///
    /// When `load` fails the active set stays in place and the error is
    /// returned to the caller.
    pub fn reload<F>(&self, load: F) -> Result<usize>
    where
        F: FnOnce() -> Result<RuleSet>,
    {
        match load() {
            Ok(rule_set) => {
                let count = rule_set.len();
                self.replace(rule_set);
                info!(rules = count, "replaced authorization rules");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "keeping previous authorization rules");
                Err(e)
            }
        }
    }

    pub fn is_authorized(&self, request: &AuthorizationRequest) -> bool {
        self.current().is_authorized(request)
    }
}

impl From<RuleSet> for RuleStore {
    fn from(rule_set: RuleSet) -> Self {
        RuleStore::new(rule_set)
    }
}
