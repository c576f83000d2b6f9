//! Shared application state
//!
//! Every signed-in user gets an isolated [`FinanceEngine`] over their own
//! in-memory collections, created on first use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use core_kernel::{Clock, SystemClock, UserId};
use finance_engine::{Collections, FinanceEngine};
use tracing::info;

use crate::config::ApiConfig;

/// Per-user engines keyed by user id
#[derive(Default)]
pub struct EngineRegistry {
    engines: RwLock<HashMap<UserId, FinanceEngine>>,
}

impl EngineRegistry {
    /// Number of users with an engine
    pub fn len(&self) -> usize {
        self.engines
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_or_create(&self, user: UserId, create: impl FnOnce() -> FinanceEngine) -> FinanceEngine {
        if let Some(engine) = self
            .engines
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&user)
        {
            return engine.clone();
        }
        let mut engines = self
            .engines
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        engines
            .entry(user)
            .or_insert_with(|| {
                info!(user = %user, "Opened finance collections");
                create()
            })
            .clone()
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub engines: Arc<EngineRegistry>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates state reading the real-time clock
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            engines: Arc::new(EngineRegistry::default()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock handed to every engine
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The engine over `user`'s collections
    pub fn engine(&self, user: UserId) -> FinanceEngine {
        self.engines.get_or_create(user, || {
            FinanceEngine::new(Collections::in_memory(user), self.config.engine.clone())
                .with_clock(self.clock.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engines_are_isolated_per_user() {
        let state = AppState::new(ApiConfig::default());
        let alice = UserId::new();
        let bob = UserId::new();

        let first = state.engine(alice);
        let again = state.engine(alice);
        state.engine(bob);

        assert_eq!(state.engines.len(), 2);
        assert!(Arc::ptr_eq(
            &first.collections().transactions,
            &again.collections().transactions
        ));
    }
}
