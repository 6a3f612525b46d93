//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! The mounted dataset is read-only after startup, so it is shared behind a
//! plain `Arc` with no lock. The chat relay is optional: when no LLM is
//! configured the server still serves the dashboard and `/api/chat` fails.

use std::sync::Arc;

use dashboard::Dashboard;

use crate::services::relay::ChatRelay;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub relay: Option<Arc<dyn ChatRelay>>,
}

impl AppState {
    #[must_use]
    pub fn new(dashboard: Dashboard, relay: Option<Arc<dyn ChatRelay>>) -> Self {
        Self { dashboard: Arc::new(dashboard), relay }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
