//! Application state passed to all handlers.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

use crate::config;
use crate::db::{DbPool, StoredResult};
use crate::session::Sessions;

/// A deleted history record held for a short restore window. Deleting
/// another record replaces it; the superseded record is gone for good.
#[derive(Debug, Clone)]
pub struct PendingUndo {
    pub record: StoredResult,
    pub expires_at: DateTime<Utc>,
}

impl PendingUndo {
    pub fn new(record: StoredResult) -> Self {
        Self {
            record,
            expires_at: Utc::now() + Duration::seconds(config::UNDO_WINDOW_SECS),
        }
    }

    pub fn expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared result/quiz database
    pub pool: DbPool,

    /// Per-cookie engine sessions
    pub sessions: Arc<Sessions>,

    /// Most recently deleted history record, if still restorable
    pub pending_undo: Arc<Mutex<Option<PendingUndo>>>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            sessions: Arc::new(Sessions::new()),
            pending_undo: Arc::new(Mutex::new(None)),
        }
    }
}
