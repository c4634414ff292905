//! Session manager
//!
//! Tracks concurrent sessions. Sessions share the analytics sinks and
//! nothing else; each one carries its own record, tools, and router.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use presenter_config::{AgentSettings, FactSheet, Settings};
use presenter_core::{Error, Result, SpeechRuntime};
use presenter_persistence::AnalyticsSinks;

use crate::agent::PresenterAgent;

/// Default cap on concurrent sessions
const DEFAULT_MAX_SESSIONS: usize = 256;

/// A tracked session
pub struct Session {
    pub id: String,
    pub agent: Arc<PresenterAgent>,
    pub created_at: Instant,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Registry of live sessions, keyed by session id
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    agent_settings: AgentSettings,
    sinks: AnalyticsSinks,
    max_sessions: usize,
}

impl SessionManager {
    pub fn new(agent_settings: AgentSettings, sinks: AnalyticsSinks) -> Self {
        Self::with_capacity(agent_settings, sinks, DEFAULT_MAX_SESSIONS)
    }

    /// Build a manager wired from settings: JSONL sinks under the configured
    /// directory with the configured write budget.
    pub fn from_settings(settings: &Settings) -> Self {
        let sinks = AnalyticsSinks::jsonl(
            &settings.sink.dir,
            Duration::from_millis(settings.sink.write_timeout_ms),
        );
        Self::new(settings.agent.clone(), sinks)
    }

    pub fn with_capacity(
        agent_settings: AgentSettings,
        sinks: AnalyticsSinks,
        max_sessions: usize,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            agent_settings,
            sinks,
            max_sessions,
        }
    }

    /// Create and track a new session for the given fact sheet.
    ///
    /// Fails when the session cap is reached.
    pub fn create(
        &self,
        facts: &FactSheet,
        runtime: Arc<dyn SpeechRuntime>,
    ) -> Result<Arc<Session>> {
        let mut sessions = self.sessions.write();
        if sessions.len() >= self.max_sessions {
            return Err(Error::Session(format!(
                "session limit reached ({})",
                self.max_sessions
            )));
        }

        let agent = Arc::new(PresenterAgent::new(
            facts,
            &self.agent_settings,
            &self.sinks,
            runtime,
        ));
        let session = Arc::new(Session {
            id: agent.session_id().to_string(),
            agent,
            created_at: Instant::now(),
        });
        sessions.insert(session.id.clone(), session.clone());

        tracing::debug!(session_id = %session.id, live = sessions.len(), "Session tracked");
        Ok(session)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(id).cloned()
    }

    /// Stop tracking a session. The session's router finalizes on its own
    /// when its event channel closes; removal only drops the handle.
    pub fn remove(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.write().remove(id)
    }

    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }
}
