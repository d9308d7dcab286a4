// ABOUTME: Concurrent table of live counting sessions, one repetition counter per stream
// ABOUTME: Sharded map keyed by session UUID so independent streams never share a lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    CategoryRegistry, CounterConfig, CounterUpdate, RepetitionCounter, StateClassifier,
};
use crate::models::{ClassificationResult, Frame, Phase};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug)]
struct Session {
    category: String,
    counter: RepetitionCounter,
    latest_phase: Phase,
    frames_observed: u64,
    created_at: DateTime<Utc>,
    last_seen: DateTime<Utc>,
}

impl Session {
    fn into_summary(self, id: Uuid) -> SessionSummary {
        SessionSummary {
            id,
            repetitions: self.counter.count(),
            category: self.category,
            frames_observed: self.frames_observed,
            latest_phase: self.latest_phase,
            created_at: self.created_at,
            ended_at: Utc::now(),
        }
    }

    fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        // Clock stepping backwards reads as zero idle time
        (now - self.last_seen).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Outcome of feeding one frame to a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    /// Stateless classification of this frame
    pub classification: ClassificationResult,
    /// Counter update, `None` while the stream is warming up
    pub counter: Option<CounterUpdate>,
    /// Most recent detected phase for this session
    pub latest_phase: Phase,
}

/// Final state of an ended session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier
    pub id: Uuid,
    /// Category key the session counted
    pub category: String,
    /// Repetitions counted
    pub repetitions: u32,
    /// Frames submitted
    pub frames_observed: u64,
    /// Last detected phase, `UNKNOWN` if nothing was ever classified
    pub latest_phase: Phase,
    /// When the session started
    pub created_at: DateTime<Utc>,
    /// When the session ended
    pub ended_at: DateTime<Utc>,
}

/// Live sessions keyed by UUID
///
/// Cloning is cheap and shares the underlying table.
#[derive(Debug, Clone)]
pub struct SessionManager {
    registry: Arc<CategoryRegistry>,
    counter_config: CounterConfig,
    sessions: Arc<DashMap<Uuid, Session>>,
}

impl SessionManager {
    /// Create an empty session table over `registry`
    #[must_use]
    pub fn new(registry: Arc<CategoryRegistry>, counter_config: CounterConfig) -> Self {
        Self {
            registry,
            counter_config,
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Session table over the built-in categories with default tuning
    #[must_use]
    pub fn with_builtin() -> Self {
        Self::new(
            Arc::new(CategoryRegistry::with_builtin()),
            CounterConfig::default(),
        )
    }

    /// Open a session counting `category_key`
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not registered
    pub fn start(&self, category_key: &str) -> AppResult<Uuid> {
        let category = self
            .registry
            .get(category_key)
            .ok_or_else(|| AppError::not_found(format!("Category '{category_key}'")))?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        self.sessions.insert(
            id,
            Session {
                category: category_key.to_owned(),
                counter: RepetitionCounter::new(category, self.counter_config.clone()),
                latest_phase: Phase::Unknown,
                frames_observed: 0,
                created_at: now,
                last_seen: now,
            },
        );
        info!(session.id = %id, category = category_key, "Session started");
        Ok(id)
    }

    /// Feed one frame observed `timestamp` after the stream started
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist
    pub fn observe(&self, id: Uuid, frame: &Frame, timestamp: Duration) -> AppResult<SessionUpdate> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| session_not_found(id))?;

        let classification = StateClassifier::new(&self.registry)
            .with_visibility_threshold(self.counter_config.visibility_threshold)
            .classify(&session.category, frame);
        if let Some(phase) = classification.phase {
            session.latest_phase = phase;
        }
        session.frames_observed += 1;
        session.last_seen = Utc::now();
        let counter = session.counter.observe(frame, timestamp);

        debug!(
            session.id = %id,
            phase = %session.latest_phase,
            count = session.counter.count(),
            "Session frame observed"
        );
        Ok(SessionUpdate {
            classification,
            counter,
            latest_phase: session.latest_phase,
        })
    }

    /// Repetitions counted so far
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist
    pub fn count(&self, id: Uuid) -> AppResult<u32> {
        self.sessions
            .get(&id)
            .map(|session| session.counter.count())
            .ok_or_else(|| session_not_found(id))
    }

    /// Latest detected phase
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist
    pub fn latest_phase(&self, id: Uuid) -> AppResult<Phase> {
        self.sessions
            .get(&id)
            .map(|session| session.latest_phase)
            .ok_or_else(|| session_not_found(id))
    }

    /// Restart counting; the warm-up period begins again on the next frame
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist
    pub fn reset(&self, id: Uuid) -> AppResult<()> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| session_not_found(id))?;
        session.counter.reset();
        session.latest_phase = Phase::Unknown;
        session.frames_observed = 0;
        session.last_seen = Utc::now();
        info!(session.id = %id, "Session reset");
        Ok(())
    }

    /// Close the session and return its final state
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist
    pub fn end(&self, id: Uuid) -> AppResult<SessionSummary> {
        let (_, session) = self
            .sessions
            .remove(&id)
            .ok_or_else(|| session_not_found(id))?;

        let summary = session.into_summary(id);
        info!(
            session.id = %id,
            category = %summary.category,
            repetitions = summary.repetitions,
            "Session ended"
        );
        Ok(summary)
    }

    /// Close every session that has not been started, observed or reset
    /// within `max_idle`, returning their final states
    ///
    /// Abandoned streams never call [`Self::end`]; run this periodically to
    /// release them.
    pub fn expire_idle(&self, max_idle: Duration) -> Vec<SessionSummary> {
        let now = Utc::now();
        let stale: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().idle_for(now) >= max_idle)
            .map(|entry| *entry.key())
            .collect();

        let expired: Vec<SessionSummary> = stale
            .into_iter()
            .filter_map(|id| {
                // A concurrent `end` may have won the race; skip it
                self.sessions
                    .remove_if(&id, |_, session| session.idle_for(now) >= max_idle)
                    .map(|(id, session)| session.into_summary(id))
            })
            .collect();

        for summary in &expired {
            info!(
                session.id = %summary.id,
                category = %summary.category,
                repetitions = summary.repetitions,
                "Session expired after idle timeout"
            );
        }
        expired
    }

    /// Number of live sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is live
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Session {id}"))
}
