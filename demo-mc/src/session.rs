//! Composer sessions
//!
//! A session is one browser tab's worth of state: its track history and
//! the last request it generated (for Regenerate). Each session sits behind
//! its own async mutex so interactions of one session run one at a time
//! while other sessions proceed independently.
//!
//! Browsers do not reliably announce that a tab is gone, so sessions also
//! expire after a period without requests. A session whose lock is held
//! (a generation in progress) is never swept.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use crate::history::HistoryStore;
use crate::prompt::GenerationRequest;

#[derive(Debug, Default)]
pub struct ComposerSession {
    pub history: HistoryStore,
    /// Last request that produced a track
    pub last_request: Option<GenerationRequest>,
}

impl ComposerSession {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
struct SessionSlot {
    session: Arc<Mutex<ComposerSession>>,
    last_seen: Instant,
}

/// Live sessions by id
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionSlot>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new empty session
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(
            id,
            SessionSlot {
                session: Arc::new(Mutex::new(ComposerSession::new())),
                last_seen: Instant::now(),
            },
        );
        tracing::info!(session_id = %id, "Session started");
        id
    }

    /// Look up a session and mark it as active
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<ComposerSession>>> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id)?;
        slot.last_seen = Instant::now();
        Some(slot.session.clone())
    }

    /// End a session, dropping its history
    ///
    /// Track files on disk are left alone.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session ended");
        }
        removed
    }

    /// Drop sessions not used for longer than `max_idle`
    ///
    /// Returns how many were removed.
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, slot| {
            let idle = now.saturating_duration_since(slot.last_seen);
            if idle <= max_idle || slot.session.try_lock().is_err() {
                return true;
            }
            tracing::info!(session_id = %id, idle_secs = idle.as_secs(), "Session expired");
            false
        });

        before - sessions.len()
    }

    /// Sweep idle sessions every `period` until the runtime shuts down
    pub fn spawn_sweeper(&self, max_idle: Duration, period: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let expired = registry.sweep_idle(max_idle).await;
                if expired > 0 {
                    tracing::debug!(expired, "Idle sessions swept");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_remove() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty().await);

        let id = registry.create().await;
        assert_eq!(registry.len().await, 1);
        assert!(registry.get(id).await.is_some());

        assert!(registry.remove(id).await);
        assert!(!registry.remove(id).await);
        assert!(registry.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let a = registry.create().await;
        let b = registry.create().await;

        let session_a = registry.get(a).await.unwrap();
        session_a.lock().await.last_request = Some(GenerationRequest::default());

        let session_b = registry.get(b).await.unwrap();
        assert!(session_b.lock().await.last_request.is_none());
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let registry = SessionRegistry::new();
        let stale = registry.create().await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        let fresh = registry.create().await;

        assert_eq!(registry.sweep_idle(Duration::from_millis(30)).await, 1);
        assert!(registry.get(stale).await.is_none());
        assert!(registry.get(fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_lookup_keeps_session_alive() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        registry.get(id).await.unwrap();

        assert_eq!(registry.sweep_idle(Duration::from_millis(30)).await, 0);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_busy_session_is_not_swept() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        let session = registry.get(id).await.unwrap();
        let _busy = session.lock().await;
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(registry.sweep_idle(Duration::from_millis(30)).await, 0);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_sweeper_task_expires_sessions() {
        let registry = SessionRegistry::new();
        registry.create().await;

        let sweeper =
            registry.spawn_sweeper(Duration::from_millis(20), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(200)).await;
        sweeper.abort();

        assert!(registry.is_empty().await);
    }
}
