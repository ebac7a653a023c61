use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap};
use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tower_sessions::{MemoryStore, session_store::SessionStore, session::{Id, Record}};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "lead_session";
pub const REVENUE_RESULTS_KEY: &str = "revenueCalculatorData";
pub const GOVERNANCE_RESULTS_KEY: &str = "governanceScorecardData";

#[derive(Debug, thiserror::Error)]
#[error("result session store error: {0}")]
pub struct StoreError(#[from] tower_sessions::session_store::Error);

/// Short-lived, per-browser-session slots holding the last calculator result.
/// A slot is overwritten by every successful submission and removed when read.
/// `MemoryStore` only hides expired records, so live ids are tracked here and
/// `delete_expired` frees the rest.
#[derive(Debug, Clone)]
pub struct ResultStore {
    store: MemoryStore,
    ttl: Duration,
    expiries: Arc<Mutex<HashMap<Id, OffsetDateTime>>>,
}

impl ResultStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: MemoryStore::default(),
            ttl,
            expiries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of sessions still held, expired or not.
    pub async fn held_sessions(&self) -> usize {
        self.expiries.lock().await.len()
    }

    /// Deletes every session whose expiry has passed. Returns how many went.
    pub async fn delete_expired(&self) -> Result<usize, StoreError> {
        let now = OffsetDateTime::now_utc();
        let mut expiries = self.expiries.lock().await;
        let expired: Vec<Id> = expiries
            .iter()
            .filter(|(_, expiry)| **expiry <= now)
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            self.store.delete(id).await?;
            expiries.remove(id);
        }
        Ok(expired.len())
    }

    /// Runs `delete_expired` every `period` until the task is aborted.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                match store.delete_expired().await {
                    Ok(0) => {}
                    Ok(n) => tracing::debug!("Swept {} expired result sessions", n),
                    Err(e) => tracing::error!("Failed to sweep expired result sessions: {}", e),
                }
            }
        })
    }

    fn expiry(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc() + self.ttl
    }

    /// Writes `value` under `key`, reusing the caller's session while it is
    /// still live. Returns the id the client should keep.
    pub async fn stash(&self, session: Option<Id>, key: &str, value: Value) -> Result<Id, StoreError> {
        let existing = match session {
            Some(id) => self.store.load(&id).await?,
            None => None,
        };

        match existing {
            Some(mut record) => {
                record.data.insert(key.to_string(), value);
                record.expiry_date = self.expiry();
                self.store.save(&record).await?;
                self.expiries.lock().await.insert(record.id, record.expiry_date);
                Ok(record.id)
            }
            None => {
                let mut record = Record {
                    id: Id(Uuid::new_v4().as_u128() as i128),
                    data: Default::default(),
                    expiry_date: self.expiry(),
                };
                record.data.insert(key.to_string(), value);
                self.store.create(&mut record).await?;
                self.expiries.lock().await.insert(record.id, record.expiry_date);
                Ok(record.id)
            }
        }
    }

    /// Removes and returns the slot. Unknown or expired sessions read as empty.
    pub async fn take(&self, session: Option<Id>, key: &str) -> Result<Option<Value>, StoreError> {
        let Some(id) = session else {
            return Ok(None);
        };
        let Some(mut record) = self.store.load(&id).await? else {
            return Ok(None);
        };

        let value = record.data.remove(key);
        if value.is_some() {
            if record.data.is_empty() {
                self.store.delete(&id).await?;
                self.expiries.lock().await.remove(&id);
            } else {
                self.store.save(&record).await?;
            }
        }
        Ok(value)
    }
}

pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Id> {
    let prefix = format!("{}=", SESSION_COOKIE);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()).map(str::to_string))
        .and_then(|raw| raw.parse::<i128>().ok())
        .map(Id)
}

/// Browser-session cookie, no Max-Age.
pub fn session_cookie(id: &Id, secure: bool) -> String {
    let mut cookie = format!("{}={}; HttpOnly; SameSite=Lax; Path=/", SESSION_COOKIE, id.0);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
