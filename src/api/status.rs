// Status check records - process-local store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Maximum number of records returned by a listing
const MAX_LISTED_CHECKS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

/// In-memory status check store. Records live for the process lifetime only;
/// durable persistence belongs to an external collaborator.
#[derive(Debug, Default)]
pub struct StatusStore {
    checks: Mutex<Vec<StatusCheck>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, input: StatusCheckCreate) -> StatusCheck {
        let check = StatusCheck {
            id: Uuid::new_v4(),
            client_name: input.client_name,
            timestamp: Utc::now(),
        };
        self.checks.lock().await.push(check.clone());
        check
    }

    pub async fn list(&self) -> Vec<StatusCheck> {
        let checks = self.checks.lock().await;
        checks.iter().take(MAX_LISTED_CHECKS).cloned().collect()
    }
}
