//! Recruiter admin access gate

use crate::config::AdminConfig;
use crate::error::{Result, ScreenerError};
use crate::output::insights::AdminOverview;
use crate::storage::{CandidateStore, PersistedRow};
use log::{info, warn};

/// Plain equality check against the configured username and password.
pub struct AdminGate {
    username: String,
    password: String,
}

/// Proof of a successful login; the only way to read the full store.
#[derive(Debug)]
pub struct AdminSession {
    username: String,
}

/// Everything the admin panel shows
#[derive(Debug, Clone)]
pub struct AdminView {
    pub rows: Vec<PersistedRow>,
    pub overview: AdminOverview,
}

impl AdminGate {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<AdminSession> {
        if username == self.username && password == self.password {
            info!("Admin '{}' logged in", username);
            Ok(AdminSession {
                username: username.to_string(),
            })
        } else {
            warn!("Rejected admin login for '{}'", username);
            Err(ScreenerError::Authentication)
        }
    }
}

impl AdminSession {
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Load every stored analysis. `None` when the store is empty.
    pub async fn load_view(&self, store: &CandidateStore) -> Result<Option<AdminView>> {
        let rows = store.load_all().await?;
        if rows.is_empty() {
            return Ok(None);
        }

        let overview = AdminOverview::from_rows(&rows);
        Ok(Some(AdminView { rows, overview }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_default_credentials() {
        let gate = AdminGate::new(&Config::default().admin);
        let session = gate.login("admin", "12345").unwrap();
        assert_eq!(session.username(), "admin");
    }

    #[test]
    fn test_rejected_credentials() {
        let gate = AdminGate::new(&Config::default().admin);
        for (user, pass) in [("admin", "1234"), ("Admin", "12345"), ("", ""), ("root", "12345")] {
            assert!(matches!(gate.login(user, pass), Err(ScreenerError::Authentication)));
        }
    }

    #[tokio::test]
    async fn test_view_of_empty_store() {
        let store = CandidateStore::in_memory().await.unwrap();
        let session = AdminGate::new(&Config::default().admin).login("admin", "12345").unwrap();
        assert!(session.load_view(&store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_view_with_rows() {
        let store = CandidateStore::in_memory().await.unwrap();
        store
            .append(&crate::storage::store::tests::sample("a.txt", 40.0))
            .await
            .unwrap();

        let session = AdminGate::new(&Config::default().admin).login("admin", "12345").unwrap();
        let view = session.load_view(&store).await.unwrap().unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.overview.role_distribution[0].role, "Backend Developer");
    }
}
