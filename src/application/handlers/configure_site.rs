//! ConfigureSiteHandler - adds a site or revises its capacity.
//!
//! Table changes never rewrite history: rows already in the ledger keep
//! the capacity they were appended with.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::sites::{SiteCapacityTable, SiteChange, SiteError, SiteId};

/// Handler for site configuration changes.
pub struct ConfigureSiteHandler {
    sites: Arc<RwLock<SiteCapacityTable>>,
}

impl ConfigureSiteHandler {
    pub fn new(sites: Arc<RwLock<SiteCapacityTable>>) -> Self {
        Self { sites }
    }

    /// Upserts the site and reports whether it was added or revised.
    pub async fn handle(&self, site: SiteId, capacity: u32) -> Result<SiteChange, SiteError> {
        let change = self.sites.write().await.upsert(site.clone(), capacity)?;
        info!(%site, capacity, ?change, "site capacity configured");
        Ok(change)
    }
}
