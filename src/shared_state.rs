use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use uuid::Uuid;

use crate::config::Config;
use crate::models::proposal::ProposalRecord;

#[derive(Clone)]
pub struct AppState {
    /// Map of proposal id to stored record
    proposals: Arc<RwLock<HashMap<Uuid, ProposalRecord>>>,
    started_at: Instant,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            proposals: Arc::new(RwLock::new(HashMap::new())),
            started_at: Instant::now(),
        }
    }

    pub fn insert(&self, record: ProposalRecord) {
        if let Ok(mut map) = self.proposals.write() {
            map.insert(record.id, record);
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<ProposalRecord> {
        if let Ok(map) = self.proposals.read() {
            map.get(id).cloned()
        } else {
            None
        }
    }

    /// All stored proposals, newest first.
    pub fn list(&self) -> Vec<ProposalRecord> {
        let mut records: Vec<ProposalRecord> = if let Ok(map) = self.proposals.read() {
            map.values().cloned().collect()
        } else {
            Vec::new()
        };
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Removes a proposal; returns false for unknown ids.
    pub fn remove(&self, id: &Uuid) -> bool {
        if let Ok(mut map) = self.proposals.write() {
            map.remove(id).is_some()
        } else {
            false
        }
    }

    pub fn count(&self) -> usize {
        self.proposals.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>` — a single `.with_state(shared)` covers both.
#[derive(Clone)]
pub struct SharedState {
    pub app: AppState,
    pub config: Config,
}

impl axum::extract::FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> Self {
        shared.app.clone()
    }
}

impl axum::extract::FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Self {
        shared.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalculationConfig;
    use crate::models::proposal::{ProposalInput, ProposalRecord};
    use crate::services::proposal_engine;
    use chrono::{Duration, Utc};

    fn record(client: &str, age_minutes: i64) -> ProposalRecord {
        let input = ProposalInput {
            client_name: client.to_string(),
            monthly_consumption_kwh: 500.0,
            local_irradiation_kwh_m2_day: 5.0,
            system_efficiency_percent: 80.0,
            panel_power_wp: 550.0,
            energy_tariff: 0.9,
            system_price: 20000.0,
            excess_price: 0.0,
            excess_estimate_kwh: 0.0,
        };
        let result = proposal_engine::compute(&input, &CalculationConfig::default()).unwrap();
        ProposalRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
            input,
            result,
        }
    }

    #[test]
    fn insert_get_remove_roundtrip() {
        let state = AppState::new();
        let rec = record("A", 0);
        let id = rec.id;
        state.insert(rec);
        assert_eq!(state.count(), 1);
        assert_eq!(state.get(&id).unwrap().input.client_name, "A");
        assert!(state.remove(&id));
        assert!(!state.remove(&id));
        assert!(state.get(&id).is_none());
    }

    #[test]
    fn default_state_starts_empty() {
        let state = AppState::default();
        assert_eq!(state.count(), 0);
        assert!(state.list().is_empty());
    }

    #[test]
    fn list_is_newest_first() {
        let state = AppState::new();
        state.insert(record("old", 60));
        state.insert(record("new", 0));
        state.insert(record("mid", 30));
        let names: Vec<String> = state
            .list()
            .into_iter()
            .map(|r| r.input.client_name)
            .collect();
        assert_eq!(names, ["new", "mid", "old"]);
    }
}
