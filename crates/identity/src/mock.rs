//! Mock Identity Service Implementation
//!
//! Resolves names against an in-memory set of profiles. Used by
//! `IdentityServiceFactory` when provider is `"mock"` and by tests, which can
//! also switch it into an outage mode.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::{IdentityError, IdentityService, PlayerProfile};

#[derive(Debug, Default)]
struct MockState {
    profiles: Vec<PlayerProfile>,
    unavailable: bool,
    lookups: usize,
}

/// Mock identity service for testing
#[derive(Debug, Clone, Default)]
pub struct MockIdentityService {
    state: Arc<Mutex<MockState>>,
}

impl MockIdentityService {
    /// Create a new mock identity service with no known accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account, returning its UUID
    pub fn register(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.register_with_uuid(id, name);
        id
    }

    pub fn register_with_uuid(&self, id: Uuid, name: &str) {
        self.state.lock().unwrap().profiles.push(PlayerProfile {
            id,
            name: name.to_string(),
        });
    }

    /// Make every lookup fail as if the API were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unwrap().unavailable = unavailable;
    }

    /// Number of lookups served so far, failed ones included
    pub fn lookup_count(&self) -> usize {
        self.state.lock().unwrap().lookups
    }

    fn lookup<T>(
        &self,
        find: impl Fn(&PlayerProfile) -> Option<T>,
    ) -> Result<Option<T>, IdentityError> {
        let mut state = self.state.lock().unwrap();
        state.lookups += 1;
        if state.unavailable {
            return Err(IdentityError::Request(
                "Mock identity service unavailable".to_string(),
            ));
        }
        Ok(state.profiles.iter().find_map(find))
    }
}

#[async_trait::async_trait]
impl IdentityService for MockIdentityService {
    async fn uuid_for_username(&self, username: &str) -> Result<Option<Uuid>, IdentityError> {
        tracing::debug!(username = %username, "Mock identity lookup by name");
        self.lookup(|profile| profile.name.eq_ignore_ascii_case(username).then_some(profile.id))
    }

    async fn username_for_uuid(&self, uuid: Uuid) -> Result<Option<String>, IdentityError> {
        tracing::debug!(player_uuid = %uuid, "Mock identity lookup by uuid");
        self.lookup(|profile| (profile.id == uuid).then(|| profile.name.clone()))
    }
}
