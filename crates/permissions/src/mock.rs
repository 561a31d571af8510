//! Mock Permissions Service Implementation
//!
//! Keeps parent groups in memory so tests can check what the mirror was told.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::{PermissionsError, PermissionsService};

/// A group change captured by the mock service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupChange {
    Added { player: Uuid, group: String },
    Removed { player: Uuid, group: String },
}

#[derive(Debug, Default)]
struct MockState {
    changes: Vec<GroupChange>,
    primary_groups: HashMap<Uuid, String>,
}

/// Mock permissions service for testing
#[derive(Debug, Clone, Default)]
pub struct MockPermissionsService {
    state: Arc<Mutex<MockState>>,
}

impl MockPermissionsService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_primary_group(&self, player: Uuid, group: &str) {
        self.state
            .lock()
            .unwrap()
            .primary_groups
            .insert(player, group.to_string());
    }

    /// Every change received so far, in order
    pub fn changes(&self) -> Vec<GroupChange> {
        self.state.lock().unwrap().changes.clone()
    }
}

#[async_trait::async_trait]
impl PermissionsService for MockPermissionsService {
    fn is_active(&self) -> bool {
        true
    }

    async fn add_parent(&self, player: Uuid, group: &str) -> Result<(), PermissionsError> {
        self.state.lock().unwrap().changes.push(GroupChange::Added {
            player,
            group: group.to_string(),
        });
        Ok(())
    }

    async fn remove_parent(&self, player: Uuid, group: &str) -> Result<(), PermissionsError> {
        self.state.lock().unwrap().changes.push(GroupChange::Removed {
            player,
            group: group.to_string(),
        });
        Ok(())
    }

    async fn primary_group(&self, player: Uuid) -> Option<String> {
        self.state.lock().unwrap().primary_groups.get(&player).cloned()
    }
}
