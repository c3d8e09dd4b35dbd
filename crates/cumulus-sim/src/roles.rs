//! In-memory identity role store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use cumulus_core::{AccountScope, CumulusError, Result, RoleStore};

/// In-memory role store scoped to one account
pub struct SimRoleStore {
    scope: AccountScope,
    roles: RwLock<HashMap<String, String>>,
}

impl SimRoleStore {
    pub fn new(scope: AccountScope) -> Self {
        Self {
            scope,
            roles: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for SimRoleStore {
    fn default() -> Self {
        Self::new(AccountScope::default())
    }
}

#[async_trait]
impl RoleStore for SimRoleStore {
    async fn create_role(&self, name: &str) -> Result<String> {
        let mut roles = self.roles.write().await;
        if roles.contains_key(name) {
            return Err(CumulusError::validation(format!(
                "Role {name} already exists"
            )));
        }

        let arn = format!("arn:aws:iam::{}:role/{}", self.scope.account_id, name);
        roles.insert(name.to_string(), arn.clone());
        Ok(arn)
    }

    async fn resolve_role(&self, name_or_arn: &str) -> Result<String> {
        let roles = self.roles.read().await;

        let resolved = if name_or_arn.starts_with("arn:") {
            roles.values().find(|arn| arn.as_str() == name_or_arn)
        } else {
            roles.get(name_or_arn)
        };

        resolved
            .cloned()
            .ok_or_else(|| CumulusError::client(format!("Role {name_or_arn} does not exist")))
    }
}
