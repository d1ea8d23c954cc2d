//! Identity collaborator: supplies the acting user and organization scope.
//!
//! The workflow stamps these onto documents it creates but performs no
//! authorization; enforcement is the surrounding platform's concern
//! (store-side access rules).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub organization_id: String,
}

pub trait IdentityProvider: Send + Sync {
    fn current_actor(&self) -> Actor;
}

/// Fixed identity, for tests and single-tenant embeddings.
#[derive(Clone, Debug)]
pub struct StaticIdentity {
    actor: Actor,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            actor: Actor {
                user_id: user_id.into(),
                organization_id: organization_id.into(),
            },
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_actor(&self) -> Actor {
        self.actor.clone()
    }
}
