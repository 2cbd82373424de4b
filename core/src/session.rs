//! Explicit session context — who is driving the desk.
//!
//! RULE: The core never reads ambient state. Anything identity- or
//! role-dependent receives a Session argument; collaborators get the same
//! value so they can authenticate the call however they like.

use crate::error::{DeskError, DeskResult};
use crate::types::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub role: Role,
    /// Bearer token, passed through to collaborators verbatim.
    pub token: String,
}

impl Session {
    pub fn new(user_id: impl Into<UserId>, role: Role, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            token: token.into(),
        }
    }

    /// Guard for admin-only surfaces.
    pub fn require_admin(&self, operation: &'static str) -> DeskResult<()> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(DeskError::Forbidden {
                role: self.role.as_str(),
                operation,
            })
        }
    }
}
