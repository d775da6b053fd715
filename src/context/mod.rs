//! # Shared test context
//!
//! Values one check captures for a later check in the same run: the id of a
//! listed user, the id returned by a create, the token returned by a
//! registration. Owned by the runner and handed to each scenario by `&mut`.

use std::collections::HashMap;
use std::fmt::{self, Display};

use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKey {
    UserId,
    CreatedUserId,
    ResourceId,
    RegisteredUserId,
    Token,
}

impl ContextKey {
    pub const ALL: [ContextKey; 5] = [
        ContextKey::UserId,
        ContextKey::CreatedUserId,
        ContextKey::ResourceId,
        ContextKey::RegisteredUserId,
        ContextKey::Token,
    ];

    /// Name used for `{{placeholder}}` interpolation.
    pub fn name(self) -> &'static str {
        match self {
            ContextKey::UserId => "user_id",
            ContextKey::CreatedUserId => "created_user_id",
            ContextKey::ResourceId => "resource_id",
            ContextKey::RegisteredUserId => "register_id",
            ContextKey::Token => "token",
        }
    }
}

impl Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestContext {
    user_id: Option<Value>,
    created_user_id: Option<Value>,
    resource_id: Option<Value>,
    register_id: Option<Value>,
    token: Option<Value>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: ContextKey) -> &Option<Value> {
        match key {
            ContextKey::UserId => &self.user_id,
            ContextKey::CreatedUserId => &self.created_user_id,
            ContextKey::ResourceId => &self.resource_id,
            ContextKey::RegisteredUserId => &self.register_id,
            ContextKey::Token => &self.token,
        }
    }

    fn slot_mut(&mut self, key: ContextKey) -> &mut Option<Value> {
        match key {
            ContextKey::UserId => &mut self.user_id,
            ContextKey::CreatedUserId => &mut self.created_user_id,
            ContextKey::ResourceId => &mut self.resource_id,
            ContextKey::RegisteredUserId => &mut self.register_id,
            ContextKey::Token => &mut self.token,
        }
    }

    pub fn get(&self, key: ContextKey) -> Option<&Value> {
        self.slot(key).as_ref()
    }

    /// Overwrites any earlier value.
    pub fn set(&mut self, key: ContextKey, value: Value) {
        *self.slot_mut(key) = Some(value);
    }

    pub fn require(&self, key: ContextKey) -> Result<&Value> {
        self.get(key).ok_or(Error::MissingContext(key))
    }

    /// Every captured value rendered for interpolation. Strings lose their
    /// quotes; numbers and other values use their JSON text.
    pub fn variables(&self) -> HashMap<String, String> {
        ContextKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key.name().to_string(), render(value))))
            .collect()
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
