//! User update builder.

use campus_core::enums::UserRole;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

pub struct UserUpdateBuilder(UserUpdate);

impl UserUpdateBuilder {
    pub fn new() -> Self {
        Self(UserUpdate::default())
    }

    pub fn email(mut self, val: impl Into<String>) -> Self {
        self.0.email = Some(val.into());
        self
    }

    pub fn role(mut self, val: UserRole) -> Self {
        self.0.role = Some(val);
        self
    }

    pub fn bio(mut self, val: Option<String>) -> Self {
        self.0.bio = Some(val);
        self
    }

    pub fn is_active(mut self, val: bool) -> Self {
        self.0.is_active = Some(val);
        self
    }

    pub fn build(self) -> UserUpdate {
        self.0
    }
}
