use crate::core::{LifecycleError, Result, UserId};
use serde::{Deserialize, Serialize};

/// Language of the user-facing messages carried by lifecycle errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLocale {
    #[default]
    En,
    Vi,
}

/// Lifecycle engine configuration
///
/// Captured by every handler at registration time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleConfig {
    /// The only acting user allowed to hard-delete and recover records
    pub super_user: UserId,

    /// Locale of authorization, not-found and domain-rule messages
    pub locale: MessageLocale,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            super_user: 1,
            locale: MessageLocale::En,
        }
    }
}

impl LifecycleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the super-user sentinel
    pub fn super_user(mut self, user: UserId) -> Self {
        self.super_user = user;
        self
    }

    /// Set the message locale
    pub fn locale(mut self, locale: MessageLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Parse from a JSON document
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use entity_lifecycle::{LifecycleConfig, MessageLocale};
    ///
    /// let config = LifecycleConfig::from_json(r#"{ "super_user": 9, "locale": "vi" }"#).unwrap();
    /// assert_eq!(config.super_user, 9);
    /// assert_eq!(config.locale, MessageLocale::Vi);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LifecycleError::Registration(format!("Invalid lifecycle config: {}", e)))
    }

    #[inline]
    pub fn is_super_user(&self, user: UserId) -> bool {
        user == self.super_user
    }
}
