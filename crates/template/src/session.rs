//! Logged-in user context
//!
//! Write paths receive a `&SessionContext` explicitly; the process-wide
//! instance is only a convenience for bindings that have nowhere else to
//! keep it.

use std::sync::{OnceLock, RwLock};

use crate::{Result, TemplateError};

#[derive(Debug, Default)]
pub struct SessionContext {
    display_name: RwLock<Option<String>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide session
    pub fn global() -> &'static SessionContext {
        static GLOBAL: OnceLock<SessionContext> = OnceLock::new();
        GLOBAL.get_or_init(SessionContext::new)
    }

    /// Open a session; a blank display name leaves the session logged out
    pub fn login(&self, display_name: &str) {
        let name = display_name.trim();
        if name.is_empty() {
            log::warn!("ignoring login with a blank display name");
            self.logout();
            return;
        }
        let mut slot = self.display_name.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(name.to_string());
        log::info!("session opened for {name}");
    }

    pub fn logout(&self) {
        let mut slot = self.display_name.write().unwrap_or_else(|e| e.into_inner());
        if let Some(name) = slot.take() {
            log::info!("session closed for {name}");
        }
    }

    pub fn current_user_display_name(&self) -> Option<String> {
        self.display_name
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user_display_name().is_some()
    }

    /// Display name of the logged-in user, or `NotLoggedIn`
    pub fn require_user(&self) -> Result<String> {
        self.current_user_display_name()
            .ok_or(TemplateError::NotLoggedIn)
    }
}
