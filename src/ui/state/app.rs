use std::sync::Arc;

use tracing::info;

use crate::domain::entities::session::{Domain, SessionContext};
use crate::ui::state::alert::AlertQueue;
use crate::usecase::ports::gateway::GatewayError;
use crate::usecase::ports::guards::{CancelDialog, DirtyOperations};

/// Top-level console state: the session and the cross-cutting guards that
/// sit above any single screen.
pub struct AppShell {
    dialogs: Arc<dyn CancelDialog>,
    pub alerts: AlertQueue,
    session: Option<SessionContext>,
}

impl AppShell {
    pub fn new(dialogs: Arc<dyn CancelDialog>) -> Self {
        AppShell {
            dialogs,
            alerts: AlertQueue::new(),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    pub fn login(&mut self, session: SessionContext) {
        info!(user = %session.username, "session opened");
        self.session = Some(session);
    }

    /// Logout is gated by the unsaved-changes check of the current screen.
    /// Returns true when the session was actually closed.
    pub fn logout(&mut self, current_screen: Option<&dyn DirtyOperations>) -> bool {
        if !self.confirm_discard_if_dirty(current_screen) {
            return false;
        }
        self.session = None;
        true
    }

    /// Switching domains drops all per-screen state server-side, so it runs
    /// the same guard as logout. Returns true when the switch happened.
    pub fn switch_domain(
        &mut self,
        next: Domain,
        current_screen: Option<&dyn DirtyOperations>,
    ) -> bool {
        match self.session.as_ref() {
            Some(session) if session.domain == next => return true,
            Some(_) => {}
            None => return false,
        }
        if !self.confirm_discard_if_dirty(current_screen) {
            return false;
        }
        if let Some(session) = self.session.as_mut() {
            info!(domain = %next.code, "domain switched");
            session.domain = next;
        }
        true
    }

    /// Authorization failures arrive on a separate channel from list errors:
    /// the session is cleared and the caller redirects to login.
    pub fn handle_gateway_error(&mut self, error: &GatewayError) {
        if matches!(error, GatewayError::Unauthorized) {
            self.session = None;
            self.alerts.error("You have been logged out because of inactivity or lack of permissions");
        }
    }

    fn confirm_discard_if_dirty(&self, current_screen: Option<&dyn DirtyOperations>) -> bool {
        match current_screen {
            Some(ops) if ops.is_dirty() => self.dialogs.confirm_discard(),
            _ => true,
        }
    }
}
