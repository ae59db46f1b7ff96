use std::fmt::Write as _;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::entities::row::{RowStatus, TrackedRow};
use crate::domain::entities::session::SessionContext;
use crate::ui::state::alert::AlertQueue;
use crate::usecase::ports::gateway::AdminGateway;
use crate::usecase::ports::guards::{CancelDialog, DirtyOperations};
use crate::usecase::services::export::csv_allowed;
use crate::usecase::services::list_state::{FilterPair, PageOutcome, PageState};
use crate::usecase::services::modifiable::ModifiableList;
use crate::usecase::services::validation::{first_duplicate, valid_email, RowValidator};

const USER_USERS_URL: &str = "rest/user/users";
const USER_CSV_URL: &str = "rest/user/csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub status: RowStatus,
}

impl UserRow {
    pub fn blank() -> Self {
        UserRow {
            user_name: String::new(),
            email: String::new(),
            roles: String::new(),
            password: String::new(),
            domain: None,
            active: true,
            deleted: false,
            status: RowStatus::New,
        }
    }
}

impl TrackedRow for UserRow {
    fn status(&self) -> RowStatus {
        self.status
    }

    fn set_status(&mut self, status: RowStatus) {
        self.status = status;
    }
}

/// Field checks run only on new/updated rows; the duplicate scan covers the
/// whole set and stops at the first repeated username.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator;

impl RowValidator<UserRow> for UserValidator {
    fn validate(&self, rows: &[UserRow]) -> Result<(), String> {
        let mut message = String::new();
        if let Some((_, name)) = first_duplicate(rows.iter().map(|row| row.user_name.as_str())) {
            let _ = writeln!(message, "Duplicate user name '{name}'.");
        }
        for (index, row) in rows.iter().enumerate() {
            let number = index + 1;
            match row.status {
                RowStatus::New => {
                    if row.user_name.trim().is_empty() {
                        let _ = writeln!(message, "User {number} has no username defined.");
                    }
                    if row.roles.trim().is_empty() {
                        let _ = writeln!(message, "User {number} has no role defined.");
                    }
                    if row.password.trim().is_empty() {
                        let _ = writeln!(message, "User {number} has no password defined.");
                    }
                    if !valid_email(&row.email) {
                        let _ = writeln!(message, "User {number} has an incorrect email format.");
                    }
                }
                RowStatus::Updated => {
                    if row.roles.trim().is_empty() {
                        let _ = writeln!(message, "User {number} has no role defined.");
                    }
                    if !valid_email(&row.email) {
                        let _ = writeln!(message, "User {number} has an incorrect email format.");
                    }
                }
                RowStatus::Persisted | RowStatus::Removed => {}
            }
        }
        if message.trim().is_empty() {
            Ok(())
        } else {
            Err(message)
        }
    }
}

/// User administration: the full set is fetched once, paged locally, edited
/// optimistically and saved in a single round trip.
pub struct UsersScreen {
    gateway: Arc<dyn AdminGateway>,
    dialogs: Arc<dyn CancelDialog>,
    validator: UserValidator,
    pub alerts: AlertQueue,
    pub filters: FilterPair,
    pub pager: PageState,
    pub list: ModifiableList<UserRow>,
    pub loading: bool,
    pub user_roles: Vec<String>,
}

impl UsersScreen {
    pub fn new(gateway: Arc<dyn AdminGateway>, dialogs: Arc<dyn CancelDialog>) -> Self {
        UsersScreen {
            gateway,
            dialogs,
            validator: UserValidator,
            alerts: AlertQueue::new(),
            filters: FilterPair::new(),
            pager: PageState::client(),
            list: ModifiableList::new(),
            loading: false,
            user_roles: Vec::new(),
        }
    }

    pub fn filter_data(&mut self) {
        self.filters.set_active_filter();
        self.pager.reset_offset();
        self.reload();
    }

    pub fn on_page(&mut self, requested: usize) -> PageOutcome {
        self.pager
            .on_page(requested, Some(&self.list), self.dialogs.as_ref())
    }

    pub fn change_page_size(&mut self, new_size: usize) {
        self.pager.change_page_size(new_size);
    }

    /// The slice shown by the grid for the current page.
    pub fn visible_rows(&self) -> &[UserRow] {
        self.pager.slice(self.list.rows())
    }

    pub fn count(&self) -> usize {
        self.list.len()
    }

    pub fn reload(&mut self) {
        self.loading = true;
        match self
            .gateway
            .fetch_page(USER_USERS_URL, "entries", &self.filters.build_query_parameters())
        {
            Ok(page) => {
                match page
                    .rows
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<UserRow>, _>>()
                {
                    Ok(rows) => self.list.load(rows),
                    Err(err) => self
                        .alerts
                        .error(format!("Could not read the user list: {err}")),
                }
                if let Some(roles) = page.lookups.get("userRoles") {
                    self.user_roles = roles.clone();
                }
                self.loading = false;
            }
            Err(err) => {
                self.loading = false;
                self.alerts.error(format!("Could not load users: {err}"));
            }
        }
    }

    /// Appends a blank row and jumps to the page it lands on.
    pub fn add(&mut self) -> usize {
        let index = self.list.add(UserRow::blank());
        self.pager.spec.offset = self.pager.last_page(self.list.len());
        index
    }

    pub fn edit_user(&mut self, index: usize, apply: impl FnOnce(&mut UserRow)) {
        self.list.commit_edit(index, apply);
    }

    /// The logged-in account can never delete itself.
    pub fn delete_user(&mut self, index: usize, session: &SessionContext) {
        let Some(row) = self.list.rows().get(index) else {
            return;
        };
        if row.user_name == session.username {
            self.alerts.error(format!(
                "You cannot delete the logged in user: {}",
                session.username
            ));
            return;
        }
        self.list.remove(index);
    }

    /// Validates, sends only the modified subset, and reloads afterwards —
    /// on failure too, so local state resynchronizes with the server.
    pub fn save(&mut self) -> Result<(), String> {
        if let Err(message) = self.validator.validate(self.list.rows()) {
            self.alerts.error(message.clone());
            return Err(message);
        }
        let payload: Vec<Value> = self
            .list
            .modified()
            .iter()
            .map(|row| serde_json::to_value(row).unwrap_or(Value::Null))
            .collect();
        match self.gateway.save_rows(USER_USERS_URL, &payload) {
            Ok(()) => {
                self.alerts
                    .success("The operation 'update users' completed successfully.");
                self.reload();
                Ok(())
            }
            Err(err) => {
                warn!(%err, "user save failed, resynchronizing from server");
                self.reload();
                let message = format!("The operation 'update users' did not succeed: {err}");
                self.alerts.error(message.clone());
                Err(message)
            }
        }
    }

    /// Drops all pending markers after the user confirms, then reloads.
    pub fn cancel(&mut self) {
        if self.list.is_dirty() && !self.dialogs.confirm_discard() {
            return;
        }
        self.reload();
    }

    /// Pending edits are saved first so the export reflects what the user
    /// sees; the row-count guard runs before any request goes out.
    pub fn save_as_csv(&mut self) -> Result<String, String> {
        if self.list.is_dirty() {
            self.save()?;
        }
        if let Err(message) = csv_allowed(self.count()) {
            self.alerts.error(message.clone());
            return Err(message);
        }
        self.filters.reset_filters();
        self.gateway
            .download_csv(USER_CSV_URL, &self.filters.build_query_parameters())
            .map_err(|err| {
                let message = format!("Could not export users: {err}");
                self.alerts.error(message.clone());
                message
            })
    }
}

impl DirtyOperations for UsersScreen {
    fn is_dirty(&self) -> bool {
        self.list.is_dirty()
    }
}
