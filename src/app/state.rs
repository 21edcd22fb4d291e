//! App state - pure data structures with no I/O logic

use serde::{Deserialize, Serialize};

use crate::messages::ui_events::AppTab;
use crate::messages::RenderState;
use crate::models::{Colony, FamilyMember, Notification, Subscription, Task};

/// Authoritative application snapshot
///
/// Owned exclusively by the [`Store`](crate::app::Store); every update goes
/// through a dispatched [`Action`](crate::app::Action) and produces a fresh
/// value, so readers never observe a half-applied transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub active_tab: AppTab,
    /// Colony shown in the detail view, if any
    pub selected_colony: Option<Colony>,
    pub colonies: Vec<Colony>,
    /// Flat task list, mirrored inside the owning colonies
    pub tasks: Vec<Task>,
    pub notifications: Vec<Notification>,
    pub user: FamilyMember,
    pub subscription: Subscription,
    pub onboarding_complete: bool,
}

impl AppState {
    pub fn colony_by_id(&self, id: &str) -> Option<&Colony> {
        self.colonies.iter().find(|c| c.id == id)
    }
}

/// Transient UI state owned by the app actor, never persisted
/// (aside from the compact-view flag, which mirrors the prefs file)
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub compact_view: bool,
    pub show_help: bool,
    /// Colony id currently in the pairing handshake
    pub pairing_colony: Option<String>,
    pub status_line: String,
    // Per-tab list selections
    pub colony_index: usize,
    pub task_index: usize,
    pub alert_index: usize,
    pub pack_index: usize,
}

impl UiState {
    /// Selection index of the list shown on the given tab
    pub fn index_for(&self, tab: AppTab) -> usize {
        match tab {
            AppTab::Dashboard | AppTab::Colony => self.colony_index,
            AppTab::Tasks => self.task_index,
            AppTab::Alerts => self.alert_index,
            AppTab::Supply => self.pack_index,
            AppTab::Family => 0,
        }
    }
}

impl AppState {
    /// Combine the domain snapshot with transient UI state for rendering
    pub fn to_render_state(&self, ui: &UiState) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            colonies: self.colonies.clone(),
            selected_colony: self.selected_colony.clone(),
            tasks: self.tasks.clone(),
            notifications: self.notifications.clone(),
            user: self.user.clone(),
            subscription: self.subscription.clone(),
            onboarding_pending: !self.onboarding_complete,
            compact_view: ui.compact_view,
            list_index: ui.index_for(self.active_tab),
            show_help: ui.show_help,
            pairing_colony: ui.pairing_colony.clone(),
            status_line: ui.status_line.clone(),
        }
    }
}
