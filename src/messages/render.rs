//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::AppTab;
use crate::models::{Colony, FamilyMember, Notification, Subscription, Task};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Tab
    pub active_tab: AppTab,

    // Domain snapshot
    pub colonies: Vec<Colony>,
    pub selected_colony: Option<Colony>,
    pub tasks: Vec<Task>,
    pub notifications: Vec<Notification>,
    pub user: FamilyMember,
    pub subscription: Subscription,
    pub onboarding_pending: bool,

    // UI state
    pub compact_view: bool,
    /// Selection index of the list on the active tab
    pub list_index: usize,
    pub show_help: bool,
    /// Colony currently in the middle of the pairing handshake
    pub pairing_colony: Option<String>,
    pub status_line: String,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            active_tab: AppTab::Dashboard,
            colonies: Vec::new(),
            selected_colony: None,
            tasks: Vec::new(),
            notifications: Vec::new(),
            user: FamilyMember {
                id: String::new(),
                name: String::new(),
                avatar: String::new(),
                role: String::new(),
                level: 1,
                xp: 0,
                badges: Vec::new(),
                achievements: Vec::new(),
                tasks_completed: 0,
                plants_cared_for: 0,
            },
            subscription: Subscription::default(),
            onboarding_pending: false,
            compact_view: false,
            list_index: 0,
            show_help: false,
            pairing_colony: None,
            status_line: String::new(),
        }
    }
}
