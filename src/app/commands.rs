//! Command handlers - business logic for processing UI events

use chrono::Utc;

use crate::app::actor::AppActor;
use crate::app::store::Action;
use crate::constants::REFILL_PRICE_CENTS;
use crate::messages::ui_events::AppTab;
use crate::messages::DeviceCommand;
use crate::models::{ColonyStatus, OrderItem, RefillOrder, TaskStatus};

impl AppActor {
    // ========================
    // Navigation
    // ========================

    pub(crate) fn switch_tab(&mut self, tab: AppTab) {
        if tab == AppTab::Colony && self.store.state().selected_colony.is_none() {
            // Jumping straight to the detail view opens the colony under the cursor
            let colony = self
                .store
                .state()
                .colonies
                .get(self.ui.colony_index)
                .cloned();
            self.store.dispatch(Action::SelectColony(colony));
        }
        self.store.dispatch(Action::SelectTab(tab));
    }

    fn active_list_len(&self) -> usize {
        let state = self.store.state();
        match state.active_tab {
            AppTab::Dashboard | AppTab::Colony => state.colonies.len(),
            AppTab::Tasks => state.tasks.len(),
            AppTab::Alerts => state.notifications.len(),
            AppTab::Supply => state.subscription.packs.len(),
            AppTab::Family => 0,
        }
    }

    fn active_index_mut(&mut self) -> &mut usize {
        match self.store.state().active_tab {
            AppTab::Dashboard | AppTab::Colony => &mut self.ui.colony_index,
            AppTab::Tasks => &mut self.ui.task_index,
            AppTab::Alerts => &mut self.ui.alert_index,
            AppTab::Supply | AppTab::Family => &mut self.ui.pack_index,
        }
    }

    pub(crate) fn next_item(&mut self) {
        let len = self.active_list_len();
        if len > 0 {
            let index = self.active_index_mut();
            *index = (*index + 1) % len;
        }
    }

    pub(crate) fn prev_item(&mut self) {
        let len = self.active_list_len();
        if len > 0 {
            let index = self.active_index_mut();
            *index = index.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub(crate) fn back(&mut self) {
        if self.store.state().active_tab == AppTab::Colony {
            self.store.dispatch(Action::SelectColony(None));
            self.store.dispatch(Action::SelectTab(AppTab::Dashboard));
        }
    }

    // ========================
    // Selection actions
    // ========================

    pub(crate) fn activate(&mut self) {
        match self.store.state().active_tab {
            AppTab::Dashboard => self.open_selected_colony(),
            AppTab::Tasks => self.complete_selected_task(),
            AppTab::Alerts => self.read_selected_alert(),
            AppTab::Colony | AppTab::Family | AppTab::Supply => {}
        }
    }

    fn open_selected_colony(&mut self) {
        let colony = self
            .store
            .state()
            .colonies
            .get(self.ui.colony_index)
            .cloned();
        if let Some(colony) = colony {
            tracing::info!(colony = %colony.id, "Opening colony detail");
            self.store.dispatch(Action::SelectColony(Some(colony)));
            self.store.dispatch(Action::SelectTab(AppTab::Colony));
        }
    }

    fn complete_selected_task(&mut self) {
        let task = self.store.state().tasks.get(self.ui.task_index).cloned();
        let Some(task) = task else {
            return;
        };
        if task.status != TaskStatus::Pending {
            self.ui.status_line = String::from("Task already completed");
            return;
        }

        let completed_by = self.store.state().user.name.clone();
        tracing::info!(task = %task.id, by = %completed_by, "Completing task");
        self.store.dispatch(Action::CompleteTask {
            task_id: task.id.clone(),
            completed_by,
        });
        self.store.dispatch(Action::GrantXp(task.xp_reward));
        self.ui.status_line = format!("\"{}\" done, +{} XP", task.title, task.xp_reward);
    }

    fn read_selected_alert(&mut self) {
        let notification = self
            .store
            .state()
            .notifications
            .get(self.ui.alert_index)
            .cloned();
        let Some(notification) = notification else {
            return;
        };

        self.store
            .dispatch(Action::MarkNotificationRead(notification.id.clone()));

        // Follow the attached action to the colony it points at
        if let Some(colony_id) = notification.action.and_then(|a| a.colony_id) {
            let colony = self.store.state().colony_by_id(&colony_id).cloned();
            if let Some(colony) = colony {
                self.store.dispatch(Action::SelectColony(Some(colony)));
                self.store.dispatch(Action::SelectTab(AppTab::Colony));
            }
        }
    }

    // ========================
    // View preference
    // ========================

    pub(crate) fn toggle_compact_view(&mut self) {
        self.ui.compact_view = !self.ui.compact_view;
        let prefs = crate::storage::Prefs {
            compact_view: self.ui.compact_view,
        };
        if let Err(err) = self.prefs_store.save(&prefs) {
            tracing::warn!(%err, "Failed to save preferences");
        }
    }

    // ========================
    // Device pairing (simulated)
    // ========================

    pub(crate) fn pair_selected_colony(&mut self) {
        if self.ui.pairing_colony.is_some() {
            return;
        }
        let state = self.store.state();
        let colony = match state.active_tab {
            AppTab::Colony => state.selected_colony.clone(),
            _ => state.colonies.get(self.ui.colony_index).cloned(),
        };
        if let Some(colony) = colony {
            tracing::info!(colony = %colony.id, "Starting pairing handshake");
            self.ui.pairing_colony = Some(colony.id.clone());
            self.ui.status_line = format!("Pairing with {}...", colony.name);
            let _ = self.device_tx.send(DeviceCommand::Pair {
                colony_id: colony.id,
            });
        }
    }

    pub(crate) fn finish_pairing(&mut self, colony_id: &str) {
        self.ui.pairing_colony = None;
        let colony = self.store.state().colony_by_id(colony_id).cloned();
        if let Some(mut colony) = colony {
            colony.status = ColonyStatus::Active;
            colony.updated_at = Utc::now();
            self.ui.status_line = format!("Paired with {}", colony.name);
            self.store.dispatch(Action::UpdateColony(colony));
        }
    }

    // ========================
    // Supply
    // ========================

    pub(crate) fn use_dose(&mut self) {
        let pack = self
            .store
            .state()
            .subscription
            .packs
            .get(self.ui.pack_index)
            .cloned();
        let Some(pack) = pack else {
            return;
        };
        if pack.doses_remaining == 0 {
            self.ui.status_line = format!("{} is empty, order a refill", pack.name);
            return;
        }
        self.store.dispatch(Action::ConsumeDose {
            pack_id: pack.id.clone(),
        });
        self.ui.status_line = format!("Used one dose of {}", pack.name);
    }

    pub(crate) fn order_refill(&mut self) {
        let state = self.store.state();
        let Some(pack) = state.subscription.packs.get(self.ui.pack_index) else {
            return;
        };

        let order = RefillOrder {
            id: format!("order-{}", state.subscription.orders.len() + 1),
            placed_at: Utc::now(),
            items: vec![OrderItem {
                name: pack.name.clone(),
                quantity: 1,
                price_cents: REFILL_PRICE_CENTS,
            }],
            total_cents: REFILL_PRICE_CENTS,
            status: crate::models::OrderStatus::Processing,
        };
        self.ui.status_line = format!("Refill ordered for {}", pack.name);
        tracing::info!(order = %order.id, "Placing refill order");
        self.store.dispatch(Action::PlaceRefillOrder(order));
    }

    // ========================
    // Onboarding
    // ========================

    pub(crate) fn dismiss_onboarding(&mut self) {
        self.store.dispatch(Action::SetOnboardingComplete(true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::storage::{Prefs, PrefsStore};
    use tokio::sync::mpsc;

    fn actor() -> AppActor {
        let (device_tx, _device_rx) = mpsc::unbounded_channel();
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        AppActor::new(
            seed::initial_state(),
            Prefs::default(),
            PrefsStore::with_dir(std::env::temp_dir().join("verdant-test-prefs")),
            device_tx,
            render_tx,
        )
    }

    #[test]
    fn test_completing_task_grants_xp() {
        let mut actor = actor();
        actor.switch_tab(AppTab::Tasks);
        let before = actor.store.state().user.xp;
        let reward = actor.store.state().tasks[0].xp_reward;

        actor.activate();

        assert_eq!(actor.store.state().user.xp, before + reward);
        assert_eq!(
            actor.store.state().tasks[0].status,
            TaskStatus::Completed
        );
    }

    #[test]
    fn test_dashboard_enter_opens_detail() {
        let mut actor = actor();
        actor.activate();

        let state = actor.store.state();
        assert_eq!(state.active_tab, AppTab::Colony);
        assert_eq!(
            state.selected_colony.as_ref().map(|c| c.id.clone()),
            Some(state.colonies[0].id.clone())
        );
    }

    #[test]
    fn test_back_clears_selection() {
        let mut actor = actor();
        actor.activate();
        actor.back();

        let state = actor.store.state();
        assert_eq!(state.active_tab, AppTab::Dashboard);
        assert!(state.selected_colony.is_none());
    }

    #[test]
    fn test_pairing_marks_colony_active() {
        let mut actor = actor();
        let offline = actor
            .store
            .state()
            .colonies
            .iter()
            .position(|c| c.status != ColonyStatus::Active)
            .expect("seed data has a non-active colony");
        actor.ui.colony_index = offline;

        actor.pair_selected_colony();
        let id = actor.ui.pairing_colony.clone().expect("pairing started");
        actor.finish_pairing(&id);

        assert!(actor.ui.pairing_colony.is_none());
        assert_eq!(
            actor.store.state().colony_by_id(&id).map(|c| c.status),
            Some(ColonyStatus::Active)
        );
    }
}
