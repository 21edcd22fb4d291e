//! State store - the single source of truth for the application
//!
//! Every state transition goes through [`Store::dispatch`], which computes a
//! complete next snapshot from the previous one and only then publishes it.
//! Actions are total: an unknown id is a no-op, never an error.

use chrono::Utc;

use crate::app::state::AppState;
use crate::messages::ui_events::AppTab;
use crate::models::{Colony, FamilyMember, Plant, RefillOrder, Task, TaskStatus};

/// The closed set of state transitions
#[derive(Debug, Clone)]
pub enum Action {
    /// Record the active navigation tab
    SelectTab(AppTab),
    /// Record which colony is current for detail views
    SelectColony(Option<Colony>),
    /// Replace the colony with matching id; refreshes the selection if it
    /// points at the same colony
    UpdateColony(Colony),
    /// Replace the plant with matching id wherever a colony holds it
    UpdatePlant(Plant),
    /// Mark a pending task completed in the flat list and in its owning
    /// colony, in the same snapshot
    CompleteTask {
        task_id: String,
        completed_by: String,
    },
    /// Mark a notification read; repeat applications keep it read and
    /// refresh the read timestamp
    MarkNotificationRead(String),
    SetOnboardingComplete(bool),
    /// Gamification: add XP to the current user, recompute their level and
    /// bump the completed-task count
    GrantXp(u32),
    /// Use one dose from a nutrient pack
    ConsumeDose { pack_id: String },
    /// Append a refill order to the subscription history
    PlaceRefillOrder(RefillOrder),
}

/// Owns the [`AppState`] snapshot and serializes all transitions
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Store { state: initial }
    }

    /// Current snapshot
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action, replacing the snapshot with the reduced next state
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "Dispatching action");
        self.state = reduce(&self.state, action);
    }
}

fn complete_task(task: &mut Task, completed_by: &str, now: chrono::DateTime<chrono::Utc>) {
    // completed_by/completed_at are stamped only on the pending->completed
    // transition; completion is one-directional
    if task.status == TaskStatus::Pending {
        task.status = TaskStatus::Completed;
        task.completed_by = Some(completed_by.to_string());
        task.completed_at = Some(now);
    }
}

fn replace_plant(colony: &mut Colony, plant: &Plant) {
    for slot in &mut colony.plants {
        if slot.id == plant.id {
            *slot = plant.clone();
        }
    }
}

/// Pure reducer: previous snapshot + action -> next snapshot
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::SelectTab(tab) => {
            next.active_tab = tab;
        }

        Action::SelectColony(colony) => {
            next.selected_colony = colony;
        }

        Action::UpdateColony(colony) => {
            if let Some(slot) = next.colonies.iter_mut().find(|c| c.id == colony.id) {
                *slot = colony.clone();
            }
            let selected_matches = next
                .selected_colony
                .as_ref()
                .map_or(false, |c| c.id == colony.id);
            if selected_matches {
                next.selected_colony = Some(colony);
            }
        }

        Action::UpdatePlant(plant) => {
            for colony in &mut next.colonies {
                replace_plant(colony, &plant);
            }
            // The detail-view copy of the owning colony must not go stale
            if let Some(colony) = &mut next.selected_colony {
                replace_plant(colony, &plant);
            }
        }

        Action::CompleteTask {
            task_id,
            completed_by,
        } => {
            let now = Utc::now();
            for task in &mut next.tasks {
                if task.id == task_id {
                    complete_task(task, &completed_by, now);
                }
            }
            for colony in &mut next.colonies {
                for task in &mut colony.tasks {
                    if task.id == task_id {
                        complete_task(task, &completed_by, now);
                    }
                }
            }
            if let Some(colony) = &mut next.selected_colony {
                for task in &mut colony.tasks {
                    if task.id == task_id {
                        complete_task(task, &completed_by, now);
                    }
                }
            }
        }

        Action::MarkNotificationRead(id) => {
            if let Some(notification) = next.notifications.iter_mut().find(|n| n.id == id) {
                notification.is_read = true;
                // Always a fresh stamp, matching the original behavior
                notification.read_at = Some(Utc::now());
            }
        }

        Action::SetOnboardingComplete(done) => {
            next.onboarding_complete = done;
        }

        Action::GrantXp(amount) => {
            next.user.xp = next.user.xp.saturating_add(amount);
            next.user.level = FamilyMember::level_for_xp(next.user.xp);
            next.user.tasks_completed += 1;
        }

        Action::ConsumeDose { pack_id } => {
            if let Some(pack) = next
                .subscription
                .packs
                .iter_mut()
                .find(|p| p.id == pack_id)
            {
                pack.doses_remaining = pack.doses_remaining.saturating_sub(1);
            }
        }

        Action::PlaceRefillOrder(order) => {
            next.subscription.orders.push(order);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ColonyStatus, GrowthStage, NutrientPack, SensorReadings, Subscription, TaskKind,
        TaskPriority,
    };

    fn plant(id: &str) -> Plant {
        Plant {
            id: id.to_string(),
            species: String::from("Lettuce"),
            variety: String::from("Butterhead"),
            health_score: 85,
            stage: GrowthStage::Vegetative,
            days_to_harvest: 12,
            height_cm: 10.0,
            leaf_count: 8,
            caretaker: String::from("Alice"),
            planted_at: Utc::now(),
        }
    }

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            kind: TaskKind::Water,
            title: String::from("Top up reservoir"),
            description: String::from("Water level below 40%"),
            priority: TaskPriority::High,
            status: TaskStatus::Pending,
            xp_reward: 25,
            estimated_minutes: 5,
            completed_by: None,
            completed_at: None,
        }
    }

    fn colony(id: &str, tasks: Vec<Task>) -> Colony {
        Colony {
            id: id.to_string(),
            name: format!("Colony {id}"),
            mascot: String::from("🌱"),
            health_score: 80,
            status: ColonyStatus::Active,
            sensors: SensorReadings::default(),
            plants: vec![plant(&format!("{id}-p1"))],
            tasks,
            updated_at: Utc::now(),
        }
    }

    fn notification(id: &str) -> crate::models::Notification {
        crate::models::Notification {
            id: id.to_string(),
            kind: crate::models::NotificationKind::Warning,
            title: String::from("pH drifting"),
            message: String::from("Colony C1 pH at 6.9"),
            is_read: false,
            read_at: None,
            action: None,
        }
    }

    fn fixture() -> AppState {
        let t1 = task("t1");
        AppState {
            active_tab: AppTab::Dashboard,
            selected_colony: None,
            colonies: vec![colony("C1", vec![t1.clone()]), colony("C2", vec![])],
            tasks: vec![t1],
            notifications: vec![notification("n1")],
            user: FamilyMember {
                id: String::from("u1"),
                name: String::from("Alice"),
                avatar: String::from("🦊"),
                role: String::from("Lead gardener"),
                level: 1,
                xp: 90,
                badges: vec![],
                achievements: vec![],
                tasks_completed: 3,
                plants_cared_for: 4,
            },
            subscription: Subscription {
                packs: vec![NutrientPack {
                    id: String::from("pack-1"),
                    name: String::from("Leafy Greens A"),
                    doses_remaining: 2,
                }],
                orders: vec![],
            },
            onboarding_complete: true,
        }
    }

    #[test]
    fn test_update_colony_replaces_only_matching() {
        let state = fixture();
        let mut updated = state.colonies[0].clone();
        updated.health_score = 95;

        let next = reduce(&state, Action::UpdateColony(updated.clone()));

        assert_eq!(next.colonies.len(), state.colonies.len());
        let matches: Vec<_> = next.colonies.iter().filter(|c| c.id == "C1").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(*matches[0], updated);
        assert_eq!(next.colonies[1], state.colonies[1]);
    }

    #[test]
    fn test_update_colony_refreshes_selection() {
        let mut state = fixture();
        state.selected_colony = Some(state.colonies[0].clone());

        let mut updated = state.colonies[0].clone();
        updated.health_score = 95;
        let next = reduce(&state, Action::UpdateColony(updated));

        assert_eq!(
            next.selected_colony.as_ref().map(|c| c.health_score),
            Some(95)
        );
    }

    #[test]
    fn test_update_colony_leaves_other_selection_alone() {
        let mut state = fixture();
        state.selected_colony = Some(state.colonies[1].clone());

        let mut updated = state.colonies[0].clone();
        updated.health_score = 95;
        let next = reduce(&state, Action::UpdateColony(updated));

        assert_eq!(next.selected_colony, state.selected_colony);
    }

    #[test]
    fn test_complete_task_updates_both_representations() {
        let state = fixture();
        let next = reduce(
            &state,
            Action::CompleteTask {
                task_id: String::from("t1"),
                completed_by: String::from("Alice"),
            },
        );

        let flat = next.tasks.iter().find(|t| t.id == "t1").unwrap();
        assert_eq!(flat.status, TaskStatus::Completed);
        assert_eq!(flat.completed_by.as_deref(), Some("Alice"));
        assert!(flat.completed_at.is_some());

        let owned = next
            .colonies
            .iter()
            .flat_map(|c| &c.tasks)
            .find(|t| t.id == "t1")
            .unwrap();
        assert_eq!(owned, flat);
    }

    #[test]
    fn test_complete_task_unknown_id_is_noop() {
        let state = fixture();
        let next = reduce(
            &state,
            Action::CompleteTask {
                task_id: String::from("missing"),
                completed_by: String::from("Alice"),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_complete_task_does_not_restamp_completed() {
        let state = fixture();
        let once = reduce(
            &state,
            Action::CompleteTask {
                task_id: String::from("t1"),
                completed_by: String::from("Alice"),
            },
        );
        let twice = reduce(
            &once,
            Action::CompleteTask {
                task_id: String::from("t1"),
                completed_by: String::from("Bob"),
            },
        );

        let task = twice.tasks.iter().find(|t| t.id == "t1").unwrap();
        assert_eq!(task.completed_by.as_deref(), Some("Alice"));
        assert_eq!(
            task.completed_at,
            once.tasks.iter().find(|t| t.id == "t1").unwrap().completed_at
        );
    }

    #[test]
    fn test_mark_notification_read_is_idempotent() {
        let state = fixture();
        let once = reduce(
            &state,
            Action::MarkNotificationRead(String::from("n1")),
        );
        assert!(once.notifications[0].is_read);
        assert!(once.notifications[0].read_at.is_some());

        let twice = reduce(
            &once,
            Action::MarkNotificationRead(String::from("n1")),
        );
        assert!(twice.notifications[0].is_read);
        assert!(twice.notifications[0].read_at.is_some());
    }

    #[test]
    fn test_mark_notification_read_unknown_id_is_noop() {
        let state = fixture();
        let next = reduce(&state, Action::MarkNotificationRead(String::from("nope")));
        assert_eq!(next, state);
    }

    #[test]
    fn test_update_plant_replaces_in_owning_colony() {
        let state = fixture();
        let mut updated = state.colonies[0].plants[0].clone();
        updated.health_score = 99;
        updated.stage = GrowthStage::Flowering;

        let next = reduce(&state, Action::UpdatePlant(updated.clone()));

        assert_eq!(next.colonies[0].plants[0], updated);
        assert_eq!(next.colonies[1], state.colonies[1]);
    }

    #[test]
    fn test_update_plant_unknown_id_is_noop() {
        let state = fixture();
        let next = reduce(&state, Action::UpdatePlant(plant("ghost")));
        assert_eq!(next, state);
    }

    #[test]
    fn test_select_tab_touches_nothing_else() {
        let state = fixture();
        let next = reduce(&state, Action::SelectTab(AppTab::Supply));
        assert_eq!(next.active_tab, AppTab::Supply);

        let mut rest = next.clone();
        rest.active_tab = state.active_tab;
        assert_eq!(rest, state);
    }

    #[test]
    fn test_grant_xp_levels_up() {
        let state = fixture();
        let next = reduce(&state, Action::GrantXp(25));
        assert_eq!(next.user.xp, 115);
        assert_eq!(next.user.level, 2);
        assert_eq!(next.user.tasks_completed, 4);
    }

    #[test]
    fn test_consume_dose_saturates_at_zero() {
        let mut state = fixture();
        state.subscription.packs[0].doses_remaining = 1;

        let once = reduce(
            &state,
            Action::ConsumeDose {
                pack_id: String::from("pack-1"),
            },
        );
        assert_eq!(once.subscription.packs[0].doses_remaining, 0);

        let twice = reduce(
            &once,
            Action::ConsumeDose {
                pack_id: String::from("pack-1"),
            },
        );
        assert_eq!(twice.subscription.packs[0].doses_remaining, 0);
    }

    #[test]
    fn test_place_refill_order_appends() {
        let state = fixture();
        let order = RefillOrder {
            id: String::from("order-1"),
            placed_at: Utc::now(),
            items: vec![],
            total_cents: 1999,
            status: crate::models::OrderStatus::Processing,
        };
        let next = reduce(&state, Action::PlaceRefillOrder(order.clone()));
        assert_eq!(next.subscription.orders.len(), 1);
        assert_eq!(next.subscription.orders[0], order);
    }

    #[test]
    fn test_dispatch_publishes_full_snapshot() {
        let mut store = Store::new(fixture());
        store.dispatch(Action::CompleteTask {
            task_id: String::from("t1"),
            completed_by: String::from("Alice"),
        });

        // Both representations agree in the published snapshot
        let state = store.state();
        let flat = state.tasks.iter().find(|t| t.id == "t1").unwrap();
        let owned = state
            .colonies
            .iter()
            .flat_map(|c| &c.tasks)
            .find(|t| t.id == "t1")
            .unwrap();
        assert_eq!(flat, owned);
    }
}
