//! Seed dataset - supplies the initial [`AppState`] snapshot
//!
//! Stands in for the cloud/device backend; everything here is deterministic
//! demo data.

use chrono::{Duration, Utc};

use crate::app::AppState;
use crate::messages::ui_events::AppTab;
use crate::models::{
    Colony, ColonyStatus, FamilyMember, GrowthStage, Notification, NotificationAction,
    NotificationKind, NutrientPack, OrderItem, OrderStatus, Plant, RefillOrder, SensorReadings,
    Subscription, Task, TaskKind, TaskPriority, TaskStatus,
};

fn plant(
    id: &str,
    species: &str,
    variety: &str,
    stage: GrowthStage,
    days_to_harvest: i32,
    caretaker: &str,
) -> Plant {
    Plant {
        id: id.to_string(),
        species: species.to_string(),
        variety: variety.to_string(),
        health_score: 88,
        stage,
        days_to_harvest,
        height_cm: 14.5,
        leaf_count: 12,
        caretaker: caretaker.to_string(),
        planted_at: Utc::now() - Duration::days(21),
    }
}

fn task(
    id: &str,
    kind: TaskKind,
    title: &str,
    description: &str,
    priority: TaskPriority,
    xp_reward: u32,
) -> Task {
    Task {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        description: description.to_string(),
        priority,
        status: TaskStatus::Pending,
        xp_reward,
        estimated_minutes: 10,
        completed_by: None,
        completed_at: None,
    }
}

/// Build the initial application snapshot
pub fn initial_state() -> AppState {
    let kitchen_tasks = vec![
        task(
            "task-1",
            TaskKind::Water,
            "Top up the reservoir",
            "Water level dropped below 40%",
            TaskPriority::High,
            25,
        ),
        task(
            "task-2",
            TaskKind::Nutrient,
            "Add a nutrient dose",
            "EC is trending low for leafy greens",
            TaskPriority::Medium,
            20,
        ),
    ];
    let balcony_tasks = vec![task(
        "task-3",
        TaskKind::Harvest,
        "Harvest the basil",
        "Genovese basil is ready to cut",
        TaskPriority::Low,
        40,
    )];
    let shelf_tasks = vec![task(
        "task-4",
        TaskKind::Maintenance,
        "Clean the pump filter",
        "Scheduled monthly maintenance",
        TaskPriority::Critical,
        50,
    )];

    let colonies = vec![
        Colony {
            id: String::from("colony-kitchen"),
            name: String::from("Kitchen Garden"),
            mascot: String::from("🥬"),
            health_score: 92,
            status: ColonyStatus::Active,
            sensors: SensorReadings {
                water_level_pct: 38.0,
                ph: 6.1,
                ec: 1.2,
                water_temp_c: 19.5,
                air_temp_c: 22.0,
                humidity_pct: 58.0,
                light_lux: 14_500,
            },
            plants: vec![
                plant(
                    "plant-1",
                    "Lettuce",
                    "Butterhead",
                    GrowthStage::Vegetative,
                    11,
                    "Alice",
                ),
                plant(
                    "plant-2",
                    "Spinach",
                    "Bloomsdale",
                    GrowthStage::Sprout,
                    24,
                    "Ben",
                ),
            ],
            tasks: kitchen_tasks.clone(),
            updated_at: Utc::now() - Duration::minutes(4),
        },
        Colony {
            id: String::from("colony-balcony"),
            name: String::from("Balcony Tower"),
            mascot: String::from("🌿"),
            health_score: 84,
            status: ColonyStatus::Active,
            sensors: SensorReadings {
                water_level_pct: 71.0,
                ph: 6.4,
                ec: 1.6,
                water_temp_c: 21.0,
                air_temp_c: 24.5,
                humidity_pct: 49.0,
                light_lux: 22_000,
            },
            plants: vec![plant(
                "plant-3",
                "Basil",
                "Genovese",
                GrowthStage::HarvestReady,
                0,
                "Alice",
            )],
            tasks: balcony_tasks.clone(),
            updated_at: Utc::now() - Duration::minutes(12),
        },
        Colony {
            id: String::from("colony-shelf"),
            name: String::from("Seedling Shelf"),
            mascot: String::from("🌱"),
            health_score: 61,
            status: ColonyStatus::Setup,
            sensors: SensorReadings::default(),
            plants: vec![plant(
                "plant-4",
                "Tomato",
                "Tiny Tim",
                GrowthStage::Seedling,
                55,
                "Ben",
            )],
            tasks: shelf_tasks.clone(),
            updated_at: Utc::now() - Duration::hours(3),
        },
    ];

    // Flat list mirrors the per-colony tasks
    let tasks: Vec<Task> = kitchen_tasks
        .into_iter()
        .chain(balcony_tasks)
        .chain(shelf_tasks)
        .collect();

    let notifications = vec![
        Notification {
            id: String::from("note-1"),
            kind: NotificationKind::Warning,
            title: String::from("Water running low"),
            message: String::from("Kitchen Garden reservoir is at 38%"),
            is_read: false,
            read_at: None,
            action: Some(NotificationAction {
                label: String::from("View colony"),
                colony_id: Some(String::from("colony-kitchen")),
            }),
        },
        Notification {
            id: String::from("note-2"),
            kind: NotificationKind::Achievement,
            title: String::from("First harvest ready!"),
            message: String::from("The Genovese basil hit harvest stage"),
            is_read: false,
            read_at: None,
            action: Some(NotificationAction {
                label: String::from("View colony"),
                colony_id: Some(String::from("colony-balcony")),
            }),
        },
        Notification {
            id: String::from("note-3"),
            kind: NotificationKind::Info,
            title: String::from("Welcome to Verdant"),
            message: String::from("Your dashboard is set up and ready"),
            is_read: true,
            read_at: Some(Utc::now() - Duration::days(1)),
            action: None,
        },
    ];

    let user = FamilyMember {
        id: String::from("member-1"),
        name: String::from("Alice"),
        avatar: String::from("🦊"),
        role: String::from("Lead gardener"),
        level: FamilyMember::level_for_xp(180),
        xp: 180,
        badges: vec![String::from("Green Thumb"), String::from("Early Bird")],
        achievements: vec![String::from("Completed 10 tasks")],
        tasks_completed: 12,
        plants_cared_for: 6,
    };

    let subscription = Subscription {
        packs: vec![
            NutrientPack {
                id: String::from("pack-greens"),
                name: String::from("Leafy Greens A+B"),
                doses_remaining: 7,
            },
            NutrientPack {
                id: String::from("pack-fruit"),
                name: String::from("Fruiting Boost"),
                doses_remaining: 1,
            },
        ],
        orders: vec![RefillOrder {
            id: String::from("order-0"),
            placed_at: Utc::now() - Duration::days(30),
            items: vec![OrderItem {
                name: String::from("Leafy Greens A+B"),
                quantity: 2,
                price_cents: 1899,
            }],
            total_cents: 3798,
            status: OrderStatus::Delivered,
        }],
    };

    AppState {
        active_tab: AppTab::Dashboard,
        selected_colony: None,
        colonies,
        tasks,
        notifications,
        user,
        subscription,
        onboarding_complete: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_flat_tasks_mirror_colony_tasks() {
        let state = initial_state();
        let in_colonies: Vec<&Task> = state.colonies.iter().flat_map(|c| &c.tasks).collect();
        assert_eq!(state.tasks.len(), in_colonies.len());
        for task in &state.tasks {
            let owned = in_colonies.iter().find(|t| t.id == task.id);
            assert_eq!(owned.copied(), Some(task));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let state = initial_state();
        let colony_ids: HashSet<_> = state.colonies.iter().map(|c| &c.id).collect();
        assert_eq!(colony_ids.len(), state.colonies.len());

        let task_ids: HashSet<_> = state.tasks.iter().map(|t| &t.id).collect();
        assert_eq!(task_ids.len(), state.tasks.len());

        let plant_ids: HashSet<_> = state
            .colonies
            .iter()
            .flat_map(|c| &c.plants)
            .map(|p| &p.id)
            .collect();
        assert_eq!(
            plant_ids.len(),
            state.colonies.iter().map(|c| c.plants.len()).sum::<usize>()
        );
    }

    #[test]
    fn test_starts_before_onboarding() {
        assert!(!initial_state().onboarding_complete);
    }
}
