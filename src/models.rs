use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::LEVEL_THRESHOLDS;

/// Operating status of a colony (growing unit)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColonyStatus {
    Active,
    Setup,
    Maintenance,
    Offline,
}

impl ColonyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ColonyStatus::Active => "active",
            ColonyStatus::Setup => "setup",
            ColonyStatus::Maintenance => "maintenance",
            ColonyStatus::Offline => "offline",
        }
    }
}

/// Latest sensor snapshot for a colony
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    pub water_level_pct: f32,
    pub ph: f32,
    pub ec: f32,
    pub water_temp_c: f32,
    pub air_temp_c: f32,
    pub humidity_pct: f32,
    pub light_lux: u32,
}

impl Default for SensorReadings {
    fn default() -> Self {
        SensorReadings {
            water_level_pct: 100.0,
            ph: 6.0,
            ec: 1.4,
            water_temp_c: 20.0,
            air_temp_c: 22.0,
            humidity_pct: 55.0,
            light_lux: 12_000,
        }
    }
}

/// Growth stage of a plant, from seed to harvest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrowthStage {
    Seedling,
    Sprout,
    Vegetative,
    Flowering,
    Fruiting,
    HarvestReady,
}

impl GrowthStage {
    pub fn as_str(&self) -> &str {
        match self {
            GrowthStage::Seedling => "seedling",
            GrowthStage::Sprout => "sprout",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Flowering => "flowering",
            GrowthStage::Fruiting => "fruiting",
            GrowthStage::HarvestReady => "harvest ready",
        }
    }

    /// Next stage in the growth cycle; HarvestReady is terminal
    pub fn next(&self) -> GrowthStage {
        match self {
            GrowthStage::Seedling => GrowthStage::Sprout,
            GrowthStage::Sprout => GrowthStage::Vegetative,
            GrowthStage::Vegetative => GrowthStage::Flowering,
            GrowthStage::Flowering => GrowthStage::Fruiting,
            GrowthStage::Fruiting => GrowthStage::HarvestReady,
            GrowthStage::HarvestReady => GrowthStage::HarvestReady,
        }
    }
}

/// A single plant growing inside a colony
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub species: String,
    pub variety: String,
    pub health_score: u8,
    pub stage: GrowthStage,
    /// Days until harvest; zero or negative means ready now
    pub days_to_harvest: i32,
    pub height_cm: f32,
    pub leaf_count: u32,
    pub caretaker: String,
    pub planted_at: DateTime<Utc>,
}

impl Plant {
    pub fn is_harvestable(&self) -> bool {
        self.days_to_harvest <= 0 || self.stage == GrowthStage::HarvestReady
    }
}

/// Kind of care task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    Water,
    Nutrient,
    Harvest,
    Maintenance,
    Refill,
}

impl TaskKind {
    pub fn as_str(&self) -> &str {
        match self {
            TaskKind::Water => "water",
            TaskKind::Nutrient => "nutrient",
            TaskKind::Harvest => "harvest",
            TaskKind::Maintenance => "maintenance",
            TaskKind::Refill => "refill",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub fn as_str(&self) -> &str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }
}

/// Task status - one-way transition from Pending to Completed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

/// A care task attached to a colony
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub kind: TaskKind,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub xp_reward: u32,
    pub estimated_minutes: u32,
    pub completed_by: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Critical,
    Warning,
    Info,
    Achievement,
}

/// Optional follow-up attached to a notification
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    pub colony_id: Option<String>,
}

/// An alert or achievement message shown to the user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub action: Option<NotificationAction>,
}

/// A member of the household caring for the colonies
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub role: String,
    pub level: u32,
    pub xp: u32,
    pub badges: Vec<String>,
    pub achievements: Vec<String>,
    pub tasks_completed: u32,
    pub plants_cared_for: u32,
}

impl FamilyMember {
    /// Level for a given XP total, from the fixed threshold curve
    pub fn level_for_xp(xp: u32) -> u32 {
        LEVEL_THRESHOLDS
            .iter()
            .filter(|&&threshold| xp >= threshold)
            .count() as u32
    }

    /// XP still needed to reach the next level, None at the level cap
    pub fn xp_to_next_level(&self) -> Option<u32> {
        LEVEL_THRESHOLDS
            .get(self.level as usize)
            .map(|&threshold| threshold.saturating_sub(self.xp))
    }
}

/// A consumable nutrient pack tracked by remaining doses
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NutrientPack {
    pub id: String,
    pub name: String,
    pub doses_remaining: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub price_cents: u32,
}

/// One refill order in the subscription history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefillOrder {
    pub id: String,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total_cents: u32,
    pub status: OrderStatus,
}

/// Nutrient subscription: pack inventory plus refill history
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Subscription {
    pub packs: Vec<NutrientPack>,
    pub orders: Vec<RefillOrder>,
}

/// A hydroponic growing unit with its sensors, plants and tasks
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub id: String,
    pub name: String,
    pub mascot: String,
    pub health_score: u8,
    pub status: ColonyStatus,
    pub sensors: SensorReadings,
    pub plants: Vec<Plant>,
    pub tasks: Vec<Task>,
    pub updated_at: DateTime<Utc>,
}

impl Colony {
    pub fn pending_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_pending()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_curve() {
        assert_eq!(FamilyMember::level_for_xp(0), 1);
        assert_eq!(FamilyMember::level_for_xp(99), 1);
        assert_eq!(FamilyMember::level_for_xp(100), 2);
        assert_eq!(FamilyMember::level_for_xp(250), 3);
        assert_eq!(
            FamilyMember::level_for_xp(1_000_000),
            LEVEL_THRESHOLDS.len() as u32
        );
    }

    #[test]
    fn test_growth_stage_progression() {
        let mut stage = GrowthStage::Seedling;
        let expected = [
            GrowthStage::Sprout,
            GrowthStage::Vegetative,
            GrowthStage::Flowering,
            GrowthStage::Fruiting,
            GrowthStage::HarvestReady,
        ];
        for want in expected {
            stage = stage.next();
            assert_eq!(stage, want);
        }
        // Terminal stage stays put
        assert_eq!(stage.next(), GrowthStage::HarvestReady);
    }

    #[test]
    fn test_harvestable_on_overdue_days() {
        let plant = Plant {
            id: String::from("p1"),
            species: String::from("Basil"),
            variety: String::from("Genovese"),
            health_score: 90,
            stage: GrowthStage::Fruiting,
            days_to_harvest: -2,
            height_cm: 24.0,
            leaf_count: 40,
            caretaker: String::from("Alice"),
            planted_at: Utc::now(),
        };
        assert!(plant.is_harvestable());
    }
}
