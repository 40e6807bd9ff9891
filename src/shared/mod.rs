//! Shared components, resources, events, and states for the valley farm.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

/// Frame ordering inside `Update`. Configured as a chain by the session plugin.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FarmSet {
    /// Tool selection and other pure UI-state input.
    Input,
    /// Plot clicks and the well.
    Actions,
    /// Sleep requests pass the single-flight guard here.
    Dusk,
    /// Overnight crop and soil pass.
    Night,
    /// Day counter, energy restore, narrative dispatch.
    Dawn,
    /// Narrative resolution.
    Morning,
    /// Reactions to the current daily report.
    Weather,
    /// Statistics, notifications.
    Feedback,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const GRID_WIDTH: usize = 5;
pub const GRID_SIZE: usize = 25; // 5x5 grid

pub const INITIAL_MONEY: u32 = 100;
pub const MAX_ENERGY: i32 = 50;
pub const MAX_WATER_CAPACITY: u32 = 12;

pub const TILL_COST: i32 = 2;
pub const WATER_COST: i32 = 2;
pub const PLANT_COST: i32 = 1;
pub const HARVEST_COST: i32 = 3;
pub const CLEAR_COST: i32 = 1;

/// Chance an unplanted tilled plot reverts to untouched ground overnight.
pub const SOIL_DECAY_CHANCE: f64 = 0.3;
pub const NOTIFICATION_SECS: f32 = 2.0;

// ═══════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════

/// Tunable rules of the farm. Defaults match the classic valley numbers.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmRules {
    pub initial_money: u32,
    pub max_energy: i32,
    pub max_water: u32,
    pub till_cost: i32,
    pub water_cost: i32,
    pub plant_cost: i32,
    pub harvest_cost: i32,
    pub clear_cost: i32,
    pub soil_decay_chance: f64,
    pub notification_secs: f32,
    /// Planted crops wither after this many consecutive dry nights.
    /// `None` disables withering entirely.
    pub wither_after_dry_nights: Option<u32>,
    /// Fixed seed for the farm's random source. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for FarmRules {
    fn default() -> Self {
        Self {
            initial_money: INITIAL_MONEY,
            max_energy: MAX_ENERGY,
            max_water: MAX_WATER_CAPACITY,
            till_cost: TILL_COST,
            water_cost: WATER_COST,
            plant_cost: PLANT_COST,
            harvest_cost: HARVEST_COST,
            clear_cost: CLEAR_COST,
            soil_decay_chance: SOIL_DECAY_CHANCE,
            notification_secs: NOTIFICATION_SECS,
            wither_after_dry_nights: None,
            rng_seed: None,
        }
    }
}

/// Seedable random source shared by every randomized farm rule.
#[derive(Resource, Debug, Clone)]
pub struct FarmRng(pub StdRng);

impl FarmRng {
    pub fn from_rules(rules: &FarmRules) -> Self {
        match rules.rng_seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CROP CATALOG
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedKind {
    Carrot,
    Corn,
    Pumpkin,
}

impl SeedKind {
    pub const ALL: [SeedKind; 3] = [SeedKind::Carrot, SeedKind::Corn, SeedKind::Pumpkin];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDef {
    pub seed: SeedKind,
    pub name: String,
    pub seed_cost: u32,
    pub sell_price: u32,
    /// Watered nights needed before the crop can be harvested.
    pub growth_days: u32,
    pub crop_glyph: char,
    pub seed_glyph: char,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CropRegistry {
    pub crops: HashMap<SeedKind, CropDef>,
}

impl CropRegistry {
    pub fn get(&self, seed: SeedKind) -> Option<&CropDef> {
        self.crops.get(&seed)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TOOLS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    WateringCan,
    Basket,
    Seed(SeedKind),
}

/// The player's current tool. `None` until something is picked.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectedTool(pub Option<ToolKind>);

// ═══════════════════════════════════════════════════════════════════════
// FARM GRID
// ═══════════════════════════════════════════════════════════════════════

pub type PlotId = usize;

/// A crop growing in a plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropTile {
    pub crop: SeedKind,
    pub growth_stage: u32,
    pub is_watered: bool,
    pub is_withered: bool,
    /// Consecutive nights ended without water.
    pub dry_nights: u32,
}

impl CropTile {
    pub fn sown(crop: SeedKind) -> Self {
        Self {
            crop,
            growth_stage: 0,
            is_watered: false,
            is_withered: false,
            dry_nights: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlotStatus {
    #[default]
    Empty,
    Tilled { watered: bool },
    Planted(CropTile),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plot {
    pub id: PlotId,
    pub status: PlotStatus,
}

impl Plot {
    pub fn is_empty(&self) -> bool {
        matches!(self.status, PlotStatus::Empty)
    }

    pub fn is_watered(&self) -> bool {
        match &self.status {
            PlotStatus::Empty => false,
            PlotStatus::Tilled { watered } => *watered,
            PlotStatus::Planted(crop) => crop.is_watered,
        }
    }

    pub fn crop(&self) -> Option<&CropTile> {
        match &self.status {
            PlotStatus::Planted(crop) => Some(crop),
            _ => None,
        }
    }

    /// Whether a splash of water would take here: worked soil, dry, and alive.
    pub fn accepts_water(&self) -> bool {
        match &self.status {
            PlotStatus::Empty => false,
            PlotStatus::Tilled { watered } => !watered,
            PlotStatus::Planted(crop) => !crop.is_watered && !crop.is_withered,
        }
    }

    /// Mark the plot watered. Returns false if it did not accept water.
    pub fn soak(&mut self) -> bool {
        if !self.accepts_water() {
            return false;
        }
        match &mut self.status {
            PlotStatus::Tilled { watered } => *watered = true,
            PlotStatus::Planted(crop) => crop.is_watered = true,
            PlotStatus::Empty => {}
        }
        true
    }
}

/// The fixed 5-wide farm, row-major, plot id == index.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmGrid {
    plots: Vec<Plot>,
}

impl Default for FarmGrid {
    fn default() -> Self {
        Self {
            plots: (0..GRID_SIZE)
                .map(|id| Plot { id, status: PlotStatus::Empty })
                .collect(),
        }
    }
}

impl FarmGrid {
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn get(&self, id: PlotId) -> Option<&Plot> {
        self.plots.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: PlotId) -> Option<&mut Plot> {
        self.plots.get_mut(id)
    }

    pub(crate) fn plots_mut(&mut self) -> impl Iterator<Item = &mut Plot> {
        self.plots.iter_mut()
    }

    pub fn row(id: PlotId) -> usize {
        id / GRID_WIDTH
    }

    /// Same-row neighbour to the left, never wrapping.
    pub fn left(&self, id: PlotId) -> Option<PlotId> {
        (id > 0 && id < self.plots.len() && Self::row(id - 1) == Self::row(id)).then(|| id - 1)
    }

    /// Same-row neighbour to the right, never wrapping.
    pub fn right(&self, id: PlotId) -> Option<PlotId> {
        (id + 1 < self.plots.len() && Self::row(id + 1) == Self::row(id)).then(|| id + 1)
    }

    /// Plots covered by one swing of the can: target, left, right.
    pub fn swing_targets(&self, id: PlotId) -> Vec<PlotId> {
        if id >= self.plots.len() {
            return Vec::new();
        }
        let mut targets = vec![id];
        targets.extend(self.left(id));
        targets.extend(self.right(id));
        targets
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCE LEDGER
// ═══════════════════════════════════════════════════════════════════════

/// Money, energy, water and the day counter.
///
/// Energy is allowed to overdraw: an action that starts with energy above
/// zero always completes, even when its cost takes energy below zero.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    pub money: u32,
    pub energy: i32,
    pub water_level: u32,
    pub day: u32,
    pub max_energy: i32,
    pub max_water: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(&FarmRules::default())
    }
}

impl Ledger {
    pub fn new(rules: &FarmRules) -> Self {
        Self {
            money: rules.initial_money,
            energy: rules.max_energy,
            water_level: rules.max_water,
            day: 1,
            max_energy: rules.max_energy,
            max_water: rules.max_water,
        }
    }

    /// Energy precondition shared by every plot action.
    pub fn can_act(&self) -> bool {
        self.energy > 0
    }

    pub fn spend_energy(&mut self, amount: i32) {
        self.energy -= amount;
    }

    /// Energy as shown to the player, clamped to `[0, max_energy]`.
    pub fn display_energy(&self) -> i32 {
        self.energy.clamp(0, self.max_energy)
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.money >= cost
    }

    pub fn spend_money(&mut self, amount: u32) {
        self.money = self.money.saturating_sub(amount);
    }

    pub fn earn_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    pub fn consume_water(&mut self, amount: u32) {
        self.water_level = self.water_level.saturating_sub(amount).min(self.max_water);
    }

    pub fn refill(&mut self) {
        self.water_level = self.max_water;
    }

    /// Morning restore. Water is never topped up here.
    pub fn reset_energy_for_new_day(&mut self) {
        self.energy = self.max_energy;
    }

    pub fn advance_day(&mut self) {
        self.day = self.day.saturating_add(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DAILY REPORT & SLEEP
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Cloudy,
}

/// The morning report: weather plus one line of flavour text.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    pub weather: Weather,
    pub message: String,
}

impl DailyReport {
    pub fn welcome() -> Self {
        Self {
            weather: Weather::Sunny,
            message: "Welcome to the valley! Start by tilling the soil.".to_string(),
        }
    }

    pub fn is_rainy(&self) -> bool {
        self.weather == Weather::Rainy
    }
}

impl Default for DailyReport {
    fn default() -> Self {
        Self::welcome()
    }
}

/// Single-flight guard held while the day advance waits on its report.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sleeping {
    pub active: bool,
}

/// Current player-facing notification. Ephemeral; cleared by its timer.
#[derive(Resource, Debug, Clone)]
pub struct Notification {
    pub message: Option<String>,
    pub timer: Timer,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            message: None,
            timer: Timer::from_seconds(NOTIFICATION_SECS, TimerMode::Once),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOT: read-only view handed to the UI layer
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmSnapshot {
    pub plots: Vec<Plot>,
    pub money: u32,
    /// Raw energy; may be negative after an overdrawn action.
    pub energy: i32,
    pub display_energy: i32,
    pub max_energy: i32,
    pub water_level: u32,
    pub max_water: u32,
    pub day: u32,
    pub selected_tool: Option<ToolKind>,
    pub report: DailyReport,
    pub sleeping: bool,
    pub notification: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct SelectToolEvent {
    pub tool: ToolKind,
}

#[derive(Event, Debug, Clone)]
pub struct PlotClickEvent {
    pub plot: PlotId,
}

#[derive(Event, Debug, Clone)]
pub struct RefillWaterEvent;

/// The player asked to end the day.
#[derive(Event, Debug, Clone)]
pub struct SleepRequestEvent;

/// Overnight pass for the day that just ended.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
}

#[derive(Event, Debug, Clone)]
pub struct ResetSessionEvent;

#[derive(Event, Debug, Clone)]
pub struct GoldChangeEvent {
    pub amount: i64,
    pub reason: String,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub crop: SeedKind,
    pub plot: PlotId,
    pub sell_price: u32,
}

/// Toast notification for player feedback.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}
