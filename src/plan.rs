// 🏒 Cost Plan - Team Cost Aggregation
// Input fields, routed updates, derived totals

use crate::routing::FieldKind;
use crate::stepper::ValueChange;
use serde::{Deserialize, Serialize};

// ============================================================================
// COST PLAN
// ============================================================================

/// Team cost configuration plus derived totals.
///
/// `total_cost` and `cost_per_player` are pure functions of the seven input
/// fields; every mutation path recomputes them before returning, so they
/// are never stale at an observation point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostPlan {
    pub team_name: String,
    pub ice_cost: f64,
    pub hours: f64,
    pub coach_cost: f64,
    pub jersey_cost: f64,
    pub fee_percent: f64,
    pub fixed_fee: f64,
    pub num_players: f64,

    // Derived - recomputed, never set directly
    pub total_cost: f64,
    pub cost_per_player: f64,
}

impl Default for CostPlan {
    fn default() -> Self {
        let mut plan = CostPlan {
            team_name: "My Hockey Team".to_string(),
            ice_cost: 300.0,
            hours: 50.0,
            coach_cost: 3000.0,
            jersey_cost: 88.0,
            fee_percent: 2.0,
            fixed_fee: 0.99,
            num_players: 1.0,
            total_cost: 0.0,
            cost_per_player: 0.0,
        };
        plan.calculate_costs();
        plan
    }
}

impl CostPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a stepper notification. Routes via the explicit field tag
    /// when present, otherwise via the label scan; unroutable notifications
    /// are dropped silently. Returns the field that was updated.
    pub fn apply(&mut self, change: &ValueChange) -> Option<FieldKind> {
        let kind = change
            .field
            .or_else(|| FieldKind::from_label(&change.label))?;

        self.set_field(kind, change.value);
        Some(kind)
    }

    /// Update a single input field and recompute totals.
    pub fn set_field(&mut self, kind: FieldKind, value: f64) {
        match kind {
            FieldKind::Ice => self.ice_cost = value,
            FieldKind::Hours => self.hours = value,
            FieldKind::Coach => self.coach_cost = value,
            FieldKind::Jersey => self.jersey_cost = value,
            FieldKind::Players => self.num_players = value,
        }
        self.calculate_costs();
    }

    pub fn set_fee_percent(&mut self, value: f64) {
        self.fee_percent = value;
        self.calculate_costs();
    }

    pub fn set_fixed_fee(&mut self, value: f64) {
        self.fixed_fee = value;
        self.calculate_costs();
    }

    pub fn set_team_name(&mut self, name: impl Into<String>) {
        self.team_name = name.into();
    }

    pub fn field_value(&self, kind: FieldKind) -> f64 {
        match kind {
            FieldKind::Ice => self.ice_cost,
            FieldKind::Hours => self.hours,
            FieldKind::Coach => self.coach_cost,
            FieldKind::Jersey => self.jersey_cost,
            FieldKind::Players => self.num_players,
        }
    }

    /// Recompute the derived fields from the current inputs.
    ///
    /// `num_players = 0` propagates a non-finite cost_per_player; the
    /// display layer renders it as "n/a". No rounding on stored values.
    pub fn calculate_costs(&mut self) {
        let subtotal = self.ice_cost * self.hours + self.coach_cost + self.jersey_cost;
        self.total_cost = subtotal * (1.0 + self.fee_percent / 100.0) + self.fixed_fee;
        self.cost_per_player = self.total_cost / self.num_players;
    }

    pub fn total_display(&self) -> String {
        format_currency(self.total_cost)
    }

    pub fn cost_per_player_display(&self) -> String {
        format_currency(self.cost_per_player)
    }
}

// ============================================================================
// DISPLAY CONTRACT
// ============================================================================

/// Two decimal places with a currency prefix. Stored values stay unrounded;
/// formatting happens only here. Non-finite values render as "n/a" instead
/// of "$inf".
pub fn format_currency(value: f64) -> String {
    if value.is_finite() {
        format!("${:.2}", value)
    } else {
        "n/a".to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
