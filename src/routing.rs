// 🧭 Field Routing - Label → Field Resolution
// Maps stepper labels to cost plan fields

use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD KIND
// ============================================================================

/// The cost plan fields a stepper can drive.
///
/// Steppers constructed with an explicit kind route unambiguously; steppers
/// without one fall back to the label scan in [`FieldKind::from_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Ice,
    Hours,
    Coach,
    Jersey,
    Players,
}

/// Scan order for label matching. First match wins, so a label like
/// "Hours of Ice Time" resolves to Ice, not Hours.
const SCAN_ORDER: [(FieldKind, &str); 5] = [
    (FieldKind::Ice, "ice"),
    (FieldKind::Hours, "hour"),
    (FieldKind::Coach, "coach"),
    (FieldKind::Jersey, "jersey"),
    (FieldKind::Players, "player"),
];

impl FieldKind {
    /// Resolve a free-text stepper label to a field.
    ///
    /// Case-insensitive substring scan in the fixed order
    /// {ice, hour, coach, jersey, player}. Returns `None` for labels that
    /// match nothing; such notifications are dropped by the plan.
    pub fn from_label(label: &str) -> Option<FieldKind> {
        let label_lower = label.to_lowercase();

        for (kind, needle) in SCAN_ORDER {
            if label_lower.contains(needle) {
                return Some(kind);
            }
        }

        None
    }

    /// Query parameter key recognized for seeding this field.
    pub fn param_key(&self) -> &'static str {
        match self {
            FieldKind::Ice => "iceCost",
            FieldKind::Hours => "hours",
            FieldKind::Coach => "coachCost",
            FieldKind::Jersey => "jerseyCost",
            FieldKind::Players => "numPlayers",
        }
    }

    /// Short name for status lines and logs.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Ice => "ice_cost",
            FieldKind::Hours => "hours",
            FieldKind::Coach => "coach_cost",
            FieldKind::Jersey => "jersey_cost",
            FieldKind::Players => "num_players",
        }
    }

    /// All fields, in scan order.
    pub fn all() -> [FieldKind; 5] {
        [
            FieldKind::Ice,
            FieldKind::Hours,
            FieldKind::Coach,
            FieldKind::Jersey,
            FieldKind::Players,
        ]
    }
}

// ============================================================================
// TESTS
// ============================================================================
