// 🔢 Stepper - Bounded Numeric Input State
// Increment/decrement/direct entry with clamping, value-change notifications

use crate::routing::FieldKind;
use crate::seed::SeedParams;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// VALUE CHANGE NOTIFICATION
// ============================================================================

/// Payload emitted every time a stepper's value changes.
///
/// Fire-and-forget: the stepper neither knows nor cares who consumes it.
/// `field` is the explicit routing tag for steppers constructed with one;
/// `label` is kept for display and for the substring-scan fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    pub value: f64,
    pub label: String,
    pub field: Option<FieldKind>,
}

// ============================================================================
// STEPPER
// ============================================================================

/// Bounded numeric input control.
///
/// Invariant: `min <= value <= max` after construction and after every
/// mutation. `increment` is guard-only (no overshoot correction), so steps
/// should divide the range evenly.
#[derive(Debug, Clone)]
pub struct Stepper {
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    label: String,
    field: Option<FieldKind>,
}

impl Stepper {
    /// Create a stepper. Fails on `min > max` or `step <= 0`; the initial
    /// value is clamped into range.
    pub fn new(label: impl Into<String>, value: f64, min: f64, max: f64, step: f64) -> Result<Self> {
        let label = label.into();

        if min > max {
            bail!("stepper '{}': min {} exceeds max {}", label, min, max);
        }
        if !(step > 0.0) {
            bail!("stepper '{}': step must be positive, got {}", label, step);
        }

        let mut stepper = Stepper {
            value: 0.0,
            min,
            max,
            step,
            label,
            field: None,
        };
        stepper.value = stepper.clamp(value);

        Ok(stepper)
    }

    /// Attach an explicit routing tag (preferred over label matching).
    pub fn with_field(mut self, field: FieldKind) -> Self {
        self.field = Some(field);
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn field(&self) -> Option<FieldKind> {
        self.field
    }

    /// Whether the increment control should be enabled.
    pub fn can_increment(&self) -> bool {
        self.value < self.max
    }

    /// Whether the decrement control should be enabled.
    pub fn can_decrement(&self) -> bool {
        self.value > self.min
    }

    /// Step the value up. No-op at max.
    pub fn increment(&mut self) -> Option<ValueChange> {
        if self.value < self.max {
            self.value += self.step;
            Some(self.change())
        } else {
            None
        }
    }

    /// Step the value down. No-op at min.
    pub fn decrement(&mut self) -> Option<ValueChange> {
        if self.value > self.min {
            self.value -= self.step;
            Some(self.change())
        } else {
            None
        }
    }

    /// Direct text entry. Unparseable input is discarded and the value is
    /// left unchanged; parseable input is silently clamped to `[min, max]`.
    pub fn set_from_input(&mut self, raw: &str) -> Option<ValueChange> {
        let parsed = raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())?;
        self.set_value(parsed)
    }

    /// Programmatic set with the same clamping policy as direct entry.
    pub fn set_value(&mut self, value: f64) -> Option<ValueChange> {
        let clamped = self.clamp(value);
        if clamped == self.value {
            return None;
        }
        self.value = clamped;
        Some(self.change())
    }

    /// Apply a seeded override, if the params carry one for this stepper's
    /// field. Seeded values go through the same clamping path as entry.
    pub fn seed_from_params(&mut self, params: &SeedParams) -> Option<ValueChange> {
        let kind = self.field.or_else(|| FieldKind::from_label(&self.label))?;
        let seeded = params.get(kind)?;
        self.set_value(seeded)
    }

    fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    fn change(&self) -> ValueChange {
        ValueChange {
            value: self.value,
            label: self.label.clone(),
            field: self.field,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stepper(value: f64, min: f64, max: f64, step: f64) -> Stepper {
        Stepper::new("Test", value, min, max, step).unwrap()
    }

    #[test]
    fn test_increment_stays_within_max() {
        let mut s = stepper(0.0, 0.0, 10.0, 2.0);

        for _ in 0..20 {
            s.increment();
            assert!(s.value() <= 10.0);
        }
        assert_eq!(s.value(), 10.0);
        assert!(!s.can_increment());
    }

    #[test]
    fn test_decrement_stays_within_min() {
        let mut s = stepper(10.0, 0.0, 10.0, 2.0);

        for _ in 0..20 {
            s.decrement();
            assert!(s.value() >= 0.0);
        }
        assert_eq!(s.value(), 0.0);
        assert!(!s.can_decrement());
    }

    #[test]
    fn test_increment_at_max_is_noop() {
        let mut s = stepper(10.0, 0.0, 10.0, 1.0);
        assert_eq!(s.increment(), None);
        assert_eq!(s.value(), 10.0);
    }

    #[test]
    fn test_set_from_input_clamps() {
        let mut s = stepper(5.0, 0.0, 10.0, 1.0);

        s.set_from_input("250");
        assert_eq!(s.value(), 10.0);

        s.set_from_input("-3.5");
        assert_eq!(s.value(), 0.0);

        s.set_from_input("7.25");
        assert_eq!(s.value(), 7.25);
    }

    #[test]
    fn test_set_from_input_discards_garbage() {
        let mut s = stepper(5.0, 0.0, 10.0, 1.0);

        assert_eq!(s.set_from_input("abc"), None);
        assert_eq!(s.set_from_input(""), None);
        assert_eq!(s.set_from_input("12,5"), None);
        assert_eq!(s.set_from_input("NaN"), None);
        assert_eq!(s.value(), 5.0);
    }

    #[test]
    fn test_set_value_same_value_emits_nothing() {
        let mut s = stepper(5.0, 0.0, 10.0, 1.0);
        assert_eq!(s.set_value(5.0), None);
        // Clamped result equal to current value is also silent.
        s.set_value(10.0);
        assert_eq!(s.set_value(99.0), None);
    }

    #[test]
    fn test_change_payload_carries_label_and_field() {
        let mut s = Stepper::new("Ice Cost", 300.0, 0.0, 1000.0, 25.0)
            .unwrap()
            .with_field(crate::routing::FieldKind::Ice);

        let change = s.increment().unwrap();
        assert_eq!(change.value, 325.0);
        assert_eq!(change.label, "Ice Cost");
        assert_eq!(change.field, Some(crate::routing::FieldKind::Ice));
    }

    #[test]
    fn test_initial_value_is_clamped() {
        let s = stepper(500.0, 0.0, 10.0, 1.0);
        assert_eq!(s.value(), 10.0);

        let s = stepper(-500.0, 0.0, 10.0, 1.0);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        assert!(Stepper::new("Bad", 0.0, 10.0, 0.0, 1.0).is_err());
        assert!(Stepper::new("Bad", 0.0, 0.0, 10.0, 0.0).is_err());
        assert!(Stepper::new("Bad", 0.0, 0.0, 10.0, -1.0).is_err());
    }

    #[test]
    fn test_seeding_clamps_like_entry() {
        let params = SeedParams::from_query("iceCost=5000");

        let mut s = Stepper::new("Ice Cost", 300.0, 0.0, 1000.0, 25.0)
            .unwrap()
            .with_field(crate::routing::FieldKind::Ice);
        let change = s.seed_from_params(&params).unwrap();
        assert_eq!(change.value, 1000.0);
    }

    #[test]
    fn test_seeding_without_matching_param_is_noop() {
        let params = SeedParams::from_query("hours=40");

        let mut s = Stepper::new("Ice Cost", 300.0, 0.0, 1000.0, 25.0)
            .unwrap()
            .with_field(crate::routing::FieldKind::Ice);
        assert_eq!(s.seed_from_params(&params), None);
        assert_eq!(s.value(), 300.0);
    }

    #[test]
    fn test_seeding_falls_back_to_label_scan() {
        let params = SeedParams::from_query("numPlayers=12");

        // No explicit field tag; the label scan resolves "player".
        let mut s = Stepper::new("Number of Players", 1.0, 1.0, 50.0, 1.0).unwrap();
        let change = s.seed_from_params(&params).unwrap();
        assert_eq!(change.value, 12.0);
    }
}
