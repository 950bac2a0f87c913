// 🌱 Seed Params - Startup Configuration
// Query-string and JSON-file overrides for the default plan

use crate::plan::CostPlan;
use crate::routing::FieldKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// SEED PARAMS
// ============================================================================

/// Optional startup overrides for the plan's defaults.
///
/// Built outside the components (from a query string, a config file, or
/// by hand) and passed in; the components themselves never reach into any
/// global context to find their configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeedParams {
    pub team_name: Option<String>,
    pub ice_cost: Option<f64>,
    pub hours: Option<f64>,
    pub coach_cost: Option<f64>,
    pub jersey_cost: Option<f64>,
    pub num_players: Option<f64>,
}

impl SeedParams {
    /// Parse an URL query string (`iceCost=250&hours=40&teamName=Bears`).
    ///
    /// Unknown keys are ignored; values that fail numeric parsing leave the
    /// default unchanged. Neither case is an error.
    pub fn from_query(query: &str) -> Self {
        let mut params = SeedParams::default();

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = match pair.split_once('=') {
                Some(kv) => kv,
                None => continue,
            };

            let key = decode(key);
            let value = decode(value);

            if key == "teamName" {
                if !value.is_empty() {
                    params.team_name = Some(value);
                }
                continue;
            }

            let parsed = match value.trim().parse::<f64>() {
                Ok(v) if !v.is_nan() => v,
                _ => continue,
            };

            match key.as_str() {
                "iceCost" => params.ice_cost = Some(parsed),
                "hours" => params.hours = Some(parsed),
                "coachCost" => params.coach_cost = Some(parsed),
                "jerseyCost" => params.jersey_cost = Some(parsed),
                "numPlayers" => params.num_players = Some(parsed),
                _ => {}
            }
        }

        params
    }

    /// Parse a JSON config document with the same optional-override shape.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse seed params JSON")
    }

    /// Load seed params from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read seed file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    /// Override for a routed field, if one was supplied.
    pub fn get(&self, kind: FieldKind) -> Option<f64> {
        match kind {
            FieldKind::Ice => self.ice_cost,
            FieldKind::Hours => self.hours,
            FieldKind::Coach => self.coach_cost,
            FieldKind::Jersey => self.jersey_cost,
            FieldKind::Players => self.num_players,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SeedParams::default()
    }

    /// Seed a plan once at startup. Field writes go through the plan's
    /// normal mutation path, so totals are recomputed.
    pub fn apply_to(&self, plan: &mut CostPlan) {
        if let Some(name) = &self.team_name {
            plan.set_team_name(name.clone());
        }
        for kind in FieldKind::all() {
            if let Some(value) = self.get(kind) {
                plan.set_field(kind, value);
            }
        }
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_recognized_keys() {
        let params =
            SeedParams::from_query("iceCost=250&hours=40&coachCost=2500&jerseyCost=95&numPlayers=12");

        assert_eq!(params.ice_cost, Some(250.0));
        assert_eq!(params.hours, Some(40.0));
        assert_eq!(params.coach_cost, Some(2500.0));
        assert_eq!(params.jersey_cost, Some(95.0));
        assert_eq!(params.num_players, Some(12.0));
    }

    #[test]
    fn test_from_query_ignores_unknown_keys() {
        let params = SeedParams::from_query("iceCost=250&utm_source=email&logo=x.png");

        assert_eq!(params.ice_cost, Some(250.0));
        assert_eq!(
            params,
            SeedParams {
                ice_cost: Some(250.0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_from_query_unparseable_value_keeps_default() {
        let params = SeedParams::from_query("hours=forty&numPlayers=12");

        assert_eq!(params.hours, None);
        assert_eq!(params.num_players, Some(12.0));
    }

    #[test]
    fn test_from_query_decodes_team_name() {
        let params = SeedParams::from_query("teamName=Polar%20Bears");
        assert_eq!(params.team_name, Some("Polar Bears".to_string()));
    }

    #[test]
    fn test_from_query_tolerates_junk() {
        assert!(SeedParams::from_query("").is_empty());
        assert!(SeedParams::from_query("???&&=5&noequals").is_empty());
    }

    #[test]
    fn test_from_json() {
        let params = SeedParams::from_json(
            r#"{ "teamName": "Polar Bears", "iceCost": 275, "numPlayers": 15 }"#,
        )
        .unwrap();

        assert_eq!(params.team_name, Some("Polar Bears".to_string()));
        assert_eq!(params.ice_cost, Some(275.0));
        assert_eq!(params.num_players, Some(15.0));
        assert_eq!(params.hours, None);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SeedParams::from_json("not json").is_err());
    }

    #[test]
    fn test_apply_to_plan() {
        let mut plan = CostPlan::new();
        let params = SeedParams::from_query("teamName=Bears&iceCost=100&hours=10&numPlayers=5");

        params.apply_to(&mut plan);

        assert_eq!(plan.team_name, "Bears");
        assert_eq!(plan.ice_cost, 100.0);
        assert_eq!(plan.hours, 10.0);
        assert_eq!(plan.num_players, 5.0);
        // Untouched fields keep their defaults; totals were recomputed.
        assert_eq!(plan.coach_cost, 3000.0);
        let expected = (100.0 * 10.0 + 3000.0 + 88.0) * 1.02 + 0.99;
        assert!((plan.total_cost - expected).abs() < 1e-9);
    }
}
