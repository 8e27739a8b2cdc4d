use serde::Serialize;
use xeme_core::{Calculator, Configuration, EvReport, format_tier};

/// One rank row of the order table, in display space.
#[derive(Debug, Clone, Serialize)]
pub struct TierRow {
    pub rank: usize,
    pub player: Option<String>,
    pub house: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeightSummary {
    pub default_weight: f64,
    pub overrides: Vec<(u32, f64)>,
}

/// Everything reported for one evaluated calculator state.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub name: String,
    pub status: String,
    pub passed: bool,
    pub bound: u32,
    pub base: u32,
    pub mode: String,
    pub ev: Option<f64>,
    pub reports: Vec<EvReport>,
    pub error: Option<String>,
    pub weights: WeightSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<TierRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configuration>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationOptions {
    pub show_orders: bool,
    pub export_config: bool,
}

/// Evaluate `calc` at every round count. A failed computation is recorded,
/// never replaced with a number.
pub fn run_evaluation(
    name: &str,
    calc: &Calculator,
    rounds: &[u32],
    options: EvaluationOptions,
) -> EvaluationResult {
    let mut reports = Vec::with_capacity(rounds.len());
    let mut error = None;
    for &round_count in rounds {
        match calc.evaluate(round_count) {
            Ok(report) => reports.push(report),
            Err(err) => {
                error = Some(err.to_string());
                reports.clear();
                break;
            }
        }
    }

    EvaluationResult {
        name: name.to_string(),
        status: calc.preset_status().to_string(),
        passed: error.is_none(),
        bound: calc.bound(),
        base: calc.base().get(),
        mode: calc.mode().to_string(),
        ev: reports.first().map(|report| report.ev),
        reports,
        error,
        weights: WeightSummary {
            default_weight: calc.weights().default_weight(),
            overrides: calc
                .weights()
                .overrides()
                .iter()
                .map(|(&display, &weight)| (display, weight))
                .collect(),
        },
        tiers: options.show_orders.then(|| tier_rows(calc)),
        configuration: options.export_config.then(|| calc.configuration()),
    }
}

fn tier_rows(calc: &Calculator) -> Vec<TierRow> {
    let transform = calc.transform();
    let player = calc.player_order().tiers();
    let house = calc.house_order().tiers();
    (0..player.len().max(house.len()))
        .map(|rank| TierRow {
            rank,
            player: player.get(rank).map(|tier| format_tier(tier, transform)),
            house: house.get(rank).map(|tier| format_tier(tier, transform)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use xeme_core::{Base, Variant};

    fn calc(variant: Variant) -> Calculator {
        Calculator::with_preset(variant, 37, Base::new(10).unwrap()).unwrap()
    }

    #[test]
    fn records_one_report_per_round_count() {
        let result = run_evaluation(
            "reme",
            &calc(Variant::Reme),
            &[1, 2, 5],
            EvaluationOptions::default(),
        );
        assert!(result.passed);
        assert_eq!(result.status, "REME");
        assert_eq!(result.reports.len(), 3);
        assert_eq!(result.reports[2].rounds, 5);
        assert!(result.tiers.is_none());
        assert_eq!(result.weights.overrides, vec![(0, 3.0)]);
    }

    #[test]
    fn failures_carry_no_numbers() {
        let mut broken = calc(Variant::Jeme);
        broken.player_order_mut().remove_tier(0).unwrap();
        let result = run_evaluation("broken", &broken, &[1], EvaluationOptions::default());
        assert!(!result.passed);
        assert!(result.ev.is_none());
        assert!(result.reports.is_empty());
        assert!(result.error.unwrap().contains("not ranked"));
        assert_eq!(result.status, "Custom");
    }

    #[test]
    fn tier_rows_align_player_and_house() {
        let options = EvaluationOptions {
            show_orders: true,
            export_config: true,
        };
        let result = run_evaluation("leme", &calc(Variant::Leme), &[1], options);
        let rows = result.tiers.unwrap();
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].player.as_deref(), Some("2,9"));
        assert_eq!(rows[0].house.as_deref(), Some(","));
        assert_eq!(rows[8].player, None);
        assert_eq!(rows[8].house.as_deref(), Some("0,1"));
        assert!(result.configuration.is_some());
    }
}
