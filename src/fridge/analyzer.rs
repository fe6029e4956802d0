//! Aggregation of fridge records into a risk-ranked, CO2-weighted report.

use crate::config::AnalysisConfig;
use crate::error::AssistantError;
use crate::matcher::find_matches;
use crate::model::{CorpusRecipe, FridgeAnalysis, IngredientRecord, RiskLevel, RiskReport};
use log::error;

const DEGRADED_SUMMARY: &str = "Unable to analyze fridge contents";

/// Analyze fridge contents and suggest recipes for what is in there.
///
/// This is the top-level failure boundary: if report assembly fails for any
/// reason the caller still gets a usable result, a fixed summary with an
/// empty recipe list, instead of an error.
pub fn analyze_fridge(
    records: &[IngredientRecord],
    corpus: &[CorpusRecipe],
    config: &AnalysisConfig,
) -> FridgeAnalysis {
    match RiskReport::build(records, config) {
        Ok(report) => {
            let available: Vec<String> =
                records.iter().map(|record| record.name.clone()).collect();
            FridgeAnalysis {
                summary: report.render(),
                recipes: find_matches(&available, corpus),
            }
        }
        Err(err) => {
            error!("{err}");
            FridgeAnalysis {
                summary: DEGRADED_SUMMARY.to_string(),
                recipes: Vec::new(),
            }
        }
    }
}

impl RiskReport {
    /// Assemble the report. Fails if an amount string carries no leading
    /// kilogram figure; the caller decides whether to degrade.
    pub fn build(
        records: &[IngredientRecord],
        config: &AnalysisConfig,
    ) -> Result<Self, AssistantError> {
        let high_risk_items: Vec<IngredientRecord> = records
            .iter()
            .filter(|record| record.risk_level == RiskLevel::High)
            .cloned()
            .collect();

        let urgent_items: Vec<IngredientRecord> = high_risk_items
            .iter()
            .filter(|record| record.risk_percentage <= config.urgent_shelf_life_pct)
            .cloned()
            .collect();

        let total_co2_at_risk: f64 =
            high_risk_items.iter().map(|record| record.co2_impact).sum();
        let driving_equivalent_km =
            ((total_co2_at_risk / config.co2_per_km_kg) * 10.0).round() / 10.0;

        let mut items_table = String::new();
        for record in records {
            items_table.push_str(&format!(
                "{:<10} {} ({}%) {:<9} {:<10.2} {:<10.2}\n",
                record.name,
                record.risk_level,
                record.risk_percentage,
                record.age,
                kilograms(&record.amount)?,
                record.co2_impact,
            ));
        }

        let mut priority_actions = Vec::new();
        if !urgent_items.is_empty() {
            priority_actions.push("Use these items TODAY:".to_string());
            for item in &urgent_items {
                priority_actions.push(format!(
                    "- {} - less than {}% of shelf life remains!",
                    item.name, config.urgent_shelf_life_pct
                ));
            }
        }
        priority_actions.push("High-risk items to use soon:".to_string());
        for item in &high_risk_items {
            if item.risk_percentage > config.urgent_shelf_life_pct {
                priority_actions.push(format!(
                    "- {} ({}% remaining)",
                    item.name, item.risk_percentage
                ));
            }
        }

        Ok(RiskReport {
            high_risk_items,
            urgent_items,
            total_co2_at_risk,
            driving_equivalent_km,
            priority_actions,
            items_table,
        })
    }

    /// Render the report for chat display.
    pub fn render(&self) -> String {
        format!(
            "Fridge overview:\n\
             Item       Risk              Age       Amount(kg) CO2(kg)\n\
             {}\n\
             {}\n\n\
             Total CO2 at risk: {:.2} kg CO2e\n\
             That equals driving {} km\n",
            self.items_table,
            self.priority_actions.join("\n"),
            self.total_co2_at_risk,
            self.driving_equivalent_km,
        )
    }
}

/// Leading numeric portion of an amount string before "kg".
fn kilograms(amount: &str) -> Result<f64, AssistantError> {
    let leading = amount.split("kg").next().unwrap_or(amount).trim();
    leading.parse::<f64>().map_err(|_| {
        AssistantError::AnalysisError(format!(
            "amount {amount:?} has no leading kilogram figure"
        ))
    })
}
