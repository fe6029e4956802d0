//! Parsing of fridge listing lines of the form
//! `NAME (AMOUNT) [AGE] {RISK_LEVEL RISK_DETAIL RISK_PERCENTAGE%} <CO2_VALUE CO2e>`.
//!
//! Every bracket group is optional; each field falls back to its default
//! independently. Only malformed numeric fields fail a line.

use crate::error::AssistantError;
use crate::model::{IngredientRecord, RiskLevel};
use log::warn;

const NOT_SPECIFIED: &str = "Not specified";

/// Parse a whole fridge listing, one ingredient per line.
///
/// Blank lines are skipped silently; lines that fail to parse are logged
/// and skipped, so one corrupt line never blocks the rest of the listing.
pub fn parse_listing(text: &str) -> Vec<IngredientRecord> {
    let mut records = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(err) => warn!("Skipping fridge line {line:?}: {err}"),
        }
    }
    records
}

/// Parse one non-empty fridge listing line into a record.
pub fn parse_line(line: &str) -> Result<IngredientRecord, AssistantError> {
    let name = line
        .split('(')
        .next()
        .unwrap_or(line)
        .trim()
        .to_string();

    let amount = group(line, '(', ')')
        .unwrap_or(NOT_SPECIFIED)
        .trim()
        .to_string();

    let age = group(line, '[', ']')
        .unwrap_or(NOT_SPECIFIED)
        .trim()
        .to_string();

    let (risk_level, risk_percentage) = match group(line, '{', '}') {
        Some(risk) => parse_risk_group(risk)?,
        None => (RiskLevel::NotSpecified, 0.0),
    };

    let co2_impact = match line.split_once('<') {
        Some((_, rest)) => {
            let raw = rest.split("CO2e>").next().unwrap_or(rest).trim();
            raw.parse::<f64>().map_err(|_| {
                AssistantError::ParseError(format!("invalid CO2 value {raw:?}"))
            })?
        }
        None => 0.0,
    };

    Ok(IngredientRecord {
        name,
        amount,
        age,
        risk_level,
        risk_percentage,
        co2_impact,
    })
}

fn parse_risk_group(risk: &str) -> Result<(RiskLevel, f64), AssistantError> {
    let tokens: Vec<&str> = risk.split_whitespace().collect();
    let level = tokens
        .first()
        .map(|token| RiskLevel::parse(token))
        .unwrap_or(RiskLevel::NotSpecified);
    // percentage is the third token when present, e.g. "high risk 4%"
    let percentage = match tokens.get(2) {
        Some(token) => {
            let raw = token.trim_end_matches('%');
            raw.parse::<f64>().map_err(|_| {
                AssistantError::ParseError(format!("invalid risk percentage {token:?}"))
            })?
        }
        None => 0.0,
    };
    Ok((level, percentage))
}

/// Text inside the first `open`...`close` pair. A missing closing bracket
/// yields everything after `open`, matching how lines are split field-wise.
fn group(line: &str, open: char, close: char) -> Option<&str> {
    let (_, rest) = line.split_once(open)?;
    rest.split(close).next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fully_specified_line() {
        let record =
            parse_line("Milk (1L) [3 days] {high risk 4%} <0.9 CO2e>").unwrap();
        assert_eq!(record.name, "Milk");
        assert_eq!(record.amount, "1L");
        assert_eq!(record.age, "3 days");
        assert_eq!(record.risk_level, RiskLevel::High);
        assert_eq!(record.risk_percentage, 4.0);
        assert_eq!(record.co2_impact, 0.9);
    }

    #[test]
    fn missing_groups_fall_back_to_defaults() {
        let record = parse_line("Eggs").unwrap();
        assert_eq!(record.name, "Eggs");
        assert_eq!(record.amount, "Not specified");
        assert_eq!(record.age, "Not specified");
        assert_eq!(record.risk_level, RiskLevel::NotSpecified);
        assert_eq!(record.risk_percentage, 0.0);
        assert_eq!(record.co2_impact, 0.0);
    }

    #[test]
    fn short_risk_group_defaults_percentage_to_zero() {
        let record = parse_line("Butter (0.25kg) {medium}").unwrap();
        assert_eq!(record.risk_level, RiskLevel::Medium);
        assert_eq!(record.risk_percentage, 0.0);
    }

    #[test]
    fn malformed_percentage_fails_the_line() {
        let result = parse_line("Cheese (0.3kg) {high risk soon%}");
        assert!(matches!(result, Err(AssistantError::ParseError(_))));
    }

    #[test]
    fn malformed_co2_value_fails_the_line() {
        let result = parse_line("Cheese (0.3kg) <heavy CO2e>");
        assert!(matches!(result, Err(AssistantError::ParseError(_))));
    }

    #[test]
    fn listing_skips_corrupt_and_blank_lines() {
        let listing = "\
Milk (1kg) [3 days] {high risk 4%} <0.9 CO2e>

Cheese (0.3kg) <heavy CO2e>
Spinach (0.5kg) [1 day] {high risk 2%} <0.4 CO2e>
";
        let records = parse_listing(listing);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Milk");
        assert_eq!(records[1].name, "Spinach");
    }
}
