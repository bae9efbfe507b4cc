use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ReasonLedger, ScoreResult};

/// Source identifiers containing this marker came through the matching quiz.
pub const QUIZ_SOURCE_MARKER: &str = "quiz";
/// Source identifiers containing this marker came from a city or service landing page.
pub const CITY_SERVICE_SOURCE_MARKER: &str = "city";

/// Inbound patient inquiry as seen by the lead scorer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadScoringInput {
    /// `emergency`, `same-week`, `flexible`, or anything else for routine.
    pub urgency: Option<String>,
    pub insurance: Option<String>,
    /// Message length in characters.
    pub message_length: usize,
    pub has_phone: bool,
    pub source_page: Option<String>,
    pub city_match: Option<bool>,
}

impl LeadScoringInput {
    /// Record the length of `message` in characters.
    pub fn with_message(mut self, message: &str) -> Self {
        self.message_length = message.chars().count();
        self
    }
}

/// Rate an inquiry 0..=100. Reasons are reported in evaluation order.
pub fn score_lead(input: &LeadScoringInput) -> ScoreResult {
    let mut ledger = ReasonLedger::default();

    let urgency = input
        .urgency
        .as_deref()
        .map(|value| value.trim().to_ascii_lowercase());
    match urgency.as_deref() {
        Some("emergency") => ledger.award("urgency_emergency", "Emergency request", 20),
        Some("same-week") => ledger.award("urgency_same_week", "Same-week appointment", 15),
        Some("flexible") => ledger.award("urgency_flexible", "Flexible timing", 10),
        _ => ledger.award("urgency_routine", "Routine appointment", 5),
    }

    if input
        .insurance
        .as_deref()
        .is_some_and(|insurance| !insurance.trim().is_empty())
    {
        ledger.award("insurance_provided", "Insurance information provided", 15);
    }

    match input.message_length {
        0 => {}
        1..=50 => ledger.award("brief_message", "Brief message", 5),
        51..=100 => ledger.award("moderate_message", "Moderate message detail", 10),
        _ => ledger.award("detailed_message", "Detailed message", 15),
    }

    if input.has_phone {
        ledger.award("phone_provided", "Phone number provided", 10);
    }

    if input.city_match == Some(true) {
        ledger.award("city_match", "City match confirmed", 10);
    }

    if let Some(source) = input.source_page.as_deref().map(str::to_ascii_lowercase) {
        if source.contains(QUIZ_SOURCE_MARKER) {
            ledger.award("quiz_source", "From matching quiz", 10);
        } else if source.contains(CITY_SERVICE_SOURCE_MARKER) {
            ledger.award("city_service_source", "From city/service page", 5);
        }
    }

    let raw = ledger.raw_total();
    let result = ledger.finish();
    debug!(raw, score = result.score, "scored lead");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(result: &ScoreResult) -> Vec<&str> {
        result
            .reasons
            .iter()
            .map(|reason| reason.message.as_str())
            .collect()
    }

    #[test]
    fn emergency_lead_scores_above_base() {
        let result = score_lead(&LeadScoringInput {
            urgency: Some("emergency".to_string()),
            ..LeadScoringInput::default()
        });
        assert_eq!(result.score, 70);
        assert!(messages(&result).contains(&"Emergency request"));
    }

    #[test]
    fn missing_urgency_counts_as_routine() {
        let result = score_lead(&LeadScoringInput::default());
        assert_eq!(result.score, 55);
        assert_eq!(messages(&result), vec!["Routine appointment"]);
    }

    #[test]
    fn message_length_bands() {
        let score_for = |length: usize| {
            score_lead(&LeadScoringInput {
                message_length: length,
                ..LeadScoringInput::default()
            })
            .score
        };
        assert_eq!(score_for(0), 55);
        assert_eq!(score_for(1), 60);
        assert_eq!(score_for(50), 60);
        assert_eq!(score_for(51), 65);
        assert_eq!(score_for(100), 65);
        assert_eq!(score_for(101), 70);
    }

    #[test]
    fn reasons_keep_evaluation_order() {
        let input = LeadScoringInput {
            urgency: Some("same-week".to_string()),
            insurance: Some("Cigna".to_string()),
            has_phone: true,
            city_match: Some(true),
            source_page: Some("/austin-tx/emergency-dentist?from=city-page".to_string()),
            ..LeadScoringInput::default()
        }
        .with_message("Chipped a tooth, need it looked at this week.");

        let result = score_lead(&input);
        assert_eq!(
            result.reason_codes(),
            vec![
                "urgency_same_week",
                "insurance_provided",
                "brief_message",
                "phone_provided",
                "city_match",
                "city_service_source",
            ]
        );
        assert_eq!(result.score, 100);
    }

    #[test]
    fn quiz_source_wins_over_city_marker() {
        let result = score_lead(&LeadScoringInput {
            source_page: Some("city-quiz".to_string()),
            ..LeadScoringInput::default()
        });
        assert!(result.has_reason("quiz_source"));
        assert!(!result.has_reason("city_service_source"));
    }

    #[test]
    fn every_positive_signal_is_clamped_to_one_hundred() {
        let input = LeadScoringInput {
            urgency: Some("emergency".to_string()),
            insurance: Some("Delta Dental".to_string()),
            message_length: 400,
            has_phone: true,
            source_page: Some("match-quiz".to_string()),
            city_match: Some(true),
        };
        let result = score_lead(&input);
        assert_eq!(result.score, 100);
        assert_eq!(result.reasons.iter().map(|r| r.weight).sum::<i32>(), 80);
    }

    #[test]
    fn blank_insurance_is_not_provided() {
        let result = score_lead(&LeadScoringInput {
            insurance: Some("   ".to_string()),
            ..LeadScoringInput::default()
        });
        assert!(!result.has_reason("insurance_provided"));
    }
}
