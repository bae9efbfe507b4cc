use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ReasonLedger, ScoreReason};
use crate::ranking::{AcceptingNewPatients, Listing};

/// Maximum number of practices returned to the patient.
pub const MATCH_RESULT_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizUrgency {
    Emergency,
    SameWeek,
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientType {
    Adult,
    Child,
    Both,
}

impl PatientType {
    fn includes_child(self) -> bool {
        matches!(self, PatientType::Child | PatientType::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnxietyLevel {
    None,
    Low,
    Moderate,
    High,
}

impl AnxietyLevel {
    fn wants_gentle_care(self) -> bool {
        matches!(self, AnxietyLevel::Moderate | AnxietyLevel::High)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetSensitivity {
    Low,
    Medium,
    High,
}

/// One patient's questionnaire submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers {
    pub city: String,
    pub urgency: QuizUrgency,
    pub patient_type: PatientType,
    pub anxiety: AnxietyLevel,
    #[serde(default)]
    pub weekend_needed: bool,
    #[serde(default)]
    pub insurance: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Collected for follow-up; does not affect matching.
    #[serde(default)]
    pub budget_sensitivity: Option<BudgetSensitivity>,
}

/// A recommended practice with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub listing: Listing,
    pub score: u8,
    pub reasons: Vec<ScoreReason>,
}

/// Score `listings` against `answers` and return the best [`MATCH_RESULT_LIMIT`].
///
/// Results are ordered by score, highest first; equal scores are ordered by
/// listing id so the selection does not depend on input order.
pub fn match_listings(listings: &[Listing], answers: &QuizAnswers) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = listings
        .iter()
        .map(|listing| score_match(listing, answers))
        .collect();

    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.listing.id.cmp(&b.listing.id))
    });
    results.truncate(MATCH_RESULT_LIMIT);

    debug!(
        candidates = listings.len(),
        returned = results.len(),
        city = %answers.city,
        "matched quiz answers"
    );
    results
}

/// Score a single listing. Reasons come back heaviest first.
pub fn score_match(listing: &Listing, answers: &QuizAnswers) -> MatchResult {
    let mut ledger = ReasonLedger::default();

    if listing.city == answers.city {
        ledger.award("city_match", "Located in your city", 10);
    }

    match answers.urgency {
        QuizUrgency::Emergency => {
            if listing.services.emergency {
                ledger.award("emergency_service", "Offers emergency dental care", 20);
            }
            if listing.availability.emergency_today {
                ledger.award(
                    "emergency_available",
                    "Emergency appointments available today",
                    15,
                );
            }
        }
        QuizUrgency::SameWeek => {
            if listing.availability.same_week {
                ledger.award(
                    "same_week_available",
                    "Same-week appointments available",
                    15,
                );
            }
        }
        QuizUrgency::Flexible => {}
    }

    if answers.weekend_needed && listing.availability.weekend {
        ledger.award("weekend_available", "Weekend appointments available", 15);
    }

    if answers.patient_type.includes_child() && listing.services.pediatric {
        ledger.award("pediatric_service", "Sees children", 20);
    }

    if answers.anxiety.wants_gentle_care() && listing.badges.anxiety_friendly {
        ledger.award("anxiety_friendly", "Anxiety-friendly practice", 15);
    }

    if let Some(plan) = requested(answers.insurance.as_deref())
        .and_then(|wanted| matching_plan(&listing.insurance, &wanted))
    {
        ledger.award("insurance_match", format!("Accepts {plan}"), 15);
    }

    if let Some(language) = requested(answers.language.as_deref()).and_then(|wanted| {
        listing
            .languages
            .iter()
            .find(|spoken| spoken.to_lowercase().contains(&wanted))
    }) {
        ledger.award("language_match", format!("Speaks {language}"), 10);
    }

    if listing.accepting_new_patients == AcceptingNewPatients::Yes {
        ledger.award("accepting_new", "Accepting new patients", 10);
    }

    if listing.verification.is_verified() {
        ledger.award("verified", "Verified practice", 5);
    }

    let result = ledger.finish_by_weight();
    MatchResult {
        listing: listing.clone(),
        score: result.score,
        reasons: result.reasons,
    }
}

/// Lowercased, trimmed answer if one was actually given.
fn requested(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// First plan where either name contains the other, case-insensitively.
fn matching_plan<'a>(plans: &'a [String], wanted: &str) -> Option<&'a String> {
    plans.iter().find(|plan| {
        let plan = plan.trim().to_lowercase();
        !plan.is_empty() && (plan.contains(wanted) || wanted.contains(&plan))
    })
}
