use crate::commands::{match_in_city, SearchResultView};
use crate::infra::parse_timestamp;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use directory_rank::config::AppConfig;
use directory_rank::error::AppError;
use directory_rank::ranking::{
    AcceptingNewPatients, Coordinates, Listing, ListingId, SearchPipeline, SearchQuery,
    ServiceKey, VerificationTier,
};
use directory_rank::scoring::quiz::{AnxietyLevel, PatientType, QuizUrgency};
use directory_rank::{
    get_entitlements, score_completeness, score_lead, LeadScoringInput, QuizAnswers,
    Subscription, SubscriptionPlan, SubscriptionStatus,
};
use std::collections::BTreeMap;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluate recency as of this RFC 3339 instant (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Skip the quiz matching and lead scoring portion of the demo
    #[arg(long)]
    pub(crate) skip_patient_flows: bool,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(Utc::now);
    let listings = sample_listings(as_of);
    let featured: Vec<Listing> = listings
        .iter()
        .filter(|listing| listing.id.0 == "riverside-family")
        .cloned()
        .collect();

    println!("Directory ranking demo (as of {})", as_of.to_rfc3339());
    println!(
        "Featured layout: up to {} sponsored at positions {:?}",
        config.placement.max_featured, config.placement.positions
    );

    println!("\nProfile completeness");
    for listing in &listings {
        println!(
            "- {:<28} {:>3}/100",
            listing.name,
            score_completeness(listing)
        );
    }

    let query = SearchQuery {
        service: Some(ServiceKey::Emergency),
        insurance: Some("Delta Dental PPO".to_string()),
        origin: Some(Coordinates {
            latitude: 30.2672,
            longitude: -97.7431,
        }),
        radius_miles: Some(15.0),
        ..SearchQuery::default()
    };
    query.validate()?;

    let pipeline = SearchPipeline::new(config.placement.clone(), as_of);
    let results = pipeline.search(&listings, &featured, Some(&query));
    println!("\nSearch: emergency care accepting Delta Dental PPO within 15 miles");
    for row in SearchResultView::from_placed(&results) {
        let score = row
            .organic_score
            .map(|score| format!("{score:.2}"))
            .unwrap_or_else(|| "sponsored".to_string());
        println!("  {:>2}. {:<28} {}", row.rank, row.name, score);
    }

    if args.skip_patient_flows {
        return Ok(());
    }

    let answers = QuizAnswers {
        city: "austin-tx".to_string(),
        urgency: QuizUrgency::Emergency,
        patient_type: PatientType::Both,
        anxiety: AnxietyLevel::Moderate,
        weekend_needed: true,
        insurance: Some("delta".to_string()),
        language: Some("spanish".to_string()),
        budget_sensitivity: None,
    };
    println!("\nMatch quiz: family emergency visit, weekend, Spanish-speaking");
    for matched in match_in_city(&listings, &answers) {
        println!("- {} (score {})", matched.name, matched.score);
        for reason in &matched.reasons {
            println!("    +{:<2} {}", reason.weight, reason.message);
        }
    }

    let lead = score_lead(
        &LeadScoringInput {
            urgency: Some("emergency".to_string()),
            insurance: Some("Delta Dental PPO".to_string()),
            has_phone: true,
            source_page: Some("match-quiz".to_string()),
            city_match: Some(true),
            ..LeadScoringInput::default()
        }
        .with_message("Cracked molar after lunch, swelling on the left side. Can anyone see me today?"),
    );

    let subscription = Subscription::new(SubscriptionPlan::Pro, SubscriptionStatus::Active);
    let entitlements = get_entitlements(Some(&subscription), true);
    println!("\nInbound lead for a claimed Pro listing");
    if entitlements.can_view_lead_scoring {
        println!("- lead score {}", lead.score);
        for reason in &lead.reasons {
            println!("    +{:<2} {}", reason.weight, reason.message);
        }
    } else {
        println!("- lead scoring requires an active Pro or Premium subscription");
    }
    println!(
        "- CSV export {}",
        if entitlements.can_export_csv {
            "available"
        } else {
            "requires Premium"
        }
    );

    Ok(())
}

fn sample_listings(as_of: DateTime<Utc>) -> Vec<Listing> {
    let mut hours = BTreeMap::new();
    hours.insert("monday".to_string(), "08:00-17:00".to_string());
    hours.insert("saturday".to_string(), "09:00-13:00".to_string());

    let base = |id: &str, name: &str, updated_days_ago: i64| Listing {
        id: ListingId(id.to_string()),
        name: name.to_string(),
        city: "austin-tx".to_string(),
        address: None,
        phone: None,
        website: None,
        hours: BTreeMap::new(),
        verification: VerificationTier::Unverified,
        completeness_score: 0,
        services: Default::default(),
        availability: Default::default(),
        badges: Default::default(),
        accepting_new_patients: AcceptingNewPatients::Unspecified,
        insurance: Vec::new(),
        languages: Vec::new(),
        latitude: None,
        longitude: None,
        updated_at: as_of - Duration::days(updated_days_ago),
    };

    let mut riverside = base("riverside-family", "Riverside Family Dental", 4);
    riverside.address = Some("1200 E Riverside Dr".to_string());
    riverside.phone = Some("+1 512 555 0142".to_string());
    riverside.hours = hours.clone();
    riverside.services.pediatric = true;
    riverside.availability.weekend = true;
    riverside.insurance = vec!["Delta Dental PPO".to_string()];
    riverside.latitude = Some("30.2410".to_string());
    riverside.longitude = Some("-97.7280".to_string());

    let mut congress = base("congress-emergency", "Congress Ave Emergency Dental", 2);
    congress.address = Some("600 Congress Ave".to_string());
    congress.phone = Some("+1 512 555 0199".to_string());
    congress.website = Some("https://congress-emergency.example".to_string());
    congress.hours = hours;
    congress.verification = VerificationTier::Verified;
    congress.services.emergency = true;
    congress.services.sedation = true;
    congress.availability.emergency_today = true;
    congress.availability.weekend = true;
    congress.badges.anxiety_friendly = true;
    congress.accepting_new_patients = AcceptingNewPatients::Yes;
    congress.insurance = vec!["Delta Dental PPO".to_string(), "Cigna".to_string()];
    congress.languages = vec!["English".to_string(), "Spanish".to_string()];
    congress.latitude = Some("30.2688".to_string());
    congress.longitude = Some("-97.7426".to_string());

    let mut mueller = base("mueller-smiles", "Mueller Smiles", 45);
    mueller.verification = VerificationTier::Pending;
    mueller.services.clear_aligners = true;
    mueller.services.emergency = true;
    mueller.accepting_new_patients = AcceptingNewPatients::No;
    mueller.insurance = vec!["Aetna".to_string()];
    mueller.latitude = Some("30.2981".to_string());
    mueller.longitude = Some("-97.7057".to_string());

    let mut round_rock = base("round-rock-kids", "Round Rock Kids Dentistry", 12);
    round_rock.city = "round-rock-tx".to_string();
    round_rock.services.pediatric = true;

    let mut listings = vec![riverside, congress, mueller, round_rock];
    for listing in &mut listings {
        listing.completeness_score = score_completeness(listing);
    }
    listings
}
