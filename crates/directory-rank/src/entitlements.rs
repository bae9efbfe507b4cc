//! Capability flags derived from a listing's subscription and claim state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Free,
    Pro,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
}

impl Subscription {
    pub fn new(plan: SubscriptionPlan, status: SubscriptionStatus) -> Self {
        Self { plan, status }
    }

    /// Plan that is currently paid for, if any. Only `active` counts.
    fn active_plan(&self) -> Option<SubscriptionPlan> {
        (self.status == SubscriptionStatus::Active).then_some(self.plan)
    }
}

/// What the owner of a listing may see and do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entitlements {
    pub can_edit_availability: bool,
    pub can_edit_pricing: bool,
    pub can_view_lead_scoring: bool,
    pub can_view_basic_analytics: bool,
    pub can_view_advanced_analytics: bool,
    pub can_export_csv: bool,
    pub can_view_competitor_insights: bool,
}

impl Entitlements {
    pub fn none() -> Self {
        Self::default()
    }

    fn pro() -> Self {
        Self {
            can_edit_availability: true,
            can_edit_pricing: true,
            can_view_lead_scoring: true,
            can_view_basic_analytics: true,
            ..Self::none()
        }
    }

    fn premium() -> Self {
        Self {
            can_view_advanced_analytics: true,
            can_export_csv: true,
            can_view_competitor_insights: true,
            ..Self::pro()
        }
    }

    pub fn granted(&self) -> usize {
        [
            self.can_edit_availability,
            self.can_edit_pricing,
            self.can_view_lead_scoring,
            self.can_view_basic_analytics,
            self.can_view_advanced_analytics,
            self.can_export_csv,
            self.can_view_competitor_insights,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

/// Derive capabilities. Unclaimed listings get nothing regardless of plan.
pub fn get_entitlements(subscription: Option<&Subscription>, is_claimed: bool) -> Entitlements {
    if !is_claimed {
        return Entitlements::none();
    }

    match subscription.and_then(Subscription::active_plan) {
        Some(SubscriptionPlan::Premium) => Entitlements::premium(),
        Some(SubscriptionPlan::Pro) => Entitlements::pro(),
        Some(SubscriptionPlan::Free) | None => Entitlements::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLANS: [SubscriptionPlan; 3] = [
        SubscriptionPlan::Free,
        SubscriptionPlan::Pro,
        SubscriptionPlan::Premium,
    ];
    const STATUSES: [SubscriptionStatus; 4] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Trialing,
        SubscriptionStatus::PastDue,
        SubscriptionStatus::Canceled,
    ];

    #[test]
    fn premium_active_unlocks_everything() {
        let subscription = Subscription::new(SubscriptionPlan::Premium, SubscriptionStatus::Active);
        let granted = get_entitlements(Some(&subscription), true);
        assert_eq!(granted.granted(), 7);
    }

    #[test]
    fn pro_active_withholds_premium_features() {
        let subscription = Subscription::new(SubscriptionPlan::Pro, SubscriptionStatus::Active);
        let granted = get_entitlements(Some(&subscription), true);
        assert!(granted.can_edit_availability);
        assert!(granted.can_edit_pricing);
        assert!(granted.can_view_lead_scoring);
        assert!(granted.can_view_basic_analytics);
        assert!(!granted.can_view_advanced_analytics);
        assert!(!granted.can_export_csv);
        assert!(!granted.can_view_competitor_insights);
    }

    #[test]
    fn unclaimed_listing_gets_nothing() {
        assert_eq!(get_entitlements(None, false), Entitlements::none());
        for plan in PLANS {
            for status in STATUSES {
                let subscription = Subscription::new(plan, status);
                assert_eq!(
                    get_entitlements(Some(&subscription), false),
                    Entitlements::none()
                );
            }
        }
    }

    #[test]
    fn inactive_statuses_match_no_subscription() {
        let baseline = get_entitlements(None, true);
        assert_eq!(baseline, Entitlements::none());
        for plan in PLANS {
            for status in STATUSES
                .into_iter()
                .filter(|status| *status != SubscriptionStatus::Active)
            {
                let subscription = Subscription::new(plan, status);
                assert_eq!(get_entitlements(Some(&subscription), true), baseline);
            }
        }
    }

    #[test]
    fn deserializes_wire_names() {
        let subscription: Subscription =
            serde_json::from_str(r#"{"plan":"premium","status":"past_due"}"#)
                .expect("valid subscription payload");
        assert_eq!(
            subscription,
            Subscription::new(SubscriptionPlan::Premium, SubscriptionStatus::PastDue)
        );
    }
}
