//! Canned AI insights shown on the AI page.
//!
//! These are fixed sample figures, not derived from the store's data.

use foodia_core::Money;

/// How much an insight matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    High,
    Medium,
}

impl Impact {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High impact",
            Self::Medium => "Medium impact",
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::High => "badge badge-high",
            Self::Medium => "badge badge-medium",
        }
    }
}

/// One recommendation card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insight {
    pub title: &'static str,
    pub description: &'static str,
    pub impact: Impact,
    pub action: &'static str,
    /// Percent.
    pub confidence: u8,
}

pub const INSIGHTS: [Insight; 4] = [
    Insight {
        title: "Weekend Sales Surge Detected",
        description: "Your sales increase by 45% on weekends. Consider creating weekend-only \
                      specials to maximize revenue.",
        impact: Impact::High,
        action: "Create weekend menu specials",
        confidence: 92,
    },
    Insight {
        title: "Açaí Bowl Popularity Rising",
        description: "Açaí Bowl orders are up 67% this month. Customers are looking for \
                      healthier options.",
        impact: Impact::Medium,
        action: "Expand healthy menu section",
        confidence: 88,
    },
    Insight {
        title: "Repeat Customer Pattern",
        description: "Customers who order Coxinha are 3x more likely to become repeat \
                      customers.",
        impact: Impact::High,
        action: "Promote Coxinha to new customers",
        confidence: 94,
    },
    Insight {
        title: "Optimal WhatsApp Campaign Time",
        description: "Your customers are most responsive to WhatsApp messages between 2-4 PM \
                      on weekdays.",
        impact: Impact::Medium,
        action: "Schedule campaigns for 2-4 PM",
        confidence: 85,
    },
];

/// A progress-bar metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceMetric {
    pub label: &'static str,
    /// Percent.
    pub value: u8,
}

pub const PERFORMANCE: [PerformanceMetric; 4] = [
    PerformanceMetric {
        label: "AI Recommendations Accuracy",
        value: 91,
    },
    PerformanceMetric {
        label: "Campaign Success Rate",
        value: 78,
    },
    PerformanceMetric {
        label: "Customer Engagement",
        value: 84,
    },
    PerformanceMetric {
        label: "Revenue Impact",
        value: 67,
    },
];

/// Writing tips shown next to the custom campaign box.
pub const MESSAGE_TIPS: [&str; 4] = [
    "Add emojis to increase engagement (+23% open rate)",
    "Mention specific products for better conversion",
    "Include a clear call-to-action",
    "Personalize with customer name",
];

/// Results of a past campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignResult {
    pub name: &'static str,
    pub date: &'static str,
    pub sent: u32,
    pub opened: u32,
    pub clicked: u32,
    pub orders: u32,
    pub revenue: Money,
}

impl CampaignResult {
    /// Opened as a percentage of sent, rounded down.
    #[must_use]
    pub const fn open_rate(&self) -> u32 {
        if self.sent == 0 {
            0
        } else {
            self.opened * 100 / self.sent
        }
    }
}

/// Past campaign results.
#[must_use]
pub fn campaign_results() -> Vec<CampaignResult> {
    vec![
        CampaignResult {
            name: "Weekend Special",
            date: "Jan 13",
            sent: 247,
            opened: 189,
            clicked: 67,
            orders: 23,
            revenue: Money::from_cents(44_550),
        },
        CampaignResult {
            name: "New Year Promotion",
            date: "Jan 1",
            sent: 198,
            opened: 156,
            clicked: 89,
            orders: 34,
            revenue: Money::from_cents(67_825),
        },
        CampaignResult {
            name: "VIP Appreciation",
            date: "Dec 28",
            sent: 45,
            opened: 42,
            clicked: 28,
            orders: 19,
            revenue: Money::from_cents(38_790),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rate() {
        let results = campaign_results();
        let rates: Vec<u32> = results.iter().map(CampaignResult::open_rate).collect();
        assert_eq!(rates, vec![76, 78, 93]);
    }
}
