//! WhatsApp campaigns.
//!
//! Launching is delegated to a [`CampaignLauncher`]. The only launcher today
//! is [`SimulatedLauncher`], which waits for a fixed delay in place of the
//! messaging provider's round trip and reports every targeted customer as
//! reached.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use foodia_core::CustomerSegment;

use crate::models::customers::CustomerStats;

/// Errors from building or launching a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignError {
    /// The custom message is blank.
    #[error("Please enter a campaign message")]
    EmptyMessage,
    /// No template has this id.
    #[error("campaign template {0} not found")]
    UnknownTemplate(String),
}

/// Who receives a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Audience {
    #[default]
    AllCustomers,
    Segment(CustomerSegment),
}

impl Audience {
    /// Parse a form value: `all` or a segment name.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        value.parse().map_or(Self::AllCustomers, Self::Segment)
    }

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllCustomers => "all",
            Self::Segment(segment) => segment.as_str(),
        }
    }

    /// Label shown on template cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AllCustomers => "All customers",
            Self::Segment(CustomerSegment::Vip) => "VIP customers",
            Self::Segment(CustomerSegment::New) => "New customers",
            Self::Segment(CustomerSegment::Active) => "Active customers",
        }
    }

    /// How many of the store's customers the audience covers.
    #[must_use]
    pub const fn reach(self, stats: &CustomerStats) -> usize {
        match self {
            Self::AllCustomers => stats.total,
            Self::Segment(segment) => stats.in_segment(segment),
        }
    }
}

/// A ready-made campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub message: &'static str,
    pub audience: Audience,
}

/// Ready-made campaigns offered on the AI page.
pub const TEMPLATES: [CampaignTemplate; 3] = [
    CampaignTemplate {
        id: "weekend-special",
        name: "Weekend Special",
        message: "🍽️ Weekend Special Alert! Get 20% off on all Brazilian main dishes this \
                  weekend. Order now through WhatsApp and taste the authentic flavors of \
                  Brazil! 🇧🇷",
        audience: Audience::AllCustomers,
    },
    CampaignTemplate {
        id: "vip-appreciation",
        name: "VIP Customer Appreciation",
        message: "🌟 Thank you for being a valued customer! Enjoy a complimentary Brigadeiro \
                  Box with your next order of $25 or more. You're the reason we love what we \
                  do! ❤️",
        audience: Audience::Segment(CustomerSegment::Vip),
    },
    CampaignTemplate {
        id: "new-customer-welcome",
        name: "New Customer Welcome",
        message: "🎉 Welcome to Sabor Brasileiro! Try our signature Coxinha de Frango with 15% \
                  off your first order. Authentic Brazilian flavors await you!",
        audience: Audience::Segment(CustomerSegment::New),
    },
];

/// Name given to campaigns written on the page.
pub const CUSTOM_CAMPAIGN_NAME: &str = "Custom Campaign";

/// A campaign about to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub name: String,
    pub message: String,
    pub audience: Audience,
}

impl Campaign {
    /// Build a campaign from a template id.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::UnknownTemplate` if no template has the id.
    pub fn from_template(id: &str) -> Result<Self, CampaignError> {
        TEMPLATES
            .iter()
            .find(|template| template.id == id)
            .map(|template| Self {
                name: template.name.to_owned(),
                message: template.message.to_owned(),
                audience: template.audience,
            })
            .ok_or_else(|| CampaignError::UnknownTemplate(id.to_owned()))
    }

    /// Build a campaign from a message written on the page.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::EmptyMessage` if the message is blank.
    pub fn custom(message: &str, audience: Audience) -> Result<Self, CampaignError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CampaignError::EmptyMessage);
        }
        Ok(Self {
            name: CUSTOM_CAMPAIGN_NAME.to_owned(),
            message: message.to_owned(),
            audience,
        })
    }
}

/// Outcome of a launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub name: String,
    pub recipients: usize,
}

impl LaunchReport {
    /// Toast text, e.g. `Campaign "Weekend Special" launched to 12 customers!`.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Campaign \"{}\" launched to {} customers!",
            self.name, self.recipients
        )
    }
}

/// Sends a campaign to its audience.
pub trait CampaignLauncher {
    /// Send `campaign` to `recipients` customers.
    fn launch(
        &self,
        campaign: &Campaign,
        recipients: usize,
    ) -> impl Future<Output = Result<LaunchReport, CampaignError>> + Send;
}

/// Launcher that only waits, standing in for the messaging provider.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLauncher {
    delay: Duration,
}

impl SimulatedLauncher {
    /// Create a launcher that takes `delay` per launch.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl CampaignLauncher for SimulatedLauncher {
    async fn launch(
        &self,
        campaign: &Campaign,
        recipients: usize,
    ) -> Result<LaunchReport, CampaignError> {
        tokio::time::sleep(self.delay).await;

        tracing::info!(
            campaign = %campaign.name,
            audience = campaign.audience.as_str(),
            recipients,
            "Campaign launched"
        );
        Ok(LaunchReport {
            name: campaign.name.clone(),
            recipients,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodia_core::Money;

    use super::*;

    fn stats() -> CustomerStats {
        CustomerStats {
            total: 20,
            new: 5,
            active: 12,
            vip: 3,
            revenue: Money::ZERO,
            average_order_value: Money::ZERO,
            active_this_month: 0,
            repeat_customers: 0,
            repeat_rate: 0,
        }
    }

    #[test]
    fn test_audience_reach_follows_segments() {
        assert_eq!(Audience::AllCustomers.reach(&stats()), 20);
        assert_eq!(Audience::parse("vip").reach(&stats()), 3);
        assert_eq!(Audience::parse("new").reach(&stats()), 5);
        assert_eq!(Audience::parse("everyone"), Audience::AllCustomers);
    }

    #[test]
    fn test_templates() {
        let campaign = Campaign::from_template("vip-appreciation").unwrap();
        assert_eq!(campaign.name, "VIP Customer Appreciation");
        assert_eq!(campaign.audience, Audience::Segment(CustomerSegment::Vip));
        assert!(campaign.message.contains("Brigadeiro Box"));

        assert!(matches!(
            Campaign::from_template("nope"),
            Err(CampaignError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_custom_message_required() {
        assert_eq!(
            Campaign::custom("   ", Audience::AllCustomers),
            Err(CampaignError::EmptyMessage)
        );
        let campaign = Campaign::custom(" Feijoada today! ", Audience::AllCustomers).unwrap();
        assert_eq!(campaign.name, CUSTOM_CAMPAIGN_NAME);
        assert_eq!(campaign.message, "Feijoada today!");
    }

    #[tokio::test]
    async fn test_simulated_launch_reports_reach() {
        let launcher = SimulatedLauncher::new(Duration::ZERO);
        let campaign = Campaign::from_template("weekend-special").unwrap();
        let report = launcher.launch(&campaign, 20).await.unwrap();
        assert_eq!(report.recipients, 20);
        assert_eq!(
            report.message(),
            "Campaign \"Weekend Special\" launched to 20 customers!"
        );
    }
}
