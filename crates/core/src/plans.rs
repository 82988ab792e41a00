//! Subscription plans offered on the landing page.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Money, UnknownVariant};

/// A FoodIa subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Small family businesses.
    Starter,
    /// Growing businesses with steady volume.
    Growth,
    /// Established chains.
    Pro,
}

impl PlanTier {
    /// Every tier, cheapest first.
    pub const ALL: [Self; 3] = [Self::Starter, Self::Growth, Self::Pro];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Growth => "Growth",
            Self::Pro => "Pro",
        }
    }

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Growth => "growth",
            Self::Pro => "pro",
        }
    }

    /// Monthly price.
    #[must_use]
    pub fn monthly_price(self) -> Money {
        match self {
            Self::Starter => Money::from_cents(2000),
            Self::Growth => Money::from_cents(10_000),
            Self::Pro => Money::from_cents(20_000),
        }
    }

    /// One-line summary shown on the plan card.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Starter => {
                "Perfect for small Brazilian food businesses starting their digital journey"
            }
            Self::Growth => "Ideal for growing businesses with multiple locations or higher volume",
            Self::Pro => "Enterprise solution for established Brazilian food chains",
        }
    }

    /// Feature bullet list.
    #[must_use]
    pub const fn features(self) -> &'static [&'static str] {
        match self {
            Self::Starter => &[
                "Up to 50 products",
                "Basic store customization",
                "WhatsApp integration",
                "Mobile-responsive store",
                "Basic analytics",
            ],
            Self::Growth => &[
                "Up to 500 products",
                "Advanced customization",
                "WhatsApp + Instagram integration",
                "Gamified ordering experience",
                "Advanced analytics",
                "Multi-language support",
                "Priority support",
            ],
            Self::Pro => &[
                "Unlimited products",
                "White-label solution",
                "Multi-platform integration",
                "Advanced gamification",
                "Real-time analytics",
                "API access",
                "Dedicated account manager",
            ],
        }
    }

    /// Reasons shown with a quiz recommendation.
    #[must_use]
    pub const fn pitch(self) -> [&'static str; 3] {
        match self {
            Self::Starter => [
                "Perfect for small family businesses getting started",
                "Essential features to launch your digital presence",
                "WhatsApp integration for easy customer communication",
            ],
            Self::Growth => [
                "Ideal for growing businesses with steady order volume",
                "Advanced features like gamification and analytics",
                "Multi-channel support for diverse customer preferences",
            ],
            Self::Pro => [
                "Enterprise solution for established food chains",
                "Advanced customization and white-label options",
                "Dedicated support for high-volume operations",
            ],
        }
    }

    /// Whether the landing page highlights this tier.
    #[must_use]
    pub const fn is_popular(self) -> bool {
        matches!(self, Self::Growth)
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanTier {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("plan", s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prices() {
        assert_eq!(PlanTier::Starter.monthly_price().to_string(), "$20.00");
        assert_eq!(PlanTier::Growth.monthly_price().to_string(), "$100.00");
        assert_eq!(PlanTier::Pro.monthly_price().to_string(), "$200.00");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Growth".parse::<PlanTier>().unwrap(), PlanTier::Growth);
        assert!("enterprise".parse::<PlanTier>().is_err());
    }
}
