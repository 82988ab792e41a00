//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use foodia_core::plans::PlanTier;

use crate::state::AppState;

/// Plan card display data.
#[derive(Clone)]
pub struct PlanView {
    pub name: &'static str,
    pub slug: &'static str,
    pub price: String,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
    /// Admin sign-up link that preselects this plan.
    pub signup_url: String,
}

impl PlanView {
    /// Build the card for `tier`, linking to the admin host.
    #[must_use]
    pub fn new(tier: PlanTier, admin_base_url: &str) -> Self {
        Self {
            name: tier.name(),
            slug: tier.as_str(),
            price: tier.monthly_price().to_string(),
            description: tier.description(),
            features: tier.features(),
            popular: tier.is_popular(),
            signup_url: signup_url(admin_base_url, tier),
        }
    }
}

/// Sign-up URL on the admin host for a plan.
#[must_use]
pub fn signup_url(admin_base_url: &str, tier: PlanTier) -> String {
    format!("{admin_base_url}/auth?plan={}", tier.as_str())
}

/// Customer quote shown under the plans.
#[derive(Clone)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub business: &'static str,
}

/// Static testimonials.
pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        quote: "Our WhatsApp orders doubled in the first month. Customers love building their own combos.",
        author: "Maria Santos",
        business: "Sabor da Casa",
    },
    Testimonial {
        quote: "Setting up the menu took one afternoon. Now the whole team sees orders the moment they arrive.",
        author: "João Oliveira",
        business: "Burger do João",
    },
    Testimonial {
        quote: "The points system keeps people coming back. Our repeat customers went up by a third.",
        author: "Ana Costa",
        business: "Açaí da Ana",
    },
];

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub plans: Vec<PlanView>,
    pub testimonials: &'static [Testimonial],
    pub admin_url: String,
}

/// Display the landing page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let admin_url = state.config().admin_base_url.clone();
    HomeTemplate {
        plans: PlanTier::ALL
            .into_iter()
            .map(|tier| PlanView::new(tier, &admin_url))
            .collect(),
        testimonials: &TESTIMONIALS,
        admin_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_url_carries_plan() {
        assert_eq!(
            signup_url("http://localhost:3001", PlanTier::Growth),
            "http://localhost:3001/auth?plan=growth"
        );
    }

    #[test]
    fn test_plan_view_formats_price() {
        let view = PlanView::new(PlanTier::Starter, "https://admin.foodia.app");
        assert_eq!(view.price, "$20.00");
        assert!(!view.popular);
        assert!(PlanView::new(PlanTier::Growth, "").popular);
    }
}
