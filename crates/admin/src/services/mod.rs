//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Email and password sign-in with Argon2id
//! - `campaigns` - WhatsApp campaign templates and launching
//! - `insights` - Canned AI insights and campaign results
//! - `analytics` - Dashboard metrics and sample charts

pub mod analytics;
pub mod auth;
pub mod campaigns;
pub mod insights;

pub use auth::{AuthError, AuthService};
pub use campaigns::{CampaignLauncher, SimulatedLauncher};
