//! Catalog module - agent and review records with their repositories
//!
//! These operations are used by the API service layer and the HTTP server.

pub mod agent;
pub mod ratings;
pub mod review;
pub mod slug;

pub use agent::{Agent, AgentRepository, NewAgent};
pub use ratings::{RatingRepository, RatingSummary};
pub use review::{NewReview, Review, ReviewRepository};
pub use slug::slugify;
