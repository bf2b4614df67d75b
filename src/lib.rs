//! Student wellness companion.
//!
//! [`wellness::WellnessState`] owns the user's daily metrics, a virtual pet
//! and the daily goal list. [`decay::DecayTicker`] lowers the pet's vitality
//! over time. The remaining modules are consumers of that state: rule-based
//! recommendations, a calendar with mental-load estimates, an anonymous
//! community board and a chat assistant with offline fallbacks.

pub mod calendar;
pub mod chat;
pub mod community;
pub mod config;
pub mod decay;
pub mod error;
pub mod recommendation;
pub mod wellness;

pub use error::{Result, WellnessError};
pub use wellness::WellnessState;
