//! moto-onboard — driver-onboarding client core.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod session;
