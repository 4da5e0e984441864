//! REST adapter for the onboarding backend.
//!
//! One [`ApiClient`] carries the shared request/response policy; the
//! endpoint groups (auth, driver, vehicle) hang off it in their own
//! modules. Wire shapes and their translation to the canonical profile
//! live in [`types`].

pub mod auth;
pub mod client;
pub mod driver;
pub mod types;
pub mod vehicle;

pub use client::ApiClient;
pub use types::{
    DriverUpdateRequest, LoginResponse, RegisterRequest, RegisterResponse, VehicleResponse,
    VehicleUpdateRequest,
};
