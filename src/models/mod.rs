//! Data models for the weatherbot service
//!
//! This module contains the request-scoped domain values:
//! - Location: coordinates resolved by the geocoder
//! - Weather: current conditions and the derived sky condition

pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use location::GeoLocation;
pub use weather::{SkyCondition, WeatherSnapshot};
