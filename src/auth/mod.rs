//! Credential handling for account access

pub mod pin;

pub use pin::{PinHashConfig, PinHasher};
