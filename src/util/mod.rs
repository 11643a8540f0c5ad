//! Utilities shared by the spectral code and its tests.

pub mod general;
pub mod window;

pub use general::*;
pub use window::WindowType;
