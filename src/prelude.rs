//! Crate-wide exports for easy access.

pub use crate::dsp::*;
pub use crate::error::{Result, StftError};
pub use crate::tensor::{Sample, Tensor};
pub use crate::util::window::WindowType;
pub use num_complex::Complex;
