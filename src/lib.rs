pub mod error;
pub mod math;
pub mod physics;

pub use error::{GfxError, Result};
