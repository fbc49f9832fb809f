//! World-subsystem error type.

use thiserror::Error;

/// Errors produced by `slam-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("no obstacle-free point found after {attempts} samples")]
    NoFreeSpace { attempts: usize },

    #[error("invalid environment bounds {width} x {height}")]
    InvalidBounds { width: f64, height: f64 },
}

pub type WorldResult<T> = Result<T, WorldError>;
