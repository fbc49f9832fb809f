//! Motor commands.

/// One tick of motor output: linear `speed` along the new heading and
/// angular change `omega` in degrees (counter-clockwise positive).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    pub speed: f64,
    pub omega: f64,
}

impl Command {
    #[inline]
    pub fn new(speed: f64, omega: f64) -> Self {
        Self { speed, omega }
    }

    /// No translation, no rotation.
    #[inline]
    pub fn stop() -> Self {
        Self::default()
    }

    /// Rotate in place.
    #[inline]
    pub fn turn(omega: f64) -> Self {
        Self { speed: 0.0, omega }
    }
}
