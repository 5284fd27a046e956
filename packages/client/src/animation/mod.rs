//! Client-side animation: bounce physics for media entities and the raster
//! rain, each driven by its own cancellable periodic task.

mod bounce;
mod matrix;
mod scheduler;

pub use bounce::{BOUNCE_TICK, BounceField, BouncingEntity, ENTITY_SIZE, EntityKind, Vec2};
pub use matrix::{
    COLUMN_WIDTH, FADE_ALPHA, GLYPHS, Glyph, MatrixRain, RAIN_INTERVAL, RESET_PROBABILITY,
    RainFrame,
};
pub use scheduler::{AnimationScheduler, PeriodicTask};

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Largest accepted width or height, in pixels
    pub const MAX_DIMENSION: f64 = 16_384.0;

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport whose sides both pass [`is_valid_dimension`]
    pub fn checked(width: f64, height: f64) -> Option<Self> {
        (is_valid_dimension(width) && is_valid_dimension(height))
            .then_some(Self::new(width, height))
    }
}

/// Parse one viewport side, rejecting values [`is_valid_dimension`] refuses
pub fn parse_dimension(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if is_valid_dimension(parsed) {
        Ok(parsed)
    } else {
        Err(format!(
            "must be a finite size in (0, {}] pixels",
            Viewport::MAX_DIMENSION
        ))
    }
}

/// Finite, positive and at most [`Viewport::MAX_DIMENSION`]
pub fn is_valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= Viewport::MAX_DIMENSION
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_rejects_non_finite_and_oversized_sides() {
        // テスト項目: 非有限・0 以下・上限超過の辺を持つビューポートは作れない
        // then (期待する結果):
        assert_eq!(Viewport::checked(800.0, 600.0), Some(Viewport::new(800.0, 600.0)));
        assert_eq!(
            Viewport::checked(Viewport::MAX_DIMENSION, 1.0),
            Some(Viewport::new(Viewport::MAX_DIMENSION, 1.0))
        );
        assert!(Viewport::checked(f64::INFINITY, 600.0).is_none());
        assert!(Viewport::checked(800.0, f64::NAN).is_none());
        assert!(Viewport::checked(1e12, 600.0).is_none());
        assert!(Viewport::checked(0.0, 600.0).is_none());
        assert!(Viewport::checked(800.0, -1.0).is_none());
    }

    #[test]
    fn test_parse_dimension_accepts_only_bounded_numbers() {
        // テスト項目: コマンドライン引数の辺は有限かつ上限内の数値だけを受け付ける
        // then (期待する結果):
        assert_eq!(parse_dimension("1280"), Ok(1280.0));
        assert_eq!(parse_dimension(" 720.5 "), Ok(720.5));
        assert!(parse_dimension("inf").is_err());
        assert!(parse_dimension("NaN").is_err());
        assert!(parse_dimension("1e12").is_err());
        assert!(parse_dimension("0").is_err());
        assert!(parse_dimension("wide").is_err());
    }
}
