//! Score gauge view model. Pure data: recomputed from the session every tick.

use crate::constants::{GAUGE_HEIGHT_FRACTION, GAUGE_RIGHT_OFFSET, GAUGE_WIDTH_FRACTION};

#[derive(Clone, Debug, PartialEq)]
pub struct Gauge {
    /// Fill ratio, always within `[0, 1]`.
    pub ratio: f64,
    /// `"score/target"`.
    pub label: String,
}

/// Pixel geometry of the gauge for a given surface size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeBar {
    pub x: f64,
    pub width: f64,
    pub track_top: f64,
    pub track_height: f64,
    pub fill_top: f64,
    pub fill_height: f64,
}

impl Gauge {
    pub fn new(score: i64, target: u32) -> Self {
        // Target is validated to >= 1 upstream; the max keeps the ratio finite regardless.
        let target = target.max(1);
        let shown = score.max(0);
        Self {
            ratio: (shown as f64 / f64::from(target)).clamp(0.0, 1.0),
            label: format!("{shown}/{target}"),
        }
    }

    /// Vertical bar anchored to the bottom of the surface, filling upward.
    pub fn bar(&self, surface_width: f64, surface_height: f64) -> GaugeBar {
        let track_height = surface_height * GAUGE_HEIGHT_FRACTION;
        let track_top = surface_height - track_height;
        let fill_height = track_height * self.ratio;
        GaugeBar {
            x: surface_width - GAUGE_RIGHT_OFFSET,
            width: surface_width * GAUGE_WIDTH_FRACTION,
            track_top,
            track_height,
            fill_top: surface_height - fill_height,
            fill_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_and_label() {
        let g = Gauge::new(3, 10);
        assert!((g.ratio - 0.3).abs() < 1e-9);
        assert_eq!(g.label, "3/10");
    }

    #[test]
    fn ratio_is_clamped_both_ways() {
        assert_eq!(Gauge::new(15, 10).ratio, 1.0);
        let negative = Gauge::new(-2, 10);
        assert_eq!(negative.ratio, 0.0);
        assert_eq!(negative.label, "0/10");
    }

    #[test]
    fn zero_target_does_not_divide_by_zero() {
        let g = Gauge::new(0, 0);
        assert!(g.ratio.is_finite());
        assert_eq!(g.label, "0/1");
    }

    #[test]
    fn bar_fills_from_the_bottom() {
        let bar = Gauge::new(1, 4).bar(1000.0, 800.0);
        assert_eq!(bar.x, 960.0);
        assert!((bar.width - 40.0).abs() < 1e-9);
        assert_eq!(bar.track_height, 800.0);
        assert_eq!(bar.fill_height, 200.0);
        assert_eq!(bar.fill_top, 600.0);
    }
}
