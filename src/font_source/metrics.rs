//! Font metrics and measurement data
//!
//! Vertical metrics in font units as read from `hhea` and `OS/2`, with the
//! usual proportional fallbacks when a font leaves a value out.

/// Font metrics for spacing and positioning
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontMetrics {
    pub line_height: f64,
    pub ascent: f64,
    pub descent: f64,
    pub x_height: f64,
    pub cap_height: f64,
}

impl FontMetrics {
    /// Build metrics from raw table values, defaulting missing heights
    pub fn from_tables(
        units_per_em: f64,
        ascender: f64,
        descender: f64,
        line_gap: f64,
        x_height: Option<f64>,
        cap_height: Option<f64>,
    ) -> Self {
        Self {
            line_height: ascender - descender + line_gap,
            ascent: ascender,
            descent: descender,
            // 50% / 70% of UPM when OS/2 is too old to carry them
            x_height: x_height.unwrap_or(units_per_em * 0.5),
            cap_height: cap_height.unwrap_or(units_per_em * 0.7),
        }
    }

    /// Scale every metric by `factor`, e.g. `ppem / units_per_em`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            line_height: self.line_height * factor,
            ascent: self.ascent * factor,
            descent: self.descent * factor,
            x_height: self.x_height * factor,
            cap_height: self.cap_height * factor,
        }
    }

    /// Magnitudes only; descent is reported as a positive distance
    pub fn abs(&self) -> Self {
        Self {
            line_height: self.line_height.abs(),
            ascent: self.ascent.abs(),
            descent: self.descent.abs(),
            x_height: self.x_height.abs(),
            cap_height: self.cap_height.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_heights_fall_back_to_upm_ratios() {
        let metrics = FontMetrics::from_tables(1000.0, 800.0, -200.0, 90.0, None, Some(680.0));
        assert_eq!(metrics.line_height, 1090.0);
        assert_eq!(metrics.x_height, 500.0);
        assert_eq!(metrics.cap_height, 680.0);
    }

    #[test]
    fn test_scaled_then_abs() {
        let metrics = FontMetrics::from_tables(1000.0, 800.0, -200.0, 0.0, Some(500.0), Some(700.0));
        let em = metrics.scaled(0.012).abs();
        assert!((em.ascent - 9.6).abs() < 1e-9);
        assert!((em.descent - 2.4).abs() < 1e-9);
        assert!((em.line_height - 12.0).abs() < 1e-9);
    }
}
