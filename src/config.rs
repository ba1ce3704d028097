// Tunables for a particle field. Defaults reproduce the Zoul background.

use crate::color::{self, Color};
use crate::error::FieldError;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
    pub count: usize,
    pub palette: Vec<Color>,
    pub background: Color,
    /// Per-axis velocity bound, components are drawn from [-max, max].
    pub max_velocity: f64,
    pub radius_range: (f64, f64),
    pub alpha_range: (f64, f64),
    pub pulse_rate_range: (f64, f64),
    /// Added to the time accumulator on every tick.
    pub time_step: f64,
    pub trail_alpha: f64,
    pub pulse_frequency: f64,
    pub pulse_amplitude: f64,
    pub pulse_offset: f64,
    pub glow_blur: f64,
    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    /// Wrap each frame in a console timer.
    pub profile: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            width: 800.0,
            height: 600.0,
            count: 80,
            palette: color::DEFAULT_PALETTE.to_vec(),
            background: color::BACKGROUND,
            max_velocity: 0.4,
            radius_range: (1.0, 4.0),
            alpha_range: (0.3, 0.8),
            pulse_rate_range: (0.01, 0.03),
            time_step: 0.01,
            trail_alpha: 0.1,
            pulse_frequency: 10.0,
            pulse_amplitude: 0.3,
            pulse_offset: 0.7,
            glow_blur: 20.0,
            link_distance: 150.0,
            link_alpha: 0.2,
            link_width: 0.5,
            profile: false,
        }
    }
}

impl FieldConfig {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_palette_hex<S: AsRef<str>>(self, tokens: &[S]) -> Result<Self, FieldError> {
        let palette = color::parse_palette(tokens)?;
        Ok(self.with_palette(palette))
    }

    pub fn with_profiling(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        check_bounds(self.width, self.height)?;
        if self.count == 0 {
            return Err(FieldError::invalid("particle count must be positive"));
        }
        if self.palette.is_empty() {
            return Err(FieldError::invalid("palette must contain at least one color"));
        }
        for &(name, (low, high)) in &[
            ("radius", self.radius_range),
            ("alpha", self.alpha_range),
            ("pulse rate", self.pulse_rate_range),
        ] {
            if !(low.is_finite() && high.is_finite() && low > 0.0 && low < high) {
                return Err(FieldError::invalid(format!(
                    "{} range [{}, {}) is empty, non-positive or unbounded",
                    name, low, high
                )));
            }
        }
        if self.alpha_range.1 > 1.0 {
            return Err(FieldError::invalid("alpha range must not exceed 1"));
        }
        for &(name, value) in &[
            ("velocity bound", self.max_velocity),
            ("time step", self.time_step),
            ("link distance", self.link_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FieldError::invalid(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        for &(name, value) in &[
            ("trail alpha", self.trail_alpha),
            ("link alpha", self.link_alpha),
            ("link width", self.link_width),
            ("glow blur", self.glow_blur),
            ("pulse amplitude", self.pulse_amplitude),
            ("pulse frequency", self.pulse_frequency),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FieldError::invalid(format!(
                    "{} must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }
        // Pulse swings over [offset - amplitude, offset + amplitude]
        if !(self.pulse_offset.is_finite() && self.pulse_offset - self.pulse_amplitude > 0.0) {
            return Err(FieldError::invalid(format!(
                "pulse offset {} must exceed amplitude {}",
                self.pulse_offset, self.pulse_amplitude
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_bounds(width: f64, height: f64) -> Result<(), FieldError> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(FieldError::invalid(format!(
            "dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    Ok(())
}
