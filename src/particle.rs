// Simple particle struct to keep track of individual position, velocity, and
// the fixed visual attributes it was spawned with

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub color: Color,
    pub base_alpha: f64,
    pub pulse_rate: f64,
}

impl Particle {
    // Hand placed particle with full opacity, for staging exact scenarios
    #[cfg(test)]
    pub(crate) fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64, color: Color) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            color,
            base_alpha: 1.0,
            pulse_rate: 0.01,
        }
    }

    // Palette must be non-empty, FieldConfig::validate guarantees it
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &FieldConfig) -> Particle {
        let max_vel = config.max_velocity;
        let (min_radius, max_radius) = config.radius_range;
        let (min_alpha, max_alpha) = config.alpha_range;
        let (min_rate, max_rate) = config.pulse_rate_range;
        let color = config.palette[rng.gen_range(0, config.palette.len())];
        Particle {
            pos: [
                rng.gen::<f64>() * config.width,
                rng.gen::<f64>() * config.height,
            ],
            vel: [
                rng.gen_range(-max_vel, max_vel),
                rng.gen_range(-max_vel, max_vel),
            ],
            radius: rng.gen_range(min_radius, max_radius),
            color,
            base_alpha: rng.gen_range(min_alpha, max_alpha),
            pulse_rate: rng.gen_range(min_rate, max_rate),
        }
    }

    pub fn step(&mut self) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
    }

    // Flip the velocity component of any axis that has left [0, bound].
    // Position is not clamped, the particle drifts back in on following ticks.
    pub fn reflect(&mut self, width: f64, height: f64) {
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] = -self.vel[0];
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] = -self.vel[1];
        }
    }
}

// Oscillating size/opacity multiplier, offset between particles by index only
pub fn pulse(time: f64, index: usize, config: &FieldConfig) -> f64 {
    (time * config.pulse_frequency + index as f64).sin() * config.pulse_amplitude
        + config.pulse_offset
}
