// Particle field: owns a fixed set of particles, moves them once per tick and
// draws them with proximity links onto a RenderSurface.
//
// The link pass checks every unordered pair each frame. That is ~3,160 pairs at
// the default 80 particles; larger fields would want spatial binning.

use crate::config::{self, FieldConfig};
use crate::error::FieldError;
use crate::log::Timer;
use crate::particle::{self, Particle};
use crate::surface::RenderSurface;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    pub alpha: f64,
}

pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    time: f64,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> Result<ParticleField, FieldError> {
        let mut rng = rand::thread_rng();
        ParticleField::with_rng(config, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(
        config: FieldConfig,
        rng: &mut R,
    ) -> Result<ParticleField, FieldError> {
        config.validate()?;
        let particles: Vec<Particle> = (0..config.count)
            .map(|_| Particle::spawn(rng, &config))
            .collect();
        crate::log!(
            "particle field: {} particles in {}x{}",
            particles.len(),
            config.width,
            config.height
        );
        Ok(ParticleField {
            config,
            particles,
            time: 0.0,
        })
    }

    // Builds a field around hand placed particles
    #[cfg(test)]
    pub(crate) fn from_particles(
        config: FieldConfig,
        particles: Vec<Particle>,
    ) -> Result<ParticleField, FieldError> {
        let config = config.with_count(particles.len());
        config.validate()?;
        Ok(ParticleField {
            config,
            particles,
            time: 0.0,
        })
    }

    pub fn tick<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        let _timer = Timer::when(self.config.profile, "ParticleField::tick()");
        self.update();
        self.render(surface);
    }

    // Same as tick but advances the clock by `step` instead of the configured step.
    // Non-positive or non-finite steps are rejected and leave the field untouched.
    pub fn tick_with_step<S: RenderSurface + ?Sized>(
        &mut self,
        step: f64,
        surface: &mut S,
    ) -> Result<(), FieldError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(FieldError::invalid(format!(
                "time step must be positive and finite, got {}",
                step
            )));
        }
        let _timer = Timer::when(self.config.profile, "ParticleField::tick()");
        self.advance(step);
        self.render(surface);
        Ok(())
    }

    pub fn update(&mut self) {
        self.advance(self.config.time_step);
    }

    fn advance(&mut self, step: f64) {
        self.time += step;
        let (width, height) = (self.config.width, self.config.height);
        for particle in &mut self.particles {
            particle.step();
            particle.reflect(width, height);
        }
    }

    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        let config = &self.config;
        surface.fill_rect(
            0.0,
            0.0,
            config.width,
            config.height,
            config.background,
            config.trail_alpha,
        );

        let pulses: Vec<f64> = (0..self.particles.len())
            .map(|i| self.pulse_at(i))
            .collect();

        for (p, &pulse) in self.particles.iter().zip(&pulses) {
            surface.fill_circle(
                p.pos[0],
                p.pos[1],
                p.radius * pulse,
                p.color,
                p.base_alpha * pulse,
                config.glow_blur * pulse,
            );
        }

        // Links are drawn without the disc glow
        surface.reset();
        for link in self.links(&pulses) {
            let from = &self.particles[link.from];
            let to = &self.particles[link.to];
            surface.stroke_line(from.pos, to.pos, from.color, link.alpha, config.link_width);
        }

        surface.reset();
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
        config::check_bounds(width, height)?;
        self.config.width = width;
        self.config.height = height;
        Ok(())
    }

    /// Pairs currently closer than the link distance, each listed once with i < j.
    pub fn connections(&self) -> Vec<Connection> {
        let pulses: Vec<f64> = (0..self.particles.len())
            .map(|i| self.pulse_at(i))
            .collect();
        self.links(&pulses).collect()
    }

    fn links<'a>(&'a self, pulses: &'a [f64]) -> impl Iterator<Item = Connection> + 'a {
        let max_distance = self.config.link_distance;
        let link_alpha = self.config.link_alpha;
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |i| {
            (i + 1..particles.len()).filter_map(move |j| {
                let a: Vector2<f64> = particles[i].pos;
                let b: Vector2<f64> = particles[j].pos;
                let distance = vecmath::vec2_len(vecmath::vec2_sub(a, b));
                if distance < max_distance {
                    Some(Connection {
                        from: i,
                        to: j,
                        distance,
                        alpha: (1.0 - distance / max_distance) * link_alpha * pulses[i],
                    })
                } else {
                    None
                }
            })
        })
    }

    pub fn pulse_at(&self, index: usize) -> f64 {
        particle::pulse(self.time, index, &self.config)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.config.width, self.config.height)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, BACKGROUND, DEFAULT_PALETTE};
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seeded(config: FieldConfig) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(42);
        ParticleField::with_rng(config, &mut rng).unwrap()
    }

    fn single(x: f64, y: f64, vx: f64, vy: f64) -> ParticleField {
        let p = Particle::new(x, y, vx, vy, 2.0, DEFAULT_PALETTE[0]);
        ParticleField::from_particles(FieldConfig::default(), vec![p]).unwrap()
    }

    #[test]
    fn builds_requested_count() {
        let field = seeded(FieldConfig::default());
        assert_eq!(field.len(), 80);
        assert_eq!(field.time(), 0.0);
        assert_eq!(field.bounds(), (800.0, 600.0));
    }

    #[test]
    fn zero_count_is_rejected() {
        let result = ParticleField::new(FieldConfig::default().with_count(0));
        assert!(matches!(result, Err(FieldError::InvalidConfiguration(_))));
    }

    #[test]
    fn bad_dimensions_are_rejected() {
        assert!(ParticleField::new(FieldConfig::default().with_size(-1.0, 10.0)).is_err());
        assert!(ParticleField::new(FieldConfig::default().with_size(10.0, 0.0)).is_err());
    }

    #[test]
    fn reflection_turns_particle_around() {
        let mut field = single(801.0, 300.0, 0.3, 0.0);
        let mut surface = RecordingSurface::new();
        field.tick(&mut surface);
        assert!(field.particles()[0].vel[0] < 0.0);
        let x_after_first = field.particles()[0].pos[0];
        field.tick(&mut surface);
        assert!(field.particles()[0].pos[0] < x_after_first);
    }

    #[test]
    fn tick_advances_time_by_fixed_step() {
        let mut field = seeded(FieldConfig::default().with_count(3));
        let mut surface = RecordingSurface::new();
        for _ in 0..10 {
            field.tick(&mut surface);
        }
        assert!((field.time() - 0.1).abs() < 1e-9);
        field.tick_with_step(0.5, &mut surface).unwrap();
        assert!((field.time() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn tick_with_step_keeps_time_increasing() {
        let mut field = seeded(FieldConfig::default().with_count(3));
        let mut surface = RecordingSurface::new();
        field.tick(&mut surface);
        let before = field.particles().to_vec();
        surface.clear();
        for step in &[-1.0, 0.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                field.tick_with_step(*step, &mut surface),
                Err(FieldError::InvalidConfiguration(_))
            ));
        }
        assert!((field.time() - 0.01).abs() < 1e-12);
        assert_eq!(field.particles(), &before[..]);
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn frame_starts_with_trail_and_ends_with_reset() {
        let mut field = seeded(FieldConfig::default().with_count(5));
        let mut surface = RecordingSurface::new();
        field.tick(&mut surface);
        assert_eq!(
            surface.commands.first(),
            Some(&DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0,
                color: BACKGROUND,
                alpha: 0.1,
            })
        );
        assert_eq!(surface.commands.last(), Some(&DrawCommand::Reset));
        assert_eq!(surface.circles().count(), 5);
    }

    #[test]
    fn circles_are_modulated_by_pulse() {
        let mut field = single(100.0, 100.0, 0.0, 0.0);
        let mut surface = RecordingSurface::new();
        field.tick(&mut surface);
        let pulse = (0.01f64 * 10.0).sin() * 0.3 + 0.7;
        match surface.circles().next() {
            Some(DrawCommand::Circle { radius, alpha, blur, color, .. }) => {
                assert!((radius - 2.0 * pulse).abs() < 1e-12);
                assert!((alpha - pulse).abs() < 1e-12);
                assert!((blur - 20.0 * pulse).abs() < 1e-12);
                assert_eq!(*color, DEFAULT_PALETTE[0]);
            }
            other => panic!("expected a circle, got {:?}", other),
        };
    }

    #[test]
    fn each_close_pair_is_stroked_once() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let particles = vec![
            Particle::new(100.0, 100.0, 0.0, 0.0, 2.0, red),
            Particle::new(200.0, 100.0, 0.0, 0.0, 2.0, blue),
            Particle::new(700.0, 500.0, 0.0, 0.0, 2.0, blue),
        ];
        let mut field = ParticleField::from_particles(FieldConfig::default(), particles).unwrap();
        let mut surface = RecordingSurface::new();
        field.tick(&mut surface);

        let lines: Vec<&DrawCommand> = surface.lines().collect();
        assert_eq!(lines.len(), 1);
        let pulse0 = field.pulse_at(0);
        match lines[0] {
            DrawCommand::Line { from, to, color, alpha, width } => {
                assert_eq!(*from, [100.0, 100.0]);
                assert_eq!(*to, [200.0, 100.0]);
                assert_eq!(*color, red);
                assert_eq!(*width, 0.5);
                let expected = (1.0 - 100.0 / 150.0) * 0.2 * pulse0;
                assert!((alpha - expected).abs() < 1e-12);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn connections_cover_unordered_pairs() {
        let field = seeded(FieldConfig::default());
        let links = field.connections();
        for link in &links {
            assert!(link.from < link.to);
            assert!(link.distance < 150.0);
            assert!(link.alpha > 0.0 && link.alpha <= 0.2);
        }
        let pairs: HashSet<(usize, usize)> = links.iter().map(|l| (l.from, l.to)).collect();
        assert_eq!(pairs.len(), links.len());
    }

    #[test]
    fn glow_is_cleared_before_links() {
        let particles = vec![
            Particle::new(100.0, 100.0, 0.0, 0.0, 2.0, DEFAULT_PALETTE[0]),
            Particle::new(130.0, 100.0, 0.0, 0.0, 2.0, DEFAULT_PALETTE[1]),
        ];
        let mut field = ParticleField::from_particles(FieldConfig::default(), particles).unwrap();
        let mut surface = RecordingSurface::new();
        field.tick(&mut surface);
        let first_line = surface
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Line { .. }))
            .unwrap();
        assert_eq!(surface.commands[first_line - 1], DrawCommand::Reset);
        assert!(surface.commands[first_line..]
            .iter()
            .all(|c| !matches!(c, DrawCommand::Circle { .. })));
    }

    #[test]
    fn unbounded_velocity_is_an_error_not_a_panic() {
        let mut config = FieldConfig::default();
        config.max_velocity = f64::INFINITY;
        assert!(matches!(
            ParticleField::new(config),
            Err(FieldError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn resize_leaves_particles_alone() {
        let mut field = seeded(FieldConfig::default().with_count(20));
        let before = field.particles().to_vec();
        field.resize(320.0, 240.0).unwrap();
        assert_eq!(field.particles(), &before[..]);
        assert_eq!(field.bounds(), (320.0, 240.0));
        assert_eq!(field.len(), 20);
    }

    #[test]
    fn resize_rejects_bad_bounds() {
        let mut field = seeded(FieldConfig::default().with_count(2));
        assert!(field.resize(0.0, 240.0).is_err());
        assert_eq!(field.bounds(), (800.0, 600.0));
    }

    #[test]
    fn resized_bounds_drive_reflection() {
        let mut field = single(500.0, 100.0, 0.2, 0.0);
        field.resize(400.0, 600.0).unwrap();
        field.update();
        assert!(field.particles()[0].vel[0] < 0.0);
    }
}
