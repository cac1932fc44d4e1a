//! Particle simulation: creation, per-frame motion, pointer repulsion and
//! pairwise connections.
//!
//! Motion is per frame rather than per second. Boundaries are reflective but
//! lenient: a particle that steps outside `[0, width]` keeps its position for
//! that frame and only has the offending velocity component inverted.
//!
//! Connections are found with a nested loop over all later particles, which
//! is O(n^2) per frame. The density constant keeps `n` small relative to the
//! viewport area, and that is the only thing bounding the cost.

use rand::Rng;

use super::config::FieldConfig;
use super::render::Surface;
use super::theme::{Color, Palette};

/// A single particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub opacity: f64,
	pub color: Color,
}

impl Particle {
	/// Random particle inside a `width` x `height` surface.
	pub fn random<R: Rng + ?Sized>(
		rng: &mut R,
		width: f64,
		height: f64,
		config: &FieldConfig,
		palette: &Palette,
	) -> Self {
		Self {
			x: uniform(rng, 0.0, width),
			y: uniform(rng, 0.0, height),
			vx: uniform(rng, -config.max_speed, config.max_speed),
			vy: uniform(rng, -config.max_speed, config.max_speed),
			radius: uniform(rng, config.radius_min, config.radius_max),
			opacity: uniform(rng, config.opacity_min, config.opacity_max),
			color: palette.pick(rng),
		}
	}

	/// Move by one frame of velocity, then invert any velocity component whose
	/// coordinate left `[0, bound]`.
	pub fn step(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 || self.x > width {
			self.vx = -self.vx;
		}
		if self.y < 0.0 || self.y > height {
			self.vy = -self.vy;
		}
	}

	/// Push the particle away from `pointer`. Returns true if it moved.
	pub fn repel(&mut self, pointer: (f64, f64), radius: f64, strength: f64) -> bool {
		let (dx, dy) = (pointer.0 - self.x, pointer.1 - self.y);
		let force = repulsion_strength((dx * dx + dy * dy).sqrt(), radius);
		if force <= 0.0 {
			return false;
		}
		self.x -= dx * force * strength;
		self.y -= dy * force * strength;
		true
	}

	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Upper bound on the population of a single field.
pub const MAX_PARTICLES: usize = 10_000;

/// Number of particles for a surface: one per `density_area` units of area,
/// capped at [`MAX_PARTICLES`].
pub fn particle_count(width: f64, height: f64, density_area: f64) -> usize {
	if !(width > 0.0 && height > 0.0 && density_area > 0.0) {
		return 0;
	}
	let count = (width * height / density_area).floor();
	if count.is_finite() && count < MAX_PARTICLES as f64 {
		count as usize
	} else {
		MAX_PARTICLES
	}
}

/// Repulsion factor for a pointer `distance` away: `(radius - d) / radius`
/// inside the radius, zero at or beyond it.
pub fn repulsion_strength(distance: f64, radius: f64) -> f64 {
	if radius > 0.0 && distance < radius {
		(radius - distance) / radius
	} else {
		0.0
	}
}

/// Line alpha for two particles `distance` apart, or `None` if they are too
/// far to be connected.
pub fn connection_opacity(distance: f64, threshold: f64, max_opacity: f64) -> Option<f64> {
	if distance < threshold {
		Some((threshold - distance) / threshold * max_opacity)
	} else {
		None
	}
}

/// A fixed-size set of particles bouncing inside a surface.
pub struct ParticleField {
	particles: Vec<Particle>,
	width: f64,
	height: f64,
	pointer: (f64, f64),
	config: FieldConfig,
}

impl ParticleField {
	pub fn new(width: f64, height: f64, config: FieldConfig) -> Self {
		Self::with_rng(width, height, config, &mut rand::thread_rng())
	}

	/// Like [`ParticleField::new`], drawing from the given generator.
	pub fn with_rng<R: Rng + ?Sized>(
		width: f64,
		height: f64,
		config: FieldConfig,
		rng: &mut R,
	) -> Self {
		let palette = config.palette();
		let count = particle_count(width, height, config.density_area);
		let particles = (0..count)
			.map(|_| Particle::random(rng, width, height, &config, &palette))
			.collect();
		Self::from_particles(width, height, config, particles)
	}

	/// Field with an explicit particle set.
	pub fn from_particles(
		width: f64,
		height: f64,
		config: FieldConfig,
		particles: Vec<Particle>,
	) -> Self {
		Self {
			particles,
			width,
			height,
			pointer: (0.0, 0.0),
			config,
		}
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

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	pub fn pointer(&self) -> (f64, f64) {
		self.pointer
	}

	/// Update the bounce boundaries. Particles are neither recreated nor
	/// rescaled, so a shrink can leave some outside the new bounds.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Record the latest pointer position, consumed by the next frame.
	/// Non-finite coordinates are ignored.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		if x.is_finite() && y.is_finite() {
			self.pointer = (x, y);
		}
	}

	/// Advance every particle by one frame and draw the result.
	///
	/// Particles are processed in index order. Each one is moved, bounced,
	/// repelled and drawn, then joined to every *later* particle within the
	/// connection distance. Later particles have not moved yet this frame
	/// when their connections to earlier ones are drawn.
	pub fn advance_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
		let (width, height) = (self.width, self.height);
		let pointer = self.pointer;
		let cfg = &self.config;

		surface.clear(width, height);

		for i in 0..self.particles.len() {
			let (head, tail) = self.particles.split_at_mut(i + 1);
			let p = &mut head[i];

			p.step(width, height);
			p.repel(pointer, cfg.repulsion_radius, cfg.repulsion_strength);

			surface.fill_disc(p.x, p.y, p.radius, p.color, p.opacity);

			for other in tail.iter() {
				let distance = p.distance_to(other);
				if let Some(alpha) =
					connection_opacity(distance, cfg.connection_distance, cfg.connection_opacity)
				{
					surface.stroke_line((p.x, p.y), (other.x, other.y), p.color, alpha);
				}
			}
		}
	}
}
