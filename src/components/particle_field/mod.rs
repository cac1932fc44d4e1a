//! Decorative particle field for the portfolio background.
//!
//! A fixed number of small discs drift across a full-viewport canvas,
//! bouncing off its edges, shying away from the pointer and joined by faint
//! lines when they come close to each other.
//!
//! - [`ParticleField`]: the simulation, independent of the DOM
//! - [`Surface`]: the drawing seam the simulation renders through
//! - [`ParticleFieldRenderer`]: binds a field to a canvas and browser events
//! - [`ParticleFieldCanvas`]: Leptos component that mounts a renderer
//!
//! # Example
//!
//! ```ignore
//! use portfolio_particles::ParticleFieldCanvas;
//!
//! view! {
//!     <ParticleFieldCanvas />
//!     <main class="content">"..."</main>
//! }
//! ```

mod component;
pub mod config;
mod particles;
mod render;
mod runtime;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use particles::{
	Particle, ParticleField, connection_opacity, particle_count, repulsion_strength,
};
pub use render::Surface;
pub use runtime::{
	DEFAULT_CANVAS_ID, ParticleFieldHandle, ParticleFieldRenderer, attach, attach_particle_field,
	viewport_size,
};
pub use theme::{Color, Palette};
