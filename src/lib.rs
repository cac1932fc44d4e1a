//! portfolio-particles: decorative particle background for a portfolio site.
//!
//! This crate provides a WASM particle field that drifts behind the page
//! content, reacts to the pointer, and links nearby particles with faint
//! lines. It can be mounted as a Leptos component or attached from plain
//! JavaScript to an existing `<canvas id="particle-canvas">`.

// Enables the `js` backend of `rand`'s entropy source on wasm32.
use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod error;

pub use components::particle_field::{
	FieldConfig, ParticleFieldCanvas, ParticleFieldHandle, ParticleFieldRenderer,
	attach_particle_field,
};
pub use error::FieldError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Main application component.
/// Renders the particle background beneath the page's hero section.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas />
		<main class="hero">
			<h1>"Hi, I build things for the web."</h1>
			<p class="subtitle">"Move the pointer around to nudge the particles."</p>
		</main>
	}
}
