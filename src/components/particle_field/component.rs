//! Leptos component wrapping the particle field canvas.
//!
//! The component renders a fixed, full-viewport canvas behind the page
//! content. Once the canvas is mounted it builds a [`ParticleFieldRenderer`]
//! with the document as pointer source and the window as resize source. The
//! renderer lives in a local `StoredValue`, so it is dropped (stopping the
//! loop and removing its listeners) when the component's owner is disposed.

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlCanvasElement;

use super::config::FieldConfig;
use super::runtime::{DEFAULT_CANVAS_ID, ParticleFieldRenderer};
use crate::error::{FieldError, Result};

fn mount(canvas: HtmlCanvasElement, config: Option<FieldConfig>) -> Result<ParticleFieldRenderer> {
	let window = web_sys::window().ok_or(FieldError::NoWindow)?;
	let document = window.document().ok_or(FieldError::NoDocument)?;
	let config = config.unwrap_or_else(|| FieldConfig::load(&window));
	let mut renderer = ParticleFieldRenderer::new(canvas, document.into(), window, config)?;
	renderer.start()?;
	Ok(renderer)
}

/// Renders the decorative particle background.
///
/// Without an explicit `config` the component reads overrides from the
/// page's `#particle-config` script element.
#[component]
pub fn ParticleFieldCanvas(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let renderer = StoredValue::new_local(None::<ParticleFieldRenderer>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if renderer.with_value(|r| r.is_some()) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();

		match mount(canvas, config.clone()) {
			Ok(r) => renderer.set_value(Some(r)),
			Err(e) => warn!("particle-field: not starting: {}", e),
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id=DEFAULT_CANVAS_ID
			class="particle-canvas"
			style="position: fixed; top: 0; left: 0; pointer-events: none; z-index: 0;"
		/>
	}
}
