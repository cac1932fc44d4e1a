//! Browser binding for [`ParticleField`].
//!
//! [`ParticleFieldRenderer`] receives its canvas, pointer source and resize
//! source from the caller and owns everything it registers with them. While
//! running it holds two event listeners and one pending animation frame;
//! [`ParticleFieldRenderer::stop`] (or dropping the renderer) releases all
//! three. Event callbacks and the frame callback share the field through
//! `Rc<RefCell<_>>`. The browser delivers them on one thread and never nests
//! them, so the pointer seen by a frame is simply the last one written.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent,
	Window,
};

use super::config::FieldConfig;
use super::particles::ParticleField;
use crate::error::{FieldError, Result};

/// Id of the canvas the portfolio page draws particles onto.
pub const DEFAULT_CANVAS_ID: &str = "particle-canvas";

/// Inner size of a window, or zero for any dimension the browser won't report.
pub fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: std::result::Result<JsValue, JsValue>| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	(dim(window.inner_width()), dim(window.inner_height()))
}

/// Client coordinates of a mouse event, or of the first touch of a touch event.
fn client_position(ev: &Event) -> Option<(f64, f64)> {
	if let Some(mouse) = ev.dyn_ref::<MouseEvent>() {
		return Some((mouse.client_x() as f64, mouse.client_y() as f64));
	}
	let touch = ev.dyn_ref::<TouchEvent>()?.touches().get(0)?;
	Some((touch.client_x() as f64, touch.client_y() as f64))
}

/// Field plus the canvas it draws onto.
struct Scene {
	field: ParticleField,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl Scene {
	/// Match the canvas backing store and bounce bounds to the viewport.
	fn fit_to(&mut self, window: &Window) {
		let (w, h) = viewport_size(window);
		self.canvas.set_width(w as u32);
		self.canvas.set_height(h as u32);
		self.field.resize(w, h);
	}

	/// Convert client coordinates to canvas-local and hand them to the field.
	fn point_at(&mut self, client_x: f64, client_y: f64) {
		let rect = self.canvas.get_bounding_client_rect();
		self.field
			.set_pointer(client_x - rect.left(), client_y - rect.top());
	}
}

/// An event listener that removes itself when dropped.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	fn add(
		target: &EventTarget,
		event: &'static str,
		callback: Closure<dyn FnMut(Event)>,
	) -> Result<Self> {
		target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// A self-rescheduling `requestAnimationFrame` loop. Dropping it cancels the
/// pending frame and frees the callback.
struct FrameLoop {
	window: Window,
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	fn start(window: &Window, scene: Rc<RefCell<Scene>>) -> Result<Self> {
		let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let (callback_inner, pending_inner, window_inner) =
			(callback.clone(), pending.clone(), window.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_inner.set(None);
			{
				let mut scene = scene.borrow_mut();
				let Scene { field, ctx, .. } = &mut *scene;
				field.advance_frame(ctx);
			}
			if let Some(ref cb) = *callback_inner.borrow() {
				match window_inner.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => pending_inner.set(Some(id)),
					Err(e) => warn!("particle-field: failed to schedule frame: {:?}", e),
				}
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
			pending.set(Some(id));
		}

		Ok(Self {
			window: window.clone(),
			callback,
			pending,
		})
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let Some(id) = self.pending.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// The closure holds a handle to its own cell; clearing it breaks the cycle.
		self.callback.borrow_mut().take();
	}
}

/// Registrations held while the renderer runs.
struct Running {
	_listeners: Vec<Listener>,
	_frames: FrameLoop,
}

/// A particle field bound to a canvas, a pointer source and a resize source.
pub struct ParticleFieldRenderer {
	scene: Rc<RefCell<Scene>>,
	window: Window,
	pointer_source: EventTarget,
	running: Option<Running>,
}

impl ParticleFieldRenderer {
	/// Size `canvas` to the viewport of `resize_source` and populate a field
	/// for that area. Nothing is registered until [`start`](Self::start).
	pub fn new(
		canvas: HtmlCanvasElement,
		pointer_source: EventTarget,
		resize_source: Window,
		config: FieldConfig,
	) -> Result<Self> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(FieldError::NoContext)?
			.dyn_into()
			.map_err(|_| FieldError::NoContext)?;

		let (w, h) = viewport_size(&resize_source);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let field = ParticleField::new(w, h, config);
		info!(
			"particle-field: created {} particles for {}x{}",
			field.len(),
			w,
			h
		);

		Ok(Self {
			scene: Rc::new(RefCell::new(Scene { field, canvas, ctx })),
			window: resize_source,
			pointer_source,
			running: None,
		})
	}

	/// Register for resize and pointer events and begin the frame loop.
	/// Does nothing if already running.
	pub fn start(&mut self) -> Result<()> {
		if self.running.is_some() {
			return Ok(());
		}

		let (scene_resize, window_resize) = (self.scene.clone(), self.window.clone());
		let on_resize = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
			let mut scene = scene_resize.borrow_mut();
			scene.fit_to(&window_resize);
			let (w, h) = scene.field.size();
			debug!("particle-field: resized to {}x{}", w, h);
		});

		let scene_pointer = self.scene.clone();
		let on_pointer = move |ev: Event| {
			if let Some((x, y)) = client_position(&ev) {
				scene_pointer.borrow_mut().point_at(x, y);
			}
		};
		let on_touch = on_pointer.clone();

		let window_target: &EventTarget = self.window.as_ref();
		let listeners = vec![
			Listener::add(window_target, "resize", on_resize)?,
			Listener::add(
				&self.pointer_source,
				"mousemove",
				Closure::<dyn FnMut(Event)>::new(on_pointer),
			)?,
			Listener::add(
				&self.pointer_source,
				"touchmove",
				Closure::<dyn FnMut(Event)>::new(on_touch),
			)?,
		];

		let frames = FrameLoop::start(&self.window, self.scene.clone())?;
		self.running = Some(Running {
			_listeners: listeners,
			_frames: frames,
		});
		debug!("particle-field: started");
		Ok(())
	}

	/// Deregister all listeners and halt the frame loop. Idempotent.
	pub fn stop(&mut self) {
		if self.running.take().is_some() {
			debug!("particle-field: stopped");
		}
	}

	pub fn is_running(&self) -> bool {
		self.running.is_some()
	}

	pub fn particle_count(&self) -> usize {
		self.scene.borrow().field.len()
	}

	/// Current bounce bounds.
	pub fn size(&self) -> (f64, f64) {
		self.scene.borrow().field.size()
	}

	/// Last recorded pointer position, canvas-local.
	pub fn pointer(&self) -> (f64, f64) {
		self.scene.borrow().field.pointer()
	}
}

impl Drop for ParticleFieldRenderer {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Find `canvas_id` in the current document and start a field on it, using
/// the document as pointer source and the window as resize source.
pub fn attach(canvas_id: &str) -> Result<ParticleFieldRenderer> {
	let window = web_sys::window().ok_or(FieldError::NoWindow)?;
	let document = window.document().ok_or(FieldError::NoDocument)?;
	let canvas: HtmlCanvasElement = document
		.get_element_by_id(canvas_id)
		.ok_or_else(|| FieldError::MissingElement(canvas_id.to_string()))?
		.dyn_into()
		.map_err(|_| FieldError::NotACanvas(canvas_id.to_string()))?;

	let config = FieldConfig::load(&window);
	let mut renderer = ParticleFieldRenderer::new(canvas, document.into(), window, config)?;
	renderer.start()?;
	Ok(renderer)
}

/// JS-owned handle to a running field, returned by [`attach_particle_field`].
#[wasm_bindgen]
pub struct ParticleFieldHandle {
	renderer: ParticleFieldRenderer,
}

#[wasm_bindgen]
impl ParticleFieldHandle {
	/// Resume a stopped field.
	pub fn start(&mut self) {
		if let Err(e) = self.renderer.start() {
			warn!("particle-field: failed to start: {}", e);
		}
	}

	/// Release listeners and halt the frame loop.
	pub fn stop(&mut self) {
		self.renderer.stop();
	}

	#[wasm_bindgen(js_name = isRunning)]
	pub fn is_running(&self) -> bool {
		self.renderer.is_running()
	}

	#[wasm_bindgen(js_name = particleCount)]
	pub fn particle_count(&self) -> usize {
		self.renderer.particle_count()
	}
}

/// Attach a particle field to an existing canvas on a plain HTML page.
///
/// Returns `undefined` when the canvas is missing or unusable; the page
/// simply gets no particle background.
#[wasm_bindgen(js_name = attachParticleField)]
pub fn attach_particle_field(canvas_id: Option<String>) -> Option<ParticleFieldHandle> {
	let id = canvas_id.unwrap_or_else(|| DEFAULT_CANVAS_ID.to_string());
	match attach(&id) {
		Ok(renderer) => Some(ParticleFieldHandle { renderer }),
		Err(e) => {
			warn!("particle-field: skipping #{}: {}", id, e);
			None
		}
	}
}
