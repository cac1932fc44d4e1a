//! Errors raised while binding the particle field to the page.
//!
//! None of these reach the user. Mount points log them and leave the page
//! without a particle background.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Reasons a particle field could not be attached.
#[derive(Debug, Error)]
pub enum FieldError {
	/// No global `window` (not running in a browser main thread).
	#[error("no window available")]
	NoWindow,

	/// The window has no document.
	#[error("no document available")]
	NoDocument,

	/// No element with the requested id.
	#[error("no element with id {0:?}")]
	MissingElement(String),

	/// The element exists but is not a `<canvas>`.
	#[error("element {0:?} is not a canvas")]
	NotACanvas(String),

	/// `getContext("2d")` returned nothing.
	#[error("2d context unavailable")]
	NoContext,

	/// A DOM call threw.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for FieldError {
	fn from(value: JsValue) -> Self {
		FieldError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_element() {
		let msg = FieldError::MissingElement("particle-canvas".into()).to_string();
		assert!(msg.contains("particle-canvas"));
		let msg = FieldError::NotACanvas("hero".into()).to_string();
		assert!(msg.contains("hero") && msg.contains("canvas"));
	}
}
