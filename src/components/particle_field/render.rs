//! Drawing seam between the simulation and the canvas.
//!
//! The field only ever issues three kinds of draw calls, captured by
//! [`Surface`]. The browser implementation forwards them to a
//! `CanvasRenderingContext2d`; tests substitute a recorder.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// A 2D target the particle field draws onto.
pub trait Surface {
	/// Erase the rectangle `[0, width] x [0, height]`.
	fn clear(&mut self, width: f64, height: f64);

	/// Fill a disc centered on `(x, y)`. `alpha` is combined with the color's own.
	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64);

	/// Stroke a straight line between two points.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, alpha: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css_rgb());
		self.set_global_alpha(color.blend_alpha(alpha));
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, alpha: f64) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(&color.to_css_rgb());
		self.set_global_alpha(color.blend_alpha(alpha));
		self.stroke();
	}
}
