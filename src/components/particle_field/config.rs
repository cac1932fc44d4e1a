//! Tunable constants for the particle field.
//!
//! Every value has a default matching the portfolio site's look. A page can
//! override any subset by embedding a JSON document in a
//! `<script id="particle-config" type="application/json">` element.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use super::theme::Palette;

/// Id of the optional script element holding a JSON [`FieldConfig`].
pub const CONFIG_ELEMENT_ID: &str = "particle-config";

/// Smallest accepted `density_area`. Anything denser would ask for more
/// particles than a frame can connect.
pub const MIN_DENSITY_AREA: f64 = 1_000.0;

/// Particle field parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Surface area per particle (count = floor(width * height / density_area)).
	/// Values below [`MIN_DENSITY_AREA`] fall back to the default.
	pub density_area: f64,
	/// Upper bound of each velocity component's magnitude, per frame.
	pub max_speed: f64,
	pub radius_min: f64,
	pub radius_max: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Pointer distance below which particles are pushed away.
	pub repulsion_radius: f64,
	/// Displacement scale applied inside the repulsion radius.
	pub repulsion_strength: f64,
	/// Distance below which two particles are joined by a line.
	pub connection_distance: f64,
	/// Line alpha for two coincident particles; falls off linearly to zero.
	pub connection_opacity: f64,
	/// CSS colors particles are drawn from.
	pub palette: Vec<String>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			density_area: 15_000.0,
			max_speed: 0.25,
			radius_min: 1.0,
			radius_max: 3.0,
			opacity_min: 0.2,
			opacity_max: 0.7,
			repulsion_radius: 50.0,
			repulsion_strength: 0.002,
			connection_distance: 100.0,
			connection_opacity: 0.2,
			palette: Palette::portfolio()
				.colors
				.iter()
				.map(|c| c.to_css_rgb())
				.collect(),
		}
	}
}

fn non_negative_or(value: f64, fallback: f64) -> f64 {
	if value.is_finite() && value >= 0.0 {
		value
	} else {
		fallback
	}
}

impl FieldConfig {
	/// Parses a JSON document; missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<FieldConfig>(json).map(FieldConfig::validated)
	}

	/// Replaces unusable values with defaults.
	///
	/// Ranges whose bounds are inverted fall back as a pair, and opacities are
	/// clamped to [0, 1].
	pub fn validated(self) -> Self {
		let d = Self::default();

		let (radius_min, radius_max) = {
			let (lo, hi) = (
				non_negative_or(self.radius_min, -1.0),
				non_negative_or(self.radius_max, -1.0),
			);
			if lo < 0.0 || hi < 0.0 || lo > hi {
				(d.radius_min, d.radius_max)
			} else {
				(lo, hi)
			}
		};

		let (opacity_min, opacity_max) = {
			let (lo, hi) = (
				non_negative_or(self.opacity_min, -1.0).min(1.0),
				non_negative_or(self.opacity_max, -1.0).min(1.0),
			);
			if lo < 0.0 || hi < 0.0 || lo > hi {
				(d.opacity_min, d.opacity_max)
			} else {
				(lo, hi)
			}
		};

		let density_area = if self.density_area.is_finite() && self.density_area >= MIN_DENSITY_AREA
		{
			self.density_area
		} else {
			d.density_area
		};

		let palette = if Palette::from_css(&self.palette).is_some() {
			self.palette
		} else {
			d.palette
		};

		Self {
			density_area,
			max_speed: non_negative_or(self.max_speed, d.max_speed),
			radius_min,
			radius_max,
			opacity_min,
			opacity_max,
			repulsion_radius: non_negative_or(self.repulsion_radius, d.repulsion_radius),
			repulsion_strength: non_negative_or(self.repulsion_strength, d.repulsion_strength),
			connection_distance: non_negative_or(self.connection_distance, d.connection_distance),
			connection_opacity: non_negative_or(self.connection_opacity, d.connection_opacity)
				.min(1.0),
			palette,
		}
	}

	/// The parsed palette. Falls back to the portfolio palette if no entry parses.
	pub fn palette(&self) -> Palette {
		Palette::from_css(&self.palette).unwrap_or_default()
	}

	/// Load configuration from a script element with id="particle-config".
	/// Absent element means defaults; a malformed document is logged and ignored.
	pub fn load(window: &Window) -> Self {
		let Some(json_text) = window
			.document()
			.and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
			.and_then(|script| script.text().ok())
		else {
			return Self::default();
		};

		match Self::from_json(&json_text) {
			Ok(config) => {
				info!("particle-field: loaded config from #{}", CONFIG_ELEMENT_ID);
				config
			}
			Err(e) => {
				warn!("particle-field: failed to parse config: {}", e);
				Self::default()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_site_constants() {
		let c = FieldConfig::default();
		assert_eq!(c.density_area, 15_000.0);
		assert_eq!(c.max_speed, 0.25);
		assert_eq!((c.radius_min, c.radius_max), (1.0, 3.0));
		assert_eq!((c.opacity_min, c.opacity_max), (0.2, 0.7));
		assert_eq!(c.repulsion_radius, 50.0);
		assert_eq!(c.repulsion_strength, 0.002);
		assert_eq!(c.connection_distance, 100.0);
		assert_eq!(c.connection_opacity, 0.2);
		assert_eq!(c.palette().colors.len(), 4);
	}

	#[test]
	fn partial_json_keeps_other_defaults() {
		let c = FieldConfig::from_json(r##"{ "density_area": 30000, "palette": ["#ff0000"] }"##)
			.unwrap();
		assert_eq!(c.density_area, 30_000.0);
		assert_eq!(c.connection_distance, 100.0);
		assert_eq!(c.palette().colors.len(), 1);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(FieldConfig::from_json("{ density_area: ").is_err());
		assert!(FieldConfig::from_json(r#"{ "max_speed": "fast" }"#).is_err());
	}

	#[test]
	fn tiny_density_area_falls_back() {
		let c = FieldConfig::from_json(r#"{ "density_area": 1e-12 }"#).unwrap();
		assert_eq!(c.density_area, 15_000.0);
		let c = FieldConfig::from_json(r#"{ "density_area": 999.0 }"#).unwrap();
		assert_eq!(c.density_area, 15_000.0);
		let c = FieldConfig::from_json(r#"{ "density_area": 1000.0 }"#).unwrap();
		assert_eq!(c.density_area, MIN_DENSITY_AREA);
	}

	#[test]
	fn validation_repairs_bad_values() {
		let c = FieldConfig {
			density_area: 0.0,
			max_speed: f64::NAN,
			radius_min: 4.0,
			radius_max: 2.0,
			opacity_min: 0.1,
			opacity_max: 3.0,
			connection_opacity: -1.0,
			palette: vec!["not a color".into()],
			..FieldConfig::default()
		}
		.validated();
		let d = FieldConfig::default();
		assert_eq!(c.density_area, d.density_area);
		assert_eq!(c.max_speed, d.max_speed);
		assert_eq!((c.radius_min, c.radius_max), (d.radius_min, d.radius_max));
		assert_eq!((c.opacity_min, c.opacity_max), (0.1, 1.0));
		assert_eq!(c.connection_opacity, d.connection_opacity);
		assert_eq!(c.palette, d.palette);
	}
}
