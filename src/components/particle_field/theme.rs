//! Colors and the particle palette.

use rand::Rng;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Canvas alpha for drawing this color at `alpha`: the color's own alpha
	/// scales the requested one.
	pub fn blend_alpha(self, alpha: f64) -> f64 {
		(alpha * self.a).clamp(0.0, 1.0)
	}

	/// Parses `#RRGGBB`, `#RGB`, or `rgb()`/`rgba()` notation.
	/// Returns `None` for anything else.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			return match hex.len() {
				6 => Some(Color::rgb(
					u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
					u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
					u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
				)),
				3 => {
					let digit = |i: usize| -> Option<u8> {
						let v = u8::from_str_radix(hex.get(i..i + 1)?, 16).ok()?;
						Some(v * 17)
					};
					Some(Color::rgb(digit(0)?, digit(1)?, digit(2)?))
				}
				_ => None,
			};
		}

		if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			if nums.len() < 3 {
				return None;
			}
			let r = nums[0].trim().parse().ok()?;
			let g = nums[1].trim().parse().ok()?;
			let b = nums[2].trim().parse().ok()?;
			let a = match nums.get(3) {
				Some(a) => a.trim().parse().ok()?,
				None => 1.0,
			};
			return Some(Color::rgba(r, g, b, a));
		}

		None
	}

	/// Opaque `#rrggbb` form. Alpha is applied separately, see [`Color::blend_alpha`].
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// The set of colors particles are drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub colors: Vec<Color>,
}

impl Palette {
	/// Indigo, violet, cyan and emerald accents of the portfolio site.
	pub fn portfolio() -> Self {
		Self {
			colors: vec![
				Color::rgb(0x63, 0x66, 0xf1), // Indigo
				Color::rgb(0x8b, 0x5c, 0xf6), // Violet
				Color::rgb(0x06, 0xb6, 0xd4), // Cyan
				Color::rgb(0x10, 0xb9, 0x81), // Emerald
			],
		}
	}

	/// Builds a palette from CSS color strings, skipping entries that fail to parse.
	/// Returns `None` if nothing usable remains.
	pub fn from_css<S: AsRef<str>>(entries: &[S]) -> Option<Self> {
		let colors: Vec<Color> = entries
			.iter()
			.filter_map(|s| Color::parse(s.as_ref()))
			.collect();
		if colors.is_empty() {
			None
		} else {
			Some(Self { colors })
		}
	}

	/// Uniform pick.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
		self.colors[rng.gen_range(0..self.colors.len())]
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::portfolio()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn parses_hex_and_functional_notation() {
		assert_eq!(Color::parse("#6366f1"), Some(Color::rgb(99, 102, 241)));
		assert_eq!(Color::parse("#fff"), Some(Color::rgb(255, 255, 255)));
		assert_eq!(
			Color::parse("rgba(16, 185, 129, 0.5)"),
			Some(Color::rgba(16, 185, 129, 0.5))
		);
		assert_eq!(Color::parse("rgb(1,2,3)"), Some(Color::rgb(1, 2, 3)));
	}

	#[test]
	fn rejects_garbage() {
		assert_eq!(Color::parse("#12345"), None);
		assert_eq!(Color::parse("#zzzzzz"), None);
		assert_eq!(Color::parse("rgb(1, 2)"), None);
		assert_eq!(Color::parse("teal"), None);
	}

	#[test]
	fn css_output_is_opaque_hex() {
		assert_eq!(Color::rgb(6, 182, 212).to_css_rgb(), "#06b6d4");
		assert_eq!(Color::rgba(6, 182, 212, 0.25).to_css_rgb(), "#06b6d4");
	}

	#[test]
	fn color_alpha_scales_draw_alpha() {
		assert_eq!(Color::rgb(1, 2, 3).blend_alpha(0.4), 0.4);
		let translucent = Color::parse("rgba(16,185,129,0.1)").unwrap();
		assert!((translucent.blend_alpha(0.5) - 0.05).abs() < 1e-12);
		assert_eq!(Color::rgba(1, 2, 3, 2.0).blend_alpha(0.8), 1.0);
		assert_eq!(Color::rgba(1, 2, 3, -1.0).blend_alpha(0.8), 0.0);
	}

	#[test]
	fn portfolio_palette_has_four_site_colors() {
		let palette = Palette::portfolio();
		let css: Vec<String> = palette.colors.iter().map(|c| c.to_css_rgb()).collect();
		assert_eq!(css, ["#6366f1", "#8b5cf6", "#06b6d4", "#10b981"]);
	}

	#[test]
	fn from_css_skips_invalid_entries() {
		let palette = Palette::from_css(&["nope", "#10b981"]).unwrap();
		assert_eq!(palette.colors.len(), 1);
		assert!(Palette::from_css(&["nope"]).is_none());
		assert!(Palette::from_css::<&str>(&[]).is_none());
	}

	#[test]
	fn pick_covers_every_entry() {
		let palette = Palette::portfolio();
		let mut rng = StdRng::seed_from_u64(7);
		let mut seen = [false; 4];
		for _ in 0..200 {
			let c = palette.pick(&mut rng);
			let idx = palette.colors.iter().position(|p| *p == c).unwrap();
			seen[idx] = true;
		}
		assert!(seen.iter().all(|s| *s));
	}
}
