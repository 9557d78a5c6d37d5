use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::layout::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
	Alphabetic,
	Middle,
}

impl Baseline {
	fn as_str(self) -> &'static str {
		match self {
			Baseline::Alphabetic => "alphabetic",
			Baseline::Middle => "middle",
		}
	}
}

/// Raster target the graph is drawn onto. Coordinates passed between
/// `push_transform` and `pop_transform` are in the transformed space.
pub trait Surface {
	fn clear(&mut self, color: &str, width: f64, height: f64);
	/// Translate by `(dx, dy)` then scale by `k`.
	fn push_transform(&mut self, dx: f64, dy: f64, k: f64);
	fn pop_transform(&mut self);
	fn line(&mut self, from: Point, to: Point, color: &str, width: f64);
	fn circle(&mut self, center: Point, radius: f64, fill: &str, stroke: &str, stroke_width: f64);
	/// Horizontally centered text.
	fn text(&mut self, at: Point, text: &str, font: &str, color: &str, baseline: Baseline);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, color: &str, width: f64, height: f64) {
		self.set_fill_style_str(color);
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn push_transform(&mut self, dx: f64, dy: f64, k: f64) {
		self.save();
		let _ = self.translate(dx, dy);
		let _ = self.scale(k, k);
	}

	fn pop_transform(&mut self) {
		self.restore();
	}

	fn line(&mut self, from: Point, to: Point, color: &str, width: f64) {
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.stroke();
	}

	fn circle(&mut self, center: Point, radius: f64, fill: &str, stroke: &str, stroke_width: f64) {
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		self.set_fill_style_str(fill);
		self.fill();
		self.set_stroke_style_str(stroke);
		self.set_line_width(stroke_width);
		self.stroke();
	}

	fn text(&mut self, at: Point, text: &str, font: &str, color: &str, baseline: Baseline) {
		self.set_fill_style_str(color);
		self.set_font(font);
		self.set_text_align("center");
		self.set_text_baseline(baseline.as_str());
		let _ = self.fill_text(text, at.x, at.y);
	}
}
