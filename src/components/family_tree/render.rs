use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::state::{FamilyTreeState, NODE_HALF_HEIGHT, node_half_width};
use super::types::ViewMode;

const CORNER_RADIUS: f64 = 8.0;
/// Entrance stagger per node / link index, and the shared duration.
const NODE_STAGGER: f64 = 0.02;
const LINK_STAGGER: f64 = 0.015;
const ENTRANCE_DURATION: f64 = 0.8;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &FamilyTreeState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#f5f6f8");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

/// Control points of a link: a vertical cubic in tree mode, the same curve
/// in (angle, radius) space projected to Cartesian in radial mode.
fn link_curve(state: &FamilyTreeState, source: usize, target: usize) -> [(f64, f64); 4] {
	match state.mode {
		ViewMode::Tree => {
			let (sx, sy) = state.node_position(source);
			let (tx, ty) = state.node_position(target);
			let my = (sy + ty) / 2.0;
			[(sx, sy), (sx, my), (tx, my), (tx, ty)]
		}
		ViewMode::Radial => {
			let s = &state.hierarchy.nodes[source];
			let t = &state.hierarchy.nodes[target];
			let mr = (s.y + t.y) / 2.0;
			[
				super::layout::polar_to_cartesian(s.x, s.y),
				super::layout::polar_to_cartesian(s.x, mr),
				super::layout::polar_to_cartesian(t.x, mr),
				super::layout::polar_to_cartesian(t.x, t.y),
			]
		}
	}
}

fn cubic_point(p: &[(f64, f64); 4], t: f64) -> (f64, f64) {
	let u = 1.0 - t;
	let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
	(
		a * p[0].0 + b * p[1].0 + c * p[2].0 + d * p[3].0,
		a * p[0].1 + b * p[1].1 + c * p[2].1 + d * p[3].1,
	)
}

fn cubic_length(p: &[(f64, f64); 4]) -> f64 {
	let mut len = 0.0;
	let mut prev = p[0];
	for i in 1..=16 {
		let point = cubic_point(p, i as f64 / 16.0);
		len += ((point.0 - prev.0).powi(2) + (point.1 - prev.1).powi(2)).sqrt();
		prev = point;
	}
	len
}

fn draw_links(state: &FamilyTreeState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);

	for (i, (source, target)) in state.hierarchy.links().into_iter().enumerate() {
		let enter = ((state.entrance_t - i as f64 * LINK_STAGGER) / ENTRANCE_DURATION)
			.clamp(0.0, 1.0);
		if enter <= 0.0 {
			continue;
		}

		let curve = link_curve(state, source, target);
		let is_highlighted = state.is_highlighted(source) && state.is_highlighted(target);

		if is_highlighted && t > 0.0 {
			ctx.set_stroke_style_str(&format!("rgba(52, 152, 219, {})", 0.8 + 0.2 * t));
			ctx.set_line_width(1.5 + 1.0 * t);
		} else {
			ctx.set_stroke_style_str("rgba(184, 194, 204, 0.8)");
			ctx.set_line_width(1.5);
		}

		// Draw-in: dash the path over its sampled length until fully entered.
		if enter < 1.0 {
			let len = cubic_length(&curve);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(len),
				&JsValue::from_f64(len),
			));
			ctx.set_line_dash_offset(len * (1.0 - ease_out_cubic(enter)));
		}

		ctx.begin_path();
		ctx.move_to(curve[0].0, curve[0].1);
		ctx.bezier_curve_to(
			curve[1].0, curve[1].1, curve[2].0, curve[2].1, curve[3].0, curve[3].1,
		);
		ctx.stroke();

		if enter < 1.0 {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
			ctx.set_line_dash_offset(0.0);
		}
	}
}

fn depth_fill(ctx: &CanvasRenderingContext2d, x: f64, y: f64, hw: f64, depth: usize, emphasized: bool) -> CanvasGradient {
	let gradient = ctx.create_linear_gradient(x - hw, y - NODE_HALF_HEIGHT, x + hw, y + NODE_HALF_HEIGHT);
	let (from, to) = if emphasized {
		("#f39c12", "#e67e22")
	} else {
		match depth {
			0 => ("#16a085", "#1abc9c"),
			1 => ("#3498db", "#2980b9"),
			_ => ("#f8f9fa", "#e9ecef"),
		}
	};
	let _ = gradient.add_color_stop(0.0, from);
	let _ = gradient.add_color_stop(1.0, to);
	gradient
}

fn depth_stroke(depth: usize) -> &'static str {
	match depth {
		0 => "#16a085",
		1 => "#2980b9",
		_ => "#d1d5db",
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_nodes(state: &FamilyTreeState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);

	for (i, node) in state.hierarchy.nodes.iter().enumerate() {
		let enter = ((state.entrance_t - i as f64 * NODE_STAGGER) / ENTRANCE_DURATION)
			.clamp(0.0, 1.0);
		if enter <= 0.0 {
			continue;
		}

		let (x, y) = state.node_position(i);
		let hovered = state.is_hovered(i);
		let focused = state.focused == Some(i);

		// Hovered boxes grow slightly while the emphasis fades in.
		let grow = if hovered { 1.0 + 0.1 * t } else { 1.0 };
		let hw = node_half_width(node.depth) * grow;
		let hh = NODE_HALF_HEIGHT * grow;

		ctx.set_global_alpha(enter);
		let gradient = depth_fill(ctx, x, y, hw, node.depth, focused || (hovered && t > 0.5));
		rounded_rect(ctx, x - hw, y - hh, hw * 2.0, hh * 2.0, CORNER_RADIUS);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
		ctx.set_stroke_style_str(depth_stroke(node.depth));
		ctx.set_line_width(if hovered { 1.0 + 1.0 * t } else { 1.0 });
		ctx.stroke();

		let white = node.depth < 2 || focused;
		ctx.set_fill_style_str(if white { "#ffffff" } else { "#333333" });
		ctx.set_font(if node.depth == 0 {
			"bold 14px Arial, sans-serif"
		} else if node.depth == 1 {
			"bold 12px Arial, sans-serif"
		} else {
			"12px Arial, sans-serif"
		});
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&node.name, x, y + 4.0);
		ctx.set_global_alpha(1.0);
	}
}
