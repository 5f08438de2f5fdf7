use std::collections::HashSet;

use super::hierarchy::Hierarchy;
use super::layout::{self, LayoutConfig, nodes_per_row, polar_to_cartesian};
use super::overlap;
use super::types::{FamilyMember, SelectedNodeInfo, ViewMode};

pub const NODE_HALF_HEIGHT: f64 = 15.0;

/// Node boxes are 120 wide, 90 at depth 2.
pub fn node_half_width(depth: usize) -> f64 {
	if depth == 2 { 45.0 } else { 60.0 }
}

pub const MIN_ZOOM: f64 = 0.3;
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom applied when focusing a clicked node; narrow viewports zoom less.
pub const FOCUS_ZOOM: f64 = 1.5;
pub const FOCUS_ZOOM_NARROW: f64 = 1.2;
pub const NARROW_WIDTH: f64 = 768.0;
/// Duration of the focus and reset transitions, in seconds.
pub const FOCUS_DURATION: f64 = 0.75;
/// Fallback viewport when window dimensions cannot be read.
pub const DEFAULT_WIDTH: f64 = 1200.0;
pub const DEFAULT_HEIGHT: f64 = 800.0;
/// A resize below this on both axes keeps the current layout, unless it
/// crosses a row-capacity breakpoint.
pub const RESIZE_THRESHOLD: f64 = 100.0;
/// A press that travels further than this is a pan, not a click.
const CLICK_SLOP: f64 = 3.0;

/// Initial view per viewport tier: (max width, scale, x offset, y offset).
/// Offsets are absolute translates in tree mode; radial mode centers on the
/// viewport at the tier's scale.
const VIEW_TIERS: &[(f64, f64, f64, f64)] = &[
	(480.0, 0.45, 20.0, 30.0),
	(768.0, 0.6, 35.0, 40.0),
	(1200.0, 0.8, 50.0, 50.0),
	(f64::INFINITY, 1.0, 50.0, 50.0),
];

fn view_tier(width: f64) -> (f64, f64, f64) {
	for &(max_w, k, ox, oy) in VIEW_TIERS {
		if width < max_w {
			return (k, ox, oy);
		}
	}
	let (_, k, ox, oy) = VIEW_TIERS[VIEW_TIERS.len() - 1];
	(k, ox, oy)
}

/// Pan/zoom state applied to the scene: screen = world · k + translate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Tracks the node under the pointer at press time so release can tell a
/// click apart from a drag.
#[derive(Clone, Debug, Default)]
pub struct PressState {
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub incident: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_incident: HashSet<usize>,
	delay_t: f64,
}

#[derive(Clone, Copy, Debug)]
struct TransformTransition {
	from: ViewTransform,
	to: ViewTransform,
	t: f64,
	duration: f64,
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

pub struct FamilyTreeState {
	pub hierarchy: Hierarchy,
	pub mode: ViewMode,
	pub config: LayoutConfig,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub press: PressState,
	pub hover: HoverState,
	pub focused: Option<usize>,
	pub width: f64,
	pub height: f64,
	/// Seconds since the current layout was built; drives the entrance
	/// animation.
	pub entrance_t: f64,
	/// Viewport the current layout was computed for. Only a qualifying
	/// resize moves these.
	layout_width: f64,
	layout_height: f64,
	transition: Option<TransformTransition>,
	data: FamilyMember,
}

impl FamilyTreeState {
	pub fn new(data: &FamilyMember, mode: ViewMode, width: f64, height: f64) -> Self {
		let mut state = Self {
			hierarchy: Hierarchy::default(),
			mode,
			config: LayoutConfig::default(),
			transform: ViewTransform { x: 0.0, y: 0.0, k: 1.0 },
			pan: PanState::default(),
			press: PressState::default(),
			hover: HoverState::default(),
			focused: None,
			width,
			height,
			entrance_t: 0.0,
			layout_width: width,
			layout_height: height,
			transition: None,
			data: data.clone(),
		};
		state.rebuild();
		state.transform = state.initial_transform();
		state
	}

	/// Discard and rebuild the node arena under the current mode and layout
	/// viewport.
	fn rebuild(&mut self) {
		let mut h = Hierarchy::build(&self.data);
		layout::assign(&mut h, self.mode, self.layout_width, self.layout_height, &self.config);
		if self.mode == ViewMode::Tree {
			overlap::resolve(&mut h.nodes, &self.config);
		}
		self.hierarchy = h;
		self.entrance_t = 0.0;
	}

	/// World-space position of a node; radial coordinates are projected.
	pub fn node_position(&self, idx: usize) -> (f64, f64) {
		let n = &self.hierarchy.nodes[idx];
		match self.mode {
			ViewMode::Tree => (n.x, n.y),
			ViewMode::Radial => polar_to_cartesian(n.x, n.y),
		}
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node whose box contains the given screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (wx, wy) = self.screen_to_world(sx, sy);
		let mut found = None;
		for (i, node) in self.hierarchy.nodes.iter().enumerate() {
			let (x, y) = self.node_position(i);
			if (wx - x).abs() <= node_half_width(node.depth) && (wy - y).abs() <= NODE_HALF_HEIGHT {
				found = Some(i);
			}
		}
		found
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_incident = std::mem::take(&mut self.hover.incident);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_incident.clear();
		}

		self.hover.node = node;
		self.hover.incident.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			let n = &self.hierarchy.nodes[idx];
			if let Some(p) = n.parent {
				self.hover.incident.insert(p);
			}
			self.hover.incident.extend(n.children.iter().copied());
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.incident.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_incident.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Side-panel projection of the hovered node.
	pub fn selected_info(&self) -> Option<SelectedNodeInfo> {
		self.hover.node.map(|idx| {
			let n = &self.hierarchy.nodes[idx];
			SelectedNodeInfo {
				name: n.name.clone(),
				depth: n.depth,
				child_count: n.children.len(),
				level_label: match n.depth {
					0 => "Root",
					1 => "First Generation",
					_ => "Second Generation",
				},
			}
		})
	}

	/// Transform that centers `idx` in the viewport at the focus zoom.
	pub fn focus_transform(&self, idx: usize) -> ViewTransform {
		let k = if self.width < NARROW_WIDTH { FOCUS_ZOOM_NARROW } else { FOCUS_ZOOM };
		match self.mode {
			ViewMode::Tree => {
				let n = &self.hierarchy.nodes[idx];
				ViewTransform {
					x: self.width / 2.0 - n.x,
					y: self.height / 2.0 - n.y,
					k,
				}
			}
			ViewMode::Radial => {
				let (cx, cy) = self.node_position(idx);
				ViewTransform {
					x: self.width / 2.0 - k * cx,
					y: self.height / 2.0 - k * cy,
					k,
				}
			}
		}
	}

	/// Focus a node: remember it and animate toward its centering transform.
	/// Focus persists until the next interaction replaces it.
	pub fn focus_node(&mut self, idx: usize) {
		self.focused = Some(idx);
		self.animate_to(self.focus_transform(idx), FOCUS_DURATION);
	}

	/// The mode's default transform for the current viewport tier.
	pub fn initial_transform(&self) -> ViewTransform {
		let (k, ox, oy) = view_tier(self.width);
		match self.mode {
			ViewMode::Tree => ViewTransform { x: ox, y: oy, k },
			ViewMode::Radial => ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k,
			},
		}
	}

	pub fn reset_view(&mut self) {
		self.focused = None;
		self.animate_to(self.initial_transform(), FOCUS_DURATION);
	}

	/// Switch layout strategies: drops every node along with hover and focus
	/// state, rebuilds, and snaps to the new mode's initial transform.
	pub fn set_mode(&mut self, mode: ViewMode) {
		if self.mode == mode {
			return;
		}
		self.mode = mode;
		self.hover = HoverState::default();
		self.focused = None;
		self.transition = None;
		self.rebuild();
		self.transform = self.initial_transform();
	}

	pub fn toggle_mode(&mut self) {
		self.set_mode(self.mode.toggled());
	}

	/// Apply a viewport resize. Relayouts only when the change exceeds the
	/// threshold on either axis or crosses a row-capacity breakpoint;
	/// otherwise coordinates are untouched. Returns whether a rebuild ran.
	pub fn handle_resize(&mut self, width: f64, height: f64) -> bool {
		self.width = width;
		self.height = height;
		let crossed = nodes_per_row(width) != nodes_per_row(self.layout_width);
		let dw = (width - self.layout_width).abs();
		let dh = (height - self.layout_height).abs();
		if dw <= RESIZE_THRESHOLD && dh <= RESIZE_THRESHOLD && !crossed {
			return false;
		}
		self.layout_width = width;
		self.layout_height = height;
		self.rebuild();
		true
	}

	/// Cursor-anchored wheel zoom.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.transition = None;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		self.transition = None;
		self.press = PressState {
			node: self.node_at_position(sx, sy),
			start_x: sx,
			start_y: sy,
			moved: false,
		};
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
			if dx.abs() > CLICK_SLOP || dy.abs() > CLICK_SLOP {
				self.press.moved = true;
			}
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
		} else {
			let hovered = self.node_at_position(sx, sy);
			self.set_hover(hovered);
		}
	}

	/// Release the pointer; a press that stayed on a node without travelling
	/// becomes a click focus.
	pub fn pointer_up(&mut self, sx: f64, sy: f64) {
		let clicked = match self.press.node {
			Some(idx) if !self.press.moved && self.node_at_position(sx, sy) == Some(idx) => {
				Some(idx)
			}
			_ => None,
		};
		self.pan.active = false;
		self.press = PressState::default();
		if let Some(idx) = clicked {
			self.focus_node(idx);
		}
	}

	pub fn pointer_leave(&mut self) {
		self.pan.active = false;
		self.press = PressState::default();
		self.set_hover(None);
	}

	pub fn is_transitioning(&self) -> bool {
		self.transition.is_some()
	}

	fn animate_to(&mut self, to: ViewTransform, duration: f64) {
		self.transition = Some(TransformTransition {
			from: self.transform,
			to,
			t: 0.0,
			duration,
		});
	}

	/// Advance the entrance clock, the transform transition, and the hover
	/// emphasis fade.
	pub fn tick(&mut self, dt: f64) {
		self.entrance_t += dt;

		if let Some(mut tr) = self.transition {
			tr.t = (tr.t + dt / tr.duration).min(1.0);
			let e = ease_in_out_cubic(tr.t);
			self.transform = ViewTransform {
				x: tr.from.x + (tr.to.x - tr.from.x) * e,
				y: tr.from.y + (tr.to.y - tr.from.y) * e,
				k: tr.from.k + (tr.to.k - tr.from.k) * e,
			};
			self.transition = if tr.t >= 1.0 { None } else { Some(tr) };
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_incident.clear();
			}
		}
	}

}
