use std::f64::consts::TAU;

use super::hierarchy::Hierarchy;
use super::types::ViewMode;

/// Spacing table shared by the layout strategies, the row packer and the
/// overlap resolver.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Horizontal slot width per leaf in the tidy strategy.
	pub node_spacing: f64,
	/// Vertical distance per depth level in the tidy strategy.
	pub level_height: f64,
	pub root_y: f64,
	/// Vertical position of the first generation-1 row.
	pub gen1_start_y: f64,
	/// Vertical distance between generation-1 rows. Large enough to leave
	/// room for the child sub-rows stacked beneath each parent.
	pub row_offset_y: f64,
	/// Fraction of the viewport width a packed row may occupy.
	pub row_band: f64,
	/// Max children per sub-row beneath a generation-1 parent.
	pub children_per_row: usize,
	pub child_spacing_x: f64,
	pub child_spacing_y: f64,
	/// Vertical gap between a parent and its first sub-row.
	pub child_offset_y: f64,
	pub min_horizontal_spacing: f64,
	pub min_vertical_spacing: f64,
	/// The resolver is not a fixed-point iteration; a residual overlap may
	/// survive this many passes.
	pub resolver_passes: usize,
	/// Clearance added on top of the half-overlap correction.
	pub resolver_padding: f64,
	/// Margin kept free around the radial cluster.
	pub radial_margin: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_spacing: 140.0,
			level_height: 160.0,
			root_y: 60.0,
			gen1_start_y: 220.0,
			row_offset_y: 550.0,
			row_band: 0.9,
			children_per_row: 3,
			child_spacing_x: 110.0,
			child_spacing_y: 60.0,
			child_offset_y: 90.0,
			min_horizontal_spacing: 100.0,
			min_vertical_spacing: 50.0,
			resolver_passes: 3,
			resolver_padding: 5.0,
			radial_margin: 120.0,
		}
	}
}

/// Generation-1 row capacity as a step function of viewport width.
pub fn nodes_per_row(width: f64) -> usize {
	if width < 480.0 {
		1
	} else if width < 768.0 {
		2
	} else if width < 1024.0 {
		3
	} else {
		4
	}
}

/// Assign coordinates for the requested mode. Tree mode runs the tidy
/// strategy and then repacks generations 1 and 2 into centered rows; radial
/// mode leaves (angle, radius) pairs in `x`/`y`.
pub fn assign(h: &mut Hierarchy, mode: ViewMode, width: f64, height: f64, cfg: &LayoutConfig) {
	if h.is_empty() {
		return;
	}
	match mode {
		ViewMode::Tree => {
			assign_tidy(h, cfg);
			pack_generation_rows(h, width, cfg);
		}
		ViewMode::Radial => assign_radial(h, width, height, cfg),
	}
}

/// Map an (angle, radius) pair to Cartesian. Angle 0 points up and angles
/// grow clockwise, matching the link geometry the renderer draws.
pub fn polar_to_cartesian(angle: f64, radius: f64) -> (f64, f64) {
	(angle.sin() * radius, -angle.cos() * radius)
}

/// Tidy top-down layout with fixed per-node spacing: leaves take successive
/// slots, parents center over their children. Sibling subtrees can never end
/// up closer than `node_spacing`.
fn assign_tidy(h: &mut Hierarchy, cfg: &LayoutConfig) {
	let mut next_slot = 0.0;
	tidy_visit(h, 0, &mut next_slot, cfg);
}

fn tidy_visit(h: &mut Hierarchy, idx: usize, next_slot: &mut f64, cfg: &LayoutConfig) -> f64 {
	let children = h.nodes[idx].children.clone();
	let x = if children.is_empty() {
		let x = *next_slot * cfg.node_spacing;
		*next_slot += 1.0;
		x
	} else {
		let first = tidy_visit(h, children[0], next_slot, cfg);
		let mut last = first;
		for &c in &children[1..] {
			last = tidy_visit(h, c, next_slot, cfg);
		}
		(first + last) / 2.0
	};
	h.nodes[idx].x = x;
	h.nodes[idx].y = h.nodes[idx].depth as f64 * cfg.level_height;
	x
}

/// Override generation-1 and generation-2 coordinates with viewport-aware
/// rows: generation 1 packs into rows of `nodes_per_row(width)` centered
/// within the row band, each parent's children into sub-rows beneath it.
fn pack_generation_rows(h: &mut Hierarchy, width: f64, cfg: &LayoutConfig) {
	h.nodes[0].x = width / 2.0;
	h.nodes[0].y = cfg.root_y;

	let per_row = nodes_per_row(width);
	let band = width * cfg.row_band;
	let left = (width - band) / 2.0;

	let gen1 = h.root().children.clone();
	for (i, &idx) in gen1.iter().enumerate() {
		let row = i / per_row;
		let col = i % per_row;
		let in_row = per_row.min(gen1.len() - row * per_row);
		let slot = band / in_row as f64;
		h.nodes[idx].x = left + slot * (col as f64 + 0.5);
		h.nodes[idx].y = cfg.gen1_start_y + row as f64 * cfg.row_offset_y;
	}

	for &parent in &gen1 {
		pack_children_under(h, parent, cfg);
	}
}

fn pack_children_under(h: &mut Hierarchy, parent: usize, cfg: &LayoutConfig) {
	let (px, py) = (h.nodes[parent].x, h.nodes[parent].y);
	let kids = h.nodes[parent].children.clone();
	for (j, &idx) in kids.iter().enumerate() {
		let row = j / cfg.children_per_row;
		let col = j % cfg.children_per_row;
		let in_row = cfg.children_per_row.min(kids.len() - row * cfg.children_per_row);
		h.nodes[idx].x = px + (col as f64 - (in_row as f64 - 1.0) / 2.0) * cfg.child_spacing_x;
		h.nodes[idx].y = py + cfg.child_offset_y + row as f64 * cfg.child_spacing_y;
	}
}

/// Dendrogram cluster in polar coordinates sized `[2π, min(w,h)/2 − margin]`:
/// leaves evenly distributed in angle (separation 1 between siblings, 2
/// across parent boundaries), internal angle the mean of the children,
/// radius proportional to height above the deepest leaves.
fn assign_radial(h: &mut Hierarchy, width: f64, height: f64, cfg: &LayoutConfig) {
	let radius = (width.min(height) / 2.0 - cfg.radial_margin).max(0.0);
	let n = h.len();
	let mut slot = vec![0.0f64; n];
	let mut rank = vec![0usize; n];
	let mut cursor = 0.0;
	let mut prev_leaf = None;
	radial_visit(h, 0, &mut slot, &mut rank, &mut cursor, &mut prev_leaf);

	let max_slot = cursor;
	let root_rank = rank[0].max(1);
	for i in 0..n {
		let angle = if max_slot > 0.0 { slot[i] / max_slot * TAU } else { 0.0 };
		h.nodes[i].x = angle;
		h.nodes[i].y = radius * (root_rank - rank[i]) as f64 / root_rank as f64;
	}
}

fn radial_visit(
	h: &Hierarchy,
	idx: usize,
	slot: &mut [f64],
	rank: &mut [usize],
	cursor: &mut f64,
	prev_leaf: &mut Option<usize>,
) {
	let children = &h.nodes[idx].children;
	if children.is_empty() {
		if let Some(prev) = *prev_leaf {
			let sep = if h.nodes[prev].parent == h.nodes[idx].parent { 1.0 } else { 2.0 };
			*cursor += sep;
		}
		slot[idx] = *cursor;
		rank[idx] = 0;
		*prev_leaf = Some(idx);
	} else {
		let mut sum = 0.0;
		let mut max_rank = 0;
		for &c in children {
			radial_visit(h, c, slot, rank, cursor, prev_leaf);
			sum += slot[c];
			max_rank = max_rank.max(rank[c]);
		}
		slot[idx] = sum / children.len() as f64;
		rank[idx] = max_rank + 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::family_tree::types::FamilyMember;

	fn three_level(counts: &[usize]) -> Hierarchy {
		let gen1 = counts
			.iter()
			.enumerate()
			.map(|(i, &n)| {
				let kids = (0..n).map(|j| FamilyMember::leaf(&format!("c{i}-{j}"))).collect();
				FamilyMember::with_children(&format!("p{i}"), kids)
			})
			.collect();
		Hierarchy::build(&FamilyMember::with_children("root", gen1))
	}

	#[test]
	fn nodes_per_row_breakpoints() {
		assert_eq!(nodes_per_row(300.0), 1);
		assert_eq!(nodes_per_row(600.0), 2);
		assert_eq!(nodes_per_row(900.0), 3);
		assert_eq!(nodes_per_row(1500.0), 4);
		// Exact edges belong to the wider tier.
		assert_eq!(nodes_per_row(479.9), 1);
		assert_eq!(nodes_per_row(480.0), 2);
		assert_eq!(nodes_per_row(768.0), 3);
		assert_eq!(nodes_per_row(1024.0), 4);
		// Monotone non-decreasing.
		let mut prev = 0;
		for w in (0..2000).step_by(10) {
			let n = nodes_per_row(w as f64);
			assert!(n >= prev);
			prev = n;
		}
	}

	#[test]
	fn tidy_spaces_siblings_and_centers_parents() {
		let mut h = three_level(&[3, 2]);
		let cfg = LayoutConfig::default();
		assign_tidy(&mut h, &cfg);

		for node in &h.nodes {
			for pair in node.children.windows(2) {
				let gap = h.nodes[pair[1]].x - h.nodes[pair[0]].x;
				assert!(gap >= cfg.node_spacing - 1e-9, "gap {gap} too small");
			}
			if let (Some(&first), Some(&last)) = (node.children.first(), node.children.last()) {
				let mid = (h.nodes[first].x + h.nodes[last].x) / 2.0;
				assert!((node.x - mid).abs() < 1e-9);
			}
		}
		for node in &h.nodes {
			assert_eq!(node.y, node.depth as f64 * cfg.level_height);
		}
	}

	#[test]
	fn rows_respect_capacity_and_band() {
		let width = 1200.0;
		let cfg = LayoutConfig::default();
		let mut h = three_level(&[2, 3, 4, 3, 2, 3, 4, 2, 3, 2, 3, 2]);
		assign(&mut h, ViewMode::Tree, width, 800.0, &cfg);

		let per_row = nodes_per_row(width);
		let gen1: Vec<usize> = h.root().children.clone();
		let left = width * (1.0 - cfg.row_band) / 2.0;
		let right = width - left;
		for (i, &idx) in gen1.iter().enumerate() {
			let expected_y = cfg.gen1_start_y + (i / per_row) as f64 * cfg.row_offset_y;
			assert_eq!(h.nodes[idx].y, expected_y);
			assert!(h.nodes[idx].x >= left && h.nodes[idx].x <= right);
		}
		// Rows are at least the configured offset apart, which leaves room
		// for up to three sub-rows of children in between.
		assert!(cfg.row_offset_y >= 500.0);
		assert_eq!(h.nodes[0].x, width / 2.0);
		assert_eq!(h.nodes[0].y, cfg.root_y);
	}

	#[test]
	fn children_pack_in_sub_rows_under_parent() {
		let cfg = LayoutConfig::default();
		let mut h = three_level(&[8]);
		assign(&mut h, ViewMode::Tree, 1200.0, 800.0, &cfg);

		let parent = h.root().children[0];
		let (px, py) = (h.nodes[parent].x, h.nodes[parent].y);
		let kids = h.nodes[parent].children.clone();
		assert_eq!(kids.len(), 8);
		for (j, &idx) in kids.iter().enumerate() {
			let row = j / cfg.children_per_row;
			assert_eq!(h.nodes[idx].y, py + cfg.child_offset_y + row as f64 * cfg.child_spacing_y);
		}
		// Each full sub-row of three is centered on the parent.
		let first_row: Vec<f64> = kids[..3].iter().map(|&i| h.nodes[i].x).collect();
		assert!(((first_row[0] + first_row[2]) / 2.0 - px).abs() < 1e-9);
		assert_eq!(first_row[1], px);
		// The trailing partial row (8 = 3 + 3 + 2) is centered too.
		let last_row: Vec<f64> = kids[6..].iter().map(|&i| h.nodes[i].x).collect();
		assert!(((last_row[0] + last_row[1]) / 2.0 - px).abs() < 1e-9);
	}

	#[test]
	fn radial_ranks_and_angles() {
		let cfg = LayoutConfig::default();
		let mut h = three_level(&[2, 3]);
		let (w, _h) = (1000.0, 1000.0);
		assign(&mut h, ViewMode::Radial, w, 1000.0, &cfg);

		let radius = w / 2.0 - cfg.radial_margin;
		assert_eq!(h.nodes[0].y, 0.0);
		for i in h.at_depth(2).collect::<Vec<_>>() {
			assert!((h.nodes[i].y - radius).abs() < 1e-9);
		}
		for i in h.at_depth(1).collect::<Vec<_>>() {
			assert!((h.nodes[i].y - radius / 2.0).abs() < 1e-9);
			// Internal angle is the mean of the children.
			let children = &h.nodes[i].children;
			let mean = children.iter().map(|&c| h.nodes[c].x).sum::<f64>() / children.len() as f64;
			assert!((h.nodes[i].x - mean).abs() < 1e-9);
		}
		for node in &h.nodes {
			assert!(node.x >= 0.0 && node.x <= TAU + 1e-9);
		}
	}

	#[test]
	fn polar_mapping_axes() {
		let (x, y) = polar_to_cartesian(0.0, 100.0);
		assert!((x - 0.0).abs() < 1e-9 && (y + 100.0).abs() < 1e-9);
		let (x, y) = polar_to_cartesian(std::f64::consts::FRAC_PI_2, 100.0);
		assert!((x - 100.0).abs() < 1e-9 && y.abs() < 1e-9);
	}

	#[test]
	fn mode_round_trip_preserves_structure() {
		let cfg = LayoutConfig::default();
		let mut h = three_level(&[3, 2, 4]);
		let names: Vec<String> = h.nodes.iter().map(|n| n.name.clone()).collect();
		let links = h.links();

		assign(&mut h, ViewMode::Tree, 1200.0, 800.0, &cfg);
		assign(&mut h, ViewMode::Radial, 1200.0, 800.0, &cfg);
		assign(&mut h, ViewMode::Tree, 1200.0, 800.0, &cfg);

		assert_eq!(names, h.nodes.iter().map(|n| n.name.clone()).collect::<Vec<_>>());
		assert_eq!(links, h.links());
	}
}
