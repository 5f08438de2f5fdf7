use super::types::FamilyMember;

/// A node in the flat hierarchy arena. Parent and child links are indices
/// into the owning `Hierarchy`, so the tree carries no owning cycles and
/// parent lookup stays O(1).
#[derive(Clone, Debug)]
pub struct TreeNode {
	pub name: String,
	pub depth: usize,
	pub parent: Option<usize>,
	pub children: Vec<usize>,
	/// Horizontal position, or the angle in radial mode.
	pub x: f64,
	/// Vertical position, or the radius in radial mode.
	pub y: f64,
}

/// The typed hierarchy derived from the static dataset. Rebuilt from scratch
/// on every layout recomputation; index 0 is always the root.
#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
	pub nodes: Vec<TreeNode>,
}

impl Hierarchy {
	/// Walk the dataset depth-first into the arena. Coordinates stay zeroed
	/// until a layout strategy runs.
	pub fn build(data: &FamilyMember) -> Self {
		let mut nodes = Vec::new();
		push_node(&mut nodes, data, 0, None);
		Self { nodes }
	}

	pub fn root(&self) -> &TreeNode {
		&self.nodes[0]
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Parent→child edges in depth-first order.
	pub fn links(&self) -> Vec<(usize, usize)> {
		self.nodes
			.iter()
			.enumerate()
			.filter_map(|(i, n)| n.parent.map(|p| (p, i)))
			.collect()
	}

	pub fn at_depth(&self, depth: usize) -> impl Iterator<Item = usize> + '_ {
		self.nodes
			.iter()
			.enumerate()
			.filter(move |(_, n)| n.depth == depth)
			.map(|(i, _)| i)
	}
}

fn push_node(
	nodes: &mut Vec<TreeNode>,
	data: &FamilyMember,
	depth: usize,
	parent: Option<usize>,
) -> usize {
	let idx = nodes.len();
	nodes.push(TreeNode {
		name: data.name.clone(),
		depth,
		parent,
		children: Vec::new(),
		x: 0.0,
		y: 0.0,
	});
	for child in &data.children {
		let c = push_node(nodes, child, depth + 1, Some(idx));
		nodes[idx].children.push(c);
	}
	idx
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> FamilyMember {
		FamilyMember::with_children(
			"root",
			vec![
				FamilyMember::with_children(
					"a",
					vec![FamilyMember::leaf("a1"), FamilyMember::leaf("a2")],
				),
				FamilyMember::leaf("b"),
			],
		)
	}

	#[test]
	fn depth_invariant() {
		let h = Hierarchy::build(&sample());
		assert_eq!(h.root().depth, 0);
		assert!(h.root().parent.is_none());
		for node in &h.nodes {
			match node.parent {
				Some(p) => assert_eq!(node.depth, h.nodes[p].depth + 1),
				None => assert_eq!(node.depth, 0),
			}
		}
	}

	#[test]
	fn parent_child_links_agree() {
		let h = Hierarchy::build(&sample());
		for (i, node) in h.nodes.iter().enumerate() {
			for &c in &node.children {
				assert_eq!(h.nodes[c].parent, Some(i));
			}
		}
		// Every non-root node appears exactly once as an edge target.
		assert_eq!(h.links().len(), h.len() - 1);
	}

	#[test]
	fn depth_first_order() {
		let h = Hierarchy::build(&sample());
		let names: Vec<&str> = h.nodes.iter().map(|n| n.name.as_str()).collect();
		assert_eq!(names, ["root", "a", "a1", "a2", "b"]);
		assert_eq!(h.at_depth(2).count(), 2);
	}

	#[test]
	fn childless_member_is_leaf() {
		let h = Hierarchy::build(&FamilyMember::leaf("only"));
		assert_eq!(h.len(), 1);
		assert!(h.root().children.is_empty());
		assert!(h.links().is_empty());
	}
}
