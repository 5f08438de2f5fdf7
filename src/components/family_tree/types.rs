/// One member of the static family dataset. Children are ordered; a member
/// without children is a leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct FamilyMember {
	pub name: String,
	pub children: Vec<FamilyMember>,
}

impl FamilyMember {
	pub fn leaf(name: &str) -> Self {
		Self {
			name: name.into(),
			children: Vec::new(),
		}
	}

	pub fn with_children(name: &str, children: Vec<FamilyMember>) -> Self {
		Self {
			name: name.into(),
			children,
		}
	}
}

/// Read projection of the hovered node, shown in the details side panel.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedNodeInfo {
	pub name: String,
	pub depth: usize,
	pub child_count: usize,
	pub level_label: &'static str,
}

/// Which layout strategy positions the hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
	#[default]
	Tree,
	Radial,
}

impl ViewMode {
	pub fn toggled(self) -> Self {
		match self {
			ViewMode::Tree => ViewMode::Radial,
			ViewMode::Radial => ViewMode::Tree,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			ViewMode::Tree => "Tree",
			ViewMode::Radial => "Radial",
		}
	}
}
