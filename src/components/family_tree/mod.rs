mod component;
mod data;
mod hierarchy;
mod layout;
mod overlap;
mod render;
mod state;
mod types;

pub use component::FamilyTreeCanvas;
pub use data::family_data;
pub use types::{FamilyMember, SelectedNodeInfo, ViewMode};
