//! Mesh entities, material law and element stiffness templates

mod material;
mod node;
mod quad;
mod template;

pub use material::{Material, PlaneFormulation};
pub use node::{Node, DOFS_PER_NODE};
pub use quad::{Quad, DOFS_PER_ELEMENT, ENTRIES_PER_ELEMENT, NODES_PER_ELEMENT};
pub use template::ElementTemplates;
