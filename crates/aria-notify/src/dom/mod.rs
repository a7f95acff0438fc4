// DOM model - Element tree backing a headless page
//
// The page under test is modeled as a small element tree built in code.
// There is deliberately no HTML parsing here: the fixture page is an
// external collaborator and only its observable structure is modeled.

mod a11y;
mod element;
mod selector;

pub use a11y::AxNode;
pub use element::{Element, NodeId};

pub(crate) use a11y::ax_snapshot;
pub(crate) use element::Node;
pub(crate) use selector::Selector;
