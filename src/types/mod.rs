mod element;
mod namespace;

pub use element::{Descendants, Element};
pub use namespace::{Namespace, Tag};
