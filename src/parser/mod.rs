mod tree;

pub use tree::parse_tree;
