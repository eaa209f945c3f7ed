mod walker;

pub use walker::{AssetWalker, WalkEntry};
pub(crate) use walker::glob_match;
