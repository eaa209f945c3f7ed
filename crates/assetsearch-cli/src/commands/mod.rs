pub mod index;
pub mod indexers;
pub mod search;
pub mod status;
pub mod watch;
