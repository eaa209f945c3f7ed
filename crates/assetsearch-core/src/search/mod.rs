mod results;
mod searcher;

pub use results::{SearchHit, SearchResult};
pub use searcher::{SearchFilters, Searcher};
