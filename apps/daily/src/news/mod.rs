pub mod curation;
pub mod prompts;
pub mod shortener;

pub use curation::curate;
pub use shortener::{LlmShortener, NoShortener, Shortener};
