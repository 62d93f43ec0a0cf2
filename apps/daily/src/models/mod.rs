pub mod content;
pub mod news;

pub use content::{DailyContent, Highlight, Verse, WeatherSnapshot};
pub use news::{Article, NewsBundle, Story};
