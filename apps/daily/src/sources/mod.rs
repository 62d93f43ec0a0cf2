//! Content feeds. Each fetcher degrades to "absent" instead of failing the run.

pub mod guardian;
pub mod http;
pub mod readings;
pub mod readwise;
pub mod verse;
pub mod weather;

pub use guardian::GuardianClient;
pub use readings::readings_for;
pub use readwise::ReadwiseClient;
pub use verse::verse_for;
pub use weather::WeatherClient;
