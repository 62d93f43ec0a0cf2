// Page layout core: measurement, fitting and rendering of the single A4 page.
// Rendering is synchronous; `composer::generate_pdf` runs it inside
// tokio::task::spawn_blocking after the async fitting step.

pub mod canvas;
pub mod composer;
pub mod fitter;
pub mod font_metrics;
pub mod measure;

// Re-export the public API consumed by main.
pub use composer::generate_pdf;
pub use font_metrics::FontRegistry;
