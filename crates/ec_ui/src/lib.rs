pub mod controller;
pub mod render;
pub mod view;

pub use controller::{ExposureCheckController, FormInput, Phase, SubmitControl};
pub use render::{page, render_results, ResultsView};
pub use view::{render_document, Element, Node};
