pub mod schema;
pub mod handler;
pub mod content;

pub use content::{ExtractedImage, FetchRequest, PageSummary, extract_main_content, extract_images, summarize};
pub use handler::FetchWebpageHandler;
pub use schema::meta;
