pub mod document;
pub mod error;
pub mod extract_elements;
pub mod fetch_webpage;
pub mod get_metadata;
pub mod meta;
pub mod utils;
pub mod weather;

pub use error::{ErrorKind, ToolError, ToolOutcome};
pub use extract_elements::{ExtractElementsHandler, ExtractRequest};
pub use fetch_webpage::{FetchRequest, FetchWebpageHandler};
pub use get_metadata::{GetMetadataHandler, Metadata, MetadataField, MetadataRequest};
pub use meta::{ToolInputSchema, ToolMeta, ToolsMeta};
pub use utils::Fetcher;
pub use weather::{WeatherHandler, WeatherRequest};
pub use extract_elements::meta as extract_elements_meta;
pub use fetch_webpage::meta as fetch_webpage_meta;
pub use get_metadata::meta as get_metadata_meta;
pub use weather::meta as weather_meta;
