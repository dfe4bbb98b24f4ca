pub mod config;
pub mod environment;
pub mod logging;
pub mod server;
pub mod tools;

pub use config::Config;
pub use tools::{
	ExtractElementsHandler,
	FetchWebpageHandler,
	GetMetadataHandler,
	ToolError,
	ToolMeta,
	ToolsMeta,
	WeatherHandler,
	extract_elements_meta,
	fetch_webpage_meta,
	get_metadata_meta,
	weather_meta,
};
