// Adapters layer: page sources that hand rendered listing HTML to the pipeline.

pub mod file;
pub mod http;

pub use file::FilePageSource;
pub use http::HttpPageSource;
