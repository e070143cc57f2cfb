pub mod error;
pub mod har;
pub mod parse;
pub mod resolve;
pub mod sample;

pub use error::{ParseError, ResolveError};
pub use har::{ApiToHar, HarEndpoint, HarItem, HarPostData, HarRequest};
pub use parse::operation::HttpMethod;
pub use parse::spec::Document;
pub use resolve::SpecWrapper;
pub use sample::{DefaultSampler, SchemaSampler};
