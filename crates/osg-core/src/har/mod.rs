//! Request descriptors in the HAR request shape.

pub mod builder;
pub mod parameters;
pub mod post_data;
pub mod security;
pub mod types;

pub use builder::{ApiToHar, NO_DESCRIPTION};
pub use parameters::ParameterSet;
pub use post_data::{MimeType, PostData};
pub use types::{HarEndpoint, HarItem, HarPostData, HarRequest};
