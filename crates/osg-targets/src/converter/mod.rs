//! Conversion of request descriptors into client code.

mod http_snippet;
mod request;

use osg_core::HarRequest;

use crate::error::EmitError;
use crate::target::{LanguageTarget, TargetInfo};

pub use http_snippet::HttpSnippet;
pub use request::{BodyView, MULTIPART_BOUNDARY, RequestView};

/// Turns a request descriptor into source code for a resolved target.
pub trait CodeConverter {
    /// Every language this converter can render, with its clients.
    fn available_targets(&self) -> &[TargetInfo];

    fn convert(&self, request: &HarRequest, target: &LanguageTarget) -> Result<String, EmitError>;
}
