pub mod converter;
pub mod endpoint;
pub mod error;
pub mod normalize;
pub mod snippet;
pub mod target;

pub use converter::{CodeConverter, HttpSnippet};
pub use endpoint::{EndpointSnippets, all_snippets, endpoint_snippets, resource_name};
pub use error::{EmitError, SnippetGenerateError};
pub use normalize::{normalize_endpoints, normalize_snippet_code};
pub use snippet::{Snippet, create_all, emit, resolve_targets};
pub use target::{ClientInfo, LanguageTarget, TargetInfo, resolve_target};
