use osg_core::HarRequest;
use serde::{Deserialize, Serialize};

use crate::converter::CodeConverter;
use crate::error::EmitError;
use crate::target::{LanguageTarget, resolve_target};

/// Code for one request in one target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: LanguageTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub title: String,
    pub content: String,
}

/// Resolve every identifier, failing on the first unknown one.
pub fn resolve_targets<S: AsRef<str>>(
    converter: &dyn CodeConverter,
    ids: &[S],
) -> Result<Vec<LanguageTarget>, EmitError> {
    ids.iter()
        .map(|id| resolve_target(converter, id.as_ref()))
        .collect()
}

pub fn emit(
    converter: &dyn CodeConverter,
    target: &LanguageTarget,
    request: &HarRequest,
) -> Result<Snippet, EmitError> {
    let content = converter.convert(request, target)?;
    Ok(Snippet {
        id: target.clone(),
        mime_type: request.mime_type().map(str::to_string),
        title: target.title.clone(),
        content,
    })
}

/// Every target applied to every request: targets outer, requests inner.
pub fn create_all(
    converter: &dyn CodeConverter,
    targets: &[LanguageTarget],
    requests: &[HarRequest],
) -> Result<Vec<Snippet>, EmitError> {
    let mut snippets = Vec::with_capacity(targets.len() * requests.len());
    for target in targets {
        for request in requests {
            snippets.push(emit(converter, target, request)?);
        }
    }
    Ok(snippets)
}
