use serde_json::Value;

use super::types::{HarItem, HarPostData};
use crate::error::ResolveError;
use crate::parse::ref_resolve::RefResolver;
use crate::parse::request_body::RequestBody;
use crate::parse::schema::SchemaOrRef;
use crate::sample::SchemaSampler;

/// Request content types that produce a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeType {
    Json,
    Xml,
    Multipart,
    FormUrlEncoded,
}

impl MimeType {
    pub const ALL: [MimeType; 4] = [
        MimeType::Json,
        MimeType::Xml,
        MimeType::Multipart,
        MimeType::FormUrlEncoded,
    ];

    pub fn parse(content_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == content_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Json => "application/json",
            MimeType::Xml => "application/xml",
            MimeType::Multipart => "multipart/form-data",
            MimeType::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

/// Payload synthesis over one request body.
#[derive(Debug, Clone, Copy)]
pub struct PostData<'b> {
    body: Option<&'b RequestBody>,
}

impl<'b> PostData<'b> {
    pub fn new(body: Option<&'b RequestBody>) -> Self {
        Self { body }
    }

    /// Recognized content types that carry a schema, in declaration order.
    pub fn available_content_types(&self) -> Vec<(MimeType, &'b SchemaOrRef)> {
        let Some(body) = self.body else {
            return Vec::new();
        };
        body.content
            .iter()
            .filter_map(|(content_type, media)| {
                let mime = MimeType::parse(content_type)?;
                let schema = media.schema.as_ref()?;
                Some((mime, schema))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.available_content_types().is_empty()
    }

    /// One payload per available content type.
    pub fn to_vec(
        &self,
        sampler: &dyn SchemaSampler,
        resolver: RefResolver<'_>,
    ) -> Result<Vec<HarPostData>, ResolveError> {
        self.available_content_types()
            .into_iter()
            .map(|(mime, schema)| {
                let sample = sampler.sample(schema, resolver)?;
                Ok(encode_sample(&sample, mime))
            })
            .collect()
    }
}

/// Serialize a sample value for `mime`.
pub fn encode_sample(sample: &Value, mime: MimeType) -> HarPostData {
    let mime_type = mime.as_str().to_string();
    match mime {
        MimeType::Json | MimeType::Xml => HarPostData {
            mime_type,
            text: Some(sample.to_string()),
            params: None,
        },
        MimeType::Multipart => HarPostData {
            mime_type,
            text: None,
            params: Some(
                members(sample)
                    .map(|(name, value)| HarItem::new(name, scalar_text(value)))
                    .collect(),
            ),
        },
        MimeType::FormUrlEncoded => {
            let params: Vec<HarItem> = members(sample)
                .map(|(name, value)| HarItem::new(form_encode(name), form_encode(&form_value(value))))
                .collect();
            let text = params
                .iter()
                .map(|p| format!("{}={}", p.name, p.value))
                .collect::<Vec<_>>()
                .join("&");
            HarPostData {
                mime_type,
                text: Some(text),
                params: Some(params),
            }
        }
    }
}

/// Top-level members of an object sample. Non-object samples have none.
fn members(sample: &Value) -> impl Iterator<Item = (&String, &Value)> {
    sample.as_object().into_iter().flatten()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Arrays are flattened by joining their elements with `,`.
fn form_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        other => scalar_text(other),
    }
}

fn form_encode(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::sample::DefaultSampler;

    fn body(value: Value) -> RequestBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_content_types_filtered_in_order() {
        let body = body(json!({
            "content": {
                "application/x-www-form-urlencoded": { "schema": { "type": "object" } },
                "text/plain": { "schema": { "type": "string" } },
                "application/json": { "schema": { "type": "object" } },
                "application/xml": {}
            }
        }));
        let post = PostData::new(Some(&body));
        let mimes: Vec<_> = post
            .available_content_types()
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(mimes, vec![MimeType::FormUrlEncoded, MimeType::Json]);
        assert!(PostData::new(None).is_empty());
    }

    #[test]
    fn test_encodings() {
        let sample = json!({ "full name": "Ada Lovelace", "age": 36, "tags": ["a", "b"] });

        let json = encode_sample(&sample, MimeType::Json);
        assert_eq!(
            json.text.as_deref(),
            Some(r#"{"full name":"Ada Lovelace","age":36,"tags":["a","b"]}"#)
        );

        let multipart = encode_sample(&sample, MimeType::Multipart);
        assert_eq!(multipart.text, None);
        assert_eq!(
            multipart.params.unwrap(),
            vec![
                HarItem::new("full name", "Ada Lovelace"),
                HarItem::new("age", "36"),
                HarItem::new("tags", r#"["a","b"]"#),
            ]
        );

        let form = encode_sample(&sample, MimeType::FormUrlEncoded);
        assert_eq!(
            form.text.as_deref(),
            Some("full+name=Ada+Lovelace&age=36&tags=a%2Cb")
        );
    }

    #[test]
    fn test_to_vec_samples_each_type() {
        let root = json!({});
        let body = body(json!({
            "content": {
                "application/json": {
                    "schema": { "type": "object", "properties": { "name": { "type": "string" } } }
                },
                "application/xml": {
                    "schema": { "type": "object", "properties": { "name": { "type": "string" } } }
                }
            }
        }));
        let payloads = PostData::new(Some(&body))
            .to_vec(&DefaultSampler, RefResolver::new(&root))
            .unwrap();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[1].mime_type, "application/xml");
        assert_eq!(payloads[1].text.as_deref(), Some(r#"{"name":"string"}"#));
    }
}
