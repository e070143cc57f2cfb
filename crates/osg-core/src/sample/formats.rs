use crate::parse::schema::Schema;

const DEFAULT_STRING: &str = "string";

/// Upper bound on the padded length for `minLength`.
pub const MAX_SAMPLE_LENGTH: u64 = 1024;

/// Well-known sample for a string `format`.
fn format_sample(format: &str) -> Option<&'static str> {
    let sample = match format {
        "email" | "idn-email" => "user@example.com",
        "password" => "pa$$word",
        "date-time" => "2019-08-24T14:15:22Z",
        "date" => "2019-08-24",
        "time" => "14:15:22Z",
        "uuid" => "095be615-a8ad-4c33-8e9c-c7612fbf6c9f",
        "uri" | "url" | "uri-reference" => "http://example.com",
        "hostname" | "idn-hostname" => "example.com",
        "ipv4" => "192.168.0.1",
        "ipv6" => "2001:0db8:85a3:0000:0000:8a2e:0370:7334",
        "byte" => "U3dhZ2dlciByb2Nrcw==",
        _ => return None,
    };
    Some(sample)
}

/// Sample string for a schema, padded or cut to its length bounds.
pub fn string_sample(schema: &Schema) -> String {
    let mut value = schema
        .format
        .as_deref()
        .and_then(format_sample)
        .unwrap_or(DEFAULT_STRING)
        .to_string();

    if let Some(min) = schema.min_length.map(|n| n.min(MAX_SAMPLE_LENGTH) as usize) {
        if value.len() < min {
            value = DEFAULT_STRING.repeat(min / DEFAULT_STRING.len() + 1);
            value.truncate(min);
        }
    }
    if let Some(max) = schema.max_length.map(|n| n as usize) {
        if value.len() > max {
            value.truncate(max);
        }
    }
    value
}
