use crate::endpoint::EndpointSnippets;

/// Undo percent-encoding of path template braces so `{id}` reads naturally.
pub fn normalize_snippet_code(code: &str) -> String {
    code.replace("%7B", "{").replace("%7D", "}")
}

/// Apply [`normalize_snippet_code`] to every snippet of every endpoint.
pub fn normalize_endpoints(endpoints: &mut [EndpointSnippets]) {
    for snippet in endpoints.iter_mut().flat_map(|e| e.snippets.iter_mut()) {
        snippet.content = normalize_snippet_code(&snippet.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_braces() {
        let code = r#"const options = {
  "method": "DELETE",
  "hostname": "localhost",
  "port": "3000",
  "path": "/api/wallets/%7Bid%7D",
  "headers": {}
};"#;
        assert_eq!(
            normalize_snippet_code(code),
            r#"const options = {
  "method": "DELETE",
  "hostname": "localhost",
  "port": "3000",
  "path": "/api/wallets/{id}",
  "headers": {}
};"#
        );
    }
}
