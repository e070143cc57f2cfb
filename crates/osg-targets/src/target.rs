use serde::{Deserialize, Serialize};

use crate::converter::CodeConverter;
use crate::error::EmitError;

/// One client library of a target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientInfo {
    pub key: &'static str,
    pub title: &'static str,
    pub link: &'static str,
    pub description: &'static str,
}

/// A target language and the clients it can be rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetInfo {
    pub key: &'static str,
    pub title: &'static str,
    pub extname: &'static str,
    #[serde(rename = "default")]
    pub default_client: &'static str,
    pub clients: &'static [ClientInfo],
}

impl TargetInfo {
    pub fn client(&self, key: &str) -> Option<&ClientInfo> {
        self.clients.iter().find(|c| c.key == key)
    }
}

/// A resolved `language_library` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTarget {
    pub title: String,
    pub language: String,
    pub library: String,
}

/// Resolve an identifier such as `node_fetch` or `python` against the
/// converter's registry. A missing library selects the target's default client.
pub fn resolve_target(
    converter: &dyn CodeConverter,
    id: &str,
) -> Result<LanguageTarget, EmitError> {
    let (language, library) = match id.split_once('_') {
        Some((language, library)) => (language, Some(library)),
        None => (id, None),
    };
    let target = converter
        .available_targets()
        .iter()
        .find(|t| t.key == language)
        .ok_or_else(|| EmitError::InvalidLanguage(language.to_string()))?;
    let library = library.unwrap_or(target.default_client);
    let client = target
        .client(library)
        .ok_or_else(|| EmitError::InvalidLibrary {
            language: language.to_string(),
            library: library.to_string(),
        })?;
    Ok(LanguageTarget {
        title: format!("{} + {}", target.title, client.title),
        language: target.key.to_string(),
        library: client.key.to_string(),
    })
}

pub(crate) const BUILTIN_TARGETS: &[TargetInfo] = &[
    TargetInfo {
        key: "shell",
        title: "Shell",
        extname: ".sh",
        default_client: "curl",
        clients: &[
            ClientInfo {
                key: "curl",
                title: "cURL",
                link: "http://curl.haxx.se/",
                description: "cURL is a command line tool and library for transferring data with URL syntax",
            },
            ClientInfo {
                key: "httpie",
                title: "HTTPie",
                link: "http://httpie.org/",
                description: "a CLI, cURL-like tool for humans",
            },
            ClientInfo {
                key: "wget",
                title: "Wget",
                link: "https://www.gnu.org/software/wget/",
                description: "a free software package for retrieving files using HTTP, HTTPS",
            },
        ],
    },
    TargetInfo {
        key: "javascript",
        title: "JavaScript",
        extname: ".js",
        default_client: "xhr",
        clients: &[
            ClientInfo {
                key: "xhr",
                title: "XMLHttpRequest",
                link: "https://developer.mozilla.org/en-US/docs/Web/API/XMLHttpRequest",
                description: "W3C Standard API that provides scripted client functionality",
            },
            ClientInfo {
                key: "fetch",
                title: "fetch",
                link: "https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API/Using_Fetch",
                description: "Perform asynchronous HTTP requests with the Fetch API",
            },
            ClientInfo {
                key: "axios",
                title: "Axios",
                link: "https://github.com/axios/axios",
                description: "Promise based HTTP client for the browser and node.js",
            },
        ],
    },
    TargetInfo {
        key: "node",
        title: "Node.js",
        extname: ".js",
        default_client: "native",
        clients: &[
            ClientInfo {
                key: "native",
                title: "HTTP",
                link: "http://nodejs.org/api/http.html#http_http_request_options_callback",
                description: "Node.js native HTTP interface",
            },
            ClientInfo {
                key: "fetch",
                title: "Fetch",
                link: "https://nodejs.org/api/globals.html#fetch",
                description: "Perform asynchronous HTTP requests with the Fetch API",
            },
            ClientInfo {
                key: "axios",
                title: "Axios",
                link: "https://github.com/axios/axios",
                description: "Promise based HTTP client for the browser and node.js",
            },
        ],
    },
    TargetInfo {
        key: "python",
        title: "Python",
        extname: ".py",
        default_client: "python3",
        clients: &[
            ClientInfo {
                key: "python3",
                title: "http.client",
                link: "https://docs.python.org/3/library/http.client.html",
                description: "Python3 HTTP Client",
            },
            ClientInfo {
                key: "requests",
                title: "Requests",
                link: "http://docs.python-requests.org/en/latest/api/#requests.request",
                description: "Requests HTTP library",
            },
        ],
    },
    TargetInfo {
        key: "go",
        title: "Go",
        extname: ".go",
        default_client: "native",
        clients: &[ClientInfo {
            key: "native",
            title: "NewRequest",
            link: "http://golang.org/pkg/net/http/#NewRequest",
            description: "Golang HTTP client request",
        }],
    },
    TargetInfo {
        key: "http",
        title: "HTTP",
        extname: "",
        default_client: "1.1",
        clients: &[ClientInfo {
            key: "1.1",
            title: "HTTP/1.1",
            link: "https://tools.ietf.org/html/rfc7230",
            description: "HTTP/1.1 request string in accordance with RFC 7230",
        }],
    },
    TargetInfo {
        key: "ruby",
        title: "Ruby",
        extname: ".rb",
        default_client: "native",
        clients: &[ClientInfo {
            key: "native",
            title: "net::http",
            link: "http://ruby-doc.org/stdlib-2.2.1/libdoc/net/http/rdoc/Net/HTTP.html",
            description: "Ruby HTTP client",
        }],
    },
    TargetInfo {
        key: "php",
        title: "PHP",
        extname: ".php",
        default_client: "curl",
        clients: &[ClientInfo {
            key: "curl",
            title: "cURL",
            link: "http://php.net/manual/en/book.curl.php",
            description: "PHP with ext-curl",
        }],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::HttpSnippet;

    #[test]
    fn test_resolve_with_library() {
        let target = resolve_target(&HttpSnippet::new(), "node_fetch").unwrap();
        assert_eq!(
            target,
            LanguageTarget {
                title: "Node.js + Fetch".to_string(),
                language: "node".to_string(),
                library: "fetch".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_default_client() {
        let converter = HttpSnippet::new();
        assert_eq!(
            resolve_target(&converter, "javascript").unwrap().title,
            "JavaScript + XMLHttpRequest"
        );
        assert_eq!(resolve_target(&converter, "http").unwrap().library, "1.1");
        assert_eq!(resolve_target(&converter, "http_1.1").unwrap().library, "1.1");
    }

    #[test]
    fn test_resolve_errors() {
        let converter = HttpSnippet::new();
        assert!(matches!(
            resolve_target(&converter, "cobol"),
            Err(EmitError::InvalidLanguage(l)) if l == "cobol"
        ));
        assert!(matches!(
            resolve_target(&converter, "node_request"),
            Err(EmitError::InvalidLibrary { library, .. }) if library == "request"
        ));
    }
}
