use crate::{compilation::DEFAULT_ROOT_URL, error::ValidationError};
use parking_lot::RwLock;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::{collections::HashMap, collections::HashSet, fmt, fs::File, sync::Arc};
use url::Url;

/// A capability for loading external schema documents referenced by URI.
///
/// `None` is the missing-schema signal: the reference that triggered the
/// load is reported as unresolvable. Implementations perform the only I/O
/// of the engine; callers wrap them for cancellation or timeouts.
pub trait SchemaResolver: Send + Sync {
    /// Fetch and parse the document identified by `url`.
    fn resolve(&self, url: &Url) -> Option<Value>;
}

/// The default external schema fetcher. Treats references as filesystem
/// paths; with the `reqwest` feature it also loads `http(s)://` documents.
#[derive(Debug, Default)]
pub struct DefaultResolver;

impl SchemaResolver for DefaultResolver {
    fn resolve(&self, url: &Url) -> Option<Value> {
        let path = percent_decode_str(url.path()).decode_utf8().ok()?;
        match url.scheme() {
            "file" => read_document(path.as_ref()),
            // References without an explicit scheme are resolved against the
            // default scope and come out with this one; their path is
            // relative to the working directory.
            "json-schema" => read_document(path.trim_start_matches('/')),
            #[cfg(feature = "reqwest")]
            "http" | "https" => reqwest::blocking::get(url.as_str()).ok()?.json().ok(),
            _ => None,
        }
    }
}

fn read_document(path: &str) -> Option<Value> {
    let file = File::open(path).ok()?;
    serde_json::from_reader(&file).ok()
}

/// Resolves `$ref` URLs against the root schema and externally loaded
/// documents. Fetched documents are cached for the lifetime of the compiled
/// schema so several references to one document cost one fetch.
pub(crate) struct Resolver<'a> {
    root_schema: &'a Value,
    external: Box<dyn SchemaResolver>,
    store: RwLock<HashMap<String, Arc<Value>>>,
}

impl<'a> fmt::Debug for Resolver<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("documents", &self.store.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(root_schema: &'a Value, external: Box<dyn SchemaResolver>) -> Resolver<'a> {
        Resolver {
            root_schema,
            external,
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve `url` to a schema node, following `$ref` chains until a
    /// non-ref schema is reached. Returns the node together with the scope
    /// further references inside it resolve against: the root scope for
    /// fragment-only references, the document URL once a remote document has
    /// been entered.
    pub(crate) fn resolve_fragment(&self, url: &Url) -> Result<(Value, Url), ValidationError> {
        let mut seen = HashSet::new();
        let mut target = url.clone();
        loop {
            // A reference chain that revisits a URL can never terminate.
            if !seen.insert(target.to_string()) {
                return Err(ValidationError::unresolvable_ref(target.to_string()));
            }
            let mut base = target.clone();
            base.set_fragment(None);
            let node = if base.as_str() == DEFAULT_ROOT_URL {
                self.lookup(self.root_schema, &target)?
            } else {
                let document = self.load_document(&base)?;
                self.lookup(&document, &target)?
            };
            if let Some(reference) = node.get("$ref").and_then(Value::as_str) {
                // `$ref` overrides its siblings; follow the chain here so
                // the compiled target is always a plain schema.
                target = Url::options()
                    .base_url(Some(&base))
                    .parse(reference)
                    .map_err(|_| ValidationError::unresolvable_ref(reference.to_string()))?;
                continue;
            }
            return Ok((node, base));
        }
    }

    fn lookup(&self, document: &Value, url: &Url) -> Result<Value, ValidationError> {
        match url.fragment() {
            None | Some("") => Ok(document.clone()),
            Some(fragment) => pointer(document, fragment)
                .cloned()
                .ok_or_else(|| ValidationError::unresolvable_ref(url.to_string())),
        }
    }

    fn load_document(&self, base: &Url) -> Result<Arc<Value>, ValidationError> {
        if let Some(document) = self.store.read().get(base.as_str()) {
            return Ok(document.clone());
        }
        let fetched = self
            .external
            .resolve(base)
            .ok_or_else(|| ValidationError::unresolvable_ref(base.to_string()))?;
        let document = Arc::new(fetched);
        self.store
            .write()
            .insert(base.to_string(), document.clone());
        Ok(document)
    }
}

fn parse_index(s: &str) -> Option<usize> {
    if s.starts_with('+') || (s.starts_with('0') && s.len() != 1) {
        return None;
    }
    s.parse().ok()
}

/// Walk `document` by a JSON Pointer fragment. Each segment is `~1`/`~0`
/// decoded, then percent-decoded; all-digit segments index arrays.
fn pointer<'v>(document: &'v Value, fragment: &str) -> Option<&'v Value> {
    if fragment.is_empty() {
        return Some(document);
    }
    if !fragment.starts_with('/') {
        return None;
    }
    let mut target = document;
    for token in fragment.split('/').skip(1) {
        let token = token.replace("~1", "/").replace("~0", "~");
        let token = percent_decode_str(&token).decode_utf8().ok()?;
        target = match target {
            Value::Object(map) => map.get(token.as_ref())?,
            Value::Array(list) => parse_index(&token).and_then(|index| list.get(index))?,
            _ => return None,
        };
    }
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("", Some(json!({"a": {"b~/c": [10, 20]}})))]
    #[test_case("/a", Some(json!({"b~/c": [10, 20]})))]
    #[test_case("/a/b~0~1c", Some(json!([10, 20])))]
    #[test_case("/a/b~0~1c/1", Some(json!(20)))]
    #[test_case("/a/b~0~1c/01", None)]
    #[test_case("/missing", None)]
    #[test_case("a", None)]
    fn pointer_walk(fragment: &str, expected: Option<Value>) {
        let document = json!({"a": {"b~/c": [10, 20]}});
        assert_eq!(pointer(&document, fragment).cloned(), expected)
    }

    #[test]
    fn percent_decoded_segment() {
        let document = json!({"foo bar": 1});
        assert_eq!(pointer(&document, "/foo%20bar"), Some(&json!(1)))
    }

    #[test]
    fn ref_chain_cycle() {
        let document = json!({
            "a": {"$ref": "#/b"},
            "b": {"$ref": "#/a"},
            "$ref": "#/a"
        });
        let resolver = Resolver::new(&document, Box::new(DefaultResolver));
        let url = Url::parse("json-schema:///#/a").unwrap();
        let error = resolver.resolve_fragment(&url).unwrap_err();
        assert!(error.is_resolution_failure());
    }

    #[test]
    fn chain_is_followed_transparently() {
        let document = json!({
            "a": {"$ref": "#/b"},
            "b": {"type": "integer"}
        });
        let resolver = Resolver::new(&document, Box::new(DefaultResolver));
        let url = Url::parse("json-schema:///#/a").unwrap();
        let (resolved, scope) = resolver.resolve_fragment(&url).unwrap();
        assert_eq!(resolved, json!({"type": "integer"}));
        assert_eq!(scope.as_str(), DEFAULT_ROOT_URL);
    }
}
