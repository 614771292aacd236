use crate::types::EndpointSpec;
use tracing::{debug, warn};

/// Strips scheme and port from a URL, leaving the host. Multiple
/// endpoints may map to the same domain; that is the aggregation key.
///
/// Malformed input degrades to a best-effort substring rather than
/// failing.
pub fn extract_domain(url: &str) -> &str {
    let rest = url.split_once("//").map_or(url, |(_, rest)| rest);
    let host = rest.split('/').next().unwrap_or(rest);
    host.split(':').next().unwrap_or(host)
}

/// Drops endpoints missing a name or url, preserving the order of the
/// survivors. An empty result is acceptable degraded behavior: the
/// monitor simply has nothing to probe.
pub fn validate_endpoints(specs: Vec<EndpointSpec>) -> Vec<EndpointSpec> {
    let configured = specs.len();

    let valid: Vec<EndpointSpec> = specs
        .into_iter()
        .filter(|spec| {
            if spec.url.is_empty() || spec.name.is_empty() {
                warn!(
                    name = %spec.name,
                    url = %spec.url,
                    "validation failed: endpoint missing name or url, skipping"
                );
                false
            } else {
                debug!(name = %spec.name, url = %spec.url, "validation passed");
                true
            }
        })
        .collect();

    debug!(configured, valid = valid.len(), "endpoint validation done");
    valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, url: &str) -> EndpointSpec {
        EndpointSpec {
            name: name.to_string(),
            url: url.to_string(),
            method: String::new(),
            headers: Default::default(),
            body: String::new(),
        }
    }

    #[test]
    fn extract_domain_strips_scheme_and_port() {
        assert_eq!(extract_domain("https://api.example.com:8443/v1"), "api.example.com");
        assert_eq!(extract_domain("http://api.example.com/v1"), "api.example.com");
        assert_eq!(extract_domain("https://example.com"), "example.com");
        assert_eq!(extract_domain("http://localhost:8080"), "localhost");
    }

    #[test]
    fn extract_domain_is_idempotent() {
        let once = extract_domain("https://api.example.com:8443/v1/health");
        assert_eq!(extract_domain(once), once);
    }

    #[test]
    fn extract_domain_degrades_on_malformed_input() {
        assert_eq!(extract_domain("not a url"), "not a url");
        assert_eq!(extract_domain(""), "");
        assert_eq!(extract_domain("example.com/path"), "example.com");
    }

    #[test]
    fn validator_drops_entries_missing_fields() {
        let specs = vec![
            spec("first", "https://one.example.com"),
            spec("second", ""),
            spec("third", "https://three.example.com"),
        ];

        let valid = validate_endpoints(specs);

        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].name, "first");
        assert_eq!(valid[1].name, "third");
    }

    #[test]
    fn validator_drops_unnamed_entries() {
        let specs = vec![spec("", "https://one.example.com")];
        assert!(validate_endpoints(specs).is_empty());
    }

    #[test]
    fn validator_accepts_empty_input() {
        assert!(validate_endpoints(Vec::new()).is_empty());
    }
}
