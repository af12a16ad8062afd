use crate::error::{Result, ScanError};
use tracing::debug;
use url::{Position, Url};

/// Resolves references against the seed URL and keeps the crawl on the
/// seed's host.
#[derive(Debug, Clone)]
pub struct UrlScope {
    base: Url,
    base_has_empty_path: bool,
    seed: String,
}

impl UrlScope {
    pub fn new(seed: &str) -> Result<Self> {
        let seed = seed.trim();
        let base = Url::parse(seed)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", seed, e)))?;

        if base.host_str().is_none() {
            return Err(ScanError::InvalidUrl(format!("{}: missing host", seed)));
        }

        let base_has_empty_path = path_emptiness(seed).unwrap_or(true);
        let mut scope = Self {
            base,
            base_has_empty_path,
            seed: String::new(),
        };
        scope.seed = scope
            .resolve(seed)
            .ok_or_else(|| ScanError::InvalidUrl(seed.to_string()))?;

        Ok(scope)
    }

    /// The normalized seed URL.
    pub fn base_url(&self) -> &str {
        &self.seed
    }

    pub fn host(&self) -> &str {
        self.base.host_str().unwrap_or_default()
    }

    /// Resolve `reference` into an absolute in-scope URL.
    ///
    /// Returns `None` when the reference cannot be parsed or when its final
    /// host (explicit or inherited) differs from the seed's host.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();

        let mut resolved = match self.base.join(reference) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping unparseable reference {:?}: {}", reference, e);
                return None;
            }
        };

        if resolved.host_str() != self.base.host_str() || resolved.port() != self.base.port() {
            debug!("Skipping out-of-scope reference {}", resolved);
            return None;
        }

        resolved.set_fragment(None);

        let empty_path = path_emptiness(reference).unwrap_or(self.base_has_empty_path);
        if empty_path && resolved.path() == "/" {
            // Keep `https://host` as written instead of `https://host/`
            return Some(format!(
                "{}{}",
                &resolved[..Position::BeforePath],
                &resolved[Position::AfterPath..]
            ));
        }

        Some(resolved.to_string())
    }
}

/// Whether the path component of `reference` is empty.
///
/// `Some(true)` for `scheme://host` or `//host` forms, `Some(false)` when a
/// path is present, `None` for a relative reference without a path (such as
/// `?page=2`), which inherits the base path.
fn path_emptiness(reference: &str) -> Option<bool> {
    let head = reference.split('#').next().unwrap_or_default();
    let head = head.split('?').next().unwrap_or_default();

    if let Some(authority_and_path) = head.strip_prefix("//") {
        return Some(!authority_and_path.contains('/'));
    }

    if let Some(rest) = strip_scheme(head) {
        return match rest.strip_prefix("//") {
            Some(authority_and_path) => Some(!authority_and_path.contains('/')),
            None => Some(rest.is_empty()),
        };
    }

    if head.is_empty() { None } else { Some(false) }
}

fn strip_scheme(reference: &str) -> Option<&str> {
    let colon = reference.find(':')?;
    let scheme = &reference[..colon];

    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid = starts_alpha && chars.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));

    valid.then(|| &reference[colon + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> UrlScope {
        UrlScope::new("https://foo.com").unwrap()
    }

    #[test]
    fn test_relative_paths_resolve_to_full_url() {
        assert_eq!(scope().resolve("/home").as_deref(), Some("https://foo.com/home"));
        assert_eq!(scope().resolve("/").as_deref(), Some("https://foo.com/"));
        assert_eq!(scope().resolve("/x").as_deref(), Some("https://foo.com/x"));
    }

    #[test]
    fn test_mismatched_hosts_are_out_of_scope() {
        let scope = scope();
        assert_eq!(scope.resolve("//bar.com"), None);
        assert_eq!(scope.resolve("http://bar.com"), None);
        assert_eq!(scope.resolve("https://bar.com"), None);
        assert_eq!(scope.resolve("//bar.com/test"), None);
    }

    #[test]
    fn test_mismatched_schemes_are_ignored() {
        let scope = scope();
        assert_eq!(scope.resolve("http://foo.com").as_deref(), Some("http://foo.com"));
        assert_eq!(scope.resolve("//foo.com").as_deref(), Some("https://foo.com"));
    }

    #[test]
    fn test_paths_are_preserved() {
        let scope = scope();
        assert_eq!(
            scope.resolve("/follow/me").as_deref(),
            Some("https://foo.com/follow/me")
        );
        assert_eq!(
            scope.resolve("https://foo.com/follow/me").as_deref(),
            Some("https://foo.com/follow/me")
        );
    }

    #[test]
    fn test_query_strings_are_preserved() {
        let scope = scope();
        assert_eq!(
            scope.resolve("/?page=2").as_deref(),
            Some("https://foo.com/?page=2")
        );
        assert_eq!(
            scope.resolve("https://foo.com/?page=2").as_deref(),
            Some("https://foo.com/?page=2")
        );
        assert_eq!(
            scope.resolve("//foo.com?page=2").as_deref(),
            Some("https://foo.com?page=2")
        );
    }

    #[test]
    fn test_fragments_are_dropped() {
        assert_eq!(
            scope().resolve("/docs#install").as_deref(),
            Some("https://foo.com/docs")
        );
    }

    #[test]
    fn test_non_hierarchical_schemes_are_out_of_scope() {
        let scope = scope();
        assert_eq!(scope.resolve("mailto:someone@foo.com"), None);
        assert_eq!(scope.resolve("javascript:void(0)"), None);
    }

    #[test]
    fn test_unparseable_reference_is_out_of_scope() {
        assert_eq!(scope().resolve("http://[::1"), None);
    }

    #[test]
    fn test_port_must_match() {
        let scope = UrlScope::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            scope.resolve("/page").as_deref(),
            Some("http://127.0.0.1:8080/page")
        );
        assert_eq!(scope.resolve("http://127.0.0.1:9090/page"), None);
    }

    #[test]
    fn test_relative_to_seed_path() {
        let scope = UrlScope::new("https://foo.com/blog/").unwrap();
        assert_eq!(
            scope.resolve("post.html").as_deref(),
            Some("https://foo.com/blog/post.html")
        );
    }

    #[test]
    fn test_base_url_keeps_seed_shape() {
        assert_eq!(scope().base_url(), "https://foo.com");
        assert_eq!(
            UrlScope::new("https://foo.com/").unwrap().base_url(),
            "https://foo.com/"
        );
        assert_eq!(scope().host(), "foo.com");
    }

    #[test]
    fn test_invalid_seed() {
        assert!(matches!(
            UrlScope::new("not a url"),
            Err(ScanError::InvalidUrl(_))
        ));
        assert!(matches!(
            UrlScope::new("mailto:someone@foo.com"),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_path_emptiness() {
        assert_eq!(path_emptiness("https://foo.com"), Some(true));
        assert_eq!(path_emptiness("//foo.com?x=1"), Some(true));
        assert_eq!(path_emptiness("https://foo.com/"), Some(false));
        assert_eq!(path_emptiness("/"), Some(false));
        assert_eq!(path_emptiness("page.html"), Some(false));
        assert_eq!(path_emptiness("?page=2"), None);
        assert_eq!(path_emptiness(""), None);
    }
}
