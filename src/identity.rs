//! Server root and project key derivation from the user-entered project URL.

use once_cell::sync::Lazy;
use regex::Regex;

static PROJECT_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d*[A-Z][A-Z0-9]*").expect("invalid project key regex"));
const PROJECT_MARKER: &str = "/p/";

/// Server root and project key derived from a project URL such as `https://host/icescrum/p/PROJ1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub base_url: String,
    pub project_key: String,
}

/// Derives the identity from the raw URL, or `None` when either part cannot be found.
///
/// The key is the first match anywhere in the URL, not only after `/p/`.
pub fn derive_identity(raw_url: &str) -> Option<ServerIdentity> {
    let marker = raw_url.find(PROJECT_MARKER).filter(|index| *index > 0)?;
    let project_key = PROJECT_KEY_REGEX.find(raw_url)?.as_str().to_string();
    Some(ServerIdentity {
        base_url: raw_url.get(..marker)?.to_string(),
        project_key,
    })
}
