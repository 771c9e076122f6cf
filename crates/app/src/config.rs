use supportwiki_core::issue;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against an
/// entity service on localhost. Override via environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the entity service (default: `http://localhost:3000`).
    pub api_url: String,
    /// Bearer token attached to every request when set.
    pub api_token: Option<String>,
    /// Page size for collection listings (default: `1000`).
    pub list_limit: i64,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `SUPPORTWIKI_API_URL`    | `http://localhost:3000` |
    /// | `SUPPORTWIKI_API_TOKEN`  | unset (unauthenticated) |
    /// | `SUPPORTWIKI_LIST_LIMIT` | `1000`                  |
    pub fn from_env() -> Self {
        let api_url = std::env::var("SUPPORTWIKI_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());

        let api_token = std::env::var("SUPPORTWIKI_API_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        let list_limit = match std::env::var("SUPPORTWIKI_LIST_LIMIT") {
            Ok(raw) => raw
                .parse()
                .expect("SUPPORTWIKI_LIST_LIMIT must be a valid i64"),
            Err(_) => issue::LIST_LIMIT,
        };

        Self {
            api_url,
            api_token,
            list_limit,
        }
    }
}

impl Default for AppConfig {
    /// The local-development defaults, without consulting the environment.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".into(),
            api_token: None,
            list_limit: issue::LIST_LIMIT,
        }
    }
}
