use std::collections::HashSet;

use crate::config::Config;

/// Paths the auth gate lets through without a session token, plus the page
/// unauthenticated requests are redirected to.
#[derive(Debug, Clone)]
pub struct RouteTable {
    public_paths: HashSet<String>,
    login_path: String,
}

impl RouteTable {
    pub fn new<I, S>(login_path: &str, public_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut paths: HashSet<String> = public_paths.into_iter().map(Into::into).collect();
        // The redirect target must be reachable without a token
        paths.insert(login_path.to_string());

        Self {
            public_paths: paths,
            login_path: login_path.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let defaults = [
            config.login_path.clone(),
            config.register_path.clone(),
            config.graphql_path.clone(),
        ];

        Self::new(
            &config.login_path,
            defaults
                .into_iter()
                .chain(config.extra_public_routes.iter().cloned()),
        )
    }

    /// Exact, case-sensitive path match. `/graphql/` is not `/graphql`.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.contains(path)
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}
