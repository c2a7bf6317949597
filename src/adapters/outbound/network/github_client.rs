use crate::dependency_graph::domain::Identifier;
use crate::ports::outbound::{FetchedManifest, ManifestRepository};
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_FALLBACK_BRANCHES: [&str; 2] = ["main", "master"];

const MANIFEST_PATH: &str = "Package.swift";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    #[serde(default)]
    default_branch: Option<String>,
}

/// Result of one lookup attempt, before retries
enum Lookup {
    Found(Vec<u8>, String),
    Missing,
}

/// GitHubManifestRepository adapter fetching `Package.swift` through the GitHub REST API
///
/// Each request takes the next token from the configured list (round-robin),
/// spreading the rate limit over several accounts. With no tokens the
/// requests are anonymous.
///
/// The branch tried first is the repository's default branch, followed by
/// the fallback branches in order, skipping repeats.
pub struct GitHubManifestRepository {
    client: reqwest::Client,
    api_base_url: String,
    tokens: Vec<String>,
    next_token: AtomicUsize,
    fallback_branches: Vec<String>,
    max_retries: u32,
    retry_backoff: Duration,
}

impl GitHubManifestRepository {
    pub fn new(tokens: Vec<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("spm-depgraph/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            tokens,
            next_token: AtomicUsize::new(0),
            fallback_branches: DEFAULT_FALLBACK_BRANCHES
                .iter()
                .map(|b| b.to_string())
                .collect(),
            max_retries: 3,
            retry_backoff: Duration::from_millis(500),
        })
    }

    /// Points the client at another API root (GitHub Enterprise, test servers)
    pub fn with_api_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid API base URL '{}': {}", base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("API base URL must use http or https: {}", base_url);
        }
        self.api_base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_fallback_branches(mut self, branches: Vec<String>) -> Self {
        self.fallback_branches = branches;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Collects the non-empty values of the given environment variables, in order
    pub fn tokens_from_env(variables: &[String]) -> Vec<String> {
        variables
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    fn next_token(&self) -> Option<&str> {
        if self.tokens.is_empty() {
            return None;
        }
        let index = self.next_token.fetch_add(1, Ordering::Relaxed) % self.tokens.len();
        Some(self.tokens[index].as_str())
    }

    /// Default branch first, then the fallbacks, without repeats
    fn branch_candidates(&self, default_branch: Option<String>) -> Vec<String> {
        let mut branches: Vec<String> = default_branch.into_iter().collect();
        for branch in &self.fallback_branches {
            if !branches.contains(branch) {
                branches.push(branch.clone());
            }
        }
        branches
    }

    /// Rejects owner/name values that could alter the request path
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "Security: {} contains path separators which are not allowed",
                component_type
            );
        }
        if component == "." || component == ".." {
            anyhow::bail!("Security: {} must not be a relative path segment", component_type);
        }
        if component.contains('#') || component.contains('?') || component.contains('@') {
            anyhow::bail!("Security: {} contains URL-unsafe characters", component_type);
        }
        Ok(())
    }

    fn repository_url(&self, identifier: &Identifier) -> Result<String> {
        Self::validate_url_component(identifier.owner(), "Repository owner")?;
        Self::validate_url_component(identifier.name(), "Repository name")?;

        Ok(format!(
            "{}/repos/{}/{}",
            self.api_base_url,
            urlencoding::encode(identifier.owner()),
            urlencoding::encode(identifier.name())
        ))
    }

    fn get(&self, url: &str, media_type: &str) -> reqwest::RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, media_type)
            .header("X-GitHub-Api-Version", "2022-11-28");
        match self.next_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Default branch of the repository, `Ok(None)` when the repository does not exist
    async fn fetch_default_branch(&self, repository_url: &str) -> Result<Option<Option<String>>> {
        let response = self.get(repository_url, JSON_MEDIA_TYPE).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let info: RepositoryInfo = response.json().await?;
                Ok(Some(info.default_branch))
            }
            status => anyhow::bail!("GitHub API returned status code {}", status),
        }
    }

    async fn lookup(&self, identifier: &Identifier) -> Result<Lookup> {
        let repository_url = self.repository_url(identifier)?;

        let Some(default_branch) = self.fetch_default_branch(&repository_url).await? else {
            return Ok(Lookup::Missing);
        };

        for branch in self.branch_candidates(default_branch) {
            let url = format!(
                "{}/contents/{}?ref={}",
                repository_url,
                MANIFEST_PATH,
                urlencoding::encode(&branch)
            );
            let response = self.get(&url, RAW_MEDIA_TYPE).send().await?;

            match response.status() {
                StatusCode::NOT_FOUND => {
                    tracing::debug!(identifier = %identifier, branch = %branch, "no manifest on branch");
                }
                status if status.is_success() => {
                    let content = response.bytes().await?;
                    return Ok(Lookup::Found(content.to_vec(), branch));
                }
                status => anyhow::bail!("GitHub API returned status code {}", status),
            }
        }

        Ok(Lookup::Missing)
    }

    /// Retries transient failures with a linear backoff
    async fn fetch_with_retry(&self, identifier: &Identifier) -> Result<Lookup> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.lookup(identifier).await {
                Ok(lookup) => return Ok(lookup),
                Err(e) => {
                    tracing::debug!(identifier = %identifier, attempt, error = %e, "manifest fetch failed");
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(self.retry_backoff * attempt).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no fetch attempt was made")))
    }
}

#[async_trait]
impl ManifestRepository for GitHubManifestRepository {
    async fn fetch_manifest(&self, identifier: &Identifier) -> Result<FetchedManifest> {
        Ok(match self.fetch_with_retry(identifier).await? {
            Lookup::Found(content, branch) => FetchedManifest::Found {
                content,
                branch: Some(branch),
            },
            Lookup::Missing => FetchedManifest::NotFound,
        })
    }
}
