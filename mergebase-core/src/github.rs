use async_trait::async_trait;
use graph::CommitNode;
use serde::Deserialize;
use tracing::debug;

use crate::error::FinderError;
use crate::fetcher::{HistoryFetcher, HistoryPage};

const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";
/// Commits requested per history page
const PAGE_SIZE: u32 = 100;
/// Parents requested per commit; octopus merges beyond this are not walked
const PARENT_LIMIT: u32 = 10;

/// Repository coordinates and credential for the GitHub GraphQL API
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Repository namespace (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Bearer token; `None` works for public repositories but is heavily
    /// rate limited
    pub token: Option<String>,
}

/// [`HistoryFetcher`] backed by the GitHub GraphQL v4 API
pub struct GithubFetcher {
    client: reqwest::Client,
    endpoint: String,
    config: GithubConfig,
}

impl GithubFetcher {
    pub fn new(config: GithubConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: GITHUB_GRAPHQL_URL.to_string(),
            config,
        }
    }

    fn history_query(&self, branch: &str, cursor: Option<&str>) -> String {
        let after = cursor
            .map(|c| format!(", after: \"{}\"", c))
            .unwrap_or_default();
        format!(
            "query {{ repository(owner: \"{}\", name: \"{}\") {{ \
             ref(qualifiedName: \"{}\") {{ target {{ ... on Commit {{ \
             history(first: {}{}) {{ \
             pageInfo {{ hasNextPage endCursor }} \
             edges {{ node {{ oid parents(first: {}) {{ edges {{ node {{ oid }} }} }} }} }} \
             }} }} }} }} }} }}",
            self.config.owner, self.config.repo, branch, PAGE_SIZE, after, PARENT_LIMIT
        )
    }
}

#[async_trait]
impl HistoryFetcher for GithubFetcher {
    async fn fetch_page(
        &self,
        branch: &str,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, FinderError> {
        let query = self.history_query(branch, cursor);
        let body = serde_json::json!({ "query": query });

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("User-Agent", "mergebase")
            .json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        debug!(branch, cursor, "requesting history page");
        let response = request
            .send()
            .await
            .map_err(|e| FinderError::RemoteUnavailable(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FinderError::RemoteUnavailable(e.to_string()))?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FinderError::Unauthorized(format!(
                "GitHub rejected the credential ({})",
                status
            )));
        }
        if !status.is_success() {
            return Err(FinderError::RemoteUnavailable(format!(
                "GitHub returned {}: {}",
                status, text
            )));
        }

        parse_page(branch, &text)
    }
}

// Strict schema for the slice of the GraphQL response the query selects.
// Nullable levels stay Option so a missing field maps to a typed error at
// this boundary instead of leaking into the core logic.

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
}

#[derive(Deserialize)]
struct ResponseData {
    repository: Option<Repository>,
}

#[derive(Deserialize)]
struct Repository {
    #[serde(rename = "ref")]
    git_ref: Option<Ref>,
}

#[derive(Deserialize)]
struct Ref {
    target: Option<Target>,
}

#[derive(Deserialize)]
struct Target {
    history: Option<History>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct History {
    page_info: PageInfo,
    edges: Option<Vec<HistoryEdge>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Deserialize)]
struct HistoryEdge {
    node: HistoryNode,
}

#[derive(Deserialize)]
struct HistoryNode {
    oid: String,
    parents: Option<ParentConnection>,
}

#[derive(Deserialize)]
struct ParentConnection {
    edges: Option<Vec<ParentEdge>>,
}

#[derive(Deserialize)]
struct ParentEdge {
    node: ParentNode,
}

#[derive(Deserialize)]
struct ParentNode {
    oid: String,
}

fn parse_page(branch: &str, body: &str) -> Result<HistoryPage, FinderError> {
    let response: GraphQlResponse = serde_json::from_str(body)
        .map_err(|e| FinderError::RemoteUnavailable(format!("unparseable response body: {}", e)))?;

    let data = response
        .data
        .ok_or_else(|| FinderError::MalformedPage("no data in response".into()))?;
    let repository = data.repository.ok_or_else(|| {
        FinderError::RemoteUnavailable("repository not found, check owner and name".into())
    })?;
    let git_ref = repository
        .git_ref
        .ok_or_else(|| FinderError::BranchNotFound(branch.to_string()))?;
    let target = git_ref
        .target
        .ok_or_else(|| FinderError::MalformedPage("no target in ref".into()))?;
    let history = target
        .history
        .ok_or_else(|| FinderError::MalformedPage("no history in target".into()))?;

    let commits = history
        .edges
        .unwrap_or_default()
        .into_iter()
        .map(|edge| {
            let parents = edge
                .node
                .parents
                .and_then(|p| p.edges)
                .unwrap_or_default()
                .into_iter()
                .map(|p| p.node.oid)
                .collect();
            CommitNode::new(edge.node.oid, parents)
        })
        .collect::<Vec<_>>();

    let has_more = history.page_info.has_next_page;
    let end_cursor = history.page_info.end_cursor;
    if has_more && end_cursor.is_none() {
        return Err(FinderError::MalformedPage(
            "hasNextPage set but endCursor missing".into(),
        ));
    }

    Ok(HistoryPage {
        commits,
        has_more,
        end_cursor,
    })
}
