//! Wire types returned by the GitHub REST API.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub public_repos: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub stargazers_count: u32,
    pub fork: bool,
    pub owner: RepositoryOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contributor {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTotal {
    pub total_count: u64,
}
