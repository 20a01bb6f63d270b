use crate::config::{Config, Credentials};
use crate::models::table::StatsTable;
use crate::models::traffic::{MetricKind, RepoRef, Sample, TrafficResponse, series_key};
use crate::utils::endpoints::render_endpoint;
use anyhow::{Context, Result, anyhow};
use futures::future::join_all;
use log::{debug, error, info};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("traffic-stats"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            credentials: config.credentials.clone(),
        })
    }

    pub fn traffic_url(&self, metric: MetricKind, repo: &RepoRef) -> String {
        format!(
            "{}{}",
            self.base_url,
            render_endpoint(metric.endpoint_template(), repo)
        )
    }

    /// Daily samples for one repository, in the order the API lists them.
    pub async fn get_traffic(&self, metric: MetricKind, repo: &RepoRef) -> Result<Vec<Sample>> {
        let url = self.traffic_url(metric, repo);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            debug!("GitHub API error body: {}", error_text);
            return Err(anyhow!("GitHub API error: {}", status));
        }

        let traffic: TrafficResponse = response
            .json()
            .await
            .context("Failed to parse GitHub traffic response")?;

        let entries = traffic
            .into_entries(metric)
            .ok_or_else(|| anyhow!("Response has no `{}` array", metric))?;

        Ok(entries.iter().map(Sample::from).collect())
    }

    /// Fetches every (metric, repository) pair concurrently. Failed pairs are
    /// logged and left out of the table.
    pub async fn fetch_all_traffic(&self, repos: &[RepoRef], metrics: &[MetricKind]) -> StatsTable {
        let requests = metrics.iter().flat_map(move |&metric| {
            repos.iter().map(move |repo| async move {
                (series_key(repo, metric), self.get_traffic(metric, repo).await)
            })
        });

        let outcomes = join_all(requests).await;

        let mut stats = StatsTable::new();
        for (key, outcome) in outcomes {
            match outcome {
                Ok(samples) => {
                    debug!("{}: {} samples", key, samples.len());
                    stats.insert(key, samples);
                }
                Err(e) => error!("Fetch error for {}: {:#}", key, e),
            }
        }

        info!(
            "Fetched {} of {} traffic series",
            stats.len(),
            repos.len() * metrics.len()
        );
        stats
    }
}
