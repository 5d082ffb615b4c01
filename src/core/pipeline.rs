use crate::core::metrics::build_leaderboard;
use crate::core::{ConfigProvider, Pipeline, PlayerStats, Storage, TransformResult};
use crate::domain::model::{ClubStats, EnrichedPlayer, Leader};
use crate::utils::error::{Result, ScrapeError};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::task::JoinSet;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct NhlPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> NhlPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

pub fn club_stats_url(api_base: &str, team: &str) -> String {
    format!("{}/club-stats/{}/now", api_base.trim_end_matches('/'), team)
}

/// Fetches one team's skaters. A 429 sleeps for the server's `Retry-After`
/// (or `rate_limit_wait`), never longer than `max_wait`, before reporting `RateLimited`.
pub async fn fetch_team(
    client: &Client,
    api_base: &str,
    team: &str,
    rate_limit_wait: Duration,
    max_wait: Duration,
) -> Result<Vec<PlayerStats>> {
    let url = club_stats_url(api_base, team);
    tracing::debug!("Requesting {}", url);

    let response = client.get(&url).send().await?;
    let status = response.status();
    tracing::debug!("{} responded with {}", team, status);

    if status == StatusCode::TOO_MANY_REQUESTS {
        let requested = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(rate_limit_wait);

        let wait = requested.min(max_wait);
        if wait < requested {
            tracing::warn!(
                "{} asked to wait {:?}; capping at {:?}",
                team,
                requested,
                max_wait
            );
        }

        tracing::warn!("Rate limit hit for {}. Waiting {:?}...", team, wait);
        tokio::time::sleep(wait).await;

        return Err(ScrapeError::RateLimited {
            team: team.to_string(),
            retry_after_secs: wait.as_secs(),
        });
    }

    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            team: team.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    let club: ClubStats = serde_json::from_slice(&body)?;

    Ok(club
        .skaters
        .into_iter()
        .map(|line| PlayerStats::from_skater(team, line))
        .collect())
}

pub fn render_csv(rows: &[EnrichedPlayer]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if rows.is_empty() {
        writer.write_record(crate::domain::model::CSV_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScrapeError::ProcessingError {
            message: format!("Failed to flush CSV buffer: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| ScrapeError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

impl<S: Storage, C: ConfigProvider> NhlPipeline<S, C> {
    /// Builds the leaderboard with a caller-supplied `Last_Update` stamp.
    pub fn transform_at(&self, data: Vec<PlayerStats>, last_update: &str) -> Result<TransformResult> {
        let players = build_leaderboard(data, last_update);
        let csv_output = render_csv(&players)?;
        let leader = players.first().map(|p| Leader {
            player: p.player.clone(),
            team: p.team.clone(),
            points: p.points,
        });

        Ok(TransformResult {
            players,
            csv_output,
            leader,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for NhlPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<PlayerStats>> {
        let teams = self.config.teams();
        let batch_size = self.config.concurrent_requests().max(1);
        let rate_limit_wait = self.config.rate_limit_wait();
        let max_wait = self.config.request_timeout().max(rate_limit_wait);
        let mut per_team: Vec<Vec<PlayerStats>> = vec![Vec::new(); teams.len()];

        tracing::info!("Pinging NHL API for {} teams", teams.len());

        for (chunk_index, chunk) in teams.chunks(batch_size).enumerate() {
            let mut set = JoinSet::new();

            for (offset, team) in chunk.iter().enumerate() {
                let index = chunk_index * batch_size + offset;
                let client = self.client.clone();
                let api_base = self.config.api_base().to_string();
                let team = team.clone();

                set.spawn(async move {
                    let result =
                        fetch_team(&client, &api_base, &team, rate_limit_wait, max_wait).await;
                    (index, team, result)
                });
            }

            while let Some(joined) = set.join_next().await {
                let (index, team, result) = joined.map_err(|e| ScrapeError::ProcessingError {
                    message: format!("Fetch task failed: {}", e),
                })?;

                match result {
                    Ok(players) => {
                        if !players.is_empty() {
                            tracing::info!("  -> {}: got {} skaters", team, players.len());
                        }
                        per_team[index] = players;
                    }
                    Err(ScrapeError::RateLimited { .. }) => {
                        // already logged while waiting
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", team, e);
                    }
                }
            }
        }

        Ok(per_team.into_iter().flatten().collect())
    }

    async fn transform(&self, data: Vec<PlayerStats>) -> Result<TransformResult> {
        let last_update = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.transform_at(data, &last_update)
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = format!(
            "{}/{}",
            self.config.output_path().trim_end_matches('/'),
            self.config.output_file()
        );

        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            result.players.len(),
            result.csv_output.len(),
            output_path
        );

        match self
            .storage
            .write_file(self.config.output_file(), result.csv_output.as_bytes())
            .await
        {
            Ok(()) => Ok(output_path),
            Err(ScrapeError::IoError(e)) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Err(ScrapeError::OutputLocked { path: output_path })
            }
            Err(e) => Err(e),
        }
    }
}
