use serde::{Deserialize, Serialize};

/// Body of `GET /club-stats/{TEAM}/now`. Only the skater list is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubStats {
    #[serde(default)]
    pub skaters: Vec<SkaterLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedName {
    pub default: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkaterLine {
    pub first_name: LocalizedName,
    pub last_name: LocalizedName,
    #[serde(default = "unknown_position")]
    pub position_code: String,
    #[serde(default)]
    pub games_played: i64,
    #[serde(default)]
    pub goals: i64,
    #[serde(default)]
    pub assists: i64,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub shots: i64,
    #[serde(default)]
    pub plus_minus: i64,
    #[serde(default)]
    pub penalty_minutes: i64,
    #[serde(default)]
    pub game_winning_goals: i64,
    #[serde(default)]
    pub power_play_goals: i64,
    #[serde(default)]
    pub shorthanded_goals: i64,
}

fn unknown_position() -> String {
    "N/A".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub team: String,
    pub player: String,
    pub position: String,
    pub games_played: i64,
    pub goals: i64,
    pub assists: i64,
    pub points: i64,
    pub shots: i64,
    pub plus_minus: i64,
    pub pim: i64,
    pub gwg: i64,
    pub ppg: i64,
    pub shg: i64,
}

impl PlayerStats {
    pub fn from_skater(team: &str, line: SkaterLine) -> Self {
        Self {
            team: team.to_string(),
            player: format!("{} {}", line.first_name.default, line.last_name.default),
            position: line.position_code,
            games_played: line.games_played,
            goals: line.goals,
            assists: line.assists,
            points: line.points,
            shots: line.shots,
            plus_minus: line.plus_minus,
            pim: line.penalty_minutes,
            gwg: line.game_winning_goals,
            ppg: line.power_play_goals,
            shg: line.shorthanded_goals,
        }
    }
}

/// One leaderboard row. Field order and names are the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPlayer {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "GamesPlayed")]
    pub games_played: i64,
    #[serde(rename = "Points")]
    pub points: i64,
    #[serde(rename = "Goals")]
    pub goals: i64,
    #[serde(rename = "Assists")]
    pub assists: i64,
    #[serde(rename = "Pts_Per_Game")]
    pub pts_per_game: f64,
    #[serde(rename = "Shooting_Pct")]
    pub shooting_pct: f64,
    #[serde(rename = "PlusMinus")]
    pub plus_minus: i64,
    #[serde(rename = "PIM")]
    pub pim: i64,
    #[serde(rename = "GWG")]
    pub gwg: i64,
    #[serde(rename = "PPG")]
    pub ppg: i64,
    #[serde(rename = "SHG")]
    pub shg: i64,
    #[serde(rename = "Goal_Contribution_Pct")]
    pub goal_contribution_pct: f64,
    #[serde(rename = "Assists_Per_Game")]
    pub assists_per_game: f64,
    #[serde(rename = "Shots_Per_Game")]
    pub shots_per_game: f64,
    #[serde(rename = "Last_Update")]
    pub last_update: String,
}

pub const CSV_COLUMNS: [&str; 18] = [
    "Player",
    "Team",
    "Position",
    "GamesPlayed",
    "Points",
    "Goals",
    "Assists",
    "Pts_Per_Game",
    "Shooting_Pct",
    "PlusMinus",
    "PIM",
    "GWG",
    "PPG",
    "SHG",
    "Goal_Contribution_Pct",
    "Assists_Per_Game",
    "Shots_Per_Game",
    "Last_Update",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    pub player: String,
    pub team: String,
    pub points: i64,
}

impl std::fmt::Display for Leader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) - {} pts", self.player, self.team, self.points)
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub players: Vec<EnrichedPlayer>,
    pub csv_output: String,
    pub leader: Option<Leader>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Saved {
        path: String,
        rows: usize,
        leader: Option<Leader>,
    },
    NoData,
}
