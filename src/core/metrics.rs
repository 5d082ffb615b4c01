use crate::domain::model::{EnrichedPlayer, PlayerStats};

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn safe_ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Rounds to `decimals` places, exact halves going to the even digit.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round_ties_even() / factor;
    // avoid "-0.0" in the CSV
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn enrich(stats: PlayerStats, last_update: &str) -> EnrichedPlayer {
    EnrichedPlayer {
        pts_per_game: round_to(safe_ratio(stats.points, stats.games_played), 2),
        shooting_pct: round_to(safe_ratio(stats.goals, stats.shots) * 100.0, 1),
        goal_contribution_pct: round_to(safe_ratio(stats.goals, stats.points) * 100.0, 1),
        assists_per_game: round_to(safe_ratio(stats.assists, stats.games_played), 2),
        shots_per_game: round_to(safe_ratio(stats.shots, stats.games_played), 2),
        last_update: last_update.to_string(),
        player: stats.player,
        team: stats.team,
        position: stats.position,
        games_played: stats.games_played,
        points: stats.points,
        goals: stats.goals,
        assists: stats.assists,
        plus_minus: stats.plus_minus,
        pim: stats.pim,
        gwg: stats.gwg,
        ppg: stats.ppg,
        shg: stats.shg,
    }
}

/// Enriches every row with one shared timestamp and orders by points, highest first.
/// Ties keep their input order.
pub fn build_leaderboard(data: Vec<PlayerStats>, last_update: &str) -> Vec<EnrichedPlayer> {
    let mut rows: Vec<EnrichedPlayer> = data
        .into_iter()
        .map(|stats| enrich(stats, last_update))
        .collect();
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(player: &str, team: &str, gp: i64, goals: i64, assists: i64, shots: i64) -> PlayerStats {
        PlayerStats {
            team: team.to_string(),
            player: player.to_string(),
            position: "C".to_string(),
            games_played: gp,
            goals,
            assists,
            points: goals + assists,
            shots,
            plus_minus: 0,
            pim: 0,
            gwg: 0,
            ppg: 0,
            shg: 0,
        }
    }

    #[test]
    fn test_enrich_computes_rounded_rates() {
        let row = enrich(stats("Auston Matthews", "TOR", 3, 2, 1, 7), "2025-01-01 12:00:00");

        assert_eq!(row.pts_per_game, 1.0);
        assert_eq!(row.shooting_pct, 28.6); // 2/7 = 28.571..
        assert_eq!(row.goal_contribution_pct, 66.7);
        assert_eq!(row.assists_per_game, 0.33);
        assert_eq!(row.shots_per_game, 2.33);
        assert_eq!(row.last_update, "2025-01-01 12:00:00");
    }

    #[test]
    fn test_zero_denominators_yield_zero() {
        let row = enrich(stats("Call Up", "SJS", 0, 0, 0, 0), "now");

        assert_eq!(row.pts_per_game, 0.0);
        assert_eq!(row.shooting_pct, 0.0);
        assert_eq!(row.goal_contribution_pct, 0.0);
        assert_eq!(row.assists_per_game, 0.0);
        assert_eq!(row.shots_per_game, 0.0);
    }

    #[test]
    fn test_points_without_games_is_not_infinite() {
        let row = enrich(stats("Odd Row", "SEA", 0, 1, 1, 2), "now");
        assert_eq!(row.pts_per_game, 0.0);
        assert_eq!(row.shooting_pct, 50.0);
    }

    #[test]
    fn test_round_to_half_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(6.25, 1), 6.2);
        assert_eq!(round_to(-0.04, 1), 0.0);
        assert!(round_to(-0.04, 1).is_sign_positive());
    }

    #[test]
    fn test_enrich_exact_halves_round_to_even() {
        let mut line = stats("Depth Forward", "NSH", 8, 1, 0, 16);
        line.points = 1;
        let row = enrich(line, "ts");

        assert_eq!(row.pts_per_game, 0.12); // 1/8 = 0.125
        assert_eq!(row.shooting_pct, 6.2); // 1/16 = 6.25%
        assert_eq!(row.shots_per_game, 2.0);
    }

    #[test]
    fn test_leaderboard_sorted_by_points_stable() {
        let rows = build_leaderboard(
            vec![
                stats("A", "BOS", 10, 1, 1, 10),
                stats("B", "BUF", 10, 5, 5, 10),
                stats("C", "CGY", 10, 2, 0, 10),
            ],
            "ts",
        );

        let order: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert!(rows.iter().all(|r| r.last_update == "ts"));
    }
}
