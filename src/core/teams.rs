use crate::utils::error::{Result, ScrapeError};

pub const NHL_TEAMS: [&str; 32] = [
    "ANA", "BOS", "BUF", "CGY", "CAR", "CHI", "COL", "CBJ", "DAL", "DET", "EDM", "FLA", "LAK",
    "MIN", "MTL", "NSH", "NJD", "NYI", "NYR", "OTT", "PHI", "PIT", "SJS", "SEA", "STL", "TBL",
    "TOR", "UTA", "VAN", "VGK", "WSH", "WPG",
];

pub fn default_teams() -> Vec<String> {
    NHL_TEAMS.iter().map(|t| t.to_string()).collect()
}

/// Upper-cases and de-duplicates team codes, keeping first occurrence order.
pub fn normalize_teams<S: AsRef<str>>(teams: &[S]) -> Result<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(teams.len());

    for raw in teams {
        let code = raw.as_ref().trim().to_ascii_uppercase();
        if code.len() < 2 || code.len() > 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ScrapeError::InvalidConfigValueError {
                field: "teams".to_string(),
                value: raw.as_ref().to_string(),
                reason: "Team codes are 2-3 ASCII letters, e.g. TOR".to_string(),
            });
        }
        if !normalized.contains(&code) {
            normalized.push(code);
        }
    }

    if normalized.is_empty() {
        return Err(ScrapeError::MissingConfigError {
            field: "teams".to_string(),
        });
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_teams_cover_the_league() {
        let teams = default_teams();
        assert_eq!(teams.len(), 32);
        assert_eq!(normalize_teams(&teams).unwrap(), teams);
    }

    #[test]
    fn test_normalize_uppercases_and_dedups() {
        let teams = normalize_teams(&["tor", " mtl", "TOR", "la"]).unwrap();
        assert_eq!(teams, vec!["TOR", "MTL", "LA"]);
    }

    #[test]
    fn test_normalize_rejects_bad_codes() {
        assert!(normalize_teams(&["B0S"]).is_err());
        assert!(normalize_teams(&["TORONTO"]).is_err());
        assert!(matches!(
            normalize_teams::<&str>(&[]),
            Err(ScrapeError::MissingConfigError { .. })
        ));
    }
}
