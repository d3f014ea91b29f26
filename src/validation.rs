pub fn non_blank_team(team: &str) -> Result<(), String> {
    match team.trim().is_empty() {
        false => Ok(()),
        true => Err("team name must not be empty".to_string()),
    }
}

pub fn finite_score(score: f64) -> Result<(), String> {
    match score.is_finite() {
        true => Ok(()),
        false => Err(format!("score must be a finite number, got {score}")),
    }
}

#[cfg(test)]
#[test]
fn test_validation() {
    assert!(non_blank_team("Alpha Consultants").is_ok());
    assert!(non_blank_team("   ").is_err());
    assert!(finite_score(72.5).is_ok());
    assert!(finite_score(f64::NAN).is_err());
    assert!(finite_score(f64::INFINITY).is_err());
}
