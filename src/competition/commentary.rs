//! The short styled remark shown next to a team's rank on the board.

/// Produces the remark attached to a score-setting submission.
pub trait CommentaryGenerator {
    fn generate_commentary(&self, score: f64, text: &str, team: &str) -> String;
}

/// Templated remark keyed by score bracket, used whenever the generator
/// fails. Keeps the comment column populated without another upstream call.
pub fn fallback_commentary(score: f64, team: &str) -> String {
    if score >= 95.0 {
        format!(
            "GREAT work {team}! {score:.0} points - now THAT is a business \
             case worth funding!"
        )
    } else if score >= 80.0 {
        format!(
            "Not bad, {team}. {score:.0} points puts you in the hunt, but \
             the podium wants more."
        )
    } else if score >= 60.0 {
        format!(
            "{team} posted {score:.0} points. Sharpen the pitch and come \
             back swinging."
        )
    } else {
        format!(
            "{score:.0} points, {team}? The budget committee has seen \
             napkin sketches with more rigour."
        )
    }
}
