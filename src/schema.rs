diesel::table! {
    leaderboard (team) {
        team -> Text,
        score -> Double,
        last_submission -> Timestamp,
        comment -> Nullable<Text>,
    }
}
