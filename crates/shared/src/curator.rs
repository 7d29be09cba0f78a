use crate::models::Summary;

pub const PREAMBLE: &str = "Welcome to today's Hacker News roundup, where we catch up on \
the stories the community is talking about.\n\n";

/// Joins summaries, in order, into the narration script
pub fn curate(summaries: &[Summary]) -> String {
    let mut script = String::from(PREAMBLE);
    for summary in summaries {
        script.push_str(&summary.text);
        script.push_str("\n\n");
    }
    script
}
