//! Prompt construction for directional compatibility judgments.

use crate::profile::Profile;

/// Separator used between content samples in the prompt.
pub const CONTENT_SEPARATOR: &str = " | ";

/// Builds the oracle prompt. `viewer` is "User A" and is addressed as "You".
///
/// Only the first `max_content_items` content samples of each profile are included.
pub fn build_prompt(viewer: &Profile, candidate: &Profile, max_content_items: usize) -> String {
    format!(
        "Analyze social compatibility between User A and User B.\n\
         User A: {}. Interests: {}. Recent tweets: {}.\n\
         User B: {}. Interests: {}. Recent tweets: {}.\n\
         \n\
         Return JSON: {{\n  \
         \"score\": 0-100,\n  \
         \"reason\": \"Very brief sentence on why they are a good match. Address User A as 'You'. \
         E.g. 'You both love hiking and outdoor adventures!'\"\n\
         }}",
        viewer.summary,
        viewer.interests,
        viewer
            .recent_tweets(max_content_items)
            .join(CONTENT_SEPARATOR),
        candidate.summary,
        candidate.interests,
        candidate
            .recent_tweets(max_content_items)
            .join(CONTENT_SEPARATOR),
    )
}
