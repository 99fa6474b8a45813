//! Parsed episode: keyframes plus their chapter boundaries.

use serde::{Deserialize, Serialize};

use super::chapters::{chapters_from_keyframes, ChapterIndex};
use super::error::ParseResult;
use super::parser::{parse_content_with, parse_lines_with, ParseOptions};
use super::types::{Action, Keyframe, Reward};

/// A fully parsed log.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Episode {
    /// Keyframes in source order; the index is the frame number.
    pub keyframes: Vec<Keyframe>,
    /// Chapter boundaries derived from `keyframes`.
    pub chapters: Vec<usize>,
}

impl Episode {
    /// Build an episode from already validated keyframes.
    pub fn new(keyframes: Vec<Keyframe>) -> Self {
        let chapters = chapters_from_keyframes(&keyframes);
        Self {
            keyframes,
            chapters,
        }
    }

    /// Parse lines, then extract chapters once.
    pub fn from_lines(lines: &[&str], options: &ParseOptions) -> ParseResult<Self> {
        parse_lines_with(lines, options).map(Self::new)
    }

    /// Parse text content, then extract chapters once.
    pub fn from_content(content: &str, options: &ParseOptions) -> ParseResult<Self> {
        parse_content_with(content, options).map(Self::new)
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether the episode has no keyframes.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Chapter navigation for this episode.
    pub fn chapter_index(&self) -> ChapterIndex {
        ChapterIndex::new(self.chapters.clone(), self.keyframes.len())
    }

    /// Tally frames, chapters, rewards and actions.
    pub fn summary(&self) -> EpisodeSummary {
        let mut summary = EpisodeSummary {
            frames: self.keyframes.len(),
            chapters: self.chapters.len(),
            playable_chapters: self.chapter_index().playable().count(),
            ..EpisodeSummary::default()
        };

        for kf in &self.keyframes {
            match kf.action {
                Action::Left => summary.left_actions += 1,
                Action::Right => summary.right_actions += 1,
            }
            match kf.reward {
                Some(Reward::Positive) => summary.positive_rewards += 1,
                Some(Reward::Negative) => summary.negative_rewards += 1,
                None => {}
            }
        }

        summary
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Counts describing an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Number of keyframes.
    pub frames: usize,
    /// Number of chapter boundaries.
    pub chapters: usize,
    /// Chapter boundaries that index a real frame.
    pub playable_chapters: usize,
    /// Frames rewarded with `1`.
    pub positive_rewards: usize,
    /// Frames rewarded with `-1`.
    pub negative_rewards: usize,
    /// Frames where the cart was pushed left.
    pub left_actions: usize,
    /// Frames where the cart was pushed right.
    pub right_actions: usize,
}
