//! Chapter boundary extraction and navigation.
//!
//! A chapter is a run of keyframes that ends with a rewarded frame. Chapter
//! boundaries are the indices of the first frame of each chapter.
//!
//! A reward on the final frame produces a boundary equal to the number of
//! keyframes. That boundary does not index a frame; consumers treat it as
//! "no further playable chapter".

use serde::{Deserialize, Serialize};

use super::types::Keyframe;

/// Derive chapter boundaries from a keyframe sequence.
///
/// - An empty sequence has no chapters.
/// - Otherwise the first boundary is `0`, followed by `i + 1` for every
///   rewarded frame `i`, in order. Boundaries are neither deduplicated nor
///   clamped to the sequence length.
pub fn chapters_from_keyframes(keyframes: &[Keyframe]) -> Vec<usize> {
    if keyframes.is_empty() {
        return Vec::new();
    }

    std::iter::once(0)
        .chain(
            keyframes
                .iter()
                .enumerate()
                .filter(|(_, kf)| kf.reward.is_some())
                .map(|(i, _)| i + 1),
        )
        .collect()
}

/// Navigation over the chapter boundaries of a keyframe sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChapterIndex {
    boundaries: Vec<usize>,
    frame_count: usize,
}

impl ChapterIndex {
    /// Build the index for a keyframe sequence.
    pub fn from_keyframes(keyframes: &[Keyframe]) -> Self {
        Self::new(chapters_from_keyframes(keyframes), keyframes.len())
    }

    /// Wrap already extracted boundaries.
    pub fn new(boundaries: Vec<usize>, frame_count: usize) -> Self {
        Self {
            boundaries,
            frame_count,
        }
    }

    /// All boundaries, including any one past the last frame.
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Number of frames the boundaries refer to.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Number of chapters, counting a trailing one-past-the-end boundary.
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Whether there are no chapters.
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Whether a chapter starts at a real frame.
    pub fn is_playable(&self, chapter: usize) -> bool {
        self.start_of(chapter).is_some()
    }

    /// Boundaries that index a real frame.
    pub fn playable(&self) -> impl Iterator<Item = usize> + '_ {
        let frame_count = self.frame_count;
        self.boundaries.iter().copied().filter(move |&b| b < frame_count)
    }

    /// First frame of a chapter.
    ///
    /// Returns `None` for an unknown chapter or one whose boundary lies past
    /// the last frame.
    pub fn start_of(&self, chapter: usize) -> Option<usize> {
        self.boundaries
            .get(chapter)
            .copied()
            .filter(|&start| start < self.frame_count)
    }

    /// Chapter containing a frame.
    ///
    /// With duplicated boundaries the last chapter starting at or before the
    /// frame wins; the earlier duplicate denotes an empty chapter.
    pub fn chapter_of(&self, frame: usize) -> Option<usize> {
        if frame >= self.frame_count {
            return None;
        }
        // Boundaries are sorted, so the partition point is the first one past `frame`.
        let after = self.boundaries.partition_point(|&b| b <= frame);
        after.checked_sub(1)
    }

    /// First frame of the chapter `offset` chapters away from the one
    /// containing `frame`.
    ///
    /// Returns `None` when the target chapter does not exist or is not
    /// playable.
    pub fn step(&self, frame: usize, offset: isize) -> Option<usize> {
        let current = self.chapter_of(frame)?;
        let target = current.checked_add_signed(offset)?;
        self.start_of(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframes::types::{Action, Reward};

    fn frame(reward: Option<Reward>) -> Keyframe {
        Keyframe {
            cart_x: 0.0,
            cart_dx: 0.0,
            pole_theta: 0.0,
            pole_omega: 0.0,
            action: Action::Left,
            reward,
        }
    }

    fn frames(rewards: &[Option<Reward>]) -> Vec<Keyframe> {
        rewards.iter().copied().map(frame).collect()
    }

    #[test]
    fn empty_sequence_has_no_chapters() {
        assert!(chapters_from_keyframes(&[]).is_empty());
    }

    #[test]
    fn single_unrewarded_frame() {
        assert_eq!(chapters_from_keyframes(&frames(&[None])), vec![0]);
    }

    #[test]
    fn single_rewarded_frame_points_past_the_end() {
        assert_eq!(
            chapters_from_keyframes(&frames(&[Some(Reward::Positive)])),
            vec![0, 1]
        );
    }

    #[test]
    fn boundary_follows_each_reward() {
        let kfs = frames(&[
            None,
            None,
            Some(Reward::Negative),
            None,
            Some(Reward::Positive),
            None,
        ]);
        assert_eq!(chapters_from_keyframes(&kfs), vec![0, 3, 5]);
    }

    #[test]
    fn adjacent_rewards_are_not_deduplicated() {
        let kfs = frames(&[None, Some(Reward::Negative), Some(Reward::Negative)]);
        assert_eq!(chapters_from_keyframes(&kfs), vec![0, 2, 3]);

        let kfs = frames(&[Some(Reward::Negative), None]);
        assert_eq!(chapters_from_keyframes(&kfs), vec![0, 1]);
    }

    #[test]
    fn index_start_of_ignores_past_the_end() {
        let index = ChapterIndex::from_keyframes(&frames(&[None, Some(Reward::Negative)]));
        assert_eq!(index.boundaries(), &[0, 2]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.start_of(0), Some(0));
        assert_eq!(index.start_of(1), None);
        assert_eq!(index.start_of(5), None);
        assert!(index.is_playable(0));
        assert!(!index.is_playable(1));
        assert_eq!(index.playable().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn index_chapter_of() {
        let kfs = frames(&[None, Some(Reward::Negative), None, None, Some(Reward::Positive), None]);
        let index = ChapterIndex::from_keyframes(&kfs);
        assert_eq!(index.boundaries(), &[0, 2, 5]);

        assert_eq!(index.chapter_of(0), Some(0));
        assert_eq!(index.chapter_of(1), Some(0));
        assert_eq!(index.chapter_of(2), Some(1));
        assert_eq!(index.chapter_of(4), Some(1));
        assert_eq!(index.chapter_of(5), Some(2));
        assert_eq!(index.chapter_of(6), None);
    }

    #[test]
    fn index_chapter_of_with_duplicates() {
        let index = ChapterIndex::new(vec![0, 2, 2, 4], 6);
        assert_eq!(index.chapter_of(2), Some(2));
        assert_eq!(index.chapter_of(3), Some(2));
    }

    #[test]
    fn index_step() {
        let kfs = frames(&[None, Some(Reward::Negative), None, None, Some(Reward::Positive), None]);
        let index = ChapterIndex::from_keyframes(&kfs);

        assert_eq!(index.step(0, 1), Some(2));
        assert_eq!(index.step(3, 1), Some(5));
        assert_eq!(index.step(3, -1), Some(0));
        assert_eq!(index.step(3, 0), Some(2));
        assert_eq!(index.step(5, 1), None);
        assert_eq!(index.step(0, -1), None);
    }

    #[test]
    fn index_step_stops_before_past_the_end_chapter() {
        let index = ChapterIndex::from_keyframes(&frames(&[None, Some(Reward::Positive)]));
        assert_eq!(index.step(0, 1), None);
    }

    #[test]
    fn empty_index() {
        let index = ChapterIndex::from_keyframes(&[]);
        assert!(index.is_empty());
        assert_eq!(index.chapter_of(0), None);
        assert_eq!(index.step(0, 1), None);
    }
}
