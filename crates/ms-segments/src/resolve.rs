//! Per-user playback action resolution.
//!
//! Precedence is user preference, then the creator's recommendation, then
//! the segment type's default. `Auto` at a level means "no opinion" and
//! falls through to the next one.

use ms_core::{CreatorId, ItemId, SegmentAction, SegmentPreferences, SegmentType};
use ms_db::models::Segment;
use serde::Serialize;

/// Effective action for a segment of `segment_type` whose creator
/// recommended `recommended`, for a user whose preference for that type is
/// `preference`. Never returns `Auto`.
pub fn resolve_action(
    segment_type: SegmentType,
    recommended: SegmentAction,
    preference: SegmentAction,
) -> SegmentAction {
    if !preference.is_auto() {
        return preference;
    }
    if !recommended.is_auto() {
        return recommended;
    }
    segment_type.default_action()
}

/// [`resolve_action`] applied to a stored segment.
pub fn resolve(segment: &Segment, preference: SegmentAction) -> SegmentAction {
    resolve_action(segment.segment_type, segment.action, preference)
}

/// A segment as handed to a player: same timing and key, with the action
/// already resolved for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSegment {
    pub item_id: ItemId,
    pub creator_id: CreatorId,
    pub segment_type: SegmentType,
    pub type_index: u32,
    pub start_secs: f64,
    pub end_secs: f64,
    pub action: SegmentAction,
}

impl ResolvedSegment {
    pub fn new(segment: Segment, prefs: &SegmentPreferences) -> Self {
        let action = resolve(&segment, prefs.for_type(segment.segment_type));
        Self {
            item_id: segment.item_id,
            creator_id: segment.creator_id,
            segment_type: segment.segment_type,
            type_index: segment.type_index,
            start_secs: segment.start_secs,
            end_secs: segment.end_secs,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::SegmentAction::{Auto, Prompt, Skip};
    use ms_core::SegmentType::{Commercial, Intro, Outro, Preview, Recap};

    #[test]
    fn precedence_table() {
        // (type, creator recommendation, user preference) -> expected
        let table = [
            (Commercial, Auto, Auto, Skip),
            (Commercial, Auto, Prompt, Prompt),
            (Commercial, Auto, Skip, Skip),
            (Commercial, Prompt, Auto, Prompt),
            (Intro, Skip, Auto, Skip),
            (Intro, Auto, Auto, Prompt),
            (Intro, Skip, Prompt, Prompt),
            (Outro, Auto, Auto, Prompt),
            (Recap, Auto, Auto, Prompt),
            (Preview, Auto, Auto, Prompt),
            (Preview, Prompt, Skip, Skip),
        ];
        for (t, recommended, preference, expected) in table {
            assert_eq!(
                resolve_action(t, recommended, preference),
                expected,
                "type={t} recommended={recommended} preference={preference}"
            );
        }
    }

    #[test]
    fn user_choice_always_wins() {
        for t in SegmentType::ALL {
            for recommended in SegmentAction::ALL {
                for preference in [Skip, Prompt] {
                    assert_eq!(resolve_action(t, recommended, preference), preference);
                }
            }
        }
    }

    #[test]
    fn never_resolves_to_auto() {
        for t in SegmentType::ALL {
            for recommended in SegmentAction::ALL {
                for preference in SegmentAction::ALL {
                    assert_ne!(resolve_action(t, recommended, preference), Auto);
                }
            }
        }
    }

    #[test]
    fn resolved_segment_uses_preference_for_its_type() {
        let segment = Segment {
            item_id: ItemId::new(),
            creator_id: CreatorId::new(),
            segment_type: Intro,
            type_index: 0,
            start_secs: 0.0,
            end_secs: 30.0,
            action: Auto,
        };
        let prefs = SegmentPreferences::default()
            .with(Intro, Skip)
            .with(Commercial, Prompt);

        let resolved = ResolvedSegment::new(segment.clone(), &prefs);
        assert_eq!(resolved.action, Skip);
        assert_eq!(resolved.item_id, segment.item_id);
        assert_eq!(resolved.end_secs, 30.0);

        let resolved = ResolvedSegment::new(segment, &SegmentPreferences::default());
        assert_eq!(resolved.action, Prompt);
    }

    #[test]
    fn resolved_segment_serializes_lowercase() {
        let segment = Segment {
            item_id: ItemId::new(),
            creator_id: CreatorId::new(),
            segment_type: Commercial,
            type_index: 2,
            start_secs: 600.0,
            end_secs: 690.0,
            action: Auto,
        };
        let json = serde_json::to_value(ResolvedSegment::new(segment, &SegmentPreferences::default()))
            .unwrap();
        assert_eq!(json["segment_type"], "commercial");
        assert_eq!(json["action"], "skip");
        assert_eq!(json["type_index"], 2);
    }
}
