//! Segment-domain enums: segment types, playback actions, and per-user
//! preferences.
//!
//! All enums serialize in lowercase (via `serde(rename_all = "lowercase")`),
//! which is also the representation stored in the database.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ---------------------------------------------------------------------------
// SegmentType
// ---------------------------------------------------------------------------

/// The kind of timeline range a segment marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Intro,
    Outro,
    Recap,
    Preview,
    Commercial,
}

impl SegmentType {
    /// Every segment type, in declaration order.
    pub const ALL: [SegmentType; 5] = [
        Self::Intro,
        Self::Outro,
        Self::Recap,
        Self::Preview,
        Self::Commercial,
    ];

    /// The action a player takes when neither the user nor the creator
    /// expressed an opinion.
    pub fn default_action(self) -> SegmentAction {
        match self {
            Self::Commercial => SegmentAction::Skip,
            Self::Intro | Self::Outro | Self::Recap | Self::Preview => SegmentAction::Prompt,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Outro => "outro",
            Self::Recap => "recap",
            Self::Preview => "preview",
            Self::Commercial => "commercial",
        }
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Validation(format!("unknown segment type '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// SegmentAction
// ---------------------------------------------------------------------------

/// What the player should do when playback enters a segment.
///
/// `Auto` means "no opinion" and defers to the next source of truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentAction {
    #[default]
    Auto,
    Skip,
    Prompt,
}

impl SegmentAction {
    pub const ALL: [SegmentAction; 3] = [Self::Auto, Self::Skip, Self::Prompt];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Skip => "skip",
            Self::Prompt => "prompt",
        }
    }

    pub fn is_auto(self) -> bool {
        self == Self::Auto
    }
}

impl fmt::Display for SegmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Validation(format!("unknown segment action '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// SegmentPreferences
// ---------------------------------------------------------------------------

/// A user's preferred action for each segment type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentPreferences {
    pub intro: SegmentAction,
    pub outro: SegmentAction,
    pub recap: SegmentAction,
    pub preview: SegmentAction,
    pub commercial: SegmentAction,
}

impl SegmentPreferences {
    /// The user's preference for segments of type `t`.
    pub fn for_type(&self, t: SegmentType) -> SegmentAction {
        match t {
            SegmentType::Intro => self.intro,
            SegmentType::Outro => self.outro,
            SegmentType::Recap => self.recap,
            SegmentType::Preview => self.preview,
            SegmentType::Commercial => self.commercial,
        }
    }

    pub fn set(&mut self, t: SegmentType, action: SegmentAction) {
        let slot = match t {
            SegmentType::Intro => &mut self.intro,
            SegmentType::Outro => &mut self.outro,
            SegmentType::Recap => &mut self.recap,
            SegmentType::Preview => &mut self.preview,
            SegmentType::Commercial => &mut self.commercial,
        };
        *slot = action;
    }

    /// Builder-style variant of [`SegmentPreferences::set`].
    #[must_use]
    pub fn with(mut self, t: SegmentType, action: SegmentAction) -> Self {
        self.set(t, action);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_defaults() {
        assert_eq!(SegmentType::Commercial.default_action(), SegmentAction::Skip);
        for t in [
            SegmentType::Intro,
            SegmentType::Outro,
            SegmentType::Recap,
            SegmentType::Preview,
        ] {
            assert_eq!(t.default_action(), SegmentAction::Prompt, "{t}");
        }
    }

    #[test]
    fn no_type_defaults_to_auto() {
        assert!(SegmentType::ALL.iter().all(|t| !t.default_action().is_auto()));
    }

    #[test]
    fn segment_type_display_and_parse() {
        for t in SegmentType::ALL {
            assert_eq!(t.to_string().parse::<SegmentType>().unwrap(), t);
        }
        assert_eq!("Intro".parse::<SegmentType>().unwrap(), SegmentType::Intro);
        assert!("credits".parse::<SegmentType>().is_err());
    }

    #[test]
    fn segment_action_serde() {
        let json = serde_json::to_string(&SegmentAction::Prompt).unwrap();
        assert_eq!(json, "\"prompt\"");
        let back: SegmentAction = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(back, SegmentAction::Skip);
        assert!("never".parse::<SegmentAction>().is_err());
    }

    #[test]
    fn action_default_is_auto() {
        assert_eq!(SegmentAction::default(), SegmentAction::Auto);
    }

    #[test]
    fn preferences_default_to_auto() {
        let prefs = SegmentPreferences::default();
        assert!(SegmentType::ALL.iter().all(|t| prefs.for_type(*t).is_auto()));
    }

    #[test]
    fn preferences_set_only_touches_one_type() {
        let prefs = SegmentPreferences::default().with(SegmentType::Recap, SegmentAction::Skip);
        assert_eq!(prefs.for_type(SegmentType::Recap), SegmentAction::Skip);
        assert_eq!(prefs.for_type(SegmentType::Intro), SegmentAction::Auto);
        assert_eq!(prefs.recap, SegmentAction::Skip);
    }

    #[test]
    fn preferences_partial_json() {
        let prefs: SegmentPreferences = serde_json::from_str(r#"{"intro":"skip"}"#).unwrap();
        assert_eq!(prefs.intro, SegmentAction::Skip);
        assert_eq!(prefs.commercial, SegmentAction::Auto);
    }
}
