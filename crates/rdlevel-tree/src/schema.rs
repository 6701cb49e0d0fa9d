//! Event schema: which positional fields each compact event carries.
//!
//! A compact event is written `"Tag,field1,field2,..."` inside an event
//! list. The schema maps every known tag to the ordered names of its
//! fields, so `"SetBeatsPerMinute,1,1,120"` expands to
//! `{"type": "SetBeatsPerMinute", "bar": 1, "beat": 1, "beatsPerMinute": 120}`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Builtin event table. Every event starts with its bar and beat.
const BUILTIN_EVENTS: &[(&str, &[&str])] = &[
    ("AddClassicBeat", &["bar", "beat", "row", "tick", "swing", "hold"]),
    (
        "AddOneshotBeat",
        &["bar", "beat", "row", "pulseType", "tick", "loops", "interval"],
    ),
    (
        "AddFreeTimeBeat",
        &["bar", "beat", "row", "pulse", "hold"],
    ),
    (
        "PulseFreeTimeBeat",
        &["bar", "beat", "row", "action", "customPulse", "hold"],
    ),
    ("SetRowXs", &["bar", "beat", "row", "pattern", "syncoBeat"]),
    ("SetBeatsPerMinute", &["bar", "beat", "beatsPerMinute"]),
    ("SetCrotchetsPerBar", &["bar", "beat", "crotchetsPerBar"]),
    (
        "PlaySong",
        &["bar", "beat", "filename", "volume", "pitch", "pan", "offset", "bpm"],
    ),
    (
        "PlaySound",
        &["bar", "beat", "filename", "volume", "pitch", "pan", "offset"],
    ),
    ("SetClapSounds", &["bar", "beat", "rowType", "p1Sound", "p2Sound", "cpuSound"]),
    ("SayReadyGetSetGo", &["bar", "beat", "phraseToSay", "voiceSource", "tick", "volume"]),
    (
        "Flash",
        &["bar", "beat", "duration", "startColor", "startOpacity", "endColor", "endOpacity"],
    ),
    ("ShakeScreen", &["bar", "beat", "shakeLevel"]),
    ("SetTheme", &["bar", "beat", "preset"]),
    ("SetVFXPreset", &["bar", "beat", "preset", "enable"]),
    (
        "ShowDialogue",
        &["bar", "beat", "text", "panelSide", "portraitSide", "speed"],
    ),
    ("HideRow", &["bar", "beat", "row", "show"]),
    ("Comment", &["bar", "beat", "text"]),
    ("FinishLevel", &["bar", "beat"]),
];

static BUILTIN: LazyLock<EventSchema> = LazyLock::new(|| {
    BUILTIN_EVENTS
        .iter()
        .fold(EventSchema::new(), |schema, (name, fields)| {
            schema.with_event(*name, fields.iter().copied())
        })
});

/// Mapping from event tag to the ordered names of its positional fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventSchema {
    events: BTreeMap<String, Vec<String>>,
}

impl EventSchema {
    /// Version of the builtin table. Bump when tags or fields change.
    pub const VERSION: u32 = 1;

    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin schema, shared read-only by the whole process.
    pub fn builtin() -> &'static EventSchema {
        &BUILTIN
    }

    /// Add (or replace) an event type.
    pub fn with_event<N, F, S>(mut self, name: N, fields: F) -> Self
    where
        N: Into<String>,
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events
            .insert(name.into(), fields.into_iter().map(Into::into).collect());
        self
    }

    /// Ordered field names for an event tag.
    pub fn fields(&self, name: &str) -> Option<&[String]> {
        self.events.get(name).map(Vec::as_slice)
    }

    /// Whether the tag is known.
    pub fn contains(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    /// Iterate over `(tag, fields)` in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.events
            .iter()
            .map(|(name, fields)| (name.as_str(), fields.as_slice()))
    }

    /// Number of known event types.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event types are known.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
