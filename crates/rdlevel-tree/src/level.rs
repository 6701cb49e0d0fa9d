//! Typed view over a parsed level.
//!
//! [`Level::from_document`] splits a level into its settings, rows, events
//! and conditionals. Only the settings are typed; rows and events stay as
//! plain objects since their shape depends on the event type.

use std::fmt;

use tracing::warn;

use crate::{Document, Object, ParseError, Value};

/// Level difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// `Easy`, also the fallback for unrecognized values.
    Easy,
    /// `Medium`, used when a level has no difficulty at all.
    #[default]
    Medium,
    /// `Tough`
    Tough,
    /// `VeryTough`
    VeryTough,
}

impl Difficulty {
    /// The name as written in levels.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Tough => "Tough",
            Difficulty::VeryTough => "VeryTough",
        }
    }

    /// Accepts `Easy` as well as `EASY`, and so on.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Easy" | "EASY" => Some(Difficulty::Easy),
            "Medium" | "MEDIUM" => Some(Difficulty::Medium),
            "Tough" | "TOUGH" => Some(Difficulty::Tough),
            "VeryTough" | "VERY_TOUGH" => Some(Difficulty::VeryTough),
            _ => None,
        }
    }

    /// Read a difficulty the way the game does: a missing key means
    /// `Medium`, anything unrecognized (including `null`) means `Easy`.
    fn from_setting(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Difficulty::Medium;
        };
        match value.as_str().and_then(Difficulty::from_name) {
            Some(difficulty) => difficulty,
            None => {
                warn!(?value, "invalid difficulty, defaulting to Easy");
                Difficulty::Easy
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which play modes a level supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanBePlayedOn {
    /// `OnePlayerOnly`
    OnePlayerOnly,
    /// `TwoPlayerOnly`
    TwoPlayerOnly,
    /// `BothModes`
    BothModes,
}

impl CanBePlayedOn {
    /// The name as written in levels.
    pub fn as_str(self) -> &'static str {
        match self {
            CanBePlayedOn::OnePlayerOnly => "OnePlayerOnly",
            CanBePlayedOn::TwoPlayerOnly => "TwoPlayerOnly",
            CanBePlayedOn::BothModes => "BothModes",
        }
    }

    /// Look up a name as written in levels.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "OnePlayerOnly" => Some(CanBePlayedOn::OnePlayerOnly),
            "TwoPlayerOnly" => Some(CanBePlayedOn::TwoPlayerOnly),
            "BothModes" => Some(CanBePlayedOn::BothModes),
            _ => None,
        }
    }
}

/// How the song's artist relates to the level.
///
/// `None` is a real value here, distinct from the setting being absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialArtistType {
    /// `None`: an ordinary artist.
    None,
    /// `AuthorIsArtist`
    AuthorIsArtist,
    /// `PublicLicense`
    PublicLicense,
}

impl SpecialArtistType {
    /// The name as written in levels.
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialArtistType::None => "None",
            SpecialArtistType::AuthorIsArtist => "AuthorIsArtist",
            SpecialArtistType::PublicLicense => "PublicLicense",
        }
    }

    /// Look up a name as written in levels.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "None" => Some(SpecialArtistType::None),
            "AuthorIsArtist" => Some(SpecialArtistType::AuthorIsArtist),
            "PublicLicense" => Some(SpecialArtistType::PublicLicense),
            _ => None,
        }
    }
}

/// How rows are laid out in two-player mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiplayerAppearance {
    /// `HorizontalStrips`
    HorizontalStrips,
    /// `Nothing`
    Nothing,
}

impl MultiplayerAppearance {
    /// The name as written in levels.
    pub fn as_str(self) -> &'static str {
        match self {
            MultiplayerAppearance::HorizontalStrips => "HorizontalStrips",
            MultiplayerAppearance::Nothing => "Nothing",
        }
    }

    /// Look up a name as written in levels.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HorizontalStrips" => Some(MultiplayerAppearance::HorizontalStrips),
            "Nothing" => Some(MultiplayerAppearance::Nothing),
            _ => None,
        }
    }
}

/// What happens to events placed before the first beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirstBeatBehavior {
    /// `RunNormally`
    RunNormally,
    /// `RunEventsOnPrebar`
    RunEventsOnPrebar,
}

impl FirstBeatBehavior {
    /// The name as written in levels.
    pub fn as_str(self) -> &'static str {
        match self {
            FirstBeatBehavior::RunNormally => "RunNormally",
            FirstBeatBehavior::RunEventsOnPrebar => "RunEventsOnPrebar",
        }
    }

    /// Look up a name; older editors wrote `RunEventsOnPreBar`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "RunNormally" => Some(FirstBeatBehavior::RunNormally),
            "RunEventsOnPrebar" | "RunEventsOnPreBar" => Some(FirstBeatBehavior::RunEventsOnPrebar),
            _ => None,
        }
    }
}

/// Level settings, read from the `settings` object.
///
/// The fields every level carries are required. Fields that only newer
/// editor versions write are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSettings {
    /// Level format version.
    pub version: i64,
    /// Song title.
    pub song: String,
    /// Song artist.
    pub artist: String,
    /// Level author.
    pub author: String,
    /// Free-form description.
    pub description: String,
    /// Split on commas, trimmed, empty tags dropped.
    pub tags: Vec<String>,
    /// Difficulty, with the game's fallbacks applied.
    pub difficulty: Difficulty,
    /// Whether the level flashes.
    pub seizure_warning: Option<bool>,
    /// Level file used in two-player mode, if separate.
    pub separate_2p_level_filename: Option<String>,
    /// Supported play modes.
    pub can_be_played_on: Option<CanBePlayedOn>,
    /// Artist licensing.
    pub special_artist_type: Option<SpecialArtistType>,
    /// Hue of the song title.
    pub song_name_hue: Option<f64>,
    /// Volume of the level's sounds.
    pub level_volume: Option<f64>,
    /// Preview image file.
    pub preview_image: Option<String>,
    /// Syringe icon image file.
    pub syringe_icon: Option<String>,
    /// Mistake thresholds for the ranks, exactly four.
    pub rank_max_mistakes: Option<[i64; 4]>,
    /// Rank descriptions, exactly six.
    pub rank_description: Option<[String; 6]>,
    /// Preview song file.
    pub preview_song: Option<String>,
    /// Where the preview starts, in seconds.
    pub preview_song_start_time: Option<f64>,
    /// How long the preview plays, in seconds.
    pub preview_song_duration: Option<f64>,
    /// Two-player row layout.
    pub multiplayer_appearance: Option<MultiplayerAppearance>,
    /// Handling of events before the first beat.
    pub first_beat_behavior: Option<FirstBeatBehavior>,
    /// Proof of the artist's permission.
    pub artist_permission: Option<String>,
    /// Links to the artist.
    pub artist_links: Option<String>,
    /// Enabled mods.
    pub mods: Option<String>,
    /// Custom level class.
    pub custom_class: Option<String>,
}

impl LevelSettings {
    /// Read settings from an object with camelCase keys.
    pub fn from_object(settings: &Object) -> Result<Self, LevelError> {
        let fields = Fields {
            object: settings,
            path: "settings",
        };

        Ok(LevelSettings {
            version: fields.required("version", "integer", Value::as_i64)?,
            song: fields.required("song", "string", owned_str)?,
            artist: fields.required("artist", "string", owned_str)?,
            author: fields.required("author", "string", owned_str)?,
            description: fields.required("description", "string", owned_str)?,
            tags: fields.required("tags", "string", split_tags)?,
            difficulty: Difficulty::from_setting(settings.get("difficulty")),
            seizure_warning: fields.optional("seizureWarning", "boolean", Value::as_bool)?,
            separate_2p_level_filename: fields.optional(
                "separate2PLevelFilename",
                "string",
                owned_str,
            )?,
            can_be_played_on: fields.named("canBePlayedOn", CanBePlayedOn::from_name)?,
            special_artist_type: fields.named("specialArtistType", SpecialArtistType::from_name)?,
            song_name_hue: fields.optional("songNameHue", "number", Value::as_f64)?,
            level_volume: fields.optional("levelVolume", "number", Value::as_f64)?,
            preview_image: fields.optional("previewImage", "string", owned_str)?,
            syringe_icon: fields.optional("syringeIcon", "string", owned_str)?,
            rank_max_mistakes: fields.array("rankMaxMistakes", "integer", Value::as_i64)?,
            rank_description: fields.array("rankDescription", "string", owned_str)?,
            preview_song: fields.optional("previewSong", "string", owned_str)?,
            preview_song_start_time: fields.optional(
                "previewSongStartTime",
                "number",
                Value::as_f64,
            )?,
            preview_song_duration: fields.optional(
                "previewSongDuration",
                "number",
                Value::as_f64,
            )?,
            multiplayer_appearance: fields
                .named("multiplayerAppearance", MultiplayerAppearance::from_name)?,
            first_beat_behavior: fields.named("firstBeatBehavior", FirstBeatBehavior::from_name)?,
            artist_permission: fields.optional("artistPermission", "string", owned_str)?,
            artist_links: fields.optional("artistLinks", "string", owned_str)?,
            mods: fields.optional("mods", "string", owned_str)?,
            custom_class: fields.optional("customClass", "string", owned_str)?,
        })
    }
}

fn owned_str(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// Tags are stored as one comma-separated string.
fn split_tags(value: &Value) -> Option<Vec<String>> {
    let tags = value
        .as_str()?
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect();
    Some(tags)
}

/// Field access on one object, producing errors with full paths.
struct Fields<'a> {
    object: &'a Object,
    path: &'a str,
}

impl<'a> Fields<'a> {
    fn path(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    /// A missing or `null` field is `None`; a present one must convert.
    fn optional<T>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, LevelError> {
        match self.object.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => convert(value)
                .map(Some)
                .ok_or_else(|| LevelError::WrongType {
                    path: self.path(key),
                    expected,
                    found: value.kind_name(),
                }),
        }
    }

    fn required<T>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, LevelError> {
        self.optional(key, expected, convert)?
            .ok_or_else(|| LevelError::MissingField(self.path(key)))
    }

    /// An optional string field restricted to a set of names.
    fn named<T>(&self, key: &str, from_name: fn(&str) -> Option<T>) -> Result<Option<T>, LevelError> {
        let Some(name) = self.optional(key, "string", Value::as_str)? else {
            return Ok(None);
        };
        from_name(name)
            .map(Some)
            .ok_or_else(|| LevelError::InvalidValue {
                path: self.path(key),
                value: name.to_owned(),
            })
    }

    /// An optional sequence of exactly `N` items, each converted.
    fn array<T, const N: usize>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<Option<[T; N]>, LevelError> {
        let Some(sequence) = self.optional(key, "sequence", Value::as_sequence)? else {
            return Ok(None);
        };
        let items = sequence
            .iter()
            .enumerate()
            .map(|(index, item)| {
                convert(item).ok_or_else(|| LevelError::WrongType {
                    path: format!("{}[{index}]", self.path(key)),
                    expected,
                    found: item.kind_name(),
                })
            })
            .collect::<Result<Vec<T>, _>>()?;

        let found = items.len();
        items
            .try_into()
            .map(Some)
            .map_err(|_| LevelError::WrongLength {
                path: self.path(key),
                expected: N,
                found,
            })
    }
}

/// A parsed level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// The `settings` object, typed.
    pub settings: LevelSettings,
    /// Row definitions, in level order.
    pub rows: Vec<Object>,
    /// Events, compact ones already expanded, in level order.
    pub events: Vec<Object>,
    /// Conditionals, when the level defines any.
    pub conditionals: Option<Vec<Object>>,
}

impl Level {
    /// Parse a level from source, with default options.
    pub fn parse(source: &str) -> Result<Self, LevelError> {
        let document = Document::parse(source)?;
        Self::from_document(document)
    }

    /// Split a parsed document into a level.
    pub fn from_document(document: Document) -> Result<Self, LevelError> {
        let mut root = document.root;

        let settings = match root.get("settings") {
            Some(Value::Object(settings)) => LevelSettings::from_object(settings)?,
            Some(other) => {
                return Err(LevelError::WrongType {
                    path: "settings".to_owned(),
                    expected: "object",
                    found: other.kind_name(),
                });
            }
            None => return Err(LevelError::MissingField("settings".to_owned())),
        };

        let rows = take_objects(&mut root, "rows")?
            .ok_or_else(|| LevelError::MissingField("rows".to_owned()))?;
        let events = take_objects(&mut root, "events")?
            .ok_or_else(|| LevelError::MissingField("events".to_owned()))?;
        let conditionals = take_objects(&mut root, "conditionals")?;

        Ok(Level {
            settings,
            rows,
            events,
            conditionals,
        })
    }

    /// Events whose `type` is `tag`, in level order.
    pub fn events_of_type<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Object> + 'a {
        self.events
            .iter()
            .filter(move |event| event.get("type").and_then(Value::as_str) == Some(tag))
    }
}

/// Remove a sequence of objects from `root`. `None` when the key is absent
/// or `null`.
fn take_objects(root: &mut Object, key: &str) -> Result<Option<Vec<Object>>, LevelError> {
    let items = match root.remove(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Sequence(sequence)) => sequence.items,
        Some(other) => {
            return Err(LevelError::WrongType {
                path: key.to_owned(),
                expected: "sequence",
                found: other.kind_name(),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(object),
            other => Err(LevelError::WrongType {
                path: format!("{key}[{index}]"),
                expected: "object",
                found: other.kind_name(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Error building a [`Level`].
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    /// The source did not parse.
    Parse(ParseError),
    /// A required field is absent.
    MissingField(String),
    /// A field holds the wrong kind of value.
    WrongType {
        /// Path of the field, such as `settings.songNameHue`.
        path: String,
        /// The kind of value the field takes.
        expected: &'static str,
        /// The kind of value found.
        found: &'static str,
    },
    /// A field holds a name outside its allowed set.
    InvalidValue {
        /// Path of the field.
        path: String,
        /// The name as written.
        value: String,
    },
    /// A fixed-length list has the wrong number of items.
    WrongLength {
        /// Path of the field.
        path: String,
        /// Required item count.
        expected: usize,
        /// Item count found.
        found: usize,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Parse(error) => write!(f, "{error}"),
            LevelError::MissingField(path) => write!(f, "missing field `{path}`"),
            LevelError::WrongType {
                path,
                expected,
                found,
            } => write!(f, "`{path}` should be {expected}, found {found}"),
            LevelError::InvalidValue { path, value } => {
                write!(f, "`{path}` has invalid value {value:?}")
            }
            LevelError::WrongLength {
                path,
                expected,
                found,
            } => write!(f, "`{path}` should have {expected} items, found {found}"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Parse(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ParseError> for LevelError {
    fn from(error: ParseError) -> Self {
        LevelError::Parse(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"{
        "settings": {
            "version": 55,
            "song": "Chips",
            "artist": "Someone",
            "author": "Me",
            "description": "",
            "tags": "samurai, , boss ,",
            "difficulty": "Tough",
            "seizureWarning": true,
            "canBePlayedOn": "BothModes",
            "specialArtistType": "None",
            "songNameHue": 0.5,
            "previewImage": "preview.png",
        },
        "rows": [{ "character": "Samurai", "row": 0 }],
        "events": [
            "SetBeatsPerMinute,1,1,120",
            { "bar": 1, "beat": 2, "type": "Comment", "text": "hi" },
            "SetBeatsPerMinute,2,1,140",
        ],
    }"#;

    #[test]
    fn test_full_level() {
        rdlevel_testhelpers::init_tracing();
        let level = Level::parse(LEVEL).unwrap();
        let settings = &level.settings;
        assert_eq!(settings.version, 55);
        assert_eq!(settings.song, "Chips");
        assert_eq!(settings.tags, ["samurai", "boss"]);
        assert_eq!(settings.difficulty, Difficulty::Tough);
        assert_eq!(settings.seizure_warning, Some(true));
        assert_eq!(settings.can_be_played_on, Some(CanBePlayedOn::BothModes));
        assert_eq!(settings.special_artist_type, Some(SpecialArtistType::None));
        assert_eq!(settings.song_name_hue, Some(0.5));
        assert_eq!(settings.level_volume, None);
        assert_eq!(settings.separate_2p_level_filename, None);
        assert_eq!(settings.preview_image.as_deref(), Some("preview.png"));

        assert_eq!(level.rows.len(), 1);
        assert_eq!(level.events.len(), 3);
        assert_eq!(level.conditionals, None);

        let bpms: Vec<i64> = level
            .events_of_type("SetBeatsPerMinute")
            .filter_map(|event| event.get("beatsPerMinute").and_then(Value::as_i64))
            .collect();
        assert_eq!(bpms, [120, 140]);
    }

    fn settings_with(extra: &str) -> Result<LevelSettings, LevelError> {
        let source = format!(
            r#"{{"version": 1, "song": "s", "artist": "a", "author": "b",
                "description": "d", "tags": "" {extra}}}"#
        );
        let value = crate::parse(&source)?;
        let object = value.as_object().expect("object root");
        LevelSettings::from_object(object)
    }

    #[test]
    fn test_difficulty_defaults() {
        rdlevel_testhelpers::init_tracing();
        assert_eq!(settings_with("").unwrap().difficulty, Difficulty::Medium);
        assert_eq!(
            settings_with(r#", "difficulty": "VERY_TOUGH""#).unwrap().difficulty,
            Difficulty::VeryTough
        );
        assert_eq!(
            settings_with(r#", "difficulty": "Impossible""#).unwrap().difficulty,
            Difficulty::Easy
        );
        assert_eq!(
            settings_with(r#", "difficulty": 3"#).unwrap().difficulty,
            Difficulty::Easy
        );
    }

    #[test]
    fn test_null_difficulty_is_easy() {
        rdlevel_testhelpers::init_tracing();
        assert_eq!(
            settings_with(r#", "difficulty": null"#).unwrap().difficulty,
            Difficulty::Easy
        );
    }

    #[test]
    fn test_newer_settings() {
        let settings = settings_with(
            r#", "syringeIcon": "syringe.png",
                "rankMaxMistakes": [20, 15, 10, 5],
                "rankDescription": ["a", "b", "c", "d", "e", "f"],
                "previewSong": "preview.ogg",
                "previewSongStartTime": 12.5,
                "previewSongDuration": 10,
                "multiplayerAppearance": "HorizontalStrips",
                "firstBeatBehavior": "RunNormally",
                "artistPermission": "permission.png",
                "artistLinks": "https://example.com",
                "mods": "",
                "customClass": "boss""#,
        )
        .unwrap();
        assert_eq!(settings.syringe_icon.as_deref(), Some("syringe.png"));
        assert_eq!(settings.rank_max_mistakes, Some([20, 15, 10, 5]));
        assert_eq!(
            settings.rank_description.as_ref().map(|ranks| ranks.join("")),
            Some("abcdef".to_owned())
        );
        assert_eq!(settings.preview_song.as_deref(), Some("preview.ogg"));
        assert_eq!(settings.preview_song_start_time, Some(12.5));
        assert_eq!(settings.preview_song_duration, Some(10.0));
        assert_eq!(
            settings.multiplayer_appearance,
            Some(MultiplayerAppearance::HorizontalStrips)
        );
        assert_eq!(
            settings.first_beat_behavior,
            Some(FirstBeatBehavior::RunNormally)
        );
        assert_eq!(settings.artist_permission.as_deref(), Some("permission.png"));
        assert_eq!(settings.artist_links.as_deref(), Some("https://example.com"));
        assert_eq!(settings.mods.as_deref(), Some(""));
        assert_eq!(settings.custom_class.as_deref(), Some("boss"));

        let bare = settings_with("").unwrap();
        assert_eq!(bare.rank_max_mistakes, None);
        assert_eq!(bare.first_beat_behavior, None);
    }

    #[test]
    fn test_first_beat_behavior_alias() {
        for name in ["RunEventsOnPrebar", "RunEventsOnPreBar"] {
            let extra = format!(r#", "firstBeatBehavior": "{name}""#);
            assert_eq!(
                settings_with(&extra).unwrap().first_beat_behavior,
                Some(FirstBeatBehavior::RunEventsOnPrebar)
            );
        }
        assert_eq!(FirstBeatBehavior::RunEventsOnPrebar.as_str(), "RunEventsOnPrebar");
    }

    #[test]
    fn test_wrong_list_lengths() {
        let error = settings_with(r#", "rankMaxMistakes": [20, 15, 10]"#).unwrap_err();
        assert_eq!(
            error,
            LevelError::WrongLength {
                path: "settings.rankMaxMistakes".to_owned(),
                expected: 4,
                found: 3,
            }
        );
        assert_eq!(
            error.to_string(),
            "`settings.rankMaxMistakes` should have 4 items, found 3"
        );

        let error =
            settings_with(r#", "rankDescription": ["a", "b", "c", "d", "e", "f", "g"]"#)
                .unwrap_err();
        assert_eq!(
            error,
            LevelError::WrongLength {
                path: "settings.rankDescription".to_owned(),
                expected: 6,
                found: 7,
            }
        );
    }

    #[test]
    fn test_wrong_list_items() {
        assert_eq!(
            settings_with(r#", "rankMaxMistakes": [20, 15, "ten", 5]"#).unwrap_err(),
            LevelError::WrongType {
                path: "settings.rankMaxMistakes[2]".to_owned(),
                expected: "integer",
                found: "string",
            }
        );
        assert_eq!(
            settings_with(r#", "rankDescription": "abcdef""#).unwrap_err(),
            LevelError::WrongType {
                path: "settings.rankDescription".to_owned(),
                expected: "sequence",
                found: "string",
            }
        );
    }

    #[test]
    fn test_empty_tags() {
        assert!(settings_with("").unwrap().tags.is_empty());
    }

    #[test]
    fn test_missing_field() {
        let error = Level::parse(r#"{"settings": {"version": 1}, "rows": [], "events": []}"#)
            .unwrap_err();
        assert_eq!(error, LevelError::MissingField("settings.song".to_owned()));
        assert_eq!(error.to_string(), "missing field `settings.song`");

        let error = Level::parse(r#"{"rows": [], "events": []}"#).unwrap_err();
        assert_eq!(error, LevelError::MissingField("settings".to_owned()));
    }

    #[test]
    fn test_wrong_types() {
        assert_eq!(
            settings_with(r#", "songNameHue": "red""#).unwrap_err(),
            LevelError::WrongType {
                path: "settings.songNameHue".to_owned(),
                expected: "number",
                found: "string",
            }
        );

        let source = LEVEL.replace(r#"[{ "character": "Samurai", "row": 0 }]"#, "[1]");
        let error = Level::parse(&source).unwrap_err();
        assert_eq!(error.to_string(), "`rows[0]` should be object, found number");
    }

    #[test]
    fn test_invalid_named_value() {
        assert_eq!(
            settings_with(r#", "canBePlayedOn": "ThreePlayers""#).unwrap_err(),
            LevelError::InvalidValue {
                path: "settings.canBePlayedOn".to_owned(),
                value: "ThreePlayers".to_owned(),
            }
        );
    }

    #[test]
    fn test_parse_errors_pass_through() {
        let error = Level::parse("{").unwrap_err();
        assert!(matches!(error, LevelError::Parse(_)));
    }

    #[test]
    fn test_conditionals() {
        let source = LEVEL.replace(r#""rows":"#, r#""conditionals": [{"tag": "x"}], "rows":"#);
        let level = Level::parse(&source).unwrap();
        assert_eq!(level.conditionals.map(|c| c.len()), Some(1));
    }
}
