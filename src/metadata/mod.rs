mod track_id;

pub(crate) use self::track_id::NO_TRACK;
pub use self::track_id::TrackID;

use std::collections::HashMap;
use std::time::Duration;

use zbus::zvariant::OwnedValue;

use crate::extensions::DurationExtensions;
use crate::property::cast;
use crate::value::FromValue;
use crate::{Error, Result, Value, PLAYER_INTERFACE};

/// Metadata of a track, as a map from metadata key to [`Value`].
///
/// No key is required to be present; a player with nothing loaded usually reports an empty
/// map. Reading an absent (or nil) key fails with [`Error::MissingKey`].
///
/// * [Read more about the MPRIS2 `Metadata_Map`
/// type.](https://specifications.freedesktop.org/mpris-spec/latest/Track_List_Interface.html#Mapping:Metadata_Map)
/// * [Read MPRIS v2 metadata guidelines](https://www.freedesktop.org/wiki/Specifications/mpris-spec/metadata/)
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Metadata {
    values: HashMap<String, Value>,
}

impl Metadata {
    /// Get a raw value from the metadata by key name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mpris_client::{Metadata, Value};
    /// # use std::collections::HashMap;
    /// let mut values = HashMap::new();
    /// values.insert("xesam:composer".to_string(), Value::from("Bach"));
    /// let metadata = Metadata::from(values);
    ///
    /// assert_eq!(metadata.get("xesam:composer").unwrap(), &Value::from("Bach"));
    /// assert!(metadata.get("xesam:title").unwrap_err().is_missing_key());
    /// ```
    pub fn get(&self, key: &str) -> Result<&Value> {
        match self.values.get(key) {
            Some(value) if !value.is_nil() => Ok(value),
            _ => Err(Error::MissingKey {
                key: key.to_owned(),
            }),
        }
    }

    /// Returns `true` when the map has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all keys that are present, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Reads `key` and projects it, turning a mismatch into a [`Error::Cast`].
    fn get_cast<T: FromValue>(&self, key: &str) -> Result<T> {
        let value = self.get(key)?.clone();
        cast(metadata_target(key), value)
    }

    /// The track ID.
    ///
    /// Based on `mpris:trackid`
    /// > A unique identity for this track within the context of an MPRIS object.
    ///
    /// The `NoTrack` sentinel counts as a missing key.
    pub fn track_id(&self) -> Result<TrackID> {
        let value = self.get("mpris:trackid")?.clone();
        match TrackID::try_from(value) {
            Ok(id) => Ok(id),
            Err(Value::String(s)) if s == NO_TRACK => Err(Error::MissingKey {
                key: String::from("mpris:trackid"),
            }),
            Err(other) => Err(Error::cast(metadata_target("mpris:trackid"), other, "TrackID")),
        }
    }

    /// The duration of the track.
    ///
    /// Based on `mpris:length`, in microseconds. Both signed and unsigned integers are
    /// accepted; negative lengths become zero.
    pub fn length(&self) -> Result<Duration> {
        self.get_cast("mpris:length").map(Duration::from_micros_signed)
    }

    /// An URL to album art of the current track.
    ///
    /// Based on `mpris:artUrl`
    pub fn art_url(&self) -> Result<String> {
        self.get_cast("mpris:artUrl")
    }

    /// The name of the track.
    ///
    /// Based on `xesam:title`
    pub fn title(&self) -> Result<String> {
        self.get_cast("xesam:title")
    }

    /// A list of artists of the track.
    ///
    /// Based on `xesam:artist`
    pub fn artists(&self) -> Result<Vec<String>> {
        self.get_cast("xesam:artist")
    }

    /// The name of the album the track appears on.
    ///
    /// Based on `xesam:album`
    pub fn album(&self) -> Result<String> {
        self.get_cast("xesam:album")
    }

    /// A list of artists of the album the track appears on.
    ///
    /// Based on `xesam:albumArtist`
    pub fn album_artists(&self) -> Result<Vec<String>> {
        self.get_cast("xesam:albumArtist")
    }

    /// A URL to the media being played.
    ///
    /// Based on `xesam:url`
    pub fn url(&self) -> Result<String> {
        self.get_cast("xesam:url")
    }

    /// The track number on the disc of the album the track appears on.
    ///
    /// Based on `xesam:trackNumber`
    pub fn track_number(&self) -> Result<i64> {
        self.get_cast("xesam:trackNumber")
    }

    /// Based on `xesam:discNumber`
    pub fn disc_number(&self) -> Result<i64> {
        self.get_cast("xesam:discNumber")
    }

    /// Based on `xesam:genre`
    pub fn genres(&self) -> Result<Vec<String>> {
        self.get_cast("xesam:genre")
    }

    /// Based on `xesam:autoRating`
    /// > An automatically-generated rating, based on things such as how often it has been played.
    /// > This should be in the range 0.0 to 1.0.
    pub fn auto_rating(&self) -> Result<f64> {
        self.get_cast("xesam:autoRating")
    }

    /// Based on `xesam:userRating`
    pub fn user_rating(&self) -> Result<f64> {
        self.get_cast("xesam:userRating")
    }
}

fn metadata_target(key: &str) -> String {
    format!("{}.Metadata[{:?}]", PLAYER_INTERFACE, key)
}

impl From<HashMap<String, Value>> for Metadata {
    fn from(values: HashMap<String, Value>) -> Self {
        Metadata { values }
    }
}

impl From<HashMap<String, OwnedValue>> for Metadata {
    fn from(raw: HashMap<String, OwnedValue>) -> Self {
        Metadata {
            values: raw
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        }
    }
}

impl From<Metadata> for HashMap<String, Value> {
    fn from(metadata: Metadata) -> Self {
        metadata.values
    }
}

impl TryFrom<Value> for Metadata {
    type Error = Value;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Map(values) => Ok(Metadata { values }),
            other => Err(other),
        }
    }
}
