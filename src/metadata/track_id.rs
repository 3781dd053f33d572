use std::fmt;
use std::ops::Deref;

use zbus::zvariant::ObjectPath;

use crate::{Error, Result, Value};

pub(crate) const NO_TRACK: &str = "/org/mpris/MediaPlayer2/TrackList/NoTrack";

/// Represents [the MPRIS `Track_Id` type][track_id].
///
/// A track ID is a D-Bus object path that identifies a track within one player. The special
/// `/org/mpris/MediaPlayer2/TrackList/NoTrack` path is not a valid track ID.
///
/// ```rust
/// use mpris_client::TrackID;
/// let id = TrackID::new("/org/mpris/MediaPlayer2/Track/1").expect("Parse error");
/// assert_eq!(&*id, "/org/mpris/MediaPlayer2/Track/1");
/// assert!(TrackID::new("/org/mpris/MediaPlayer2/TrackList/NoTrack").is_err());
/// ```
///
/// [track_id]: https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Simple-Type:Track_Id
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct TrackID(String);

impl TrackID {
    /// Create a new `TrackID` from a string-like entity.
    ///
    /// The IDs are temporary and only work while the player knows about them, but creating
    /// them manually helps with test setup and comparisons.
    pub fn new<S: Into<String>>(id: S) -> Result<Self> {
        let id = id.into();
        if id == NO_TRACK {
            return Err(Error::MissingKey {
                key: String::from("mpris:trackid"),
            });
        }
        let checked = ObjectPath::try_from(id.as_str()).map(|_| ());
        match checked {
            Ok(()) => Ok(TrackID(id)),
            Err(source) => Err(Error::invalid_name(id, source)),
        }
    }

    /// The ID as an object path, ready to be sent to the player.
    pub(crate) fn as_object_path(&self) -> ObjectPath<'_> {
        // Validated in `new`.
        ObjectPath::from_str_unchecked(&self.0)
    }
}

impl TryFrom<String> for TrackID {
    type Error = Error;

    fn try_from(id: String) -> Result<Self> {
        TrackID::new(id)
    }
}

impl From<TrackID> for String {
    fn from(id: TrackID) -> Self {
        id.0
    }
}

impl TryFrom<Value> for TrackID {
    type Error = Value;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::String(s) => TrackID::new(s.clone()).map_err(|_| Value::String(s)),
            other => Err(other),
        }
    }
}

impl Deref for TrackID {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for TrackID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_track_ids() {
        let id = TrackID::new("/org/mpris/MediaPlayer2/Track/1").unwrap();
        assert_eq!(id.to_string(), "/org/mpris/MediaPlayer2/Track/1");
        assert_eq!(id.as_object_path().as_str(), "/org/mpris/MediaPlayer2/Track/1");
    }

    #[test]
    fn it_rejects_the_no_track_sentinel() {
        let error = TrackID::new(NO_TRACK).unwrap_err();
        assert!(error.is_missing_key());
    }

    #[test]
    fn it_rejects_invalid_paths() {
        assert!(matches!(
            TrackID::new("not a path"),
            Err(Error::InvalidName { .. })
        ));
        assert!(matches!(TrackID::new(""), Err(Error::InvalidName { .. })));
    }

    #[test]
    fn it_validates_string_conversions() {
        let id = TrackID::try_from(String::from("/a/b")).unwrap();
        assert_eq!(String::from(id), "/a/b");
        assert!(TrackID::try_from(String::from("not a path!")).is_err());
        assert!(TrackID::try_from(String::from(NO_TRACK))
            .unwrap_err()
            .is_missing_key());
    }

    #[test]
    fn it_converts_from_string_values_only() {
        let id = TrackID::try_from(Value::from("/a/b")).unwrap();
        assert_eq!(&*id, "/a/b");
        assert_eq!(
            TrackID::try_from(Value::SignedInt(1)),
            Err(Value::SignedInt(1))
        );
    }
}
