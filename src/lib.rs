#![warn(missing_docs, unused_qualifications)]
#![deny(missing_debug_implementations, unsafe_code, unstable_features, unused_import_braces)]

//!
//! # mpris-client
//!
//! `mpris-client` exposes the MPRIS2 D-Bus interfaces of media players as typed calls.
//!
//! Every property getter, setter and control method is a single round trip to the player;
//! nothing is cached and nothing is retried. Transport failures and casting failures are
//! surfaced through [`Error`].
//!
//! ## Getting started
//!
//! 1. Look at the demos under `demos/`.
//! 2. Look at the [`Mpris`] struct to find players, then at [`Player`].
//!

mod error;
mod extensions;
mod find;
mod metadata;
mod player;
mod playlists;
mod properties_changed;
mod property;
mod proxies;
mod seeked;
mod signal;
mod track_list;
mod value;

use std::fmt;

pub use error::{Error, Result};
pub use find::Mpris;
pub use metadata::{Metadata, TrackID};
pub use player::Player;
pub use playlists::Playlist;
pub use properties_changed::{PropertiesChangedPayload, PropertiesChangedStream, PropertyChanges};
pub use seeked::{SeekedPayload, SeekedStream};
pub use track_list::TrackList;
pub use value::Value;

/// Object path every MPRIS player is exported at.
pub const MPRIS2_PATH: &str = "/org/mpris/MediaPlayer2";

/// Bus names of MPRIS players start with this string.
pub const MPRIS2_PREFIX: &str = "org.mpris.MediaPlayer2";

/// Name of the root interface.
pub const ROOT_INTERFACE: &str = "org.mpris.MediaPlayer2";

/// Name of the player interface.
pub const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

/// Name of the track list interface.
pub const TRACK_LIST_INTERFACE: &str = "org.mpris.MediaPlayer2.TrackList";

/// Name of the playlists interface.
pub const PLAYLISTS_INTERFACE: &str = "org.mpris.MediaPlayer2.Playlists";

pub(crate) const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// One of the four MPRIS2 interfaces a player may implement.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Interface {
    /// `org.mpris.MediaPlayer2`
    Root,
    /// `org.mpris.MediaPlayer2.Player`
    Player,
    /// `org.mpris.MediaPlayer2.TrackList`
    TrackList,
    /// `org.mpris.MediaPlayer2.Playlists`
    Playlists,
}

impl Interface {
    /// The D-Bus name of the interface.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Interface::Root => ROOT_INTERFACE,
            Interface::Player => PLAYER_INTERFACE,
            Interface::TrackList => TRACK_LIST_INTERFACE,
            Interface::Playlists => PLAYLISTS_INTERFACE,
        }
    }

    /// Looks up an interface by its D-Bus name. Returns `None` for non-MPRIS interfaces.
    pub fn from_name(name: &str) -> Option<Interface> {
        match name {
            ROOT_INTERFACE => Some(Interface::Root),
            PLAYER_INTERFACE => Some(Interface::Player),
            TRACK_LIST_INTERFACE => Some(Interface::TrackList),
            PLAYLISTS_INTERFACE => Some(Interface::Playlists),
            _ => None,
        }
    }

    /// Fully qualified name of a member of this interface, e.g.
    /// `org.mpris.MediaPlayer2.Player.Volume`.
    pub(crate) fn member(&self, member: &str) -> String {
        format!("{}.{}", self.as_str(), member)
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Player's playback status.
///
/// Unknown values reported by a non-conforming player are kept in `Other`.
///
/// See: [MPRIS2 specification about
/// `Playback_Status`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Enum:Playback_Status)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
#[allow(missing_docs)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
    Other(String),
}

impl PlaybackStatus {
    /// The wire string for this status.
    pub fn as_str(&self) -> &str {
        match self {
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
            PlaybackStatus::Stopped => "Stopped",
            PlaybackStatus::Other(other) => other,
        }
    }
}

impl From<String> for PlaybackStatus {
    fn from(string: String) -> Self {
        match string.as_str() {
            "Playing" => PlaybackStatus::Playing,
            "Paused" => PlaybackStatus::Paused,
            "Stopped" => PlaybackStatus::Stopped,
            _ => PlaybackStatus::Other(string),
        }
    }
}

impl From<PlaybackStatus> for String {
    fn from(status: PlaybackStatus) -> Self {
        match status {
            PlaybackStatus::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Player's looping status.
///
/// Unknown values reported by a non-conforming player are kept in `Other`.
///
/// See: [MPRIS2 specification about
/// `Loop_Status`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Enum:Loop_Status)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum LoopStatus {
    /// The playback will stop when there are no more tracks to play
    None,

    /// The current track will start again from the begining once it has finished playing
    Track,

    /// The playback loops through a list of tracks
    Playlist,

    /// A value outside of the MPRIS enumeration.
    Other(String),
}

impl LoopStatus {
    /// The wire string for this status.
    pub fn as_str(&self) -> &str {
        match self {
            LoopStatus::None => "None",
            LoopStatus::Track => "Track",
            LoopStatus::Playlist => "Playlist",
            LoopStatus::Other(other) => other,
        }
    }
}

impl From<String> for LoopStatus {
    fn from(string: String) -> Self {
        match string.as_str() {
            "None" => LoopStatus::None,
            "Track" => LoopStatus::Track,
            "Playlist" => LoopStatus::Playlist,
            _ => LoopStatus::Other(string),
        }
    }
}

impl From<LoopStatus> for String {
    fn from(status: LoopStatus) -> Self {
        match status {
            LoopStatus::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_names_interfaces_exactly() {
        assert_eq!(Interface::Root.as_str(), "org.mpris.MediaPlayer2");
        assert_eq!(Interface::Player.as_str(), "org.mpris.MediaPlayer2.Player");
        assert_eq!(
            Interface::TrackList.as_str(),
            "org.mpris.MediaPlayer2.TrackList"
        );
        assert_eq!(
            Interface::Playlists.as_str(),
            "org.mpris.MediaPlayer2.Playlists"
        );
        assert_eq!(
            Interface::Player.member("Seeked"),
            "org.mpris.MediaPlayer2.Player.Seeked"
        );
    }

    #[test]
    fn it_looks_up_interfaces_by_name() {
        for interface in [
            Interface::Root,
            Interface::Player,
            Interface::TrackList,
            Interface::Playlists,
        ] {
            assert_eq!(Interface::from_name(interface.as_str()), Some(interface));
        }
        assert_eq!(Interface::from_name(PROPERTIES_INTERFACE), None);
        assert_eq!(Interface::from_name("org.mpris.MediaPlayer2.Player.Extra"), None);
    }

    #[test]
    fn it_parses_playback_statuses() {
        assert_eq!(
            PlaybackStatus::from(String::from("Playing")),
            PlaybackStatus::Playing
        );
        assert_eq!(
            PlaybackStatus::from(String::from("Paused")),
            PlaybackStatus::Paused
        );
        assert_eq!(
            PlaybackStatus::from(String::from("Stopped")),
            PlaybackStatus::Stopped
        );
    }

    #[test]
    fn it_passes_unknown_statuses_through() {
        let status = PlaybackStatus::from(String::from("Buffering"));
        assert_eq!(status, PlaybackStatus::Other("Buffering".into()));
        assert_eq!(String::from(status), "Buffering");

        let status = LoopStatus::from(String::from("Shuffle"));
        assert_eq!(status.as_str(), "Shuffle");
    }

    #[test]
    fn it_writes_loop_statuses_back_as_wire_strings() {
        assert_eq!(String::from(LoopStatus::None), "None");
        assert_eq!(String::from(LoopStatus::Track), "Track");
        assert_eq!(String::from(LoopStatus::Playlist), "Playlist");
        assert_eq!(LoopStatus::from(String::from("Playlist")), LoopStatus::Playlist);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;
        use serde_test::{assert_tokens, Token};

        #[test]
        fn test_status_serialization() {
            assert_tokens(&PlaybackStatus::Paused, &[Token::String("Paused")]);
            assert_tokens(&LoopStatus::Track, &[Token::String("Track")]);
        }
    }
}
