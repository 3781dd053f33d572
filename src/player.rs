use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use zbus::names::BusName;
use zbus::zvariant::DynamicType;
use zbus::{Connection, Message};

use crate::extensions::DurationExtensions;
use crate::{
    Error, Interface, LoopStatus, Metadata, PlaybackStatus, Result, TrackID, Value, MPRIS2_PATH,
};

/// A MPRIS-compatible player.
///
/// You can query this player about the currently playing media, or control it. Every method
/// performs exactly one call on the bus (except [`Player::set_position`], which first reads the
/// current track ID) and nothing is cached between calls.
///
/// A `Player` is cheap to clone; clones share the same bus connection.
///
/// **See:** [MPRIS2 MediaPlayer2.Player Specification][spec]
/// [spec]: <https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html>
#[derive(Debug, Clone)]
pub struct Player {
    connection: Connection,
    bus_name: String,
}

impl Player {
    /// Create a new `Player` for `bus_name` on the given connection.
    ///
    /// No call is made; if nothing owns the bus name, the first call will fail with
    /// [`Error::Transport`].
    pub fn new<S>(connection: Connection, bus_name: S) -> Result<Player>
    where
        S: Into<String>,
    {
        Ok(Player {
            connection,
            bus_name: validate_bus_name(bus_name.into())?,
        })
    }

    /// Returns the player's D-Bus bus name, like `org.mpris.MediaPlayer2.vlc`.
    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }

    /// Returns the D-Bus connection this player talks over.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Calls `method` on `interface` of the player object and returns the raw reply.
    ///
    /// `target` is the name errors are reported under.
    pub(crate) async fn raw_call<B>(
        &self,
        target: &str,
        interface: &str,
        method: &str,
        body: &B,
    ) -> Result<Arc<Message>>
    where
        B: serde::Serialize + DynamicType,
    {
        debug!("Calling {} on {}", target, self.bus_name);
        self.connection
            .call_method(
                Some(self.bus_name.as_str()),
                MPRIS2_PATH,
                Some(interface),
                method,
                body,
            )
            .await
            .map_err(|source| Error::transport(target, source))
    }

    pub(crate) async fn call<B>(
        &self,
        interface: Interface,
        method: &str,
        body: &B,
    ) -> Result<Arc<Message>>
    where
        B: serde::Serialize + DynamicType,
    {
        self.raw_call(&interface.member(method), interface.as_str(), method, body)
            .await
    }

    /// Calls a method that takes no arguments and discards the reply.
    async fn call_unit(&self, interface: Interface, method: &str) -> Result<()> {
        self.call(interface, method, &()).await.map(|_| ())
    }

    //
    // org.mpris.MediaPlayer2
    //

    /// Brings the player's user interface to the front.
    ///
    /// See: [MPRIS2 specification about `Raise`](https://specifications.freedesktop.org/mpris-spec/latest/Media_Player.html#Method:Raise)
    pub async fn raise(&self) -> Result<()> {
        self.call_unit(Interface::Root, "Raise").await
    }

    /// Asks the player to quit.
    ///
    /// See: [MPRIS2 specification about `Quit`](https://specifications.freedesktop.org/mpris-spec/latest/Media_Player.html#Method:Quit)
    pub async fn quit(&self) -> Result<()> {
        self.call_unit(Interface::Root, "Quit").await
    }

    /// Queries the player to see if it can be asked to quit.
    pub async fn can_quit(&self) -> Result<bool> {
        self.get_root_property_cast("CanQuit").await
    }

    /// Queries the player to see if it can be raised.
    pub async fn can_raise(&self) -> Result<bool> {
        self.get_root_property_cast("CanRaise").await
    }

    /// Returns whether the player is in fullscreen mode.
    pub async fn get_fullscreen(&self) -> Result<bool> {
        self.get_root_property_cast("Fullscreen").await
    }

    /// Sets the fullscreen state of the player.
    pub async fn set_fullscreen(&self, fullscreen: bool) -> Result<()> {
        self.set_root_property("Fullscreen", fullscreen).await
    }

    /// Queries the player to see if the fullscreen state may be changed.
    pub async fn can_set_fullscreen(&self) -> Result<bool> {
        self.get_root_property_cast("CanSetFullscreen").await
    }

    /// Queries the player to see if it implements `org.mpris.MediaPlayer2.TrackList`.
    pub async fn has_track_list(&self) -> Result<bool> {
        self.get_root_property_cast("HasTrackList").await
    }

    /// Returns the player's MPRIS `Identity`.
    ///
    /// This is usually the application's name, like `Spotify`.
    pub async fn identity(&self) -> Result<String> {
        self.get_root_property_cast("Identity").await
    }

    /// Returns the basename of the player's `.desktop` file.
    pub async fn desktop_entry(&self) -> Result<String> {
        self.get_root_property_cast("DesktopEntry").await
    }

    /// Returns the URI schemes the player can open, like `file` or `http`.
    pub async fn supported_uri_schemes(&self) -> Result<Vec<String>> {
        self.get_root_property_cast("SupportedUriSchemes").await
    }

    /// Returns the MIME types the player can open.
    pub async fn supported_mime_types(&self) -> Result<Vec<String>> {
        self.get_root_property_cast("SupportedMimeTypes").await
    }

    //
    // org.mpris.MediaPlayer2.Player
    //

    /// Send a `Next` signal to the player.
    ///
    /// See: [MPRIS2 specification about `Next`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:Next)
    pub async fn next(&self) -> Result<()> {
        self.call_unit(Interface::Player, "Next").await
    }

    /// Send a `Previous` signal to the player.
    ///
    /// See: [MPRIS2 specification about `Previous`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:Previous)
    pub async fn previous(&self) -> Result<()> {
        self.call_unit(Interface::Player, "Previous").await
    }

    /// Send a `Pause` signal to the player.
    ///
    /// See: [MPRIS2 specification about `Pause`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:Pause)
    pub async fn pause(&self) -> Result<()> {
        self.call_unit(Interface::Player, "Pause").await
    }

    /// Send a `PlayPause` signal to the player.
    ///
    /// See: [MPRIS2 specification about `PlayPause`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:PlayPause)
    pub async fn play_pause(&self) -> Result<()> {
        self.call_unit(Interface::Player, "PlayPause").await
    }

    /// Send a `Stop` signal to the player.
    ///
    /// See: [MPRIS2 specification about `Stop`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:Stop)
    pub async fn stop(&self) -> Result<()> {
        self.call_unit(Interface::Player, "Stop").await
    }

    /// Send a `Play` signal to the player.
    ///
    /// See: [MPRIS2 specification about `Play`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:Play)
    pub async fn play(&self) -> Result<()> {
        self.call_unit(Interface::Player, "Play").await
    }

    /// Send a `Seek` signal to the player.
    ///
    /// Negative offsets seek backwards. The offset is forwarded as-is; clamping to the start
    /// or end of the track is up to the player.
    ///
    /// See: [MPRIS2 specification about `Seek`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:Seek)
    pub async fn seek(&self, offset_in_microseconds: i64) -> Result<()> {
        self.call(Interface::Player, "Seek", &offset_in_microseconds)
            .await
            .map(|_| ())
    }

    /// Tell the player to seek forwards.
    ///
    /// See: `seek` method on `Player`.
    pub async fn seek_forwards(&self, offset: &Duration) -> Result<()> {
        self.seek(offset.as_micros_signed()).await
    }

    /// Tell the player to seek backwards.
    ///
    /// See: `seek` method on `Player`.
    pub async fn seek_backwards(&self, offset: &Duration) -> Result<()> {
        self.seek(-offset.as_micros_signed()).await
    }

    /// Sets the position of the current track.
    ///
    /// The current track ID is read from the metadata first. If no track is loaded this fails
    /// with [`Error::MissingKey`] and the player is not asked to change position.
    ///
    /// See: [MPRIS2 specification about `SetPosition`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:SetPosition)
    pub async fn set_position(&self, position: &Duration) -> Result<()> {
        let track_id = self.get_track_id().await?;
        self.set_track_position(&track_id, position).await
    }

    /// Sets the position of the given track.
    ///
    /// The player ignores the call if `track_id` is no longer the current track.
    ///
    /// See: [MPRIS2 specification about `SetPosition`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:SetPosition)
    pub async fn set_track_position(&self, track_id: &TrackID, position: &Duration) -> Result<()> {
        let body = (track_id.as_object_path(), position.as_micros_signed());
        self.call(Interface::Player, "SetPosition", &body)
            .await
            .map(|_| ())
    }

    /// Asks the player to open and play `uri`.
    ///
    /// The URI is not validated here; see [`Player::supported_uri_schemes`].
    ///
    /// See: [MPRIS2 specification about `OpenUri`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Method:OpenUri)
    pub async fn open_uri(&self, uri: &str) -> Result<()> {
        self.call(Interface::Player, "OpenUri", &uri)
            .await
            .map(|_| ())
    }

    /// Query the player for current playback status.
    pub async fn get_playback_status(&self) -> Result<PlaybackStatus> {
        self.get_player_property_cast::<String>("PlaybackStatus")
            .await
            .map(PlaybackStatus::from)
    }

    /// Query the player for the current loop status.
    ///
    /// See: [MPRIS2 specification about
    /// `LoopStatus`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Property:LoopStatus)
    pub async fn get_loop_status(&self) -> Result<LoopStatus> {
        self.get_player_property_cast::<String>("LoopStatus")
            .await
            .map(LoopStatus::from)
    }

    /// Set the loop status of the player.
    pub async fn set_loop_status(&self, status: LoopStatus) -> Result<()> {
        self.set_player_property("LoopStatus", String::from(status)).await
    }

    /// Returns the player's playback rate as a factor.
    ///
    /// 1.0 would mean normal rate, while 2.0 would mean twice the playback speed.
    pub async fn get_playback_rate(&self) -> Result<f64> {
        self.get_player_property_cast("Rate").await
    }

    /// Sets the playback rate.
    pub async fn set_playback_rate(&self, rate: f64) -> Result<()> {
        self.set_player_property("Rate", rate).await
    }

    /// Returns the lowest playback rate the player supports.
    pub async fn get_minimum_rate(&self) -> Result<f64> {
        self.get_player_property_cast("MinimumRate").await
    }

    /// Returns the highest playback rate the player supports.
    pub async fn get_maximum_rate(&self) -> Result<f64> {
        self.get_player_property_cast("MaximumRate").await
    }

    /// Query player for the state of the "Shuffle" setting.
    ///
    /// See: [MPRIS2 specification about
    /// `Shuffle`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Property:Shuffle)
    pub async fn get_shuffle(&self) -> Result<bool> {
        self.get_player_property_cast("Shuffle").await
    }

    /// Set the "Shuffle" setting of the player.
    pub async fn set_shuffle(&self, state: bool) -> Result<()> {
        self.set_player_property("Shuffle", state).await
    }

    /// Get the volume of the player.
    ///
    /// Volume should be between 0.0 and 1.0. Above 1.0 is possible, but not
    /// recommended.
    ///
    /// See: [MPRIS2 specification about
    /// `Volume`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Property:Volume)
    pub async fn get_volume(&self) -> Result<f64> {
        self.get_player_property_cast("Volume").await
    }

    /// Set the volume of the player.
    ///
    /// The value is forwarded unchanged; players clamp negative values to 0.0.
    pub async fn set_volume(&self, value: f64) -> Result<()> {
        self.set_player_property("Volume", value).await
    }

    /// Returns the player's MPRIS `Position` as a `Duration` since the start of the media.
    pub async fn get_position(&self) -> Result<Duration> {
        self.get_player_property_cast("Position")
            .await
            .map(Duration::from_micros_signed)
    }

    /// Query the player for current metadata.
    pub async fn get_metadata(&self) -> Result<Metadata> {
        self.get_player_property_cast::<HashMap<String, Value>>("Metadata")
            .await
            .map(Metadata::from)
    }

    /// The length of the current track.
    pub async fn get_length(&self) -> Result<Duration> {
        self.get_metadata().await?.length()
    }

    /// The ID of the current track.
    pub async fn get_track_id(&self) -> Result<TrackID> {
        self.get_metadata().await?.track_id()
    }

    /// The title of the current track.
    pub async fn get_title(&self) -> Result<String> {
        self.get_metadata().await?.title()
    }

    /// The artists of the current track.
    pub async fn get_artists(&self) -> Result<Vec<String>> {
        self.get_metadata().await?.artists()
    }

    /// The album of the current track.
    pub async fn get_album(&self) -> Result<String> {
        self.get_metadata().await?.album()
    }

    /// The art URL of the current track.
    pub async fn get_art_url(&self) -> Result<String> {
        self.get_metadata().await?.art_url()
    }

    /// The URL of the media being played.
    pub async fn get_url(&self) -> Result<String> {
        self.get_metadata().await?.url()
    }

    /// Queries the player to see if it can go to next or not.
    pub async fn can_go_next(&self) -> Result<bool> {
        self.get_player_property_cast("CanGoNext").await
    }

    /// Queries the player to see if it can go to previous or not.
    pub async fn can_go_previous(&self) -> Result<bool> {
        self.get_player_property_cast("CanGoPrevious").await
    }

    /// Queries the player to see if it can play.
    pub async fn can_play(&self) -> Result<bool> {
        self.get_player_property_cast("CanPlay").await
    }

    /// Queries the player to see if it can pause.
    pub async fn can_pause(&self) -> Result<bool> {
        self.get_player_property_cast("CanPause").await
    }

    /// Queries the player to see if it can seek within the media.
    pub async fn can_seek(&self) -> Result<bool> {
        self.get_player_property_cast("CanSeek").await
    }

    /// Queries the player to see if it can be controlled or not.
    ///
    /// See: [MPRIS2 specification about `CanControl`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Property:CanControl)
    pub async fn can_control(&self) -> Result<bool> {
        self.get_player_property_cast("CanControl").await
    }
}

fn validate_bus_name(bus_name: String) -> Result<String> {
    let checked = BusName::try_from(bus_name.as_str()).map(|_| ());
    match checked {
        Ok(()) => Ok(bus_name),
        Err(source) => Err(Error::invalid_name(bus_name, source)),
    }
}
