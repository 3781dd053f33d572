use zbus::zvariant::{ObjectPath, OwnedObjectPath};

use crate::{Error, Interface, Player, Result};

/// A playlist as reported by `org.mpris.MediaPlayer2.Playlists`.
///
/// See: [MPRIS2 specification about
/// `Playlist`](https://specifications.freedesktop.org/mpris-spec/latest/Playlists_Interface.html#Struct:Playlist)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Playlist {
    /// Object path identifying the playlist within the player.
    pub id: String,
    /// Name to display.
    pub name: String,
    /// URI of an icon, or an empty string.
    pub icon: String,
}

impl From<(OwnedObjectPath, String, String)> for Playlist {
    fn from((id, name, icon): (OwnedObjectPath, String, String)) -> Self {
        Playlist {
            id: id.as_str().to_owned(),
            name,
            icon,
        }
    }
}

impl Player {
    /// Returns the number of playlists the player has.
    pub async fn get_playlist_count(&self) -> Result<u64> {
        self.get_playlists_property_cast("PlaylistCount").await
    }

    /// Returns the orderings the player supports for [`Player::get_playlists`], like
    /// `Alphabetical` or `UserDefined`.
    pub async fn get_orderings(&self) -> Result<Vec<String>> {
        self.get_playlists_property_cast("Orderings").await
    }

    /// Starts playing the playlist with the given ID.
    ///
    /// `id` must be a valid object path; otherwise nothing is sent and
    /// [`Error::InvalidName`] is returned.
    ///
    /// See: [MPRIS2 specification about `ActivatePlaylist`](https://specifications.freedesktop.org/mpris-spec/latest/Playlists_Interface.html#Method:ActivatePlaylist)
    pub async fn activate_playlist(&self, id: &str) -> Result<()> {
        let path = ObjectPath::try_from(id).map_err(|source| Error::invalid_name(id, source))?;
        self.call(Interface::Playlists, "ActivatePlaylist", &path)
            .await
            .map(|_| ())
    }

    /// Returns up to `max_count` playlists starting at `index`, sorted by `order`.
    ///
    /// See: [MPRIS2 specification about `GetPlaylists`](https://specifications.freedesktop.org/mpris-spec/latest/Playlists_Interface.html#Method:GetPlaylists)
    pub async fn get_playlists(
        &self,
        index: u32,
        max_count: u32,
        order: &str,
        reverse: bool,
    ) -> Result<Vec<Playlist>> {
        let reply = self
            .call(
                Interface::Playlists,
                "GetPlaylists",
                &(index, max_count, order, reverse),
            )
            .await?;

        let raw: Vec<(OwnedObjectPath, String, String)> = reply.body().map_err(|source| {
            Error::decode(Interface::Playlists.member("GetPlaylists"), source)
        })?;
        Ok(raw.into_iter().map(Playlist::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_playlists_from_wire_tuples() {
        let path = OwnedObjectPath::try_from("/org/example/Playlist/3").unwrap();
        let playlist = Playlist::from((path, "Evening".to_string(), String::new()));

        assert_eq!(
            playlist,
            Playlist {
                id: "/org/example/Playlist/3".into(),
                name: "Evening".into(),
                icon: "".into(),
            }
        );
    }
}
