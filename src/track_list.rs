use std::collections::HashMap;

use zbus::zvariant::{ObjectPath, OwnedValue};

use crate::metadata::NO_TRACK;
use crate::{Error, Interface, Metadata, Player, Result, TrackID};

/// Represents a MediaPlayer2.TrackList.
///
/// A snapshot of the track IDs a player reported. Use [`TrackList::metadata`] to load the
/// metadata for every track in one call.
///
/// See [MediaPlayer2.TrackList
/// interface](https://specifications.freedesktop.org/mpris-spec/latest/Track_List_Interface.html)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrackList {
    ids: Vec<TrackID>,
}

impl TrackList {
    /// The track IDs, in playback order.
    pub fn ids(&self) -> &[TrackID] {
        &self.ids
    }

    /// Number of tracks in the list.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the list has no tracks.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Loads the metadata of every track from `player`, paired with its ID.
    ///
    /// Tracks the player no longer knows about are left out.
    pub async fn metadata(&self, player: &Player) -> Result<Vec<(TrackID, Metadata)>> {
        let metadata = player.get_tracks_metadata(&self.ids).await?;
        Ok(pair_with_ids(metadata))
    }
}

impl From<Vec<TrackID>> for TrackList {
    fn from(ids: Vec<TrackID>) -> Self {
        TrackList { ids }
    }
}

impl IntoIterator for TrackList {
    type Item = TrackID;
    type IntoIter = std::vec::IntoIter<TrackID>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

// Players may skip unknown IDs, so the reply is matched on `mpris:trackid` rather than by
// position.
fn pair_with_ids(metadata: Vec<Metadata>) -> Vec<(TrackID, Metadata)> {
    metadata
        .into_iter()
        .filter_map(|metadata| metadata.track_id().ok().map(|id| (id, metadata)))
        .collect()
}

fn parse_track_ids(paths: Vec<String>) -> Result<Vec<TrackID>> {
    paths.into_iter().map(TrackID::new).collect()
}

impl Player {
    /// Returns the IDs of the tracks in the player's track list.
    ///
    /// Fails with a transport error if the player does not implement
    /// `org.mpris.MediaPlayer2.TrackList`; see [`Player::has_track_list`].
    pub async fn get_tracks(&self) -> Result<Vec<TrackID>> {
        let paths = self.get_track_list_property_cast("Tracks").await?;
        parse_track_ids(paths)
    }

    /// Returns the player's track list.
    pub async fn get_track_list(&self) -> Result<TrackList> {
        self.get_tracks().await.map(TrackList::from)
    }

    /// Queries the player to see if the track list can be edited.
    pub async fn can_edit_tracks(&self) -> Result<bool> {
        self.get_track_list_property_cast("CanEditTracks").await
    }

    /// Loads the metadata of the given tracks in one call.
    ///
    /// See: [MPRIS2 specification about `GetTracksMetadata`](https://specifications.freedesktop.org/mpris-spec/latest/Track_List_Interface.html#Method:GetTracksMetadata)
    pub async fn get_tracks_metadata(&self, track_ids: &[TrackID]) -> Result<Vec<Metadata>> {
        let paths: Vec<ObjectPath<'_>> = track_ids.iter().map(TrackID::as_object_path).collect();
        let reply = self
            .call(Interface::TrackList, "GetTracksMetadata", &paths)
            .await?;

        let raw: Vec<HashMap<String, OwnedValue>> = reply.body().map_err(|source| {
            Error::decode(Interface::TrackList.member("GetTracksMetadata"), source)
        })?;
        Ok(raw.into_iter().map(Metadata::from).collect())
    }

    /// Adds `uri` to the track list, after `after` or at the start when `None`.
    ///
    /// See: [MPRIS2 specification about `AddTrack`](https://specifications.freedesktop.org/mpris-spec/latest/Track_List_Interface.html#Method:AddTrack)
    pub async fn add_track(
        &self,
        uri: &str,
        after: Option<&TrackID>,
        set_as_current: bool,
    ) -> Result<()> {
        let after = match after {
            Some(id) => id.as_object_path(),
            None => ObjectPath::from_str_unchecked(NO_TRACK),
        };
        self.call(Interface::TrackList, "AddTrack", &(uri, after, set_as_current))
            .await
            .map(|_| ())
    }

    /// Removes a track from the track list.
    ///
    /// See: [MPRIS2 specification about `RemoveTrack`](https://specifications.freedesktop.org/mpris-spec/latest/Track_List_Interface.html#Method:RemoveTrack)
    pub async fn remove_track(&self, track_id: &TrackID) -> Result<()> {
        self.call(
            Interface::TrackList,
            "RemoveTrack",
            &track_id.as_object_path(),
        )
        .await
        .map(|_| ())
    }

    /// Skips to the given track in the track list.
    ///
    /// See: [MPRIS2 specification about `GoTo`](https://specifications.freedesktop.org/mpris-spec/latest/Track_List_Interface.html#Method:GoTo)
    pub async fn go_to(&self, track_id: &TrackID) -> Result<()> {
        self.call(Interface::TrackList, "GoTo", &track_id.as_object_path())
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn track(id: &str, title: &str) -> Metadata {
        let mut values = HashMap::new();
        values.insert("mpris:trackid".to_string(), Value::from(id));
        values.insert("xesam:title".to_string(), Value::from(title));
        Metadata::from(values)
    }

    #[test]
    fn it_parses_track_paths() {
        let ids = parse_track_ids(vec!["/track/1".into(), "/track/2".into()]).unwrap();
        let list = TrackList::from(ids);
        assert_eq!(list.len(), 2);
        assert_eq!(&*list.ids()[1], "/track/2");
    }

    #[test]
    fn it_rejects_invalid_track_paths() {
        let result = parse_track_ids(vec!["/track/1".into(), "track 2".into()]);
        assert!(matches!(result, Err(Error::InvalidName { .. })));
    }

    #[test]
    fn it_pairs_metadata_by_track_id() {
        let paired = pair_with_ids(vec![
            track("/track/2", "Second"),
            Metadata::default(),
            track("/track/1", "First"),
        ]);

        assert_eq!(paired.len(), 2);
        assert_eq!(&*paired[0].0, "/track/2");
        assert_eq!(paired[0].1.title().unwrap(), "Second");
        assert_eq!(&*paired[1].0, "/track/1");
    }

    #[test]
    fn it_iterates_ids_in_order() {
        let list = TrackList::from(parse_track_ids(vec!["/a".into(), "/b".into()]).unwrap());
        let ids: Vec<String> = list.into_iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["/a", "/b"]);
    }
}
