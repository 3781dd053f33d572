use log::debug;
use zbus::zvariant::OwnedValue;

use crate::value::FromValue;
use crate::{Error, Interface, Player, Result, Value, PROPERTIES_INTERFACE};

// Properties are read and written through org.freedesktop.DBus.Properties rather than through
// generated proxies, so that every getter shares one fallible "get raw, then project" path.
impl Player {
    /// Reads `property` from `interface` without interpreting it.
    ///
    /// Fails with [`Error::Transport`] if the call fails and [`Error::Decode`] if the reply is
    /// not a single variant.
    pub async fn get(&self, interface: Interface, property: &str) -> Result<Value> {
        let target = interface.member(property);
        let reply = self
            .raw_call(
                &target,
                PROPERTIES_INTERFACE,
                "Get",
                &(interface.as_str(), property),
            )
            .await?;

        let value: OwnedValue = reply
            .body()
            .map_err(|source| Error::decode(target.as_str(), source))?;
        Ok(Value::from(value))
    }

    /// Writes `value` to `property` on `interface`.
    ///
    /// The write is not read back. Values without a wire form (maps, [`Value::Nil`] and
    /// [`Value::Unsupported`]) fail with [`Error::Cast`] before anything is sent.
    pub async fn set<V>(&self, interface: Interface, property: &str, value: V) -> Result<()>
    where
        V: Into<Value>,
    {
        let target = interface.member(property);
        let variant = value
            .into()
            .into_zvariant()
            .map_err(|value| Error::cast(target.as_str(), value, "D-Bus variant"))?;

        debug!("Setting {} to {:?}", target, variant);
        self.raw_call(
            &target,
            PROPERTIES_INTERFACE,
            "Set",
            &(interface.as_str(), property, variant),
        )
        .await
        .map(|_| ())
    }

    /// Reads `property` and projects it into `T`.
    ///
    /// A nil value fails with [`Error::NilValue`]; a value of another type fails with
    /// [`Error::Cast`] carrying the raw value.
    pub(crate) async fn get_cast<T: FromValue>(
        &self,
        interface: Interface,
        property: &str,
    ) -> Result<T> {
        let value = self.get(interface, property).await?;
        cast(interface.member(property), value)
    }

    /// Reads a property from `org.mpris.MediaPlayer2`.
    pub async fn get_root_property(&self, property: &str) -> Result<Value> {
        self.get(Interface::Root, property).await
    }

    /// Reads a property from `org.mpris.MediaPlayer2.Player`.
    pub async fn get_player_property(&self, property: &str) -> Result<Value> {
        self.get(Interface::Player, property).await
    }

    /// Reads a property from `org.mpris.MediaPlayer2.TrackList`.
    pub async fn get_track_list_property(&self, property: &str) -> Result<Value> {
        self.get(Interface::TrackList, property).await
    }

    /// Reads a property from `org.mpris.MediaPlayer2.Playlists`.
    pub async fn get_playlists_property(&self, property: &str) -> Result<Value> {
        self.get(Interface::Playlists, property).await
    }

    /// Writes a property on `org.mpris.MediaPlayer2`.
    pub async fn set_root_property<V: Into<Value>>(&self, property: &str, value: V) -> Result<()> {
        self.set(Interface::Root, property, value).await
    }

    /// Writes a property on `org.mpris.MediaPlayer2.Player`.
    pub async fn set_player_property<V: Into<Value>>(
        &self,
        property: &str,
        value: V,
    ) -> Result<()> {
        self.set(Interface::Player, property, value).await
    }

    /// Writes a property on `org.mpris.MediaPlayer2.TrackList`.
    pub async fn set_track_list_property<V: Into<Value>>(
        &self,
        property: &str,
        value: V,
    ) -> Result<()> {
        self.set(Interface::TrackList, property, value).await
    }

    /// Writes a property on `org.mpris.MediaPlayer2.Playlists`.
    pub async fn set_playlists_property<V: Into<Value>>(
        &self,
        property: &str,
        value: V,
    ) -> Result<()> {
        self.set(Interface::Playlists, property, value).await
    }

    pub(crate) async fn get_root_property_cast<T>(&self, property: &str) -> Result<T>
    where
        T: FromValue,
    {
        self.get_cast(Interface::Root, property).await
    }

    pub(crate) async fn get_player_property_cast<T>(&self, property: &str) -> Result<T>
    where
        T: FromValue,
    {
        self.get_cast(Interface::Player, property).await
    }

    pub(crate) async fn get_track_list_property_cast<T>(&self, property: &str) -> Result<T>
    where
        T: FromValue,
    {
        self.get_cast(Interface::TrackList, property).await
    }

    pub(crate) async fn get_playlists_property_cast<T>(&self, property: &str) -> Result<T>
    where
        T: FromValue,
    {
        self.get_cast(Interface::Playlists, property).await
    }
}

pub(crate) fn cast<T: FromValue>(target: String, value: Value) -> Result<T> {
    if value.is_nil() {
        return Err(Error::NilValue { target });
    }
    T::from_value(value).map_err(|value| Error::cast(target, value, T::NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOLUME: &str = "org.mpris.MediaPlayer2.Player.Volume";

    #[test]
    fn it_projects_matching_values() {
        let volume = cast::<f64>(VOLUME.into(), Value::Float(0.5)).unwrap();
        assert_eq!(volume, 0.5);
    }

    #[test]
    fn it_reports_nil_values() {
        match cast::<f64>(VOLUME.into(), Value::Nil) {
            Err(Error::NilValue { target }) => assert_eq!(target, VOLUME),
            other => panic!("expected a nil value error, got {:?}", other),
        }
    }

    #[test]
    fn it_reports_the_raw_value_and_target_type_on_mismatch() {
        match cast::<f64>(VOLUME.into(), Value::Boolean(true)) {
            Err(Error::Cast {
                target,
                value,
                expected,
            }) => {
                assert_eq!(target, VOLUME);
                assert_eq!(value, Value::Boolean(true));
                assert_eq!(expected, "f64");
            }
            other => panic!("expected a cast error, got {:?}", other),
        }
    }

    #[test]
    fn it_casts_statuses_as_strings() {
        let status = cast::<String>(
            "org.mpris.MediaPlayer2.Player.PlaybackStatus".into(),
            Value::from("Paused"),
        )
        .map(crate::PlaybackStatus::from)
        .unwrap();
        assert_eq!(status, crate::PlaybackStatus::Paused);
    }

    #[test]
    fn it_reports_short_type_names() {
        let target = String::from("org.mpris.MediaPlayer2.SupportedMimeTypes");
        match cast::<Vec<String>>(target, Value::from(1i64)) {
            Err(Error::Cast { expected, .. }) => assert_eq!(expected, "Vec<String>"),
            other => panic!("expected a cast error, got {:?}", other),
        }
        let target = String::from("org.mpris.MediaPlayer2.Identity");
        match cast::<String>(target, Value::Boolean(false)) {
            Err(Error::Cast { expected, .. }) => assert_eq!(expected, "String"),
            other => panic!("expected a cast error, got {:?}", other),
        }
    }
}
