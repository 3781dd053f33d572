use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::{ready, Sink, Stream};
use log::{debug, trace};
use zbus::zvariant::OwnedValue;
use zbus::{Message, Proxy, SignalStream};

use crate::signal::forward;
use crate::{Error, Interface, Player, Result, Value, MPRIS2_PATH, PROPERTIES_INTERFACE};

/// Properties of one MPRIS interface that changed together.
pub type PropertyChanges = (Interface, HashMap<String, Value>);

/// The arguments of one `org.freedesktop.DBus.Properties.PropertiesChanged` signal.
///
/// The signal is `(sa{sv}as)`: an interface name, the changed values and the names of
/// properties that changed without a value. Only the first two are kept.
pub trait PropertiesChangedPayload {
    /// The changed values, or `None` if the payload is malformed or belongs to an interface
    /// other than the four MPRIS ones.
    fn changes(&self) -> Option<PropertyChanges>;
}

impl PropertiesChangedPayload for Arc<Message> {
    fn changes(&self) -> Option<PropertyChanges> {
        let (interface, changed, _invalidated) = self
            .body::<(String, HashMap<String, OwnedValue>, Vec<String>)>()
            .ok()?;
        let interface = Interface::from_name(&interface)?;
        let changed = changed
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();
        Some((interface, changed))
    }
}

/// Property changes reported by a player, one item per `PropertiesChanged` signal.
///
/// Created by [`Player::properties_changed`]. Signals about non-MPRIS interfaces and malformed
/// signals are skipped. Like [`SeekedStream`](crate::SeekedStream), the stream ends with the
/// connection.
pub struct PropertiesChangedStream<S = SignalStream<'static>> {
    source: Pin<Box<S>>,
}

impl<S> PropertiesChangedStream<S>
where
    S: Stream,
    S::Item: PropertiesChangedPayload,
{
    /// Decodes property changes out of a stream of raw signal payloads.
    pub fn new(source: S) -> Self {
        PropertiesChangedStream {
            source: Box::pin(source),
        }
    }
}

impl<S> Stream for PropertiesChangedStream<S>
where
    S: Stream,
    S::Item: PropertiesChangedPayload,
{
    type Item = PropertyChanges;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match ready!(self.source.as_mut().poll_next(cx)) {
                Some(payload) => match payload.changes() {
                    Some(changes) => {
                        trace!("{} properties changed on {}", changes.1.len(), changes.0);
                        return Poll::Ready(Some(changes));
                    }
                    None => debug!("Skipping PropertiesChanged signal"),
                },
                None => return Poll::Ready(None),
            }
        }
    }
}

impl<S> fmt::Debug for PropertiesChangedStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertiesChangedStream").finish_non_exhaustive()
    }
}

impl Player {
    /// Subscribes to property changes on the player's MPRIS interfaces.
    ///
    /// `Position` never shows up here; players report jumps through [`Player::seeked`].
    ///
    /// See: [D-Bus specification about
    /// `PropertiesChanged`](https://dbus.freedesktop.org/doc/dbus-specification.html#standard-interfaces-properties)
    pub async fn properties_changed(&self) -> Result<PropertiesChangedStream> {
        let target = format!("{}.PropertiesChanged", PROPERTIES_INTERFACE);
        debug!("Subscribing to {} on {}", target, self.bus_name());

        let proxy = Proxy::new(
            self.connection(),
            self.bus_name().to_owned(),
            MPRIS2_PATH,
            PROPERTIES_INTERFACE,
        )
        .await
        .map_err(|source| Error::transport(target.as_str(), source))?;

        let signals = proxy
            .receive_signal("PropertiesChanged")
            .await
            .map_err(|source| Error::transport(target.as_str(), source))?;
        Ok(PropertiesChangedStream::new(signals))
    }

    /// Forwards every property change into `output` until `cancel` resolves.
    ///
    /// Stops the same way as [`Player::on_seeked`].
    pub async fn on_properties_changed<C, O>(&self, cancel: C, output: O) -> Result<()>
    where
        C: Future<Output = ()>,
        O: Sink<PropertyChanges> + Unpin,
    {
        let changes = self.properties_changed().await?;
        forward("PropertiesChanged", changes, cancel, output).await;
        Ok(())
    }
}
