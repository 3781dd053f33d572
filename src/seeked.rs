use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::{ready, Sink, Stream};
use log::{debug, trace};
use zbus::{Message, Proxy, SignalStream};

use crate::extensions::DurationExtensions;
use crate::signal::forward;
use crate::{Error, Interface, Player, Result, Value, MPRIS2_PATH, PLAYER_INTERFACE};

/// The arguments of one `Seeked` signal, in any form that can be decoded into a position.
///
/// `Seeked` carries a single position in microseconds. Anything else (no arguments, more than
/// one, or a non-integer) is malformed and decodes to `None`.
pub trait SeekedPayload {
    /// The new position, or `None` if the payload is malformed.
    fn position(&self) -> Option<Duration>;
}

impl SeekedPayload for Arc<Message> {
    fn position(&self) -> Option<Duration> {
        let signature = self.body_signature().ok()?;
        match signature.as_str() {
            "x" => self.body::<i64>().ok().map(Duration::from_micros_signed),
            "t" => self.body::<u64>().ok().map(Duration::from_micros),
            "i" => self
                .body::<i32>()
                .ok()
                .map(|micros| Duration::from_micros_signed(micros.into())),
            "u" => self
                .body::<u32>()
                .ok()
                .map(|micros| Duration::from_micros(micros.into())),
            _ => None,
        }
    }
}

impl SeekedPayload for Vec<Value> {
    fn position(&self) -> Option<Duration> {
        match self.as_slice() {
            [micros] => micros.clone().into_i64().ok().map(Duration::from_micros_signed),
            _ => None,
        }
    }
}

/// Positions reported by a player's `Seeked` signal.
///
/// Created by [`Player::seeked`]. Malformed signals are skipped. The stream ends when the
/// connection goes away and cannot be restarted; dropping it removes the match rule from the
/// bus.
pub struct SeekedStream<S = SignalStream<'static>> {
    source: Pin<Box<S>>,
}

impl<S> SeekedStream<S>
where
    S: Stream,
    S::Item: SeekedPayload,
{
    /// Decodes positions out of a stream of raw signal payloads.
    pub fn new(source: S) -> Self {
        SeekedStream {
            source: Box::pin(source),
        }
    }
}

impl<S> Stream for SeekedStream<S>
where
    S: Stream,
    S::Item: SeekedPayload,
{
    type Item = Duration;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match ready!(self.source.as_mut().poll_next(cx)) {
                Some(payload) => match payload.position() {
                    Some(position) => {
                        trace!("Seeked to {:?}", position);
                        return Poll::Ready(Some(position));
                    }
                    None => debug!("Skipping malformed Seeked signal"),
                },
                None => return Poll::Ready(None),
            }
        }
    }
}

impl<S> fmt::Debug for SeekedStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeekedStream").finish_non_exhaustive()
    }
}

impl Player {
    /// Subscribes to the player's `Seeked` signal.
    ///
    /// Only seeks that happen after this returns are reported. Use [`Player::get_position`]
    /// to learn the current position.
    ///
    /// See: [MPRIS2 specification about `Seeked`](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#Signal:Seeked)
    pub async fn seeked(&self) -> Result<SeekedStream> {
        let target = Interface::Player.member("Seeked");
        debug!("Subscribing to {} on {}", target, self.bus_name());

        let proxy = Proxy::new(
            self.connection(),
            self.bus_name().to_owned(),
            MPRIS2_PATH,
            PLAYER_INTERFACE,
        )
        .await
        .map_err(|source| Error::transport(target.as_str(), source))?;

        let signals = proxy
            .receive_signal("Seeked")
            .await
            .map_err(|source| Error::transport(target.as_str(), source))?;
        Ok(SeekedStream::new(signals))
    }

    /// Forwards every `Seeked` position into `output` until `cancel` resolves.
    ///
    /// Also returns once the connection closes or `output` stops accepting positions. The
    /// subscription is released before this returns. Only subscribing can fail.
    ///
    /// ```rust,no_run
    /// # async fn run(player: mpris_client::Player) -> mpris_client::Result<()> {
    /// use futures::channel::{mpsc, oneshot};
    /// use futures::FutureExt;
    ///
    /// let (positions, _received) = mpsc::unbounded();
    /// let (_stop, stopped) = oneshot::channel::<()>();
    /// player.on_seeked(stopped.map(|_| ()), positions).await
    /// # }
    /// ```
    pub async fn on_seeked<C, O>(&self, cancel: C, output: O) -> Result<()>
    where
        C: Future<Output = ()>,
        O: Sink<Duration> + Unpin,
    {
        let positions = self.seeked().await?;
        forward("Seeked", positions, cancel, output).await;
        Ok(())
    }
}
