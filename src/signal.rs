use std::future::Future;

use futures::future::{select, Either};
use futures::{pin_mut, Sink, SinkExt, Stream, StreamExt};
use log::debug;

/// Moves items from `source` into `output` until either side closes or `cancel` resolves.
///
/// `name` is the signal being forwarded, for logging.
pub(crate) async fn forward<T, P, C, O>(name: &str, mut source: P, cancel: C, mut output: O)
where
    P: Stream<Item = T> + Unpin,
    C: Future<Output = ()>,
    O: Sink<T> + Unpin,
{
    pin_mut!(cancel);
    loop {
        let item = match select(cancel.as_mut(), source.next()).await {
            Either::Left(_) => {
                debug!("{} subscription cancelled", name);
                return;
            }
            Either::Right((None, _)) => {
                debug!("{} signal stream closed", name);
                return;
            }
            Either::Right((Some(item), _)) => item,
        };

        match select(cancel.as_mut(), output.send(item)).await {
            Either::Left(_) => {
                debug!("{} subscription cancelled", name);
                return;
            }
            Either::Right((Err(_), _)) => {
                debug!("{} receiver went away", name);
                return;
            }
            Either::Right((Ok(()), _)) => {}
        }
    }
}
