use std::error::Error;
use std::time::Duration;

use futures::channel::mpsc;
use futures::StreamExt;
use mpris_client::Mpris;

const LISTEN_FOR: Duration = Duration::from_secs(30);

#[async_std::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let player = Mpris::new().await?.find_active().await?;
    println!(
        "Listening for seeks on {} for {:?}",
        player.bus_name(),
        LISTEN_FOR
    );

    let (sender, receiver) = mpsc::unbounded();
    let printer = receiver.for_each(|position: Duration| async move {
        println!("Seeked to {:.1}s", position.as_secs_f64());
    });

    let (result, ()) = futures::join!(
        player.on_seeked(async_std::task::sleep(LISTEN_FOR), sender),
        printer
    );
    result?;
    Ok(())
}
