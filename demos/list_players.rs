use mpris_client::Mpris;
use std::error::Error;

#[async_std::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mpris = Mpris::new().await?;
    for player in mpris.players().await? {
        let status = player.get_playback_status().await?;
        println!("{} [{}]", player.bus_name(), status);
    }
    Ok(())
}
