use mpris_client::{Mpris, Player};
use std::error::Error;

#[async_std::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mpris = Mpris::new().await?;
    let mut total = 0;

    for player in mpris.players().await? {
        print_metadata(player).await?;
        total += 1;
    }

    if total == 0 {
        println!("No players found");
    }

    Ok(())
}

async fn print_metadata(player: Player) -> Result<(), Box<dyn Error>> {
    println!(
        "Player: {} ({})",
        player.identity().await?,
        player.bus_name()
    );

    let metadata = player.get_metadata().await?;
    match metadata.title() {
        Ok(title) => println!("Title: {}", title),
        Err(error) if error.is_missing_key() => println!("Nothing is playing"),
        Err(error) => return Err(error.into()),
    }
    println!("Metadata:\n{:#?}", metadata);
    Ok(())
}
