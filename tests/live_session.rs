//! Tests against whatever player is running on the session bus.
//!
//! Every test returns early when there is no session bus or no player, so they pass on
//! headless machines.

use std::time::Duration;

use mpris_client::{Error, LoopStatus, Mpris, PlaybackStatus, Player};

async fn active_player() -> Option<Player> {
    let mpris = Mpris::new().await.ok()?;
    mpris.find_active().await.ok()
}

#[async_std::test]
async fn it_lists_only_mpris_names() {
    let mpris = match Mpris::new().await {
        Ok(mpris) => mpris,
        Err(_) => return,
    };

    for name in mpris.list().await.unwrap() {
        assert!(name.starts_with("org.mpris.MediaPlayer2"), "{}", name);
    }
}

#[async_std::test]
async fn it_round_trips_the_volume() {
    let player = match active_player().await {
        Some(player) => player,
        None => return,
    };
    let original = match player.get_volume().await {
        Ok(volume) => volume,
        Err(_) => return,
    };
    assert!((0.0..=2.0).contains(&original), "volume was {}", original);

    if player.set_volume(0.5).await.is_err() {
        return;
    }
    let volume = player.get_volume().await.unwrap();
    player.set_volume(original).await.unwrap();

    assert!((volume - 0.5).abs() < 1e-6, "volume was {}", volume);
}

#[async_std::test]
async fn it_reports_conforming_statuses() {
    let player = match active_player().await {
        Some(player) => player,
        None => return,
    };

    if let Ok(status) = player.get_playback_status().await {
        assert!(
            matches!(
                status,
                PlaybackStatus::Playing | PlaybackStatus::Paused | PlaybackStatus::Stopped
            ),
            "unexpected playback status {}",
            status
        );
    }

    if let Ok(status) = player.get_loop_status().await {
        assert!(
            matches!(
                status,
                LoopStatus::None | LoopStatus::Track | LoopStatus::Playlist
            ),
            "unexpected loop status {}",
            status
        );
    }
}

#[async_std::test]
async fn it_refuses_to_set_the_position_without_a_track() {
    let player = match active_player().await {
        Some(player) => player,
        None => return,
    };
    let metadata = match player.get_metadata().await {
        Ok(metadata) => metadata,
        Err(_) => return,
    };
    if metadata.track_id().is_ok() {
        return;
    }

    let error = player
        .set_position(&Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(error.is_missing_key(), "{}", error);
}

#[async_std::test]
async fn it_names_the_player_in_transport_errors() {
    let mpris = match Mpris::new().await {
        Ok(mpris) => mpris,
        Err(_) => return,
    };
    let player = mpris
        .player("org.mpris.MediaPlayer2.surely_not_running_here")
        .unwrap();

    match player.play().await {
        Err(Error::Transport { target, .. }) => {
            assert_eq!(target, "org.mpris.MediaPlayer2.Player.Play")
        }
        other => panic!("expected a transport error, got {:?}", other),
    }
}
