use log::debug;
use zbus::Connection;

use crate::proxies::DBusProxy;
use crate::{Error, Player, Result, MPRIS2_PREFIX};

const LIST_NAMES: &str = "org.freedesktop.DBus.ListNames";

/// Used to find [`Player`]s on a D-Bus connection.
///
/// ```rust,no_run
/// # async fn run() -> mpris_client::Result<()> {
/// use mpris_client::Mpris;
///
/// let mpris = Mpris::new().await?;
/// for player in mpris.players().await? {
///     println!("{}: {}", player.bus_name(), player.identity().await?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Mpris {
    connection: Connection,
}

impl Mpris {
    /// Connects to the session bus.
    ///
    /// Use [`Mpris::new_from_connection`] to provide the connection yourself.
    pub async fn new() -> Result<Self> {
        let connection = Connection::session()
            .await
            .map_err(|source| Error::transport("session bus", source))?;
        Ok(Mpris::new_from_connection(connection))
    }

    /// Uses an existing connection. Every [`Player`] created from this shares it.
    pub fn new_from_connection(connection: Connection) -> Self {
        Mpris { connection }
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Lists the bus names of all MPRIS players currently on the bus.
    ///
    /// Only names are listed; no player is contacted. The order is the one the bus reports.
    pub async fn list(&self) -> Result<Vec<String>> {
        debug!("Calling {}", LIST_NAMES);
        let proxy = DBusProxy::new(&self.connection)
            .await
            .map_err(|source| Error::transport(LIST_NAMES, source))?;
        let names = proxy
            .list_names()
            .await
            .map_err(|source| Error::transport(LIST_NAMES, source))?;
        Ok(filter_player_names(names))
    }

    /// Creates a [`Player`] for every listed player.
    pub async fn players(&self) -> Result<Vec<Player>> {
        self.list()
            .await?
            .into_iter()
            .map(|bus_name| self.player(bus_name))
            .collect()
    }

    /// Creates a [`Player`] for `bus_name` without checking that it exists.
    pub fn player<S: Into<String>>(&self, bus_name: S) -> Result<Player> {
        Player::new(self.connection.clone(), bus_name)
    }

    /// Try to find the "active" player on the bus.
    ///
    /// MPRIS has no concept of an active player, so this currently returns the first listed
    /// one. That choice may become smarter later; don't rely on it.
    pub async fn find_active(&self) -> Result<Player> {
        match self.list().await?.into_iter().next() {
            Some(bus_name) => self.player(bus_name),
            None => Err(Error::NoPlayerFound),
        }
    }
}

fn filter_player_names(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| name.starts_with(MPRIS2_PREFIX))
        .collect()
}
