use thiserror::Error;

use crate::Value;

/// Result type used by every fallible operation in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Something went wrong when talking to a player.
///
/// Every variant names the D-Bus member (`interface.member`) or metadata key involved, so a
/// failure can be diagnosed without inspecting the transport.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote call itself failed: the player is gone, the bus is unreachable, or the
    /// player does not implement the method.
    #[error("D-Bus call to {target} failed: {source}")]
    Transport {
        /// The member that was called.
        target: String,
        /// The underlying transport error.
        #[source]
        source: zbus::Error,
    },

    /// The reply arrived but could not be unmarshalled into the expected shape.
    #[error("could not decode reply from {target}: {source}")]
    Decode {
        /// The member whose reply was decoded.
        target: String,
        /// The underlying unmarshalling error.
        #[source]
        source: zbus::Error,
    },

    /// The value was of a different type than the one requested.
    #[error("cannot cast {target} value {value:?} to {expected}")]
    Cast {
        /// The property or metadata entry being read or written.
        target: String,
        /// The raw value that failed to cast.
        value: Value,
        /// Name of the requested type.
        expected: &'static str,
    },

    /// The property is present but carries no value.
    #[error("{target} returned a nil value")]
    NilValue {
        /// The property that was read.
        target: String,
    },

    /// A metadata key is absent or nil. This is how "nothing is loaded" shows up.
    #[error("metadata is missing or nil for key {key:?}")]
    MissingKey {
        /// The requested metadata key.
        key: String,
    },

    /// A bus name or object path did not pass D-Bus validation.
    #[error("invalid D-Bus name {name:?}: {source}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        #[source]
        source: zbus::Error,
    },

    /// No MPRIS player is currently on the bus.
    #[error("no MPRIS player found on the bus")]
    NoPlayerFound,
}

impl Error {
    pub(crate) fn transport(target: impl Into<String>, source: zbus::Error) -> Self {
        Error::Transport {
            target: target.into(),
            source,
        }
    }

    pub(crate) fn decode(target: impl Into<String>, source: zbus::Error) -> Self {
        Error::Decode {
            target: target.into(),
            source,
        }
    }

    pub(crate) fn cast(target: impl Into<String>, value: Value, expected: &'static str) -> Self {
        Error::Cast {
            target: target.into(),
            value,
            expected,
        }
    }

    pub(crate) fn invalid_name(name: impl Into<String>, source: impl Into<zbus::Error>) -> Self {
        Error::InvalidName {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Returns `true` if this error means a metadata key was absent, which is the normal
    /// state of a player that has nothing loaded.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, Error::MissingKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_names_the_target_in_messages() {
        let error = Error::cast(
            "org.mpris.MediaPlayer2.Player.Volume",
            Value::String("loud".into()),
            "f64",
        );
        assert_eq!(
            error.to_string(),
            r#"cannot cast org.mpris.MediaPlayer2.Player.Volume value String("loud") to f64"#
        );

        let error = Error::MissingKey {
            key: "mpris:trackid".into(),
        };
        assert_eq!(
            error.to_string(),
            r#"metadata is missing or nil for key "mpris:trackid""#
        );
        assert!(error.is_missing_key());
    }

    #[test]
    fn it_keeps_the_transport_error_as_source() {
        use std::error::Error as _;

        let error = Error::transport(
            "org.mpris.MediaPlayer2.Player.Next",
            zbus::Error::Failure("player went away".into()),
        );
        assert!(error.source().is_some());
        assert!(error
            .to_string()
            .starts_with("D-Bus call to org.mpris.MediaPlayer2.Player.Next failed"));
    }
}
