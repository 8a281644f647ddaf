//! APRS packet representation used on every queue of the router
//!
//! Packets travel as TNC2 text (`SOURCE>DEST,PATH:BODY`). The router only ever
//! looks at the header fields; the body is carried through opaquely.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Handle placed on the inter-task queues.
///
/// Packets are immutable once enqueued. A packet headed for a second egress is
/// cloned into a fresh `Arc` before it is changed; the beacon template is the one
/// value that is deliberately referenced from both egress queues at once.
pub type SharedMessage = Arc<AprsMessage>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AprsMessage {
    /// Originating station, e.g. `N0CALL-9`
    pub source: String,
    /// Destination field, may carry an SSID suffix (`APRS-1`)
    pub destination: String,
    /// Comma-joined digipeater path, empty when the packet carries none
    pub path: String,
    /// Opaque APRS payload
    pub body: String,
}

impl AprsMessage {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        path: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            path: path.into(),
            body: body.into(),
        }
    }

    /// TNC2 text form. The path separator is only written when a path exists.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Human readable multi-field form, used for display frames
    pub fn describe(&self) -> String {
        format!(
            "Source: {}, Destination: {}, Path: {}, Data: {}",
            self.source, self.destination, self.path, self.body
        )
    }

    pub fn into_shared(self) -> SharedMessage {
        Arc::new(self)
    }
}

impl Display for AprsMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}>{}", self.source, self.destination)?;
        if !self.path.is_empty() {
            write!(f, ",{}", self.path)?;
        }
        write!(f, ":{}", self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMessageError {
    pub message: String,
}

impl ParseMessageError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ParseMessageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseMessageError {}

impl FromStr for AprsMessage {
    type Err = ParseMessageError;

    /// Parse a TNC2 line such as `N0CALL-9>APRS,WIDE1-1:!4903.50N/07201.75W-`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim_end_matches(['\r', '\n']);
        let (header, body) = line
            .split_once(':')
            .ok_or_else(|| ParseMessageError::new(format!("missing ':' in {:?}", line)))?;
        let (source, rest) = header
            .split_once('>')
            .ok_or_else(|| ParseMessageError::new(format!("missing '>' in {:?}", header)))?;

        let (destination, path) = match rest.split_once(',') {
            Some((dest, path)) => (dest, path),
            None => (rest, ""),
        };

        if source.is_empty() {
            return Err(ParseMessageError::new("empty source callsign"));
        }
        if destination.is_empty() {
            return Err(ParseMessageError::new("empty destination"));
        }

        Ok(Self::new(source, destination, path, body))
    }
}
