//! Digipeater path inspection helpers
//!
//! A path is the comma-joined list after the destination field, e.g.
//! `WIDE1-1,qAR,N0CALL-10` or `DB0ABC*,WIDE2-1`. A trailing `*` marks a hop
//! that has already been transmitted.

use serde::{Deserialize, Serialize};

/// Path tokens that forbid gating a packet to APRS-IS
pub const NO_GATE_TOKENS: [&str; 3] = ["RFONLY", "NOGATE", "TCPIP"];

/// Generic one-hop alias handled by the alias digipeater
pub const WIDE1_ALIAS: &str = "WIDE1-1";

/// q-construct appended when a packet heard on RF is injected into APRS-IS
pub const GATE_Q_CONSTRUCT: &str = "qAR";

/// How path membership is tested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatching {
    /// Whole comma-separated tokens, ignoring the repeated marker `*`
    #[default]
    Token,
    /// Raw substring search over the joined path
    Substring,
}

impl PathMatching {
    /// Whether `needle` occurs in `path` under this matching mode
    pub fn contains(self, path: &str, needle: &str) -> bool {
        match self {
            PathMatching::Token => tokens(path).any(|token| token == needle),
            PathMatching::Substring => path.contains(needle),
        }
    }

    /// True when the path carries one of [`NO_GATE_TOKENS`]
    pub fn forbids_gating(self, path: &str) -> bool {
        NO_GATE_TOKENS
            .iter()
            .any(|token| self.contains(path, token))
    }
}

impl std::fmt::Display for PathMatching {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathMatching::Token => write!(f, "token"),
            PathMatching::Substring => write!(f, "substring"),
        }
    }
}

/// Iterate over the non-empty hops of a path with any `*` marker removed
pub fn tokens(path: &str) -> impl Iterator<Item = &str> {
    path.split(',')
        .map(|token| token.trim_end_matches('*'))
        .filter(|token| !token.is_empty())
}

/// Append `qAR,<callsign>` to a path, inserting a separator only when needed
pub fn append_gate_marker(path: &str, callsign: &str) -> String {
    if path.is_empty() {
        format!("{},{}", GATE_Q_CONSTRUCT, callsign)
    } else {
        format!("{},{},{}", path, GATE_Q_CONSTRUCT, callsign)
    }
}

/// Path written on a packet this station has just repeated
pub fn repeated_by(callsign: &str) -> String {
    format!("{}*", callsign)
}

/// Destination field split at its first hyphen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination<'a> {
    pub base: &'a str,
    pub ssid: Option<&'a str>,
}

impl<'a> Destination<'a> {
    pub fn split(destination: &'a str) -> Self {
        match destination.split_once('-') {
            Some((base, ssid)) => Self {
                base,
                ssid: Some(ssid),
            },
            None => Self {
                base: destination,
                ssid: None,
            },
        }
    }

    pub fn has_ssid(&self) -> bool {
        self.ssid.is_some()
    }

    /// Remove the hyphen and the single character following it.
    ///
    /// Only single-digit SSIDs are consumed; anything after the first SSID
    /// character is kept, so `APRS-12` becomes `APRS2`. Returns `None` when the
    /// destination carries no hyphen.
    pub fn strip_ssid_digit(&self) -> Option<String> {
        let ssid = self.ssid?;
        let mut rest = ssid.chars();
        rest.next();
        Some(format!("{}{}", self.base, rest.as_str()))
    }
}
