//! Normalization of a media snapshot into the fixed JSON output shape
//!
//! The output is consumed by external displays (status bars and the like), so
//! key names, capitalization, key order and the two `Position` shapes never change:
//!
//! - `{"Paused":true}`
//! - `{"Author":"..","Title":"..","Position":["LIVE"]}`
//! - `{"Author":"..","Title":"..","Position":[position_ms,duration_ms]}`

use crate::models::{MediaSnapshot, PlaybackStatus};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::time::Duration;

/// Marker emitted in place of a position for unbounded sources
pub const LIVE_MARKER: &str = "LIVE";

/// Playback position in whole milliseconds, or live
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Live,
    Bounded { position_ms: u64, duration_ms: u64 },
}

/// What the host is currently playing, in output form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NowPlaying {
    /// No session, or the session is paused
    Paused,
    Playing {
        author: String,
        title: String,
        position: Position,
    },
}

impl NowPlaying {
    /// Encode as a compact JSON document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Position::Live => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(LIVE_MARKER)?;
                seq.end()
            }
            Position::Bounded { position_ms, duration_ms } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(position_ms)?;
                seq.serialize_element(duration_ms)?;
                seq.end()
            }
        }
    }
}

impl Serialize for NowPlaying {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NowPlaying::Paused => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Paused", &true)?;
                map.end()
            }
            NowPlaying::Playing { author, title, position } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("Author", author)?;
                map.serialize_entry("Title", title)?;
                map.serialize_entry("Position", position)?;
                map.end()
            }
        }
    }
}

/// Map an optional snapshot onto the output shape
pub fn normalize(snapshot: Option<&MediaSnapshot>) -> NowPlaying {
    let Some(snapshot) = snapshot else {
        return NowPlaying::Paused;
    };

    if snapshot.status == PlaybackStatus::Paused {
        return NowPlaying::Paused;
    }

    let position = match snapshot.timeline {
        Some(timeline) => Position::Bounded {
            position_ms: duration_to_millis(timeline.position),
            duration_ms: duration_to_millis(timeline.end_time),
        },
        None => Position::Live,
    };

    NowPlaying::Playing {
        author: snapshot.artist.clone(),
        title: snapshot.title.clone(),
        position,
    }
}

/// Whole milliseconds in `duration`, truncating any sub-millisecond remainder
pub fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
