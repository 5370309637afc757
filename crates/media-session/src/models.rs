use std::time::Duration;

/// Number of OS timeline ticks (100 ns each) per microsecond
const TICKS_PER_MICRO: u64 = 10;

/// Transport state of a media session, as reported by the OS
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Closed,
    Opened,
    Changing,
    Stopped,
    Playing,
    Paused,
}

impl PlaybackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Closed => "closed",
            PlaybackStatus::Opened => "opened",
            PlaybackStatus::Changing => "changing",
            PlaybackStatus::Stopped => "stopped",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
        }
    }
}

/// Media properties of a session (only the fields the output consumes)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaProperties {
    pub artist: String,
    pub title: String,
    pub genres: Vec<String>,
}

/// Raw timeline of a session. An `end_time` of zero means the source is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimelineProperties {
    pub position: Duration,
    pub end_time: Duration,
}

/// A bounded timeline: position and end time always travel together
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline {
    pub position: Duration,
    pub end_time: Duration,
}

impl Timeline {
    /// Returns `None` for live/unbounded sources (zero end time)
    pub fn bounded(props: TimelineProperties) -> Option<Self> {
        if props.end_time.is_zero() {
            return None;
        }
        Some(Self {
            position: props.position,
            end_time: props.end_time,
        })
    }
}

/// State of the host's current media session at query time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaSnapshot {
    pub artist: String,
    pub title: String,
    pub status: PlaybackStatus,
    pub genres: Vec<String>,
    pub timeline: Option<Timeline>,
}

impl MediaSnapshot {
    pub fn new(
        props: MediaProperties,
        status: PlaybackStatus,
        timeline: TimelineProperties,
    ) -> Self {
        Self {
            artist: props.artist,
            title: props.title,
            status,
            genres: props.genres,
            timeline: Timeline::bounded(timeline),
        }
    }
}

/// Convert an OS timeline value (100 ns ticks) into a `Duration`.
///
/// Negative tick counts clamp to zero.
pub fn duration_from_ticks(ticks: i64) -> Duration {
    let ticks = u64::try_from(ticks).unwrap_or(0);
    let micros = Duration::from_micros(ticks / TICKS_PER_MICRO);
    micros + Duration::from_nanos((ticks % TICKS_PER_MICRO) * 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_end_time_is_live() {
        let timeline = TimelineProperties {
            position: Duration::from_secs(42),
            end_time: Duration::ZERO,
        };
        assert_eq!(Timeline::bounded(timeline), None);
    }

    #[test]
    fn test_bounded_timeline_keeps_both_values() {
        let timeline = TimelineProperties {
            position: Duration::from_millis(130_500),
            end_time: Duration::from_secs(260),
        };
        let bounded = Timeline::bounded(timeline).unwrap();
        assert_eq!(bounded.position, Duration::from_millis(130_500));
        assert_eq!(bounded.end_time, Duration::from_secs(260));
    }

    #[test]
    fn test_snapshot_from_parts() {
        let props = MediaProperties {
            artist: "Boards of Canada".to_string(),
            title: "Roygbiv".to_string(),
            genres: vec!["Electronic".to_string(), "IDM".to_string()],
        };
        let snapshot =
            MediaSnapshot::new(props, PlaybackStatus::Playing, TimelineProperties::default());

        assert_eq!(snapshot.artist, "Boards of Canada");
        assert_eq!(snapshot.genres.len(), 2);
        assert_eq!(snapshot.timeline, None);
    }

    #[test]
    fn test_duration_from_ticks() {
        assert_eq!(duration_from_ticks(0), Duration::ZERO);
        assert_eq!(duration_from_ticks(10_000_000), Duration::from_secs(1));
        assert_eq!(duration_from_ticks(1_305_000_000), Duration::from_millis(130_500));
        assert_eq!(duration_from_ticks(15), Duration::from_nanos(1_500));
    }

    #[test]
    fn test_negative_ticks_clamp_to_zero() {
        assert_eq!(duration_from_ticks(-5_000), Duration::ZERO);
    }
}
