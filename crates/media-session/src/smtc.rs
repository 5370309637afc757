//! Current media session lookup through System Media Transport Controls (SMTC)
//!
//! One manager request, then one read of the current session's properties,
//! playback status and timeline. Any application that publishes to SMTC
//! (Spotify, browsers, media players) shows up here.

use crate::{
    duration_from_ticks, MediaProperties, MediaSession, PlaybackStatus, QueryError, Result,
    SessionManager, TimelineProperties,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use windows::{
    core::Error as WinError,
    Media::Control::{
        GlobalSystemMediaTransportControlsSession,
        GlobalSystemMediaTransportControlsSessionManager,
        GlobalSystemMediaTransportControlsSessionPlaybackStatus as SmtcPlaybackStatus,
    },
};

/// The SMTC session manager
pub struct SmtcManager {
    manager: GlobalSystemMediaTransportControlsSessionManager,
}

impl SmtcManager {
    /// Request the session manager from the OS
    pub async fn request() -> Result<Self> {
        let manager = GlobalSystemMediaTransportControlsSessionManager::RequestAsync()
            .map_err(manager_unavailable)?
            .await
            .map_err(manager_unavailable)?;

        debug!("SMTC session manager ready");
        Ok(Self { manager })
    }
}

#[async_trait(?Send)]
impl SessionManager for SmtcManager {
    type Session = SmtcSession;

    async fn current_session(&self) -> Result<Option<SmtcSession>> {
        match self.manager.GetCurrentSession() {
            Ok(session) => {
                if let Ok(source) = session.SourceAppUserModelId() {
                    debug!("Current SMTC session from {}", source);
                }
                Ok(Some(SmtcSession { session }))
            }
            // A null session surfaces as an error carrying a success code
            Err(e) if e.code().is_ok() => Ok(None),
            Err(e) => Err(QueryError::api("GetCurrentSession", e)),
        }
    }
}

/// A handle on the current SMTC session
pub struct SmtcSession {
    session: GlobalSystemMediaTransportControlsSession,
}

#[async_trait(?Send)]
impl MediaSession for SmtcSession {
    async fn media_properties(&self) -> Result<MediaProperties> {
        let props = self
            .session
            .TryGetMediaPropertiesAsync()
            .map_err(|e| QueryError::api("TryGetMediaPropertiesAsync", e))?
            .await
            .map_err(|e| QueryError::api("TryGetMediaPropertiesAsync", e))?;

        let artist = props
            .Artist()
            .map_err(|e| QueryError::api("Artist", e))?
            .to_string_lossy();

        let title = props
            .Title()
            .map_err(|e| QueryError::api("Title", e))?
            .to_string_lossy();

        let genres = props
            .Genres()
            .map_err(|e| QueryError::api("Genres", e))?
            .into_iter()
            .map(|genre| genre.to_string_lossy())
            .collect();

        Ok(MediaProperties { artist, title, genres })
    }

    fn playback_status(&self) -> Result<PlaybackStatus> {
        let status = self
            .session
            .GetPlaybackInfo()
            .and_then(|info| info.PlaybackStatus())
            .map_err(|e| QueryError::api("GetPlaybackInfo", e))?;

        from_smtc_status(status)
    }

    fn timeline_properties(&self) -> Result<TimelineProperties> {
        let timeline = self
            .session
            .GetTimelineProperties()
            .map_err(|e| QueryError::api("GetTimelineProperties", e))?;

        let position = timeline
            .Position()
            .map_err(|e| QueryError::api("Position", e))?;
        let end_time = timeline
            .EndTime()
            .map_err(|e| QueryError::api("EndTime", e))?;

        Ok(TimelineProperties {
            position: ticks_to_duration("position", position.Duration),
            end_time: ticks_to_duration("end time", end_time.Duration),
        })
    }
}

fn manager_unavailable(e: WinError) -> QueryError {
    QueryError::ManagerUnavailable(e.to_string())
}

fn ticks_to_duration(field: &str, ticks: i64) -> Duration {
    if ticks < 0 {
        warn!("SMTC reported a negative {} ({} ticks), using zero", field, ticks);
    }
    duration_from_ticks(ticks)
}

fn from_smtc_status(status: SmtcPlaybackStatus) -> Result<PlaybackStatus> {
    match status {
        SmtcPlaybackStatus::Closed => Ok(PlaybackStatus::Closed),
        SmtcPlaybackStatus::Opened => Ok(PlaybackStatus::Opened),
        SmtcPlaybackStatus::Changing => Ok(PlaybackStatus::Changing),
        SmtcPlaybackStatus::Stopped => Ok(PlaybackStatus::Stopped),
        SmtcPlaybackStatus::Playing => Ok(PlaybackStatus::Playing),
        SmtcPlaybackStatus::Paused => Ok(PlaybackStatus::Paused),
        other => Err(QueryError::api(
            "PlaybackStatus",
            format!("unknown playback status {}", other.0),
        )),
    }
}
