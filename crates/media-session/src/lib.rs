//! Single-shot "now playing" detection
//!
//! This crate queries the host's media session subsystem for the current
//! session and normalizes what it finds into a small, fixed JSON shape:
//! - Windows: System Media Transport Controls (SMTC)
//!
//! The query is written against the [`SessionManager`] and [`MediaSession`]
//! traits, so it runs the same way against the OS and against test fakes.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

pub mod error;
pub mod models;
pub mod normalize;

pub use error::{QueryError, Result};
pub use models::*;
pub use normalize::{duration_to_millis, normalize, NowPlaying, Position, LIVE_MARKER};

// Platform-specific modules
#[cfg(target_os = "windows")]
pub mod smtc;

/// Upper bound on a whole query when none is configured
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Entry point to the OS media session subsystem
#[async_trait(?Send)]
pub trait SessionManager {
    type Session: MediaSession;

    /// The current session, or `None` when no application is registered as a media source
    async fn current_session(&self) -> Result<Option<Self::Session>>;
}

/// A single media session handle
#[async_trait(?Send)]
pub trait MediaSession {
    /// Artist, title and genres of the current item
    async fn media_properties(&self) -> Result<MediaProperties>;

    fn playback_status(&self) -> Result<PlaybackStatus>;

    fn timeline_properties(&self) -> Result<TimelineProperties>;
}

/// Options for [`query_system`]
#[derive(Clone, Debug)]
pub struct QueryOptions {
    /// Bound on the manager request plus the session reads
    pub timeout: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

/// Take a snapshot of the current media session, if there is one
pub async fn query_current_media<M>(manager: &M) -> Result<Option<MediaSnapshot>>
where
    M: SessionManager + ?Sized,
{
    let Some(session) = manager.current_session().await? else {
        debug!("No current media session");
        return Ok(None);
    };

    let props = session.media_properties().await?;
    let status = session.playback_status()?;
    let timeline = session.timeline_properties()?;

    debug!(
        "Media session: artist={}, title={}, status={}, genres={:?}, position={:?}, end_time={:?}",
        props.artist,
        props.title,
        status.as_str(),
        props.genres,
        timeline.position,
        timeline.end_time
    );

    Ok(Some(MediaSnapshot::new(props, status, timeline)))
}

/// Query `manager` and normalize the result
pub async fn now_playing<M>(manager: &M) -> Result<NowPlaying>
where
    M: SessionManager + ?Sized,
{
    let snapshot = query_current_media(manager).await?;
    Ok(normalize(snapshot.as_ref()))
}

/// [`now_playing`], failing with [`QueryError::Timeout`] once `timeout` expires
pub async fn now_playing_within<M>(manager: &M, timeout: Duration) -> Result<NowPlaying>
where
    M: SessionManager + ?Sized,
{
    bounded(timeout, now_playing(manager)).await
}

/// Query the host's media session subsystem, bounded by `options.timeout`
pub async fn query_system(options: &QueryOptions) -> Result<NowPlaying> {
    bounded(options.timeout, query_platform()).await
}

async fn bounded<F>(timeout: Duration, query: F) -> Result<NowPlaying>
where
    F: Future<Output = Result<NowPlaying>>,
{
    tokio::time::timeout(timeout, query)
        .await
        .map_err(|_| QueryError::Timeout(timeout))?
}

#[cfg(target_os = "windows")]
async fn query_platform() -> Result<NowPlaying> {
    let manager = smtc::SmtcManager::request().await?;
    now_playing(&manager).await
}

#[cfg(not(target_os = "windows"))]
async fn query_platform() -> Result<NowPlaying> {
    Err(QueryError::Unsupported)
}
