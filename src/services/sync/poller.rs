// Periodic playback time poll
// Runs from widget readiness until its token is cancelled

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::models::PlayerState;

use super::controller::Inner;

pub(super) fn spawn(inner: Arc<Inner>, period: Duration, token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Time poll stopped");
                    break;
                }
                _ = ticker.tick() => poll_once(&inner),
            }
        }
    })
}

// Only a playing widget with a started clock produces samples
fn poll_once(inner: &Inner) {
    if inner.player.state() != Some(PlayerState::Playing) {
        return;
    }
    if let Some(time) = inner.player.current_time() {
        if time > 0.0 {
            inner.on_time_sample(time);
        }
    }
}
