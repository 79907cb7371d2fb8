//! Saved playback state carried across screen recreation.

use serde::{Deserialize, Serialize};
use crate::core::time::Millis;

/// Flat snapshot of the screen, keyed the way the persistence channel stores it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub position: Millis,
    pub duration: Millis,
    pub current_time_text: String,
    pub was_playing: bool,
    pub is_full_screen: bool,
}
