//! Sound-effect events.
//!
//! The simulation emits fire-and-forget [`SoundEffect`] messages; playback is
//! a presentation concern.  The shipped sink just logs at debug level, which
//! keeps the event channel exercised and observable without an asset
//! pipeline.

use bevy::prelude::*;

/// A sound cue emitted by the simulation.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A bullet was fired.
    Fire,
    /// The player took contact damage.
    Hurt,
    /// A pickup was consumed.
    Collect,
    /// Meds were delivered at the home base.
    DropOff,
    /// A med was used to heal.
    UseItem,
}

/// Debug-log every sound cue; stands in for an audio backend.
pub fn sound_sink_system(mut cues: MessageReader<SoundEffect>) {
    for cue in cues.read() {
        debug!("sound: {:?}", cue);
    }
}
