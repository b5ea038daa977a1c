//! Fire-and-forget sound triggers.
//!
//! The host owns the actual audio engine; this side only names events.

use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};

/// Played when a menu button opens an entry dialog.
pub const SFX_RENAME_START: &str = "event:/ui/main/savefile_rename_start";
/// Played when an orb finishes its travel.
pub const SFX_ORB_ABSORBED: &str = "event:/new_content/char/tutorial_ghost/jump";

/// Receives play requests by event name. Never blocks, never reports failure.
pub trait AudioSink {
    fn play(&self, event: &str);
}

/// Discards every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _event: &str) {}
}

/// Forwards event names over a bounded channel to whichever thread drives
/// the host's audio. Requests are dropped when the queue is full.
#[derive(Debug, Clone)]
pub struct ChannelAudio {
    tx: Sender<String>,
}

impl ChannelAudio {
    /// Create a sink and the receiving end the audio driver drains.
    pub fn new(capacity: usize) -> (Self, Receiver<String>) {
        let (tx, rx) = bounded(capacity);
        (Self { tx }, rx)
    }
}

impl AudioSink for ChannelAudio {
    fn play(&self, event: &str) {
        match self.tx.try_send(event.to_string()) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                log::debug!("audio queue full, dropping {dropped}");
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_audio_delivers_in_order() {
        let (audio, rx) = ChannelAudio::new(4);
        audio.play("a");
        audio.play("b");
        assert_eq!(rx.try_recv().unwrap(), "a");
        assert_eq!(rx.try_recv().unwrap(), "b");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_audio_drops_when_full() {
        let (audio, rx) = ChannelAudio::new(1);
        audio.play("first");
        audio.play("second");
        assert_eq!(rx.len(), 1);
        assert_eq!(rx.recv().unwrap(), "first");
    }

    #[test]
    fn test_channel_audio_survives_disconnect() {
        let (audio, rx) = ChannelAudio::new(1);
        drop(rx);
        audio.play("nobody listening");
    }
}
