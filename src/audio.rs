//! Edge-triggered audio cue
//!
//! The cue is forwarded synchronously. Player failures are swallowed so the
//! animation never stalls on audio; the next rising edge simply tries again.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::SwordConfig;

/// Serial MP3 player collaborator
pub trait AudioPlayer {
    type Error;

    /// Set the output volume (0-30)
    fn configure(&mut self, volume: u8) -> Result<(), Self::Error>;

    /// Wait for the player's acknowledgement on every request
    fn set_synchronous(&mut self, synchronous: bool) -> Result<(), Self::Error>;

    /// Start playing a track, restarting it if already playing
    fn play_track(&mut self, track: u16) -> Result<(), Self::Error>;
}

/// Forwards cue requests to the audio player
pub struct CueTrigger<A> {
    player: A,
    dispatched: u32,
    failed: u32,
}

impl<A: AudioPlayer> CueTrigger<A> {
    pub const fn new(player: A) -> Self {
        Self {
            player,
            dispatched: 0,
            failed: 0,
        }
    }

    /// Put the player in synchronous mode and set the volume
    ///
    /// Returns `false` if the player rejected either request.
    pub fn init(&mut self, config: &SwordConfig) -> bool {
        let synchronous = self.player.set_synchronous(true).is_ok();
        let volume = self.player.configure(config.volume).is_ok();
        #[cfg(feature = "esp32-log")]
        {
            if !(synchronous && volume) {
                println!("[CueTrigger.init] audio player did not accept setup");
            }
        }
        synchronous && volume
    }

    /// Play `track` now
    ///
    /// Returns whether the player accepted the request.
    pub fn request_cue(&mut self, track: u16) -> bool {
        self.dispatched = self.dispatched.wrapping_add(1);
        if self.player.play_track(track).is_ok() {
            return true;
        }
        self.failed = self.failed.wrapping_add(1);
        #[cfg(feature = "esp32-log")]
        println!("[CueTrigger.request_cue] track {} failed", track);
        false
    }

    /// Number of cues forwarded to the player
    pub const fn dispatched(&self) -> u32 {
        self.dispatched
    }

    /// Number of cues the player rejected
    pub const fn failed(&self) -> u32 {
        self.failed
    }

    pub fn player(&self) -> &A {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut A {
        &mut self.player
    }
}
