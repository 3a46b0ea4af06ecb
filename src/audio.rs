//! Sound output for [`SoundCue`]s.
//!
//! The terminal has no mixer, so cues become a bell on discrete events and
//! background audio is only tracked. Failures are ignored; sound is
//! fire-and-forget.

use crate::session::{SessionEvent, SoundCue};
use log::debug;
use std::io::{self, Write};

/// Anything that can play a cue.
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Rings the terminal bell for eat and game-over cues.
pub struct TerminalBell<W: Write> {
    out: W,
    background: bool,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            background: false,
        }
    }

    pub fn background_playing(&self) -> bool {
        self.background
    }

    fn ring(&mut self) {
        let _ = self.out.write_all(b"\x07").and_then(|()| self.out.flush());
    }
}

impl<W: Write> SoundSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        debug!("sound: {cue:?}");
        match cue {
            SoundCue::Eat | SoundCue::SpecialEat | SoundCue::GameOver => self.ring(),
            SoundCue::BackgroundStart => self.background = true,
            SoundCue::BackgroundStop => self.background = false,
        }
    }
}

/// Play every sound cue in `events`, in order.
pub fn play_events(sink: &mut dyn SoundSink, events: &[SessionEvent]) {
    for event in events {
        if let SessionEvent::Sound(cue) = event {
            sink.play(*cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<SoundCue>);

    impl SoundSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_play_events_picks_sound_cues() {
        let mut recorder = Recorder::default();
        let events = [
            SessionEvent::BoardChanged,
            SessionEvent::Sound(SoundCue::Eat),
            SessionEvent::Sound(SoundCue::GameOver),
        ];
        play_events(&mut recorder, &events);
        assert_eq!(recorder.0, vec![SoundCue::Eat, SoundCue::GameOver]);
    }

    #[test]
    fn test_bell_rings_for_discrete_cues_only() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(SoundCue::BackgroundStart);
        assert!(bell.background_playing());
        assert!(bell.out.is_empty());

        bell.play(SoundCue::SpecialEat);
        bell.play(SoundCue::BackgroundStop);
        assert!(!bell.background_playing());
        assert_eq!(bell.out, b"\x07");
    }
}
