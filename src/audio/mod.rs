//! Audio cue dispatcher.
//!
//! `cue_for` is the stateless event → sound table.  `AudioDispatcher` adds
//! the only state audio needs: the mute flag and the background loop's
//! position.  Nothing here feeds back into gameplay.

pub mod output;
pub mod synth;

use rand::Rng;

use crate::entities::DeathCause;
use crate::events::GameEvent;
use output::AudioSink;
use synth::{Cue, Note, Waveform, SAMPLE_RATE};

/// Background loop: one note every `MUSIC_STEP_TICKS`.
pub const MUSIC_NOTES: [f32; 6] = [261.0, 311.0, 392.0, 523.0, 392.0, 311.0];
pub const MUSIC_STEP_TICKS: u32 = 18;
const MUSIC_NOTE_SECS: f32 = 0.2;
const MUSIC_VOLUME: f32 = 0.03;

/// The sound for one event, if it has one.
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    use Waveform::{Sawtooth, Sine, Square, Triangle};

    let notes = match event {
        GameEvent::Jumped => vec![Note::tone(300.0, Square, 0.1)],
        GameEvent::Attacked => vec![Note::noise(0.1)],
        GameEvent::PlayerHit { .. } | GameEvent::BossDamaged { .. } => {
            vec![Note::tone(150.0, Square, 0.1)]
        }
        GameEvent::EnemyDefeated { .. } => vec![Note::tone(150.0, Square, 0.1), Note::noise(0.1)],
        GameEvent::CoinCollected { .. } => vec![
            Note::tone(1200.0, Sine, 0.1).volume(0.5),
            Note::tone(1600.0, Sine, 0.2).volume(0.5).at(0.1),
        ],
        GameEvent::TrapCollected { .. } => vec![
            Note::tone(150.0, Sawtooth, 0.5),
            Note::tone(100.0, Sawtooth, 0.5),
        ],
        GameEvent::Landed { heavy: true } => vec![Note::tone(90.0, Triangle, 0.15).volume(0.6)],
        GameEvent::Splashed => vec![Note::noise(0.4), Note::sweep(400.0, 50.0, 0.3)],
        GameEvent::LightningStruck => vec![
            Note::noise(0.5),
            Note::tone(800.0, Sawtooth, 0.1).volume(0.5),
            Note::tone(100.0, Square, 0.6).volume(0.5),
        ],
        GameEvent::HazardTriggered(_) => vec![Note::sweep(200.0, 600.0, 0.4), Note::noise(0.3)],
        GameEvent::ArrowFired => vec![Note::tone(600.0, Square, 0.05).volume(0.4)],
        GameEvent::LaserCharging => vec![Note::sweep(100.0, 900.0, 1.0)],
        GameEvent::LaserFired => vec![Note::tone(60.0, Sawtooth, 0.8), Note::noise(0.6)],
        GameEvent::BossSpawned { .. } => vec![
            Note::tone(220.0, Square, 0.2),
            Note::tone(180.0, Square, 0.2).at(0.25),
            Note::tone(220.0, Square, 0.2).at(0.5),
            Note::tone(180.0, Square, 0.2).at(0.75),
        ],
        GameEvent::Died { cause } => death_notes(*cause),
        GameEvent::LevelComplete { .. } | GameEvent::BossDefeated { .. } => arpeggio(&[523.0, 659.0, 784.0, 1047.0]),
        GameEvent::Purchased(_) => arpeggio(&[784.0, 1047.0]),
        GameEvent::DiceRolled { .. } => vec![Note::noise(0.2), Note::tone(440.0, Triangle, 0.2).at(0.2)],
        _ => return None,
    };
    (!notes.is_empty()).then(|| Cue::new(notes))
}

fn death_notes(cause: DeathCause) -> Vec<Note> {
    match cause {
        // These two already made their own noise.
        DeathCause::EggSplash | DeathCause::LightningStrike => Vec::new(),
        _ => vec![
            Note::tone(200.0, Waveform::Sawtooth, 0.5),
            Note::tone(100.0, Waveform::Sawtooth, 0.8).at(0.2),
        ],
    }
}

fn arpeggio(freqs: &[f32]) -> Vec<Note> {
    freqs
        .iter()
        .enumerate()
        .map(|(i, &f)| Note::tone(f, Waveform::Square, 0.12).volume(0.4).at(i as f32 * 0.1))
        .collect()
}

/// Turns each tick's events into sound on an `AudioSink`.
pub struct AudioDispatcher<S: AudioSink> {
    sink: S,
    muted: bool,
    music_step: usize,
    music_countdown: u32,
}

impl<S: AudioSink> AudioDispatcher<S> {
    pub fn new(sink: S, muted: bool) -> Self {
        Self { sink, muted, music_step: 0, music_countdown: 0 }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play every cue for `events`.  Mute toggles are honoured in order, so
    /// the unmute event itself can be heard after it.
    pub fn dispatch(&mut self, events: &[GameEvent], rng: &mut impl Rng) {
        for event in events {
            if let GameEvent::MuteToggled(muted) = event {
                self.muted = *muted;
                continue;
            }
            if self.muted {
                continue;
            }
            if let Some(cue) = cue_for(event) {
                self.emit(&cue, rng);
            }
        }
    }

    /// Advance the background loop by one tick while `playing`.
    pub fn tick_music(&mut self, playing: bool, rng: &mut impl Rng) {
        if self.muted || !playing {
            return;
        }
        if self.music_countdown > 0 {
            self.music_countdown -= 1;
            return;
        }
        self.music_countdown = MUSIC_STEP_TICKS - 1;
        let freq = MUSIC_NOTES[self.music_step % MUSIC_NOTES.len()];
        self.music_step += 1;
        let cue = Cue::new(vec![
            Note::tone(freq, Waveform::Triangle, MUSIC_NOTE_SECS).volume(MUSIC_VOLUME),
        ]);
        self.emit(&cue, rng);
    }

    fn emit(&mut self, cue: &Cue, rng: &mut impl Rng) {
        let samples = synth::render(cue, SAMPLE_RATE, rng);
        if samples.is_empty() {
            return;
        }
        if let Err(err) = self.sink.play(samples, SAMPLE_RATE) {
            tracing::trace!("audio cue dropped: {err}");
        }
    }
}
