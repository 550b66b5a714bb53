//! Tiny tone synthesizer: a cue is a handful of timed notes rendered to mono
//! `f32` samples.

use std::f32::consts::PI;

use rand::Rng;

pub const SAMPLE_RATE: u32 = 44_100;
/// Master gain applied to every rendered cue.
pub const MASTER_GAIN: f32 = 0.1;
/// Level the exponential envelope decays to by the end of a note.
const DECAY_FLOOR: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// One sample at `phase` cycles (only the fractional part matters).
    fn sample(self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (2.0 * PI * p).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * p - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Voice {
    Tone { freq: f32, wave: Waveform },
    /// Exponential pitch glide with a linear fade to silence.
    Sweep { from: f32, to: f32, wave: Waveform },
    Noise,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Note {
    pub voice: Voice,
    /// Offset from the start of the cue, seconds.
    pub start: f32,
    pub duration: f32,
    pub volume: f32,
}

impl Note {
    pub fn tone(freq: f32, wave: Waveform, duration: f32) -> Self {
        Self { voice: Voice::Tone { freq, wave }, start: 0.0, duration, volume: 1.0 }
    }

    pub fn noise(duration: f32) -> Self {
        Self { voice: Voice::Noise, start: 0.0, duration, volume: 0.5 }
    }

    pub fn sweep(from: f32, to: f32, duration: f32) -> Self {
        Self {
            voice: Voice::Sweep { from, to, wave: Waveform::Sine },
            start: 0.0,
            duration,
            volume: 0.5,
        }
    }

    pub fn at(mut self, start: f32) -> Self {
        self.start = start;
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn end(&self) -> f32 {
        self.start + self.duration
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cue {
    pub notes: Vec<Note>,
}

impl Cue {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn duration(&self) -> f32 {
        self.notes.iter().map(Note::end).fold(0.0, f32::max)
    }
}

fn envelope(voice: &Voice, volume: f32, t: f32, duration: f32) -> f32 {
    let progress = (t / duration).clamp(0.0, 1.0);
    match voice {
        Voice::Sweep { .. } => volume * (1.0 - progress),
        Voice::Tone { .. } | Voice::Noise => {
            if volume <= DECAY_FLOOR {
                volume
            } else {
                volume * (DECAY_FLOOR / volume).powf(progress)
            }
        }
    }
}

/// Mix every note of `cue` into one buffer.  Noise draws from `rng`.
pub fn render(cue: &Cue, sample_rate: u32, rng: &mut impl Rng) -> Vec<f32> {
    let rate = sample_rate as f32;
    let len = (cue.duration() * rate).ceil() as usize;
    let mut out = vec![0.0f32; len];

    for note in &cue.notes {
        let first = (note.start * rate) as usize;
        let count = (note.duration * rate) as usize;
        let mut phase = 0.0f32;
        for i in 0..count {
            let Some(slot) = out.get_mut(first + i) else {
                break;
            };
            let t = i as f32 / rate;
            let raw = match note.voice {
                Voice::Tone { freq, wave } => {
                    phase += freq / rate;
                    wave.sample(phase)
                }
                Voice::Sweep { from, to, wave } => {
                    let progress = t / note.duration;
                    let freq = from * (to / from).powf(progress);
                    phase += freq / rate;
                    wave.sample(phase)
                }
                Voice::Noise => rng.gen_range(-1.0..1.0),
            };
            *slot += raw * envelope(&note.voice, note.volume, t, note.duration);
        }
    }

    for s in &mut out {
        *s = (*s * MASTER_GAIN).clamp(-1.0, 1.0);
    }
    out
}
