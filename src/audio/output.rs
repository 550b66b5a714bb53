//! Where rendered samples go.  The default build has no audio device; the
//! `sound` feature adds a rodio-backed sink.

use crate::error::Result;

pub trait AudioSink {
    /// Queue mono samples at `sample_rate`; overlapping calls mix.
    fn play(&mut self, samples: Vec<f32>, sample_rate: u32) -> Result<()>;
}

/// Discards everything, remembering only how much it was given.
#[derive(Debug, Default)]
pub struct SilentSink {
    pub played: usize,
}

impl AudioSink for SilentSink {
    fn play(&mut self, samples: Vec<f32>, _sample_rate: u32) -> Result<()> {
        if !samples.is_empty() {
            self.played += 1;
        }
        Ok(())
    }
}

#[cfg(feature = "sound")]
pub use rodio_sink::RodioSink;

#[cfg(feature = "sound")]
mod rodio_sink {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle};

    use super::AudioSink;
    use crate::error::{GameError, Result};

    pub struct RodioSink {
        // Dropping the stream silences the handle.
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioSink {
        pub fn open() -> Result<Self> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| GameError::AudioDevice(e.to_string()))?;
            Ok(Self { _stream: stream, handle })
        }
    }

    impl AudioSink for RodioSink {
        fn play(&mut self, samples: Vec<f32>, sample_rate: u32) -> Result<()> {
            self.handle
                .play_raw(SamplesBuffer::new(1, sample_rate, samples))
                .map_err(|e| GameError::AudioDevice(e.to_string()))
        }
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play(&mut self, samples: Vec<f32>, sample_rate: u32) -> Result<()> {
        (**self).play(samples, sample_rate)
    }
}
