//! CPAL-based audio output backend.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use ahx_engine::Frame;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

use crate::traits::{AudioError, AudioOutput};

/// The ring buffer holds one tenth of a second.
const BUFFER_DIVISOR: usize = 10;

/// CPAL-based audio output fed through a lock-free ring buffer.
pub struct CpalOutput {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    producer: HeapProd<Frame>,
    consumer: Option<HeapCons<Frame>>,
    running: Arc<AtomicBool>,
    underruns: Arc<AtomicU64>,
}

impl CpalOutput {
    /// Open the default output device in stereo.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;

        let mut config: StreamConfig = config.into();
        // The callback assumes 2-channel interleaving
        config.channels = 2;

        // About 100ms of audio
        let capacity = config.sample_rate.0 as usize / BUFFER_DIVISOR;
        let (producer, consumer) = HeapRb::<Frame>::new(capacity).split();

        log::debug!(
            "audio device {:?}: {} Hz, buffer {} frames",
            device.name().unwrap_or_default(),
            config.sample_rate.0,
            capacity
        );

        Ok(Self {
            device,
            config,
            stream: None,
            producer,
            consumer: Some(consumer),
            running: Arc::new(AtomicBool::new(false)),
            underruns: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Build the stream. Called once; later calls are no-ops.
    fn build_stream(&mut self) -> Result<(), AudioError> {
        let Some(mut consumer) = self.consumer.take() else {
            return Ok(());
        };
        let running = Arc::clone(&self.running);
        let underruns = Arc::clone(&self.underruns);
        let channels = self.config.channels as usize;

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !running.load(Ordering::Relaxed) {
                        data.fill(0.0);
                        return;
                    }
                    for chunk in data.chunks_mut(channels) {
                        let (left, right) = match consumer.try_pop() {
                            Some(frame) => frame.to_f32(),
                            None => {
                                underruns.fetch_add(1, Ordering::Relaxed);
                                (0.0, 0.0)
                            }
                        };
                        for (i, sample) in chunk.iter_mut().enumerate() {
                            *sample = match i {
                                0 => left,
                                1 => right,
                                _ => 0.0,
                            };
                        }
                    }
                },
                |err| log::warn!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| AudioError::StreamCreate(e.to_string()))?;

        self.stream = Some(stream);
        Ok(())
    }

    /// Frames the device asked for while the buffer was empty.
    pub fn underruns(&self) -> u64 {
        self.underruns.load(Ordering::Relaxed)
    }
}

impl AudioOutput for CpalOutput {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    fn write(&mut self, frames: &[Frame]) -> usize {
        self.producer.push_slice(frames)
    }

    fn free_space(&self) -> usize {
        self.producer.vacant_len()
    }

    fn start(&mut self) -> Result<(), AudioError> {
        self.build_stream()?;
        self.running.store(true, Ordering::Relaxed);
        if let Some(stream) = &self.stream {
            stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.running.store(false, Ordering::Relaxed);
        if let Some(stream) = &self.stream {
            stream.pause().map_err(|e| AudioError::Playback(e.to_string()))?;
        }
        let underruns = self.underruns();
        if underruns > 0 {
            log::warn!("audio output ran dry for {} frames", underruns);
        }
        Ok(())
    }
}
