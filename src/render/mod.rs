//! Frame presentation.
//!
//! The engine hands every finished tick to a [`FrameSink`]. Rasterising the
//! stage is left to the embedding application; the crate ships a sink that
//! discards frames and one that writes a JSON-lines trace of what the camera,
//! the characters and the lights were doing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::character::Authority;
use crate::error::CutsceneError;
use crate::scene::Stage;

/// Per-frame bookkeeping passed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    /// Zero-based frame number.
    pub index: u64,
    /// Simulated time at the end of the tick.
    pub time: Duration,
    /// Simulated time the tick advanced.
    pub dt: Duration,
    /// Label of the beat being played, if any.
    pub beat: Option<String>,
}

/// Receives each finished frame.
pub trait FrameSink {
    /// Present one frame.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the engine logs the error and keeps playing.
    fn present(
        &mut self,
        frame: &FrameInfo,
        stage: &Stage,
    ) -> Result<(), CutsceneError>;

    /// Flush buffered output after the last frame.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn finish(&mut self) -> Result<(), CutsceneError> {
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(
        &mut self,
        _frame: &FrameInfo,
        _stage: &Stage,
    ) -> Result<(), CutsceneError> {
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct CharacterSnapshot<'a> {
    name: &'a str,
    position: [f32; 3],
    rotation: [f32; 3],
    physics: bool,
}

#[derive(Debug, Serialize)]
struct FrameSnapshot<'a> {
    frame: u64,
    time: f32,
    beat: Option<&'a str>,
    eye: [f32; 3],
    target: [f32; 3],
    ambient: f32,
    end_card: f32,
    characters: Vec<CharacterSnapshot<'a>>,
}

impl<'a> FrameSnapshot<'a> {
    fn capture(frame: &'a FrameInfo, stage: &'a Stage) -> Self {
        Self {
            frame: frame.index,
            time: frame.time.as_secs_f32(),
            beat: frame.beat.as_deref(),
            eye: stage.camera.camera.eye.to_array(),
            target: stage.camera.camera.target.to_array(),
            ambient: stage.lighting.ambient_intensity,
            end_card: stage.end_card.opacity,
            characters: stage
                .characters()
                .map(|(_, c)| CharacterSnapshot {
                    name: &c.name,
                    position: c.position.to_array(),
                    rotation: c.rotation.to_array(),
                    physics: matches!(
                        c.authority(),
                        Authority::PhysicsDriven(_)
                    ),
                })
                .collect(),
        }
    }
}

/// Writes one JSON object per `stride` frames.
pub struct TraceSink<W: Write> {
    writer: W,
    stride: u64,
    written: u64,
}

impl TraceSink<BufWriter<File>> {
    /// Trace into a new file at `path`.
    ///
    /// # Errors
    ///
    /// [`CutsceneError::Io`] if the file cannot be created.
    pub fn create(path: &Path, stride: u32) -> Result<Self, CutsceneError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), stride))
    }
}

impl<W: Write> TraceSink<W> {
    /// Trace into `writer`, keeping every `stride`th frame (at least every
    /// frame).
    pub fn new(writer: W, stride: u32) -> Self {
        Self {
            writer,
            stride: u64::from(stride.max(1)),
            written: 0,
        }
    }

    /// Lines written so far.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// The underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for TraceSink<W> {
    fn present(
        &mut self,
        frame: &FrameInfo,
        stage: &Stage,
    ) -> Result<(), CutsceneError> {
        if frame.index % self.stride != 0 {
            return Ok(());
        }
        serde_json::to_writer(
            &mut self.writer,
            &FrameSnapshot::capture(frame, stage),
        )?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CutsceneError> {
        self.writer.flush()?;
        log::info!("trace: {} frames written", self.written);
        Ok(())
    }
}
