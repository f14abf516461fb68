//! Playback and capture of `.m64` controller recordings.
//!
//! A recording is a `0x400`-byte header followed by one 4-byte frame per
//! poll: buttons (big-endian `u16`), stick X (`i8`), stick Y (`i8`).

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::backend::{merge_axis, BackendKind, ControllerBackend};
use crate::config::InputConfig;
use crate::error::InputError;
use crate::pad::{Buttons, Pad};

/// Size of the recording header skipped on playback.
pub const RECORDING_HEADER_SIZE: usize = 0x400;
/// Bytes per recorded frame.
pub const RECORDING_FRAME_SIZE: usize = 4;
/// Signature written at the start of recordings made by [`InputRecorder`].
pub const RECORDING_SIGNATURE: [u8; 4] = *b"M64\x1A";

pub fn encode_frame(pad: &Pad) -> [u8; RECORDING_FRAME_SIZE] {
    let [hi, lo] = pad.button.bits().to_be_bytes();
    [hi, lo, pad.stick_x as u8, pad.stick_y as u8]
}

pub fn decode_frame(frame: [u8; RECORDING_FRAME_SIZE]) -> Pad {
    Pad {
        button: Buttons::from_bits_retain(u16::from_be_bytes([frame[0], frame[1]])),
        stick_x: frame[2] as i8,
        stick_y: frame[3] as i8,
        errno: 0,
    }
}

enum Source {
    Path(PathBuf),
    Reader(Box<dyn Read + Send>),
}

/// Replays a recording, one frame per [`read`](ControllerBackend::read).
///
/// Once the recording runs out the backend goes quiet and leaves the pad
/// to the other backends.
pub struct RecordedPlayback {
    source: Option<Source>,
    reader: Option<Box<dyn Read + Send>>,
    frames_played: u64,
}

impl RecordedPlayback {
    /// Play the recording at `path`. The file is opened by `init`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(Source::Path(path.into())),
            reader: None,
            frames_played: 0,
        }
    }

    /// Play a recording from any byte stream, header included.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            source: Some(Source::Reader(Box::new(reader))),
            reader: None,
            frames_played: 0,
        }
    }

    pub fn frames_played(&self) -> u64 {
        self.frames_played
    }

    /// Whether frames are still being replayed.
    pub fn is_playing(&self) -> bool {
        self.reader.is_some()
    }

    fn open(path: &Path) -> Result<Box<dyn Read + Send>, InputError> {
        let file = File::open(path).map_err(|source| InputError::RecordingUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn next_frame(&mut self) -> Option<Pad> {
        let reader = self.reader.as_mut()?;
        let mut frame = [0u8; RECORDING_FRAME_SIZE];
        match reader.read_exact(&mut frame) {
            Ok(()) => {
                self.frames_played += 1;
                Some(decode_frame(frame))
            }
            Err(err) => {
                if err.kind() == io::ErrorKind::UnexpectedEof {
                    log::info!("Recording finished after {} frames", self.frames_played);
                } else {
                    log::warn!(
                        "Recording stopped after {} frames: {err}",
                        self.frames_played
                    );
                }
                self.reader = None;
                None
            }
        }
    }
}

fn skip_header(reader: &mut (dyn Read + Send)) -> Result<(), InputError> {
    let mut header = Vec::with_capacity(RECORDING_HEADER_SIZE);
    reader
        .take(RECORDING_HEADER_SIZE as u64)
        .read_to_end(&mut header)?;
    if header.len() < RECORDING_HEADER_SIZE {
        return Err(InputError::TruncatedHeader {
            expected: RECORDING_HEADER_SIZE,
            found: header.len(),
        });
    }
    Ok(())
}

impl ControllerBackend for RecordedPlayback {
    fn kind(&self) -> BackendKind {
        BackendKind::RecordedPlayback
    }

    fn name(&self) -> &str {
        "recorded"
    }

    fn init(&mut self) -> Result<(), InputError> {
        let mut reader = match self.source.take() {
            Some(Source::Path(path)) => {
                let reader = Self::open(&path)?;
                log::info!("Playing back controller recording {}", path.display());
                reader
            }
            Some(Source::Reader(reader)) => reader,
            None => return Err(InputError::BackendUnavailable("recording already consumed")),
        };
        skip_header(&mut *reader)?;
        self.reader = Some(reader);
        Ok(())
    }

    fn read(&mut self, pad: &mut Pad) {
        if let Some(frame) = self.next_frame() {
            pad.button |= frame.button;
            merge_axis(&mut pad.stick_x, frame.stick_x);
            merge_axis(&mut pad.stick_y, frame.stick_y);
        }
    }

    fn reconfigure(&mut self, config: &InputConfig) {
        if self.reader.is_none() && matches!(self.source, Some(Source::Path(_))) {
            self.source = Some(Source::Path(config.recording.path.clone()));
        }
    }

    fn shutdown(&mut self) {
        self.reader = None;
        self.source = None;
    }
}

/// Writes pads in the recording format played by [`RecordedPlayback`].
pub struct InputRecorder<W: Write> {
    writer: W,
    frames: u64,
}

impl InputRecorder<BufWriter<File>> {
    /// Create (or truncate) a recording file.
    pub fn create(path: &Path) -> Result<Self, InputError> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> InputRecorder<W> {
    /// Start a recording on `writer`, writing the header immediately.
    pub fn new(mut writer: W) -> Result<Self, InputError> {
        let mut header = [0u8; RECORDING_HEADER_SIZE];
        header[..RECORDING_SIGNATURE.len()].copy_from_slice(&RECORDING_SIGNATURE);
        writer.write_all(&header)?;
        Ok(Self { writer, frames: 0 })
    }

    /// Append one frame.
    pub fn record(&mut self, pad: &Pad) -> Result<(), InputError> {
        self.writer.write_all(&encode_frame(pad))?;
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> Result<W, InputError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
