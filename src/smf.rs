// Standard MIDI File export
//
// Notes are written to a single format-0 track on one channel. The tempo
// meta event makes one beat in the file last exactly `beat_ms`, so durations
// passed to `advance` map onto ticks at `ticks_per_beat` per beat.

use crate::config::PerformanceConfig;
use crate::sink::NoteSink;
use anyhow::{Context, Result};
use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::path::Path;
use std::time::Duration;

const TRACK_NAME: &[u8] = b"irrational-music";

/// Largest delta-time a track event can carry (28 bits)
const MAX_DELTA: u32 = (1 << 28) - 1;

pub struct SmfSink {
    channel: u4,
    ticks_per_beat: u16,
    beat: Duration,
    track: Track<'static>,
    /// Ticks elapsed since the last written event, at most `MAX_DELTA`
    pending: u32,
}

impl SmfSink {
    pub fn new(config: &PerformanceConfig) -> Self {
        let tempo = config.beat_ms.saturating_mul(1000) as u32;
        let track = vec![
            TrackEvent {
                delta: u28::new(0),
                kind: TrackEventKind::Meta(MetaMessage::TrackName(TRACK_NAME)),
            },
            TrackEvent {
                delta: u28::new(0),
                kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo))),
            },
        ];

        Self {
            channel: u4::new(config.channel),
            ticks_per_beat: config.ticks_per_beat,
            beat: config.beat(),
            track,
            pending: 0,
        }
    }

    /// Duration in ticks, rounded to the nearest tick
    fn ticks(&self, duration: Duration) -> u32 {
        let beat_us = self.beat.as_micros().max(1);
        let scaled = duration.as_micros() * u128::from(self.ticks_per_beat);
        ((scaled + beat_us / 2) / beat_us).min(u128::from(MAX_DELTA)) as u32
    }

    fn push(&mut self, message: MidiMessage) {
        self.track.push(TrackEvent {
            delta: u28::new(self.pending),
            kind: TrackEventKind::Midi {
                channel: self.channel,
                message,
            },
        });
        self.pending = 0;
    }

    /// Assemble the file, closing the track after any trailing rest
    pub fn to_smf(&self) -> Smf<'static> {
        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(self.ticks_per_beat)),
        ));

        let mut track = self.track.clone();
        track.push(TrackEvent {
            delta: u28::new(self.pending),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);
        smf
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.to_smf()
            .write(&mut buf)
            .map_err(anyhow::Error::msg)
            .context("Failed to encode MIDI file")?;
        Ok(buf)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl NoteSink for SmfSink {
    fn note_on(&mut self, key: u8, velocity: u8) -> Result<()> {
        self.push(MidiMessage::NoteOn {
            key: u7::new(key),
            vel: u7::new(velocity),
        });
        Ok(())
    }

    fn note_off(&mut self, key: u8) -> Result<()> {
        self.push(MidiMessage::NoteOff {
            key: u7::new(key),
            vel: u7::new(0),
        });
        Ok(())
    }

    fn advance(&mut self, duration: Duration) -> Result<()> {
        self.pending = self.pending.saturating_add(self.ticks(duration)).min(MAX_DELTA);
        Ok(())
    }
}
