use anyhow::Result;
use std::time::Duration;

/// Destination for played notes
///
/// Keys and velocities are already range-checked MIDI values. `advance`
/// moves the sink's clock forward; live sinks block for the duration.
pub trait NoteSink {
    fn note_on(&mut self, key: u8, velocity: u8) -> Result<()>;
    fn note_off(&mut self, key: u8) -> Result<()>;
    fn advance(&mut self, duration: Duration) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    On { key: u8, velocity: u8 },
    Off { key: u8 },
    Wait(Duration),
}

/// Keeps every event in memory instead of making a sound
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<NoteEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    /// Keys that were switched on and never switched off
    pub fn sounding(&self) -> Vec<u8> {
        let mut held: Vec<u8> = Vec::new();
        for event in &self.events {
            match *event {
                NoteEvent::On { key, .. } => held.push(key),
                NoteEvent::Off { key } => {
                    if let Some(pos) = held.iter().position(|&k| k == key) {
                        held.remove(pos);
                    }
                }
                NoteEvent::Wait(_) => {}
            }
        }
        held
    }

    pub fn elapsed(&self) -> Duration {
        self.events
            .iter()
            .filter_map(|event| match event {
                NoteEvent::Wait(duration) => Some(*duration),
                _ => None,
            })
            .sum()
    }
}

impl NoteSink for RecordingSink {
    fn note_on(&mut self, key: u8, velocity: u8) -> Result<()> {
        self.events.push(NoteEvent::On { key, velocity });
        Ok(())
    }

    fn note_off(&mut self, key: u8) -> Result<()> {
        self.events.push(NoteEvent::Off { key });
        Ok(())
    }

    fn advance(&mut self, duration: Duration) -> Result<()> {
        self.events.push(NoteEvent::Wait(duration));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_tracks_held_notes_and_time() {
        let mut sink = RecordingSink::new();
        sink.note_on(60, 64).unwrap();
        sink.note_on(64, 64).unwrap();
        sink.advance(Duration::from_millis(250)).unwrap();
        sink.note_off(60).unwrap();
        sink.advance(Duration::from_millis(250)).unwrap();

        assert_eq!(sink.events().len(), 5);
        assert_eq!(sink.sounding(), vec![64]);
        assert_eq!(sink.elapsed(), Duration::from_millis(500));
    }

    #[test]
    fn test_doubled_key_needs_two_releases() {
        let mut sink = RecordingSink::new();
        sink.note_on(48, 64).unwrap();
        sink.note_on(48, 64).unwrap();
        sink.note_off(48).unwrap();
        assert_eq!(sink.sounding(), vec![48]);
        sink.note_off(48).unwrap();
        assert!(sink.sounding().is_empty());
    }
}
