use crate::config::PerformanceConfig;
use crate::sink::NoteSink;
use anyhow::{anyhow, Context, Result};
use digit_expansion::{fractional_digits, NumberSource, DIGIT_ALPHABET};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use voice_leading::{pitch_name, resolve_triad, Key, Triad};

/// One digit's worth of music: a held chord under a short melody
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub digit: u8,
    /// 1-indexed scale degree, `digit + 1`
    pub degree: i32,
    pub chord: Triad,
    pub melody: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Performance {
    pub key: Key,
    pub steps: Vec<Step>,
}

/// Checked conversion of a pitch to a MIDI key number
pub fn midi_key(pitch: i32) -> Result<u8> {
    u8::try_from(pitch)
        .ok()
        .filter(|&key| key <= 127)
        .ok_or_else(|| anyhow!("Pitch {} ({}) is outside the MIDI range 0-127", pitch, pitch_name(pitch)))
}

impl Performance {
    /// Turn expanded digits into chords and melodies
    ///
    /// Each chord is voice-led from the one before it. Fails if any pitch
    /// would fall outside the MIDI range.
    pub fn compose(digits: &[u8], key: Key, melody_steps: usize) -> Result<Self> {
        let mut steps: Vec<Step> = Vec::with_capacity(digits.len());

        for (idx, &digit) in digits.iter().enumerate() {
            let degree = i32::from(digit) + 1;
            let chord = resolve_triad(degree, steps.last().map(|step| &step.chord), &key);
            let melody: Vec<i32> = (0..melody_steps as i32)
                .map(|offset| key.pitch(degree + offset))
                .collect();

            for &pitch in chord.pitches().iter().chain(&melody) {
                midi_key(pitch).with_context(|| format!("Step {} (digit {})", idx + 1, digit))?;
            }

            debug!("Step {}: degree {} chord {}", idx + 1, degree, chord);
            steps.push(Step {
                digit,
                degree,
                chord,
                melody,
            });
        }

        Ok(Self { key, steps })
    }
}

/// Expand `source` and compose the result under `config`
pub fn compose_number(source: &NumberSource, count: usize, config: &PerformanceConfig) -> Result<Performance> {
    let key: Key = config
        .key
        .parse()
        .with_context(|| format!("Invalid key: {}", config.key))?;
    let digits = fractional_digits(source, config.base, count)
        .with_context(|| format!("Failed to expand {} in base {}", source, config.base))?;

    info!(
        "{} in base {}: {}",
        source,
        config.base,
        digits
            .iter()
            .map(|&d| DIGIT_ALPHABET[d as usize] as char)
            .collect::<String>()
    );
    Performance::compose(&digits, key, config.melody_steps)
}

/// Send a performance to a sink
///
/// For every step the chord is held while each melody note sounds for one
/// beat, then the chord is released. A melody note that is already part of
/// the chord is left to the chord, since its note-off would cut the chord
/// short. If the sink fails, every note still sounding is released before
/// the error is returned.
pub fn play<S: NoteSink + ?Sized>(performance: &Performance, sink: &mut S, config: &PerformanceConfig) -> Result<()> {
    let mut held: Vec<u8> = Vec::new();
    let result = play_steps(performance, sink, config, &mut held);
    if result.is_err() {
        for key in held.into_iter().rev() {
            if let Err(e) = sink.note_off(key) {
                warn!("Failed to release key {}: {:#}", key, e);
            }
        }
    }
    result
}

fn play_steps<S: NoteSink + ?Sized>(
    performance: &Performance,
    sink: &mut S,
    config: &PerformanceConfig,
    held: &mut Vec<u8>,
) -> Result<()> {
    let beat = config.beat();
    let velocity = config.velocity;

    let press = |sink: &mut S, held: &mut Vec<u8>, key: u8| -> Result<()> {
        sink.note_on(key, velocity)?;
        held.push(key);
        Ok(())
    };
    let release = |sink: &mut S, held: &mut Vec<u8>, key: u8| -> Result<()> {
        sink.note_off(key)?;
        if let Some(pos) = held.iter().rposition(|&k| k == key) {
            held.remove(pos);
        }
        Ok(())
    };

    for (idx, step) in performance.steps.iter().enumerate() {
        info!("Playing step {}/{}: {}", idx + 1, performance.steps.len(), step);

        let chord = step
            .chord
            .pitches()
            .iter()
            .map(|&pitch| midi_key(pitch))
            .collect::<Result<Vec<u8>>>()?;

        for &key in &chord {
            press(sink, held, key)?;
        }
        for &pitch in &step.melody {
            if step.chord.contains(pitch) {
                sink.advance(beat)?;
                continue;
            }
            let key = midi_key(pitch)?;
            press(sink, held, key)?;
            sink.advance(beat)?;
            release(sink, held, key)?;
        }
        for &key in &chord {
            release(sink, held, key)?;
        }
    }
    Ok(())
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let melody: Vec<String> = self.melody.iter().map(|&p| pitch_name(p)).collect();
        write!(
            f,
            "digit {} -> degree {}  chord {}  melody {}",
            self.digit,
            self.degree,
            self.chord,
            melody.join(" ")
        )
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Key: {}", self.key)?;
        for (idx, step) in self.steps.iter().enumerate() {
            writeln!(f, "{:>4}. {}", idx + 1, step)?;
        }
        Ok(())
    }
}
