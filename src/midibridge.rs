use crate::sink::NoteSink;
use anyhow::{anyhow, bail, Result};
use log::{debug, info, warn};
use midir::{MidiOutput, MidiOutputConnection};
use std::str::FromStr;
use std::time::Duration;

const CLIENT_NAME: &str = "irrational-music";

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;
const CONTROL_CHANGE: u8 = 0xB0;
const ALL_NOTES_OFF: u8 = 123;

/// Which output port to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelector {
    Index(usize),
    /// Case-insensitive substring of the port name
    Name(String),
}

impl FromStr for PortSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().parse::<usize>() {
            Ok(index) => PortSelector::Index(index),
            Err(_) => PortSelector::Name(s.trim().to_string()),
        })
    }
}

fn open_output() -> Result<MidiOutput> {
    MidiOutput::new(CLIENT_NAME).map_err(|e| anyhow!("Failed to open MIDI output: {}", e))
}

/// Names of every MIDI output port, in the order the OS reports them
pub fn list_output_ports() -> Result<Vec<String>> {
    let output = open_output()?;
    output
        .ports()
        .iter()
        .map(|port| {
            output
                .port_name(port)
                .map_err(|e| anyhow!("Failed to read MIDI port name: {}", e))
        })
        .collect()
}

/// Index of the port `selector` picks out of `names`; the first port by default
pub fn select_port(names: &[String], selector: Option<&PortSelector>) -> Result<usize> {
    if names.is_empty() {
        bail!("No MIDI output ports available");
    }

    match selector {
        None => Ok(0),
        Some(PortSelector::Index(index)) if *index < names.len() => Ok(*index),
        Some(PortSelector::Index(index)) => bail!(
            "MIDI port {} does not exist ({} available)",
            index,
            names.len()
        ),
        Some(PortSelector::Name(wanted)) => {
            let wanted = wanted.to_lowercase();
            names
                .iter()
                .position(|name| name.to_lowercase().contains(&wanted))
                .ok_or_else(|| anyhow!("No MIDI output port matches '{}'", wanted))
        }
    }
}

/// Live playback through an OS MIDI port
///
/// Dropping the sink without `close` still sends All Notes Off, so an
/// aborted performance does not leave notes hanging on the synth.
pub struct MidiPortSink {
    connection: MidiOutputConnection,
    channel: u8,
    silenced: bool,
}

impl MidiPortSink {
    pub fn connect(selector: Option<&PortSelector>, channel: u8) -> Result<Self> {
        let output = open_output()?;
        let ports = output.ports();
        let names = ports
            .iter()
            .map(|port| output.port_name(port).unwrap_or_else(|_| "<unknown>".to_string()))
            .collect::<Vec<_>>();

        let index = select_port(&names, selector)?;
        info!("Connecting to MIDI port {}: {}", index, names[index]);

        let connection = output
            .connect(&ports[index], CLIENT_NAME)
            .map_err(|e| anyhow!("Failed to connect to MIDI port {}: {}", names[index], e))?;

        Ok(Self {
            connection,
            channel: channel & 0x0F,
            silenced: false,
        })
    }

    fn send(&mut self, message: [u8; 3]) -> Result<()> {
        self.connection
            .send(&message)
            .map_err(|e| anyhow!("Failed to send MIDI message {:02X?}: {}", message, e))
    }

    fn silence(&mut self) -> Result<()> {
        self.send([CONTROL_CHANGE | self.channel, ALL_NOTES_OFF, 0])?;
        self.silenced = true;
        Ok(())
    }

    /// Silence the channel and release the port
    pub fn close(mut self) -> Result<()> {
        self.silence()
    }
}

impl Drop for MidiPortSink {
    fn drop(&mut self) {
        if self.silenced {
            return;
        }
        if let Err(e) = self.silence() {
            warn!("Failed to silence MIDI channel {}: {:#}", self.channel + 1, e);
        }
    }
}

impl NoteSink for MidiPortSink {
    fn note_on(&mut self, key: u8, velocity: u8) -> Result<()> {
        self.silenced = false;
        self.send([NOTE_ON | self.channel, key, velocity])
    }

    fn note_off(&mut self, key: u8) -> Result<()> {
        self.send([NOTE_OFF | self.channel, key, 0])
    }

    fn advance(&mut self, duration: Duration) -> Result<()> {
        debug!("Waiting {:?}", duration);
        std::thread::sleep(duration);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec![
            "Midi Through Port-0".to_string(),
            "FluidSynth virtual port".to_string(),
            "USB Keyboard".to_string(),
        ]
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("2".parse::<PortSelector>().unwrap(), PortSelector::Index(2));
        assert_eq!(
            " fluid ".parse::<PortSelector>().unwrap(),
            PortSelector::Name("fluid".to_string())
        );
    }

    #[test]
    fn test_default_is_first_port() {
        assert_eq!(select_port(&names(), None).unwrap(), 0);
    }

    #[test]
    fn test_select_by_index_and_name() {
        assert_eq!(select_port(&names(), Some(&PortSelector::Index(2))).unwrap(), 2);
        assert_eq!(
            select_port(&names(), Some(&PortSelector::Name("FLUID".to_string()))).unwrap(),
            1
        );
    }

    #[test]
    fn test_selection_failures() {
        assert!(select_port(&[], None).is_err());
        assert!(select_port(&names(), Some(&PortSelector::Index(3))).is_err());
        assert!(select_port(&names(), Some(&PortSelector::Name("piano".to_string()))).is_err());
    }
}
