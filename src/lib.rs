//! Listen to the digits of irrational numbers
//!
//! A number is expanded in some base (7 by default, one digit per scale
//! degree), and every digit becomes a voice-led triad held under a short
//! ascending melody. The result can be played on a live MIDI port, written
//! to a Standard MIDI File or printed.

pub mod config;
pub mod logger;
pub mod midibridge;
pub mod performance;
pub mod sink;
pub mod smf;

// Re-export main types for convenience
pub use config::PerformanceConfig;
pub use midibridge::{list_output_ports, MidiPortSink, PortSelector};
pub use performance::{compose_number, play, Performance, Step};
pub use sink::{NoteEvent, NoteSink, RecordingSink};
pub use smf::SmfSink;
