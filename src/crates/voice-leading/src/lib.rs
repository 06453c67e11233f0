//! Scale-degree mapping and nearest-voicing triads
//!
//! Scale degrees are 1-indexed positions in a major scale and wrap freely
//! across octaves. A [`Key`] turns them into absolute (MIDI) pitches, and the
//! voice leader picks octave placements for each new triad so that it moves
//! as little as possible from the previous one.
//!
//! # Examples
//!
//! ```
//! use voice_leading::{resolve_triad, Key, Triad};
//!
//! let key = Key::new(60);
//! let c_major = Triad::new([60, 64, 67]);
//!
//! // The IV chord lands in second inversion, close to the C major triad.
//! let next = resolve_triad(4, Some(&c_major), &key);
//! assert_eq!(next.pitches(), [60, 65, 69]);
//! ```
//!
//! # Main Components
//!
//! - **scale**: degree-to-pitch mapping for the major scale
//! - **Key**: a tonic pitch, parsed from names like `C`, `D#` or `Fb4`
//! - **Triad / AbstractTriad**: resolved pitches and the degrees they come from
//! - **leader**: candidate generation, cost matrix and greedy assignment

pub mod error;
pub mod key;
pub mod leader;
pub mod note;
pub mod scale;
pub mod triad;

#[cfg(test)]
mod regression_tests;

pub use error::{HarmonyError, Result};
pub use key::{Key, DEFAULT_OCTAVE};
pub use leader::{greedy_assign, progression, resolve_triad, resolve_triad_from_slice, Cell, CostMatrix};
pub use note::pitch_name;
pub use scale::{scale_degree_to_pitch, MAJOR_SCALE_STEPS};
pub use triad::{AbstractTriad, Triad};
