//! Sampled frame export for an external renderer.
//!
//! A renderer only needs positions, a display radius and a color for every
//! body still in the region, and usually only every Kth step. `FrameRecorder`
//! does that sampling while the trajectory streams past, and `write_frames`
//! dumps the result as YAML.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::simulation::error::Result;
use crate::simulation::states::{Rgb, Universe};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameBody {
    pub x: f64,
    pub y: f64,
    pub radius: f64, // body radius times the scaling factor
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub step: usize,
    pub width: f64,
    pub bodies: Vec<FrameBody>,
}

impl Frame {
    /// Display view of one snapshot; absent bodies are skipped.
    pub fn from_universe(step: usize, universe: &Universe, scaling_factor: f64) -> Self {
        let bodies = universe
            .present()
            .map(|(_, b)| FrameBody {
                x: b.position.x,
                y: b.position.y,
                radius: b.radius * scaling_factor,
                color: b.color,
            })
            .collect();

        Self {
            step,
            width: universe.width(),
            bodies,
        }
    }
}

/// Keeps every `frequency`-th snapshot (step 0 included).
pub struct FrameRecorder {
    frequency: usize,
    scaling_factor: f64,
    frames: Vec<Frame>,
}

impl FrameRecorder {
    /// A `frequency` of 0 is treated as 1.
    pub fn new(frequency: usize, scaling_factor: f64) -> Self {
        Self {
            frequency: frequency.max(1),
            scaling_factor,
            frames: Vec::new(),
        }
    }

    pub fn record(&mut self, step: usize, universe: &Universe) {
        if step % self.frequency == 0 {
            self.frames
                .push(Frame::from_universe(step, universe, self.scaling_factor));
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

pub fn write_frames(path: impl AsRef<Path>, frames: &[Frame]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(&mut writer, frames)?;
    writer.flush()?;
    info!("wrote {} frames to {}", frames.len(), path.display());
    Ok(())
}

pub fn read_frames(path: impl AsRef<Path>) -> Result<Vec<Frame>> {
    let file = File::open(path)?;
    Ok(serde_yaml::from_reader(BufReader::new(file))?)
}
