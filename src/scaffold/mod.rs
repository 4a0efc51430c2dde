//! Scaffold camera and vacuum robot.
//!
//! Streaming controller: the core prints camera frames as ASCII, and in rescue
//! mode it prompts for movement routines which are sent back as ASCII lines.

pub mod compress;
pub mod map;
pub mod path;

use tracing::{debug, info};

use crate::error::ControllerError;
use crate::intcode::{Machine, Port, Protocol, NEWLINE};

pub use compress::Routines;
pub use map::ScaffoldMap;

/// Writing this to address 0 makes the program accept movement routines.
const WAKE_UP: i64 = 2;

/// Reads one camera frame: rows up to a blank line or the end of the stream.
fn read_frame(port: &Port) -> Vec<i64> {
    let mut frame = Vec::new();
    let mut prev = None;
    while let Some(v) = port.recv() {
        if v == NEWLINE && prev == Some(NEWLINE) {
            break;
        }
        frame.push(v);
        prev = Some(v);
    }
    frame
}

/// Runs the camera program to completion and returns the scaffold it shows.
pub fn survey(machine: Machine) -> Result<ScaffoldMap, ControllerError> {
    let (handle, port) = machine.spawn(Protocol::Streaming)?;
    let frame: Vec<i64> = port.iter().collect();
    handle.join()?;
    let map = ScaffoldMap::parse(&frame)?;
    debug!(cells = map.len(), "scaffold surveyed");
    Ok(map)
}

/// Sum of the alignment parameters of every scaffold intersection.
pub fn alignment(machine: Machine) -> Result<i64, ControllerError> {
    Ok(survey(machine)?.alignment())
}

#[derive(Debug, Clone)]
pub struct Rescue {
    pub routines: Routines,
    /// last value printed by the program
    pub dust: i64,
}

/// Wakes the robot, walks it over the whole scaffold and returns the amount
/// of dust it reports.
pub fn rescue(mut machine: Machine, video: bool) -> Result<Rescue, ControllerError> {
    machine.poke(0, WAKE_UP);
    let (handle, port) = machine.spawn(Protocol::Streaming)?;
    let result = guide(&port, video);
    drop(port);
    let joined = handle.join();
    let rescue = result?;
    joined?;
    Ok(rescue)
}

fn guide(port: &Port, video: bool) -> Result<Rescue, ControllerError> {
    let frame = read_frame(port);
    let map = ScaffoldMap::parse(&frame)?;
    let path = path::trace(&map)?;
    let routines = compress::compress(&path).ok_or(ControllerError::Uncompressible(path.len()))?;
    info!(main = %routines.main_line(), "movement routines found");

    let mut answers = routines.lines();
    answers.push(if video { "y" } else { "n" }.to_string());
    for line in &answers {
        if !port.skip_line() {
            return Err(ControllerError::Closed("prompt"));
        }
        port.send_line(line).map_err(|_| ControllerError::Closed("movement routine"))?;
    }

    let dust = port.iter().last().ok_or(ControllerError::Closed("dust report"))?;
    Ok(Rescue { routines, dust })
}
