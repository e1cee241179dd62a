//! Human-readable rendering.

use std::io::Write;
use std::str::FromStr;

use crate::core::PlayerId;
use crate::rules::Engine;

use super::error::EnvError;

/// Supported render targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Text dump of both seats.
    #[default]
    Human,
}

impl FromStr for RenderMode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(RenderMode::Human),
            other => Err(EnvError::InvalidRenderMode(other.to_string())),
        }
    }
}

/// Write both seats' full state to `out`. Reads only.
pub fn render_human<E: Engine, W: Write>(engine: &E, out: &mut W) -> Result<(), EnvError> {
    for player in PlayerId::both() {
        writeln!(out, "{player}:")?;
        writeln!(out, "{}", engine.state(player))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("human".parse::<RenderMode>().unwrap(), RenderMode::Human);
        let err = "rgb_array".parse::<RenderMode>().unwrap_err();
        assert!(matches!(err, EnvError::InvalidRenderMode(m) if m == "rgb_array"));
    }
}
