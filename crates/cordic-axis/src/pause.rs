//! Idle and backpressure generators
//!
//! A pause generator yields one `bool` per tick; `true` means the side it
//! drives holds off on that tick. On the source it deasserts "valid"
//! (upstream idle gaps); on the sink it deasserts "ready" (backpressure).
//!
//! Generators are infinite and deterministic: the same pattern always
//! produces the same sequence, so a run with a given timing can be
//! reproduced exactly.
//!
//! ```rust
//! use cordic_axis::PausePattern;
//!
//! let mut pauses = PausePattern::cycle_pause().generator().unwrap();
//! let first: Vec<bool> = pauses.by_ref().take(8).collect();
//! assert_eq!(first, [true, true, true, false, true, true, true, false]);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Timing pattern for one side of a stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PausePattern {
    /// Never pause
    #[default]
    None,

    /// Repeat a fixed pattern (`true` = pause)
    Cycle { pattern: Vec<bool> },

    /// Pause each tick with the given probability, seeded for repeatability
    Random { probability: f64, seed: u64 },
}

impl PausePattern {
    /// Pause three ticks out of every four
    pub fn cycle_pause() -> Self {
        PausePattern::Cycle {
            pattern: vec![true, true, true, false],
        }
    }

    /// Repeat `pattern`
    pub fn cycle(pattern: impl Into<Vec<bool>>) -> Self {
        PausePattern::Cycle {
            pattern: pattern.into(),
        }
    }

    /// Random pauses with probability `probability`
    pub fn random(probability: f64, seed: u64) -> Self {
        PausePattern::Random { probability, seed }
    }

    /// Check if this pattern never pauses
    pub fn is_none(&self) -> bool {
        match self {
            PausePattern::None => true,
            PausePattern::Cycle { pattern } => pattern.iter().all(|&p| !p),
            PausePattern::Random { probability, .. } => *probability == 0.0,
        }
    }

    /// Long-run fraction of paused ticks
    pub fn duty(&self) -> f64 {
        match self {
            PausePattern::None => 0.0,
            PausePattern::Cycle { pattern } if pattern.is_empty() => 0.0,
            PausePattern::Cycle { pattern } => {
                pattern.iter().filter(|&&p| p).count() as f64 / pattern.len() as f64
            }
            PausePattern::Random { probability, .. } => *probability,
        }
    }

    /// Reject patterns that would stall a stream forever
    pub fn validate(&self) -> AxisResult<()> {
        match self {
            PausePattern::None => Ok(()),
            PausePattern::Cycle { pattern } => {
                if pattern.is_empty() {
                    Err(AxisError::InvalidPattern("cycle pattern is empty".to_string()))
                } else if pattern.iter().all(|&p| p) {
                    Err(AxisError::InvalidPattern(
                        "cycle pattern pauses on every tick".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            PausePattern::Random { probability, .. } => {
                if (0.0..1.0).contains(probability) {
                    Ok(())
                } else {
                    Err(AxisError::InvalidPattern(format!(
                        "pause probability must be in [0, 1), got {}",
                        probability
                    )))
                }
            }
        }
    }

    /// Create a fresh generator for this pattern
    pub fn generator(&self) -> AxisResult<PauseGenerator> {
        self.validate()?;
        let state = match self {
            PausePattern::None => GeneratorState::Never,
            PausePattern::Cycle { pattern } => GeneratorState::Cycle {
                pattern: pattern.clone(),
                pos: 0,
            },
            PausePattern::Random { probability, seed } => GeneratorState::Random {
                rng: StdRng::seed_from_u64(*seed),
                probability: *probability,
            },
        };
        Ok(PauseGenerator { state })
    }
}

impl std::fmt::Display for PausePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PausePattern::None => write!(f, "none"),
            PausePattern::Cycle { pattern } => {
                let bits: String = pattern.iter().map(|&p| if p { '1' } else { '0' }).collect();
                write!(f, "cycle({})", bits)
            }
            PausePattern::Random { probability, seed } => {
                write!(f, "random(p={}, seed={})", probability, seed)
            }
        }
    }
}

/// Infinite per-tick pause sequence
#[derive(Debug, Clone)]
pub struct PauseGenerator {
    state: GeneratorState,
}

#[derive(Debug, Clone)]
enum GeneratorState {
    Never,
    Cycle { pattern: Vec<bool>, pos: usize },
    Random { rng: StdRng, probability: f64 },
}

impl PauseGenerator {
    /// Pause decision for the next tick
    pub fn pause(&mut self) -> bool {
        match &mut self.state {
            GeneratorState::Never => false,
            GeneratorState::Cycle { pattern, pos } => {
                let paused = pattern[*pos];
                *pos = (*pos + 1) % pattern.len();
                paused
            }
            GeneratorState::Random { rng, probability } => rng.gen_bool(*probability),
        }
    }
}

impl Iterator for PauseGenerator {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        Some(self.pause())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_never_pauses() {
        let mut gen = PausePattern::None.generator().unwrap();
        assert!(gen.by_ref().take(100).all(|p| !p));
        assert!(PausePattern::None.is_none());
    }

    #[test]
    fn test_cycle_repeats() {
        let mut gen = PausePattern::cycle([false, true]).generator().unwrap();
        let seq: Vec<bool> = gen.by_ref().take(5).collect();
        assert_eq!(seq, [false, true, false, true, false]);
    }

    #[test]
    fn test_cycle_pause_duty() {
        approx::assert_relative_eq!(PausePattern::cycle_pause().duty(), 0.75);
        assert!(!PausePattern::cycle_pause().is_none());
    }

    #[test]
    fn test_random_is_deterministic() {
        let pattern = PausePattern::random(0.3, 7);
        let a: Vec<bool> = pattern.generator().unwrap().take(500).collect();
        let b: Vec<bool> = pattern.generator().unwrap().take(500).collect();
        assert_eq!(a, b);

        let paused = a.iter().filter(|&&p| p).count();
        assert!(paused > 100 && paused < 200, "paused {}", paused);
    }

    #[test]
    fn test_validation() {
        assert!(PausePattern::cycle(Vec::new()).validate().is_err());
        assert!(PausePattern::cycle([true, true]).validate().is_err());
        assert!(PausePattern::random(1.0, 0).validate().is_err());
        assert!(PausePattern::random(-0.1, 0).validate().is_err());
        assert!(PausePattern::random(0.99, 0).validate().is_ok());
        assert!(PausePattern::cycle(Vec::new()).generator().is_err());
    }

    #[test]
    fn test_serde_yaml() {
        let yaml = "kind: cycle\npattern: [true, false]\n";
        let pattern: PausePattern = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(pattern, PausePattern::cycle([true, false]));

        let yaml = "kind: random\nprobability: 0.25\nseed: 3\n";
        let pattern: PausePattern = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(pattern, PausePattern::random(0.25, 3));

        let pattern: PausePattern = serde_yaml::from_str("kind: none").unwrap();
        assert_eq!(pattern, PausePattern::None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PausePattern::cycle_pause().to_string(), "cycle(1110)");
        assert_eq!(PausePattern::None.to_string(), "none");
    }
}
