//! Dice notation: `NdM[+K]` / `NdM[-K]`.
//!
//! A `DiceExpr` is parsed once (at load time, from creature/attack/skill
//! definitions) and rolled many times during simulation, so parsing and
//! rolling are separate steps — see [`DiceExpr::parse`] and [`DiceExpr::roll`].

use crate::error::ValidationError;
use crate::rng::CombatRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed `NdM+K` dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DiceExpr {
    /// Construct directly, skipping the string parser.
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// A dice expression that always evaluates to a fixed flat value.
    pub fn flat(value: i32) -> Self {
        Self {
            count: 0,
            sides: 0,
            modifier: value,
        }
    }

    /// Parse `NdM+K` / `NdM-K` / `NdM`. `N >= 1`, `M >= 1`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::MalformedDice(s.to_string()));
        }

        let (dice_part, modifier) = match s.find(['+', '-']) {
            Some(pos) if pos > 0 => {
                let (head, tail) = s.split_at(pos);
                let modifier: i32 = tail
                    .parse()
                    .map_err(|_| ValidationError::MalformedDice(s.to_string()))?;
                (head, modifier)
            }
            _ => (s, 0),
        };

        let mut parts = dice_part.splitn(2, 'd');
        let count_str = parts.next().unwrap_or("");
        let sides_str = parts
            .next()
            .ok_or_else(|| ValidationError::MalformedDice(s.to_string()))?;

        let count: u32 = count_str
            .parse()
            .map_err(|_| ValidationError::MalformedDice(s.to_string()))?;
        let sides: u32 = sides_str
            .parse()
            .map_err(|_| ValidationError::MalformedDice(s.to_string()))?;

        if count < 1 || sides < 1 {
            return Err(ValidationError::MalformedDice(s.to_string()));
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Roll `sum_{i=1..N}(1 + floor(rng.random() * M)) + K`.
    pub fn roll(&self, rng: &mut dyn CombatRng) -> i32 {
        let mut total: i32 = 0;
        for _ in 0..self.count {
            total += 1 + (rng.random() * self.sides as f64).floor() as i32;
        }
        total + self.modifier
    }

    /// Minimum possible roll, without rolling.
    pub fn min(&self) -> i32 {
        self.count as i32 + self.modifier
    }

    /// Maximum possible roll, without rolling.
    pub fn max(&self) -> i32 {
        (self.count * self.sides) as i32 + self.modifier
    }

    /// Expected value, without rolling.
    pub fn average(&self) -> f64 {
        self.count as f64 * (self.sides as f64 + 1.0) / 2.0 + self.modifier as f64
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            return write!(f, "{}", self.modifier);
        }
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}

impl std::str::FromStr for DiceExpr {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
