//! Totalistic Life-like rules.

use crate::{
    cells::{State, ALIVE, DEAD},
    rules::Rule,
};
use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Totalistic Life-like rules.
///
/// A rule is described by two lookup tables indexed by the number of
/// living neighbors (`0..=8`): one for births, one for survivals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Life {
    /// `birth[n]` is true if a dead cell with `n` living neighbors
    /// becomes alive.
    birth: [bool; 9],
    /// `survive[n]` is true if a living cell with `n` living neighbors
    /// stays alive.
    survive: [bool; 9],
}

impl Life {
    /// Constructs a new rule from the `b` and `s` data.
    ///
    /// Numbers larger than 8 are ignored.
    pub fn new(b: &[u8], s: &[u8]) -> Self {
        let mut birth = [false; 9];
        let mut survive = [false; 9];
        for &n in b.iter().filter(|&&n| n <= 8) {
            birth[n as usize] = true;
        }
        for &n in s.iter().filter(|&&n| n <= 8) {
            survive[n as usize] = true;
        }
        Life { birth, survive }
    }

    /// Parses a rule string of the form `B<digits>/S<digits>`.
    ///
    /// The parser never fails:
    ///
    /// * `B` selects the birth set, `S` selects the survival set;
    /// * a digit `0`–`8` enables that neighbor count in the selected set,
    ///   which is the birth set until a letter says otherwise;
    /// * `9` and any other character are ignored.
    ///
    /// So an empty or malformed string gives a rule with both sets empty.
    pub fn parse_rule(rule_string: &str) -> Self {
        let mut life = Life::new(&[], &[]);
        let mut target = &mut life.birth;
        for c in rule_string.chars() {
            match c {
                'B' => target = &mut life.birth,
                'S' => target = &mut life.survive,
                '0'..='8' => target[c as usize - '0' as usize] = true,
                _ => (),
            }
        }
        life
    }

    /// Whether a dead cell with `alives` living neighbors becomes alive.
    #[inline]
    pub fn is_birth(&self, alives: u8) -> bool {
        self.birth.get(alives as usize).copied().unwrap_or(false)
    }

    /// Whether a living cell with `alives` living neighbors stays alive.
    #[inline]
    pub fn is_survival(&self, alives: u8) -> bool {
        self.survive.get(alives as usize).copied().unwrap_or(false)
    }

    /// Neighbor counts that cause a birth, in increasing order.
    pub fn birth(&self) -> Vec<u8> {
        (0..=8).filter(|&n| self.birth[n as usize]).collect()
    }

    /// Neighbor counts that allow survival, in increasing order.
    pub fn survive(&self) -> Vec<u8> {
        (0..=8).filter(|&n| self.survive[n as usize]).collect()
    }
}

/// Conway's Game of Life, `B3/S23`.
impl Default for Life {
    fn default() -> Self {
        Life::new(&[3], &[2, 3])
    }
}

impl Rule for Life {
    #[inline]
    fn transition(&self, state: State, alives: u8) -> State {
        let next = if state.is_alive() {
            self.is_survival(alives)
        } else {
            self.is_birth(alives)
        };
        if next {
            ALIVE
        } else {
            DEAD
        }
    }
}

impl FromStr for Life {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Life::parse_rule(s))
    }
}

/// Writes the rule in the canonical `B3/S23` form.
impl Display for Life {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in self.birth() {
            write!(f, "{}", n)?;
        }
        f.write_str("/S")?;
        for n in self.survive() {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}
