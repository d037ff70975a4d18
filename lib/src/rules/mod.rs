//! Cellular automata rules.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

mod life;

use crate::cells::State;
pub use life::Life;

/// A cellular automaton rule.
///
/// The evolution step is generic over this trait. Currently the only
/// implementation is [`Life`], the totalistic Life-like rules.
pub trait Rule {
    /// The state of a cell in the next generation,
    /// given its current state and the number of its living neighbors.
    ///
    /// `alives` is always in `0..=8`.
    fn transition(&self, state: State, alives: u8) -> State;
}
