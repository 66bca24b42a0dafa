//! Grid primitives shared by the search and wall-following code.

mod cell;
mod direction;
mod visited;

pub use cell::Cell;
pub use direction::{Direction, WallSide};
pub use visited::{Signature, VisitedStateSet};
