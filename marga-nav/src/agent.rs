//! Agent abstraction consumed by the navigator.

use crate::core::{Cell, Direction};

/// Trait for querying the world around an agent and issuing its actions.
///
/// Implement this to connect a [`Navigator`](crate::Navigator) to a game
/// host or a simulation. Every query is local to the agent; cells the
/// agent cannot sense report "no information" rather than failing.
///
/// # Example
///
/// ```ignore
/// impl GridAgent for MyUnit {
///     fn position(&self) -> Cell { self.loc }
///     fn width(&self) -> i32 { self.map.width }
///     fn height(&self) -> i32 { self.map.height }
///     fn can_sense(&self, cell: Cell) -> bool { self.loc.distance_squared(&cell) <= 20 }
///     fn sense_passable(&self, cell: Cell) -> Option<bool> { self.sense(cell).map(|t| t.passable) }
///     fn is_movement_ready(&self) -> bool { self.cooldown == 0 }
///     fn can_move(&self, d: Direction) -> bool { self.host.can_move(d) }
///     fn move_agent(&mut self, d: Direction) -> bool { self.host.do_move(d).is_ok() }
/// }
/// ```
pub trait GridAgent {
    /// Current cell.
    fn position(&self) -> Cell;

    /// Grid width in cells.
    fn width(&self) -> i32;

    /// Grid height in cells.
    fn height(&self) -> i32;

    /// Is the cell inside the grid?
    fn on_map(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width() && cell.y < self.height()
    }

    /// Is the cell within sensing range?
    fn can_sense(&self, cell: Cell) -> bool;

    /// Passability of a sensed cell. `None` means no information.
    fn sense_passable(&self, cell: Cell) -> Option<bool>;

    /// Can the cell be converted to passable terrain by a fill action?
    fn sense_fillable(&self, _cell: Cell) -> bool {
        false
    }

    /// Is the movement cooldown clear this turn?
    fn is_movement_ready(&self) -> bool;

    /// Would a move in this direction succeed right now?
    fn can_move(&self, direction: Direction) -> bool;

    /// Execute a move. Returns `false` if the host rejected it.
    fn move_agent(&mut self, direction: Direction) -> bool;

    /// Would filling this cell succeed right now?
    ///
    /// Default: the agent has no fill capability.
    fn can_fill(&self, _cell: Cell) -> bool {
        false
    }

    /// Fill a cell. Returns `false` if the host rejected it.
    fn fill(&mut self, _cell: Cell) -> bool {
        false
    }
}

/// Can the agent step in `direction` this turn, filling first if allowed?
pub(crate) fn can_step<A: GridAgent + ?Sized>(
    agent: &A,
    direction: Direction,
    allow_fill: bool,
) -> bool {
    if direction == Direction::Center {
        return false;
    }
    agent.can_move(direction) || (allow_fill && agent.can_fill(agent.position().step(direction)))
}

/// Commit a step: fill the destination if it blocks the move, then move.
///
/// Returns the filled cell (if any) and whether the agent moved. At most
/// one fill and one move happen per call.
pub(crate) fn commit_step<A: GridAgent + ?Sized>(
    agent: &mut A,
    direction: Direction,
    allow_fill: bool,
) -> (Option<Cell>, bool) {
    let destination = agent.position().step(direction);
    let mut filled = None;

    if !agent.can_move(direction)
        && allow_fill
        && agent.can_fill(destination)
        && agent.fill(destination)
    {
        filled = Some(destination);
    }

    let moved = agent.can_move(direction) && agent.move_agent(direction);
    (filled, moved)
}
