//! In-memory grid world implementing [`GridAgent`].

use crate::agent::GridAgent;
use crate::core::{Cell, Direction};
use crate::error::{NavError, Result};

/// Terrain of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
    /// Impassable until filled
    Water,
}

impl Tile {
    fn symbol(self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Wall => '#',
            Tile::Water => '~',
        }
    }
}

/// Parsed ASCII map: world plus the optional `T` marker.
#[derive(Clone, Debug)]
pub struct ParsedMap {
    pub world: GridWorld,
    pub target: Option<Cell>,
}

/// Rectangular world with a single agent.
///
/// Turn rules: at most one move and one fill per turn, and after a move
/// the agent sits out `movement_cooldown` further turns.
/// Call [`end_turn`](Self::end_turn) between turns.
#[derive(Clone, Debug)]
pub struct GridWorld {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    agent: Cell,
    sensing_radius_squared: i32,
    fill_enabled: bool,
    movement_cooldown: u32,
    cooldown_remaining: u32,
    filled_this_turn: bool,
    turn: u64,
}

impl GridWorld {
    /// Open floor of the given size with the agent at `agent`.
    pub fn new(width: i32, height: i32, agent: Cell) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            tiles: vec![Tile::Floor; (width * height) as usize],
            agent,
            sensing_radius_squared: 20,
            fill_enabled: true,
            movement_cooldown: 0,
            cooldown_remaining: 0,
            filled_this_turn: false,
            turn: 0,
        }
    }

    /// Parse rows of `.`, `#`, `~`, `A` (agent on floor) and `T` (target on
    /// floor). The first non-empty row is the northmost.
    pub fn from_ascii(map: &str) -> Result<ParsedMap> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(NavError::Scenario("map is empty".to_string()));
        }

        let width = rows[0].chars().count();
        if let Some(bad) = rows.iter().position(|row| row.chars().count() != width) {
            return Err(NavError::Scenario(format!(
                "map row {} has {} cells, expected {}",
                bad,
                rows[bad].chars().count(),
                width
            )));
        }

        let height = rows.len() as i32;
        let mut world = GridWorld::new(width as i32, height, Cell::default());
        let mut agent = None;
        let mut target = None;

        for (row, line) in rows.iter().enumerate() {
            let y = height - 1 - row as i32;
            for (x, symbol) in line.chars().enumerate() {
                let cell = Cell::new(x as i32, y);
                let tile = match symbol {
                    '.' => Tile::Floor,
                    '#' => Tile::Wall,
                    '~' => Tile::Water,
                    'A' => {
                        if agent.replace(cell).is_some() {
                            return Err(NavError::Scenario("map has more than one 'A'".to_string()));
                        }
                        Tile::Floor
                    }
                    'T' => {
                        if target.replace(cell).is_some() {
                            return Err(NavError::Scenario("map has more than one 'T'".to_string()));
                        }
                        Tile::Floor
                    }
                    other => {
                        return Err(NavError::Scenario(format!(
                            "unknown map symbol '{}' at {}",
                            other, cell
                        )));
                    }
                };
                world.set_tile(cell, tile);
            }
        }

        let Some(agent) = agent else {
            return Err(NavError::Scenario("map has no agent 'A'".to_string()));
        };
        world.agent = agent;
        Ok(ParsedMap { world, target })
    }

    pub fn with_sensing_radius_squared(mut self, radius_squared: i32) -> Self {
        self.sensing_radius_squared = radius_squared;
        self
    }

    pub fn with_fill(mut self, enabled: bool) -> Self {
        self.fill_enabled = enabled;
        self
    }

    /// Turns the agent must wait after each move.
    pub fn with_movement_cooldown(mut self, turns: u32) -> Self {
        self.movement_cooldown = turns;
        self
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.on_map(cell)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.index(cell).map(|i| self.tiles[i])
    }

    /// Overwrite a tile. Off-grid cells are ignored.
    pub fn set_tile(&mut self, cell: Cell, tile: Tile) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = tile;
        }
    }

    pub fn agent(&self) -> Cell {
        self.agent
    }

    /// Turns completed so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Advance the turn clock.
    pub fn end_turn(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
        self.filled_this_turn = false;
        self.turn += 1;
    }

    /// Draw the world, overlaying a path (`*`), filled cells (`+`), the
    /// target (`T`) and the agent (`A`).
    pub fn render(&self, path: &[Cell], fills: &[Cell], target: Option<Cell>) -> String {
        let mut grid: Vec<Vec<char>> = (0..self.height)
            .rev()
            .map(|y| {
                (0..self.width)
                    .map(|x| self.tiles[(y * self.width + x) as usize].symbol())
                    .collect()
            })
            .collect();

        let mut put = |cell: Cell, symbol: char| {
            if self.on_map(cell) {
                let row = (self.height - 1 - cell.y) as usize;
                grid[row][cell.x as usize] = symbol;
            }
        };
        for &cell in path {
            put(cell, '*');
        }
        for &cell in fills {
            put(cell, '+');
        }
        if let Some(target) = target {
            put(target, 'T');
        }
        put(self.agent, 'A');

        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl GridAgent for GridWorld {
    fn position(&self) -> Cell {
        self.agent
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn can_sense(&self, cell: Cell) -> bool {
        self.agent.distance_squared(&cell) <= self.sensing_radius_squared
    }

    fn sense_passable(&self, cell: Cell) -> Option<bool> {
        if !self.can_sense(cell) {
            return None;
        }
        self.tile(cell).map(|tile| tile == Tile::Floor)
    }

    fn sense_fillable(&self, cell: Cell) -> bool {
        self.can_sense(cell) && self.tile(cell) == Some(Tile::Water)
    }

    fn is_movement_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    fn can_move(&self, direction: Direction) -> bool {
        direction != Direction::Center
            && self.is_movement_ready()
            && self.tile(self.agent.step(direction)) == Some(Tile::Floor)
    }

    fn move_agent(&mut self, direction: Direction) -> bool {
        if !self.can_move(direction) {
            return false;
        }
        self.agent = self.agent.step(direction);
        // One move per turn, plus the configured wait
        self.cooldown_remaining = self.movement_cooldown + 1;
        true
    }

    fn can_fill(&self, cell: Cell) -> bool {
        self.fill_enabled
            && !self.filled_this_turn
            && self.agent.is_adjacent_to(&cell)
            && self.tile(cell) == Some(Tile::Water)
    }

    fn fill(&mut self, cell: Cell) -> bool {
        if !self.can_fill(cell) {
            return false;
        }
        self.set_tile(cell, Tile::Floor);
        self.filled_this_turn = true;
        true
    }
}
