use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the play field, in the same units as the cell size.
///
/// Positions produced by the simulation are always multiples of the cell size,
/// with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Column and row of the cell this position falls in
    pub fn cell(&self, cell_size: i32) -> (i32, i32) {
        (self.x.div_euclid(cell_size), self.y.div_euclid(cell_size))
    }

    pub fn is_aligned(&self, cell_size: i32) -> bool {
        self.x.rem_euclid(cell_size) == 0 && self.y.rem_euclid(cell_size) == 0
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One body unit of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: GridPosition,
    /// Set on the tick the segment is created; it sits still until cleared
    pub pending_spawn: bool,
}

impl Segment {
    fn spawned_at(position: GridPosition) -> Self {
        Self {
            position,
            pending_spawn: true,
        }
    }
}

/// The snake: a head moved by the current direction, followed by a chain of
/// segments that each step into the cell their neighbour just left.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: GridPosition,
    /// Index 0 is the segment nearest the head
    body: Vec<Segment>,
    pending_growth: u32,
}

impl Snake {
    /// Create a snake with an empty body that still owes `pending_growth` segments
    pub fn new(head: GridPosition, pending_growth: u32) -> Self {
        Self {
            head,
            body: Vec::new(),
            pending_growth,
        }
    }

    pub fn head(&self) -> GridPosition {
        self.head
    }

    pub fn segments(&self) -> &[Segment] {
        &self.body
    }

    /// Body positions ordered from the head towards the tail
    pub fn body_positions(&self) -> Vec<GridPosition> {
        self.body.iter().map(|segment| segment.position).collect()
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Owe the snake one more segment
    pub fn queue_growth(&mut self) {
        self.pending_growth += 1;
    }

    /// Number of body segments, head excluded
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Position of the last body segment, or the head when there is no body
    pub fn tail(&self) -> GridPosition {
        self.body.last().map_or(self.head, |segment| segment.position)
    }

    /// Materialise one owed segment on top of the tail. Returns whether a
    /// segment was added.
    pub fn advance_growth(&mut self) -> bool {
        if self.pending_growth == 0 {
            return false;
        }

        let spawn_at = self.tail();
        self.body.push(Segment::spawned_at(spawn_at));
        self.pending_growth -= 1;
        true
    }

    /// Shift the chain one step and translate the head by `(dx, dy)`.
    ///
    /// The body is walked from the tail towards the head so that every segment
    /// copies its neighbour's position before that neighbour is updated.
    /// Segments spawned this tick only lose their flag and stay in place.
    pub fn advance_movement(&mut self, dx: i32, dy: i32) {
        for i in (0..self.body.len()).rev() {
            if self.body[i].pending_spawn {
                self.body[i].pending_spawn = false;
                continue;
            }

            self.body[i].position = if i == 0 {
                self.head
            } else {
                self.body[i - 1].position
            };
        }

        self.head = self.head.moved_by(dx, dy);
    }

    /// Check if the head shares a cell with any body segment, fresh ones included
    pub fn head_hits_body(&self) -> bool {
        self.body
            .iter()
            .any(|segment| segment.position == self.head)
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Dead(CollisionType),
}

/// Observable state handed back to the driver after each tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub head: GridPosition,
    /// Body positions ordered from the head towards the tail
    pub body: Vec<GridPosition>,
    pub apple: GridPosition,
    pub score: u32,
    pub alive: bool,
    /// Whether the apple was eaten on the tick that produced this snapshot
    pub ate_apple: bool,
    pub collision: Option<CollisionType>,
}
