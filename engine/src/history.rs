use crate::grid::Position;

/// Chip movement history with a rewind cursor.
///
/// Recording after a rewind drops the positions past the cursor, so the trail always shows the
/// path that led to the current state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    positions: Vec<Position>,
    cursor: usize,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positions visible at the cursor.
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions[..self.cursor]
    }

    pub fn last(&self) -> Option<Position> {
        self.positions().last().copied()
    }

    pub fn can_forward(&self) -> bool {
        self.cursor < self.positions.len()
    }

    pub fn record(&mut self, pos: Position) -> usize {
        self.positions.truncate(self.cursor);
        self.positions.push(pos);
        self.cursor += 1;
        self.cursor
    }

    pub fn rewind(&mut self, steps: usize) -> usize {
        self.cursor = self.cursor.saturating_sub(steps);
        self.cursor
    }

    pub fn forward(&mut self, steps: usize) -> usize {
        self.cursor = (self.cursor + steps).min(self.positions.len());
        self.cursor
    }

    /// The visible history with the live position appended, ready to route as a trail.
    pub fn with_current(&self, current: Position) -> Vec<Position> {
        let mut trail = Vec::with_capacity(self.cursor + 1);
        trail.extend_from_slice(self.positions());
        trail.push(current);
        trail
    }
}
