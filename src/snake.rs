use std::collections::VecDeque;

use crate::{BoardInt, Coords};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Row and column offset of a single step.
    pub fn offset(self) -> (BoardInt, BoardInt) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }
}

/// The snake's body, head first. Never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
}

impl Snake {
    pub fn new(segments: &[Coords], direction: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");
        Snake { body: segments.iter().copied().collect(), direction }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.body.contains(pos)
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Turns the snake unless `new_direction` would reverse it into its neck.
    /// Returns whether the direction was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Pushes a new head one cell ahead. The rest of the body stays put.
    pub fn extend(&mut self) -> Coords {
        let (old_row, old_col) = self.head();
        let (d_row, d_col) = self.direction.offset();
        let new_head = (old_row + d_row, old_col + d_col);

        self.body.push_front(new_head);
        new_head
    }

    /// Drops the last segment and returns the cell it vacated.
    pub fn shorten(&mut self) -> Option<Coords> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    pub fn hit_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|pos| *pos == head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(snake: &Snake) -> Vec<Coords> {
        snake.body().iter().copied().collect()
    }

    #[test]
    fn test_opposites() {
        assert_eq!(Up.opposite(), Down);
        assert_eq!(Down.opposite(), Up);
        assert_eq!(Left.opposite(), Right);
        assert_eq!(Right.opposite(), Left);
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut snake = Snake::new(&[(5, 5), (5, 4)], Right);

        assert!(!snake.set_direction(Left));
        assert_eq!(snake.get_direction(), Right);

        assert!(snake.set_direction(Up));
        assert_eq!(snake.get_direction(), Up);

        // Same direction is not a reversal
        assert!(snake.set_direction(Up));
        assert_eq!(snake.get_direction(), Up);
    }

    #[test]
    fn test_extend_moves_head_in_each_direction() {
        let cases = [(Up, (4, 5)), (Down, (6, 5)), (Left, (5, 4)), (Right, (5, 6))];

        for (dir, expected) in cases.iter() {
            let mut snake = Snake::new(&[(5, 5)], *dir);
            assert_eq!(snake.extend(), *expected);
            assert_eq!(body_of(&snake), vec![*expected, (5, 5)]);
        }
    }

    #[test]
    fn test_shorten_returns_vacated_tail() {
        let mut snake = Snake::new(&[(15, 10), (14, 10), (13, 10)], Down);
        snake.extend();

        assert_eq!(snake.shorten(), Some((13, 10)));
        assert_eq!(body_of(&snake), vec![(16, 10), (15, 10), (14, 10)]);
    }

    #[test]
    fn test_shorten_keeps_last_segment() {
        let mut snake = Snake::new(&[(3, 3)], Down);
        assert_eq!(snake.shorten(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_single_segment_never_hits_itself() {
        let mut snake = Snake::new(&[(3, 3)], Down);
        for _ in 0..5 {
            snake.extend();
            snake.shorten();
            assert!(!snake.hit_self());
        }
    }

    #[test]
    fn test_hit_self() {
        // The third body segment sits right below the head
        let mut snake = Snake::new(&[(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)], Left);
        assert!(!snake.hit_self());

        snake.set_direction(Down);
        snake.extend();
        snake.shorten();
        assert_eq!(snake.head(), (6, 5));
        assert!(snake.hit_self());
    }

    #[test]
    fn test_chasing_own_tail_is_safe() {
        // The tail moves out of the way in the same step
        let mut snake = Snake::new(&[(5, 5), (5, 6), (6, 6), (6, 5)], Left);

        snake.set_direction(Down);
        snake.extend();
        snake.shorten();
        assert_eq!(snake.head(), (6, 5));
        assert!(!snake.hit_self());
    }
}
