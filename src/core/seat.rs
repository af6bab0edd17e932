//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! A player's fixed position in turn order, 0-based.
//!
//! ## SeatMap
//!
//! Per-seat data backed by `Vec` for O(1) access, indexable by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Seat indices increase (+1).
    #[default]
    Clockwise,
    /// Seat indices decrease (-1).
    CounterClockwise,
}

impl Direction {
    /// The signed step applied to the seat index.
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Seat identifier supporting 2-255 players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a table with `player_count` players.
    ///
    /// ```
    /// use eights::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(3).collect();
    /// assert_eq!(seats, vec![Seat::new(0), Seat::new(1), Seat::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = Seat> {
        (0..player_count as u8).map(Seat)
    }

    /// The seat `steps` positions away in `direction`, wrapping around the table.
    #[must_use]
    pub fn offset(self, direction: Direction, steps: usize, player_count: usize) -> Seat {
        debug_assert!(player_count > 0);
        let n = player_count as isize;
        let delta = direction.step() * (steps as isize % n);
        let next = (self.0 as isize + delta).rem_euclid(n);
        Seat(next as u8)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use eights::core::{Seat, SeatMap};
///
/// let mut scores: SeatMap<i64> = SeatMap::with_value(4, 0);
/// scores[Seat::new(1)] = 15;
/// assert_eq!(scores[Seat::new(1)], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(Seat) -> T) -> Self {
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(Seat(i))).collect();
        Self { data }
    }

    /// Create a new SeatMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a seat's data mutably.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

impl<T> FromIterator<T> for SeatMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_basics() {
        let s0 = Seat::new(0);
        assert_eq!(s0.index(), 0);
        assert_eq!(format!("{}", Seat::new(2)), "Seat 2");
    }

    #[test]
    fn test_direction_reverse_twice() {
        let d = Direction::Clockwise;
        assert_eq!(d.reversed(), Direction::CounterClockwise);
        assert_eq!(d.reversed().reversed(), d);
        assert_eq!(Direction::CounterClockwise.step(), -1);
    }

    #[test]
    fn test_offset_wraps_both_ways() {
        let n = 3;
        assert_eq!(Seat::new(2).offset(Direction::Clockwise, 1, n), Seat::new(0));
        assert_eq!(Seat::new(0).offset(Direction::CounterClockwise, 1, n), Seat::new(2));
        assert_eq!(Seat::new(0).offset(Direction::Clockwise, 2, n), Seat::new(2));
        assert_eq!(Seat::new(1).offset(Direction::CounterClockwise, 5, n), Seat::new(2));
        assert_eq!(Seat::new(1).offset(Direction::Clockwise, 0, n), Seat::new(1));
    }

    #[test]
    fn test_seat_map_access() {
        let mut map: SeatMap<i32> = SeatMap::new(3, |s| s.index() as i32 * 10);
        assert_eq!(map[Seat::new(2)], 20);

        map[Seat::new(0)] = 5;
        assert_eq!(map[Seat::new(0)], 5);
        assert_eq!(map.player_count(), 3);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[1], (Seat::new(1), &10));
    }

    #[test]
    fn test_seat_map_from_iter() {
        let map: SeatMap<usize> = vec![3, 4].into_iter().collect();
        assert_eq!(map[Seat::new(1)], 4);
        assert_eq!(map.values().sum::<usize>(), 7);
    }

    #[test]
    fn test_seat_map_serialization() {
        let map: SeatMap<i64> = SeatMap::new(2, |s| s.index() as i64 - 5);
        let json = serde_json::to_string(&map).unwrap();
        let back: SeatMap<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
