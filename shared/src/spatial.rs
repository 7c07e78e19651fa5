//! Positions and client-side nearest-neighbour queries
//!
//! The API has no server-side spatial query, so "nearest X to Y" questions
//! are answered by fetching the candidate list and ordering it here.

use serde::{Deserialize, Serialize};

/// A point in world space as reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "X", alias = "x")]
    pub x: f64,
    #[serde(rename = "Y", alias = "y")]
    pub y: f64,
    #[serde(rename = "Z", alias = "z")]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Anything that has a location in the world.
pub trait Positionable {
    fn position(&self) -> Position;
}

impl Positionable for Position {
    fn position(&self) -> Position {
        *self
    }
}

impl<T: Positionable + ?Sized> Positionable for &T {
    fn position(&self) -> Position {
        (**self).position()
    }
}

/// Euclidean distance between two positioned things.
pub fn distance<A, B>(a: &A, b: &B) -> f64
where
    A: Positionable + ?Sized,
    B: Positionable + ?Sized,
{
    a.position().distance_to(&b.position())
}

/// Keeps the candidates accepted by `predicate`, ordered nearest-first from `origin`.
///
/// The sort is stable: candidates at equal distance keep their input order.
pub fn nearest_matching<O, T, F>(origin: &O, candidates: Vec<T>, mut predicate: F) -> Vec<T>
where
    O: Positionable + ?Sized,
    T: Positionable,
    F: FnMut(&T) -> bool,
{
    let from = origin.position();
    let mut ranked: Vec<(f64, T)> = candidates
        .into_iter()
        .filter(|candidate| predicate(candidate))
        .map(|candidate| (from.distance_to(&candidate.position()), candidate))
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().map(|(_, candidate)| candidate).collect()
}
