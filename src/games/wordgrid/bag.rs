//! Tile bag with the standard 100-tile English distribution.

use super::types::{Letter, Tile};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Maximum rack size.
pub const RACK_SIZE: usize = 7;

const DISTRIBUTION: [(char, usize); 26] = [
    ('A', 9), ('B', 2), ('C', 2), ('D', 4), ('E', 12), ('F', 2), ('G', 3),
    ('H', 2), ('I', 9), ('J', 1), ('K', 1), ('L', 4), ('M', 2), ('N', 6),
    ('O', 8), ('P', 2), ('Q', 1), ('R', 6), ('S', 4), ('T', 6), ('U', 4),
    ('V', 2), ('W', 2), ('X', 1), ('Y', 2), ('Z', 1),
];

const BLANKS: usize = 2;

/// Undrawn tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    /// Full standard bag, unshuffled.
    pub fn standard() -> Self {
        let mut tiles = Vec::with_capacity(100);
        for (c, count) in DISTRIBUTION {
            if let Some(letter) = Letter::new(c) {
                tiles.extend(std::iter::repeat_n(Tile::letter(letter), count));
            }
        }
        tiles.extend(std::iter::repeat_n(Tile::blank(), BLANKS));
        Self { tiles }
    }

    /// Full standard bag, shuffled.
    #[instrument(skip(rng))]
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bag = Self::standard();
        bag.tiles.shuffle(rng);
        bag
    }

    /// Tiles remaining.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true once the bag is exhausted.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Draws up to `count` tiles.
    pub fn draw(&mut self, count: usize) -> Vec<Tile> {
        let take = count.min(self.tiles.len());
        let drawn = self.tiles.split_off(self.tiles.len() - take);
        debug!(drawn = drawn.len(), remaining = self.tiles.len(), "Drew tiles");
        drawn
    }

    /// Returns tiles to the bag and reshuffles it.
    #[instrument(skip(self, tiles, rng), fields(returned = tiles.len()))]
    pub fn put_back<R: Rng + ?Sized>(&mut self, tiles: Vec<Tile>, rng: &mut R) {
        self.tiles.extend(tiles);
        self.tiles.shuffle(rng);
    }

    /// Tops a rack up to [`RACK_SIZE`].
    pub fn refill(&mut self, rack: &mut Vec<Tile>) {
        let missing = RACK_SIZE.saturating_sub(rack.len());
        rack.extend(self.draw(missing));
    }
}

/// Deals a fresh random rack from a full bag.
///
/// Only used to bootstrap a seat that has never been dealt tiles.
pub fn random_rack<R: Rng + ?Sized>(rng: &mut R) -> Vec<Tile> {
    TileBag::shuffled(rng).draw(RACK_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_standard_bag_has_100_tiles() {
        let bag = TileBag::standard();
        assert_eq!(bag.len(), 100);
        assert_eq!(bag.tiles.iter().filter(|t| t.is_blank).count(), 2);
    }

    #[test]
    fn test_refill_tops_up() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bag = TileBag::shuffled(&mut rng);
        let mut rack = bag.draw(3);
        bag.refill(&mut rack);
        assert_eq!(rack.len(), RACK_SIZE);
        assert_eq!(bag.len(), 93);
    }

    #[test]
    fn test_draw_from_nearly_empty_bag() {
        let mut bag = TileBag::standard();
        bag.draw(98);
        assert_eq!(bag.draw(7).len(), 2);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_put_back_restores_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut bag = TileBag::shuffled(&mut rng);
        let drawn = bag.draw(4);
        bag.put_back(drawn, &mut rng);
        assert_eq!(bag.len(), 100);
        assert_eq!(bag.tiles.iter().filter(|t| t.is_blank).count(), 2);
    }

    #[test]
    fn test_random_rack_is_seven() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_rack(&mut rng).len(), RACK_SIZE);
    }
}
