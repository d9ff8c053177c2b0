use anyhow::{ensure, Result};
use rand::Rng;

/// Rectangular grid of rock hardness values.
///
/// `hardness[x][y]` is the cost of drilling *into* the cell at row `x`,
/// column `y`. The minimum over the whole grid is cached because the
/// informed heuristics ask for it on every evaluation.
#[derive(Debug, Clone)]
pub struct Map {
    pub rows: usize,
    pub cols: usize,
    hardness: Vec<Vec<u32>>,
    min_hardness: u32,
}

impl Map {
    /// Builds a map from raw hardness rows, rejecting empty or ragged
    /// grids.
    pub fn from_grid(hardness: Vec<Vec<u32>>) -> Result<Self> {
        ensure!(!hardness.is_empty(), "map has no rows");
        let cols = hardness[0].len();
        ensure!(cols > 0, "map has no columns");
        for (x, row) in hardness.iter().enumerate() {
            ensure!(
                row.len() == cols,
                "row {} has {} values, expected {}",
                x,
                row.len(),
                cols
            );
        }
        let min_hardness = hardness
            .iter()
            .flatten()
            .copied()
            .min()
            .expect("grid is non-empty");
        Ok(Map {
            rows: hardness.len(),
            cols,
            hardness,
            min_hardness,
        })
    }

    /// A `rows` by `cols` map with hardness drawn uniformly from
    /// `min..=max`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        min: u32,
        max: u32,
        rng: &mut R,
    ) -> Result<Self> {
        ensure!(rows > 0 && cols > 0, "map dimensions must be positive");
        ensure!(
            min <= max,
            "hardness range is empty: {}..={}",
            min,
            max
        );
        let hardness = (0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_range(min..=max)).collect())
            .collect();
        Self::from_grid(hardness)
    }

    pub fn hardness(&self, x: usize, y: usize) -> u32 {
        self.hardness[x][y]
    }

    pub fn min_hardness(&self) -> u32 {
        self.min_hardness
    }

    /// Whether signed coordinates land inside the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.rows as i64 && y < self.cols as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn valid_grid_reports_dimensions_and_minimum() {
        let map = Map::from_grid(vec![vec![3, 1, 4], vec![1, 5, 9]]).unwrap();
        assert_eq!(map.rows, 2);
        assert_eq!(map.cols, 3);
        assert_eq!(map.hardness(0, 2), 4);
        assert_eq!(map.min_hardness(), 1);
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let err = Map::from_grid(vec![vec![1, 2], vec![3]]).err().unwrap();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn zero_hardness_is_allowed() {
        let map = Map::from_grid(vec![vec![1, 0]]).unwrap();
        assert_eq!(map.min_hardness(), 0);
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(Map::from_grid(Vec::new()).is_err());
        assert!(Map::from_grid(vec![Vec::new()]).is_err());
    }

    #[test]
    fn random_map_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = Map::random(4, 6, 2, 5, &mut rng).unwrap();
        assert_eq!(map.rows, 4);
        assert_eq!(map.cols, 6);
        for x in 0..4 {
            for y in 0..6 {
                let value = map.hardness(x, y);
                assert!((2..=5).contains(&value));
            }
        }
        assert!(map.min_hardness() >= 2);
    }

    #[test]
    fn bounds_checks_cover_both_axes() {
        let map = Map::from_grid(vec![vec![1, 1], vec![1, 1], vec![1, 1]]).unwrap();
        assert!(map.contains(0, 0));
        assert!(map.contains(2, 1));
        assert!(!map.contains(-1, 0));
        assert!(!map.contains(0, 2));
        assert!(!map.contains(3, 0));
    }
}
