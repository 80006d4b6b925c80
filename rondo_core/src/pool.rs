use std::fmt::{Display, Formatter};
use rand::Rng;
use crate::error::ConfigError;

/// Shared two dimensional grid of resources.
///
/// The pool is mutated only by adding the same (global) delta to every cell, after which
/// every cell is clamped at zero, so no cell ever becomes negative.
/// All agents observe the same pool, there is no private view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "speedy", derive(speedy::Writable, speedy::Readable))]
pub struct ResourcePool{
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl ResourcePool{

    /// Creates pool with every cell empty.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError>{
        Self::from_cells(width, height, vec![0.0; width * height])
    }

    /// Creates pool from cells stored row after row. Negative cells are clamped at zero.
    pub fn from_cells(width: usize, height: usize, mut cells: Vec<f64>) -> Result<Self, ConfigError>{
        if width == 0 || height == 0 || cells.len() != width * height{
            return Err(ConfigError::EmptyResourceGrid{width, height});
        }
        cells.iter_mut().for_each(|c| *c = c.max(0.0));
        Ok(Self{width, height, cells})
    }

    /// Creates pool with cells drawn uniformly from integers `0..high`.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, high: u32, rng: &mut R) -> Result<Self, ConfigError>{
        let cells = (0..width * height)
            .map(|_| rng.random_range(0..high.max(1)) as f64)
            .collect();
        Self::from_cells(width, height, cells)
    }

    /// Adds `delta` to every cell, then clamps every cell at zero.
    pub fn apply_global_delta(&mut self, delta: f64){
        for cell in self.cells.iter_mut(){
            *cell = (*cell + delta).max(0.0);
        }
    }

    /// Current state of the pool, the observation shared by every agent.
    pub fn observe(&self) -> &[f64]{
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64>{
        if x < self.width && y < self.height{
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, f64>{
        self.cells.chunks(self.width)
    }

    pub fn width(&self) -> usize{
        self.width
    }

    pub fn height(&self) -> usize{
        self.height
    }

    pub fn total(&self) -> f64{
        self.cells.iter().sum()
    }

    pub fn max_cell(&self) -> f64{
        self.cells.iter().cloned().fold(0.0, f64::max)
    }

    /// Every cell is zero. Depletion does not end an episode on its own.
    pub fn is_depleted(&self) -> bool{
        self.cells.iter().all(|c| *c <= 0.0)
    }
}

impl Display for ResourcePool{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate(){
            if i > 0{
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate(){
                if j > 0{
                    write!(f, " ")?;
                }
                write!(f, "{cell:7.2}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests{
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::pool::ResourcePool;

    #[test]
    fn delta_applies_to_every_cell_and_clamps(){
        let mut pool = ResourcePool::from_cells(2, 2, vec![1.0, 0.5, 3.0, 0.0]).unwrap();
        pool.apply_global_delta(-0.75);
        assert_eq!(pool.observe(), &[0.25, 0.0, 2.25, 0.0]);
        pool.apply_global_delta(1.0);
        assert_eq!(pool.get(1, 0), Some(1.0));
        assert_eq!(pool.get(2, 0), None);
    }

    #[test]
    fn nan_delta_keeps_floor(){
        let mut pool = ResourcePool::from_cells(2, 1, vec![1.0, 4.0]).unwrap();
        pool.apply_global_delta(f64::NAN);
        assert_eq!(pool.observe(), &[0.0, 0.0]);
        assert!(pool.is_depleted());
    }

    #[test]
    fn depletion(){
        let mut pool = ResourcePool::from_cells(1, 2, vec![1.0, 2.0]).unwrap();
        assert!(!pool.is_depleted());
        pool.apply_global_delta(-5.0);
        assert!(pool.is_depleted());
        assert_eq!(pool.total(), 0.0);
    }

    #[test]
    fn seeded_pool_is_reproducible(){
        let a = ResourcePool::random(8, 8, 256, &mut StdRng::seed_from_u64(12345)).unwrap();
        let b = ResourcePool::random(8, 8, 256, &mut StdRng::seed_from_u64(12345)).unwrap();
        assert_eq!(a, b);
        assert!(a.observe().iter().all(|c| (0.0..256.0).contains(c)));
    }

    #[test]
    fn rejects_empty_grid(){
        assert!(ResourcePool::new(0, 8).is_err());
        assert!(ResourcePool::from_cells(2, 2, vec![1.0]).is_err());
    }

    proptest!{
        #[test]
        fn cells_never_negative(deltas in proptest::collection::vec(-50.0f64..50.0, 0..40)){
            let mut pool = ResourcePool::from_cells(3, 2, vec![0.0, 1.0, 5.0, 10.0, 20.0, 40.0]).unwrap();
            for d in deltas{
                pool.apply_global_delta(d);
                prop_assert!(pool.observe().iter().all(|c| *c >= 0.0));
            }
        }
    }
}
