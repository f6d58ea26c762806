use ndarray::Array2;

use crate::*;

/// Lays out `config.mines()` mines uniformly at random, never on `safe`.
///
/// Every candidate cell except the safe one goes into one list and gets
/// partially shuffled, so termination never depends on mine density.
pub(crate) fn scatter(config: &BoardConfig, safe: Pos, seed: u64) -> Array2<bool> {
    use rand::prelude::*;

    let (width, height) = config.size();
    let mut candidates: Vec<Pos> = Vec::with_capacity(config.total_cells() as usize - 1);
    for x in 0..width {
        for y in 0..height {
            if (x, y) != safe {
                candidates.push((x, y));
            }
        }
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let (mines, _) = candidates.partial_shuffle(&mut rng, config.mines() as usize);

    let mut mask: Array2<bool> = Array2::default(config.size().grid_index());
    for &pos in mines.iter() {
        mask[pos.grid_index()] = true;
    }
    mask
}

/// Computes the clue grid for a mine mask: mines stay mines, every other
/// square stores its adjacent-mine count.
pub(crate) fn survey(mines: &Array2<bool>) -> Array2<Square> {
    Array2::from_shape_fn(mines.raw_dim(), |(x, y)| {
        if mines[(x, y)] {
            Square::Mine
        } else {
            let pos = (x as Axis, y as Axis);
            let clue = mines
                .neighbors(pos)
                .filter(|&neighbor| mines[neighbor.grid_index()])
                .count()
                .try_into()
                .unwrap();
            Square::Clue(clue)
        }
    })
}

/// Builds the mask for an explicit mine list, validating every coordinate.
pub(crate) fn mask_from(size: Pos, mines: &[Pos]) -> Result<Array2<bool>> {
    let mut mask: Array2<bool> = Array2::default(size.grid_index());
    for &pos in mines {
        if pos.0 >= size.0 || pos.1 >= size.1 {
            return Err(BoardError::OutOfBounds);
        }
        mask[pos.grid_index()] = true;
    }
    Ok(mask)
}
