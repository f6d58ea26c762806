use ndarray::Array2;

/// Coordinate axis type for board width, height, and positions.
pub type Axis = u8;

/// Count type for cell totals and mine totals.
pub type Area = u16;

/// Two-dimensional cell position `(x, y)`.
pub type Pos = (Axis, Axis);

pub trait GridIndex {
    type Output;
    fn grid_index(self) -> Self::Output;
}

impl GridIndex for Pos {
    type Output = [usize; 2];

    fn grid_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub(crate) const fn area(width: Axis, height: Axis) -> Area {
    let width = width as Area;
    let height = height as Area;
    width.saturating_mul(height)
}

/// The up-to-eight in-bounds cells around a grid position.
pub trait NeighborhoodExt {
    fn neighbors(&self, center: Pos) -> impl Iterator<Item = Pos>;
}

impl<T> NeighborhoodExt for Array2<T> {
    fn neighbors(&self, center: Pos) -> impl Iterator<Item = Pos> {
        let dim = self.dim();
        let bounds: Pos = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&delta| step(center, delta, bounds))
    }
}

#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Applies `delta` to `center`, returning a position only when it stays on the grid.
fn step(center: Pos, delta: (i8, i8), bounds: Pos) -> Option<Pos> {
    let x = center.0.checked_add_signed(delta.0)?;
    let y = center.1.checked_add_signed(delta.1)?;
    (x < bounds.0 && y < bounds.1).then_some((x, y))
}
