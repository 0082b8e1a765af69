use crate::canvas::{Canvas, Data, Meta};
use std::ops::{Index, IndexMut};

/// Row major layout, `(x, y)` lives at `x + y * width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMajor {
    width: usize,
    height: usize,
}

#[derive(Debug, Clone)]
pub struct Array<D, M> {
    pub data: D,
    pub meta: M,
}

impl<D, M> Canvas for Array<D, M>
where
    D: Data,
    M: Meta,
{
    type Data = D;
    type Meta = M;

    #[inline(always)]
    fn run<F, O>(&self, f: F) -> O
    where
        F: FnOnce(&M, &D) -> O,
    {
        f(&self.meta, &self.data)
    }

    fn new(meta: M, data: D) -> Self {
        Array { data, meta }
    }
}

impl Meta for RowMajor {
    fn new(width: usize, height: usize) -> Self {
        RowMajor { width, height }
    }

    #[inline(always)]
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline(always)]
    fn index(&self, p: (usize, usize)) -> usize {
        p.0 + p.1 * self.width
    }
}

pub type Field = Array<Vec<f64>, RowMajor>;

impl Array<Vec<f64>, RowMajor> {
    /// Fill a `width` x `height` field with `f(x, y)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let meta = RowMajor::new(width, height);
        let mut data = Vec::<f64>::with_len(width * height);
        data.fill_from(
            (0..height)
                .flat_map(|y| (0..width).map(move |x| (x, y)))
                .map(|(x, y)| (meta.index((x, y)), f(x, y))),
        );
        Canvas::new(meta, data)
    }

    /// Box filter the field onto a `width` x `height` field.
    ///
    /// Every target cell is the mean of all source cells it covers, so a
    /// dense field shrinks without aliasing. When the target is larger
    /// than the source along an axis each target cell takes the nearest
    /// source cell.
    pub fn resample(&self, width: usize, height: usize) -> Field {
        let (src_w, src_h) = self.meta.size();
        if src_w == 0 || src_h == 0 {
            return Field::from_fn(width, height, |_, _| f64::NAN);
        }
        let cols: Vec<_> = (0..width).map(|x| cover(x, width, src_w)).collect();
        let rows: Vec<_> = (0..height).map(|y| cover(y, height, src_h)).collect();

        Field::from_fn(width, height, |x, y| {
            let (x0, x1) = cols[x];
            let (y0, y1) = rows[y];
            let mut sum = 0.0;
            let mut count = 0usize;
            for sy in y0..y1 {
                for sx in x0..x1 {
                    let v = self[(sx, sy)];
                    if v.is_finite() {
                        sum += v;
                        count += 1;
                    }
                }
            }
            if count == 0 {
                f64::NAN
            } else {
                sum / count as f64
            }
        })
    }
}

/// Half open source span covered by target cell `i` out of `n`, mapped
/// onto `m` source cells. Never empty.
fn cover(i: usize, n: usize, m: usize) -> (usize, usize) {
    let lo = (i * m / n).min(m - 1);
    let hi = ((i + 1) * m / n).clamp(lo + 1, m);
    (lo, hi)
}

impl<D, M> Index<(usize, usize)> for Array<D, M>
where
    D: Data,
    M: Meta,
{
    type Output = D::Item;

    #[inline(always)]
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        let index = self.meta.index(idx);
        self.data.get(index)
    }
}
impl<D, M> IndexMut<(usize, usize)> for Array<D, M>
where
    D: Data,
    M: Meta,
{
    #[inline(always)]
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let index = self.meta.index(idx);
        self.data.get_mut(index)
    }
}
