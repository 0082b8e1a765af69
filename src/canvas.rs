use num::ToPrimitive;

/// Layout of a two dimensional canvas: its size and how a cell maps
/// to an offset in the backing storage.
pub trait Meta {
    fn new(width: usize, height: usize) -> Self;

    fn size(&self) -> (usize, usize);

    fn index(&self, p: (usize, usize)) -> usize;
}

/// Flat cell storage, addressed by the offsets `Meta::index` yields.
pub trait Data: Sized {
    type Item;

    /// Storage for `len` cells, each holding the default item.
    fn with_len(len: usize) -> Self;

    fn get(&self, index: usize) -> &Self::Item;
    fn get_mut(&mut self, index: usize) -> &mut Self::Item;

    /// Store every `(offset, value)` pair.
    fn fill_from<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (usize, Self::Item)>,
    {
        for (index, value) in cells {
            *self.get_mut(index) = value;
        }
    }
}

pub trait Canvas {
    type Data: Data;
    type Meta: Meta;

    fn run<F, O>(&self, f: F) -> O
    where
        F: FnOnce(&Self::Meta, &Self::Data) -> O;

    fn new(meta: Self::Meta, data: Self::Data) -> Self;

    /// Smallest and largest finite value on the canvas, `None` if the
    /// canvas holds no finite value at all.
    fn value_range(&self) -> Option<(f64, f64)>
    where
        <Self::Data as Data>::Item: ToPrimitive,
    {
        self.run(|meta, data| {
            let (width, height) = meta.size();
            let mut range: Option<(f64, f64)> = None;
            for y in 0..height {
                for x in 0..width {
                    let v = match data.get(meta.index((x, y))).to_f64() {
                        Some(v) if v.is_finite() => v,
                        _ => continue,
                    };
                    range = Some(match range {
                        Some((lo, hi)) => (lo.min(v), hi.max(v)),
                        None => (v, v),
                    });
                }
            }
            range
        })
    }
}

impl<T> Data for Vec<T>
where
    T: Default + Clone,
{
    type Item = T;

    fn with_len(len: usize) -> Self {
        vec![T::default(); len]
    }

    #[inline(always)]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline(always)]
    fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self[index]
    }
}
