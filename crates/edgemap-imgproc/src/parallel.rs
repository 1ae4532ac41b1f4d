use rayon::prelude::*;

use edgemap_image::Plane;

/// Apply a function to each row of the destination plane in parallel.
///
/// The closure receives the row index and the mutable row slice.
pub fn par_iter_rows_mut<T>(dst: &mut Plane<T>, f: impl Fn(usize, &mut [T]) + Send + Sync)
where
    T: Send,
{
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(r, row)| f(r, row));
}

/// Apply a function to each sample pair of two planes in parallel.
pub fn par_iter_rows_val<T1, T2>(
    src: &Plane<T1>,
    dst: &mut Plane<T2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Sync,
    T2: Send,
{
    let cols = src.cols();
    if cols == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .for_each(|(src_row, dst_row)| {
            src_row
                .iter()
                .zip(dst_row.iter_mut())
                .for_each(|(s, d)| f(s, d));
        });
}

/// Apply a function to each sample triple of three planes in parallel.
pub fn par_iter_rows_val_two<T1, T2, T3>(
    src1: &Plane<T1>,
    src2: &Plane<T2>,
    dst: &mut Plane<T3>,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Sync,
    T2: Sync,
    T3: Send,
{
    let cols = src1.cols();
    if cols == 0 {
        return;
    }

    src1.as_slice()
        .par_chunks_exact(cols)
        .zip(src2.as_slice().par_chunks_exact(cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .for_each(|((row1, row2), dst_row)| {
            row1.iter()
                .zip(row2.iter())
                .zip(dst_row.iter_mut())
                .for_each(|((a, b), d)| f(a, b, d));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgemap_image::ImageError;

    #[test]
    fn rows_mut_sees_row_index() {
        let mut plane = Plane::from_size_val([3, 4].into(), 0usize);
        par_iter_rows_mut(&mut plane, |r, row| row.iter_mut().for_each(|v| *v = r));
        assert_eq!(plane.as_slice(), &[0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn val_two_combines_samples() -> Result<(), ImageError> {
        let a = Plane::new([2, 2].into(), vec![1, 2, 3, 4])?;
        let b = Plane::new([2, 2].into(), vec![10, 20, 30, 40])?;
        let mut out = Plane::from_size_val(a.size(), 0);
        par_iter_rows_val_two(&a, &b, &mut out, |x, y, d| *d = x + y);
        assert_eq!(out.as_slice(), &[11, 22, 33, 44]);
        Ok(())
    }

    #[test]
    fn empty_plane_is_noop() {
        let src = Plane::<f32>::from_size_val([0, 0].into(), 0.0);
        let mut dst = Plane::<f32>::from_size_val([0, 0].into(), 0.0);
        par_iter_rows_val(&src, &mut dst, |s, d| *d = *s);
        assert!(dst.as_slice().is_empty());
    }
}
