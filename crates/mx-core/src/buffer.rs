use crate::dims::Dims;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::partition::WorkRange;

/// Flat, zero-initialised output storage for one multiplication.
///
/// During the parallel phase the buffer is split into one exclusive slice per
/// worker; once every slice borrow has ended the coordinator owns it again
/// and converts it into a [`Matrix`].
#[derive(Debug, Clone)]
pub struct ResultBuffer {
    data: Vec<i64>,
}

impl ResultBuffer {
    /// Allocate `len` zeroed cells.
    pub fn zeros(len: usize) -> Self {
        ResultBuffer { data: vec![0; len] }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    /// Hand out one mutable slice per range.
    ///
    /// `ranges` must be ascending, contiguous and cover the whole buffer,
    /// which is exactly what [`crate::partition::partition`] produces. The
    /// slice at position `i` covers `ranges[i]`.
    ///
    /// # Panics
    /// Panics if the ranges leave a gap, overlap, or do not end at `len()`.
    pub fn split_ranges(&mut self, ranges: &[WorkRange]) -> Vec<&mut [i64]> {
        let total = self.data.len();
        let mut rest: &mut [i64] = &mut self.data;
        let mut cursor = 0;
        let mut slices = Vec::with_capacity(ranges.len());

        for r in ranges {
            assert_eq!(
                r.start, cursor,
                "range {:?} does not start where the previous one ended",
                r
            );
            assert!(r.end <= total, "range {:?} exceeds buffer of {}", r, total);
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(r.len());
            slices.push(head);
            rest = tail;
            cursor = r.end;
        }

        assert!(
            rest.is_empty(),
            "ranges cover {} of {} cells",
            cursor,
            total
        );
        slices
    }

    /// Wrap the completed buffer as a matrix with the given dimensions.
    pub fn into_matrix(self, dims: Dims) -> Result<Matrix> {
        Matrix::new(dims.rows, dims.cols, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;

    #[test]
    fn test_zeros() {
        let b = ResultBuffer::zeros(5);
        assert_eq!(b.len(), 5);
        assert!(!b.is_empty());
        assert_eq!(b.as_slice(), &[0; 5]);
    }

    #[test]
    fn test_split_ranges_disjoint_writes() {
        let mut b = ResultBuffer::zeros(7);
        let ranges = partition(3, 7);
        {
            let slices = b.split_ranges(&ranges);
            assert_eq!(slices.len(), 3);
            for (id, slice) in slices.into_iter().enumerate() {
                for cell in slice.iter_mut() {
                    *cell = id as i64 + 1;
                }
            }
        }
        // worker 0 owns 2 + 1 leftover cells
        assert_eq!(b.as_slice(), &[1, 1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_split_ranges_with_empty_ranges() {
        let mut b = ResultBuffer::zeros(2);
        let ranges = partition(4, 2);
        let slices = b.split_ranges(&ranges);
        let lens: Vec<usize> = slices.iter().map(|s| s.len()).collect();
        assert_eq!(lens, vec![2, 0, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn test_split_ranges_gap_panics() {
        let mut b = ResultBuffer::zeros(4);
        let _ = b.split_ranges(&[WorkRange::new(0, 1), WorkRange::new(2, 4)]);
    }

    #[test]
    #[should_panic]
    fn test_split_ranges_short_cover_panics() {
        let mut b = ResultBuffer::zeros(4);
        let _ = b.split_ranges(&[WorkRange::new(0, 3)]);
    }

    #[test]
    fn test_into_matrix() {
        let mut b = ResultBuffer::zeros(4);
        {
            let mut slices = b.split_ranges(&[WorkRange::new(0, 4)]);
            slices[0].copy_from_slice(&[1, 2, 3, 4]);
        }
        let m = b.into_matrix(Dims::new(2, 2)).unwrap();
        assert_eq!(m.row(1), &[3, 4]);
    }
}
