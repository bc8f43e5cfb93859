//! Constant-time sorting network.
//!
//! Ref: `int32_sort.h` / `uint64_sort.h` of the reference implementation.
//!
//! Batcher's bitonic network: the sequence of compared index pairs depends
//! only on the slice length, and each compare-exchange is branch-free.

/// Word types the sorting network can compare-exchange without branching.
pub(crate) trait SortWord: Copy {
    /// Puts the smaller of the two words in `a` and the larger in `b`.
    fn minmax(a: &mut Self, b: &mut Self);
}

macro_rules! impl_sort_word {
    ($($ty:ty),*) => {$(
        impl SortWord for $ty {
            #[inline]
            fn minmax(a: &mut Self, b: &mut Self) {
                // borrow out of b - a, i.e. b < a
                let diff = b.wrapping_sub(*a);
                let borrow = ((!*b & *a) | (!(*b ^ *a) & diff)) >> (<$ty>::BITS - 1);
                let swap = (*a ^ *b) & borrow.wrapping_neg();
                *a ^= swap;
                *b ^= swap;
            }
        }
    )*};
}

impl_sort_word!(u32, u64);

/// Sorts `x` ascending. The length must be a power of two.
pub(crate) fn sort<T: SortWord>(x: &mut [T]) {
    let n = x.len();
    debug_assert!(n.is_power_of_two(), "bitonic network needs 2^k elements");

    let mut k = 2;
    while k <= n {
        let mut j = k / 2;
        while j > 0 {
            for i in 0..n {
                let l = i ^ j;
                if l > i {
                    let (lo, hi) = x.split_at_mut(l);
                    if i & k == 0 {
                        T::minmax(&mut lo[i], &mut hi[0]);
                    } else {
                        T::minmax(&mut hi[0], &mut lo[i]);
                    }
                }
            }
            j /= 2;
        }
        k *= 2;
    }
}
