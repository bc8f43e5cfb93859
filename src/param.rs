use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};

/// A field element of GF(2^m), stored in the low `m` bits.
pub type Gf = u16;

/// Classic McEliece parameter set trait
///
/// This trait defines all the compile-time parameters for a Classic McEliece
/// variant. Implementations exist for `mceliece348864`, `mceliece460896`,
/// `mceliece6688128` and `mceliece8192128`.
pub trait ParameterSet: Default + Clone + Debug + PartialEq + Eq {
    /// GFBITS: degree of the field extension, denoted `m`
    const GFBITS: usize;

    /// SYS_T: error-correcting capacity of the Goppa code, denoted `t`
    const SYS_T: usize;

    /// SYS_N: code length, denoted `n`; at most 2^m
    const SYS_N: usize;

    /// Irreducible polynomial defining GF(2^m), including the `z^m` term
    const GF_POLY: u32;

    /// Low-order terms `(k, c_k)` of the monic degree-t polynomial
    /// `f(y) = y^t + sum c_k y^k` defining GF((2^m)^t)
    const POLY_TAIL: &'static [(usize, Gf)];

    /// `t`, number of stored coefficients of a monic Goppa polynomial
    type SysT: ArraySize;

    /// `t + 1`, number of coefficients of a locator polynomial
    type SysT1: ArraySize;

    /// `2t`, number of syndromes fed to Berlekamp-Massey
    type SysT2: ArraySize;

    /// 2^m, size of the field and of the permutation domain
    #[must_use]
    fn field_size() -> usize {
        1 << Self::GFBITS
    }

    /// Mask selecting the low `m` bits
    #[must_use]
    fn gf_mask() -> Gf {
        ((1u32 << Self::GFBITS) - 1) as Gf
    }

    /// Number of switches in one layer of the Benes network: 2^(m-1)
    #[must_use]
    fn switches_per_layer() -> usize {
        Self::field_size() / 2
    }

    /// Number of layers of the Benes network: 2m - 1
    #[must_use]
    fn layers() -> usize {
        2 * Self::GFBITS - 1
    }

    /// Control bit length in bytes: ceil((2m - 1) * 2^(m-1) / 8)
    #[must_use]
    fn cond_bytes() -> usize {
        (Self::layers() * Self::switches_per_layer()).div_ceil(8)
    }

    /// Bytes needed for one bit plane of 2^m bits
    #[must_use]
    fn plane_bytes() -> usize {
        Self::field_size().div_ceil(8)
    }
}

/// Error locator polynomial, coefficients indexed by degree 0..=t
pub type Poly<P> = Array<Gf, <P as ParameterSet>::SysT1>;

/// Syndrome sequence of 2t field elements
pub type Syndromes<P> = Array<Gf, <P as ParameterSet>::SysT2>;

/// Element of GF((2^m)^t): t coefficients, also the low part of a monic Goppa polynomial
pub type ExtElement<P> = Array<Gf, <P as ParameterSet>::SysT>;
