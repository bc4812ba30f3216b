//! Vocabulary types for Pauli operators and the Clifford gates that act on
//! them by conjugation.
//!
//! See also: <https://en.wikipedia.org/wiki/Clifford_gates>

use std::{
    fmt,
    ops::{ Neg, Add, AddAssign, Sub, SubAssign },
};
use nalgebra as na;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;
use rand::Rng;

/// A global complex phase factor, limited to integer multiples of π/2.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// 0 (+1)
    Pi0,
    /// π/2 (+i)
    Pi1h,
    /// π (−1)
    Pi,
    /// 3π/2 (−i)
    Pi3h,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Pi0  => write!(f, "+"),
            Self::Pi1h => write!(f, "i"),
            Self::Pi   => write!(f, "-"),
            Self::Pi3h => write!(f, "-i"),
        }
    }
}

impl Phase {
    /// Convert to the bare multiple of π/2.
    pub fn to_int(self) -> i8 {
        match self {
            Self::Pi0  => 0,
            Self::Pi1h => 1,
            Self::Pi   => 2,
            Self::Pi3h => 3,
        }
    }

    /// Convert from a bare multiple of π/2 (modulo 4).
    pub fn from_int(i: i8) -> Self {
        match i.rem_euclid(4) {
            0 => Self::Pi0,
            1 => Self::Pi1h,
            2 => Self::Pi,
            3 => Self::Pi3h,
            _ => unreachable!(),
        }
    }

    pub fn as_complex(self) -> C64 {
        match self {
            Self::Pi0  => 1.0_f64.into(),
            Self::Pi1h => C64::i(),
            Self::Pi   => (-1.0_f64).into(),
            Self::Pi3h => -C64::i(),
        }
    }
}

impl Neg for Phase {
    type Output = Self;

    fn neg(self) -> Self::Output { Self::from_int(-self.to_int()) }
}

macro_rules! impl_phase_math {
    (
        $trait:ident,
        $trait_fn:ident,
        $trait_assign:ident,
        $trait_assign_fn:ident,
        $op:tt
    ) => {
        impl $trait for Phase {
            type Output = Self;

            fn $trait_fn(self, rhs: Self) -> Self::Output {
                Self::from_int(self.to_int() $op rhs.to_int())
            }
        }

        impl $trait_assign for Phase {
            fn $trait_assign_fn(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    }
}
impl_phase_math!(Add, add, AddAssign, add_assign, +);
impl_phase_math!(Sub, sub, SubAssign, sub_assign, -);

/// A single-qubit Pauli operator.
///
/// Internally each operator is two bits in the symplectic convention: bit 0
/// flags an X-component and bit 1 a Z-component, so I = 00, X = 01, Z = 10,
/// and Y = 11 (Y being the product of X and Z up to phase). The encoding is
/// only reachable through the accessors here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*z*</sub>
    Z,
    /// σ<sub>*y*</sub>
    Y,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I => write!(f, "1"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Pauli {
    /// All four operators, in encoding order.
    pub const ALL: [Self; 4] = [Self::I, Self::X, Self::Z, Self::Y];

    /// Return `true` if `self` has an X-component (X or Y).
    pub fn has_x(self) -> bool { matches!(self, Self::X | Self::Y) }

    /// Return `true` if `self` has a Z-component (Z or Y).
    pub fn has_z(self) -> bool { matches!(self, Self::Z | Self::Y) }

    /// Assemble from component flags.
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Self::I,
            (true,  false) => Self::X,
            (false, true ) => Self::Z,
            (true,  true ) => Self::Y,
        }
    }

    pub(crate) fn to_int(self) -> usize {
        match self {
            Self::I => 0,
            Self::X => 1,
            Self::Z => 2,
            Self::Y => 3,
        }
    }

    pub(crate) fn from_int(u: usize) -> Self {
        match u % 4 {
            0 => Self::I,
            1 => Self::X,
            2 => Self::Z,
            3 => Self::Y,
            _ => unreachable!(),
        }
    }

    /// Return `true` if `self` and `other` commute.
    pub fn commutes_with(self, other: Self) -> bool {
        match (self, other) {
            (_, Self::I) => true,
            (Self::I, _) => true,
            (a, b) if a == b => true,
            _ => false,
        }
    }

    /// Sample uniformly from all four operators.
    pub fn gen<R>(rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        Self::from_int(rng.gen_range(0..4))
    }

    /// The 2 × 2 matrix form.
    pub fn as_matrix(self) -> na::Matrix2<C64> {
        match self {
            Self::I => *MAT_I,
            Self::X => *MAT_X,
            Self::Z => *MAT_Z,
            Self::Y => *MAT_Y,
        }
    }
}

static MAT_I: Lazy<na::Matrix2<C64>> = Lazy::new(na::Matrix2::identity);

static MAT_X: Lazy<na::Matrix2<C64>> = Lazy::new(|| {
    na::Matrix2::new(
        C64::new(0.0, 0.0), C64::new(1.0, 0.0),
        C64::new(1.0, 0.0), C64::new(0.0, 0.0),
    )
});

static MAT_Y: Lazy<na::Matrix2<C64>> = Lazy::new(|| {
    na::Matrix2::new(
        C64::new(0.0,  0.0), C64::new(0.0, -1.0),
        C64::new(0.0,  1.0), C64::new(0.0,  0.0),
    )
});

static MAT_Z: Lazy<na::Matrix2<C64>> = Lazy::new(|| {
    na::Matrix2::new(
        C64::new(1.0, 0.0), C64::new( 0.0, 0.0),
        C64::new(0.0, 0.0), C64::new(-1.0, 0.0),
    )
});

static MAT_H: Lazy<na::Matrix2<C64>> = Lazy::new(|| {
    na::Matrix2::new(
        C64::new(1.0, 0.0), C64::new( 1.0, 0.0),
        C64::new(1.0, 0.0), C64::new(-1.0, 0.0),
    ) * C64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0)
});

static MAT_S: Lazy<na::Matrix2<C64>> = Lazy::new(|| {
    na::Matrix2::new(
        C64::new(1.0, 0.0), C64::new(0.0, 0.0),
        C64::new(0.0, 0.0), C64::new(0.0, 1.0),
    )
});

// projectors onto ∣0⟩ and ∣1⟩, for building controlled gates
static PROJ_0: Lazy<na::Matrix2<C64>> = Lazy::new(|| {
    na::Matrix2::new(
        C64::new(1.0, 0.0), C64::new(0.0, 0.0),
        C64::new(0.0, 0.0), C64::new(0.0, 0.0),
    )
});

static PROJ_1: Lazy<na::Matrix2<C64>> = Lazy::new(|| {
    na::Matrix2::new(
        C64::new(0.0, 0.0), C64::new(0.0, 0.0),
        C64::new(0.0, 0.0), C64::new(1.0, 0.0),
    )
});

/// Description of a single gate application in a register of qubits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard
    H(usize),
    /// π rotation about X
    X(usize),
    /// π rotation about Y
    Y(usize),
    /// π rotation about Z
    Z(usize),
    /// π/2 rotation about Z (the phase gate, diag(1, i))
    S(usize),
    /// Z-controlled π rotation about X.
    ///
    /// The first qubit index is the control.
    CX(usize, usize),
    /// Z-controlled π rotation about Z.
    ///
    /// The first qubit index is the control.
    CZ(usize, usize),
    /// Controlled Y as realized by phase-gate conjugation of CNOT; the
    /// controlled block is −Y.
    ///
    /// The first qubit index is the control.
    CY(usize, usize),
    /// Swap
    Swap(usize, usize),
}

/// Kronecker product over all qubit positions, with qubit 0 leftmost.
fn kron_chain<F>(n: usize, factor: F) -> na::DMatrix<C64>
where F: Fn(usize) -> na::Matrix2<C64>
{
    let mut acc = na::DMatrix::from_element(1, 1, C64::new(1.0, 0.0));
    for k in 0..n { acc = acc.kronecker(&factor(k)); }
    acc
}

/// Controlled-`u` on `n` qubits: P₀ at the control plus P₁ at the control
/// with `u` at the target.
fn controlled(n: usize, ctrl: usize, targ: usize, u: na::Matrix2<C64>)
    -> na::DMatrix<C64>
{
    kron_chain(n, |k| if k == ctrl { *PROJ_0 } else { *MAT_I })
        + kron_chain(n, |k| {
            if k == ctrl { *PROJ_1 }
            else if k == targ { u }
            else { *MAT_I }
        })
}

impl Gate {
    /// Build the full 2<sup>*n*</sup> × 2<sup>*n*</sup> unitary for a register
    /// of `n` qubits.
    ///
    /// *Panics if any qubit index is ≥ `n`.*
    pub fn matrix(&self, n: usize) -> na::DMatrix<C64> {
        match *self {
            Self::H(k) => embedded(n, k, *MAT_H),
            Self::X(k) => embedded(n, k, *MAT_X),
            Self::Y(k) => embedded(n, k, *MAT_Y),
            Self::Z(k) => embedded(n, k, *MAT_Z),
            Self::S(k) => embedded(n, k, *MAT_S),
            Self::CX(a, b) => { check2(n, a, b); controlled(n, a, b, *MAT_X) },
            Self::CZ(a, b) => { check2(n, a, b); controlled(n, a, b, *MAT_Z) },
            Self::CY(a, b) => { check2(n, a, b); controlled(n, a, b, -*MAT_Y) },
            Self::Swap(a, b) => {
                check2(n, a, b);
                let ab = controlled(n, a, b, *MAT_X);
                let ba = controlled(n, b, a, *MAT_X);
                &ab * &ba * &ab
            },
        }
    }
}

fn embedded(n: usize, k: usize, u: na::Matrix2<C64>) -> na::DMatrix<C64> {
    if k >= n { panic!("Gate::matrix: qubit index out of range"); }
    kron_chain(n, |j| if j == k { u } else { *MAT_I })
}

fn check2(n: usize, a: usize, b: usize) {
    if a >= n || b >= n || a == b {
        panic!("Gate::matrix: invalid two-qubit indices");
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: &na::DMatrix<C64>, b: &na::DMatrix<C64>) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn phase_arithmetic_wraps_mod_4() {
        assert_eq!(Phase::Pi + Phase::Pi, Phase::Pi0);
        assert_eq!(Phase::Pi3h + Phase::Pi1h, Phase::Pi0);
        assert_eq!(Phase::Pi0 - Phase::Pi1h, Phase::Pi3h);
        assert_eq!(-Phase::Pi1h, Phase::Pi3h);
        assert_eq!(-Phase::Pi, Phase::Pi);
        let mut ph = Phase::Pi1h;
        ph += Phase::Pi;
        assert_eq!(ph, Phase::Pi3h);
    }

    #[test]
    fn pauli_bits_round_trip() {
        for p in Pauli::ALL {
            assert_eq!(Pauli::from_bits(p.has_x(), p.has_z()), p);
            assert_eq!(Pauli::from_int(p.to_int()), p);
        }
        assert_eq!(Pauli::Y.to_int(), 3);
        assert_eq!(Pauli::Z.to_int(), 2);
    }

    #[test]
    fn pauli_commutation() {
        assert!(Pauli::X.commutes_with(Pauli::X));
        assert!(Pauli::I.commutes_with(Pauli::Y));
        assert!(!Pauli::X.commutes_with(Pauli::Z));
        assert!(!Pauli::Y.commutes_with(Pauli::X));
    }

    #[test]
    fn single_qubit_matrices_are_unitary() {
        for g in [Gate::H(0), Gate::X(0), Gate::Y(0), Gate::Z(0), Gate::S(0)] {
            let u = g.matrix(1);
            let id = na::DMatrix::<C64>::identity(2, 2);
            assert!(close(&(&u * u.adjoint()), &id), "{:?}", g);
        }
    }

    #[test]
    fn cnot_matrix_matches_truth_table() {
        let u = Gate::CX(0, 1).matrix(2);
        // CNOT flips the target iff the control is 1
        let mut expected = na::DMatrix::<C64>::zeros(4, 4);
        expected[(0, 0)] = C64::new(1.0, 0.0); // 00 -> 00
        expected[(1, 1)] = C64::new(1.0, 0.0); // 01 -> 01
        expected[(3, 2)] = C64::new(1.0, 0.0); // 10 -> 11
        expected[(2, 3)] = C64::new(1.0, 0.0); // 11 -> 10
        assert!(close(&u, &expected));
    }

    #[test]
    fn swap_matrix_exchanges_basis_states() {
        let u = Gate::Swap(0, 1).matrix(2);
        let mut expected = na::DMatrix::<C64>::zeros(4, 4);
        expected[(0, 0)] = C64::new(1.0, 0.0);
        expected[(2, 1)] = C64::new(1.0, 0.0);
        expected[(1, 2)] = C64::new(1.0, 0.0);
        expected[(3, 3)] = C64::new(1.0, 0.0);
        assert!(close(&u, &expected));
    }
}
