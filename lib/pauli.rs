//! An *N*-qubit Pauli operator and its transformation under conjugation by
//! Clifford gates.
//!
//! A [`PauliOp`] is one stabilizer generator: a tensor product of single-qubit
//! Pauli operators together with a global phase in {±1, ±i}. Conjugating it by
//! a Clifford gate U (the transformation U·P·U<sup>†</sup>) yields another
//! Pauli operator, so a Clifford circuit can be folded over a `PauliOp` one
//! gate at a time, in time linear in circuit size.
//!
//! Single-qubit rules are closed-form bit formulas on the symplectic encoding;
//! CNOT is a literal 16-entry table over both qubits' operators. The derived
//! two-qubit gates (CZ, CY) are built by conjugation with Hadamard and phase
//! gates rather than their own tables.
//!
//! Operators serialize to signed Pauli strings: an optional phase token (`+`,
//! `i`, `-`, `-i`; absent means `+`) followed by one character per qubit from
//! the alphabet `1 X Z Y`, qubit 0 first. `"-iXZY1"` is −i · X⊗Z⊗Y⊗I.

use std::{ fmt, str::FromStr };
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::Rng;
use thiserror::Error;
use crate::gate::{ Gate, Pauli, Phase };

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum PauliError {
    /// Returned when a Pauli string contains a character outside the symbol
    /// alphabet (or a malformed phase token, which is indistinguishable).
    #[error("unrecognized symbol {0:?}; expected one of '1', 'X', 'Z', 'Y'")]
    BadSymbol(char),

    /// Returned when a qubit operand falls outside the register.
    #[error("qubit index {index} is out of range for a {num_qubits}-qubit operator")]
    BadIndex { index: usize, num_qubits: usize },

    /// Returned when a two-qubit gate names the same qubit twice.
    #[error("two-qubit gate requires distinct qubits; got {0} twice")]
    DuplicateIndex(usize),
}

/// An `N`-qubit Pauli operator with a global phase.
///
/// The number of qubits is fixed at construction; gate applications mutate
/// the per-qubit operators and the phase in place, never the length.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PauliOp {
    ops: Vec<Pauli>,
    phase: Phase,
}

impl FromStr for PauliOp {
    type Err = PauliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (phase, rest) =
            if let Some(r) = s.strip_prefix("-i") {
                (Phase::Pi3h, r)
            } else if let Some(r) = s.strip_prefix('-') {
                (Phase::Pi, r)
            } else if let Some(r) = s.strip_prefix('i') {
                (Phase::Pi1h, r)
            } else if let Some(r) = s.strip_prefix('+') {
                (Phase::Pi0, r)
            } else {
                (Phase::Pi0, s)
            };
        let ops: Vec<Pauli> =
            rest.chars()
            .map(|c| match c {
                '1' => Ok(Pauli::I),
                'X' => Ok(Pauli::X),
                'Z' => Ok(Pauli::Z),
                'Y' => Ok(Pauli::Y),
                c => Err(PauliError::BadSymbol(c)),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { ops, phase })
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phase)?;
        for op in self.ops.iter() { write!(f, "{}", op)?; }
        Ok(())
    }
}

// Conjugation action of CNOT on the 16 products of control and target
// operators, indexed by (control, target) in encoding order. The companion
// sign table marks the two products that pick up a factor of −1. Both tables
// are checked entry-by-entry against matrix conjugation in the tests below.
const CNOT_CONJ: [(Pauli, Pauli); 16] = {
    use crate::gate::Pauli::{ I, X, Z, Y };
    [
        (I, I), (I, X), (Z, Z), (Z, Y), // control I
        (X, X), (X, I), (Y, Y), (Y, Z), // control X
        (Z, I), (Z, X), (I, Z), (I, Y), // control Z
        (Y, X), (Y, I), (X, Y), (X, Z), // control Y
    ]
};

const CNOT_SIGN: [bool; 16] = [
    false, false, false, false,
    false, false, true,  false, // X⊗Z → −Y⊗Y
    false, false, false, false,
    false, false, false, true,  // Y⊗Y → −X⊗Z
];

fn cnot_index(ctrl: Pauli, targ: Pauli) -> usize {
    (ctrl.to_int() << 2) | targ.to_int()
}

impl PauliOp {
    /// Create the all-identity operator on `n` qubits, with phase +1.
    pub fn new(n: usize) -> Self {
        Self { ops: vec![Pauli::I; n], phase: Phase::Pi0 }
    }

    /// Assemble from per-qubit operators and a phase.
    pub fn from_paulis<I>(ops: I, phase: Phase) -> Self
    where I: IntoIterator<Item = Pauli>
    {
        Self { ops: ops.into_iter().collect(), phase }
    }

    /// Sample an operator on `n` qubits with uniformly random per-qubit
    /// operators and phase.
    pub fn gen<R>(n: usize, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        Self {
            ops: (0..n).map(|_| Pauli::gen(rng)).collect(),
            phase: Phase::from_int(rng.gen_range(0..4)),
        }
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.ops.len() }

    /// Return the global phase.
    pub fn phase(&self) -> Phase { self.phase }

    /// Return the per-qubit operators, qubit 0 first.
    pub fn ops(&self) -> &[Pauli] { &self.ops }

    /// Return `true` if `self` and `other` commute, or `None` if they act on
    /// registers of different sizes.
    ///
    /// Two Pauli operators commute iff an even number of their per-qubit
    /// factors anticommute.
    pub fn commutes_with(&self, other: &Self) -> Option<bool> {
        (self.ops.len() == other.ops.len())
            .then(|| {
                let n_anti: usize =
                    self.ops.iter().zip(&other.ops)
                    .filter(|(a, b)| !a.commutes_with(**b))
                    .count();
                n_anti % 2 == 0
            })
    }

    fn check(&self, k: usize) -> Result<(), PauliError> {
        if k >= self.ops.len() {
            Err(PauliError::BadIndex { index: k, num_qubits: self.ops.len() })
        } else {
            Ok(())
        }
    }

    fn check2(&self, a: usize, b: usize) -> Result<(), PauliError> {
        self.check(a)?;
        self.check(b)?;
        if a == b { Err(PauliError::DuplicateIndex(a)) } else { Ok(()) }
    }

    /// Conjugate by a Pauli X on qubit `k`.
    ///
    /// The stored operator is unchanged; the phase flips sign iff it
    /// anticommutes with X (i.e. has a Z-component).
    pub fn apply_x(&mut self, k: usize) -> Result<&mut Self, PauliError> {
        self.check(k)?;
        if self.ops[k].has_z() { self.phase += Phase::Pi; }
        Ok(self)
    }

    /// Conjugate by a Pauli Z on qubit `k`.
    ///
    /// The stored operator is unchanged; the phase flips sign iff it
    /// anticommutes with Z (i.e. has an X-component).
    pub fn apply_z(&mut self, k: usize) -> Result<&mut Self, PauliError> {
        self.check(k)?;
        if self.ops[k].has_x() { self.phase += Phase::Pi; }
        Ok(self)
    }

    /// Conjugate by a Pauli Y on qubit `k`.
    ///
    /// The stored operator is unchanged; the phase flips sign iff it
    /// anticommutes with Y (i.e. is X or Z — exactly one component set).
    pub fn apply_y(&mut self, k: usize) -> Result<&mut Self, PauliError> {
        self.check(k)?;
        if self.ops[k].has_x() ^ self.ops[k].has_z() {
            self.phase += Phase::Pi;
        }
        Ok(self)
    }

    /// Conjugate by a Hadamard on qubit `k`: X ↔ Z, Y → −Y.
    pub fn apply_h(&mut self, k: usize) -> Result<&mut Self, PauliError> {
        self.check(k)?;
        let p = self.ops[k];
        self.ops[k] = Pauli::from_bits(p.has_z(), p.has_x());
        if p == Pauli::Y { self.phase += Phase::Pi; }
        Ok(self)
    }

    /// Conjugate by the phase gate diag(1, i) on qubit `k`: X → Y, Y → −X,
    /// Z → Z.
    ///
    /// The Z-component picks up the X-component; the sign flips iff the input
    /// was Y.
    pub fn apply_s(&mut self, k: usize) -> Result<&mut Self, PauliError> {
        self.check(k)?;
        let (x, z) = (self.ops[k].has_x(), self.ops[k].has_z());
        self.ops[k] = Pauli::from_bits(x, z ^ x);
        if x && z { self.phase += Phase::Pi; }
        Ok(self)
    }

    /// Conjugate by a CNOT with control `ctrl` and target `targ`, via the
    /// 16-entry conjugation and sign tables.
    pub fn apply_cnot(&mut self, ctrl: usize, targ: usize)
        -> Result<&mut Self, PauliError>
    {
        self.check2(ctrl, targ)?;
        let idx = cnot_index(self.ops[ctrl], self.ops[targ]);
        let (c, t) = CNOT_CONJ[idx];
        self.ops[ctrl] = c;
        self.ops[targ] = t;
        if CNOT_SIGN[idx] { self.phase += Phase::Pi; }
        Ok(self)
    }

    /// Conjugate by a CZ with control `ctrl` and target `targ`, built from
    /// CNOT by Hadamard conjugation on the target.
    pub fn apply_cz(&mut self, ctrl: usize, targ: usize)
        -> Result<&mut Self, PauliError>
    {
        // validate up front so a bad index cannot leave the conjugation
        // sequence half-applied
        self.check2(ctrl, targ)?;
        self.apply_h(targ)?
            .apply_cnot(ctrl, targ)?
            .apply_h(targ)
    }

    /// Conjugate by a controlled Y with control `ctrl` and target `targ`,
    /// built from CNOT by phase-gate conjugation on the target (three trailing
    /// phase gates realize the inverse phase gate).
    ///
    /// The controlled block realized by this sequence is −Y; see
    /// [`Gate::CY`].
    pub fn apply_cy(&mut self, ctrl: usize, targ: usize)
        -> Result<&mut Self, PauliError>
    {
        self.check2(ctrl, targ)?;
        self.apply_s(targ)?
            .apply_cnot(ctrl, targ)?
            .apply_s(targ)?
            .apply_s(targ)?
            .apply_s(targ)
    }

    /// Exchange the operators on qubits `a` and `b`. No phase effect.
    pub fn apply_swap(&mut self, a: usize, b: usize)
        -> Result<&mut Self, PauliError>
    {
        self.check2(a, b)?;
        self.ops.swap(a, b);
        Ok(self)
    }

    /// Perform the conjugation action of a single gate.
    pub fn apply_gate(&mut self, gate: Gate) -> Result<&mut Self, PauliError> {
        match gate {
            Gate::H(k) => self.apply_h(k),
            Gate::X(k) => self.apply_x(k),
            Gate::Y(k) => self.apply_y(k),
            Gate::Z(k) => self.apply_z(k),
            Gate::S(k) => self.apply_s(k),
            Gate::CX(a, b) => self.apply_cnot(a, b),
            Gate::CZ(a, b) => self.apply_cz(a, b),
            Gate::CY(a, b) => self.apply_cy(a, b),
            Gate::Swap(a, b) => self.apply_swap(a, b),
        }
    }

    /// Perform a series of gates in order.
    ///
    /// Gates do not generally commute, so the series is folded strictly
    /// left to right. On error the operator retains the effect of every gate
    /// applied before the failure.
    pub fn apply_circuit<'a, I>(&mut self, gates: I)
        -> Result<&mut Self, PauliError>
    where I: IntoIterator<Item = &'a Gate>
    {
        for gate in gates.into_iter() { self.apply_gate(*gate)?; }
        Ok(self)
    }

    /// The full 2<sup>*N*</sup> × 2<sup>*N*</sup> matrix form: the global
    /// phase times the Kronecker product of the per-qubit matrices, qubit 0
    /// leftmost.
    pub fn to_matrix(&self) -> na::DMatrix<C64> {
        let mut acc =
            na::DMatrix::from_element(1, 1, self.phase.as_complex());
        for op in self.ops.iter() { acc = acc.kronecker(&op.as_matrix()); }
        acc
    }
}
