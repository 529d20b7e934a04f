//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::FRAC_PI_2;

use qport_hal::{HalError, HalResult};
use qport_ir::StandardGate;

/// A statevector representing a quantum state.
///
/// Amplitudes are indexed by basis state, with qubit `k` mapped to bit `k`
/// of the index. The vector holds unit norm at all times except transiently
/// inside a measurement collapse, which renormalizes before returning.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitude of a basis state.
    pub fn amplitude(&self, basis: usize) -> Complex64 {
        self.amplitudes[basis]
    }

    /// Apply a gate to specific qubits.
    pub fn apply_gate(&mut self, gate: StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], FRAC_PI_2),
            StandardGate::Sdg => self.apply_phase(qubits[0], -FRAC_PI_2),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cz(qubits[0], qubits[1]),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Marginal probability of measuring `qubit` as 1.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        let mut p1 = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if i & mask != 0 {
                p1 += amp.norm_sqr();
            }
        }
        p1
    }

    /// Measure a qubit, collapsing the state.
    ///
    /// Draws a uniform sample from `rng` and returns the observed bit.
    pub fn measure(&mut self, qubit: usize, rng: &mut impl Rng) -> HalResult<u8> {
        let r: f64 = rng.r#gen();
        self.collapse(qubit, r)
    }

    /// Collapse `qubit` given an explicit uniform draw `r` in [0, 1).
    ///
    /// Split out from [`Self::measure`] so tests can force either branch.
    /// A branch whose probability is exactly zero is never selected: the
    /// alternate outcome is reported deterministically instead of dividing
    /// by zero during renormalization.
    fn collapse(&mut self, qubit: usize, r: f64) -> HalResult<u8> {
        let mask = 1 << qubit;
        let mut p0 = 0.0;
        let mut p1 = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if i & mask == 0 {
                p0 += amp.norm_sqr();
            } else {
                p1 += amp.norm_sqr();
            }
        }

        let mut outcome: u8 = u8::from(r < p1);
        if outcome == 1 && p1 == 0.0 {
            outcome = 0;
        } else if outcome == 0 && p0 == 0.0 {
            outcome = 1;
        }

        let p_outcome = if outcome == 1 { p1 } else { p0 };
        if p_outcome == 0.0 {
            return Err(HalError::NumericDegeneracy(format!(
                "no probability mass on either outcome of qubit {qubit}"
            )));
        }

        let keep = if outcome == 1 { mask } else { 0 };
        let scale = 1.0 / p_outcome.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == keep {
                *amp *= scale;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }

        Ok(outcome)
    }

    /// Reduced density matrix of a single qubit, tracing out the rest.
    ///
    /// Returned as `[[rho00, rho01], [rho10, rho11]]`.
    pub fn reduced_density_matrix(&self, qubit: usize) -> [[Complex64; 2]; 2] {
        let mask = 1 << qubit;
        let mut rho = [[Complex64::new(0.0, 0.0); 2]; 2];
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                rho[0][0] += a * a.conj();
                rho[0][1] += a * b.conj();
                rho[1][0] += b * a.conj();
                rho[1][1] += b * b.conj();
            }
        }
        rho
    }

    /// Squared overlap |⟨self|other⟩|² between two states.
    pub fn fidelity(&self, other: &Statevector) -> f64 {
        let inner: Complex64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum();
        inner.norm_sqr()
    }

    /// Euclidean norm of the amplitude vector.
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .sum::<f64>()
            .sqrt()
    }
}
