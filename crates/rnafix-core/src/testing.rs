//! Shared fixtures for unit tests.

use crate::core::models::builder::MolecularSystemBuilder;
use crate::core::models::residue::NucleotideType;
use crate::core::models::system::MolecularSystem;
use nalgebra::{Point3, Vector3};

// Idealized single-residue geometries with P at the origin. Every bond is
// within 2% of its ideal length.
#[rustfmt::skip]
pub const IDEAL_ADENINE: [[f64; 3]; 22] = [
    [0.000, 0.000, 0.000], // P
    [1.260, -0.650, -0.424], // OP1
    [-1.166, -0.472, -0.779], // OP2
    [-0.221, -0.074, 1.580], // O5'
    [-0.644, -1.373, 2.029], // C5'
    [0.437, -2.138, 2.773], // C4'
    [1.598, -2.424, 1.970], // O4'
    [0.889, -1.449, 4.055], // C3'
    [0.293, -2.046, 5.220], // O3'
    [2.409, -1.575, 4.074], // C2'
    [3.042, -0.312, 4.203], // O2'
    [2.786, -2.271, 2.772], // C1'
    [3.548, -3.511, 2.938], // N9
    [2.928, -4.493, 3.671], // C8
    [3.659, -4.802, 4.677], // N7
    [4.842, -4.114, 4.613], // C5
    [5.941, -5.008, 4.735], // C6
    [6.529, -4.889, 5.959], // N6
    [6.845, -5.058, 3.782], // N1
    [6.764, -4.279, 2.697], // C2
    [5.753, -3.419, 2.533], // N3
    [4.781, -3.305, 3.478], // C4
];

#[rustfmt::skip]
pub const IDEAL_CYTOSINE: [[f64; 3]; 20] = [
    [0.000, 0.000, 0.000], // P
    [0.859, 0.299, -1.167], // OP1
    [-1.369, 0.537, -0.165], // OP2
    [0.668, 0.461, 1.376], // O5'
    [0.656, -0.596, 2.351], // C5'
    [1.821, -1.564, 2.244], // C4'
    [3.074, -0.997, 2.672], // O4'
    [1.997, -2.166, 0.854], // C3'
    [1.718, -3.577, 0.844], // O3'
    [3.441, -1.875, 0.457], // C2'
    [3.513, -1.002, -0.658], // O2'
    [4.095, -1.261, 1.691], // C1'
    [5.228, -2.059, 2.159], // N1
    [4.959, -3.319, 2.706], // C2
    [4.788, -4.171, 1.837], // O2
    [5.776, -3.814, 3.693], // N3
    [6.813, -3.145, 4.133], // C4
    [6.886, -3.163, 5.493], // N4
    [7.098, -1.820, 3.598], // C5
    [6.291, -1.308, 2.632], // C6
];

#[rustfmt::skip]
pub const IDEAL_GUANINE: [[f64; 3]; 23] = [
    [0.000, 0.000, 0.000], // P
    [-0.298, 0.236, 1.430], // OP1
    [0.635, 1.177, -0.634], // OP2
    [0.854, -1.332, -0.225], // O5'
    [2.103, -1.290, 0.484], // C5'
    [3.120, -2.285, -0.057], // C4'
    [4.457, -1.761, 0.088], // O4'
    [3.073, -3.593, 0.728], // C3'
    [2.917, -4.727, -0.143], // O3'
    [4.405, -3.627, 1.468], // C2'
    [4.456, -4.441, 2.619], // O2'
    [5.026, -2.246, 1.325], // C1'
    [4.858, -1.294, 2.424], // N9
    [5.095, -1.744, 3.698], // C8
    [5.686, -0.845, 4.394], // N7
    [6.004, 0.207, 3.575], // C5
    [5.614, 1.475, 4.171], // C6
    [6.592, 2.076, 4.609], // O6
    [4.798, 2.330, 3.412], // N1
    [4.379, 1.937, 2.162], // C2
    [3.042, 2.147, 2.004], // N2
    [4.739, 0.788, 1.642], // N3
    [5.512, -0.103, 2.312], // C4
];

#[rustfmt::skip]
pub const IDEAL_URACIL: [[f64; 3]; 20] = [
    [0.000, 0.000, 0.000], // P
    [0.871, 0.307, -1.156], // OP1
    [-1.368, 0.536, -0.176], // OP2
    [0.653, 0.453, 1.386], // O5'
    [0.640, -0.613, 2.351], // C5'
    [1.809, -1.577, 2.239], // C4'
    [3.057, -1.013, 2.685], // O4'
    [1.997, -2.162, 0.843], // C3'
    [1.715, -3.571, 0.812], // O3'
    [3.446, -1.869, 0.465], // C2'
    [3.531, -0.978, -0.635], // O2'
    [4.088, -1.277, 1.715], // C1'
    [5.209, -2.087, 2.195], // N1
    [4.918, -3.353, 2.704], // C2
    [4.780, -4.190, 1.813], // O2
    [5.701, -3.884, 3.737], // N3
    [6.794, -3.162, 4.232], // C4
    [6.820, -3.160, 5.461], // O4
    [7.054, -1.818, 3.677], // C5
    [6.257, -1.336, 2.693], // C6
];

/// Ideal coordinates of one nucleotide, translated by `offset`.
pub fn ideal_positions(nucleotide: NucleotideType, offset: Vector3<f64>) -> Vec<Point3<f64>> {
    let raw: &[[f64; 3]] = match nucleotide {
        NucleotideType::Adenine => &IDEAL_ADENINE,
        NucleotideType::Cytosine => &IDEAL_CYTOSINE,
        NucleotideType::Guanine => &IDEAL_GUANINE,
        NucleotideType::Uracil => &IDEAL_URACIL,
    };
    raw.iter()
        .map(|&[x, y, z]| Point3::new(x, y, z) + offset)
        .collect()
}

/// `count` positions 10 Å apart along x, on a line 50 Å from that of the
/// previous `lane`. No two positions are close enough to clash.
pub fn sparse_positions(count: usize, lane: usize) -> Vec<Point3<f64>> {
    (0..count)
        .map(|k| Point3::new(10.0 * k as f64, 50.0 * lane as f64, 0.0))
        .collect()
}

/// A one-chain model holding a single ideal nucleotide.
pub fn ideal_single_residue(nucleotide: NucleotideType) -> MolecularSystem {
    let mut builder = MolecularSystemBuilder::new();
    builder.start_chain('A');
    builder
        .add_nucleotide(1, nucleotide, &ideal_positions(nucleotide, Vector3::zeros()))
        .unwrap();
    builder.build()
}
