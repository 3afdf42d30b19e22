//! Geometry of the phosphodiester linkage between consecutive residues.
//!
//! Residue r donates its first nine atoms (P through O3') and residue r+1 its
//! first four (P, OP1, OP2, O5'). Every nucleotide shares this backbone prefix,
//! so the table is independent of residue type.

/// Ideal O3'(r)–P(r+1) covalent bond length in Angstroms.
pub const BACKBONE_LINKAGE_LENGTH: f64 = 1.610;

/// Canonical index of O3' in every nucleotide.
pub const O3_PRIME_INDEX: usize = 8;
/// Canonical index of P in every nucleotide.
pub const PHOSPHORUS_INDEX: usize = 0;

const DONOR_ATOMS: usize = 9;
const ACCEPTOR_ATOMS: usize = 4;

// Rows: P OP1 OP2 O5' C5' C4' O4' C3' O3' of residue r.
// Columns: P OP1 OP2 O5' of residue r+1.
#[rustfmt::skip]
static LINKAGE_DISTANCES: [[f64; ACCEPTOR_ATOMS]; DONOR_ATOMS] = [
    [0.0,   0.0,   0.0,   0.0  ],
    [0.0,   0.0,   0.0,   0.0  ],
    [0.0,   0.0,   0.0,   0.0  ],
    [0.0,   0.0,   0.0,   0.0  ],
    [0.0,   0.0,   0.0,   0.0  ],
    [0.0,   0.0,   0.0,   0.0  ],
    [0.0,   0.0,   0.0,   0.0  ],
    [2.648, 0.0,   0.0,   0.0  ],
    [BACKBONE_LINKAGE_LENGTH, 2.505, 2.505, 2.504],
];

/// Reference distance between atom `i` of residue r and atom `j` of residue r+1,
/// or `None` if the pair is not part of the linkage.
#[inline]
pub fn linkage_distance(i: usize, j: usize) -> Option<f64> {
    LINKAGE_DISTANCES
        .get(i)
        .and_then(|row| row.get(j))
        .copied()
        .filter(|&d| d != 0.0)
}

/// Whether atom `i` of residue r and atom `j` of residue r+1 are held together
/// by the backbone linkage and therefore cannot clash.
#[inline]
pub fn is_backbone_linkage(i: usize, j: usize) -> bool {
    linkage_distance(i, j).is_some()
}
