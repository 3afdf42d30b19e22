use phf::{Map, phf_map};
use std::borrow::Cow;

static ATOM_NAME_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "O1P" => "OP1", "O2P" => "OP2",
    "OP1" => "OP1", "OP2" => "OP2",
    "O5T" => "O5'", "O3T" => "O3'",
    "C1*" => "C1'", "C2*" => "C2'", "C3*" => "C3'", "C4*" => "C4'", "C5*" => "C5'",
    "O2*" => "O2'", "O3*" => "O3'", "O4*" => "O4'", "O5*" => "O5'",
};

/// Maps a PDB atom name to the spelling used by the canonical nucleotide layouts.
///
/// Surrounding whitespace is dropped. Legacy phosphate oxygen names (`O1P`,
/// `O2P`) and star-primed sugar names (`C4*`) are rewritten; any other name is
/// returned unchanged.
pub fn normalize_atom_name(name: &str) -> Cow<'_, str> {
    let trimmed = name.trim();
    if let Some(&canonical) = ATOM_NAME_ALIASES.get(trimmed) {
        return Cow::Borrowed(canonical);
    }
    if trimmed.contains('*') {
        return Cow::Owned(trimmed.replace('*', "'"));
    }
    Cow::Borrowed(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rewrites_legacy_phosphate_oxygens() {
        assert_eq!(normalize_atom_name("O1P"), "OP1");
        assert_eq!(normalize_atom_name("O2P"), "OP2");
    }

    #[test]
    fn normalize_rewrites_star_primes() {
        assert_eq!(normalize_atom_name("C4*"), "C4'");
        assert_eq!(normalize_atom_name("O3*"), "O3'");
        assert_eq!(normalize_atom_name("H5**"), "H5''");
    }

    #[test]
    fn normalize_trims_and_keeps_canonical_names() {
        assert_eq!(normalize_atom_name(" N9 "), "N9");
        assert_eq!(normalize_atom_name("O5'"), "O5'");
        assert_eq!(normalize_atom_name("P"), "P");
    }

    #[test]
    fn normalize_is_case_sensitive() {
        assert_eq!(normalize_atom_name("o1p"), "o1p");
    }
}
