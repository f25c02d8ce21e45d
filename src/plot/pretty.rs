//! Display names for analysis variables.
//!
//! Axis and legend labels are drawn as plain text (SVG text or terminal
//! cells), so names map to Unicode rather than TeX.

const PRETTY_NAMES: &[(&str, &str)] = &[
    ("Mdot", "Ṁ"),
    ("mdot", "Ṁ"),
    ("Edot", "Ė"),
    ("Ldot", "L̇"),
    ("Phi_EH", "Φ_EH"),
    ("phi_b", "φ_b"),
    ("time", "t"),
    ("t", "t"),
    ("r", "r"),
    ("th", "θ"),
    ("phi", "φ"),
    ("rho", "ρ"),
    ("Pg", "P_gas"),
    ("Pb", "P_B"),
    ("beta", "β"),
    ("sigma", "σ"),
];

/// Prettify a raw variable name; unknown names come back unchanged.
pub fn pretty(name: &str) -> String {
    PRETTY_NAMES
        .iter()
        .find(|(raw, _)| *raw == name)
        .map(|(_, shown)| (*shown).to_string())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        assert_eq!(pretty("Mdot"), "Ṁ");
        assert_eq!(pretty("phi_b"), "φ_b");
    }

    #[test]
    fn unknown_and_empty_names_pass_through() {
        assert_eq!(pretty("u^r"), "u^r");
        assert_eq!(pretty(""), "");
    }
}
