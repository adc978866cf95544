use crate::model::StructureType;

/// Keyword groups in precedence order. Building-mounted sites come first,
/// so a rooftop proposal that also mentions a "tower" stays rooftop.
const PRECEDENCE: &[(StructureType, &[&str])] = &[
    (StructureType::Rooftop, &["rooftop", "building"]),
    (StructureType::Lampole, &["lampole"]),
    (StructureType::Rapole, &["rapole"]),
    (StructureType::Monopole, &["monopole"]),
    (StructureType::Gbt, &["tower", "gbt"]),
];

/// Infer the installation type from the full document text.
pub fn infer(text: &str) -> StructureType {
    let folded = text.to_lowercase();
    PRECEDENCE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| folded.contains(k)))
        .map(|(kind, _)| *kind)
        .unwrap_or(StructureType::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_type() {
        assert_eq!(infer("New ROOFTOP site"), StructureType::Rooftop);
        assert_eq!(infer("Office building, level 8"), StructureType::Rooftop);
        assert_eq!(infer("Lampole swap"), StructureType::Lampole);
        assert_eq!(infer("RApole extension"), StructureType::Rapole);
        assert_eq!(infer("30 m monopole"), StructureType::Monopole);
        assert_eq!(infer("Existing GBT"), StructureType::Gbt);
        assert_eq!(infer("lattice tower"), StructureType::Gbt);
        assert_eq!(infer("site survey notes"), StructureType::Unknown);
        assert_eq!(infer(""), StructureType::Unknown);
    }

    #[test]
    fn test_rooftop_beats_tower() {
        assert_eq!(
            infer("Tower equipment relocated to the rooftop"),
            StructureType::Rooftop
        );
    }

    #[test]
    fn test_monopole_beats_tower() {
        assert_eq!(infer("monopole replaces old tower"), StructureType::Monopole);
    }

    #[test]
    fn test_lampole_beats_monopole() {
        assert_eq!(infer("lampole next to monopole"), StructureType::Lampole);
    }
}
