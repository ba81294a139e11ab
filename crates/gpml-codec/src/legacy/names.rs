//! GPML2013a vocabulary and its mapping onto the model's tags.
//!
//! Every `*_from_legacy` function accepts any string and keeps unknown
//! values as `Custom` tags; every `*_to_legacy` function is its inverse on
//! the known vocabulary.

use std::f64::consts::{FRAC_PI_2, PI};

use gpml_core::types::{
    AnchorShapeType, ArrowHeadType, DataNodeType, GroupType, LineStyleType, ShapeType, StateType,
};

/// Dynamic property the legacy format uses to mark double lines.
pub const DOUBLE_LINE_KEY: &str = "org.pathvisio.DoubleLineProperty";

/// Dynamic property the legacy format uses to mark cellular components.
pub const CELLULAR_COMPONENT_KEY: &str = "org.pathvisio.CellularComponentProperty";

/// Keys the legacy writer generates itself. Model properties with these
/// keys cannot be written to GPML2013a.
pub const RESERVED_KEYS: &[&str] = &[DOUBLE_LINE_KEY, CELLULAR_COMPONENT_KEY];

/// Comment source marking the pathway description.
pub const DESCRIPTION_SOURCE: &str = "WikiPathways-description";

/// Whether a dynamic property key is reserved by the legacy format.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

// ============================================================================
// Element types
// ============================================================================

pub fn data_node_type_from_legacy(tag: &str) -> DataNodeType {
    match tag {
        "Unknown" => DataNodeType::Undefined,
        "Rna" => DataNodeType::Rna,
        "Dna" => DataNodeType::Dna,
        other => DataNodeType::from(other),
    }
}

pub fn data_node_type_to_legacy(tag: &DataNodeType) -> &str {
    match tag {
        DataNodeType::Undefined => "Unknown",
        DataNodeType::Rna => "Rna",
        DataNodeType::Dna => "Dna",
        other => other.as_str(),
    }
}

pub fn state_type_from_legacy(tag: &str) -> StateType {
    match tag {
        "Unknown" => StateType::Undefined,
        other => StateType::from(other),
    }
}

pub fn state_type_to_legacy(tag: &StateType) -> &str {
    match tag {
        StateType::Undefined => "Unknown",
        other => other.as_str(),
    }
}

/// Group `Style` to group type. The legacy `None` style is a plain group and
/// the legacy `Group` style a transparent one.
pub fn group_type_from_legacy(style: &str) -> GroupType {
    match style {
        "None" => GroupType::Group,
        "Group" => GroupType::Transparent,
        other => GroupType::from(other),
    }
}

pub fn group_type_to_legacy(tag: &GroupType) -> &str {
    match tag {
        GroupType::Group => "None",
        GroupType::Transparent => "Group",
        other => other.as_str(),
    }
}

// ============================================================================
// Line decorations
// ============================================================================

const MIM_ARROWS: &[(&str, ArrowHeadType)] = &[
    ("mim-conversion", ArrowHeadType::Conversion),
    ("mim-inhibition", ArrowHeadType::Inhibition),
    ("mim-catalysis", ArrowHeadType::Catalysis),
    ("mim-stimulation", ArrowHeadType::Stimulation),
    ("mim-binding", ArrowHeadType::Binding),
    ("mim-translocation", ArrowHeadType::Translocation),
    ("mim-transcription-translation", ArrowHeadType::TranscriptionTranslation),
    ("mim-necessary-stimulation", ArrowHeadType::NecessaryStimulation),
    ("mim-cleavage", ArrowHeadType::Cleavage),
    ("mim-covalent-bond", ArrowHeadType::CovalentBond),
    ("mim-branching-left", ArrowHeadType::BranchingLeft),
    ("mim-branching-right", ArrowHeadType::BranchingRight),
    ("mim-modification", ArrowHeadType::Modification),
    ("mim-gap", ArrowHeadType::Gap),
];

pub fn arrow_head_from_legacy(tag: &str) -> ArrowHeadType {
    match tag {
        "Line" => ArrowHeadType::Undirected,
        "Arrow" => ArrowHeadType::Directed,
        "TBar" => ArrowHeadType::Inhibition,
        other => MIM_ARROWS
            .iter()
            .find(|(name, _)| *name == other)
            .map(|(_, arrow)| arrow.clone())
            .unwrap_or_else(|| ArrowHeadType::from(other)),
    }
}

pub fn arrow_head_to_legacy(tag: &ArrowHeadType) -> &str {
    match tag {
        ArrowHeadType::Undirected => "Line",
        ArrowHeadType::Directed => "Arrow",
        other => MIM_ARROWS
            .iter()
            .find(|(_, arrow)| arrow == other)
            .map_or(other.as_str(), |(name, _)| *name),
    }
}

/// Anchor `Shape`. The legacy default `ReceptorRound` is the current
/// default marker.
pub fn anchor_shape_from_legacy(tag: &str) -> AnchorShapeType {
    match tag {
        "ReceptorRound" => AnchorShapeType::Square,
        other => AnchorShapeType::from(other),
    }
}

pub fn anchor_shape_to_legacy(tag: &AnchorShapeType) -> &str {
    match tag {
        AnchorShapeType::Square => "ReceptorRound",
        other => other.as_str(),
    }
}

/// `LineStyle` plus the double line property.
pub fn line_style_from_legacy(style: &str, double: bool) -> LineStyleType {
    match (style, double) {
        (_, true) => LineStyleType::Double,
        ("Broken", _) => LineStyleType::Dashed,
        _ => LineStyleType::Solid,
    }
}

/// The `LineStyle` to write and whether the double line property is needed.
pub fn line_style_to_legacy(style: LineStyleType) -> (&'static str, bool) {
    match style {
        LineStyleType::Solid => ("Solid", false),
        LineStyleType::Dashed => ("Broken", false),
        LineStyleType::Double => ("Solid", true),
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// Shape types spelled differently in GPML2013a.
const SPACED_SHAPES: &[(&str, ShapeType)] = &[
    ("Sarcoplasmic Reticulum", ShapeType::SarcoplasmicReticulum),
    ("Endoplasmic Reticulum", ShapeType::EndoplasmicReticulum),
    ("Golgi Apparatus", ShapeType::GolgiApparatus),
];

/// Cellular components drawn with a plain outline plus a marker property.
const CELLULAR_COMPONENTS: &[(&str, ShapeType, ShapeType)] = &[
    ("Cell", ShapeType::Cell, ShapeType::RoundedRectangle),
    ("Nucleus", ShapeType::Nucleus, ShapeType::Oval),
    ("Organelle", ShapeType::Organelle, ShapeType::RoundedRectangle),
    ("Vesicle", ShapeType::Vesicle, ShapeType::Oval),
    ("Extracellular region", ShapeType::ExtracellularRegion, ShapeType::Rectangle),
];

/// `ShapeType` plus an optional cellular component property.
pub fn shape_type_from_legacy(tag: &str, cellular_component: Option<&str>) -> ShapeType {
    if let Some(component) = cellular_component {
        if let Some((_, shape, _)) = CELLULAR_COMPONENTS.iter().find(|(name, _, _)| *name == component) {
            return shape.clone();
        }
        return shape_type_from_legacy(component, None);
    }
    SPACED_SHAPES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, shape)| shape.clone())
        .unwrap_or_else(|| ShapeType::from(tag))
}

/// The `ShapeType` to write and the cellular component property, if any.
pub fn shape_type_to_legacy(shape: &ShapeType) -> (&str, Option<&'static str>) {
    if let Some((name, _, outline)) = CELLULAR_COMPONENTS.iter().find(|(_, tag, _)| tag == shape) {
        return (outline.as_str(), Some(*name));
    }
    let spelled = SPACED_SHAPES
        .iter()
        .find(|(_, tag)| tag == shape)
        .map_or(shape.as_str(), |(name, _)| *name);
    (spelled, None)
}

/// Shape `Rotation`: a quarter turn keyword or radians.
pub fn rotation_from_legacy(value: &str) -> Result<f64, String> {
    match value {
        "Top" => Ok(0.0),
        "Right" => Ok(FRAC_PI_2),
        "Bottom" => Ok(PI),
        "Left" => Ok(3.0 * FRAC_PI_2),
        other => other
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("expected Top, Right, Bottom, Left or radians, got `{other}`")),
    }
}

/// Quarter turns are written as keywords, other angles as radians.
pub fn rotation_to_legacy(radians: f64) -> Option<&'static str> {
    match radians {
        r if r == 0.0 => Some("Top"),
        r if r == FRAC_PI_2 => Some("Right"),
        r if r == PI => Some("Bottom"),
        r if r == 3.0 * FRAC_PI_2 => Some("Left"),
        _ => None,
    }
}
