//! Type tags used across the pathway model.
//!
//! Most GPML tags are open vocabularies: a reader must accept values it does
//! not know and hand them back unchanged on write. These are modelled as
//! enums with a `Custom(String)` fallback. The tag strings are the GPML2021
//! spellings; legacy spellings are mapped in the codec.
//!
//! Closed vocabularies ([`LineStyleType`], [`HAlign`], [`VAlign`]) reject
//! unknown values.

use std::{fmt, str::FromStr};

/// Declares an open vocabulary enum with a `Custom` fallback variant.
macro_rules! open_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident,
        { $($(#[$vmeta:meta])* $variant:ident => $tag:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A tag outside the known vocabulary, kept verbatim.
            Custom(String),
        }

        impl $name {
            /// Returns the tag as written in GPML2021.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $tag,)+
                    Self::Custom(tag) => tag,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                match tag {
                    $($tag => Self::$variant,)+
                    other => Self::Custom(other.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_vocabulary! {
    /// Biological kind of a data node.
    DataNodeType, default = Undefined, {
        Undefined => "Undefined",
        GeneProduct => "GeneProduct",
        Dna => "DNA",
        Rna => "RNA",
        Protein => "Protein",
        Metabolite => "Metabolite",
        Complex => "Complex",
        Pathway => "Pathway",
        Disease => "Disease",
        Phenotype => "Phenotype",
        Alias => "Alias",
        Event => "Event",
        CellularComponent => "CellularComponent",
        Organism => "Organism",
    }
}

open_vocabulary! {
    /// Kind of a state attached to a data node.
    StateType, default = Undefined, {
        Undefined => "Undefined",
        ProteinModification => "ProteinModification",
        GeneticVariant => "GeneticVariant",
        EpigeneticModification => "EpigeneticModification",
    }
}

open_vocabulary! {
    /// Kind of a group.
    GroupType, default = Group, {
        Group => "Group",
        Transparent => "Transparent",
        Complex => "Complex",
        Pathway => "Pathway",
        Analog => "Analog",
        Paralog => "Paralog",
    }
}

open_vocabulary! {
    /// Kind of an annotation.
    AnnotationType, default = Undefined, {
        Undefined => "Undefined",
        Ontology => "Ontology",
        Taxonomy => "Taxonomy",
    }
}

open_vocabulary! {
    /// Arrow head drawn at a line point.
    ArrowHeadType, default = Undirected, {
        Undirected => "Undirected",
        Directed => "Directed",
        Conversion => "Conversion",
        Inhibition => "Inhibition",
        Catalysis => "Catalysis",
        Stimulation => "Stimulation",
        Binding => "Binding",
        Translocation => "Translocation",
        TranscriptionTranslation => "TranscriptionTranslation",
        NecessaryStimulation => "NecessaryStimulation",
        Cleavage => "Cleavage",
        CovalentBond => "CovalentBond",
        BranchingLeft => "BranchingLeft",
        BranchingRight => "BranchingRight",
        Modification => "Modification",
        Gap => "Gap",
    }
}

open_vocabulary! {
    /// Marker drawn for an anchor on a line.
    AnchorShapeType, default = Square, {
        Square => "Square",
        Circle => "Circle",
        None => "None",
    }
}

open_vocabulary! {
    /// Outline of a shaped element.
    ShapeType, default = Rectangle, {
        Rectangle => "Rectangle",
        RoundedRectangle => "RoundedRectangle",
        Oval => "Oval",
        Triangle => "Triangle",
        Pentagon => "Pentagon",
        Hexagon => "Hexagon",
        Octagon => "Octagon",
        Arc => "Arc",
        Brace => "Brace",
        Mitochondria => "Mitochondria",
        SarcoplasmicReticulum => "SarcoplasmicReticulum",
        EndoplasmicReticulum => "EndoplasmicReticulum",
        GolgiApparatus => "GolgiApparatus",
        Nucleus => "Nucleus",
        Organelle => "Organelle",
        Cell => "Cell",
        Vesicle => "Vesicle",
        ExtracellularRegion => "ExtracellularRegion",
        None => "None",
    }
}

open_vocabulary! {
    /// Routing of a line between its points.
    ConnectorType, default = Straight, {
        Straight => "Straight",
        Elbow => "Elbow",
        Curved => "Curved",
        Segmented => "Segmented",
    }
}

/// Stroke pattern of a line or border.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyleType {
    #[default]
    Solid,
    Dashed,
    Double,
}

impl LineStyleType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::Dashed => "Dashed",
            Self::Double => "Double",
        }
    }
}

impl FromStr for LineStyleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Solid" => Ok(Self::Solid),
            "Dashed" => Ok(Self::Dashed),
            "Double" => Ok(Self::Double),
            _ => Err(format!("unknown line style `{s}`")),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}

impl FromStr for HAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Left" => Ok(Self::Left),
            "Center" => Ok(Self::Center),
            "Right" => Ok(Self::Right),
            _ => Err(format!("unknown horizontal alignment `{s}`")),
        }
    }
}

/// Vertical text alignment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Middle => "Middle",
            Self::Bottom => "Bottom",
        }
    }
}

impl FromStr for VAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Top" => Ok(Self::Top),
            "Middle" => Ok(Self::Middle),
            "Bottom" => Ok(Self::Bottom),
            _ => Err(format!("unknown vertical alignment `{s}`")),
        }
    }
}
