//! GPML2021 attribute table.

use super::{
    AttributeInfo, AttributeSet, AttributeTable,
    ValueKind::{Choice, Color, Float, Integer, Text},
};
use crate::format::GpmlVersion;

const fn required(kind: super::ValueKind) -> AttributeInfo {
    AttributeInfo::required(kind)
}

const fn optional(kind: super::ValueKind) -> AttributeInfo {
    AttributeInfo::optional(kind)
}

const fn defaulted(kind: super::ValueKind, default: &'static str) -> AttributeInfo {
    AttributeInfo::defaulted(kind, default)
}

pub(super) const FONT_WEIGHTS: &[&str] = &["Normal", "Bold"];
pub(super) const FONT_STYLES: &[&str] = &["Normal", "Italic"];
pub(super) const FONT_DECORATIONS: &[&str] = &["Normal", "Underline"];
pub(super) const FONT_STRIKETHRUS: &[&str] = &["Normal", "Strikethru"];
pub(super) const H_ALIGNS: &[&str] = &["Left", "Center", "Right"];
pub(super) const V_ALIGNS: &[&str] = &["Top", "Middle", "Bottom"];
const LINE_STYLES: &[&str] = &["Solid", "Dashed", "Double"];

const ID: AttributeSet = &[("elementId", required(Text))];
const GROUPABLE: AttributeSet = &[("groupRef", optional(Text))];

const RECT: AttributeSet = &[
    ("centerX", required(Float)),
    ("centerY", required(Float)),
    ("width", required(Float)),
    ("height", required(Float)),
];

const STATE_RECT: AttributeSet = &[
    ("relX", required(Float)),
    ("relY", required(Float)),
    ("width", required(Float)),
    ("height", required(Float)),
];

const FONT: AttributeSet = &[
    ("textColor", defaulted(Color, "000000")),
    ("fontName", defaulted(Text, "Arial")),
    ("fontWeight", defaulted(Choice(FONT_WEIGHTS), "Normal")),
    ("fontStyle", defaulted(Choice(FONT_STYLES), "Normal")),
    ("fontDecoration", defaulted(Choice(FONT_DECORATIONS), "Normal")),
    ("fontStrikethru", defaulted(Choice(FONT_STRIKETHRUS), "Normal")),
    ("fontSize", defaulted(Float, "12")),
    ("hAlign", defaulted(Choice(H_ALIGNS), "Center")),
    ("vAlign", defaulted(Choice(V_ALIGNS), "Middle")),
];

const SHAPE_STYLE: AttributeSet = &[
    ("borderColor", defaulted(Color, "000000")),
    ("borderStyle", defaulted(Choice(LINE_STYLES), "Solid")),
    ("borderWidth", defaulted(Float, "1.0")),
    ("fillColor", defaulted(Color, "ffffff")),
    ("shapeType", defaulted(Text, "Rectangle")),
    ("zOrder", optional(Integer)),
    ("rotation", defaulted(Float, "0.0")),
];

const LINE_STYLE: AttributeSet = &[
    ("lineColor", defaulted(Color, "000000")),
    ("lineStyle", defaulted(Choice(LINE_STYLES), "Solid")),
    ("lineWidth", defaulted(Float, "1.0")),
    ("connectorType", defaulted(Text, "Straight")),
    ("zOrder", optional(Integer)),
];

const REF: AttributeSet = &[("elementRef", required(Text))];

pub(super) fn build() -> AttributeTable {
    let mut table = AttributeTable::new(GpmlVersion::Current);
    table
        .element(
            "Pathway",
            &[&[
                ("title", required(Text)),
                ("organism", optional(Text)),
                ("source", optional(Text)),
                ("version", optional(Text)),
                ("license", optional(Text)),
            ]],
        )
        .element(
            "Pathway.Graphics",
            &[&[
                ("boardWidth", required(Float)),
                ("boardHeight", required(Float)),
                ("backgroundColor", defaulted(Color, "ffffff")),
            ]],
        )
        .element("Description", &[])
        .element("Authors", &[])
        .element(
            "Author",
            &[&[
                ("name", required(Text)),
                ("username", optional(Text)),
                ("order", optional(Integer)),
            ]],
        )
        .element(
            "Xref",
            &[&[("identifier", required(Text)), ("dataSource", required(Text))]],
        )
        .element("Url", &[&[("link", required(Text))]])
        .element("Comment", &[&[("source", optional(Text))]])
        .element("Property", &[&[("key", required(Text)), ("value", required(Text))]])
        .element("AnnotationRef", &[REF])
        .element("CitationRef", &[REF])
        .element("EvidenceRef", &[REF])
        .element("Annotations", &[])
        .element(
            "Annotation",
            &[
                ID,
                &[
                    ("value", required(Text)),
                    ("type", defaulted(Text, "Undefined")),
                ],
            ],
        )
        .element("Citations", &[])
        .element("Citation", &[ID])
        .element("Evidences", &[])
        .element("Evidence", &[ID, &[("value", optional(Text))]])
        .element("Groups", &[])
        .element(
            "Group",
            &[
                ID,
                GROUPABLE,
                &[
                    ("type", defaulted(Text, "Group")),
                    ("textLabel", optional(Text)),
                ],
            ],
        )
        .element("Group.Graphics", &[RECT, FONT, SHAPE_STYLE])
        .element("Labels", &[])
        .element(
            "Label",
            &[
                ID,
                GROUPABLE,
                &[("textLabel", required(Text)), ("href", optional(Text))],
            ],
        )
        .element("Label.Graphics", &[RECT, FONT, SHAPE_STYLE])
        .element("Shapes", &[])
        .element("Shape", &[ID, GROUPABLE, &[("textLabel", optional(Text))]])
        .element("Shape.Graphics", &[RECT, FONT, SHAPE_STYLE])
        .element("DataNodes", &[])
        .element(
            "DataNode",
            &[
                ID,
                GROUPABLE,
                &[
                    ("textLabel", required(Text)),
                    ("type", defaulted(Text, "Undefined")),
                    ("aliasRef", optional(Text)),
                    // Older GPML2021 writers put the alias here.
                    ("elementRef", optional(Text)),
                ],
            ],
        )
        .element("DataNode.Graphics", &[RECT, FONT, SHAPE_STYLE])
        .element("States", &[])
        .element(
            "State",
            &[
                ID,
                &[
                    ("textLabel", required(Text)),
                    ("type", defaulted(Text, "Undefined")),
                ],
            ],
        )
        .element("State.Graphics", &[STATE_RECT, FONT, SHAPE_STYLE])
        .element("Interactions", &[])
        .element("Interaction", &[ID, GROUPABLE])
        .element("Interaction.Graphics", &[LINE_STYLE])
        .element("GraphicalLines", &[])
        .element("GraphicalLine", &[ID, GROUPABLE])
        .element("GraphicalLine.Graphics", &[LINE_STYLE])
        .element("Waypoints", &[])
        .element(
            "Point",
            &[
                ID,
                &[
                    ("x", required(Float)),
                    ("y", required(Float)),
                    ("relX", optional(Float)),
                    ("relY", optional(Float)),
                    ("elementRef", optional(Text)),
                    ("arrowHead", defaulted(Text, "Undirected")),
                ],
            ],
        )
        .element(
            "Anchor",
            &[
                ID,
                &[
                    ("position", required(Float)),
                    ("shapeType", defaulted(Text, "Square")),
                ],
            ],
        );
    table
}
