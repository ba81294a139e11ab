//! GPML2013a attribute table.

use super::{
    AttributeInfo, AttributeSet, AttributeTable, ValueKind,
    ValueKind::{Choice, Color, Float, Integer, Text},
    current::{FONT_DECORATIONS, FONT_STRIKETHRUS, FONT_STYLES, FONT_WEIGHTS, H_ALIGNS, V_ALIGNS},
};
use crate::format::GpmlVersion;

const fn required(kind: ValueKind) -> AttributeInfo {
    AttributeInfo::required(kind)
}

const fn optional(kind: ValueKind) -> AttributeInfo {
    AttributeInfo::optional(kind)
}

const fn defaulted(kind: ValueKind, default: &'static str) -> AttributeInfo {
    AttributeInfo::defaulted(kind, default)
}

/// Double borders and lines are a reserved property, not a style.
const LINE_STYLES: &[&str] = &["Solid", "Broken"];

const GRAPH_ID: AttributeSet = &[("GraphId", optional(Text))];
const GROUPABLE: AttributeSet = &[("GroupRef", optional(Text))];

const RECT: AttributeSet = &[
    ("CenterX", required(Float)),
    ("CenterY", required(Float)),
    ("Width", required(Float)),
    ("Height", required(Float)),
];

const STATE_RECT: AttributeSet = &[
    ("RelX", required(Float)),
    ("RelY", required(Float)),
    ("Width", required(Float)),
    ("Height", required(Float)),
];

const FONT: AttributeSet = &[
    ("FontName", defaulted(Text, "Arial")),
    ("FontStyle", defaulted(Choice(FONT_STYLES), "Normal")),
    ("FontDecoration", defaulted(Choice(FONT_DECORATIONS), "Normal")),
    ("FontStrikethru", defaulted(Choice(FONT_STRIKETHRUS), "Normal")),
    ("FontWeight", defaulted(Choice(FONT_WEIGHTS), "Normal")),
    ("FontSize", defaulted(Float, "12")),
    ("Align", defaulted(Choice(H_ALIGNS), "Center")),
    ("Valign", defaulted(Choice(V_ALIGNS), "Top")),
];

const SHAPE_STYLE: AttributeSet = &[
    ("Color", defaulted(Color, "000000")),
    ("LineStyle", defaulted(Choice(LINE_STYLES), "Solid")),
    ("LineThickness", defaulted(Float, "1.0")),
    ("FillColor", defaulted(Color, "Transparent")),
    ("ShapeType", defaulted(Text, "Rectangle")),
    ("ZOrder", optional(Integer)),
];

const LINE_STYLE: AttributeSet = &[
    ("ConnectorType", defaulted(Text, "Straight")),
    ("ZOrder", optional(Integer)),
    ("Color", defaulted(Color, "000000")),
    ("LineStyle", defaulted(Choice(LINE_STYLES), "Solid")),
    ("LineThickness", defaulted(Float, "1.0")),
];

const CENTER: AttributeSet = &[("CenterX", required(Float)), ("CenterY", required(Float))];

pub(super) fn build() -> AttributeTable {
    let mut table = AttributeTable::new(GpmlVersion::Legacy);
    table
        .element(
            "Pathway",
            &[&[
                ("Name", required(Text)),
                ("Organism", optional(Text)),
                ("Data-Source", optional(Text)),
                ("Version", optional(Text)),
                ("Author", optional(Text)),
                ("Maintainer", optional(Text)),
                ("Email", optional(Text)),
                ("License", optional(Text)),
                ("Last-Modified", optional(Text)),
            ]],
        )
        .element(
            "Pathway.Graphics",
            &[&[("BoardWidth", required(Float)), ("BoardHeight", required(Float))]],
        )
        .element("Comment", &[&[("Source", optional(Text))]])
        .element("BiopaxRef", &[])
        .element("Attribute", &[&[("Key", required(Text)), ("Value", required(Text))]])
        .element("Xref", &[&[("Database", required(Text)), ("ID", required(Text))]])
        .element(
            "DataNode",
            &[
                GRAPH_ID,
                GROUPABLE,
                &[
                    ("TextLabel", required(Text)),
                    ("Type", defaulted(Text, "Unknown")),
                ],
            ],
        )
        .element("DataNode.Graphics", &[RECT, FONT, SHAPE_STYLE])
        .with_default("DataNode.Graphics", "FillColor", "ffffff")
        .element(
            "State",
            &[
                GRAPH_ID,
                &[
                    ("GraphRef", required(Text)),
                    ("TextLabel", required(Text)),
                    ("StateType", defaulted(Text, "Unknown")),
                ],
            ],
        )
        .element("State.Graphics", &[STATE_RECT, FONT, SHAPE_STYLE])
        .with_default("State.Graphics", "FillColor", "ffffff")
        .element("Interaction", &[GRAPH_ID, GROUPABLE])
        .element("Interaction.Graphics", &[LINE_STYLE])
        .element("GraphicalLine", &[GRAPH_ID, GROUPABLE])
        .element("GraphicalLine.Graphics", &[LINE_STYLE])
        .element(
            "Point",
            &[
                GRAPH_ID,
                &[
                    ("X", required(Float)),
                    ("Y", required(Float)),
                    ("RelX", optional(Float)),
                    ("RelY", optional(Float)),
                    ("GraphRef", optional(Text)),
                    ("ArrowHead", defaulted(Text, "Line")),
                ],
            ],
        )
        .element(
            "Anchor",
            &[
                GRAPH_ID,
                &[
                    ("Position", required(Float)),
                    ("Shape", defaulted(Text, "ReceptorRound")),
                ],
            ],
        )
        .element(
            "Label",
            &[
                GRAPH_ID,
                GROUPABLE,
                &[("TextLabel", required(Text)), ("Href", optional(Text))],
            ],
        )
        .element("Label.Graphics", &[RECT, FONT, SHAPE_STYLE])
        .with_default("Label.Graphics", "ShapeType", "None")
        .element("Shape", &[GRAPH_ID, GROUPABLE, &[("TextLabel", optional(Text))]])
        .element(
            "Shape.Graphics",
            &[RECT, FONT, SHAPE_STYLE, &[("Rotation", defaulted(Text, "Top"))]],
        )
        .element(
            "Group",
            &[
                GRAPH_ID,
                GROUPABLE,
                &[
                    ("GroupId", required(Text)),
                    ("Style", defaulted(Text, "None")),
                    ("TextLabel", optional(Text)),
                ],
            ],
        )
        .element("InfoBox", &[CENTER])
        .element("Legend", &[CENTER])
        .element("Biopax", &[]);
    table
}
