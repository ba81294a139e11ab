//! The pathway singleton: diagram metadata and board settings.

use crate::{
    color::Color,
    geometry::{Coordinate, Size},
    xref::Xref,
};

use super::{error::ModelError, info::CommentGroup};

/// Title used for pathways that have not been named yet.
pub const DEFAULT_TITLE: &str = "Click to add title";

/// An author of the pathway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    name: String,
    username: Option<String>,
    order: Option<u32>,
    xref: Option<Xref>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: None,
            order: None,
            xref: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn order(&self) -> Option<u32> {
        self.order
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }
}

/// Optional pathway metadata, passed to [`Pathway::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathwayOptions {
    pub organism: Option<String>,
    pub source: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub description: Option<String>,
    pub xref: Option<Xref>,
    pub board_size: Size,
    pub background_color: Color,
    pub authors: Vec<Author>,
    pub infobox: Coordinate,
}

impl Default for PathwayOptions {
    fn default() -> Self {
        Self {
            organism: None,
            source: None,
            version: None,
            license: None,
            description: None,
            xref: None,
            board_size: Size::default(),
            background_color: Color::WHITE,
            authors: Vec::new(),
            infobox: Coordinate::default(),
        }
    }
}

/// Pathway level metadata. Exactly one exists per model.
///
/// # Examples
///
/// ```
/// use gpml_core::model::{Pathway, PathwayOptions};
///
/// let pathway = Pathway::new(
///     "Glycolysis",
///     PathwayOptions {
///         organism: Some("Homo sapiens".to_string()),
///         ..PathwayOptions::default()
///     },
/// );
/// assert_eq!(pathway.title(), "Glycolysis");
/// assert_eq!(pathway.organism(), Some("Homo sapiens"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pathway {
    title: String,
    organism: Option<String>,
    source: Option<String>,
    version: Option<String>,
    license: Option<String>,
    description: Option<String>,
    xref: Option<Xref>,
    board_size: Size,
    background_color: Color,
    authors: Vec<Author>,
    infobox: Coordinate,
    legacy_biopax: Option<String>,
    comment_group: CommentGroup,
}

impl Pathway {
    pub fn new(title: impl Into<String>, options: PathwayOptions) -> Self {
        Self {
            title: title.into(),
            organism: options.organism,
            source: options.source,
            version: options.version,
            license: options.license,
            description: options.description,
            xref: options.xref,
            board_size: options.board_size,
            background_color: options.background_color,
            authors: options.authors,
            infobox: options.infobox,
            legacy_biopax: None,
            comment_group: CommentGroup::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn organism(&self) -> Option<&str> {
        self.organism.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn board_size(&self) -> Size {
        self.board_size
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Position of the information box, a legacy-format feature.
    pub fn infobox(&self) -> Coordinate {
        self.infobox
    }

    /// Serialised legacy Biopax block, kept opaque for legacy round trips.
    pub fn legacy_biopax(&self) -> Option<&str> {
        self.legacy_biopax.as_deref()
    }

    pub fn comment_group(&self) -> &CommentGroup {
        &self.comment_group
    }

    pub fn comment_group_mut(&mut self) -> &mut CommentGroup {
        &mut self.comment_group
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_organism(&mut self, organism: Option<String>) {
        self.organism = organism;
    }

    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }

    pub fn set_version(&mut self, version: Option<String>) {
        self.version = version;
    }

    pub fn set_license(&mut self, license: Option<String>) {
        self.license = license;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }

    /// Sets the board dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] when a dimension is negative.
    pub fn set_board_size(&mut self, width: f64, height: f64) -> Result<(), ModelError> {
        self.board_size = Size::new(width, height).map_err(ModelError::InvalidValue)?;
        Ok(())
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    pub fn add_author(&mut self, author: Author) {
        self.authors.push(author);
    }

    pub fn remove_author(&mut self, index: usize) -> Option<Author> {
        (index < self.authors.len()).then(|| self.authors.remove(index))
    }

    pub fn set_infobox(&mut self, infobox: Coordinate) {
        self.infobox = infobox;
    }

    pub fn set_legacy_biopax(&mut self, biopax: Option<String>) {
        self.legacy_biopax = biopax;
    }
}

impl Default for Pathway {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, PathwayOptions::default())
    }
}
