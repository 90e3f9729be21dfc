//! Render-ready view model for the picker screen.
//!
//! The UI shell draws a dropdown of `options`, a header box with `header`,
//! and a location panel driven by `location`.

use crate::model::quadrant::{classify_geo, Quadrant};
use crate::model::record::{Record, RecordId};

/// Placeholder shown when nothing is selected.
pub const NOT_SELECTED_TEXT: &str = "User not selected";

/// Dropdown placeholder entry preceding the directory options.
pub const SELECT_PROMPT_TEXT: &str = "Select User";

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOption {
    pub id: RecordId,
    pub name: String,
}

impl From<&Record> for UserOption {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
        }
    }
}

/// Location panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPanel {
    /// No record selected; the panel shows [`NOT_SELECTED_TEXT`].
    NotSelected,
    /// Selected record falls in an open quadrant.
    Classified(Quadrant),
    /// Selected record sits on an axis or has non-numeric coordinates:
    /// empty label, no color.
    Unclassified,
}

impl LocationPanel {
    /// Derives the panel for an optional selection.
    pub fn for_selection(selection: Option<&Record>) -> Self {
        match selection {
            None => Self::NotSelected,
            Some(record) => match classify_geo(record.geo()) {
                Some(quadrant) => Self::Classified(quadrant),
                None => Self::Unclassified,
            },
        }
    }

    /// Text drawn inside the panel.
    pub fn text(&self) -> &'static str {
        match self {
            Self::NotSelected => NOT_SELECTED_TEXT,
            Self::Classified(quadrant) => quadrant.label(),
            Self::Unclassified => "",
        }
    }

    /// Background class, when the panel is colored.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::Classified(quadrant) => Some(quadrant.color().css_class()),
            Self::NotSelected | Self::Unclassified => None,
        }
    }
}

/// Complete screen state.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerView {
    pub options: Vec<UserOption>,
    pub header: String,
    pub location: LocationPanel,
    pub selected: Option<Record>,
}

impl PickerView {
    pub fn build(listing: &[Record], selection: Option<&Record>) -> Self {
        Self {
            options: listing.iter().map(UserOption::from).collect(),
            header: selection
                .map(Record::display_label)
                .unwrap_or_else(|| NOT_SELECTED_TEXT.to_string()),
            location: LocationPanel::for_selection(selection),
            selected: selection.cloned(),
        }
    }
}
