//! Plain-data view selection and conditional transforms.

use std::sync::Arc;

use crate::domain::model::{Pin, Selection};

/// Which top-level view to render. A pure function of the [`Selection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    PinList,
    Detail(Arc<Pin>),
}

impl Screen {
    pub fn for_selection(selection: &Selection) -> Self {
        match selection {
            Selection::NoSelection => Screen::PinList,
            Selection::Selected(pin) => Screen::Detail(Arc::clone(pin)),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Screen::PinList => "Pins".to_string(),
            Screen::Detail(pin) => pin.display_name(),
        }
    }
}

/// Apply a transform only when a condition holds.
pub trait ApplyIf: Sized {
    fn apply_if(self, condition: bool, transform: impl FnOnce(Self) -> Self) -> Self {
        if condition { transform(self) } else { self }
    }
}

impl<T> ApplyIf for T {}
