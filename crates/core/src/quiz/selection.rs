/// Two-tap answer confirmation: `none -> highlighted -> committed`.
///
/// Indices refer to the on-screen position of an option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Highlighted(usize),
    Committed(usize),
}

/// Result of a single tap on an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The tap moved or set the highlight.
    Highlighted(usize),
    /// The tap repeated the highlighted option and locked it in.
    Committed(usize),
    /// The answer was already committed.
    Ignored,
}

impl Selection {
    pub fn tap(&mut self, index: usize) -> SelectionEvent {
        match *self {
            Selection::Committed(_) => SelectionEvent::Ignored,
            Selection::Highlighted(current) if current == index => {
                *self = Selection::Committed(index);
                SelectionEvent::Committed(index)
            }
            Selection::None | Selection::Highlighted(_) => {
                *self = Selection::Highlighted(index);
                SelectionEvent::Highlighted(index)
            }
        }
    }

    /// Locks the selection without a second tap (timer expiry).
    pub fn lock(&mut self) {
        if let Selection::Highlighted(index) = *self {
            *self = Selection::Committed(index);
        }
    }

    pub fn reset(&mut self) {
        *self = Selection::None;
    }

    #[must_use]
    pub fn highlighted(self) -> Option<usize> {
        match self {
            Selection::Highlighted(index) => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn committed(self) -> Option<usize> {
        match self {
            Selection::Committed(index) => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_committed(self) -> bool {
        matches!(self, Selection::Committed(_))
    }
}
