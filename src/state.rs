use crate::error::{Error, Result};
use crate::plot::figure::Figure;

// ---------------------------------------------------------------------------
// Plot session state
// ---------------------------------------------------------------------------

/// The figure slot of a plotter: either empty or holding one open figure.
///
/// ```text
///            create_figure              save (ok)
///   Idle ─────────────────► Open ─────────────────► Idle
///                           │  ▲
///                           └──┘ add_plot / add_scatter / create_figure
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Idle,
    Open(Figure),
}

impl Session {
    pub fn is_open(&self) -> bool {
        matches!(self, Session::Open(_))
    }

    /// Start a new figure, returning the one it replaced if it was never saved.
    pub fn open(&mut self, figure: Figure) -> Option<Figure> {
        match std::mem::replace(self, Session::Open(figure)) {
            Session::Open(previous) => Some(previous),
            Session::Idle => None,
        }
    }

    /// The open figure, or a usage error naming `operation`.
    pub fn figure(&self, operation: &'static str) -> Result<&Figure> {
        match self {
            Session::Open(figure) => Ok(figure),
            Session::Idle => Err(Error::NoActiveFigure { operation }),
        }
    }

    pub fn figure_mut(&mut self, operation: &'static str) -> Result<&mut Figure> {
        match self {
            Session::Open(figure) => Ok(figure),
            Session::Idle => Err(Error::NoActiveFigure { operation }),
        }
    }

    /// Release the open figure and return to `Idle`.
    pub fn close(&mut self) -> Option<Figure> {
        match std::mem::take(self) {
            Session::Open(figure) => Some(figure),
            Session::Idle => None,
        }
    }
}
