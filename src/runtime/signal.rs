use crate::foundation::core::{Point, Viewport};
use crate::transform::scroll::ScrollProgress;

/// Continuous input delivered to global listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Signal {
    PointerMove(Point),
    Resize(Viewport),
    Scroll(ScrollProgress),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    PointerMove,
    Resize,
    Scroll,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::PointerMove(_) => SignalKind::PointerMove,
            Self::Resize(_) => SignalKind::Resize,
            Self::Scroll(_) => SignalKind::Scroll,
        }
    }
}
