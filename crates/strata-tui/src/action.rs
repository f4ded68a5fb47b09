//! UI actions produced by key handling and dispatched to the controller.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SelectUp(usize),
    SelectDown(usize),
    SelectFirst,
    SelectLast,
    /// Move one level toward the root (cached listings only).
    Shallower,
    /// Move one level away from the root (cached listings only).
    Deeper,
    /// Enter the selected directory or play the selected file.
    Activate,
    Stop,
}
