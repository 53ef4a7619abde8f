//! UI events fed back from the renderer's event source

/// Pointer events on tab elements, generic over the renderer's element handle.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent<E> {
    /// Primary click on a tab or something inside it
    Click { target: E },
    /// Click on a tab's close button
    CloseClick { target: E },
    DragStart { target: E },
    DragOver { target: E },
    DragEnter { target: E },
    /// `related_target` is the element the pointer moved into, if known
    DragLeave { target: E, related_target: Option<E> },
    /// `current_target` is the element the handler was wired on
    Drop {
        target: E,
        current_target: E,
        client_x: f64,
    },
    DragEnd { target: E },
}

/// How the event source should treat the platform's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Default,
    PreventDefault,
}
