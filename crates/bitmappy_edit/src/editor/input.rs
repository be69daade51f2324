use bitmappy_engine::Position;

/// Keyboard commands of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// `n`: clear the canvas to transparent
    New,
    /// `s`: write the document file
    Save,
    /// `l`: read the document file
    Load,
    /// `q`
    Quit,
    Other(char),
}

impl From<char> for EditorKey {
    fn from(ch: char) -> Self {
        match ch.to_ascii_lowercase() {
            'n' => EditorKey::New,
            's' => EditorKey::Save,
            'l' => EditorKey::Load,
            'q' => EditorKey::Quit,
            _ => EditorKey::Other(ch),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown(Position),
    /// Pointer moved with the button held
    PointerDrag(Position),
    PointerUp(Position),
    Key(EditorKey),
}
