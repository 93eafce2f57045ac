use tracing::trace;

/// Single shared text register written by cut/copy and read by paste.
///
/// The clipboard sits outside the edit history: undoing a cut or paste never
/// restores its previous contents.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Clipboard {
    contents: String,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<S: Into<String>>(&mut self, text: S) {
        self.contents = text.into();
        trace!(target: "state.clipboard", len = self.contents.len(), "clipboard_write");
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
