/// The latest text the client sent for an open document.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub text: String,
    pub version: i32,
}

impl DocumentState {
    pub fn new(text: String, version: i32) -> Self {
        Self { text, version }
    }
}
