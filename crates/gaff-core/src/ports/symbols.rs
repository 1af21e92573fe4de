//! SymbolTable port - index から symbol 名への写像（リールストリップなど）

/// Maps a candidate index to its symbol name.
pub trait SymbolTable: Send + Sync {
    fn name_of(&self, index: usize) -> &str;

    /// Number of indexes the table can name.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SymbolTable for Vec<String> {
    fn name_of(&self, index: usize) -> &str {
        &self[index]
    }

    fn len(&self) -> usize {
        <[String]>::len(self)
    }
}

impl SymbolTable for Vec<&'static str> {
    fn name_of(&self, index: usize) -> &str {
        self[index]
    }

    fn len(&self) -> usize {
        <[&str]>::len(self)
    }
}
