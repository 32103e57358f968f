//! Format registry: ordered descriptor table with first-match lookup.

use alloc::vec::Vec;
use std::sync::OnceLock;

use crate::error::CompressionError;
use crate::format::{TextureCompression, TextureCompressionInfo, table};

/// What to look a descriptor up by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Compression(TextureCompression),
    /// `DXGI_FORMAT` code.
    Dxgi(u32),
    /// OpenGL internal format.
    Gl(u32),
    /// `VkFormat` code.
    Vulkan(u32),
}

impl From<TextureCompression> for Lookup {
    fn from(compression: TextureCompression) -> Self {
        Self::Compression(compression)
    }
}

impl Lookup {
    fn matches(&self, info: &TextureCompressionInfo) -> bool {
        match *self {
            Self::Compression(c) => info.compression == c,
            Self::Dxgi(code) => info.dxgi == code,
            Self::Gl(code) => info.gl == code,
            Self::Vulkan(code) => info.vulkan == code,
        }
    }
}

/// Ordered table of format descriptors.
///
/// Entry 0 is always the [`TextureCompressionInfo::NONE`] sentinel. It has
/// every platform code set to 0, so looking up code 0 returns it, and it is
/// also what any unmatched lookup falls back to.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<TextureCompressionInfo>,
}

impl Registry {
    /// Build a registry from `entries`, placing the sentinel in front.
    ///
    /// Fails if two entries share a compression id; `None` itself is reserved.
    pub fn new(
        entries: impl IntoIterator<Item = TextureCompressionInfo>,
    ) -> Result<Self, CompressionError> {
        let mut table = Vec::new();
        table.push(TextureCompressionInfo::NONE);
        for entry in entries {
            if table.iter().any(|e| e.compression == entry.compression) {
                return Err(CompressionError::DuplicateEntry(entry.compression));
            }
            table.push(entry);
        }
        Ok(Self { entries: table })
    }

    /// The built-in table with every known compression variant.
    pub fn builtin() -> Self {
        let mut entries = Vec::with_capacity(TextureCompression::ALL.len());
        entries.push(TextureCompressionInfo::NONE);
        entries.extend(table::builtin());
        Self { entries }
    }

    /// First entry matching `key`, or the sentinel.
    pub fn lookup(&self, key: impl Into<Lookup>) -> &TextureCompressionInfo {
        let key = key.into();
        self.entries
            .iter()
            .find(|e| key.matches(e))
            .unwrap_or(&self.entries[0])
    }

    /// All entries in lookup order, sentinel first.
    pub fn entries(&self) -> &[TextureCompressionInfo] {
        &self.entries
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide built-in registry, built on first use.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::builtin)
}

/// Look `key` up in the built-in registry.
pub fn lookup(key: impl Into<Lookup>) -> &'static TextureCompressionInfo {
    registry().lookup(key)
}
