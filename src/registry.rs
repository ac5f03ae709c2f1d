//! Extension-based codec lookup for image-I/O layers.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::TgaError;
use crate::input::TgaInput;
use crate::output::TgaOutput;
use crate::spec::ImageSpec;
use crate::tga::EXTENSIONS;
use crate::traits::{ImageInput, ImageOutput};

/// Codecs this crate provides.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Codec {
    Tga,
}

impl Codec {
    pub fn name(self) -> &'static str {
        match self {
            Codec::Tga => "TGA",
        }
    }

    /// Lowercase extensions, without the dot.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Codec::Tga => EXTENSIONS,
        }
    }

    pub fn open_input(self, path: &Path) -> Result<Box<dyn ImageInput>, TgaError> {
        match self {
            Codec::Tga => Ok(Box::new(TgaInput::open(path)?)),
        }
    }

    pub fn create_output(
        self,
        path: &Path,
        spec: ImageSpec,
    ) -> Result<Box<dyn ImageOutput>, TgaError> {
        match self {
            Codec::Tga => Ok(Box::new(TgaOutput::create(path, spec)?)),
        }
    }
}

/// Maps file extensions to codecs.
///
/// ```
/// use zentga::{Codec, Registry};
///
/// assert_eq!(Registry::global().for_extension("TGA"), Some(Codec::Tga));
/// assert_eq!(Registry::global().for_extension("png"), None);
/// ```
#[derive(Debug)]
pub struct Registry {
    by_extension: HashMap<&'static str, Codec>,
}

impl Registry {
    /// A registry holding every built-in codec.
    pub fn new() -> Self {
        let mut registry = Self {
            by_extension: HashMap::new(),
        };
        registry.register(Codec::Tga);
        registry
    }

    /// Shared registry, built on first use.
    pub fn global() -> &'static Registry {
        static INSTANCE: OnceLock<Registry> = OnceLock::new();
        INSTANCE.get_or_init(Registry::new)
    }

    fn register(&mut self, codec: Codec) {
        for ext in codec.extensions() {
            self.by_extension.insert(*ext, codec);
        }
    }

    /// Look up an extension, ignoring case and a leading dot.
    pub fn for_extension(&self, ext: &str) -> Option<Codec> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        self.by_extension.get(ext.as_str()).copied()
    }

    /// Codec for `path`'s extension.
    pub fn for_path(&self, path: &Path) -> Result<Codec, TgaError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        self.for_extension(ext)
            .ok_or_else(|| TgaError::UnknownExtension(ext.to_string()))
    }

    /// Every registered extension, in no particular order.
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_extension.keys().copied()
    }

    pub fn open_input(&self, path: &Path) -> Result<Box<dyn ImageInput>, TgaError> {
        self.for_path(path)?.open_input(path)
    }

    pub fn create_output(
        &self,
        path: &Path,
        spec: ImageSpec,
    ) -> Result<Box<dyn ImageOutput>, TgaError> {
        self.for_path(path)?.create_output(path, spec)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
