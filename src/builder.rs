use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::{EngineParts, Traversal};
use crate::error::EnumError;
use crate::matcher;
use crate::native::{StdFind, Transaction};
use crate::options::{EnumerationOptions, OutputShape};
use crate::output::{Found, StdMetadataDecoder};
use crate::path::StdPathResolver;
use crate::traits::{MetadataDecoder, NativeFind, PathResolver};

// ---------------------------------------------------------------------------
// EnumerationBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring an enumeration.
///
/// Created via [`fsenum::enumerate()`](crate::enumerate). Configure with
/// chained builder methods, then call [`build()`](EnumerationBuilder::build)
/// for the lazy [`Traversal`] or [`get()`](EnumerationBuilder::get) for the
/// root entry alone.
///
/// # Example
///
/// ```rust,ignore
/// let txt_files = fsenum::enumerate("/var/log")
///     .recursive(true)
///     .skip_reparse_points(true)
///     .search_pattern("*.log")
///     .files_only()
///     .build()?;
/// ```
pub struct EnumerationBuilder {
    root:        PathBuf,
    options:     EnumerationOptions,
    transaction: Option<Transaction>,
    native:      Arc<dyn NativeFind>,
    resolver:    Arc<dyn PathResolver>,
    decoder:     Arc<dyn MetadataDecoder>,
}

impl EnumerationBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:        root.into(),
            options:     EnumerationOptions::default(),
            transaction: None,
            native:      Arc::new(StdFind),
            resolver:    Arc::new(StdPathResolver),
            decoder:     Arc::new(StdMetadataDecoder),
        }
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Descend into subdirectories. Off by default.
    pub fn recursive(mut self, yes: bool) -> Self {
        self.options.recursive = yes;
        self
    }

    /// Neither yield nor descend into entries marked as reparse points
    /// (symbolic links, junctions).
    pub fn skip_reparse_points(mut self, yes: bool) -> Self {
        self.options.skip_reparse_points = yes;
        self
    }

    /// Skip directories that cannot be opened or read instead of ending the
    /// traversal with an error.
    ///
    /// Applies to the whole traversal. Configuration errors
    /// ([`EnumError::InvalidPattern`], [`EnumError::InvalidPath`]) are still
    /// reported by [`build()`](EnumerationBuilder::build).
    pub fn continue_on_exception(mut self, yes: bool) -> Self {
        self.options.continue_on_exception = yes;
        self
    }

    // ── Filters ───────────────────────────────────────────────────────────

    /// Yield files. If both files and directories are switched off, both
    /// are yielded.
    pub fn files(mut self, yes: bool) -> Self {
        self.options.include_files = yes;
        self
    }

    /// Yield directories. If both files and directories are switched off,
    /// both are yielded.
    pub fn directories(mut self, yes: bool) -> Self {
        self.options.include_directories = yes;
        self
    }

    /// Shorthand for `.files(true).directories(false)`.
    pub fn files_only(self) -> Self {
        self.files(true).directories(false)
    }

    /// Shorthand for `.files(false).directories(true)`.
    pub fn directories_only(self) -> Self {
        self.files(false).directories(true)
    }

    /// DOS wildcard filter on entry names (`*` and `?`). Defaults to `"*"`.
    ///
    /// `?` matches zero or one character. The filter only decides what is
    /// yielded; recursion still visits every subdirectory.
    pub fn search_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.options.search_pattern = pattern.into();
        self
    }

    // ── Output ────────────────────────────────────────────────────────────

    /// What to yield per entry. Defaults to [`OutputShape::Path`].
    pub fn output(mut self, shape: OutputShape) -> Self {
        self.options.output = shape;
        self
    }

    /// Yield paths in long-path-safe form rather than regular form.
    pub fn as_long_path(mut self, yes: bool) -> Self {
        self.options.as_long_path = yes;
        self
    }

    // ── Native call ───────────────────────────────────────────────────────

    /// Ask the native call for a larger fetch buffer.
    pub fn large_fetch(mut self, yes: bool) -> Self {
        self.options.large_fetch = yes;
        self
    }

    /// Route every native call through the transacted primitive.
    pub fn transaction(mut self, transaction: Transaction) -> Self {
        self.transaction = Some(transaction);
        self
    }

    /// Replace the whole option set at once.
    pub fn options(mut self, options: EnumerationOptions) -> Self {
        self.options = options;
        self
    }

    // ── Collaborators ─────────────────────────────────────────────────────

    /// Use a different enumeration primitive. Defaults to [`StdFind`].
    pub fn native(mut self, native: impl NativeFind + 'static) -> Self {
        self.native = Arc::new(native);
        self
    }

    /// Use a different path resolver. Defaults to [`StdPathResolver`].
    pub fn resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Use a different metadata decoder. Defaults to [`StdMetadataDecoder`].
    pub fn decoder(mut self, decoder: impl MetadataDecoder + 'static) -> Self {
        self.decoder = Arc::new(decoder);
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Validate the configuration and create the lazy [`Traversal`].
    ///
    /// No native call is made until the traversal is first pulled.
    ///
    /// # Errors
    ///
    /// [`EnumError::InvalidPattern`] for an empty or blank search pattern,
    /// [`EnumError::InvalidPath`] when the root cannot be resolved.
    pub fn build(self) -> Result<Traversal, EnumError> {
        let matcher = matcher::compile(&self.options.search_pattern)?;
        let root = self.resolver.resolve(&self.root)?;

        Ok(Traversal::new(EngineParts {
            root,
            options:     self.options,
            transaction: self.transaction,
            matcher,
            native:      self.native,
            resolver:    self.resolver,
            decoder:     self.decoder,
        }))
    }

    /// Look up the root entry itself. See [`Traversal::get`].
    pub fn get(self) -> Result<Option<Found>, EnumError> {
        self.build()?.get()
    }
}
