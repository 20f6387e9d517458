//! Binding registry and configuration.
//!
//! A [`DtypeRegistry`] owns everything the binding entry points consult:
//! the configuration, the recognizer list, the foreign interop hooks, named
//! custom dtypes and a cache of parsed notation. It is immutable once built
//! apart from the cache, so one registry can be shared by `Arc`.

use std::fmt;
use std::sync::Arc;

use ndt_types::{DateUnit, Dtype, DtypeError, StringEncoding};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::recognize::{default_recognizers, Context};
use crate::{ForeignInterop, Recognizer, Result, TypestrInterop};

/// Binding configuration.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BindConfig {
    /// Encoding for deduced text that is not pure ASCII.
    pub wide_encoding: StringEncoding,
    /// Unit used when `make_date` gets no unit.
    pub default_date_unit: DateUnit,
}

impl Default for BindConfig {
    fn default() -> Self {
        BindConfig {
            wide_encoding: StringEncoding::Utf32,
            default_date_unit: DateUnit::Day,
        }
    }
}

impl BindConfig {
    /// Check that the wide encoding can hold any text.
    pub fn validate(&self) -> Result<(), DtypeError> {
        match self.wide_encoding {
            StringEncoding::Utf8 | StringEncoding::Utf16 | StringEncoding::Utf32 => Ok(()),
            other => Err(DtypeError::InvalidEncoding {
                token: other.token().to_string(),
            }),
        }
    }
}

/// Registry of binding state.
pub struct DtypeRegistry {
    config: BindConfig,
    recognizers: Vec<Arc<dyn Recognizer>>,
    interops: Vec<Arc<dyn ForeignInterop>>,
    names: FxHashMap<String, Dtype>,
    parse_cache: RwLock<FxHashMap<String, Dtype>>,
}

impl DtypeRegistry {
    /// A registry with the default configuration, recognizers and interop.
    pub fn new() -> Self {
        DtypeRegistry {
            config: BindConfig::default(),
            recognizers: default_recognizers(),
            interops: vec![Arc::new(TypestrInterop)],
            names: FxHashMap::default(),
            parse_cache: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn builder() -> DtypeRegistryBuilder {
        DtypeRegistryBuilder::new()
    }

    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    pub fn recognizers(&self) -> &[Arc<dyn Recognizer>] {
        &self.recognizers
    }

    pub fn interops(&self) -> &[Arc<dyn ForeignInterop>] {
        &self.interops
    }

    /// Look up a named custom dtype.
    pub fn custom(&self, name: &str) -> Option<&Dtype> {
        self.names.get(name)
    }

    pub(crate) fn context(&self) -> Context<'_> {
        Context {
            config: &self.config,
            interops: &self.interops,
        }
    }

    /// Parse dtype notation, resolving custom names.
    ///
    /// Successful parses are cached by their source text.
    pub fn parse(&self, text: &str) -> Result<Dtype> {
        // Fast path: already parsed
        {
            let guard = self.parse_cache.read();
            if let Some(dtype) = guard.get(text) {
                return Ok(dtype.clone());
            }
        }

        tracing::debug!(text, "dtype parse cache miss");
        let dtype = ndt_parse::parse_dtype_with(text, &self.names)?;

        let mut guard = self.parse_cache.write();
        // Double-check after acquiring write lock
        if let Some(existing) = guard.get(text) {
            return Ok(existing.clone());
        }
        guard.insert(text.to_string(), dtype.clone());
        Ok(dtype)
    }

    /// Number of cached parses.
    pub fn cached_parses(&self) -> usize {
        self.parse_cache.read().len()
    }
}

impl Default for DtypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DtypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recognizers: Vec<&str> = self.recognizers.iter().map(|r| r.name()).collect();
        f.debug_struct("DtypeRegistry")
            .field("config", &self.config)
            .field("recognizers", &recognizers)
            .field("interops", &self.interops.len())
            .field("names", &self.names.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Builder for [`DtypeRegistry`].
pub struct DtypeRegistryBuilder {
    config: BindConfig,
    recognizers: Vec<Arc<dyn Recognizer>>,
    interops: Vec<Arc<dyn ForeignInterop>>,
    names: FxHashMap<String, Dtype>,
}

impl DtypeRegistryBuilder {
    fn new() -> Self {
        DtypeRegistryBuilder {
            config: BindConfig::default(),
            recognizers: default_recognizers(),
            interops: vec![Arc::new(TypestrInterop)],
            names: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: BindConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn wide_encoding(mut self, encoding: StringEncoding) -> Self {
        self.config.wide_encoding = encoding;
        self
    }

    #[must_use]
    pub fn date_unit(mut self, unit: DateUnit) -> Self {
        self.config.default_date_unit = unit;
        self
    }

    /// Append a recognizer after the existing ones.
    #[must_use]
    pub fn recognizer(mut self, recognizer: impl Recognizer + 'static) -> Self {
        self.recognizers.push(Arc::new(recognizer));
        self
    }

    /// Replace the whole recognizer list.
    #[must_use]
    pub fn recognizers(mut self, recognizers: Vec<Arc<dyn Recognizer>>) -> Self {
        self.recognizers = recognizers;
        self
    }

    /// Append a foreign interop hook after the existing ones.
    #[must_use]
    pub fn interop(mut self, interop: impl ForeignInterop + 'static) -> Self {
        self.interops.push(Arc::new(interop));
        self
    }

    /// Make `dtype` available under `name` in parsed notation.
    #[must_use]
    pub fn custom_dtype(mut self, name: impl Into<String>, dtype: Dtype) -> Self {
        self.names.insert(name.into(), dtype);
        self
    }

    pub fn build(self) -> Result<DtypeRegistry> {
        self.config.validate()?;
        tracing::debug!(
            wide_encoding = self.config.wide_encoding.token(),
            date_unit = self.config.default_date_unit.token(),
            recognizers = self.recognizers.len(),
            interops = self.interops.len(),
            names = self.names.len(),
            "built dtype registry"
        );
        Ok(DtypeRegistry {
            config: self.config,
            recognizers: self.recognizers,
            interops: self.interops,
            names: self.names,
            parse_cache: RwLock::new(FxHashMap::default()),
        })
    }
}
