//! Converter functions for parameters with custom semantic types.
//!
//! Synchronous and asynchronous converters share one interface: a
//! synchronous converter is simply one whose future never suspends.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::future::Future;

use super::ConversionError;

/// Converts a raw option value into the value a handler expects.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Converts `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] when the input is not acceptable.
    async fn convert(&self, raw: Value) -> Result<Value, ConversionError>;
}

/// Adapts a plain function into a [`Converter`].
pub struct SyncConverter<F>(F);

impl<F> SyncConverter<F>
where
    F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync,
{
    /// Wraps `convert`.
    pub const fn new(convert: F) -> Self {
        Self(convert)
    }
}

#[async_trait]
impl<F> Converter for SyncConverter<F>
where
    F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync,
{
    async fn convert(&self, raw: Value) -> Result<Value, ConversionError> {
        (self.0)(raw)
    }
}

impl<F> fmt::Debug for SyncConverter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SyncConverter")
    }
}

/// Adapts a function returning a future into a [`Converter`].
pub struct AsyncConverter<F>(F);

impl<F, Fut> AsyncConverter<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ConversionError>> + Send,
{
    /// Wraps `convert`.
    pub const fn new(convert: F) -> Self {
        Self(convert)
    }
}

#[async_trait]
impl<F, Fut> Converter for AsyncConverter<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ConversionError>> + Send,
{
    async fn convert(&self, raw: Value) -> Result<Value, ConversionError> {
        (self.0)(raw).await
    }
}

impl<F> fmt::Debug for AsyncConverter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncConverter")
    }
}
