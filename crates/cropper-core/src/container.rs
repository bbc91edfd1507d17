//! Resolution of the hosting element into fixed container dimensions.

use std::collections::HashMap;

use crate::error::{CropperError, Result};
use crate::geometry::Size;

/// Something that can answer "how big is the element matching this selector".
pub trait ElementLookup {
    fn element_size(&self, selector: &str) -> Option<Size>;
}

/// Selector table for hosts without a live document (CLI, tests).
#[derive(Clone, Debug, Default)]
pub struct StaticLayout {
    elements: HashMap<String, Size>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, selector: impl Into<String>, size: Size) -> Self {
        self.elements.insert(selector.into(), size);
        self
    }
}

impl ElementLookup for StaticLayout {
    fn element_size(&self, selector: &str) -> Option<Size> {
        self.elements.get(selector).copied()
    }
}

/// How the caller identifies the container: a selector or an element whose size is known.
#[derive(Clone, Debug, PartialEq)]
pub enum ContainerRef {
    Selector(String),
    Element(Size),
}

impl ContainerRef {
    /// Capture the container's dimensions. Fails for unknown selectors and
    /// for elements without a positive size.
    pub fn resolve(&self, lookup: &impl ElementLookup) -> Result<Size> {
        let size = match self {
            Self::Selector(selector) => {
                if selector.trim().is_empty() {
                    return Err(CropperError::Configuration("empty container selector".into()));
                }
                lookup.element_size(selector).ok_or_else(|| {
                    CropperError::Configuration(format!("invalid selector {selector} supplied"))
                })?
            }
            Self::Element(size) => *size,
        };

        if size.is_empty() || !size.width.is_finite() || !size.height.is_finite() {
            return Err(CropperError::Configuration(format!(
                "container has no usable size ({}x{})",
                size.width, size.height
            )));
        }
        Ok(size)
    }
}

impl From<Size> for ContainerRef {
    fn from(size: Size) -> Self {
        Self::Element(size)
    }
}

impl From<&str> for ContainerRef {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}
