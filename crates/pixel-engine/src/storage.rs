//! Ordered set of available filters.

use crate::{ColorCubeFilter, EngineError, EngineResult};

/// Filters in display order, addressable by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorCubeStorage {
    filters: Vec<ColorCubeFilter>,
}

impl ColorCubeStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidParameter`] if a filter with the same
    /// identifier is already stored.
    pub fn push(&mut self, filter: ColorCubeFilter) -> EngineResult<()> {
        if self.get(filter.identifier()).is_some() {
            return Err(EngineError::InvalidParameter(format!(
                "duplicate filter identifier '{}'",
                filter.identifier()
            )));
        }
        self.filters.push(filter);
        Ok(())
    }

    /// Looks a filter up by identifier.
    pub fn get(&self, identifier: &str) -> Option<&ColorCubeFilter> {
        self.filters.iter().find(|f| f.identifier() == identifier)
    }

    /// Filters in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColorCubeFilter> {
        self.filters.iter()
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if no filter is stored.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<'a> IntoIterator for &'a ColorCubeStorage {
    type Item = &'a ColorCubeFilter;
    type IntoIter = std::slice::Iter<'a, ColorCubeFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_core::ColorSpaceId;
    use pixel_lut::LutTable;

    fn filter(id: &str) -> ColorCubeFilter {
        ColorCubeFilter::new(id, id, LutTable::identity(2).unwrap(), 2, ColorSpaceId::Srgb).unwrap()
    }

    #[test]
    fn test_order_and_lookup() {
        let mut storage = ColorCubeStorage::new();
        assert!(storage.is_empty());
        storage.push(filter("b")).unwrap();
        storage.push(filter("a")).unwrap();

        assert_eq!(storage.len(), 2);
        let ids: Vec<_> = storage.iter().map(|f| f.identifier()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(storage.get("a").map(|f| f.name()), Some("a"));
        assert!(storage.get("c").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut storage = ColorCubeStorage::new();
        storage.push(filter("a")).unwrap();
        assert!(matches!(
            storage.push(filter("a")),
            Err(EngineError::InvalidParameter(_))
        ));
        assert_eq!(storage.len(), 1);
    }
}
