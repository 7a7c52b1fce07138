use serde::{Deserialize, Serialize};

use crate::foundation::error::{PlateError, PlateResult};
use crate::model::element::{Element, ElementId, ElementPatch};

/// Ordered element list, back to front. The single source of truth for editor content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementList {
    items: Vec<Element>,
}

impl ElementList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing elements, validating each one and rejecting duplicate ids.
    pub fn from_elements(items: Vec<Element>) -> PlateResult<Self> {
        let mut list = Self::new();
        for el in items {
            list.push(el)?;
        }
        Ok(list)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements back to front.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.items.iter()
    }

    /// Elements back to front, as a slice.
    pub fn as_slice(&self) -> &[Element] {
        &self.items
    }

    /// Look up an element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.items.iter().find(|e| e.id == id)
    }

    /// `true` when `id` is present.
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn push(&mut self, el: Element) -> PlateResult<()> {
        el.kind.validate()?;
        if self.contains(el.id) {
            return Err(PlateError::validation(format!("duplicate element id {}", el.id)));
        }
        self.items.push(el);
        Ok(())
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> PlateResult<&mut Element> {
        self.items
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(PlateError::UnknownElement(id))
    }

    pub(crate) fn update(&mut self, id: ElementId, patch: &ElementPatch) -> PlateResult<()> {
        patch.apply(self.get_mut(id)?)
    }

    pub(crate) fn remove(&mut self, id: ElementId) -> PlateResult<Element> {
        let idx = self
            .items
            .iter()
            .position(|e| e.id == id)
            .ok_or(PlateError::UnknownElement(id))?;
        Ok(self.items.remove(idx))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/store.rs"]
mod tests;
