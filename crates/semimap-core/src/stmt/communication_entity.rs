use super::{Element, Value};

use indexmap::IndexMap;

/// The storage-facing form of an entity: a named, ordered list of elements.
///
/// Element names are not forced to be unique. Lookups return the first
/// element with the given name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunicationEntity {
    name: String,
    elements: Vec<Element>,
}

impl CommunicationEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: vec![],
        }
    }

    pub fn with_elements(name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.elements.push(Element::new(name, value));
    }

    pub fn add_all(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.extend(elements);
    }

    /// Replaces the first element with the same name, or appends it.
    pub fn set(&mut self, element: Element) {
        match self.elements.iter_mut().find(|e| e.name == element.name) {
            Some(existing) => existing.value = element.value,
            None => self.elements.push(element),
        }
    }

    /// Removes every element with the given name. Returns `true` if any was
    /// removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.name != name);
        before != self.elements.len()
    }

    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    pub fn find_value(&self, name: &str) -> Option<&Value> {
        self.find(name).map(|e| &e.value)
    }

    /// Resolves a dotted path through nested sub-entities and maps.
    pub fn find_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.find_value(segments.next()?)?;

        for segment in segments {
            current = match current {
                Value::Entity(elements) => &elements.iter().find(|e| e.name == segment)?.value,
                Value::Map(map) => map.get(segment)?,
                _ => return None,
            };
        }

        Some(current)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.elements.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Keeps only the elements whose names appear in `columns`. An empty
    /// projection keeps everything.
    pub fn project(&mut self, columns: &[String]) {
        if !columns.is_empty() {
            self.elements.retain(|e| columns.iter().any(|c| *c == e.name));
        }
    }

    pub fn to_map(&self) -> IndexMap<String, Value> {
        self.elements
            .iter()
            .map(|e| (e.name.clone(), e.value.clone()))
            .collect()
    }
}
