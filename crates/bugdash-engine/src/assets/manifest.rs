use std::collections::HashSet;

use super::AssetId;

/// Ordered set of asset identifiers a game needs before it can render.
///
/// Insertion order is preserved; repeated identifiers are kept only once, at
/// their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    ids: Vec<AssetId>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` unless it is already declared. Returns whether it was added.
    pub fn insert(&mut self, id: impl Into<AssetId>) -> bool {
        let id = id.into();
        if self.contains(id.as_str()) {
            log::debug!("asset `{id}` declared twice; keeping first entry");
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, id: impl Into<AssetId>) -> Self {
        self.insert(id);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetId> {
        self.ids.iter()
    }
}

impl<I> FromIterator<I> for AssetManifest
where
    I: Into<AssetId>,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        let mut seen = HashSet::new();
        let ids = iter
            .into_iter()
            .map(Into::into)
            .filter(|id: &AssetId| seen.insert(id.clone()))
            .collect();
        Self { ids }
    }
}

impl<'a> IntoIterator for &'a AssetManifest {
    type Item = &'a AssetId;
    type IntoIter = std::slice::Iter<'a, AssetId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_declaration_order() {
        let m: AssetManifest = ["b.png", "a.png", "c.png"].into_iter().collect();
        let ids: Vec<&str> = m.iter().map(AssetId::as_str).collect();
        assert_eq!(ids, ["b.png", "a.png", "c.png"]);
    }

    #[test]
    fn duplicates_keep_first_position() {
        let m: AssetManifest = ["a.png", "b.png", "a.png"].into_iter().collect();
        assert_eq!(m.len(), 2);
        assert_eq!(m.iter().next().map(AssetId::as_str), Some("a.png"));
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut m = AssetManifest::new();
        assert!(m.insert("x.png"));
        assert!(!m.insert("x.png"));
        assert!(m.contains("x.png"));
        assert!(!m.contains("y.png"));
    }

    #[test]
    fn empty_manifest() {
        let m = AssetManifest::new();
        assert!(m.is_empty());
        assert_eq!(m.iter().count(), 0);
    }
}
