//! Injective mapping from external node identifiers to dense indices.
//!
//! Mesh formats label nodes with arbitrary ids; topology works on
//! `0..node_count`. Readers register ids in file order and resolve cell
//! connectivity through the map before building a [`MeshData`](super::MeshData).

use crate::mesh_error::MeshError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::hash::Hash;

/// Dense index assignment for external node ids, in registration order.
#[derive(Clone, Debug)]
pub struct NodeIdMap<K = String> {
    index_of: HashMap<K, usize>,
    external: Vec<K>,
}

impl<K> Default for NodeIdMap<K> {
    fn default() -> Self {
        Self {
            index_of: HashMap::new(),
            external: Vec::new(),
        }
    }
}

impl<K> NodeIdMap<K>
where
    K: Clone + Eq + Hash + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` and return its dense index.
    ///
    /// Registering the same id twice is an error: the mapping must stay
    /// injective.
    pub fn insert(&mut self, id: K) -> Result<usize, MeshError> {
        let next = self.external.len();
        match self.index_of.entry(id) {
            Entry::Occupied(e) => Err(MeshError::DuplicateNodeId(e.key().to_string())),
            Entry::Vacant(e) => {
                self.external.push(e.key().clone());
                e.insert(next);
                Ok(next)
            }
        }
    }

    #[inline]
    pub fn get(&self, id: &K) -> Option<usize> {
        self.index_of.get(id).copied()
    }

    pub fn resolve(&self, id: &K) -> Result<usize, MeshError> {
        self.get(id)
            .ok_or_else(|| MeshError::UnknownNodeId(id.to_string()))
    }

    /// Resolve the four corners of a cell.
    pub fn resolve_quad(&self, ids: &[K; 4]) -> Result<[usize; 4], MeshError> {
        Ok([
            self.resolve(&ids[0])?,
            self.resolve(&ids[1])?,
            self.resolve(&ids[2])?,
            self.resolve(&ids[3])?,
        ])
    }

    /// External id registered at dense index `index`.
    #[inline]
    pub fn external(&self, index: usize) -> Option<&K> {
        self.external.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.external.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.external.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_indices_follow_registration_order() {
        let mut ids = NodeIdMap::new();
        assert_eq!(ids.insert("101".to_string()).unwrap(), 0);
        assert_eq!(ids.insert("7".to_string()).unwrap(), 1);
        assert_eq!(ids.insert("55".to_string()).unwrap(), 2);
        assert_eq!(ids.get(&"7".to_string()), Some(1));
        assert_eq!(ids.external(2).map(String::as_str), Some("55"));
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn duplicate_and_unknown_ids_are_errors() {
        let mut ids: NodeIdMap<u64> = NodeIdMap::new();
        ids.insert(10).unwrap();
        assert_eq!(
            ids.insert(10).unwrap_err(),
            MeshError::DuplicateNodeId("10".into())
        );
        assert_eq!(ids.len(), 1);
        assert_eq!(
            ids.resolve_quad(&[10, 10, 10, 11]).unwrap_err(),
            MeshError::UnknownNodeId("11".into())
        );
    }
}
