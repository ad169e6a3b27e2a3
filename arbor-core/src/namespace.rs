//! Nested namespace trees.
//!
//! A [`NamespaceTree`] maps namespace segments onto tagged nodes: a branch
//! of further segments or a leaf value. Two trees are built per load (raw
//! exports and resolved repositories) and always share the same shape
//! because they are folded from the same item list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{LoaderError, Result};
use crate::names::NamespacePath;

/// One level of a namespace: an inner mapping or a leaf value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node<T> {
    Branch(BTreeMap<String, Node<T>>),
    Leaf(T),
}

impl<T> Node<T> {
    pub fn as_branch(&self) -> Option<&BTreeMap<String, Node<T>>> {
        match self {
            Node::Branch(children) => Some(children),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }
}

/// Nested mapping from namespace segments to leaf values.
///
/// Serializes as plain nested maps, so an exports tree renders as
/// `{"group":{"Repository":...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NamespaceTree<T> {
    root: BTreeMap<String, Node<T>>,
}

impl<T> NamespaceTree<T> {
    pub fn new() -> Self {
        Self {
            root: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Set the leaf at `path`, creating intermediate branches on demand.
    ///
    /// Writing the same leaf path twice silently overwrites (callers own
    /// path uniqueness). Using a path both as a branch prefix and as a leaf
    /// is a layout conflict and is rejected.
    pub fn insert(&mut self, path: &NamespacePath, value: T) -> Result<()> {
        let segments = path.segments();
        let Some((last, prefix)) = segments.split_last() else {
            // NamespacePath construction guarantees at least one segment.
            return Ok(());
        };

        let mut current = &mut self.root;
        for segment in prefix {
            let node = current
                .entry(segment.clone())
                .or_insert_with(|| Node::Branch(BTreeMap::new()));
            match node {
                Node::Branch(children) => current = children,
                Node::Leaf(_) => {
                    return Err(LoaderError::ShapeConflict {
                        path: path.to_string(),
                    });
                }
            }
        }

        if let Some(Node::Branch(_)) = current.get(last) {
            return Err(LoaderError::ShapeConflict {
                path: path.to_string(),
            });
        }
        current.insert(last.clone(), Node::Leaf(value));
        Ok(())
    }

    /// Node at the given segment path, if any.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node<T>> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(first.as_ref())?;
        for segment in rest {
            node = node.as_branch()?.get(segment.as_ref())?;
        }
        Some(node)
    }

    /// Leaf value at the given segment path, if any.
    pub fn leaf<S: AsRef<str>>(&self, path: &[S]) -> Option<&T> {
        self.get(path)?.as_leaf()
    }

    /// Every leaf path in the tree, in segment order.
    pub fn leaf_paths(&self) -> Vec<Vec<String>> {
        fn walk<T>(
            nodes: &BTreeMap<String, Node<T>>,
            prefix: &mut Vec<String>,
            out: &mut Vec<Vec<String>>,
        ) {
            for (segment, node) in nodes {
                prefix.push(segment.clone());
                match node {
                    Node::Leaf(_) => out.push(prefix.clone()),
                    Node::Branch(children) => walk(children, prefix, out),
                }
                prefix.pop();
            }
        }

        let mut out = Vec::new();
        walk(&self.root, &mut Vec::new(), &mut out);
        out
    }
}

impl<T> Default for NamespaceTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
