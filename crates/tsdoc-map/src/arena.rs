//! Index-addressed storage for resolved nodes.
//!
//! Resolution allocates a slot before it recurses into children, so cyclic
//! edges point back at a slot that is filled in later via [`Arena::replace`].

use std::marker::PhantomData;

/// A typed index into an [`Arena`]
pub trait ArenaRef: Copy {
    fn from_index(index: u32) -> Self;
    fn index(self) -> usize;
}

/// Arena-based storage. Nodes are stored contiguously and referenced by index.
#[derive(Debug, Clone)]
pub struct Arena<R, T> {
    nodes: Vec<T>,
    _ref: PhantomData<R>,
}

impl<R: ArenaRef, T> Default for Arena<R, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ArenaRef, T> Arena<R, T> {
    pub fn new() -> Self {
        Arena {
            nodes: Vec::new(),
            _ref: PhantomData,
        }
    }

    /// Add a node to the arena and return its reference
    pub fn alloc(&mut self, node: T) -> R {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        R::from_index(index)
    }

    /// Get a node
    ///
    /// References are only minted by `alloc`, so every reference is in bounds
    /// for the arena that produced it.
    pub fn get(&self, r: R) -> &T {
        &self.nodes[r.index()]
    }

    /// Get a node if `r` belongs to this arena
    pub fn try_get(&self, r: R) -> Option<&T> {
        self.nodes.get(r.index())
    }

    pub fn get_mut(&mut self, r: R) -> &mut T {
        &mut self.nodes[r.index()]
    }

    /// Replace a node, returning the old one
    pub fn replace(&mut self, r: R, node: T) -> T {
        std::mem::replace(&mut self.nodes[r.index()], node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (R, &T)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (R::from_index(i as u32), node))
    }
}

/// Declare a `Copy` newtype reference for an arena
macro_rules! arena_ref {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::arena::ArenaRef for $name {
            fn from_index(index: u32) -> Self {
                $name(index)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

pub(crate) use arena_ref;
