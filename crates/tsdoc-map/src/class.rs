//! Class and interface definitions
//!
//! A class owns two member lists: `members` from its export table (statics)
//! and `instance_members` from its member table (prototype members).
//! Members reachable only through a base type are not duplicated; they are
//! listed in `extended_members` as weak references to the base member.

use crate::node::MemberRef;
use crate::ts_type_params::DocTypeParameter;
use crate::types::TypeRef;
use serde::{Deserialize, Serialize};

/// Class or interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
}

/// Class definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassDef {
    pub kind: ClassKind,

    pub type_parameters: Vec<DocTypeParameter>,

    /// Base types; at most one for classes
    pub extends: Vec<TypeRef>,

    /// `implements` clause (classes only)
    pub implements: Vec<TypeRef>,

    /// Own static members, in declaration order
    pub members: Vec<MemberRef>,

    /// Own instance members, in declaration order
    pub instance_members: Vec<MemberRef>,

    /// Inherited instance members (weak)
    pub extended_members: Vec<MemberRef>,

    pub constructor: Option<MemberRef>,

    pub indexer: Option<MemberRef>,

    /// Construct signature of an interface
    pub new_signature: Option<MemberRef>,
}

impl ClassDef {
    pub fn new(kind: ClassKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Owned members: statics, instance members and signature slots
    pub fn owned_members(&self) -> impl Iterator<Item = MemberRef> + '_ {
        self.members
            .iter()
            .chain(&self.instance_members)
            .copied()
            .chain(self.constructor)
            .chain(self.indexer)
            .chain(self.new_signature)
    }
}
