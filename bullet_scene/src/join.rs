// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data joins: reconciling existing elements against a new array of data.
//!
//! A join splits the world into three disjoint parts:
//! - **enter**: data positions with no matching element,
//! - **update**: elements matched to a data position,
//! - **exit**: elements with no matching data position.
//!
//! Matching is either positional ([`join_indexed`]) or by key ([`join_keyed`]).

extern crate alloc;

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::NodeId;

/// The result of reconciling elements against data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Join {
    /// Data indices that need a new element, in data order.
    pub enter: Vec<usize>,
    /// Existing elements paired with their new data index, in data order.
    pub update: Vec<(NodeId, usize)>,
    /// Existing elements with no data, in element order.
    pub exit: Vec<NodeId>,
}

impl Join {
    /// Whether nothing enters or exits.
    pub fn is_stable(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Matches element `i` with datum `i`.
pub fn join_indexed(nodes: &[NodeId], len: usize) -> Join {
    let matched = nodes.len().min(len);
    Join {
        enter: (matched..len).collect(),
        update: nodes[..matched].iter().copied().zip(0..matched).collect(),
        exit: nodes[matched..].to_vec(),
    }
}

/// Matches elements and data that share a key.
///
/// The first element carrying a key claims the first datum with that key. Later elements with
/// an already-seen key exit, and later data with an already-claimed key enter.
pub fn join_keyed<K: Eq + Hash>(
    nodes: impl IntoIterator<Item = (NodeId, K)>,
    keys: impl IntoIterator<Item = K>,
) -> Join {
    let mut all = Vec::new();
    let mut by_key: HashMap<K, NodeId> = HashMap::new();
    for (node, key) in nodes {
        all.push(node);
        by_key.entry(key).or_insert(node);
    }

    let mut enter = Vec::new();
    let mut update = Vec::new();
    let mut claimed = HashSet::new();
    for (i, key) in keys.into_iter().enumerate() {
        match by_key.remove(&key) {
            Some(node) => {
                claimed.insert(node);
                update.push((node, i));
            }
            None => enter.push(i),
        }
    }

    let exit = all.into_iter().filter(|n| !claimed.contains(n)).collect();
    Join {
        enter,
        update,
        exit,
    }
}
