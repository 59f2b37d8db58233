//! Directed multigraph container.
//!
//! Node and edge storage is a pair of insertion-ordered vectors with hash indexes on the side.
//! Per-node adjacency lists hold edge indices in insertion order so `out_edges` / `in_edges`
//! don't scan the whole edge list.

mod edge_key;

pub use edge_key::EdgeKey;
use edge_key::EdgeKeyView;

use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphOptions {
    /// Keep edge names, allowing several edges between the same pair of nodes.
    pub multigraph: bool,
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    key: EdgeKey,
    v_ix: usize,
    w_ix: usize,
    label: E,
}

#[derive(Debug, Clone)]
pub struct Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    options: GraphOptions,

    graph_label: G,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: G::default(),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
        }
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        self.set_node(id, N::default())
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.nodes[idx].label)
    }

    /// Position of `id` in insertion order.
    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &N),
    {
        for n in &self.nodes {
            f(&n.id, &n.label);
        }
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut N),
    {
        for n in &mut self.nodes {
            f(&n.id, &mut n.label);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn for_each_edge_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&EdgeKey, &mut E),
    {
        for e in &mut self.edges {
            f(&e.key, &mut e.label);
        }
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, Some(label))
    }

    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> &mut Self {
        let v = v.into();
        let w = w.into();
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        let name = if self.options.multigraph {
            name.map(Into::into)
        } else {
            None
        };
        let key = EdgeKey { v, w, name };

        if let Some(&idx) = self.edge_index.get(&key) {
            if let Some(label) = label {
                self.edges[idx].label = label;
            }
            return self;
        }

        let (Some(v_ix), Some(w_ix)) = (self.node_ix(&key.v), self.node_ix(&key.w)) else {
            return self;
        };
        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            label: label.unwrap_or_default(),
        });
        self.edge_index.insert(key, idx);
        self.out_adj[v_ix].push(idx);
        self.in_adj[w_ix].push(idx);
        self
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E) -> &mut Self {
        self.set_edge_named(key.v, key.w, key.name, Some(label))
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    fn edge_ix(&self, v: &str, w: &str, name: Option<&str>) -> Option<usize> {
        let view = EdgeKeyView {
            v,
            w,
            name: if self.options.multigraph { name } else { None },
        };
        self.edge_index.get(&view).copied()
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edge_ix(v, w, name).is_some()
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        self.edge_ix(v, w, name).map(|idx| &self.edges[idx].label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        self.edge_ix(v, w, name)
            .map(move |idx| &mut self.edges[idx].label)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge_index.get(key).map(|&idx| &self.edges[idx].label)
    }

    /// Removes the edge and returns its label.
    pub fn remove_edge_key(&mut self, key: &EdgeKey) -> Option<E> {
        let idx = self.edge_index.remove(key)?;
        let entry = self.edges.remove(idx);
        self.reindex_edges();
        Some(entry.label)
    }

    /// Keeps the nodes for which `keep` returns true and drops edges touching the rest. Indexes
    /// are rebuilt once however many nodes go.
    pub fn retain_nodes<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &N) -> bool,
    {
        let mut remap: Vec<Option<usize>> = Vec::with_capacity(self.nodes.len());
        let mut kept = 0usize;
        for n in &self.nodes {
            if keep(&n.id, &n.label) {
                remap.push(Some(kept));
                kept += 1;
            } else {
                remap.push(None);
            }
        }
        if kept == self.nodes.len() {
            return;
        }

        let mut ix = 0usize;
        self.nodes.retain(|_| {
            let keep = remap[ix].is_some();
            ix += 1;
            keep
        });
        self.node_index.clear();
        for (i, n) in self.nodes.iter().enumerate() {
            self.node_index.insert(n.id.clone(), i);
        }

        self.edges
            .retain_mut(|e| match (remap[e.v_ix], remap[e.w_ix]) {
                (Some(v), Some(w)) => {
                    e.v_ix = v;
                    e.w_ix = w;
                    true
                }
                _ => false,
            });
        self.out_adj.truncate(kept);
        self.in_adj.truncate(kept);
        self.reindex_edges();
    }

    fn reindex_edges(&mut self) {
        self.edge_index.clear();
        for adj in self.out_adj.iter_mut().chain(self.in_adj.iter_mut()) {
            adj.clear();
        }
        for (i, e) in self.edges.iter().enumerate() {
            self.edge_index.insert(e.key.clone(), i);
            self.out_adj[e.v_ix].push(i);
            self.in_adj[e.w_ix].push(i);
        }
    }

    /// Outgoing edges of `v` in insertion order, optionally restricted to those ending at `w`.
    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        self.out_adj[v_ix]
            .iter()
            .map(|&i| &self.edges[i].key)
            .filter(|k| w.is_none_or(|w| k.w == w))
            .cloned()
            .collect()
    }

    /// Incoming edges of `v` in insertion order, optionally restricted to those starting at `u`.
    pub fn in_edges(&self, v: &str, u: Option<&str>) -> Vec<EdgeKey> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        self.in_adj[v_ix]
            .iter()
            .map(|&i| &self.edges[i].key)
            .filter(|k| u.is_none_or(|u| k.v == u))
            .cloned()
            .collect()
    }

    /// Distinct successors of `v` in first-edge order.
    pub fn successors(&self, v: &str) -> Vec<&str> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::new();
        for &i in &self.out_adj[v_ix] {
            let w = self.nodes[self.edges[i].w_ix].id.as_str();
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }

    /// Distinct predecessors of `v` in first-edge order.
    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::new();
        for &i in &self.in_adj[v_ix] {
            let u = self.nodes[self.edges[i].v_ix].id.as_str();
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    /// Nodes without incoming edges, in insertion order.
    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .zip(&self.in_adj)
            .filter(|(_, adj)| adj.is_empty())
            .map(|(n, _)| n.id.as_str())
            .collect()
    }

    /// Nodes without outgoing edges, in insertion order.
    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .zip(&self.out_adj)
            .filter(|(_, adj)| adj.is_empty())
            .map(|(n, _)| n.id.as_str())
            .collect()
    }
}
