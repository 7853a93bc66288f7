//! Lexical scope trees.
//!
//! One [`ScopeTree`] exists per file. Scopes live in an arena and refer to
//! each other by [`ScopeId`]: a child stores its parent's id, a parent keeps
//! the ids of its children in declaration order.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::symbol_table::SymbolDefinition;
use crate::base::{Position, Range};

/// Index of a scope inside its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Class,
    Method,
    Block,
    Closure,
}

#[derive(Debug, Clone)]
struct ScopeData {
    kind: ScopeKind,
    parent: Option<ScopeId>,
    range: Range,
    name: Option<String>,
    /// Last write per name wins
    symbols: FxHashMap<String, Arc<SymbolDefinition>>,
    /// Insertion order of `symbols`, for stable listings
    order: Vec<String>,
    children: Vec<ScopeId>,
}

/// Arena of scopes rooted at a single [`ScopeKind::Global`] scope.
///
/// A scope's range is expected to contain the ranges of all its children;
/// this is not checked.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
}

impl ScopeTree {
    /// A tree holding only a global root spanning `range`.
    pub fn new(range: Range) -> Self {
        Self {
            scopes: vec![ScopeData {
                kind: ScopeKind::Global,
                parent: None,
                range,
                name: None,
                symbols: FxHashMap::default(),
                order: Vec::new(),
                children: Vec::new(),
            }],
        }
    }

    /// A root covering any position in a file.
    pub fn for_file() -> Self {
        Self::new(Range::from_coords(0, 0, u32::MAX, 0))
    }

    pub fn root(&self) -> ScopeRef<'_> {
        self.scope(ScopeId::ROOT)
    }

    /// # Panics
    ///
    /// If `id` does not belong to this tree.
    pub fn scope(&self, id: ScopeId) -> ScopeRef<'_> {
        assert!(id.index() < self.scopes.len(), "scope {id:?} is not in this tree");
        ScopeRef { tree: self, id }
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Create a child scope and append it to `parent`'s children.
    pub fn add_scope(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
        range: Range,
        name: Option<String>,
    ) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(ScopeData {
            kind,
            parent: Some(parent),
            range,
            name,
            symbols: FxHashMap::default(),
            order: Vec::new(),
            children: Vec::new(),
        });
        self.scopes[parent.index()].children.push(id);
        id
    }

    /// Store `definition` in `scope` under its simple name, replacing any
    /// earlier entry with the same name.
    pub fn add_symbol(&mut self, scope: ScopeId, definition: impl Into<Arc<SymbolDefinition>>) {
        let definition = definition.into();
        let data = &mut self.scopes[scope.index()];
        if data
            .symbols
            .insert(definition.name.clone(), Arc::clone(&definition))
            .is_none()
        {
            data.order.push(definition.name.clone());
        }
    }

    /// Look `name` up in `scope`, then in each ancestor; the innermost hit wins.
    pub fn find_symbol(&self, scope: ScopeId, name: &str) -> Option<&Arc<SymbolDefinition>> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = &self.scopes[id.index()];
            if let Some(found) = data.symbols.get(name) {
                return Some(found);
            }
            current = data.parent;
        }
        None
    }

    pub fn find_local_symbol(&self, scope: ScopeId, name: &str) -> Option<&Arc<SymbolDefinition>> {
        self.scopes[scope.index()].symbols.get(name)
    }

    /// The deepest scope under `scope` containing `position`.
    ///
    /// Children are tried in declaration order and the first match wins.
    pub fn find_scope_at(&self, scope: ScopeId, position: Position) -> Option<ScopeId> {
        let data = &self.scopes[scope.index()];
        if !data.range.contains(position) {
            return None;
        }
        data.children
            .iter()
            .find_map(|&child| self.find_scope_at(child, position))
            .or(Some(scope))
    }

    /// Local symbols of `scope` followed by those of every ancestor.
    ///
    /// Shadowed names appear more than once; use [`Self::find_symbol`] for
    /// resolution.
    pub fn available_symbols(&self, scope: ScopeId) -> Vec<&Arc<SymbolDefinition>> {
        let mut out = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = &self.scopes[id.index()];
            out.extend(data.order.iter().filter_map(|name| data.symbols.get(name)));
            current = data.parent;
        }
        out
    }
}

/// A borrowed view of one scope.
#[derive(Clone, Copy)]
pub struct ScopeRef<'a> {
    tree: &'a ScopeTree,
    id: ScopeId,
}

impl<'a> ScopeRef<'a> {
    fn data(&self) -> &'a ScopeData {
        &self.tree.scopes[self.id.index()]
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn kind(&self) -> ScopeKind {
        self.data().kind
    }

    pub fn range(&self) -> Range {
        self.data().range
    }

    pub fn name(&self) -> Option<&'a str> {
        self.data().name.as_deref()
    }

    pub fn parent(&self) -> Option<ScopeRef<'a>> {
        self.data().parent.map(|id| self.tree.scope(id))
    }

    pub fn children(self) -> impl Iterator<Item = ScopeRef<'a>> + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.scope(id))
    }

    pub fn find_symbol(&self, name: &str) -> Option<&'a Arc<SymbolDefinition>> {
        self.tree.find_symbol(self.id, name)
    }

    pub fn find_local_symbol(&self, name: &str) -> Option<&'a Arc<SymbolDefinition>> {
        self.tree.find_local_symbol(self.id, name)
    }

    pub fn find_scope_at(&self, position: Position) -> Option<ScopeRef<'a>> {
        self.tree
            .find_scope_at(self.id, position)
            .map(|id| self.tree.scope(id))
    }

    pub fn available_symbols(&self) -> Vec<&'a Arc<SymbolDefinition>> {
        self.tree.available_symbols(self.id)
    }

    /// Local symbols in insertion order.
    pub fn local_symbols(self) -> impl Iterator<Item = &'a Arc<SymbolDefinition>> + 'a {
        let data = self.data();
        data.order.iter().filter_map(move |name| data.symbols.get(name))
    }
}

impl std::fmt::Debug for ScopeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("range", &self.range())
            .finish()
    }
}
