//! Shared ownership of decision trees across a protist population.
//!
//! Organisms hold a [`TreeId`] instead of a tree. Structurally identical
//! trees are stored once, so their ledgers and population counts are pooled.

use crate::config::PoolConfig;
use crate::error::{Result, TreeError};
use crate::tree::TreeLogic;
use protista_data::TreeNode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Handle to a tree owned by a [`TreePool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeId(pub u64);

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Arena of decision trees keyed by handle and deduplicated by identity.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TreePool<A, C> {
    trees: BTreeMap<TreeId, TreeNode<A, C>>,
    next_id: u64,
    prune_released: bool,
    #[serde(skip)]
    by_identity: HashMap<String, TreeId>,
}

impl<A, C> Default for TreePool<A, C> {
    fn default() -> Self {
        Self {
            trees: BTreeMap::new(),
            next_id: 0,
            prune_released: true,
            by_identity: HashMap::new(),
        }
    }
}

impl<A: Display, C: Display> TreePool<A, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &PoolConfig) -> Self {
        Self {
            prune_released: config.prune_released,
            ..Self::default()
        }
    }

    /// Takes ownership of `tree`, or returns the handle of an identical pooled tree.
    ///
    /// When an identical tree is already pooled, the incoming tree's
    /// population moves onto it; its ledger is discarded.
    pub fn adopt(&mut self, mut tree: TreeNode<A, C>) -> TreeId {
        let identity = tree.fresh_identity().to_owned();
        if let Some(&id) = self.by_identity.get(&identity) {
            if let Some(pooled) = self.trees.get_mut(&id) {
                pooled.update_num_organisms_using(tree.population);
            }
            tracing::debug!(
                tree = %id,
                identity = %identity,
                carried = tree.population,
                "Reusing pooled tree"
            );
            return id;
        }
        let id = TreeId(self.next_id);
        self.next_id += 1;
        tracing::debug!(tree = %id, identity = %identity, "Adopted new tree");
        self.by_identity.insert(identity, id);
        self.trees.insert(id, tree);
        id
    }

    /// Registers one more organism using the tree.
    pub fn acquire(&mut self, id: TreeId) -> Result<()> {
        let tree = self.trees.get_mut(&id).ok_or(TreeError::UnknownTree(id))?;
        tree.update_num_organisms_using(1);
        Ok(())
    }

    /// Registers that one organism stopped using the tree.
    ///
    /// Fails without changing anything if no organism holds the tree. When
    /// pruning is enabled the tree is dropped once its last user is gone.
    pub fn release(&mut self, id: TreeId) -> Result<()> {
        let tree = self.trees.get_mut(&id).ok_or(TreeError::UnknownTree(id))?;
        tree.try_update_num_organisms_using(-1)?;
        if self.prune_released && tree.population == 0 {
            self.remove(id);
        }
        Ok(())
    }

    /// Moves one organism from `from` (if any) onto `to`.
    pub fn reassign(&mut self, from: Option<TreeId>, to: TreeId) -> Result<()> {
        if from == Some(to) {
            return Ok(());
        }
        if !self.trees.contains_key(&to) {
            return Err(TreeError::UnknownTree(to));
        }
        if let Some(from) = from {
            self.release(from)?;
        }
        self.acquire(to)
    }

    pub fn remove(&mut self, id: TreeId) -> Option<TreeNode<A, C>> {
        let tree = self.trees.remove(&id)?;
        if self.by_identity.get(&tree.identity) == Some(&id) {
            self.by_identity.remove(&tree.identity);
        }
        tracing::debug!(tree = %id, identity = %tree.identity, "Dropped tree from pool");
        Some(tree)
    }

    pub fn get(&self, id: TreeId) -> Option<&TreeNode<A, C>> {
        self.trees.get(&id)
    }

    /// Mutable access to a pooled tree. Call [`TreePool::refresh`] after structural edits.
    pub fn get_mut(&mut self, id: TreeId) -> Option<&mut TreeNode<A, C>> {
        self.trees.get_mut(&id)
    }

    pub fn find(&self, identity: &str) -> Option<TreeId> {
        self.by_identity.get(identity).copied()
    }

    /// Re-derives stale identities, rebuilds the identity index and merges
    /// trees that became identical through edits.
    ///
    /// The lowest handle survives a merge and takes over the population of
    /// the others. Returns `(merged, survivor)` pairs so holders of a merged
    /// handle can switch to the survivor.
    pub fn refresh(&mut self) -> Vec<(TreeId, TreeId)> {
        self.by_identity.clear();
        let mut merged = Vec::new();
        let ids: Vec<TreeId> = self.trees.keys().copied().collect();
        for id in ids {
            let Some(tree) = self.trees.get_mut(&id) else {
                continue;
            };
            let identity = tree.fresh_identity().to_owned();
            let Some(&survivor) = self.by_identity.get(&identity) else {
                self.by_identity.insert(identity, id);
                continue;
            };
            let Some(duplicate) = self.trees.remove(&id) else {
                continue;
            };
            if let Some(kept) = self.trees.get_mut(&survivor) {
                kept.update_num_organisms_using(duplicate.population);
            }
            tracing::info!(
                tree = %id,
                into = %survivor,
                identity = %identity,
                population = duplicate.population,
                "Merged pooled tree that became identical after edits"
            );
            merged.push((id, survivor));
        }
        merged
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TreeId, &TreeNode<A, C>)> {
        self.trees.iter().map(|(id, tree)| (*id, tree))
    }

    /// Sum of root populations, i.e. organisms currently holding a pooled tree.
    pub fn total_population(&self) -> i64 {
        self.trees.values().map(|t| t.population).sum()
    }
}

impl<A, C> TreePool<A, C>
where
    A: Display + Serialize + DeserializeOwned,
    C: Display + Serialize + DeserializeOwned,
{
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        tracing::info!(path = %path.as_ref().display(), trees = self.len(), "Saved tree pool");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let context = format!("loading tree pool {}", path.as_ref().display());
        let file = File::open(path.as_ref())
            .map_err(|e| TreeError::from(e).with_context(&context))?;
        let reader = BufReader::new(file);
        let mut pool: Self = serde_json::from_reader(reader)
            .map_err(|e| TreeError::from(e).with_context(&context))?;
        let merged = pool.refresh();
        if !merged.is_empty() {
            tracing::warn!(merged = merged.len(), "Loaded pool held duplicate trees");
        }
        tracing::info!(path = %path.as_ref().display(), trees = pool.len(), "Loaded tree pool");
        Ok(pool)
    }
}
