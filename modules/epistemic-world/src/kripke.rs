//! The Kripke structure itself.
//!
//! Worlds live in an arena and are addressed by index. Each agent's relation
//! is a `BTreeSet<(usize, usize)>`, so the successors of a world are a range
//! scan rather than a string-keyed lookup.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;
use crate::relations::Relations;
use crate::world::World;

type IndexRelation = BTreeSet<(usize, usize)>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "StructureRecord", try_from = "StructureRecord")]
pub struct KripkeStructure {
    worlds: Vec<World>,
    index: HashMap<String, usize>,
    relations: BTreeMap<String, IndexRelation>,
}

/// Wire shape: worlds plus relations by name. Validated on the way in.
#[derive(Serialize, Deserialize)]
struct StructureRecord {
    worlds: Vec<World>,
    #[serde(default)]
    relations: Relations,
}

impl KripkeStructure {
    /// Build a structure, rejecting duplicate world ids and relation pairs
    /// that name a world not in `worlds`.
    pub fn new(worlds: Vec<World>, relations: Relations) -> Result<Self, ModelError> {
        let mut index = HashMap::with_capacity(worlds.len());
        for (i, world) in worlds.iter().enumerate() {
            if index.insert(world.name().to_string(), i).is_some() {
                return Err(ModelError::DuplicateWorld(world.name().to_string()));
            }
        }

        let lookup = |agent: &str, name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| ModelError::UnknownWorld {
                    agent: agent.to_string(),
                    world: name.to_string(),
                })
        };

        let mut indexed = BTreeMap::new();
        for (agent, edges) in &relations {
            let mut set = IndexRelation::new();
            for (from, to) in edges {
                set.insert((lookup(agent, from)?, lookup(agent, to)?));
            }
            indexed.insert(agent.clone(), set);
        }

        Ok(Self {
            worlds,
            index,
            relations: indexed,
        })
    }

    /// The structure with no worlds and no agents.
    pub fn empty() -> Self {
        Self {
            worlds: Vec::new(),
            index: HashMap::new(),
            relations: BTreeMap::new(),
        }
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    pub fn world(&self, name: &str) -> Option<&World> {
        self.index_of(name).map(|i| &self.worlds[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn world_at(&self, index: usize) -> Option<&World> {
        self.worlds.get(index)
    }

    pub fn world_names(&self) -> impl Iterator<Item = &str> {
        self.worlds.iter().map(World::name)
    }

    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.relations.keys().map(String::as_str)
    }

    pub fn has_agent(&self, agent: &str) -> bool {
        self.relations.contains_key(agent)
    }

    /// Targets reachable from `from` in one step of `agent`'s relation.
    /// An unknown agent has no edges.
    pub fn successors(&self, agent: &str, from: usize) -> impl Iterator<Item = usize> + '_ {
        self.relations
            .get(agent)
            .into_iter()
            .flat_map(move |edges| out_edges(edges, from))
    }

    /// Targets reachable from `from` in one step of any agent's relation.
    /// A target shared by several agents is yielded once per agent.
    pub fn successors_any(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        self.relations
            .values()
            .flat_map(move |edges| out_edges(edges, from))
    }

    /// Number of pairs in `agent`'s relation.
    pub fn edge_count(&self, agent: &str) -> usize {
        self.relations.get(agent).map_or(0, BTreeSet::len)
    }

    /// The relations rendered back to world ids.
    pub fn relations(&self) -> Relations {
        self.relations
            .iter()
            .map(|(agent, edges)| {
                let named = edges
                    .iter()
                    .map(|&(u, v)| {
                        (
                            self.worlds[u].name().to_string(),
                            self.worlds[v].name().to_string(),
                        )
                    })
                    .collect();
                (agent.clone(), named)
            })
            .collect()
    }

    /// The substructure on the worlds `keep` accepts. World order is
    /// preserved, every agent key survives, and each relation keeps only the
    /// pairs whose endpoints both survive.
    pub fn restrict<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(usize, &World) -> bool,
    {
        let mut remap = vec![None; self.worlds.len()];
        let mut worlds = Vec::new();
        let mut index = HashMap::new();
        for (i, world) in self.worlds.iter().enumerate() {
            if keep(i, world) {
                remap[i] = Some(worlds.len());
                index.insert(world.name().to_string(), worlds.len());
                worlds.push(world.clone());
            }
        }

        let relations = self
            .relations
            .iter()
            .map(|(agent, edges)| {
                let kept = edges
                    .iter()
                    .filter_map(|&(u, v)| Some((remap[u]?, remap[v]?)))
                    .collect();
                (agent.clone(), kept)
            })
            .collect();

        debug!(
            before = self.worlds.len(),
            after = worlds.len(),
            "Restricted Kripke structure"
        );

        Self {
            worlds,
            index,
            relations,
        }
    }

    /// The substructure with the named worlds removed. Unknown names are ignored.
    pub fn without_worlds(&self, names: &[&str]) -> Self {
        let drop: HashSet<&str> = names.iter().copied().collect();
        self.restrict(|_, world| !drop.contains(world.name()))
    }
}

fn out_edges(edges: &IndexRelation, from: usize) -> impl Iterator<Item = usize> + '_ {
    edges.range((from, 0)..=(from, usize::MAX)).map(|&(_, to)| to)
}

impl Default for KripkeStructure {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for KripkeStructure {
    /// Same world set and, per agent, the same relation. World order does not
    /// matter, and an absent agent equals one with no edges.
    fn eq(&self, other: &Self) -> bool {
        let mine: HashSet<&World> = self.worlds.iter().collect();
        let theirs: HashSet<&World> = other.worlds.iter().collect();
        if mine != theirs {
            return false;
        }

        let a = self.relations();
        let b = other.relations();
        let none = BTreeSet::new();
        a.keys()
            .chain(b.keys())
            .all(|agent| a.get(agent).unwrap_or(&none) == b.get(agent).unwrap_or(&none))
    }
}

impl Eq for KripkeStructure {}

impl From<KripkeStructure> for StructureRecord {
    fn from(ks: KripkeStructure) -> Self {
        let relations = ks.relations();
        Self {
            worlds: ks.worlds,
            relations,
        }
    }
}

impl TryFrom<StructureRecord> for KripkeStructure {
    type Error = ModelError;

    fn try_from(record: StructureRecord) -> Result<Self, Self::Error> {
        Self::new(record.worlds, record.relations)
    }
}

impl fmt::Display for KripkeStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "worlds ({}):", self.worlds.len())?;
        for world in &self.worlds {
            writeln!(f, "  {world}")?;
        }
        writeln!(f, "relations:")?;
        for (agent, edges) in self.relations() {
            write!(f, "  {agent}:")?;
            for (u, v) in edges {
                write!(f, " ({u}, {v})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
