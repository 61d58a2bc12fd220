//! Arena view over a page's flat, parent-pointer encoded component list.

use crate::component::{ComponentProps, ComponentType, PageComponent};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A placement slot: the owning container (if any) and, for `Columns`
/// parents, the column index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub parent: Option<String>,
    pub column: Option<u32>,
}

impl Slot {
    pub fn root() -> Self {
        Self {
            parent: None,
            column: None,
        }
    }

    pub fn child_of(parent: &str, column: Option<u32>) -> Self {
        Self {
            parent: Some(parent.to_string()),
            column,
        }
    }
}

/// Children index built once per render pass.
///
/// Siblings are sorted by `order` with ties broken by their position in the
/// source list.
#[derive(Debug)]
pub struct ComponentTree<'a> {
    nodes: &'a [PageComponent],
    by_id: HashMap<&'a str, usize>,
    children: HashMap<Slot, Vec<usize>>,
}

impl<'a> ComponentTree<'a> {
    pub fn new(nodes: &'a [PageComponent]) -> Self {
        let mut by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            by_id.entry(node.id.as_str()).or_insert(index);
        }

        let mut children: HashMap<Slot, Vec<usize>> = HashMap::new();
        for (index, node) in nodes.iter().enumerate() {
            let slot = match &node.parent_id {
                None => Slot::root(),
                Some(parent_id) => {
                    let parent_is_columns = by_id
                        .get(parent_id.as_str())
                        .map(|&p| nodes[p].component_type() == ComponentType::Columns)
                        .unwrap_or(false);
                    let column = if parent_is_columns {
                        Some(node.column.unwrap_or(0))
                    } else {
                        None
                    };
                    Slot::child_of(parent_id, column)
                }
            };
            children.entry(slot).or_default().push(index);
        }

        for indices in children.values_mut() {
            // sort_by_key is stable, so equal orders keep list position
            indices.sort_by_key(|&i| nodes[i].order.unwrap_or(0));
        }

        debug!(nodes = nodes.len(), slots = children.len(), "Built component tree");

        Self {
            nodes,
            by_id,
            children,
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a PageComponent> {
        self.by_id.get(id).map(|&i| &self.nodes[i])
    }

    /// Ordered children of a slot
    pub fn children(&self, slot: &Slot) -> Vec<&'a PageComponent> {
        self.children
            .get(slot)
            .map(|indices| indices.iter().map(|&i| &self.nodes[i]).collect())
            .unwrap_or_default()
    }

    pub fn roots(&self) -> Vec<&'a PageComponent> {
        self.children(&Slot::root())
    }

    /// Ids of every node reachable from the root slot through slots the
    /// renderer actually walks
    pub fn reachable(&self) -> HashSet<&'a str> {
        let mut seen = HashSet::new();
        let mut stack: Vec<&'a PageComponent> = self.roots();
        while let Some(node) = stack.pop() {
            if !seen.insert(node.id.as_str()) {
                continue;
            }
            for (slot, indices) in &self.children {
                if slot.parent.as_deref() == Some(node.id.as_str()) && renders_slot(node, slot) {
                    stack.extend(indices.iter().map(|&i| &self.nodes[i]));
                }
            }
        }
        seen
    }

    /// Nodes that will never render: missing parents, parent cycles,
    /// non-container parents and columns past the parent's column count
    pub fn unreachable(&self) -> Vec<&'a PageComponent> {
        let reachable = self.reachable();
        self.nodes
            .iter()
            .filter(|n| !reachable.contains(n.id.as_str()))
            .collect()
    }
}

/// Whether rendering `parent` walks `slot`
pub fn renders_slot(parent: &PageComponent, slot: &Slot) -> bool {
    match (&parent.props, slot.column) {
        (ComponentProps::Columns(props), Some(column)) => column < props.columns(),
        (ComponentProps::Div(_), None) => true,
        _ => false,
    }
}
