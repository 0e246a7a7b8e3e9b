use std::rc::Rc;

use core_ir::{Binding, Definition, Identifier, Unique};
use im::{HashMap, Vector};

/// Number of unrolled recursive groups enclosing a point in the tree.
pub type Level = usize;

const TOP_LEVEL: Level = 0;

/// Scope information threaded through the liberation rewrite.
///
/// Every operation returns a new environment and leaves `self` untouched, so sibling subtrees
/// never observe each other's binders or scrutinees. The maps are persistent, making the copies
/// cheap.
#[derive(Clone, Debug)]
pub struct LiberationEnvironment {
    bomb_out_size: Option<usize>,
    level: Level,
    levels: HashMap<Unique, Level>,
    unfoldings: HashMap<Unique, Rc<Binding>>,
    /// Variables scrutinized strictly inside their binding level, with the level of the `case`.
    scrutinized: Vector<(Identifier, Level)>,
}

impl LiberationEnvironment {
    pub fn new(bomb_out_size: Option<usize>) -> Self {
        LiberationEnvironment {
            bomb_out_size,
            level: TOP_LEVEL,
            levels: HashMap::new(),
            unfoldings: HashMap::new(),
            scrutinized: Vector::new(),
        }
    }
    pub fn level(&self) -> Level {
        self.level
    }
    pub fn bomb_out_size(&self) -> Option<usize> {
        self.bomb_out_size
    }
    /// Bring binders into scope at the current level.
    pub fn add_binders<'a>(&self, binders: impl IntoIterator<Item = &'a Identifier>) -> Self {
        let mut environment = self.clone();
        for binder in binders {
            environment.levels.insert(binder.unique, self.level);
        }
        environment
    }
    pub fn add_scrutinized(&self, identifier: &Identifier) -> Self {
        let mut environment = self.clone();
        if self.lookup_level(identifier) < self.level {
            environment
                .scrutinized
                .push_back((identifier.clone(), self.level));
        }
        environment
    }
    /// Register a recursive group as available for unrolling inside its own right-hand sides.
    ///
    /// The binders keep the current level while the returned environment is one level deeper,
    /// as if one iteration had already been unrolled.
    pub fn add_recursive_unfoldings(&self, definitions: Vec<Definition>) -> Self {
        let unfolding = Rc::new(Binding::Recursive(
            definitions
                .into_iter()
                .map(|Definition { binder, expression }| Definition {
                    binder: binder.localize(),
                    expression,
                })
                .collect(),
        ));
        let mut environment = self.clone();
        environment.level = self.level + 1;
        for binder in unfolding.binders() {
            environment.levels.insert(binder.unique, self.level);
            environment
                .unfoldings
                .insert(binder.unique, Rc::clone(&unfolding));
        }
        environment
    }
    pub fn lookup_unfolding(&self, identifier: &Identifier) -> Option<&Binding> {
        self.unfoldings
            .get(&identifier.unique)
            .map(|unfolding| unfolding.as_ref())
    }
    pub fn lookup_level(&self, identifier: &Identifier) -> Level {
        self.levels
            .get(&identifier.unique)
            .copied()
            .unwrap_or(TOP_LEVEL)
    }
    /// Variables scrutinized somewhere deeper than `defining_level`.
    pub fn free_scrutinized(&self, defining_level: Level) -> Vec<&Identifier> {
        self.scrutinized
            .iter()
            .filter(|(_, level)| *level > defining_level)
            .map(|(identifier, _)| identifier)
            .collect()
    }
}
