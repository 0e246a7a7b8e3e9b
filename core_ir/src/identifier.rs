use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

pub type Id = String;

static NEXT_UNIQUE: AtomicU64 = AtomicU64::new(1);

/// The identity of a binder; two identifiers refer to the same binder iff their uniques match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Unique(pub u64);

impl Unique {
    /// Allocate a unique that no other call to `fresh` has returned.
    ///
    /// Deserialized programs bring their own uniques and are not checked against this counter.
    pub fn fresh() -> Self {
        Unique(NEXT_UNIQUE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for Unique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    External { module: Id },
    Internal,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub unique: Unique,
    pub name: Id,
    pub visibility: Visibility,
}

impl Identifier {
    pub fn new(name: &str) -> Self {
        Identifier {
            unique: Unique::fresh(),
            name: Id::from(name),
            visibility: Visibility::Internal,
        }
    }
    pub fn external(module: &str, name: &str) -> Self {
        Identifier {
            unique: Unique::fresh(),
            name: Id::from(name),
            visibility: Visibility::External {
                module: Id::from(module),
            },
        }
    }
    pub fn is_external(&self) -> bool {
        matches!(self.visibility, Visibility::External { .. })
    }
    /// An internal alias of this identifier with the same unique.
    pub fn localize(&self) -> Self {
        Identifier {
            unique: self.unique,
            name: self.name.clone(),
            visibility: Visibility::Internal,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.visibility {
            Visibility::External { module } => {
                write!(f, "{}.{}_{}", module, self.name, self.unique)
            }
            Visibility::Internal => write!(f, "{}_{}", self.name, self.unique),
        }
    }
}
