//! Space descriptors.
//!
//! A `Space` describes the set of values an action or observation field
//! may take, in the shape RL frameworks expect (`Discrete`, bounded
//! integers, named dictionaries of sub-spaces).

use serde::{Deserialize, Serialize};

/// Description of a set of valid values.
///
/// ```
/// use ccg_gym::env::Space;
///
/// let space = Space::Discrete { n: 3 };
/// assert!(space.contains(2));
/// assert!(!space.contains(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    /// Integers in `0..n`.
    Discrete { n: usize },
    /// Integers in `low..=high`.
    Bounded { low: i64, high: i64 },
    /// Named sub-spaces, in field order.
    Dict(Vec<(String, Space)>),
}

impl Space {
    /// Number of choices of a discrete space, `None` otherwise.
    #[must_use]
    pub fn n(&self) -> Option<usize> {
        match self {
            Space::Discrete { n } => Some(*n),
            _ => None,
        }
    }

    /// Whether a scalar value lies in this space. Always false for dicts.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        match self {
            Space::Discrete { n } => usize::try_from(value).is_ok_and(|v| v < *n),
            Space::Bounded { low, high } => (*low..=*high).contains(&value),
            Space::Dict(_) => false,
        }
    }

    /// Look up a named field of a dict space.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Space> {
        match self {
            Space::Dict(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, s)| s),
            _ => None,
        }
    }

    /// Field names of a dict space, in order. Empty for scalar spaces.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let fields: &[(String, Space)] = match self {
            Space::Dict(fields) => fields,
            _ => &[],
        };
        fields.iter().map(|(k, _)| k.as_str())
    }
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Space::Discrete { n } => write!(f, "Discrete({n})"),
            Space::Bounded { low, high } => write!(f, "Bounded({low}, {high})"),
            Space::Dict(fields) => {
                f.write_str("Dict(")?;
                for (i, (key, space)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {space}")?;
                }
                f.write_str(")")
            }
        }
    }
}
