//! Index newtypes for obstacles, rays and navigation-graph nodes.
//!
//! Each id is the position of its item in the owning `Vec`: the
//! environment's obstacle list, the agent's ray fan, or the current graph's
//! node list.  Use `.index()` to subscript.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Marks an unset slot, e.g. an unvisited predecessor during routing.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Position in the environment's obstacle list; the four walls are 0..4.
    pub struct ObstacleId(u32);
}

typed_id! {
    /// Position in the agent's sensor fan, leftmost-offset first.
    pub struct RayId(u16);
}

typed_id! {
    /// Position in one navigation graph's node list.  Every rebuild
    /// renumbers the nodes; hold a `GridKey` to refer to a cell across
    /// rebuilds.
    pub struct NodeId(u32);
}
