//! `Link` and the per-tick `LinkSet`.

use sw_core::AgentId;

/// An unordered agent pair, stored with `a < b`.
///
/// Links have no identity beyond the pair and live for exactly one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub a: AgentId,
    pub b: AgentId,
}

impl Link {
    /// Normalise the pair so that `a < b`.
    #[inline]
    pub fn new(x: AgentId, y: AgentId) -> Self {
        if x <= y { Link { a: x, b: y } } else { Link { a: y, b: x } }
    }

    #[inline]
    pub fn involves(&self, id: AgentId) -> bool {
        self.a == id || self.b == id
    }

    /// The endpoint that is not `id`, or `None` if `id` is not on this link.
    #[inline]
    pub fn partner(&self, id: AgentId) -> Option<AgentId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// The links formed in one tick, in ascending `(a, b)` order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkSet {
    pub links: Vec<Link>,
    /// In-range pairs considered this tick, before the random draw.
    pub candidates: usize,
}

impl LinkSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    /// Ids linked to `id` this tick, ascending.
    pub fn partners_of(&self, id: AgentId) -> Vec<AgentId> {
        let mut out: Vec<AgentId> = self.links.iter().filter_map(|l| l.partner(id)).collect();
        out.sort_unstable();
        out
    }

    /// Drop every link with an endpoint rejected by `keep`.
    pub fn retain_agents(&mut self, mut keep: impl FnMut(AgentId) -> bool) {
        self.links.retain(|l| keep(l.a) && keep(l.b));
    }

    pub fn clear(&mut self) {
        self.links.clear();
        self.candidates = 0;
    }
}
