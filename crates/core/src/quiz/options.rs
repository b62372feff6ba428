use crate::model::OPTION_COUNT;

/// Display order of a question's options: `order[position] = option index`.
pub type OptionOrder = [usize; OPTION_COUNT];

pub const CANONICAL_ORDER: OptionOrder = [0, 1, 2, 3];

/// Decides the on-screen order of answer options.
///
/// Implementations must return a permutation of `0..OPTION_COUNT`.
pub trait OptionShuffler {
    fn order(&mut self) -> OptionOrder;
}

/// Keeps the backend's `a, b, c, d` order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalOrder;

impl OptionShuffler for CanonicalOrder {
    fn order(&mut self) -> OptionOrder {
        CANONICAL_ORDER
    }
}

/// Replays a fixed list of orders, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedOrder {
    orders: Vec<OptionOrder>,
    next: usize,
}

impl ScriptedOrder {
    #[must_use]
    pub fn new(orders: Vec<OptionOrder>) -> Self {
        Self { orders, next: 0 }
    }
}

impl OptionShuffler for ScriptedOrder {
    fn order(&mut self) -> OptionOrder {
        if self.orders.is_empty() {
            return CANONICAL_ORDER;
        }
        let order = self.orders[self.next % self.orders.len()];
        self.next += 1;
        order
    }
}

/// Falls back to the canonical order when a shuffler returns something
/// that is not a permutation.
#[must_use]
pub fn sanitize(order: OptionOrder) -> OptionOrder {
    let mut seen = [false; OPTION_COUNT];
    for &index in &order {
        if index >= OPTION_COUNT || seen[index] {
            return CANONICAL_ORDER;
        }
        seen[index] = true;
    }
    order
}
