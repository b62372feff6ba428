use portal_core::quiz::{CANONICAL_ORDER, OptionOrder, OptionShuffler};
use rand::rng;
use rand::seq::SliceRandom;

/// Shuffles answer options with the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOrder;

impl OptionShuffler for RandomOrder {
    fn order(&mut self) -> OptionOrder {
        let mut order = CANONICAL_ORDER;
        order.shuffle(&mut rng());
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_permutations() {
        let mut shuffler = RandomOrder;
        for _ in 0..50 {
            let mut order = shuffler.order();
            order.sort_unstable();
            assert_eq!(order, CANONICAL_ORDER);
        }
    }
}
