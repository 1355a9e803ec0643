//! Tree-backed Fibonacci memoization

use crate::tree::SplayTree;

/// Compute the `n`-th Fibonacci number, memoizing every intermediate
/// value in `tree`.
///
/// A hit returns the cached value without recomputation, so each
/// distinct `n` is evaluated at most once per tree instance. The first
/// cold call recurses to depth `n`; values overflow `u128` past
/// `n = 186`, which the caller is expected to stay under.
pub fn fib(n: u32, tree: &mut SplayTree<u32, u128>) -> u128 {
    if let Some(&cached) = tree.get(&n) {
        return cached;
    }
    if n <= 1 {
        tree.insert(n, u128::from(n));
        return u128::from(n);
    }
    let a = fib(n - 1, tree);
    let b = fib(n - 2, tree);
    let result = a + b;
    tree.insert(n, result);
    result
}

/// Iterative Fibonacci baseline, no memo state.
///
/// Never computes past fib(n), so the full supported range up to
/// `n = 186` stays inside u128.
pub fn fib_iterative(n: u32) -> u128 {
    if n == 0 {
        return 0;
    }
    let (mut a, mut b) = (0u128, 1u128);
    for _ in 1..n {
        let next = a + b;
        a = b;
        b = next;
    }
    b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fib_base_cases() {
        let mut tree = SplayTree::new();

        assert_eq!(fib(0, &mut tree), 0);
        assert_eq!(fib(1, &mut tree), 1);
    }

    #[test]
    fn test_fib_ten() {
        let mut tree = SplayTree::new();

        assert_eq!(fib(10, &mut tree), 55);
    }

    #[test]
    fn test_fib_matches_iterative() {
        let mut tree = SplayTree::new();

        for n in 0..=90 {
            assert_eq!(fib(n, &mut tree), fib_iterative(n), "n = {}", n);
        }
    }

    #[test]
    fn test_each_n_cached_once() {
        let mut tree = SplayTree::new();

        fib(30, &mut tree);

        // One entry per distinct n in 0..=30
        assert_eq!(tree.len(), 31);
    }

    #[test]
    fn test_warm_tree_hits_cache() {
        let mut tree = SplayTree::new();

        fib(40, &mut tree);
        let before = tree.len();

        assert_eq!(fib(40, &mut tree), 102_334_155);
        assert_eq!(tree.len(), before);
    }

    #[test]
    fn test_large_n_below_overflow() {
        // The documented ceiling: both paths must reach n = 186 without
        // computing anything past fib(186)
        let mut tree = SplayTree::new();

        assert_eq!(fib_iterative(186), 332_825_110_087_067_562_321_196_029_789_634_457_848);
        assert_eq!(fib(186, &mut tree), fib_iterative(186));
    }
}
