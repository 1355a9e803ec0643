//! # memotree
//!
//! Self-adjusting binary search tree used as a memoizing store.
//!
//! ## Architecture
//! - **Arena**: nodes live in a `Vec`, addressed by index (no `Box` chains)
//! - **Splay**: iterative walk with an explicit path stack, zig-zig/zig-zag
//!   rotations pull recently accessed keys toward the root
//! - **Memo**: tree-backed recursive Fibonacci as the reference workload
//!
//! ## Concurrency
//! Single-threaded by design. Lookups mutate tree structure (splaying), so
//! there is no shared-read fast path; wrap the tree in external mutual
//! exclusion if it must cross threads.

#![warn(missing_docs)]

mod memo;
mod tree;

pub use memo::{fib, fib_iterative};
pub use tree::SplayTree;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo_and_tree_compose() {
        let mut tree = SplayTree::new();
        assert_eq!(fib(20, &mut tree), 6765);
        assert_eq!(tree.get(&20), Some(&6765));
    }
}
