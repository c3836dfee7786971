//! Fork-join execution over contiguous partitions.
//!
//! `ForkJoin` owns a rayon thread pool and exposes the three steps of a
//! data-parallel aggregate explicitly: `partition` splits the input into
//! contiguous, ordered slices; `map_reduce` and `map_concat` run one task per
//! slice inside a pool scope and combine the partial results on the calling
//! thread, in partition order.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::BenchError;

/// A worker pool plus the partitioning policy used to fan work out onto it.
pub struct ForkJoin {
    pool: ThreadPool,
    min_partition_len: usize,
}

impl ForkJoin {
    /// Create a fork-join executor.
    ///
    /// `threads == 0` lets rayon size the pool to the available parallelism.
    pub fn new(threads: usize, min_partition_len: usize) -> Result<Self, BenchError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("streambench-worker-{i}"))
            .build()
            .map_err(|e| BenchError::Config(format!("failed to create thread pool: {e}")))?;

        tracing::debug!(
            threads = pool.current_num_threads(),
            min_partition_len,
            "fork-join pool ready"
        );

        Ok(Self {
            pool,
            min_partition_len: min_partition_len.max(1),
        })
    }

    /// Number of worker threads in the pool.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    #[must_use]
    pub fn min_partition_len(&self) -> usize {
        self.min_partition_len
    }

    /// Number of partitions used for an input of `len` elements.
    ///
    /// One per worker, reduced so that no partition is shorter than the
    /// minimum partition length. Empty input has no partitions.
    #[must_use]
    pub fn partition_count(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (len / self.min_partition_len).clamp(1, self.threads().max(1))
    }

    /// Split `data` into contiguous partitions whose lengths differ by at most one.
    #[must_use]
    pub fn partition<'a, T>(&self, data: &'a [T]) -> Vec<&'a [T]> {
        let count = self.partition_count(data.len());
        let mut partitions = Vec::with_capacity(count);
        if count == 0 {
            return partitions;
        }

        let base = data.len() / count;
        let extra = data.len() % count;
        let mut rest = data;
        for i in 0..count {
            let len = if i < extra { base + 1 } else { base };
            let (head, tail) = rest.split_at(len);
            partitions.push(head);
            rest = tail;
        }
        partitions
    }

    /// Map every partition and fold the partial results, in order, into `identity`.
    pub fn map_reduce<T, R, M, C>(&self, data: &[T], identity: R, map: M, combine: C) -> R
    where
        T: Sync,
        R: Send,
        M: Fn(&[T]) -> R + Sync,
        C: Fn(R, R) -> R,
    {
        self.fork(data, map).into_iter().fold(identity, combine)
    }

    /// Map every partition to a sequence and concatenate the results in partition order.
    pub fn map_concat<T, U, M>(&self, data: &[T], map: M) -> Vec<U>
    where
        T: Sync,
        U: Send,
        M: Fn(&[T]) -> Vec<U> + Sync,
    {
        let parts = self.fork(data, map);
        let total = parts.iter().map(Vec::len).sum();
        let mut out = Vec::with_capacity(total);
        for part in parts {
            out.extend(part);
        }
        out
    }

    /// Run `map` on every partition, one pool task each, and return the
    /// partial results in partition order.
    fn fork<T, R, M>(&self, data: &[T], map: M) -> Vec<R>
    where
        T: Sync,
        R: Send,
        M: Fn(&[T]) -> R + Sync,
    {
        let partitions = self.partition(data);
        if partitions.len() <= 1 {
            return partitions.into_iter().map(&map).collect();
        }

        let mut slots: Vec<Option<R>> = partitions.iter().map(|_| None).collect();
        let map = &map;
        self.pool.scope(|scope| {
            for (slot, part) in slots.iter_mut().zip(partitions.iter().copied()) {
                scope.spawn(move |_| *slot = Some(map(part)));
            }
        });

        // The scope joins every task before returning, so all slots are filled.
        slots.into_iter().flatten().collect()
    }
}

impl std::fmt::Debug for ForkJoin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForkJoin")
            .field("threads", &self.threads())
            .field("min_partition_len", &self.min_partition_len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fork_join(threads: usize, min_len: usize) -> ForkJoin {
        ForkJoin::new(threads, min_len).unwrap()
    }

    #[test]
    fn pool_uses_requested_threads() {
        assert_eq!(fork_join(3, 1).threads(), 3);
    }

    #[test]
    fn default_pool_has_workers() {
        assert!(fork_join(0, 1).threads() >= 1);
    }

    #[test]
    fn zero_min_partition_len_is_clamped() {
        assert_eq!(fork_join(2, 0).min_partition_len(), 1);
    }

    #[test]
    fn partition_empty_input() {
        let fj = fork_join(4, 1);
        let data: [i32; 0] = [];
        assert_eq!(fj.partition_count(0), 0);
        assert!(fj.partition(&data).is_empty());
    }

    #[test]
    fn partition_one_per_thread() {
        let fj = fork_join(4, 1);
        let data: Vec<i32> = (0..10).collect();
        let parts = fj.partition(&data);
        let lens: Vec<usize> = parts.iter().map(|p| p.len()).collect();
        assert_eq!(lens, vec![3, 3, 2, 2]);
    }

    #[test]
    fn partition_respects_min_len() {
        let fj = fork_join(8, 100);
        assert_eq!(fj.partition_count(99), 1);
        assert_eq!(fj.partition_count(250), 2);
        assert_eq!(fj.partition_count(10_000), 8);

        let data = vec![0u8; 250];
        assert!(fj.partition(&data).iter().all(|p| p.len() >= 100));
    }

    #[test]
    fn partition_is_contiguous_and_ordered() {
        let fj = fork_join(3, 1);
        let data: Vec<i32> = (0..100).collect();
        let rejoined: Vec<i32> = fj.partition(&data).concat();
        assert_eq!(rejoined, data);
    }

    #[test]
    fn map_reduce_sums_partials() {
        let fj = fork_join(4, 1);
        let data: Vec<i64> = (1..=1_000).collect();
        let total = fj.map_reduce(&data, 0i64, |p| p.iter().sum::<i64>(), |a, b| a + b);
        assert_eq!(total, 500_500);
    }

    #[test]
    fn map_reduce_empty_returns_identity() {
        let fj = fork_join(4, 1);
        let data: Vec<i64> = Vec::new();
        let total = fj.map_reduce(&data, 7i64, |p| p.iter().sum::<i64>(), |a, b| a + b);
        assert_eq!(total, 7);
    }

    #[test]
    fn map_reduce_combines_in_partition_order() {
        let fj = fork_join(4, 1);
        let data: Vec<i32> = (0..8).collect();
        let firsts = fj.map_reduce(
            &data,
            Vec::new(),
            |p| vec![p[0]],
            |mut acc, part| {
                acc.extend(part);
                acc
            },
        );
        assert_eq!(firsts, vec![0, 2, 4, 6]);
    }

    #[test]
    fn map_concat_preserves_order() {
        let fj = fork_join(4, 1);
        let data: Vec<i32> = (0..1_001).collect();
        let doubled = fj.map_concat(&data, |p| p.iter().map(|x| x * 2).collect());
        let expected: Vec<i32> = data.iter().map(|x| x * 2).collect();
        assert_eq!(doubled, expected);
    }

    #[test]
    fn map_concat_runs_on_workers() {
        let fj = fork_join(2, 1);
        let data = vec![0u8; 4];
        let names = fj.map_concat(&data, |_| {
            vec![std::thread::current().name().unwrap_or_default().to_string()]
        });
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| n.starts_with("streambench-worker-")));
    }

    #[test]
    fn debug_shows_threads() {
        let s = format!("{:?}", fork_join(2, 5));
        assert!(s.contains("threads: 2"));
        assert!(s.contains("min_partition_len: 5"));
    }
}
