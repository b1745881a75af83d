//! Grouping and fair distribution of image files across designers.
//!
//! Files are clustered by their [`extract_group_key`](super::group_key)
//! prefix and whole clusters are handed to designers — a cluster is never
//! split, so all shots of one product end up with the same person. Cluster
//! order is ascending by key, never the directory enumeration order.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::group_key::extract_group_key;

/// How ordered clusters are mapped onto designers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartitionStrategy {
    /// The first `total % n` designers get `total / n + 1` clusters in
    /// cluster order, the rest get `total / n`.
    #[default]
    BalancedCount,
    /// Cluster `i` goes to designer `i % n`.
    RoundRobin,
}

impl PartitionStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            PartitionStrategy::BalancedCount => "Balanced Count",
            PartitionStrategy::RoundRobin => "Round Robin",
        }
    }

    pub fn all() -> Vec<PartitionStrategy> {
        vec![PartitionStrategy::BalancedCount, PartitionStrategy::RoundRobin]
    }
}

/// An ordered set of files sharing one group key. The atomic unit of
/// assignment.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub key: String,
    pub files: Vec<PathBuf>,
}

/// Per-designer ordered file lists. Index 0 corresponds to `Designer_1`.
#[derive(Debug, Clone, Default)]
pub struct WorkerAssignment {
    workers: Vec<Vec<PathBuf>>,
}

impl WorkerAssignment {
    pub fn new(num_workers: usize) -> Self {
        Self {
            workers: vec![Vec::new(); num_workers],
        }
    }

    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    pub fn files_for(&self, worker: usize) -> &[PathBuf] {
        &self.workers[worker]
    }

    pub fn push(&mut self, worker: usize, file: PathBuf) {
        self.workers[worker].push(file);
    }

    pub fn total_files(&self) -> usize {
        self.workers.iter().map(|w| w.len()).sum()
    }

    /// Length of the longest per-designer list. Used to pad report columns.
    pub fn max_files_per_worker(&self) -> usize {
        self.workers.iter().map(|w| w.len()).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Vec<PathBuf>)> {
        self.workers.iter().enumerate()
    }
}

/// Group files into clusters ordered by ascending key.
///
/// A file whose name yields no group key forms a singleton cluster keyed by
/// its own full filename, so no file is ever lost from the distribution.
/// Files within a cluster are kept in sorted path order.
pub fn group_files(files: &[PathBuf]) -> Vec<Cluster> {
    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for path in files {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let key = extract_group_key(&filename).unwrap_or_else(|| filename.clone());
        groups.entry(key).or_default().push(path.clone());
    }

    groups
        .into_iter()
        .map(|(key, mut files)| {
            files.sort();
            Cluster { key, files }
        })
        .collect()
}

/// Assign whole clusters to `num_workers` designers.
///
/// `num_workers` must be positive; the run boundary validates it before the
/// engine is reached.
pub fn partition_clusters(
    clusters: &[Cluster],
    num_workers: usize,
    strategy: PartitionStrategy,
) -> WorkerAssignment {
    debug_assert!(num_workers > 0);

    let mut assignment = WorkerAssignment::new(num_workers);

    for (i, cluster) in clusters.iter().enumerate() {
        let worker = match strategy {
            PartitionStrategy::RoundRobin => i % num_workers,
            PartitionStrategy::BalancedCount => {
                balanced_worker_for(i, clusters.len(), num_workers)
            }
        };
        for file in &cluster.files {
            assignment.push(worker, file.clone());
        }
    }

    info!(
        "Partitioned {} clusters ({} files) across {} designers using {}",
        clusters.len(),
        assignment.total_files(),
        num_workers,
        strategy.as_str()
    );

    assignment
}

/// Designer index for cluster `i` under the balanced-count strategy: the
/// first `remainder` designers take one extra cluster each, in cluster order.
fn balanced_worker_for(i: usize, total_clusters: usize, num_workers: usize) -> usize {
    let base = total_clusters / num_workers;
    let remainder = total_clusters % num_workers;

    if i < (base + 1) * remainder {
        i / (base + 1)
    } else {
        // base is non-zero here: base == 0 implies total < num_workers, so
        // remainder == total and every index hits the branch above.
        (i - remainder) / base
    }
}

/// Group and partition in one step.
pub fn distribute(
    files: &[PathBuf],
    num_workers: usize,
    strategy: PartitionStrategy,
) -> WorkerAssignment {
    let clusters = group_files(files);
    partition_clusters(&clusters, num_workers, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from(format!("/src/{}", n))).collect()
    }

    fn synthetic_clusters(n: usize) -> Vec<Cluster> {
        (0..n)
            .map(|i| Cluster {
                key: format!("key_{:03}", i),
                files: vec![PathBuf::from(format!("/src/key_{:03}_a.jpg", i))],
            })
            .collect()
    }

    fn cluster_counts(assignment: &WorkerAssignment) -> Vec<usize> {
        (0..assignment.num_workers())
            .map(|w| assignment.files_for(w).len())
            .collect()
    }

    #[test]
    fn test_balanced_count_ten_clusters_three_workers() {
        let clusters = synthetic_clusters(10);
        let assignment =
            partition_clusters(&clusters, 3, PartitionStrategy::BalancedCount);
        // remainder = 1, so the first designer takes the extra cluster.
        assert_eq!(cluster_counts(&assignment), vec![4, 3, 3]);
    }

    #[test]
    fn test_round_robin_ten_clusters_three_workers() {
        let clusters = synthetic_clusters(10);
        let assignment = partition_clusters(&clusters, 3, PartitionStrategy::RoundRobin);
        assert_eq!(cluster_counts(&assignment), vec![4, 3, 3]);
        // Cluster 3 wraps back to designer 0.
        assert!(assignment.files_for(0).contains(&PathBuf::from("/src/key_003_a.jpg")));
    }

    #[test]
    fn test_fewer_clusters_than_workers() {
        let clusters = synthetic_clusters(2);
        let assignment =
            partition_clusters(&clusters, 5, PartitionStrategy::BalancedCount);
        assert_eq!(cluster_counts(&assignment), vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_union_equals_input_no_loss_no_duplication() {
        let files = paths(&[
            "1234567890123_front.jpg",
            "1234567890123_back.jpg",
            "9876543210987_front.png",
            "ABCDEFGHIJKL_detail.png",
            "ABCDEFGHIJKL_alt.png",
            "short.png",
            "tiny.gif",
        ]);

        for strategy in PartitionStrategy::all() {
            for num_workers in 1..=5 {
                let assignment = distribute(&files, num_workers, strategy);
                let distributed: Vec<&PathBuf> =
                    assignment.iter().flat_map(|(_, fs)| fs.iter()).collect();
                assert_eq!(distributed.len(), files.len());
                let unique: HashSet<&PathBuf> = distributed.into_iter().collect();
                assert_eq!(unique.len(), files.len());
            }
        }
    }

    #[test]
    fn test_files_sharing_key_land_on_same_worker() {
        let files = paths(&[
            "1234567890123_front.jpg",
            "1234567890123_back.jpg",
            "1234567890123_side.jpg",
            "1111111111111_a.jpg",
            "2222222222222_a.jpg",
            "3333333333333_a.jpg",
        ]);

        for strategy in PartitionStrategy::all() {
            let assignment = distribute(&files, 3, strategy);
            let mut home = None;
            for (worker, worker_files) in assignment.iter() {
                if worker_files
                    .iter()
                    .any(|f| f.to_string_lossy().contains("1234567890123"))
                {
                    let members = worker_files
                        .iter()
                        .filter(|f| f.to_string_lossy().contains("1234567890123"))
                        .count();
                    assert_eq!(members, 3, "cluster was split");
                    home = Some(worker);
                }
            }
            assert!(home.is_some());
        }
    }

    #[test]
    fn test_keyless_files_form_singleton_clusters() {
        let files = paths(&["short.png", "tiny.gif"]);
        let clusters = group_files(&files);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].key, "short.png");
        assert_eq!(clusters[1].key, "tiny.gif");
    }

    #[test]
    fn test_cluster_order_is_independent_of_input_order() {
        let forward = paths(&["2222222222222_a.jpg", "1111111111111_a.jpg"]);
        let mut reversed = forward.clone();
        reversed.reverse();

        let a: Vec<String> = group_files(&forward).into_iter().map(|c| c.key).collect();
        let b: Vec<String> = group_files(&reversed).into_iter().map(|c| c.key).collect();
        assert_eq!(a, b);
        assert_eq!(a, vec!["1111111111111", "2222222222222"]);
    }

    #[test]
    fn test_single_worker_receives_everything() {
        let files = paths(&["1234567890123_a.jpg", "ABCDEFGHIJKL_b.png", "short.png"]);
        let assignment = distribute(&files, 1, PartitionStrategy::BalancedCount);
        assert_eq!(assignment.files_for(0).len(), 3);
    }
}
