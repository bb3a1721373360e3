use config::enums::EmptyClusterPolicy;
use config::kmeans::KMeansConfig;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::l2::check_dimension;
use crate::distance::summation::AccurateSum;
use crate::error::{Error, Result};
use crate::kmeans::assignment::{assign, assign_parallel, Assignment, ClusterGroup};

pub const DEFAULT_NUM_ITERATIONS: usize = 50;

/// Lloyd's k-means with random-sample initialization and a fixed number of iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeans {
    pub num_clusters: usize,
    pub num_iterations: usize,

    // Used by `fit_default`. `fit` always takes the rng it is given.
    pub seed: Option<u64>,

    pub empty_cluster_policy: EmptyClusterPolicy,
    pub parallel_assignment: bool,
}

impl KMeans {
    pub fn new(num_clusters: usize, num_iterations: usize) -> Self {
        Self {
            num_clusters,
            num_iterations,
            seed: None,
            empty_cluster_policy: EmptyClusterPolicy::default(),
            parallel_assignment: false,
        }
    }

    pub fn from_config(config: &KMeansConfig) -> Self {
        Self {
            num_clusters: config.num_clusters,
            num_iterations: config.num_iterations,
            seed: config.seed,
            empty_cluster_policy: config.empty_cluster_policy,
            parallel_assignment: config.parallel_assignment,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    #[must_use]
    pub fn with_parallel_assignment(mut self, parallel_assignment: bool) -> Self {
        self.parallel_assignment = parallel_assignment;
        self
    }

    /// Runs k-means on `points` and returns the final centroids.
    ///
    /// The initial centroids are `num_clusters` distinct point instances drawn from `rng`.
    /// Exactly `num_iterations` rounds of assignment and mean recomputation follow. Under
    /// `EmptyClusterPolicy::Drop` fewer than `num_clusters` centroids may be returned.
    pub fn fit<P, R>(&self, points: &[P], rng: &mut R) -> Result<Vec<Vec<f64>>>
    where
        P: AsRef<[f64]> + Sync,
        R: Rng + ?Sized,
    {
        self.validate(points)?;

        let mut centroids = self.initial_centroids(points, rng);
        debug!("Initialization completed.");

        for iteration in 1..=self.num_iterations {
            let assignment = self.assign(&centroids, points)?;
            centroids = self.compute_centroids(&assignment, iteration)?;
            debug!(
                "Iteration {} - {} clusters, sizes {:?}",
                iteration,
                centroids.len(),
                assignment.iter().map(|g| g.len()).collect::<Vec<_>>()
            );
        }

        Ok(centroids)
    }

    /// `fit` with a `StdRng` seeded from `seed`. Same seed and points give the same centroids.
    pub fn fit_seeded<P>(&self, points: &[P], seed: u64) -> Result<Vec<Vec<f64>>>
    where
        P: AsRef<[f64]> + Sync,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        self.fit(points, &mut rng)
    }

    /// `fit` with the configured seed, or OS entropy when no seed is configured.
    pub fn fit_default<P>(&self, points: &[P]) -> Result<Vec<Vec<f64>>>
    where
        P: AsRef<[f64]> + Sync,
    {
        match self.seed {
            Some(seed) => self.fit_seeded(points, seed),
            None => self.fit(points, &mut StdRng::from_entropy()),
        }
    }

    /// Groups `points` by nearest centroid, on the rayon pool if parallel assignment is on.
    pub fn assign<'a, C, P>(&self, centroids: &[C], points: &'a [P]) -> Result<Assignment<'a>>
    where
        C: AsRef<[f64]> + Sync,
        P: AsRef<[f64]> + Sync,
    {
        if self.parallel_assignment {
            assign_parallel(centroids, points)
        } else {
            assign(centroids, points)
        }
    }

    fn validate<P: AsRef<[f64]>>(&self, points: &[P]) -> Result<()> {
        if self.num_clusters < 1 {
            return Err(Error::InvalidParameter {
                name: "num_clusters",
                message: "must be at least 1".to_string(),
            });
        }
        if self.num_clusters > points.len() {
            return Err(Error::InvalidParameter {
                name: "num_clusters",
                message: format!(
                    "requested {} clusters, but only {} points are available",
                    self.num_clusters,
                    points.len()
                ),
            });
        }

        let dimension = points[0].as_ref().len();
        for point in points.iter() {
            check_dimension(dimension, point.as_ref().len())?;
        }
        Ok(())
    }

    fn initial_centroids<P, R>(&self, points: &[P], rng: &mut R) -> Vec<Vec<f64>>
    where
        P: AsRef<[f64]>,
        R: Rng + ?Sized,
    {
        rand::seq::index::sample(rng, points.len(), self.num_clusters)
            .into_iter()
            .map(|point_id| points[point_id].as_ref().to_vec())
            .collect()
    }

    fn compute_centroids(
        &self,
        assignment: &Assignment,
        iteration: usize,
    ) -> Result<Vec<Vec<f64>>> {
        let mut centroids = Vec::with_capacity(assignment.len());
        for (cluster, group) in assignment.iter().enumerate() {
            if !group.is_empty() {
                centroids.push(mean_of(group));
                continue;
            }

            match self.empty_cluster_policy {
                EmptyClusterPolicy::Drop => {
                    debug!("Dropping empty cluster {} in iteration {}", cluster, iteration);
                }
                EmptyClusterPolicy::Freeze => {
                    debug!("Freezing empty cluster {} in iteration {}", cluster, iteration);
                    centroids.push(group.centroid.clone());
                }
                EmptyClusterPolicy::Fail => {
                    return Err(Error::EmptyCluster { iteration, cluster });
                }
            }
        }
        Ok(centroids)
    }
}

// Coordinate-wise mean of a non-empty group.
fn mean_of(group: &ClusterGroup) -> Vec<f64> {
    let count = group.len() as f64;
    (0..group.centroid.len())
        .map(|dim| {
            let sum = group
                .members
                .iter()
                .map(|member| member[dim])
                .collect::<AccurateSum>();
            sum.total() / count
        })
        .collect()
}
