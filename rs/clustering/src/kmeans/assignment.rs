use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::distance::l2::{check_dimension, L2DistanceCalculator};
use crate::error::{Error, Result};
use crate::DistanceCalculator;

/// One centroid and the points closest to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterGroup<'a> {
    pub centroid: Vec<f64>,

    // Member points, in the order they were supplied.
    pub members: Vec<&'a [f64]>,

    // Position of each member in the input point sequence.
    pub member_indices: Vec<usize>,
}

impl<'a> ClusterGroup<'a> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Grouping of points by nearest centroid.
///
/// There is exactly one group per centroid, in the order the centroids were given. Groups may
/// be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<'a> {
    groups: Vec<ClusterGroup<'a>>,

    // For each input point, the index of its group.
    labels: Vec<usize>,
}

impl<'a> Assignment<'a> {
    fn from_labels<C, P>(centroids: &[C], points: &'a [P], labels: Vec<usize>) -> Self
    where
        C: AsRef<[f64]>,
        P: AsRef<[f64]>,
    {
        let mut groups = centroids
            .iter()
            .map(|c| ClusterGroup {
                centroid: c.as_ref().to_vec(),
                members: vec![],
                member_indices: vec![],
            })
            .collect::<Vec<_>>();

        for (point_id, (point, &label)) in points.iter().zip(labels.iter()).enumerate() {
            groups[label].members.push(point.as_ref());
            groups[label].member_indices.push(point_id);
        }

        Self { groups, labels }
    }

    pub fn groups(&self) -> &[ClusterGroup<'a>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<ClusterGroup<'a>> {
        self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClusterGroup<'a>> {
        self.groups.iter()
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Looks up the group of a centroid by value. If several centroids share the same
    /// coordinates, the first one wins, which is also the one that received the points.
    pub fn get(&self, centroid: &[f64]) -> Option<&ClusterGroup<'a>> {
        self.groups.iter().find(|g| g.centroid == centroid)
    }

    /// Number of groups, including empty ones.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.labels.len()
    }

    pub fn num_empty_groups(&self) -> usize {
        self.groups.iter().filter(|g| g.is_empty()).count()
    }
}

impl<'a, 'b> IntoIterator for &'b Assignment<'a> {
    type Item = &'b ClusterGroup<'a>;
    type IntoIter = std::slice::Iter<'b, ClusterGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

fn validate<C, P>(centroids: &[C], points: &[P]) -> Result<()>
where
    C: AsRef<[f64]>,
    P: AsRef<[f64]>,
{
    let Some(first) = centroids.first() else {
        if points.is_empty() {
            return Ok(());
        }
        return Err(Error::InvalidParameter {
            name: "centroids",
            message: format!("no centroid to assign {} points to", points.len()),
        });
    };

    let dimension = first.as_ref().len();
    for centroid in centroids.iter() {
        check_dimension(dimension, centroid.as_ref().len())?;
    }
    for point in points.iter() {
        check_dimension(dimension, point.as_ref().len())?;
    }
    Ok(())
}

/// Index of the centroid closest to `point`. Ties go to the centroid that comes first.
pub fn nearest_centroid<C: AsRef<[f64]>>(
    point: &[f64],
    centroids: &[C],
    distance_calculator: &L2DistanceCalculator,
) -> Result<usize> {
    let mut label = 0;
    let mut min_distance = f64::INFINITY;
    for (centroid_id, centroid) in centroids.iter().enumerate() {
        let distance = distance_calculator.calculate(point, centroid.as_ref())?;
        if centroid_id == 0 || distance < min_distance {
            min_distance = distance;
            label = centroid_id;
        }
    }
    Ok(label)
}

/// Groups every point with its nearest centroid.
pub fn assign<'a, C, P>(centroids: &[C], points: &'a [P]) -> Result<Assignment<'a>>
where
    C: AsRef<[f64]>,
    P: AsRef<[f64]>,
{
    validate(centroids, points)?;

    let distance_calculator = L2DistanceCalculator::new();
    let labels = points
        .iter()
        .map(|point| nearest_centroid(point.as_ref(), centroids, &distance_calculator))
        .collect::<Result<Vec<usize>>>()?;

    Ok(Assignment::from_labels(centroids, points, labels))
}

/// Same result as [`assign`], with the nearest-centroid search spread over the rayon pool.
/// Labels are collected in point order before groups are built, so the output does not
/// depend on scheduling.
pub fn assign_parallel<'a, C, P>(centroids: &[C], points: &'a [P]) -> Result<Assignment<'a>>
where
    C: AsRef<[f64]> + Sync,
    P: AsRef<[f64]> + Sync,
{
    validate(centroids, points)?;

    let distance_calculator = L2DistanceCalculator::new();
    let labels = points
        .par_iter()
        .map(|point| nearest_centroid(point.as_ref(), centroids, &distance_calculator))
        .collect::<Result<Vec<usize>>>()?;

    Ok(Assignment::from_labels(centroids, points, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::l2::distance;
    use crate::test_utils::generate_blobs;

    fn sample_points() -> Vec<Vec<f64>> {
        vec![
            vec![10.0, 41.0, 23.0],
            vec![22.0, 30.0, 29.0],
            vec![11.0, 42.0, 5.0],
            vec![20.0, 32.0, 4.0],
            vec![12.0, 40.0, 12.0],
            vec![21.0, 36.0, 23.0],
        ]
    }

    #[test]
    fn test_assign_groups_by_nearest_centroid() {
        let points = vec![
            vec![0.0, 0.0],
            vec![10.0, 10.0],
            vec![0.0, 1.0],
            vec![10.0, 11.0],
        ];
        let centroids = vec![vec![0.0, 0.5], vec![10.0, 10.5]];
        let assignment = assign(&centroids, &points).unwrap();

        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.labels(), &[0, 1, 0, 1]);

        let first = &assignment.groups()[0];
        assert_eq!(first.centroid, vec![0.0, 0.5]);
        assert_eq!(first.members, vec![&[0.0, 0.0][..], &[0.0, 1.0][..]]);
        assert_eq!(first.member_indices, vec![0, 2]);

        let second = assignment.get(&[10.0, 10.5]).unwrap();
        assert_eq!(second.members, vec![&[10.0, 10.0][..], &[10.0, 11.0][..]]);
        assert_eq!(second.member_indices, vec![1, 3]);
    }

    #[test]
    fn test_assign_partitions_points() {
        let points = sample_points();
        let centroids = vec![points[0].clone(), points[3].clone(), vec![15.0, 35.0, 15.0]];
        let assignment = assign(&centroids, &points).unwrap();

        let total: usize = assignment.iter().map(|g| g.len()).sum();
        assert_eq!(total, points.len());
        assert_eq!(assignment.num_points(), points.len());

        let mut seen = assignment
            .iter()
            .flat_map(|g| g.member_indices.iter().copied())
            .collect::<Vec<_>>();
        seen.sort();
        assert_eq!(seen, (0..points.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_assign_picks_closest() {
        let points = generate_blobs(&[vec![0.0, 0.0, 0.0], vec![5.0, 5.0, 5.0]], 50, 3.0, 11);
        let centroids = vec![vec![1.0, 1.0, 1.0], vec![4.0, 4.0, 4.0], vec![2.5, 0.0, 5.0]];
        let assignment = assign(&centroids, &points).unwrap();

        for (point, &label) in points.iter().zip(assignment.labels()) {
            let chosen = distance(point, &centroids[label]).unwrap();
            for centroid in centroids.iter() {
                assert!(chosen <= distance(point, centroid).unwrap());
            }
        }
    }

    #[test]
    fn test_assign_tie_goes_to_first_centroid() {
        let points = vec![vec![0.0, 0.0]];

        let centroids = vec![vec![0.0, 1.0], vec![0.0, -1.0]];
        let assignment = assign(&centroids, &points).unwrap();
        assert_eq!(assignment.labels(), &[0]);
        assert!(assignment.groups()[1].is_empty());

        let centroids = vec![vec![0.0, -1.0], vec![0.0, 1.0]];
        let assignment = assign(&centroids, &points).unwrap();
        assert_eq!(assignment.groups()[0].centroid, vec![0.0, -1.0]);
        assert_eq!(assignment.groups()[0].len(), 1);
    }

    #[test]
    fn test_assign_duplicate_centroids() {
        let points = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let centroids = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let assignment = assign(&centroids, &points).unwrap();

        assert_eq!(assignment.len(), 3);
        assert_eq!(assignment.num_empty_groups(), 1);
        assert_eq!(assignment.groups()[0].member_indices, vec![0, 1]);
        assert!(assignment.groups()[1].is_empty());
        assert_eq!(assignment.get(&[1.0, 1.0]).unwrap().len(), 2);
    }

    #[test]
    fn test_assign_is_idempotent() {
        let points = sample_points();
        let centroids = vec![points[1].clone(), points[2].clone()];
        let first = assign(&centroids, &points).unwrap();
        let second = assign(&centroids, &points).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_assign_parallel_matches_sequential() {
        let points = generate_blobs(
            &[vec![0.0, 0.0], vec![3.0, 3.0], vec![-3.0, 4.0]],
            200,
            2.5,
            5,
        );
        let centroids = vec![vec![0.0, 0.0], vec![3.0, 3.0], vec![-3.0, 4.0], vec![0.0, 3.0]];

        let sequential = assign(&centroids, &points).unwrap();
        let parallel = assign_parallel(&centroids, &points).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_assign_dimension_mismatch() {
        let points = vec![vec![0.0, 0.0], vec![1.0, 1.0, 1.0]];
        let centroids = vec![vec![0.0, 0.0]];
        assert_eq!(
            assign(&centroids, &points),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
        assert!(assign_parallel(&centroids, &points).is_err());

        let centroids = vec![vec![0.0, 0.0], vec![0.0]];
        assert!(assign(&centroids, &points[..1]).is_err());
    }

    #[test]
    fn test_assign_without_centroids() {
        let points = vec![vec![0.0, 0.0]];
        let centroids: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            assign(&centroids, &points),
            Err(Error::InvalidParameter { name: "centroids", .. })
        ));

        let no_points: Vec<Vec<f64>> = vec![];
        let assignment = assign(&centroids, &no_points).unwrap();
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_assign_without_points() {
        let centroids = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let points: Vec<Vec<f64>> = vec![];
        let assignment = assign(&centroids, &points).unwrap();
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.num_empty_groups(), 2);
        assert_eq!(assignment.num_points(), 0);
    }
}
