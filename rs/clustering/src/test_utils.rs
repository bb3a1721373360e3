use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Generate a random vector with a given dimension
pub fn generate_random_vector(dimension: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    generate_random_vector_with_rng(dimension, &mut rng)
}

pub fn generate_random_vector_with_rng<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Vec<f64> {
    let mut vector = vec![];
    for _ in 0..dimension {
        vector.push(rng.gen::<f64>());
    }
    vector
}

// Generate `num_points` points scattered around each of the given centers. Each coordinate is
// offset by at most `spread` from its center.
pub fn generate_blobs(
    centers: &[Vec<f64>],
    num_points: usize,
    spread: f64,
    seed: u64,
) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(centers.len() * num_points);
    for _ in 0..num_points {
        for center in centers {
            points.push(
                center
                    .iter()
                    .map(|&c| c + rng.gen_range(-spread..=spread))
                    .collect(),
            );
        }
    }
    points
}
