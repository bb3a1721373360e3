use clustering::kmeans::assignment::assign;
use clustering::kmeans::kmeans::{KMeans, DEFAULT_NUM_ITERATIONS};
use log::{info, LevelFilter};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let points = vec![
        vec![10.0, 41.0, 23.0],
        vec![22.0, 30.0, 29.0],
        vec![11.0, 42.0, 5.0],
        vec![20.0, 32.0, 4.0],
        vec![12.0, 40.0, 12.0],
        vec![21.0, 36.0, 23.0],
    ];

    let kmeans = KMeans::new(3, DEFAULT_NUM_ITERATIONS);
    let centroids = kmeans.fit_default(&points)?;
    info!("Found {} centroids", centroids.len());

    let assignment = assign(&centroids, &points)?;
    for group in assignment.iter() {
        println!("{:?}: {:?}", group.centroid, group.members);
    }
    Ok(())
}
