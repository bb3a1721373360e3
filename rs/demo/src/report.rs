use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::{Context, Result};
use clustering::kmeans::kmeans::KMeans;
use log::info;

use crate::votes::{Senator, VoteRecord};

/// Senators whose vote histories share a nearest centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct VotingCluster {
    pub centroid: Vec<f64>,
    pub senators: Vec<Senator>,

    // Number of senators per party, ordered by party name.
    pub party_totals: BTreeMap<String, usize>,
}

/// Clusters senators by vote history. Clusters that end up with no senators are left out.
pub fn cluster_senators(record: &VoteRecord, kmeans: &KMeans) -> Result<Vec<VotingCluster>> {
    let histories = record.histories();
    let centroids = kmeans
        .fit_default(histories)
        .context("Failed to cluster vote histories; every senator needs one vote per roll call")?;
    let assignment = kmeans.assign(&centroids, histories)?;

    let clusters = assignment
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| {
            let senators = group
                .member_indices
                .iter()
                .map(|&senator_id| record.senators()[senator_id].clone())
                .collect::<Vec<_>>();
            let mut party_totals = BTreeMap::new();
            for senator in senators.iter() {
                *party_totals.entry(senator.party.clone()).or_insert(0) += 1;
            }
            VotingCluster {
                centroid: group.centroid.clone(),
                senators,
                party_totals,
            }
        })
        .collect::<Vec<_>>();

    info!(
        "Grouped {} senators into {} voting clusters",
        record.len(),
        clusters.len()
    );
    Ok(clusters)
}

pub fn render(clusters: &[VotingCluster]) -> String {
    let mut out = String::new();
    for (i, cluster) in clusters.iter().enumerate() {
        let _ = writeln!(out, "----- Voting Cluster #{} -----", i + 1);
        for senator in cluster.senators.iter() {
            let _ = writeln!(out, "{}", senator);
        }
        let totals = cluster
            .party_totals
            .iter()
            .map(|(party, count)| format!("{}: {}", party, count))
            .collect::<Vec<_>>();
        let _ = writeln!(out, "{}", totals.join(", "));
    }
    out
}
