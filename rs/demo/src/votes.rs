use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use config::cluster_votes::VoteValueConfig;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

// person, state, district, vote, name, party
const NUM_FIELDS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Senator {
    pub name: String,
    pub party: String,
    pub state: String,
}

impl Senator {
    pub fn new(name: &str, party: &str, state: &str) -> Self {
        Self {
            name: name.to_string(),
            party: party.to_string(),
            state: state.to_string(),
        }
    }
}

impl fmt::Display for Senator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-{})", self.name, self.party, self.state)
    }
}

/// Vote history of every senator, one value per roll call, in the order roll calls were read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoteRecord {
    senators: Vec<Senator>,
    histories: Vec<Vec<f64>>,
    topics: Vec<String>,

    senator_ids: HashMap<Senator, usize>,
}

impl VoteRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vote(&mut self, senator: Senator, value: f64) {
        let senator_id = match self.senator_ids.get(&senator) {
            Some(&id) => id,
            None => {
                let id = self.senators.len();
                self.senator_ids.insert(senator.clone(), id);
                self.senators.push(senator);
                self.histories.push(vec![]);
                id
            }
        };
        self.histories[senator_id].push(value);
    }

    pub fn add_topic(&mut self, topic: String) {
        self.topics.push(topic);
    }

    /// Senators in the order they first appeared.
    pub fn senators(&self) -> &[Senator] {
        &self.senators
    }

    /// Vote histories, parallel to `senators()`.
    pub fn histories(&self) -> &[Vec<f64>] {
        &self.histories
    }

    pub fn history_of(&self, senator: &Senator) -> Option<&[f64]> {
        self.senator_ids
            .get(senator)
            .map(|&id| self.histories[id].as_slice())
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.senators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senators.is_empty()
    }
}

/// Reads roll-call files from `input_dir`.
///
/// Every `.csv` file is one roll call: a topic row, a header row, then one row per senator
/// with `person, state, district, vote, name, party`. Files are read in path order.
pub fn load_vote_record<P: AsRef<Path>>(
    input_dir: P,
    values: &VoteValueConfig,
) -> Result<VoteRecord> {
    let input_dir = input_dir.as_ref();
    let mut paths = std::fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read input directory {}", input_dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()?
        .into_iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .collect::<Vec<_>>();
    paths.sort();

    let mut record = VoteRecord::new();
    for path in paths.iter() {
        read_roll_call(path, values, &mut record)
            .with_context(|| format!("Failed to read roll call {}", path.display()))?;
    }

    info!(
        "Loaded {} roll calls for {} senators from {}",
        paths.len(),
        record.len(),
        input_dir.display()
    );
    Ok(record)
}

fn read_roll_call(path: &Path, values: &VoteValueConfig, record: &mut VoteRecord) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;
    let mut rows = reader.records();

    let topic = rows
        .next()
        .ok_or_else(|| anyhow!("Missing vote topic"))??;
    record.add_topic(join_fields(&topic));
    rows.next().ok_or_else(|| anyhow!("Missing header row"))??;

    let mut num_votes = 0;
    for (row_id, row) in rows.enumerate() {
        let row = row?;
        if row.len() != NUM_FIELDS {
            return Err(anyhow!(
                "Row {} has {} fields, expected {}",
                row_id + 3,
                row.len(),
                NUM_FIELDS
            ));
        }

        let vote = &row[3];
        let value = values
            .value_of(vote)
            .ok_or_else(|| anyhow!("Unknown vote {:?} in row {}", vote, row_id + 3))?;
        record.add_vote(Senator::new(&row[4], &row[5], &row[1]), value);
        num_votes += 1;
    }

    debug!("Read {} votes from {}", num_votes, path.display());
    Ok(())
}

fn join_fields(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}
