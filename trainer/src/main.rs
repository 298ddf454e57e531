use std::{env, io, path::PathBuf};

use log::info;
use ndarray::array;

use regression::{Dataset, OlsTrainer, artifact};

const DEFAULT_MODEL_PATH: &str = "model.json";

/// The fixed training set: three features per sample, one target each.
fn training_data() -> Dataset {
    let features = array![
        [1.0, 2.0, 3.0],
        [2.0, 3.0, 4.0],
        [3.0, 4.0, 5.0],
        [4.0, 5.0, 6.0],
        [5.0, 6.0, 7.0],
    ];
    let targets = array![10.0, 14.0, 18.0, 22.0, 26.0];

    Dataset::new(features, targets)
}

fn main() -> io::Result<()> {
    env_logger::init();

    let dataset = training_data();
    info!(
        "fitting linear model on {} samples with {} features",
        dataset.len(),
        dataset.num_features()
    );

    let model = OlsTrainer::default().fit(&dataset);
    info!(
        "fitted coefficients {:?}, intercept {}",
        model.coefficients(),
        model.intercept()
    );

    let path = PathBuf::from(
        env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string()),
    );
    artifact::save(&model, &path)?;

    println!("model trained and saved to {}", path.display());
    Ok(())
}
