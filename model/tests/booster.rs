use std::{path::PathBuf, sync::Arc, thread};

use model::{Booster, ModelErr, ModelService, Objective};
use ndarray::array;

fn demo_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../assets/house_model.json")
}

#[test]
fn loads_demo_artifact() {
    let booster = Booster::load(demo_model_path()).unwrap();

    assert_eq!(booster.num_trees(), 4);
    assert_eq!(booster.num_features(), 5);
    assert_eq!(booster.objective(), Objective::Identity);
    assert_eq!(
        booster.feature_names(),
        ["MedInc", "HouseAge", "AveRooms", "Latitude", "Longitude"]
    );
}

#[test]
fn scores_a_southern_california_row() {
    let booster = Booster::load(demo_model_path()).unwrap();

    let rows = array![[5.0, 20.0, 5.0, 34.0, -118.0]];
    let preds = booster.predict(rows.view()).unwrap();

    assert_eq!(preds.len(), 1);
    // 2.0685 + 0.35 + 0.25 - 0.05 + 0.15
    assert!((preds[0] - 2.7685).abs() < 1e-5, "got {}", preds[0]);
}

#[test]
fn higher_income_scores_higher() {
    let booster = Booster::load(demo_model_path()).unwrap();

    let rows = array![
        [1.5, 20.0, 5.0, 34.0, -118.0],
        [8.0, 20.0, 5.0, 34.0, -118.0],
    ];
    let preds = booster.predict(rows.view()).unwrap();

    assert!(preds[1] > preds[0]);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Booster::load("/definitely/not/here/model.json").unwrap_err();

    match err {
        ModelErr::Io { path, .. } => assert!(path.ends_with("model.json")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn shared_handle_serves_concurrent_readers() {
    let booster = Arc::new(Booster::load(demo_model_path()).unwrap());
    let expected = booster
        .predict(array![[5.0, 20.0, 5.0, 34.0, -118.0]].view())
        .unwrap()[0];

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let booster = Arc::clone(&booster);
            thread::spawn(move || {
                booster
                    .predict(array![[5.0, 20.0, 5.0, 34.0, -118.0]].view())
                    .unwrap()[0]
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
