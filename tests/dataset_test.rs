// ABOUTME: Integration tests for CSV dataset loading and joining
// ABOUTME: Uses temporary files to exercise headers, missing files, malformed rows, and join semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calorie_advisor::dataset::{load_training_data, TrainingData};
use calorie_advisor::errors::ErrorCode;
use calorie_advisor::models::Gender;
use std::path::Path;
use tempfile::TempDir;

const EXERCISE_HEADER: &str =
    "User_ID,Gender,Age,Height,Weight,Duration,Heart_Rate,Body_Temp,Activity_Level\n";

#[test]
fn test_loads_and_joins_files() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let exercise = common::write_csv(
        dir.path(),
        "exercise.csv",
        &format!(
            "{EXERCISE_HEADER}\
             1,Male,68,190.0,94.0,29.0,105.0,40.8,Regular exercise\n\
             2,Female,20,166.0,60.0,14.0,94.0,40.3,Light walking\n\
             3,female,69,179.0,79.0,5.0,88.0,38.7,No activity\n"
        ),
    );
    let calories = common::write_csv(
        dir.path(),
        "calories.csv",
        "User_ID,Calories\n1,231.0\n2,66.0\n9,10.0\n",
    );

    let data = load_training_data(&exercise, &calories).unwrap();
    assert_eq!(data.exercise().len(), 3);
    assert_eq!(data.calories().len(), 3);
    assert_eq!(data.records().len(), 2);
    assert_eq!(data.records()[1].gender, Gender::Female);
    assert_eq!(
        data.records()[0].activity_level.as_deref(),
        Some("Regular exercise")
    );
}

#[test]
fn test_duplicate_ids_keep_every_pair() {
    let dir = TempDir::new().unwrap();
    let exercise = common::write_csv(
        dir.path(),
        "exercise.csv",
        &format!("{EXERCISE_HEADER}1,Male,30,180,80,10,100,39.0,Light walking\n"),
    );
    let calories = common::write_csv(dir.path(), "calories.csv", "User_ID,Calories\n1,50\n1,55\n");

    let data = TrainingData::load(&exercise, &calories).unwrap();
    let labels: Vec<f64> = data.records().iter().map(|r| r.calories).collect();
    assert_eq!(labels, vec![50.0, 55.0]);
}

#[test]
fn test_missing_file_is_data_error() {
    let dir = TempDir::new().unwrap();
    let calories = common::write_csv(dir.path(), "calories.csv", "User_ID,Calories\n1,50\n");
    let err = TrainingData::load(Path::new("/nonexistent/exercise.csv"), &calories).unwrap_err();
    assert_eq!(err.code, ErrorCode::DataError);
    assert!(err.message.contains("/nonexistent/exercise.csv"));
}

#[test]
fn test_malformed_number_names_file_and_row() {
    let dir = TempDir::new().unwrap();
    let exercise = common::write_csv(
        dir.path(),
        "exercise.csv",
        &format!("{EXERCISE_HEADER}1,Male,30,180,80,10,100,39.0,Light walking\n"),
    );
    let calories = common::write_csv(
        dir.path(),
        "calories.csv",
        "User_ID,Calories\n1,50\n2,lots\n",
    );
    let err = TrainingData::load(&exercise, &calories).unwrap_err();
    assert_eq!(err.code, ErrorCode::DataError);
    assert!(err.message.contains("calories.csv: row 2"), "{}", err.message);
}

#[test]
fn test_empty_table_is_data_error() {
    let dir = TempDir::new().unwrap();
    let exercise = common::write_csv(dir.path(), "exercise.csv", EXERCISE_HEADER);
    let calories = common::write_csv(dir.path(), "calories.csv", "User_ID,Calories\n1,50\n");
    let err = TrainingData::load(&exercise, &calories).unwrap_err();
    assert_eq!(err.code, ErrorCode::DataError);
}

#[test]
fn test_fingerprint_is_stable_for_identical_data() {
    let first = common::synthetic_training_data(40);
    let second = common::synthetic_training_data(40);
    let third = common::synthetic_training_data(41);
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_ne!(first.fingerprint(), third.fingerprint());
}

#[test]
fn test_bundled_sample_data_loads() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let data = TrainingData::load(
        &root.join("data/exercise.csv"),
        &root.join("data/calories.csv"),
    )
    .unwrap();
    assert_eq!(data.records().len(), 600);
}
