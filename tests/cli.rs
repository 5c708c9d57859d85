//! Runs the `greek-nn` binary through each subcommand on a tiny dataset.

use std::path::Path;
use std::process::{Command, Output};

use greek_nn::{GreekLetter, Sample};
use image::{DynamicImage, GrayImage, Luma};

const SIDE: u32 = 28;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_greek-nn"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to spawn greek-nn")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Left half inked for Alpha, right half inked for Beta.
fn half_inked(left: bool) -> Vec<f64> {
    (0..SIDE * SIDE)
        .map(|i| {
            let on_left = i % SIDE < SIDE / 2;
            if on_left == left { 1.0 } else { 0.0 }
        })
        .collect()
}

fn write_dataset(path: &Path) {
    let samples: Vec<Sample> = (0..5)
        .flat_map(|_| {
            [
                Sample::new(half_inked(true), GreekLetter::Alpha),
                Sample::new(half_inked(false), GreekLetter::Beta),
            ]
        })
        .collect();
    std::fs::write(path, serde_json::to_string(&samples).unwrap()).unwrap();
}

fn write_left_inked_png(path: &Path) {
    let img = GrayImage::from_fn(SIDE, SIDE, |x, _| Luma([if x < SIDE / 2 { 0 } else { 255 }]));
    DynamicImage::ImageLuma8(img).save(path).unwrap();
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn init_train_test_predict() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    let data = dir.path().join("data.json");
    let model = dir.path().join("model.json");
    let png = dir.path().join("letter.png");
    write_dataset(&data);
    write_left_inked_png(&png);

    let out = run(&[
        "init-config", "--out", arg(&config), "--hidden", "8", "--epochs", "20",
        "--learning-rate", "0.1", "--acceptable-error", "0.01",
    ]);
    assert!(out.status.success(), "init-config failed: {}", stderr(&out));
    assert!(config.exists());

    let out = run(&[
        "train", "--config", arg(&config), "--data", arg(&data), "--out", arg(&model),
        "--test", arg(&data),
    ]);
    assert!(out.status.success(), "train failed: {}", stderr(&out));
    assert!(stdout(&out).contains("accuracy:"));
    assert!(model.exists());

    let out = run(&["test", "--model", arg(&model), "--data", arg(&data)]);
    assert!(out.status.success(), "test failed: {}", stderr(&out));
    assert!(stdout(&out).contains("on 10 samples"));

    let out = run(&["predict", "--model", arg(&model), "--image", arg(&png)]);
    assert!(out.status.success(), "predict failed: {}", stderr(&out));
    assert!(stdout(&out).contains("Custom DNN (2 layers)"));
}

#[test]
fn failures_exit_non_zero_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    let out = run(&["init-config", "--out", arg(&config), "--learning-rate", "2.0"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("LearningRate"));
    assert!(!config.exists());

    let out = run(&["init-config", "--out", arg(&config)]);
    assert!(out.status.success(), "init-config failed: {}", stderr(&out));

    let out = run(&[
        "train", "--config", arg(&config),
        "--data", arg(&dir.path().join("absent.json")),
        "--out", arg(&dir.path().join("model.json")),
    ]);
    assert!(!out.status.success());
    let err = stderr(&out);
    assert!(err.contains("absent.json"), "unexpected stderr: {err}");
    assert!(!err.contains("panicked"));

    let out = run(&["predict", "--model", arg(&dir.path().join("missing.json")), "--image", "x.png"]);
    assert!(!out.status.success());
    assert!(!stderr(&out).contains("panicked"));
}
