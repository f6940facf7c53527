//! Integration tests running the built-in coin flip through the headless shell

use coin_flip::{CoinFlipScene, FlipConfig};
use scenekit_shell::{run, run_with, NativeCore, ShellConfig};

fn config(seed: u64) -> ShellConfig {
    ShellConfig {
        frames: 200,
        clicks: vec![1],
        seed: Some(seed),
        coin: FlipConfig { idle_spin_deg_per_sec: 0.0, ..FlipConfig::default() },
        ..ShellConfig::default()
    }
}

#[test]
fn test_single_click_lands_once() {
    let report = run(&config(3)).expect("run should succeed");

    assert_eq!(report.seed, 3);
    assert_eq!(report.text_changes.len(), 1);
    let (frame, value) = &report.text_changes[0];
    assert!(*frame >= 1 && *frame <= 176, "landed on frame {}", frame);
    assert!(value == "HEAD" || value == "TAIL");
    assert_eq!(report.display.as_deref(), Some(value.as_str()));
}

#[test]
fn test_face_matches_coin_orientation() {
    for seed in 0..10 {
        let report = run(&config(seed)).unwrap();
        let up = report.stage.world_up("coin").unwrap();

        match report.display.as_deref() {
            Some("HEAD") => assert!(up.y > 0.99, "seed {}: up {:?}", seed, up),
            Some("TAIL") => assert!(up.y < -0.99, "seed {}: up {:?}", seed, up),
            other => panic!("seed {}: display {:?}", seed, other),
        }
    }
}

#[test]
fn test_same_seed_same_report() {
    assert_eq!(run(&config(21)).unwrap(), run(&config(21)).unwrap());
}

#[test]
fn test_two_separate_clicks_flip_twice() {
    let config = ShellConfig { frames: 400, clicks: vec![1, 200], ..config(5) };
    let report = run(&config).unwrap();

    assert_eq!(report.text_changes.len(), 2);
    assert!(report.text_changes[1].0 >= 200);
}

#[test]
fn test_no_clicks_leaves_display_at_zero() {
    let config = ShellConfig { clicks: vec![], ..config(1) };
    let report = run(&config).unwrap();

    assert!(report.text_changes.is_empty());
    assert_eq!(report.display.as_deref(), Some("0"));
}

#[test]
fn test_stage_has_full_layout_before_shutdown() {
    let report = run(&config(2)).unwrap();
    for id in ["cube", "coin", "coin-head", "coin-tail", "display"] {
        assert!(report.stage.get(id).is_some(), "missing {}", id);
    }
    assert!(report.stage.background().is_some());
    assert!(report.stage.camera().is_some());
}

#[test]
fn test_run_with_custom_core() {
    let scene = CoinFlipScene::with_config(FlipConfig {
        idle_spin_deg_per_sec: 0.0,
        half_turn_choices: 1,
        ..FlipConfig::default()
    })
    .unwrap();
    let mut core = NativeCore::new(scene);

    let report = run_with(&mut core, &config(9)).unwrap();

    // one choice means a zero target, resolved on the first tick
    assert_eq!(report.text_changes, vec![(1, "HEAD".to_string())]);
}

#[test]
fn test_invalid_coin_settings_fail_before_running() {
    let mut config = config(0);
    config.coin.tick_period_ms = 0.0;
    assert!(matches!(run(&config), Err(scenekit_shell::Error::Scene(_))));
}
