//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle:
//! 1. Load a configuration file and open the configured backend
//! 2. Enumerate the attached devices
//! 3. Run every command against one session
//! 4. Serialize the outputs as the CLI does
//! 5. Check the known-value scaling path with a scripted device

use quantis_rng::commands::{self, Command, CommandOutput};
use quantis_rng::device::{DeviceClass, DeviceSelector, ScriptedDevice, SimulatedDevice};
use quantis_rng::{BackendKind, RngConfig, RngError, Sampler};

#[test]
fn full_workflow_config_to_output() {
    // ── Step 1: Configuration ───────────────────────────────────────────
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("qrng.json");
    std::fs::write(
        &path,
        r#"{ "backend": "simulated", "seed": 2024, "device": "pci", "index": 0 }"#,
    )
    .unwrap();

    let cfg = RngConfig::load(&path).unwrap();
    assert_eq!(cfg.backend, BackendKind::Simulated);
    assert_eq!(cfg.selector(), DeviceSelector::new(DeviceClass::Pci, 0));

    let sampler = Sampler::open(cfg.open_device(), cfg.selector());

    // ── Step 2: Device report ───────────────────────────────────────────
    let info = Command::Info.run(&sampler).unwrap();
    let report = match &info {
        CommandOutput::Report(report) => report.clone(),
        other => panic!("info should produce a report, got {other:?}"),
    };
    assert_eq!(report.classes.len(), 2);
    assert_eq!(report.total_boards(), 2);
    assert!(
        chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok(),
        "generated_at should be RFC 3339: {}",
        report.generated_at
    );
    let text = info.to_string();
    assert!(text.contains(" Using driver version: 0.1"));
    assert!(text.contains("serial number: S/N not available"));

    // ── Step 3: Every command ───────────────────────────────────────────
    let roll = commands::roll(&sampler).unwrap();
    assert!((1..=100).contains(&roll.value));

    let flip = commands::coinflip(&sampler).unwrap();
    assert!(flip.value == 1 || flip.value == 2);

    let jackpot = commands::jackpot(&sampler).unwrap();
    assert!((0.01..=100.0).contains(&jackpot.value));
    assert_eq!((jackpot.value * 100.0).round() / 100.0, jackpot.value);

    let wheel = commands::wheel(&sampler).unwrap();
    assert!((1.0..=25.99).contains(&wheel.value));

    let ints = Command::RandomInt {
        min: -50,
        max: 50,
        count: Some(64),
    }
    .run(&sampler)
    .unwrap();
    match &ints {
        CommandOutput::Ints(arr) => {
            assert_eq!(arr.len(), 64);
            assert!(arr.values.iter().all(|v| (-50..=50).contains(v)));
        }
        other => panic!("expected ints, got {other:?}"),
    }

    let double = Command::RandomDouble {
        min: -1.5,
        max: 1.5,
    }
    .run(&sampler)
    .unwrap();
    match &double {
        CommandOutput::Double(d) => assert!((-1.5..=1.5).contains(&d.value)),
        other => panic!("expected double, got {other:?}"),
    }

    let strings = Command::RandomString {
        count: 3,
        length: 16,
    }
    .run(&sampler)
    .unwrap();

    // ── Step 4: Output serialization ────────────────────────────────────
    let json = serde_json::to_value(&strings).unwrap();
    assert_eq!(json["kind"], "strings");
    assert_eq!(json["result"]["length"], 16);
    let items = json["result"]["strings"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    for item in items {
        let s = item.as_str().unwrap();
        assert_eq!(s.len(), 32);
        assert!(hex::decode(s).is_ok());
    }

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["kind"], "report");
    assert_eq!(json["result"]["classes"][0]["class"], "pci");
}

#[test]
fn full_workflow_known_values() {
    let selector = DeviceSelector::new(DeviceClass::Usb, 0);

    // roll: 41 -> 42, -1 -> 100
    let sampler = Sampler::open(ScriptedDevice::from_i32s(&[41, -1]), selector);
    assert_eq!(commands::roll(&sampler).unwrap().value, 42);
    assert_eq!(commands::roll(&sampler).unwrap().value, 100);

    // coinflip: 5 mod 2 = 1 -> 2
    let sampler = Sampler::open(ScriptedDevice::from_i32s(&[5, 4]), selector);
    assert_eq!(commands::coinflip(&sampler).unwrap().value, 2);
    assert_eq!(commands::coinflip(&sampler).unwrap().value, 1);

    // A zero raw word maps to the lower bound.
    let sampler = Sampler::open(ScriptedDevice::from_u64s(&[0, 0]), selector);
    assert_eq!(commands::jackpot(&sampler).unwrap().value, 0.01);
    assert_eq!(commands::wheel(&sampler).unwrap().value, 1.0);

    let sampler = Sampler::open(ScriptedDevice::new(vec![0x1F, 0xA0, 0x00, 0xFF]), selector);
    let out = Command::RandomString {
        count: 2,
        length: 2,
    }
    .run(&sampler)
    .unwrap();
    assert_eq!(out.to_string(), "1fa0\n00ff\n");
    assert_eq!(sampler.session().device().requested_sizes(), vec![4]);
}

#[test]
fn full_workflow_seeded_sessions_agree() {
    let selector = DeviceSelector::new(DeviceClass::Usb, 0);
    let a = Sampler::open(SimulatedDevice::new(Some(9)), selector);
    let b = Sampler::open(SimulatedDevice::new(Some(9)), selector);

    for _ in 0..20 {
        assert_eq!(
            a.draw_scaled_int_array(8, 0, 1000).unwrap(),
            b.draw_scaled_int_array(8, 0, 1000).unwrap()
        );
        assert_eq!(
            a.draw_hex_string_array(2, 4).unwrap(),
            b.draw_hex_string_array(2, 4).unwrap()
        );
    }
}

#[test]
fn full_workflow_errors_surface_without_output() {
    let selector = DeviceSelector::new(DeviceClass::Pci, 0);
    let sampler = Sampler::open(ScriptedDevice::from_i32s(&[1, 2, 3]), selector);

    let bad = Command::RandomInt {
        min: 5,
        max: 4,
        count: Some(3),
    };
    assert!(matches!(
        bad.run(&sampler),
        Err(RngError::InvalidParameters(_))
    ));

    let huge = Command::RandomString {
        count: 1,
        length: quantis_rng::MAX_READ_SIZE + 1,
    };
    assert!(matches!(
        huge.run(&sampler),
        Err(RngError::TooLargeRequest { .. })
    ));

    // Nothing above reached the device.
    assert_eq!(sampler.session().device().read_count(), 0);
    assert_eq!(sampler.session().device().remaining(), 12);
}
