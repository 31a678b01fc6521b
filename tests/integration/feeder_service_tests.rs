//! Integration tests for the FeederService command pipeline.
//!
//! These run on the host and exercise the full chain — per-pin guards,
//! pin claiming, driver construction, release on every exit path —
//! against the simulated GPIO layer. Timings are shrunk so a test
//! command completes in milliseconds.

use crate::mock_hw::RecordingSink;
use petfeeder::app::commands::FeederCommand;
use petfeeder::app::events::FeederEvent;
use petfeeder::app::service::FeederService;
use petfeeder::config::FeederConfig;
use petfeeder::error::{Error, InitError};
use petfeeder::gpio::{Level, PinController};

fn fast_config() -> FeederConfig {
    FeederConfig {
        treat_steps: 10,
        treat_step_interval_us: 1,
        door_hold_ms: 1,
        ..FeederConfig::default()
    }
}

fn make_service() -> (FeederService, PinController) {
    let controller = PinController::new();
    let service = FeederService::new(controller.clone(), fast_config()).unwrap();
    (service, controller)
}

#[test]
fn dispense_treat_claims_drives_and_releases() {
    let (service, controller) = make_service();
    let mut sink = RecordingSink::new();

    service
        .handle_command(FeederCommand::DispenseTreat, &mut sink)
        .unwrap();

    // Pins are released and reset on the way out.
    assert!(!controller.is_claimed(5));
    assert!(!controller.is_claimed(4));
    assert_eq!(controller.level(5), Level::Low);
    assert_eq!(controller.level(4), Level::Low);

    assert!(sink.contains(&FeederEvent::CommandStarted(FeederCommand::DispenseTreat)));
    assert!(sink.contains(&FeederEvent::TreatDispensed {
        steps: 10,
        lifetime_steps: 10,
    }));
}

#[test]
fn lifetime_counters_accumulate_across_commands() {
    let (service, _controller) = make_service();
    let mut sink = RecordingSink::new();

    service
        .handle_command(FeederCommand::DispenseTreat, &mut sink)
        .unwrap();
    service
        .handle_command(FeederCommand::DispenseTreat, &mut sink)
        .unwrap();
    service
        .handle_command(FeederCommand::OpenDoor, &mut sink)
        .unwrap();

    assert_eq!(service.commands_handled(), 3);
    assert_eq!(service.lifetime_steps(), 20);
    assert!(sink.contains(&FeederEvent::TreatDispensed {
        steps: 10,
        lifetime_steps: 20,
    }));
}

#[test]
fn door_commands_pulse_their_relay_and_release() {
    let (service, controller) = make_service();
    let mut sink = RecordingSink::new();

    service
        .handle_command(FeederCommand::OpenDoor, &mut sink)
        .unwrap();
    assert!(sink.contains(&FeederEvent::DoorOpened { held_ms: 1 }));
    assert!(!controller.is_claimed(4));
    assert_eq!(controller.level(4), Level::Low);

    service
        .handle_command(FeederCommand::CloseDoor, &mut sink)
        .unwrap();
    assert!(sink.contains(&FeederEvent::DoorClosed { held_ms: 1 }));
    assert!(!controller.is_claimed(5));
    assert_eq!(controller.level(5), Level::Low);
}

#[test]
fn busy_pin_surfaces_as_failed_command() {
    let (service, controller) = make_service();
    let mut sink = RecordingSink::new();

    // Something outside the service holds GPIO 4.
    let foreign = controller.claim(4).unwrap();

    let err = service
        .handle_command(FeederCommand::OpenDoor, &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::Init(InitError::PinBusy(4)));
    assert!(sink.contains(&FeederEvent::CommandFailed {
        command: FeederCommand::OpenDoor,
        error: err,
    }));

    // Once the foreign owner lets go, the command goes through.
    drop(foreign);
    service
        .handle_command(FeederCommand::OpenDoor, &mut sink)
        .unwrap();
}

#[test]
fn overlapping_commands_on_shared_pins_serialize() {
    // GPIO 4 is shared between the treat dispense (DIR) and the door-open
    // relay. With per-pin guards, concurrent commands queue up instead of
    // failing with PinBusy.
    let controller = PinController::new();
    let config = FeederConfig {
        treat_steps: 50,
        treat_step_interval_us: 200,
        door_hold_ms: 10,
        ..FeederConfig::default()
    };
    let service = FeederService::new(controller, config).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = &service;
                s.spawn(move || {
                    let mut sink = RecordingSink::new();
                    let cmd = if i % 2 == 0 {
                        FeederCommand::DispenseTreat
                    } else {
                        FeederCommand::OpenDoor
                    };
                    service.handle_command(cmd, &mut sink)
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
    });

    assert_eq!(service.commands_handled(), 4);
    assert_eq!(service.lifetime_steps(), 100);
}

#[test]
fn invalid_parameter_set_is_rejected_at_construction() {
    let bad = FeederConfig {
        treat_steps: -5,
        ..FeederConfig::default()
    };
    let err = FeederService::new(PinController::new(), bad).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}
