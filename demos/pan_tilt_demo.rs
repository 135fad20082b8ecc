//! Pan/tilt demo.
//!
//! Runs the controller against simulated ports: pans to +45°, tilts down a
//! little, reports where the head ended up, returns home and shuts down.

use std::time::Duration;

use pantilt_stepper::{PanTiltController, PortEvent, SimulatedPort, SystemConfig};

fn main() -> pantilt_stepper::Result<()> {
    println!("=== Pan/Tilt Demo ===\n");

    let config = SystemConfig::default();
    println!("Configuration:");
    println!(
        "  Pan:  {} steps/deg, {}..{} deg",
        config.pan.steps_per_degree, config.pan.limits.min.0, config.pan.limits.max.0
    );
    println!(
        "  Tilt: {} steps/deg, {}..{} deg",
        config.tilt.steps_per_degree, config.tilt.limits.min.0, config.tilt.limits.max.0
    );
    println!(
        "  Drive: {}-{} Hz, tick {} ms",
        config.drive.scaled_min_hz(),
        config.drive.scaled_max_hz(),
        config.drive.tick_ms
    );
    println!(
        "  Channels: pan on {}, tilt on {}\n",
        config.channels.pan, config.channels.tilt
    );

    let m1 = SimulatedPort::new("m1");
    let m2 = SimulatedPort::new("m2");
    let mut controller = PanTiltController::builder()
        .config(config)
        .m1_port(m1.clone())
        .m2_port(m2.clone())
        .build()?;

    let pan_steps = controller.pan(45.0)?;
    let tilt_steps = controller.tilt(-10.0)?;
    println!("Commanded pan {} steps, tilt {} steps", pan_steps.0, tilt_steps.0);

    let settled = controller.wait_settled(Duration::from_secs(10));
    let (pan, tilt) = controller.get_position();
    println!("Settled: {} -> pan {:.2} deg, tilt {:.2} deg", settled, pan.0, tilt.0);

    for (name, port) in [("M1", &m1), ("M2", &m2)] {
        let retunes = port
            .events()
            .iter()
            .filter(|e| matches!(e, PortEvent::Frequency(_)))
            .count();
        println!(
            "  {}: {} frequency updates, bursts {:?}",
            name,
            retunes,
            port.bursts()
        );
    }

    println!("\nReturning home and shutting down...");
    controller.shutdown()?;
    let (pan, tilt) = controller.get_position();
    println!("Parked at pan {:.2} deg, tilt {:.2} deg", pan.0, tilt.0);
    println!(
        "Drives enabled: M1 {}, M2 {}",
        m1.is_enabled(),
        m2.is_enabled()
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
