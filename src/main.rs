//! Pool Table entry point
//!
//! Native build runs the table headless: it breaks with a pointer fling,
//! simulates a few seconds at 60 Hz and logs what happened.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use pool_table::renderer::CircleBatch;
    use pool_table::sim::{FrameInfo, PointerEvent, Simulation};
    use pool_table::ArenaConfig;

    env_logger::init();
    log::info!("Pool Table (native) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            ArenaConfig::from_json(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => ArenaConfig::default(),
    };

    let mut sim = Simulation::new(&config).context("building table")?;
    log::info!("Table seeded with {}", sim.arena().seed);

    // Grab the cue ball and fling it
    let cue = sim.arena().balls[0].pos;
    let frame_ms = 1000.0 / 60.0;
    let mut batch = CircleBatch::default();
    let (mut collisions, mut bounces) = (0, 0);

    for n in 0..600u32 {
        let now = f64::from(n + 1) * frame_ms;
        match n {
            0 => {
                sim.push_input(PointerEvent::Move {
                    x: cue.x,
                    y: cue.y,
                    dx: 0.0,
                    dy: 0.0,
                    at_ms: now,
                });
                sim.push_input(PointerEvent::Press);
            }
            1 => sim.push_input(PointerEvent::Move {
                x: cue.x + 6.0,
                y: cue.y + 2.0,
                dx: 6.0,
                dy: 2.0,
                at_ms: now,
            }),
            2 => sim.push_input(PointerEvent::Release),
            _ => {}
        }

        let report = sim.update(&FrameInfo::after(now - frame_ms, now));
        collisions += report.collisions;
        bounces += report.wall_bounces;

        batch.begin_frame(sim.arena().width, sim.arena().height);
        sim.render(&mut batch);
    }

    log::info!(
        "{} ticks: {} collisions, {} wall bounces, {} vertices in last frame",
        sim.ticks(),
        collisions,
        bounces,
        batch.vertices().len()
    );
    println!("{}", serde_json::to_string_pretty(sim.arena())?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host page drives the simulation through the library
}
