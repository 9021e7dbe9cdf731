mod common;

use common::SimulationBuilder;
use particle_data::{ForceLawKind, Particle};

#[test]
fn test_friction_decay_over_three_ticks() {
    let mut sim = SimulationBuilder::new()
        .with_config(|c| {
            c.physics.force_law = ForceLawKind::Inert;
            c.physics.speed = 0.0;
            c.physics.friction = 0.5;
        })
        .with_particle(Particle::new(100.0, 100.0, 0).with_velocity(1.0, 1.0))
        .with_particle(Particle::new(300.0, 250.0, 1))
        .build();

    sim.run(3).unwrap();

    let p = sim.particles()[0];
    assert!((p.vx - 0.125).abs() < 1e-12, "vx = {}", p.vx);
    assert!((p.vy - 0.125).abs() < 1e-12, "vy = {}", p.vy);
    assert_eq!((p.x, p.y), (100.0, 100.0));
}

#[test]
fn test_overshoot_teleports_to_zero() {
    let mut sim = SimulationBuilder::new()
        .with_config(|c| {
            c.physics.force_law = ForceLawKind::Inert;
            c.world.width = 200.0;
        })
        .with_particle(Particle::new(200.01, 40.0, 0))
        .build();

    sim.step().unwrap();
    let p = sim.particles()[0];
    assert!(p.x.abs() < 1e-9, "expected x near 0, got {}", p.x);
    assert_eq!(p.y, 40.0);
}

#[test]
fn test_negative_overshoot_teleports_to_far_edge() {
    let mut sim = SimulationBuilder::new()
        .with_config(|c| {
            c.physics.force_law = ForceLawKind::Inert;
            c.world.height = 300.0;
        })
        .with_particle(Particle::new(10.0, -0.5, 2))
        .build();

    sim.step().unwrap();
    assert_eq!(sim.particles()[0].y, 300.0);
}

#[test]
fn test_absolute_law_compact_support_in_tick() {
    let build = |separation: f64| {
        let mut sim = SimulationBuilder::new()
            .with_config(|c| {
                c.world.width = 1000.0;
                c.world.height = 1000.0;
                c.physics.force_law = ForceLawKind::Absolute;
                c.physics.repel_radius = 10.0;
                c.physics.friction = 1.0;
                c.physics.distance_metric = particle_data::DistanceMetric::Euclidean;
            })
            .with_particle(Particle::new(400.0, 500.0, 0))
            .with_particle(Particle::new(400.0 + separation, 500.0, 0))
            .build();
        let handle = sim.matrix_handle();
        handle
            .apply(particle_life_lib::model::EditOp::Set {
                row: 0,
                col: 0,
                value: 1.0,
            })
            .unwrap();
        handle
            .apply(particle_life_lib::model::EditOp::SetRadius {
                row: 0,
                col: 0,
                value: 0.1,
            })
            .unwrap();
        sim.step().unwrap();
        sim
    };

    let outside = build(31.0);
    assert!(outside.particles().iter().all(|p| p.vx == 0.0 && p.vy == 0.0));

    let inside = build(29.0);
    let p = inside.particles()[0];
    assert!(p.vx > 0.0, "expected pull toward neighbour, got {}", p.vx);
    assert_eq!(p.vy, 0.0);
}

#[test]
fn test_tick_counter_and_stats() {
    let mut sim = SimulationBuilder::new().build();
    let stats = sim.run(5).unwrap().unwrap();
    assert_eq!(stats.tick, 5);
    assert_eq!(sim.tick, 5);
    assert_eq!(stats.particles, sim.particles().len());
    assert_eq!(sim.metrics().tick_count(), 5);
    assert!(sim.run(0).unwrap().is_none());
}

#[test]
fn test_rebuild_replaces_arrangement() {
    let mut sim = SimulationBuilder::new()
        .with_config(|c| c.world.particle_count = 50)
        .build();
    sim.rebuild(particle_data::Arrangement::Grid).unwrap();
    assert_eq!(sim.particles().len(), 49);
    assert_eq!(sim.config().world.arrangement, particle_data::Arrangement::Grid);
    assert_eq!(sim.metrics().counter("rebuilds"), 2);
}

#[test]
fn test_point_attractor_pulls_during_tick() {
    let mut sim = SimulationBuilder::new()
        .with_config(|c| {
            c.physics.force_law = ForceLawKind::Inert;
            c.physics.speed = 1.0;
            c.physics.friction = 1.0;
            c.physics.distance_metric = particle_data::DistanceMetric::Euclidean;
        })
        .with_particle(Particle::new(100.0, 100.0, 0))
        .build();
    sim.set_attractor(Some(particle_life_lib::model::PointAttractor {
        x: 150.0,
        y: 100.0,
        strength: 5.0,
    }))
    .unwrap();

    sim.step().unwrap();
    let p = sim.particles()[0];
    assert!((p.vx - 0.1).abs() < 1e-12, "vx = {}", p.vx);
    assert!((p.x - 100.1).abs() < 1e-12);
    assert_eq!(p.vy, 0.0);

    sim.set_attractor(None).unwrap();
    sim.step().unwrap();
    assert!((sim.particles()[0].vx - 0.1).abs() < 1e-12);
}
