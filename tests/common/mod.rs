use particle_data::{ForceLawKind, Particle};
use particle_life_lib::model::config::AppConfig;
use particle_life_lib::model::simulation::Simulation;

#[allow(dead_code)]
pub struct SimulationBuilder {
    config: AppConfig,
    particles: Vec<Particle>,
    force_laws: Vec<(usize, ForceLawKind)>,
}

#[allow(dead_code)]
impl SimulationBuilder {
    /// Small, seeded, single-threaded world.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        config.world.particle_count = 60;
        config.world.type_count = 4;
        config.world.max_types = 8;
        config.physics.workers = 1;
        Self {
            config,
            particles: Vec::new(),
            force_laws: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Replaces the generated store with hand-placed particles.
    pub fn with_particle(mut self, particle: Particle) -> Self {
        self.particles.push(particle);
        self
    }

    pub fn with_force_law(mut self, type_id: usize, kind: ForceLawKind) -> Self {
        self.force_laws.push((type_id, kind));
        self
    }

    pub fn build(self) -> Simulation {
        let mut sim = Simulation::new(self.config).expect("Failed to create simulation in test builder");
        for (type_id, kind) in self.force_laws {
            sim.set_force_law(type_id, kind)
                .expect("Force law type out of range in test builder");
        }
        if !self.particles.is_empty() {
            sim.load_particles(self.particles)
                .expect("Invalid particles in test builder");
        }
        sim
    }
}

/// Asserts two particle stores are bit-identical.
#[allow(dead_code)]
pub fn assert_same_particles(a: &[Particle], b: &[Particle]) {
    assert_eq!(a.len(), b.len(), "Particle counts should match");
    for (i, (p, q)) in a.iter().zip(b).enumerate() {
        assert_eq!(p, q, "Particle {i} diverged");
    }
}
