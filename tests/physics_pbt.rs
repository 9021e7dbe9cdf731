use particle_data::{Arrangement, ForceLawKind, Particle};
use particle_life_lib::model::arrangement::arrange;
use particle_life_lib::model::config::MatrixConfig;
use particle_life_lib::model::force::{ForceLaw, ForceParams};
use particle_life_lib::model::integrator::{integrate, Motion};
use particle_life_lib::model::matrix::InteractionMatrices;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

prop_compose! {
    fn arb_law()(index in 0usize..ForceLawKind::ALL.len(), seed in any::<u64>()) -> ForceLaw {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        ForceLaw::from_kind(ForceLawKind::ALL[index], &mut rng)
    }
}

prop_compose! {
    fn arb_params()(
        repel_radius in 0.0f64..20.0,
        repel_strength in 0.0f64..5.0
    ) -> ForceParams {
        ForceParams { repel_radius, repel_strength }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_force_is_finite(
        law in arb_law(),
        params in arb_params(),
        d in 0.0f64..2000.0,
        t in 0u8..8,
        ot in 0u8..8,
        seed in any::<u64>()
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let config = MatrixConfig {
            attraction: particle_data::MatrixStrategy::Random,
            radii: particle_data::RadiusStrategy::Equal,
            ..Default::default()
        };
        let matrices = InteractionMatrices::generate(8, &config, &mut rng);
        let f = law.force(d, t, ot, &matrices, &params);
        prop_assert!(f.is_finite(), "{law:?} at d={d} gave {f}");
    }

    #[test]
    fn test_arrangements_respect_type_count(
        index in 0usize..Arrangement::ALL.len(),
        count in 1usize..400,
        type_count in 1usize..=32,
        seed in any::<u64>()
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let arrangement = Arrangement::ALL[index];
        let particles = arrange(arrangement, count, type_count, 500.0, 300.0, &mut rng).unwrap();
        prop_assert!(particles.len() <= count);
        prop_assert!(particles.iter().all(|p| usize::from(p.type_id) < type_count));
        prop_assert!(particles.iter().all(Particle::is_finite));
    }

    #[test]
    fn test_wrapped_position_stays_near_world(
        x in -50.0f64..550.0,
        y in -50.0f64..350.0,
        vx in -5.0f64..5.0,
        vy in -5.0f64..5.0
    ) {
        let motion = Motion { speed: 1.0, friction: 0.999, width: 500.0, height: 300.0 };
        let mut p = Particle::new(x, y, 0).with_velocity(vx, vy);
        integrate(&mut p, &motion);
        prop_assert!((-5.0..=505.0).contains(&p.x), "x={x} moved to {}", p.x);
        prop_assert!((-5.0..=305.0).contains(&p.y), "y={y} moved to {}", p.y);
        if (0.0..=500.0).contains(&x) {
            prop_assert!((p.x - (x + vx)).abs() < 1e-9);
        }
    }
}
