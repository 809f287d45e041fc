//! End-to-end scenarios for the landmark-witness persistence pipeline.

use approx::assert_relative_eq;
use ndarray::array;

use tda_witness_homology::geometry::datasets;
use tda_witness_homology::{
    compute_barcodes,
    BarcodeFormat,
    CoefficientField,
    Euclidean,
    LandmarkSelector,
    LandmarkStrategy,
    MaxMinSelector,
    Metric,
    PersistenceEngine,
    PipelineConfig,
    PointCloud,
    WitnessFiltrationBuilder,
    WitnessMode,
    WitnessPipeline,
};

fn unit_square() -> PointCloud {
    PointCloud::new(array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).unwrap()
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn scenario_a_square_loop_through_pipeline() {
    let config = PipelineConfig {
        num_landmarks: 4,
        max_dimension: 1,
        ..Default::default()
    };
    let output = WitnessPipeline::new(config).unwrap().run(&unit_square()).unwrap();

    // every point is a landmark, so the cover radius and the scale ceiling are 0
    assert_eq!(output.landmarks.max_landmark_distance(), 0.0);
    assert_eq!(output.max_filtration_value, 0.0);
    assert_eq!(output.filtration.count_by_dimension(), vec![4, 4]);

    let barcodes = &output.barcodes;
    assert_eq!(barcodes.dim(0).len(), 1);
    assert_eq!(barcodes.essential(0).len(), 1);

    let h1 = barcodes.dim(1);
    assert_eq!(h1.len(), 1);
    assert_eq!(h1[0].birth, 0.0);
    assert!(h1[0].birth < h1[0].death);
    assert!(h1[0].is_essential());
}

#[test]
fn scenario_a_square_loop_dies_when_diagonals_enter() {
    let config = PipelineConfig {
        num_landmarks: 4,
        max_dimension: 2,
        max_filtration_value: Some(1.0),
        num_divisions: 100,
        ..Default::default()
    };
    let barcodes = compute_barcodes(&unit_square(), &config).unwrap();

    let h1 = barcodes.dim(1);
    assert_eq!(h1.len(), 1);
    assert_eq!(h1[0].birth, 0.0);
    // diagonals are weakly witnessed at √2 − 1, snapped up to 0.42
    assert_relative_eq!(h1[0].death, 0.42, epsilon = 1e-12);

    // the four triangles bound a hollow tetrahedron
    let h2 = barcodes.dim(2);
    assert_eq!(h2.len(), 1);
    assert!(h2[0].is_essential());
}

#[test]
fn scenario_b_repeated_point() {
    let cloud = PointCloud::new(array![[2.0, 3.0], [2.0, 3.0], [2.0, 3.0], [2.0, 3.0], [2.0, 3.0]])
        .unwrap();
    let config = PipelineConfig { num_landmarks: 1, ..Default::default() };
    let barcodes = compute_barcodes(&cloud, &config).unwrap();

    assert_eq!(barcodes.len(), 1);
    let only = barcodes.intervals()[0];
    assert_eq!(only.dimension, 0);
    assert_eq!(only.birth, 0.0);
    assert!(only.is_essential());
}

#[test]
fn scenario_c_too_many_landmarks() {
    let config = PipelineConfig { num_landmarks: 5, ..Default::default() };
    let err = compute_barcodes(&unit_square(), &config).unwrap_err();
    assert_eq!(err.kind(), "InvalidParameter");
}

#[test]
fn scenario_d_non_prime_characteristic() {
    let config = PipelineConfig { characteristic: 4, ..Default::default() };
    let err = compute_barcodes(&unit_square(), &config).unwrap_err();
    assert_eq!(err.kind(), "InvalidParameter");

    // the engine rejects it on its own as well, before touching the filtration
    let cloud = unit_square();
    let landmarks = MaxMinSelector::new().select(&cloud, &Euclidean, 4).unwrap();
    let filtration = WitnessFiltrationBuilder::new(1, 1.0, 10, WitnessMode::Strict)
        .unwrap()
        .build(&cloud, &landmarks, &Euclidean)
        .unwrap();
    let err = PersistenceEngine::new()
        .compute_intervals(&filtration, CoefficientField::FiniteField(4))
        .unwrap_err();
    assert_eq!(err.kind(), "InvalidParameter");
}

// =============================================================================
// GLOBAL PROPERTIES ON SAMPLED SHAPES
// =============================================================================

fn circle_config(mode: WitnessMode) -> PipelineConfig {
    PipelineConfig {
        num_landmarks: 25,
        filtration_ratio: 2.0,
        num_divisions: 30,
        mode,
        ..Default::default()
    }
}

#[test]
fn reports_are_byte_identical_across_runs() {
    let cloud = datasets::noisy_circle(150, 1.0, 0.05, 3).unwrap();
    for mode in [WitnessMode::Strict, WitnessMode::Lazy] {
        let first = compute_barcodes(&cloud, &circle_config(mode)).unwrap();
        let second = compute_barcodes(&cloud, &circle_config(mode)).unwrap();
        assert_eq!(first, second);
        for format in [BarcodeFormat::Javaplex, BarcodeFormat::Simple, BarcodeFormat::Json] {
            assert_eq!(format.render(&first).unwrap(), format.render(&second).unwrap());
        }
    }
}

#[test]
fn essential_components_match_one_skeleton() {
    let cloud = datasets::figure_eight(200, 0.02, 5).unwrap();
    for mode in [WitnessMode::Strict, WitnessMode::Lazy] {
        for ratio in [0.0, 0.5, 2.0] {
            let config = PipelineConfig {
                num_landmarks: 30,
                filtration_ratio: ratio,
                mode,
                ..Default::default()
            };
            let output = WitnessPipeline::new(config).unwrap().run(&cloud).unwrap();
            output.filtration.validate().unwrap();
            assert_eq!(
                output.barcodes.essential(0).len(),
                output.filtration.component_count(),
                "mode {mode}, ratio {ratio}"
            );
        }
    }
}

#[test]
fn finer_grids_never_lose_simplices() {
    let cloud = datasets::noisy_torus(250, 2.0, 0.7, 0.02, 8).unwrap();
    let landmarks = MaxMinSelector::new().select(&cloud, &Euclidean, 20).unwrap();
    let scale = landmarks.max_landmark_distance() * 1.5;

    for mode in [WitnessMode::Strict, WitnessMode::Lazy] {
        let mut previous = 0;
        for divisions in [1, 3, 10, 20, 50] {
            let filtration = WitnessFiltrationBuilder::new(2, scale, divisions, mode)
                .unwrap()
                .build(&cloud, &landmarks, &Euclidean)
                .unwrap();
            assert!(filtration.distinct_values().len() <= divisions + 1);
            assert!(filtration.len() >= previous, "{mode}: {divisions} divisions");
            previous = filtration.len();
        }
    }
}

#[test]
fn components_do_not_depend_on_the_field() {
    let cloud = datasets::noisy_circle(120, 1.0, 0.03, 21).unwrap();
    let rational = compute_barcodes(&cloud, &circle_config(WitnessMode::Strict)).unwrap();
    for p in [2, 3, 5] {
        let config = PipelineConfig { characteristic: p, ..circle_config(WitnessMode::Strict) };
        let modular = compute_barcodes(&cloud, &config).unwrap();
        assert_eq!(rational.dim(0), modular.dim(0), "characteristic {p}");
        assert_eq!(rational.essential(1).len(), modular.essential(1).len(), "characteristic {p}");
    }
}

#[test]
fn alternative_metric_and_random_landmarks() {
    let cloud = datasets::noisy_sphere(200, 3, 0.02, 13).unwrap();
    let config = PipelineConfig {
        num_landmarks: 20,
        metric: Metric::Manhattan,
        landmarks: LandmarkStrategy::Random { seed: 99 },
        filtration_ratio: 1.0,
        ..Default::default()
    };
    let output = WitnessPipeline::new(config).unwrap().run(&cloud).unwrap();
    assert_eq!(output.landmarks.len(), 20);
    assert!(output.barcodes.iter().all(|i| i.birth <= i.death));
    assert!(output
        .barcodes
        .iter()
        .filter(|i| !i.is_essential())
        .all(|i| i.death <= output.max_filtration_value + 1e-9));
}
