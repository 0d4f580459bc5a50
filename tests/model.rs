//! Tests for MWIS model encoding and decoding

use treethin::geo_utils::DEGREE_LENGTH_M;
use treethin::{
    decode_selection, Assignment, ConflictGraph, MwisModel, SolveStatus, ThinningConfig,
    ThinningError, TreePoint,
};

/// Three trees in a row, 5 m apart, threshold 8 m: conflicts (0,1), (1,2).
fn chain_graph() -> (Vec<f64>, ConflictGraph) {
    let points: Vec<TreePoint> = (0..3)
        .map(|i| TreePoint::new(35.78 + i as f64 * 5.0 / DEGREE_LENGTH_M, 137.65, 10.0))
        .collect();
    let weights = points.iter().map(|p| p.weight).collect();
    let graph = ConflictGraph::build(&points, &ThinningConfig { spacing_m: 8.0 });
    (weights, graph)
}

#[test]
fn test_encode_one_variable_per_point() {
    let (weights, graph) = chain_graph();
    let model = MwisModel::encode(&weights, &graph).unwrap();
    assert_eq!(model.num_variables(), 3);
    assert_eq!(model.weights(), &[10.0, 10.0, 10.0]);
}

#[test]
fn test_encode_one_constraint_per_conflict_pair() {
    let (weights, graph) = chain_graph();
    let model = MwisModel::encode(&weights, &graph).unwrap();
    // No merging: exactly one constraint per edge, canonical order
    assert_eq!(model.num_constraints(), graph.conflict_count());
    assert_eq!(model.constraints(), &[(0, 1), (1, 2)]);
}

#[test]
fn test_encode_allows_zero_and_negative_weights() {
    let (_, graph) = chain_graph();
    let model = MwisModel::encode(&[0.0, -4.5, 2.0], &graph).unwrap();
    assert_eq!(model.weights(), &[0.0, -4.5, 2.0]);
}

#[test]
fn test_encode_weight_count_mismatch() {
    let (_, graph) = chain_graph();
    let result = MwisModel::encode(&[1.0, 2.0], &graph);
    assert!(matches!(
        result,
        Err(ThinningError::WeightCountMismatch {
            points: 3,
            weights: 2
        })
    ));
}

#[test]
fn test_decode_thresholds_at_half() {
    let (weights, graph) = chain_graph();
    let model = MwisModel::encode(&weights, &graph).unwrap();

    let assignment = Assignment {
        values: vec![0.9999997, 0.5, 0.500001],
        objective: 20.0,
        status: SolveStatus::Optimal,
    };
    let selection = decode_selection(&model, &assignment).unwrap();

    // Strictly greater than 0.5: near-integral 1 decodes true, exact 0.5
    // decodes false
    assert_eq!(selection.keep_flags(), &[true, false, true]);
    assert_eq!(selection.kept_indices(), vec![0, 2]);
    assert_eq!(selection.kept_count(), 2);
    assert_eq!(selection.removed_count(), 1);
}

#[test]
fn test_decode_feasible_status_accepted() {
    let (weights, graph) = chain_graph();
    let model = MwisModel::encode(&weights, &graph).unwrap();
    let assignment = Assignment {
        values: vec![1.0, 0.0, 1.0],
        objective: 20.0,
        status: SolveStatus::Feasible,
    };
    assert!(decode_selection(&model, &assignment).is_ok());
}

#[test]
fn test_decode_infeasible_surfaces_error() {
    let (weights, graph) = chain_graph();
    let model = MwisModel::encode(&weights, &graph).unwrap();
    let assignment = Assignment {
        values: Vec::new(),
        objective: f64::NAN,
        status: SolveStatus::Infeasible,
    };
    assert!(matches!(
        decode_selection(&model, &assignment),
        Err(ThinningError::NoSolution {
            status: SolveStatus::Infeasible
        })
    ));
}

#[test]
fn test_decode_length_mismatch() {
    let (weights, graph) = chain_graph();
    let model = MwisModel::encode(&weights, &graph).unwrap();
    let assignment = Assignment {
        values: vec![1.0],
        objective: 10.0,
        status: SolveStatus::Optimal,
    };
    assert!(matches!(
        decode_selection(&model, &assignment),
        Err(ThinningError::AssignmentLengthMismatch {
            expected: 3,
            got: 1
        })
    ));
}

#[test]
fn test_selection_total_weight() {
    let (weights, graph) = chain_graph();
    let model = MwisModel::encode(&weights, &graph).unwrap();
    let assignment = Assignment {
        values: vec![1.0, 0.0, 1.0],
        objective: 20.0,
        status: SolveStatus::Optimal,
    };
    let selection = decode_selection(&model, &assignment).unwrap();
    assert_eq!(selection.total_weight(&weights), 20.0);
}

#[test]
fn test_empty_model() {
    let graph = ConflictGraph::build(&[], &ThinningConfig::default());
    let model = MwisModel::encode(&[], &graph).unwrap();
    assert_eq!(model.num_variables(), 0);
    assert_eq!(model.num_constraints(), 0);

    let assignment = Assignment {
        values: Vec::new(),
        objective: 0.0,
        status: SolveStatus::Optimal,
    };
    let selection = decode_selection(&model, &assignment).unwrap();
    assert!(selection.is_empty());
}
