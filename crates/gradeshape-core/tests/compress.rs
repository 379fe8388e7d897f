//! Integration tests for grade compression

use std::collections::BTreeSet;

use gradeshape_core::compress::validate_compression;
use gradeshape_core::{
    compress, to_mark, Compressor, Criterion, Grade, GradeError, GradePath, GradeStructure,
    PathGraph,
};

fn path(s: &str) -> GradePath {
    s.parse().unwrap()
}

fn mark(points: f64, comment: &str) -> Grade {
    Grade::mark(points, comment).unwrap()
}

fn node(children: Vec<(&str, Grade, f64)>) -> Grade {
    Grade::composite(
        children
            .into_iter()
            .map(|(name, grade, weight)| (Criterion::new(name), grade, weight)),
    )
    .unwrap()
}

/// A detailed grade for one student: two exercises sharing criteria, plus
/// a git criterion on its own.
fn student_grade() -> Grade {
    let exercise = |tests: f64, style: f64, note: &str| {
        node(vec![
            ("tests", mark(tests, note), 3.0),
            ("style", mark(style, ""), 1.0),
        ])
    };
    node(vec![
        (
            "code",
            node(vec![
                ("ex1", exercise(1.0, 0.5, "all green"), 1.0),
                ("ex2", exercise(0.25, 1.0, "two failures"), 1.0),
            ]),
            4.0,
        ),
        ("git", mark(0.5, "few commits"), 1.0),
    ])
}

#[test]
fn test_scenario_a_single_criterion_target() {
    let grade = node(vec![(
        "a",
        node(vec![("x", mark(1.0, ""), 1.0), ("y", mark(0.0, ""), 1.0)]),
        1.0,
    )]);
    let target = GradeStructure::tree([Criterion::new("a")]);

    let compressed = compress(&grade, &target).unwrap();

    assert_eq!(compressed.sub_grades().len(), 1);
    let a = compressed.get(&path("a")).unwrap();
    assert!(a.is_mark());
    assert!((a.points() - 0.5).abs() < 1e-9);
}

#[test]
fn test_scenario_b_flatten_weighted() {
    let grade = node(vec![("a", mark(1.0, ""), 3.0), ("b", mark(0.0, ""), 1.0)]);
    assert!((to_mark(&grade).unwrap().points() - 0.75).abs() < 1e-9);
}

#[test]
fn test_scenario_c_given_paths() {
    let structure = GradeStructure::given([path("a/b"), path("a/c")]);
    let nodes: BTreeSet<GradePath> = structure.paths().cloned().collect();
    assert_eq!(
        nodes,
        BTreeSet::from([GradePath::root(), path("a"), path("a/b"), path("a/c")])
    );
    assert_eq!(
        structure.edges(),
        vec![
            (GradePath::root(), path("a")),
            (path("a"), path("a/b")),
            (path("a"), path("a/c")),
        ]
    );
    assert_eq!(structure.leaves(), BTreeSet::from([path("a/b"), path("a/c")]));
}

#[test]
fn test_scenario_d_two_predecessors() {
    let mut graph = PathGraph::new();
    graph
        .add_edge(GradePath::root(), path("a"))
        .add_edge(GradePath::root(), path("b"))
        .add_edge(path("a"), path("a/c"))
        .add_edge(path("b"), path("a/c"));
    let err = GradeStructure::from_graph(&graph).unwrap_err();
    assert!(matches!(err, GradeError::InvalidStructure { .. }));
}

#[test]
fn test_scenario_e_criteria_never_siblings() {
    let grade = node(vec![
        ("x", node(vec![("p", mark(1.0, ""), 1.0), ("r", mark(0.0, ""), 1.0)]), 1.0),
        ("y", node(vec![("q", mark(1.0, ""), 1.0), ("r", mark(0.0, ""), 1.0)]), 1.0),
    ]);
    let target = GradeStructure::tree([Criterion::new("p"), Criterion::new("q")]);
    let err = compress(&grade, &target).unwrap_err();
    assert!(matches!(err, GradeError::UncoverableStructure { .. }));
}

#[test]
fn test_target_deeper_than_grade_is_uncoverable() {
    let grade = node(vec![("a", mark(1.0, ""), 1.0)]);
    let target = GradeStructure::given([path("a/detail")]);
    assert!(matches!(
        compress(&grade, &target),
        Err(GradeError::UncoverableStructure { .. })
    ));
}

#[test]
fn test_identity() {
    let grade = student_grade();
    let compressed = compress(&grade, &grade.to_structure()).unwrap();

    assert_eq!(compressed.to_structure(), grade.to_structure());
    for p in grade.to_structure().paths() {
        let expected = grade.get(p).unwrap();
        let actual = compressed.get(p).unwrap();
        assert!(
            (expected.points() - actual.points()).abs() < 1e-6,
            "points differ at {}",
            p
        );
        if let (Some(e), Some(a)) = (expected.as_mark(), actual.as_mark()) {
            assert_eq!(e.comment(), a.comment());
        }
    }
}

#[test]
fn test_identity_below_zero_weight() {
    // "draft" counts for nothing, but its own tests/style split stays 3:1
    let grade = node(vec![
        (
            "draft",
            node(vec![
                ("tests", mark(1.0, ""), 3.0),
                ("style", mark(0.0, ""), 1.0),
            ]),
            0.0,
        ),
        ("final", mark(0.0, ""), 1.0),
    ]);
    let compressed = compress(&grade, &grade.to_structure()).unwrap();

    assert_eq!(compressed.to_structure(), grade.to_structure());
    for p in grade.to_structure().paths() {
        let expected = grade.get(p).unwrap().points();
        let actual = compressed.get(p).unwrap().points();
        assert!((expected - actual).abs() < 1e-6, "{}: {} vs {}", p, expected, actual);
    }
    assert!((compressed.get(&path("draft")).unwrap().points() - 0.75).abs() < 1e-9);
}

#[test]
fn test_structure_round_trip_feeds_compression() {
    let grade = student_grade();
    let json = serde_json::to_string(&grade.to_structure()).unwrap();
    let back: GradeStructure = serde_json::from_str(&json).unwrap();
    assert_eq!(back, grade.to_structure());
    assert!(compress(&grade, &back).is_ok());
}

#[test]
fn test_grade_with_separator_in_name_rejected() {
    let json = r#"{"sub_grades": {"a/b": {"grade": {"points": 1.0}}, "c": {"grade": {"points": 0.0}}}}"#;
    assert!(serde_json::from_str::<Grade>(json).is_err());
    assert!(matches!(
        Grade::composite([(Criterion::new("a/b"), mark(1.0, ""), 1.0)]),
        Err(GradeError::InvalidCriterion { .. })
    ));
}

#[test]
fn test_report_shape_folds_exercises() {
    let grade = student_grade();
    let target = GradeStructure::given([path("code/tests"), path("code/style"), path("git")]);

    let compressed = compress(&grade, &target).unwrap();

    assert_eq!(compressed.to_structure(), target);
    // tests: 0.8 * 0.5 * 0.75 cumulative weight per exercise
    let tests = compressed.get(&path("code/tests")).unwrap();
    assert!((tests.points() - 0.625).abs() < 1e-9);
    assert_eq!(
        tests.as_mark().unwrap().comment(),
        "code/ex1/tests: all green\ncode/ex2/tests: two failures"
    );
    let style = compressed.get(&path("code/style")).unwrap();
    assert!((style.points() - 0.75).abs() < 1e-9);

    let total: f64 = compressed.sub_grades().values().map(|w| w.weight()).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!((compressed.points() - grade.points()).abs() < 1e-9);
    assert!(validate_compression(&grade, &target, &compressed, 1e-6).is_empty());
}

#[test]
fn test_flatten_preserves_points() {
    let grade = student_grade();
    let flat = to_mark(&grade).unwrap();
    assert!((flat.points() - grade.points()).abs() < 1e-9);
    assert_eq!(grade.to_mark().unwrap(), flat);
    assert!(flat.comment().contains("git: few commits"));
}

#[test]
fn test_merged_shapes_of_many_students() {
    let first = student_grade();
    let second = node(vec![
        ("code", node(vec![("ex1", mark(0.5, ""), 1.0)]), 1.0),
        ("bonus", mark(1.0, ""), 1.0),
    ]);
    let merged = GradeStructure::merge([&first.to_structure(), &second.to_structure()]);
    assert!(merged.contains(&path("bonus")));
    assert!(merged.contains(&path("code/ex2/style")));

    for grade in [&first, &second] {
        // "code" alone does not account for git or bonus
        let partial = compress(grade, &GradeStructure::tree([Criterion::new("code")]));
        assert!(partial.is_err());
        let whole = Compressor::new()
            .compress(grade, &GradeStructure::root_only())
            .unwrap();
        assert!((whole.points() - grade.points()).abs() < 1e-9);
    }
}

#[test]
fn test_determinism() {
    let grade = student_grade();
    let target = GradeStructure::given([path("code/tests"), path("code/style"), path("git")]);
    let first = compress(&grade, &target).unwrap();
    let second = compress(&grade, &target).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
