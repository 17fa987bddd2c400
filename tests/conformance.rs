//! sqlgeom1 conformance test suite.
//!
//! Runs every vector from conformance_vectors_v1.json against
//! conformance_expected_v1.json.  Inputs are base64-encoded serialized
//! values with a column kind; expectations are either the SRID plus the
//! WKT of each top-level geometry, or an error reason tag.  Each vector
//! also gets its own test function for granular reporting.

use base64::Engine;
use serde::Deserialize;
use std::collections::HashMap;

use sqlgeom1::{parse_geography, parse_geometry, ParseError, SpatialValue, REASONS};

// ── Load conformance data ────────────────────────────────────

#[derive(Deserialize, Debug)]
struct VectorsFile {
    vectors: Vec<Vector>,
}

#[derive(Deserialize, Debug, Clone)]
struct Vector {
    test_id: String,
    input_b64: String,
    column: String,
}

#[derive(Deserialize, Debug)]
struct ExpectedFile {
    expected: HashMap<String, Expected>,
}

#[derive(Deserialize, Debug, Clone)]
struct Expected {
    #[serde(default)]
    srid: Option<u32>,
    #[serde(default)]
    wkt: Option<Vec<String>>,
    #[serde(default)]
    err: Option<String>,
}

#[derive(Debug, PartialEq)]
enum TestResult {
    Value { srid: u32, wkt: Vec<String> },
    Err(String),
}

fn run_vector(vec: &Vector) -> TestResult {
    let raw = base64::engine::general_purpose::STANDARD
        .decode(&vec.input_b64)
        .expect("base64 decode failed");

    let result: Result<SpatialValue, ParseError> = match vec.column.as_str() {
        "geometry" => parse_geometry(&raw),
        "geography" => parse_geography(&raw),
        other => panic!("unknown column kind: {}", other),
    };

    match result {
        Ok(value) => TestResult::Value {
            srid: value.srid,
            wkt: value.geometries.iter().map(|g| g.to_string()).collect(),
        },
        Err(e) => TestResult::Err(e.code.to_string()),
    }
}

fn expected_to_result(exp: &Expected) -> TestResult {
    if let Some(ref err) = exp.err {
        assert!(
            REASONS.contains(&err.as_str()),
            "expected error {} is not a known reason tag",
            err
        );
        TestResult::Err(err.clone())
    } else {
        TestResult::Value {
            srid: exp.srid.expect("expected must have srid or err"),
            wkt: exp.wkt.clone().expect("expected must have wkt or err"),
        }
    }
}

// ── Load test data once ───────────────────────────────────────

fn load_vectors() -> (Vec<Vector>, HashMap<String, Expected>) {
    let vec_json = include_str!("../conformance/conformance_vectors_v1.json");
    let exp_json = include_str!("../conformance/conformance_expected_v1.json");

    let vectors: VectorsFile = serde_json::from_str(vec_json).expect("failed to parse vectors");
    let expected: ExpectedFile = serde_json::from_str(exp_json).expect("failed to parse expected");

    (vectors.vectors, expected.expected)
}

// ── Test runner ──────────────────────────────────────────────

#[test]
fn conformance_all_vectors() {
    let (vectors, expected) = load_vectors();

    let mut passed = 0;
    let mut failed = 0;
    let mut failures: Vec<(String, TestResult, TestResult)> = Vec::new();

    for vec in &vectors {
        let exp = expected
            .get(&vec.test_id)
            .unwrap_or_else(|| panic!("no expected for {}", vec.test_id));
        let got = run_vector(vec);
        let want = expected_to_result(exp);

        if got == want {
            passed += 1;
        } else {
            failed += 1;
            failures.push((vec.test_id.clone(), got, want));
        }
    }

    let total = passed + failed;
    eprintln!("CONFORMANCE (v1): {}/{} PASS", passed, total);
    for (tid, got, want) in &failures {
        eprintln!("  FAIL {}: got={:?} expected={:?}", tid, got, want);
    }

    assert_eq!(failed, 0, "{} conformance tests failed", failed);
}

// ── Individual vector tests (for granular CI reporting) ──────

macro_rules! conformance_test {
    ($name:ident) => {
        #[test]
        fn $name() {
            let (vectors, expected) = load_vectors();
            let test_id = stringify!($name)
                .strip_prefix("test_")
                .unwrap_or(stringify!($name));

            let vec = vectors
                .iter()
                .find(|v| v.test_id == test_id)
                .unwrap_or_else(|| panic!("vector {} not found", test_id));
            let exp = expected
                .get(test_id)
                .unwrap_or_else(|| panic!("expected {} not found", test_id));

            let got = run_vector(vec);
            let want = expected_to_result(exp);
            assert_eq!(got, want, "{}: got={:?} expected={:?}", test_id, got, want);
        }
    };
}

// Generate individual test functions for each vector ID
conformance_test!(test_POINT_GEOM_1);
conformance_test!(test_POINT_GEOG_AXIS_1);
conformance_test!(test_POINT_FRACTIONAL_1);
conformance_test!(test_SEGMENT_GEOM_1);
conformance_test!(test_SEGMENT_GEOG_AXIS_1);
conformance_test!(test_POINT_Z_SHORT_1);
conformance_test!(test_POINT_ZM_SHORT_1);
conformance_test!(test_BOTH_SHORT_BITS_1);
conformance_test!(test_WHOLE_GLOBE_IGNORED_1);
conformance_test!(test_SRID_ZERO_1);
conformance_test!(test_SRID_3857_1);
conformance_test!(test_COMPLEX_POINT_1);
conformance_test!(test_LINESTRING_COMPLEX_1);
conformance_test!(test_LINESTRING_GEOG_AXIS_1);
conformance_test!(test_POLYGON_SQUARE_1);
conformance_test!(test_POLYGON_RING4_1);
conformance_test!(test_POLYGON_HOLE_1);
conformance_test!(test_POLYGON_GEOG_AXIS_1);
conformance_test!(test_MULTIPOINT_1);
conformance_test!(test_MULTIPOINT_Z_1);
conformance_test!(test_MULTILINESTRING_1);
conformance_test!(test_MULTIPOLYGON_1);
conformance_test!(test_MIXED_CHILD_SKIP_1);
conformance_test!(test_COLLECTION_NESTED_1);
conformance_test!(test_COLLECTION_CHILDLESS_1);
conformance_test!(test_POINT_EMPTY_FIGURE_1);
conformance_test!(test_ERR_EMPTY_1);
conformance_test!(test_ERR_SHORT_9_1);
conformance_test!(test_ERR_BAD_VERSION_1);
conformance_test!(test_ERR_VERSION_0_1);
conformance_test!(test_ERR_POINT_TRUNC_1);
conformance_test!(test_ERR_SEGMENT_TRUNC_1);
conformance_test!(test_ERR_ZERO_POINTS_1);
conformance_test!(test_ERR_SIGNBIT_POINTS_1);
conformance_test!(test_ERR_ZERO_FIGURES_1);
conformance_test!(test_ERR_ZERO_SHAPES_1);
conformance_test!(test_ERR_FIGTABLE_TRUNC_1);
conformance_test!(test_ERR_SHAPETABLE_TRUNC_1);
conformance_test!(test_ERR_BAD_ROOT_1);
conformance_test!(test_ERR_FORWARD_PARENT_1);
conformance_test!(test_ERR_NONROOT_NO_PARENT_1);
conformance_test!(test_ERR_UNKNOWN_TYPE_1);
conformance_test!(test_ERR_TYPE_8_1);
conformance_test!(test_ERR_SHORT_LINESTRING_1);
conformance_test!(test_ERR_POINT_OFFSET_RANGE_1);
conformance_test!(test_ERR_POINT_OFFSET_ORDER_1);
conformance_test!(test_ERR_FIGURE_OFFSET_RANGE_1);
conformance_test!(test_ERR_GEOG_TRUNC_PARITY_1);
