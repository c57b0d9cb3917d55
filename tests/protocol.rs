use exprserver::{
    error::RequestError,
    request::{parse_request, Request, StatKind},
    server::respond,
    stats::ServerStats,
};

fn ok_result(line: &str, stats: &ServerStats) -> String {
    let response = respond(line, stats).unwrap_or_else(|| panic!("'{line}' closed the connection"));
    let parts: Vec<&str> = response.splitn(3, ';').collect();
    assert_eq!(parts.len(), 3, "Malformed response '{response}'");
    assert_eq!(parts[0], "OK", "Expected an OK response, got '{response}'");

    // Elapsed seconds with exactly 3 decimals.
    let elapsed = parts[1];
    assert_eq!(elapsed.split('.').nth(1).map(str::len), Some(3),
               "Bad elapsed field in '{response}'");
    assert!(elapsed.parse::<f64>().is_ok(), "Bad elapsed field in '{response}'");

    parts[2].to_string()
}

fn err_message(line: &str, stats: &ServerStats) -> String {
    let response = respond(line, stats).unwrap_or_else(|| panic!("'{line}' closed the connection"));
    response.strip_prefix("ERR: ")
            .unwrap_or_else(|| panic!("Expected an error response, got '{response}'"))
            .to_string()
}

#[test]
fn stat_keywords_decode() {
    assert!(matches!(parse_request("STAT_REQS"), Ok(Request::Stat(StatKind::Reqs))));
    assert!(matches!(parse_request("STAT_AVG_TIME"), Ok(Request::Stat(StatKind::AvgTime))));
    assert!(matches!(parse_request("STAT_MAX_TIME"), Ok(Request::Stat(StatKind::MaxTime))));
    assert!(matches!(parse_request("STAT_FOO"), Err(RequestError::UnrecognizedRequest)));
}

#[test]
fn computation_lines_decode() {
    assert!(matches!(parse_request("MIN_GRID;x:0:1:2;x"), Ok(Request::Computation(_))));
    assert!(matches!(parse_request("COUNT_LIST;x:0:1:2,y:0:1:2;add(x, y)"),
                     Ok(Request::Computation(_))));
    // Leading and trailing whitespace is trimmed.
    assert!(matches!(parse_request("  MAX_GRID;x:0:1:2;x  "), Ok(Request::Computation(_))));
}

#[test]
fn field_level_errors_are_specific() {
    assert!(matches!(parse_request("hello"), Err(RequestError::UnrecognizedRequest)));
    assert!(matches!(parse_request("MIN_GRID;x:0:1:2"), Err(RequestError::UnrecognizedRequest)));
    assert!(matches!(parse_request("FOO_GRID;x:0:1:2;x"), Err(RequestError::InvalidKind { .. })));
    assert!(matches!(parse_request("MIN_SPIRAL;x:0:1:2;x"), Err(RequestError::InvalidKind { .. })));
    assert!(matches!(parse_request("MIN;x:0:1:2;x"), Err(RequestError::InvalidKind { .. })));
    assert!(matches!(parse_request("MIN_GRID;x:0:1;x"),
                     Err(RequestError::RangeFieldCount { .. })));
    assert!(matches!(parse_request("MIN_GRID;x:0:1:2:9;x"),
                     Err(RequestError::RangeFieldCount { .. })));
    assert!(matches!(parse_request("MIN_GRID;1x:0:1:2;x"),
                     Err(RequestError::InvalidVariableName { .. })));
    assert!(matches!(parse_request("MIN_GRID;x:0:a:2;x"),
                     Err(RequestError::InvalidBound { .. })));
    assert!(matches!(parse_request("MIN_GRID;x:0:1:2,x:0:1:2;x"),
                     Err(RequestError::DuplicateVariable { .. })));
    assert!(matches!(parse_request("MIN_GRID;x:0:1:2;add(x)"),
                     Err(RequestError::Expression(_))));
}

#[test]
fn scenario_count_grid() {
    let stats = ServerStats::new();
    assert_eq!(ok_result("COUNT_GRID;x:0:1:2;x", &stats), "3.000000");
}

#[test]
fn scenario_max_grid() {
    let stats = ServerStats::new();
    assert_eq!(ok_result("MAX_GRID;x:0:1:2;x", &stats), "2.000000");
}

#[test]
fn scenario_avg_grid() {
    let stats = ServerStats::new();
    assert_eq!(ok_result("AVG_GRID;x:0:1:1,y:0:1:1;add(x, y)", &stats), "1.000000");
}

#[test]
fn multiple_expressions_share_one_aggregate() {
    let stats = ServerStats::new();
    assert_eq!(ok_result("MAX_GRID;x:0:1:2;x;mul(x, x)", &stats), "4.000000");
}

#[test]
fn list_mode_over_the_wire() {
    let stats = ServerStats::new();
    assert_eq!(ok_result("AVG_LIST;x:0:1:2,y:10:10:30;add(x, y)", &stats), "21.000000");
}

#[test]
fn failing_requests_answer_with_err() {
    let stats = ServerStats::new();

    assert!(!err_message("hello", &stats).is_empty());
    assert!(err_message("MIN_GRID;x:2:0:4;x", &stats).contains("greater than 0"));
    assert!(err_message("MIN_GRID;x:0:1:2;z", &stats).contains("Unvalued variable"));
    assert!(err_message("MIN_LIST;x:0:1:1,y:0:1:2;add(x, y)", &stats).contains("same length"));
    assert!(err_message("AVG_GRID;x:5:1:2;x", &stats).contains("no values"));
    assert!(err_message("MIN_GRID;x:0:1:2;sin(x)", &stats).contains("Unknown operator"));
}

#[test]
fn quit_command_closes_the_connection() {
    let stats = ServerStats::new();
    assert!(respond("BYE", &stats).is_none());
    // The quit command is matched on the raw line, before trimming.
    assert!(respond(" BYE ", &stats).is_some());
}

#[test]
fn stats_count_ok_responses_only() {
    let stats = ServerStats::new();

    // The count reported reflects responses served before this one.
    assert_eq!(ok_result("STAT_REQS", &stats), "0.000000");
    assert_eq!(ok_result("STAT_REQS", &stats), "1.000000");

    // A computation bumps the count, a failing request does not.
    ok_result("MAX_GRID;x:0:1:2;x", &stats);
    err_message("hello", &stats);
    assert_eq!(ok_result("STAT_REQS", &stats), "3.000000");
}

#[test]
fn stat_times_start_at_zero() {
    let stats = ServerStats::new();
    assert_eq!(ok_result("STAT_AVG_TIME", &stats), "0.000000");
    let stats = ServerStats::new();
    assert_eq!(ok_result("STAT_MAX_TIME", &stats), "0.000000");
}

#[test]
fn stats_track_count_average_and_maximum() {
    let stats = ServerStats::new();
    stats.record_response(0.1);
    stats.record_response(0.3);
    stats.record_response(0.2);

    assert_eq!(stats.total_responses(), 3);
    assert!((stats.average_time() - 0.2).abs() < 1e-12);
    assert!((stats.max_time() - 0.3).abs() < f64::EPSILON);
}
