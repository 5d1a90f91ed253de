// End-to-end tests driving scripts through the interpreter

use heaptty::interpreter::engine::Interpreter;

fn run(source: &str, heap_size: u64) -> Interpreter {
    let mut interpreter = Interpreter::new(source, heap_size);
    interpreter
        .run()
        .expect("script was expected to parse cleanly");
    interpreter
}

fn reports(interpreter: &Interpreter) -> Vec<String> {
    interpreter
        .output()
        .reports()
        .iter()
        .map(|r| r.text.clone())
        .collect()
}

#[test]
fn test_alloc_free_dump() {
    let interpreter = run("a = m(30); b = m(20); free(a); dump();", 100);

    let expected = "\
Variables:
b:30(20) [1]
Free List:
0(30) [0], 50(50) [0]
============================================================
";
    assert_eq!(reports(&interpreter), vec![expected.to_string()]);
}

#[test]
fn test_compress_without_adjacency_changes_nothing() {
    let interpreter = run(
        "a = m(30); b = m(20); free(a); compress(); dump();",
        100,
    );

    // {0,30} and {50,50} are separated by b's block, so compression
    // leaves them apart
    let report = &reports(&interpreter)[0];
    assert!(report.contains("0(30) [0], 50(50) [0]"), "report:\n{}", report);
}

#[test]
fn test_freeing_everything_compresses_to_one_block() {
    let interpreter = run(
        "a = m(30); b = m(20); free(a); free(b); compress(); dump();",
        100,
    );

    let expected = "\
Variables:
Empty
Free List:
0(100) [0]
============================================================
";
    assert_eq!(reports(&interpreter), vec![expected.to_string()]);
}

#[test]
fn test_aliasing_round_trip() {
    let interpreter = run("x = m(10); y = x; free(x); free(y); dump();", 10);

    let expected = "\
Variables:
Empty
Free List:
0(10) [0]
============================================================
";
    assert_eq!(reports(&interpreter), vec![expected.to_string()]);
}

#[test]
fn test_alias_keeps_block_alive() {
    let interpreter = run("x = m(10); y = x; free(x); dump();", 100);

    let report = &reports(&interpreter)[0];
    assert!(report.contains("y:0(10) [1]"), "report:\n{}", report);
    assert!(!report.contains("x:"), "x must be unbound:\n{}", report);
}

#[test]
fn test_oversized_request_leaves_state_unchanged() {
    let interpreter = run("z = m(9999); dump();", 100);

    let expected = "\
Variables:
Empty
Free List:
0(100) [0]
============================================================
";
    assert_eq!(reports(&interpreter), vec![expected.to_string()]);
}

#[test]
fn test_dump_reports_empty_free_list() {
    let interpreter = run("x = m(10); dump();", 10);

    let report = &reports(&interpreter)[0];
    assert!(report.contains("Free List:\nEmpty"), "report:\n{}", report);
}

#[test]
fn test_unknown_keywords_execute_as_noops() {
    let interpreter = run("a = m(10); discard(a); flush(); dump();", 100);

    let report = &reports(&interpreter)[0];
    assert!(report.contains("a:0(10) [1]"), "report:\n{}", report);
}

#[test]
fn test_keywords_are_case_sensitive() {
    // FREE is not free; it parses as an unknown keyword and does nothing
    let interpreter = run("a = m(10); FREE(a); dump();", 100);

    let report = &reports(&interpreter)[0];
    assert!(report.contains("a:0(10) [1]"), "report:\n{}", report);
}

#[test]
fn test_multi_line_scripts() {
    let source = "a = m(30);\nb = m(20);\nfree(a);\ndump();\n";
    let interpreter = run(source, 100);
    assert_eq!(reports(&interpreter).len(), 1);
}

#[test]
fn test_syntax_error_aborts_the_run() {
    let mut interpreter = Interpreter::new("dump(); free(;", 100);
    let err = interpreter.run().unwrap_err();
    assert!(err.message.contains("identifier"), "got: {}", err.message);
}

#[test]
fn test_statements_before_a_syntax_error_still_ran() {
    let mut interpreter = Interpreter::new("a = m(10); dump(); b = = 5;", 100);
    assert!(interpreter.run().is_err());

    // The dump before the malformed statement is part of the run
    let output = reports(&interpreter);
    assert_eq!(output.len(), 1);
    assert!(output[0].contains("a:0(10) [1]"));
    assert!(!interpreter.finished());
}

#[test]
fn test_unknown_character_between_statements_ends_the_run_silently() {
    // '#' is swallowed as end-of-input by the lexer; the run succeeds
    // with only the first statement executed
    let interpreter = run("a = m(10); # dump();", 100);
    assert!(reports(&interpreter).is_empty());
    assert_eq!(interpreter.heap().bindings().len(), 1);
}

#[test]
fn test_reports_remember_their_statement_line() {
    let interpreter = run("a = m(10);\ndump();", 100);

    let report = &interpreter.output().reports()[0];
    assert_eq!(report.location.line, 2);
}

#[test]
fn test_empty_script_is_a_clean_run() {
    let interpreter = run("", 100);
    assert!(reports(&interpreter).is_empty());
    assert!(interpreter.finished());
}

#[test]
fn test_snapshot_history_records_every_statement() {
    let interpreter = run("a = m(30); b = a; free(b); compress();", 100);

    // Initial state + four statements
    assert_eq!(interpreter.total_snapshots(), 5);
}

#[test]
fn test_replay_walks_recorded_states() {
    let mut interpreter = run("a = m(30); free(a);", 100);

    interpreter.rewind_to_start();
    assert_eq!(interpreter.current_snapshot().heap.bindings().len(), 0);

    assert!(interpreter.step_forward());
    assert_eq!(interpreter.current_snapshot().heap.bindings().len(), 1);

    assert!(interpreter.step_forward());
    assert_eq!(interpreter.current_snapshot().heap.bindings().len(), 0);

    // History is bounded
    assert!(!interpreter.step_forward());
    assert!(interpreter.step_backward());
}

#[test]
fn test_replay_output_is_a_prefix_of_the_log() {
    let mut interpreter = run("dump(); a = m(10); dump();", 100);

    interpreter.rewind_to_start();
    assert!(interpreter.visible_output().is_empty());

    interpreter.step_forward();
    let after_first_dump = interpreter.visible_output().len();
    assert!(after_first_dump > 0);

    interpreter.jump_to_end();
    assert!(interpreter.visible_output().len() > after_first_dump);
}

#[test]
fn test_step_summaries_flag_silent_failures() {
    let mut interpreter = run("z = m(9999); free(ghost);", 100);

    interpreter.rewind_to_start();
    interpreter.step_forward();
    assert!(
        interpreter.current_snapshot().summary.contains("(no effect)"),
        "summary: {}",
        interpreter.current_snapshot().summary
    );
}
