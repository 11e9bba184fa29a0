//! Analysis over a space-separated suite

use robot_analysis::editing::{tab_action, TabAction};
use robot_analysis::folding::folding_regions;
use robot_analysis::hints::{hint_candidates, hint_context, insertion_edit, HintKind};
use robot_analysis::keywords::{find_keyword_docs, KeywordLibrary};
use robot_config::load_defaults;
use robot_parser::robot::cells::{cell_contents, cell_number_at};
use robot_parser::robot::structure::statement_range;
use robot_parser::robot::{ParseCache, Position, SourceText};

const SUITE: &str = "\
*** Settings ***
Library    OperatingSystem

*** Test Cases ***
Create File
    Create File    ${TEMPDIR}/x.txt
    ...    hello
    ${text}=    Get File    ${TEMPDIR}/x.txt

*** Keywords ***
Cleanup
    Remove File    ${TEMPDIR}/x.txt
";

fn operating_system() -> KeywordLibrary {
    let mut library = KeywordLibrary::new("OperatingSystem", None);
    library.add_keyword("Create File", vec!["path".into(), "content=".into()], "Creates a file.");
    library.add_keyword("Get File", vec!["path".into()], "Returns the contents of a file.");
    library.add_keyword("Remove File", vec!["path".into()], "Removes a file.");
    library
}

#[test]
fn folds_tables_and_blocks() {
    let source = SourceText::new(SUITE);
    let mut cache = ParseCache::new();
    let regions: Vec<(usize, usize)> = folding_regions(&mut cache, &source)
        .iter()
        .map(|region| (region.start_line, region.end_line))
        .collect();
    assert_eq!(regions, vec![(0, 2), (3, 8), (4, 8), (9, 11), (10, 11)]);
}

#[test]
fn statement_spans_continuation_rows() {
    let source = SourceText::new(SUITE);
    let mut cache = ParseCache::new();
    assert_eq!(
        statement_range(&mut cache, &source, Position::new(6, 5)),
        (Position::new(5, 0), Position::new(7, 0))
    );
}

#[test]
fn keyword_docs_for_argument_cell() {
    let source = SourceText::new(SUITE);
    let mut cache = ParseCache::new();
    let position = Position::new(7, 30);
    // the leading separator does not open an empty cell in this dialect
    let cells = cell_contents(&mut cache, &source, position.line);
    assert_eq!(cells, vec!["${text}=", "Get File", "${TEMPDIR}/x.txt"]);

    let cell_number = cell_number_at(&mut cache, &source, position);
    assert_eq!(cell_number, 2);

    let libraries = vec![operating_system()];
    let docs = find_keyword_docs(&libraries, &cells, cell_number).expect("docs");
    assert_eq!(docs.keyword.name, "Get File");
    assert_eq!(docs.library.name, "OperatingSystem");
}

#[test]
fn keyword_hint_in_space_row_has_no_pipe() {
    let source = SourceText::new(SUITE);
    let mut cache = ParseCache::new();
    let position = Position::new(11, 8);
    let context = hint_context(&mut cache, &source, position, None).expect("context");
    assert_eq!(context.kind, HintKind::Keyword);
    assert_eq!(context.prefix, "Remove File");

    let libraries = vec![operating_system()];
    let hints = hint_candidates(&mut cache, &source, &context, &libraries);
    assert_eq!(hints.len(), 1);

    let config = load_defaults().expect("defaults");
    let edit = insertion_edit(&context, &hints[0].label, &config.hints);
    assert_eq!(edit.new_text, "Remove File");
    assert_eq!(edit.start, Position::new(11, 4));
}

#[test]
fn tab_moves_between_cells() {
    let source = SourceText::new(SUITE);
    let mut cache = ParseCache::new();
    let config = load_defaults().expect("defaults");
    assert_eq!(
        tab_action(&mut cache, &source, Position::new(5, 6), &config.editing),
        TabAction::MoveTo(Position::new(5, 19))
    );
}

#[test]
fn tab_never_inserts_pipes() {
    let source = SourceText::new(SUITE);
    let mut cache = ParseCache::new();
    let config = load_defaults().expect("defaults");
    assert_eq!(
        tab_action(&mut cache, &source, Position::new(5, 35), &config.editing),
        TabAction::MoveTo(Position::new(6, 0))
    );
    assert_eq!(
        tab_action(&mut cache, &source, Position::new(8, 0), &config.editing),
        TabAction::MoveTo(Position::new(9, 0))
    );
}
