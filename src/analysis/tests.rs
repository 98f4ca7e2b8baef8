#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for struct metadata assembly

use super::*;

fn analyze(src: &str) -> Result<FileAnalysis, AnalysisError> {
    let mut sources = SourceSet::new();
    analyze_source(
        &mut sources,
        Path::new("structs.go"),
        src,
        FlagMatching::Substring,
    )
}

fn field(name: &str, ty: &str, skipped: bool) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        declared_type: ty.to_string(),
        skipped,
    }
}

#[test]
fn test_struct_ref_scenario() {
    let src = r#"package unittest

// StructRef ...
//go:generate go run ../../../newc
type StructRef struct {
	Debug bool
}
"#;
    let analysis = analyze(src).unwrap();
    assert_eq!(analysis.package.as_deref(), Some("unittest"));
    assert_eq!(
        analysis.structs,
        vec![StructDescriptor {
            name: "StructRef".to_string(),
            fields: vec![field("Debug", "bool", false)],
            value_mode: false,
            init_mode: false,
            init_failable: false,
            has_init_method: false,
            type_parameters: String::new(),
            type_arguments: String::new(),
        }]
    );
}

#[test]
fn test_skipped_field_with_init_and_value() {
    let src = r#"package unittest

// Skipeed ...
//go:generate go run ../../../newc --value --init
type Skipeed struct {
	Msg    string `bson:"msg" json:"msg"`
	Status int    `bson:"status" json:"status" newc:"-"`
}

func (e *Skipeed) init() {
	e.Status = 403
}
"#;
    let analysis = analyze(src).unwrap();
    let s = &analysis.structs[0];
    assert_eq!(s.name, "Skipeed");
    assert_eq!(
        s.fields,
        vec![field("Msg", "string", false), field("Status", "int", true)]
    );
    assert!(s.value_mode);
    assert!(s.init_mode);
    assert!(!s.init_failable);
    assert!(s.has_init_method);
}

#[test]
fn test_failable_init() {
    let src = r#"package unittest

import "fmt"

// StructWithInitError ...
//go:generate go run ../../../newc --init
type StructWithInitError struct {
	Debug bool
	Msg   string
}

func (s *StructWithInitError) init() error {
	if s.Msg == "" {
		return fmt.Errorf("message cannot be empty")
	}
	return nil
}
"#;
    let s = &analyze(src).unwrap().structs[0];
    assert!(s.init_mode);
    assert!(s.init_failable);
    assert!(!s.value_mode);
}

#[test]
fn test_init_declared_before_type() {
    let src = r#"package p

func (s *Late) init() error { return nil }

//go:generate newc --init
type Late struct{}
"#;
    assert!(analyze(src).unwrap().structs[0].init_failable);
}

#[test]
fn test_init_method_ignored_without_init_mode() {
    let src = r#"package p

//go:generate newc
type Plain struct{}

func (p *Plain) init() error { return nil }
"#;
    let s = &analyze(src).unwrap().structs[0];
    assert!(!s.init_mode);
    assert!(!s.init_failable);
    assert!(s.has_init_method);
}

#[test]
fn test_two_results_fail_whole_file() {
    let src = r#"package p

//go:generate newc
type Good struct{}

//go:generate newc --init
type Bad struct{}

func (b *Bad) init() (n int, err error) { return 0, nil }
"#;
    let err = analyze(src).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("\"Bad\""), "{msg}");
    assert!(msg.contains('2'), "{msg}");
}

#[test]
fn test_types_without_directive_are_skipped() {
    let src = r#"package p

// Alpha has an init value but no directive
type Alpha struct{ A int }

//go:generate stringer -type=Kind
type Kind int

type Beta struct{ B int }
"#;
    let analysis = analyze(src).unwrap();
    assert!(analysis.structs.is_empty());
}

#[test]
fn test_non_struct_types_are_skipped() {
    let src = r#"package p

//go:generate newc
type Kind int

//go:generate newc
type Iface interface{ Do() }
"#;
    assert!(analyze(src).unwrap().structs.is_empty());
}

#[test]
fn test_blank_line_detaches_directive() {
    let src = r#"package p

//go:generate newc

type Detached struct{}
"#;
    assert!(analyze(src).unwrap().structs.is_empty());
}

#[test]
fn test_descriptors_in_file_order() {
    let src = r#"package p

//go:generate newc
type B struct{}

//go:generate newc --value
type A struct{}

//go:generate newc
type C struct{}
"#;
    let names: Vec<_> = analyze(src)
        .unwrap()
        .structs
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["B", "A", "C"]);
}

#[test]
fn test_grouped_type_declaration_shares_doc() {
    let src = r#"package p

//go:generate newc --value
type (
	One struct{ X int }
	Two struct{ Y string }
	Three int
)
"#;
    let structs = analyze(src).unwrap().structs;
    assert_eq!(structs.len(), 2);
    assert!(structs.iter().all(|s| s.value_mode));
}

#[test]
fn test_duplicate_type_name_last_declaration_wins() {
    let src = r#"package p

//go:generate newc
type Dup struct{ A int }

//go:generate newc --value
type Dup struct{ B int }
"#;
    let structs = analyze(src).unwrap().structs;
    assert_eq!(structs.len(), 1);
    assert!(structs[0].value_mode);
    assert_eq!(structs[0].fields, vec![field("B", "int", false)]);
}

#[test]
fn test_imports_pass_through_in_order() {
    let src = r#"package p

import "fmt"

import (
	"log"
	repo "github.com/acme/app/repositories"
	_ "embed"
	"fmt"
)
"#;
    let imports = analyze(src).unwrap().imports;
    let pairs: Vec<_> = imports
        .iter()
        .map(|i| (i.alias.as_deref(), i.path.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (None, "fmt"),
            (None, "log"),
            (Some("repo"), "github.com/acme/app/repositories"),
            (Some("_"), "embed"),
            (None, "fmt"),
        ]
    );
}

#[test]
fn test_syntax_error_produces_no_output() {
    let src = "package p\n\n//go:generate newc\ntype Broken struct {\n\tA int\n";
    match analyze(src) {
        Err(AnalysisError::Syntax { path, .. }) => assert_eq!(path, Path::new("structs.go")),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_strict_matching_ignores_prose() {
    let src = r#"package p

// Cache holds the initial value
//go:generate newc
type Cache struct{}
"#;
    let mut sources = SourceSet::new();
    let strict = analyze_source(&mut sources, Path::new("a.go"), src, FlagMatching::Strict)
        .unwrap();
    assert!(!strict.structs[0].init_mode);
    assert!(!strict.structs[0].value_mode);

    let loose = analyze(src).unwrap();
    assert!(loose.structs[0].init_mode);
    assert!(loose.structs[0].value_mode);
}

#[test]
fn test_repeated_analysis_is_identical() {
    let src = r#"package p

//go:generate newc
type S struct {
	base
	*pkg.Widget
	z int
	a string
}
"#;
    assert_eq!(analyze(src).unwrap(), analyze(src).unwrap());
}

#[test]
fn test_directive_inside_block_comment_is_ignored() {
    let src = "package p\n\n/*\n//go:generate newc\n*/\ntype C struct{ X int }\n";
    assert!(analyze(src).unwrap().structs.is_empty());

    let src = "package p\n\n/* initial cache */\n//go:generate newc\ntype C struct{ X int }\n";
    let analysis = analyze(src).unwrap();
    assert_eq!(analysis.structs.len(), 1);
    assert!(analysis.structs[0].init_mode);
}

#[test]
fn test_generic_struct_keeps_type_parameters() {
    let src = r#"package p

//go:generate newc
type Pair[K comparable, V any] struct {
	key K
	val V
}

//go:generate newc
type Plain struct {
	n int
}
"#;
    let analysis = analyze(src).unwrap();
    let pair = &analysis.structs[0];
    assert_eq!(pair.type_parameters, "[K comparable, V any]");
    assert_eq!(pair.type_arguments, "[K, V]");
    assert_eq!(pair.fields, vec![field("key", "K", false), field("val", "V", false)]);

    let plain = &analysis.structs[1];
    assert!(plain.type_parameters.is_empty());
    assert!(plain.type_arguments.is_empty());
}
