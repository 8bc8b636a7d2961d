// End-to-end tests for the file rewrite pipeline
// preprocess → parse → locate → compile → emit → splice

use std::path::Path;

use pretty_assertions::assert_eq;

use closure_ir::config::DebugDumpConfig;
use closure_ir::pipeline::{process_file_content, ProcessingSession, SourceFile};
use closure_ir::{ClosureIrConfig, CompilerOptions, SymbolType};

const ANTOSHKA: &str = r#"package org.tilitili.tralivali

@WithGarmoshka
class Antoshka {

    @Kopat
    fun potato(): Boolean {
        val zadavali = false
        return getProhodili()
            .filter { it && zadavali }
            .sortedBy @Kotlinq(true) { it.id }
            .any({ listOf(it) } with Expression)
    }

    fun dinner(): Boolean {
        val otkazhus = visit(object: Visitor {
           override fun edvaLi(): Boolean {
              return true
           }
        })
        val poSile = inventory.filter { Lozhka(it) }.size > 0

        if (poSile && !otkazhus) {
           logger.debug(this) { "Bratsy" }
           return true
        }
        return false
    }

}"#;

const ANTOSHKA_REWRITTEN: &str = r#"package org.tilitili.tralivali;import io.github.kotlinq.*;import io.github.kotlinq.expression.node.*;

@WithGarmoshka
class Antoshka {

    @Kopat
    fun potato(): Boolean {
        val zadavali = false
        return getProhodili()
            .filter (withExpression1({ it && zadavali }, { And(LambdaArgument(0),Val("zadavali", zadavali)) }))
            .sortedBy @Kotlinq(true) { it.id }
            .any((withExpression1({ listOf(it) }, { Call(Identifier("listOf"),LambdaArgument(0)) })))
    }

    fun dinner(): Boolean {
        val otkazhus = visit(object: Visitor {
           override fun edvaLi(): Boolean {
              return true
           }
        })
        val poSile = inventory.filter (withExpression1({ Lozhka(it) }, { Call(Ref(Lozhka::class),LambdaArgument(0)) })).size > 0

        if (poSile && !otkazhus) {
           logger.debug(this, withExpression0({ "Bratsy" }, { Value("""Bratsy""") }))
           return true
        }
        return false
    }

}"#;

#[test]
fn test_main_success_scenario() {
    let rewritten = process_file_content(ANTOSHKA, &ClosureIrConfig::default())
        .unwrap()
        .expect("file has closures");
    assert_eq!(rewritten, ANTOSHKA_REWRITTEN);
}

#[test]
fn test_file_without_closures_is_unchanged() {
    let source = "package a.b\n\nfun sum(a: Int, b: Int) = a + b\n";
    assert_eq!(
        process_file_content(source, &ClosureIrConfig::default()).unwrap(),
        None
    );
}

#[test]
fn test_only_marked_declarations_are_rewritten() {
    let source = r#"package shop

@Kotlinq
class Cart {
    fun expensive() = items.filter { it.price > 100 }
}

class Wishlist {
    fun cheap() = items.filter { it.price < 10 }
}
"#;
    let config = ClosureIrConfig::new(CompilerOptions::default().only_if_annotation_present(true));
    let rewritten = process_file_content(source, &config).unwrap().unwrap();

    assert!(rewritten.contains(
        "items.filter (withExpression1({ it.price > 100 }, \
         { Greater(GetProperty(LambdaArgument(0),Identifier(\"price\")),Value(100)) }))"
    ));
    assert!(rewritten.contains("items.filter { it.price < 10 }"));
}

#[test]
fn test_rejected_closures_keep_a_valid_wrapper() {
    let source = "fun f() = run { println(1); 2 }\n";
    let rewritten = process_file_content(source, &ClosureIrConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(
        rewritten,
        "fun f() = run (withExpression0({ println(1); 2 }, { Error(\"\"\"Too complex lambda\"\"\") }))\n"
    );
}

#[test]
fn test_string_template_closure() {
    let source = "val describe = xs.map { \"3 * $it = ${it * 3}\" }\n";
    let rewritten = process_file_content(source, &ClosureIrConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(
        rewritten,
        "val describe = xs.map (withExpression1({ \"3 * $it = ${it * 3}\" }, \
         { Concat(Value(\"\"\"3 * \"\"\"),LambdaArgument(0),Value(\"\"\" = \"\"\"),\
         Multiply(LambdaArgument(0),Value(3))) }))\n"
    );
}

#[test]
fn test_dollar_in_string_stays_literal() {
    let source = "val labels = xs.map { \"cost \\${x}\" }\n";
    let rewritten = process_file_content(source, &ClosureIrConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(
        rewritten,
        "val labels = xs.map (withExpression0({ \"cost \\${x}\" }, \
         { Value(\"\"\"cost ${'$'}{x}\"\"\") }))\n"
    );
}

#[test]
fn test_symbol_types_from_config() {
    let source = "val prices = xs.map { money(it) }\n";
    let config = ClosureIrConfig::new(
        CompilerOptions::default().with_symbol_type("money", SymbolType::Constructor),
    );
    let rewritten = process_file_content(source, &config).unwrap().unwrap();
    assert!(rewritten.contains("{ Call(Ref(money::class),LambdaArgument(0)) }"));

    let rewritten = process_file_content(source, &ClosureIrConfig::default())
        .unwrap()
        .unwrap();
    assert!(rewritten.contains("{ Call(Ref(::money),LambdaArgument(0)) }"));
}

#[test]
fn test_custom_marker_from_yaml() {
    let config = ClosureIrConfig::from_yaml_str(
        "version: 1\ncompiler:\n  only_if_annotation_present: true\nmarker: Expressive\n",
    )
    .unwrap();
    let source = "@Expressive\nfun f() = xs.map { it }\n@Kotlinq\nfun g() = xs.map { it }\n";
    let rewritten = process_file_content(source, &config).unwrap().unwrap();
    assert_eq!(
        rewritten,
        "@Expressive\nfun f() = xs.map (withExpression1({ it }, { LambdaArgument(0) }))\n\
         @Kotlinq\nfun g() = xs.map { it }\n"
    );
}

#[test]
fn test_session_batch_with_debug_dumps() {
    let dir = tempfile::tempdir().unwrap();
    let dumps = dir.path().join("temp");
    let session = ProcessingSession::new(
        ClosureIrConfig::default().with_debug_dump(DebugDumpConfig::enabled_in(&dumps)),
    );

    let files = vec![
        SourceFile::new("src/Antoshka.kt", ANTOSHKA),
        SourceFile::new("src/Plain.kt", "package p\nval x = 1\n"),
    ];
    let outcomes = session.process_batch(&files);

    assert_eq!(session.processed(), 2);
    assert_eq!(
        outcomes[0].result.as_ref().unwrap().as_deref(),
        Some(ANTOSHKA_REWRITTEN)
    );
    assert!(outcomes[1].result.as_ref().unwrap().is_none());

    // Batch order is not the processing order, so only the dump count is stable
    let dumped: Vec<_> = std::fs::read_dir(&dumps)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(dumped.len(), 1);
    assert!(dumped[0].starts_with("Antoshka_"));
    assert!(dumped[0].ends_with(".kt"));
}

#[test]
fn test_patch_falls_back_to_original() {
    let session = ProcessingSession::new(ClosureIrConfig::default());
    let plain = "package p\nval x = 1\n";
    assert_eq!(session.patch(Path::new("Plain.kt"), plain), plain);
    assert_eq!(
        session.patch(Path::new("Antoshka.kt"), ANTOSHKA),
        ANTOSHKA_REWRITTEN
    );
}
