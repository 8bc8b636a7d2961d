// Round-trip tests: compile → emit → read gives back the compiled tree
//
// The reader stands in for compiling the emitted code against the runtime node
// library. `Val` values are re-captured from bindings, `Ref`s compare by name.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use closure_ir::features::parsing::node_kinds;
use closure_ir::{
    emit, BinaryOp, CompilerOptions, EmitError, ExpressionCompiler, KotlinParser, Literal, Node,
    NodeReader, Parser, Reference, ResolvedSymbol, SymbolResolver,
};

fn compile(closure: &str) -> Node {
    let source = format!("val x = {}", closure);
    let tree = KotlinParser::new().parse(&source, "RoundTrip.kt").unwrap();
    let lambda = tree
        .root
        .find_descendant(node_kinds::LAMBDA_LITERAL)
        .expect("closure literal");
    let options = CompilerOptions::default();
    ExpressionCompiler::new(&options).compile(lambda, &tree.source)
}

fn round_trip(closure: &str) -> (Node, Node) {
    let compiled = compile(closure);
    let code = emit(&compiled).unwrap();
    let read = NodeReader::new().read(&code).unwrap();
    (compiled, read)
}

#[test]
fn test_round_trip_closures() {
    let closures = [
        "{ it }",
        "{ a, b -> b }",
        "{ a }",
        "{ -it + 2 * 3L }",
        "{ !(it && flag) || other }",
        "{ it >= 1.5 && it <= 2.5f }",
        "{ a.b.c }",
        "{ it.name == \"Ivan\" }",
        "{ max(it.a, global.c.d()) }",
        "{ listOf(it) }",
        "{ Pair(it, null) }",
        "{ it in listOf(b) }",
        "{ \"3 * $it = ${it * 3}\" }",
        "{ \"tab\\there\" }",
        "{ }",
        "{ a(); b() }",
        "{ if (it) 1 else 2 }",
        "{ it % 2 }",
        "{ 0xFF }",
    ];
    for closure in closures {
        let (compiled, read) = round_trip(closure);
        assert_eq!(read, compiled, "closure: {}", closure);
    }
}

#[test]
fn test_round_trip_strings_needing_escapes() {
    let closures = [
        r#"{ it == "a\"\"\"b" }"#,
        r#"{ it == """raw""" }"#,
        r#"{ "cost \${x}" }"#,
        r#"{ "ends with \"" }"#,
    ];
    for closure in closures {
        let (compiled, read) = round_trip(closure);
        assert_eq!(read, compiled, "closure: {}", closure);
    }
}

#[test]
fn test_val_bindings_recaptured() {
    let compiled = compile("{ it > limit }");
    let code = emit(&compiled).unwrap();
    assert_eq!(code, r#"Greater(LambdaArgument(0),Val("limit", limit))"#);

    let mut bindings = HashMap::new();
    bindings.insert("limit".to_string(), Literal::Int(10));
    let read = NodeReader::new().with_bindings(bindings).read(&code).unwrap();

    match read {
        Node::Binary(BinaryOp::Greater, _, right) => assert_eq!(
            *right,
            Node::Val {
                name: "limit".to_string(),
                value: Some(Literal::Int(10)),
            }
        ),
        other => panic!("unexpected tree: {:?}", other),
    }
}

struct MathResolver;

impl SymbolResolver for MathResolver {
    fn resolve(&self, qualified_name: &str) -> Option<ResolvedSymbol> {
        let handle: Arc<dyn Any + Send + Sync> = match qualified_name {
            "::sqrt" => Arc::new(f64::sqrt as fn(f64) -> f64),
            _ => return None,
        };
        Some(ResolvedSymbol {
            name: qualified_name.to_string(),
            handle,
        })
    }
}

#[test]
fn test_resolved_references_are_not_emitted() {
    let code = emit(&compile("{ sqrt(it) }")).unwrap();
    assert_eq!(code, "Call(Ref(::sqrt),LambdaArgument(0))");

    let resolver = MathResolver;
    let read = NodeReader::new().with_resolver(&resolver).read(&code).unwrap();
    let Node::Call { callee, .. } = &read else {
        panic!("unexpected tree: {:?}", read);
    };
    let Node::Ref(Reference::Resolved(symbol)) = callee.as_ref() else {
        panic!("reference not resolved: {:?}", callee);
    };
    let sqrt = symbol.handle.downcast_ref::<fn(f64) -> f64>().unwrap();
    assert_eq!(sqrt(16.0), 4.0);

    assert!(matches!(
        emit(&read),
        Err(EmitError::UnserializableReference { ref name }) if name == "::sqrt"
    ));
}

// `q`-prefixed names never collide with Kotlin keywords
fn operand() -> impl Strategy<Value = String> {
    prop_oneof![
        "q[a-z0-9]{0,6}",
        (0u32..10_000).prop_map(|n| n.to_string()),
        Just("it".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_additive_chains_fold_left(
        first in operand(),
        rest in prop::collection::vec((prop_oneof![Just("+"), Just("-")], operand()), 1..6),
    ) {
        let mut closure = format!("{{ {}", first);
        for (op, operand) in &rest {
            closure.push_str(&format!(" {} {}", op, operand));
        }
        closure.push_str(" }");

        let compiled = compile(&closure);

        // Outermost operator is the last one written
        let (last_op, _) = rest.last().unwrap();
        let expected_op = if *last_op == "+" { BinaryOp::Plus } else { BinaryOp::Minus };
        match &compiled {
            Node::Binary(op, _, _) => prop_assert_eq!(*op, expected_op),
            other => prop_assert!(false, "not a binary tree: {:?}", other),
        }

        // Left spine depth equals operator count
        let mut depth = 0;
        let mut current = &compiled;
        while let Node::Binary(_, left, _) = current {
            depth += 1;
            current = left;
        }
        prop_assert_eq!(depth, rest.len());

        let read = NodeReader::new().read(&emit(&compiled).unwrap()).unwrap();
        prop_assert_eq!(read, compiled);
    }
}
