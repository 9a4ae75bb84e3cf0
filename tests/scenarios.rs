//! End-to-end scenarios over small namespaces.
//!
//! Each test builds its own namespace, parses a line, and where relevant
//! runs the executor and checks what reached the output sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use treeshell::core::error::{ErrorKind, ShellError};
use treeshell::core::exec::execute;
use treeshell::core::params::{Parameter, Value};
use treeshell::core::tree::{CommandDef, Namespace, NamespaceBuilder};
use treeshell::core::{autocomplete, parse};

fn echo_namespace() -> Namespace {
    let mut b = NamespaceBuilder::new();
    let root = b.root();
    b.command(
        root,
        CommandDef::new("echo", |args, out| {
            out.write(args.string("text")?);
            Ok(())
        })
        .param(Parameter::string("text")),
    )
    .unwrap();
    b.build()
}

#[test]
fn echo_parses_and_writes() {
    let ns = echo_namespace();
    let parsed = parse(&ns, "echo hello", ns.root()).unwrap();
    assert_eq!(parsed.arguments.len(), 1);
    assert_eq!(
        parsed.arguments.get("text"),
        Some(&Value::String("hello".into()))
    );

    let mut out = String::new();
    execute(&ns, parsed.command, &parsed.arguments, &mut out).unwrap();
    assert_eq!(out, "hello");
}

#[test]
fn toggle_defaults_to_negated_external_flag() {
    let flag = Arc::new(AtomicBool::new(false));
    let current = Arc::clone(&flag);

    let mut b = NamespaceBuilder::new();
    let root = b.root();
    b.command(
        root,
        CommandDef::new("toggle", |_, _| Ok(()))
            .param(Parameter::toggle("value", move || current.load(Ordering::SeqCst))),
    )
    .unwrap();
    let ns = b.build();

    let parsed = parse(&ns, "toggle", ns.root()).unwrap();
    assert_eq!(parsed.arguments.get("value"), Some(&Value::Boolean(true)));

    flag.store(true, Ordering::SeqCst);
    let parsed = parse(&ns, "toggle", ns.root()).unwrap();
    assert_eq!(parsed.arguments.get("value"), Some(&Value::Boolean(false)));
}

fn lib_namespace() -> Namespace {
    let mut b = NamespaceBuilder::new();
    let root = b.root();
    let lib = b.directory(root, "lib", "").unwrap();
    b.directory(root, "list", "").unwrap();
    b.command(lib, CommandDef::new("build", |_, _| Ok(())))
        .unwrap();
    b.build()
}

#[test]
fn resolution_failures() {
    let ns = lib_namespace();
    assert_eq!(
        parse(&ns, "unknown/build", ns.root()).unwrap_err(),
        ShellError::EntryNotFound("unknown".into())
    );
    let err = parse(&ns, "lib extra args", ns.root()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotACommand);
}

#[test]
fn completion_ambiguity() {
    let ns = lib_namespace();

    let s = autocomplete(&ns, "li", ns.root()).unwrap();
    let names: Vec<&str> = s.candidates.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["lib", "list"]);
    assert_eq!(s.common_prefix, "li");

    let s = autocomplete(&ns, "lib", ns.root()).unwrap();
    let names: Vec<&str> = s.candidates.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["lib"]);
    assert_eq!(s.common_prefix, "lib");
}

#[test]
fn required_only_commands_bind_every_parameter() {
    let mut b = NamespaceBuilder::new();
    let root = b.root();
    let lib = b.directory(root, "lib", "").unwrap();
    b.command(
        root,
        CommandDef::new("all", |_, _| Ok(()))
            .param(Parameter::string("s"))
            .param(Parameter::integer("i"))
            .param(Parameter::double("d"))
            .param(Parameter::boolean("b"))
            .param(Parameter::directory("dir"))
            .param(Parameter::command("cmd")),
    )
    .unwrap();
    let ns = b.build();

    let parsed = parse(&ns, "all text -3 0.25 TRUE lib /all", ns.root()).unwrap();
    let args = &parsed.arguments;
    assert_eq!(args.len(), 6);
    assert_eq!(args.string("s").unwrap(), "text");
    assert_eq!(args.integer("i").unwrap(), -3);
    assert_eq!(args.double("d").unwrap(), 0.25);
    assert!(args.boolean("b").unwrap());
    assert_eq!(args.directory("dir").unwrap(), lib);
    assert_eq!(args.command("cmd").unwrap(), parsed.command);
}

#[test]
fn executor_failure_is_reported_not_raised() {
    let mut b = NamespaceBuilder::new();
    let root = b.root();
    b.command(
        root,
        CommandDef::new("open", |args, out| {
            out.write_line("opening");
            anyhow::bail!("file not found: {}", args.string("path")?)
        })
        .param(Parameter::string("path")),
    )
    .unwrap();
    let ns = b.build();

    let parsed = parse(&ns, "open notes.txt", ns.root()).unwrap();
    let mut out = String::new();
    let err = execute(&ns, parsed.command, &parsed.arguments, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExecutionError);
    assert_eq!(err.message(), "file not found: notes.txt");
    assert_eq!(out, "opening\n");
}
