use nulock_core::graph::{LibraryEntry, ResolvedGraph, ResolvedTarget, TargetLibrary};
use nulock_core::lockfile::{InstallationType, LockFileBuilder, LockFileFormat};
use nulock_core::project::{DeclaredDependency, FrameworkSpec, ProjectSpec};
use nulock_core::types::{Framework, PackageVersion, StringComparison};

fn fw(s: &str) -> Framework {
    Framework::parse(s).expect("framework should parse")
}

fn v(s: &str) -> PackageVersion {
    PackageVersion::parse(s).expect("version should parse")
}

fn project() -> ProjectSpec {
    ProjectSpec::new("/proj")
        .with_framework(
            FrameworkSpec::new(fw("net8.0"))
                .with_dependency(DeclaredDependency::new("Serilog")),
        )
        .with_framework(
            FrameworkSpec::new(fw("netstandard2.0"))
                .with_dependency(DeclaredDependency::new("Newtonsoft.Json")),
        )
}

fn target(framework: &str, rid: Option<&str>) -> ResolvedTarget {
    ResolvedTarget::new(fw(framework), rid.map(str::to_string))
        .with_library(TargetLibrary::package("System.Memory", v("4.5.5")))
        .with_library(TargetLibrary::package("Serilog", v("3.1.1")))
        .with_library(TargetLibrary::package("Newtonsoft.Json", v("13.0.3")))
}

/// Targets deliberately out of order.
fn graph() -> ResolvedGraph {
    ResolvedGraph::new()
        .with_target(target("netstandard2.0", None))
        .with_target(target("net8.0", Some("win-x64")))
        .with_target(target("net8.0", Some("linux-x64")))
        .with_target(target("net8.0", None))
        .with_library(LibraryEntry::package("System.Memory", v("4.5.5"), "mem=="))
        .with_library(LibraryEntry::package("Serilog", v("3.1.1"), "log=="))
        .with_library(LibraryEntry::package("Newtonsoft.Json", v("13.0.3"), "json=="))
}

fn builder() -> LockFileBuilder {
    LockFileBuilder::new(1).with_id_comparison(StringComparison::Ordinal)
}

#[test]
fn test_rebuild_is_identical() {
    let first = builder().build(&graph(), &project()).expect("build should succeed");
    let second = builder().build(&graph(), &project()).expect("build should succeed");

    assert_eq!(first, second);
    assert_eq!(
        LockFileFormat::serialize(&first).unwrap(),
        LockFileFormat::serialize(&second).unwrap()
    );
}

#[test]
fn test_targets_ordered_by_framework_then_rid() {
    let lock_file = builder().build(&graph(), &project()).unwrap();
    let names: Vec<String> = lock_file.targets().iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec![
            "net8.0",
            "net8.0/linux-x64",
            "net8.0/win-x64",
            "netstandard2.0"
        ]
    );
}

#[test]
fn test_runtime_identifiers_ordered_ordinally() {
    let graph = ResolvedGraph::new()
        .with_target(target("net8.0", Some("linux-x64")))
        .with_target(target("net8.0", Some("Win-x64")))
        .with_library(LibraryEntry::package("System.Memory", v("4.5.5"), "mem=="))
        .with_library(LibraryEntry::package("Serilog", v("3.1.1"), "log=="))
        .with_library(LibraryEntry::package("Newtonsoft.Json", v("13.0.3"), "json=="));

    let lock_file = builder().build(&graph, &project()).unwrap();
    let names: Vec<String> = lock_file.targets().iter().map(|t| t.name()).collect();
    // Upper-case letters sort before lower-case ones byte-wise.
    assert_eq!(names, vec!["net8.0/Win-x64", "net8.0/linux-x64"]);
}

#[test]
fn test_classification_is_per_framework() {
    let lock_file = builder().build(&graph(), &project()).unwrap();

    let net8 = lock_file.target("net8.0").unwrap();
    let ids: Vec<&str> = net8.dependencies().iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["Serilog", "System.Memory", "Newtonsoft.Json"]);
    assert_eq!(net8.dependencies()[0].installation_type(), InstallationType::Direct);
    assert!(net8.dependencies()[1..].iter().all(|d| !d.is_direct()));

    let standard = lock_file.target("netstandard2.0").unwrap();
    let ids: Vec<&str> = standard.dependencies().iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["Newtonsoft.Json", "System.Memory", "Serilog"]);
    assert!(standard.dependency("Newtonsoft.Json").unwrap().is_direct());
    assert!(!standard.dependency("Serilog").unwrap().is_direct());
}

#[test]
fn test_rid_targets_share_framework_classification() {
    let lock_file = builder().build(&graph(), &project()).unwrap();
    let ridless = lock_file.target("net8.0").unwrap();
    let win = lock_file.target("net8.0/win-x64").unwrap();
    assert_eq!(ridless.dependencies(), win.dependencies());
}

#[test]
fn test_each_dependency_carries_its_hash() {
    let lock_file = builder().build(&graph(), &project()).unwrap();
    for target in lock_file.targets() {
        let memory = target.dependency("System.Memory").unwrap();
        assert_eq!(memory.content_hash(), Some("mem=="));
        assert_eq!(memory.resolved_version().unwrap().to_string(), "4.5.5");
    }
}
