//! Full-stack generation: bundled templates, Handlebars, real filesystem.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use instagen_adapters::{
    EmbeddedStore, HandlebarsEngine, InMemoryStore, LocalFilesystem, MemoryFilesystem, default_app,
};
use instagen_core::{
    application::{ApplicationError, SetupApp, SetupOperation},
    domain::{DomainError, Project, TemplateCategory, TemplateRef},
    error::InstagenError,
};
use tempfile::TempDir;
use walkdir::WalkDir;

const SOURCE_HEADER: &str = "// instagen: File auto generated -- DO NOT EDIT!!!\n";
const HASH_HEADER: &str = "# instagen: File auto generated -- DO NOT EDIT!!!\n";

fn project() -> Project {
    Project::new("rachio-next-run", "app").unwrap()
}

fn version(s: &str) -> SetupOperation {
    SetupOperation::toolchain_version(s.parse().unwrap())
}

/// Every file under `root`, keyed by relative path.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read_to_string(e.path()).unwrap())
        })
        .collect()
}

fn full_recipe() -> Vec<SetupOperation> {
    vec![
        version("1.23"),
        SetupOperation::native_interop(false),
        SetupOperation::pinned_dependencies(["github.com/acme/log"]),
        SetupOperation::packages(["logger", "pushover"]),
        SetupOperation::config_stub(),
        SetupOperation::github_workflows(["linter", "test"]),
        SetupOperation::build_rules(["docker"]),
        SetupOperation::code_owners(["@alice", "@bob"]),
    ]
}

#[test]
fn full_recipe_produces_expected_tree() {
    let dir = TempDir::new().unwrap();
    let report = default_app(project(), full_recipe())
        .with_root(dir.path())
        .generate()
        .unwrap();

    let files: Vec<_> = snapshot(dir.path()).into_keys().collect();
    let expected: Vec<PathBuf> = [
        ".github/workflows/linter.yml",
        ".github/workflows/test.yml",
        ".golangci.toml",
        "CODEOWNERS",
        "Makefile",
        "Makefile.golib",
        "app/config/config.go",
        "app/logger/config.go",
        "app/pushover/config.go",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(files, expected);
    assert_eq!(report.file_count(), expected.len());
}

#[test]
fn packages_start_with_source_header() {
    let dir = TempDir::new().unwrap();
    default_app(project(), vec![SetupOperation::packages(["logger", "pushover"])])
        .with_root(dir.path())
        .generate()
        .unwrap();

    let tree = snapshot(dir.path());
    assert_eq!(tree.len(), 2);
    for name in ["logger", "pushover"] {
        let content = &tree[&PathBuf::from(format!("app/{name}/config.go"))];
        assert!(content.starts_with(SOURCE_HEADER));
        assert!(content.contains(&format!("package {name}\n")));
    }
}

#[test]
fn regeneration_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    default_app(project(), full_recipe())
        .with_root(dir.path())
        .generate()
        .unwrap();
    let first = snapshot(dir.path());

    default_app(project(), full_recipe())
        .with_root(dir.path())
        .generate()
        .unwrap();
    assert_eq!(first, snapshot(dir.path()));
}

#[test]
fn workflows_require_a_toolchain_version() {
    let dir = TempDir::new().unwrap();
    let err = default_app(project(), vec![SetupOperation::github_workflows(["test"])])
        .with_root(dir.path())
        .generate()
        .unwrap_err();

    assert!(err.to_string().contains("toolchain_version"));
    assert!(matches!(
        err.root_cause(),
        InstagenError::Domain(DomainError::MissingSetting { .. })
    ));
    assert!(snapshot(dir.path()).is_empty());
}

#[test]
fn lint_config_only_with_linter_workflow() {
    let dir = TempDir::new().unwrap();
    default_app(
        project(),
        vec![version("1.22.5"), SetupOperation::github_workflows(["test"])],
    )
    .with_root(dir.path())
    .generate()
    .unwrap();

    let tree = snapshot(dir.path());
    assert_eq!(tree.len(), 1);
    let workflow = &tree[&PathBuf::from(".github/workflows/test.yml")];
    assert!(workflow.starts_with(HASH_HEADER));
    assert!(workflow.contains("go-version: \"1.22.5\""));

    let dir = TempDir::new().unwrap();
    default_app(
        project(),
        vec![version("1.23"), SetupOperation::github_workflows(["linter"])],
    )
    .with_root(dir.path())
    .generate()
    .unwrap();
    let lint = fs::read_to_string(dir.path().join(".golangci.toml")).unwrap();
    assert!(lint.starts_with(HASH_HEADER));
    assert!(lint.contains("go = \"1.23\""));
}

#[test]
fn unknown_workflow_is_template_not_found() {
    let dir = TempDir::new().unwrap();
    let err = default_app(
        project(),
        vec![version("1.23"), SetupOperation::github_workflows(["release"])],
    )
    .with_root(dir.path())
    .generate()
    .unwrap_err();

    assert!(matches!(
        err.root_cause(),
        InstagenError::Application(ApplicationError::TemplateNotFound {
            category: TemplateCategory::CiManifest,
            ..
        })
    ));
}

#[test]
fn code_owners() {
    let dir = TempDir::new().unwrap();
    default_app(project(), vec![SetupOperation::code_owners(Vec::<String>::new())])
        .with_root(dir.path())
        .generate()
        .unwrap();
    assert!(!dir.path().join("CODEOWNERS").exists());

    default_app(project(), vec![SetupOperation::code_owners(["alice", "bob"])])
        .with_root(dir.path())
        .generate()
        .unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("CODEOWNERS")).unwrap(),
        format!("{HASH_HEADER}alice\nbob")
    );
}

#[test]
fn manifest_is_patched_in_place() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("go.mod");
    fs::write(
        &manifest,
        "module github.com/acme/tool\n\ngo 1.21\n\nrequire github.com/x/y v1.0.0\n",
    )
    .unwrap();

    let report = default_app(project(), vec![version("1.23")])
        .with_root(dir.path())
        .generate()
        .unwrap();

    assert_eq!(report.files().collect::<Vec<_>>(), [Path::new("go.mod")]);
    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "module github.com/acme/tool\n\ngo 1.23\n\nrequire github.com/x/y v1.0.0\n"
    );

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&manifest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}

#[test]
fn missing_manifest_is_not_created() {
    let dir = TempDir::new().unwrap();
    default_app(project(), vec![version("1.23")])
        .with_root(dir.path())
        .generate()
        .unwrap();
    assert!(!dir.path().join("go.mod").exists());
}

#[test]
fn build_rules_carry_interop_and_pins() {
    let dir = TempDir::new().unwrap();
    default_app(
        project(),
        vec![
            SetupOperation::build_rules(["docker", "proto"]),
            SetupOperation::native_interop(true),
            SetupOperation::pinned_dependencies(["x", "y"]),
        ],
    )
    .with_root(dir.path())
    .generate()
    .unwrap();

    let makefile = fs::read_to_string(dir.path().join("Makefile")).unwrap();
    assert!(makefile.starts_with(HASH_HEADER));
    assert!(makefile.contains("include Makefile.golib\ninclude Makefile.docker\ninclude Makefile.proto\n"));
    assert!(makefile.contains("\tCGO_ENABLED=1 go build -o rachio-next-run ."));

    let golib = fs::read_to_string(dir.path().join("Makefile.golib")).unwrap();
    assert!(golib.contains("golib-latest:\n\tgo get -u x\n\tgo get -u y\n\tgo mod tidy\n"));
}

#[test]
fn build_rules_without_settings_render_defaults() {
    let dir = TempDir::new().unwrap();
    default_app(project(), vec![SetupOperation::build_rules(Vec::<String>::new())])
        .with_root(dir.path())
        .generate()
        .unwrap();

    let makefile = fs::read_to_string(dir.path().join("Makefile")).unwrap();
    assert!(makefile.contains("\tgo build -o rachio-next-run ."));
    assert!(!makefile.contains("CGO_ENABLED"));
    let golib = fs::read_to_string(dir.path().join("Makefile.golib")).unwrap();
    assert!(golib.contains("golib-latest:\n\tgo mod tidy\n"));
}

#[test]
fn config_stub_names_the_source_dir() {
    let dir = TempDir::new().unwrap();
    let project = Project::new("tool", "cmd/server").unwrap();
    default_app(project, vec![SetupOperation::config_stub()])
        .with_root(dir.path())
        .generate()
        .unwrap();

    let stub = fs::read_to_string(dir.path().join("cmd/server/config/config.go")).unwrap();
    assert!(stub.starts_with(SOURCE_HEADER));
    assert!(stub.contains("Config{Name: \"server\"}"));
}

#[test]
fn failure_stops_later_steps_and_keeps_earlier_output() {
    let dir = TempDir::new().unwrap();
    let err = default_app(
        project(),
        vec![
            SetupOperation::packages(["logger"]),
            SetupOperation::config_stub(),
            SetupOperation::github_workflows(["test"]),
            SetupOperation::code_owners(["@alice"]),
            SetupOperation::build_rules(Vec::<String>::new()),
        ],
    )
    .with_root(dir.path())
    .generate()
    .unwrap_err();

    match &err {
        InstagenError::StepFailed {
            step, operation, ..
        } => {
            assert_eq!(*step, 3);
            assert_eq!(*operation, "github_workflows");
        }
        other => panic!("unexpected error: {other}"),
    }
    let files: Vec<_> = snapshot(dir.path()).into_keys().collect();
    assert_eq!(
        files,
        [
            PathBuf::from("app/config/config.go"),
            PathBuf::from("app/logger/config.go")
        ]
    );
}

#[test]
fn blocked_output_path_is_a_filesystem_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app"), "not a directory").unwrap();

    let err = default_app(project(), vec![SetupOperation::packages(["logger"])])
        .with_root(dir.path())
        .generate()
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        InstagenError::Application(ApplicationError::FilesystemError { .. })
    ));
}

#[test]
fn broken_template_is_a_packaging_error() {
    let store = InMemoryStore::with_builtin().unwrap();
    store
        .insert(
            TemplateRef::from_stem(TemplateCategory::SourceFile, "package", "config"),
            "package {{package_nam}}\n",
        )
        .unwrap();
    let fs = MemoryFilesystem::new();

    let err = SetupApp::new(
        project(),
        vec![SetupOperation::packages(["logger"])],
        Box::new(store),
        Box::new(HandlebarsEngine::new()),
        Box::new(fs.clone()),
    )
    .with_root("/out")
    .generate()
    .unwrap_err();

    assert!(matches!(
        err.root_cause(),
        InstagenError::Application(ApplicationError::RenderingFailed { .. })
    ));
    assert!(fs.read_file("/out/app/logger/config.go").is_none());
}

#[test]
fn memory_filesystem_runs_the_full_recipe() {
    let fs = MemoryFilesystem::new().with_file("/out/go.mod", "module m\n\ngo 1.20\n");

    let report = SetupApp::new(
        project(),
        full_recipe(),
        Box::new(EmbeddedStore::new()),
        Box::new(HandlebarsEngine::new()),
        Box::new(fs.clone()),
    )
    .with_root("/out")
    .generate()
    .unwrap();

    assert_eq!(report.files().next(), Some(Path::new("go.mod")));
    assert_eq!(fs.read_file("/out/go.mod").as_deref(), Some("module m\n\ngo 1.23\n"));
    assert_eq!(fs.mode("/out/go.mod"), Some(0o644));
    assert_eq!(fs.list_files().len(), 10);
}

#[test]
fn local_filesystem_is_the_default_adapter() {
    // default_app writes through LocalFilesystem; make sure the type is usable directly
    let dir = TempDir::new().unwrap();
    let report = SetupApp::new(
        project(),
        vec![SetupOperation::config_stub()],
        Box::new(EmbeddedStore::new()),
        Box::new(HandlebarsEngine::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_root(dir.path().join("fresh"))
    .generate()
    .unwrap();

    assert_eq!(report.file_count(), 1);
    assert!(dir.path().join("fresh/app/config/config.go").is_file());
}
