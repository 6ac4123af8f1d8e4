//! Unit tests for CLI commands.

use super::cdn::{self, find_template, CdnArgs};
use super::*;

use docli_core::error::DocliError;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CDN_ASSET_URL: &str = "https://cdn.example.test/npm";

const DATA_FILE: &str = "\
- name: autocomplete_js
  pkg: \"@algolia/autocomplete-js\"
- name: satellite_css
  pkg: instantsearch.css
  file: themes/satellite-min.css
";

/// Temporary workspace with a data file and a templates directory
struct Workspace {
    _guard: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let guard = tempfile::tempdir().expect("Failed to create temp directory");
        let root = Utf8PathBuf::try_from(guard.path().to_path_buf()).unwrap();
        std::fs::create_dir_all(root.join("templates")).unwrap();
        Self {
            _guard: guard,
            root,
        }
    }

    fn write(&self, relative: &str, content: &str) {
        std::fs::write(self.root.join(relative), content).unwrap();
    }

    fn context(&self, dry_run: bool) -> CommandContext {
        CommandContext {
            cwd: self.root.clone(),
            output: OutputHandler::new(true, dry_run),
        }
    }
}

fn args_for(server: &MockServer) -> CdnArgs {
    let mut args = CdnArgs::new("cdn.yml", "templates", "out");
    args.registry_url = Some(format!("{}/registry", server.uri()));
    args.cdn_data_url = Some(format!("{}/data", server.uri()));
    args.cdn_asset_url = Some(CDN_ASSET_URL.to_string());
    args
}

async fn mount_packages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/registry/@algolia%2fautocomplete-js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dist-tags": { "latest": "1.17.0" },
            "versions": { "1.17.0": { "jsdelivr": "dist/umd/index.production.js" } }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/@algolia/autocomplete-js@1.17.0/flat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{ "name": "/dist/umd/index.production.js", "hash": "AUTOCOMPLETE" }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/registry/instantsearch.css"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dist-tags": { "latest": "8.5.1" },
            "versions": { "8.5.1": { "main": "index.js" } }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/instantsearch.css@8.5.1/flat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{ "name": "/themes/satellite-min.css", "hash": "SATELLITE" }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_generate_cdn_writes_snippets() {
    let server = MockServer::start().await;
    mount_packages(&server).await;

    let workspace = Workspace::new();
    workspace.write("cdn.yml", DATA_FILE);
    workspace.write(
        "templates/autocomplete_js.mdx.tmpl",
        "<script src=\"{{ src }}\" integrity=\"{{ integrity }}\"></script>\n",
    );
    workspace.write(
        "templates/satellite_css.mdx.tmpl",
        "{{ package_name }}@{{ version }} {{ file }}\n",
    );

    let ctx = workspace.context(false);
    cdn::execute(args_for(&server), &ctx, &CancellationToken::new())
        .await
        .unwrap();

    let autocomplete =
        std::fs::read_to_string(workspace.root.join("out/autocomplete_js.mdx")).unwrap();
    assert_eq!(
        autocomplete,
        format!(
            "<script src=\"{}/@algolia/autocomplete-js@1.17.0/dist/umd/index.production.js\" \
             integrity=\"sha256-AUTOCOMPLETE\"></script>\n",
            CDN_ASSET_URL
        )
    );

    let satellite = std::fs::read_to_string(workspace.root.join("out/satellite_css.mdx")).unwrap();
    assert_eq!(satellite, "instantsearch.css@8.5.1 /themes/satellite-min.css\n");
}

#[tokio::test]
async fn test_generate_cdn_dry_run_writes_nothing() {
    let server = MockServer::start().await;
    mount_packages(&server).await;

    let workspace = Workspace::new();
    workspace.write("cdn.yml", DATA_FILE);
    workspace.write("templates/autocomplete_js.mdx.tmpl", "{{ src }}");
    workspace.write("templates/satellite_css.mdx.tmpl", "{{ src }}");

    let ctx = workspace.context(true);
    cdn::execute(args_for(&server), &ctx, &CancellationToken::new())
        .await
        .unwrap();

    assert!(!workspace.root.join("out").exists());
}

#[tokio::test]
async fn test_generate_cdn_resolve_failure_names_snippet() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let workspace = Workspace::new();
    workspace.write("cdn.yml", "- name: missing\n");
    workspace.write("templates/missing.mdx.tmpl", "{{ src }}");

    let ctx = workspace.context(false);
    let err = cdn::execute(args_for(&server), &ctx, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "resolve package missing");
    assert!(matches!(
        err.downcast_ref::<DocliError>(),
        Some(DocliError::MetadataUnavailable { status: 404, .. })
    ));
    assert!(!workspace.root.join("out/missing.mdx").exists());
}

#[tokio::test]
async fn test_generate_cdn_invalid_template() {
    let server = MockServer::start().await;
    mount_packages(&server).await;

    let workspace = Workspace::new();
    workspace.write("cdn.yml", "- name: autocomplete_js\n  pkg: \"@algolia/autocomplete-js\"\n");
    workspace.write("templates/autocomplete_js.mdx.tmpl", "{{ src ");

    let ctx = workspace.context(false);
    let err = cdn::execute(args_for(&server), &ctx, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "load template for autocomplete_js");
    assert!(matches!(
        err.downcast_ref::<DocliError>(),
        Some(DocliError::Template { .. })
    ));
}

#[tokio::test]
async fn test_generate_cdn_unreadable_template() {
    let server = MockServer::start().await;
    mount_packages(&server).await;

    let workspace = Workspace::new();
    workspace.write("cdn.yml", "- name: autocomplete_js\n  pkg: \"@algolia/autocomplete-js\"\n");
    std::fs::create_dir_all(workspace.root.join("templates/autocomplete_js.d")).unwrap();

    let ctx = workspace.context(false);
    let err = cdn::execute(args_for(&server), &ctx, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "load template for autocomplete_js");
    assert!(matches!(
        err.downcast_ref::<DocliError>(),
        Some(DocliError::Io { .. })
    ));
}

#[tokio::test]
async fn test_generate_cdn_timeout_override_is_validated() {
    let server = MockServer::start().await;

    let workspace = Workspace::new();
    workspace.write("cdn.yml", DATA_FILE);

    let mut args = args_for(&server);
    args.timeout_secs = Some(0);

    let ctx = workspace.context(false);
    let err = cdn::execute(args, &ctx, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DocliError>(),
        Some(DocliError::ConfigValidation { field, .. }) if field == "timeout-secs"
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_cdn_cancelled() {
    let server = MockServer::start().await;
    mount_packages(&server).await;

    let workspace = Workspace::new();
    workspace.write("cdn.yml", DATA_FILE);
    workspace.write("templates/autocomplete_js.mdx.tmpl", "{{ src }}");

    let cancel = CancellationToken::new();
    cancel.cancel();

    let ctx = workspace.context(false);
    let err = cdn::execute(args_for(&server), &ctx, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DocliError>(),
        Some(DocliError::Cancelled { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_validate_options() {
    let server = MockServer::start().await;
    let workspace = Workspace::new();
    let ctx = workspace.context(false);

    let err = cdn::execute(args_for(&server), &ctx, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("data file"));
    assert!(err.to_string().contains("not found"));

    workspace.write("cdn.yml", DATA_FILE);
    let mut args = args_for(&server);
    args.templates = "no-templates".into();
    let err = cdn::execute(args, &ctx, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("template directory"));

    workspace.write("out", "not a directory");
    let err = cdn::execute(args_for(&server), &ctx, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("is not a directory"));
}

#[tokio::test]
async fn test_invalid_data_file() {
    let server = MockServer::start().await;
    let workspace = Workspace::new();
    workspace.write("cdn.yml", "---\n- file: \"missing-quote\n  name: \"bad-yaml\"\n");

    let ctx = workspace.context(false);
    let err = cdn::execute(args_for(&server), &ctx, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "read CDN data file cdn.yml");
    assert!(matches!(
        err.downcast_ref::<DocliError>(),
        Some(DocliError::DataFile { .. })
    ));
}

#[test]
fn test_find_template_primary_wins() {
    let workspace = Workspace::new();
    workspace.write("templates/foo.mdx.tmpl", "");
    workspace.write("templates/foo.txt", "");

    let found = find_template(&workspace.root.join("templates"), "foo").unwrap();
    assert_eq!(found, workspace.root.join("templates/foo.mdx.tmpl"));
}

#[test]
fn test_find_template_single_glob_match() {
    let workspace = Workspace::new();
    workspace.write("templates/foo.html", "");

    let found = find_template(&workspace.root.join("templates"), "foo").unwrap();
    assert_eq!(found, workspace.root.join("templates/foo.html"));
}

#[test]
fn test_find_template_no_match() {
    let workspace = Workspace::new();
    workspace.write("templates/bar.mdx.tmpl", "");

    let err = find_template(&workspace.root.join("templates"), "foo").unwrap_err();
    assert!(err.to_string().contains("no template files matched"));
}

#[test]
fn test_find_template_multiple_matches_sorted() {
    let workspace = Workspace::new();
    workspace.write("templates/foo_b.txt", "");
    workspace.write("templates/foo_a.txt", "");

    let err = find_template(&workspace.root.join("templates"), "foo").unwrap_err();
    let message = err.to_string();

    assert!(message.contains("multiple template files matched"));
    let first = message.find("foo_a.txt").unwrap();
    let second = message.find("foo_b.txt").unwrap();
    assert!(first < second);
}

#[test]
fn test_resolve_path() {
    let workspace = Workspace::new();
    let ctx = workspace.context(false);

    assert_eq!(
        ctx.resolve_path(Utf8Path::new("cdn.yml")),
        workspace.root.join("cdn.yml")
    );
    assert_eq!(
        ctx.resolve_path(Utf8Path::new("/abs/cdn.yml")),
        Utf8PathBuf::from("/abs/cdn.yml")
    );
}
