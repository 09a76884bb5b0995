use dockhand_build::HELP_TEXT;
use dockhand_core::{BumpLevel, DockhandConfig, ProjectParameters, Task};
use dockhand_exec::executor::{RealExecutor, ShellExecutor};
use dockhand_exec::shell::ShellError;
use dockhand_exec::{Action, RunContext, RunError, TaskRunner};
use mockall::{Sequence, mock};
use std::path::Path;
use tempfile::TempDir;

mock! {
    Executor {}

    impl ShellExecutor for Executor {
        async fn run(&self, command: &str, dir: &Path) -> Result<(), ShellError>;
    }
}

fn context(dir: &Path) -> RunContext {
    RunContext {
        project_dir: dir.to_path_buf(),
        manifest_path: dir.join("package.json"),
        config: DockhandConfig::default(),
        params: ProjectParameters::new("@scope/foo-container", "1.2.3"),
        build_timestamp: 42,
    }
}

fn shell_commands(actions: &[Action]) -> Vec<&str> {
    actions
        .iter()
        .map(|a| match a {
            Action::Shell { command, .. } => command.as_str(),
            other => panic!("expected shell action, got {other:?}"),
        })
        .collect()
}

fn publish(tags: &[&str]) -> Task {
    Task::Publish {
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
    }
}

fn expect_in_sequence(mock: &mut MockExecutor, seq: &mut Sequence, expected: &'static str) {
    mock.expect_run()
        .withf(move |command, _| command == expected)
        .times(1)
        .in_sequence(seq)
        .returning(|_, _| Ok(()));
}

// ── Planning Tests ──

#[test]
fn publish_without_tags_plans_single_push() {
    let tmp = TempDir::new().unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    let actions = runner.plan(&publish(&[])).unwrap();

    assert_eq!(shell_commands(&actions), vec!["docker push scope/foo:1.2.3"]);
}

#[test]
fn publish_with_tags_plans_push_then_each_tag_in_order() {
    let tmp = TempDir::new().unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    let actions = runner.plan(&publish(&["edge", "latest"])).unwrap();

    assert_eq!(
        shell_commands(&actions),
        vec![
            "docker push scope/foo:1.2.3",
            "docker tag scope/foo:1.2.3 scope/foo:edge && docker push scope/foo:edge",
            "docker tag scope/foo:1.2.3 scope/foo:latest && docker push scope/foo:latest",
        ]
    );
}

#[test]
fn publish_empty_tag_falls_back_to_version() {
    let tmp = TempDir::new().unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    let actions = runner.plan(&publish(&[""])).unwrap();

    assert_eq!(
        shell_commands(&actions)[1],
        "docker tag scope/foo:1.2.3 scope/foo:1.2.3 && docker push scope/foo:1.2.3"
    );
}

#[test]
fn package_plans_docker_build_in_project_dir() {
    let tmp = TempDir::new().unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    let actions = runner.plan(&Task::Package).unwrap();
    let commands = shell_commands(&actions);

    assert_eq!(commands.len(), 1);
    let expected = format!(
        "docker build --rm --tag scope/foo:1.2.3 {} \
         --build-arg APP_NAME=foo --build-arg APP_VERSION=1.2.3 --build-arg BUILD_TIMESTAMP=42",
        tmp.path().display()
    );
    assert_eq!(commands[0], expected);
}

#[test]
fn format_plans_formatter_over_sources() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("README.md"), "# foo").unwrap();
    std::fs::create_dir_all(tmp.path().join("src")).unwrap();
    std::fs::write(tmp.path().join("src/index.ts"), "").unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    let actions = runner.plan(&Task::Format).unwrap();

    assert_eq!(
        shell_commands(&actions),
        vec!["npx prettier --write README.md src/index.ts"]
    );
}

#[test]
fn format_without_sources_fails_to_plan() {
    let tmp = TempDir::new().unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    assert!(matches!(
        runner.plan(&Task::Format),
        Err(RunError::Format { .. })
    ));
}

#[test]
fn help_and_default_plan_the_same() {
    let tmp = TempDir::new().unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    assert_eq!(runner.plan(&Task::Help).unwrap(), vec![Action::Help]);
    assert_eq!(
        runner.plan(&Task::Default).unwrap(),
        runner.plan(&Task::Help).unwrap()
    );
}

// ── Run Tests ──

#[tokio::test]
async fn run_publish_executes_commands_in_order() {
    let tmp = TempDir::new().unwrap();
    let mut mock = MockExecutor::new();
    let mut seq = Sequence::new();
    expect_in_sequence(&mut mock, &mut seq, "docker push scope/foo:1.2.3");
    expect_in_sequence(
        &mut mock,
        &mut seq,
        "docker tag scope/foo:1.2.3 scope/foo:edge && docker push scope/foo:edge",
    );
    expect_in_sequence(
        &mut mock,
        &mut seq,
        "docker tag scope/foo:1.2.3 scope/foo:latest && docker push scope/foo:latest",
    );

    let runner = TaskRunner::with_executor(mock, context(tmp.path()));
    let mut out = Vec::new();
    runner
        .run(&[publish(&["edge", "latest"])], &mut out)
        .await
        .unwrap();

    assert!(out.is_empty());
}

#[tokio::test]
async fn run_executes_tasks_in_given_order() {
    let tmp = TempDir::new().unwrap();
    let mut mock = MockExecutor::new();
    let mut seq = Sequence::new();
    mock.expect_run()
        .withf(|command, _| command.starts_with("docker build"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    expect_in_sequence(&mut mock, &mut seq, "docker push scope/foo:1.2.3");

    let runner = TaskRunner::with_executor(mock, context(tmp.path()));
    runner
        .run(&[Task::Package, publish(&[])], &mut Vec::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn run_stops_at_first_failure() {
    let tmp = TempDir::new().unwrap();
    let mut mock = MockExecutor::new();

    // Only the primary push may run; any further call would be unexpected.
    mock.expect_run()
        .withf(|command, _| command == "docker push scope/foo:1.2.3")
        .times(1)
        .returning(|command, _| {
            Err(ShellError::CommandFailed {
                command: command.to_owned(),
                status: "exit status: 1".to_owned(),
            })
        });

    let runner = TaskRunner::with_executor(mock, context(tmp.path()));
    let result = runner
        .run(&[publish(&["edge"]), Task::Package], &mut Vec::new())
        .await;

    match result {
        Err(RunError::Step { task, label, .. }) => {
            assert_eq!(task, "publish");
            assert_eq!(label, "docker push");
        }
        other => panic!("expected step failure, got {other:?}"),
    }
}

#[tokio::test]
async fn run_commands_execute_in_project_dir() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_path_buf();
    let mut mock = MockExecutor::new();
    mock.expect_run()
        .withf(move |_, d| d == dir.as_path())
        .times(1)
        .returning(|_, _| Ok(()));

    let runner = TaskRunner::with_executor(mock, context(tmp.path()));
    runner.run(&[Task::Package], &mut Vec::new()).await.unwrap();
}

#[tokio::test]
async fn help_and_default_print_identical_output() {
    let tmp = TempDir::new().unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    let mut help = Vec::new();
    runner.run(&[Task::Help], &mut help).await.unwrap();
    let mut default = Vec::new();
    runner.run(&[Task::Default], &mut default).await.unwrap();

    assert_eq!(help, default);
    assert_eq!(String::from_utf8(help).unwrap(), format!("{HELP_TEXT}\n"));
}

// ── Bump Tests ──

fn write_manifest(dir: &Path, version: &str) {
    std::fs::write(
        dir.join("package.json"),
        format!("{{\n  \"name\": \"@scope/foo-container\",\n  \"version\": \"{version}\"\n}}\n"),
    )
    .unwrap();
}

#[tokio::test]
async fn bump_rewrites_manifest_and_records_release() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "1.2.3");
    let mut mock = MockExecutor::new();
    let mut seq = Sequence::new();
    expect_in_sequence(
        &mut mock,
        &mut seq,
        "git commit package.json -m 'Release v1.3.0'",
    );
    expect_in_sequence(&mut mock, &mut seq, "git tag -a v1.3.0 -m 'Version 1.3.0'");

    let runner = TaskRunner::with_executor(mock, context(tmp.path()));
    let mut out = Vec::new();
    runner
        .run(&[Task::Bump(BumpLevel::Minor)], &mut out)
        .await
        .unwrap();

    let content = std::fs::read_to_string(tmp.path().join("package.json")).unwrap();
    assert!(content.contains("\"version\": \"1.3.0\""));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Bumped version: 1.2.3 -> 1.3.0\n"
    );
}

#[tokio::test]
async fn bump_dry_run_leaves_manifest_untouched() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "1.2.3");
    let mut mock = MockExecutor::new();
    mock.expect_run().times(2).returning(|_, _| Ok(()));

    let runner = TaskRunner::with_executor(mock, context(tmp.path())).dry_run(true);
    runner
        .run(&[Task::Bump(BumpLevel::Patch)], &mut Vec::new())
        .await
        .unwrap();

    let content = std::fs::read_to_string(tmp.path().join("package.json")).unwrap();
    assert!(content.contains("\"version\": \"1.2.3\""));
}

#[tokio::test]
async fn bump_without_git_steps_when_disabled() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "0.9.9");
    let mut ctx = context(tmp.path());
    ctx.config.bump.commit = false;
    ctx.config.bump.create_tag = false;

    let runner = TaskRunner::with_executor(MockExecutor::new(), ctx);
    runner
        .run(&[Task::Bump(BumpLevel::Major)], &mut Vec::new())
        .await
        .unwrap();

    let content = std::fs::read_to_string(tmp.path().join("package.json")).unwrap();
    assert!(content.contains("\"version\": \"1.0.0\""));
}

#[tokio::test]
async fn bump_rewrites_top_level_version_not_nested_config() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("package.json");
    std::fs::write(
        &manifest,
        r#"{"name":"svc","config":{"version":"9.9.9"},"version":"1.0.0"}"#,
    )
    .unwrap();
    let mut ctx = context(tmp.path());
    ctx.config.bump.commit = false;
    ctx.config.bump.create_tag = false;

    let runner = TaskRunner::with_executor(MockExecutor::new(), ctx);
    let mut out = Vec::new();
    runner
        .run(&[Task::Bump(BumpLevel::Patch)], &mut out)
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&manifest).unwrap(),
        r#"{"name":"svc","config":{"version":"9.9.9"},"version":"1.0.1"}"#
    );
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Bumped version: 1.0.0 -> 1.0.1\n"
    );
}

#[tokio::test]
async fn bump_at_maximum_version_fails_before_touching_manifest() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "18446744073709551615.0.0");
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    let result = runner
        .run(&[Task::Bump(BumpLevel::Major)], &mut Vec::new())
        .await;

    assert!(matches!(
        result,
        Err(RunError::Core(dockhand_core::Error::VersionOverflow { .. }))
    ));
    let content = std::fs::read_to_string(tmp.path().join("package.json")).unwrap();
    assert!(content.contains("\"version\": \"18446744073709551615.0.0\""));
}

#[tokio::test]
async fn publish_with_nul_in_tag_fails_before_running_anything() {
    let tmp = TempDir::new().unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    let result = runner
        .run(&[publish(&["edge\0"])], &mut Vec::new())
        .await;

    assert!(matches!(result, Err(RunError::Docker { .. })));
}

#[tokio::test]
async fn bump_fails_without_manifest() {
    let tmp = TempDir::new().unwrap();
    let runner = TaskRunner::with_executor(MockExecutor::new(), context(tmp.path()));

    let result = runner
        .run(&[Task::Bump(BumpLevel::Patch)], &mut Vec::new())
        .await;

    assert!(matches!(result, Err(RunError::Core(_))));
}

// ── Context Tests ──

#[test]
fn context_load_derives_parameters_from_manifest() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "2.0.0");

    let ctx = RunContext::load(tmp.path(), None).unwrap();

    assert_eq!(ctx.params.docker_tag, "scope/foo:2.0.0");
    assert_eq!(ctx.project_dir, tmp.path().canonicalize().unwrap());
    assert_eq!(ctx.manifest_display(), "package.json");
    assert_eq!(ctx.context_dir(), ctx.project_dir);
    assert!(ctx.build_timestamp > 0);
}

#[test]
fn context_load_honours_manifest_override_and_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("app")).unwrap();
    std::fs::write(
        tmp.path().join("app/service.json"),
        r#"{ "name": "bar", "version": "0.0.1" }"#,
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("dockhand.toml"),
        "[docker]\ncontext = \"app\"\n",
    )
    .unwrap();

    let ctx = RunContext::load(tmp.path(), Some(Path::new("app/service.json"))).unwrap();

    assert_eq!(ctx.params.docker_tag, "bar:0.0.1");
    assert_eq!(ctx.manifest_display(), "app/service.json");
    assert_eq!(ctx.context_dir(), ctx.project_dir.join("app"));
}

#[test]
fn context_load_without_manifest_uses_placeholders() {
    let tmp = TempDir::new().unwrap();

    let ctx = RunContext::load(tmp.path(), None).unwrap();

    assert_eq!(ctx.params.raw_name, "__UNKNOWN__");
    assert_eq!(ctx.params.version, "__UNKNOWN__");
}

#[test]
fn context_load_rejects_missing_project_dir() {
    let tmp = TempDir::new().unwrap();

    let result = RunContext::load(&tmp.path().join("nope"), None);

    assert!(matches!(
        result,
        Err(dockhand_core::Error::ProjectDirResolve { .. })
    ));
}

// ── Real Executor Tests ──

#[tokio::test]
async fn real_executor_reports_exit_status() {
    let tmp = TempDir::new().unwrap();

    RealExecutor.run("true", tmp.path()).await.unwrap();
    let err = RealExecutor.run("exit 3", tmp.path()).await.unwrap_err();

    assert!(matches!(err, ShellError::CommandFailed { .. }));
    assert!(err.to_string().contains("exit 3"), "got: {err}");
}

#[tokio::test]
async fn real_executor_runs_in_given_dir() {
    let tmp = TempDir::new().unwrap();

    RealExecutor
        .run("touch marker && test -f ./marker", tmp.path())
        .await
        .unwrap();

    assert!(tmp.path().join("marker").exists());
}
