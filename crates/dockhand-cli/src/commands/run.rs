use dockhand_core::Task;
use dockhand_exec::{DryRunExecutor, RunContext, TaskRunner};
use std::path::Path;

/// Parse the task invocations, resolve the project once, and run the tasks in order.
pub async fn run_tasks(
    dir: &Path,
    manifest: Option<&Path>,
    dry_run: bool,
    invocations: &[String],
) -> anyhow::Result<()> {
    // Reject unknown tasks before anything runs
    let tasks = Task::parse_all(invocations)?;

    let context = RunContext::load(dir, manifest)?;
    tracing::debug!(
        dir = %context.project_dir.display(),
        tag = %context.params.docker_tag,
        tasks = tasks.len(),
        dry_run,
        "project resolved"
    );

    let mut out = std::io::stdout();
    if dry_run {
        TaskRunner::with_executor(DryRunExecutor, context)
            .dry_run(true)
            .run(&tasks, &mut out)
            .await?;
    } else {
        TaskRunner::new(context).run(&tasks, &mut out).await?;
    }

    Ok(())
}
