#![cfg(unix)]

mod common;

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use upkeep::batch::TaskStatus;
use upkeep::mirror::MirrorJob;

type TestResult = Result<(), Box<dyn Error>>;

fn job(url: String, dir: &Path, rank_tool: String) -> MirrorJob {
    MirrorJob {
        url,
        fetch_timeout: Duration::from_secs(20),
        probe_timeout: Duration::from_secs(2),
        result_count: 7,
        rank_tool,
        source_path: dir.join("mirrorlist.orig"),
        ranked_path: dir.join("mirrorlist.pacnew"),
    }
}

#[tokio::test]
async fn successful_pipeline_persists_ranked_list() -> TestResult {
    let dir = tempfile::tempdir()?;
    let ranked_output = "Server = https://fast.mirror/$repo/os/$arch\n\
                         Server = https://ok.mirror/$repo/os/$arch\n";
    let tool = common::fake_rank_tool(dir.path(), ranked_output)?;

    let raw_list = "## Germany\n\
                    #Server = https://de.mirror/$repo/os/$arch\n\
                    Server = https://active.mirror/$repo/os/$arch\n";
    let url = common::serve_once(raw_list.to_string()).await?;

    let job = job(url, dir.path(), tool.display().to_string());
    let outcome = job.run("arch-mirrors", &CancellationToken::new()).await;

    assert_eq!(outcome.status, TaskStatus::Success);
    assert_eq!(outcome.stdout, ranked_output);

    // The extracted list went through the uncomment/keep/discard rules.
    let source = std::fs::read_to_string(&job.source_path)?;
    assert_eq!(
        source,
        "Server = https://de.mirror/$repo/os/$arch\n\
         Server = https://active.mirror/$repo/os/$arch\n"
    );

    // The ranked artifact is persisted world-readable.
    use std::os::unix::fs::PermissionsExt;
    assert_eq!(std::fs::read_to_string(&job.ranked_path)?, ranked_output);
    let mode = std::fs::metadata(&job.ranked_path)?.permissions().mode();
    assert_eq!(mode & 0o777, 0o644);

    // The utility got the probe timeout, format flags, count, and input path.
    let args = common::recorded_args(dir.path())?;
    assert!(args.contains("-m 2 -w -p -n 7"));
    assert!(args.contains("mirrorlist.orig"));

    let last = outcome.narrative.last().expect("narrative not empty");
    assert!(last.contains("Ranked 2 mirrors"));

    Ok(())
}

#[tokio::test]
async fn missing_ranking_tool_is_a_task_local_failure() -> TestResult {
    let dir = tempfile::tempdir()?;
    let url = common::serve_once("#Server = https://a/\n".to_string()).await?;

    let job = job(url, dir.path(), "upkeep-test-missing-ranker".to_string());
    let outcome = job.run("arch-mirrors", &CancellationToken::new()).await;

    assert_eq!(outcome.status, TaskStatus::Failed(1));
    assert!(outcome.stderr.contains("not installed"));

    // The pipeline got as far as writing the extracted list.
    assert_eq!(
        std::fs::read_to_string(&job.source_path)?,
        "Server = https://a/\n"
    );
    assert!(!job.ranked_path.exists());

    Ok(())
}

#[tokio::test]
async fn network_failure_is_reported_in_the_outcome() -> TestResult {
    let dir = tempfile::tempdir()?;

    // Nothing listens on port 1; the connect fails fast.
    let job = job(
        "http://127.0.0.1:1/".to_string(),
        dir.path(),
        "upkeep-test-missing-ranker".to_string(),
    );
    let outcome = job.run("arch-mirrors", &CancellationToken::new()).await;

    assert_eq!(outcome.status, TaskStatus::Failed(1));
    assert!(outcome.stderr.contains("network request failed"));
    let last = outcome.narrative.last().expect("narrative not empty");
    assert!(last.contains("ERROR"));

    Ok(())
}

#[tokio::test]
async fn rerun_cleans_stale_artifacts_first() -> TestResult {
    let dir = tempfile::tempdir()?;

    let first_url = common::serve_once("#Server = https://first/\n".to_string()).await?;
    let second_url = common::serve_once("#Server = https://second/\n".to_string()).await?;

    // Leftovers from a hypothetical earlier crash.
    std::fs::write(dir.path().join("mirrorlist.orig"), "stale")?;
    std::fs::write(dir.path().join("mirrorlist.pacnew"), "stale")?;

    let first = job(
        first_url,
        dir.path(),
        "upkeep-test-missing-ranker".to_string(),
    );
    let outcome = first.run("arch-mirrors", &CancellationToken::new()).await;
    assert_eq!(outcome.status, TaskStatus::Failed(1));

    // The stale ranked artifact is gone and the source reflects this run.
    assert!(!first.ranked_path.exists());
    assert_eq!(
        std::fs::read_to_string(&first.source_path)?,
        "Server = https://first/\n"
    );

    // A second run behaves identically; the first run's artifacts don't
    // get in its way.
    let second = job(
        second_url,
        dir.path(),
        "upkeep-test-missing-ranker".to_string(),
    );
    let outcome = second.run("arch-mirrors", &CancellationToken::new()).await;
    assert_eq!(outcome.status, TaskStatus::Failed(1));
    assert_eq!(
        std::fs::read_to_string(&second.source_path)?,
        "Server = https://second/\n"
    );

    Ok(())
}
