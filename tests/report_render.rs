#![cfg(unix)]

mod common;

use std::error::Error;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use upkeep::batch::{render, Orchestrator, TaskDescriptor, TaskOutcome, TaskStatus};
use upkeep::mirror::MirrorJob;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn end_to_end_batch_renders_in_submission_order() -> TestResult {
    let dir = tempfile::tempdir()?;

    let ranked_output = "Server = https://1/\n\
                         Server = https://2/\n\
                         Server = https://3/\n\
                         Server = https://4/\n\
                         Server = https://5/\n";
    let tool = common::fake_rank_tool(dir.path(), ranked_output)?;
    let url = common::serve_once("#Server = https://seed/\n".to_string()).await?;

    let job = MirrorJob {
        url,
        fetch_timeout: Duration::from_secs(20),
        probe_timeout: Duration::from_secs(2),
        result_count: 5,
        rank_tool: tool.display().to_string(),
        source_path: dir.path().join("mirrorlist.orig"),
        ranked_path: dir.path().join("mirrorlist.pacnew"),
    };

    let descriptors = vec![
        TaskDescriptor::rank_mirrors("arch-mirrors", job),
        TaskDescriptor::command(
            "helper",
            vec!["sh".to_string(), "-c".to_string(), "exit 2".to_string()],
        ),
    ];

    let orchestrator = Orchestrator::new(4, CancellationToken::new());
    let report = orchestrator.run_batch(descriptors).await;

    assert_eq!(report.outcomes[0].status, TaskStatus::Success);
    assert_eq!(report.outcomes[1].status, TaskStatus::Failed(2));

    let rendered = render(&report.outcomes);

    // Both tasks present, in submission order.
    let first = rendered.find("Task: arch-mirrors").expect("first banner");
    let second = rendered.find("Task: helper").expect("second banner");
    assert!(first < second);

    assert!(rendered.contains("Completed. Ranked 5 mirrors."));
    assert!(rendered.contains("helper failed with exit code 2"));

    Ok(())
}

#[test]
fn render_shows_stderr_and_cancellation_markers() -> TestResult {
    let outcomes = vec![
        TaskOutcome {
            name: "noisy".to_string(),
            status: TaskStatus::Success,
            stdout: "ranked list\n".to_string(),
            stderr: "a warning\n".to_string(),
            narrative: vec!["[noisy] Completed successfully".to_string()],
        },
        TaskOutcome::cancelled("dropped"),
    ];

    let rendered = render(&outcomes);

    assert!(rendered.contains("Output:"));
    assert!(rendered.contains("ranked list"));
    assert!(rendered.contains("Errors/Warnings:"));
    assert!(rendered.contains("a warning"));
    assert!(rendered.contains("dropped was cancelled"));

    Ok(())
}

#[test]
fn render_hides_primary_output_for_failed_tasks() -> TestResult {
    let outcomes = vec![TaskOutcome {
        name: "broken".to_string(),
        status: TaskStatus::Failed(7),
        stdout: "partial output that should not be shown\n".to_string(),
        stderr: String::new(),
        narrative: vec!["[broken] Failed with exit code 7".to_string()],
    }];

    let rendered = render(&outcomes);

    assert!(!rendered.contains("partial output"));
    assert!(rendered.contains("broken failed with exit code 7"));

    Ok(())
}
