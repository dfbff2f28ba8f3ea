#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single HTTP response with the given body on an ephemeral local
/// port, returning the URL to fetch it from.
pub async fn serve_once(body: String) -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Ok((mut sock, _)) = listener.accept().await {
            let mut buf = [0u8; 2048];
            let _ = sock.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = sock.write_all(response.as_bytes()).await;
        }
    });

    Ok(format!("http://{addr}/"))
}

/// Install a fake ranking utility under `dir`.
///
/// The script records its argv to `args.txt` next to itself and prints
/// `output` on stdout, exiting zero.
#[cfg(unix)]
pub fn fake_rank_tool(dir: &Path, output: &str) -> io::Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let tool = dir.join("fake-rankmirrors");
    let args_file = dir.join("args.txt");

    let script = format!(
        "#!/bin/sh\necho \"$@\" > '{}'\ncat <<'EOF'\n{}EOF\n",
        args_file.display(),
        output
    );

    std::fs::write(&tool, script)?;
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))?;

    Ok(tool)
}

/// Argv the fake tool was invoked with, single-line.
#[cfg(unix)]
pub fn recorded_args(dir: &Path) -> io::Result<String> {
    std::fs::read_to_string(dir.join("args.txt"))
}
