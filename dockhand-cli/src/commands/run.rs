use super::spec::SpecArgs;
use clap::Args;
use dockhand::{ContainerHandle, DEFAULT_STREAM_TIMEOUT, OutputChunk, OutputStream};
use std::time::Duration;

#[derive(Args, Debug)]
pub struct RunCommandArgs {
    /// Stay attached and stream the container output until it exits
    #[arg(long)]
    pub attach: bool,

    /// Seconds to wait for an attached container before killing the stream
    #[arg(long, default_value_t = DEFAULT_STREAM_TIMEOUT.as_secs())]
    pub timeout: u64,

    #[command(flatten)]
    pub container: SpecArgs,
}

fn print_chunk(chunk: OutputChunk) {
    match chunk.stream {
        OutputStream::Stdout => println!("{}", chunk.line),
        OutputStream::Stderr => eprintln!("{}", chunk.line),
    }
}

/// Stop an interrupted container exactly once, then release the handle.
async fn stop_interrupted(container: ContainerHandle) -> anyhow::Result<()> {
    tracing::info!(container_id = %container.short_identifier(), "Interrupted, stopping container");
    // close() already stops when the spec asked for it
    if !container.spec().stop_on_release() {
        container.stop().await?;
    }
    container.close().await?;
    Ok(())
}

pub async fn execute(args: RunCommandArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let spec = args.container.to_spec(global)?;

    if !args.attach {
        let container = spec.start().await?;
        println!("{}", container.identifier());
        container.close().await?;
        return Ok(());
    }

    let container = spec.create().await?;
    println!("{}", container.identifier());

    let timeout = Duration::from_secs(args.timeout);
    let streamed = tokio::select! {
        result = container.start_and_stream_output(print_chunk, timeout) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    let Some(result) = streamed else {
        stop_interrupted(container).await?;
        anyhow::bail!("interrupted");
    };

    container.close().await?;
    let output = result?;
    if !output.success() {
        anyhow::bail!("container exited with code {}", output.exit_code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockhand::{ContainerSpec, EngineOptions};
    use dockhand_test_utils::{CONTAINER_ID, FakeExecutor};
    use std::sync::Arc;

    async fn started(fake: &Arc<FakeExecutor>, stop_on_release: bool) -> ContainerHandle {
        let spec = ContainerSpec::builder("alpine")
            .engine(EngineOptions::new("docker"))
            .stop_on_release(stop_on_release)
            .executor(fake.clone())
            .build()
            .unwrap();
        fake.push_success(format!("{}\n", CONTAINER_ID));
        spec.start().await.unwrap()
    }

    fn stop_calls(fake: &FakeExecutor) -> usize {
        fake.rendered_calls()
            .iter()
            .filter(|call| call.starts_with("docker stop "))
            .count()
    }

    #[tokio::test]
    async fn test_interrupt_stops_once_with_stop_on_release() {
        let fake = Arc::new(FakeExecutor::new());
        let container = started(&fake, true).await;

        stop_interrupted(container).await.unwrap();

        assert_eq!(stop_calls(&fake), 1);
    }

    #[tokio::test]
    async fn test_interrupt_stops_once_without_stop_on_release() {
        let fake = Arc::new(FakeExecutor::new());
        let container = started(&fake, false).await;

        stop_interrupted(container).await.unwrap();

        assert_eq!(stop_calls(&fake), 1);
        assert_eq!(
            fake.rendered_calls().last().map(String::as_str),
            Some(format!("docker stop {}", &CONTAINER_ID[..12]).as_str())
        );
    }
}
