use clap::Args;
use dockhand::{ContainerSpec, EngineOptions};

#[derive(Args, Debug)]
pub struct PullArgs {
    /// Image to pull (e.g. `nginx:1.27`)
    pub image: String,
}

pub async fn execute(args: PullArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let spec = ContainerSpec::builder(&args.image)
        .engine(global.engine_options(EngineOptions::default()))
        .build()?;

    spec.pull_image().await?;
    println!("{}", args.image);
    Ok(())
}
