use super::spec::SpecArgs;
use clap::Args;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub container: SpecArgs,
}

pub async fn execute(args: CreateArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let spec = args.container.to_spec(global)?;
    let container = spec.create().await?;
    println!("{}", container.identifier());
    container.close().await?;
    Ok(())
}
