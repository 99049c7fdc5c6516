use super::spec::SpecArgs;
use clap::{Args, ValueEnum};
use dockhand::StartVerb;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum VerbArg {
    Create,
    #[default]
    Start,
}

impl From<VerbArg> for StartVerb {
    fn from(verb: VerbArg) -> Self {
        match verb {
            VerbArg::Create => StartVerb::Create,
            VerbArg::Start => StartVerb::Start,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Verb to render the command with
    #[arg(long, value_enum, default_value_t = VerbArg::Start)]
    pub verb: VerbArg,

    #[command(flatten)]
    pub container: SpecArgs,
}

/// Print the command line without running anything.
pub async fn execute(args: RenderArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let spec = args.container.to_spec(global)?;
    println!("{}", spec.render_start_command(args.verb.into()));
    Ok(())
}
