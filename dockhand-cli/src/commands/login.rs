use clap::Args;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Registry server; the engine's default registry when omitted
    pub server: Option<String>,

    /// Username
    #[arg(short, long)]
    pub username: String,

    /// Password
    #[arg(short, long)]
    pub password: String,
}

pub async fn execute(args: LoginArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let registry = global.registry_client();
    registry
        .login(args.server.as_deref(), &args.username, &args.password)
        .await?;
    println!("Login Succeeded");
    Ok(())
}
