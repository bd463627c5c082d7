use jwlsim::{Cli, Registry};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    // Events go to stderr so they never interleave with a report on stdout;
    // the level is chosen with RUST_LOG.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::import()?;
    cli.evaluate(&Registry::builtin())
}
