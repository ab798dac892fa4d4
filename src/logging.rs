use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Rocket's own `log` output is forwarded into it.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(%err, "subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn second_init_is_harmless() {
        super::init();
        super::init();
        tracing::info!("still logging");
    }
}
