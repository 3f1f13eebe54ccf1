//! Command-line arguments

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "minilinker", version, about = "A minimal URL shortener")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Run in development mode (allows the local SQLite fallback)
    #[arg(long)]
    pub dev: bool,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["minilinker"]);
        assert_eq!(cli.config, "config.toml");
        assert!(!cli.dev);
        assert!(!cli.generate_config);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["minilinker", "-c", "custom.toml", "--dev"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(cli.dev);

        let cli = Cli::parse_from(["minilinker", "--config=other.toml", "--generate-config"]);
        assert_eq!(cli.config, "other.toml");
        assert!(cli.generate_config);
    }
}
