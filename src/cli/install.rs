use std::path::PathBuf;

use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install every package under the current directory:\n    rnpm install\n\n\
                   Skip development-only dependencies:\n    rnpm install --production\n\n\
                   Install a different tree with four installers in flight:\n    \
                   rnpm install -C ./services --concurrency 4")]
pub struct InstallArgs {
    /// Omit development-only dependencies (forwards --production to the installer)
    #[arg(long)]
    pub production: bool,

    /// Root of the tree to scan (defaults to the current directory)
    #[arg(
        long = "root",
        short = 'C',
        value_name = "DIR",
        default_value = ".",
        env = "RNPM_ROOT"
    )]
    pub root: PathBuf,

    /// Per-target installer timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 600)]
    pub timeout: u64,

    /// Number of targets to install in parallel
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub concurrency: usize,

    /// Print the run report as JSON instead of the human summary
    #[arg(long)]
    pub json: bool,

    /// Installer program to invoke in each target
    #[arg(
        long,
        value_name = "PROGRAM",
        default_value = "npm",
        env = "RNPM_INSTALLER"
    )]
    pub installer: String,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::super::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(argv: &[&str]) -> super::InstallArgs {
        let cli = Cli::try_parse_from(argv).unwrap_or_else(|e| {
            panic!("Failed to parse CLI arguments: {}", e);
        });
        match cli.command {
            Commands::Install(args) => args,
        }
    }

    #[test]
    fn test_cli_parsing_install_defaults() {
        let args = parse(&["rnpm", "install"]);
        assert!(!args.production);
        assert_eq!(args.root, PathBuf::from("."));
        assert_eq!(args.timeout, 600);
        assert_eq!(args.concurrency, 1);
        assert!(!args.json);
        assert_eq!(args.installer, "npm");
    }

    #[test]
    fn test_cli_parsing_install_production() {
        let args = parse(&["rnpm", "install", "--production"]);
        assert!(args.production);
    }

    #[test]
    fn test_cli_parsing_install_with_options() {
        let args = parse(&[
            "rnpm",
            "install",
            "--production",
            "-C",
            "/tmp/tree",
            "--timeout",
            "30",
            "--concurrency",
            "4",
            "--json",
            "--installer",
            "pnpm",
        ]);
        assert!(args.production);
        assert_eq!(args.root, PathBuf::from("/tmp/tree"));
        assert_eq!(args.timeout, 30);
        assert_eq!(args.concurrency, 4);
        assert!(args.json);
        assert_eq!(args.installer, "pnpm");
    }
}
