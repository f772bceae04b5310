//! Extension exporter CLI entrypoint.
//!
//! Parses the command line, runs one export, prints the produced package
//! name to stdout, and reports progress and failures on stderr.

use clap::Parser;
use extension_exporter::cli::Cli;
use extension_exporter::error::Result;
use extension_exporter::exporter::Exporter;
use extension_exporter::extension::PackageName;
use extension_exporter::store::DiskStore;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let exit_code = match run(&cli, &mut stderr) {
        Ok(package) => {
            let mut stdout = std::io::stdout();
            write_line(&mut stdout, &package);
            0
        }
        Err(err) => {
            write_line(&mut stderr, err);
            1
        }
    };
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<PackageName> {
    let request = cli.request()?;
    let config = cli.config();

    if !cli.quiet {
        write_line(
            stderr,
            format!(
                "Exporting {} {} to {}...",
                request.extension_type(),
                request.name(),
                config.export_dir
            ),
        );
    }

    let store = DiskStore;
    let package = Exporter::new(&store, &config).export(&request)?;

    if !cli.quiet {
        write_line(
            stderr,
            format!(
                "Created {}/{}",
                config.export_dir,
                package.archive_filename()
            ),
        );
    }

    Ok(package)
}

fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
