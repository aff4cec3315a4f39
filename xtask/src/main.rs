//! Build tasks for jargon-grader: man pages and shell completions.
//!
//! Run with `cargo xtask <task>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for jargon-grader")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
        /// Only generate for these shells (default: all)
        #[arg(long, value_enum)]
        shell: Vec<ShellArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    Elvish,
    Powershell,
}

impl From<ShellArg> for Shell {
    fn from(shell: ShellArg) -> Self {
        match shell {
            ShellArg::Bash => Self::Bash,
            ShellArg::Zsh => Self::Zsh,
            ShellArg::Fish => Self::Fish,
            ShellArg::Elvish => Self::Elvish,
            ShellArg::Powershell => Self::PowerShell,
        }
    }
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => man_pages(&out),
        Task::Completions { out, shell } => {
            let shells: Vec<Shell> = if shell.is_empty() {
                vec![
                    Shell::Bash,
                    Shell::Zsh,
                    Shell::Fish,
                    Shell::Elvish,
                    Shell::PowerShell,
                ]
            } else {
                shell.into_iter().map(Shell::from).collect()
            };
            completions(&out, &shells)
        }
    }
}

/// One page for the root command plus one per subcommand.
fn man_pages(out: &Path) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let cmd = jargon_grader::command();

    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buf)?;
    fs::write(out.join("jargon-grader.1"), buf)?;

    for sub in cmd.get_subcommands() {
        let name = format!("jargon-grader-{}", sub.get_name());
        let mut buf = Vec::new();
        clap_mangen::Man::new(sub.clone()).render(&mut buf)?;
        fs::write(out.join(format!("{name}.1")), buf)?;
    }

    println!("man pages written to {}", out.display());
    Ok(())
}

fn completions(out: &Path, shells: &[Shell]) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let mut cmd = jargon_grader::command();
    for &shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, "jargon-grader", out)?;
        println!("{shell} completions written to {}", path.display());
    }
    Ok(())
}
