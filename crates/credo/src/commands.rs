//! Subcommands: load statement files, run one operation, build a report

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use credo_core::{
    parse_statements, parse_weighted, ExportView, KnowledgeBase, MatrixEngine, Node, Path as Walk,
    RevisionSummary, Statement,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CliConfig, OutputFormat};
use crate::error::{Error, Result};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the vertices and statements of a file
    Show { file: PathBuf },

    /// Expand with each statement in order
    Expand {
        file: PathBuf,
        #[arg(required = true)]
        statements: Vec<String>,
    },

    /// Revise with each statement in order
    Revise {
        file: PathBuf,
        /// Only accept statements whose reporter outranks the contradiction
        #[arg(long)]
        non_prioritized: bool,
        #[arg(required = true)]
        statements: Vec<String>,
    },

    /// Remove all support for SOURCE < TARGET
    Contract {
        file: PathBuf,
        source: String,
        target: String,
    },

    /// Print the reporters backing SOURCE < TARGET
    Reliability {
        file: PathBuf,
        source: String,
        target: String,
    },

    /// Merge OTHER into FILE and break the resulting cycles
    Merge { file: PathBuf, other: PathBuf },

    /// Print every elementary statement cycle
    Cycles { file: PathBuf },

    /// Revise a matrix engine with weighted statements and print the ranking
    Rank { file: PathBuf },
}

/// Whether one input statement was accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub statement: Statement,
    pub accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub node: Node,
    pub wins: usize,
}

/// Result of one subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    View {
        view: ExportView,
    },
    Applied {
        outcomes: Vec<Outcome>,
        view: ExportView,
    },
    Contracted {
        removed: usize,
        view: ExportView,
    },
    Reliability {
        reporters: Vec<Node>,
    },
    Merged {
        removed: usize,
        view: ExportView,
    },
    Cycles {
        cycles: Vec<Walk>,
    },
    Ranking {
        summary: RevisionSummary,
        ranking: Vec<RankEntry>,
    },
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)? + "\n"),
        }
    }
}

/// Run `command`, reading statement files from disk.
pub fn run(config: &CliConfig, command: &Command) -> Result<Report> {
    run_with(config, command, |path| {
        fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// Run `command`, reading statement files through `read`.
pub fn run_with<F>(config: &CliConfig, command: &Command, read: F) -> Result<Report>
where
    F: Fn(&Path) -> Result<String>,
{
    let load = |path: &Path| -> Result<KnowledgeBase> {
        let kb = KnowledgeBase::from_text(&read(path)?)?;
        info!(
            path = %path.display(),
            vertices = kb.vertex_count(),
            statements = kb.statement_count(),
            "loaded knowledge base"
        );
        Ok(kb)
    };

    match command {
        Command::Show { file } => Ok(Report::View {
            view: load(file)?.export(),
        }),
        Command::Expand { file, statements } => {
            let mut kb = load(file)?;
            let outcomes = apply(statements, |s| Ok(kb.expansion(s)))?;
            Ok(Report::Applied {
                outcomes,
                view: kb.export(),
            })
        }
        Command::Revise {
            file,
            non_prioritized,
            statements,
        } => {
            let mut kb = load(file)?;
            let outcomes = apply(statements, |s| {
                let accepted = if *non_prioritized {
                    kb.non_prioritized_revision(s)?
                } else {
                    kb.prioritized_revision(s)?
                };
                Ok(accepted)
            })?;
            Ok(Report::Applied {
                outcomes,
                view: kb.export(),
            })
        }
        Command::Contract {
            file,
            source,
            target,
        } => {
            let mut kb = load(file)?;
            let removed = kb.contraction(&Node::new(source)?, &Node::new(target)?)?;
            Ok(Report::Contracted {
                removed,
                view: kb.export(),
            })
        }
        Command::Reliability {
            file,
            source,
            target,
        } => {
            let kb = load(file)?;
            let reporters = kb.reliability(&Node::new(source)?, &Node::new(target)?);
            Ok(Report::Reliability {
                reporters: reporters.into_iter().collect(),
            })
        }
        Command::Merge { file, other } => {
            let mut kb = load(file)?;
            let removed = kb.merge(&load(other)?)?;
            Ok(Report::Merged {
                removed,
                view: kb.export(),
            })
        }
        Command::Cycles { file } => Ok(Report::Cycles {
            cycles: load(file)?.find_cycles()?,
        }),
        Command::Rank { file } => {
            let statements = parse_weighted(&read(file)?)?;
            let mut engine = MatrixEngine::with_config(config.matrix);
            let summary = engine.revise_all(statements)?;
            let ranking = engine
                .ranking()
                .into_iter()
                .map(|(node, wins)| RankEntry { node, wins })
                .collect();
            Ok(Report::Ranking { summary, ranking })
        }
    }
}

/// Parse every argument and apply `op` to each statement in order.
fn apply<F>(arguments: &[String], mut op: F) -> Result<Vec<Outcome>>
where
    F: FnMut(Statement) -> Result<bool>,
{
    let mut outcomes = Vec::new();
    for argument in arguments {
        for statement in parse_statements(argument)? {
            let accepted = op(statement.clone())?;
            debug!(%statement, accepted, "applied");
            outcomes.push(Outcome {
                statement,
                accepted,
            });
        }
    }
    Ok(outcomes)
}

fn write_view(f: &mut fmt::Formatter<'_>, view: &ExportView) -> fmt::Result {
    let vertices: Vec<&str> = view.vertices.iter().map(Node::as_str).collect();
    writeln!(f, "vertices: {}", vertices.join(", "))?;
    writeln!(f, "statements: {}", view.statements.len())?;
    for statement in &view.statements {
        writeln!(f, "  {statement}")?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::View { view } => write_view(f, view),
            Report::Applied { outcomes, view } => {
                for outcome in outcomes {
                    let verdict = if outcome.accepted { "accepted" } else { "rejected" };
                    writeln!(f, "{verdict} {}", outcome.statement)?;
                }
                write_view(f, view)
            }
            Report::Contracted { removed, view } | Report::Merged { removed, view } => {
                writeln!(f, "removed {removed} statement(s)")?;
                write_view(f, view)
            }
            Report::Reliability { reporters } if reporters.is_empty() => {
                writeln!(f, "no supporting path")
            }
            Report::Reliability { reporters } => {
                for reporter in reporters {
                    writeln!(f, "{reporter}")?;
                }
                Ok(())
            }
            Report::Cycles { cycles } => {
                writeln!(f, "cycles: {}", cycles.len())?;
                for cycle in cycles {
                    let hops: Vec<String> = cycle.iter().map(Statement::to_string).collect();
                    writeln!(f, "  {}", hops.join(" "))?;
                }
                Ok(())
            }
            Report::Ranking { summary, ranking } => {
                writeln!(
                    f,
                    "expanded {}, revised {}, skipped {}",
                    summary.expanded, summary.revised, summary.skipped
                )?;
                for entry in ranking {
                    writeln!(f, "  {} {}", entry.wins, entry.node)?;
                }
                Ok(())
            }
        }
    }
}
