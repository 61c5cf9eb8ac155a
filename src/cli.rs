use anyhow::{bail, Context, Result};

use crate::config::AppConfig;
use crate::converters::ConverterRegistry;
use crate::model::{Version, VersionSharing, VersionStatus};
use crate::service::VersionService;
use crate::transport::HttpTransport;
use crate::wire::{format_date, parse_date_time, WireEnum};

/// Arguments of `redmine version-add`.
#[derive(Debug, PartialEq)]
pub struct AddArgs {
    pub project: String,
    pub version: Version,
}

pub async fn run(config: &AppConfig, args: &[String]) -> Result<()> {
    let Some(command) = args.first() else {
        print_help();
        return Ok(());
    };
    let rest = &args[1..];

    match command.as_str() {
        "versions" => {
            let project = single_arg(rest, "Usage: redmine versions <project>")?;
            let versions = service(config)?.list(project).await?;
            if versions.is_empty() {
                println!("No versions in {project}");
            }
            for version in &versions {
                println!("{}", format_row(version));
            }
        }
        "version" => {
            let id = parse_id(single_arg(rest, "Usage: redmine version <id>")?)?;
            match service(config)?.get(id).await? {
                Some(version) => {
                    for line in format_detail(&version) {
                        println!("{line}");
                    }
                }
                None => bail!("Version {id} not found"),
            }
        }
        "version-add" => {
            let add = parse_add_args(rest)?;
            let created = service(config)?.create(&add.project, &add.version).await?;
            match created {
                Some(version) => {
                    println!("Created version #{}: {}", version.id, display_name(&version));
                }
                None => println!("Created version in {}", add.project),
            }
        }
        "version-close" => {
            let id = parse_id(single_arg(rest, "Usage: redmine version-close <id>")?)?;
            let service = service(config)?;
            let mut version = service
                .get(id)
                .await?
                .with_context(|| format!("Version {id} not found"))?;
            version.status = VersionStatus::Closed;
            service.update(id, &version).await?;
            println!("Closed version #{id}: {}", display_name(&version));
        }
        "version-rm" => {
            let id = parse_id(single_arg(rest, "Usage: redmine version-rm <id>")?)?;
            service(config)?.delete(id).await?;
            println!("Deleted version #{id}");
        }
        "help" | "-h" | "--help" => print_help(),
        other => bail!("Unknown command '{other}'. Run `redmine help` for usage."),
    }

    Ok(())
}

fn service(config: &AppConfig) -> Result<VersionService> {
    let Some(redmine) = &config.redmine else {
        bail!("No Redmine server configured. Add a [redmine] section to ~/.redmine/config.toml");
    };
    Ok(VersionService::new(
        Box::new(HttpTransport::from_config(redmine)),
        ConverterRegistry::with_defaults(),
    ))
}

fn single_arg<'a>(args: &'a [String], usage: &str) -> Result<&'a str> {
    match args {
        [one] => Ok(one.as_str()),
        _ => bail!("{usage}"),
    }
}

fn parse_id(text: &str) -> Result<i64> {
    text.trim_start_matches('#')
        .parse()
        .with_context(|| format!("'{text}' is not a version id"))
}

/// Parse `version-add` arguments.
///
/// Supported forms:
///   redmine version-add core "Sprint 1"
///   redmine version-add core Sprint 1 --due 2020-01-15
///   redmine version-add core "2.0" -d "Major release" --status locked --sharing tree
pub fn parse_add_args(args: &[String]) -> Result<AddArgs> {
    const USAGE: &str = "Usage: redmine version-add <project> <name> [-d <description>] [--status <open|locked|closed>] [--sharing <none|descendants|hierarchy|tree|system>] [--due <YYYY-MM-DD>]";

    let Some((project, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    let mut name_parts: Vec<&str> = Vec::new();
    let mut description = None;
    let mut status = VersionStatus::default();
    let mut sharing = VersionSharing::default();
    let mut due_date = None;
    let mut i = 0;

    while i < rest.len() {
        let flag = rest[i].as_str();
        match flag {
            "-d" | "--desc" | "--description" | "--status" | "--sharing" | "--due" => {
                i += 1;
                let Some(value) = rest.get(i) else {
                    bail!("Missing value for {flag}");
                };
                match flag {
                    "--status" => {
                        status = VersionStatus::parse(value)
                            .with_context(|| format!("Unknown status '{value}'"))?;
                    }
                    "--sharing" => {
                        sharing = VersionSharing::parse(value)
                            .with_context(|| format!("Unknown sharing '{value}'"))?;
                    }
                    "--due" => {
                        due_date = Some(
                            parse_date_time(value)
                                .with_context(|| format!("Invalid due date '{value}'"))?,
                        );
                    }
                    _ => description = Some(value.clone()),
                }
            }
            _ => name_parts.push(flag),
        }
        i += 1;
    }

    let name = name_parts.join(" ");
    if name.is_empty() {
        bail!("Version name cannot be empty");
    }

    Ok(AddArgs {
        project: project.clone(),
        version: Version {
            description,
            status,
            sharing,
            due_date,
            ..Version::new(name)
        },
    })
}

fn display_name(version: &Version) -> &str {
    version.name.as_deref().unwrap_or("(unnamed)")
}

pub fn format_row(version: &Version) -> String {
    let due = version.due_date.map(format_date).unwrap_or_else(|| "-".into());
    format!(
        "#{:<6} {:<7} {:<11} {:<10} {}",
        version.id,
        version.status,
        version.sharing,
        due,
        display_name(version)
    )
}

pub fn format_detail(version: &Version) -> Vec<String> {
    let mut lines = vec![format!("#{} {}", version.id, display_name(version))];
    if let Some(project) = &version.project {
        lines.push(format!(
            "  project:  {} (#{})",
            project.name.as_deref().unwrap_or("-"),
            project.id
        ));
    }
    lines.push(format!("  status:   {}", version.status));
    lines.push(format!("  sharing:  {}", version.sharing));
    if let Some(due) = version.due_date {
        lines.push(format!("  due:      {}", format_date(due)));
    }
    if let Some(created) = version.created_on {
        lines.push(format!("  created:  {}", created.to_rfc3339()));
    }
    if let Some(updated) = version.updated_on {
        lines.push(format!("  updated:  {}", updated.to_rfc3339()));
    }
    if let Some(description) = version.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("  {description}"));
    }
    for field in &version.custom_fields {
        let values: Vec<&str> = field.values.iter().map(|v| v.info.as_str()).collect();
        lines.push(format!(
            "  {}: {}",
            field.name.as_deref().unwrap_or("custom field"),
            values.join(", ")
        ));
    }
    lines
}

pub fn print_help() {
    println!("redmine — manage Redmine project versions\n");
    println!("USAGE:");
    println!("  redmine versions <project>          List a project's versions");
    println!("  redmine version <id>                Show one version");
    println!("  redmine version-add <project> <name> Create a version");
    println!("  redmine version-close <id>          Mark a version closed");
    println!("  redmine version-rm <id>             Delete a version");
    println!();
    println!("ADD OPTIONS:");
    println!("  -d, --desc <text>     Description");
    println!("  --status <status>     open, locked or closed");
    println!("  --sharing <scope>     none, descendants, hierarchy, tree or system");
    println!("  --due <YYYY-MM-DD>    Due date");
    println!();
    println!("CONFIG:");
    println!("  ~/.redmine/config.toml with a [redmine] section holding url and api_key");
}
