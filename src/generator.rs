//! Expansion of the database-creation template over the organism list
//!
//! Generation is split in two: [`plan`] is pure and builds every output in
//! memory, [`write_plan`] puts it on disk. Per-organism scripts are written in
//! list order before any aggregate file, so a failure partway through leaves
//! the earlier scripts and no aggregates.

use crate::aggregate::{Aggregates, ClientInvocation};
use crate::config::Config;
use crate::expander::{expand, script_file_name};
use crate::organisms::{ORGANISMS, increment_for, suspicious_identifiers};
use crate::{FillError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Where generated files go and how the client script invokes the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub output_dir: PathBuf,
    pub client_script: PathBuf,
    pub create_script: PathBuf,
    pub drop_script: PathBuf,
    pub client: ClientInvocation,
}

/// One expanded template, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganismScript {
    pub organism: String,
    /// 1-based position in the organism list
    pub position: usize,
    pub increment: u64,
    pub path: PathBuf,
    pub contents: String,
}

/// Every output of a run, held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub scripts: Vec<OrganismScript>,
    pub aggregates: Aggregates,
    pub options: Options,
}

/// Files written by a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub scripts: Vec<PathBuf>,
    pub aggregates: Vec<PathBuf>,
}

/// Expand `template` for each organism in order.
pub fn plan<S: AsRef<str>>(template: &str, organisms: &[S], options: &Options) -> Plan {
    let mut scripts = Vec::with_capacity(organisms.len());
    let mut aggregates = Aggregates::new();

    for (idx, organism) in organisms.iter().enumerate() {
        let organism = organism.as_ref();
        let position = idx + 1;
        let increment = increment_for(position);
        let path = options.output_dir.join(script_file_name(organism));

        aggregates.push(
            &options.client,
            organism,
            &relative_to_script_dir(&path, &options.client_script),
        );
        scripts.push(OrganismScript {
            organism: organism.to_string(),
            position,
            increment,
            contents: expand(template, organism, increment),
            path,
        });
    }

    Plan {
        scripts,
        aggregates,
        options: options.clone(),
    }
}

/// `script` as seen from the directory holding the client script.
///
/// The bootstrap script is run from its own directory, so scripts inside that
/// directory are referenced by their relative path; anything else is kept as is.
fn relative_to_script_dir(script: &Path, client_script: &Path) -> PathBuf {
    client_script
        .parent()
        .and_then(|dir| script.strip_prefix(dir).ok())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| script.to_path_buf())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| FillError::io(path, e))
}

/// Write a plan to disk, overwriting existing files.
#[instrument(skip(plan), fields(scripts = plan.scripts.len()))]
pub fn write_plan(plan: &Plan) -> Result<Report> {
    let output_dir = &plan.options.output_dir;
    fs::create_dir_all(output_dir).map_err(|e| FillError::io(output_dir, e))?;

    let mut report = Report::default();

    for script in &plan.scripts {
        debug!(
            organism = %script.organism,
            increment = script.increment,
            path = %script.path.display(),
            "Writing organism script"
        );
        write_file(&script.path, &script.contents)?;
        report.scripts.push(script.path.clone());
    }

    let aggregates = [
        (&plan.options.client_script, &plan.aggregates.client_script),
        (&plan.options.create_script, &plan.aggregates.create_script),
        (&plan.options.drop_script, &plan.aggregates.drop_script),
    ];
    for (path, contents) in aggregates {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| FillError::io(parent, e))?;
        }
        write_file(path, contents)?;
        report.aggregates.push(path.clone());
    }

    Ok(report)
}

/// Read the template, expand it for `organisms` and write everything.
pub fn generate<S: AsRef<str>>(
    template_path: &Path,
    organisms: &[S],
    options: &Options,
) -> Result<Report> {
    let template =
        fs::read_to_string(template_path).map_err(|e| FillError::io(template_path, e))?;

    for name in suspicious_identifiers(organisms) {
        warn!(organism = name, "Organism name is not a plain identifier, emitting as-is");
    }

    let plan = plan(&template, organisms, options);
    let report = write_plan(&plan)?;

    info!(
        template = %template_path.display(),
        output_dir = %options.output_dir.display(),
        scripts = report.scripts.len(),
        "Generated organism database scripts"
    );

    Ok(report)
}

/// Full run with the built-in organism list.
pub fn run(config: &Config) -> Result<Report> {
    generate(&config.paths.template, &ORGANISMS, &config.options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TestWorkspace;

    fn options_in(dir: &Path) -> Options {
        Options {
            output_dir: dir.join("out"),
            client_script: dir.join("out/create_all_tables.sh"),
            create_script: dir.join("out/create_databases.sql"),
            drop_script: dir.join("out/drop_databases.sql"),
            client: ClientInvocation::default(),
        }
    }

    #[test]
    fn test_plan_example() {
        let options = options_in(Path::new("/work"));
        let plan = plan("CREATE DATABASE %; -- id ?", &["A_b", "C_d"], &options);

        assert_eq!(plan.scripts.len(), 2);
        assert_eq!(plan.scripts[0].contents, "CREATE DATABASE A_b; -- id 5000000");
        assert_eq!(plan.scripts[1].contents, "CREATE DATABASE C_d; -- id 10000000");
        assert_eq!(plan.scripts[0].path, PathBuf::from("/work/out/A_b.sql"));
        assert_eq!(plan.scripts[1].position, 2);
        assert_eq!(
            plan.aggregates.create_script,
            "CREATE DATABASE A_b;\nCREATE DATABASE C_d;\n"
        );
    }

    #[test]
    fn test_client_lines_are_relative_to_client_script() {
        let options = Config::default().options();
        let plan = plan("USE %;", &["A_b", "C_d"], &options);

        assert_eq!(
            plan.aggregates.client_script,
            "mysql -u root -ppassword < A_b.sql\nmysql -u root -ppassword < C_d.sql\n"
        );
    }

    #[test]
    fn test_client_lines_keep_paths_outside_script_dir() {
        let mut options = options_in(Path::new("/work"));
        options.client_script = PathBuf::from("/bootstrap/create_all_tables.sh");
        let plan = plan("USE %;", &["A_b"], &options);

        assert_eq!(
            plan.aggregates.client_script,
            "mysql -u root -ppassword < /work/out/A_b.sql\n"
        );
    }

    #[test]
    fn test_plan_empty_list() {
        let options = options_in(Path::new("/work"));
        let empty: [&str; 0] = [];
        let plan = plan("USE %;", &empty, &options);

        assert!(plan.scripts.is_empty());
        assert_eq!(plan.aggregates, Aggregates::new());
    }

    #[test]
    fn test_plan_builtin_list_increments() {
        let options = options_in(Path::new("/work"));
        let plan = plan("?", &ORGANISMS, &options);

        for (idx, script) in plan.scripts.iter().enumerate() {
            assert_eq!(script.organism, ORGANISMS[idx]);
            assert_eq!(script.contents, ((idx as u64 + 1) * 5_000_000).to_string());
        }
        assert_eq!(plan.aggregates.drop_script.lines().count(), ORGANISMS.len());
    }

    #[test]
    fn test_generate_writes_scripts_then_aggregates() -> Result<()> {
        let workspace = TestWorkspace::with_template("USE %;\nSET @start = ?;\n")?;
        let options = options_in(workspace.root());

        let report = generate(&workspace.template_path(), &["A_b", "C_d"], &options)?;

        assert_eq!(report.scripts.len(), 2);
        assert_eq!(report.aggregates.len(), 3);
        assert_eq!(
            workspace.read("out/C_d.sql")?,
            "USE C_d;\nSET @start = 10000000;\n"
        );
        assert_eq!(
            workspace.read("out/drop_databases.sql")?,
            "DROP DATABASE IF EXISTS A_b;\nDROP DATABASE IF EXISTS C_d;\n"
        );
        Ok(())
    }

    #[test]
    fn test_missing_template_writes_nothing() -> Result<()> {
        let workspace = TestWorkspace::new()?;
        let options = options_in(workspace.root());
        let template = workspace.root().join("absent.sql");

        let err = generate(&template, &["A_b"], &options).unwrap_err();

        match err {
            FillError::Io { path, .. } => assert_eq!(path, template),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!options.output_dir.exists());
        Ok(())
    }

    #[test]
    fn test_failed_script_write_leaves_no_aggregates() -> Result<()> {
        let workspace = TestWorkspace::with_template("USE %;")?;
        let options = options_in(workspace.root());
        // A directory where the second script should go makes its write fail
        workspace.create_dir("out/C_d.sql")?;

        let plan = plan("USE %;", &["A_b", "C_d", "E_f"], &options);
        let err = write_plan(&plan).unwrap_err();

        assert!(matches!(err, FillError::Io { .. }));
        assert_eq!(workspace.read("out/A_b.sql")?, "USE A_b;");
        assert!(!workspace.root().join("out/E_f.sql").exists());
        assert!(!options.create_script.exists());
        assert!(!options.client_script.exists());
        assert!(!options.drop_script.exists());
        Ok(())
    }
}
