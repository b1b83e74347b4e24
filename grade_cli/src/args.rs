//! CLI argument definitions

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Gradebook - grades, SGPA/CGPA and required GPA from course marks
#[derive(Debug, Parser)]
#[command(name = "grade_cli", version, about)]
pub struct Cli {
    /// Record file (defaults to <data dir>/gradebook/record.json)
    #[arg(long, short, env = "GRADE_RECORD_FILE", global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up the grade for a percentage or for obtained/total marks
    Grade {
        #[arg(required_unless_present = "obtained", conflicts_with = "obtained")]
        percentage: Option<u32>,

        #[arg(long, requires = "total")]
        obtained: Option<f64>,

        #[arg(long, requires = "obtained")]
        total: Option<f64>,
    },

    /// Print the percentage threshold table
    Scale,

    /// Add an empty semester to the record
    AddSemester { name: String },

    /// Remove a semester (by name or id) and all its courses
    RemoveSemester { name: String },

    /// Add a course to a semester
    AddCourse {
        /// Semester name or id
        #[arg(long)]
        semester: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        credits: u32,

        #[arg(long, requires = "total")]
        obtained: Option<f64>,

        #[arg(long, requires = "obtained")]
        total: Option<f64>,
    },

    /// Remove a course (by name or id) from a semester
    RemoveCourse {
        #[arg(long)]
        semester: String,

        #[arg(long)]
        name: String,
    },

    /// Print SGPA per semester, CGPA and standing
    Report {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// GPA needed over the remaining credit hours to reach a target CGPA
    Required {
        #[arg(long)]
        target: f64,

        #[arg(long)]
        remaining: f64,

        /// Current CGPA (defaults to the record's CGPA)
        #[arg(long)]
        current: Option<f64>,

        /// Completed credit hours (defaults to the record's counted hours)
        #[arg(long)]
        completed: Option<f64>,
    },

    /// Honor tier and display letter for a CGPA
    Classify { cgpa: f64 },

    /// Export the record (with derived fields) as JSON
    Export {
        /// Output file; stdout when omitted
        out: Option<PathBuf>,
    },

    /// Replace the record with an exported JSON document
    Import { source: PathBuf },

    /// Delete the stored record
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_by_percentage() {
        let cli = Cli::try_parse_from(["grade_cli", "grade", "79"]).unwrap();
        match cli.command {
            Command::Grade { percentage, obtained, .. } => {
                assert_eq!(percentage, Some(79));
                assert_eq!(obtained, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_grade_needs_both_marks() {
        assert!(Cli::try_parse_from(["grade_cli", "grade", "--obtained", "40"]).is_err());
        assert!(Cli::try_parse_from(["grade_cli", "grade", "--obtained", "40", "--total", "50"]).is_ok());
        assert!(Cli::try_parse_from(["grade_cli", "grade"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["grade_cli", "report", "-vv", "--file", "x.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn test_add_course() {
        let cli = Cli::try_parse_from([
            "grade_cli", "add-course", "--semester", "Fall", "--name", "Math", "--credits", "3",
        ])
        .unwrap();
        match cli.command {
            Command::AddCourse { credits, obtained, .. } => {
                assert_eq!(credits, 3);
                assert_eq!(obtained, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
