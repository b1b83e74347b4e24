//! # Gradebook CLI Application
//!
//! Terminal front end for `grade_core`: grade lookups, a stored record of
//! semesters and courses, SGPA/CGPA reports and required-GPA projections.
//!
//! The record lives in a JSON file (`--file`, `GRADE_RECORD_FILE`, or the
//! platform data directory).

mod args;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::metadata::LevelFilter;

use grade_core::calculations::{
    classify, completed_credit_hours, cgpa, letter_from_gpa, required_gpa, summarize, with_derived,
};
use grade_core::file_io::{export_to_json, load_or_default, parse_stored_data, save_record};
use grade_core::record::{Course, Semester, StoredData};
use grade_core::scale::{grade_from_percentage, percentage_of, GradeScale};
use grade_core::{FileStore, GradeError, GradeResult, RecordStore};

use args::{Cli, Command};

fn default_record_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("gradebook").join("record.json"))
        .unwrap_or_else(|| PathBuf::from("gradebook.json"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = FileStore::new(cli.file.clone().unwrap_or_else(default_record_path));
    tracing::info!(path = %store.path().display(), "Using record file");

    match run(cli.command, &store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

/// Load for editing. Unlike `load_or_default`, a corrupt file is an error so
/// it is never overwritten by an empty record.
fn load_for_edit(store: &FileStore) -> GradeResult<StoredData> {
    Ok(store.load()?.unwrap_or_default())
}

fn run(command: Command, store: &FileStore) -> GradeResult<()> {
    match command {
        Command::Grade {
            percentage,
            obtained,
            total,
        } => {
            let pct = match (percentage, obtained, total) {
                (Some(p), _, _) => p,
                (None, Some(o), Some(t)) => percentage_of(o, t),
                _ => return Err(GradeError::invalid_input("percentage", "", "Give a percentage or --obtained/--total")),
            };
            let grade = grade_from_percentage(pct);
            println!("{}% → {} ({:.2})", pct, grade.letter, grade.grade_point);
        }

        Command::Scale => {
            println!("{:>6}  {:>5}  Grade", "Min %", "Point");
            for entry in GradeScale::standard().entries() {
                println!("{:>6}  {:>5.2}  {}", entry.min_percentage, entry.grade_point, entry.letter_grade);
            }
        }

        Command::AddSemester { name } => {
            let mut data = load_for_edit(store)?;
            data.add_semester(Semester::new(name.clone()));
            store.save(&data)?;
            println!("Added semester '{}'", name);
        }

        Command::RemoveSemester { name } => {
            let mut data = load_for_edit(store)?;
            let removed = data.remove_semester(&name)?;
            store.save(&data)?;
            println!("Removed semester '{}' ({} courses)", removed.name, removed.courses.len());
        }

        Command::AddCourse {
            semester,
            name,
            credits,
            obtained,
            total,
        } => {
            let mut data = load_for_edit(store)?;
            let mut course = Course::new(name.clone(), credits);
            if let (Some(o), Some(t)) = (obtained, total) {
                course = course.with_marks(o, t);
            }
            data.add_course(&semester, course)?;
            store.save(&data)?;
            println!("Added '{}' to '{}'", name, semester);
        }

        Command::RemoveCourse { semester, name } => {
            let mut data = load_for_edit(store)?;
            let removed = data.remove_course(&semester, &name)?;
            store.save(&data)?;
            println!("Removed '{}' from '{}'", removed.name, semester);
        }

        Command::Report { json } => {
            let data = load_or_default(store);
            if json {
                println!("{}", serde_json::to_string_pretty(&summarize(&data))?);
            } else {
                print_report(&data);
            }
        }

        Command::Required {
            target,
            remaining,
            current,
            completed,
        } => {
            let (current, completed) = projection_inputs(current, completed, store);
            println!("Current CGPA {:.2} over {} credit hours, target {:.2}", current, completed, target);
            match required_gpa(current, completed, target, remaining) {
                Some(r) if r == 0.0 => println!("Target already reached: any grades over {} hours keep it", remaining),
                Some(r) => println!("Required GPA over the next {} credit hours: {:.2}", remaining, r),
                None if remaining <= 0.0 => println!("No remaining credit hours to work with"),
                None => println!("Target is unreachable in {} credit hours (would need more than 4.00)", remaining),
            }
        }

        Command::Classify { cgpa } => {
            println!("{:.2}: {} ({})", cgpa, classify(cgpa), letter_from_gpa(cgpa));
        }

        Command::Export { out } => {
            let data = with_derived(&store.load()?.unwrap_or_default());
            match out {
                Some(path) => {
                    save_record(&data, &path)?;
                    println!("Exported {} semesters to {}", data.semesters.len(), path.display());
                }
                None => println!("{}", export_to_json(&data)?),
            }
        }

        Command::Import { source } => {
            let json = fs::read_to_string(&source).map_err(|e| {
                GradeError::file_error("read", source.display().to_string(), e.to_string())
            })?;
            let data = parse_stored_data(&json)?;
            store.save(&data)?;
            println!("Imported {} semesters ({} courses)", data.semesters.len(), data.course_count());
        }

        Command::Clear => {
            store.clear()?;
            println!("Cleared {}", store.path().display());
        }
    }
    Ok(())
}

/// Current CGPA and counted credit hours for a projection. Values not given
/// on the command line come from the stored record.
fn projection_inputs(current: Option<f64>, completed: Option<f64>, store: &FileStore) -> (f64, f64) {
    match (current, completed) {
        (Some(c), Some(h)) => (c, h),
        (c, h) => {
            let data = load_or_default(store);
            (
                c.or_else(|| cgpa(&data.semesters)).unwrap_or(0.0),
                h.unwrap_or(completed_credit_hours(&data.semesters) as f64),
            )
        }
    }
}

fn print_report(data: &StoredData) {
    let derived = with_derived(data);
    let summary = summarize(data);

    println!("═══════════════════════════════════════");
    println!("  ACADEMIC RECORD");
    println!("═══════════════════════════════════════");

    if derived.semesters.is_empty() {
        println!();
        println!("No semesters yet. Add one with `add-semester`.");
    }

    for semester in &derived.semesters {
        println!();
        println!("{}  (SGPA {})", semester.name, fmt_gpa(semester.sgpa));
        for course in &semester.courses {
            match (course.percentage, course.grade, course.grade_points) {
                (Some(pct), Some(letter), Some(points)) => println!(
                    "  {:<28} {:>2} cr  {:>4}%  {}  {:.2}",
                    course.name, course.credit_hours, pct, letter, points
                ),
                _ => println!("  {:<28} {:>2} cr  (no marks)", course.name, course.credit_hours),
            }
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    println!("  CGPA: {}  over {} credit hours", fmt_gpa(summary.cgpa), summary.completed_credit_hours);
    if let (Some(tier), Some(letter)) = (summary.honor_tier, summary.display_letter) {
        println!("  Standing: {} ({})", tier, letter);
    }
    println!("═══════════════════════════════════════");
}

fn fmt_gpa(gpa: Option<f64>) -> String {
    gpa.map(|g| format!("{:.2}", g)).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::path::Path;

    fn temp_record_path(name: &str) -> PathBuf {
        temp_dir().join(format!("grade_cli_test_{}_{}.json", name, std::process::id()))
    }

    fn cleanup(path: &Path) {
        let _ = fs::remove_file(path);
        let mut lock = path.as_os_str().to_os_string();
        lock.push(".lock");
        let _ = fs::remove_file(PathBuf::from(lock));
    }

    fn add_course(semester: &str, name: &str, credits: u32, obtained: f64, total: f64) -> Command {
        Command::AddCourse {
            semester: semester.to_string(),
            name: name.to_string(),
            credits,
            obtained: Some(obtained),
            total: Some(total),
        }
    }

    #[test]
    fn test_edit_commands_build_a_record() {
        let path = temp_record_path("edit");
        let store = FileStore::new(&path);

        run(Command::AddSemester { name: "Fall".to_string() }, &store).unwrap();
        run(add_course("Fall", "Calculus", 3, 80.0, 100.0), &store).unwrap();
        run(add_course("Fall", "Physics", 2, 60.0, 100.0), &store).unwrap();

        let data = store.load().unwrap().unwrap();
        assert_eq!(data.semesters.len(), 1);
        assert_eq!(data.course_count(), 2);

        run(
            Command::RemoveCourse {
                semester: "Fall".to_string(),
                name: "physics".to_string(),
            },
            &store,
        )
        .unwrap();
        assert_eq!(store.load().unwrap().unwrap().course_count(), 1);

        let err = run(add_course("Spring", "Chemistry", 3, 70.0, 100.0), &store).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");

        cleanup(&path);
    }

    #[test]
    fn test_add_course_refuses_corrupt_record() {
        let path = temp_record_path("corrupt_edit");
        let corrupt = "{ this is not a record";
        fs::write(&path, corrupt).unwrap();
        let store = FileStore::new(&path);

        let err = run(add_course("Fall", "Calculus", 3, 80.0, 100.0), &store).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert_eq!(fs::read_to_string(&path).unwrap(), corrupt);

        let err = run(Command::AddSemester { name: "Fall".to_string() }, &store).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert_eq!(fs::read_to_string(&path).unwrap(), corrupt);

        cleanup(&path);
    }

    #[test]
    fn test_required_defaults_to_stored_record() {
        let path = temp_record_path("required");
        let store = FileStore::new(&path);

        run(Command::AddSemester { name: "Fall".to_string() }, &store).unwrap();
        run(add_course("Fall", "Calculus", 3, 80.0, 100.0), &store).unwrap();
        run(add_course("Fall", "Physics", 2, 60.0, 100.0), &store).unwrap();

        // (3 × 4.00 + 2 × 2.64) / 5 = 3.456
        let (current, completed) = projection_inputs(None, None, &store);
        assert!((current - 3.456).abs() < 1e-9);
        assert_eq!(completed, 5.0);

        assert_eq!(projection_inputs(Some(2.5), None, &store), (2.5, 5.0));
        assert_eq!(projection_inputs(Some(2.5), Some(30.0), &store), (2.5, 30.0));

        run(
            Command::Required {
                target: 3.5,
                remaining: 10.0,
                current: None,
                completed: None,
            },
            &store,
        )
        .unwrap();

        cleanup(&path);
    }

    #[test]
    fn test_required_with_missing_record() {
        let path = temp_record_path("required_missing");
        let store = FileStore::new(&path);

        assert_eq!(projection_inputs(None, None, &store), (0.0, 0.0));
        assert!(!path.exists());

        cleanup(&path);
    }

    #[test]
    fn test_import_rejects_bad_file_and_keeps_record() {
        let path = temp_record_path("import_target");
        let source = temp_record_path("import_source");
        let store = FileStore::new(&path);

        run(Command::AddSemester { name: "Fall".to_string() }, &store).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        fs::write(&source, "[1, 2, 3]").unwrap();
        let err = run(Command::Import { source: source.clone() }, &store).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        let missing = temp_record_path("import_missing");
        let err = run(Command::Import { source: missing }, &store).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        cleanup(&path);
        let _ = fs::remove_file(&source);
    }

    #[test]
    fn test_export_then_import() {
        let path = temp_record_path("export_record");
        let out = temp_record_path("export_out");
        let store = FileStore::new(&path);

        run(Command::AddSemester { name: "Fall".to_string() }, &store).unwrap();
        run(add_course("Fall", "Calculus", 3, 80.0, 100.0), &store).unwrap();
        run(Command::Export { out: Some(out.clone()) }, &store).unwrap();

        let exported = parse_stored_data(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(exported.semesters[0].sgpa, Some(4.0));
        assert_eq!(exported.semesters[0].courses[0].grade_points, Some(4.0));

        run(Command::Clear, &store).unwrap();
        assert!(!path.exists());

        run(Command::Import { source: out.clone() }, &store).unwrap();
        assert_eq!(store.load().unwrap().unwrap().course_count(), 1);

        cleanup(&path);
        cleanup(&out);
    }
}
