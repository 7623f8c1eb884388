use clap::{Parser, Subcommand};
use msms::model::EntityId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "msms", bin_name = "msms", version)]
#[command(about = "Music school records: teachers, students and attendance", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the data file (default: msms.json)
    #[arg(short, long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Check the storage round-trip on a throwaway file and exit
    #[arg(long, help_heading = "Options")]
    pub self_test: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu (default when no command is given)
    Menu,

    /// Add, update or remove teachers
    #[command(subcommand, alias = "t")]
    Teacher(TeacherCommands),

    /// Add, update or remove students
    #[command(subcommand, alias = "s")]
    Student(StudentCommands),

    /// Record a student's attendance for a course
    #[command(alias = "checkin")]
    CheckIn {
        /// Student ID
        student_id: EntityId,

        /// Course identifier (e.g. MUS101)
        course_id: String,
    },

    /// List a student's check-ins
    Attendance {
        /// Student ID
        student_id: EntityId,
    },

    /// Write a student card text file
    Card {
        /// Student ID
        student_id: EntityId,

        /// Output file (default: <cards_dir>/student_<id>_card.txt)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TeacherCommands {
    /// Add a teacher
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        subject: String,
    },

    /// Update some fields of a teacher
    Update {
        id: EntityId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        subject: Option<String>,
    },

    /// Remove a teacher
    #[command(alias = "rm")]
    Remove { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// Add a student
    Add {
        #[arg(long)]
        name: String,

        /// Grade between 0 and 100
        #[arg(long, allow_hyphen_values = true)]
        grade: String,
    },

    /// Update some fields of a student
    Update {
        id: EntityId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        grade: Option<String>,
    },

    /// Remove a student
    #[command(alias = "rm")]
    Remove { id: EntityId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["msms"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.self_test);
    }

    #[test]
    fn parses_student_update_with_partial_fields() {
        let cli =
            Cli::try_parse_from(["msms", "--data", "x.json", "student", "update", "3", "--grade", "88"])
                .unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("x.json")));
        match cli.command {
            Some(Commands::Student(StudentCommands::Update { id, name, grade })) => {
                assert_eq!(id, 3);
                assert_eq!(name, None);
                assert_eq!(grade.as_deref(), Some("88"));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn negative_grade_reaches_validation() {
        let cli =
            Cli::try_parse_from(["msms", "student", "add", "--name", "Al", "--grade", "-5"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Student(StudentCommands::Add { ref grade, .. })) if grade == "-5"
        ));
    }

    #[test]
    fn check_in_takes_positional_args() {
        let cli = Cli::try_parse_from(["msms", "check-in", "1", "Piano101"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::CheckIn { student_id: 1, ref course_id }) if course_id == "Piano101"
        ));
    }
}
