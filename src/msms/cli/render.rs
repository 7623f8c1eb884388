use colored::Colorize;
use msms::api::Statistics;
use msms::model::{AttendanceRecord, Student, Teacher};
use msms::store::fs::corrupt_backup_path;
use msms::store::LoadOutcome;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Load notices go to stderr so scripted output (e.g. `stats --json`) stays clean.
pub fn print_load_outcome(outcome: LoadOutcome, path: &Path) {
    let notice = match outcome {
        LoadOutcome::Loaded => return,
        LoadOutcome::Created => format!(
            "Data file {} not found, created new file with defaults",
            path.display()
        )
        .dimmed(),
        LoadOutcome::Recovered => format!(
            "Data file {} was unreadable or invalid, started with empty data (old contents, if readable, kept in {})",
            path.display(),
            corrupt_backup_path(path).display()
        )
        .yellow(),
        LoadOutcome::Repaired => format!(
            "Data file {} had inconsistencies and was repaired",
            path.display()
        )
        .yellow(),
    };
    eprintln!("{}", notice);
}

pub fn teacher_line(teacher: &Teacher) -> String {
    format!("{} (ID {}, {})", teacher.name, teacher.id, teacher.subject)
}

pub fn student_line(student: &Student) -> String {
    format!("{} (ID {}, grade {})", student.name, student.id, student.grade)
}

pub fn attendance_line(record: &AttendanceRecord) -> String {
    format!(
        "{}  {}  {}",
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        record.course_id,
        record.student_name
    )
}

pub fn statistics_lines(stats: &Statistics) -> Vec<String> {
    let mut lines = vec![
        format!("Teachers:           {}", stats.teacher_count),
        format!("Students:           {}", stats.student_count),
        format!("Attendance records: {}", stats.attendance_count),
        format!("Average grade:      {:.2}", stats.average_grade),
    ];
    if stats.orphaned_attendance > 0 {
        lines.push(format!(
            "  of which for removed students: {}",
            stats.orphaned_attendance
        ));
    }
    if !stats.check_ins_by_course.is_empty() {
        lines.push("Check-ins by course:".to_string());
        for (course, count) in &stats.check_ins_by_course {
            lines.push(format!("  {}: {}", course, count));
        }
    }
    lines
}

pub fn print_statistics(stats: &Statistics) {
    println!("{}", "Statistics".bold());
    for line in statistics_lines(stats) {
        println!("{}", line);
    }
}

pub fn print_attendance(records: &[AttendanceRecord]) {
    if records.is_empty() {
        println!("{}", "No check-ins found.".dimmed());
        return;
    }
    for record in records {
        println!("{}", attendance_line(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    #[test]
    fn statistics_lines_format_average_with_two_decimals() {
        let stats = Statistics {
            teacher_count: 1,
            student_count: 3,
            attendance_count: 0,
            average_grade: 82.0 + 2.0 / 3.0,
            orphaned_attendance: 0,
            check_ins_by_course: BTreeMap::new(),
        };
        let lines = statistics_lines(&stats);
        assert_eq!(lines.len(), 4);
        assert!(lines[3].ends_with("82.67"));
    }

    #[test]
    fn statistics_lines_list_courses_and_orphans() {
        let stats = Statistics {
            teacher_count: 0,
            student_count: 0,
            attendance_count: 2,
            average_grade: 0.0,
            orphaned_attendance: 2,
            check_ins_by_course: BTreeMap::from([("Piano101".to_string(), 2)]),
        };
        let lines = statistics_lines(&stats);
        assert!(lines.iter().any(|l| l.contains("removed students: 2")));
        assert!(lines.contains(&"  Piano101: 2".to_string()));
    }

    #[test]
    fn attendance_line_shows_time_course_and_name() {
        let record = AttendanceRecord {
            student_id: 1,
            student_name: "Alice".into(),
            course_id: "MUS101".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
        };
        assert_eq!(attendance_line(&record), "2024-05-06 07:08:09  MUS101  Alice");
    }

    #[test]
    fn student_line_prints_integer_grades_plainly() {
        let student = Student {
            id: 1,
            name: "Alice".into(),
            grade: 92.0,
        };
        assert_eq!(student_line(&student), "Alice (ID 1, grade 92)");
    }
}
